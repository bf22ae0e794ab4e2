//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// A plain id with value semantics. Equality and ordering compare the id
/// only; all state belongs to the [`Registry`](super::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(crate) fn new(id: u32) -> Self {
        Self { id }
    }
    
    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Slot of this entity in id-indexed tables
    pub(crate) fn index(&self) -> usize {
        self.id as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity[{}]", self.id)
    }
}

/// Lifecycle state of an entity id, as seen by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Created this frame, not yet visible to systems
    Queued,
    /// Matched into systems by a previous update
    Live,
    /// Killed this frame, still in systems until the next update
    Dying,
    /// Reconciled out of every system, id waiting for reuse
    Free,
}

impl EntityState {
    /// Whether the id currently names an entity components can be attached to
    pub fn is_alive(self) -> bool {
        !matches!(self, Self::Free)
    }
}
