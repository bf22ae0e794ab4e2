//! Component signatures
//!
//! A signature is a fixed-width bitset over component-type ids. Entities
//! carry the set of components they have; systems carry the set they need.

use std::fmt;

use super::component::ComponentId;

/// Maximum number of distinct component types one registry can track
pub const MAX_COMPONENTS: usize = 64;

/// Bitset of component-type ids, `MAX_COMPONENTS` bits wide
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signature(u64);

impl Signature {
    /// Signature with no bits set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set the bit for `id`
    pub fn set(&mut self, id: ComponentId) {
        self.0 |= Self::bit(id);
    }

    /// Clear the bit for `id`
    pub fn unset(&mut self, id: ComponentId) {
        self.0 &= !Self::bit(id);
    }

    /// Whether the bit for `id` is set
    pub fn test(&self, id: ComponentId) -> bool {
        self.0 & Self::bit(id) != 0
    }

    /// Clear every bit
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Whether no bit is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of set bits
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// `(self & required) == required`
    ///
    /// An entity signature is of interest to a system when it contains every
    /// component the system requires. The empty requirement matches anything.
    pub fn contains_all(&self, required: &Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Whether the two signatures share any component
    pub fn intersects(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterate over the set component ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..MAX_COMPONENTS).filter(|&i| self.0 & (1u64 << i) != 0).map(ComponentId::new)
    }

    fn bit(id: ComponentId) -> u64 {
        debug_assert!(id.index() < MAX_COMPONENTS);
        1u64 << id.index()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#066b})", self.0)
    }
}
