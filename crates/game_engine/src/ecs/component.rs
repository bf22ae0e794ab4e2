//! Component trait and component-type ids
//!
//! Every distinct component type gets a small integer id the first time a
//! registry sees it. The id picks the signature bit and the pool slot for
//! that type. Ids are handed out in increasing order and never change for
//! the lifetime of the registry that assigned them.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;

use super::error::EcsError;
use super::signature::MAX_COMPONENTS;

/// Marker trait for components
///
/// Components are plain data with no borrowed state, so any `'static` type
/// can be one by opting in.
pub trait Component: 'static {}

/// Dense id of a component type, in `[0, MAX_COMPONENTS)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this id in signatures and the pool table
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-registry table mapping Rust types to component ids
#[derive(Debug, Default)]
pub struct ComponentTypes {
    by_type: HashMap<TypeId, ComponentId>,
    names: Vec<&'static str>,
}

impl ComponentTypes {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `T`, assigning the next free one if `T` is new
    pub fn id_of<T: Component>(&mut self) -> Result<ComponentId, EcsError> {
        self.id_of_raw(TypeId::of::<T>(), type_name::<T>())
    }

    /// Id of `T` if it has been seen before
    pub fn lookup<T: Component>(&self) -> Option<ComponentId> {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Type-erased form of [`ComponentTypes::id_of`]
    pub(crate) fn id_of_raw(
        &mut self,
        type_id: TypeId,
        name: &'static str,
    ) -> Result<ComponentId, EcsError> {
        if let Some(&id) = self.by_type.get(&type_id) {
            return Ok(id);
        }

        if self.names.len() >= MAX_COMPONENTS {
            return Err(EcsError::ComponentCapacityExceeded {
                type_name: name,
                max: MAX_COMPONENTS,
            });
        }

        let id = ComponentId::new(self.names.len());
        self.by_type.insert(type_id, id);
        self.names.push(name);
        log::debug!("Component type {} registered with id {}", name, id);
        Ok(id)
    }

    /// Type name recorded for `id`
    pub fn name(&self, id: ComponentId) -> Option<&'static str> {
        self.names.get(id.index()).copied()
    }

    /// Number of component types seen so far
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no component type has been seen
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
