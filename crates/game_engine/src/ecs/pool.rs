//! Component pools
//!
//! One pool per component type, indexed directly by entity id. The backing
//! vector is dense but its contents are sparse: slots of entities that never
//! received the component stay empty. Pools only ever grow.

use std::any::{type_name, Any};

use super::component::Component;

/// Type-erased view of a pool
///
/// The registry keeps every pool behind this trait so pools of unrelated
/// component types can share one table, and downcasts to [`Pool<T>`] on
/// typed access.
pub trait ComponentPool: Any {
    /// Number of addressable slots
    fn len(&self) -> usize;

    /// Whether the pool has no slots
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grow to at least `len` slots; never shrinks
    fn grow_to(&mut self, len: usize);

    /// Drop the value stored for entity slot `index`, if any
    fn reset(&mut self, index: usize);

    /// Empty every slot while keeping the capacity
    fn clear(&mut self);

    /// Name of the stored component type
    fn component_name(&self) -> &'static str;

    /// Upcast for downcasting to the typed pool
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the typed pool
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Storage for every instance of one component type
pub struct Pool<T: Component> {
    data: Vec<Option<T>>,
}

impl<T: Component> Pool<T> {
    /// Create a pool with `len` empty slots
    pub fn new(len: usize) -> Self {
        let mut data = Vec::with_capacity(len);
        data.resize_with(len, || None);
        Self { data }
    }

    /// Store `value` at `index`, growing if needed; replaces any old value
    pub fn set(&mut self, index: usize, value: T) {
        if index >= self.data.len() {
            self.grow_to(index + 1);
        }
        self.data[index] = Some(value);
    }

    /// Value stored at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index).and_then(Option::as_ref)
    }

    /// Mutable value stored at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index).and_then(Option::as_mut)
    }

    /// Remove and return the value at `index`
    pub fn take(&mut self, index: usize) -> Option<T> {
        self.data.get_mut(index).and_then(Option::take)
    }

    /// Number of occupied slots
    pub fn occupied(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<T: Component> ComponentPool for Pool<T> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn grow_to(&mut self, len: usize) {
        if len > self.data.len() {
            self.data.resize_with(len, || None);
        }
    }

    fn reset(&mut self, index: usize) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = None;
        }
    }

    fn clear(&mut self) {
        self.data.iter_mut().for_each(|slot| *slot = None);
    }

    fn component_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
