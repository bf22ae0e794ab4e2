//! Entity-Component-System implementation
//!
//! Entities are plain ids, components live in per-type pools indexed by
//! entity id, and systems select entities by component signature.

pub mod entity;
pub mod signature;
pub mod component;
pub mod pool;
pub mod system;
pub mod registry;
pub mod error;
pub mod components;
pub mod systems;

#[cfg(test)]
mod tests;

pub use entity::{Entity, EntityState};
pub use signature::{Signature, MAX_COMPONENTS};
pub use component::{Component, ComponentId, ComponentTypes};
pub use pool::{ComponentPool, Pool};
pub use system::{FrameContext, System, SystemBase};
pub use registry::Registry;
pub use error::EcsError;
