//! System trait and shared system state
//!
//! A system declares which components it needs while it is being built and
//! keeps the list of entities the registry matched against that
//! requirement. Per-frame logic receives the registry and a [`FrameContext`],
//! so every system is driven through the same call.

use std::any::{type_name, Any, TypeId};

use super::component::{Component, ComponentTypes};
use super::error::EcsError;
use super::registry::Registry;
use super::signature::Signature;
use super::Entity;
use crate::assets::AssetStore;
use crate::render::RenderSurface;

/// Everything a system may need during one frame
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Milliseconds since the game started
    pub ticks_ms: u64,
    /// Surface to draw into
    pub surface: &'a mut dyn RenderSurface,
    /// Loaded textures
    pub assets: &'a AssetStore,
}

/// Requirement signature and matched entities of a system
#[derive(Debug, Default)]
pub struct SystemBase {
    requirements: Vec<(TypeId, &'static str)>,
    signature: Signature,
    entities: Vec<Entity>,
}

impl SystemBase {
    /// Create a base that requires nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Require entities to have component `T`
    ///
    /// Call this while constructing the system. The requirement becomes a
    /// signature bit when the system is added to a registry.
    pub fn require_component<T: Component>(&mut self) {
        let type_id = TypeId::of::<T>();
        if !self.requirements.iter().any(|(id, _)| *id == type_id) {
            self.requirements.push((type_id, type_name::<T>()));
        }
    }

    /// Turn the declared requirements into signature bits
    pub(crate) fn resolve_signature(&mut self, types: &mut ComponentTypes) -> Result<(), EcsError> {
        let mut signature = Signature::empty();
        for &(type_id, name) in &self.requirements {
            signature.set(types.id_of_raw(type_id, name)?);
        }
        self.signature = signature;
        Ok(())
    }

    /// Components an entity must have to be matched
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Whether an entity with `entity_signature` belongs in this system
    pub fn is_interested_in(&self, entity_signature: &Signature) -> bool {
        entity_signature.contains_all(&self.signature)
    }

    /// Entities currently matched to this system
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Whether `entity` is matched to this system
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Append `entity`; adding it twice keeps one entry
    pub fn add_entity(&mut self, entity: Entity) {
        if !self.contains(entity) {
            self.entities.push(entity);
        }
    }

    /// Erase `entity`, keeping the order of the others
    pub fn remove_entity(&mut self, entity: Entity) {
        self.entities.retain(|&other| other != entity);
    }
}

/// Upcasting helper so boxed systems can be downcast to their concrete type
pub trait AsAny: Any {
    /// `&self` as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// `&mut self` as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// `Box<Self>` as `Box<dyn Any>`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Logic that runs once per frame over the entities matching its signature
pub trait System: AsAny {
    /// Shared system state
    fn base(&self) -> &SystemBase;

    /// Mutable shared system state
    fn base_mut(&mut self) -> &mut SystemBase;

    /// Name used in logs and errors
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Run one frame of this system
    fn update(&mut self, registry: &mut Registry, ctx: &mut FrameContext<'_>) -> Result<(), EcsError>;
}

impl dyn System {
    /// The concrete system, if it is an `S`
    pub fn downcast_ref<S: System>(&self) -> Option<&S> {
        self.as_any().downcast_ref::<S>()
    }

    /// The concrete system, mutably, if it is an `S`
    pub fn downcast_mut<S: System>(&mut self) -> Option<&mut S> {
        self.as_any_mut().downcast_mut::<S>()
    }

    /// Unbox into the concrete system, if it is an `S`
    pub fn downcast_box<S: System>(self: Box<Self>) -> Option<Box<S>> {
        self.into_any().downcast::<S>().ok()
    }
}
