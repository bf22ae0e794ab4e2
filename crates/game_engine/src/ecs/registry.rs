//! ECS Registry
//!
//! The registry owns every entity signature, every component pool and every
//! registered system. Creating and killing entities only queues the change;
//! [`Registry::update`] applies the queued changes to system membership once
//! per frame, so no system sees its entity list change while it iterates.

use std::any::{type_name, TypeId};
use std::collections::{BTreeSet, HashMap, VecDeque};

use super::component::{Component, ComponentId, ComponentTypes};
use super::entity::{Entity, EntityState};
use super::error::EcsError;
use super::pool::{ComponentPool, Pool};
use super::signature::Signature;
use super::system::{FrameContext, System, SystemBase};
use crate::config::RegistryConfig;

/// Owner of entities, components and systems
pub struct Registry {
    /// Ids handed out so far; also the length of the id-indexed tables
    num_entities: u32,

    /// Lifecycle state per entity id
    entity_states: Vec<EntityState>,

    /// Which components each entity has (index = entity id)
    entity_signatures: Vec<Signature>,

    /// Component-type ids assigned by this registry
    component_types: ComponentTypes,

    /// One pool per component type (index = component id)
    component_pools: Vec<Option<Box<dyn ComponentPool>>>,

    /// Registered systems keyed by their concrete type
    systems: HashMap<TypeId, Box<dyn System>>,

    /// Entities created since the last update
    entities_to_be_added: BTreeSet<Entity>,

    /// Entities killed since the last update
    entities_to_be_killed: BTreeSet<Entity>,

    /// Live entities whose signature or candidate systems changed
    entities_to_be_refreshed: BTreeSet<Entity>,

    /// Ids of reconciled dead entities, reused first-in first-out
    free_ids: VecDeque<u32>,

    initial_pool_capacity: usize,
}

impl Registry {
    /// Create a registry with default settings
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// Create a registry with the given settings
    pub fn with_config(config: &RegistryConfig) -> Self {
        log::info!("Registry created");
        Self {
            num_entities: 0,
            entity_states: Vec::new(),
            entity_signatures: Vec::new(),
            component_types: ComponentTypes::new(),
            component_pools: Vec::new(),
            systems: HashMap::new(),
            entities_to_be_added: BTreeSet::new(),
            entities_to_be_killed: BTreeSet::new(),
            entities_to_be_refreshed: BTreeSet::new(),
            free_ids: VecDeque::new(),
            initial_pool_capacity: config.initial_pool_capacity.max(1),
        }
    }

    // ---------------------------------------------------------------------
    // Entity lifecycle
    // ---------------------------------------------------------------------

    /// Create an entity
    ///
    /// The handle can receive components right away but systems only see the
    /// entity after the next [`Registry::update`]. Freed ids are reused
    /// before new ones are minted.
    pub fn create_entity(&mut self) -> Entity {
        let id = if let Some(id) = self.free_ids.pop_front() {
            id
        } else {
            let id = self.num_entities;
            self.num_entities += 1;
            let len = self.num_entities as usize;
            self.entity_states.resize(len, EntityState::Free);
            self.entity_signatures.resize(len, Signature::empty());
            id
        };

        let entity = Entity::new(id);
        self.entity_states[entity.index()] = EntityState::Queued;
        self.entities_to_be_added.insert(entity);

        log::debug!("Entity created with id = {}", id);
        entity
    }

    /// Queue `entity` for destruction at the next update
    ///
    /// Killing an entity twice before the update has no extra effect.
    pub fn kill_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.check_alive(entity)?;
        self.entity_states[entity.index()] = EntityState::Dying;
        if self.entities_to_be_killed.insert(entity) {
            log::debug!("Entity {} queued for destruction", entity.id());
        }
        Ok(())
    }

    /// Reconcile queued changes with system membership
    ///
    /// Created and changed entities are matched first, then killed entities
    /// are removed from every system, their signature is cleared, their
    /// component slots are emptied and their id is freed.
    pub fn update(&mut self) {
        let added = std::mem::take(&mut self.entities_to_be_added);
        let refreshed = std::mem::take(&mut self.entities_to_be_refreshed);

        for &entity in &added {
            self.sync_entity_with_systems(entity);
            let state = &mut self.entity_states[entity.index()];
            if *state == EntityState::Queued {
                *state = EntityState::Live;
            }
        }
        for &entity in refreshed.difference(&added) {
            self.sync_entity_with_systems(entity);
        }

        let killed = std::mem::take(&mut self.entities_to_be_killed);
        for entity in killed {
            self.remove_entity_from_systems(entity);

            let index = entity.index();
            self.entity_signatures[index].reset();
            for pool in self.component_pools.iter_mut().flatten() {
                pool.reset(index);
            }
            self.entity_states[index] = EntityState::Free;
            self.free_ids.push_back(entity.id());

            log::debug!("Entity {} destroyed, id freed", entity.id());
        }
    }

    /// Add or remove `entity` so every system holds it exactly when its
    /// signature matches
    fn sync_entity_with_systems(&mut self, entity: Entity) {
        let signature = self.entity_signatures[entity.index()];
        for system in self.systems.values_mut() {
            let base = system.base_mut();
            if base.is_interested_in(&signature) {
                base.add_entity(entity);
            } else {
                base.remove_entity(entity);
            }
        }
    }

    fn remove_entity_from_systems(&mut self, entity: Entity) {
        for system in self.systems.values_mut() {
            system.base_mut().remove_entity(entity);
        }
    }

    /// Lifecycle state of `entity`, `None` if the id was never handed out
    pub fn entity_state(&self, entity: Entity) -> Option<EntityState> {
        self.entity_states.get(entity.index()).copied()
    }

    /// Whether `entity` names a created, not yet destroyed entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entity_state(entity).is_some_and(EntityState::is_alive)
    }

    /// Number of ids handed out so far, including freed ones
    pub fn num_entities(&self) -> u32 {
        self.num_entities
    }

    /// Signature of `entity`
    pub fn entity_signature(&self, entity: Entity) -> Result<Signature, EcsError> {
        self.check_alive(entity)?;
        Ok(self.entity_signatures[entity.index()])
    }

    fn check_alive(&self, entity: Entity) -> Result<(), EcsError> {
        match self.entity_state(entity) {
            None => Err(EcsError::UnknownEntity(entity)),
            Some(EntityState::Free) => Err(EcsError::DeadEntity(entity)),
            Some(_) => Ok(()),
        }
    }

    /// Queue a live entity for re-matching at the next update
    fn mark_changed(&mut self, entity: Entity) {
        if self.entity_states[entity.index()] == EntityState::Live {
            self.entities_to_be_refreshed.insert(entity);
        }
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    /// Attach `component` to `entity`, replacing any previous value of `T`
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        self.check_alive(entity)?;
        let component_id = self.component_types.id_of::<T>()?;
        let index = entity.index();

        let min_len = self.initial_pool_capacity.max(self.num_entities as usize);
        let pool = self.pool_mut_or_insert::<T>(component_id, min_len);
        if index >= pool.len() {
            pool.grow_to(min_len.max(index + 1));
        }
        pool.set(index, component);

        self.entity_signatures[index].set(component_id);
        self.mark_changed(entity);

        log::debug!(
            "Component ID [{}] was added to entity ID: {}",
            component_id,
            entity.id()
        );
        Ok(())
    }

    /// Detach `T` from `entity`; a no-op if it does not have one
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.check_alive(entity)?;
        let Some(component_id) = self.component_types.lookup::<T>() else {
            return Ok(());
        };

        let index = entity.index();
        if !self.entity_signatures[index].test(component_id) {
            return Ok(());
        }

        self.entity_signatures[index].unset(component_id);
        if let Some(pool) = self.erased_pool_mut(component_id) {
            pool.reset(index);
        }
        self.mark_changed(entity);

        log::debug!(
            "Component ID [{}] was removed from entity ID: {}",
            component_id,
            entity.id()
        );
        Ok(())
    }

    /// Whether `entity` currently has a `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        let Some(component_id) = self.component_types.lookup::<T>() else {
            return false;
        };
        self.is_alive(entity) && self.entity_signatures[entity.index()].test(component_id)
    }

    /// The `T` attached to `entity`
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.check_alive(entity)?;
        self.typed_pool::<T>()
            .filter(|_| self.has_component::<T>(entity))
            .and_then(|pool| pool.get(entity.index()))
            .ok_or_else(|| Self::missing::<T>(entity))
    }

    /// Mutable access to the `T` attached to `entity`
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.check_alive(entity)?;
        if !self.has_component::<T>(entity) {
            return Err(Self::missing::<T>(entity));
        }
        self.typed_pool_mut::<T>()
            .and_then(|pool| pool.get_mut(entity.index()))
            .ok_or_else(|| Self::missing::<T>(entity))
    }

    /// Id assigned to component type `T`, if it has been used
    pub fn component_id<T: Component>(&self) -> Option<ComponentId> {
        self.component_types.lookup::<T>()
    }

    /// Component types known to this registry
    pub fn component_types(&self) -> &ComponentTypes {
        &self.component_types
    }

    /// Number of slots in the pool for `T`, `None` before the first add
    pub fn pool_capacity<T: Component>(&self) -> Option<usize> {
        self.typed_pool::<T>().map(ComponentPool::len)
    }

    fn missing<T: Component>(entity: Entity) -> EcsError {
        EcsError::ComponentMissing {
            entity,
            component: type_name::<T>(),
        }
    }

    fn erased_pool_mut(&mut self, component_id: ComponentId) -> Option<&mut (dyn ComponentPool + 'static)> {
        self.component_pools.get_mut(component_id.index())?.as_deref_mut()
    }

    fn typed_pool<T: Component>(&self) -> Option<&Pool<T>> {
        let component_id = self.component_types.lookup::<T>()?;
        self.component_pools
            .get(component_id.index())?
            .as_deref()?
            .as_any()
            .downcast_ref::<Pool<T>>()
    }

    fn typed_pool_mut<T: Component>(&mut self) -> Option<&mut Pool<T>> {
        let component_id = self.component_types.lookup::<T>()?;
        self.erased_pool_mut(component_id)?
            .as_any_mut()
            .downcast_mut::<Pool<T>>()
    }

    fn pool_mut_or_insert<T: Component>(&mut self, component_id: ComponentId, len: usize) -> &mut Pool<T> {
        let index = component_id.index();
        if index >= self.component_pools.len() {
            self.component_pools.resize_with(index + 1, || None);
        }

        let slot = &mut self.component_pools[index];
        let pool = slot.get_or_insert_with(|| Box::new(Pool::<T>::new(len)) as Box<dyn ComponentPool>);
        match (**pool).as_any_mut().downcast_mut::<Pool<T>>() {
            Some(pool) => pool,
            // Ids come from TypeId, so the pool at this index always stores T
            None => unreachable!("component pool {} does not store {}", index, type_name::<T>()),
        }
    }

    // ---------------------------------------------------------------------
    // Systems
    // ---------------------------------------------------------------------

    /// Register `system`
    ///
    /// Its declared requirements become its signature here. Entities that are
    /// already live are matched against it at the next update.
    pub fn add_system<S: System>(&mut self, mut system: S) -> Result<(), EcsError> {
        let key = TypeId::of::<S>();
        if self.systems.contains_key(&key) {
            return Err(EcsError::SystemAlreadyRegistered(type_name::<S>()));
        }

        system.base_mut().resolve_signature(&mut self.component_types)?;

        for (id, state) in (0u32..).zip(self.entity_states.iter()) {
            if *state == EntityState::Live {
                self.entities_to_be_refreshed.insert(Entity::new(id));
            }
        }

        log::info!("System {} registered", system.name());
        self.systems.insert(key, Box::new(system));
        Ok(())
    }

    /// Unregister the system of type `S` and hand it back
    pub fn remove_system<S: System>(&mut self) -> Result<S, EcsError> {
        let system = self
            .systems
            .remove(&TypeId::of::<S>())
            .ok_or(EcsError::SystemNotRegistered(type_name::<S>()))?;

        log::info!("System {} removed", system.name());
        match system.downcast_box::<S>() {
            Some(system) => Ok(*system),
            None => unreachable!("system map key does not match its value"),
        }
    }

    /// Whether a system of type `S` is registered
    pub fn has_system<S: System>(&self) -> bool {
        self.systems.contains_key(&TypeId::of::<S>())
    }

    /// The registered system of type `S`
    pub fn get_system<S: System>(&self) -> Result<&S, EcsError> {
        self.systems
            .get(&TypeId::of::<S>())
            .and_then(|system| system.downcast_ref::<S>())
            .ok_or(EcsError::SystemNotRegistered(type_name::<S>()))
    }

    /// Mutable access to the registered system of type `S`
    pub fn get_system_mut<S: System>(&mut self) -> Result<&mut S, EcsError> {
        self.systems
            .get_mut(&TypeId::of::<S>())
            .and_then(|system| system.downcast_mut::<S>())
            .ok_or(EcsError::SystemNotRegistered(type_name::<S>()))
    }

    /// Entities matched to the system of type `S`
    pub fn system_entities<S: System>(&self) -> Result<&[Entity], EcsError> {
        Ok(self.get_system::<S>()?.base().entities())
    }

    /// Matched entities of `base` that still carry every required component
    ///
    /// Components removed during the frame leave the entity in the system
    /// until the next update; this filters such entities out.
    pub fn current_entities(&self, base: &SystemBase) -> Vec<Entity> {
        base.entities()
            .iter()
            .copied()
            .filter(|&entity| {
                self.is_alive(entity)
                    && base.is_interested_in(&self.entity_signatures[entity.index()])
            })
            .collect()
    }

    /// Run one frame of the system of type `S`
    ///
    /// The system is detached from the registry while it runs so it can
    /// borrow the registry mutably. Adding or removing systems of type `S`
    /// from inside its own update is not supported.
    pub fn run_system<S: System>(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
        let key = TypeId::of::<S>();
        let mut system = self
            .systems
            .remove(&key)
            .ok_or(EcsError::SystemNotRegistered(type_name::<S>()))?;

        let result = system.update(self, ctx);
        self.systems.insert(key, system);
        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        log::info!("Registry destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Position(f32, f32);
    impl Component for Position {}

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity(f32, f32);
    impl Component for Velocity {}

    #[derive(Debug, Clone, PartialEq)]
    struct Tag;
    impl Component for Tag {}

    struct Mover {
        base: SystemBase,
    }

    impl Mover {
        fn new() -> Self {
            let mut base = SystemBase::new();
            base.require_component::<Position>();
            base.require_component::<Velocity>();
            Self { base }
        }
    }

    impl System for Mover {
        fn base(&self) -> &SystemBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SystemBase {
            &mut self.base
        }

        fn update(&mut self, registry: &mut Registry, ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
            for entity in registry.current_entities(&self.base) {
                let velocity = registry.get_component::<Velocity>(entity)?.clone();
                let position = registry.get_component_mut::<Position>(entity)?;
                position.0 += velocity.0 * ctx.delta_time;
                position.1 += velocity.1 * ctx.delta_time;
            }
            Ok(())
        }
    }

    struct Tagged {
        base: SystemBase,
    }

    impl Tagged {
        fn new() -> Self {
            let mut base = SystemBase::new();
            base.require_component::<Tag>();
            Self { base }
        }
    }

    impl System for Tagged {
        fn base(&self) -> &SystemBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SystemBase {
            &mut self.base
        }

        fn update(&mut self, registry: &mut Registry, _ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
            for &entity in self.base.entities() {
                registry.kill_entity(entity)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_create_entity_assigns_sequential_ids() {
        let mut registry = Registry::new();
        let a = registry.create_entity();
        let b = registry.create_entity();
        assert_eq!(a.id(), 0);
        assert_eq!(b.id(), 1);
        assert_eq!(registry.num_entities(), 2);
        assert_eq!(registry.entity_state(a), Some(EntityState::Queued));
    }

    #[test]
    fn test_add_get_overwrite_component() {
        let mut registry = Registry::new();
        let entity = registry.create_entity();

        registry.add_component(entity, Position(1.0, 2.0)).unwrap();
        assert!(registry.has_component::<Position>(entity));
        assert_eq!(registry.get_component::<Position>(entity).unwrap(), &Position(1.0, 2.0));

        registry.add_component(entity, Position(5.0, 6.0)).unwrap();
        assert_eq!(registry.get_component::<Position>(entity).unwrap(), &Position(5.0, 6.0));

        registry.get_component_mut::<Position>(entity).unwrap().0 = 9.0;
        assert_eq!(registry.get_component::<Position>(entity).unwrap().0, 9.0);
    }

    #[test]
    fn test_missing_component_is_an_error() {
        let mut registry = Registry::new();
        let entity = registry.create_entity();
        registry.add_component(entity, Position(0.0, 0.0)).unwrap();

        assert!(matches!(
            registry.get_component::<Velocity>(entity),
            Err(EcsError::ComponentMissing { entity: e, .. }) if e == entity
        ));
        assert!(!registry.has_component::<Velocity>(entity));
    }

    #[test]
    fn test_remove_component_clears_bit_and_slot() {
        let mut registry = Registry::new();
        let entity = registry.create_entity();
        registry.add_component(entity, Position(1.0, 1.0)).unwrap();
        let component_id = registry.component_id::<Position>().unwrap();

        registry.remove_component::<Position>(entity).unwrap();
        assert!(!registry.has_component::<Position>(entity));
        assert!(!registry.entity_signature(entity).unwrap().test(component_id));
        assert!(registry.get_component::<Position>(entity).is_err());
        assert_eq!(registry.typed_pool::<Position>().unwrap().occupied(), 0);

        // Removing something that was never there is fine
        registry.remove_component::<Velocity>(entity).unwrap();
    }

    #[test]
    fn test_unknown_entity_rejected() {
        let mut registry = Registry::new();
        let stranger = Entity::new(42);
        assert!(matches!(registry.add_component(stranger, Tag), Err(EcsError::UnknownEntity(_))));
        assert!(matches!(registry.kill_entity(stranger), Err(EcsError::UnknownEntity(_))));
        assert!(!registry.has_component::<Tag>(stranger));
    }

    #[test]
    fn test_freed_entity_rejected() {
        let mut registry = Registry::new();
        let entity = registry.create_entity();
        registry.add_component(entity, Tag).unwrap();
        registry.kill_entity(entity).unwrap();
        registry.update();

        assert!(!registry.is_alive(entity));
        assert!(matches!(registry.get_component::<Tag>(entity), Err(EcsError::DeadEntity(_))));
        assert!(matches!(registry.add_component(entity, Tag), Err(EcsError::DeadEntity(_))));
        assert!(!registry.has_component::<Tag>(entity));
    }

    #[test]
    fn test_pool_grows_with_entities() {
        let mut registry = Registry::with_config(&RegistryConfig { initial_pool_capacity: 4 });
        let entities: Vec<Entity> = (0..10).map(|_| registry.create_entity()).collect();

        registry.add_component(entities[0], Tag).unwrap();
        assert_eq!(registry.pool_capacity::<Tag>(), Some(10));

        for _ in 0..20 {
            registry.create_entity();
        }
        let last = Entity::new(registry.num_entities() - 1);
        registry.add_component(last, Tag).unwrap();
        assert_eq!(registry.pool_capacity::<Tag>(), Some(30));

        registry.add_component(entities[1], Tag).unwrap();
        assert_eq!(registry.pool_capacity::<Tag>(), Some(30));
        assert_eq!(registry.pool_capacity::<Position>(), None);
    }

    #[test]
    fn test_system_registration() {
        let mut registry = Registry::new();
        assert!(!registry.has_system::<Mover>());

        registry.add_system(Mover::new()).unwrap();
        assert!(registry.has_system::<Mover>());
        assert_eq!(registry.get_system::<Mover>().unwrap().base().signature().count(), 2);

        assert!(matches!(
            registry.add_system(Mover::new()),
            Err(EcsError::SystemAlreadyRegistered(_))
        ));

        let removed = registry.remove_system::<Mover>().unwrap();
        assert_eq!(removed.base().signature().count(), 2);
        assert!(!registry.has_system::<Mover>());
        assert!(matches!(registry.get_system::<Mover>(), Err(EcsError::SystemNotRegistered(_))));
        assert!(matches!(registry.remove_system::<Mover>(), Err(EcsError::SystemNotRegistered(_))));
    }

    #[test]
    fn test_system_requirements_share_component_ids() {
        let mut registry = Registry::new();
        let entity = registry.create_entity();
        registry.add_component(entity, Velocity(0.0, 0.0)).unwrap();
        registry.add_system(Mover::new()).unwrap();

        let velocity = registry.component_id::<Velocity>().unwrap();
        let position = registry.component_id::<Position>().unwrap();
        assert_eq!(velocity.index(), 0);
        assert_eq!(position.index(), 1);
        assert!(registry.get_system::<Mover>().unwrap().base().signature().test(velocity));
    }

    #[test]
    fn test_run_system_moves_entities() {
        use crate::assets::AssetStore;
        use crate::render::HeadlessSurface;

        let mut registry = Registry::new();
        registry.add_system(Mover::new()).unwrap();

        let entity = registry.create_entity();
        registry.add_component(entity, Position(0.0, 0.0)).unwrap();
        registry.add_component(entity, Velocity(10.0, -4.0)).unwrap();
        registry.update();

        let mut surface = HeadlessSurface::new(8, 8);
        let assets = AssetStore::new();
        let mut ctx = FrameContext {
            delta_time: 0.5,
            ticks_ms: 0,
            surface: &mut surface,
            assets: &assets,
        };
        registry.run_system::<Mover>(&mut ctx).unwrap();

        assert_eq!(registry.get_component::<Position>(entity).unwrap(), &Position(5.0, -2.0));
        assert!(registry.has_system::<Mover>());
        assert!(matches!(
            registry.run_system::<Tagged>(&mut ctx),
            Err(EcsError::SystemNotRegistered(_))
        ));
    }

    #[test]
    fn test_kill_from_inside_a_system_is_deferred() {
        use crate::assets::AssetStore;
        use crate::render::HeadlessSurface;

        let mut registry = Registry::new();
        registry.add_system(Tagged::new()).unwrap();
        let entity = registry.create_entity();
        registry.add_component(entity, Tag).unwrap();
        registry.update();

        let mut surface = HeadlessSurface::new(8, 8);
        let assets = AssetStore::new();
        let mut ctx = FrameContext {
            delta_time: 0.0,
            ticks_ms: 0,
            surface: &mut surface,
            assets: &assets,
        };
        registry.run_system::<Tagged>(&mut ctx).unwrap();

        assert_eq!(registry.system_entities::<Tagged>().unwrap(), &[entity]);
        assert_eq!(registry.entity_state(entity), Some(EntityState::Dying));

        registry.update();
        assert!(registry.system_entities::<Tagged>().unwrap().is_empty());
    }

    #[test]
    fn test_current_entities_skips_removed_components() {
        let mut registry = Registry::new();
        registry.add_system(Mover::new()).unwrap();
        let a = registry.create_entity();
        let b = registry.create_entity();
        for entity in [a, b] {
            registry.add_component(entity, Position(0.0, 0.0)).unwrap();
            registry.add_component(entity, Velocity(1.0, 1.0)).unwrap();
        }
        registry.update();

        registry.remove_component::<Velocity>(b).unwrap();
        let base = registry.get_system::<Mover>().unwrap().base();
        assert_eq!(base.entities(), &[a, b]);
        assert_eq!(registry.current_entities(base), vec![a]);
    }
}
