//! Movement system
//!
//! Integrates velocity into position once per frame.

use crate::ecs::components::{RigidBodyComponent, TransformComponent};
use crate::ecs::{EcsError, FrameContext, Registry, System, SystemBase};

/// Moves every entity with a transform and a rigid body
pub struct MovementSystem {
    base: SystemBase,
}

impl MovementSystem {
    /// Create the system
    pub fn new() -> Self {
        let mut base = SystemBase::new();
        base.require_component::<TransformComponent>();
        base.require_component::<RigidBodyComponent>();
        Self { base }
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MovementSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn update(&mut self, registry: &mut Registry, ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
        for entity in registry.current_entities(&self.base) {
            let velocity = registry.get_component::<RigidBodyComponent>(entity)?.velocity;
            let transform = registry.get_component_mut::<TransformComponent>(entity)?;
            transform.position += velocity * ctx.delta_time;

            log::trace!(
                "Entity {} position is now ({}, {})",
                entity.id(),
                transform.position.x,
                transform.position.y
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetStore;
    use crate::foundation::math::vec2;
    use crate::render::HeadlessSurface;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_advances_by_velocity_times_delta() {
        let mut registry = Registry::new();
        registry.add_system(MovementSystem::new()).unwrap();

        let tank = registry.create_entity();
        registry.add_component(tank, TransformComponent::from_position(vec2(10.0, 30.0))).unwrap();
        registry.add_component(tank, RigidBodyComponent::new(vec2(40.0, 0.0))).unwrap();

        let still = registry.create_entity();
        registry.add_component(still, TransformComponent::from_position(vec2(1.0, 1.0))).unwrap();
        registry.update();

        let mut surface = HeadlessSurface::new(800, 600);
        let assets = AssetStore::new();
        let mut ctx = FrameContext {
            delta_time: 0.016,
            ticks_ms: 16,
            surface: &mut surface,
            assets: &assets,
        };
        for _ in 0..10 {
            registry.run_system::<MovementSystem>(&mut ctx).unwrap();
        }

        let position = registry.get_component::<TransformComponent>(tank).unwrap().position;
        assert_relative_eq!(position.x, 16.4, epsilon = 1e-4);
        assert_relative_eq!(position.y, 30.0);

        let unmoved = registry.get_component::<TransformComponent>(still).unwrap().position;
        assert_eq!(unmoved, vec2(1.0, 1.0));
    }
}
