//! Animation system
//!
//! Advances sprite-sheet animations from the frame clock and points each
//! sprite's source rectangle at the current frame.

use crate::ecs::components::{AnimationComponent, SpriteComponent};
use crate::ecs::{EcsError, FrameContext, Registry, System, SystemBase};

/// Animates entities that have an animation and a sprite
pub struct AnimationSystem {
    base: SystemBase,
}

impl AnimationSystem {
    /// Create the system
    pub fn new() -> Self {
        let mut base = SystemBase::new();
        base.require_component::<AnimationComponent>();
        base.require_component::<SpriteComponent>();
        Self { base }
    }
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for AnimationSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn update(&mut self, registry: &mut Registry, ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
        for entity in registry.current_entities(&self.base) {
            let animation = registry.get_component_mut::<AnimationComponent>(entity)?;
            animation.current_frame = animation.frame_at(ctx.ticks_ms);
            let frame = i32::try_from(animation.current_frame).unwrap_or(i32::MAX);

            let sprite = registry.get_component_mut::<SpriteComponent>(entity)?;
            sprite.src_rect.x = frame.saturating_mul(sprite.width);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetStore;
    use crate::render::HeadlessSurface;

    #[test]
    fn test_sprite_source_follows_frame() {
        let mut registry = Registry::new();
        registry.add_system(AnimationSystem::new()).unwrap();

        let chopper = registry.create_entity();
        registry.add_component(chopper, SpriteComponent::new("chopper-image", 32, 32, 0, 32)).unwrap();
        registry.add_component(chopper, AnimationComponent::new(2, 15, true, 0)).unwrap();
        registry.update();

        let mut surface = HeadlessSurface::new(8, 8);
        let assets = AssetStore::new();
        for (ticks_ms, expected_x) in [(0, 0), (70, 32), (140, 0)] {
            let mut ctx = FrameContext {
                delta_time: 0.016,
                ticks_ms,
                surface: &mut surface,
                assets: &assets,
            };
            registry.run_system::<AnimationSystem>(&mut ctx).unwrap();

            let sprite = registry.get_component::<SpriteComponent>(chopper).unwrap();
            assert_eq!(sprite.src_rect.x, expected_x);
            assert_eq!(sprite.src_rect.y, 32);
        }
    }
}
