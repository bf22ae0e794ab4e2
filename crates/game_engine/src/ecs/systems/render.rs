//! Render system
//!
//! Draws every sprite at its transform. The texture is looked up by asset id
//! and the destination size is the sprite size times the transform scale.

use crate::ecs::components::{SpriteComponent, TransformComponent};
use crate::ecs::{EcsError, FrameContext, Registry, System, SystemBase};
use crate::render::Rect;

/// Draws entities that have a sprite and a transform
pub struct RenderSystem {
    base: SystemBase,
}

impl RenderSystem {
    /// Create the system
    pub fn new() -> Self {
        let mut base = SystemBase::new();
        base.require_component::<SpriteComponent>();
        base.require_component::<TransformComponent>();
        Self { base }
    }

    /// Screen rectangle a sprite covers
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn destination_rect(transform: &TransformComponent, sprite: &SpriteComponent) -> Rect {
        Rect::new(
            transform.position.x as i32,
            transform.position.y as i32,
            (sprite.width as f32 * transform.scale.x) as i32,
            (sprite.height as f32 * transform.scale.y) as i32,
        )
    }
}

impl Default for RenderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RenderSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn update(&mut self, registry: &mut Registry, ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
        let mut entities = registry.current_entities(&self.base);
        entities.sort_unstable();

        for entity in entities {
            let transform = registry.get_component::<TransformComponent>(entity)?;
            let sprite = registry.get_component::<SpriteComponent>(entity)?;

            let texture = ctx.assets.get_texture(&sprite.asset_id)?;
            let dst = Self::destination_rect(transform, sprite);
            ctx.surface.draw_texture(texture, sprite.src_rect, dst, transform.rotation)?;
        }
        Ok(())
    }
}
