//! Sprite component
//!
//! Names a texture in the asset store and the part of it to draw.

use crate::ecs::Component;
use crate::render::Rect;

/// Texture reference and source rectangle of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Asset id in the [`AssetStore`](crate::assets::AssetStore)
    pub asset_id: String,
    
    /// Frame width in pixels
    pub width: i32,
    
    /// Frame height in pixels
    pub height: i32,
    
    /// Region of the texture to draw
    pub src_rect: Rect,
}

impl Component for SpriteComponent {}

impl SpriteComponent {
    /// Sprite using the `width` x `height` region at (`src_x`, `src_y`)
    pub fn new(asset_id: impl Into<String>, width: i32, height: i32, src_x: i32, src_y: i32) -> Self {
        Self {
            asset_id: asset_id.into(),
            width,
            height,
            src_rect: Rect::new(src_x, src_y, width, height),
        }
    }

    /// Sprite using the top-left `width` x `height` region
    pub fn sized(asset_id: impl Into<String>, width: i32, height: i32) -> Self {
        Self::new(asset_id, width, height, 0, 0)
    }
}
