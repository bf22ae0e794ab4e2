//! Math utilities and types
//!
//! Screen space is 2D with the origin at the top-left corner and Y growing
//! downwards, matching the draw surface.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Convenience constructor for [`Vec2`]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}
