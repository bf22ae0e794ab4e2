//! Transform component for the ECS system

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// Position, scale and rotation of an entity in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Top-left corner in pixels
    pub position: Vec2,
    
    /// Scale factors applied to the sprite size
    pub scale: Vec2,
    
    /// Rotation in degrees, clockwise
    pub rotation: f32,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl TransformComponent {
    /// Create a transform
    pub fn new(position: Vec2, scale: Vec2, rotation: f32) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }
    
    /// Create from position only
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}
