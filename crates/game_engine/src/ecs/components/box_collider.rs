//! Box collider component

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// Axis-aligned collision box relative to the entity's position
#[derive(Debug, Clone, PartialEq)]
pub struct BoxColliderComponent {
    /// Box width in pixels
    pub width: f32,
    
    /// Box height in pixels
    pub height: f32,
    
    /// Offset of the box's top-left corner from the transform position
    pub offset: Vec2,
}

impl Component for BoxColliderComponent {}

impl Default for BoxColliderComponent {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl BoxColliderComponent {
    /// Box of the given size with no offset
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::zeros(),
        }
    }
    
    /// Shift the box relative to the entity
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}
