//! Rigid body component

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// Linear velocity of an entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RigidBodyComponent {
    /// Pixels per second
    pub velocity: Vec2,
}

impl Component for RigidBodyComponent {}

impl RigidBodyComponent {
    /// Create a rigid body moving at `velocity`
    pub fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}
