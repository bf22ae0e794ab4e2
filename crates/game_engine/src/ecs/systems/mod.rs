//! ECS Systems module

pub mod movement;
pub mod render;
pub mod animation;
pub mod collision;

pub use movement::MovementSystem;
pub use render::RenderSystem;
pub use animation::AnimationSystem;
pub use collision::{CollisionPair, CollisionSystem};
