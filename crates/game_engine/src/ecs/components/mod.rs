//! ECS Components module
//! 
//! Plain data records attached to entities. None of them hold references
//! into the registry, so they can be cloned out and stored anywhere.

pub mod transform;
pub mod rigid_body;
pub mod sprite;
pub mod box_collider;
pub mod animation;

pub use transform::TransformComponent;
pub use rigid_body::RigidBodyComponent;
pub use sprite::SpriteComponent;
pub use box_collider::BoxColliderComponent;
pub use animation::AnimationComponent;
