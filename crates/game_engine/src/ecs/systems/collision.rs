//! Collision system
//!
//! Naive pairwise AABB test over every entity with a box collider. Each
//! unordered pair is tested once and an entity is never tested against
//! itself. The pairs found are kept until the next frame.

use crate::ecs::components::{BoxColliderComponent, TransformComponent};
use crate::ecs::{EcsError, Entity, FrameContext, Registry, System, SystemBase};
use crate::foundation::math::Vec2;

/// Two entities whose boxes overlapped this frame, `a` < `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Lower entity
    pub a: Entity,
    /// Higher entity
    pub b: Entity,
}

impl CollisionPair {
    /// Whether `entity` is part of this pair
    pub fn involves(&self, entity: Entity) -> bool {
        self.a == entity || self.b == entity
    }
}

/// Detects overlapping box colliders
pub struct CollisionSystem {
    base: SystemBase,
    collisions: Vec<CollisionPair>,
}

impl CollisionSystem {
    /// Create the system
    pub fn new() -> Self {
        let mut base = SystemBase::new();
        base.require_component::<BoxColliderComponent>();
        base.require_component::<TransformComponent>();
        Self {
            base,
            collisions: Vec::new(),
        }
    }

    /// Pairs found by the most recent update
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collisions
    }

    /// Strict overlap test between two boxes given by top-left corner and size
    ///
    /// Boxes that only share an edge do not collide.
    pub fn check_aabb_collision(a_min: Vec2, a_size: Vec2, b_min: Vec2, b_size: Vec2) -> bool {
        a_min.x < b_min.x + b_size.x
            && a_min.x + a_size.x > b_min.x
            && a_min.y < b_min.y + b_size.y
            && a_min.y + a_size.y > b_min.y
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CollisionSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }

    fn update(&mut self, registry: &mut Registry, _ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
        let mut entities = registry.current_entities(&self.base);
        entities.sort_unstable();

        let mut boxes = Vec::with_capacity(entities.len());
        for entity in entities {
            let transform = registry.get_component::<TransformComponent>(entity)?;
            let collider = registry.get_component::<BoxColliderComponent>(entity)?;
            boxes.push((
                entity,
                transform.position + collider.offset,
                Vec2::new(collider.width, collider.height),
            ));
        }

        self.collisions.clear();
        for (i, &(a, a_min, a_size)) in boxes.iter().enumerate() {
            for &(b, b_min, b_size) in &boxes[i + 1..] {
                if Self::check_aabb_collision(a_min, a_size, b_min, b_size) {
                    log::info!("Entity [{}] and Entity [{}] have collided", a.id(), b.id());
                    self.collisions.push(CollisionPair { a, b });
                }
            }
        }
        Ok(())
    }
}
