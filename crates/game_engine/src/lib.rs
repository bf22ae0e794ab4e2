//! # Game Engine
//!
//! A small 2D game engine built around an Entity-Component-System registry.
//!
//! ## Features
//!
//! - **ECS Registry**: deferred entity creation and destruction, recycled
//!   ids, per-type component pools and signature-matched systems
//! - **Built-in Systems**: movement, sprite animation, AABB collision and
//!   sprite rendering
//! - **Pluggable Drawing**: systems draw through a `RenderSurface`; a
//!   headless surface records draw calls
//! - **Configuration**: TOML or RON engine settings
//!
//! ## Quick Start
//!
//! ```rust
//! use game_engine::prelude::*;
//!
//! fn main() -> Result<(), GameError> {
//!     let config = EngineConfig::default().with_target_fps(1000);
//!     let mut game = Game::new(config, HeadlessSurface::new(800, 600))?;
//!
//!     game.setup(|registry, assets, surface| {
//!         assets.add_texture(surface, "tank-image", "assets/images/tank-panther-right.png")?;
//!
//!         let tank = registry.create_entity();
//!         registry.add_component(tank, TransformComponent::from_position(vec2(10.0, 30.0)))?;
//!         registry.add_component(tank, RigidBodyComponent::new(vec2(40.0, 0.0)))?;
//!         registry.add_component(tank, SpriteComponent::sized("tank-image", 32, 32))?;
//!         Ok(())
//!     })?;
//!
//!     game.run_frames(2)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod render;
pub mod assets;
pub mod game;

pub use game::{Game, GameError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Game, GameError,
        game::{InputEvent, KeyCode},
        config::{Config, EngineConfig, RegistryConfig, WindowConfig},
        foundation::math::{vec2, Vec2},
        ecs::{Component, EcsError, Entity, FrameContext, Registry, System, SystemBase},
        ecs::components::{
            AnimationComponent, BoxColliderComponent, RigidBodyComponent, SpriteComponent,
            TransformComponent,
        },
        ecs::systems::{AnimationSystem, CollisionSystem, MovementSystem, RenderSystem},
        assets::AssetStore,
        render::{HeadlessSurface, Rect, RenderSurface},
    };
}
