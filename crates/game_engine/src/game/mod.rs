//! Frame driver
//!
//! [`Game`] owns the registry, the asset store and the draw surface and runs
//! the fixed-timestep loop: input, registry update, systems, render, wait.

use std::collections::VecDeque;

use thiserror::Error;

use crate::assets::AssetStore;
use crate::config::{ConfigError, EngineConfig};
use crate::ecs::systems::{AnimationSystem, CollisionSystem, MovementSystem, RenderSystem};
use crate::ecs::{EcsError, FrameContext, Registry};
use crate::foundation::time::FrameClock;
use crate::render::{Color, RenderError, RenderSurface};

/// Background color each frame starts from
pub const CLEAR_COLOR: Color = Color::rgb(21, 21, 21);

/// Keys the driver reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// Escape quits the game
    Escape,
    /// Any other key
    Other(u32),
}

/// Input delivered by the windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was closed
    QuitRequested,
    /// A key went down
    KeyPressed(KeyCode),
}

/// Errors raised while setting up or running the game
#[derive(Error, Debug)]
pub enum GameError {
    /// Registry misuse or a failing system
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Asset or surface failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Bad configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Main game struct
pub struct Game<S: RenderSurface> {
    config: EngineConfig,
    registry: Registry,
    assets: AssetStore,
    surface: S,
    clock: FrameClock,
    input: VecDeque<InputEvent>,
    running: bool,
}

impl<S: RenderSurface> Game<S> {
    /// Create a game drawing into `surface` with the built-in systems registered
    pub fn new(config: EngineConfig, surface: S) -> Result<Self, GameError> {
        config.validate()?;
        log::info!(
            "Initializing '{}' ({}x{} @ {} fps)",
            config.window.title,
            config.window.width,
            config.window.height,
            config.target_fps
        );

        let mut registry = Registry::with_config(&config.registry);
        registry.add_system(MovementSystem::new())?;
        registry.add_system(AnimationSystem::new())?;
        registry.add_system(CollisionSystem::new())?;
        registry.add_system(RenderSystem::new())?;

        Ok(Self {
            clock: FrameClock::new(config.target_fps),
            config,
            registry,
            assets: AssetStore::new(),
            surface,
            input: VecDeque::new(),
            running: true,
        })
    }

    /// Run scene setup against the registry, the asset store and the surface
    pub fn setup<F>(&mut self, setup: F) -> Result<(), GameError>
    where
        F: FnOnce(&mut Registry, &mut AssetStore, &mut S) -> Result<(), GameError>,
    {
        setup(&mut self.registry, &mut self.assets, &mut self.surface)
    }

    /// Queue an input event for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push_back(event);
    }

    fn process_input(&mut self) {
        while let Some(event) = self.input.pop_front() {
            match event {
                InputEvent::QuitRequested | InputEvent::KeyPressed(KeyCode::Escape) => self.quit(),
                InputEvent::KeyPressed(KeyCode::Other(code)) => {
                    log::trace!("Ignoring key {}", code);
                }
            }
        }
    }

    /// Run one frame
    ///
    /// Does nothing once the game has stopped running.
    pub fn run_frame(&mut self) -> Result<(), GameError> {
        self.process_input();
        if !self.running {
            return Ok(());
        }

        // Entities created or killed last frame become visible to systems here
        self.registry.update();

        let mut ctx = FrameContext {
            delta_time: self.clock.delta_time(),
            ticks_ms: self.clock.ticks_ms(),
            surface: &mut self.surface,
            assets: &self.assets,
        };
        self.registry.run_system::<MovementSystem>(&mut ctx)?;
        self.registry.run_system::<AnimationSystem>(&mut ctx)?;
        self.registry.run_system::<CollisionSystem>(&mut ctx)?;

        ctx.surface.clear(CLEAR_COLOR);
        self.registry.run_system::<RenderSystem>(&mut ctx)?;
        ctx.surface.present();

        self.clock.tick();
        Ok(())
    }

    /// Run up to `frames` frames, stopping early on quit
    ///
    /// Returns the number of frames actually run.
    pub fn run_frames(&mut self, frames: u64) -> Result<u64, GameError> {
        log::info!("Starting main loop...");
        let mut count = 0;
        while self.running && count < frames {
            self.run_frame()?;
            if self.running {
                count += 1;
            }
        }
        log::info!("Main loop finished after {} frames", count);
        Ok(count)
    }

    /// Stop the loop after the current frame
    pub fn quit(&mut self) {
        if self.running {
            log::info!("Game shutdown requested");
        }
        self.running = false;
    }

    /// Whether the loop is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Configuration the game was created with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get mutable access to the registry
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Get the asset store
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Get the draw surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{RigidBodyComponent, SpriteComponent, TransformComponent};
    use crate::foundation::math::vec2;
    use crate::render::{DrawCommand, HeadlessSurface};

    fn fast_game() -> Game<HeadlessSurface> {
        let config = EngineConfig::default().with_target_fps(1000);
        Game::new(config, HeadlessSurface::new(800, 600)).unwrap()
    }

    #[test]
    fn test_builtin_systems_registered() {
        let game = fast_game();
        assert!(game.registry().has_system::<MovementSystem>());
        assert!(game.registry().has_system::<AnimationSystem>());
        assert!(game.registry().has_system::<CollisionSystem>());
        assert!(game.registry().has_system::<RenderSystem>());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_target_fps(0);
        let result = Game::new(config, HeadlessSurface::new(800, 600));
        assert!(matches!(result, Err(GameError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_frames_clear_draw_and_present() {
        let mut game = fast_game();
        game.setup(|registry, assets, surface| {
            assets.add_texture(surface, "tank-image", "images/tank.png")?;
            let tank = registry.create_entity();
            registry.add_component(tank, TransformComponent::from_position(vec2(10.0, 30.0)))?;
            registry.add_component(tank, RigidBodyComponent::new(vec2(40.0, 0.0)))?;
            registry.add_component(tank, SpriteComponent::sized("tank-image", 32, 32))?;
            Ok(())
        })
        .unwrap();

        assert_eq!(game.run_frames(3).unwrap(), 3);
        assert_eq!(game.surface().frames_presented(), 3);
        assert_eq!(game.frame_count(), 3);

        let frame = game.surface().last_frame();
        assert_eq!(frame[0], DrawCommand::Clear(CLEAR_COLOR));
        assert_eq!(frame.len(), 2);

        let registry = game.registry();
        let tank = registry.system_entities::<RenderSystem>().unwrap()[0];
        assert!(registry.get_component::<TransformComponent>(tank).unwrap().position.x > 10.0);
    }

    #[test]
    fn test_escape_stops_the_loop() {
        let mut game = fast_game();
        game.run_frames(1).unwrap();

        game.push_input(InputEvent::KeyPressed(KeyCode::Other(32)));
        game.run_frame().unwrap();
        assert!(game.is_running());

        game.push_input(InputEvent::KeyPressed(KeyCode::Escape));
        assert_eq!(game.run_frames(10).unwrap(), 0);
        assert!(!game.is_running());
        assert_eq!(game.surface().frames_presented(), 2);
    }

    #[test]
    fn test_missing_texture_fails_the_frame() {
        let mut game = fast_game();
        game.setup(|registry, _, _| {
            let entity = registry.create_entity();
            registry.add_component(entity, TransformComponent::default())?;
            registry.add_component(entity, SpriteComponent::sized("nowhere", 4, 4))?;
            Ok(())
        })
        .unwrap();

        assert!(matches!(
            game.run_frame(),
            Err(GameError::Ecs(EcsError::Render(RenderError::UnknownTexture(_))))
        ));
    }
}
