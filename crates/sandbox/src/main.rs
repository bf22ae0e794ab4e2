//! Sandbox: runs the demo scene headlessly and reports what happened
//!
//! Usage: `sandbox [config.toml]` (defaults to `sandbox.toml`).

mod config;
mod scene;

use game_engine::config::Config;
use game_engine::foundation::logging;
use game_engine::prelude::*;

use config::SandboxConfig;

const DEFAULT_CONFIG_PATH: &str = "sandbox.toml";

fn run(config: SandboxConfig) -> Result<(), GameError> {
    let surface = HeadlessSurface::new(config.engine.window.width, config.engine.window.height);
    let mut game = Game::new(config.engine, surface)?;

    let demo = config.demo;
    game.setup(|registry, assets, surface| scene::build(registry, assets, surface, &demo))?;

    let frames = game.run_frames(demo.frames)?;

    let registry = game.registry();
    log::info!(
        "Ran {} frames: {} entities drawn, {} colliding pairs in the last frame",
        frames,
        registry.system_entities::<RenderSystem>()?.len(),
        registry.get_system::<CollisionSystem>()?.collisions().len()
    );
    log::info!("Last frame recorded {} draw commands", game.surface().last_frame().len());
    Ok(())
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match SandboxConfig::load_or_default(&path) {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            log::error!("Failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    };

    logging::init(&config.engine.log_level);
    log::info!("Starting sandbox with {}", path);

    if let Err(e) = run(config) {
        log::error!("Sandbox failed: {}", e);
        std::process::exit(1);
    }
}
