//! Demo scene: a tank and a truck driving, an animated chopper and a pile
//! of crates, some of which overlap.

use game_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DemoConfig;

const TEXTURES: [(&str, &str); 4] = [
    ("tank-image", "assets/images/tank-panther-right.png"),
    ("truck-image", "assets/images/truck-ford-right.png"),
    ("chopper-image", "assets/images/chopper.png"),
    ("crate-image", "assets/images/crate.png"),
];

const TILE: i32 = 32;

/// Load textures and create the scene's entities
pub fn build(
    registry: &mut Registry,
    assets: &mut AssetStore,
    surface: &mut dyn RenderSurface,
    demo: &DemoConfig,
) -> Result<(), GameError> {
    for (asset_id, path) in TEXTURES {
        assets.add_texture(surface, asset_id, path)?;
    }

    let tank = registry.create_entity();
    registry.add_component(tank, TransformComponent::from_position(vec2(10.0, 30.0)))?;
    registry.add_component(tank, RigidBodyComponent::new(vec2(40.0, 0.0)))?;
    registry.add_component(tank, SpriteComponent::sized("tank-image", TILE, TILE))?;
    registry.add_component(tank, BoxColliderComponent::new(32.0, 32.0))?;

    let truck = registry.create_entity();
    registry.add_component(truck, TransformComponent::from_position(vec2(50.0, 100.0)))?;
    registry.add_component(truck, RigidBodyComponent::new(vec2(0.0, 50.0)))?;
    registry.add_component(truck, SpriteComponent::sized("truck-image", TILE, TILE))?;
    registry.add_component(truck, BoxColliderComponent::new(32.0, 32.0))?;

    let chopper = registry.create_entity();
    registry.add_component(chopper, TransformComponent::new(vec2(300.0, 200.0), vec2(2.0, 2.0), 0.0))?;
    registry.add_component(chopper, SpriteComponent::new("chopper-image", TILE, TILE, 0, TILE))?;
    registry.add_component(chopper, AnimationComponent::new(2, 15, true, 0))?;

    let mut rng = match demo.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (width, height) = surface.size();
    #[allow(clippy::cast_precision_loss)]
    let max_x = width.saturating_sub(32).max(1) as f32;
    #[allow(clippy::cast_precision_loss)]
    let max_y = height.saturating_sub(32).max(1) as f32;

    for _ in 0..demo.crate_count {
        let position = vec2(rng.gen_range(0.0..max_x), rng.gen_range(0.0..max_y));
        let entity = registry.create_entity();
        registry.add_component(entity, TransformComponent::from_position(position))?;
        registry.add_component(entity, SpriteComponent::sized("crate-image", TILE, TILE))?;
        registry.add_component(entity, BoxColliderComponent::new(32.0, 32.0))?;
    }

    log::info!("Scene built with {} entities", registry.num_entities());
    Ok(())
}
