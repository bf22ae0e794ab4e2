//! Asset store
//!
//! Caches textures by asset id so components can refer to images by name.

use std::collections::BTreeMap;

use crate::render::{RenderError, RenderSurface, TextureId};

/// Texture cache keyed by asset id
#[derive(Debug, Default)]
pub struct AssetStore {
    textures: BTreeMap<String, TextureId>,
}

impl AssetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `file_path` through `surface` and register it under `asset_id`
    ///
    /// Re-using an asset id replaces the previous texture.
    pub fn add_texture(
        &mut self,
        surface: &mut dyn RenderSurface,
        asset_id: &str,
        file_path: &str,
    ) -> Result<TextureId, RenderError> {
        let texture = surface.load_texture(file_path)?;
        self.textures.insert(asset_id.to_string(), texture);
        log::info!("Asset [{}] added to asset store", asset_id);
        Ok(texture)
    }

    /// Texture registered under `asset_id`
    pub fn get_texture(&self, asset_id: &str) -> Result<TextureId, RenderError> {
        self.textures
            .get(asset_id)
            .copied()
            .ok_or_else(|| RenderError::UnknownTexture(asset_id.to_string()))
    }

    /// Forget every texture
    pub fn clear_assets(&mut self) {
        self.textures.clear();
        log::info!("Assets cleared from store");
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether no texture is registered
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessSurface;

    #[test]
    fn test_add_and_lookup() {
        let mut surface = HeadlessSurface::new(64, 64);
        let mut assets = AssetStore::new();

        let tank = assets.add_texture(&mut surface, "tank-image", "images/tank.png").unwrap();
        assert_eq!(assets.get_texture("tank-image").unwrap(), tank);
        assert!(matches!(assets.get_texture("truck-image"), Err(RenderError::UnknownTexture(id)) if id == "truck-image"));

        assets.clear_assets();
        assert!(assets.is_empty());
    }

    #[test]
    fn test_failed_load_is_not_registered() {
        let mut surface = HeadlessSurface::new(64, 64);
        let mut assets = AssetStore::new();
        assert!(assets.add_texture(&mut surface, "broken", "").is_err());
        assert_eq!(assets.len(), 0);
    }
}
