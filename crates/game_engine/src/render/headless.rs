//! Headless render surface
//!
//! Records draw calls instead of rasterizing them. Used by the sandbox when
//! no window is available and by tests that inspect what was drawn.

use super::{Color, Rect, RenderError, RenderSurface, TextureId};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Surface cleared
    Clear(Color),
    /// Texture copied to the surface
    Texture {
        /// Texture drawn
        texture: TextureId,
        /// Source rectangle inside the texture
        src: Rect,
        /// Destination rectangle on the surface
        dst: Rect,
        /// Rotation in degrees
        rotation: f32,
    },
}

/// Surface that keeps a log of draw commands per frame
#[derive(Debug)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    textures: Vec<String>,
    pending: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames_presented: u64,
}

impl HeadlessSurface {
    /// Create a surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            textures: Vec::new(),
            pending: Vec::new(),
            presented: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.presented
    }

    /// Number of `present` calls so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Path a texture was loaded from
    pub fn texture_path(&self, texture: TextureId) -> Option<&str> {
        self.textures.get(texture.0 as usize).map(String::as_str)
    }
}

impl RenderSurface for HeadlessSurface {
    fn load_texture(&mut self, path: &str) -> Result<TextureId, RenderError> {
        if path.trim().is_empty() {
            return Err(RenderError::TextureLoad {
                path: path.to_string(),
                reason: "empty path".to_string(),
            });
        }
        let id = u32::try_from(self.textures.len()).map_err(|_| RenderError::TextureLoad {
            path: path.to_string(),
            reason: "too many textures".to_string(),
        })?;
        self.textures.push(path.to_string());
        Ok(TextureId(id))
    }

    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCommand::Clear(color));
    }

    fn draw_texture(
        &mut self,
        texture: TextureId,
        src: Rect,
        dst: Rect,
        rotation: f32,
    ) -> Result<(), RenderError> {
        if self.texture_path(texture).is_none() {
            return Err(RenderError::UnknownTexture(format!("{texture:?}")));
        }
        self.pending.push(DrawCommand::Texture { texture, src, dst, rotation });
        Ok(())
    }

    fn present(&mut self) {
        self.presented = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
