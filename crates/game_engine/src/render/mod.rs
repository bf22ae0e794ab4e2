//! Draw-surface boundary
//!
//! The engine never talks to a windowing or graphics API directly. Systems
//! draw through [`RenderSurface`]; a backend owns the actual window.

pub mod headless;

pub use headless::{DrawCommand, HeadlessSurface};

use thiserror::Error;

/// Handle to a texture owned by a render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Integer pixel rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Texture could not be loaded from disk
    #[error("failed to load texture '{path}': {reason}")]
    TextureLoad {
        /// Path that was requested
        path: String,
        /// Backend message
        reason: String,
    },

    /// Asset id or texture handle is not known
    #[error("unknown texture '{0}'")]
    UnknownTexture(String),
}

/// A surface the game can draw textured quads into
pub trait RenderSurface {
    /// Load an image file and return a handle to the texture
    fn load_texture(&mut self, path: &str) -> Result<TextureId, RenderError>;

    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Color);

    /// Copy `src` of `texture` into `dst`, rotated by `rotation` degrees about its center
    fn draw_texture(
        &mut self,
        texture: TextureId,
        src: Rect,
        dst: Rect,
        rotation: f32,
    ) -> Result<(), RenderError>;

    /// Show everything drawn since the last clear
    fn present(&mut self);

    /// Width and height in pixels
    fn size(&self) -> (u32, u32);
}
