//! Animation component
//!
//! Frame-based sprite animation: the animation system picks a frame from
//! elapsed time and moves the sprite's source rectangle onto it.

use crate::ecs::Component;

/// Sprite-sheet animation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationComponent {
    /// Frames laid out horizontally in the sprite sheet
    pub num_frames: u32,
    
    /// Frame shown this frame
    pub current_frame: u32,
    
    /// Frames per second
    pub frame_speed_rate: u32,
    
    /// Whether to start over after the last frame
    pub is_loop: bool,
    
    /// Tick (ms) the animation started at
    pub start_time_ms: u64,
}

impl Component for AnimationComponent {}

impl AnimationComponent {
    /// Create a looping or one-shot animation starting at `start_time_ms`
    pub fn new(num_frames: u32, frame_speed_rate: u32, is_loop: bool, start_time_ms: u64) -> Self {
        Self {
            num_frames: num_frames.max(1),
            current_frame: 0,
            frame_speed_rate,
            is_loop,
            start_time_ms,
        }
    }

    /// Frame that should be visible at `ticks_ms`
    pub fn frame_at(&self, ticks_ms: u64) -> u32 {
        let elapsed = ticks_ms.saturating_sub(self.start_time_ms);
        let advanced = elapsed * u64::from(self.frame_speed_rate) / 1000;
        let frames = u64::from(self.num_frames.max(1));
        let frame = if self.is_loop {
            advanced % frames
        } else {
            advanced.min(frames - 1)
        };
        // frame < num_frames, which is a u32
        u32::try_from(frame).unwrap_or(self.num_frames.saturating_sub(1))
    }
}
