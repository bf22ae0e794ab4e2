//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - 2D math types
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
