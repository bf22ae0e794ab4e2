//! Sandbox configuration

use game_engine::config::{Config, Deserialize, EngineConfig, Serialize};

/// Settings for the demo scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frames to run before exiting
    pub frames: u64,

    /// Number of crates scattered over the surface
    pub crate_count: u32,

    /// Seed for crate placement, random when absent
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            crate_count: 6,
            seed: None,
        }
    }
}

/// Top-level sandbox settings, read from `sandbox.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Engine settings
    pub engine: EngineConfig,

    /// Demo scene settings
    pub demo: DemoConfig,
}

impl Config for SandboxConfig {}
