//! Game settings and preferences
//!
//! Stored as JSON. Missing keys fall back to defaults, an unreadable or
//! malformed file falls back to defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::MovementMode;
use crate::renderer::Palette;
use crate::sim::CollisionPolicy;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Per-batch (edge-triggered) or held-key movement
    pub movement_mode: MovementMode,
    /// First-match or exhaustive collision reports
    pub collision_policy: CollisionPolicy,
    /// Remove projectiles once they leave the arena
    pub cull_offscreen_projectiles: bool,
    /// Frame pacing for the driver loop; 0 runs uncapped
    pub max_fps: u32,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            movement_mode: MovementMode::PerBatch,
            collision_policy: CollisionPolicy::FirstMatch,
            cull_offscreen_projectiles: false,
            max_fps: 60,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Settings parse error in {}: {}", path.display(), e);
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Seed for this run, drawing one if none is configured
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Target frame interval in milliseconds, if capped
    pub fn frame_interval_ms(&self) -> Option<f64> {
        (self.max_fps > 0).then(|| 1000.0 / self.max_fps as f64)
    }
}
