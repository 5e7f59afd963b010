//! Teleport Dodge - a teleporter-shield arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, controllers, collisions, tick)
//! - `input`: Semantic input events and per-frame input state
//! - `renderer`: Draw-surface contract and scene drawing
//! - `platform`: Event source contract and the terminal backend
//! - `game`: Frame loop driving the simulation against the collaborators
//! - `settings`: Runtime preferences

pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{FrameOutcome, Game};
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are in logical units of the 800x450 arena, times in milliseconds.
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 450.0;

    /// Player box (width = height)
    pub const PLAYER_SIZE: f32 = 20.0;

    /// Teleporter span and growth
    pub const TELEPORTER_MIN: f32 = 20.0;
    pub const TELEPORTER_MAX: f32 = 200.0;
    /// Growth rate (units/ms)
    pub const TELEPORTER_VELOCITY: f32 = 0.33;
    /// One full expand/contract oscillation
    pub const TELEPORTER_PERIOD: f32 = 1600.0;

    /// Lifetime of a trail ghost
    pub const DECAY_TIME: f32 = 100.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const ENEMY_FIRE_COOLDOWN: f32 = 1600.0;
    /// Projectile speed (units/ms)
    pub const PROJECTILE_SPEED: f32 = 0.2;

    /// Spawn cooldown ramp (linear, floored)
    pub const MAX_SPAWN_COOLDOWN: f32 = 2400.0;
    pub const MIN_SPAWN_COOLDOWN: f32 = 1600.0;
    pub const SPAWN_COOLDOWN_STEP: f32 = 400.0;

    /// Clear space kept around the teleporter when spawning (per side)
    pub const SPAWN_CLEARANCE: f32 = 100.0;
    /// Spawn positions stay this far from the arena edges
    pub const SPAWN_EDGE_PADDING: f32 = 20.0;
    /// Rejection-sampling safety valve
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;
}
