//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through the `dt` passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod geometry;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{CollisionController, CollisionPolicy, ProjectileHit};
pub use enemy::EnemyController;
pub use entity::{DecayingTeleporter, Enemy, Player, Projectile, Teleporter};
pub use geometry::{Rect, divide, normalize, scale, subtract};
pub use player::PlayerController;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
