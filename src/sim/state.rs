//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`, owned by the frame
//! loop. Entities form a strict ownership tree: the player owns its
//! teleporter, each enemy owns its projectiles.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionController, CollisionPolicy};
use super::enemy::EnemyController;
use super::player::PlayerController;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit; waiting for restart or quit
    GameOver,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    ProjectileFired { enemy_id: u32, projectile_id: u32 },
    EnemyDestroyed { id: u32 },
    PlayerHit { enemy_id: u32, projectile_id: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub players: PlayerController,
    pub enemies: EnemyController,
    pub collisions: CollisionController,
}

impl GameState {
    /// New run in the standard arena
    pub fn new(seed: u64) -> Self {
        Self::with_arena(seed, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT))
    }

    pub fn with_arena(seed: u64, arena_size: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            time_ticks: 0,
            players: PlayerController::new(arena_size),
            enemies: EnemyController::new(arena_size),
            collisions: CollisionController::new(CollisionPolicy::default()),
        }
    }

    /// Reset every controller for a new round. The RNG keeps its stream so
    /// consecutive rounds differ.
    pub fn restart(&mut self) {
        self.players.reset_player();
        self.enemies.reset();
        self.collisions.reset();
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.players.player.center(), Vec2::new(400.0, 225.0));
        assert!(state.enemies.enemies.is_empty());
        assert_eq!(state.collisions.policy, CollisionPolicy::FirstMatch);
    }

    #[test]
    fn test_restart_clears_round() {
        let mut state = GameState::new(7);
        let player = state.players.player.clone();
        state.enemies.spawn_enemy(&player, &mut state.rng);
        state.players.update(50.0, glam::IVec2::new(1, 0), false);
        state.collisions.enemy_collisions.push(1);
        state.phase = GamePhase::GameOver;
        state.time_ticks = 99;

        state.restart();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert!(state.enemies.enemies.is_empty());
        assert_eq!(state.enemies.spawn_cooldown, MAX_SPAWN_COOLDOWN);
        assert!(state.players.decaying_teleporters.is_empty());
        assert_eq!(state.players.player.center(), Vec2::new(400.0, 225.0));
        assert!(state.collisions.enemy_collisions.is_empty());
    }
}
