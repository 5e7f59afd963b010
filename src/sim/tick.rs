//! Variable timestep simulation tick
//!
//! Advances one frame of gameplay. Phase order matters:
//! 1. player movement and teleporter growth
//! 2. enemy spawning, firing and projectile motion (sees the moved player)
//! 3. teleporter vs enemies, with destroyed enemies removed
//! 4. player vs the surviving projectiles
//!
//! Resolving enemy hits first lets the teleporter take out an enemy in the
//! same frame its projectile would have reached the player.

use glam::IVec2;

use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Step direction, each component in -1..=1
    pub move_vec: IVec2,
    /// Suspend teleporter growth
    pub hold: bool,
}

/// Advance the game state by `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    state.players.update(dt, input.move_vec, input.hold);

    state
        .enemies
        .update(dt, &state.players.player, &mut state.rng, &mut events);

    let destroyed = state
        .collisions
        .update_enemy(&state.players.player, &state.enemies.enemies)
        .to_vec();
    if !destroyed.is_empty() {
        state.enemies.remove_enemies(&destroyed);
        for id in destroyed {
            log::debug!("Teleporter destroyed enemy {}", id);
            events.push(GameEvent::EnemyDestroyed { id });
        }
    }

    let hits = state
        .collisions
        .update_player(&state.players.player, &state.enemies.enemies);
    if !hits.is_empty() {
        for hit in hits {
            events.push(GameEvent::PlayerHit {
                enemy_id: hit.enemy_id,
                projectile_id: hit.projectile_id,
            });
        }
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks ({} enemies on field)",
            state.time_ticks,
            state.enemies.enemies.len()
        );
    }

    events
}
