//! Enemy controller: spawn scheduling, placement and firing
//!
//! Spawns follow a linear difficulty ramp: every spawn shortens the spawn
//! cooldown by a fixed step until it reaches the floor.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Player};
use super::geometry::Rect;
use super::state::GameEvent;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyController {
    pub spawn_cooldown: f32,
    pub min_spawn_cooldown: f32,
    pub max_spawn_cooldown: f32,
    pub spawn_cooldown_step: f32,
    pub spawn_timer: f32,
    /// Active enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub enemy_size: Vec2,
    pub arena_size: Vec2,
    /// Remove projectiles once they leave the arena
    pub cull_offscreen_projectiles: bool,
    next_id: u32,
}

impl EnemyController {
    pub fn new(arena_size: Vec2) -> Self {
        Self {
            spawn_cooldown: MAX_SPAWN_COOLDOWN,
            min_spawn_cooldown: MIN_SPAWN_COOLDOWN,
            max_spawn_cooldown: MAX_SPAWN_COOLDOWN,
            spawn_cooldown_step: SPAWN_COOLDOWN_STEP,
            spawn_timer: 0.0,
            enemies: Vec::new(),
            enemy_size: Vec2::splat(ENEMY_SIZE),
            arena_size,
            cull_offscreen_projectiles: false,
            next_id: 1,
        }
    }

    /// Back to the initial ramp with no enemies
    pub fn reset(&mut self) {
        self.spawn_cooldown = self.max_spawn_cooldown;
        self.spawn_timer = 0.0;
        self.enemies.clear();
    }

    /// Advance spawning, fire timers and projectiles by `dt` ms.
    ///
    /// Enemies fire at the player's current center.
    pub fn update(
        &mut self,
        dt: f32,
        player: &Player,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer > self.spawn_cooldown {
            if let Some(id) = self.spawn_enemy(player, rng) {
                events.push(GameEvent::EnemySpawned { id });
            }
        }

        let bounds = Rect::from_center(self.arena_size / 2.0, self.arena_size);
        let target = player.center();

        for enemy in &mut self.enemies {
            enemy.update(dt);
            for projectile in &mut enemy.projectiles {
                projectile.update(dt);
            }
            if self.cull_offscreen_projectiles {
                enemy.projectiles.retain(|p| p.rect.intersects(&bounds));
            }
            if enemy.ready_to_fire() {
                let projectile_id = enemy.fire_projectile(target, PROJECTILE_SPEED).id;
                log::trace!("Enemy {} fired projectile {}", enemy.id, projectile_id);
                events.push(GameEvent::ProjectileFired {
                    enemy_id: enemy.id,
                    projectile_id,
                });
            }
        }
    }

    /// Place a new enemy outside the zone around the player's teleporter.
    ///
    /// Positions are rejection-sampled until one is clear. Resets the spawn
    /// timer and steps the cooldown down either way; returns the new enemy's
    /// id, or `None` if no clear position was found.
    pub fn spawn_enemy(&mut self, player: &Player, rng: &mut impl Rng) -> Option<u32> {
        let forbidden = self.forbidden_zone(player);

        let spawned = (0..MAX_SPAWN_ATTEMPTS)
            .map(|_| self.random_position(rng, SPAWN_EDGE_PADDING))
            .map(|center| Rect::from_center(center, self.enemy_size))
            .find(|candidate| !forbidden.intersects(candidate));

        self.spawn_timer = 0.0;
        self.decrement_spawn_cooldown();

        match spawned {
            Some(rect) => {
                let id = self.next_id;
                self.next_id += 1;
                self.enemies.push(Enemy::new(id, rect.center, self.enemy_size));
                log::debug!(
                    "Spawned enemy {} at ({:.1}, {:.1}), next cooldown {}",
                    id,
                    rect.center.x,
                    rect.center.y,
                    self.spawn_cooldown
                );
                Some(id)
            }
            None => {
                log::warn!(
                    "No clear spawn position after {} attempts, skipping spawn",
                    MAX_SPAWN_ATTEMPTS
                );
                None
            }
        }
    }

    /// Teleporter rect padded by the spawn clearance, centered on the player
    pub fn forbidden_zone(&self, player: &Player) -> Rect {
        Rect::from_center(player.center(), player.teleporter.rect.size).inflate(SPAWN_CLEARANCE)
    }

    /// Uniform position inside the arena, `padding` away from each edge
    pub fn random_position(&self, rng: &mut impl Rng, padding: f32) -> Vec2 {
        let lo = Vec2::splat(padding);
        let hi = (self.arena_size - Vec2::splat(padding)).max(lo);
        Vec2::new(
            rng.random_range(lo.x..=hi.x),
            rng.random_range(lo.y..=hi.y),
        )
    }

    /// Step the spawn cooldown toward the floor
    pub fn decrement_spawn_cooldown(&mut self) {
        self.spawn_cooldown =
            (self.spawn_cooldown - self.spawn_cooldown_step).max(self.min_spawn_cooldown);
    }

    /// Remove every enemy whose id is listed (with its projectiles)
    pub fn remove_enemies(&mut self, ids: &[u32]) {
        self.enemies.retain(|enemy| !ids.contains(&enemy.id));
    }
}
