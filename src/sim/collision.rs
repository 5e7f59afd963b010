//! Collision queries between the player and enemies
//!
//! Two independent rect-overlap queries run each frame:
//! - teleporter vs enemies (enemies destroyed)
//! - player vs projectiles (player dies)
//!
//! The controller only reads entities. It reports ids, and the caller
//! commits removals afterwards.

use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Player};

/// How many intersections a query reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// At most one enemy per frame, and at most one projectile per enemy
    #[default]
    FirstMatch,
    /// Every intersecting entity
    Exhaustive,
}

/// A projectile that touched the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileHit {
    pub enemy_id: u32,
    pub projectile_id: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionController {
    pub policy: CollisionPolicy,
    /// Projectiles the player collided with on the last query
    pub player_collisions: Vec<ProjectileHit>,
    /// Enemies the teleporter collided with on the last query
    pub enemy_collisions: Vec<u32>,
}

impl CollisionController {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        self.player_collisions.clear();
        self.enemy_collisions.clear();
    }

    /// Projectiles overlapping the player box
    pub fn update_player(&mut self, player: &Player, enemies: &[Enemy]) -> &[ProjectileHit] {
        self.player_collisions.clear();
        for enemy in enemies {
            let mut hits = enemy
                .projectiles
                .iter()
                .filter(|p| player.rect.intersects(&p.rect))
                .map(|p| ProjectileHit {
                    enemy_id: enemy.id,
                    projectile_id: p.id,
                });
            match self.policy {
                CollisionPolicy::FirstMatch => self.player_collisions.extend(hits.next()),
                CollisionPolicy::Exhaustive => self.player_collisions.extend(hits),
            }
        }
        &self.player_collisions
    }

    /// Enemies overlapping the player's teleporter
    pub fn update_enemy(&mut self, player: &Player, enemies: &[Enemy]) -> &[u32] {
        self.enemy_collisions.clear();
        let teleporter = &player.teleporter.rect;
        let mut hits = enemies
            .iter()
            .filter(|e| teleporter.intersects(&e.rect))
            .map(|e| e.id);
        match self.policy {
            CollisionPolicy::FirstMatch => self.enemy_collisions.extend(hits.next()),
            CollisionPolicy::Exhaustive => self.enemy_collisions.extend(hits),
        }
        &self.enemy_collisions
    }
}
