//! Entity model: player, teleporter, trail ghosts, enemies and projectiles
//!
//! Entities are plain state containers with small behaviour methods. All
//! cross-entity decisions (spawning, firing, collisions) live in the
//! controllers.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, normalize};
use crate::consts::*;

/// The player's square shield around the player box
///
/// Invariant: `min <= width == height <= max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teleporter {
    pub rect: Rect,
    pub min: f32,
    pub max: f32,
    /// Growth rate (units/ms)
    pub velocity: f32,
    /// Time for one expand/contract oscillation (ms)
    pub period: f32,
}

impl Teleporter {
    pub fn new(center: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, Vec2::splat(TELEPORTER_MIN)),
            min: TELEPORTER_MIN,
            max: TELEPORTER_MAX,
            velocity: TELEPORTER_VELOCITY,
            period: TELEPORTER_PERIOD,
        }
    }

    /// Current side length
    #[inline]
    pub fn length(&self) -> f32 {
        self.rect.width()
    }

    /// Snap to the minimum size
    pub fn reset(&mut self) {
        self.rect.set_size(Vec2::splat(self.min));
    }

    /// Expand by `dt * velocity`, clamped to `max`
    pub fn grow(&mut self, dt: f32) {
        let length = (self.length() + dt * self.velocity).min(self.max);
        self.rect.set_size(Vec2::splat(length));
    }

    /// Contract by `dt * velocity`, clamped to `min`
    pub fn shrink(&mut self, dt: f32) {
        let length = (self.length() - dt * self.velocity).max(self.min);
        self.rect.set_size(Vec2::splat(length));
    }

    /// Oscillating side length at time `t` (ms)
    pub fn oscillation_length(&self, t: f32) -> f32 {
        let span = self.max - self.min;
        let phase = std::f32::consts::TAU * t / self.period + std::f32::consts::FRAC_PI_4;
        (span * phase.sin() + self.min).abs()
    }

    /// Re-center on the owner
    pub fn follow(&mut self, center: Vec2) {
        self.rect.center = center;
    }
}

/// Snapshot of a teleporter left behind when the player moves
///
/// Purely cosmetic; never collides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayingTeleporter {
    pub rect: Rect,
    /// Age (ms)
    pub timer: f32,
    /// Lifetime (ms)
    pub decay_time: f32,
}

impl DecayingTeleporter {
    pub fn new(teleporter: &Teleporter) -> Self {
        Self {
            rect: teleporter.rect,
            timer: 0.0,
            decay_time: DECAY_TIME,
        }
    }

    pub fn age(&mut self, dt: f32) {
        self.timer += dt;
    }

    pub fn is_expired(&self) -> bool {
        self.timer > self.decay_time
    }

    /// Remaining opacity, 1 when fresh and 0 when fully decayed
    pub fn fade(&self) -> f32 {
        (1.0 - self.timer / self.decay_time).clamp(0.0, 1.0)
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub teleporter: Teleporter,
}

impl Player {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, size),
            teleporter: Teleporter::new(center),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    /// Step in the direction of `dir` (each component in -1..=1).
    ///
    /// The step is half the teleporter's current size, so a grown teleporter
    /// carries the player further. Any nonzero step collapses the teleporter.
    pub fn move_by(&mut self, dir: IVec2) {
        let step = dir.as_vec2() * self.teleporter.rect.half_size();
        self.rect.translate(step);
        if dir != IVec2::ZERO {
            self.teleporter.reset();
        }
        self.teleporter.follow(self.rect.center);
    }

    /// Re-center the teleporter on the player
    pub fn update(&mut self) {
        self.teleporter.follow(self.rect.center);
    }
}

/// A bullet travelling in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Unique within the owning enemy
    pub id: u32,
    pub rect: Rect,
    /// Units/ms
    pub velocity: Vec2,
}

impl Projectile {
    pub fn new(id: u32, center: Vec2, size: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, size),
            velocity,
        }
    }

    /// Euler step
    pub fn update(&mut self, dt: f32) {
        self.rect.translate(self.velocity * dt);
    }
}

/// A stationary turret that fires at the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    /// Time between shots (ms)
    pub cooldown: f32,
    /// Time since last shot (ms)
    pub timer: f32,
    /// Owned projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    next_projectile_id: u32,
}

impl Enemy {
    pub fn new(id: u32, center: Vec2, size: Vec2) -> Self {
        Self::with_cooldown(id, center, size, ENEMY_FIRE_COOLDOWN)
    }

    pub fn with_cooldown(id: u32, center: Vec2, size: Vec2, cooldown: f32) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, size),
            cooldown,
            timer: 0.0,
            projectiles: Vec::new(),
            next_projectile_id: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    /// Advance the fire timer
    pub fn update(&mut self, dt: f32) {
        self.timer += dt;
    }

    pub fn ready_to_fire(&self) -> bool {
        self.timer > self.cooldown
    }

    /// Fraction of the cooldown elapsed (unclamped)
    pub fn charge(&self) -> f32 {
        if self.cooldown > 0.0 {
            self.timer / self.cooldown
        } else {
            1.0
        }
    }

    /// Fire a half-size projectile from the enemy center toward `target`.
    ///
    /// Resets the fire timer. A target on the enemy center yields a
    /// stationary projectile.
    pub fn fire_projectile(&mut self, target: Vec2, speed: f32) -> &Projectile {
        let velocity = normalize(target - self.rect.center) * speed;
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        self.timer = 0.0;
        self.projectiles
            .push(Projectile::new(id, self.rect.center, self.rect.size / 2.0, velocity));
        &self.projectiles[self.projectiles.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn start() -> Vec2 {
        Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0)
    }

    #[test]
    fn test_teleporter_starts_at_min() {
        let t = Teleporter::new(start());
        assert_eq!(t.length(), TELEPORTER_MIN);
        assert_eq!(t.rect.center, start());
    }

    #[test]
    fn test_grow_clamps_to_max() {
        let mut t = Teleporter::new(start());
        t.grow(16.0);
        assert!((t.length() - (20.0 + 16.0 * 0.33)).abs() < 1e-4);
        t.grow(10_000.0);
        assert_eq!(t.length(), TELEPORTER_MAX);
        assert_eq!(t.rect.center, start());
    }

    #[test]
    fn test_shrink_clamps_to_min() {
        let mut t = Teleporter::new(start());
        t.grow(100.0);
        t.shrink(50.0);
        assert!((t.length() - (20.0 + 50.0 * 0.33)).abs() < 1e-4);
        t.shrink(10_000.0);
        assert_eq!(t.length(), TELEPORTER_MIN);
    }

    #[test]
    fn test_reset_keeps_center() {
        let mut t = Teleporter::new(Vec2::new(10.0, 30.0));
        t.grow(300.0);
        t.reset();
        assert_eq!(t.rect.size, Vec2::splat(TELEPORTER_MIN));
        assert_eq!(t.rect.center, Vec2::new(10.0, 30.0));
    }

    #[test]
    fn test_oscillation_length() {
        let t = Teleporter::new(start());
        // sin(pi/4) at t = 0
        let expected = 180.0 * std::f32::consts::FRAC_PI_4.sin() + 20.0;
        assert!((t.oscillation_length(0.0) - expected).abs() < 1e-3);
        // One full period later the value repeats
        assert!((t.oscillation_length(1600.0) - expected).abs() < 1e-2);
        // Never negative
        for step in 0..64 {
            assert!(t.oscillation_length(step as f32 * 25.0) >= 0.0);
        }
    }

    #[test]
    fn test_zero_move_is_noop() {
        let mut p = Player::new(start(), Vec2::splat(PLAYER_SIZE));
        p.teleporter.grow(100.0);
        let before_rect = p.rect;
        let before_tp = p.teleporter.rect;

        p.move_by(IVec2::ZERO);

        assert_eq!(p.rect, before_rect);
        assert_eq!(p.teleporter.rect, before_tp);
    }

    #[test]
    fn test_move_uses_pre_reset_size() {
        let mut p = Player::new(start(), Vec2::splat(PLAYER_SIZE));
        p.teleporter.grow(100.0); // 20 + 33 = 53
        let length = p.teleporter.length();

        p.move_by(IVec2::new(1, -1));

        assert!((p.center().x - (400.0 + length / 2.0)).abs() < 1e-4);
        assert!((p.center().y - (225.0 - length / 2.0)).abs() < 1e-4);
        assert_eq!(p.teleporter.length(), TELEPORTER_MIN);
        assert_eq!(p.teleporter.rect.center, p.center());
    }

    #[test]
    fn test_decaying_teleporter_expiry() {
        let t = Teleporter::new(start());
        let mut d = DecayingTeleporter::new(&t);
        assert_eq!(d.rect, t.rect);
        assert_eq!(d.fade(), 1.0);

        d.age(50.0);
        assert!((d.fade() - 0.5).abs() < 1e-6);
        d.age(50.0);
        assert!(!d.is_expired()); // exactly at lifetime
        d.age(1.0);
        assert!(d.is_expired());
        assert_eq!(d.fade(), 0.0);
    }

    #[test]
    fn test_fire_projectile() {
        let mut e = Enemy::new(1, Vec2::new(100.0, 100.0), Vec2::splat(ENEMY_SIZE));
        e.update(1700.0);
        assert!(e.ready_to_fire());

        let p = e.fire_projectile(Vec2::new(400.0, 500.0), PROJECTILE_SPEED).clone();

        assert_eq!(e.timer, 0.0);
        assert_eq!(e.projectiles.len(), 1);
        assert_eq!(p.rect.center, Vec2::new(100.0, 100.0));
        assert_eq!(p.rect.size, Vec2::splat(ENEMY_SIZE / 2.0));
        assert!((p.velocity.length() - PROJECTILE_SPEED).abs() < 1e-6);
        assert!((p.velocity.x - 0.6 * PROJECTILE_SPEED).abs() < 1e-6);
        assert!((p.velocity.y - 0.8 * PROJECTILE_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_fire_at_own_center_is_stationary() {
        let mut e = Enemy::new(1, Vec2::new(100.0, 100.0), Vec2::splat(ENEMY_SIZE));
        let p = e.fire_projectile(Vec2::new(100.0, 100.0), PROJECTILE_SPEED);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_projectile_ids_increase() {
        let mut e = Enemy::new(7, Vec2::ZERO, Vec2::splat(ENEMY_SIZE));
        let a = e.fire_projectile(Vec2::X, 0.2).id;
        let b = e.fire_projectile(Vec2::Y, 0.2).id;
        assert_eq!((a, b), (0, 1));
    }

    #[test]
    fn test_projectile_update() {
        let mut p = Projectile::new(0, Vec2::ZERO, Vec2::splat(10.0), Vec2::new(0.2, -0.1));
        p.update(10.0);
        assert!((p.rect.center - Vec2::new(2.0, -1.0)).length() < 1e-6);
    }

    proptest! {
        #[test]
        fn grow_stays_square_and_in_span(steps in proptest::collection::vec(0.0f32..500.0, 1..30)) {
            let mut t = Teleporter::new(Vec2::new(123.0, 45.0));
            for dt in steps {
                t.grow(dt);
                prop_assert!(t.rect.width() >= t.min && t.rect.width() <= t.max);
                prop_assert_eq!(t.rect.width(), t.rect.height());
                prop_assert_eq!(t.rect.center, Vec2::new(123.0, 45.0));
            }
        }

        #[test]
        fn shrink_stays_in_span(grow in 0.0f32..1000.0, shrink in 0.0f32..1000.0) {
            let mut t = Teleporter::new(Vec2::ZERO);
            t.grow(grow);
            t.shrink(shrink);
            prop_assert!(t.length() >= t.min && t.length() <= t.max);
            prop_assert_eq!(t.rect.width(), t.rect.height());
        }
    }
}
