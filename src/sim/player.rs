//! Player controller: movement, teleporter growth and the decaying trail

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::entity::{DecayingTeleporter, Player};
use super::geometry::Rect;
use crate::consts::PLAYER_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    pub arena_size: Vec2,
    pub start_center: Vec2,
    pub player_size: Vec2,
    pub player: Player,
    /// Trail ghosts, oldest first
    pub decaying_teleporters: Vec<DecayingTeleporter>,
}

impl PlayerController {
    pub fn new(arena_size: Vec2) -> Self {
        let start_center = arena_size / 2.0;
        let player_size = Vec2::splat(PLAYER_SIZE);
        Self {
            arena_size,
            start_center,
            player_size,
            player: Player::new(start_center, player_size),
            decaying_teleporters: Vec::new(),
        }
    }

    /// Fresh player at the arena center, empty trail
    pub fn reset_player(&mut self) {
        self.player = Player::new(self.start_center, self.player_size);
        self.decaying_teleporters.clear();
    }

    /// Advance the player by `dt` ms.
    ///
    /// A nonzero `move_vec` leaves a ghost of the pre-move teleporter, then
    /// moves and clamps the player. Holding suspends growth without shrinking.
    pub fn update(&mut self, dt: f32, move_vec: IVec2, hold: bool) {
        if move_vec != IVec2::ZERO {
            self.decaying_teleporters
                .push(DecayingTeleporter::new(&self.player.teleporter));
            self.player.move_by(move_vec);
            self.keep_player_in_bounds();
        }

        if !hold {
            self.player.teleporter.grow(dt);
        }

        for ghost in &mut self.decaying_teleporters {
            ghost.age(dt);
        }
        self.decaying_teleporters.retain(|ghost| !ghost.is_expired());

        self.player.update();
    }

    /// The arena as a rect
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.arena_size / 2.0, self.arena_size)
    }

    /// Push the player box back inside the arena, one edge at a time.
    ///
    /// An overflowing edge is placed exactly on the arena edge so no rounding
    /// is left behind.
    pub fn keep_player_in_bounds(&mut self) {
        let bounds = self.bounds();
        let rect = &mut self.player.rect;
        let half = rect.half_size();

        if rect.top() < bounds.top() {
            rect.center.y = bounds.top() + half.y;
        }
        if rect.bottom() > bounds.bottom() {
            rect.center.y = bounds.bottom() - half.y;
        }
        if rect.left() < bounds.left() {
            rect.center.x = bounds.left() + half.x;
        }
        if rect.right() > bounds.right() {
            rect.center.x = bounds.right() - half.x;
        }

        self.player.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn controller() -> PlayerController {
        PlayerController::new(Vec2::new(ARENA_WIDTH, ARENA_HEIGHT))
    }

    #[test]
    fn test_starts_centered() {
        let pc = controller();
        assert_eq!(pc.player.center(), Vec2::new(400.0, 225.0));
        assert_eq!(pc.player.rect.size, Vec2::splat(PLAYER_SIZE));
        assert!(pc.decaying_teleporters.is_empty());
    }

    #[test]
    fn test_zero_move_leaves_no_trail() {
        let mut pc = controller();
        pc.update(16.0, IVec2::ZERO, false);
        assert!(pc.decaying_teleporters.is_empty());
        assert_eq!(pc.player.center(), Vec2::new(400.0, 225.0));
    }

    #[test]
    fn test_move_snapshots_pre_move_teleporter() {
        let mut pc = controller();
        pc.update(100.0, IVec2::ZERO, false);
        let before = pc.player.teleporter.rect;

        pc.update(0.0, IVec2::new(-1, 0), false);

        assert_eq!(pc.decaying_teleporters.len(), 1);
        assert_eq!(pc.decaying_teleporters[0].rect, before);
        assert_ne!(pc.player.center(), before.center);
    }

    #[test]
    fn test_hold_suspends_growth() {
        let mut pc = controller();
        pc.update(100.0, IVec2::ZERO, false);
        let length = pc.player.teleporter.length();

        pc.update(100.0, IVec2::ZERO, true);
        assert_eq!(pc.player.teleporter.length(), length);

        pc.update(100.0, IVec2::ZERO, false);
        assert!(pc.player.teleporter.length() > length);
    }

    #[test]
    fn test_trail_decays() {
        let mut pc = controller();
        pc.update(16.0, IVec2::new(1, 0), false);
        assert_eq!(pc.decaying_teleporters.len(), 1);

        pc.update(60.0, IVec2::ZERO, false);
        assert_eq!(pc.decaying_teleporters.len(), 1);

        pc.update(60.0, IVec2::ZERO, false);
        assert!(pc.decaying_teleporters.is_empty());
    }

    #[test]
    fn test_keep_in_bounds_right_edge() {
        let mut pc = controller();
        pc.player.rect.center = Vec2::new(805.0, 225.0);
        pc.keep_player_in_bounds();
        assert_eq!(pc.player.rect.right(), 800.0);
        assert_eq!(pc.player.center(), Vec2::new(790.0, 225.0));
        assert_eq!(pc.player.teleporter.rect.center, pc.player.center());
    }

    #[test]
    fn test_keep_in_bounds_corner() {
        let mut pc = controller();
        pc.player.rect.center = Vec2::new(-30.0, 470.0);
        pc.keep_player_in_bounds();
        assert_eq!(pc.player.center(), Vec2::new(10.0, 440.0));
    }

    #[test]
    fn test_clamp_lands_exactly_on_edge() {
        let mut pc = controller();
        pc.player.rect.center = Vec2::new(0.0, -61.376637);
        pc.keep_player_in_bounds();
        assert_eq!(pc.player.center(), Vec2::new(10.0, 10.0));
        assert_eq!(pc.player.rect.top(), 0.0);
        assert_eq!(pc.player.rect.left(), 0.0);
        assert!(pc.bounds().contains(&pc.player.rect));
    }

    #[test]
    fn test_reset_player() {
        let mut pc = controller();
        pc.update(100.0, IVec2::new(1, 1), false);
        pc.reset_player();
        assert_eq!(pc.player.center(), pc.start_center);
        assert_eq!(pc.player.teleporter.length(), TELEPORTER_MIN);
        assert!(pc.decaying_teleporters.is_empty());
    }

    proptest! {
        #[test]
        fn clamped_player_stays_inside(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            let mut pc = controller();
            pc.player.rect.center = Vec2::new(x, y);
            pc.keep_player_in_bounds();
            prop_assert!(pc.bounds().contains(&pc.player.rect));
        }

        #[test]
        fn right_overflow_corrected_by_excess(excess in 0.1f32..500.0) {
            let mut pc = controller();
            pc.player.rect.center = Vec2::new(790.0 + excess, 225.0);
            pc.keep_player_in_bounds();
            prop_assert!((pc.player.center().x - 790.0).abs() < 1e-3);
            prop_assert!(pc.player.rect.left() >= 0.0);
        }
    }
}
