//! Rendering module
//!
//! The simulation never draws. A backend implements `Canvas` over a fixed
//! 800x450 logical surface and `draw` issues the scene onto it.

pub mod palette;
pub mod shapes;

use std::io;

use glam::Vec2;

pub use palette::{Palette, Rgb};
pub use shapes::{circle_radius, cooldown_indicator};

use crate::sim::{DecayingTeleporter, Enemy, Player, Rect};

/// Drawable surface in arena coordinates
pub trait Canvas {
    fn clear(&mut self, color: Rgb);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    /// One-unit outline
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    fn fill_rect(&mut self, rect: &Rect, color: Rgb);
    /// One-unit outline
    fn stroke_rect(&mut self, rect: &Rect, color: Rgb);
    /// Show the finished frame
    fn present(&mut self) -> io::Result<()>;
}

/// Draw one complete frame
pub fn draw<C: Canvas + ?Sized>(
    canvas: &mut C,
    palette: &Palette,
    player: &Player,
    enemies: &[Enemy],
    decaying_teleporters: &[DecayingTeleporter],
) -> io::Result<()> {
    canvas.clear(palette.background);

    canvas.fill_circle(player.center(), circle_radius(&player.rect), palette.player);
    let teleporter = &player.teleporter.rect;
    canvas.stroke_circle(teleporter.center, circle_radius(teleporter), palette.teleporter);

    for enemy in enemies {
        canvas.fill_rect(&enemy.rect, palette.enemy);
        canvas.stroke_rect(&cooldown_indicator(enemy), palette.enemy);
        for projectile in &enemy.projectiles {
            canvas.fill_rect(&projectile.rect, palette.projectile);
        }
    }

    for ghost in decaying_teleporters {
        let color = palette.trail.lerp(palette.background, 1.0 - ghost.fade());
        canvas.stroke_circle(ghost.rect.center, circle_radius(&ghost.rect), color);
    }

    canvas.present()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Projectile;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear(Rgb),
        FillCircle(Vec2, f32, Rgb),
        StrokeCircle(Vec2, f32, Rgb),
        FillRect(Rect, Rgb),
        StrokeRect(Rect, Rgb),
        Present,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn clear(&mut self, color: Rgb) {
            self.ops.push(Op::Clear(color));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
            self.ops.push(Op::FillCircle(center, radius, color));
        }
        fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
            self.ops.push(Op::StrokeCircle(center, radius, color));
        }
        fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
            self.ops.push(Op::FillRect(*rect, color));
        }
        fn stroke_rect(&mut self, rect: &Rect, color: Rgb) {
            self.ops.push(Op::StrokeRect(*rect, color));
        }
        fn present(&mut self) -> io::Result<()> {
            self.ops.push(Op::Present);
            Ok(())
        }
    }

    #[test]
    fn test_draw_order() {
        let palette = Palette::default();
        let player = Player::new(Vec2::new(400.0, 225.0), Vec2::splat(20.0));
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 100.0), Vec2::splat(20.0));
        enemy
            .projectiles
            .push(Projectile::new(0, Vec2::new(120.0, 120.0), Vec2::splat(10.0), Vec2::ZERO));
        let trail = vec![DecayingTeleporter::new(&player.teleporter)];

        let mut canvas = Recorder::default();
        draw(&mut canvas, &palette, &player, &[enemy.clone()], &trail).unwrap();

        assert_eq!(
            canvas.ops,
            vec![
                Op::Clear(Rgb::WHITE),
                Op::FillCircle(Vec2::new(400.0, 225.0), 10.0, Rgb::BLACK),
                Op::StrokeCircle(Vec2::new(400.0, 225.0), 10.0, Rgb::BLUE),
                Op::FillRect(enemy.rect, Rgb::RED),
                Op::StrokeRect(cooldown_indicator(&enemy), Rgb::RED),
                Op::FillRect(enemy.projectiles[0].rect, Rgb::RED),
                Op::StrokeCircle(Vec2::new(400.0, 225.0), 10.0, Rgb::BLUE),
                Op::Present,
            ]
        );
    }

    #[test]
    fn test_trail_fades_toward_background() {
        let palette = Palette::default();
        let player = Player::new(Vec2::new(400.0, 225.0), Vec2::splat(20.0));
        let mut ghost = DecayingTeleporter::new(&player.teleporter);
        ghost.age(50.0);

        let mut canvas = Recorder::default();
        draw(&mut canvas, &palette, &player, &[], &[ghost]).unwrap();

        let trail_color = canvas.ops.iter().rev().find_map(|op| match op {
            Op::StrokeCircle(_, _, color) => Some(*color),
            _ => None,
        });
        assert_eq!(trail_color, Some(Rgb(128, 128, 255)));
    }
}
