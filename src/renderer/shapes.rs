//! Shape helpers shared by every canvas backend

use glam::Vec2;

use crate::sim::{Enemy, Rect};

/// Radius of the circle drawn for a rect
#[inline]
pub fn circle_radius(rect: &Rect) -> f32 {
    rect.width() / 2.0
}

/// Square outline around an enemy showing its fire cooldown.
///
/// Half-size starts at `radius + 1.5 * diameter` right after a shot and
/// shrinks linearly to `radius` as the timer reaches the cooldown, never
/// below 1.
pub fn cooldown_indicator(enemy: &Enemy) -> Rect {
    let diameter = enemy.rect.width();
    let frac = enemy.charge();
    let radius = (diameter / 2.0 + 1.5 * diameter * (1.0 - frac)).max(1.0);
    Rect::from_center(enemy.rect.center, Vec2::splat(2.0 * radius))
}
