//! Axis-aligned rect geometry and 2D vector helpers
//!
//! Every entity is positioned and collided through a `Rect`. Rendering may
//! draw circles, but hit detection always uses the rect bound.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle stored as center + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    /// Width (x) and height (y), never negative
    pub size: Vec2,
}

impl Rect {
    /// Build a rect centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size: size.max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_size()
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_size()
    }

    /// Move by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Resize around the current center
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
    }

    /// Grow by `amount` on every side, keeping the center
    pub fn inflate(&self, amount: f32) -> Self {
        Self::from_center(self.center, self.size + Vec2::splat(2.0 * amount))
    }

    /// Strict overlap test: rects that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True if `other` lies entirely within this rect
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// True if `point` lies inside (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// `a - b`
#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

/// `v * k`
#[inline]
pub fn scale(v: Vec2, k: f32) -> Vec2 {
    v * k
}

/// `v / k`, zero when `k` is zero
#[inline]
pub fn divide(v: Vec2, k: f32) -> Vec2 {
    if k == 0.0 { Vec2::ZERO } else { v / k }
}

/// Unit vector along `v`; the zero vector maps to zero instead of NaN.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}
