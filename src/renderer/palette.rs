//! Colors for game elements
//!
//! The palette is an immutable value handed to the renderer each frame.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);

    /// Linear blend toward `other`; `t = 0` is self, `t = 1` is other
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub player: Rgb,
    pub teleporter: Rgb,
    pub enemy: Rgb,
    pub projectile: Rgb,
    pub trail: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            player: Rgb::BLACK,
            teleporter: Rgb::BLUE,
            enemy: Rgb::RED,
            projectile: Rgb::RED,
            trail: Rgb::BLUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Rgb::BLUE.lerp(Rgb::WHITE, 0.0), Rgb::BLUE);
        assert_eq!(Rgb::BLUE.lerp(Rgb::WHITE, 1.0), Rgb::WHITE);
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 0.5), Rgb(128, 128, 128));
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 7.0), Rgb::WHITE);
    }

    #[test]
    fn test_palette_partial_json() {
        let palette: Palette = serde_json::from_str(r#"{"background":[0,0,0]}"#).unwrap();
        assert_eq!(palette.background, Rgb::BLACK);
        assert_eq!(palette.enemy, Rgb::RED);
    }
}
