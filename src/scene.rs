//! Render boundary data
//!
//! The simulation emits a [`Scene`] each frame: sprites tagged with a
//! draw layer plus text overlays. A presenter composites sprites in
//! ascending layer order onto a `FRAME_WIDTH` x `FRAME_HEIGHT` canvas and
//! lays text out by anchor. Nothing in here touches a window or GPU.

use glam::Vec2;
use rand::Rng;

use crate::sim::Rect;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GRAY: Color = Color::new(190, 190, 190);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const PURPLE: Color = Color::new(160, 32, 240);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Component-wise blend, `t` = 0 gives `self`, `t` = 1 gives `other`
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// A uniformly random color (splitter debris)
    pub fn random(rng: &mut impl Rng) -> Color {
        let [r, g, b] = rng.random();
        Color::new(r, g, b)
    }
}

/// Font size classes available to the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Big,
    Regular,
    Small,
}

/// Which point of the laid-out text the overlay position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    MidTop,
    TopRight,
    BottomLeft,
    MidBottom,
}

/// Renderable form of a sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Filled disc inscribed in the sprite rect
    Disc { color: Color },
    /// One-pixel circle outline inscribed in the sprite rect
    Ring { color: Color },
    /// The player triangle, rotated by `heading` degrees around the
    /// rect center
    Ship { heading: f32 },
}

/// One sprite: bounding rect, shape, draw layer (lower composited first)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub shape: Shape,
    pub layer: u8,
}

/// One text overlay
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub position: Vec2,
    pub anchor: Anchor,
    pub font: FontSize,
    pub color: Color,
    /// Opacity in [0, 1]
    pub alpha: f32,
}

/// Everything a presenter needs for one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub sprites: Vec<Sprite>,
    pub texts: Vec<TextOverlay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::new(0, 100, 200);
        let b = Color::new(255, 0, 100);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_lerp_clamps_factor() {
        let a = Color::GRAY;
        let b = Color::RED;
        assert_eq!(a.lerp(b, 1.5), b);
        assert_eq!(a.lerp(b, -0.5), a);
    }
}
