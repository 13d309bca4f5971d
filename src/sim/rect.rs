//! Axis-aligned bounding rectangles
//!
//! Every collision shape is a rect centered on the entity position and
//! derived from its rendered size. Intersection is strict overlap;
//! touching edges do not collide.

use glam::Vec2;

use crate::consts::{FRAME_HEIGHT, FRAME_WIDTH};

/// Rect stored as center plus half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Square rect of side `side` centered on `center`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::centered(center, Vec2::splat(side))
    }

    /// The visible frame
    pub fn frame() -> Self {
        Self::centered(
            Vec2::new(FRAME_WIDTH / 2.0, FRAME_HEIGHT / 2.0),
            Vec2::new(FRAME_WIDTH, FRAME_HEIGHT),
        )
    }

    pub fn width(&self) -> f32 {
        self.half.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half.y * 2.0
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap test on both axes
    pub fn intersects(&self, other: &Rect) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half + other.half;
        gap.x < reach.x && gap.y < reach.y
    }

    /// Translate the rect the minimal distance so it lies inside
    /// `other`. A rect larger than `other` on an axis is centered on it.
    /// Used to pin a collision impact point inside the larger shape.
    pub fn clamped_into(&self, other: &Rect) -> Rect {
        let clamp_axis = |center: f32, half: f32, lo: f32, hi: f32| {
            if half * 2.0 >= hi - lo {
                (lo + hi) / 2.0
            } else {
                center.clamp(lo + half, hi - half)
            }
        };
        let min = other.min();
        let max = other.max();
        Rect {
            center: Vec2::new(
                clamp_axis(self.center.x, self.half.x, min.x, max.x),
                clamp_axis(self.center.y, self.half.y, min.y, max.y),
            ),
            half: self.half,
        }
    }
}
