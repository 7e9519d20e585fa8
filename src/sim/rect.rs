//! Axis-aligned rectangle geometry
//!
//! Every game object occupies one of these. Positions are stored by center;
//! screen coordinates grow right (x) and down (y).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Build from a top-left corner instead of a center
    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self {
            center: top_left + size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half()
    }

    /// Top-left corner (the host's drawing origin)
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.min()
    }

    /// Overlap extent on each axis (negative or zero means separated)
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        let reach = self.half() + other.half();
        reach - (self.center - other.center).abs()
    }

    /// Strict intersection; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        let overlap = self.overlap(other);
        overlap.x > 0.0 && overlap.y > 0.0
    }

    /// Keep the rect horizontally inside `[0, width]`
    pub fn clamp_x(&mut self, width: f32) {
        let half = self.half().x;
        self.center.x = self.center.x.clamp(half, (width - half).max(half));
    }
}
