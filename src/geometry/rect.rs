//! Axis-aligned rectangles in tile space

use serde::{Deserialize, Serialize};

/// Rectangle spanning [left, right] × [top, bottom], y growing downhill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl TileRect {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            top: top.min(bottom),
            bottom: top.max(bottom),
        }
    }

    /// Unit rectangle covering tile (x, y)
    pub fn tile(x: i32, y: i32) -> Self {
        Self::new(x as f32, x as f32 + 1.0, y as f32, y as f32 + 1.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &TileRect) -> bool {
        self.left < other.right && other.left < self.right && self.top < other.bottom && other.top < self.bottom
    }

    /// Inclusive point containment
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Grow on every side by `amount`
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(self.left - amount, self.right + amount, self.top - amount, self.bottom + amount)
    }

    /// Same rectangle in pixel space
    pub fn to_pixels(&self, tile_size: f32) -> Self {
        Self {
            left: self.left * tile_size,
            right: self.right * tile_size,
            top: self.top * tile_size,
            bottom: self.bottom * tile_size,
        }
    }
}
