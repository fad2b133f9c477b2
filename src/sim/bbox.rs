//! Axis-aligned bounding boxes for collision tests
//!
//! Boxes are derived data: every entity rebuilds its box from its current
//! position after it moves, and nothing mutates a box directly.

use serde::{Deserialize, Serialize};

use super::fixed::Position;

/// Width/height of an entity's collision footprint, in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn half_width(self) -> i32 {
        self.width / 2
    }

    #[inline]
    pub const fn half_height(self) -> i32 {
        self.height / 2
    }
}

/// Integer rectangle centered on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// Box of `size` centered on the rounded `position`
    pub fn new(position: Position, size: Size) -> Self {
        let cx = position.x.round_integer();
        let cy = position.y.round_integer();
        Self {
            left: cx - size.half_width(),
            top: cy - size.half_height(),
            width: size.width,
            height: size.height,
        }
    }

    /// Box spanning `[left, right) × [top, bottom)`
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Overlap test; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }

    /// True if this box lies entirely inside `outer` (edges may touch)
    pub fn contained_in(&self, outer: &BoundingBox) -> bool {
        self.left >= outer.left
            && self.right() <= outer.right()
            && self.top >= outer.top
            && self.bottom() <= outer.bottom()
    }
}
