//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam)'s [`Vec2`] so users don't need
//! to depend on it directly. [`Edges`] describes an axis-aligned rectangle by
//! its four sides, which is how colliders and buttons talk about bounds.
//!
//! World space is y-up: `top > bottom` and `right > left`.

pub use glam::Vec2;

/// An axis-aligned rectangle described by its four world-space sides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Build edges from a center point and full width/height.
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self {
            top: center.y + half_h,
            right: center.x + half_w,
            bottom: center.y - half_h,
            left: center.x - half_w,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    /// Returns `true` if the point lies inside or on the rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.bottom && point.y <= self.top
    }

    /// Returns `true` if the two rectangles overlap. Touching sides count.
    pub fn overlaps(&self, other: &Edges) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.top < other.bottom
            || self.bottom > other.top)
    }
}
