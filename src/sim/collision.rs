//! Collision detection for axis-aligned boxes
//!
//! The entity and every obstacle half are plain rectangles, so a hit is an
//! interval overlap on both axes. Touching edges do not count as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Strict overlap test (shared edges are not a collision)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left
            && self.left < other.right()
            && self.bottom() > other.top
            && self.top < other.bottom()
    }

    /// Whether the rectangle reaches or crosses a horizontal line
    pub fn touches_floor(&self, floor_y: f32) -> bool {
        self.bottom() >= floor_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Horizontal overlap only
        assert!(!a.overlaps(&Rect::new(2.0, 50.0, 4.0, 4.0)));
        // Vertical overlap only
        assert!(!a.overlaps(&Rect::new(50.0, 2.0, 4.0, 4.0)));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(50.0, 300.0), 34.0, 24.0);
        assert_eq!(r.left, 33.0);
        assert_eq!(r.right(), 67.0);
        assert_eq!(r.top, 288.0);
        assert_eq!(r.bottom(), 312.0);
    }

    #[test]
    fn test_touches_floor_is_inclusive() {
        let r = Rect::new(0.0, 476.0, 10.0, 24.0);
        assert!(r.touches_floor(500.0));
        assert!(!r.touches_floor(500.5));
    }
}
