//! Axis-aligned collision detection
//!
//! Every entity on the road is a rectangle in screen space (y grows downward),
//! so a single strict AABB overlap test covers bike, vehicle, hazard and
//! power-up interactions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Anything with a screen-space bounding box
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Strict AABB overlap. Rectangles that only share an edge do not collide.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Overlap test between any two bounded entities
#[inline]
pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    overlaps(&a.bounds(), &b.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Rect::new(0.0, 0.0, 40.0, 80.0);
        let b = Rect::new(20.0, 60.0, 60.0, 80.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 40.0, 80.0);
        // Shares the right edge
        let right = Rect::new(40.0, 0.0, 10.0, 10.0);
        // Shares the bottom edge
        let below = Rect::new(0.0, 80.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_contained_rect_collides() {
        let outer = Rect::new(100.0, 100.0, 70.0, 100.0);
        let inner = Rect::new(120.0, 130.0, 20.0, 40.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_disjoint_rects_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 50.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_edges() {
        let r = Rect::new(150.0, -80.0, 60.0, 80.0);
        assert_eq!(r.right(), 210.0);
        assert_eq!(r.bottom(), 0.0);
    }
}
