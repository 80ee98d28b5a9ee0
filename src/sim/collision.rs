//! Collision primitives for axis-aligned boxes and circles
//!
//! Edge policy: touching edges do NOT overlap. The player's landing checks use
//! inclusive `>=`/`<=` comparisons against surfaces, so the overlap tests here
//! stay strict to avoid double-triggering on exact contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "width")]
    pub w: f32,
    #[serde(rename = "height")]
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Same rectangle shifted by `-offset` (world to screen conversion)
    #[inline]
    pub fn offset_by(&self, offset: Vec2) -> Self {
        Self::new(self.x - offset.x, self.y - offset.y, self.w, self.h)
    }

    /// Whether the horizontal spans overlap (strict)
    #[inline]
    pub fn spans_x(&self, other: &Rect) -> bool {
        self.right() > other.x && self.x < other.right()
    }

    /// Strict AABB overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }
}

/// A circle used for projectile-style enemy hitboxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Circle inscribed in a square bounding box (radius = half width)
    pub fn inscribed(rect: &Rect) -> Self {
        Self {
            center: rect.center(),
            radius: rect.w / 2.0,
        }
    }
}

/// Check whether two rectangles overlap (touching edges do not count)
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Check whether a circle overlaps a rectangle
///
/// Distance from the circle center to the nearest point of the rectangle is
/// compared against the radius (inclusive).
#[inline]
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let nearest = Vec2::new(
        circle.center.x.clamp(rect.x, rect.right()),
        circle.center.y.clamp(rect.y, rect.bottom()),
    );
    circle.center.distance_squared(nearest) <= circle.radius * circle.radius
}

/// Rectangle covering a box's vertical travel between two frames
///
/// Spans from the previous top edge to the current bottom edge at the current
/// horizontal position, so thin surfaces crossed in one step are not missed.
#[inline]
pub fn swept_rect(current: &Rect, last_y: f32) -> Rect {
    Rect::new(current.x, last_y, current.w, current.bottom() - last_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
        assert!(rects_overlap(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &right));
        assert!(!rects_overlap(&a, &below));
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);

        // Center inside
        let inside = Circle { center: Vec2::new(20.0, 20.0), radius: 1.0 };
        assert!(circle_rect_overlap(&inside, &rect));

        // Just reaching the right edge
        let edge = Circle { center: Vec2::new(50.0, 20.0), radius: 10.0 };
        assert!(circle_rect_overlap(&edge, &rect));

        // Near the corner but outside the radius (distance ~14.1)
        let corner = Circle { center: Vec2::new(50.0, 50.0), radius: 14.0 };
        assert!(!circle_rect_overlap(&corner, &rect));
    }

    #[test]
    fn test_inscribed_circle() {
        let c = Circle::inscribed(&Rect::new(10.0, 20.0, 35.0, 35.0));
        assert_eq!(c.center, Vec2::new(27.5, 37.5));
        assert_eq!(c.radius, 17.5);
    }

    #[test]
    fn test_swept_rect_catches_thin_surface() {
        // Player moved from y=0 to y=100 in one step; a 5px cloud at y=60 lies in between
        let player = Rect::new(0.0, 100.0, 40.0, 40.0);
        let swept = swept_rect(&player, 0.0);
        assert_eq!(swept.h, 140.0);
        let cloud = Rect::new(0.0, 60.0, 100.0, 5.0);
        assert!(!player.overlaps(&cloud));
        assert!(swept.overlaps(&cloud));
    }
}
