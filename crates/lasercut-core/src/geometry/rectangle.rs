use serde::{Deserialize, Serialize};

use super::{LineSegment, Point};

/// Axis-aligned rectangle given by its bottom-left and top-right corners.
///
/// [`Rectangle::EMPTY`] bounds nothing: its corners sit at `+∞` and `−∞`
/// so that folding any finite point into it yields that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub bottom_left: Point,
    pub top_right: Point,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Rectangle {
    /// The bound of an empty set of shapes
    pub const EMPTY: Rectangle = Rectangle {
        bottom_left: Point {
            x: f64::INFINITY,
            y: f64::INFINITY,
        },
        top_right: Point {
            x: f64::NEG_INFINITY,
            y: f64::NEG_INFINITY,
        },
    };

    pub fn new(bottom_left: Point, top_right: Point) -> Self {
        Self {
            bottom_left,
            top_right,
        }
    }

    /// True when no shape has been folded in yet
    pub fn is_empty(&self) -> bool {
        self.bottom_left.x > self.top_right.x || self.bottom_left.y > self.top_right.y
    }

    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }

    /// Grow the rectangle so it covers `p`
    pub fn include_point(&mut self, p: Point) {
        self.bottom_left.x = self.bottom_left.x.min(p.x);
        self.bottom_left.y = self.bottom_left.y.min(p.y);
        self.top_right.x = self.top_right.x.max(p.x);
        self.top_right.y = self.top_right.y.max(p.y);
    }

    /// Smallest rectangle covering both `self` and `other`
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            bottom_left: Point::new(
                self.bottom_left.x.min(other.bottom_left.x),
                self.bottom_left.y.min(other.bottom_left.y),
            ),
            top_right: Point::new(
                self.top_right.x.max(other.top_right.x),
                self.top_right.y.max(other.top_right.y),
            ),
        }
    }

    /// Whether `p` lies inside or on the boundary, with an absolute tolerance
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.bottom_left.x - tolerance
            && p.x <= self.top_right.x + tolerance
            && p.y >= self.bottom_left.y - tolerance
            && p.y <= self.top_right.y + tolerance
    }

    /// Bounding rectangle of every endpoint of every segment
    pub fn bounding_segments(segments: &[LineSegment]) -> Rectangle {
        segments.iter().fold(Rectangle::EMPTY, |mut rect, seg| {
            rect.include_point(seg.begin);
            rect.include_point(seg.end);
            rect
        })
    }

    /// Bounding rectangle of a set of rectangles
    pub fn bounding_rectangles(rects: &[Rectangle]) -> Rectangle {
        rects
            .iter()
            .fold(Rectangle::EMPTY, |bound, rect| bound.union(rect))
    }

    /// Area after adding `padding` once to each dimension.
    ///
    /// The empty rectangle has no area.
    pub fn area(&self, padding: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (padding + self.width()) * (padding + self.height())
    }
}
