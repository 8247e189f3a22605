use serde::{Deserialize, Serialize};

use super::Point;

/// A straight cut between two points. Direction is kept as read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub begin: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(begin: Point, end: Point) -> Self {
        Self { begin, end }
    }

    /// Euclidean length between the endpoints
    pub fn length(&self) -> f64 {
        self.begin.distance_to(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        let seg = LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(seg.length(), 5.0);
    }

    #[test]
    fn test_length_ignores_direction() {
        let a = LineSegment::new(Point::new(-1.0, 2.0), Point::new(4.0, -10.0));
        let b = LineSegment::new(a.end, a.begin);
        assert_eq!(a.length(), b.length());
        assert_eq!(a.length(), 13.0);
    }

    #[test]
    fn test_zero_length() {
        let p = Point::new(2.5, 2.5);
        assert_eq!(LineSegment::new(p, p).length(), 0.0);
    }
}
