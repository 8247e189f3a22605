use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{rebase_period, Point, Rectangle};

/// A circular arc cut clockwise from `begin` to `end` around `center`.
///
/// `begin` and `end` are expected to sit at the same distance from
/// `center`. When `begin == end` the arc is a full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularArc {
    pub center: Point,
    pub begin: Point,
    pub end: Point,
}

impl CircularArc {
    pub fn new(center: Point, begin: Point, end: Point) -> Self {
        Self { center, begin, end }
    }

    /// Distance from the center to the end vertex
    pub fn radius(&self) -> f64 {
        self.center.distance_to(&self.end)
    }

    /// Clockwise sweep from `begin` to `end`, in `(0, 2π]`.
    ///
    /// Coincident endpoints give `2π`.
    pub fn subtended_angle(&self) -> f64 {
        let mut angle = self.begin.angle_from(&self.center) - self.end.angle_from(&self.center);
        if angle <= 0.0 {
            angle += TAU;
        }
        angle
    }

    /// Length of the cut along the arc
    pub fn length(&self) -> f64 {
        self.radius() * self.subtended_angle()
    }

    /// True when the radius is not finite or does not exceed `min_radius`
    pub fn is_degenerate(&self, min_radius: f64) -> bool {
        let radius = self.radius();
        !radius.is_finite() || radius <= min_radius
    }

    /// Whether the clockwise sweep from `begin` to `end` passes through
    /// the direction `angle`.
    pub fn sweeps_through(&self, angle: f64) -> bool {
        let begin = rebase_period(self.begin.angle_from(&self.center), angle);
        let end = rebase_period(self.end.angle_from(&self.center), angle);
        begin <= end
    }

    /// Tight axis-aligned bounding rectangle of the arc.
    ///
    /// Starts from the box around center and endpoints, then pushes a side
    /// out to `center ± radius` for every axis direction the sweep crosses.
    pub fn bounding_rectangle(&self) -> Rectangle {
        let mut rect = Rectangle::EMPTY;
        rect.include_point(self.center);
        rect.include_point(self.begin);
        rect.include_point(self.end);

        let radius = self.radius();

        if self.sweeps_through(PI) {
            rect.bottom_left.x = self.center.x - radius;
        }
        if self.sweeps_through(TAU) {
            rect.top_right.x = self.center.x + radius;
        }
        if self.sweeps_through(FRAC_PI_2) {
            rect.top_right.y = self.center.y + radius;
        }
        if self.sweeps_through(3.0 * FRAC_PI_2) {
            rect.bottom_left.y = self.center.y - radius;
        }

        rect
    }

    /// Point on the arc at `fraction` of the way from `begin` to `end`
    pub fn point_at(&self, fraction: f64) -> Point {
        let radius = self.radius();
        let angle = self.begin.angle_from(&self.center) - self.subtended_angle() * fraction;
        Point::new(
            self.center.x + radius * angle.cos(),
            self.center.y + radius * angle.sin(),
        )
    }
}
