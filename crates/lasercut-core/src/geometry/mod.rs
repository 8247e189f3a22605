//! Geometry kernel
//!
//! Pure functions over points, line segments, circular arcs and
//! axis-aligned rectangles. Coordinates are in inches; angles are in
//! radians measured counter-clockwise from +X.

mod arc;
mod point;
mod rectangle;
mod segment;

pub use arc::CircularArc;
pub use point::Point;
pub use rectangle::Rectangle;
pub use segment::LineSegment;

use std::f64::consts::TAU;

/// Shift `angle` by a whole number of turns into `(upper_bound - 2π, upper_bound]`.
///
/// Used to decide whether a reference direction lies inside a clockwise
/// sweep: both sweep ends are re-based against the reference angle and
/// compared.
pub fn rebase_period(angle: f64, upper_bound: f64) -> f64 {
    let turns = ((upper_bound - angle) / TAU).floor();
    let rebased = angle + turns * TAU;
    // Guard against rounding pushing the value just outside the window.
    if rebased > upper_bound {
        rebased - TAU
    } else if rebased <= upper_bound - TAU {
        rebased + TAU
    } else {
        rebased
    }
}
