//! # Lasercut Core
//!
//! Core types and the geometry kernel for laser-cut quoting.
//! Provides points, line segments, circular arcs and axis-aligned
//! rectangles together with the closed-form measurements the quote
//! engine is built on: lengths, radii, subtended angles and bounding
//! rectangles.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{GeometryError, Result};

pub use geometry::{rebase_period, CircularArc, LineSegment, Point, Rectangle};

pub use units::{format_currency, round_currency};
