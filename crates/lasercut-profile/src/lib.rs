//! # Lasercut Profile
//!
//! Reads the engineering-drawing export that describes a flat workpiece
//! and turns it into a [`Profile`]: the line segments and clockwise
//! circular arcs that make up the cutting path, with every vertex
//! reference resolved to a coordinate.
//!
//! ```text
//! {
//!     "Edges": {
//!         "1": { "Type": "LineSegment", "Vertices": [10, 20] },
//!         "2": { "Type": "CircularArc", "Vertices": [20, 30],
//!                "Center": { "X": 1.0, "Y": 0.0 }, "ClockwiseFrom": 30 }
//!     },
//!     "Vertices": {
//!         "10": { "Position": { "X": 0.0, "Y": 0.0 } },
//!         ...
//!     }
//! }
//! ```

pub mod document;
pub mod error;
pub mod parser;
pub mod profile;
pub mod registry;
pub mod source;

pub use error::{ParseError, Result, Section};
pub use parser::{ParseMode, ProfileParser};
pub use profile::{Profile, Vertex, VertexId};
pub use registry::VertexRegistry;
