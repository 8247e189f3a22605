//! Error handling for the geometry kernel
//!
//! The kernel itself is total over well-formed input. These errors are
//! raised by callers that check geometry before relying on it, such as
//! the quote engine when an arc is too tight to price.

use thiserror::Error;

/// Geometry error type
///
/// Represents shapes or derived quantities that cannot be used for costing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Arc radius is zero, near zero or not a number
    #[error("Degenerate arc: radius {radius} is too small to cut")]
    DegenerateArc {
        /// The radius that was measured.
        radius: f64,
    },

    /// A derived quantity is infinite or NaN
    #[error("Non-finite {quantity}: {value}")]
    NonFinite {
        /// The name of the quantity.
        quantity: String,
        /// The offending value.
        value: f64,
    },
}

impl GeometryError {
    /// Create a non-finite error for a named quantity
    pub fn non_finite(quantity: impl Into<String>, value: f64) -> Self {
        GeometryError::NonFinite {
            quantity: quantity.into(),
            value,
        }
    }
}

/// Result type using GeometryError
pub type Result<T> = std::result::Result<T, GeometryError>;
