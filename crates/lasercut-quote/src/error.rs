//! Error types for quoting.

use lasercut_core::GeometryError;
use thiserror::Error;

/// Errors that can occur while pricing a profile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// A pricing constant is out of range.
    #[error("Invalid pricing '{field}': {reason}")]
    InvalidPricing { field: String, reason: String },

    /// The profile holds geometry that cannot be priced.
    #[error("Geometry error in arc {index}: {source}")]
    Geometry {
        index: usize,
        #[source]
        source: GeometryError,
    },

    /// The total came out infinite or NaN.
    #[error("Quote total is not finite: {0}")]
    NonFiniteTotal(f64),
}

impl QuoteError {
    pub fn invalid_pricing(field: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidPricing {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for quoting operations.
pub type Result<T> = std::result::Result<T, QuoteError>;
