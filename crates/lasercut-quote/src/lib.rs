//! # Lasercut Quote
//!
//! Prices a parsed [`Profile`](lasercut_profile::Profile). The quote is the
//! time the cutter spends on every edge, charged at the machining rate,
//! plus the raw material needed to cover the padded bounding rectangle of
//! the whole profile.

pub mod engine;
pub mod error;
pub mod pricing;

pub use engine::{quote, QuoteBreakdown, QuoteEngine};
pub use error::{QuoteError, Result};
pub use pricing::{DegenerateArcPolicy, PricingModel};
