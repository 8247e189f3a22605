//! # Lasercut
//!
//! Estimates the cost of laser-cutting a flat workpiece from an
//! engineering-drawing export. The export describes a planar profile of
//! straight edges and circular arcs; the quote is the machining time along
//! every edge plus the raw material covering the padded bounding rectangle.
//!
//! ## Architecture
//!
//! Lasercut is organized as a workspace with multiple crates:
//!
//! 1. **lasercut-core** - Geometry kernel: points, segments, arcs, rectangles
//! 2. **lasercut-profile** - Profile document parser
//! 3. **lasercut-quote** - Pricing model and quote engine
//! 4. **lasercut-settings** - JSON/TOML configuration
//! 5. **lasercut** - Logging setup, file quoting and the command-line binary

use anyhow::Context;
use std::path::Path;

pub use lasercut_core::{
    format_currency, rebase_period, round_currency, CircularArc, GeometryError, LineSegment,
    Point, Rectangle,
};

pub use lasercut_profile::{
    ParseError, ParseMode, Profile, ProfileParser, Section, Vertex, VertexId,
};

pub use lasercut_quote::{
    quote, DegenerateArcPolicy, PricingModel, QuoteBreakdown, QuoteEngine, QuoteError,
};

pub use lasercut_settings::{Config, ConfigError, ParserSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version line printed by `lasercut --version`
pub fn version_string() -> String {
    format!("lasercut {} (built {})", VERSION, BUILD_DATE)
}

/// Parse the profile document at `path` and price it under `config`
pub fn quote_file(path: &Path, config: &Config) -> anyhow::Result<QuoteBreakdown> {
    let engine = config.engine().context("Invalid pricing configuration")?;
    let parser = ProfileParser::new(config.parser.mode);
    tracing::debug!("Parsing {} in {} mode", path.display(), parser.mode());
    let profile = parser
        .parse_file(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;

    tracing::info!(
        segments = profile.segment_count(),
        arcs = profile.arc_count(),
        "Parsed {}",
        path.display()
    );

    let breakdown = engine
        .breakdown(&profile)
        .with_context(|| format!("Failed to quote {}", path.display()))?;
    if !breakdown.subtotal.is_finite() {
        anyhow::bail!(QuoteError::NonFiniteTotal(breakdown.subtotal));
    }
    Ok(breakdown)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output to stderr, leaving stdout for the quote itself
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
