//! Pricing constants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{QuoteError, Result};

/// What to do with an arc whose radius is too small to price.
///
/// The arc cost grows with `exp(1 / radius)`, which diverges as the
/// radius approaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateArcPolicy {
    /// Refuse to quote the profile
    #[default]
    Reject,
    /// Price it anyway; the quote may come out extreme or non-finite
    Propagate,
}

impl fmt::Display for DegenerateArcPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Propagate => write!(f, "propagate"),
        }
    }
}

impl FromStr for DegenerateArcPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "propagate" => Ok(Self::Propagate),
            _ => Err(format!("Unknown degenerate arc policy: {}", s)),
        }
    }
}

/// Rates and margins used to price a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingModel {
    /// Margin added to each bounding-rectangle dimension, in inches
    pub padding: f64,
    /// Material cost in dollars per square inch
    pub material_cost: f64,
    /// Maximum cutter speed in inches per second
    pub max_cutter_speed: f64,
    /// Cost of running the cutter in dollars per second
    pub machining_cost: f64,
    /// Arcs at or below this radius are degenerate
    pub min_arc_radius: f64,
    pub degenerate_arcs: DegenerateArcPolicy,
}

impl Default for PricingModel {
    fn default() -> Self {
        Self {
            padding: 0.1,
            material_cost: 0.75,
            max_cutter_speed: 0.5,
            machining_cost: 0.07,
            min_arc_radius: 1e-9,
            degenerate_arcs: DegenerateArcPolicy::Reject,
        }
    }
}

impl PricingModel {
    pub fn new(padding: f64, material_cost: f64, max_cutter_speed: f64, machining_cost: f64) -> Self {
        Self {
            padding,
            material_cost,
            max_cutter_speed,
            machining_cost,
            ..Self::default()
        }
    }

    pub fn with_degenerate_arcs(mut self, policy: DegenerateArcPolicy) -> Self {
        self.degenerate_arcs = policy;
        self
    }

    pub fn with_min_arc_radius(mut self, min_arc_radius: f64) -> Self {
        self.min_arc_radius = min_arc_radius;
        self
    }

    /// Machining cost of one inch of cut at full speed
    pub fn cost_per_inch(&self) -> f64 {
        self.machining_cost / self.max_cutter_speed
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("padding", self.padding),
            ("material_cost", self.material_cost),
            ("machining_cost", self.machining_cost),
            ("min_arc_radius", self.min_arc_radius),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(QuoteError::invalid_pricing(field, "must be finite"));
            }
            if value < 0.0 {
                return Err(QuoteError::invalid_pricing(field, "must be >= 0"));
            }
        }

        if !self.max_cutter_speed.is_finite() || self.max_cutter_speed <= 0.0 {
            return Err(QuoteError::invalid_pricing(
                "max_cutter_speed",
                "must be finite and > 0",
            ));
        }

        Ok(())
    }
}
