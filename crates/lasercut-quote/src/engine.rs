//! Quote engine
//!
//! Sums the machining cost of every edge and the material cost of the
//! padded bounding rectangle, then rounds to the cent.

use lasercut_core::{round_currency, GeometryError, Rectangle};
use lasercut_profile::Profile;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{QuoteError, Result};
use crate::pricing::{DegenerateArcPolicy, PricingModel};

/// Itemised quote for one profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Machining cost of all line segments
    pub segment_cost: f64,
    /// Machining cost of all arcs, including the tight-curve penalty
    pub arc_cost: f64,
    /// Cost of the padded bounding rectangle of material
    pub material_cost: f64,
    /// Total length of cut, in inches
    pub cut_length: f64,
    /// Bounding rectangle of the whole profile
    pub bounds: Rectangle,
    /// Padded material area, in square inches
    pub material_area: f64,
    /// Total before rounding
    pub subtotal: f64,
    /// Total rounded to the cent
    pub total: f64,
}

/// Prices profiles against a fixed pricing model
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    pricing: PricingModel,
}

impl QuoteEngine {
    /// Create an engine, validating the pricing model once
    pub fn new(pricing: PricingModel) -> Result<Self> {
        pricing.validate()?;
        Ok(Self { pricing })
    }

    pub fn pricing(&self) -> &PricingModel {
        &self.pricing
    }

    /// Rounded quote for `profile`
    pub fn quote(&self, profile: &Profile) -> Result<f64> {
        let breakdown = self.breakdown(profile)?;
        if !breakdown.subtotal.is_finite() {
            return Err(QuoteError::NonFiniteTotal(breakdown.subtotal));
        }
        Ok(breakdown.total)
    }

    /// Itemised quote for `profile`.
    ///
    /// With [`DegenerateArcPolicy::Propagate`] the subtotal may be infinite
    /// or NaN; it is reported as computed.
    pub fn breakdown(&self, profile: &Profile) -> Result<QuoteBreakdown> {
        let pricing = &self.pricing;
        let cost_per_inch = pricing.cost_per_inch();
        let mut subtotal = 0.0;
        let mut cut_length = 0.0;

        let mut segment_cost = 0.0;
        for segment in profile.segments() {
            let length = segment.length();
            let cost = length * cost_per_inch;
            segment_cost += cost;
            subtotal += cost;
            cut_length += length;
        }

        let mut arc_cost = 0.0;
        let mut rects = Vec::with_capacity(profile.arc_count() + 1);
        for (index, arc) in profile.arcs().iter().enumerate() {
            let radius = arc.radius();
            if arc.is_degenerate(pricing.min_arc_radius) {
                match pricing.degenerate_arcs {
                    DegenerateArcPolicy::Reject => {
                        return Err(QuoteError::Geometry {
                            index,
                            source: GeometryError::DegenerateArc { radius },
                        });
                    }
                    DegenerateArcPolicy::Propagate => {
                        warn!("Arc {} has degenerate radius {}; pricing anyway", index, radius);
                    }
                }
            }

            let length = arc.length();
            let cost = length * cost_per_inch * (1.0 / radius).exp();
            if !cost.is_finite() && pricing.degenerate_arcs == DegenerateArcPolicy::Reject {
                return Err(QuoteError::Geometry {
                    index,
                    source: GeometryError::non_finite("arc cost", cost),
                });
            }
            arc_cost += cost;
            subtotal += cost;
            cut_length += length;
            rects.push(arc.bounding_rectangle());
        }

        rects.push(Rectangle::bounding_segments(profile.segments()));
        let bounds = Rectangle::bounding_rectangles(&rects);
        let material_area = bounds.area(pricing.padding);
        let material_cost = material_area * pricing.material_cost;
        subtotal += material_cost;

        let breakdown = QuoteBreakdown {
            segment_cost,
            arc_cost,
            material_cost,
            cut_length,
            bounds,
            material_area,
            subtotal,
            total: round_currency(subtotal),
        };
        debug!(?breakdown, "Quoted profile");
        Ok(breakdown)
    }
}

/// Rounded quote for `profile` under `pricing`
pub fn quote(profile: &Profile, pricing: &PricingModel) -> Result<f64> {
    QuoteEngine::new(*pricing)?.quote(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasercut_core::{CircularArc, LineSegment, Point};

    fn segment_profile() -> Profile {
        Profile::new(
            Vec::new(),
            vec![LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0))],
            Vec::new(),
        )
    }

    #[test]
    fn test_single_segment_quote() {
        let engine = QuoteEngine::new(PricingModel::default()).unwrap();
        let breakdown = engine.breakdown(&segment_profile()).unwrap();
        assert!((breakdown.segment_cost - 0.7).abs() < 1e-12);
        assert!((breakdown.material_cost - 12.9825).abs() < 1e-12);
        assert_eq!(breakdown.arc_cost, 0.0);
        assert_eq!(breakdown.cut_length, 5.0);
        assert_eq!(breakdown.total, 13.68);
        assert_eq!(engine.quote(&segment_profile()).unwrap(), 13.68);
    }

    #[test]
    fn test_empty_profile_costs_nothing() {
        let engine = QuoteEngine::new(PricingModel::default()).unwrap();
        let breakdown = engine.breakdown(&Profile::default()).unwrap();
        assert!(breakdown.bounds.is_empty());
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn test_invalid_pricing_rejected_at_construction() {
        let pricing = PricingModel::new(0.1, 0.75, -1.0, 0.07);
        assert!(matches!(
            QuoteEngine::new(pricing),
            Err(QuoteError::InvalidPricing { .. })
        ));
    }

    #[test]
    fn test_degenerate_arc_rejected() {
        let p = Point::new(1.0, 1.0);
        let profile = Profile::new(Vec::new(), Vec::new(), vec![CircularArc::new(p, p, p)]);
        let err = quote(&profile, &PricingModel::default()).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::Geometry {
                index: 0,
                source: GeometryError::DegenerateArc { .. }
            }
        ));
    }

    #[test]
    fn test_tight_arc_with_unpriceable_penalty_rejected() {
        // exp(1 / 0.001) overflows even though the radius is above the minimum
        let center = Point::new(0.0, 0.0);
        let arc = CircularArc::new(center, Point::new(0.0, 0.001), Point::new(0.001, 0.0));
        let profile = Profile::new(Vec::new(), Vec::new(), vec![arc]);

        let err = quote(&profile, &PricingModel::default()).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::Geometry {
                index: 0,
                source: GeometryError::NonFinite { .. }
            }
        ));
        assert_eq!(
            err.to_string(),
            "Geometry error in arc 0: Non-finite arc cost: inf"
        );

        let pricing = PricingModel::default().with_degenerate_arcs(DegenerateArcPolicy::Propagate);
        let breakdown = QuoteEngine::new(pricing).unwrap().breakdown(&profile).unwrap();
        assert_eq!(breakdown.arc_cost, f64::INFINITY);
    }

    #[test]
    fn test_segment_cost_follows_cost_per_inch() {
        let pricing = PricingModel::new(0.0, 0.0, 0.25, 0.5);
        assert_eq!(pricing.cost_per_inch(), 2.0);
        let breakdown = QuoteEngine::new(pricing)
            .unwrap()
            .breakdown(&segment_profile())
            .unwrap();
        assert_eq!(breakdown.segment_cost, 10.0);
        assert_eq!(breakdown.total, 10.0);
    }

    #[test]
    fn test_degenerate_arc_propagated() {
        let p = Point::new(1.0, 1.0);
        let profile = Profile::new(Vec::new(), Vec::new(), vec![CircularArc::new(p, p, p)]);
        let pricing = PricingModel::default().with_degenerate_arcs(DegenerateArcPolicy::Propagate);
        let engine = QuoteEngine::new(pricing).unwrap();

        // 0 * exp(inf) is NaN
        let breakdown = engine.breakdown(&profile).unwrap();
        assert!(!breakdown.subtotal.is_finite());
        assert!(matches!(
            engine.quote(&profile),
            Err(QuoteError::NonFiniteTotal(_))
        ));
    }
}
