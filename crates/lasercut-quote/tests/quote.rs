use lasercut_core::{CircularArc, LineSegment, Point, Rectangle};
use lasercut_profile::{ParseMode, Profile, ProfileParser};
use lasercut_quote::{quote, DegenerateArcPolicy, PricingModel, QuoteEngine, QuoteError};

fn parse(doc: &str) -> Profile {
    ProfileParser::new(ParseMode::Strict).parse_str(doc).unwrap()
}

fn arc_profile(center: Point, begin: Point, end: Point) -> Profile {
    Profile::new(Vec::new(), Vec::new(), vec![CircularArc::new(center, begin, end)])
}

#[test]
fn test_end_to_end_single_segment() {
    let profile = parse(
        r#"{
	"Edges": {
		"1": {
			"Type": "LineSegment",
			"Vertices": [
				10,
				20
			]
		}
	},
	"Vertices": {
		"10": { "Position": { "X": 0.0, "Y": 0.0 } },
		"20": { "Position": { "X": 3.0, "Y": 4.0 } }
	}
}"#,
    );
    let pricing = PricingModel::new(0.1, 0.75, 0.5, 0.07);
    assert_eq!(quote(&profile, &pricing).unwrap(), 13.68);
}

#[test]
fn test_semicircle_quote() {
    // Lower half of the unit circle: length π, bounds [-1, 1] x [-1, 0]
    let profile = arc_profile(
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(-1.0, 0.0),
    );
    let engine = QuoteEngine::new(PricingModel::default()).unwrap();
    let breakdown = engine.breakdown(&profile).unwrap();

    assert_eq!(
        breakdown.bounds,
        Rectangle::new(Point::new(-1.0, -1.0), Point::new(1.0, 0.0))
    );
    assert!((breakdown.cut_length - std::f64::consts::PI).abs() < 1e-12);
    assert!((breakdown.material_cost - 2.1 * 1.1 * 0.75).abs() < 1e-12);
    assert_eq!(breakdown.total, 2.93);
}

#[test]
fn test_full_circle_quote() {
    // Coincident endpoints are a full circle
    let profile = arc_profile(
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 0.0),
    );
    let pricing = PricingModel::default();
    assert_eq!(quote(&profile, &pricing).unwrap(), 5.7);
    assert_eq!(quote(&profile, &pricing).unwrap(), 5.7);
}

#[test]
fn test_tight_curves_cost_more() {
    let pricing = PricingModel::default();
    let engine = QuoteEngine::new(pricing).unwrap();

    // Same cut length (π/2 * 4 = 2π), different radii
    let wide = arc_profile(
        Point::new(0.0, 0.0),
        Point::new(0.0, 4.0),
        Point::new(4.0, 0.0),
    );
    let tight = Profile::new(
        Vec::new(),
        Vec::new(),
        vec![CircularArc::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 0.0),
        )],
    );
    let wide_cost = engine.breakdown(&wide).unwrap();
    let tight_cost = engine.breakdown(&tight).unwrap();
    assert!((wide_cost.cut_length - tight_cost.cut_length).abs() < 1e-12);
    assert!(tight_cost.arc_cost > wide_cost.arc_cost);
}

#[test]
fn test_quarter_arc_quote() {
    let profile = arc_profile(
        Point::new(0.0, 0.0),
        Point::new(0.0, 2.0),
        Point::new(2.0, 0.0),
    );
    assert_eq!(quote(&profile, &PricingModel::default()).unwrap(), 4.03);
}

#[test]
fn test_arched_plate_document() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../lasercut-profile/tests/fixtures/arched_plate.json");
    let profile = Profile::from_file(path).unwrap();
    let engine = QuoteEngine::new(PricingModel::default()).unwrap();
    let breakdown = engine.breakdown(&profile).unwrap();

    // The arc bulges above the plate, so the stock is 2 x 2
    assert_eq!(
        breakdown.bounds,
        Rectangle::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0))
    );
    assert!((breakdown.segment_cost - 0.56).abs() < 1e-12);
    assert_eq!(breakdown.total, 5.06);
}

#[test]
fn test_edge_order_does_not_change_quote() {
    let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
    let b = LineSegment::new(Point::new(2.0, 0.0), Point::new(2.0, 3.0));
    let arc = CircularArc::new(
        Point::new(1.0, 3.0),
        Point::new(2.0, 3.0),
        Point::new(0.0, 3.0),
    );
    let forward = Profile::new(Vec::new(), vec![a, b], vec![arc]);
    let reversed = Profile::new(Vec::new(), vec![b, a], vec![arc]);

    let pricing = PricingModel::default();
    assert_eq!(
        quote(&forward, &pricing).unwrap(),
        quote(&reversed, &pricing).unwrap()
    );
}

#[test]
fn test_shared_profile_across_threads() {
    let profile = parse(
        r#"{"Edges": {"1": {"Type": "LineSegment", "Vertices": [1, 2]}},
            "Vertices": {"1": {"X": 0.0, "Y": 0.0}, "2": {"X": 3.0, "Y": 4.0}}}"#,
    );
    let cheap = PricingModel::new(0.0, 0.5, 1.0, 0.1);
    let standard = PricingModel::default();

    let (a, b) = std::thread::scope(|scope| {
        let first = scope.spawn(|| quote(&profile, &cheap).unwrap());
        let second = scope.spawn(|| quote(&profile, &standard).unwrap());
        (first.join().unwrap(), second.join().unwrap())
    });

    // 5 * 0.1 / 1 + 3 * 4 * 0.5
    assert_eq!(a, 6.5);
    assert_eq!(b, 13.68);
}

#[test]
fn test_degenerate_policy_is_configurable() {
    let tiny = arc_profile(
        Point::new(0.0, 0.0),
        Point::new(0.001, 0.0),
        Point::new(-0.001, 0.0),
    );

    let rejecting = PricingModel::default().with_min_arc_radius(0.01);
    assert!(matches!(
        quote(&tiny, &rejecting),
        Err(QuoteError::Geometry { .. })
    ));

    // exp(1000) overflows to infinity
    let propagating = rejecting.with_degenerate_arcs(DegenerateArcPolicy::Propagate);
    assert!(matches!(
        quote(&tiny, &propagating),
        Err(QuoteError::NonFiniteTotal(_))
    ));
}

#[test]
fn test_breakdown_serializes() {
    let profile = arc_profile(
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(-1.0, 0.0),
    );
    let breakdown = QuoteEngine::new(PricingModel::default())
        .unwrap()
        .breakdown(&profile)
        .unwrap();
    let json = serde_json::to_value(breakdown).unwrap();
    assert_eq!(json["total"], serde_json::json!(2.93));
}
