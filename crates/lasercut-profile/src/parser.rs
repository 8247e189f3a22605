//! Profile document parser
//!
//! Parsing runs in three steps over the tokenized document:
//!
//! 1. **Discovery** walks the `Edges` section, validates every edge record,
//!    counts segments and arcs, and registers each referenced vertex
//!    identifier in order of first reference.
//! 2. **Vertex resolution** walks the `Vertices` section and fills in the
//!    coordinates of registered vertices. Vertices no edge references are
//!    ignored.
//! 3. **Materialization** revisits the discovered edges in document order,
//!    resolves their vertex references and fixes arc orientation so every
//!    arc runs clockwise from `begin` to `end`.
//!
//! Edges may reference vertices defined later in the document, which is
//! why edges are only materialized once all vertices are known.

use lasercut_core::{CircularArc, LineSegment, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, trace, warn};

use crate::document::{Document, Record};
use crate::error::{ParseError, Result, Section};
use crate::profile::{Profile, VertexId};
use crate::registry::VertexRegistry;
use crate::source;

/// Relative mismatch between an arc's begin and end radii worth reporting
const RADIUS_MISMATCH_TOLERANCE: f64 = 1e-6;

/// How the parser treats records it cannot use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Fail on the first malformed record or unresolved vertex
    #[default]
    Strict,
    /// Skip unusable edges with a warning and keep going
    Lenient,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(format!("Unknown parse mode: {}", s)),
        }
    }
}

/// Edge shape as declared by the record's `Type` field
#[derive(Debug, Clone, Copy, PartialEq)]
enum EdgeKind {
    LineSegment,
    CircularArc {
        center: Point,
        clockwise_from: VertexId,
    },
}

/// A validated edge record whose vertex references are not yet resolved
#[derive(Debug, Clone, Copy, PartialEq)]
struct EdgeRecord {
    id: VertexId,
    vertices: [VertexId; 2],
    kind: EdgeKind,
}

/// Output of the discovery pass
#[derive(Debug, Default)]
struct Discovery {
    edges: Vec<EdgeRecord>,
    registry: VertexRegistry,
    segment_count: usize,
    arc_count: usize,
}

/// Parser for profile documents
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileParser {
    mode: ParseMode,
}

impl ProfileParser {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn parse_file(&self, path: &Path) -> Result<Profile> {
        let text = source::read_source(path)?;
        self.parse_str(&text)
    }

    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Profile> {
        let text = source::read_from(reader)?;
        self.parse_str(&text)
    }

    pub fn parse_str(&self, text: &str) -> Result<Profile> {
        let document = Document::parse(text)?;
        self.parse_document(&document)
    }

    pub fn parse_document(&self, document: &Document) -> Result<Profile> {
        let mut discovery = self.discover_edges(document)?;
        debug!(
            "Discovered {} segments, {} arcs, {} referenced vertices",
            discovery.segment_count,
            discovery.arc_count,
            discovery.registry.len()
        );

        self.resolve_vertices(document, &mut discovery.registry)?;
        self.materialize(discovery)
    }

    /// Hand back `Ok(None)` for errors lenient mode may skip past
    fn recover<T>(&self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.mode == ParseMode::Lenient && err.is_recoverable() => {
                warn!("Skipping record: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn discover_edges(&self, document: &Document) -> Result<Discovery> {
        let mut discovery = Discovery::default();
        let repeated = document.repeated_records(Section::Edges);

        for record in document.records(Section::Edges) {
            if repeated.contains(&record.id()) {
                let err = ParseError::malformed(
                    Section::Edges,
                    record.id(),
                    "identifier is used by more than one edge",
                );
                match self.mode {
                    ParseMode::Strict => return Err(err),
                    ParseMode::Lenient => warn!("{}; keeping the last one", err),
                }
            }

            let Some(edge) = self.recover(self.read_edge(&record))? else {
                continue;
            };
            trace!("Edge {}: {:?}", edge.id, edge.kind);

            for id in edge.vertices {
                discovery.registry.register(id);
            }
            match edge.kind {
                EdgeKind::LineSegment => discovery.segment_count += 1,
                EdgeKind::CircularArc { .. } => discovery.arc_count += 1,
            }
            discovery.edges.push(edge);
        }

        Ok(discovery)
    }

    fn read_edge(&self, record: &Record<'_>) -> Result<EdgeRecord> {
        let edge_type = record.str_field("Type")?;
        let vertices = record.id_pair_field("Vertices")?;

        let kind = match edge_type {
            "LineSegment" => EdgeKind::LineSegment,
            "CircularArc" => {
                let center = record.point_field("Center")?;
                let clockwise_from = record.integer_field("ClockwiseFrom")?;
                if !vertices.contains(&clockwise_from) {
                    let reason = format!(
                        "ClockwiseFrom {} names neither endpoint {} nor {}",
                        clockwise_from, vertices[0], vertices[1]
                    );
                    match self.mode {
                        ParseMode::Strict => {
                            return Err(ParseError::malformed(Section::Edges, record.id(), reason))
                        }
                        ParseMode::Lenient => {
                            warn!("Edge {}: {}; keeping read order", record.id(), reason)
                        }
                    }
                }
                EdgeKind::CircularArc {
                    center,
                    clockwise_from,
                }
            }
            other => {
                return Err(ParseError::malformed(
                    Section::Edges,
                    record.id(),
                    format!("unknown edge type '{}'", other),
                ))
            }
        };

        Ok(EdgeRecord {
            id: record.id(),
            vertices,
            kind,
        })
    }

    fn resolve_vertices(&self, document: &Document, registry: &mut VertexRegistry) -> Result<()> {
        let mut resolved = 0usize;

        for record in document.records(Section::Vertices) {
            if !registry.contains(record.id()) {
                trace!("Vertex {} is not referenced by any edge", record.id());
                continue;
            }
            let Some(position) = self.recover(read_position(&record))? else {
                continue;
            };
            registry.resolve(record.id(), position);
            resolved += 1;
        }

        debug!("Resolved {} of {} vertices", resolved, registry.len());
        Ok(())
    }

    fn materialize(&self, discovery: Discovery) -> Result<Profile> {
        let Discovery {
            edges,
            registry,
            segment_count,
            arc_count,
        } = discovery;

        let mut segments = Vec::with_capacity(segment_count);
        let mut arcs = Vec::with_capacity(arc_count);

        for edge in &edges {
            let Some([begin, end]) = self.recover(resolve_endpoints(edge, &registry))? else {
                continue;
            };

            match edge.kind {
                EdgeKind::LineSegment => segments.push(LineSegment::new(begin, end)),
                EdgeKind::CircularArc {
                    center,
                    clockwise_from,
                } => {
                    // ClockwiseFrom naming the second reference flips the read order
                    let arc = if clockwise_from == edge.vertices[1] {
                        CircularArc::new(center, end, begin)
                    } else {
                        CircularArc::new(center, begin, end)
                    };
                    check_radii(edge.id, &arc);
                    arcs.push(arc);
                }
            }
        }

        debug!(
            "Materialized {} segments and {} arcs",
            segments.len(),
            arcs.len()
        );
        Ok(Profile::new(registry.resolved(), segments, arcs))
    }
}

/// Vertex coordinates, nested under `Position` or directly on the record
fn read_position(record: &Record<'_>) -> Result<Point> {
    if record.has_field("Position") {
        record.point_field("Position")
    } else {
        record.point()
    }
}

fn resolve_endpoints(edge: &EdgeRecord, registry: &VertexRegistry) -> Result<[Point; 2]> {
    let lookup = |vertex: VertexId| {
        registry
            .position(vertex)
            .ok_or(ParseError::UnresolvedVertex {
                edge: edge.id,
                vertex,
            })
    };
    Ok([lookup(edge.vertices[0])?, lookup(edge.vertices[1])?])
}

fn check_radii(id: VertexId, arc: &CircularArc) {
    let begin = arc.center.distance_to(&arc.begin);
    let end = arc.center.distance_to(&arc.end);
    if (begin - end).abs() > RADIUS_MISMATCH_TOLERANCE * begin.max(end).max(1.0) {
        warn!(
            "Arc {} endpoints are not equidistant from its center ({} vs {})",
            id, begin, end
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_from_str() {
        assert_eq!("strict".parse::<ParseMode>().unwrap(), ParseMode::Strict);
        assert_eq!("Lenient".parse::<ParseMode>().unwrap(), ParseMode::Lenient);
        assert!("loose".parse::<ParseMode>().is_err());
        assert_eq!(ParseMode::default(), ParseMode::Strict);
        assert_eq!(ParseMode::Lenient.to_string(), "lenient");
        assert_eq!(ProfileParser::default().mode(), ParseMode::Strict);
        assert_eq!(
            ProfileParser::new(ParseMode::Lenient).mode(),
            ParseMode::Lenient
        );
    }

    #[test]
    fn test_discovery_counts_and_registry_order() {
        let doc = Document::parse(
            r#"{"Edges": {
                "7": {"Type": "LineSegment", "Vertices": [30, 10]},
                "8": {"Type": "CircularArc", "Vertices": [10, 20],
                      "Center": {"X": 0, "Y": 0}, "ClockwiseFrom": 10},
                "9": {"Type": "LineSegment", "Vertices": [20, 30]}
            }}"#,
        )
        .unwrap();
        let discovery = ProfileParser::default().discover_edges(&doc).unwrap();
        assert_eq!(discovery.segment_count, 2);
        assert_eq!(discovery.arc_count, 1);
        assert_eq!(discovery.registry.ids(), &[30, 10, 20]);
    }

    #[test]
    fn test_repeated_edge_identifier() {
        let text = r#"{"Edges": {
                "3": {"Type": "LineSegment", "Vertices": [1, 2]},
                "3": {"Type": "LineSegment", "Vertices": [2, 1]}
            },
            "Vertices": {"1": {"X": 0, "Y": 0}, "2": {"X": 1, "Y": 0}}}"#;

        let err = ProfileParser::default().parse_str(text).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed record 3 in Edges: identifier is used by more than one edge"
        );

        let profile = ProfileParser::new(ParseMode::Lenient)
            .parse_str(text)
            .unwrap();
        assert_eq!(profile.segment_count(), 1);
        assert_eq!(profile.segments()[0].begin, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_repeated_vertex_identifier_last_wins() {
        let text = r#"{"Edges": {"1": {"Type": "LineSegment", "Vertices": [1, 2]}},
            "Vertices": {"1": {"X": 9, "Y": 9}, "2": {"X": 3, "Y": 4}, "1": {"X": 0, "Y": 0}}}"#;
        let profile = ProfileParser::default().parse_str(text).unwrap();
        assert_eq!(profile.segments()[0].length(), 5.0);
    }

    #[test]
    fn test_unknown_edge_type_is_malformed() {
        let doc = Document::parse(r#"{"Edges": {"1": {"Type": "Spline", "Vertices": [1, 2]}}}"#)
            .unwrap();
        let err = ProfileParser::default().discover_edges(&doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed record 1 in Edges: unknown edge type 'Spline'"
        );
    }
}
