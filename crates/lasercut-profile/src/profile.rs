//! Parsed workpiece profile

use lasercut_core::{CircularArc, LineSegment, Point};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::parser::{ParseMode, ProfileParser};

/// Vertex identifier as written in the source document
pub type VertexId = i64;

/// A vertex referenced by at least one edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Point,
}

/// The cutting path of a workpiece.
///
/// Edges keep the order they appear in the document. A profile is
/// immutable once built and can be shared between threads for quoting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    vertices: Vec<Vertex>,
    segments: Vec<LineSegment>,
    arcs: Vec<CircularArc>,
}

impl Profile {
    pub fn new(vertices: Vec<Vertex>, segments: Vec<LineSegment>, arcs: Vec<CircularArc>) -> Self {
        Self {
            vertices,
            segments,
            arcs,
        }
    }

    /// Read and parse a profile document in strict mode
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        ProfileParser::new(ParseMode::Strict).parse_file(path.as_ref())
    }

    /// Referenced vertices, in order of first reference
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Option<Point> {
        self.vertices
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.position)
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn arcs(&self) -> &[CircularArc] {
        &self.arcs
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn edge_count(&self) -> usize {
        self.segments.len() + self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }
}
