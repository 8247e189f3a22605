//! Error types for profile document parsing.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::profile::VertexId;

/// Document section a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The `Edges` section
    Edges,
    /// The `Vertices` section
    Vertices,
}

impl Section {
    /// Key naming the section in the document
    pub fn key(&self) -> &'static str {
        match self {
            Self::Edges => "Edges",
            Self::Vertices => "Vertices",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors that can occur while reading a profile document.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document could not be opened or read.
    #[error("Source unavailable: {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not a well-formed record tree.
    #[error("Syntax error: {0}")]
    Syntax(#[from] serde_json::Error),

    /// A record does not have the expected shape.
    #[error("Malformed record {id} in {section}: {reason}")]
    MalformedRecord {
        section: Section,
        id: String,
        reason: String,
    },

    /// An edge references a vertex the vertices section never defines.
    #[error("Edge {edge} references undefined vertex {vertex}")]
    UnresolvedVertex { edge: VertexId, vertex: VertexId },
}

impl ParseError {
    pub fn malformed(section: Section, id: impl fmt::Display, reason: impl Into<String>) -> Self {
        ParseError::MalformedRecord {
            section,
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether lenient parsing may skip the offending record and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ParseError::MalformedRecord { .. } | ParseError::UnresolvedVertex { .. }
        )
    }
}

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
