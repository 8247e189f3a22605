//! Vertex registry
//!
//! Tracks the distinct vertex identifiers referenced by edges, in order of
//! first reference, and the coordinates later found for them.

use lasercut_core::Point;
use std::collections::HashMap;

use crate::profile::{Vertex, VertexId};

#[derive(Debug, Clone, Default)]
pub struct VertexRegistry {
    ids: Vec<VertexId>,
    positions: Vec<Option<Point>>,
    index: HashMap<VertexId, usize>,
}

impl VertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identifier, returning its slot. Duplicates keep their first slot.
    pub fn register(&mut self, id: VertexId) -> usize {
        if let Some(&slot) = self.index.get(&id) {
            return slot;
        }
        let slot = self.ids.len();
        self.ids.push(id);
        self.positions.push(None);
        self.index.insert(id, slot);
        slot
    }

    pub fn slot(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// Record the coordinate of a registered vertex.
    ///
    /// Returns `false` for identifiers no edge references; those are ignored.
    pub fn resolve(&mut self, id: VertexId, position: Point) -> bool {
        match self.slot(id) {
            Some(slot) => {
                self.positions[slot] = Some(position);
                true
            }
            None => false,
        }
    }

    pub fn position(&self, id: VertexId) -> Option<Point> {
        self.slot(id).and_then(|slot| self.positions[slot])
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in order of first reference
    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    /// Resolved vertices, in registry order
    pub fn resolved(&self) -> Vec<Vertex> {
        self.ids
            .iter()
            .zip(&self.positions)
            .filter_map(|(&id, position)| position.map(|position| Vertex { id, position }))
            .collect()
    }
}
