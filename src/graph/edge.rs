//! Weighted undirected edge
//!
//! Multiple edges between the same two vertices are allowed; eulerization
//! adds duplicates that remember the edge they copy.

use super::types::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// A road segment between two delivery points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// First endpoint (order carries no meaning)
    pub source: VertexId,

    /// Second endpoint
    pub target: VertexId,

    /// Non-negative distance or cost
    pub weight: f64,

    /// Set on edges added by eulerization
    pub duplicate_of: Option<EdgeId>,
}

impl Edge {
    pub fn new(id: EdgeId, source: VertexId, target: VertexId, weight: f64) -> Self {
        Edge {
            id,
            source,
            target,
            weight,
            duplicate_of: None,
        }
    }

    /// A parallel copy of this edge under a new id
    pub fn duplicate(&self, id: EdgeId) -> Self {
        Edge {
            id,
            source: self.source,
            target: self.target,
            weight: self.weight,
            duplicate_of: Some(self.duplicate_of.unwrap_or(self.id)),
        }
    }

    pub fn is_augmented(&self) -> bool {
        self.duplicate_of.is_some()
    }

    /// Check if this edge connects two specific vertices
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// The endpoint opposite to `vertex`, if `vertex` is an endpoint
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if self.source == vertex {
            Some(self.target)
        } else if self.target == vertex {
            Some(self.source)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}
