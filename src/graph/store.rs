//! In-memory delivery network storage
//!
//! Weighted undirected multigraph: named vertices interned to dense ids, an
//! edge arena, and per-vertex adjacency lists.

use super::edge::Edge;
use super::types::{EdgeId, VertexId};
use courier_graph_algorithms::AlgoError;
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::VecDeque;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid edge {from} - {to}: {reason}")]
    InvalidEdge {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Vertex {0} not found")]
    VertexNotFound(String),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Graph has {count} vertices, above the configured limit of {limit}")]
    TooManyVertices { count: usize, limit: usize },

    #[error(transparent)]
    Algorithm(#[from] AlgoError),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Summary figures for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub augmented_edge_count: usize,
    pub total_weight: f64,
    pub average_degree: f64,
    pub directed: bool,
}

/// In-memory graph storage
///
/// - vertices: name -> dense VertexId (position in the set)
/// - edges: arena indexed by EdgeId, `None` once removed
/// - adjacency: VertexId -> incident EdgeIds in insertion order
///
/// Not internally synchronized; mutation takes `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    vertices: IndexSet<String>,
    edges: Vec<Option<Edge>>,
    adjacency: Vec<Vec<EdgeId>>,
    edge_count: usize,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex; returns the existing id if the name is known
    pub fn add_vertex(&mut self, name: impl Into<String>) -> VertexId {
        let (idx, inserted) = self.vertices.insert_full(name.into());
        if inserted {
            self.adjacency.push(Vec::new());
        }
        VertexId::new(idx as u64)
    }

    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .get_index_of(name)
            .map(|idx| VertexId::new(idx as u64))
    }

    /// Like [`vertex_id`](Self::vertex_id) but fails with `VertexNotFound`
    pub fn require_vertex(&self, name: &str) -> GraphResult<VertexId> {
        self.vertex_id(name)
            .ok_or_else(|| GraphError::VertexNotFound(name.to_string()))
    }

    pub fn vertex_name(&self, id: VertexId) -> Option<&str> {
        self.vertices.get_index(id.index()).map(String::as_str)
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        id.index() < self.vertices.len()
    }

    /// All vertices in registration order
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &str)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(idx, name)| (VertexId::new(idx as u64), name.as_str()))
    }

    /// Add an edge between two named vertices, registering them if needed.
    ///
    /// Fails with `InvalidEdge` for self-loops and for negative or non-finite
    /// weights. Always returns a fresh id, parallel edges included.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> GraphResult<EdgeId> {
        let invalid = |reason: &str| GraphError::InvalidEdge {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        };

        if from == to {
            return Err(invalid("self-loops are not supported"));
        }
        if !weight.is_finite() {
            return Err(invalid("weight must be finite"));
        }
        if weight < 0.0 {
            return Err(invalid("weight must be non-negative"));
        }

        let source = self.add_vertex(from);
        let target = self.add_vertex(to);
        Ok(self.insert(Edge::new(self.next_edge_id(), source, target, weight)))
    }

    /// Add a parallel copy of an existing edge
    pub fn duplicate_edge(&mut self, id: EdgeId) -> GraphResult<EdgeId> {
        let original = self.get_edge(id).ok_or(GraphError::EdgeNotFound(id))?;
        let copy = original.duplicate(self.next_edge_id());
        Ok(self.insert(copy))
    }

    fn next_edge_id(&self) -> EdgeId {
        EdgeId::new(self.edges.len() as u64)
    }

    fn insert(&mut self, edge: Edge) -> EdgeId {
        let id = edge.id;
        self.adjacency[edge.source.index()].push(id);
        self.adjacency[edge.target.index()].push(id);
        self.edges.push(Some(edge));
        self.edge_count += 1;
        id
    }

    /// Remove an edge; its id is never reused
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self
            .edges
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(GraphError::EdgeNotFound(id))?;

        for endpoint in [edge.source, edge.target] {
            if let Some(adj) = self.adjacency.get_mut(endpoint.index()) {
                adj.retain(|&eid| eid != id);
            }
        }
        self.edge_count -= 1;

        Ok(edge)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index()).and_then(Option::as_ref)
    }

    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.get_edge(id).is_some()
    }

    /// All live edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter_map(Option::as_ref)
    }

    /// Number of incident edge endpoints, counting parallel edges
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.adjacency.get(vertex.index()).map_or(0, Vec::len)
    }

    /// Lazily yields `(neighbor, edge id, weight)` for every incident edge
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = (VertexId, EdgeId, f64)> + '_ {
        self.adjacency
            .get(vertex.index())
            .into_iter()
            .flatten()
            .filter_map(move |&id| {
                let edge = self.get_edge(id)?;
                Some((edge.other(vertex)?, id, edge.weight))
            })
    }

    /// One breadth-first traversal from the first vertex must reach all others.
    /// The empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        let n = self.vertices.len();
        if n == 0 {
            return true;
        }

        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        visited[0] = true;
        queue.push_back(VertexId::new(0));
        let mut seen = 1;

        while let Some(current) = queue.pop_front() {
            for (next, _, _) in self.neighbors(current) {
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    seen += 1;
                    queue.push_back(next);
                }
            }
        }

        seen == n
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.edges().map(|e| e.weight).sum()
    }

    pub fn augmented_edge_count(&self) -> usize {
        self.edges().filter(|e| e.is_augmented()).count()
    }

    pub fn statistics(&self) -> GraphStatistics {
        let vertex_count = self.vertex_count();
        GraphStatistics {
            vertex_count,
            edge_count: self.edge_count,
            augmented_edge_count: self.augmented_edge_count(),
            total_weight: self.total_weight(),
            average_degree: if vertex_count == 0 {
                0.0
            } else {
                2.0 * self.edge_count as f64 / vertex_count as f64
            },
            directed: false,
        }
    }

    /// Remove all vertices and edges
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.adjacency.clear();
        self.edge_count = 0;
    }
}
