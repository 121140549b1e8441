//! Graph algorithms module
//!
//! Algorithms are implemented in the `courier-graph-algorithms` crate over a
//! read-only [`GraphView`]. This module provides the integration/adapter
//! layer: snapshotting a [`GraphStore`] and mapping results back to vertex
//! names and edge ids.

pub mod circuit;
pub mod eulerize;
pub mod route;

use crate::graph::{EdgeId, GraphError, GraphResult, GraphStore, VertexId};
use courier_graph_algorithms::{GraphView, NodeId as AlgoNodeId};

pub use circuit::{euler_circuit, euler_path, Circuit};
pub use eulerize::{classify, eulerize, has_eulerian_path, odd_degree_vertices, EulerizeReport, MatchedPair};
pub use route::{shortest_path, shortest_paths_from, ReachEntry, Route};

/// Build a GraphView from the store for algorithm execution.
///
/// Node ids are `VertexId` values and edge keys are `EdgeId` values, so
/// results map back without a lookup table. Isolated vertices are kept.
pub fn build_view(store: &GraphStore) -> GraphView {
    let nodes: Vec<AlgoNodeId> = store.vertices().map(|(id, _)| id.as_u64()).collect();
    let edges = store
        .edges()
        .map(|e| (e.source.as_u64(), e.target.as_u64(), e.weight, e.id.as_u64()));

    GraphView::from_edges(nodes, edges)
}

/// Vertex name for a node id coming back from the algorithms crate
pub(crate) fn name_of(store: &GraphStore, node: AlgoNodeId) -> GraphResult<String> {
    store
        .vertex_name(VertexId::new(node))
        .map(str::to_string)
        .ok_or_else(|| GraphError::VertexNotFound(VertexId::new(node).to_string()))
}

pub(crate) fn names_of(store: &GraphStore, nodes: &[AlgoNodeId]) -> GraphResult<Vec<String>> {
    nodes.iter().map(|&n| name_of(store, n)).collect()
}

pub(crate) fn edge_ids(keys: &[u64]) -> Vec<EdgeId> {
    keys.iter().copied().map(EdgeId::new).collect()
}
