//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of an undirected weighted multigraph
//! for algorithm execution.

use crate::error::{AlgoError, AlgoResult};
use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// External edge identifier, distinguishes parallel edges
pub type EdgeKey = u64;

/// An undirected edge inside a [`GraphView`], endpoints as dense indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewEdge {
    pub id: EdgeKey,
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

impl ViewEdge {
    /// The endpoint opposite to `idx`
    pub fn other(&self, idx: usize) -> usize {
        if self.a == idx {
            self.b
        } else {
            self.a
        }
    }
}

/// A dense, integer-indexed view of an undirected multigraph using
/// Compressed Sparse Row (CSR) format.
///
/// Every edge occupies one adjacency slot at each endpoint, so the length of
/// a node's slot range is its degree (counting parallel edges).
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `targets` / `slot_edges`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
    /// Index into `edges` for every adjacency slot, aligned with `targets`
    pub slot_edges: Vec<usize>,

    /// Edge list in insertion order
    pub edges: Vec<ViewEdge>,
}

impl GraphView {
    /// Build a view from node ids and `(u, v, weight, edge id)` tuples.
    ///
    /// Endpoints missing from `nodes` are registered in order of appearance.
    /// Adjacency slots keep edge insertion order, which keeps every traversal
    /// deterministic.
    pub fn from_edges<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId, f64, EdgeKey)>,
    {
        let mut index_to_node = Vec::new();
        let mut node_to_index = HashMap::new();

        let mut register = |id: NodeId, index_to_node: &mut Vec<NodeId>| -> usize {
            *node_to_index.entry(id).or_insert_with(|| {
                index_to_node.push(id);
                index_to_node.len() - 1
            })
        };

        for id in nodes {
            register(id, &mut index_to_node);
        }

        let mut view_edges = Vec::new();
        for (u, v, weight, id) in edges {
            let a = register(u, &mut index_to_node);
            let b = register(v, &mut index_to_node);
            view_edges.push(ViewEdge { id, a, b, weight });
        }

        let node_count = index_to_node.len();

        // Count slots per node, then prefix-sum into offsets
        let mut offsets = vec![0usize; node_count + 1];
        for edge in &view_edges {
            offsets[edge.a + 1] += 1;
            offsets[edge.b + 1] += 1;
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        let slot_total = offsets[node_count];
        let mut targets = vec![0usize; slot_total];
        let mut slot_edges = vec![0usize; slot_total];
        let mut cursor = offsets[..node_count].to_vec();

        for (edge_idx, edge) in view_edges.iter().enumerate() {
            targets[cursor[edge.a]] = edge.b;
            slot_edges[cursor[edge.a]] = edge_idx;
            cursor[edge.a] += 1;

            targets[cursor[edge.b]] = edge.a;
            slot_edges[cursor[edge.b]] = edge_idx;
            cursor[edge.b] += 1;
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            targets,
            slot_edges,
            edges: view_edges,
        }
    }

    /// Build a view whose node set is exactly the edge endpoints
    pub fn from_edge_list<E>(edges: E) -> Self
    where
        E: IntoIterator<Item = (NodeId, NodeId, f64, EdgeKey)>,
    {
        Self::from_edges(std::iter::empty::<NodeId>(), edges)
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Degree of a node (by index), counting parallel edges
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Neighbor indices of a node, one entry per incident edge
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.targets[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// `(neighbor index, edge index)` for every incident edge of a node
    pub fn incident(&self, idx: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let range = self.offsets[idx]..self.offsets[idx + 1];
        self.targets[range.clone()]
            .iter()
            .copied()
            .zip(self.slot_edges[range].iter().copied())
    }

    /// Dense index of a node id
    pub fn index_of(&self, node: NodeId) -> AlgoResult<usize> {
        self.node_to_index
            .get(&node)
            .copied()
            .ok_or(AlgoError::UnknownNode(node))
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}
