//! Connectivity analysis
//!
//! Breadth-first reachability for the connectivity test and union-find
//! connected components for diagnostics.

use super::common::{GraphView, NodeId};
use super::error::{AlgoError, AlgoResult};
use std::collections::{HashMap, VecDeque};

/// Result of the connected components algorithm
pub struct ComponentResult {
    /// Map of Component ID -> List of NodeIds
    pub components: HashMap<usize, Vec<NodeId>>,
    /// Map of NodeId -> Component ID
    pub node_component: HashMap<NodeId, usize>,
}

impl ComponentResult {
    pub fn count(&self) -> usize {
        self.components.len()
    }
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]); // Path compression
        }
        self.parent[i]
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Nodes reachable from `start_idx` (by index) in one breadth-first pass
pub fn reachable_from(view: &GraphView, start_idx: usize) -> Vec<bool> {
    let mut visited = vec![false; view.node_count];
    let mut queue = VecDeque::new();

    visited[start_idx] = true;
    queue.push_back(start_idx);

    while let Some(current_idx) = queue.pop_front() {
        for &next_idx in view.neighbors(current_idx) {
            if !visited[next_idx] {
                visited[next_idx] = true;
                queue.push_back(next_idx);
            }
        }
    }

    visited
}

/// True when a single traversal from an arbitrary node reaches every node.
///
/// The empty graph is vacuously connected; callers that need vertices check
/// for emptiness first.
pub fn is_connected(view: &GraphView) -> bool {
    if view.is_empty() {
        return true;
    }
    reachable_from(view, 0).into_iter().all(|seen| seen)
}

/// Fails with `DisconnectedGraph` (reporting the component count) unless the
/// view is connected.
pub fn require_connected(view: &GraphView) -> AlgoResult<()> {
    if is_connected(view) {
        return Ok(());
    }
    Err(AlgoError::DisconnectedGraph {
        components: connected_components(view).count(),
    })
}

/// Connected components via union-find over the edge list
pub fn connected_components(view: &GraphView) -> ComponentResult {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    for edge in &view.edges {
        uf.union(edge.a, edge.b);
    }

    let mut components = HashMap::new();
    let mut node_component = HashMap::new();

    for i in 0..n {
        let root = uf.find(i);
        let node_id = view.index_to_node[i];

        components.entry(root).or_insert_with(Vec::new).push(node_id);
        node_component.insert(node_id, root);
    }

    ComponentResult {
        components,
        node_component,
    }
}
