//! Pathfinding algorithms
//!
//! Single-source shortest paths over an undirected [`GraphView`]:
//! Dijkstra for non-negative weights and Bellman-Ford for arbitrary weights
//! with negative-cycle detection.

use super::common::{EdgeKey, GraphView, NodeId};
use super::error::{AlgoError, AlgoResult};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which single-source algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PathAlgorithm {
    #[default]
    Dijkstra,
    BellmanFord,
}

impl PathAlgorithm {
    pub fn run(&self, view: &GraphView, source: NodeId) -> AlgoResult<ShortestPaths> {
        match self {
            PathAlgorithm::Dijkstra => dijkstra(view, source),
            PathAlgorithm::BellmanFord => bellman_ford(view, source),
        }
    }
}

impl std::fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathAlgorithm::Dijkstra => write!(f, "dijkstra"),
            PathAlgorithm::BellmanFord => write!(f, "bellman-ford"),
        }
    }
}

/// Distance and predecessor of one reachable node
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathEntry {
    pub distance: f64,
    /// None for the source itself
    pub predecessor: Option<NodeId>,
    /// Edge taken from the predecessor
    pub via: Option<EdgeKey>,
}

/// Single-source result: an entry for every reachable node.
///
/// Only valid for the view it was computed from.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub source: NodeId,
    entries: HashMap<NodeId, PathEntry>,
}

/// Result of a point-to-point query
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    /// Edge ids along `path`; one fewer than nodes
    pub edges: Vec<EdgeKey>,
    pub cost: f64,
}

impl ShortestPaths {
    fn from_indexed(
        view: &GraphView,
        source: NodeId,
        dist: &[f64],
        parent: &[Option<(usize, usize)>],
    ) -> Self {
        let entries = dist
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(|(idx, &distance)| {
                let entry = PathEntry {
                    distance,
                    predecessor: parent[idx].map(|(p, _)| view.index_to_node[p]),
                    via: parent[idx].map(|(_, e)| view.edges[e].id),
                };
                (view.index_to_node[idx], entry)
            })
            .collect();

        ShortestPaths { source, entries }
    }

    pub fn entry(&self, target: NodeId) -> Option<&PathEntry> {
        self.entries.get(&target)
    }

    pub fn distance(&self, target: NodeId) -> Option<f64> {
        self.entries.get(&target).map(|e| e.distance)
    }

    pub fn entries(&self) -> &HashMap<NodeId, PathEntry> {
        &self.entries
    }

    pub fn reachable_count(&self) -> usize {
        self.entries.len()
    }

    /// Walk predecessor links from `target` back to the source
    pub fn path_to(&self, target: NodeId) -> AlgoResult<PathResult> {
        let end = self.entries.get(&target).ok_or(AlgoError::Unreachable {
            origin: self.source,
            target,
        })?;

        let mut path = vec![target];
        let mut edges = Vec::new();
        let mut curr = *end;

        while let (Some(prev), Some(via)) = (curr.predecessor, curr.via) {
            // A predecessor chain longer than the entry count means a cycle
            if path.len() > self.entries.len() {
                return Err(AlgoError::InternalInvariant(format!(
                    "predecessor cycle while reconstructing path {} -> {}",
                    self.source, target
                )));
            }
            path.push(prev);
            edges.push(via);
            curr = *self.entries.get(&prev).ok_or_else(|| {
                AlgoError::InternalInvariant(format!("predecessor {} has no entry", prev))
            })?;
        }

        path.reverse();
        edges.reverse();

        Ok(PathResult {
            source: self.source,
            target,
            path,
            edges,
            cost: end.distance,
        })
    }
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    /// Insertion sequence, earlier pushes win ties
    seq: u64,
    node_idx: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Fails with `NegativeWeight` if any edge weight is negative.
pub fn dijkstra(view: &GraphView, source: NodeId) -> AlgoResult<ShortestPaths> {
    let source_idx = view.index_of(source)?;

    if let Some(edge) = view.edges.iter().find(|e| e.weight < 0.0) {
        return Err(AlgoError::NegativeWeight {
            edge: edge.id,
            weight: edge.weight,
        });
    }

    let n = view.node_count;
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    dist[source_idx] = 0.0;
    heap.push(State { cost: 0.0, seq, node_idx: source_idx });

    while let Some(State { cost, node_idx, .. }) = heap.pop() {
        if settled[node_idx] {
            continue;
        }
        settled[node_idx] = true;

        for (next_idx, edge_idx) in view.incident(node_idx) {
            if settled[next_idx] {
                continue;
            }

            let next_cost = cost + view.edges[edge_idx].weight;

            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = Some((node_idx, edge_idx));
                seq += 1;
                heap.push(State { cost: next_cost, seq, node_idx: next_idx });
            }
        }
    }

    Ok(ShortestPaths::from_indexed(view, source, &dist, &parent))
}

/// Bellman-Ford Algorithm
///
/// Tolerates negative weights. Each undirected edge is relaxed in both
/// directions, so a reachable negative edge is itself a negative cycle.
/// Runs at most V-1 rounds, stopping early once a round changes nothing,
/// then verifies with one extra round.
pub fn bellman_ford(view: &GraphView, source: NodeId) -> AlgoResult<ShortestPaths> {
    let source_idx = view.index_of(source)?;

    let n = view.node_count;
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; n];
    dist[source_idx] = 0.0;

    for _ in 1..n {
        let mut changed = false;
        for (edge_idx, edge) in view.edges.iter().enumerate() {
            changed |= relax(&mut dist, &mut parent, edge.a, edge.b, edge.weight, edge_idx);
            changed |= relax(&mut dist, &mut parent, edge.b, edge.a, edge.weight, edge_idx);
        }
        if !changed {
            break;
        }
    }

    for edge in &view.edges {
        let forward = dist[edge.a].is_finite() && dist[edge.a] + edge.weight < dist[edge.b];
        let backward = dist[edge.b].is_finite() && dist[edge.b] + edge.weight < dist[edge.a];
        if forward || backward {
            return Err(AlgoError::NegativeCycle { origin: source });
        }
    }

    Ok(ShortestPaths::from_indexed(view, source, &dist, &parent))
}

fn relax(
    dist: &mut [f64],
    parent: &mut [Option<(usize, usize)>],
    from: usize,
    to: usize,
    weight: f64,
    edge_idx: usize,
) -> bool {
    if dist[from].is_finite() && dist[from] + weight < dist[to] {
        dist[to] = dist[from] + weight;
        parent[to] = Some((from, edge_idx));
        true
    } else {
        false
    }
}

/// Point-to-point shortest path
pub fn shortest_path(
    view: &GraphView,
    source: NodeId,
    target: NodeId,
    algorithm: PathAlgorithm,
) -> AlgoResult<PathResult> {
    view.index_of(target)?;
    algorithm.run(view, source)?.path_to(target)
}
