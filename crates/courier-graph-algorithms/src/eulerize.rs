//! Eulerization planning (Chinese Postman augmentation)
//!
//! Computes which existing edges must be duplicated so that every vertex has
//! even degree at minimum added weight. The plan is pure; applying it is
//! left to whoever owns the graph.

use super::common::{EdgeKey, GraphView, NodeId};
use super::community::require_connected;
use super::error::{AlgoError, AlgoResult};
use super::matching::{min_weight_perfect_matching, MatchingStrategy};
use super::parity::{check_handshake, odd_indices};
use super::pathfinding::{PathAlgorithm, ShortestPaths};
use rayon::prelude::*;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EulerizeOptions {
    pub matching: MatchingStrategy,
    pub exact_matching_limit: usize,
    pub path_algorithm: PathAlgorithm,
}

impl Default for EulerizeOptions {
    fn default() -> Self {
        Self {
            matching: MatchingStrategy::Auto,
            exact_matching_limit: 20,
            path_algorithm: PathAlgorithm::Dijkstra,
        }
    }
}

/// Shortest path between one matched pair of odd vertices
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AugmentingPath {
    pub from: NodeId,
    pub to: NodeId,
    pub path: Vec<NodeId>,
    /// Edges to duplicate, in path order
    pub edges: Vec<EdgeKey>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerizationPlan {
    pub odd_vertices: Vec<NodeId>,
    pub augmentations: Vec<AugmentingPath>,
    /// Total weight of the matching, equal to the weight the plan adds
    pub total_cost: f64,
    pub exact: bool,
}

impl EulerizationPlan {
    pub fn is_noop(&self) -> bool {
        self.augmentations.is_empty()
    }

    pub fn duplicated_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.augmentations.iter().flat_map(|a| a.edges.iter().copied())
    }
}

/// Plan a minimum-cost augmentation that makes `view` Eulerian.
///
/// Fails with `EmptyGraph`, `DisconnectedGraph`, or `MatchingTooLarge` (only
/// under `MatchingStrategy::Exact`).
pub fn plan_eulerization(view: &GraphView, options: &EulerizeOptions) -> AlgoResult<EulerizationPlan> {
    if view.is_empty() {
        return Err(AlgoError::EmptyGraph);
    }
    require_connected(view)?;
    check_handshake(view)?;

    let odd = odd_indices(view)?;
    let odd_nodes: Vec<NodeId> = odd.iter().map(|&idx| view.index_to_node[idx]).collect();
    debug!("{} odd-degree vertices", odd_nodes.len());

    if odd_nodes.is_empty() {
        return Ok(EulerizationPlan {
            odd_vertices: odd_nodes,
            augmentations: Vec::new(),
            total_cost: 0.0,
            exact: true,
        });
    }

    // Reject before the shortest-path fan-out when exact matching cannot run
    if options.matching == MatchingStrategy::Exact && odd_nodes.len() > options.exact_matching_limit {
        return Err(AlgoError::MatchingTooLarge {
            odd: odd_nodes.len(),
            limit: options.exact_matching_limit,
        });
    }

    let trees: Vec<ShortestPaths> = odd_nodes
        .par_iter()
        .map(|&node| options.path_algorithm.run(view, node))
        .collect::<AlgoResult<Vec<_>>>()?;

    // Complete auxiliary graph over the odd vertices
    let n = odd_nodes.len();
    let mut costs = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = trees[i].distance(odd_nodes[j]).ok_or(AlgoError::Unreachable {
                origin: odd_nodes[i],
                target: odd_nodes[j],
            })?;
            costs[i][j] = d;
            costs[j][i] = d;
        }
    }

    let matching = min_weight_perfect_matching(&costs, options.matching, options.exact_matching_limit)?;

    let mut augmentations = Vec::with_capacity(matching.pairs.len());
    for &(i, j) in &matching.pairs {
        let (i, j) = (i.min(j), i.max(j));
        let route = trees[i].path_to(odd_nodes[j])?;
        debug!(
            "Pairing {} with {}: {} edges, cost {:.3}",
            odd_nodes[i],
            odd_nodes[j],
            route.edges.len(),
            route.cost
        );
        augmentations.push(AugmentingPath {
            from: odd_nodes[i],
            to: odd_nodes[j],
            path: route.path,
            edges: route.edges,
            cost: costs[i][j],
        });
    }

    Ok(EulerizationPlan {
        odd_vertices: odd_nodes,
        augmentations,
        total_cost: matching.total_cost,
        exact: matching.exact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parity::{classify, EulerClass};

    /// Apply a plan to an edge list the way a store would
    fn apply(edges: &mut Vec<(NodeId, NodeId, f64, EdgeKey)>, plan: &EulerizationPlan) {
        let mut next_key = edges.iter().map(|e| e.3).max().unwrap_or(0) + 1;
        for key in plan.duplicated_edges() {
            let (u, v, w, _) = *edges.iter().find(|e| e.3 == key).unwrap();
            edges.push((u, v, w, next_key));
            next_key += 1;
        }
    }

    #[test]
    fn test_path_graph_duplicates_every_edge() {
        // 1 - 2 - 3 - 4: odd ends 1 and 4, the only pairing walks the whole path
        let mut edges = vec![(1, 2, 1.0, 0), (2, 3, 2.0, 1), (3, 4, 3.0, 2)];
        let view = GraphView::from_edge_list(edges.clone());
        let plan = plan_eulerization(&view, &EulerizeOptions::default()).unwrap();

        assert_eq!(plan.odd_vertices, vec![1, 4]);
        assert_eq!(plan.augmentations.len(), 1);
        assert_eq!(plan.augmentations[0].path, vec![1, 2, 3, 4]);
        assert_eq!(plan.total_cost, 6.0);
        assert!(plan.exact);

        apply(&mut edges, &plan);
        let after = GraphView::from_edge_list(edges);
        assert_eq!(classify(&after).unwrap(), EulerClass::Eulerian);
    }

    #[test]
    fn test_star_pairs_through_center() {
        // Star with 4 leaves: leaves odd, center even (4)
        let mut edges = vec![(0, 1, 1.0, 0), (0, 2, 2.0, 1), (0, 3, 3.0, 2), (0, 4, 4.0, 3)];
        let view = GraphView::from_edge_list(edges.clone());
        let plan = plan_eulerization(&view, &EulerizeOptions::default()).unwrap();

        // Every pairing costs the sum of all leaf weights
        assert_eq!(plan.total_cost, 10.0);
        assert_eq!(plan.duplicated_edges().count(), 4);

        apply(&mut edges, &plan);
        let after = GraphView::from_edge_list(edges);
        assert_eq!(classify(&after).unwrap(), EulerClass::Eulerian);
        assert!(check_handshake(&after).is_ok());
    }

    #[test]
    fn test_eulerian_graph_is_noop() {
        let view = GraphView::from_edge_list(vec![(1, 2, 1.0, 0), (2, 3, 1.0, 1), (3, 1, 1.0, 2)]);
        let plan = plan_eulerization(&view, &EulerizeOptions::default()).unwrap();
        assert!(plan.is_noop());
        assert_eq!(plan.total_cost, 0.0);
    }

    #[test]
    fn test_bellman_ford_plan_matches_dijkstra() {
        let view = GraphView::from_edge_list(vec![
            (1, 2, 1.0, 0),
            (2, 3, 1.0, 1),
            (3, 4, 1.0, 2),
            (4, 1, 5.0, 3),
            (1, 3, 1.5, 4),
        ]);
        let dijkstra = plan_eulerization(&view, &EulerizeOptions::default()).unwrap();
        let options = EulerizeOptions {
            path_algorithm: PathAlgorithm::BellmanFord,
            ..Default::default()
        };
        let bellman = plan_eulerization(&view, &options).unwrap();
        assert_eq!(dijkstra.total_cost, bellman.total_cost);
        assert_eq!(dijkstra.odd_vertices, vec![1, 3]);
    }

    #[test]
    fn test_failures() {
        assert_eq!(
            plan_eulerization(&GraphView::default(), &EulerizeOptions::default()),
            Err(AlgoError::EmptyGraph)
        );

        let split = GraphView::from_edge_list(vec![(1, 2, 1.0, 0), (3, 4, 1.0, 1)]);
        assert_eq!(
            plan_eulerization(&split, &EulerizeOptions::default()),
            Err(AlgoError::DisconnectedGraph { components: 2 })
        );

        // K4 has 4 odd vertices
        let k4 = GraphView::from_edge_list(vec![
            (1, 2, 1.0, 0),
            (1, 3, 1.0, 1),
            (1, 4, 1.0, 2),
            (2, 3, 1.0, 3),
            (2, 4, 1.0, 4),
            (3, 4, 1.0, 5),
        ]);
        let options = EulerizeOptions {
            matching: MatchingStrategy::Exact,
            exact_matching_limit: 2,
            ..Default::default()
        };
        assert_eq!(
            plan_eulerization(&k4, &options),
            Err(AlgoError::MatchingTooLarge { odd: 4, limit: 2 })
        );
    }
}
