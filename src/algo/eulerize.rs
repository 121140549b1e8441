//! Parity analysis and eulerization of a stored network

use super::{build_view, name_of, names_of};
use crate::config::EngineConfig;
use crate::graph::{EdgeId, GraphError, GraphResult, GraphStore};
use courier_graph_algorithms::{self as algo, AlgoError, EulerClass};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Eulerian classification of the stored graph.
///
/// Fails with `EmptyGraph` when the store has no vertices.
pub fn classify(store: &GraphStore) -> GraphResult<EulerClass> {
    Ok(algo::classify(&build_view(store))?)
}

/// Names of the odd-degree vertices, in vertex order
pub fn odd_degree_vertices(store: &GraphStore) -> GraphResult<Vec<String>> {
    let odd = algo::odd_degree_vertices(&build_view(store))?;
    names_of(store, &odd)
}

pub fn has_eulerian_path(store: &GraphStore) -> GraphResult<bool> {
    Ok(algo::has_eulerian_path(&build_view(store))?)
}

/// Two odd vertices joined by duplicating the edges of their shortest route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub from: String,
    pub to: String,
    pub cost: f64,
    pub path: Vec<String>,
}

/// What [`eulerize`] changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EulerizeReport {
    /// Odd-degree vertices before augmentation
    pub odd_vertices: Vec<String>,
    pub pairs: Vec<MatchedPair>,
    /// Ids of the duplicate edges, in insertion order
    pub added_edges: Vec<EdgeId>,
    /// Equals the matching cost
    pub added_weight: f64,
    /// False when the greedy matcher was used
    pub exact: bool,
}

impl EulerizeReport {
    pub fn is_noop(&self) -> bool {
        self.added_edges.is_empty()
    }
}

/// Make the stored graph Eulerian by duplicating existing edges at minimum
/// total weight (Chinese Postman augmentation).
///
/// The store is untouched when planning fails. An already Eulerian graph is
/// left as is.
pub fn eulerize(store: &mut GraphStore, config: &EngineConfig) -> GraphResult<EulerizeReport> {
    let start = Instant::now();

    if let Some(limit) = config.max_vertices {
        if store.vertex_count() > limit {
            return Err(GraphError::TooManyVertices {
                count: store.vertex_count(),
                limit,
            });
        }
    }

    let view = build_view(store);
    let plan = algo::plan_eulerization(&view, &config.eulerize.options())?;

    let to_duplicate: Vec<EdgeId> = plan.duplicated_edges().map(EdgeId::new).collect();
    if let Some(&missing) = to_duplicate.iter().find(|&&id| !store.has_edge(id)) {
        return Err(GraphError::EdgeNotFound(missing));
    }

    let mut pairs = Vec::with_capacity(plan.augmentations.len());
    for aug in &plan.augmentations {
        pairs.push(MatchedPair {
            from: name_of(store, aug.from)?,
            to: name_of(store, aug.to)?,
            cost: aug.cost,
            path: names_of(store, &aug.path)?,
        });
    }
    let odd_vertices = names_of(store, &plan.odd_vertices)?;

    let mut added_edges = Vec::with_capacity(to_duplicate.len());
    for id in to_duplicate {
        let copy = store.duplicate_edge(id)?;
        debug!("Duplicated {} as {}", id, copy);
        added_edges.push(copy);
    }

    let after = build_view(store);
    algo::check_handshake(&after)?;
    let class = algo::classify(&after)?;
    if class != EulerClass::Eulerian {
        return Err(AlgoError::InternalInvariant(format!(
            "graph is {} after eulerization",
            class
        ))
        .into());
    }

    let added_weight: f64 = added_edges
        .iter()
        .filter_map(|&id| store.get_edge(id))
        .map(|e| e.weight)
        .sum();

    info!(
        "Eulerized graph: {} odd vertices, {} edges added (weight {:.3}, {}) in {:?}",
        odd_vertices.len(),
        added_edges.len(),
        added_weight,
        if plan.exact { "exact" } else { "greedy" },
        start.elapsed()
    );

    Ok(EulerizeReport {
        odd_vertices,
        pairs,
        added_edges,
        added_weight,
        exact: plan.exact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EulerizeConfig;
    use courier_graph_algorithms::MatchingStrategy;

    fn path_graph() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_edge("A", "B", 1.0).unwrap();
        store.add_edge("B", "C", 2.0).unwrap();
        store.add_edge("C", "D", 3.0).unwrap();
        store
    }

    #[test]
    fn test_classify_and_odd_vertices() {
        let store = path_graph();
        assert_eq!(classify(&store).unwrap(), EulerClass::SemiEulerian);
        assert_eq!(odd_degree_vertices(&store).unwrap(), vec!["A", "D"]);
        assert!(has_eulerian_path(&store).unwrap());
    }

    #[test]
    fn test_eulerize_path_graph() {
        let mut store = path_graph();
        let report = eulerize(&mut store, &EngineConfig::default()).unwrap();

        assert_eq!(report.odd_vertices, vec!["A", "D"]);
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].path, vec!["A", "B", "C", "D"]);
        assert_eq!(report.added_edges.len(), 3);
        assert!((report.added_weight - 6.0).abs() < 1e-9);
        assert!(report.exact);

        assert_eq!(store.edge_count(), 6);
        assert_eq!(store.augmented_edge_count(), 3);
        assert_eq!(classify(&store).unwrap(), EulerClass::Eulerian);
    }

    #[test]
    fn test_eulerize_is_idempotent() {
        let mut store = path_graph();
        eulerize(&mut store, &EngineConfig::default()).unwrap();
        let again = eulerize(&mut store, &EngineConfig::default()).unwrap();
        assert!(again.is_noop());
        assert_eq!(again.added_weight, 0.0);
        assert_eq!(store.edge_count(), 6);
    }

    #[test]
    fn test_eulerize_empty() {
        let mut store = GraphStore::new();
        let err = eulerize(&mut store, &EngineConfig::default()).unwrap_err();
        assert_eq!(err, GraphError::Algorithm(AlgoError::EmptyGraph));
    }

    #[test]
    fn test_eulerize_disconnected_leaves_store() {
        let mut store = path_graph();
        store.add_edge("X", "Y", 1.0).unwrap();
        let err = eulerize(&mut store, &EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GraphError::Algorithm(AlgoError::DisconnectedGraph { components: 2 })
        ));
        assert_eq!(store.edge_count(), 4);
    }

    #[test]
    fn test_vertex_limit() {
        let mut store = path_graph();
        let config = EngineConfig {
            max_vertices: Some(3),
            ..EngineConfig::default()
        };
        let err = eulerize(&mut store, &config).unwrap_err();
        assert_eq!(err, GraphError::TooManyVertices { count: 4, limit: 3 });
    }

    #[test]
    fn test_exact_matching_limit() {
        // Star with six leaves: six odd vertices
        let mut store = GraphStore::new();
        for leaf in ["a", "b", "c", "d", "e", "f"] {
            store.add_edge("hub", leaf, 1.0).unwrap();
        }
        let config = EngineConfig {
            eulerize: EulerizeConfig {
                matching: MatchingStrategy::Exact,
                exact_matching_limit: 4,
                ..EulerizeConfig::default()
            },
            ..EngineConfig::default()
        };
        let err = eulerize(&mut store, &config).unwrap_err();
        assert_eq!(
            err,
            GraphError::Algorithm(AlgoError::MatchingTooLarge { odd: 6, limit: 4 })
        );
        assert_eq!(store.edge_count(), 6);
    }
}
