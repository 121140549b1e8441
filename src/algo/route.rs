//! Shortest routes between named delivery points

use super::{build_view, edge_ids, name_of, names_of};
use crate::graph::{EdgeId, GraphResult, GraphStore};
use courier_graph_algorithms::PathAlgorithm;
use serde::Serialize;
use tracing::debug;

/// Cheapest route between two vertices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub source: String,
    pub target: String,
    /// Vertex names from source to target, both included
    pub path: Vec<String>,
    /// Edges travelled, one fewer than `path`
    pub edges: Vec<EdgeId>,
    pub distance: f64,
    pub algorithm: PathAlgorithm,
}

impl Route {
    pub fn hops(&self) -> usize {
        self.edges.len()
    }
}

/// One row of a single-source distance table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachEntry {
    pub vertex: String,
    pub distance: f64,
    pub predecessor: Option<String>,
}

/// Shortest route from `source` to `target`.
///
/// Fails with `VertexNotFound` for unknown names and with the algorithm's
/// `Unreachable` error when no route exists.
pub fn shortest_path(
    store: &GraphStore,
    source: &str,
    target: &str,
    algorithm: PathAlgorithm,
) -> GraphResult<Route> {
    let s = store.require_vertex(source)?;
    let t = store.require_vertex(target)?;

    let view = build_view(store);
    let result = courier_graph_algorithms::shortest_path(&view, s.as_u64(), t.as_u64(), algorithm)?;
    debug!(
        "{} route {} -> {}: {} hops, cost {}",
        algorithm,
        source,
        target,
        result.edges.len(),
        result.cost
    );

    Ok(Route {
        source: source.to_string(),
        target: target.to_string(),
        path: names_of(store, &result.path)?,
        edges: edge_ids(&result.edges),
        distance: result.cost,
        algorithm,
    })
}

/// Distances from `source` to every reachable vertex, in vertex order
pub fn shortest_paths_from(
    store: &GraphStore,
    source: &str,
    algorithm: PathAlgorithm,
) -> GraphResult<Vec<ReachEntry>> {
    let s = store.require_vertex(source)?;
    let view = build_view(store);
    let tree = algorithm.run(&view, s.as_u64())?;

    let mut table = Vec::with_capacity(tree.reachable_count());
    for (id, name) in store.vertices() {
        if let Some(entry) = tree.entry(id.as_u64()) {
            let predecessor = match entry.predecessor {
                Some(p) => Some(name_of(store, p)?),
                None => None,
            };
            table.push(ReachEntry {
                vertex: name.to_string(),
                distance: entry.distance,
                predecessor,
            });
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;
    use courier_graph_algorithms::AlgoError;

    fn sample() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_edge("A", "B", 4.0).unwrap();
        store.add_edge("A", "C", 1.0).unwrap();
        store.add_edge("C", "B", 2.0).unwrap();
        store.add_edge("B", "D", 5.0).unwrap();
        store
    }

    #[test]
    fn test_route_by_name() {
        let store = sample();
        let route = shortest_path(&store, "A", "D", PathAlgorithm::Dijkstra).unwrap();
        assert_eq!(route.path, vec!["A", "C", "B", "D"]);
        assert_eq!(route.edges, vec![EdgeId::new(1), EdgeId::new(2), EdgeId::new(3)]);
        assert_eq!(route.hops(), 3);
        assert!((route.distance - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_route_is_symmetric() {
        let store = sample();
        let there = shortest_path(&store, "A", "D", PathAlgorithm::Dijkstra).unwrap();
        let back = shortest_path(&store, "D", "A", PathAlgorithm::BellmanFord).unwrap();
        assert!((there.distance - back.distance).abs() < 1e-9);
        assert_eq!(back.path, vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_route_to_self() {
        let store = sample();
        let route = shortest_path(&store, "B", "B", PathAlgorithm::Dijkstra).unwrap();
        assert_eq!(route.path, vec!["B"]);
        assert!(route.edges.is_empty());
        assert_eq!(route.distance, 0.0);
    }

    #[test]
    fn test_unknown_vertex() {
        let store = sample();
        let err = shortest_path(&store, "A", "Z", PathAlgorithm::Dijkstra).unwrap_err();
        assert_eq!(err, GraphError::VertexNotFound("Z".to_string()));
    }

    #[test]
    fn test_unreachable() {
        let mut store = sample();
        store.add_edge("X", "Y", 1.0).unwrap();
        let err = shortest_path(&store, "A", "Y", PathAlgorithm::Dijkstra).unwrap_err();
        assert!(matches!(err, GraphError::Algorithm(AlgoError::Unreachable { .. })));
    }

    #[test]
    fn test_distance_table() {
        let mut store = sample();
        store.add_vertex("Lonely");
        let table = shortest_paths_from(&store, "A", PathAlgorithm::BellmanFord).unwrap();

        let names: Vec<&str> = table.iter().map(|e| e.vertex.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
        assert_eq!(table[0].predecessor, None);
        assert_eq!(table[1].predecessor.as_deref(), Some("C"));
        assert!((table[1].distance - 3.0).abs() < 1e-9);
    }
}
