//! Delivery circuits: Euler circuits and paths over the stored network

use super::{build_view, edge_ids, names_of};
use crate::graph::{EdgeId, GraphResult, GraphStore};
use courier_graph_algorithms::{self as algo, EulerWalk};
use serde::Serialize;
use tracing::info;

/// A walk that travels every edge exactly once
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Vertex names in visiting order, one more than `edges`
    pub vertices: Vec<String>,
    pub edges: Vec<EdgeId>,
    /// First vertex equals last vertex
    pub closed: bool,
    pub total_weight: f64,
}

impl Circuit {
    fn from_walk(store: &GraphStore, walk: &EulerWalk) -> GraphResult<Self> {
        let edges = edge_ids(&walk.edges);
        let total_weight = edges
            .iter()
            .filter_map(|&id| store.get_edge(id))
            .map(|e| e.weight)
            .sum();

        Ok(Circuit {
            vertices: names_of(store, &walk.vertices)?,
            closed: walk.is_closed(),
            edges,
            total_weight,
        })
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Euler circuit of an Eulerian graph, starting and ending at `start` (or
/// at the first vertex with edges).
///
/// Fails with `NotEulerian` otherwise; call [`eulerize`](super::eulerize)
/// first to make any connected graph traversable.
pub fn euler_circuit(store: &GraphStore, start: Option<&str>) -> GraphResult<Circuit> {
    let start = start.map(|name| store.require_vertex(name)).transpose()?;
    let view = build_view(store);
    let walk = algo::euler_circuit(&view, start.map(|v| v.as_u64()))?;

    let circuit = Circuit::from_walk(store, &walk)?;
    info!(
        "Euler circuit over {} edges from {} (weight {:.3})",
        circuit.len(),
        circuit.vertices.first().map(String::as_str).unwrap_or("-"),
        circuit.total_weight
    );
    Ok(circuit)
}

/// Euler path: closed on Eulerian graphs, open between the two odd-degree
/// vertices on semi-Eulerian ones.
pub fn euler_path(store: &GraphStore) -> GraphResult<Circuit> {
    let view = build_view(store);
    let walk = algo::eulerian_path(&view)?;
    Circuit::from_walk(store, &walk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::eulerize;
    use crate::config::EngineConfig;
    use crate::graph::GraphError;
    use courier_graph_algorithms::{AlgoError, EulerClass};

    fn square() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_edge("A", "B", 1.0).unwrap();
        store.add_edge("B", "C", 2.0).unwrap();
        store.add_edge("C", "D", 3.0).unwrap();
        store.add_edge("D", "A", 4.0).unwrap();
        store
    }

    #[test]
    fn test_circuit_on_square() {
        let store = square();
        let circuit = euler_circuit(&store, None).unwrap();
        assert!(circuit.closed);
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.vertices.len(), 5);
        assert_eq!(circuit.vertices[0], "A");
        assert!((circuit.total_weight - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_circuit_from_named_start() {
        let store = square();
        let circuit = euler_circuit(&store, Some("C")).unwrap();
        assert_eq!(circuit.vertices.first().unwrap(), "C");
        assert_eq!(circuit.vertices.last().unwrap(), "C");
    }

    #[test]
    fn test_unknown_start() {
        let store = square();
        let err = euler_circuit(&store, Some("Nowhere")).unwrap_err();
        assert_eq!(err, GraphError::VertexNotFound("Nowhere".to_string()));
    }

    #[test]
    fn test_circuit_requires_eulerian() {
        let mut store = square();
        store.add_edge("A", "C", 1.0).unwrap();
        let err = euler_circuit(&store, None).unwrap_err();
        assert_eq!(
            err,
            GraphError::Algorithm(AlgoError::NotEulerian(EulerClass::SemiEulerian))
        );

        let path = euler_path(&store).unwrap();
        assert!(!path.closed);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_circuit_after_eulerize() {
        let mut store = GraphStore::new();
        store.add_edge("A", "B", 1.0).unwrap();
        store.add_edge("B", "C", 1.0).unwrap();
        store.add_edge("B", "D", 1.0).unwrap();
        store.add_edge("C", "D", 1.0).unwrap();

        let report = eulerize(&mut store, &EngineConfig::default()).unwrap();
        assert!(!report.is_noop());

        let circuit = euler_circuit(&store, None).unwrap();
        assert!(circuit.closed);
        assert_eq!(circuit.len(), store.edge_count());
    }
}
