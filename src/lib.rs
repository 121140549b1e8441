//! Courier delivery network engine
//!
//! Models a delivery network as a weighted undirected multigraph and answers
//! the questions a route planner asks of it:
//!
//! - Shortest routes between delivery points (Dijkstra, Bellman-Ford)
//! - Degree parity and Eulerian classification
//! - Minimum-cost eulerization by duplicating existing roads (Chinese Postman)
//! - Euler circuits that travel every road exactly once
//!
//! The algorithms live in the `courier-graph-algorithms` crate and run over a
//! read-only snapshot of the store; this crate owns storage, configuration,
//! network loading and the name-based API.
//!
//! ## Example Usage
//!
//! ```rust
//! use courier::{eulerize, euler_circuit, shortest_path, EngineConfig, GraphStore, PathAlgorithm};
//!
//! let mut store = GraphStore::new();
//! store.add_edge("Depot", "A", 1.0).unwrap();
//! store.add_edge("A", "B", 2.0).unwrap();
//! store.add_edge("B", "Depot", 1.5).unwrap();
//! store.add_edge("B", "C", 0.5).unwrap();
//!
//! let route = shortest_path(&store, "Depot", "C", PathAlgorithm::Dijkstra).unwrap();
//! assert_eq!(route.path, vec!["Depot", "B", "C"]);
//!
//! // B and C have odd degree: the B - C road is driven twice
//! let report = eulerize(&mut store, &EngineConfig::default()).unwrap();
//! assert_eq!(report.added_edges.len(), 1);
//!
//! let circuit = euler_circuit(&store, Some("Depot")).unwrap();
//! assert!(circuit.closed);
//! assert_eq!(circuit.edges.len(), 5);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod network;

// Re-export main types for convenience
pub use graph::{Edge, EdgeId, GraphError, GraphResult, GraphStatistics, GraphStore, VertexId};

pub use algo::{
    build_view, classify, euler_circuit, euler_path, eulerize, has_eulerian_path,
    odd_degree_vertices, shortest_path, shortest_paths_from, Circuit, EulerizeReport,
    MatchedPair, ReachEntry, Route,
};

pub use config::{ConfigError, ConfigResult, EngineConfig, EulerizeConfig};

pub use network::{build_graph, EdgeSpec, NetworkSpec};

pub use courier_graph_algorithms::{AlgoError, EulerClass, MatchingStrategy, PathAlgorithm};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
