//! Delivery network storage
//!
//! This module implements the weighted undirected multigraph:
//! - Named vertices with dense ids
//! - Weighted edges, parallel edges allowed
//! - Duplicated edges that remember their original (eulerization)
//! - In-memory storage with adjacency lists

pub mod edge;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{EdgeId, VertexId};
