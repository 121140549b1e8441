//! Error types shared by all algorithms

use crate::common::{EdgeKey, NodeId};
use crate::parity::EulerClass;
use thiserror::Error;

/// Errors raised by the algorithms in this crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("Node {0} is not part of the graph")]
    UnknownNode(NodeId),

    #[error("Edge {edge} has negative weight {weight}; Dijkstra requires non-negative weights")]
    NegativeWeight { edge: EdgeKey, weight: f64 },

    #[error("Negative cycle reachable from node {origin}")]
    NegativeCycle { origin: NodeId },

    #[error("Node {target} is unreachable from node {origin}")]
    Unreachable { origin: NodeId, target: NodeId },

    #[error("Graph is not Eulerian (classified as {0})")]
    NotEulerian(EulerClass),

    #[error("Graph is disconnected ({components} components)")]
    DisconnectedGraph { components: usize },

    #[error("Graph has no vertices")]
    EmptyGraph,

    #[error("Exact matching over {odd} odd-degree vertices exceeds the limit of {limit}")]
    MatchingTooLarge { odd: usize, limit: usize },

    #[error("Start node {0} has no incident edges")]
    InvalidStart(NodeId),

    /// Always a defect in graph mutation or eulerization, never caused by input
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

pub type AlgoResult<T> = Result<T, AlgoError>;
