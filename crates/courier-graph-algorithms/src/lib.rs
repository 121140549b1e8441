pub mod common;
pub mod community;
pub mod error;
pub mod euler;
pub mod eulerize;
pub mod matching;
pub mod parity;
pub mod pathfinding;

pub use common::{EdgeKey, GraphView, NodeId, ViewEdge};
pub use community::{connected_components, is_connected, require_connected, ComponentResult};
pub use error::{AlgoError, AlgoResult};
pub use euler::{euler_circuit, eulerian_path, EulerWalk};
pub use eulerize::{plan_eulerization, AugmentingPath, EulerizationPlan, EulerizeOptions};
pub use matching::{exact_matching, greedy_matching, min_weight_perfect_matching, Matching, MatchingStrategy};
pub use parity::{check_handshake, classify, degrees, has_eulerian_path, odd_degree_vertices, EulerClass};
pub use pathfinding::{bellman_ford, dijkstra, shortest_path, PathAlgorithm, PathEntry, PathResult, ShortestPaths};
