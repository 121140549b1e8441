//! Euler circuit and path construction (Hierholzer's algorithm)

use super::common::{EdgeKey, GraphView, NodeId};
use super::error::{AlgoError, AlgoResult};
use super::parity::{classify, odd_indices, EulerClass};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A walk using every edge exactly once
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerWalk {
    /// Visited nodes; one more than `edges`
    pub vertices: Vec<NodeId>,
    /// `edges[k]` joins `vertices[k]` and `vertices[k + 1]`
    pub edges: Vec<EdgeKey>,
}

impl EulerWalk {
    pub fn is_closed(&self) -> bool {
        self.vertices.first() == self.vertices.last()
    }
}

/// Euler circuit starting at `start`, or at the first node with edges.
///
/// Fails with `NotEulerian` unless the view classifies as Eulerian.
pub fn euler_circuit(view: &GraphView, start: Option<NodeId>) -> AlgoResult<EulerWalk> {
    let class = classify(view)?;
    if class != EulerClass::Eulerian {
        return Err(AlgoError::NotEulerian(class));
    }

    let start_idx = match start {
        Some(node) => {
            let idx = view.index_of(node)?;
            if view.degree(idx) == 0 && view.edge_count() > 0 {
                return Err(AlgoError::InvalidStart(node));
            }
            idx
        }
        None => default_start(view),
    };

    hierholzer(view, start_idx)
}

/// Euler path: a circuit on Eulerian views, an open walk between the two
/// odd-degree vertices on semi-Eulerian ones.
pub fn eulerian_path(view: &GraphView) -> AlgoResult<EulerWalk> {
    match classify(view)? {
        EulerClass::Eulerian => hierholzer(view, default_start(view)),
        EulerClass::SemiEulerian => {
            let odd = odd_indices(view)?;
            hierholzer(view, odd[0])
        }
        class => Err(AlgoError::NotEulerian(class)),
    }
}

fn default_start(view: &GraphView) -> usize {
    (0..view.node_count)
        .find(|&idx| view.degree(idx) > 0)
        .unwrap_or(0)
}

/// Iterative Hierholzer.
///
/// The stack holds the current trail. When its top has no unused edge the
/// node is emitted; emitting in pop order splices every sub-tour into place.
fn hierholzer(view: &GraphView, start_idx: usize) -> AlgoResult<EulerWalk> {
    let edge_count = view.edge_count();
    let mut used = vec![false; edge_count];
    // Next adjacency slot to inspect for each node
    let mut cursor: Vec<usize> = view.offsets[..view.node_count].to_vec();

    let mut stack: Vec<(usize, Option<usize>)> = vec![(start_idx, None)];
    let mut vertices = Vec::with_capacity(edge_count + 1);
    let mut edges = Vec::with_capacity(edge_count);

    while let Some(&(node_idx, _)) = stack.last() {
        let end = view.offsets[node_idx + 1];
        while cursor[node_idx] < end && used[view.slot_edges[cursor[node_idx]]] {
            cursor[node_idx] += 1;
        }

        if cursor[node_idx] < end {
            let slot = cursor[node_idx];
            let edge_idx = view.slot_edges[slot];
            used[edge_idx] = true;
            cursor[node_idx] += 1;
            stack.push((view.targets[slot], Some(edge_idx)));
        } else if let Some((done_idx, arrived_by)) = stack.pop() {
            vertices.push(view.index_to_node[done_idx]);
            if let Some(edge_idx) = arrived_by {
                edges.push(view.edges[edge_idx].id);
            }
        }
    }

    if edges.len() != edge_count || used.iter().any(|u| !u) {
        return Err(AlgoError::InternalInvariant(format!(
            "walk covered {} of {} edges",
            edges.len(),
            edge_count
        )));
    }

    vertices.reverse();
    edges.reverse();
    Ok(EulerWalk { vertices, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Every consecutive pair of vertices is joined by the listed edge, and
    /// every edge appears once.
    fn assert_valid_walk(view: &GraphView, walk: &EulerWalk) {
        assert_eq!(walk.vertices.len(), view.edge_count() + 1);
        assert_eq!(walk.edges.len(), view.edge_count());

        let unique: HashSet<_> = walk.edges.iter().collect();
        assert_eq!(unique.len(), view.edge_count());

        for (k, key) in walk.edges.iter().enumerate() {
            let edge = view.edges.iter().find(|e| e.id == *key).unwrap();
            let a = view.index_to_node[edge.a];
            let b = view.index_to_node[edge.b];
            let (u, v) = (walk.vertices[k], walk.vertices[k + 1]);
            assert!((u == a && v == b) || (u == b && v == a));
        }
    }

    #[test]
    fn test_circuit_on_bowtie() {
        // Two triangles sharing node 3, forcing a splice
        let view = GraphView::from_edge_list(vec![
            (1, 2, 1.0, 0),
            (2, 3, 1.0, 1),
            (3, 1, 1.0, 2),
            (3, 4, 1.0, 3),
            (4, 5, 1.0, 4),
            (5, 3, 1.0, 5),
        ]);
        let walk = euler_circuit(&view, None).unwrap();
        assert!(walk.is_closed());
        assert_eq!(walk.vertices[0], 1);
        assert_valid_walk(&view, &walk);
    }

    #[test]
    fn test_circuit_with_parallel_edges() {
        let view = GraphView::from_edge_list(vec![
            (1, 2, 1.0, 0),
            (1, 2, 1.0, 1),
            (2, 3, 1.0, 2),
            (2, 3, 1.0, 3),
        ]);
        let walk = euler_circuit(&view, Some(3)).unwrap();
        assert_eq!(walk.vertices.first(), Some(&3));
        assert!(walk.is_closed());
        assert_valid_walk(&view, &walk);
    }

    #[test]
    fn test_circuit_rejects_non_eulerian() {
        let view = GraphView::from_edge_list(vec![(1, 2, 1.0, 0), (2, 3, 1.0, 1)]);
        assert_eq!(
            euler_circuit(&view, None),
            Err(AlgoError::NotEulerian(EulerClass::SemiEulerian))
        );
    }

    #[test]
    fn test_circuit_start_validation() {
        let view = GraphView::from_edge_list(vec![(1, 2, 1.0, 0), (2, 3, 1.0, 1), (3, 1, 1.0, 2)]);
        assert_eq!(euler_circuit(&view, Some(8)), Err(AlgoError::UnknownNode(8)));
    }

    #[test]
    fn test_single_vertex_circuit() {
        let view = GraphView::from_edges(vec![5], Vec::<(NodeId, NodeId, f64, EdgeKey)>::new());
        let walk = euler_circuit(&view, None).unwrap();
        assert_eq!(walk.vertices, vec![5]);
        assert!(walk.edges.is_empty());
    }

    #[test]
    fn test_open_path_on_semi_eulerian() {
        // House shape: square 1-2-3-4 with roof 1-5-2 and diagonal 1-3
        let view = GraphView::from_edge_list(vec![
            (1, 2, 1.0, 0),
            (2, 3, 1.0, 1),
            (3, 4, 1.0, 2),
            (4, 1, 1.0, 3),
            (1, 5, 1.0, 4),
            (5, 2, 1.0, 5),
            (1, 3, 1.0, 6),
        ]);
        let walk = eulerian_path(&view).unwrap();
        assert!(!walk.is_closed());
        let ends = HashSet::from([walk.vertices[0], *walk.vertices.last().unwrap()]);
        assert_eq!(ends, HashSet::from([2, 3]));
        assert_valid_walk(&view, &walk);
    }

    #[test]
    fn test_path_on_eulerian_is_circuit() {
        let view = GraphView::from_edge_list(vec![(1, 2, 1.0, 0), (2, 3, 1.0, 1), (3, 1, 1.0, 2)]);
        assert!(eulerian_path(&view).unwrap().is_closed());
    }
}
