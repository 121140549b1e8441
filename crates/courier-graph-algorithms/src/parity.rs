//! Degree parity analysis
//!
//! Classifies a graph as Eulerian, semi-Eulerian or non-Eulerian from its
//! connectivity and the number of odd-degree vertices.

use super::common::{GraphView, NodeId};
use super::community::is_connected;
use super::error::{AlgoError, AlgoResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EulerClass {
    /// Connected, every degree even: an Euler circuit exists
    Eulerian,
    /// Connected, exactly two odd-degree vertices: an Euler path exists
    SemiEulerian,
    NonEulerian,
}

impl fmt::Display for EulerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EulerClass::Eulerian => write!(f, "Eulerian"),
            EulerClass::SemiEulerian => write!(f, "semi-Eulerian"),
            EulerClass::NonEulerian => write!(f, "non-Eulerian"),
        }
    }
}

/// Degree of every node as `(NodeId, degree)`, in view order
pub fn degrees(view: &GraphView) -> Vec<(NodeId, usize)> {
    (0..view.node_count)
        .map(|idx| (view.index_to_node[idx], view.degree(idx)))
        .collect()
}

/// Handshake lemma: the degree sum is twice the edge count
pub fn check_handshake(view: &GraphView) -> AlgoResult<()> {
    let degree_sum: usize = (0..view.node_count).map(|idx| view.degree(idx)).sum();
    if degree_sum != 2 * view.edge_count() {
        return Err(AlgoError::InternalInvariant(format!(
            "degree sum {} != 2 x {} edges",
            degree_sum,
            view.edge_count()
        )));
    }
    Ok(())
}

/// Dense indices of odd-degree nodes
pub(crate) fn odd_indices(view: &GraphView) -> AlgoResult<Vec<usize>> {
    let odd: Vec<usize> = (0..view.node_count)
        .filter(|&idx| view.degree(idx) % 2 == 1)
        .collect();

    if odd.len() % 2 == 1 {
        return Err(AlgoError::InternalInvariant(format!(
            "{} odd-degree vertices; the handshake lemma requires an even count",
            odd.len()
        )));
    }
    Ok(odd)
}

/// Vertices of odd degree, always an even-sized set
pub fn odd_degree_vertices(view: &GraphView) -> AlgoResult<Vec<NodeId>> {
    Ok(odd_indices(view)?
        .into_iter()
        .map(|idx| view.index_to_node[idx])
        .collect())
}

pub fn classify(view: &GraphView) -> AlgoResult<EulerClass> {
    if view.is_empty() {
        return Err(AlgoError::EmptyGraph);
    }

    let odd = odd_indices(view)?;
    if !is_connected(view) {
        return Ok(EulerClass::NonEulerian);
    }

    Ok(match odd.len() {
        0 => EulerClass::Eulerian,
        2 => EulerClass::SemiEulerian,
        _ => EulerClass::NonEulerian,
    })
}

/// An Euler path (open or closed) exists
pub fn has_eulerian_path(view: &GraphView) -> AlgoResult<bool> {
    Ok(matches!(
        classify(view)?,
        EulerClass::Eulerian | EulerClass::SemiEulerian
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(n: u64) -> GraphView {
        let mut edges = Vec::new();
        let mut key = 0;
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v, 1.0, key));
                key += 1;
            }
        }
        GraphView::from_edge_list(edges)
    }

    #[test]
    fn test_classify_complete_graphs() {
        // K5: every degree 4
        assert_eq!(classify(&complete(5)).unwrap(), EulerClass::Eulerian);
        // K4: every degree 3
        assert_eq!(classify(&complete(4)).unwrap(), EulerClass::NonEulerian);
        assert_eq!(odd_degree_vertices(&complete(4)).unwrap().len(), 4);
    }

    #[test]
    fn test_semi_eulerian_path_graph() {
        let view = GraphView::from_edge_list(vec![(1, 2, 1.0, 0), (2, 3, 1.0, 1)]);
        assert_eq!(classify(&view).unwrap(), EulerClass::SemiEulerian);
        assert_eq!(odd_degree_vertices(&view).unwrap(), vec![1, 3]);
        assert!(has_eulerian_path(&view).unwrap());
    }

    #[test]
    fn test_disconnected_even_graph_is_not_eulerian() {
        // Two disjoint triangles
        let view = GraphView::from_edge_list(vec![
            (1, 2, 1.0, 0),
            (2, 3, 1.0, 1),
            (3, 1, 1.0, 2),
            (4, 5, 1.0, 3),
            (5, 6, 1.0, 4),
            (6, 4, 1.0, 5),
        ]);
        assert_eq!(classify(&view).unwrap(), EulerClass::NonEulerian);
        assert!(!has_eulerian_path(&view).unwrap());
    }

    #[test]
    fn test_parallel_edges_count_toward_degree() {
        let view = GraphView::from_edge_list(vec![(1, 2, 1.0, 0), (1, 2, 1.0, 1)]);
        assert_eq!(degrees(&view), vec![(1, 2), (2, 2)]);
        assert_eq!(classify(&view).unwrap(), EulerClass::Eulerian);
    }

    #[test]
    fn test_empty_and_single_vertex() {
        assert_eq!(classify(&GraphView::default()), Err(AlgoError::EmptyGraph));
        let single = GraphView::from_edges(vec![1], Vec::<(NodeId, NodeId, f64, u64)>::new());
        assert_eq!(classify(&single).unwrap(), EulerClass::Eulerian);
    }

    #[test]
    fn test_handshake() {
        assert!(check_handshake(&complete(6)).is_ok());

        let mut broken = complete(3);
        broken.offsets[3] += 1;
        broken.targets.push(0);
        broken.slot_edges.push(0);
        assert!(matches!(
            check_handshake(&broken),
            Err(AlgoError::InternalInvariant(_))
        ));
        assert!(matches!(
            odd_degree_vertices(&broken),
            Err(AlgoError::InternalInvariant(_))
        ));
    }
}
