//! Network descriptions
//!
//! A delivery network is a list of weighted edges (plus optional isolated
//! vertices) loaded from YAML or JSON and turned into a [`GraphStore`].

use crate::config::{load_document, ConfigResult};
use crate::graph::{GraphResult, GraphStore};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A road between two named delivery points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    #[serde(default)]
    pub name: Option<String>,
    /// Registered before any edge, so they keep this order
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl NetworkSpec {
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        load_document(path.as_ref())
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build the store; the first invalid edge aborts
    pub fn build(&self) -> GraphResult<GraphStore> {
        let mut store = GraphStore::new();
        for vertex in &self.vertices {
            store.add_vertex(vertex.as_str());
        }
        for edge in &self.edges {
            store.add_edge(&edge.from, &edge.to, edge.weight)?;
        }

        info!(
            "Loaded network {}: {} vertices, {} edges",
            self.name.as_deref().unwrap_or("<unnamed>"),
            store.vertex_count(),
            store.edge_count()
        );
        Ok(store)
    }
}

/// Build a store from `(from, to, weight)` triples
pub fn build_graph<I, S>(edges: I) -> GraphResult<GraphStore>
where
    I: IntoIterator<Item = (S, S, f64)>,
    S: AsRef<str>,
{
    let mut store = GraphStore::new();
    for (from, to, weight) in edges {
        store.add_edge(from.as_ref(), to.as_ref(), weight)?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;

    #[test]
    fn test_parse_yaml() {
        let spec = NetworkSpec::from_yaml_str(
            r#"
name: tiny
vertices: [Depot]
edges:
  - { from: A, to: B, weight: 1.5 }
  - { from: B, to: Depot, weight: 2 }
"#,
        )
        .unwrap();

        assert_eq!(spec.name.as_deref(), Some("tiny"));
        assert_eq!(spec.edges.len(), 2);

        let store = spec.build().unwrap();
        let names: Vec<&str> = store.vertices().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["Depot", "A", "B"]);
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn test_build_rejects_negative_weight() {
        let spec = NetworkSpec {
            edges: vec![EdgeSpec {
                from: "A".into(),
                to: "B".into(),
                weight: -1.0,
            }],
            ..NetworkSpec::default()
        };
        assert!(matches!(spec.build(), Err(GraphError::InvalidEdge { .. })));
    }

    #[test]
    fn test_build_graph_from_triples() {
        let store = build_graph([("A", "B", 1.0), ("B", "C", 2.0), ("A", "B", 3.0)]).unwrap();
        assert_eq!(store.vertex_count(), 3);
        assert_eq!(store.edge_count(), 3);
        assert_eq!(store.degree(store.vertex_id("B").unwrap()), 3);
    }
}
