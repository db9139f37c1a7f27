//! JSON graph input.

use std::collections::BTreeSet;

use graphwalk::{AdjacencyGraph, MutableEdgeSet, MutableVertexSet, TaggedEdge, VertexSet};
use serde::Deserialize;
use thiserror::Error;

/// Edges carry their position in the input file as tag, so parallel edges
/// stay distinct and weights can be looked up by tag.
pub type CliEdge = TaggedEdge<String, u32>;

/// The graph every command runs on.
pub type CliGraph = AdjacencyGraph<String, CliEdge>;

/// Problems with a graph file.
#[derive(Error, Debug)]
pub enum InputError {
    /// Not valid JSON or not the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A weight is NaN or infinite.
    #[error("edge {index} ({from} -> {to}) has non-finite weight {weight}")]
    NonFiniteWeight {
        index: usize,
        from: String,
        to: String,
        weight: f64,
    },

    /// More edges than tags.
    #[error("too many edges ({0})")]
    TooManyEdges(usize),

    /// A vertex named on the command line is not in the file.
    #[error("vertex {0:?} is not in the graph")]
    UnknownVertex(String),

    /// The graph rejected a mutation.
    #[error(transparent)]
    Graph(#[from] graphwalk::Error),
}

fn default_directed() -> bool {
    true
}

fn default_weight() -> f64 {
    1.0
}

/// One edge of the input.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// A parsed graph file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphFile {
    #[serde(default = "default_directed")]
    pub directed: bool,
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphFile {
    /// Parses and validates a graph file.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let file: GraphFile = serde_json::from_str(text)?;
        if u32::try_from(file.edges.len()).is_err() {
            return Err(InputError::TooManyEdges(file.edges.len()));
        }
        for (index, edge) in file.edges.iter().enumerate() {
            if !edge.weight.is_finite() {
                return Err(InputError::NonFiniteWeight {
                    index,
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    weight: edge.weight,
                });
            }
        }
        Ok(file)
    }

    /// Number of distinct vertices, listed or used by an edge.
    pub fn vertex_count(&self) -> usize {
        self.vertices
            .iter()
            .chain(self.edges.iter().flat_map(|e| [&e.source, &e.target]))
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Builds the graph and its weight table.
    pub fn build(&self) -> Result<(CliGraph, Weights), InputError> {
        let mut graph = if self.directed {
            CliGraph::directed()
        } else {
            CliGraph::undirected()
        };
        for vertex in &self.vertices {
            graph.add_vertex(vertex.clone())?;
        }
        let mut weights = Vec::with_capacity(self.edges.len());
        for (tag, edge) in (0u32..).zip(&self.edges) {
            graph.add_vertices_and_edge(TaggedEdge::new(
                edge.source.clone(),
                edge.target.clone(),
                tag,
            ))?;
            weights.push(edge.weight);
        }
        Ok((graph, Weights(weights)))
    }
}

/// Edge weights by tag. Edges made by an [`EdgeFactory`] weigh nothing.
#[derive(Debug, Clone)]
pub struct Weights(Vec<f64>);

impl Weights {
    /// Weight of `edge`.
    pub fn of(&self, edge: &CliEdge) -> f64 {
        self.0.get(*edge.tag() as usize).copied().unwrap_or(0.0)
    }

    /// A factory whose tags never collide with input edges.
    pub fn factory(&self) -> EdgeFactory {
        EdgeFactory {
            next: self.0.len() as u32,
        }
    }
}

/// Makes synthetic edges with fresh tags.
#[derive(Debug)]
pub struct EdgeFactory {
    next: u32,
}

impl EdgeFactory {
    /// A new edge from `source` to `target`.
    pub fn make(&mut self, source: &str, target: &str) -> CliEdge {
        let edge = TaggedEdge::new(source.to_string(), target.to_string(), self.next);
        self.next = self.next.wrapping_add(1);
        edge
    }
}

/// Checks that `vertex` is in `graph`.
pub fn require_vertex(graph: &CliGraph, vertex: &str) -> Result<String, InputError> {
    let vertex = vertex.to_string();
    if graph.contains_vertex(&vertex) {
        Ok(vertex)
    } else {
        Err(InputError::UnknownVertex(vertex))
    }
}

/// A vertex name based on `base` that `graph` does not use.
pub fn fresh_vertex(graph: &CliGraph, base: &str) -> String {
    let mut name = base.to_string();
    while graph.contains_vertex(&name) {
        name.push('\'');
    }
    name
}

#[cfg(test)]
mod tests {
    use graphwalk::EdgeSet;

    use super::*;

    #[test]
    fn test_defaults() {
        let file = GraphFile::parse(r#"{"edges": [{"source": "a", "target": "b"}]}"#).unwrap();
        assert!(file.directed);
        assert_eq!(file.edges[0].weight, 1.0);
        assert_eq!(file.vertex_count(), 2);
    }

    #[test]
    fn test_build_keeps_parallel_edges() {
        let file = GraphFile::parse(
            r#"{
                "directed": false,
                "vertices": ["z"],
                "edges": [
                    {"source": "a", "target": "b", "weight": 2},
                    {"source": "a", "target": "b", "weight": 3}
                ]
            }"#,
        )
        .unwrap();
        let (graph, weights) = file.build().unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let total: f64 = graph.edges().map(|e| weights.of(e)).sum();
        assert_eq!(total, 5.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            GraphFile::parse(r#"{"edges": [{"source": "a"}]}"#),
            Err(InputError::Json(_))
        ));
        assert!(matches!(
            GraphFile::parse(r#"{"colour": "red"}"#),
            Err(InputError::Json(_))
        ));
    }

    #[test]
    fn test_factory_and_fresh_names() {
        let file = GraphFile::parse(r#"{"edges": [{"source": "s", "target": "t"}]}"#).unwrap();
        let (graph, weights) = file.build().unwrap();
        let mut factory = weights.factory();
        let edge = factory.make("t", "s");
        assert_eq!(*edge.tag(), 1);
        assert_eq!(weights.of(&edge), 0.0);
        assert_eq!(fresh_vertex(&graph, "s"), "s'");
        assert!(matches!(
            require_vertex(&graph, "x"),
            Err(InputError::UnknownVertex(_))
        ));
    }
}
