//! Weakly connected components.

use graphwalk_common::{CancellationToken, Result};
use graphwalk_core::{Edge, EdgeListGraph, GraphBase};

use super::{ComponentLabels, UnionFind};
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, VertexIndex};

/// Connected components of the graph with edge directions ignored.
///
/// Unions the endpoints of every edge in one [`UnionFind`], then numbers the
/// sets in the order their first vertex is enumerated.
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::{Algorithm, WeakComponents};
/// use graphwalk_core::{AdjacencyGraph, SEdge};
///
/// let graph = AdjacencyGraph::from_edges(true, [SEdge::new(1, 2), SEdge::new(3, 2), SEdge::new(4, 5)]);
/// let mut components = WeakComponents::new(&graph);
/// components.compute().unwrap();
/// assert_eq!(components.component_count(), 2);
/// assert_eq!(components.component_of(&3), Some(0));
/// ```
pub struct WeakComponents<'g, G: GraphBase> {
    graph: &'g G,
    lifecycle: AlgorithmLifecycle,
    labels: ComponentLabels<G::Vertex>,
}

impl<'g, G: EdgeListGraph> WeakComponents<'g, G> {
    /// Creates the computation over `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            lifecycle: AlgorithmLifecycle::new("WeakComponents"),
            labels: ComponentLabels::default(),
        }
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("WeakComponents", token);
        self
    }

    /// Component labels from the last run.
    pub fn labels(&self) -> &ComponentLabels<G::Vertex> {
        &self.labels
    }

    /// Number of components.
    pub fn component_count(&self) -> usize {
        self.labels.count()
    }

    /// Component number of `vertex`.
    pub fn component_of(&self, vertex: &G::Vertex) -> Option<usize> {
        self.labels.component_of(vertex)
    }

    fn label(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.labels = ComponentLabels::default();
        let index = VertexIndex::from_graph(self.graph);
        let mut sets = UnionFind::new();
        for vertex in index.iter() {
            sets.make_set(vertex.clone());
        }
        for edge in self.graph.edges() {
            if cancel.is_cancelling() {
                return Ok(());
            }
            sets.union(edge.source(), edge.target())?;
        }
        let ids = sets.set_ids();
        self.labels = ComponentLabels::new(index, ids, sets.set_count());
        Ok(())
    }
}

impl<G: EdgeListGraph> Algorithm for WeakComponents<'_, G> {
    fn compute(&mut self) -> Result<()> {
        let cancel = self.lifecycle.begin()?;
        let outcome = self.label(&cancel);
        self.lifecycle.end();
        outcome
    }

    fn lifecycle(&self) -> &AlgorithmLifecycle {
        &self.lifecycle
    }
}
