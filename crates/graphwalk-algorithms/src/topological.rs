//! Topological ordering of directed acyclic graphs.
//!
//! [`TopologicalSort`] lists vertices in reverse depth-first finish order
//! and fails on the first back edge. [`SourceFirstTopologicalSort`] peels
//! off vertices whose remaining in-degree is zero (Kahn's algorithm), so
//! sources come first and ties keep enumeration order.

use std::collections::VecDeque;

use graphwalk_common::{CancellationToken, Error, Result};
use graphwalk_core::{Edge, GraphBase, VertexListGraph};

use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, Color, EdgeVisit, VertexIndex};
use crate::traversal::DfsVisitor;
use crate::traversal::dfs::depth_first_search;

struct FinishCollector<'a, V> {
    index: &'a VertexIndex<V>,
    finished: Vec<usize>,
}

impl<V, E> DfsVisitor<V, E> for FinishCollector<'_, V>
where
    V: Clone + Eq + std::hash::Hash,
{
    fn back_edge(&mut self, _edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Err(Error::NonAcyclicGraph)
    }

    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        if let Some(i) = self.index.index_of(vertex) {
            self.finished.push(i);
        }
        Ok(())
    }
}

/// Vertex indices in topological order, optionally restricted to the part
/// reachable from `root`.
///
/// A cancelled run returns the partial order found so far.
pub(crate) fn topological_order<G: VertexListGraph>(
    graph: &G,
    index: &VertexIndex<G::Vertex>,
    root: Option<usize>,
    cancel: &CancellationToken,
) -> Result<Vec<usize>> {
    if !graph.is_directed() {
        return Err(Error::invalid_operation(
            "topological order requires a directed graph",
        ));
    }
    let mut collector = FinishCollector {
        index,
        finished: Vec::with_capacity(index.len()),
    };
    let mut colors: Vec<Color> = Vec::new();
    depth_first_search(graph, index, &mut colors, root, &mut collector, cancel)?;
    collector.finished.reverse();
    Ok(collector.finished)
}

/// Depth-first topological sort.
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::{Algorithm, TopologicalSort};
/// use graphwalk_core::{AdjacencyGraph, SEdge};
///
/// let graph = AdjacencyGraph::from_edges(true, [SEdge::new("shirt", "tie"), SEdge::new("tie", "jacket")]);
/// let mut sort = TopologicalSort::new(&graph);
/// sort.compute().unwrap();
/// assert_eq!(sort.order(), ["shirt", "tie", "jacket"]);
/// ```
pub struct TopologicalSort<'g, G: GraphBase> {
    graph: &'g G,
    lifecycle: AlgorithmLifecycle,
    order: Vec<G::Vertex>,
}

impl<'g, G: VertexListGraph> TopologicalSort<'g, G> {
    /// Creates a sort over `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            lifecycle: AlgorithmLifecycle::new("TopologicalSort"),
            order: Vec::new(),
        }
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("TopologicalSort", token);
        self
    }

    /// The order computed by the last run.
    pub fn order(&self) -> &[G::Vertex] {
        &self.order
    }

    /// Consumes the sort and returns the order.
    pub fn into_order(self) -> Vec<G::Vertex> {
        self.order
    }

    fn sort(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.order.clear();
        let index = VertexIndex::from_graph(self.graph);
        let order = topological_order(self.graph, &index, None, cancel)?;
        self.order = order.into_iter().map(|i| index.vertex(i).clone()).collect();
        Ok(())
    }
}

impl<G: VertexListGraph> Algorithm for TopologicalSort<'_, G> {
    fn compute(&mut self) -> Result<()> {
        let cancel = self.lifecycle.begin()?;
        let outcome = self.sort(&cancel);
        self.lifecycle.end();
        outcome
    }

    fn lifecycle(&self) -> &AlgorithmLifecycle {
        &self.lifecycle
    }
}

/// Kahn's algorithm: repeatedly emits a vertex with no remaining in-edges.
///
/// Fails with [`Error::NonAcyclicGraph`] if vertices remain once no source
/// is left.
pub struct SourceFirstTopologicalSort<'g, G: GraphBase> {
    graph: &'g G,
    lifecycle: AlgorithmLifecycle,
    order: Vec<G::Vertex>,
}

impl<'g, G: VertexListGraph> SourceFirstTopologicalSort<'g, G> {
    /// Creates a sort over `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            lifecycle: AlgorithmLifecycle::new("SourceFirstTopologicalSort"),
            order: Vec::new(),
        }
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle =
            AlgorithmLifecycle::with_cancellation("SourceFirstTopologicalSort", token);
        self
    }

    /// The order computed by the last run.
    pub fn order(&self) -> &[G::Vertex] {
        &self.order
    }

    fn sort(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.order.clear();
        if !self.graph.is_directed() {
            return Err(Error::invalid_operation(
                "topological order requires a directed graph",
            ));
        }
        let index = VertexIndex::from_graph(self.graph);
        let mut in_degree = vec![0usize; index.len()];
        for vertex in index.iter() {
            for edge in self.graph.out_edges(vertex) {
                in_degree[index.require(edge.target())?] += 1;
            }
        }

        let mut ready: VecDeque<usize> = (0..index.len()).filter(|&i| in_degree[i] == 0).collect();
        while let Some(u) = ready.pop_front() {
            if cancel.is_cancelling() {
                return Ok(());
            }
            let vertex = index.vertex(u);
            self.order.push(vertex.clone());
            for edge in self.graph.out_edges(vertex) {
                let w = index.require(edge.target())?;
                in_degree[w] -= 1;
                if in_degree[w] == 0 {
                    ready.push_back(w);
                }
            }
        }

        if self.order.len() < index.len() {
            return Err(Error::NonAcyclicGraph);
        }
        Ok(())
    }
}

impl<G: VertexListGraph> Algorithm for SourceFirstTopologicalSort<'_, G> {
    fn compute(&mut self) -> Result<()> {
        let cancel = self.lifecycle.begin()?;
        let outcome = self.sort(&cancel);
        self.lifecycle.end();
        outcome
    }

    fn lifecycle(&self) -> &AlgorithmLifecycle {
        &self.lifecycle
    }
}

/// Returns true if the directed graph has no cycle.
pub fn is_dag<G: VertexListGraph>(graph: &G) -> bool {
    let index = VertexIndex::from_graph(graph);
    topological_order(graph, &index, None, &CancellationToken::new()).is_ok()
}

#[cfg(test)]
mod tests {
    use graphwalk_core::{AdjacencyGraph, SEdge};

    use super::*;

    fn position<V: PartialEq>(order: &[V], v: &V) -> usize {
        order.iter().position(|x| x == v).unwrap()
    }

    fn dag() -> AdjacencyGraph<u32, SEdge<u32>> {
        AdjacencyGraph::from_edges(
            true,
            [
                SEdge::new(5, 11),
                SEdge::new(7, 11),
                SEdge::new(7, 8),
                SEdge::new(3, 8),
                SEdge::new(3, 10),
                SEdge::new(11, 2),
                SEdge::new(11, 9),
                SEdge::new(11, 10),
                SEdge::new(8, 9),
            ],
        )
    }

    #[test]
    fn test_dfs_order_respects_edges() {
        let graph = dag();
        let mut sort = TopologicalSort::new(&graph);
        sort.compute().unwrap();
        let order = sort.order();
        assert_eq!(order.len(), 8);
        for (s, t) in [(5, 11), (7, 8), (11, 9), (8, 9), (3, 10)] {
            assert!(position(order, &s) < position(order, &t));
        }
    }

    #[test]
    fn test_kahn_order_respects_edges() {
        let graph = dag();
        let mut sort = SourceFirstTopologicalSort::new(&graph);
        sort.compute().unwrap();
        let order = sort.order();
        assert_eq!(&order[..3], &[5, 7, 3]);
        for (s, t) in [(11, 2), (11, 10), (8, 9)] {
            assert!(position(order, &s) < position(order, &t));
        }
    }

    #[test]
    fn test_cycle_fails() {
        let graph = AdjacencyGraph::from_edges(
            true,
            [SEdge::new('a', 'b'), SEdge::new('b', 'c'), SEdge::new('c', 'a')],
        );
        assert_eq!(TopologicalSort::new(&graph).compute(), Err(Error::NonAcyclicGraph));
        assert_eq!(
            SourceFirstTopologicalSort::new(&graph).compute(),
            Err(Error::NonAcyclicGraph)
        );
        assert!(!is_dag(&graph));
        assert!(is_dag(&dag()));
    }

    #[test]
    fn test_undirected_rejected() {
        let graph = AdjacencyGraph::from_edges(false, [SEdge::new(1, 2)]);
        assert!(matches!(
            TopologicalSort::new(&graph).compute(),
            Err(Error::InvalidOperation(_))
        ));
    }
}
