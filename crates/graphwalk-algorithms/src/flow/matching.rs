//! Maximum bipartite matching by reduction to maximum flow.

use graphwalk_common::{CancellationToken, Result, WalkSet};
use graphwalk_core::{Edge, EdgeSet, GraphBase, MutableGraph, VertexListGraph};

use super::augmentor::{AugmentStrategy, GraphAugmentor};
use super::edmonds_karp::EdmondsKarp;
use super::reversed::ReversedEdgeAugmentor;
use crate::lifecycle::{AlgorithmLifecycle, ComputeState};
use crate::traits::Algorithm;

/// Maximum matching between two vertex partitions of a directed graph.
///
/// Edges are expected to run from `sources` to `sinks`. The run adds a super
/// source wired to every source and a super sink fed by every sink, pairs
/// all edges with reverse edges, and solves a unit-capacity maximum flow.
/// The original edges that carry flow form the matching. Everything added
/// to the graph is removed again before `compute` returns, reversed edges
/// first, also when the computation fails.
///
/// `make_edge(s, t)` builds every synthetic edge; it must return an edge
/// from `s` to `t` that the graph does not already contain.
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::{Algorithm, MaximumBipartiteMatching};
/// use graphwalk_core::{AdjacencyGraph, EdgeSet, SEdge};
///
/// let mut graph = AdjacencyGraph::from_edges(
///     true,
///     [SEdge::new(1, 3), SEdge::new(1, 4), SEdge::new(2, 3)],
/// );
/// let mut matching = MaximumBipartiteMatching::new(&mut graph, vec![1, 2], vec![3, 4], -1, -2, |s, t| {
///     SEdge::new(*s, *t)
/// });
/// matching.compute().unwrap();
/// assert_eq!(matching.matching_size(), 2);
/// drop(matching);
/// assert_eq!(graph.edge_count(), 3);
/// ```
pub struct MaximumBipartiteMatching<'g, G: GraphBase, F> {
    graph: &'g mut G,
    sources: Vec<G::Vertex>,
    sinks: Vec<G::Vertex>,
    super_source: G::Vertex,
    super_sink: G::Vertex,
    make_edge: F,
    lifecycle: AlgorithmLifecycle,
    matched: Vec<G::Edge>,
}

impl<'g, G, F> MaximumBipartiteMatching<'g, G, F>
where
    G: MutableGraph,
    F: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    /// Creates a matching between `sources` and `sinks`. `super_source` and
    /// `super_sink` must not be vertices of `graph`.
    pub fn new(
        graph: &'g mut G,
        sources: Vec<G::Vertex>,
        sinks: Vec<G::Vertex>,
        super_source: G::Vertex,
        super_sink: G::Vertex,
        make_edge: F,
    ) -> Self {
        Self {
            graph,
            sources,
            sinks,
            super_source,
            super_sink,
            make_edge,
            lifecycle: AlgorithmLifecycle::new("MaximumBipartiteMatching"),
            matched: Vec::new(),
        }
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("MaximumBipartiteMatching", token);
        self
    }

    /// Edges of the matching found by the last run.
    pub fn matched_edges(&self) -> &[G::Edge] {
        &self.matched
    }

    /// Number of matched pairs.
    pub fn matching_size(&self) -> usize {
        self.matched.len()
    }

    fn solve(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.matched.clear();

        let strategy = AugmentStrategy::Bipartite {
            sources: self.sources.clone(),
            sinks: self.sinks.clone(),
        };
        let mut augmentor = GraphAugmentor::new(self.super_source.clone(), self.super_sink.clone());
        augmentor.augment(&mut *self.graph, &strategy, &mut self.make_edge)?;

        let mut reverser = ReversedEdgeAugmentor::new();
        let make_edge = &mut self.make_edge;
        let outcome = match reverser.augment(&mut *self.graph, |e: &G::Edge| {
            make_edge(e.target(), e.source())
        }) {
            Ok(()) => saturated_edges(
                &*self.graph,
                &reverser,
                (self.sources.as_slice(), self.sinks.as_slice()),
                (&self.super_source, &self.super_sink),
                cancel,
            ),
            Err(err) => Err(err),
        };

        // Reversed edges may touch the super terminals; remove them first.
        let reversed_rollback = reverser.rollback(&mut *self.graph);
        let graph_rollback = augmentor.rollback(&mut *self.graph);
        let matched = outcome?;
        reversed_rollback?;
        graph_rollback?;
        self.matched = matched;
        Ok(())
    }
}

/// Runs the unit-capacity flow and returns the original partition edges
/// carrying flow.
fn saturated_edges<G>(
    graph: &G,
    reverser: &ReversedEdgeAugmentor<G::Edge>,
    (sources, sinks): (&[G::Vertex], &[G::Vertex]),
    (super_source, super_sink): (&G::Vertex, &G::Vertex),
    cancel: &CancellationToken,
) -> Result<Vec<G::Edge>>
where
    G: VertexListGraph + EdgeSet,
{
    let mut flow = EdmondsKarp::new(graph, |_: &G::Edge| 1.0, reverser)
        .with_source(super_source.clone())
        .with_sink(super_sink.clone())
        .with_cancellation(cancel.clone());
    flow.compute()?;
    if flow.state() == ComputeState::Aborted {
        // The inner run consumed the flag; raise it again for the caller.
        cancel.cancel();
        return Ok(Vec::new());
    }

    let left: WalkSet<&G::Vertex> = sources.iter().collect();
    let right: WalkSet<&G::Vertex> = sinks.iter().collect();
    Ok(graph
        .edges()
        .filter(|e| !reverser.is_added(e))
        .filter(|e| left.contains(e.source()) && right.contains(e.target()))
        .filter(|e| flow.flow(e).is_some_and(|f| f > 0.5))
        .cloned()
        .collect())
}

impl<G, F> Algorithm for MaximumBipartiteMatching<'_, G, F>
where
    G: MutableGraph,
    F: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn compute(&mut self) -> Result<()> {
        let cancel = self.lifecycle.begin()?;
        let outcome = self.solve(&cancel);
        self.lifecycle.end();
        outcome
    }

    fn lifecycle(&self) -> &AlgorithmLifecycle {
        &self.lifecycle
    }
}

#[cfg(test)]
mod tests {
    use graphwalk_common::Error;
    use graphwalk_core::{AdjacencyGraph, MutableEdgeSet, SEdge, VertexSet};

    use super::*;

    fn edge(s: &i32, t: &i32) -> SEdge<i32> {
        SEdge::new(*s, *t)
    }

    #[test]
    fn test_complete_bipartite() {
        let mut graph = AdjacencyGraph::directed();
        for s in [1, 2] {
            for t in [3, 4, 5] {
                graph.add_vertices_and_edge(SEdge::new(s, t)).unwrap();
            }
        }
        let mut matching =
            MaximumBipartiteMatching::new(&mut graph, vec![1, 2], vec![3, 4, 5], 0, 99, edge);
        matching.compute().unwrap();

        assert_eq!(matching.matching_size(), 2);
        let lefts: WalkSet<i32> = matching.matched_edges().iter().map(|e| *e.source()).collect();
        let rights: WalkSet<i32> = matching.matched_edges().iter().map(|e| *e.target()).collect();
        assert_eq!(lefts.len(), 2);
        assert_eq!(rights.len(), 2);
        assert_eq!(matching.state(), ComputeState::Finished);
        drop(matching);

        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn test_augmenting_path_reroutes() {
        // Greedy 1-3 would block 2; the flow reroutes 1 to 4.
        let mut graph = AdjacencyGraph::from_edges(
            true,
            [SEdge::new(1, 3), SEdge::new(1, 4), SEdge::new(2, 3)],
        );
        let mut matching =
            MaximumBipartiteMatching::new(&mut graph, vec![1, 2], vec![3, 4], 0, 99, edge);
        matching.compute().unwrap();
        let mut pairs: Vec<(i32, i32)> = matching
            .matched_edges()
            .iter()
            .map(|e| (*e.source(), *e.target()))
            .collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(1, 4), (2, 3)]);
    }

    #[test]
    fn test_failure_restores_graph() {
        let mut graph = AdjacencyGraph::from_edges(true, [SEdge::new(1, 3)]);
        let mut matching = MaximumBipartiteMatching::new(&mut graph, vec![1], vec![7], 0, 99, edge);
        assert!(matches!(matching.compute(), Err(Error::VertexNotFound(_))));
        drop(matching);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        let mut clash = MaximumBipartiteMatching::new(&mut graph, vec![1], vec![3], 1, 99, edge);
        assert!(matches!(clash.compute(), Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_rerun_gives_same_matching() {
        let mut graph = AdjacencyGraph::from_edges(true, [SEdge::new(1, 2)]);
        let mut matching = MaximumBipartiteMatching::new(&mut graph, vec![1], vec![2], 0, 99, edge);
        matching.compute().unwrap();
        matching.compute().unwrap();
        assert_eq!(matching.matched_edges(), &[SEdge::new(1, 2)]);
    }
}
