//! Edmonds-Karp maximum flow.

use graphwalk_common::{CancellationToken, Error, Result, WalkMap};
use graphwalk_core::{Edge, EdgeSet, GraphBase, MutableGraph, VertexListGraph};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::residual::{AugmentingPathFinder, ResidualGraph, ResidualNetwork};
use super::reversed::ReversedEdgeAugmentor;
use crate::frontier::FifoFrontier;
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, Color, VertexIndex};
use crate::traversal::bfs::breadth_first_search;

/// Maximum flow by shortest augmenting paths.
///
/// The graph must be directed and already paired by a
/// [`ReversedEdgeAugmentor`]: every edge needs its reverse partner so that
/// pushing flow along one gives residual capacity to the other. Edges the
/// augmentor synthesized have zero capacity regardless of `capacities`.
///
/// Each round breadth-first searches the residual graph from the source;
/// when the sink is reached the bottleneck of the path is pushed along it.
/// The run ends when the sink is unreachable. The vertices reached by that
/// last search form the source side of a minimum cut.
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::{Algorithm, EdmondsKarp, ReversedEdgeAugmentor};
/// use graphwalk_core::{AdjacencyGraph, Edge, TaggedEdge};
///
/// let mut graph = AdjacencyGraph::from_edges(
///     true,
///     [TaggedEdge::new('s', 'a', 3u32), TaggedEdge::new('a', 't', 2u32), TaggedEdge::new('s', 't', 1u32)],
/// );
/// let mut reverser = ReversedEdgeAugmentor::new();
/// reverser.augment(&mut graph, |e| TaggedEdge::new(*e.target(), *e.source(), 0)).unwrap();
///
/// let mut flow = EdmondsKarp::new(&graph, |e: &TaggedEdge<char, u32>| f64::from(*e.tag()), &reverser)
///     .with_source('s')
///     .with_sink('t');
/// flow.compute().unwrap();
/// assert_eq!(flow.max_flow(), 3.0);
/// ```
pub struct EdmondsKarp<'g, G: GraphBase, C> {
    graph: &'g G,
    capacities: C,
    reversed: &'g ReversedEdgeAugmentor<G::Edge>,
    source: Option<G::Vertex>,
    sink: Option<G::Vertex>,
    lifecycle: AlgorithmLifecycle,
    index: VertexIndex<G::Vertex>,
    network: ResidualNetwork<G::Edge>,
    colors: Vec<Color>,
    frontier: FifoFrontier,
    source_side: Vec<bool>,
    max_flow: f64,
    augmentations: usize,
}

impl<'g, G, C> EdmondsKarp<'g, G, C>
where
    G: VertexListGraph + EdgeSet,
    C: Fn(&G::Edge) -> f64,
{
    /// Creates a computation over `graph`, paired by `reversed`.
    pub fn new(graph: &'g G, capacities: C, reversed: &'g ReversedEdgeAugmentor<G::Edge>) -> Self {
        Self {
            graph,
            capacities,
            reversed,
            source: None,
            sink: None,
            lifecycle: AlgorithmLifecycle::new("EdmondsKarp"),
            index: VertexIndex::default(),
            network: ResidualNetwork::default(),
            colors: Vec::new(),
            frontier: FifoFrontier::new(),
            source_side: Vec::new(),
            max_flow: 0.0,
            augmentations: 0,
        }
    }

    /// Sets the flow source.
    #[must_use]
    pub fn with_source(mut self, source: G::Vertex) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the flow sink.
    #[must_use]
    pub fn with_sink(mut self, sink: G::Vertex) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("EdmondsKarp", token);
        self
    }

    /// Value of the flow found by the last run.
    pub fn max_flow(&self) -> f64 {
        self.max_flow
    }

    /// Number of augmenting paths used by the last run.
    pub fn augmenting_paths(&self) -> usize {
        self.augmentations
    }

    /// Net flow on `edge`; negative on the reverse side of a pushed edge.
    pub fn flow(&self, edge: &G::Edge) -> Option<f64> {
        self.network.slot(edge).map(|s| self.network.flow(s))
    }

    /// Remaining capacity of `edge`.
    pub fn residual_capacity(&self, edge: &G::Edge) -> Option<f64> {
        self.network.slot(edge).map(|s| self.network.residual(s))
    }

    /// Remaining capacity of every edge.
    pub fn residual_capacities(&self) -> WalkMap<G::Edge, f64> {
        self.network
            .iter()
            .map(|(edge, slot)| (edge.clone(), self.network.residual(slot)))
            .collect()
    }

    /// Vertices reachable from the source in the final residual graph.
    pub fn min_cut_source_side(&self) -> Vec<&G::Vertex> {
        self.index
            .iter()
            .zip(&self.source_side)
            .filter_map(|(v, &reached)| reached.then_some(v))
            .collect()
    }

    /// Edges leaving the source side of the minimum cut. Their capacities
    /// add up to the maximum flow.
    pub fn min_cut_edges(&self) -> Vec<&G::Edge> {
        let side = |v: &G::Vertex| {
            self.index
                .index_of(v)
                .and_then(|i| self.source_side.get(i).copied())
                .unwrap_or(false)
        };
        self.network
            .iter()
            .filter(|&(edge, slot)| {
                self.network.capacity(slot) > 0.0 && side(edge.source()) && !side(edge.target())
            })
            .map(|(edge, _)| edge)
            .collect()
    }

    fn solve(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.max_flow = 0.0;
        self.augmentations = 0;
        self.source_side.clear();

        if !self.graph.is_directed() {
            return Err(Error::invalid_operation("maximum flow requires a directed graph"));
        }
        let source = self.source.as_ref().ok_or(Error::MissingTerminal("source"))?;
        let sink = self.sink.as_ref().ok_or(Error::MissingTerminal("sink"))?;
        self.index = VertexIndex::from_graph(self.graph);
        let s = self.index.require(source)?;
        let t = self.index.require(sink)?;
        if s == t {
            return Err(Error::invalid_operation("source and sink are the same vertex"));
        }

        let mut entries = Vec::new();
        for edge in self.graph.edges() {
            let partner = self.reversed.reversed(edge).ok_or_else(|| {
                Error::invalid_operation(format!(
                    "edge {edge:?} has no reverse partner; run ReversedEdgeAugmentor first"
                ))
            })?;
            let capacity = if self.reversed.is_added(edge) {
                0.0
            } else {
                (self.capacities)(edge)
            };
            entries.push((edge, capacity, partner));
        }
        self.network = ResidualNetwork::build(entries)?;

        loop {
            if cancel.is_cancelling() {
                return Ok(());
            }
            let via = {
                let residual = ResidualGraph::new(self.graph, &self.network);
                let mut finder = AugmentingPathFinder::new(&self.index, &self.network, t);
                breadth_first_search(
                    &residual,
                    &self.index,
                    &mut self.colors,
                    &mut self.frontier,
                    Some(s),
                    &mut finder,
                    cancel,
                )?;
                if !finder.found {
                    break;
                }
                finder.via
            };

            let mut path: SmallVec<[usize; 16]> = SmallVec::new();
            let mut at = t;
            while at != s {
                let Some(slot) = via[at] else {
                    return Err(Error::invalid_operation("augmenting path is broken"));
                };
                path.push(slot);
                at = self.index.require(self.network.edge(slot).source())?;
            }
            let bottleneck = path
                .iter()
                .map(|&slot| self.network.residual(slot))
                .fold(f64::INFINITY, f64::min);
            for &slot in &path {
                self.network.push(slot, bottleneck);
            }
            self.augmentations += 1;
            trace!(bottleneck, length = path.len(), "augmenting path");
        }

        self.source_side = self.colors.iter().map(|&c| c != Color::White).collect();
        self.max_flow = self
            .graph
            .out_edges(source)
            .filter_map(|edge| self.network.slot(edge))
            .map(|slot| self.network.flow(slot))
            .sum();
        debug!(
            max_flow = self.max_flow,
            augmenting_paths = self.augmentations,
            "maximum flow computed"
        );
        Ok(())
    }
}

impl<G, C> Algorithm for EdmondsKarp<'_, G, C>
where
    G: VertexListGraph + EdgeSet,
    C: Fn(&G::Edge) -> f64,
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

/// Computes the maximum flow value from `source` to `sink`.
///
/// Pairs the graph with reverse edges made by `make_reversed`, runs
/// [`EdmondsKarp`], and rolls the pairing back before returning, also when
/// the computation fails.
pub fn maximum_flow<G, C>(
    graph: &mut G,
    capacities: C,
    source: G::Vertex,
    sink: G::Vertex,
    make_reversed: impl FnMut(&G::Edge) -> G::Edge,
) -> Result<f64>
where
    G: MutableGraph,
    C: Fn(&G::Edge) -> f64,
{
    let mut reverser = ReversedEdgeAugmentor::new();
    reverser.augment(graph, make_reversed)?;
    let outcome = {
        let mut flow = EdmondsKarp::new(&*graph, capacities, &reverser)
            .with_source(source)
            .with_sink(sink);
        flow.compute().map(|()| flow.max_flow())
    };
    reverser.rollback(graph)?;
    outcome
}
