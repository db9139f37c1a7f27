//! Dijkstra's single-source shortest paths.
//!
//! Runs the breadth-first engine over a [`PriorityFrontier`] keyed by
//! tentative distance, relaxing on `tree_edge`, `gray_target`, and
//! `black_target`. [`AStar`](super::AStar) reuses the same driver with a
//! heuristic added to the key.

use std::fmt::Debug;
use std::hash::Hash;

use graphwalk_common::{CancellationToken, Error, Result};
use graphwalk_core::{GraphBase, VertexListGraph};

use super::relaxer::{DistanceMap, DistanceRelaxer, ShortestDistanceRelaxer, relax};
use super::{ShortestPathObserver, ShortestPaths};
use crate::frontier::PriorityFrontier;
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, Color, EdgeVisit, ObserverId, Observers, VertexIndex};
use crate::traversal::BfsVisitor;
use crate::traversal::bfs::{SearchDriver, breadth_first_search};

// ============================================================================
// Relaxing driver
// ============================================================================

/// Translates traversal events into relaxations and shortest-path events.
pub(crate) struct RelaxingDriver<'a, 'o, V, E, W: ?Sized, R: ?Sized> {
    pub(crate) index: &'a VertexIndex<V>,
    pub(crate) weights: &'a W,
    pub(crate) relaxer: &'a R,
    pub(crate) heuristic: Option<&'a dyn Fn(&V) -> f64>,
    pub(crate) goal: Option<usize>,
    pub(crate) distances: &'a mut DistanceMap,
    pub(crate) predecessors: &'a mut Vec<Option<(E, usize)>>,
    pub(crate) observers: &'a mut Observers<dyn ShortestPathObserver<V, E> + 'o>,
    pub(crate) done: bool,
}

impl<V, E, W, R> RelaxingDriver<'_, '_, V, E, W, R>
where
    V: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
    W: Fn(&E) -> f64 + ?Sized,
    R: DistanceRelaxer + ?Sized,
{
    fn relax_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        let (Some(s), Some(t)) = (self.index.index_of(edge.source), self.index.index_of(edge.target))
        else {
            return Ok(());
        };
        let weight = (self.weights)(edge.edge);
        if relax(self.relaxer, self.distances, s, t, weight) {
            self.predecessors[t] = Some((edge.edge.clone(), s));
            self.observers.edge_relaxed(edge)
        } else {
            self.observers.edge_not_relaxed(edge)
        }
    }
}

impl<V, E, W, R> BfsVisitor<V, E> for RelaxingDriver<'_, '_, V, E, W, R>
where
    V: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
    W: Fn(&E) -> f64 + ?Sized,
    R: DistanceRelaxer + ?Sized,
{
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.observers.initialize_vertex(vertex)
    }

    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        if let Some(i) = self.index.index_of(vertex) {
            self.distances.set(i, self.relaxer.source_distance());
            self.predecessors[i] = None;
        }
        self.observers.start_vertex(vertex)
    }

    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        self.observers.discover_vertex(vertex)
    }

    fn examine_vertex(&mut self, vertex: &V) -> Result<()> {
        self.observers.examine_vertex(vertex)
    }

    fn examine_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        let weight = (self.weights)(edge.edge);
        if weight < 0.0 || weight.is_nan() {
            return Err(Error::NegativeWeight {
                edge: format!("{:?}", edge.edge),
                weight,
            });
        }
        self.observers.examine_edge(edge)
    }

    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.relax_edge(edge)
    }

    fn gray_target(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.relax_edge(edge)
    }

    fn black_target(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.relax_edge(edge)
    }

    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        self.observers.finish_vertex(vertex)?;
        if self.goal.is_some() && self.goal == self.index.index_of(vertex) {
            self.done = true;
        }
        Ok(())
    }
}

impl<V, E, W, R> SearchDriver<V, E> for RelaxingDriver<'_, '_, V, E, W, R>
where
    V: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
    W: Fn(&E) -> f64 + ?Sized,
    R: DistanceRelaxer + ?Sized,
{
    fn key(&self, vertex: usize) -> f64 {
        let Some(distance) = self.distances.get(vertex) else {
            return f64::INFINITY;
        };
        let estimate = match self.heuristic {
            Some(h) => self.relaxer.combine(distance, h(self.index.vertex(vertex))),
            None => distance,
        };
        self.relaxer.priority(estimate)
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

// ============================================================================
// Dijkstra
// ============================================================================

/// Dijkstra's algorithm.
///
/// `W` maps an edge to its weight; every weight must be non-negative or
/// `compute` fails with [`Error::NegativeWeight`]. Without a root every
/// vertex not yet reached starts a new search tree at distance zero.
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::{Algorithm, Dijkstra};
/// use graphwalk_core::{AdjacencyGraph, TaggedEdge};
///
/// let graph = AdjacencyGraph::from_edges(
///     true,
///     [
///         TaggedEdge::new("a", "b", 1),
///         TaggedEdge::new("a", "c", 5),
///         TaggedEdge::new("b", "c", 1),
///     ],
/// );
/// let mut dijkstra =
///     Dijkstra::new(&graph, |e: &TaggedEdge<&str, u32>| f64::from(*e.tag())).with_root("a");
/// dijkstra.compute().unwrap();
///
/// assert_eq!(dijkstra.distance(&"c"), Some(2.0));
/// ```
pub struct Dijkstra<'g, G: GraphBase, W, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    weights: W,
    relaxer: R,
    root: Option<G::Vertex>,
    observers: Observers<dyn ShortestPathObserver<G::Vertex, G::Edge> + 'g>,
    lifecycle: AlgorithmLifecycle,
    frontier: PriorityFrontier,
    colors: Vec<Color>,
    paths: ShortestPaths<G::Vertex, G::Edge>,
}

impl<'g, G, W> Dijkstra<'g, G, W>
where
    G: VertexListGraph,
    W: Fn(&G::Edge) -> f64,
{
    /// Creates a search over `graph` with edge weights from `weights`.
    pub fn new(graph: &'g G, weights: W) -> Self {
        Self {
            graph,
            weights,
            relaxer: ShortestDistanceRelaxer,
            root: None,
            observers: Observers::new(),
            lifecycle: AlgorithmLifecycle::new("Dijkstra"),
            frontier: PriorityFrontier::new(),
            colors: Vec::new(),
            paths: ShortestPaths::default(),
        }
    }
}

impl<'g, G, W, R> Dijkstra<'g, G, W, R>
where
    G: VertexListGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    /// Sets the source vertex.
    #[must_use]
    pub fn with_root(mut self, root: G::Vertex) -> Self {
        self.root = Some(root);
        self
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("Dijkstra", token);
        self
    }

    /// Replaces the distance relaxer.
    #[must_use]
    pub fn with_relaxer<R2: DistanceRelaxer>(self, relaxer: R2) -> Dijkstra<'g, G, W, R2> {
        Dijkstra {
            graph: self.graph,
            weights: self.weights,
            relaxer,
            root: self.root,
            observers: self.observers,
            lifecycle: self.lifecycle,
            frontier: self.frontier,
            colors: self.colors,
            paths: self.paths,
        }
    }

    /// Sets or clears the source vertex.
    pub fn set_root(&mut self, root: Option<G::Vertex>) {
        self.root = root;
    }

    /// Attaches an observer; it receives events from every later `compute`.
    pub fn attach<O>(&mut self, observer: O) -> ObserverId
    where
        O: ShortestPathObserver<G::Vertex, G::Edge> + 'g,
    {
        self.observers.attach(Box::new(observer))
    }

    /// Detaches an observer.
    pub fn detach(
        &mut self,
        id: ObserverId,
    ) -> Option<Box<dyn ShortestPathObserver<G::Vertex, G::Edge> + 'g>> {
        self.observers.detach(id)
    }

    /// Results of the last computation.
    pub fn paths(&self) -> &ShortestPaths<G::Vertex, G::Edge> {
        &self.paths
    }

    /// Distance of `vertex`, or `None` if it was not reached.
    pub fn distance(&self, vertex: &G::Vertex) -> Option<f64> {
        self.paths.distance(vertex)
    }

    /// The edge through which `vertex` was reached.
    pub fn predecessor(&self, vertex: &G::Vertex) -> Option<&G::Edge> {
        self.paths.predecessor(vertex)
    }

    /// Edges from the source to `vertex`.
    pub fn path_to(&self, vertex: &G::Vertex) -> Option<Vec<G::Edge>> {
        self.paths.path_to(vertex)
    }

    fn search(&mut self, cancel: &CancellationToken) -> Result<()> {
        let index = VertexIndex::from_graph(self.graph);
        let root = self.root.as_ref().map(|r| index.require(r)).transpose()?;
        self.paths.reset(index, self.relaxer.initial_distance());

        let mut driver = RelaxingDriver {
            index: &self.paths.index,
            weights: &self.weights,
            relaxer: &self.relaxer,
            heuristic: None,
            goal: None,
            distances: &mut self.paths.distances,
            predecessors: &mut self.paths.predecessors,
            observers: &mut self.observers,
            done: false,
        };
        breadth_first_search(
            self.graph,
            &self.paths.index,
            &mut self.colors,
            &mut self.frontier,
            root,
            &mut driver,
            cancel,
        )
    }
}

impl<G, W, R> Algorithm for Dijkstra<'_, G, W, R>
where
    G: VertexListGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    fn compute(&mut self) -> Result<()> {
        let cancel = self.lifecycle.begin()?;
        let outcome = self.search(&cancel);
        self.lifecycle.end();
        outcome
    }

    fn lifecycle(&self) -> &AlgorithmLifecycle {
        &self.lifecycle
    }
}

/// Shortest path from `source` to `target` as its length and edge list.
///
/// Returns `Ok(None)` when `target` is unreachable.
///
/// # Errors
///
/// Fails if either vertex is missing or a weight is negative.
pub fn dijkstra_path<G, W>(
    graph: &G,
    weights: W,
    source: &G::Vertex,
    target: &G::Vertex,
) -> Result<Option<(f64, Vec<G::Edge>)>>
where
    G: VertexListGraph,
    W: Fn(&G::Edge) -> f64,
{
    if !graph.contains_vertex(target) {
        return Err(Error::vertex_not_found(target));
    }
    let mut dijkstra = Dijkstra::new(graph, weights).with_root(source.clone());
    dijkstra.compute()?;
    Ok(dijkstra
        .distance(target)
        .zip(dijkstra.path_to(target)))
}
