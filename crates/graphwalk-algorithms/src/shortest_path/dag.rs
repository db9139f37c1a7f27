//! Shortest (or critical) paths on directed acyclic graphs.

use graphwalk_common::{CancellationToken, Result};
use graphwalk_core::{Edge, GraphBase, VertexListGraph};

use super::relaxer::{DistanceRelaxer, ShortestDistanceRelaxer, relax};
use super::{ShortestPathObserver, ShortestPaths};
use crate::lifecycle::AlgorithmLifecycle;
use crate::topological::topological_order;
use crate::traits::{Algorithm, EdgeVisit, ObserverId, Observers, VertexIndex};

/// Single-pass relaxation in topological order.
///
/// Weights may be negative. With a root only the vertices reachable from it
/// are considered; without one, every vertex still unreached when its turn
/// comes becomes a source. Pair it with
/// [`CriticalDistanceRelaxer`](super::CriticalDistanceRelaxer) to get
/// longest (critical) paths.
///
/// Fails with [`graphwalk_common::Error::NonAcyclicGraph`] on a cycle.
pub struct DagShortestPath<'g, G: GraphBase, W, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    weights: W,
    relaxer: R,
    root: Option<G::Vertex>,
    observers: Observers<dyn ShortestPathObserver<G::Vertex, G::Edge> + 'g>,
    lifecycle: AlgorithmLifecycle,
    paths: ShortestPaths<G::Vertex, G::Edge>,
}

impl<'g, G, W> DagShortestPath<'g, G, W>
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
            lifecycle: AlgorithmLifecycle::new("DagShortestPath"),
            paths: ShortestPaths::default(),
        }
    }
}

impl<'g, G, W, R> DagShortestPath<'g, G, W, R>
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
        self.lifecycle = AlgorithmLifecycle::with_cancellation("DagShortestPath", token);
        self
    }

    /// Replaces the distance relaxer.
    #[must_use]
    pub fn with_relaxer<R2: DistanceRelaxer>(self, relaxer: R2) -> DagShortestPath<'g, G, W, R2> {
        DagShortestPath {
            graph: self.graph,
            weights: self.weights,
            relaxer,
            root: self.root,
            observers: self.observers,
            lifecycle: self.lifecycle,
            paths: self.paths,
        }
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

    /// Edges from the source to `vertex`.
    pub fn path_to(&self, vertex: &G::Vertex) -> Option<Vec<G::Edge>> {
        self.paths.path_to(vertex)
    }

    fn search(&mut self, cancel: &CancellationToken) -> Result<()> {
        let index = VertexIndex::from_graph(self.graph);
        let root = self.root.as_ref().map(|r| index.require(r)).transpose()?;
        let order = topological_order(self.graph, &index, root, cancel)?;
        self.paths.reset(index, self.relaxer.initial_distance());

        let paths = &mut self.paths;
        for vertex in paths.index.iter() {
            self.observers.initialize_vertex(vertex)?;
        }

        for u in order {
            if cancel.is_cancelling() {
                return Ok(());
            }
            let source = paths.index.vertex(u);
            if !paths.distances.is_reached(u) {
                paths.distances.set(u, self.relaxer.source_distance());
                self.observers.start_vertex(source)?;
                self.observers.discover_vertex(source)?;
            }
            self.observers.examine_vertex(source)?;

            for edge in self.graph.out_edges(source) {
                if cancel.is_cancelling() {
                    return Ok(());
                }
                let target = edge.target();
                let t = paths.index.require(target)?;
                let visit = EdgeVisit {
                    edge,
                    source,
                    target,
                    reversed: false,
                };
                self.observers.examine_edge(visit)?;

                let first_reach = !paths.distances.is_reached(t);
                if relax(
                    &self.relaxer,
                    &mut paths.distances,
                    u,
                    t,
                    (self.weights)(edge),
                ) {
                    paths.predecessors[t] = Some((edge.clone(), u));
                    if first_reach {
                        self.observers.discover_vertex(target)?;
                    }
                    self.observers.edge_relaxed(visit)?;
                } else {
                    self.observers.edge_not_relaxed(visit)?;
                }
            }
            self.observers.finish_vertex(source)?;
        }
        Ok(())
    }
}

impl<G, W, R> Algorithm for DagShortestPath<'_, G, W, R>
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
