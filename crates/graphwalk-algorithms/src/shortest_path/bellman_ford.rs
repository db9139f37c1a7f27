//! Bellman-Ford label-correcting shortest paths.

use graphwalk_common::{CancellationToken, Error, Result};
use graphwalk_core::{Edge, EdgeListGraph, GraphBase};

use super::relaxer::{DistanceRelaxer, ShortestDistanceRelaxer, relax};
use super::{ShortestPathObserver, ShortestPaths};
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, EdgeVisit, ObserverId, Observers, VertexIndex};

/// Single-source shortest paths that tolerate negative weights.
///
/// Runs up to `|V| - 1` passes over the edge list, stopping early once a
/// pass changes nothing, then makes one more pass: an edge that still
/// relaxes proves a negative cycle reachable from the root and the run fails
/// with [`Error::NegativeCycle`]. Undirected edges are relaxed in both
/// directions, so on an undirected graph any negative edge is a cycle.
pub struct BellmanFord<'g, G: GraphBase, W, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    weights: W,
    relaxer: R,
    root: Option<G::Vertex>,
    observers: Observers<dyn ShortestPathObserver<G::Vertex, G::Edge> + 'g>,
    lifecycle: AlgorithmLifecycle,
    paths: ShortestPaths<G::Vertex, G::Edge>,
    passes: usize,
}

impl<'g, G, W> BellmanFord<'g, G, W>
where
    G: EdgeListGraph,
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
            lifecycle: AlgorithmLifecycle::new("BellmanFord"),
            paths: ShortestPaths::default(),
            passes: 0,
        }
    }
}

impl<'g, G, W, R> BellmanFord<'g, G, W, R>
where
    G: EdgeListGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    /// Sets the source vertex. Required.
    #[must_use]
    pub fn with_root(mut self, root: G::Vertex) -> Self {
        self.root = Some(root);
        self
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("BellmanFord", token);
        self
    }

    /// Replaces the distance relaxer.
    #[must_use]
    pub fn with_relaxer<R2: DistanceRelaxer>(self, relaxer: R2) -> BellmanFord<'g, G, W, R2> {
        BellmanFord {
            graph: self.graph,
            weights: self.weights,
            relaxer,
            root: self.root,
            observers: self.observers,
            lifecycle: self.lifecycle,
            paths: self.paths,
            passes: self.passes,
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

    /// Edges from the root to `vertex`.
    pub fn path_to(&self, vertex: &G::Vertex) -> Option<Vec<G::Edge>> {
        self.paths.path_to(vertex)
    }

    /// Relaxation passes made by the last run, the check pass excluded.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// One sweep over every edge. Returns true if some distance changed.
    fn sweep(&mut self, cancel: &CancellationToken, report: bool) -> Result<bool> {
        let directed = self.graph.is_directed();
        let paths = &mut self.paths;
        let mut changed = false;

        for edge in self.graph.edges() {
            if cancel.is_cancelling() {
                return Ok(changed);
            }
            let weight = (self.weights)(edge);
            let (s, t) = (
                paths.index.require(edge.source())?,
                paths.index.require(edge.target())?,
            );

            if s == t {
                // Self-loops never relax, but a negative one is a cycle.
                if let Some(d) = paths.distances.get(s) {
                    if self.relaxer.is_better(self.relaxer.combine(d, weight), d) {
                        return Err(Error::NegativeCycle);
                    }
                }
                continue;
            }

            let orientations = [(s, t, false), (t, s, true)];
            let count = if directed { 1 } else { 2 };
            for &(from, to, reversed) in &orientations[..count] {
                let visit = EdgeVisit {
                    edge,
                    source: paths.index.vertex(from),
                    target: paths.index.vertex(to),
                    reversed,
                };
                if report {
                    self.observers.examine_edge(visit)?;
                }
                let first_reach = !paths.distances.is_reached(to);
                if relax(&self.relaxer, &mut paths.distances, from, to, weight) {
                    changed = true;
                    if !report {
                        return Err(Error::NegativeCycle);
                    }
                    paths.predecessors[to] = Some((edge.clone(), from));
                    if first_reach {
                        self.observers.discover_vertex(visit.target)?;
                    }
                    self.observers.edge_relaxed(visit)?;
                } else if report {
                    self.observers.edge_not_relaxed(visit)?;
                }
            }
        }
        Ok(changed)
    }

    fn search(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.passes = 0;
        let index = VertexIndex::from_graph(self.graph);
        let root = index.require(self.root.as_ref().ok_or(Error::MissingRoot)?)?;
        self.paths.reset(index, self.relaxer.initial_distance());

        for vertex in self.paths.index.iter() {
            self.observers.initialize_vertex(vertex)?;
        }
        self.paths
            .distances
            .set(root, self.relaxer.source_distance());
        let root_vertex = self.paths.index.vertex(root);
        self.observers.start_vertex(root_vertex)?;
        self.observers.discover_vertex(root_vertex)?;

        let limit = self.paths.index.len().saturating_sub(1);
        let mut converged = false;
        while self.passes < limit && !converged {
            if cancel.is_cancelling() {
                return Ok(());
            }
            self.passes += 1;
            converged = !self.sweep(cancel, true)?;
        }
        if converged || cancel.is_cancelling() {
            return Ok(());
        }
        self.sweep(cancel, false)?;
        Ok(())
    }
}

impl<G, W, R> Algorithm for BellmanFord<'_, G, W, R>
where
    G: EdgeListGraph,
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
