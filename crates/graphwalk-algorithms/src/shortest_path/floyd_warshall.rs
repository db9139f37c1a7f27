//! Floyd-Warshall all-pairs shortest paths.

use graphwalk_common::{CancellationToken, Error, Result};
use graphwalk_core::{Edge, EdgeListGraph, GraphBase};

use super::relaxer::{DistanceRelaxer, ShortestDistanceRelaxer};
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, VertexIndex};

/// How the best known `i -> j` path was obtained.
#[derive(Debug, Clone, PartialEq)]
enum Witness<E> {
    /// `i == j`, the empty path.
    Identity,
    /// A single edge.
    Edge(E),
    /// Through an intermediate vertex.
    Via(usize),
}

#[derive(Debug, Clone)]
struct Cell<E> {
    distance: f64,
    witness: Witness<E>,
}

/// All-pairs shortest paths over a dense `|V| x |V|` table.
///
/// Each cell keeps its best distance and a witness: the direct edge, or the
/// intermediate vertex through which the best combination was found. Paths
/// are rebuilt by expanding witnesses. A diagonal cell that ends up better
/// than the empty path means a negative cycle, and the run fails with
/// [`Error::NegativeCycle`].
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::{Algorithm, FloydWarshall};
/// use graphwalk_core::{AdjacencyGraph, TaggedEdge};
///
/// let graph = AdjacencyGraph::from_edges(
///     true,
///     [TaggedEdge::new('a', 'b', 2u32), TaggedEdge::new('b', 'c', 3u32)],
/// );
/// let mut apsp = FloydWarshall::new(&graph, |e: &TaggedEdge<char, u32>| f64::from(*e.tag()));
/// apsp.compute().unwrap();
/// assert_eq!(apsp.distance(&'a', &'c'), Some(5.0));
/// assert_eq!(apsp.distance(&'c', &'a'), None);
/// ```
pub struct FloydWarshall<'g, G: GraphBase, W, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    weights: W,
    relaxer: R,
    lifecycle: AlgorithmLifecycle,
    index: VertexIndex<G::Vertex>,
    cells: Vec<Option<Cell<G::Edge>>>,
}

impl<'g, G, W> FloydWarshall<'g, G, W>
where
    G: EdgeListGraph,
    W: Fn(&G::Edge) -> f64,
{
    /// Creates a computation over `graph` with edge weights from `weights`.
    pub fn new(graph: &'g G, weights: W) -> Self {
        Self {
            graph,
            weights,
            relaxer: ShortestDistanceRelaxer,
            lifecycle: AlgorithmLifecycle::new("FloydWarshall"),
            index: VertexIndex::default(),
            cells: Vec::new(),
        }
    }
}

impl<'g, G, W, R> FloydWarshall<'g, G, W, R>
where
    G: EdgeListGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("FloydWarshall", token);
        self
    }

    /// Replaces the distance relaxer.
    #[must_use]
    pub fn with_relaxer<R2: DistanceRelaxer>(self, relaxer: R2) -> FloydWarshall<'g, G, W, R2> {
        FloydWarshall {
            graph: self.graph,
            weights: self.weights,
            relaxer,
            lifecycle: self.lifecycle,
            index: self.index,
            cells: self.cells,
        }
    }

    #[inline]
    fn cell(&self, i: usize, j: usize) -> Option<&Cell<G::Edge>> {
        self.cells[i * self.index.len() + j].as_ref()
    }

    /// Best distance from `source` to `target`, or `None` if there is no path
    /// or either vertex is unknown.
    pub fn distance(&self, source: &G::Vertex, target: &G::Vertex) -> Option<f64> {
        let i = self.index.index_of(source)?;
        let j = self.index.index_of(target)?;
        self.cell(i, j).map(|c| c.distance)
    }

    /// Edges of a best path from `source` to `target`, in walking order.
    ///
    /// `Some(vec![])` when `source == target`; `None` when there is no path.
    pub fn path(&self, source: &G::Vertex, target: &G::Vertex) -> Option<Vec<G::Edge>> {
        let i = self.index.index_of(source)?;
        let j = self.index.index_of(target)?;
        self.cell(i, j)?;

        let limit = self.index.len() * self.index.len();
        let mut path = Vec::new();
        let mut pending = vec![(i, j)];
        let mut steps = 0;
        while let Some((a, b)) = pending.pop() {
            steps += 1;
            if steps > limit {
                return None;
            }
            match &self.cell(a, b)?.witness {
                Witness::Identity => {}
                Witness::Edge(edge) => path.push(edge.clone()),
                Witness::Via(k) => {
                    pending.push((*k, b));
                    pending.push((a, *k));
                }
            }
        }
        Some(path)
    }

    /// Every connected ordered pair with its distance, the diagonal included.
    pub fn pairs(&self) -> impl Iterator<Item = (&G::Vertex, &G::Vertex, f64)> + '_ {
        let n = self.index.len();
        self.cells.iter().enumerate().filter_map(move |(pos, cell)| {
            cell.as_ref().map(|c| {
                (
                    self.index.vertex(pos / n),
                    self.index.vertex(pos % n),
                    c.distance,
                )
            })
        })
    }

    /// Vertices in table order.
    pub fn vertices(&self) -> impl Iterator<Item = &G::Vertex> {
        self.index.iter()
    }

    fn offer(&mut self, i: usize, j: usize, distance: f64, witness: Witness<G::Edge>) {
        let n = self.index.len();
        let slot = &mut self.cells[i * n + j];
        let improves = match slot {
            None => true,
            Some(current) => self.relaxer.is_better(distance, current.distance),
        };
        if improves {
            *slot = Some(Cell { distance, witness });
        }
    }

    fn solve(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.index = VertexIndex::from_graph(self.graph);
        let n = self.index.len();
        self.cells.clear();
        self.cells.resize(n * n, None);

        let zero = self.relaxer.source_distance();
        for i in 0..n {
            self.cells[i * n + i] = Some(Cell {
                distance: zero,
                witness: Witness::Identity,
            });
        }

        let directed = self.graph.is_directed();
        for edge in self.graph.edges() {
            let s = self.index.require(edge.source())?;
            let t = self.index.require(edge.target())?;
            let distance = self.relaxer.combine(zero, (self.weights)(edge));
            self.offer(s, t, distance, Witness::Edge(edge.clone()));
            if !directed && s != t {
                self.offer(t, s, distance, Witness::Edge(edge.clone()));
            }
        }

        for k in 0..n {
            for i in 0..n {
                if cancel.is_cancelling() {
                    return Ok(());
                }
                let Some(ik) = self.cell(i, k).map(|c| c.distance) else {
                    continue;
                };
                for j in 0..n {
                    if let Some(kj) = self.cell(k, j).map(|c| c.distance) {
                        let candidate = self.relaxer.combine(ik, kj);
                        self.offer(i, j, candidate, Witness::Via(k));
                    }
                }
            }
        }

        for i in 0..n {
            if let Some(cell) = self.cell(i, i) {
                if self.relaxer.is_better(cell.distance, zero) {
                    return Err(Error::NegativeCycle);
                }
            }
        }
        Ok(())
    }
}

impl<G, W, R> Algorithm for FloydWarshall<'_, G, W, R>
where
    G: EdgeListGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
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
