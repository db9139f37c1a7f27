//! Breadth-first traversal.
//!
//! The engine is parameterized by its [`Frontier`]. With the default FIFO
//! queue it is plain BFS; the shortest-path algorithms run the same engine
//! over a keyed heap and relax distances from the `tree_edge`,
//! `gray_target`, and `black_target` events.

use graphwalk_common::{CancellationToken, Result, WalkSet};
use graphwalk_core::{Edge, GraphBase, Incidence, VertexListGraph};

use super::visitor::BfsVisitor;
use crate::frontier::{FifoFrontier, Frontier};
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, Color, EdgeVisit, ObserverId, Observers, VertexIndex};

/// A [`BfsVisitor`] that also steers the engine.
///
/// `key` is the frontier priority of a vertex. The engine compares the key
/// before and after `gray_target` / `black_target` and re-keys or reopens the
/// target when it dropped. `is_done` is checked after each finished vertex.
pub(crate) trait SearchDriver<V, E>: BfsVisitor<V, E> {
    fn key(&self, _vertex: usize) -> f64 {
        0.0
    }

    fn is_done(&self) -> bool {
        false
    }
}

impl<V, E> SearchDriver<V, E> for Observers<dyn BfsVisitor<V, E> + '_> {}

/// Resolves the far endpoint of an out-edge of `from` and its orientation.
pub(crate) fn far_end<'e, V, E>(directed: bool, edge: &'e E, from: &V) -> (&'e V, bool)
where
    V: PartialEq,
    E: Edge<V>,
{
    if directed || edge.source() == from {
        (edge.target(), false)
    } else {
        (edge.source(), true)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Runs a breadth-first traversal from `root`, or over every White vertex in
/// index order when `root` is `None`.
///
/// Returns early, without error, when `cancel` is flagged.
pub(crate) fn breadth_first_search<G, F, D>(
    graph: &G,
    index: &VertexIndex<G::Vertex>,
    colors: &mut Vec<Color>,
    frontier: &mut F,
    root: Option<usize>,
    driver: &mut D,
    cancel: &CancellationToken,
) -> Result<()>
where
    G: Incidence,
    F: Frontier,
    D: SearchDriver<G::Vertex, G::Edge> + ?Sized,
{
    colors.clear();
    colors.resize(index.len(), Color::White);
    frontier.clear();
    for vertex in index.iter() {
        driver.initialize_vertex(vertex)?;
    }

    let mut examined = WalkSet::default();
    let roots: Box<dyn Iterator<Item = usize>> = match root {
        Some(root) => Box::new(std::iter::once(root)),
        None => Box::new(0..index.len()),
    };
    for start in roots {
        if cancel.is_cancelling() || driver.is_done() {
            break;
        }
        if colors[start] != Color::White {
            continue;
        }
        visit(
            graph,
            index,
            colors,
            frontier,
            start,
            driver,
            cancel,
            &mut examined,
        )?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn visit<G, F, D>(
    graph: &G,
    index: &VertexIndex<G::Vertex>,
    colors: &mut [Color],
    frontier: &mut F,
    start: usize,
    driver: &mut D,
    cancel: &CancellationToken,
    examined: &mut WalkSet<G::Edge>,
) -> Result<()>
where
    G: Incidence,
    F: Frontier,
    D: SearchDriver<G::Vertex, G::Edge> + ?Sized,
{
    let directed = graph.is_directed();
    let root = index.vertex(start);
    driver.start_vertex(root)?;
    colors[start] = Color::Gray;
    driver.discover_vertex(root)?;
    frontier.push(start, driver.key(start));

    while let Some(u) = frontier.pop() {
        if cancel.is_cancelling() {
            return Ok(());
        }
        let source = index.vertex(u);
        driver.examine_vertex(source)?;

        for edge in graph.out_edges(source) {
            if cancel.is_cancelling() {
                return Ok(());
            }
            // Undirected edges show up at both endpoints; classify once.
            if !directed && !examined.insert(edge.clone()) {
                continue;
            }
            let (target, reversed) = far_end(directed, edge, source);
            let w = index.require(target)?;
            let visit = EdgeVisit {
                edge,
                source,
                target,
                reversed,
            };

            driver.examine_edge(visit)?;
            match colors[w] {
                Color::White => {
                    driver.tree_edge(visit)?;
                    colors[w] = Color::Gray;
                    driver.discover_vertex(target)?;
                    frontier.push(w, driver.key(w));
                }
                Color::Gray => {
                    driver.non_tree_edge(visit)?;
                    let before = driver.key(w);
                    driver.gray_target(visit)?;
                    let after = driver.key(w);
                    if after < before {
                        frontier.update(w, after);
                    }
                }
                Color::Black => {
                    driver.non_tree_edge(visit)?;
                    let before = driver.key(w);
                    driver.black_target(visit)?;
                    let after = driver.key(w);
                    if after < before {
                        colors[w] = Color::Gray;
                        frontier.push(w, after);
                    }
                }
            }
        }

        colors[u] = Color::Black;
        driver.finish_vertex(source)?;
        if driver.is_done() {
            return Ok(());
        }
    }
    Ok(())
}

// ============================================================================
// Algorithm
// ============================================================================

/// Breadth-first search with attachable observers.
///
/// Without a root the search covers the whole vertex set, starting a new
/// tree at each vertex still White, in enumeration order.
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::{Algorithm, BreadthFirstSearch, PredecessorRecorder};
/// use graphwalk_core::{AdjacencyGraph, SEdge};
///
/// let graph = AdjacencyGraph::from_edges(true, [SEdge::new(1, 2), SEdge::new(2, 3)]);
/// let recorder = PredecessorRecorder::new();
///
/// let mut search = BreadthFirstSearch::new(&graph).with_root(1);
/// search.attach(recorder.clone());
/// search.compute().unwrap();
///
/// assert_eq!(recorder.path_to(&3).map(|p| p.len()), Some(2));
/// ```
pub struct BreadthFirstSearch<'g, G: GraphBase, F = FifoFrontier> {
    graph: &'g G,
    root: Option<G::Vertex>,
    frontier: F,
    observers: Observers<dyn BfsVisitor<G::Vertex, G::Edge> + 'g>,
    lifecycle: AlgorithmLifecycle,
    index: VertexIndex<G::Vertex>,
    colors: Vec<Color>,
}

impl<'g, G: VertexListGraph> BreadthFirstSearch<'g, G> {
    /// Creates a search over `graph` with a FIFO frontier.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            root: None,
            frontier: FifoFrontier::new(),
            observers: Observers::new(),
            lifecycle: AlgorithmLifecycle::new("BreadthFirstSearch"),
            index: VertexIndex::default(),
            colors: Vec::new(),
        }
    }
}

impl<'g, G: VertexListGraph, F: Frontier> BreadthFirstSearch<'g, G, F> {
    /// Sets the start vertex.
    #[must_use]
    pub fn with_root(mut self, root: G::Vertex) -> Self {
        self.root = Some(root);
        self
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("BreadthFirstSearch", token);
        self
    }

    /// Replaces the frontier container.
    #[must_use]
    pub fn with_frontier<F2: Frontier>(self, frontier: F2) -> BreadthFirstSearch<'g, G, F2> {
        BreadthFirstSearch {
            graph: self.graph,
            root: self.root,
            frontier,
            observers: self.observers,
            lifecycle: self.lifecycle,
            index: self.index,
            colors: self.colors,
        }
    }

    /// Sets or clears the start vertex.
    pub fn set_root(&mut self, root: Option<G::Vertex>) {
        self.root = root;
    }

    /// The start vertex, if any.
    pub fn root(&self) -> Option<&G::Vertex> {
        self.root.as_ref()
    }

    /// Attaches an observer; it receives events from every later `compute`.
    pub fn attach<O>(&mut self, observer: O) -> ObserverId
    where
        O: BfsVisitor<G::Vertex, G::Edge> + 'g,
    {
        self.observers.attach(Box::new(observer))
    }

    /// Detaches an observer.
    pub fn detach(
        &mut self,
        id: ObserverId,
    ) -> Option<Box<dyn BfsVisitor<G::Vertex, G::Edge> + 'g>> {
        self.observers.detach(id)
    }

    /// Color of `vertex` after the last computation.
    pub fn vertex_color(&self, vertex: &G::Vertex) -> Option<Color> {
        self.index
            .index_of(vertex)
            .and_then(|i| self.colors.get(i).copied())
    }

    fn search(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.index = VertexIndex::from_graph(self.graph);
        let root = self
            .root
            .as_ref()
            .map(|r| self.index.require(r))
            .transpose()?;
        breadth_first_search(
            self.graph,
            &self.index,
            &mut self.colors,
            &mut self.frontier,
            root,
            &mut self.observers,
            cancel,
        )
    }
}

impl<G: VertexListGraph, F: Frontier> Algorithm for BreadthFirstSearch<'_, G, F> {
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

// ============================================================================
// Convenience functions
// ============================================================================

struct DiscoveryOrder<V> {
    order: Vec<V>,
}

impl<V: Clone, E> BfsVisitor<V, E> for DiscoveryOrder<V> {
    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        self.order.push(vertex.clone());
        Ok(())
    }
}

impl<V: Clone, E> SearchDriver<V, E> for DiscoveryOrder<V> {}

/// Vertices reachable from `start`, in breadth-first discovery order.
///
/// # Errors
///
/// Returns [`graphwalk_common::Error::VertexNotFound`] if `start` is not in the graph.
pub fn bfs<G: VertexListGraph>(graph: &G, start: &G::Vertex) -> Result<Vec<G::Vertex>> {
    let index = VertexIndex::from_graph(graph);
    let root = index.require(start)?;
    let mut visitor = DiscoveryOrder { order: Vec::new() };
    breadth_first_search(
        graph,
        &index,
        &mut Vec::new(),
        &mut FifoFrontier::new(),
        Some(root),
        &mut visitor,
        &CancellationToken::new(),
    )?;
    Ok(visitor.order)
}

struct LayerBuilder<'a, V> {
    index: &'a VertexIndex<V>,
    hops: Vec<usize>,
    layers: Vec<Vec<usize>>,
}

impl<V: Clone + Eq + std::hash::Hash, E> BfsVisitor<V, E> for LayerBuilder<'_, V> {
    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        let (Some(from), Some(to)) = (
            self.index.index_of(edge.source),
            self.index.index_of(edge.target),
        ) else {
            return Ok(());
        };
        let depth = self.hops[from] + 1;
        self.hops[to] = depth;
        if self.layers.len() <= depth {
            self.layers.push(Vec::new());
        }
        self.layers[depth].push(to);
        Ok(())
    }
}

impl<V: Clone + Eq + std::hash::Hash, E> SearchDriver<V, E> for LayerBuilder<'_, V> {}

/// Vertices grouped by hop distance from `start`: `result[i]` holds the
/// vertices exactly `i` edges away.
///
/// # Errors
///
/// Returns [`graphwalk_common::Error::VertexNotFound`] if `start` is not in the graph.
pub fn bfs_layers<G: VertexListGraph>(graph: &G, start: &G::Vertex) -> Result<Vec<Vec<G::Vertex>>> {
    let index = VertexIndex::from_graph(graph);
    let root = index.require(start)?;
    let mut visitor = LayerBuilder {
        index: &index,
        hops: vec![0; index.len()],
        layers: vec![vec![root]],
    };
    breadth_first_search(
        graph,
        &index,
        &mut Vec::new(),
        &mut FifoFrontier::new(),
        Some(root),
        &mut visitor,
        &CancellationToken::new(),
    )?;
    let layers = visitor
        .layers
        .into_iter()
        .map(|layer| layer.into_iter().map(|i| index.vertex(i).clone()).collect())
        .collect();
    Ok(layers)
}

struct TargetSearch<'a, V> {
    target: &'a V,
    found: bool,
}

impl<V: PartialEq, E> BfsVisitor<V, E> for TargetSearch<'_, V> {
    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        self.found |= vertex == self.target;
        Ok(())
    }
}

impl<V: PartialEq, E> SearchDriver<V, E> for TargetSearch<'_, V> {
    fn is_done(&self) -> bool {
        self.found
    }
}

/// Returns true if `to` can be reached from `from` along out-edges.
///
/// Stops as soon as `to` is discovered.
///
/// # Errors
///
/// Returns [`graphwalk_common::Error::VertexNotFound`] if either vertex is not in the graph.
pub fn is_reachable<G: VertexListGraph>(graph: &G, from: &G::Vertex, to: &G::Vertex) -> Result<bool> {
    let index = VertexIndex::from_graph(graph);
    let root = index.require(from)?;
    index.require(to)?;
    let mut search = TargetSearch {
        target: to,
        found: false,
    };
    breadth_first_search(
        graph,
        &index,
        &mut Vec::new(),
        &mut FifoFrontier::new(),
        Some(root),
        &mut search,
        &CancellationToken::new(),
    )?;
    Ok(search.found)
}
