//! Reusable result recorders.
//!
//! A recorder is attached to an algorithm as an observer and harvests one
//! kind of result. Clones share the same storage, so the usual pattern is to
//! attach a clone and query the original after `compute`:
//!
//! ```
//! use graphwalk_algorithms::{Algorithm, Dijkstra, PredecessorRecorder};
//! use graphwalk_core::{AdjacencyGraph, TaggedEdge};
//!
//! let graph = AdjacencyGraph::from_edges(
//!     true,
//!     [TaggedEdge::new('a', 'b', 2), TaggedEdge::new('b', 'c', 1)],
//! );
//! let recorder = PredecessorRecorder::new();
//! let mut dijkstra = Dijkstra::new(&graph, |e: &TaggedEdge<char, u32>| f64::from(*e.tag())).with_root('a');
//! dijkstra.attach(recorder.clone());
//! dijkstra.compute().unwrap();
//!
//! assert_eq!(recorder.path_to(&'c').unwrap().len(), 2);
//! ```
//!
//! Every recorder forgets what it knew about a vertex when that vertex is
//! initialized, so a recorder can stay attached across runs.

use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

use graphwalk_common::{Result, WalkMap, WalkSet};

use crate::shortest_path::ShortestPathObserver;
use crate::traits::EdgeVisit;
use crate::traversal::{BfsVisitor, DfsVisitor};

// ============================================================================
// Predecessors
// ============================================================================

#[derive(Debug)]
struct PredecessorState<V, E> {
    parents: WalkMap<V, (E, V)>,
    roots: WalkSet<V>,
}

impl<V, E> Default for PredecessorState<V, E> {
    fn default() -> Self {
        Self {
            parents: WalkMap::default(),
            roots: WalkSet::default(),
        }
    }
}

/// Records the tree edge (or last relaxed edge) that reached each vertex.
#[derive(Debug)]
pub struct PredecessorRecorder<V, E> {
    inner: Rc<RefCell<PredecessorState<V, E>>>,
}

impl<V, E> Clone for PredecessorRecorder<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V, E> Default for PredecessorRecorder<V, E> {
    fn default() -> Self {
        Self {
            inner: Rc::default(),
        }
    }
}

impl<V: Clone + Eq + Hash, E: Clone> PredecessorRecorder<V, E> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The edge through which `vertex` was reached.
    pub fn predecessor(&self, vertex: &V) -> Option<E> {
        self.inner
            .borrow()
            .parents
            .get(vertex)
            .map(|(edge, _)| edge.clone())
    }

    /// The vertex `vertex` was reached from.
    pub fn parent(&self, vertex: &V) -> Option<V> {
        self.inner
            .borrow()
            .parents
            .get(vertex)
            .map(|(_, parent)| parent.clone())
    }

    /// Number of vertices with a recorded predecessor.
    pub fn len(&self) -> usize {
        self.inner.borrow().parents.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().parents.is_empty()
    }

    /// Edges from the search root to `vertex`, in walking order.
    ///
    /// A root yields an empty path; a vertex that was never reached yields
    /// `None`.
    pub fn path_to(&self, vertex: &V) -> Option<Vec<E>> {
        let state = self.inner.borrow();
        let mut path = Vec::new();
        let mut current = vertex.clone();
        // A chain longer than the map means a cycle; refuse it.
        while path.len() <= state.parents.len() {
            if state.roots.contains(&current) {
                path.reverse();
                return Some(path);
            }
            let (edge, parent) = state.parents.get(&current)?;
            path.push(edge.clone());
            current = parent.clone();
        }
        None
    }

    fn reset(&self, vertex: &V) {
        let mut state = self.inner.borrow_mut();
        state.parents.remove(vertex);
        state.roots.remove(vertex);
    }

    fn root(&self, vertex: &V) {
        self.inner.borrow_mut().roots.insert(vertex.clone());
    }

    fn record(&self, edge: EdgeVisit<'_, V, E>) {
        self.inner
            .borrow_mut()
            .parents
            .insert(edge.target.clone(), (edge.edge.clone(), edge.source.clone()));
    }
}

impl<V: Clone + Eq + Hash, E: Clone> BfsVisitor<V, E> for PredecessorRecorder<V, E> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.reset(vertex);
        Ok(())
    }

    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        self.root(vertex);
        Ok(())
    }

    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.record(edge);
        Ok(())
    }
}

impl<V: Clone + Eq + Hash, E: Clone> DfsVisitor<V, E> for PredecessorRecorder<V, E> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.reset(vertex);
        Ok(())
    }

    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        self.root(vertex);
        Ok(())
    }

    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.record(edge);
        Ok(())
    }
}

impl<V: Clone + Eq + Hash, E: Clone> ShortestPathObserver<V, E> for PredecessorRecorder<V, E> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.reset(vertex);
        Ok(())
    }

    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        self.root(vertex);
        Ok(())
    }

    fn edge_relaxed(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.record(edge);
        Ok(())
    }
}

// ============================================================================
// Distances
// ============================================================================

type WeightFn<E> = Rc<dyn Fn(&E) -> f64>;

/// Records the distance of each vertex from its root along tree edges.
///
/// With [`hops`](Self::hops) every edge counts 1; with
/// [`weighted`](Self::weighted) the supplied function gives the edge length.
pub struct VertexDistanceRecorder<V, E> {
    weight: WeightFn<E>,
    distances: Rc<RefCell<WalkMap<V, f64>>>,
}

impl<V, E> Clone for VertexDistanceRecorder<V, E> {
    fn clone(&self) -> Self {
        Self {
            weight: Rc::clone(&self.weight),
            distances: Rc::clone(&self.distances),
        }
    }
}

impl<V, E> std::fmt::Debug for VertexDistanceRecorder<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexDistanceRecorder")
            .field("recorded", &self.distances.borrow().len())
            .finish()
    }
}

impl<V: Clone + Eq + Hash, E: 'static> VertexDistanceRecorder<V, E> {
    /// Counts one unit per edge.
    pub fn hops() -> Self {
        Self::weighted(|_| 1.0)
    }

    /// Uses `weight` as the length of each edge.
    pub fn weighted(weight: impl Fn(&E) -> f64 + 'static) -> Self {
        Self {
            weight: Rc::new(weight),
            distances: Rc::default(),
        }
    }
}

impl<V: Clone + Eq + Hash, E> VertexDistanceRecorder<V, E> {
    /// Distance of `vertex`, if it was reached.
    pub fn distance(&self, vertex: &V) -> Option<f64> {
        self.distances.borrow().get(vertex).copied()
    }

    /// Snapshot of every recorded distance.
    pub fn distances(&self) -> WalkMap<V, f64> {
        self.distances.borrow().clone()
    }

    fn reset(&self, vertex: &V) {
        self.distances.borrow_mut().remove(vertex);
    }

    fn root(&self, vertex: &V) {
        self.distances.borrow_mut().insert(vertex.clone(), 0.0);
    }

    fn extend(&self, edge: EdgeVisit<'_, V, E>) {
        let mut distances = self.distances.borrow_mut();
        let base = distances.get(edge.source).copied().unwrap_or(0.0);
        distances.insert(edge.target.clone(), base + (self.weight)(edge.edge));
    }
}

impl<V: Clone + Eq + Hash, E> BfsVisitor<V, E> for VertexDistanceRecorder<V, E> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.reset(vertex);
        Ok(())
    }

    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        self.root(vertex);
        Ok(())
    }

    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.extend(edge);
        Ok(())
    }
}

impl<V: Clone + Eq + Hash, E> DfsVisitor<V, E> for VertexDistanceRecorder<V, E> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.reset(vertex);
        Ok(())
    }

    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        self.root(vertex);
        Ok(())
    }

    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.extend(edge);
        Ok(())
    }
}

// ============================================================================
// Edges
// ============================================================================

/// Records tree edges (or relaxed edges) in the order they occur.
#[derive(Debug)]
pub struct EdgeRecorder<E> {
    edges: Rc<RefCell<Vec<E>>>,
}

impl<E> Clone for EdgeRecorder<E> {
    fn clone(&self) -> Self {
        Self {
            edges: Rc::clone(&self.edges),
        }
    }
}

impl<E> Default for EdgeRecorder<E> {
    fn default() -> Self {
        Self {
            edges: Rc::default(),
        }
    }
}

impl<E: Clone> EdgeRecorder<E> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded edges.
    pub fn edges(&self) -> Vec<E> {
        self.edges.borrow().clone()
    }

    /// Number of recorded edges.
    pub fn len(&self) -> usize {
        self.edges.borrow().len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.edges.borrow().is_empty()
    }

    /// Forgets every recorded edge.
    pub fn clear(&self) {
        self.edges.borrow_mut().clear();
    }

    fn push(&self, edge: &E) {
        self.edges.borrow_mut().push(edge.clone());
    }
}

impl<V, E: Clone> BfsVisitor<V, E> for EdgeRecorder<E> {
    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.push(edge.edge);
        Ok(())
    }
}

impl<V, E: Clone> DfsVisitor<V, E> for EdgeRecorder<E> {
    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.push(edge.edge);
        Ok(())
    }
}

impl<V, E: Clone> ShortestPathObserver<V, E> for EdgeRecorder<E> {
    fn edge_relaxed(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.push(edge.edge);
        Ok(())
    }
}

// ============================================================================
// Time stamps
// ============================================================================

#[derive(Debug)]
struct TimeState<V> {
    clock: usize,
    discovered: WalkMap<V, usize>,
    finished: WalkMap<V, usize>,
}

impl<V> Default for TimeState<V> {
    fn default() -> Self {
        Self {
            clock: 0,
            discovered: WalkMap::default(),
            finished: WalkMap::default(),
        }
    }
}

/// Records discover and finish times on a shared clock.
///
/// The clock ticks once per event, so for a depth-first search the
/// intervals `[discover, finish]` of any two vertices are either nested or
/// disjoint.
#[derive(Debug)]
pub struct TimeStampRecorder<V> {
    inner: Rc<RefCell<TimeState<V>>>,
}

impl<V> Clone for TimeStampRecorder<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V> Default for TimeStampRecorder<V> {
    fn default() -> Self {
        Self {
            inner: Rc::default(),
        }
    }
}

impl<V: Clone + Eq + Hash> TimeStampRecorder<V> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// When `vertex` was discovered.
    pub fn discover_time(&self, vertex: &V) -> Option<usize> {
        self.inner.borrow().discovered.get(vertex).copied()
    }

    /// When `vertex` was finished.
    pub fn finish_time(&self, vertex: &V) -> Option<usize> {
        self.inner.borrow().finished.get(vertex).copied()
    }

    fn reset(&self, vertex: &V) {
        let mut state = self.inner.borrow_mut();
        state.clock = 0;
        state.discovered.remove(vertex);
        state.finished.remove(vertex);
    }

    fn discover(&self, vertex: &V) {
        let mut state = self.inner.borrow_mut();
        let time = state.clock;
        state.clock += 1;
        state.discovered.insert(vertex.clone(), time);
    }

    fn finish(&self, vertex: &V) {
        let mut state = self.inner.borrow_mut();
        let time = state.clock;
        state.clock += 1;
        state.finished.insert(vertex.clone(), time);
    }
}

impl<V: Clone + Eq + Hash, E> BfsVisitor<V, E> for TimeStampRecorder<V> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.reset(vertex);
        Ok(())
    }

    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        self.discover(vertex);
        Ok(())
    }

    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        self.finish(vertex);
        Ok(())
    }
}

impl<V: Clone + Eq + Hash, E> DfsVisitor<V, E> for TimeStampRecorder<V> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.reset(vertex);
        Ok(())
    }

    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        self.discover(vertex);
        Ok(())
    }

    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        self.finish(vertex);
        Ok(())
    }
}
