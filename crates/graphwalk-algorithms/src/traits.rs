//! Core traits and per-computation working state shared by all algorithms.

use std::fmt::Debug;
use std::hash::Hash;

use graphwalk_common::collections::walk_index_set_with_capacity;
use graphwalk_common::{Error, Result, WalkIndexSet};
use graphwalk_core::VertexSet;

use crate::lifecycle::{AbortHandle, AlgorithmLifecycle, ComputeState};

/// An algorithm bound to one input graph.
///
/// `compute` may be called repeatedly; each call resets the working state.
pub trait Algorithm {
    /// Runs the computation to completion or cancellation.
    fn compute(&mut self) -> Result<()>;

    /// The lifecycle state machine of this instance.
    fn lifecycle(&self) -> &AlgorithmLifecycle;

    /// Current lifecycle state.
    fn state(&self) -> ComputeState {
        self.lifecycle().state()
    }

    /// Requests cancellation of a running computation.
    fn abort(&self) {
        self.lifecycle().abort();
    }

    /// Handle that can abort this instance from an observer or another thread.
    fn abort_handle(&self) -> AbortHandle {
        self.lifecycle().abort_handle()
    }
}

/// Tri-state vertex marking used by every traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Not yet discovered.
    White,
    /// Discovered, still on the frontier or the DFS stack.
    Gray,
    /// Finished.
    Black,
}

/// Dense vertex numbering assigned at the start of a computation.
///
/// Working state (colors, distances, predecessors) lives in plain vectors
/// indexed by these numbers instead of hash maps keyed by vertex.
#[derive(Debug, Clone)]
pub struct VertexIndex<V> {
    vertices: WalkIndexSet<V>,
}

impl<V: Clone + Eq + Hash> VertexIndex<V> {
    /// Numbers the vertices of `graph` in enumeration order.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: VertexSet<Vertex = V>,
    {
        let mut vertices = walk_index_set_with_capacity(graph.vertex_count());
        vertices.extend(graph.vertices().cloned());
        Self { vertices }
    }

    /// Index of `vertex`, if it was part of the graph.
    #[inline]
    pub fn index_of(&self, vertex: &V) -> Option<usize> {
        self.vertices.get_index_of(vertex)
    }

    /// Index of `vertex`, or [`Error::VertexNotFound`].
    pub fn require(&self, vertex: &V) -> Result<usize>
    where
        V: Debug,
    {
        self.index_of(vertex)
            .ok_or_else(|| Error::vertex_not_found(vertex))
    }

    /// Vertex at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; indices always come from this map.
    #[inline]
    pub fn vertex(&self, index: usize) -> &V {
        &self.vertices[index]
    }

    /// Number of indexed vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the graph had no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over vertices in index order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }
}

impl<V> Default for VertexIndex<V> {
    fn default() -> Self {
        Self {
            vertices: WalkIndexSet::default(),
        }
    }
}

/// An edge as seen from the traversal.
///
/// `source` is the vertex the traversal came from and `target` the vertex it
/// reaches. For directed graphs these are the edge's own endpoints; for
/// undirected graphs the edge may be walked against its stored orientation,
/// which `reversed` reports.
#[derive(Debug)]
pub struct EdgeVisit<'a, V, E> {
    /// The edge itself.
    pub edge: &'a E,
    /// Vertex the traversal leaves.
    pub source: &'a V,
    /// Vertex the traversal enters.
    pub target: &'a V,
    /// True if the edge was walked from its stored target to its stored source.
    pub reversed: bool,
}

impl<V, E> Clone for EdgeVisit<'_, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, E> Copy for EdgeVisit<'_, V, E> {}

/// Handle returned by `attach`; pass it to `detach` to remove the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Ordered set of attached observers.
///
/// Events are delivered in attachment order, synchronously, and the first
/// error stops delivery and propagates out of the computation.
pub struct Observers<O: ?Sized> {
    next_id: u64,
    entries: Vec<(ObserverId, Box<O>)>,
}

impl<O: ?Sized> Observers<O> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Attaches an observer at the end of the delivery order.
    pub fn attach(&mut self, observer: Box<O>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Detaches an observer, returning it. `None` if the id is unknown.
    pub fn detach(&mut self, id: ObserverId) -> Option<Box<O>> {
        let pos = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(pos).1)
    }

    /// Number of attached observers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no observer is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls `f` on each observer in order, stopping at the first error.
    pub fn try_for_each(&mut self, mut f: impl FnMut(&mut O) -> Result<()>) -> Result<()> {
        for (_, observer) in &mut self.entries {
            f(observer)?;
        }
        Ok(())
    }
}

impl<O: ?Sized> Default for Observers<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ?Sized> std::fmt::Debug for Observers<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use graphwalk_core::{AdjacencyGraph, SEdge};

    use super::*;

    trait Named {
        fn name(&self) -> &'static str;
    }

    struct Fixed(&'static str);

    impl Named for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn test_vertex_index_follows_graph_order() {
        let graph = AdjacencyGraph::from_edges(true, [SEdge::new("b", "a"), SEdge::new("a", "c")]);
        let index = VertexIndex::from_graph(&graph);
        assert_eq!(index.len(), 3);
        assert_eq!(index.index_of(&"b"), Some(0));
        assert_eq!(*index.vertex(2), "c");
        assert!(matches!(index.require(&"z"), Err(Error::VertexNotFound(_))));
    }

    #[test]
    fn test_observers_attach_detach_order() {
        let mut observers: Observers<dyn Named> = Observers::new();
        let first = observers.attach(Box::new(Fixed("first")));
        observers.attach(Box::new(Fixed("second")));

        let mut seen = Vec::new();
        observers
            .try_for_each(|o| {
                seen.push(o.name());
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec!["first", "second"]);

        let removed = observers.detach(first).unwrap();
        assert_eq!(removed.name(), "first");
        assert!(observers.detach(first).is_none());
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn test_observer_error_stops_delivery() {
        let mut observers: Observers<dyn Named> = Observers::new();
        observers.attach(Box::new(Fixed("a")));
        observers.attach(Box::new(Fixed("b")));

        let mut calls = 0;
        let result = observers.try_for_each(|_| {
            calls += 1;
            Err(Error::NonAcyclicGraph)
        });
        assert_eq!(result, Err(Error::NonAcyclicGraph));
        assert_eq!(calls, 1);
    }
}
