//! Weak components maintained across graph mutations.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Weak};

use graphwalk_common::{Error, Result, WalkMap};
use graphwalk_core::{
    Edge, EdgeSet, GraphEvent, ListenerId, ListenerStatus, ObservableGraph, VertexSet,
};
use parking_lot::Mutex;

use super::UnionFind;

/// A long-lived [`UnionFind`] fed by a graph's mutation events.
///
/// [`attach`](Self::attach) seeds the forest with the graph's current
/// vertices and edges and subscribes to further changes. Additions cost one
/// `make_set` or `union`. Removals cannot be reflected in a disjoint-set
/// forest, so the tracker rejects them with [`Error::Unsupported`], which
/// vetoes the mutation and leaves graph and tracker consistent. `Cleared`
/// empties the forest.
///
/// The listener only holds a weak reference, and the tracker cannot reach
/// the graph from `Drop`. Call [`detach`](Self::detach) before dropping it
/// to unsubscribe right away. A tracker dropped without `detach` leaves its
/// listener registered (still counted by the graph) until the graph's next
/// mutation event; that event is accepted without effect and the listener
/// removes itself.
///
/// An addition vetoed by a listener registered after the tracker is taken
/// back out of the graph but stays in the forest.
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::IncrementalComponents;
/// use graphwalk_core::{AdjacencyGraph, MutableEdgeSet, SEdge};
///
/// let mut graph = AdjacencyGraph::from_edges(false, [SEdge::new(1, 2), SEdge::new(3, 4)]);
/// let mut tracker = IncrementalComponents::new();
/// tracker.attach(&mut graph).unwrap();
/// assert_eq!(tracker.component_count(), 2);
///
/// graph.add_edge(SEdge::new(2, 3)).unwrap();
/// assert_eq!(tracker.component_count(), 1);
/// ```
pub struct IncrementalComponents<V> {
    sets: Arc<Mutex<UnionFind<V>>>,
    listener: Option<ListenerId>,
}

impl<V> Default for IncrementalComponents<V> {
    fn default() -> Self {
        Self {
            sets: Arc::new(Mutex::new(UnionFind::default())),
            listener: None,
        }
    }
}

impl<V> Debug for IncrementalComponents<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalComponents")
            .field("attached", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

/// Applies one mutation event to the forest.
fn apply<V, E>(sets: &mut UnionFind<V>, event: &GraphEvent<V, E>) -> Result<()>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Debug,
{
    match event {
        GraphEvent::VertexAdded(vertex) => {
            sets.make_set(vertex.clone());
        }
        GraphEvent::EdgeAdded(edge) => {
            sets.make_set(edge.source().clone());
            sets.make_set(edge.target().clone());
            sets.union(edge.source(), edge.target())?;
        }
        GraphEvent::VertexRemoved(vertex) => {
            return Err(Error::Unsupported(format!(
                "incremental components cannot remove vertex {vertex:?}"
            )));
        }
        GraphEvent::EdgeRemoved(edge) => {
            return Err(Error::Unsupported(format!(
                "incremental components cannot remove edge {edge:?}"
            )));
        }
        GraphEvent::Cleared => sets.clear(),
    }
    Ok(())
}

impl<V> IncrementalComponents<V>
where
    V: Clone + Eq + Hash + Debug + 'static,
{
    /// Creates a detached tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while subscribed to a graph.
    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Seeds the forest from `graph` and subscribes to its mutations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if already attached.
    pub fn attach<G>(&mut self, graph: &mut G) -> Result<()>
    where
        G: ObservableGraph<Vertex = V> + VertexSet + EdgeSet,
        G::Edge: 'static,
    {
        if self.listener.is_some() {
            return Err(Error::invalid_operation(
                "incremental components already attached to a graph",
            ));
        }

        {
            let mut sets = self.sets.lock();
            sets.clear();
            for vertex in graph.vertices() {
                sets.make_set(vertex.clone());
            }
            for edge in graph.edges() {
                sets.union(edge.source(), edge.target())?;
            }
        }

        let weak: Weak<Mutex<UnionFind<V>>> = Arc::downgrade(&self.sets);
        let id = graph.subscribe(Box::new(move |event: &GraphEvent<V, G::Edge>| {
            let Some(sets) = weak.upgrade() else {
                return Ok(ListenerStatus::Detach);
            };
            apply(&mut sets.lock(), event)?;
            Ok(ListenerStatus::Keep)
        }));
        self.listener = Some(id);
        Ok(())
    }

    /// Unsubscribes from `graph`. Returns false if not attached to it.
    ///
    /// The forest keeps its last state.
    pub fn detach<G>(&mut self, graph: &mut G) -> bool
    where
        G: ObservableGraph<Vertex = V>,
    {
        match self.listener.take() {
            Some(id) => graph.unsubscribe(id),
            None => false,
        }
    }

    /// Number of components.
    pub fn component_count(&self) -> usize {
        self.sets.lock().set_count()
    }

    /// Number of tracked vertices.
    pub fn vertex_count(&self) -> usize {
        self.sets.lock().element_count()
    }

    /// Returns true if both vertices are tracked and connected.
    pub fn are_connected(&self, a: &V, b: &V) -> bool {
        self.sets.lock().are_in_same_set(a, b)
    }

    /// Representative vertex of the component holding `vertex`.
    pub fn representative(&self, vertex: &V) -> Option<V> {
        self.sets.lock().find_set(vertex).cloned()
    }

    /// Current component numbers, assigned in vertex insertion order.
    pub fn components(&self) -> WalkMap<V, usize> {
        let mut sets = self.sets.lock();
        let ids = sets.set_ids();
        sets.elements().cloned().zip(ids).collect()
    }
}

#[cfg(test)]
mod tests {
    use graphwalk_core::{AdjacencyGraph, MutableEdgeSet, MutableVertexSet, SEdge};

    use super::*;

    fn triangles() -> AdjacencyGraph<u32, SEdge<u32>> {
        AdjacencyGraph::from_edges(
            false,
            [
                SEdge::new(1, 2),
                SEdge::new(2, 3),
                SEdge::new(3, 1),
                SEdge::new(4, 5),
                SEdge::new(5, 6),
                SEdge::new(6, 4),
            ],
        )
    }

    #[test]
    fn test_tracks_additions() {
        let mut graph = triangles();
        let mut tracker = IncrementalComponents::new();
        tracker.attach(&mut graph).unwrap();
        assert_eq!(tracker.component_count(), 2);

        graph.add_vertex(7).unwrap();
        assert_eq!(tracker.component_count(), 3);
        graph.add_vertices_and_edge(SEdge::new(3, 4)).unwrap();
        assert_eq!(tracker.component_count(), 2);
        assert!(tracker.are_connected(&1, &6));
        assert!(!tracker.are_connected(&1, &7));
        assert_eq!(tracker.components().get(&7), Some(&1));
    }

    #[test]
    fn test_removal_is_vetoed() {
        let mut graph = triangles();
        let mut tracker = IncrementalComponents::new();
        tracker.attach(&mut graph).unwrap();

        assert!(matches!(
            graph.remove_edge(&SEdge::new(1, 2)),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            graph.remove_vertex(&5),
            Err(Error::Unsupported(_))
        ));
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(tracker.component_count(), 2);
    }

    #[test]
    fn test_clear_resets() {
        let mut graph = triangles();
        let mut tracker = IncrementalComponents::new();
        tracker.attach(&mut graph).unwrap();
        graph.clear().unwrap();
        assert_eq!(tracker.component_count(), 0);
        assert_eq!(tracker.vertex_count(), 0);
    }

    #[test]
    fn test_detach_and_drop() {
        let mut graph = triangles();
        let mut tracker = IncrementalComponents::new();
        tracker.attach(&mut graph).unwrap();
        assert!(matches!(
            tracker.attach(&mut graph),
            Err(Error::InvalidOperation(_))
        ));
        assert!(tracker.detach(&mut graph));
        assert!(!tracker.is_attached());
        assert_eq!(graph.listener_count(), 0);

        graph.add_vertices_and_edge(SEdge::new(1, 4)).unwrap();
        assert_eq!(tracker.component_count(), 2);

        let mut dropped = IncrementalComponents::new();
        dropped.attach(&mut graph).unwrap();
        drop(dropped);
        assert_eq!(graph.listener_count(), 1);
        graph.add_vertex(9).unwrap();
        assert_eq!(graph.listener_count(), 0);
    }
}
