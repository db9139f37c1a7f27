//! Insertion-ordered adjacency list graph.
//!
//! [`AdjacencyGraph`] is the reference container implementing every
//! capability trait. It is what tests, benches, and the CLI run algorithms
//! on; callers with their own storage implement the traits directly.
//!
//! Layout:
//! - vertices live in an [`indexmap`] keyed by vertex, so iteration follows
//!   insertion order and whole-graph traversals are reproducible
//! - directed graphs keep separate out- and in-edge lists per vertex
//! - undirected graphs keep one incidence list per vertex holding every
//!   edge touching it (a self-loop appears once)

use std::fmt::Debug;
use std::hash::Hash;

use graphwalk_common::{Result, WalkIndexMap};
use smallvec::SmallVec;

use super::edge::Edge;
use super::events::{GraphEvent, GraphListener, ListenerId, Listeners};
use super::traits::{
    BidirectionalIncidence, EdgeSet, GraphBase, Incidence, MutableEdgeSet, MutableVertexSet,
    ObservableGraph, VertexSet,
};

/// Edge lists of a single vertex.
#[derive(Debug, Clone)]
struct Adjacency<E> {
    /// Out-edges (directed) or incident edges (undirected).
    out_edges: Vec<E>,
    /// In-edges. Unused for undirected graphs.
    in_edges: Vec<E>,
}

impl<E> Adjacency<E> {
    fn new() -> Self {
        Self {
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }
    }
}

/// Removes the first element equal to `item`. Returns true if one was found.
fn remove_first<E: PartialEq>(list: &mut Vec<E>, item: &E) -> bool {
    match list.iter().position(|e| e == item) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

/// Removes the last element equal to `item`.
fn remove_last<E: PartialEq>(list: &mut Vec<E>, item: &E) {
    if let Some(pos) = list.iter().rposition(|e| e == item) {
        list.remove(pos);
    }
}

/// A mutable, observable adjacency list graph.
#[derive(Debug)]
pub struct AdjacencyGraph<V, E> {
    directed: bool,
    allow_parallel_edges: bool,
    vertices: WalkIndexMap<V, Adjacency<E>>,
    edge_count: usize,
    listeners: Listeners<V, E>,
}

impl<V, E> AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    /// Creates an empty directed graph that allows parallel edges.
    pub fn directed() -> Self {
        Self::with_direction(true)
    }

    /// Creates an empty undirected graph that allows parallel edges.
    pub fn undirected() -> Self {
        Self::with_direction(false)
    }

    fn with_direction(directed: bool) -> Self {
        Self {
            directed,
            allow_parallel_edges: true,
            vertices: WalkIndexMap::default(),
            edge_count: 0,
            listeners: Listeners::new(),
        }
    }

    /// Sets whether parallel edges are accepted.
    #[must_use]
    pub fn with_parallel_edges(mut self, allow: bool) -> Self {
        self.allow_parallel_edges = allow;
        self
    }

    /// Builds a graph from an edge list, adding endpoints as they appear.
    ///
    /// No listener can exist yet, so construction cannot fail.
    pub fn from_edges(directed: bool, edges: impl IntoIterator<Item = E>) -> Self {
        let mut graph = Self::with_direction(directed);
        for edge in edges {
            graph.insert_vertex(edge.source().clone());
            graph.insert_vertex(edge.target().clone());
            graph.insert_edge(edge);
        }
        graph
    }

    /// Like [`from_edges`](Self::from_edges), also adding isolated vertices
    /// first so they come before edge endpoints in iteration order.
    pub fn from_vertices_and_edges(
        directed: bool,
        vertices: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = E>,
    ) -> Self {
        let mut graph = Self::with_direction(directed);
        for vertex in vertices {
            graph.insert_vertex(vertex);
        }
        for edge in edges {
            graph.insert_vertex(edge.source().clone());
            graph.insert_vertex(edge.target().clone());
            graph.insert_edge(edge);
        }
        graph
    }

    /// Number of registered mutation listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn insert_vertex(&mut self, vertex: V) -> bool {
        if self.vertices.contains_key(&vertex) {
            return false;
        }
        self.vertices.insert(vertex, Adjacency::new());
        true
    }

    /// Inserts without notifying. Endpoints must exist.
    fn insert_edge(&mut self, edge: E) -> bool {
        let (source, target) = (edge.source(), edge.target());
        if !self.vertices.contains_key(source) || !self.vertices.contains_key(target) {
            return false;
        }
        if !self.allow_parallel_edges && self.has_edge_between(source, target) {
            return false;
        }

        let source = source.clone();
        let target = target.clone();
        if self.directed {
            if let Some(adj) = self.vertices.get_mut(&target) {
                adj.in_edges.push(edge.clone());
            }
        } else if source != target {
            if let Some(adj) = self.vertices.get_mut(&target) {
                adj.out_edges.push(edge.clone());
            }
        }
        if let Some(adj) = self.vertices.get_mut(&source) {
            adj.out_edges.push(edge);
        }
        self.edge_count += 1;
        true
    }

    fn has_edge_between(&self, source: &V, target: &V) -> bool {
        self.vertices.get(source).is_some_and(|adj| {
            adj.out_edges.iter().any(|e| {
                (e.source() == source && e.target() == target)
                    || (!self.directed && e.source() == target && e.target() == source)
            })
        })
    }

    /// Removes without notifying.
    fn detach_edge(&mut self, edge: &E) -> bool {
        let source = edge.source().clone();
        let target = edge.target().clone();
        let removed = self
            .vertices
            .get_mut(&source)
            .is_some_and(|adj| remove_first(&mut adj.out_edges, edge));
        if !removed {
            return false;
        }
        if let Some(adj) = self.vertices.get_mut(&target) {
            if self.directed {
                remove_first(&mut adj.in_edges, edge);
            } else if source != target {
                remove_first(&mut adj.out_edges, edge);
            }
        }
        self.edge_count -= 1;
        true
    }

    /// Reverts the most recent `insert_edge` of `edge`.
    fn undo_insert_edge(&mut self, edge: &E) {
        let source = edge.source().clone();
        let target = edge.target().clone();
        if let Some(adj) = self.vertices.get_mut(&source) {
            remove_last(&mut adj.out_edges, edge);
        }
        if let Some(adj) = self.vertices.get_mut(&target) {
            if self.directed {
                remove_last(&mut adj.in_edges, edge);
            } else if source != target {
                remove_last(&mut adj.out_edges, edge);
            }
        }
        self.edge_count -= 1;
    }

    /// Edges touching `vertex`, each listed once.
    fn incident_edges(&self, vertex: &V) -> SmallVec<[E; 8]> {
        let mut incident: SmallVec<[E; 8]> = SmallVec::new();
        if let Some(adj) = self.vertices.get(vertex) {
            incident.extend(adj.out_edges.iter().cloned());
            if self.directed {
                // Self-loops already came from the out-list.
                incident.extend(
                    adj.in_edges
                        .iter()
                        .filter(|e| e.source() != vertex)
                        .cloned(),
                );
            }
        }
        incident
    }
}

impl<V, E> GraphBase for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V, E> VertexSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    fn vertices(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.vertices.keys())
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(vertex)
    }
}

impl<V, E> EdgeSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    fn edges(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        // Every edge sits in its source's out-list exactly once.
        Box::new(self.vertices.iter().flat_map(|(vertex, adj)| {
            adj.out_edges.iter().filter(move |e| e.source() == vertex)
        }))
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.vertices
            .get(edge.source())
            .is_some_and(|adj| adj.out_edges.contains(edge))
    }
}

impl<V, E> Incidence for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    fn out_edges(&self, vertex: &V) -> Box<dyn Iterator<Item = &E> + '_> {
        match self.vertices.get(vertex) {
            Some(adj) => Box::new(adj.out_edges.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn out_degree(&self, vertex: &V) -> usize {
        self.vertices.get(vertex).map_or(0, |adj| adj.out_edges.len())
    }

    fn out_edge(&self, vertex: &V, index: usize) -> Option<&E> {
        self.vertices.get(vertex)?.out_edges.get(index)
    }
}

impl<V, E> BidirectionalIncidence for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    fn in_edges(&self, vertex: &V) -> Box<dyn Iterator<Item = &E> + '_> {
        match self.vertices.get(vertex) {
            Some(adj) if self.directed => Box::new(adj.in_edges.iter()),
            Some(adj) => Box::new(adj.out_edges.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn in_degree(&self, vertex: &V) -> usize {
        self.vertices.get(vertex).map_or(0, |adj| {
            if self.directed {
                adj.in_edges.len()
            } else {
                adj.out_edges.len()
            }
        })
    }

    fn in_edge(&self, vertex: &V, index: usize) -> Option<&E> {
        let adj = self.vertices.get(vertex)?;
        if self.directed {
            adj.in_edges.get(index)
        } else {
            adj.out_edges.get(index)
        }
    }
}

impl<V, E> MutableVertexSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    fn add_vertex(&mut self, vertex: V) -> Result<bool> {
        if !self.insert_vertex(vertex.clone()) {
            return Ok(false);
        }
        if let Err(err) = self.listeners.notify(&GraphEvent::VertexAdded(vertex.clone())) {
            self.vertices.shift_remove(&vertex);
            return Err(err);
        }
        Ok(true)
    }

    fn remove_vertex(&mut self, vertex: &V) -> Result<bool> {
        if !self.vertices.contains_key(vertex) {
            return Ok(false);
        }
        let incident = self.incident_edges(vertex);

        // Every listener must accept every event before anything changes.
        self.listeners
            .notify(&GraphEvent::VertexRemoved(vertex.clone()))?;
        for edge in &incident {
            self.listeners.notify(&GraphEvent::EdgeRemoved(edge.clone()))?;
        }

        for edge in &incident {
            self.detach_edge(edge);
        }
        self.vertices.shift_remove(vertex);
        Ok(true)
    }

    fn clear(&mut self) -> Result<()> {
        self.listeners.notify(&GraphEvent::Cleared)?;
        self.vertices.clear();
        self.edge_count = 0;
        Ok(())
    }
}

impl<V, E> MutableEdgeSet for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    fn add_edge(&mut self, edge: E) -> Result<bool> {
        if !self.insert_edge(edge.clone()) {
            return Ok(false);
        }
        if let Err(err) = self.listeners.notify(&GraphEvent::EdgeAdded(edge.clone())) {
            self.undo_insert_edge(&edge);
            return Err(err);
        }
        Ok(true)
    }

    fn add_vertices_and_edge(&mut self, edge: E) -> Result<bool> {
        let source = edge.source().clone();
        let target = edge.target().clone();
        let mut added = SmallVec::<[V; 2]>::new();

        let outcome = (|| {
            if self.add_vertex(source.clone())? {
                added.push(source);
            }
            if self.add_vertex(target.clone())? {
                added.push(target);
            }
            self.add_edge(edge)
        })();
        if outcome.is_err() {
            for vertex in added.iter().rev() {
                self.vertices.shift_remove(vertex);
            }
        }
        outcome
    }

    fn remove_edge(&mut self, edge: &E) -> Result<bool> {
        if !self.contains_edge(edge) {
            return Ok(false);
        }
        self.listeners.notify(&GraphEvent::EdgeRemoved(edge.clone()))?;
        Ok(self.detach_edge(edge))
    }
}

impl<V, E> ObservableGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + Eq + Hash + Debug,
{
    fn subscribe(&mut self, listener: GraphListener<V, E>) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use graphwalk_common::Error;
    use proptest::prelude::*;

    use super::*;
    use crate::graph::events::ListenerStatus;
    use crate::graph::{SEdge, TaggedEdge};

    fn diamond() -> AdjacencyGraph<&'static str, SEdge<&'static str>> {
        AdjacencyGraph::from_edges(
            true,
            [
                SEdge::new("A", "B"),
                SEdge::new("A", "C"),
                SEdge::new("B", "D"),
                SEdge::new("C", "D"),
            ],
        )
    }

    #[test]
    fn test_directed_incidence() {
        let g = diamond();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.out_degree(&"A"), 2);
        assert_eq!(g.in_degree(&"D"), 2);
        assert_eq!(g.in_degree(&"A"), 0);
        assert_eq!(g.out_edge(&"A", 1), Some(&SEdge::new("A", "C")));
        assert!(g.out_edge(&"A", 2).is_none());
        assert_eq!(g.find_edge(&"B", &"D"), Some(&SEdge::new("B", "D")));
        assert!(g.find_edge(&"D", &"B").is_none());
    }

    #[test]
    fn test_vertices_keep_insertion_order() {
        let g = diamond();
        let order: Vec<_> = g.vertices().copied().collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
        assert_eq!(g.edges().count(), 4);
    }

    #[test]
    fn test_undirected_incidence() {
        let g = AdjacencyGraph::from_edges(false, [SEdge::new(1, 2), SEdge::new(2, 3)]);
        assert_eq!(g.out_degree(&2), 2);
        assert_eq!(g.in_degree(&2), 2);
        assert_eq!(g.edges().count(), 2);
        assert!(g.find_edge(&2, &1).is_some());
    }

    #[test]
    fn test_undirected_self_loop_listed_once() {
        let g = AdjacencyGraph::from_edges(false, [SEdge::new(1, 1)]);
        assert_eq!(g.out_degree(&1), 1);
        assert_eq!(g.edges().count(), 1);
    }

    #[test]
    fn test_add_edge_requires_endpoints() {
        let mut g: AdjacencyGraph<u32, SEdge<u32>> = AdjacencyGraph::directed();
        assert!(!g.add_edge(SEdge::new(1, 2)).unwrap());
        assert_eq!(g.edge_count(), 0);

        assert!(g.add_vertices_and_edge(SEdge::new(1, 2)).unwrap());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_parallel_edges_policy() {
        let mut strict: AdjacencyGraph<u32, TaggedEdge<u32, u8>> =
            AdjacencyGraph::directed().with_parallel_edges(false);
        assert!(strict.add_vertices_and_edge(TaggedEdge::new(1, 2, 0)).unwrap());
        assert!(!strict.add_vertices_and_edge(TaggedEdge::new(1, 2, 1)).unwrap());
        assert_eq!(strict.edge_count(), 1);

        let mut loose: AdjacencyGraph<u32, TaggedEdge<u32, u8>> = AdjacencyGraph::directed();
        loose.add_vertices_and_edge(TaggedEdge::new(1, 2, 0)).unwrap();
        loose.add_vertices_and_edge(TaggedEdge::new(1, 2, 1)).unwrap();
        assert_eq!(loose.edge_count(), 2);
    }

    #[test]
    fn test_remove_vertex_removes_incident_edges() {
        let mut g = diamond();
        assert!(g.remove_vertex(&"B").unwrap());
        assert!(!g.remove_vertex(&"B").unwrap());
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.in_degree(&"D"), 1);
        assert_eq!(g.out_degree(&"A"), 1);
    }

    #[test]
    fn test_remove_edge() {
        let mut g = diamond();
        assert!(g.remove_edge(&SEdge::new("A", "B")).unwrap());
        assert!(!g.remove_edge(&SEdge::new("A", "B")).unwrap());
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.in_degree(&"B"), 0);
    }

    #[test]
    fn test_events_and_veto() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut g: AdjacencyGraph<u32, SEdge<u32>> = AdjacencyGraph::directed();
        let log = Rc::clone(&seen);
        g.subscribe(Box::new(move |event: &GraphEvent<u32, SEdge<u32>>| {
            log.borrow_mut().push(event.clone());
            match event {
                GraphEvent::VertexRemoved(_) => Err(Error::Unsupported("remove".into())),
                _ => Ok(ListenerStatus::Keep),
            }
        }));

        g.add_vertices_and_edge(SEdge::new(1, 2)).unwrap();
        assert!(g.remove_vertex(&1).is_err());
        // Vetoed removal leaves the graph intact.
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(
            *seen.borrow(),
            vec![
                GraphEvent::VertexAdded(1),
                GraphEvent::VertexAdded(2),
                GraphEvent::EdgeAdded(SEdge::new(1, 2)),
                GraphEvent::VertexRemoved(1),
            ]
        );
    }

    #[test]
    fn test_clear_notifies_once() {
        let count = Rc::new(RefCell::new(0));
        let mut g = diamond();
        let c = Rc::clone(&count);
        let id = g.subscribe(Box::new(move |event: &GraphEvent<&str, SEdge<&str>>| {
            if *event == GraphEvent::Cleared {
                *c.borrow_mut() += 1;
            }
            Ok(ListenerStatus::Keep)
        }));
        g.clear().unwrap();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.unsubscribe(id));
        assert_eq!(g.listener_count(), 0);
    }

    type Graph = AdjacencyGraph<u32, SEdge<u32>>;

    /// Subscribes a listener that fails on the `nth` (0-based) event matching
    /// `pred` and accepts everything else.
    fn veto_nth(
        g: &mut Graph,
        nth: usize,
        pred: impl Fn(&GraphEvent<u32, SEdge<u32>>) -> bool + 'static,
    ) {
        let mut seen = 0;
        g.subscribe(Box::new(move |event: &GraphEvent<u32, SEdge<u32>>| {
            if pred(event) {
                seen += 1;
                if seen == nth + 1 {
                    return Err(Error::Unsupported("vetoed".into()));
                }
            }
            Ok(ListenerStatus::Keep)
        }));
    }

    #[test]
    fn test_vetoed_add_vertex_is_undone() {
        let mut g = Graph::directed();
        g.add_vertex(0).unwrap();
        veto_nth(&mut g, 0, |e| matches!(e, GraphEvent::VertexAdded(_)));

        assert!(g.add_vertex(1).is_err());
        assert_eq!(g.vertex_count(), 1);
        assert!(!g.contains_vertex(&1));
        // The next addition goes through.
        assert!(g.add_vertex(1).unwrap());
        assert_eq!(g.vertices().copied().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_vetoed_add_edge_is_undone() {
        let mut g = Graph::undirected();
        g.add_vertices_and_edge(SEdge::new(1, 2)).unwrap();
        veto_nth(&mut g, 0, |e| matches!(e, GraphEvent::EdgeAdded(_)));

        assert!(g.add_edge(SEdge::new(1, 2)).is_err());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(&1), 2);
        assert_eq!(g.out_degree(&2), 1);
    }

    #[test]
    fn test_vetoed_add_vertices_and_edge_drops_new_endpoints() {
        let mut g = Graph::directed();
        g.add_vertex(1).unwrap();
        veto_nth(&mut g, 0, |e| matches!(e, GraphEvent::EdgeAdded(_)));

        assert!(g.add_vertices_and_edge(SEdge::new(1, 2)).is_err());
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert!(g.contains_vertex(&1));
        assert!(!g.contains_vertex(&2));
    }

    #[test]
    fn test_vetoed_remove_edge_keeps_edge() {
        let mut g = Graph::directed();
        g.add_vertices_and_edge(SEdge::new(1, 2)).unwrap();
        veto_nth(&mut g, 0, |e| matches!(e, GraphEvent::EdgeRemoved(_)));

        assert!(g.remove_edge(&SEdge::new(1, 2)).is_err());
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_edge(&SEdge::new(1, 2)));
        assert_eq!(g.in_degree(&2), 1);
    }

    #[test]
    fn test_remove_vertex_veto_midway_changes_nothing() {
        let mut g = Graph::directed();
        g.add_vertices_and_edge(SEdge::new(1, 2)).unwrap();
        g.add_vertices_and_edge(SEdge::new(1, 3)).unwrap();
        // First edge removal is accepted, the second one is refused.
        veto_nth(&mut g, 1, |e| matches!(e, GraphEvent::EdgeRemoved(_)));

        assert!(g.remove_vertex(&1).is_err());
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.out_degree(&1), 2);
        assert_eq!(g.in_degree(&2), 1);
        assert_eq!(g.in_degree(&3), 1);
    }

    #[test]
    fn test_vetoed_clear_keeps_everything() {
        let mut g = Graph::from_edges(true, [SEdge::new(1, 2), SEdge::new(2, 3)]);
        veto_nth(&mut g, 0, |e| *e == GraphEvent::Cleared);

        assert!(g.clear().is_err());
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        AddEdge(u8, u8),
        RemoveEdge(u8, u8),
        RemoveVertex(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u8..6, 0u8..6).prop_map(|(a, b)| Op::AddEdge(a, b)),
            1 => (0u8..6, 0u8..6).prop_map(|(a, b)| Op::RemoveEdge(a, b)),
            1 => (0u8..6).prop_map(Op::RemoveVertex),
        ]
    }

    proptest! {
        #[test]
        fn prop_counts_follow_reported_changes(ops in prop::collection::vec(op(), 0..40)) {
            let mut g: AdjacencyGraph<u8, SEdge<u8>> = AdjacencyGraph::directed();
            for op in ops {
                let edges_before = g.edge_count();
                match op {
                    Op::AddEdge(a, b) => {
                        let added = g.add_vertices_and_edge(SEdge::new(a, b)).unwrap();
                        prop_assert_eq!(g.edge_count(), edges_before + usize::from(added));
                    }
                    Op::RemoveEdge(a, b) => {
                        let removed = g.remove_edge(&SEdge::new(a, b)).unwrap();
                        prop_assert_eq!(g.edge_count() + usize::from(removed), edges_before);
                    }
                    Op::RemoveVertex(v) => {
                        let incident = g.degree(&v);
                        let self_loops = g.out_edges(&v).filter(|e| e.is_self_edge()).count();
                        g.remove_vertex(&v).unwrap();
                        prop_assert!(!g.contains_vertex(&v));
                        prop_assert_eq!(g.edge_count() + incident - self_loops, edges_before);
                    }
                }
                let out: usize = g.vertices().map(|v| g.out_degree(v)).sum();
                let inc: usize = g.vertices().map(|v| g.in_degree(v)).sum();
                prop_assert_eq!(out, g.edge_count());
                prop_assert_eq!(inc, g.edge_count());
            }
        }
    }
}
