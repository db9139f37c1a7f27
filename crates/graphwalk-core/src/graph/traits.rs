//! Graph capability traits.
//!
//! Each trait covers one orthogonal capability. A container implements the
//! ones it supports; an algorithm asks for the smallest bundle it needs:
//!
//! | Trait | Capability |
//! |-------|------------|
//! | [`VertexSet`] | enumerate, count, and test vertices |
//! | [`EdgeSet`] | enumerate, count, and test edges |
//! | [`Incidence`] | out-edges of a vertex, with indexed access |
//! | [`BidirectionalIncidence`] | in-edges as well (flow, back-traversal) |
//! | [`MutableVertexSet`] / [`MutableEdgeSet`] | add and remove elements |
//! | [`ObservableGraph`] | subscribe to mutation events |
//!
//! For undirected graphs, `out_edges(v)` and `in_edges(v)` both yield every
//! edge incident to `v`; traversal engines pick the far endpoint themselves.

use std::fmt::Debug;
use std::hash::Hash;

use graphwalk_common::Result;

use super::edge::Edge;
use super::events::{GraphListener, ListenerId};

/// Associated types and global properties shared by every capability.
pub trait GraphBase {
    /// Vertex type. Cloned into per-computation indices, never mutated.
    type Vertex: Clone + Eq + Hash + Debug;

    /// Edge type.
    type Edge: Edge<Self::Vertex> + Clone + Eq + Hash + Debug;

    /// Whether edges have a direction.
    fn is_directed(&self) -> bool;

    /// Whether more than one edge may join the same ordered pair of vertices.
    ///
    /// Algorithms must not assume the absence of parallel edges unless this
    /// returns false.
    fn allows_parallel_edges(&self) -> bool;
}

/// A graph whose vertices can be enumerated.
pub trait VertexSet: GraphBase {
    /// Iterates over all vertices.
    fn vertices(&self) -> Box<dyn Iterator<Item = &Self::Vertex> + '_>;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns true if `vertex` belongs to the graph.
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Returns true if the graph has no vertices.
    fn is_vertices_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

/// A graph whose edges can be enumerated.
pub trait EdgeSet: GraphBase {
    /// Iterates over all edges. Undirected edges are yielded once.
    fn edges(&self) -> Box<dyn Iterator<Item = &Self::Edge> + '_>;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Returns true if `edge` belongs to the graph.
    fn contains_edge(&self, edge: &Self::Edge) -> bool;

    /// Returns true if the graph has no edges.
    fn is_edges_empty(&self) -> bool {
        self.edge_count() == 0
    }
}

/// Out-edge access, the "implicit graph" capability.
pub trait Incidence: GraphBase {
    /// Out-edges of `vertex`. Empty for a vertex outside the graph.
    fn out_edges(&self, vertex: &Self::Vertex) -> Box<dyn Iterator<Item = &Self::Edge> + '_>;

    /// Number of out-edges of `vertex`.
    fn out_degree(&self, vertex: &Self::Vertex) -> usize;

    /// The `index`-th out-edge of `vertex`, in the order `out_edges` yields.
    fn out_edge(&self, vertex: &Self::Vertex, index: usize) -> Option<&Self::Edge>;

    /// Returns true if `vertex` has no out-edges.
    fn is_out_edges_empty(&self, vertex: &Self::Vertex) -> bool {
        self.out_degree(vertex) == 0
    }

    /// Finds an out-edge of `source` whose far end is `target`.
    fn find_edge(&self, source: &Self::Vertex, target: &Self::Vertex) -> Option<&Self::Edge> {
        self.out_edges(source)
            .find(|e| e.other_end(source) == Some(target))
    }
}

/// In-edge access on top of [`Incidence`].
pub trait BidirectionalIncidence: Incidence {
    /// In-edges of `vertex`. Empty for a vertex outside the graph.
    fn in_edges(&self, vertex: &Self::Vertex) -> Box<dyn Iterator<Item = &Self::Edge> + '_>;

    /// Number of in-edges of `vertex`.
    fn in_degree(&self, vertex: &Self::Vertex) -> usize;

    /// The `index`-th in-edge of `vertex`.
    fn in_edge(&self, vertex: &Self::Vertex, index: usize) -> Option<&Self::Edge>;

    /// In-degree plus out-degree. For undirected graphs this counts incident
    /// edges twice, like the directed case does for a self-loop.
    fn degree(&self, vertex: &Self::Vertex) -> usize {
        self.in_degree(vertex) + self.out_degree(vertex)
    }
}

/// Vertex insertion and removal.
///
/// Every mutation returns `Ok(true)` exactly when the vertex set changed, so
/// `vertex_count` moves in lockstep with reported success. An `Err` comes
/// from a listener vetoing the change; the graph is then left untouched.
pub trait MutableVertexSet: VertexSet {
    /// Adds `vertex`. Returns `Ok(false)` if it was already present.
    fn add_vertex(&mut self, vertex: Self::Vertex) -> Result<bool>;

    /// Removes `vertex` together with every incident edge.
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> Result<bool>;

    /// Removes every vertex and edge, notifying listeners once.
    fn clear(&mut self) -> Result<()>;
}

/// Edge insertion and removal.
pub trait MutableEdgeSet: EdgeSet {
    /// Adds `edge`. Both endpoints must already be present; returns
    /// `Ok(false)` if they are not, or if the edge would be a forbidden
    /// parallel edge.
    fn add_edge(&mut self, edge: Self::Edge) -> Result<bool>;

    /// Adds any missing endpoint, then the edge.
    fn add_vertices_and_edge(&mut self, edge: Self::Edge) -> Result<bool>;

    /// Removes one occurrence of `edge`.
    fn remove_edge(&mut self, edge: &Self::Edge) -> Result<bool>;
}

/// A graph that publishes its mutations.
pub trait ObservableGraph: GraphBase {
    /// Registers a listener; it receives every later mutation event.
    fn subscribe(&mut self, listener: GraphListener<Self::Vertex, Self::Edge>) -> ListenerId;

    /// Removes a listener. Returns false if the id is unknown.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;
}

/// Vertex enumeration plus out-edges: what whole-graph traversals need.
pub trait VertexListGraph: VertexSet + Incidence {}

impl<G: VertexSet + Incidence> VertexListGraph for G {}

/// Vertex and edge enumeration: what edge-driven algorithms need.
pub trait EdgeListGraph: VertexSet + EdgeSet {}

impl<G: VertexSet + EdgeSet> EdgeListGraph for G {}

/// Everything the flow engine needs: both incidences and both mutations.
pub trait MutableGraph:
    VertexSet + EdgeSet + BidirectionalIncidence + MutableVertexSet + MutableEdgeSet
{
}

impl<G> MutableGraph for G where
    G: VertexSet + EdgeSet + BidirectionalIncidence + MutableVertexSet + MutableEdgeSet
{
}
