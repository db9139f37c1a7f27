//! Graph capability model.
//!
//! - [`edge`] - The [`Edge`] trait and the value edges [`SEdge`] and [`TaggedEdge`]
//! - [`traits`] - Orthogonal capability traits (vertex set, edge set, incidence, mutation)
//! - [`events`] - Mutation notifications and the listener registry
//! - [`adjacency`] - [`AdjacencyGraph`], an insertion-ordered adjacency list container

pub mod adjacency;
pub mod edge;
pub mod events;
pub mod traits;

pub use adjacency::AdjacencyGraph;
pub use edge::{Edge, SEdge, TaggedEdge};
pub use events::{GraphEvent, GraphListener, ListenerId, ListenerStatus, Listeners};
pub use traits::{
    BidirectionalIncidence, EdgeListGraph, EdgeSet, GraphBase, Incidence, MutableEdgeSet,
    MutableGraph, MutableVertexSet, ObservableGraph, VertexListGraph, VertexSet,
};
