//! # graphwalk-core
//!
//! Core layer for Graphwalk: the graph capability model every algorithm is
//! written against.
//!
//! A concrete graph implements the subset of capabilities it supports, and
//! each algorithm names the minimal set it needs through generic bounds. This
//! crate depends only on `graphwalk-common`.
//!
//! ## Modules
//!
//! - [`graph`] - Edge types, capability traits, mutation events, and the
//!   [`AdjacencyGraph`] reference container

pub mod graph;

// Re-export commonly used types
pub use graph::{
    AdjacencyGraph, BidirectionalIncidence, Edge, EdgeListGraph, EdgeSet, GraphBase, GraphEvent,
    GraphListener, Incidence, ListenerId, ListenerStatus, MutableEdgeSet, MutableGraph,
    MutableVertexSet, ObservableGraph, SEdge, TaggedEdge, VertexListGraph, VertexSet,
};
