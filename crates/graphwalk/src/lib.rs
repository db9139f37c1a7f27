//! # Graphwalk
//!
//! Graph algorithms written against small capability traits instead of a
//! concrete graph type.
//!
//! Bring any graph that implements the traits an algorithm asks for, or use
//! [`AdjacencyGraph`]. Algorithms are values: build one, attach observers,
//! call [`Algorithm::compute`], then read the results.
//!
//! ## Algorithms
//!
//! | Family | Types |
//! | ------ | ----- |
//! | Traversal | [`BreadthFirstSearch`], [`DepthFirstSearch`] |
//! | Shortest paths | [`Dijkstra`], [`AStar`], [`DagShortestPath`], [`BellmanFord`], [`FloydWarshall`] |
//! | Ordering | [`TopologicalSort`], [`SourceFirstTopologicalSort`] |
//! | Flow | [`EdmondsKarp`], [`MaximumBipartiteMatching`] |
//! | Components | [`WeakComponents`], [`StrongComponents`], [`IncrementalComponents`] |
//!
//! ## Quick Start
//!
//! ```rust
//! use graphwalk::{AdjacencyGraph, Algorithm, Dijkstra, TaggedEdge};
//!
//! let graph = AdjacencyGraph::from_edges(
//!     true,
//!     [TaggedEdge::new("a", "b", 4u32), TaggedEdge::new("b", "c", 1u32)],
//! );
//! let mut dijkstra = Dijkstra::new(&graph, |e: &TaggedEdge<&str, u32>| f64::from(*e.tag()))
//!     .with_root("a");
//! dijkstra.compute()?;
//! assert_eq!(dijkstra.distance(&"c"), Some(5.0));
//! # Ok::<(), graphwalk::Error>(())
//! ```

// Re-export the algorithm layer
pub use graphwalk_algorithms::{
    AStar, AbortHandle, Algorithm, AlgorithmLifecycle, BellmanFord, BfsVisitor,
    BreadthFirstSearch, ComponentLabels, ComputeState, DagShortestPath, DepthFirstSearch,
    DfsVisitor, Dijkstra, EdgeRecorder, EdmondsKarp, FloydWarshall, IncrementalComponents,
    LifecycleEvent, MaximumBipartiteMatching, PredecessorRecorder, ReversedEdgeAugmentor,
    ShortestPathObserver, SourceFirstTopologicalSort, StrongComponents, TimeStampRecorder,
    TopologicalSort, UnionFind, VertexDistanceRecorder, WeakComponents, bfs, dfs, dijkstra_path,
    is_dag, is_reachable, maximum_flow,
};

// Re-export the graph model - you'll need these to build inputs
pub use graphwalk_core::{
    AdjacencyGraph, BidirectionalIncidence, Edge, EdgeSet, GraphBase, Incidence, MutableEdgeSet,
    MutableVertexSet, SEdge, TaggedEdge, VertexSet,
};

pub use graphwalk_common::{CancellationToken, Error, Result};

/// The full algorithm layer, including observers and relaxers.
pub use graphwalk_algorithms as algorithms;
