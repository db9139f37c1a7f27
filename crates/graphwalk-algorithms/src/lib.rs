//! # graphwalk-algorithms
//!
//! Algorithm layer for Graphwalk: traversals, shortest paths, maximum flow,
//! and connected components over the capability traits of `graphwalk-core`.
//!
//! Every algorithm is a value bound to one graph. Configure it with the
//! `with_*` builders, attach observers to harvest events, then call
//! [`Algorithm::compute`]. Runs are synchronous on the caller's thread and
//! stop early when their [`AlgorithmLifecycle`] is aborted.
//!
//! ## Modules
//!
//! - [`lifecycle`] - Compute state machine, lifecycle events, cancellation
//! - [`traits`] - The [`Algorithm`] trait, vertex indexing, observer lists
//! - [`frontier`] - FIFO and indexed-heap frontiers for the BFS engine
//! - [`traversal`] - Breadth- and depth-first search with visitors
//! - [`observers`] - Recorders for predecessors, distances, edges, times
//! - [`shortest_path`] - Dijkstra, A*, DAG, Bellman-Ford, Floyd-Warshall
//! - [`topological`] - Topological sorts and acyclicity
//! - [`flow`] - Edmonds-Karp maximum flow and bipartite matching
//! - [`components`] - Union-find, weak, strong, and incremental components
//!
//! ## Example
//!
//! ```
//! use graphwalk_algorithms::{Algorithm, BreadthFirstSearch, PredecessorRecorder};
//! use graphwalk_core::{AdjacencyGraph, SEdge};
//!
//! let graph = AdjacencyGraph::from_edges(true, [SEdge::new(1, 2), SEdge::new(2, 3)]);
//! let recorder = PredecessorRecorder::new();
//! let mut search = BreadthFirstSearch::new(&graph).with_root(1);
//! search.attach(recorder.clone());
//! search.compute().unwrap();
//! assert_eq!(recorder.path_to(&3).map(|p| p.len()), Some(2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod flow;
pub mod frontier;
pub mod lifecycle;
pub mod observers;
pub mod shortest_path;
pub mod topological;
pub mod traits;
pub mod traversal;

// Re-export commonly used types at crate root
pub use components::{
    ComponentLabels, IncrementalComponents, StrongComponents, UnionFind, WeakComponents,
};
pub use flow::{
    AugmentStrategy, EdmondsKarp, GraphAugmentor, MaximumBipartiteMatching,
    ReversedEdgeAugmentor, maximum_flow,
};
pub use frontier::{FifoFrontier, Frontier, PriorityFrontier};
pub use lifecycle::{
    AbortHandle, AlgorithmLifecycle, ComputeState, LifecycleEvent, LifecycleListenerId,
};
pub use observers::{EdgeRecorder, PredecessorRecorder, TimeStampRecorder, VertexDistanceRecorder};
pub use shortest_path::{
    AStar, BellmanFord, CriticalDistanceRelaxer, DagShortestPath, Dijkstra, DistanceMap,
    DistanceRelaxer, EdgeDistanceRelaxer, FloydWarshall, ShortestDistanceRelaxer,
    ShortestPathObserver, ShortestPaths, dijkstra_path, relax,
};
pub use topological::{SourceFirstTopologicalSort, TopologicalSort, is_dag};
pub use traits::{Algorithm, Color, EdgeVisit, ObserverId, Observers, VertexIndex};
pub use traversal::{
    BfsVisitor, BreadthFirstSearch, DepthFirstSearch, DfsVisitor, bfs, bfs_layers, dfs,
    is_reachable,
};
