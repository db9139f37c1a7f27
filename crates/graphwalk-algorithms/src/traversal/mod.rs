//! Graph traversal: breadth-first and depth-first engines with observers.
//!
//! Both engines work on directed and undirected graphs. On undirected
//! graphs each edge is classified once and [`EdgeVisit::reversed`](crate::EdgeVisit)
//! tells whether it was walked against its stored orientation.

pub(crate) mod bfs;
pub(crate) mod dfs;
mod visitor;

pub use bfs::{BreadthFirstSearch, bfs, bfs_layers, is_reachable};
pub use dfs::{DepthFirstSearch, dfs};
pub use visitor::{BfsVisitor, DfsVisitor};
