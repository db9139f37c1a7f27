//! Relaxation-based shortest paths.
//!
//! | Algorithm | Weights | Notes |
//! |-----------|---------|-------|
//! | [`Dijkstra`] | non-negative | BFS engine over an indexed heap |
//! | [`AStar`] | non-negative | Dijkstra keyed by distance plus heuristic |
//! | [`DagShortestPath`] | any | topological order, fails on cycles |
//! | [`BellmanFord`] | any | detects negative cycles |
//! | [`FloydWarshall`] | any | all pairs, detects negative cycles |
//!
//! Single-source algorithms store their answer in a [`ShortestPaths`] and
//! report progress through [`ShortestPathObserver`].

mod astar;
mod bellman_ford;
mod dag;
mod dijkstra;
mod floyd_warshall;
mod relaxer;

use std::fmt::Debug;
use std::hash::Hash;

use graphwalk_common::Result;

pub use astar::AStar;
pub use bellman_ford::BellmanFord;
pub use dag::DagShortestPath;
pub use dijkstra::{Dijkstra, dijkstra_path};
pub use floyd_warshall::FloydWarshall;
pub use relaxer::{
    CriticalDistanceRelaxer, DistanceMap, DistanceRelaxer, EdgeDistanceRelaxer,
    ShortestDistanceRelaxer, relax,
};

use crate::traits::{EdgeVisit, Observers, VertexIndex};

/// Events raised by the single-source shortest-path algorithms.
#[allow(unused_variables)]
pub trait ShortestPathObserver<V, E> {
    /// Called once per vertex before the search.
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// `vertex` is a source and starts at the relaxer's source distance.
    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// `vertex` got its first tentative distance.
    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// `vertex` is about to have its out-edges relaxed.
    fn examine_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// An out-edge is about to be relaxed.
    fn examine_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge improved its target's distance and is now its predecessor.
    fn edge_relaxed(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge did not improve its target's distance.
    fn edge_not_relaxed(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// Every out-edge of `vertex` was relaxed.
    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }
}

impl<V, E> ShortestPathObserver<V, E> for Observers<dyn ShortestPathObserver<V, E> + '_> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.initialize_vertex(vertex))
    }

    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.start_vertex(vertex))
    }

    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.discover_vertex(vertex))
    }

    fn examine_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.examine_vertex(vertex))
    }

    fn examine_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.examine_edge(edge))
    }

    fn edge_relaxed(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.edge_relaxed(edge))
    }

    fn edge_not_relaxed(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.edge_not_relaxed(edge))
    }

    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.finish_vertex(vertex))
    }
}

/// Distances and predecessor edges produced by a single-source search.
///
/// After an aborted run the contents are whatever had been computed so far.
#[derive(Debug, Clone)]
pub struct ShortestPaths<V, E> {
    pub(crate) index: VertexIndex<V>,
    pub(crate) distances: DistanceMap,
    pub(crate) predecessors: Vec<Option<(E, usize)>>,
}

impl<V, E> Default for ShortestPaths<V, E> {
    fn default() -> Self {
        Self {
            index: VertexIndex::default(),
            distances: DistanceMap::default(),
            predecessors: Vec::new(),
        }
    }
}

impl<V: Clone + Eq + Hash + Debug, E: Clone> ShortestPaths<V, E> {
    pub(crate) fn reset(&mut self, index: VertexIndex<V>, initial: f64) {
        self.distances.reset(index.len(), initial);
        self.predecessors.clear();
        self.predecessors.resize(index.len(), None);
        self.index = index;
    }

    /// Distance of `vertex`, or `None` if it was not reached.
    pub fn distance(&self, vertex: &V) -> Option<f64> {
        self.index
            .index_of(vertex)
            .and_then(|i| self.distances.get(i))
    }

    /// The edge that last improved the distance of `vertex`.
    pub fn predecessor(&self, vertex: &V) -> Option<&E> {
        let i = self.index.index_of(vertex)?;
        self.predecessors[i].as_ref().map(|(edge, _)| edge)
    }

    /// Returns true if `vertex` was reached.
    pub fn is_reached(&self, vertex: &V) -> bool {
        self.distance(vertex).is_some()
    }

    /// Edges from the source to `vertex`, in walking order.
    ///
    /// A source yields an empty path; an unreached vertex yields `None`.
    pub fn path_to(&self, vertex: &V) -> Option<Vec<E>> {
        let mut current = self.index.index_of(vertex)?;
        if !self.distances.is_reached(current) {
            return None;
        }
        let mut path = Vec::new();
        while let Some((edge, parent)) = &self.predecessors[current] {
            // More edges than vertices means the predecessor chain loops.
            if path.len() >= self.index.len() {
                return None;
            }
            path.push(edge.clone());
            current = *parent;
        }
        path.reverse();
        Some(path)
    }

    /// Reached vertices with their distances, in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, f64)> {
        self.index
            .iter()
            .enumerate()
            .filter_map(|(i, v)| self.distances.get(i).map(|d| (v, d)))
    }

    /// Number of reached vertices.
    pub fn reached_count(&self) -> usize {
        (0..self.index.len())
            .filter(|&i| self.distances.is_reached(i))
            .count()
    }
}
