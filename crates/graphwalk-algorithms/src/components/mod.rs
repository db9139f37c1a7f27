//! Connected components.
//!
//! - [`UnionFind`] - the disjoint-set forest everything here is built on
//! - [`WeakComponents`] - components with edge direction ignored
//! - [`StrongComponents`] - Tarjan's strongly connected components
//! - [`IncrementalComponents`] - weak components kept current while the
//!   graph grows

mod incremental;
mod strong;
mod union_find;
mod weak;

use std::hash::Hash;

use graphwalk_common::WalkMap;

pub use incremental::IncrementalComponents;
pub use strong::StrongComponents;
pub use union_find::UnionFind;
pub use weak::WeakComponents;

use crate::traits::VertexIndex;

/// Vertex to component number assignment produced by a components run.
///
/// Components are numbered `0..count()`.
#[derive(Debug, Clone)]
pub struct ComponentLabels<V> {
    index: VertexIndex<V>,
    ids: Vec<usize>,
    count: usize,
}

impl<V> Default for ComponentLabels<V> {
    fn default() -> Self {
        Self {
            index: VertexIndex::default(),
            ids: Vec::new(),
            count: 0,
        }
    }
}

impl<V: Clone + Eq + Hash> ComponentLabels<V> {
    pub(crate) fn new(index: VertexIndex<V>, ids: Vec<usize>, count: usize) -> Self {
        Self { index, ids, count }
    }

    /// Number of components.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Component number of `vertex`, or `None` if it was not labeled.
    pub fn component_of(&self, vertex: &V) -> Option<usize> {
        let i = self.index.index_of(vertex)?;
        self.ids.get(i).copied().filter(|&id| id < self.count)
    }

    /// Vertices of component `id`, in vertex order.
    pub fn members(&self, id: usize) -> Vec<&V> {
        self.iter()
            .filter_map(|(v, c)| (c == id).then_some(v))
            .collect()
    }

    /// All components, each listing its vertices in vertex order.
    pub fn groups(&self) -> Vec<Vec<&V>> {
        let mut groups = vec![Vec::new(); self.count];
        for (vertex, id) in self.iter() {
            groups[id].push(vertex);
        }
        groups
    }

    /// Labeled vertices with their component numbers.
    pub fn iter(&self) -> impl Iterator<Item = (&V, usize)> {
        self.index
            .iter()
            .zip(self.ids.iter().copied())
            .filter(|&(_, id)| id < self.count)
    }

    /// The labels as a map.
    pub fn to_map(&self) -> WalkMap<V, usize> {
        self.iter().map(|(v, id)| (v.clone(), id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use graphwalk_core::{AdjacencyGraph, SEdge};

    use super::*;

    #[test]
    fn test_groups_and_map() {
        let graph: AdjacencyGraph<char, SEdge<char>> =
            AdjacencyGraph::from_vertices_and_edges(true, ['a', 'b', 'c'], []);
        let labels = ComponentLabels::new(VertexIndex::from_graph(&graph), vec![1, 0, 1], 2);

        assert_eq!(labels.groups(), vec![vec![&'b'], vec![&'a', &'c']]);
        assert_eq!(labels.to_map().get(&'c'), Some(&1));
        assert_eq!(labels.component_of(&'z'), None);
    }
}
