//! Residual network and the augmenting-path search over it.

use std::fmt::Debug;
use std::hash::Hash;

use graphwalk_common::{Error, Result, WalkIndexSet};
use graphwalk_core::{GraphBase, Incidence};

use crate::traits::{EdgeVisit, VertexIndex};
use crate::traversal::BfsVisitor;
use crate::traversal::bfs::SearchDriver;

/// Capacities, residuals, and reverse pairing of every edge, by slot.
#[derive(Debug, Clone)]
pub(crate) struct ResidualNetwork<E> {
    edges: WalkIndexSet<E>,
    capacity: Vec<f64>,
    residual: Vec<f64>,
    partner: Vec<usize>,
}

impl<E> Default for ResidualNetwork<E> {
    fn default() -> Self {
        Self {
            edges: WalkIndexSet::default(),
            capacity: Vec::new(),
            residual: Vec::new(),
            partner: Vec::new(),
        }
    }
}

impl<E: Clone + Eq + Hash + Debug> ResidualNetwork<E> {
    /// Builds the network from `(edge, capacity, partner)` triples.
    pub(crate) fn build<'e>(
        entries: impl IntoIterator<Item = (&'e E, f64, &'e E)>,
    ) -> Result<Self>
    where
        E: 'e,
    {
        let mut network = Self::default();
        let mut partners = Vec::new();
        for (edge, capacity, partner) in entries {
            if capacity < 0.0 || capacity.is_nan() {
                return Err(Error::NegativeCapacity {
                    edge: format!("{edge:?}"),
                    capacity,
                });
            }
            let (slot, inserted) = network.edges.insert_full(edge.clone());
            if inserted {
                network.capacity.push(capacity);
                network.residual.push(capacity);
                partners.push(partner);
            } else {
                // Equal parallel edges cannot be told apart; pool them.
                network.capacity[slot] += capacity;
                network.residual[slot] += capacity;
            }
        }
        for partner in partners {
            let slot = network.edges.get_index_of(partner).ok_or_else(|| {
                Error::invalid_operation(format!("reverse partner {partner:?} is not in the graph"))
            })?;
            network.partner.push(slot);
        }
        Ok(network)
    }

    #[inline]
    pub(crate) fn slot(&self, edge: &E) -> Option<usize> {
        self.edges.get_index_of(edge)
    }

    #[inline]
    pub(crate) fn edge(&self, slot: usize) -> &E {
        &self.edges[slot]
    }

    #[inline]
    pub(crate) fn residual(&self, slot: usize) -> f64 {
        self.residual[slot]
    }

    #[inline]
    pub(crate) fn capacity(&self, slot: usize) -> f64 {
        self.capacity[slot]
    }

    /// Net flow on the edge in `slot`; negative on the reverse side.
    #[inline]
    pub(crate) fn flow(&self, slot: usize) -> f64 {
        self.capacity[slot] - self.residual[slot]
    }

    pub(crate) fn has_residual(&self, edge: &E) -> bool {
        self.slot(edge).is_some_and(|s| self.residual[s] > 0.0)
    }

    /// Pushes `amount` along the edge in `slot` and gives it back to its
    /// partner.
    pub(crate) fn push(&mut self, slot: usize, amount: f64) {
        self.residual[slot] -= amount;
        let partner = self.partner[slot];
        self.residual[partner] += amount;
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&E, usize)> {
        self.edges.iter().enumerate().map(|(slot, edge)| (edge, slot))
    }
}

/// View of a graph restricted to edges with positive residual capacity.
pub(crate) struct ResidualGraph<'a, G: GraphBase> {
    graph: &'a G,
    network: &'a ResidualNetwork<G::Edge>,
}

impl<'a, G: GraphBase> ResidualGraph<'a, G> {
    pub(crate) fn new(graph: &'a G, network: &'a ResidualNetwork<G::Edge>) -> Self {
        Self { graph, network }
    }
}

impl<G: GraphBase> GraphBase for ResidualGraph<'_, G> {
    type Vertex = G::Vertex;
    type Edge = G::Edge;

    fn is_directed(&self) -> bool {
        true
    }

    fn allows_parallel_edges(&self) -> bool {
        self.graph.allows_parallel_edges()
    }
}

impl<G: Incidence> Incidence for ResidualGraph<'_, G> {
    fn out_edges(&self, vertex: &G::Vertex) -> Box<dyn Iterator<Item = &G::Edge> + '_> {
        let network = self.network;
        Box::new(
            self.graph
                .out_edges(vertex)
                .filter(move |e| network.has_residual(e)),
        )
    }

    fn out_degree(&self, vertex: &G::Vertex) -> usize {
        self.out_edges(vertex).count()
    }

    fn out_edge(&self, vertex: &G::Vertex, index: usize) -> Option<&G::Edge> {
        self.out_edges(vertex).nth(index)
    }
}

/// Records the residual edge that discovered each vertex and stops once the
/// sink is reached.
pub(crate) struct AugmentingPathFinder<'a, V, E> {
    index: &'a VertexIndex<V>,
    network: &'a ResidualNetwork<E>,
    sink: usize,
    pub(crate) via: Vec<Option<usize>>,
    pub(crate) found: bool,
}

impl<'a, V, E> AugmentingPathFinder<'a, V, E> {
    pub(crate) fn new(index: &'a VertexIndex<V>, network: &'a ResidualNetwork<E>, sink: usize) -> Self
    where
        V: Clone + Eq + Hash,
    {
        Self {
            index,
            network,
            sink,
            via: vec![None; index.len()],
            found: false,
        }
    }
}

impl<V, E> BfsVisitor<V, E> for AugmentingPathFinder<'_, V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Clone + Eq + Hash + Debug,
{
    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        let w = self.index.require(edge.target)?;
        self.via[w] = self.network.slot(edge.edge);
        if w == self.sink {
            self.found = true;
        }
        Ok(())
    }
}

impl<V, E> SearchDriver<V, E> for AugmentingPathFinder<'_, V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Clone + Eq + Hash + Debug,
{
    fn is_done(&self) -> bool {
        self.found
    }
}

#[cfg(test)]
mod tests {
    use graphwalk_core::{AdjacencyGraph, SEdge};

    use super::*;

    #[test]
    fn test_push_moves_residual_to_partner() {
        let forward = SEdge::new(1, 2);
        let backward = SEdge::new(2, 1);
        let mut network =
            ResidualNetwork::build([(&forward, 5.0, &backward), (&backward, 0.0, &forward)])
                .unwrap();

        network.push(0, 3.0);
        assert_eq!(network.residual(0), 2.0);
        assert_eq!(network.residual(1), 3.0);
        assert_eq!(network.flow(0), 3.0);
        assert_eq!(network.flow(1), -3.0);
    }

    #[test]
    fn test_negative_capacity() {
        let e = SEdge::new(1, 2);
        let err = ResidualNetwork::build([(&e, -1.0, &e)]).unwrap_err();
        assert!(matches!(err, Error::NegativeCapacity { .. }));
    }

    #[test]
    fn test_view_hides_saturated_edges() {
        let graph = AdjacencyGraph::from_edges(true, [SEdge::new(1, 2), SEdge::new(1, 3)]);
        let (a, b) = (SEdge::new(1, 2), SEdge::new(1, 3));
        let network = ResidualNetwork::build([(&a, 0.0, &a), (&b, 1.0, &b)]).unwrap();
        let view = ResidualGraph::new(&graph, &network);
        assert_eq!(view.out_degree(&1), 1);
        assert_eq!(view.out_edge(&1, 0), Some(&b));
    }
}
