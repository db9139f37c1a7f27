//! Reversed-edge augmentation for residual bookkeeping.

use std::fmt::Debug;
use std::hash::Hash;

use graphwalk_common::{Error, Result, WalkMap, WalkSet};
use graphwalk_core::{Edge, MutableGraph};

/// Pairs every edge of a directed graph with a reverse edge.
///
/// An existing edge `v -> u` is used as the partner of `u -> v` when it is
/// not paired yet; otherwise a reverse edge is made by the caller's factory
/// and added to the graph. Added edges carry no capacity of their own: the
/// flow engine treats them as zero-capacity whatever the capacity function
/// says. [`rollback`](Self::rollback) removes exactly the added edges.
#[derive(Debug, Clone)]
pub struct ReversedEdgeAugmentor<E> {
    partners: WalkMap<E, E>,
    added: WalkSet<E>,
    added_order: Vec<E>,
    augmented: bool,
}

impl<E> Default for ReversedEdgeAugmentor<E> {
    fn default() -> Self {
        Self {
            partners: WalkMap::default(),
            added: WalkSet::default(),
            added_order: Vec::new(),
            augmented: false,
        }
    }
}

impl<E: Clone + Eq + Hash + Debug> ReversedEdgeAugmentor<E> {
    /// Creates an augmentor with nothing paired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true between `augment` and `rollback`.
    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// The reverse partner of `edge`.
    pub fn reversed(&self, edge: &E) -> Option<&E> {
        self.partners.get(edge)
    }

    /// Returns true if `edge` was synthesized by this augmentor.
    pub fn is_added(&self, edge: &E) -> bool {
        self.added.contains(edge)
    }

    /// Edges synthesized by the last augmentation, in insertion order.
    pub fn added_edges(&self) -> &[E] {
        &self.added_order
    }

    /// Pairs every edge of `graph`, adding reverse edges where missing.
    ///
    /// Self-loops are their own partner.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOperation`] if already augmented or the graph is
    ///   undirected
    /// - [`Error::InvalidOperation`] if `make_reversed` returns an edge that
    ///   is not the reverse of its input, or that the graph refuses
    /// - any error a graph listener raises; added edges are rolled back first
    pub fn augment<G, V>(
        &mut self,
        graph: &mut G,
        mut make_reversed: impl FnMut(&E) -> E,
    ) -> Result<()>
    where
        G: MutableGraph<Vertex = V, Edge = E>,
        V: Clone + Eq + Hash + Debug,
        E: Edge<V>,
    {
        if self.augmented {
            return Err(Error::invalid_operation("reversed edges already added"));
        }
        if !graph.is_directed() {
            return Err(Error::invalid_operation(
                "reversed-edge augmentation requires a directed graph",
            ));
        }

        let mut missing = Vec::new();
        {
            let edges: Vec<&E> = graph.edges().collect();
            for edge in edges {
                if self.partners.contains_key(edge) {
                    continue;
                }
                if edge.is_self_edge() {
                    self.partners.insert(edge.clone(), edge.clone());
                    continue;
                }
                let partner = graph
                    .out_edges(edge.target())
                    .find(|r| r.target() == edge.source() && !self.partners.contains_key(*r))
                    .cloned();
                match partner {
                    Some(partner) => {
                        self.partners.insert(edge.clone(), partner.clone());
                        self.partners.insert(partner, edge.clone());
                    }
                    None => missing.push(edge.clone()),
                }
            }
        }

        self.augmented = true;
        for edge in missing {
            if let Err(err) = self.add_partner(graph, &edge, &mut make_reversed) {
                if let Err(rollback) = self.rollback(graph) {
                    tracing::warn!(
                        error = %err,
                        %rollback,
                        remaining = self.added_order.len(),
                        "rollback of reversed edges failed"
                    );
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn add_partner<G, V>(
        &mut self,
        graph: &mut G,
        edge: &E,
        make_reversed: &mut impl FnMut(&E) -> E,
    ) -> Result<()>
    where
        G: MutableGraph<Vertex = V, Edge = E>,
        V: Clone + Eq + Hash + Debug,
        E: Edge<V>,
    {
        let reversed = make_reversed(edge);
        if reversed.source() != edge.target() || reversed.target() != edge.source() {
            return Err(Error::invalid_operation(format!(
                "{reversed:?} is not the reverse of {edge:?}"
            )));
        }
        if !graph.add_edge(reversed.clone())? {
            return Err(Error::invalid_operation(format!(
                "graph refused reversed edge {reversed:?}"
            )));
        }
        self.added.insert(reversed.clone());
        self.added_order.push(reversed.clone());
        self.partners.insert(edge.clone(), reversed.clone());
        self.partners.insert(reversed, edge.clone());
        Ok(())
    }

    /// Removes the added edges and forgets every pairing.
    pub fn rollback<G>(&mut self, graph: &mut G) -> Result<()>
    where
        G: MutableGraph<Edge = E>,
    {
        if !self.augmented {
            return Ok(());
        }
        while let Some(edge) = self.added_order.last() {
            graph.remove_edge(edge)?;
            self.added.remove(edge);
            self.added_order.pop();
        }
        self.partners.clear();
        self.augmented = false;
        Ok(())
    }
}
