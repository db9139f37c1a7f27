//! Super source / super sink augmentation.

use std::fmt::Debug;

use graphwalk_common::{Error, Result};
use graphwalk_core::MutableGraph;

/// Which vertices the super terminals are wired to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AugmentStrategy<V> {
    /// Super source to every vertex and every vertex to the super sink.
    AllVertices,
    /// Super source to every vertex without in-edges, every vertex without
    /// out-edges to the super sink.
    SourcesAndSinks,
    /// Super source to each vertex of `sources`, each vertex of `sinks` to
    /// the super sink. Used for bipartite matching.
    Bipartite {
        /// Left partition.
        sources: Vec<V>,
        /// Right partition.
        sinks: Vec<V>,
    },
}

/// Adds a synthetic super source and super sink to a graph, reversibly.
///
/// Edges are created by a caller-supplied factory, so the caller decides
/// what capacity they carry. [`rollback`](Self::rollback) removes exactly
/// the vertices and edges that [`augment`](Self::augment) added.
#[derive(Debug, Clone)]
pub struct GraphAugmentor<V, E> {
    super_source: V,
    super_sink: V,
    added_vertices: Vec<V>,
    added_edges: Vec<E>,
    augmented: bool,
}

impl<V, E> GraphAugmentor<V, E>
where
    V: Clone + Eq + std::hash::Hash + Debug,
    E: Clone + Eq + std::hash::Hash + Debug,
{
    /// Creates an augmentor that will add `super_source` and `super_sink`.
    pub fn new(super_source: V, super_sink: V) -> Self {
        Self {
            super_source,
            super_sink,
            added_vertices: Vec::new(),
            added_edges: Vec::new(),
            augmented: false,
        }
    }

    /// The synthetic source vertex.
    pub fn super_source(&self) -> &V {
        &self.super_source
    }

    /// The synthetic sink vertex.
    pub fn super_sink(&self) -> &V {
        &self.super_sink
    }

    /// Edges added by the last augmentation.
    pub fn added_edges(&self) -> &[E] {
        &self.added_edges
    }

    /// Returns true if `edge` was added by this augmentor.
    pub fn is_augmented_edge(&self, edge: &E) -> bool {
        self.added_edges.contains(edge)
    }

    /// Returns true between `augment` and `rollback`.
    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// Adds the super terminals and wires them according to `strategy`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOperation`] if already augmented, or if a super
    ///   terminal is already a vertex of the graph
    /// - [`Error::VertexNotFound`] if a bipartite vertex is not in the graph
    /// - any error a graph listener raises; what was added so far is rolled
    ///   back first
    pub fn augment<G>(
        &mut self,
        graph: &mut G,
        strategy: &AugmentStrategy<V>,
        mut make_edge: impl FnMut(&V, &V) -> E,
    ) -> Result<()>
    where
        G: MutableGraph<Vertex = V, Edge = E>,
    {
        if self.augmented {
            return Err(Error::invalid_operation("graph is already augmented"));
        }
        for terminal in [&self.super_source, &self.super_sink] {
            if graph.contains_vertex(terminal) {
                return Err(Error::invalid_operation(format!(
                    "super terminal {terminal:?} is already in the graph"
                )));
            }
        }

        let (sources, sinks): (Vec<V>, Vec<V>) = match strategy {
            AugmentStrategy::AllVertices => {
                let all: Vec<V> = graph.vertices().cloned().collect();
                (all.clone(), all)
            }
            AugmentStrategy::SourcesAndSinks => (
                graph
                    .vertices()
                    .filter(|v| graph.in_degree(v) == 0)
                    .cloned()
                    .collect(),
                graph
                    .vertices()
                    .filter(|v| graph.out_degree(v) == 0)
                    .cloned()
                    .collect(),
            ),
            AugmentStrategy::Bipartite { sources, sinks } => {
                for vertex in sources.iter().chain(sinks) {
                    if !graph.contains_vertex(vertex) {
                        return Err(Error::vertex_not_found(vertex));
                    }
                }
                (sources.clone(), sinks.clone())
            }
        };

        self.augmented = true;
        let outcome = self.wire(graph, &sources, &sinks, &mut make_edge);
        if let Err(err) = &outcome {
            // Undo the partial augmentation; report the original error.
            if let Err(rollback) = self.rollback(graph) {
                tracing::warn!(
                    error = %err,
                    %rollback,
                    remaining = self.added_edges.len() + self.added_vertices.len(),
                    "rollback of a failed augmentation failed"
                );
            }
        }
        outcome
    }

    fn wire<G>(
        &mut self,
        graph: &mut G,
        sources: &[V],
        sinks: &[V],
        make_edge: &mut impl FnMut(&V, &V) -> E,
    ) -> Result<()>
    where
        G: MutableGraph<Vertex = V, Edge = E>,
    {
        for terminal in [self.super_source.clone(), self.super_sink.clone()] {
            if graph.add_vertex(terminal.clone())? {
                self.added_vertices.push(terminal);
            }
        }
        for vertex in sources {
            let edge = make_edge(&self.super_source, vertex);
            if graph.add_edge(edge.clone())? {
                self.added_edges.push(edge);
            }
        }
        for vertex in sinks {
            let edge = make_edge(vertex, &self.super_sink);
            if graph.add_edge(edge.clone())? {
                self.added_edges.push(edge);
            }
        }
        Ok(())
    }

    /// Removes everything the last augmentation added.
    ///
    /// A no-op when not augmented.
    pub fn rollback<G>(&mut self, graph: &mut G) -> Result<()>
    where
        G: MutableGraph<Vertex = V, Edge = E>,
    {
        if !self.augmented {
            return Ok(());
        }
        // Forget an element only once the graph let it go, so a failed
        // rollback can be retried.
        while let Some(edge) = self.added_edges.last() {
            graph.remove_edge(edge)?;
            self.added_edges.pop();
        }
        while let Some(vertex) = self.added_vertices.last() {
            graph.remove_vertex(vertex)?;
            self.added_vertices.pop();
        }
        self.augmented = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use graphwalk_core::{AdjacencyGraph, EdgeSet, Incidence, SEdge, VertexSet};

    use super::*;

    fn chain() -> AdjacencyGraph<i32, SEdge<i32>> {
        AdjacencyGraph::from_edges(true, [SEdge::new(1, 2), SEdge::new(2, 3)])
    }

    #[test]
    fn test_sources_and_sinks_by_degree() {
        let mut graph = chain();
        let mut augmentor = GraphAugmentor::new(-1, -2);
        augmentor
            .augment(&mut graph, &AugmentStrategy::SourcesAndSinks, |s, t| {
                SEdge::new(*s, *t)
            })
            .unwrap();

        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(augmentor.added_edges(), &[SEdge::new(-1, 1), SEdge::new(3, -2)]);
        assert!(graph.find_edge(&-1, &1).is_some());

        augmentor.rollback(&mut graph).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(!augmentor.is_augmented());
    }

    #[test]
    fn test_all_vertices() {
        let mut graph = chain();
        let mut augmentor = GraphAugmentor::new(0, 9);
        augmentor
            .augment(&mut graph, &AugmentStrategy::AllVertices, |s, t| {
                SEdge::new(*s, *t)
            })
            .unwrap();
        assert_eq!(graph.edge_count(), 2 + 6);
        assert!(matches!(
            augmentor.augment(&mut graph, &AugmentStrategy::AllVertices, |s, t| {
                SEdge::new(*s, *t)
            }),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_terminal_clash_and_unknown_vertex() {
        let mut graph = chain();
        let mut augmentor = GraphAugmentor::new(1, 9);
        assert!(matches!(
            augmentor.augment(&mut graph, &AugmentStrategy::AllVertices, |s, t| {
                SEdge::new(*s, *t)
            }),
            Err(Error::InvalidOperation(_))
        ));

        let mut augmentor = GraphAugmentor::new(0, 9);
        let strategy = AugmentStrategy::Bipartite {
            sources: vec![1],
            sinks: vec![7],
        };
        assert!(matches!(
            augmentor.augment(&mut graph, &strategy, |s, t| SEdge::new(*s, *t)),
            Err(Error::VertexNotFound(_))
        ));
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn test_failed_rollback_keeps_remaining_additions() {
        use std::cell::Cell;
        use std::rc::Rc;

        use graphwalk_core::{Edge, GraphEvent, ListenerStatus, ObservableGraph};

        let mut graph = chain();
        let locked = Rc::new(Cell::new(true));
        let gate = Rc::clone(&locked);
        let id = graph.subscribe(Box::new(move |event: &GraphEvent<i32, SEdge<i32>>| {
            match event {
                GraphEvent::EdgeAdded(e) if *e.target() == -2 => {
                    Err(Error::invalid_operation("sink edges refused"))
                }
                GraphEvent::EdgeRemoved(_) if gate.get() => {
                    Err(Error::Unsupported("removal locked".into()))
                }
                _ => Ok(ListenerStatus::Keep),
            }
        }));

        let mut augmentor = GraphAugmentor::new(-1, -2);
        let err = augmentor
            .augment(&mut graph, &AugmentStrategy::SourcesAndSinks, |s, t| {
                SEdge::new(*s, *t)
            })
            .unwrap_err();
        // The augmentation error wins over the rollback error.
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert!(augmentor.is_augmented());
        assert_eq!(augmentor.added_edges(), &[SEdge::new(-1, 1)]);
        assert!(graph.contains_edge(&SEdge::new(-1, 1)));

        locked.set(false);
        augmentor.rollback(&mut graph).unwrap();
        assert!(graph.unsubscribe(id));
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(!augmentor.is_augmented());
    }
}
