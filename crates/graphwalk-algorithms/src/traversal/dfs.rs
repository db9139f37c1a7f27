//! Depth-first traversal.
//!
//! Uses an explicit stack of `(vertex, next out-edge position)` frames
//! rather than recursion, so deep graphs cannot overflow the call stack.

use graphwalk_common::{CancellationToken, Result, WalkSet};
use graphwalk_core::{GraphBase, Incidence, VertexListGraph};

use super::bfs::far_end;
use super::visitor::DfsVisitor;
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, Color, EdgeVisit, ObserverId, Observers, VertexIndex};

// ============================================================================
// Engine
// ============================================================================

/// Runs a depth-first traversal from `root`, or over every White vertex in
/// index order when `root` is `None`.
///
/// Returns early, without error, when `cancel` is flagged.
pub(crate) fn depth_first_search<G, D>(
    graph: &G,
    index: &VertexIndex<G::Vertex>,
    colors: &mut Vec<Color>,
    root: Option<usize>,
    visitor: &mut D,
    cancel: &CancellationToken,
) -> Result<()>
where
    G: Incidence,
    D: DfsVisitor<G::Vertex, G::Edge> + ?Sized,
{
    colors.clear();
    colors.resize(index.len(), Color::White);
    for vertex in index.iter() {
        visitor.initialize_vertex(vertex)?;
    }

    let mut examined = WalkSet::default();
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let roots: Box<dyn Iterator<Item = usize>> = match root {
        Some(root) => Box::new(std::iter::once(root)),
        None => Box::new(0..index.len()),
    };

    let directed = graph.is_directed();
    for start in roots {
        if cancel.is_cancelling() {
            return Ok(());
        }
        if colors[start] != Color::White {
            continue;
        }

        let root_vertex = index.vertex(start);
        visitor.start_vertex(root_vertex)?;
        colors[start] = Color::Gray;
        visitor.discover_vertex(root_vertex)?;
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            if cancel.is_cancelling() {
                return Ok(());
            }
            let (u, position) = *frame;
            let source = index.vertex(u);

            let Some(edge) = graph.out_edge(source, position) else {
                stack.pop();
                colors[u] = Color::Black;
                visitor.finish_vertex(source)?;
                continue;
            };
            frame.1 += 1;

            if !directed && !examined.insert(edge.clone()) {
                continue;
            }
            let (target, reversed) = far_end(directed, edge, source);
            let w = index.require(target)?;
            let visit = EdgeVisit {
                edge,
                source,
                target,
                reversed,
            };

            visitor.examine_edge(visit)?;
            match colors[w] {
                Color::White => {
                    visitor.tree_edge(visit)?;
                    colors[w] = Color::Gray;
                    visitor.discover_vertex(target)?;
                    stack.push((w, 0));
                }
                Color::Gray => visitor.back_edge(visit)?,
                Color::Black => visitor.forward_or_cross_edge(visit)?,
            }
        }
    }
    Ok(())
}

// ============================================================================
// Algorithm
// ============================================================================

/// Depth-first search with attachable observers.
///
/// Without a root the search produces a depth-first forest covering every
/// vertex.
pub struct DepthFirstSearch<'g, G: GraphBase> {
    graph: &'g G,
    root: Option<G::Vertex>,
    observers: Observers<dyn DfsVisitor<G::Vertex, G::Edge> + 'g>,
    lifecycle: AlgorithmLifecycle,
    index: VertexIndex<G::Vertex>,
    colors: Vec<Color>,
}

impl<'g, G: VertexListGraph> DepthFirstSearch<'g, G> {
    /// Creates a search over `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            root: None,
            observers: Observers::new(),
            lifecycle: AlgorithmLifecycle::new("DepthFirstSearch"),
            index: VertexIndex::default(),
            colors: Vec::new(),
        }
    }

    /// Sets the start vertex.
    #[must_use]
    pub fn with_root(mut self, root: G::Vertex) -> Self {
        self.root = Some(root);
        self
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("DepthFirstSearch", token);
        self
    }

    /// Sets or clears the start vertex.
    pub fn set_root(&mut self, root: Option<G::Vertex>) {
        self.root = root;
    }

    /// Attaches an observer; it receives events from every later `compute`.
    pub fn attach<O>(&mut self, observer: O) -> ObserverId
    where
        O: DfsVisitor<G::Vertex, G::Edge> + 'g,
    {
        self.observers.attach(Box::new(observer))
    }

    /// Detaches an observer.
    pub fn detach(
        &mut self,
        id: ObserverId,
    ) -> Option<Box<dyn DfsVisitor<G::Vertex, G::Edge> + 'g>> {
        self.observers.detach(id)
    }

    /// Color of `vertex` after the last computation.
    pub fn vertex_color(&self, vertex: &G::Vertex) -> Option<Color> {
        self.index
            .index_of(vertex)
            .and_then(|i| self.colors.get(i).copied())
    }

    fn search(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.index = VertexIndex::from_graph(self.graph);
        let root = self
            .root
            .as_ref()
            .map(|r| self.index.require(r))
            .transpose()?;
        depth_first_search(
            self.graph,
            &self.index,
            &mut self.colors,
            root,
            &mut self.observers,
            cancel,
        )
    }
}

impl<G: VertexListGraph> Algorithm for DepthFirstSearch<'_, G> {
    fn compute(&mut self) -> Result<()> {
        let cancel = self.lifecycle.begin()?;
        let outcome = self.search(&cancel);
        self.lifecycle.end();
        outcome
    }

    fn lifecycle(&self) -> &AlgorithmLifecycle {
        &self.lifecycle
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

struct FinishOrder<V> {
    order: Vec<V>,
}

impl<V: Clone, E> DfsVisitor<V, E> for FinishOrder<V> {
    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        self.order.push(vertex.clone());
        Ok(())
    }
}

/// Vertices reachable from `start`, in depth-first finish (post-) order.
///
/// # Errors
///
/// Returns [`graphwalk_common::Error::VertexNotFound`] if `start` is not in the graph.
pub fn dfs<G: VertexListGraph>(graph: &G, start: &G::Vertex) -> Result<Vec<G::Vertex>> {
    let index = VertexIndex::from_graph(graph);
    let root = index.require(start)?;
    let mut visitor = FinishOrder { order: Vec::new() };
    depth_first_search(
        graph,
        &index,
        &mut Vec::new(),
        Some(root),
        &mut visitor,
        &CancellationToken::new(),
    )?;
    Ok(visitor.order)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use graphwalk_core::{AdjacencyGraph, SEdge, VertexSet};

    use super::*;
    use crate::lifecycle::ComputeState;

    #[derive(Default)]
    struct Classes {
        tree: Vec<(char, char)>,
        back: Vec<(char, char)>,
        forward_or_cross: Vec<(char, char)>,
    }

    struct Classifier(Rc<RefCell<Classes>>);

    impl DfsVisitor<char, SEdge<char>> for Classifier {
        fn tree_edge(&mut self, e: EdgeVisit<'_, char, SEdge<char>>) -> Result<()> {
            self.0.borrow_mut().tree.push((*e.source, *e.target));
            Ok(())
        }

        fn back_edge(&mut self, e: EdgeVisit<'_, char, SEdge<char>>) -> Result<()> {
            self.0.borrow_mut().back.push((*e.source, *e.target));
            Ok(())
        }

        fn forward_or_cross_edge(&mut self, e: EdgeVisit<'_, char, SEdge<char>>) -> Result<()> {
            self.0
                .borrow_mut()
                .forward_or_cross
                .push((*e.source, *e.target));
            Ok(())
        }
    }

    #[test]
    fn test_cycle_has_one_back_edge() {
        let graph = AdjacencyGraph::from_edges(
            true,
            [
                SEdge::new('a', 'b'),
                SEdge::new('b', 'c'),
                SEdge::new('c', 'a'),
            ],
        );
        let classes = Rc::new(RefCell::new(Classes::default()));
        let mut search = DepthFirstSearch::new(&graph).with_root('a');
        search.attach(Classifier(Rc::clone(&classes)));
        search.compute().unwrap();

        let classes = classes.borrow();
        assert_eq!(classes.tree, vec![('a', 'b'), ('b', 'c')]);
        assert_eq!(classes.back, vec![('c', 'a')]);
        assert!(classes.forward_or_cross.is_empty());
        assert!(graph.vertices().all(|v| search.vertex_color(v) == Some(Color::Black)));
    }

    #[test]
    fn test_forward_and_cross_edges() {
        let graph = AdjacencyGraph::from_edges(
            true,
            [
                SEdge::new('a', 'b'),
                SEdge::new('b', 'c'),
                SEdge::new('a', 'c'),
                SEdge::new('d', 'c'),
            ],
        );
        let classes = Rc::new(RefCell::new(Classes::default()));
        let mut search = DepthFirstSearch::new(&graph);
        search.attach(Classifier(Rc::clone(&classes)));
        search.compute().unwrap();

        let classes = classes.borrow();
        assert!(classes.back.is_empty());
        assert_eq!(classes.forward_or_cross, vec![('a', 'c'), ('d', 'c')]);
    }

    #[test]
    fn test_undirected_tree_edge_not_back_edge() {
        let graph = AdjacencyGraph::from_edges(false, [SEdge::new('a', 'b'), SEdge::new('b', 'c')]);
        let classes = Rc::new(RefCell::new(Classes::default()));
        let mut search = DepthFirstSearch::new(&graph).with_root('c');
        search.attach(Classifier(Rc::clone(&classes)));
        search.compute().unwrap();

        let classes = classes.borrow();
        assert_eq!(classes.tree, vec![('c', 'b'), ('b', 'a')]);
        assert!(classes.back.is_empty());
    }

    #[test]
    fn test_cancellation_token() {
        let graph = AdjacencyGraph::from_edges(true, [SEdge::new('a', 'b')]);
        let token = CancellationToken::new();

        struct CancelOnDiscover(CancellationToken);
        impl DfsVisitor<char, SEdge<char>> for CancelOnDiscover {
            fn discover_vertex(&mut self, _: &char) -> Result<()> {
                self.0.cancel();
                Ok(())
            }
        }

        let mut search = DepthFirstSearch::new(&graph).with_cancellation(token.clone());
        search.attach(CancelOnDiscover(token));
        search.compute().unwrap();
        assert_eq!(search.state(), ComputeState::Aborted);
        assert_eq!(search.vertex_color(&'b'), Some(Color::White));
    }

    #[test]
    fn test_dfs_post_order() {
        let graph = AdjacencyGraph::from_edges(
            true,
            [SEdge::new(1, 2), SEdge::new(2, 3), SEdge::new(1, 4)],
        );
        assert_eq!(dfs(&graph, &1).unwrap(), vec![3, 2, 4, 1]);
    }
}
