//! Observer protocols emitted by the traversal engines.
//!
//! Every method has a no-op default, so an observer implements only the
//! events it cares about. Returning an error aborts the traversal and the
//! error comes out of `compute` unchanged.

use graphwalk_common::Result;

use crate::traits::{EdgeVisit, Observers};

/// Events raised by breadth-first traversal.
///
/// Per vertex the order is `initialize_vertex`, `discover_vertex`,
/// `examine_vertex`, then for each out-edge `examine_edge` followed by
/// `tree_edge` (target White) or `non_tree_edge` plus `gray_target` /
/// `black_target`, and finally `finish_vertex`. `start_vertex` precedes the
/// discovery of each root.
#[allow(unused_variables)]
pub trait BfsVisitor<V, E> {
    /// Called once per vertex before the traversal starts.
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// A new search tree is rooted at `vertex`.
    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// `vertex` turned Gray and entered the frontier.
    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// `vertex` left the frontier and its out-edges are about to be scanned.
    fn examine_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// An out-edge is about to be classified.
    fn examine_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge discovered its target.
    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge reached an already discovered target.
    fn non_tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge reached a target still in the frontier.
    fn gray_target(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge reached a finished target.
    fn black_target(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// All out-edges of `vertex` were scanned; it is now Black.
    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }
}

/// Events raised by depth-first traversal.
///
/// Edges to a White target produce `tree_edge` and a recursive descent, a
/// Gray target produces `back_edge` (a cycle), and a Black target produces
/// `forward_or_cross_edge`.
#[allow(unused_variables)]
pub trait DfsVisitor<V, E> {
    /// Called once per vertex before the traversal starts.
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// A new search tree is rooted at `vertex`.
    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// `vertex` turned Gray.
    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }

    /// An out-edge is about to be classified.
    fn examine_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge leads to an undiscovered vertex.
    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge leads to an ancestor still on the stack.
    fn back_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// The edge leads to a finished vertex.
    fn forward_or_cross_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        Ok(())
    }

    /// Every descendant of `vertex` is finished; it is now Black.
    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Fan-out
// ============================================================================

impl<V, E> BfsVisitor<V, E> for Observers<dyn BfsVisitor<V, E> + '_> {
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

    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.tree_edge(edge))
    }

    fn non_tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.non_tree_edge(edge))
    }

    fn gray_target(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.gray_target(edge))
    }

    fn black_target(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.black_target(edge))
    }

    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.finish_vertex(vertex))
    }
}

impl<V, E> DfsVisitor<V, E> for Observers<dyn DfsVisitor<V, E> + '_> {
    fn initialize_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.initialize_vertex(vertex))
    }

    fn start_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.start_vertex(vertex))
    }

    fn discover_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.discover_vertex(vertex))
    }

    fn examine_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.examine_edge(edge))
    }

    fn tree_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.tree_edge(edge))
    }

    fn back_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.back_edge(edge))
    }

    fn forward_or_cross_edge(&mut self, edge: EdgeVisit<'_, V, E>) -> Result<()> {
        self.try_for_each(|o| o.forward_or_cross_edge(edge))
    }

    fn finish_vertex(&mut self, vertex: &V) -> Result<()> {
        self.try_for_each(|o| o.finish_vertex(vertex))
    }
}
