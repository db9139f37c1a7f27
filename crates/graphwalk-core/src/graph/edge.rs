//! Edge types.
//!
//! Algorithms only ever see edges through the [`Edge`] trait: a source and a
//! target. Equality and hashing belong to the concrete edge type, so callers
//! choose between value semantics ([`SEdge`]: two edges with the same
//! endpoints are the same edge) and tagged semantics ([`TaggedEdge`]: the tag
//! tells parallel edges apart and can carry a weight or capacity).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A directed connection between two vertices.
///
/// Edges are immutable once created. For undirected graphs the source and
/// target only record the orientation the edge was created with.
pub trait Edge<V> {
    /// The vertex the edge leaves.
    fn source(&self) -> &V;

    /// The vertex the edge enters.
    fn target(&self) -> &V;

    /// Returns true if source and target are the same vertex.
    fn is_self_edge(&self) -> bool
    where
        V: PartialEq,
    {
        self.source() == self.target()
    }

    /// Returns the endpoint opposite to `vertex`, or `None` if `vertex` is
    /// not an endpoint.
    fn other_end(&self, vertex: &V) -> Option<&V>
    where
        V: PartialEq,
    {
        if self.source() == vertex {
            Some(self.target())
        } else if self.target() == vertex {
            Some(self.source())
        } else {
            None
        }
    }
}

/// A plain value edge: equal endpoints mean equal edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SEdge<V> {
    source: V,
    target: V,
}

impl<V> SEdge<V> {
    /// Creates an edge from `source` to `target`.
    pub fn new(source: V, target: V) -> Self {
        Self { source, target }
    }

    /// Returns the same endpoints with the direction swapped.
    pub fn reversed(&self) -> Self
    where
        V: Clone,
    {
        Self::new(self.target.clone(), self.source.clone())
    }
}

impl<V> Edge<V> for SEdge<V> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }

    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: fmt::Display> fmt::Display for SEdge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// An edge carrying a caller-defined tag.
///
/// The tag takes part in equality and hashing, so parallel edges with
/// distinct tags stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaggedEdge<V, T> {
    source: V,
    target: V,
    tag: T,
}

impl<V, T> TaggedEdge<V, T> {
    /// Creates a tagged edge from `source` to `target`.
    pub fn new(source: V, target: V, tag: T) -> Self {
        Self {
            source,
            target,
            tag,
        }
    }

    /// Returns the tag.
    #[inline]
    pub fn tag(&self) -> &T {
        &self.tag
    }
}

impl<V, T> Edge<V> for TaggedEdge<V, T> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }

    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: fmt::Display, T: fmt::Display> fmt::Display for TaggedEdge<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.tag, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sedge_value_semantics() {
        assert_eq!(SEdge::new(1, 2), SEdge::new(1, 2));
        assert_ne!(SEdge::new(1, 2), SEdge::new(2, 1));
        assert_eq!(SEdge::new(1, 2).reversed(), SEdge::new(2, 1));
    }

    #[test]
    fn test_tagged_edges_are_distinct_by_tag() {
        let a = TaggedEdge::new("A", "B", 1);
        let b = TaggedEdge::new("A", "B", 2);
        assert_ne!(a, b);
        assert_eq!(*a.tag(), 1);
    }

    #[test]
    fn test_other_end_and_self_edge() {
        let e = SEdge::new('x', 'y');
        assert_eq!(e.other_end(&'x'), Some(&'y'));
        assert_eq!(e.other_end(&'y'), Some(&'x'));
        assert_eq!(e.other_end(&'z'), None);
        assert!(!e.is_self_edge());
        assert!(SEdge::new('x', 'x').is_self_edge());
    }

    #[test]
    fn test_display() {
        assert_eq!(SEdge::new("A", "B").to_string(), "A -> B");
        assert_eq!(TaggedEdge::new("A", "B", 7).to_string(), "A -[7]-> B");
    }
}
