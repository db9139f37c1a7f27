//! Disjoint-set forest.

use std::fmt::Debug;
use std::hash::Hash;

use graphwalk_common::{Error, Result, WalkIndexSet};

/// Disjoint-set forest with path compression and union by rank.
///
/// Elements can be added but never removed; [`remove`](Self::remove) always
/// fails with [`Error::Unsupported`]. `set_count() <= element_count()` holds
/// at all times.
///
/// # Example
///
/// ```
/// use graphwalk_algorithms::UnionFind;
///
/// let mut sets = UnionFind::new();
/// for x in ["a", "b", "c"] {
///     sets.make_set(x);
/// }
/// assert!(sets.union(&"a", &"b").unwrap());
/// assert!(sets.are_in_same_set(&"a", &"b"));
/// assert_eq!(sets.set_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind<T> {
    elements: WalkIndexSet<T>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl<T> Default for UnionFind<T> {
    fn default() -> Self {
        Self {
            elements: WalkIndexSet::default(),
            parent: Vec::new(),
            rank: Vec::new(),
            sets: 0,
        }
    }
}

impl<T: Clone + Eq + Hash + Debug> UnionFind<T> {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `element` as a singleton set. Returns false if it was present.
    pub fn make_set(&mut self, element: T) -> bool {
        let (i, inserted) = self.elements.insert_full(element);
        if inserted {
            self.parent.push(i);
            self.rank.push(0);
            self.sets += 1;
        }
        inserted
    }

    /// Returns true if `element` has been added.
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    /// Representative of the set holding `element`, or `None` if absent.
    pub fn find_set(&mut self, element: &T) -> Option<&T> {
        let i = self.elements.get_index_of(element)?;
        let root = self.find(i);
        self.elements.get_index(root)
    }

    /// Merges the sets of `a` and `b`.
    ///
    /// Returns `Ok(false)` if they were already in the same set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if either element was never added.
    pub fn union(&mut self, a: &T, b: &T) -> Result<bool> {
        let (Some(a), Some(b)) = (
            self.elements.get_index_of(a),
            self.elements.get_index_of(b),
        ) else {
            return Err(Error::invalid_operation(format!(
                "union of {a:?} and {b:?}: element not in any set"
            )));
        };
        Ok(self.union_indices(a, b))
    }

    /// Returns true if both elements are present and share a set.
    pub fn are_in_same_set(&mut self, a: &T, b: &T) -> bool {
        match (
            self.elements.get_index_of(a),
            self.elements.get_index_of(b),
        ) {
            (Some(a), Some(b)) => self.find(a) == self.find(b),
            _ => false,
        }
    }

    /// Always fails: disjoint-set forests cannot split.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn remove(&mut self, element: &T) -> Result<()> {
        Err(Error::Unsupported(format!(
            "cannot remove {element:?} from a disjoint-set forest"
        )))
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Number of elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if no element has been added.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Forgets every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.parent.clear();
        self.rank.clear();
        self.sets = 0;
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }

    /// Set number of each element, in insertion order.
    ///
    /// Sets are numbered `0..set_count()` in the order their first element
    /// was added.
    pub fn set_ids(&mut self) -> Vec<usize> {
        let mut ids = vec![usize::MAX; self.elements.len()];
        let mut by_root = vec![usize::MAX; self.elements.len()];
        let mut next = 0;
        for i in 0..self.elements.len() {
            let root = self.find(i);
            if by_root[root] == usize::MAX {
                by_root[root] = next;
                next += 1;
            }
            ids[i] = by_root[root];
        }
        ids
    }

    pub(crate) fn union_indices(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
        self.sets -= 1;
        true
    }

    fn find(&mut self, mut i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[i] != root {
            let next = self.parent[i];
            self.parent[i] = root;
            i = next;
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_make_set_is_idempotent() {
        let mut sets = UnionFind::new();
        assert!(sets.make_set(1));
        assert!(!sets.make_set(1));
        assert_eq!(sets.element_count(), 1);
        assert_eq!(sets.set_count(), 1);
    }

    #[test]
    fn test_union_and_find() {
        let mut sets = UnionFind::new();
        for i in 0..6 {
            sets.make_set(i);
        }
        assert!(sets.union(&0, &1).unwrap());
        assert!(sets.union(&2, &3).unwrap());
        assert!(sets.union(&1, &3).unwrap());
        assert!(!sets.union(&0, &2).unwrap());

        assert_eq!(sets.set_count(), 3);
        assert!(sets.are_in_same_set(&0, &3));
        assert!(!sets.are_in_same_set(&0, &4));
        let root = *sets.find_set(&2).unwrap();
        assert_eq!(sets.find_set(&0), Some(&root));
        assert_eq!(sets.set_ids(), vec![0, 0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_missing_elements() {
        let mut sets = UnionFind::new();
        sets.make_set('a');
        assert!(sets.find_set(&'z').is_none());
        assert!(!sets.are_in_same_set(&'a', &'z'));
        assert!(matches!(
            sets.union(&'a', &'z'),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_remove_is_unsupported() {
        let mut sets = UnionFind::new();
        sets.make_set('a');
        assert!(matches!(sets.remove(&'a'), Err(Error::Unsupported(_))));
        assert!(sets.contains(&'a'));
    }

    proptest! {
        #[test]
        fn prop_matches_naive_labels(
            n in 1usize..20,
            pairs in prop::collection::vec((0usize..20, 0usize..20), 0..40),
        ) {
            let mut sets = UnionFind::new();
            let mut labels: Vec<usize> = (0..n).collect();
            for i in 0..n {
                sets.make_set(i);
            }
            for (a, b) in pairs.into_iter().map(|(a, b)| (a % n, b % n)) {
                let before = sets.set_count();
                let merged = sets.union(&a, &b).unwrap();
                let (la, lb) = (labels[a], labels[b]);
                prop_assert_eq!(merged, la != lb);
                if merged {
                    prop_assert_eq!(sets.set_count(), before - 1);
                    for l in &mut labels {
                        if *l == lb {
                            *l = la;
                        }
                    }
                } else {
                    prop_assert_eq!(sets.set_count(), before);
                }
                prop_assert!(sets.set_count() <= sets.element_count());
            }
            for a in 0..n {
                for b in 0..n {
                    prop_assert_eq!(sets.are_in_same_set(&a, &b), labels[a] == labels[b]);
                }
            }
        }
    }
}
