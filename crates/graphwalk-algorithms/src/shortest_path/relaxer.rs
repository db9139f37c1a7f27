//! Distance relaxers and the relaxation primitive.
//!
//! A relaxer decides what "better" means for a path length. The same
//! algorithms compute shortest paths, critical (longest) paths on DAGs, or
//! hop counts depending on the relaxer they are given.

use std::cmp::Ordering;

/// Combination and comparison rules for path lengths.
pub trait DistanceRelaxer {
    /// Distance assigned to every vertex before the search.
    fn initial_distance(&self) -> f64;

    /// Distance assigned to a search root.
    fn source_distance(&self) -> f64 {
        0.0
    }

    /// Length of a path of length `distance` extended by an edge of `weight`.
    fn combine(&self, distance: f64, weight: f64) -> f64;

    /// `Less` means `a` is the better distance.
    fn compare(&self, a: f64, b: f64) -> Ordering;

    /// Returns true if `candidate` strictly improves on `current`.
    fn is_better(&self, candidate: f64, current: f64) -> bool {
        self.compare(candidate, current) == Ordering::Less
    }

    /// Frontier key for a distance; smaller keys are expanded first.
    fn priority(&self, distance: f64) -> f64 {
        distance
    }
}

/// Minimum total weight. Unreached vertices start at `+∞`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestDistanceRelaxer;

impl DistanceRelaxer for ShortestDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::INFINITY
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance + weight
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        a.total_cmp(&b)
    }
}

/// Maximum total weight, for critical paths. Unreached vertices start at `-∞`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalDistanceRelaxer;

impl DistanceRelaxer for CriticalDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance + weight
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        b.total_cmp(&a)
    }

    fn priority(&self, distance: f64) -> f64 {
        -distance
    }
}

/// Counts edges and ignores weights. Unreached vertices start at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDistanceRelaxer;

impl DistanceRelaxer for EdgeDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        0.0
    }

    fn combine(&self, distance: f64, _weight: f64) -> f64 {
        distance + 1.0
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        a.total_cmp(&b)
    }
}

/// Per-vertex tentative distances, indexed by [`VertexIndex`](crate::VertexIndex)
/// position.
///
/// A vertex is *reached* once a root or a relaxation assigned it a distance.
/// Unreached vertices hold the relaxer's initial distance but report `None`.
#[derive(Debug, Clone, Default)]
pub struct DistanceMap {
    values: Vec<f64>,
    reached: Vec<bool>,
}

impl DistanceMap {
    /// Creates a map of `len` unreached vertices at `initial`.
    pub fn new(len: usize, initial: f64) -> Self {
        Self {
            values: vec![initial; len],
            reached: vec![false; len],
        }
    }

    /// Forgets every distance and resizes to `len`.
    pub fn reset(&mut self, len: usize, initial: f64) {
        self.values.clear();
        self.values.resize(len, initial);
        self.reached.clear();
        self.reached.resize(len, false);
    }

    /// Distance of vertex `index`, if reached.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        if self.is_reached(index) {
            Some(self.values[index])
        } else {
            None
        }
    }

    /// Stored value of vertex `index`, reached or not.
    #[inline]
    pub fn raw(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(f64::NAN)
    }

    /// Assigns a distance and marks the vertex reached.
    #[inline]
    pub fn set(&mut self, index: usize, distance: f64) {
        self.values[index] = distance;
        self.reached[index] = true;
    }

    /// Returns true if vertex `index` has a distance.
    #[inline]
    pub fn is_reached(&self, index: usize) -> bool {
        self.reached.get(index).copied().unwrap_or(false)
    }

    /// Number of vertices tracked.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no vertex is tracked.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Relaxes the edge `source -> target` of `weight`.
///
/// Returns true if the target's distance changed. Self-loops and edges
/// leaving an unreached vertex never relax; an unreached target always
/// takes the candidate distance.
pub fn relax<R: DistanceRelaxer + ?Sized>(
    relaxer: &R,
    distances: &mut DistanceMap,
    source: usize,
    target: usize,
    weight: f64,
) -> bool {
    if source == target {
        return false;
    }
    let Some(from) = distances.get(source) else {
        return false;
    };
    let candidate = relaxer.combine(from, weight);
    let improves = match distances.get(target) {
        None => true,
        Some(current) => relaxer.is_better(candidate, current),
    };
    if improves {
        distances.set(target, candidate);
    }
    improves
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_shortest_relaxer() {
        let r = ShortestDistanceRelaxer;
        assert!(r.is_better(1.0, 2.0));
        assert!(!r.is_better(2.0, 2.0));
        assert_eq!(r.combine(1.5, 2.0), 3.5);
        assert_eq!(r.initial_distance(), f64::INFINITY);
    }

    #[test]
    fn test_critical_relaxer() {
        let r = CriticalDistanceRelaxer;
        assert!(r.is_better(5.0, 2.0));
        assert!(r.priority(5.0) < r.priority(2.0));
        assert_eq!(r.initial_distance(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_edge_relaxer_counts_hops() {
        let r = EdgeDistanceRelaxer;
        let mut d = DistanceMap::new(3, r.initial_distance());
        d.set(0, r.source_distance());
        assert!(relax(&r, &mut d, 0, 1, 42.0));
        assert!(relax(&r, &mut d, 1, 2, 7.0));
        assert_eq!(d.get(2), Some(2.0));
    }

    #[test]
    fn test_relax_rules() {
        let r = ShortestDistanceRelaxer;
        let mut d = DistanceMap::new(3, r.initial_distance());
        assert!(!relax(&r, &mut d, 0, 1, 1.0), "unreached source");

        d.set(0, 0.0);
        assert!(!relax(&r, &mut d, 0, 0, -1.0), "self-loop");
        assert!(relax(&r, &mut d, 0, 1, 4.0));
        assert!(!relax(&r, &mut d, 0, 1, 4.0));
        assert!(relax(&r, &mut d, 0, 1, 3.0));
        assert_eq!(d.get(1), Some(3.0));
        assert_eq!(d.get(2), None);
    }

    proptest! {
        #[test]
        fn prop_shortest_relax_monotone(
            edges in prop::collection::vec((0usize..6, 0usize..6, 0.0f64..10.0), 0..60)
        ) {
            let r = ShortestDistanceRelaxer;
            let mut d = DistanceMap::new(6, r.initial_distance());
            d.set(0, 0.0);
            let mut last: Vec<Option<f64>> = (0..6).map(|i| d.get(i)).collect();
            for (s, t, w) in edges {
                relax(&r, &mut d, s, t, w);
                for (i, prev) in last.iter_mut().enumerate() {
                    let now = d.get(i);
                    if let (Some(p), Some(n)) = (*prev, now) {
                        prop_assert!(n <= p);
                    }
                    prop_assert!(!(prev.is_some() && now.is_none()));
                    *prev = now;
                }
                prop_assert_eq!(d.get(0), Some(0.0));
            }
        }
    }
}
