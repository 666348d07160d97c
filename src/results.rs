//! Result collection strategies for tree traversal.
//!
//! The traversal only talks to a [`ResultSet`]: it offers candidates through
//! `add_point` and prunes subtrees against `worst_dist`. Which collector is
//! used (bounded k-NN, unsorted radius, sorted radius) is decided before the
//! traversal starts, so the per-candidate path never branches on it.

use crate::adapter::{IndexType, Scalar};

/// Accumulator fed by the KD-tree during a search. Distances are squared.
pub trait ResultSet<S: Scalar, I: IndexType> {
    /// Resets the collector before a traversal.
    fn init(&mut self);

    /// Whether the collector has as many results as it can hold.
    fn is_full(&self) -> bool;

    /// Offers a candidate. Returns `false` to stop the search early.
    fn add_point(&mut self, dist: S, index: I) -> bool;

    /// Current pruning bound: candidates further than this are rejected.
    fn worst_dist(&self) -> S;
}

/// Bounded collector for k-nearest-neighbour queries.
///
/// Keeps at most `capacity` pairs, ascending by distance, with insertion
/// into the sorted prefix.
#[derive(Clone, Debug)]
pub struct KnnResults<S, I> {
    capacity: usize,
    entries: Vec<(I, S)>,
}

impl<S: Scalar, I: IndexType> KnnResults<S, I> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The collected pairs, ascending by distance.
    pub fn into_pairs(self) -> Vec<(I, S)> {
        self.entries
    }
}

impl<S: Scalar, I: IndexType> ResultSet<S, I> for KnnResults<S, I> {
    fn init(&mut self) {
        self.entries.clear();
    }

    fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    fn add_point(&mut self, dist: S, index: I) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.is_full() && dist >= self.worst_dist() {
            return true;
        }
        // First slot whose distance is strictly larger keeps ties in arrival order.
        let pos = self.entries.partition_point(|&(_, d)| d <= dist);
        if self.is_full() {
            self.entries.pop();
        }
        self.entries.insert(pos, (index, dist));
        true
    }

    fn worst_dist(&self) -> S {
        // Zero capacity prunes the root, so nothing is ever visited.
        if self.capacity == 0 {
            return S::NEG_INFINITY;
        }
        match self.entries.last() {
            Some(&(_, d)) if self.is_full() => d,
            _ => S::INFINITY,
        }
    }
}

/// Unsorted collector for radius queries.
///
/// Never full, so the traversal covers the whole qualifying region; the
/// squared radius is a constant pruning bound.
#[derive(Clone, Debug)]
pub struct RadiusResults<S, I> {
    radius_sq: S,
    entries: Vec<(I, S)>,
}

impl<S: Scalar, I: IndexType> RadiusResults<S, I> {
    /// `radius_sq` is the squared search radius.
    pub fn new(radius_sq: S) -> Self {
        Self {
            radius_sq,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The collected pairs in discovery order.
    pub fn into_pairs(self) -> Vec<(I, S)> {
        self.entries
    }
}

impl<S: Scalar, I: IndexType> ResultSet<S, I> for RadiusResults<S, I> {
    fn init(&mut self) {
        self.entries.clear();
    }

    fn is_full(&self) -> bool {
        false
    }

    fn add_point(&mut self, dist: S, index: I) -> bool {
        if dist <= self.radius_sq {
            self.entries.push((index, dist));
        }
        true
    }

    fn worst_dist(&self) -> S {
        self.radius_sq
    }
}

/// Radius collector that sorts once, ascending by distance, after traversal.
#[derive(Clone, Debug)]
pub struct SortedRadiusResults<S, I> {
    inner: RadiusResults<S, I>,
}

impl<S: Scalar, I: IndexType> SortedRadiusResults<S, I> {
    pub fn new(radius_sq: S) -> Self {
        Self {
            inner: RadiusResults::new(radius_sq),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The collected pairs, ascending by distance.
    pub fn into_pairs(self) -> Vec<(I, S)> {
        let mut entries = self.inner.into_pairs();
        entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }
}

impl<S: Scalar, I: IndexType> ResultSet<S, I> for SortedRadiusResults<S, I> {
    fn init(&mut self) {
        self.inner.init();
    }

    fn is_full(&self) -> bool {
        false
    }

    #[inline]
    fn add_point(&mut self, dist: S, index: I) -> bool {
        self.inner.add_point(dist, index)
    }

    fn worst_dist(&self) -> S {
        self.inner.worst_dist()
    }
}
