use crate::adapter::Scalar;

/// Generic axis-aligned bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<S, const D: usize> {
    pub min: [S; D],
    pub max: [S; D],
}

impl<S: Scalar, const D: usize> BoundingBox<S, D> {
    pub fn new(min: [S; D], max: [S; D]) -> Self {
        Self { min, max }
    }

    /// An inverted box that any point will grow.
    pub fn empty() -> Self {
        Self {
            min: [S::INFINITY; D],
            max: [S::NEG_INFINITY; D],
        }
    }

    /// Grows the box to include `point`.
    #[inline]
    pub fn extend(&mut self, point: &[S; D]) {
        for i in 0..D {
            let v = point[i];
            if v < self.min[i] { self.min[i] = v; }
            if v > self.max[i] { self.max[i] = v; }
        }
    }

    /// Width of the box along `axis`.
    #[inline]
    pub fn spread(&self, axis: usize) -> S {
        self.max[axis] - self.min[axis]
    }

    /// Axis with the largest spread; the first one wins ties.
    pub fn widest_axis(&self) -> usize {
        let mut axis = 0;
        for i in 1..D {
            if self.spread(i) > self.spread(axis) {
                axis = i;
            }
        }
        axis
    }

    /// Squared distance from `point` to the closest point of the box (zero inside).
    #[inline]
    pub fn dist_sq(&self, point: &[S; D]) -> S {
        let mut d2 = S::ZERO;
        for i in 0..D {
            let v = point[i];
            if v < self.min[i] {
                let d = self.min[i] - v;
                d2 = d2 + d * d;
            } else if v > self.max[i] {
                let d = v - self.max[i];
                d2 = d2 + d * d;
            }
        }
        d2
    }

    pub fn contains(&self, point: &[S; D]) -> bool {
        (0..D).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}
