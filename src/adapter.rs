//! Dataset adapters: the read-only facade the KD-tree uses to reach point coordinates.
//!
//! The tree never owns the points. It only needs the number of points and the
//! `d`-th coordinate of any of them, plus a way to turn a query point into a
//! coordinate array. Everything is monomorphized, so the innermost coordinate
//! loop has no dynamic dispatch.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Coordinate scalar of a dataset. Distances are measured in the same type.
pub trait Scalar:
    Copy
    + Debug
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + 'static
{
    const ZERO: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;

    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const INFINITY: Self = <$t>::INFINITY;
            const NEG_INFINITY: Self = <$t>::NEG_INFINITY;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_scalar!(f32, f64);

/// Integer handle into a dataset. The width is the caller's choice and caps
/// the dataset size: a `u16` handle covers at most 65536 points.
pub trait IndexType: Copy + Debug + Eq + Ord + std::hash::Hash + Send + Sync + 'static {
    fn from_usize(value: usize) -> Self;
    fn to_usize(self) -> usize;
}

macro_rules! impl_index_type {
    ($($t:ty),*) => {$(
        impl IndexType for $t {
            #[inline]
            fn from_usize(value: usize) -> Self {
                <$t>::try_from(value)
                    .unwrap_or_else(|_| panic!("index {} does not fit in {}", value, stringify!($t)))
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_index_type!(u16, u32, u64, usize);

/// Read-only view over an arbitrary point collection with `D` coordinates per point.
pub trait DatasetAdapter<const D: usize> {
    /// The caller's point value, used for query inputs.
    type Point;
    /// Coordinate and distance scalar.
    type Scalar: Scalar;
    /// Handle type reported back in query results.
    type Index: IndexType;

    /// Total number of points in the dataset.
    fn point_count(&self) -> usize;

    /// The `dim`-th coordinate of the point at `index`. `dim < D`.
    fn coordinate(&self, index: usize, dim: usize) -> Self::Scalar;

    /// Coordinates of a query point, in dimension order.
    fn query_coords(point: &Self::Point) -> [Self::Scalar; D];
}

/// Adapter over a slice of fixed-size coordinate arrays.
///
/// Building a tree over more points than `I` can address panics.
#[derive(Clone, Copy, Debug)]
pub struct SliceAdapter<'a, S, const D: usize, I = usize> {
    points: &'a [[S; D]],
    _index: std::marker::PhantomData<I>,
}

impl<'a, S: Scalar, const D: usize, I: IndexType> SliceAdapter<'a, S, D, I> {
    pub fn new(points: &'a [[S; D]]) -> Self {
        Self { points, _index: std::marker::PhantomData }
    }

    pub fn points(&self) -> &'a [[S; D]] {
        self.points
    }
}

impl<S: Scalar, const D: usize, I: IndexType> DatasetAdapter<D> for SliceAdapter<'_, S, D, I> {
    type Point = [S; D];
    type Scalar = S;
    type Index = I;

    #[inline]
    fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn coordinate(&self, index: usize, dim: usize) -> S {
        self.points[index][dim]
    }

    #[inline]
    fn query_coords(point: &[S; D]) -> [S; D] {
        *point
    }
}

/// Adapter over an interleaved coordinate buffer `[x, y, z, x, y, z, ...]`.
///
/// This is the layout the WASM bindings receive from JavaScript. Building a
/// tree over more points than `I` can address panics.
#[derive(Clone, Copy, Debug)]
pub struct FlatAdapter<'a, S, const D: usize, I = usize> {
    coords: &'a [S],
    _index: std::marker::PhantomData<I>,
}

impl<'a, S: Scalar, const D: usize, I: IndexType> FlatAdapter<'a, S, D, I> {
    /// Wraps a flat buffer. Panics if its length is not a multiple of `D`.
    pub fn new(coords: &'a [S]) -> Self {
        assert!(D > 0, "a dataset needs at least one dimension");
        if coords.len() % D != 0 {
            panic!("flat coordinate buffer length {} is not a multiple of {}", coords.len(), D);
        }
        Self { coords, _index: std::marker::PhantomData }
    }

    pub fn coords(&self) -> &'a [S] {
        self.coords
    }
}

impl<S: Scalar, const D: usize, I: IndexType> DatasetAdapter<D> for FlatAdapter<'_, S, D, I> {
    type Point = [S; D];
    type Scalar = S;
    type Index = I;

    #[inline]
    fn point_count(&self) -> usize {
        self.coords.len() / D
    }

    #[inline]
    fn coordinate(&self, index: usize, dim: usize) -> S {
        self.coords[index * D + dim]
    }

    #[inline]
    fn query_coords(point: &[S; D]) -> [S; D] {
        *point
    }
}

/// Squared Euclidean distance between a query and a dataset point.
#[inline]
pub(crate) fn dist_sq<A: DatasetAdapter<D>, const D: usize>(
    dataset: &A,
    query: &[A::Scalar; D],
    index: usize,
) -> A::Scalar {
    let mut sum = A::Scalar::ZERO;
    for (dim, &q) in query.iter().enumerate() {
        let diff = q - dataset.coordinate(index, dim);
        sum = sum + diff * diff;
    }
    sum
}
