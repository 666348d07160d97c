//! # kdpack
//!
//! `kdpack` is a Rust library with two independent building blocks, usable from Rust
//! as well as compiled to WebAssembly (WASM):
//!
//! - a **KD-tree spatial index** over any point collection, answering exact k-nearest-neighbour
//!   and radius queries with squared Euclidean distances;
//! - a **bit-packed boolean array** with the same operation set as the generic [`Array`].
//!
//! ## Features
//!
//! - **Adapter-based**: the index borrows a caller-provided [`DatasetAdapter`] and never copies the points.
//!   [`SliceAdapter`] and [`FlatAdapter`] cover the common layouts.
//! - **Pluggable result collection**: k-NN, unsorted radius and sorted radius collectors implement [`ResultSet`].
//! - **Parallel batches**: a built index is read-only, so batch queries run on `rayon`.
//! - **Packed booleans**: [`BitArray`] stores 64 values per word and turns sorting,
//!   deduplication and replacement into counting.
//!
//! ## Example
//!
//! ```rust
//! use kdpack::{KdIndex, SliceAdapter};
//!
//! let points = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0]];
//! let dataset: SliceAdapter<'_, f64, 2> = SliceAdapter::new(&points);
//! let index = KdIndex::new(&dataset);
//!
//! let nearest = index.knn_search(2, &[0.0, 0.0]);
//! assert_eq!(nearest[0], 0);
//!
//! let close = index.radius_search(&[0.0, 0.0], 1.5, true);
//! assert_eq!(close.len(), 3);
//! ```
//!
//! ```rust
//! use kdpack::BitArray;
//!
//! let bits = BitArray::from([true, false, true, true, false]);
//! assert_eq!(bits.sum(), 3);
//! assert_eq!(bits.sorted().to_string(), "[false, false, true, true, true]");
//! ```

mod adapter;
mod array;
mod bounds;
mod error;
mod index;
mod kdtree;
mod params;
mod results;
mod wasm;

pub use adapter::DatasetAdapter;
pub use adapter::FlatAdapter;
pub use adapter::IndexType;
pub use adapter::Scalar;
pub use adapter::SliceAdapter;
pub use array::Array;
pub use array::BitArray;
pub use array::BitIter;
pub use array::BitSpan;
pub use array::Sequence;
pub use bounds::BoundingBox;
pub use error::ArrayError;
pub use error::Result;
pub use index::KdIndex;
pub use kdtree::KdTree;
pub use params::KdParams;
pub use params::SearchParams;
pub use params::SplitRule;
pub use results::KnnResults;
pub use results::RadiusResults;
pub use results::ResultSet;
pub use results::SortedRadiusResults;
pub use wasm::BoolArray;
pub use wasm::PointIndex2D;
pub use wasm::PointIndex3D;
