//! Dynamic arrays: the generic [`Array`] and the bit-packed [`BitArray`].
//!
//! Both carry the same operation set. [`BitArray`] stores 64 booleans per
//! word and uses the two-valued domain to replace sorting, deduplication and
//! replacement with counting.

use crate::error::{ArrayError, Result};

mod dynamic;
mod format;
mod packed;

pub use dynamic::Array;
pub use packed::{BitArray, BitIter, BitSpan};

/// Operations shared by every array representation, with elements passed by value.
///
/// Generic code written against `Sequence` behaves the same on [`Array<bool>`]
/// and [`BitArray`].
pub trait Sequence {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// The element at `index`, if in range.
    fn element(&self, index: usize) -> Option<Self::Item>;

    /// Bounds-checked access by value.
    fn checked_at(&self, index: usize) -> Result<Self::Item> {
        let len = self.len();
        self.element(index).ok_or(ArrayError::OutOfRange { index, len })
    }

    fn first_element(&self) -> Option<Self::Item> {
        self.element(0)
    }

    fn last_element(&self) -> Option<Self::Item> {
        self.len().checked_sub(1).and_then(|i| self.element(i))
    }

    fn push_back(&mut self, value: Self::Item);

    fn pop_back(&mut self) -> Option<Self::Item>;

    fn push_front(&mut self, value: Self::Item);

    fn pop_front(&mut self) -> Option<Self::Item>;

    /// Inserts at `index`. Panics if `index > len`.
    fn insert(&mut self, index: usize, value: Self::Item);

    fn remove_at(&mut self, index: usize) -> Result<Self::Item>;

    /// Empties the sequence, keeping its allocation.
    fn clear(&mut self);

    /// Empties the sequence and frees its allocation.
    fn release(&mut self);

    fn reserve(&mut self, additional: usize);

    fn shrink_to_fit(&mut self);
}
