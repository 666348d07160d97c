use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::ops::{Index, IndexMut};

use rand::Rng;
use rand::seq::SliceRandom;

use super::format::{joined, write_joined};
use super::Sequence;
use crate::error::{ArrayError, Result};

/// A growable array with a higher-order operation set.
///
/// Methods that reorder or filter come in pairs: the in-place form returns
/// `&mut Self` for chaining (`sort`, `remove_if`, ...) and the past-tense
/// form returns a new array (`sorted`, `removed_if`, ...).
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Array<T> {
    data: Vec<T>,
}

impl<T> Array<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    /// `count` copies of `value`.
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self { data: vec![value; count] }
    }

    /// `count` elements produced by an index-aware generator.
    pub fn from_fn<F: FnMut(usize) -> T>(count: usize, f: F) -> Self {
        Self { data: (0..count).map(f).collect() }
    }

    /// `count` elements produced by calling `f` repeatedly.
    pub fn generate<F: FnMut() -> T>(count: usize, mut f: F) -> Self {
        Self { data: (0..count).map(|_| f()).collect() }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    // --- Assignment ---

    pub fn assign(&mut self, count: usize, value: T) -> &mut Self
    where
        T: Clone,
    {
        self.data.clear();
        self.data.resize(count, value);
        self
    }

    pub fn assign_from_slice(&mut self, values: &[T]) -> &mut Self
    where
        T: Clone,
    {
        self.data.clear();
        self.data.extend_from_slice(values);
        self
    }

    pub fn fill(&mut self, value: T) -> &mut Self
    where
        T: Clone,
    {
        self.data.fill(value);
        self
    }

    // --- Element access ---

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.data.len();
        self.data.get(index).ok_or(ArrayError::OutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.data.len();
        self.data.get_mut(index).ok_or(ArrayError::OutOfRange { index, len })
    }

    pub fn front(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn back(&self) -> Option<&T> {
        self.data.last()
    }

    /// The element at `index`, or `default` if out of range.
    pub fn fetch(&self, index: usize, default: T) -> T
    where
        T: Clone,
    {
        self.data.get(index).cloned().unwrap_or(default)
    }

    /// A view of up to `count` elements starting at `offset`, clamped to the array.
    pub fn subspan(&self, offset: usize, count: usize) -> &[T] {
        let start = offset.min(self.data.len());
        let end = start + count.min(self.data.len() - start);
        &self.data[start..end]
    }

    // --- Capacity ---

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Size of the stored elements in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    pub fn resize(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.data.resize(len, value);
    }

    /// Removes every element and keeps the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Removes every element and frees the allocation.
    pub fn release(&mut self) {
        self.data = Vec::new();
    }

    // --- Insertion and removal ---

    pub fn push_back(&mut self, value: T) {
        self.data.push(value);
    }

    pub fn push_front(&mut self, value: T) {
        self.data.insert(0, value);
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.data.pop()
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.data.is_empty() { None } else { Some(self.data.remove(0)) }
    }

    /// Inserts at `index`. Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.data.insert(index, value);
    }

    pub fn append<I: IntoIterator<Item = T>>(&mut self, values: I) -> &mut Self {
        self.data.extend(values);
        self
    }

    /// Removes and returns the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let len = self.data.len();
        if index >= len {
            return Err(ArrayError::RemoveOutOfRange { index, len });
        }
        Ok(self.data.remove(index))
    }

    pub fn removed_at(&self, index: usize) -> Result<Self>
    where
        T: Clone,
    {
        let len = self.data.len();
        if index >= len {
            return Err(ArrayError::RemoveOutOfRange { index, len });
        }
        let mut data = Vec::with_capacity(len - 1);
        data.extend_from_slice(&self.data[..index]);
        data.extend_from_slice(&self.data[index + 1..]);
        Ok(Self { data })
    }

    /// Removes every element equal to `value`.
    pub fn remove(&mut self, value: &T) -> &mut Self
    where
        T: PartialEq,
    {
        self.data.retain(|x| x != value);
        self
    }

    pub fn removed(&self, value: &T) -> Self
    where
        T: PartialEq + Clone,
    {
        self.data.iter().filter(|x| *x != value).cloned().collect()
    }

    pub fn remove_if<F: FnMut(&T) -> bool>(&mut self, mut f: F) -> &mut Self {
        self.data.retain(|x| !f(x));
        self
    }

    pub fn removed_if<F: FnMut(&T) -> bool>(&self, mut f: F) -> Self
    where
        T: Clone,
    {
        self.data.iter().filter(|x| !f(x)).cloned().collect()
    }

    /// Keeps only the elements matching `f`.
    pub fn keep_if<F: FnMut(&T) -> bool>(&mut self, f: F) -> &mut Self {
        self.data.retain(f);
        self
    }

    // --- Replacement ---

    pub fn replace(&mut self, old_value: &T, new_value: T) -> &mut Self
    where
        T: PartialEq + Clone,
    {
        for x in self.data.iter_mut().filter(|x| **x == *old_value) {
            *x = new_value.clone();
        }
        self
    }

    pub fn replaced(&self, old_value: &T, new_value: T) -> Self
    where
        T: PartialEq + Clone,
    {
        self.data
            .iter()
            .map(|x| if x == old_value { new_value.clone() } else { x.clone() })
            .collect()
    }

    pub fn replace_if<F: FnMut(&T) -> bool>(&mut self, mut f: F, new_value: T) -> &mut Self
    where
        T: Clone,
    {
        for x in self.data.iter_mut() {
            if f(x) {
                *x = new_value.clone();
            }
        }
        self
    }

    pub fn replaced_if<F: FnMut(&T) -> bool>(&self, mut f: F, new_value: T) -> Self
    where
        T: Clone,
    {
        self.data
            .iter()
            .map(|x| if f(x) { new_value.clone() } else { x.clone() })
            .collect()
    }

    // --- Predicates and counting ---

    pub fn all<F: FnMut(&T) -> bool>(&self, f: F) -> bool {
        self.data.iter().all(f)
    }

    pub fn any<F: FnMut(&T) -> bool>(&self, f: F) -> bool {
        self.data.iter().any(f)
    }

    pub fn none<F: FnMut(&T) -> bool>(&self, f: F) -> bool {
        !self.data.iter().any(f)
    }

    pub fn count(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.data.iter().filter(|x| *x == value).count()
    }

    pub fn count_if<F: FnMut(&T) -> bool>(&self, mut f: F) -> usize {
        self.data.iter().filter(|x| f(x)).count()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.data.contains(value)
    }

    pub fn contains_if<F: FnMut(&T) -> bool>(&self, f: F) -> bool {
        self.data.iter().any(f)
    }

    pub fn is_sorted(&self) -> bool
    where
        T: PartialOrd,
    {
        self.data.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn sum(&self) -> T
    where
        T: Clone + std::iter::Sum<T>,
    {
        self.data.iter().cloned().sum()
    }

    // --- Ordering ---

    pub fn sort(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.data.sort_unstable();
        self
    }

    pub fn sorted(&self) -> Self
    where
        T: Ord + Clone,
    {
        let mut a = self.clone();
        a.sort();
        a
    }

    /// Sorts descending.
    pub fn rsort(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.data.sort_unstable_by(|a, b| b.cmp(a));
        self
    }

    pub fn rsorted(&self) -> Self
    where
        T: Ord + Clone,
    {
        let mut a = self.clone();
        a.rsort();
        a
    }

    pub fn sort_by<F: FnMut(&T, &T) -> Ordering>(&mut self, f: F) -> &mut Self {
        self.data.sort_unstable_by(f);
        self
    }

    pub fn sorted_by<F: FnMut(&T, &T) -> Ordering>(&self, f: F) -> Self
    where
        T: Clone,
    {
        let mut a = self.clone();
        a.sort_by(f);
        a
    }

    pub fn stable_sort(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.data.sort();
        self
    }

    pub fn stable_sorted(&self) -> Self
    where
        T: Ord + Clone,
    {
        let mut a = self.clone();
        a.stable_sort();
        a
    }

    pub fn stable_sort_by<F: FnMut(&T, &T) -> Ordering>(&mut self, f: F) -> &mut Self {
        self.data.sort_by(f);
        self
    }

    /// Sorts, then drops duplicates.
    pub fn sort_and_unique(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.data.sort_unstable();
        self.data.dedup();
        self
    }

    pub fn sorted_and_uniqued(&self) -> Self
    where
        T: Ord + Clone,
    {
        let mut a = self.clone();
        a.sort_and_unique();
        a
    }

    /// Drops duplicates, keeping the first occurrence of each value in place.
    pub fn stable_unique(&mut self) -> &mut Self
    where
        T: Hash + Eq + Clone,
    {
        let mut seen = HashSet::with_capacity(self.data.len());
        self.data.retain(|x| seen.insert(x.clone()));
        self
    }

    pub fn stable_uniqued(&self) -> Self
    where
        T: Hash + Eq + Clone,
    {
        let mut seen = HashSet::with_capacity(self.data.len());
        self.data.iter().filter(|x| seen.insert(*x)).cloned().collect()
    }

    /// Collapses runs of equal elements.
    pub fn unique_consecutive(&mut self) -> &mut Self
    where
        T: PartialEq,
    {
        self.data.dedup();
        self
    }

    pub fn uniqued_consecutive(&self) -> Self
    where
        T: PartialEq + Clone,
    {
        let mut a = self.clone();
        a.unique_consecutive();
        a
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.data.reverse();
        self
    }

    pub fn reversed(&self) -> Self
    where
        T: Clone,
    {
        self.data.iter().rev().cloned().collect()
    }

    /// Rotates left by `count` (right when negative), modulo the length.
    pub fn rotate(&mut self, count: isize) -> &mut Self {
        if !self.data.is_empty() {
            let k = count.rem_euclid(self.data.len() as isize) as usize;
            self.data.rotate_left(k);
        }
        self
    }

    pub fn rotated(&self, count: isize) -> Self
    where
        T: Clone,
    {
        let mut a = self.clone();
        a.rotate(count);
        a
    }

    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::thread_rng())
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        self.data.shuffle(rng);
        self
    }

    pub fn shuffled(&self) -> Self
    where
        T: Clone,
    {
        self.shuffled_with(&mut rand::thread_rng())
    }

    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Self
    where
        T: Clone,
    {
        let mut a = self.clone();
        a.shuffle_with(rng);
        a
    }

    /// Moves elements matching `f` to the front and returns how many there are.
    /// Relative order is not kept.
    pub fn partition<F: FnMut(&T) -> bool>(&mut self, mut f: F) -> usize {
        let mut split = 0;
        for i in 0..self.data.len() {
            if f(&self.data[i]) {
                self.data.swap(split, i);
                split += 1;
            }
        }
        split
    }

    /// Like [`Array::partition`], keeping the relative order inside both groups.
    pub fn stable_partition<F: FnMut(&T) -> bool>(&mut self, mut f: F) -> usize {
        let (mut yes, no): (Vec<T>, Vec<T>) = std::mem::take(&mut self.data).into_iter().partition(|x| f(x));
        let split = yes.len();
        yes.extend(no);
        self.data = yes;
        split
    }

    // --- Selection ---

    pub fn take(&self, n: usize) -> Self
    where
        T: Clone,
    {
        self.data.iter().take(n).cloned().collect()
    }

    pub fn take_while<F: FnMut(&T) -> bool>(&self, mut f: F) -> Self
    where
        T: Clone,
    {
        self.data.iter().take_while(|x| f(x)).cloned().collect()
    }

    pub fn drop(&self, n: usize) -> Self
    where
        T: Clone,
    {
        self.data.iter().skip(n).cloned().collect()
    }

    pub fn drop_while<F: FnMut(&T) -> bool>(&self, mut f: F) -> Self
    where
        T: Clone,
    {
        self.data.iter().skip_while(|x| f(x)).cloned().collect()
    }

    /// Elements from `index` to the end; empty if `index` is past the end.
    pub fn slice(&self, index: usize) -> Self
    where
        T: Clone,
    {
        self.slice_len(index, usize::MAX)
    }

    /// Up to `length` elements from `index`; empty if `index` is past the end.
    pub fn slice_len(&self, index: usize, length: usize) -> Self
    where
        T: Clone,
    {
        Self { data: self.subspan(index, length).to_vec() }
    }

    /// Splits into arrays of `n` elements; the last one may be shorter.
    /// Empty when `n == 0`.
    pub fn chunk(&self, n: usize) -> Array<Array<T>>
    where
        T: Clone,
    {
        if n == 0 {
            return Array::new();
        }
        self.data.chunks(n).map(|c| Self { data: c.to_vec() }).collect()
    }

    /// Splits into exactly `group` arrays of near-equal size; the first
    /// `len % group` get one extra element. Empty when `group == 0`.
    pub fn in_groups(&self, group: usize) -> Array<Array<T>>
    where
        T: Clone,
    {
        let mut result = Array::with_capacity(group);
        if group == 0 {
            return result;
        }
        let div = self.data.len() / group;
        let rem = self.data.len() % group;
        let mut start = 0;
        for i in 0..group {
            let length = div + usize::from(i < rem);
            result.push_back(Self { data: self.data[start..start + length].to_vec() });
            start += length;
        }
        result
    }

    /// Gathers the elements at `indices`. Fails without a partial result if
    /// any index is out of range.
    pub fn values_at(&self, indices: &[usize]) -> Result<Self>
    where
        T: Clone,
    {
        let len = self.data.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(ArrayError::ValuesAtOutOfRange { index, len });
        }
        Ok(indices.iter().map(|&i| self.data[i].clone()).collect())
    }

    /// A uniformly random element from the default generator.
    pub fn choice(&self) -> Result<&T> {
        self.choice_with(&mut rand::thread_rng())
    }

    pub fn choice_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T> {
        self.data.choose(rng).ok_or(ArrayError::Empty { operation: "choice" })
    }

    /// Up to `n` distinct positions sampled without replacement, in their original order.
    pub fn choice_multiple(&self, n: usize) -> Self
    where
        T: Clone,
    {
        self.choice_multiple_with(n, &mut rand::thread_rng())
    }

    pub fn choice_multiple_with<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Self
    where
        T: Clone,
    {
        let amount = n.min(self.data.len());
        let mut picked = rand::seq::index::sample(rng, self.data.len(), amount).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|i| self.data[i].clone()).collect()
    }

    // --- Higher order ---

    pub fn each<F: FnMut(&T)>(&self, f: F) {
        self.data.iter().for_each(f);
    }

    pub fn each_mut<F: FnMut(&mut T)>(&mut self, f: F) {
        self.data.iter_mut().for_each(f);
    }

    pub fn each_index<F: FnMut(usize, &T)>(&self, mut f: F) {
        for (i, x) in self.data.iter().enumerate() {
            f(i, x);
        }
    }

    /// Like [`Array::each_index`] with a signed index.
    pub fn each_sindex<F: FnMut(isize, &T)>(&self, mut f: F) {
        for (i, x) in self.data.iter().enumerate() {
            f(i as isize, x);
        }
    }

    pub fn each_reverse<F: FnMut(&T)>(&self, f: F) {
        self.data.iter().rev().for_each(f);
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Array<U> {
        self.data.iter().map(f).collect()
    }

    pub fn filter<F: FnMut(&T) -> bool>(&self, mut f: F) -> Self
    where
        T: Clone,
    {
        self.data.iter().filter(|x| f(x)).cloned().collect()
    }

    pub fn filter_map<U, F: FnMut(&T) -> Option<U>>(&self, f: F) -> Array<U> {
        self.data.iter().filter_map(f).collect()
    }

    /// Left fold starting at `init`.
    pub fn reduce<A, F: FnMut(A, &T) -> A>(&self, f: F, init: A) -> A {
        self.data.iter().fold(init, f)
    }

    /// Left fold seeded with the first element.
    pub fn reduce1<F: FnMut(T, &T) -> T>(&self, f: F) -> Result<T>
    where
        T: Clone,
    {
        let (first, rest) = self.data.split_first().ok_or(ArrayError::Empty { operation: "reduce1" })?;
        Ok(rest.iter().fold(first.clone(), f))
    }

    /// Renders the elements through `Debug`, e.g. `join(", ", "[", "]")`.
    pub fn join(&self, sep: &str, begin: &str, end: &str) -> String
    where
        T: Debug,
    {
        joined(&self.data, sep, begin, end)
    }
}

impl<T: Clone> Sequence for Array<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.data.len()
    }

    fn capacity(&self) -> usize {
        self.data.capacity()
    }

    fn element(&self, index: usize) -> Option<T> {
        self.data.get(index).cloned()
    }

    fn push_back(&mut self, value: T) {
        self.data.push(value);
    }

    fn pop_back(&mut self) -> Option<T> {
        self.data.pop()
    }

    fn push_front(&mut self, value: T) {
        self.data.insert(0, value);
    }

    fn pop_front(&mut self) -> Option<T> {
        Array::pop_front(self)
    }

    fn insert(&mut self, index: usize, value: T) {
        self.data.insert(index, value);
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        Array::remove_at(self, index)
    }

    fn clear(&mut self) {
        self.data.clear();
    }

    fn release(&mut self) {
        self.data = Vec::new();
    }

    fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }
}

impl<T: Debug> Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.data).finish()
    }
}

impl<T: Debug> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.data, ", ", "[", "]")
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Array<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> AsRef<[T]> for Array<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Clone> From<&[T]> for Array<T> {
    fn from(values: &[T]) -> Self {
        Self { data: values.to_vec() }
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(values: [T; N]) -> Self {
        Self { data: Vec::from(values) }
    }
}

impl<T> From<Array<T>> for Vec<T> {
    fn from(array: Array<T>) -> Self {
        array.data
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { data: iter.into_iter().collect() }
    }
}

impl<T> Extend<T> for Array<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Array<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}
