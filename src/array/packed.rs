use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::ops::Index;

use rand::Rng;

use super::format::{joined, write_joined};
use super::{Array, Sequence};
use crate::error::{ArrayError, Result};

const WORD_BITS: usize = u64::BITS as usize;

#[inline]
fn words_for(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

#[inline]
fn fill_word(value: bool) -> u64 {
    if value { !0 } else { 0 }
}

/// A growable array of booleans packed 64 to a word.
///
/// The operation set mirrors [`Array`]. Where the two-valued domain allows it,
/// operations reduce to counting: `sort` is a count of `true`s followed by two
/// fills, `sort_and_unique` is two presence tests, `sum` is a population
/// count, and replacing one value with the other is a fill.
///
/// Bits past `len` in the last word are always zero.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitArray {
    words: Vec<u64>,
    len: usize,
}

impl BitArray {
    pub fn new() -> Self {
        Self { words: Vec::new(), len: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { words: Vec::with_capacity(words_for(capacity)), len: 0 }
    }

    /// `count` copies of `value`.
    pub fn from_elem(count: usize, value: bool) -> Self {
        let mut a = Self { words: vec![fill_word(value); words_for(count)], len: count };
        a.clear_tail();
        a
    }

    /// `count` elements produced by an index-aware generator.
    pub fn from_fn<F: FnMut(usize) -> bool>(count: usize, mut f: F) -> Self {
        let mut a = Self::with_capacity(count);
        for i in 0..count {
            a.push_back(f(i));
        }
        a
    }

    /// `count` elements produced by calling `f` repeatedly.
    pub fn generate<F: FnMut() -> bool>(count: usize, mut f: F) -> Self {
        Self::from_fn(count, |_| f())
    }

    /// The backing words, least significant bit first.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn iter(&self) -> BitIter<'_> {
        BitIter { bits: self, front: 0, back: self.len }
    }

    #[inline]
    fn bit(&self, index: usize) -> bool {
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 != 0
    }

    #[inline]
    fn set_bit(&mut self, index: usize, value: bool) {
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        if value { *word |= mask } else { *word &= !mask }
    }

    /// Zeroes the unused high bits of the last word.
    fn clear_tail(&mut self) {
        let used = self.len % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }

    /// Sets `[start, end)` to `value`, whole words at a time where possible.
    fn set_range(&mut self, start: usize, end: usize, value: bool) {
        let mut i = start;
        while i < end && i % WORD_BITS != 0 {
            self.set_bit(i, value);
            i += 1;
        }
        while i + WORD_BITS <= end {
            self.words[i / WORD_BITS] = fill_word(value);
            i += WORD_BITS;
        }
        while i < end {
            self.set_bit(i, value);
            i += 1;
        }
    }

    /// Appends `count` copies of `value`.
    fn extend_with(&mut self, count: usize, value: bool) {
        let start = self.len;
        self.len += count;
        self.words.resize(words_for(self.len), 0);
        if value {
            self.set_range(start, self.len, true);
        }
    }

    /// Replaces the contents with `zeros` falses followed by `ones` trues, or the reverse.
    fn fill_counted(&mut self, first: bool, first_count: usize) {
        let len = self.len;
        self.set_range(0, first_count, first);
        self.set_range(first_count, len, !first);
        self.clear_tail();
    }

    // --- Assignment ---

    pub fn assign(&mut self, count: usize, value: bool) -> &mut Self {
        self.words.clear();
        self.len = 0;
        self.extend_with(count, value);
        self
    }

    pub fn assign_from_slice(&mut self, values: &[bool]) -> &mut Self {
        self.words.clear();
        self.len = 0;
        self.extend(values.iter().copied());
        self
    }

    pub fn fill(&mut self, value: bool) -> &mut Self {
        self.words.fill(fill_word(value));
        self.clear_tail();
        self
    }

    // --- Element access ---

    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| self.bit(index))
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<bool> {
        self.get(index).ok_or(ArrayError::OutOfRange { index, len: self.len })
    }

    /// Overwrites the element at `index`. Panics if out of range.
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "index out of range: the index is {} but the length is {}", index, self.len);
        self.set_bit(index, value);
    }

    /// Inverts the element at `index`. Panics if out of range.
    pub fn flip(&mut self, index: usize) {
        assert!(index < self.len, "index out of range: the index is {} but the length is {}", index, self.len);
        self.words[index / WORD_BITS] ^= 1u64 << (index % WORD_BITS);
    }

    pub fn flip_all(&mut self) -> &mut Self {
        for w in &mut self.words {
            *w = !*w;
        }
        self.clear_tail();
        self
    }

    pub fn front(&self) -> Option<bool> {
        self.get(0)
    }

    pub fn back(&self) -> Option<bool> {
        self.len.checked_sub(1).map(|i| self.bit(i))
    }

    /// The element at `index`, or `default` if out of range.
    pub fn fetch(&self, index: usize, default: bool) -> bool {
        self.get(index).unwrap_or(default)
    }

    /// A view of up to `count` elements starting at `offset`, clamped to the array.
    pub fn subspan(&self, offset: usize, count: usize) -> BitSpan<'_> {
        let start = offset.min(self.len);
        let len = count.min(self.len - start);
        BitSpan { bits: self, start, len }
    }

    // --- Capacity ---

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.words.capacity() * WORD_BITS
    }

    /// Size of the backing words in bytes.
    pub fn size_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    pub fn reserve(&mut self, additional: usize) {
        let needed = words_for(self.len + additional);
        self.words.reserve(needed.saturating_sub(self.words.len()));
    }

    pub fn shrink_to_fit(&mut self) {
        self.words.shrink_to_fit();
    }

    pub fn resize(&mut self, len: usize, value: bool) {
        if len <= self.len {
            self.truncate(len);
        } else {
            self.extend_with(len - self.len, value);
        }
    }

    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
            self.words.truncate(words_for(len));
            self.clear_tail();
        }
    }

    /// Removes every element and keeps the allocation.
    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
    }

    /// Removes every element and frees the allocation.
    pub fn release(&mut self) {
        self.words = Vec::new();
        self.len = 0;
    }

    // --- Insertion and removal ---

    pub fn push_back(&mut self, value: bool) {
        if self.len % WORD_BITS == 0 {
            self.words.push(0);
        }
        self.len += 1;
        self.set_bit(self.len - 1, value);
    }

    pub fn push_front(&mut self, value: bool) {
        self.insert(0, value);
    }

    pub fn pop_back(&mut self) -> Option<bool> {
        let value = self.back()?;
        self.truncate(self.len - 1);
        Some(value)
    }

    pub fn pop_front(&mut self) -> Option<bool> {
        if self.is_empty() { None } else { self.remove_at(0).ok() }
    }

    /// Inserts at `index`, shifting later elements up. Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: bool) {
        assert!(index <= self.len, "insertion index (is {}) should be <= len (is {})", index, self.len);
        self.push_back(false);
        let w = index / WORD_BITS;
        let low_mask = (1u64 << (index % WORD_BITS)) - 1;
        for k in (w + 1..self.words.len()).rev() {
            self.words[k] = (self.words[k] << 1) | (self.words[k - 1] >> (WORD_BITS - 1));
        }
        let word = self.words[w];
        self.words[w] = (word & low_mask) | ((word & !low_mask) << 1);
        self.set_bit(index, value);
        self.clear_tail();
    }

    pub fn append<I: IntoIterator<Item = bool>>(&mut self, values: I) -> &mut Self {
        self.extend(values);
        self
    }

    /// Removes and returns the element at `index`, shifting later elements down.
    pub fn remove_at(&mut self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(ArrayError::RemoveOutOfRange { index, len: self.len });
        }
        let value = self.bit(index);
        let w = index / WORD_BITS;
        let low_mask = (1u64 << (index % WORD_BITS)) - 1;
        let word = self.words[w];
        self.words[w] = (word & low_mask) | ((word >> 1) & !low_mask);
        for k in w + 1..self.words.len() {
            self.words[k - 1] |= (self.words[k] & 1) << (WORD_BITS - 1);
            self.words[k] >>= 1;
        }
        self.len -= 1;
        self.words.truncate(words_for(self.len));
        self.clear_tail();
        Ok(value)
    }

    pub fn removed_at(&self, index: usize) -> Result<Self> {
        let mut a = self.clone();
        a.remove_at(index)?;
        Ok(a)
    }

    /// Removes every element equal to `value`: what is left is `!value`, once per occurrence.
    pub fn remove(&mut self, value: bool) -> &mut Self {
        let keep = self.count(!value);
        self.assign(keep, !value)
    }

    pub fn removed(&self, value: bool) -> Self {
        Self::from_elem(self.count(!value), !value)
    }

    pub fn remove_if<F: FnMut(bool) -> bool>(&mut self, mut f: F) -> &mut Self {
        *self = self.iter().filter(|&x| !f(x)).collect();
        self
    }

    pub fn removed_if<F: FnMut(bool) -> bool>(&self, mut f: F) -> Self {
        self.iter().filter(|&x| !f(x)).collect()
    }

    /// Keeps only the elements matching `f`.
    pub fn keep_if<F: FnMut(bool) -> bool>(&mut self, mut f: F) -> &mut Self {
        *self = self.iter().filter(|&x| f(x)).collect();
        self
    }

    // --- Replacement ---

    /// Replaces every `old_value` with `new_value`. With only two values this
    /// is either a no-op or a fill.
    pub fn replace(&mut self, old_value: bool, new_value: bool) -> &mut Self {
        if old_value != new_value {
            self.fill(new_value);
        }
        self
    }

    pub fn replaced(&self, old_value: bool, new_value: bool) -> Self {
        if old_value != new_value {
            Self::from_elem(self.len, new_value)
        } else {
            self.clone()
        }
    }

    pub fn replace_if<F: FnMut(bool) -> bool>(&mut self, mut f: F, new_value: bool) -> &mut Self {
        for i in 0..self.len {
            if f(self.bit(i)) {
                self.set_bit(i, new_value);
            }
        }
        self
    }

    pub fn replaced_if<F: FnMut(bool) -> bool>(&self, mut f: F, new_value: bool) -> Self {
        self.iter().map(|x| if f(x) { new_value } else { x }).collect()
    }

    // --- Predicates and counting ---

    pub fn all<F: FnMut(bool) -> bool>(&self, f: F) -> bool {
        self.iter().all(f)
    }

    pub fn any<F: FnMut(bool) -> bool>(&self, f: F) -> bool {
        self.iter().any(f)
    }

    pub fn none<F: FnMut(bool) -> bool>(&self, f: F) -> bool {
        !self.iter().any(f)
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    pub fn count(&self, value: bool) -> usize {
        if value { self.count_ones() } else { self.count_zeros() }
    }

    pub fn count_if<F: FnMut(bool) -> bool>(&self, mut f: F) -> usize {
        self.iter().filter(|&x| f(x)).count()
    }

    pub fn contains(&self, value: bool) -> bool {
        if value {
            self.words.iter().any(|&w| w != 0)
        } else {
            self.count_ones() < self.len
        }
    }

    pub fn contains_if<F: FnMut(bool) -> bool>(&self, f: F) -> bool {
        self.iter().any(f)
    }

    /// Whether every `false` precedes every `true`.
    pub fn is_sorted(&self) -> bool {
        let zeros = self.count_zeros();
        self.iter().take(zeros).all(|x| !x)
    }

    /// Number of `true` elements.
    pub fn sum(&self) -> usize {
        self.count_ones()
    }

    // --- Ordering ---

    /// Counting sort: all `false`s, then all `true`s.
    pub fn sort(&mut self) -> &mut Self {
        let zeros = self.count_zeros();
        self.fill_counted(false, zeros);
        self
    }

    pub fn sorted(&self) -> Self {
        let mut a = Self::from_elem(self.len, true);
        a.set_range(0, self.count_zeros(), false);
        a
    }

    /// All `true`s, then all `false`s.
    pub fn rsort(&mut self) -> &mut Self {
        let ones = self.count_ones();
        self.fill_counted(true, ones);
        self
    }

    pub fn rsorted(&self) -> Self {
        let mut a = Self::from_elem(self.len, false);
        a.set_range(0, self.count_ones(), true);
        a
    }

    pub fn sort_by<F: FnMut(&bool, &bool) -> Ordering>(&mut self, f: F) -> &mut Self {
        let mut values: Vec<bool> = self.iter().collect();
        values.sort_unstable_by(f);
        self.assign_from_slice(&values)
    }

    pub fn sorted_by<F: FnMut(&bool, &bool) -> Ordering>(&self, f: F) -> Self {
        let mut a = self.clone();
        a.sort_by(f);
        a
    }

    /// Equal booleans are indistinguishable, so this is [`BitArray::sort`].
    pub fn stable_sort(&mut self) -> &mut Self {
        self.sort()
    }

    pub fn stable_sorted(&self) -> Self {
        self.sorted()
    }

    pub fn stable_sort_by<F: FnMut(&bool, &bool) -> Ordering>(&mut self, f: F) -> &mut Self {
        let mut values: Vec<bool> = self.iter().collect();
        values.sort_by(f);
        self.assign_from_slice(&values)
    }

    /// Leaves `[]`, `[false]`, `[true]` or `[false, true]`.
    pub fn sort_and_unique(&mut self) -> &mut Self {
        *self = self.sorted_and_uniqued();
        self
    }

    pub fn sorted_and_uniqued(&self) -> Self {
        let mut a = Self::with_capacity(2);
        if self.contains(false) {
            a.push_back(false);
        }
        if self.contains(true) {
            a.push_back(true);
        }
        a
    }

    /// Keeps the first occurrence of each value, in order of appearance.
    pub fn stable_unique(&mut self) -> &mut Self {
        *self = self.stable_uniqued();
        self
    }

    pub fn stable_uniqued(&self) -> Self {
        let mut a = Self::with_capacity(2);
        if let Some(first) = self.front() {
            a.push_back(first);
            if self.contains(!first) {
                a.push_back(!first);
            }
        }
        a
    }

    /// Collapses runs of equal elements.
    pub fn unique_consecutive(&mut self) -> &mut Self {
        *self = self.uniqued_consecutive();
        self
    }

    pub fn uniqued_consecutive(&self) -> Self {
        let mut a = Self::new();
        for x in self.iter() {
            if a.back() != Some(x) {
                a.push_back(x);
            }
        }
        a
    }

    pub fn reverse(&mut self) -> &mut Self {
        let n = self.len;
        for i in 0..n / 2 {
            let (a, b) = (self.bit(i), self.bit(n - 1 - i));
            self.set_bit(i, b);
            self.set_bit(n - 1 - i, a);
        }
        self
    }

    pub fn reversed(&self) -> Self {
        self.iter().rev().collect()
    }

    /// Rotates left by `count` (right when negative), modulo the length.
    pub fn rotate(&mut self, count: isize) -> &mut Self {
        *self = self.rotated(count);
        self
    }

    pub fn rotated(&self, count: isize) -> Self {
        if self.is_empty() {
            return Self::new();
        }
        let k = count.rem_euclid(self.len as isize) as usize;
        self.iter().skip(k).chain(self.iter().take(k)).collect()
    }

    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// A uniform permutation of a two-valued multiset is a uniform choice of
    /// where the `true`s go.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        let ones = self.count_ones();
        let positions = rand::seq::index::sample(rng, self.len, ones);
        self.fill(false);
        for i in positions.iter() {
            self.set_bit(i, true);
        }
        self
    }

    pub fn shuffled(&self) -> Self {
        self.shuffled_with(&mut rand::thread_rng())
    }

    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut a = self.clone();
        a.shuffle_with(rng);
        a
    }

    /// Moves elements matching `f` to the front and returns how many there are.
    pub fn partition<F: FnMut(bool) -> bool>(&mut self, f: F) -> usize {
        self.stable_partition(f)
    }

    /// Like [`BitArray::partition`]; both groups keep their relative order.
    pub fn stable_partition<F: FnMut(bool) -> bool>(&mut self, mut f: F) -> usize {
        let mut yes = Self::with_capacity(self.len);
        let mut no = Self::new();
        for x in self.iter() {
            if f(x) { yes.push_back(x) } else { no.push_back(x) }
        }
        let split = yes.len;
        yes.extend(no.iter());
        *self = yes;
        split
    }

    // --- Selection ---

    pub fn take(&self, n: usize) -> Self {
        self.slice_len(0, n)
    }

    pub fn take_while<F: FnMut(bool) -> bool>(&self, mut f: F) -> Self {
        self.iter().take_while(|&x| f(x)).collect()
    }

    pub fn drop(&self, n: usize) -> Self {
        self.slice(n)
    }

    pub fn drop_while<F: FnMut(bool) -> bool>(&self, mut f: F) -> Self {
        self.iter().skip_while(|&x| f(x)).collect()
    }

    /// Elements from `index` to the end; empty if `index` is past the end.
    pub fn slice(&self, index: usize) -> Self {
        self.slice_len(index, usize::MAX)
    }

    /// Up to `length` elements from `index`; empty if `index` is past the end.
    pub fn slice_len(&self, index: usize, length: usize) -> Self {
        self.subspan(index, length).to_bit_array()
    }

    /// Splits into arrays of `n` elements; the last one may be shorter.
    /// Empty when `n == 0`.
    pub fn chunk(&self, n: usize) -> Array<BitArray> {
        if n == 0 {
            return Array::new();
        }
        (0..self.len).step_by(n).map(|start| self.slice_len(start, n)).collect()
    }

    /// Splits into exactly `group` arrays of near-equal size; the first
    /// `len % group` get one extra element. Empty when `group == 0`.
    pub fn in_groups(&self, group: usize) -> Array<BitArray> {
        let mut result = Array::with_capacity(group);
        if group == 0 {
            return result;
        }
        let div = self.len / group;
        let rem = self.len % group;
        let mut start = 0;
        for i in 0..group {
            let length = div + usize::from(i < rem);
            result.push_back(self.slice_len(start, length));
            start += length;
        }
        result
    }

    /// Gathers the elements at `indices`. Fails without a partial result if
    /// any index is out of range.
    pub fn values_at(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.len) {
            return Err(ArrayError::ValuesAtOutOfRange { index, len: self.len });
        }
        Ok(indices.iter().map(|&i| self.bit(i)).collect())
    }

    /// A uniformly random element from the default generator.
    pub fn choice(&self) -> Result<bool> {
        self.choice_with(&mut rand::thread_rng())
    }

    pub fn choice_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<bool> {
        if self.is_empty() {
            return Err(ArrayError::Empty { operation: "choice" });
        }
        Ok(self.bit(rng.gen_range(0..self.len)))
    }

    /// Up to `n` distinct positions sampled without replacement, in their original order.
    pub fn choice_multiple(&self, n: usize) -> Self {
        self.choice_multiple_with(n, &mut rand::thread_rng())
    }

    pub fn choice_multiple_with<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Self {
        let amount = n.min(self.len);
        let mut picked = rand::seq::index::sample(rng, self.len, amount).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|i| self.bit(i)).collect()
    }

    // --- Higher order ---

    pub fn each<F: FnMut(bool)>(&self, f: F) {
        self.iter().for_each(f);
    }

    pub fn each_index<F: FnMut(usize, bool)>(&self, mut f: F) {
        for (i, x) in self.iter().enumerate() {
            f(i, x);
        }
    }

    /// Like [`BitArray::each_index`] with a signed index.
    pub fn each_sindex<F: FnMut(isize, bool)>(&self, mut f: F) {
        for (i, x) in self.iter().enumerate() {
            f(i as isize, x);
        }
    }

    pub fn each_reverse<F: FnMut(bool)>(&self, f: F) {
        self.iter().rev().for_each(f);
    }

    /// Maps into a generic [`Array`]; the result type need not be `bool`.
    pub fn map<U, F: FnMut(bool) -> U>(&self, f: F) -> Array<U> {
        self.iter().map(f).collect()
    }

    pub fn filter<F: FnMut(bool) -> bool>(&self, mut f: F) -> Self {
        self.iter().filter(|&x| f(x)).collect()
    }

    pub fn filter_map<U, F: FnMut(bool) -> Option<U>>(&self, f: F) -> Array<U> {
        self.iter().filter_map(f).collect()
    }

    /// Left fold starting at `init`.
    pub fn reduce<A, F: FnMut(A, bool) -> A>(&self, f: F, init: A) -> A {
        self.iter().fold(init, f)
    }

    /// Left fold seeded with the first element.
    pub fn reduce1<F: FnMut(bool, bool) -> bool>(&self, f: F) -> Result<bool> {
        let first = self.front().ok_or(ArrayError::Empty { operation: "reduce1" })?;
        Ok(self.iter().skip(1).fold(first, f))
    }

    /// Renders the elements, e.g. `join(", ", "[", "]")` gives `[true, false]`.
    pub fn join(&self, sep: &str, begin: &str, end: &str) -> String {
        joined(self.iter(), sep, begin, end)
    }
}

impl Sequence for BitArray {
    type Item = bool;

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        BitArray::capacity(self)
    }

    fn element(&self, index: usize) -> Option<bool> {
        self.get(index)
    }

    fn push_back(&mut self, value: bool) {
        BitArray::push_back(self, value);
    }

    fn pop_back(&mut self) -> Option<bool> {
        BitArray::pop_back(self)
    }

    fn push_front(&mut self, value: bool) {
        BitArray::insert(self, 0, value);
    }

    fn pop_front(&mut self) -> Option<bool> {
        BitArray::pop_front(self)
    }

    fn insert(&mut self, index: usize, value: bool) {
        BitArray::insert(self, index, value);
    }

    fn remove_at(&mut self, index: usize) -> Result<bool> {
        BitArray::remove_at(self, index)
    }

    fn clear(&mut self) {
        BitArray::clear(self);
    }

    fn release(&mut self) {
        BitArray::release(self);
    }

    fn reserve(&mut self, additional: usize) {
        BitArray::reserve(self, additional);
    }

    fn shrink_to_fit(&mut self) {
        self.words.shrink_to_fit();
    }
}

impl Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self.iter(), ", ", "[", "]")
    }
}

impl Index<usize> for BitArray {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        assert!(index < self.len, "index out of range: the index is {} but the length is {}", index, self.len);
        if self.bit(index) { &true } else { &false }
    }
}

impl From<Vec<bool>> for BitArray {
    fn from(values: Vec<bool>) -> Self {
        values.into_iter().collect()
    }
}

impl From<&[bool]> for BitArray {
    fn from(values: &[bool]) -> Self {
        values.iter().copied().collect()
    }
}

impl<const N: usize> From<[bool; N]> for BitArray {
    fn from(values: [bool; N]) -> Self {
        values.into_iter().collect()
    }
}

impl From<Array<bool>> for BitArray {
    fn from(values: Array<bool>) -> Self {
        values.into_iter().collect()
    }
}

impl From<BitArray> for Array<bool> {
    fn from(bits: BitArray) -> Self {
        bits.iter().collect()
    }
}

impl From<BitArray> for Vec<bool> {
    fn from(bits: BitArray) -> Self {
        bits.iter().collect()
    }
}

impl FromIterator<bool> for BitArray {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut a = Self::new();
        a.extend(iter);
        a
    }
}

impl Extend<bool> for BitArray {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for x in iter {
            self.push_back(x);
        }
    }
}

impl<'a> IntoIterator for &'a BitArray {
    type Item = bool;
    type IntoIter = BitIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for BitArray {
    type Item = bool;
    type IntoIter = std::vec::IntoIter<bool>;

    fn into_iter(self) -> Self::IntoIter {
        Vec::from(self).into_iter()
    }
}

/// Iterator over the elements of a [`BitArray`] or [`BitSpan`].
#[derive(Clone, Debug)]
pub struct BitIter<'a> {
    bits: &'a BitArray,
    front: usize,
    back: usize,
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        let x = self.bits.bit(self.front);
        self.front += 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for BitIter<'_> {
    fn next_back(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.bits.bit(self.back))
    }
}

impl ExactSizeIterator for BitIter<'_> {}

impl FusedIterator for BitIter<'_> {}

/// Borrowed window into a [`BitArray`].
#[derive(Clone, Copy, Debug)]
pub struct BitSpan<'a> {
    bits: &'a BitArray,
    start: usize,
    len: usize,
}

impl<'a> BitSpan<'a> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| self.bits.bit(self.start + index))
    }

    pub fn iter(&self) -> BitIter<'a> {
        BitIter { bits: self.bits, front: self.start, back: self.start + self.len }
    }

    pub fn to_bit_array(&self) -> BitArray {
        self.iter().collect()
    }
}

impl fmt::Display for BitSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self.iter(), ", ", "[", "]")
    }
}
