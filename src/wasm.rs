//! JavaScript bindings for the KD-tree and the packed boolean array.
//!
//! The JS side hands over flat `Float64Array` coordinates, so the bindings own
//! their points and query them through a [`FlatAdapter`].

use wasm_bindgen::prelude::*;

use crate::adapter::FlatAdapter;
use crate::array::BitArray;
use crate::kdtree::KdTree;
use crate::params::{KdParams, SearchParams};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// Flat coordinates plus the tree built over them.
struct OwnedIndex<const D: usize> {
    coords: Vec<f64>,
    tree: KdTree<f64, D>,
}

impl<const D: usize> OwnedIndex<D> {
    fn new(coords: &[f64], leaf_max_size: usize) -> Self {
        let params = KdParams::default().with_leaf_max_size(leaf_max_size.max(1));
        let mut index = Self { coords: coords.to_vec(), tree: KdTree::with_params(params) };
        index.rebuild();
        index
    }

    fn adapter(&self) -> FlatAdapter<'_, f64, D, u32> {
        FlatAdapter::new(&self.coords)
    }

    fn rebuild(&mut self) {
        let dataset = FlatAdapter::<f64, D, u32>::new(&self.coords);
        self.tree.build(&dataset);
    }

    fn set_points(&mut self, coords: &[f64]) {
        self.coords = coords.to_vec();
        self.rebuild();
    }

    fn knn(&self, k: usize, query: [f64; D]) -> Vec<(u32, f64)> {
        self.tree.knn_pairs(&self.adapter(), k, &query)
    }

    fn radius(&self, query: [f64; D], radius: f64, sorted: bool) -> Vec<(u32, f64)> {
        let search = SearchParams::default().with_sorted(sorted);
        self.tree.radius_pairs(&self.adapter(), &query, radius, &search)
    }
}

fn indices_of(pairs: &[(u32, f64)]) -> Vec<u32> {
    pairs.iter().map(|&(i, _)| i).collect()
}

fn distances_of(pairs: &[(u32, f64)]) -> Vec<f64> {
    pairs.iter().map(|&(_, d)| d).collect()
}

// --- 2D ---

/// KD-tree over 2D points given as `[x, y, x, y, ...]`.
#[wasm_bindgen(js_name = PointIndex2D)]
pub struct PointIndex2D {
    inner: OwnedIndex<2>,
}

#[wasm_bindgen(js_class = PointIndex2D)]
impl PointIndex2D {
    #[wasm_bindgen(constructor)]
    pub fn new(coords: &[f64], leaf_max_size: usize) -> PointIndex2D {
        PointIndex2D { inner: OwnedIndex::new(coords, leaf_max_size) }
    }
    pub fn set_points(&mut self, coords: &[f64]) { self.inner.set_points(coords); }
    #[wasm_bindgen(getter)]
    pub fn count_points(&self) -> usize { self.inner.coords.len() / 2 }
    #[wasm_bindgen(getter)]
    pub fn used_memory(&self) -> usize { self.inner.tree.used_memory() }
    pub fn knn(&self, k: usize, x: f64, y: f64) -> Vec<u32> { indices_of(&self.inner.knn(k, [x, y])) }
    pub fn knn_distances(&self, k: usize, x: f64, y: f64) -> Vec<f64> { distances_of(&self.inner.knn(k, [x, y])) }
    pub fn radius(&self, x: f64, y: f64, radius: f64, sorted: bool) -> Vec<u32> {
        indices_of(&self.inner.radius([x, y], radius, sorted))
    }
    pub fn radius_distances(&self, x: f64, y: f64, radius: f64, sorted: bool) -> Vec<f64> {
        distances_of(&self.inner.radius([x, y], radius, sorted))
    }
}

// --- 3D ---

/// KD-tree over 3D points given as `[x, y, z, x, y, z, ...]`.
#[wasm_bindgen(js_name = PointIndex3D)]
pub struct PointIndex3D {
    inner: OwnedIndex<3>,
}

#[wasm_bindgen(js_class = PointIndex3D)]
impl PointIndex3D {
    #[wasm_bindgen(constructor)]
    pub fn new(coords: &[f64], leaf_max_size: usize) -> PointIndex3D {
        PointIndex3D { inner: OwnedIndex::new(coords, leaf_max_size) }
    }
    pub fn set_points(&mut self, coords: &[f64]) { self.inner.set_points(coords); }
    #[wasm_bindgen(getter)]
    pub fn count_points(&self) -> usize { self.inner.coords.len() / 3 }
    #[wasm_bindgen(getter)]
    pub fn used_memory(&self) -> usize { self.inner.tree.used_memory() }
    pub fn knn(&self, k: usize, x: f64, y: f64, z: f64) -> Vec<u32> { indices_of(&self.inner.knn(k, [x, y, z])) }
    pub fn knn_distances(&self, k: usize, x: f64, y: f64, z: f64) -> Vec<f64> {
        distances_of(&self.inner.knn(k, [x, y, z]))
    }
    pub fn radius(&self, x: f64, y: f64, z: f64, radius: f64, sorted: bool) -> Vec<u32> {
        indices_of(&self.inner.radius([x, y, z], radius, sorted))
    }
    pub fn radius_distances(&self, x: f64, y: f64, z: f64, radius: f64, sorted: bool) -> Vec<f64> {
        distances_of(&self.inner.radius([x, y, z], radius, sorted))
    }
}

// --- BoolArray ---

/// Packed boolean array. Values cross the boundary as bytes (`0` is `false`).
#[wasm_bindgen(js_name = BoolArray)]
pub struct BoolArray {
    inner: BitArray,
}

#[wasm_bindgen(js_class = BoolArray)]
impl BoolArray {
    #[wasm_bindgen(constructor)]
    pub fn new(count: usize, value: bool) -> BoolArray {
        BoolArray { inner: BitArray::from_elem(count, value) }
    }
    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(values: &[u8]) -> BoolArray {
        BoolArray { inner: values.iter().map(|&b| b != 0).collect() }
    }
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> { self.inner.iter().map(u8::from).collect() }
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize { self.inner.len() }
    pub fn get(&self, index: usize) -> Option<bool> { self.inner.get(index) }
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), JsError> {
        if index >= self.inner.len() {
            return Err(JsError::from(crate::error::ArrayError::OutOfRange { index, len: self.inner.len() }));
        }
        self.inner.set(index, value);
        Ok(())
    }
    pub fn push(&mut self, value: bool) { self.inner.push_back(value); }
    pub fn pop(&mut self) -> Option<bool> { self.inner.pop_back() }
    pub fn remove_at(&mut self, index: usize) -> Result<bool, JsError> { Ok(self.inner.remove_at(index)?) }
    pub fn sum(&self) -> usize { self.inner.sum() }
    pub fn sort(&mut self) { self.inner.sort(); }
    pub fn rsort(&mut self) { self.inner.rsort(); }
    pub fn shuffle(&mut self) { self.inner.shuffle(); }
    pub fn reverse(&mut self) { self.inner.reverse(); }
    pub fn fill(&mut self, value: bool) { self.inner.fill(value); }
    #[wasm_bindgen(js_name = toString)]
    pub fn to_js_string(&self) -> String { self.inner.to_string() }
}
