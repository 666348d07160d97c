//! Dataset-bound KD-tree index with k-NN and radius queries.

use rayon::prelude::*;

use crate::adapter::DatasetAdapter;
use crate::array::Array;
use crate::kdtree::KdTree;
use crate::params::{KdParams, SearchParams};
use crate::results::ResultSet;

/// A KD-tree bound to a borrowed dataset.
///
/// The index references the dataset, it does not own it, and it does not
/// notice when the dataset changes: call [`KdIndex::rebuild_index`] after
/// editing the points. Queries take `&self`, so a built index can be shared
/// across threads for concurrent reads.
///
/// All distances are squared Euclidean distances.
pub struct KdIndex<'a, A: DatasetAdapter<D>, const D: usize> {
    dataset: Option<&'a A>,
    tree: KdTree<A::Scalar, D>,
}

impl<'a, A: DatasetAdapter<D>, const D: usize> KdIndex<'a, A, D> {
    /// Wraps `dataset` and builds the tree immediately.
    pub fn new(dataset: &'a A) -> Self {
        Self::with_params(dataset, KdParams::default())
    }

    pub fn with_params(dataset: &'a A, params: KdParams) -> Self {
        let mut index = Self {
            dataset: Some(dataset),
            tree: KdTree::with_params(params),
        };
        index.rebuild_index();
        index
    }

    /// An index with no dataset. Queries return nothing until
    /// [`KdIndex::set_dataset`] is called.
    pub fn empty() -> Self {
        Self {
            dataset: None,
            tree: KdTree::new(),
        }
    }

    /// Points the index at `dataset` and rebuilds.
    pub fn set_dataset(&mut self, dataset: &'a A) {
        self.dataset = Some(dataset);
        self.rebuild_index();
    }

    pub fn dataset(&self) -> Option<&'a A> {
        self.dataset
    }

    pub fn tree(&self) -> &KdTree<A::Scalar, D> {
        &self.tree
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Recomputes the partition from the current dataset state.
    pub fn rebuild_index(&mut self) {
        let Some(dataset) = self.dataset else {
            return;
        };
        self.tree.build(dataset);
    }

    /// Frees the node storage. The dataset reference is kept; rebuild before querying again.
    pub fn release(&mut self) {
        let freed = self.tree.used_memory();
        self.tree.release();
        tracing::debug!(bytes = freed, "Released KD-tree index");
    }

    /// Bytes held by the tree structure. Diagnostics only.
    pub fn used_memory(&self) -> usize {
        self.tree.used_memory()
    }

    /// Feeds a search into any result set.
    pub fn find_neighbors<R>(&self, results: &mut R, query: &[A::Scalar; D], search: &SearchParams) -> bool
    where
        R: ResultSet<A::Scalar, A::Index>,
    {
        match self.dataset {
            Some(dataset) => {
                results.init();
                self.tree.find_neighbors(dataset, results, query, search)
            }
            None => true,
        }
    }

    /// The `min(k, len)` nearest points, closest first.
    pub fn knn_search(&self, k: usize, point: &A::Point) -> Array<A::Index> {
        self.knn_pairs(k, point).into_iter().map(|(i, _)| i).collect()
    }

    /// Like [`KdIndex::knn_search`], paired with squared distances.
    pub fn knn_search_with_distances(&self, k: usize, point: &A::Point) -> Array<(A::Index, A::Scalar)> {
        Array::from_vec(self.knn_pairs(k, point))
    }

    fn knn_pairs(&self, k: usize, point: &A::Point) -> Vec<(A::Index, A::Scalar)> {
        match self.dataset {
            Some(dataset) if k > 0 => self.tree.knn_pairs(dataset, k, &A::query_coords(point)),
            _ => Vec::new(),
        }
    }

    /// Every point within `radius` (linear) of `point`.
    pub fn radius_search(&self, point: &A::Point, radius: A::Scalar, sort_by_distance: bool) -> Array<A::Index> {
        let search = SearchParams::default().with_sorted(sort_by_distance);
        self.radius_pairs(point, radius, &search).into_iter().map(|(i, _)| i).collect()
    }

    /// Like [`KdIndex::radius_search`], paired with squared distances.
    pub fn radius_search_with_distances(
        &self,
        point: &A::Point,
        radius: A::Scalar,
        sort_by_distance: bool,
    ) -> Array<(A::Index, A::Scalar)> {
        let search = SearchParams::default().with_sorted(sort_by_distance);
        Array::from_vec(self.radius_pairs(point, radius, &search))
    }

    /// Radius search with explicit search parameters.
    pub fn radius_search_with_params(
        &self,
        point: &A::Point,
        radius: A::Scalar,
        search: &SearchParams,
    ) -> Array<(A::Index, A::Scalar)> {
        Array::from_vec(self.radius_pairs(point, radius, search))
    }

    fn radius_pairs(&self, point: &A::Point, radius: A::Scalar, search: &SearchParams) -> Vec<(A::Index, A::Scalar)> {
        match self.dataset {
            Some(dataset) => self.tree.radius_pairs(dataset, &A::query_coords(point), radius, search),
            None => Vec::new(),
        }
    }
}

impl<'a, A, const D: usize> KdIndex<'a, A, D>
where
    A: DatasetAdapter<D> + Sync,
    A::Point: Sync,
{
    /// Runs one k-NN query per point in parallel.
    pub fn knn_search_batch(&self, k: usize, points: &[A::Point]) -> Array<Array<A::Index>> {
        tracing::trace!(queries = points.len(), k, "Batch k-NN search");
        points.par_iter().map(|p| self.knn_search(k, p)).collect::<Vec<_>>().into()
    }

    /// Runs one radius query per point in parallel.
    pub fn radius_search_batch(
        &self,
        points: &[A::Point],
        radius: A::Scalar,
        sort_by_distance: bool,
    ) -> Array<Array<A::Index>> {
        tracing::trace!(queries = points.len(), sorted = sort_by_distance, "Batch radius search");
        points
            .par_iter()
            .map(|p| self.radius_search(p, radius, sort_by_distance))
            .collect::<Vec<_>>()
            .into()
    }
}
