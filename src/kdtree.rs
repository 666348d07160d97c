use crate::adapter::{DatasetAdapter, IndexType, Scalar, dist_sq};
use crate::bounds::BoundingBox;
use crate::params::{KdParams, SearchParams, SplitRule};
use crate::results::{KnnResults, RadiusResults, ResultSet, SortedRadiusResults};

const NO_CHILD: u32 = u32::MAX;
// Leaf size 1 needs 2N - 1 nodes, all addressed below NO_CHILD.
const MAX_POINTS: usize = (u32::MAX / 2) as usize;

#[derive(Clone, Copy, Debug)]
struct KdNode<S, const D: usize> {
    bounds: BoundingBox<S, D>,
    left: u32, // NO_CHILD if leaf
    right: u32,
    // Leaf data: indices[start..end]
    start: u32,
    end: u32,
    // Internal node data
    split_val: S,
    axis: u8,
}

/// Balanced KD-tree partition over a dataset adapter.
///
/// The tree owns only its nodes and a permutation of point indices; the
/// coordinates stay in the caller's dataset and are read through the adapter
/// on every build and query. Every point in a node's left subtree has a
/// coordinate `<= split_val` on the split axis and every point on the right
/// has one `>= split_val`.
#[derive(Clone, Debug)]
pub struct KdTree<S, const D: usize> {
    nodes: Vec<KdNode<S, D>>,
    indices: Vec<usize>,
    params: KdParams,
}

impl<S: Scalar, const D: usize> Default for KdTree<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar, const D: usize> KdTree<S, D> {
    pub fn new() -> Self {
        Self::with_params(KdParams::default())
    }

    pub fn with_params(params: KdParams) -> Self {
        assert!(D > 0, "a KD-tree needs at least one dimension");
        assert!(params.leaf_max_size > 0, "leaf_max_size must be at least 1");
        KdTree {
            nodes: Vec::new(),
            indices: Vec::new(),
            params,
        }
    }

    pub fn params(&self) -> &KdParams {
        &self.params
    }

    /// Number of points covered by the last build.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds a partition (possibly of zero points).
    pub fn is_built(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Bounding box of the whole dataset, if the tree is built and non-empty.
    pub fn root_bounds(&self) -> Option<BoundingBox<S, D>> {
        self.nodes.last().map(|n| n.bounds)
    }

    /// Recomputes the partition from the current state of `dataset`.
    ///
    /// Panics if the dataset holds more points than node offsets (`u32`) or
    /// the adapter's index type can address.
    pub fn build<A>(&mut self, dataset: &A)
    where
        A: DatasetAdapter<D, Scalar = S>,
    {
        let count = dataset.point_count();
        assert!(count <= MAX_POINTS, "a KD-tree holds at most {} points, got {}", MAX_POINTS, count);
        if let Some(last) = count.checked_sub(1) {
            let _ = A::Index::from_usize(last);
        }

        let _span = tracing::debug_span!("kd_build", dimensions = D).entered();
        self.indices.clear();
        self.indices.extend(0..count);
        self.nodes.clear();

        if count > 0 {
            // A balanced tree has 2*N/leaf nodes roughly
            self.nodes.reserve(2 * count.div_ceil(self.params.leaf_max_size));
            self.build_recursive(0, count, 0, dataset);
        }

        tracing::debug!(
            points = count,
            nodes = self.nodes.len(),
            bytes = self.used_memory(),
            "Built KD-tree index"
        );
    }

    fn build_recursive<A>(&mut self, start: usize, end: usize, depth: usize, dataset: &A) -> u32
    where
        A: DatasetAdapter<D, Scalar = S>,
    {
        let count = end - start;

        // Compute bounding box for this range
        let mut bounds = BoundingBox::empty();
        for i in start..end {
            let idx = self.indices[i];
            bounds.extend(&std::array::from_fn(|d| dataset.coordinate(idx, d)));
        }

        // Leaf condition: small number of points
        if count <= self.params.leaf_max_size {
            let node_idx = self.nodes.len() as u32;
            self.nodes.push(KdNode {
                bounds,
                left: NO_CHILD,
                right: NO_CHILD,
                start: start as u32,
                end: end as u32,
                split_val: S::ZERO,
                axis: 0,
            });
            return node_idx;
        }

        let axis = match self.params.split_rule {
            SplitRule::WidestSpread => bounds.widest_axis(),
            SplitRule::Cycle => depth % D,
        };

        // Median split
        let mid = start + count / 2;
        self.indices[start..end].select_nth_unstable_by(count / 2, |&a, &b| {
            let va = dataset.coordinate(a, axis);
            let vb = dataset.coordinate(b, axis);
            va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid_idx = self.indices[mid];
        let split_val = dataset.coordinate(mid_idx, axis);

        let left = self.build_recursive(start, mid, depth + 1, dataset);
        let right = self.build_recursive(mid, end, depth + 1, dataset);

        let node_idx = self.nodes.len() as u32;
        self.nodes.push(KdNode {
            bounds,
            left,
            right,
            start: 0,
            end: 0,
            split_val,
            axis: axis as u8,
        });
        node_idx
    }

    /// Frees the node storage. Queries return nothing until the next build.
    pub fn release(&mut self) {
        self.nodes = Vec::new();
        self.indices = Vec::new();
    }

    /// Bytes held by the internal structure. Diagnostics only.
    pub fn used_memory(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<KdNode<S, D>>()
            + self.indices.capacity() * std::mem::size_of::<usize>()
    }

    /// Runs a search for `query` and feeds every candidate to `results`.
    ///
    /// Subtrees whose bounding box is further than `results.worst_dist()`
    /// (scaled by the approximation factor) are skipped. Returns `false` if
    /// the result set asked to stop early.
    pub fn find_neighbors<A, R>(&self, dataset: &A, results: &mut R, query: &[S; D], search: &SearchParams) -> bool
    where
        A: DatasetAdapter<D, Scalar = S>,
        R: ResultSet<S, A::Index>,
    {
        if self.nodes.is_empty() { return true; }
        // Root is the last node pushed in our recursive build
        let root_idx = (self.nodes.len() - 1) as u32;
        let eps_factor = S::from_f64(search.eps_factor());
        self.search_recursive(root_idx, dataset, results, query, eps_factor)
    }

    fn search_recursive<A, R>(&self, node_idx: u32, dataset: &A, results: &mut R, query: &[S; D], eps_factor: S) -> bool
    where
        A: DatasetAdapter<D, Scalar = S>,
        R: ResultSet<S, A::Index>,
    {
        let node = &self.nodes[node_idx as usize];

        // Pruning: check distance from query to node bounding box
        if node.bounds.dist_sq(query) * eps_factor > results.worst_dist() {
            return true;
        }

        // Leaf
        if node.left == NO_CHILD {
            for i in node.start..node.end {
                let idx = self.indices[i as usize];
                let d2 = dist_sq(dataset, query, idx);
                if d2 <= results.worst_dist() && !results.add_point(d2, A::Index::from_usize(idx)) {
                    return false;
                }
            }
            return true;
        }

        // Internal
        let axis = node.axis as usize;
        let diff = query[axis] - node.split_val;

        // Visit nearest child first
        let (first, second) = if diff <= S::ZERO { (node.left, node.right) } else { (node.right, node.left) };

        if !self.search_recursive(first, dataset, results, query, eps_factor) {
            return false;
        }

        // The plane distance is diff^2.
        if diff * diff * eps_factor <= results.worst_dist() {
            return self.search_recursive(second, dataset, results, query, eps_factor);
        }
        true
    }

    /// The `min(k, len)` nearest points to `query`, closest first.
    pub(crate) fn knn_pairs<A>(&self, dataset: &A, k: usize, query: &[S; D]) -> Vec<(A::Index, S)>
    where
        A: DatasetAdapter<D, Scalar = S>,
    {
        let mut results = KnnResults::new(k.min(self.len()));
        self.find_neighbors(dataset, &mut results, query, &SearchParams::default());
        results.into_pairs()
    }

    /// Every point within `radius` of `query`, ordered by distance when `search.sorted`.
    pub(crate) fn radius_pairs<A>(&self, dataset: &A, query: &[S; D], radius: S, search: &SearchParams) -> Vec<(A::Index, S)>
    where
        A: DatasetAdapter<D, Scalar = S>,
    {
        let radius_sq = radius * radius;
        // The collector is chosen once; the traversal never looks at the flag.
        if search.sorted {
            let mut results = SortedRadiusResults::new(radius_sq);
            self.find_neighbors(dataset, &mut results, query, search);
            results.into_pairs()
        } else {
            let mut results = RadiusResults::new(radius_sq);
            self.find_neighbors(dataset, &mut results, query, search);
            results.into_pairs()
        }
    }

    /// Checks the partition invariant on every inner node. Used by tests.
    pub fn validate<A>(&self, dataset: &A) -> bool
    where
        A: DatasetAdapter<D, Scalar = S>,
    {
        match self.nodes.len() {
            0 => true,
            n => self.validate_node((n - 1) as u32, dataset),
        }
    }

    fn validate_node<A>(&self, node_idx: u32, dataset: &A) -> bool
    where
        A: DatasetAdapter<D, Scalar = S>,
    {
        let node = &self.nodes[node_idx as usize];
        if node.left == NO_CHILD {
            return true;
        }
        let axis = node.axis as usize;
        let mut left = Vec::new();
        let mut right = Vec::new();
        self.collect_leaf_points(node.left, &mut left);
        self.collect_leaf_points(node.right, &mut right);
        left.iter().all(|&i| dataset.coordinate(i, axis) <= node.split_val)
            && right.iter().all(|&i| dataset.coordinate(i, axis) >= node.split_val)
            && self.validate_node(node.left, dataset)
            && self.validate_node(node.right, dataset)
    }

    fn collect_leaf_points(&self, node_idx: u32, out: &mut Vec<usize>) {
        let node = &self.nodes[node_idx as usize];
        if node.left == NO_CHILD {
            out.extend_from_slice(&self.indices[node.start as usize..node.end as usize]);
        } else {
            self.collect_leaf_points(node.left, out);
            self.collect_leaf_points(node.right, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SliceAdapter;

    fn grid_points(n: usize) -> Vec<[f64; 2]> {
        let mut points = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                points.push([i as f64, j as f64]);
            }
        }
        points
    }

    #[test]
    fn build_produces_valid_partition() {
        let points = grid_points(12);
        let adapter: SliceAdapter<'_, f64, 2> = SliceAdapter::new(&points);
        for rule in [SplitRule::WidestSpread, SplitRule::Cycle] {
            let mut tree: KdTree<f64, 2> = KdTree::with_params(KdParams::default().with_leaf_max_size(3).with_split_rule(rule));
            tree.build(&adapter);
            assert_eq!(tree.len(), 144);
            assert!(tree.node_count() > 1);
            assert!(tree.validate(&adapter), "invalid partition with {:?}", rule);
        }
    }

    #[test]
    fn empty_dataset_has_no_nodes() {
        let points: Vec<[f64; 2]> = Vec::new();
        let adapter: SliceAdapter<'_, f64, 2> = SliceAdapter::new(&points);
        let mut tree: KdTree<f64, 2> = KdTree::new();
        tree.build(&adapter);
        assert!(!tree.is_built());
        assert!(tree.root_bounds().is_none());

        let mut results: KnnResults<f64, usize> = KnnResults::new(3);
        tree.find_neighbors(&adapter, &mut results, &[0.0, 0.0], &SearchParams::default());
        assert!(results.is_empty());
    }

    #[test]
    fn coincident_points_do_not_break_the_split() {
        let points = vec![[1.0, 1.0]; 100];
        let adapter: SliceAdapter<'_, f64, 2> = SliceAdapter::new(&points);
        let mut tree: KdTree<f64, 2> = KdTree::with_params(KdParams::default().with_leaf_max_size(4));
        tree.build(&adapter);
        assert!(tree.validate(&adapter));

        let mut results: RadiusResults<f64, usize> = RadiusResults::new(0.0);
        tree.find_neighbors(&adapter, &mut results, &[1.0, 1.0], &SearchParams::default());
        assert_eq!(results.len(), 100);
    }

    #[test]
    fn release_frees_memory() {
        let points = grid_points(8);
        let adapter: SliceAdapter<'_, f64, 2> = SliceAdapter::new(&points);
        let mut tree: KdTree<f64, 2> = KdTree::new();
        tree.build(&adapter);
        assert!(tree.used_memory() > 0);
        tree.release();
        assert_eq!(tree.used_memory(), 0);
        assert!(!tree.is_built());
    }

    #[test]
    fn zero_capacity_knn_visits_nothing() {
        let points = [[0.0, 0.0], [1.0, 1.0]];
        let adapter: SliceAdapter<'_, f64, 2> = SliceAdapter::new(&points);
        let mut tree: KdTree<f64, 2> = KdTree::new();
        tree.build(&adapter);

        let mut results: KnnResults<f64, usize> = KnnResults::new(0);
        assert!(tree.find_neighbors(&adapter, &mut results, &[0.0, 0.0], &SearchParams::default()));
        assert!(results.is_empty());
        assert!(tree.knn_pairs(&adapter, 0, &[0.0, 0.0]).is_empty());
    }

    #[test]
    fn pair_helpers_pick_the_collector() {
        let points = grid_points(5);
        let adapter: SliceAdapter<'_, f64, 2> = SliceAdapter::new(&points);
        let mut tree: KdTree<f64, 2> = KdTree::with_params(KdParams::default().with_leaf_max_size(2));
        tree.build(&adapter);

        let knn = tree.knn_pairs(&adapter, 30, &[2.0, 2.0]);
        assert_eq!(knn.len(), 25);
        assert_eq!(knn[0], (12, 0.0));

        let sorted = tree.radius_pairs(&adapter, &[2.0, 2.0], 1.0, &SearchParams::default());
        assert_eq!(sorted.len(), 5);
        assert_eq!(sorted[0], (12, 0.0));
        assert!(sorted[1..].iter().all(|&(_, d)| d == 1.0));

        let unsorted = tree.radius_pairs(&adapter, &[2.0, 2.0], 1.0, &SearchParams::default().with_sorted(false));
        assert_eq!(unsorted.len(), 5);
    }

    /// Reports a point count without storing any points.
    struct HugeDataset(usize);

    impl DatasetAdapter<1> for HugeDataset {
        type Point = [f64; 1];
        type Scalar = f64;
        type Index = usize;

        fn point_count(&self) -> usize {
            self.0
        }

        fn coordinate(&self, _index: usize, _dim: usize) -> f64 {
            0.0
        }

        fn query_coords(point: &[f64; 1]) -> [f64; 1] {
            *point
        }
    }

    #[test]
    #[should_panic(expected = "a KD-tree holds at most")]
    fn build_rejects_more_points_than_node_offsets_address() {
        let mut tree: KdTree<f64, 1> = KdTree::new();
        tree.build(&HugeDataset(MAX_POINTS + 1));
    }

    #[test]
    #[should_panic(expected = "does not fit in u16")]
    fn build_rejects_points_beyond_the_index_type() {
        let points = vec![[0.0f32]; 70_000];
        let adapter: SliceAdapter<'_, f32, 1, u16> = SliceAdapter::new(&points);
        let mut tree: KdTree<f32, 1> = KdTree::new();
        tree.build(&adapter);
    }
}
