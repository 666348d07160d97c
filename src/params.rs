//! Build and search configuration for the KD-tree.

/// How the split axis of an inner node is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitRule {
    /// Split along the axis with the largest bounding-box extent.
    #[default]
    WidestSpread,
    /// Cycle through the axes by tree depth (`depth % D`).
    Cycle,
}

/// Options for KD-tree construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdParams {
    /// Maximum number of points per leaf node.
    /// Larger values reduce tree depth but increase leaf scan time.
    /// Default: 10
    pub leaf_max_size: usize,

    /// Split axis selection.
    /// Default: `SplitRule::WidestSpread`
    pub split_rule: SplitRule,
}

impl Default for KdParams {
    fn default() -> Self {
        Self {
            leaf_max_size: 10,
            split_rule: SplitRule::WidestSpread,
        }
    }
}

impl KdParams {
    /// Sets the leaf size. Panics on zero.
    pub fn with_leaf_max_size(mut self, leaf_max_size: usize) -> Self {
        assert!(leaf_max_size > 0, "leaf_max_size must be at least 1");
        self.leaf_max_size = leaf_max_size;
        self
    }

    pub fn with_split_rule(mut self, split_rule: SplitRule) -> Self {
        self.split_rule = split_rule;
        self
    }
}

/// Per-query search options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchParams {
    /// Approximation factor. A subtree is skipped when its distance times
    /// `(1 + eps)^2` exceeds the current worst distance. `0.0` is exact.
    pub eps: f64,

    /// Whether radius results are sorted ascending by distance.
    pub sorted: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { eps: 0.0, sorted: true }
    }
}

impl SearchParams {
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps.max(0.0);
        self
    }

    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// The squared pruning factor `(1 + eps)^2`.
    pub(crate) fn eps_factor(&self) -> f64 {
        let f = 1.0 + self.eps;
        f * f
    }
}
