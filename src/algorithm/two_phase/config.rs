//! # Solver options
use num_traits::Float;

use crate::algorithm::two_phase::strategy::pivot_rule::PivotRuleKind;
use crate::algorithm::two_phase::tableau::storage::StorageKind;
use crate::data::linear_algebra::default_epsilon;

/// Configuration of a two phase solve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverOptions<F> {
    /// Values with a magnitude below this value are treated as zero.
    pub epsilon: F,
    /// How to store the tableau.
    pub storage: StorageKind,
    /// With `StorageKind::Automatic`, sparse storage is used when at most this fraction of the
    /// constraint matrix is nonzero.
    pub sparse_density_threshold: f64,
    /// How to select the pivots.
    pub pivot_rule: PivotRuleKind,
    /// Switch to Bland's rule after this many consecutive degenerate pivots.
    pub degenerate_pivot_limit: Option<usize>,
    /// Give up after this many pivots.
    pub max_iterations: Option<usize>,
}

impl<F: Float> Default for SolverOptions<F> {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            storage: StorageKind::default(),
            sparse_density_threshold: 0.1,
            pivot_rule: PivotRuleKind::default(),
            degenerate_pivot_limit: Some(50),
            max_iterations: None,
        }
    }
}
