//! # Algorithms
pub mod two_phase;

/// A linear program is either infeasible, unbounded or has a finite optimum.
///
/// This is determined as the result of an algorithm.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    Optimal,
    Unbounded,
    Infeasible,
}

/// Counts of the work done during a solve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Pivots selected by a pivot rule, in both phases.
    pub pivots: usize,
    /// Pivots on a row with a zero right hand side, these don't change the solution.
    pub degenerate_pivots: usize,
    /// Pivots selected while minimizing the artificial cost.
    pub phase_one_pivots: usize,
    /// Pivots that moved an artificial variable out of the basis after the first phase.
    pub artificial_removal_pivots: usize,
}

/// Outcome of a solve.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizationResult<F> {
    /// Whether an optimum was found.
    pub state: State,
    /// Value of each variable of the original problem.
    ///
    /// This is the basic solution in which the algorithm terminated. For an unbounded problem, it
    /// is the vertex from which a ray of decreasing cost was found. For an infeasible problem, it
    /// only satisfies the constraints when the artificial variables are included.
    pub solution: Vec<F>,
    /// Cost of `solution`.
    pub objective_value: F,
    /// Work done.
    pub statistics: Statistics,
}
