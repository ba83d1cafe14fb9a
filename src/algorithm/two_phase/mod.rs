//! # The Simplex algorithm
//!
//! This module contains all data structures and logic specific to the simplex algorithm. The
//! algorithm is implemented as described in chapters 2 and 4 of Combinatorial Optimization, a book
//! by Christos H. Papadimitriou and Kenneth Steiglitz.
//!
//! Both phases operate on a single tableau that holds a cost row for each of them. The first phase
//! minimizes the sum of the artificial variables, the second phase the real cost.
use std::fmt::Debug;

use log::{debug, info, warn};
use num_traits::Float;

use crate::algorithm::{OptimizationResult, State, Statistics};
use crate::algorithm::two_phase::config::SolverOptions;
use crate::algorithm::two_phase::phase_one::{Rank, RankedFeasibilityResult};
use crate::algorithm::two_phase::strategy::{select, Selection};
use crate::algorithm::two_phase::strategy::pivot_rule::{FirstProfitable, PivotRule, PivotRuleKind, SteepestDescentAlongVariable};
use crate::algorithm::two_phase::tableau::iteration_point::{IterationPoint, Phase};
use crate::algorithm::two_phase::tableau::storage::{DenseStorage, SparseStorage, StorageKind, TableauStorage};
use crate::algorithm::two_phase::tableau::Tableau;
use crate::data::linear_algebra::matrix::Matrix;
use crate::error::SolveError;

pub mod config;
pub mod phase_one;
pub mod strategy;
pub mod tableau;


/// Where the solver is.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Searching for a basic feasible solution.
    PhaseOne,
    /// Decreasing the real cost, starting from a basic feasible solution.
    PhaseTwo,
    /// Nothing left to do.
    Finished(State),
}

/// The two phase method as a state machine.
///
/// Each call to `step` either pivots once or moves to the next stage.
#[derive(Debug)]
pub struct TwoPhase<S: TableauStorage, PR> {
    tableau: Tableau<S>,
    rule: PR,
    point: IterationPoint,
    stage: Stage,
    rank: Option<Rank>,
    statistics: Statistics,

    consecutive_degenerate_pivots: usize,
    /// Whether Bland's rule replaced `rule` to escape from a degenerate vertex.
    anti_cycling: bool,
    degenerate_pivot_limit: Option<usize>,
    max_iterations: Option<usize>,
}

impl<S, PR> TwoPhase<S, PR>
where
    S: TableauStorage,
    PR: PivotRule,
{
    /// Start solving from an initial tableau.
    ///
    /// # Arguments
    ///
    /// * `tableau`: Freshly created tableau, with the artificial variables as its basis.
    /// * `options`: Only the options related to the iteration are used; the tableau already has
    /// its storage and epsilon.
    pub fn new(tableau: Tableau<S>, options: &SolverOptions<S::F>) -> Self {
        debug_assert!(tableau.is_valid_basis());
        debug_assert!(tableau.is_primal_feasible());

        Self {
            tableau,
            rule: PR::new(),
            point: IterationPoint::default(),
            stage: Stage::PhaseOne,
            rank: None,
            statistics: Statistics::default(),

            consecutive_degenerate_pivots: 0,
            anti_cycling: false,
            degenerate_pivot_limit: options.degenerate_pivot_limit,
            max_iterations: options.max_iterations,
        }
    }

    /// Do a single pivot, or move on to the next stage.
    ///
    /// Once finished, calling this method has no effect.
    ///
    /// # Return value
    ///
    /// The stage after this step.
    ///
    /// # Errors
    ///
    /// When the iteration limit is reached, or in case of numerical trouble.
    pub fn step(&mut self) -> Result<Stage, SolveError> {
        let phase = match self.stage {
            Stage::PhaseOne => Phase::One,
            Stage::PhaseTwo => Phase::Two,
            Stage::Finished(_) => return Ok(self.stage),
        };
        debug_assert_eq!(self.point.phase(), phase);

        let selection = if self.anti_cycling {
            select(&mut FirstProfitable, &self.tableau, phase)
        } else {
            select(&mut self.rule, &self.tableau, phase)
        };

        match (selection, phase) {
            (Selection::Pivot { row, column }, _) => self.pivot(row, column)?,
            (Selection::Optimal, Phase::One) => self.end_phase_one()?,
            (Selection::Optimal, Phase::Two) => self.finish(State::Optimal),
            (Selection::Unbounded { column }, Phase::One) => {
                return Err(SolveError::UnboundedArtificialCost { column });
            },
            (Selection::Unbounded { column }, Phase::Two) => {
                debug!("cost decreases without bound along column {column}");
                self.finish(State::Unbounded);
            },
        }

        Ok(self.stage)
    }

    /// Step until finished.
    ///
    /// # Errors
    ///
    /// See `step`.
    pub fn run(&mut self) -> Result<OptimizationResult<S::F>, SolveError> {
        loop {
            if let Stage::Finished(state) = self.step()? {
                break Ok(self.result(state));
            }
        }
    }

    fn pivot(&mut self, row: usize, column: usize) -> Result<(), SolveError> {
        if let Some(limit) = self.max_iterations {
            if self.statistics.pivots >= limit {
                return Err(SolveError::IterationLimit(limit));
            }
        }

        let degenerate = self.tableau.constraint_value(row).abs() < self.tableau.epsilon();
        let leaving = self.tableau.basis_column_index_for_row(row);
        self.point.row = row;
        self.point.column = column;
        self.tableau.pivot(self.point)?;
        debug!(
            "pivot {} ({:?}): column {column} enters at row {row}, column {leaving} leaves, degenerate: {degenerate}",
            self.statistics.pivots, self.point.phase(),
        );

        self.statistics.pivots += 1;
        if self.point.is_phase_one() {
            self.statistics.phase_one_pivots += 1;
        }
        if degenerate {
            self.statistics.degenerate_pivots += 1;
            self.consecutive_degenerate_pivots += 1;
            self.guard_against_cycling();
        } else {
            self.consecutive_degenerate_pivots = 0;
        }

        debug_assert!(self.tableau.is_valid_basis());
        debug_assert!(self.tableau.is_primal_feasible());

        Ok(())
    }

    fn guard_against_cycling(&mut self) {
        if self.anti_cycling {
            return;
        }

        if let Some(limit) = self.degenerate_pivot_limit {
            if self.consecutive_degenerate_pivots >= limit {
                warn!(
                    "{} consecutive degenerate pivots, switching to Bland's rule",
                    self.consecutive_degenerate_pivots,
                );
                self.anti_cycling = true;
            }
        }
    }

    fn end_phase_one(&mut self) -> Result<(), SolveError> {
        let nr_artificial = self.tableau.artificial_basis_rows().len();
        match phase_one::finish(&mut self.tableau)? {
            RankedFeasibilityResult::Infeasible => {
                debug!(
                    "artificial cost {:?} remains after phase one",
                    self.tableau.objective_function_value(Phase::One),
                );
                self.finish(State::Infeasible);
            },
            RankedFeasibilityResult::Feasible { rank } => {
                let nr_redundant = match &rank {
                    Rank::Full => 0,
                    Rank::Deficient(rows) => {
                        info!("rows {rows:?} are redundant");
                        rows.len()
                    },
                };
                self.statistics.artificial_removal_pivots = nr_artificial - nr_redundant;
                info!(
                    "basic feasible solution found after {} pivots",
                    self.statistics.phase_one_pivots + self.statistics.artificial_removal_pivots,
                );

                self.rank = Some(rank);
                self.point.switch_to_phase_two();
                self.consecutive_degenerate_pivots = 0;
                self.stage = Stage::PhaseTwo;

                debug_assert!(self.tableau.is_valid_basis());
                debug_assert!(self.tableau.is_primal_feasible());
            },
        }

        Ok(())
    }

    fn finish(&mut self, state: State) {
        info!("{state:?} after {} pivots", self.statistics.pivots);
        self.stage = Stage::Finished(state);
    }

    fn result(&self, state: State) -> OptimizationResult<S::F> {
        let mut solution = self.tableau.current_bfs();
        solution.truncate(self.tableau.nr_decision_variables());

        OptimizationResult {
            state,
            solution,
            objective_value: self.tableau.objective_function_value(Phase::Two),
            statistics: self.statistics,
        }
    }

    /// Where the solver is.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The tableau in its current state.
    pub fn tableau(&self) -> &Tableau<S> {
        &self.tableau
    }

    /// Work done so far.
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Whether the constraints turned out to be linearly dependent.
    ///
    /// `None` until the first phase is finished with a feasible solution.
    pub fn rank(&self) -> Option<&Rank> {
        self.rank.as_ref()
    }

    /// Whether Bland's rule was engaged after too many consecutive degenerate pivots.
    pub fn is_anti_cycling(&self) -> bool {
        self.anti_cycling
    }
}

/// Solve `min c^T x` subject to `Ax = b` and `x >= 0`.
///
/// The storage is chosen according to the options, see `storage_for`.
///
/// # Arguments
///
/// * `cost`: `c`, of length `n`.
/// * `constraints`: `A`, with `m` rows and `n` columns.
/// * `b`: Right hand side of length `m`, may contain negative values.
///
/// # Errors
///
/// If the input is inconsistent, or the solve didn't finish. An infeasible or unbounded problem is
/// not an error.
pub fn solve<F, M>(
    cost: &[F],
    constraints: &M,
    b: &[F],
    options: &SolverOptions<F>,
) -> Result<OptimizationResult<F>, SolveError>
where
    F: Float + Debug,
    M: Matrix<F>,
{
    match storage_for(constraints, options) {
        StorageKind::Sparse => solve_with_storage::<SparseStorage<F>, M>(cost, constraints, b, options),
        _ => solve_with_storage::<DenseStorage<F>, M>(cost, constraints, b, options),
    }
}

/// Solve with a specific storage, ignoring the storage option.
///
/// See `solve`.
pub fn solve_with_storage<S, M>(
    cost: &[S::F],
    constraints: &M,
    b: &[S::F],
    options: &SolverOptions<S::F>,
) -> Result<OptimizationResult<S::F>, SolveError>
where
    S: TableauStorage,
    M: Matrix<S::F>,
{
    let tableau = Tableau::<S>::new(cost, constraints, b, options.epsilon)?;
    info!(
        "solving {} constraints and {} variables, {:?} pivot rule",
        tableau.nr_constraints(), tableau.nr_decision_variables(), options.pivot_rule,
    );

    match options.pivot_rule {
        PivotRuleKind::SteepestDescentAlongVariable => {
            TwoPhase::<S, SteepestDescentAlongVariable>::new(tableau, options).run()
        },
        PivotRuleKind::FirstProfitable => TwoPhase::<S, FirstProfitable>::new(tableau, options).run(),
    }
}

/// Storage that `solve` would use.
///
/// # Return value
///
/// Either `StorageKind::Dense` or `StorageKind::Sparse`, never `StorageKind::Automatic`.
pub fn storage_for<F, M: Matrix<F>>(constraints: &M, options: &SolverOptions<F>) -> StorageKind {
    match options.storage {
        StorageKind::Automatic => {
            let density = constraints.density();
            let kind = if density <= options.sparse_density_threshold {
                StorageKind::Sparse
            } else {
                StorageKind::Dense
            };
            debug!("constraint matrix density {density:.3}, using {kind:?} storage");
            kind
        },
        kind => kind,
    }
}
