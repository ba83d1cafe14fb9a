//! # Data structures for Simplex
//!
//! Contains the simplex tableau and logic for elementary operations which can be performed upon it.
//! The tableau is extended with supplementary data structures for efficiency.
use std::cmp::max;
use std::collections::HashSet;
use std::fmt::{Debug, Display, Formatter, Result as FormatResult};

use num_traits::{Float, One, ToPrimitive, Zero};

use crate::algorithm::two_phase::tableau::iteration_point::{IterationPoint, Phase};
use crate::algorithm::two_phase::tableau::layout::Layout;
use crate::algorithm::two_phase::tableau::storage::TableauStorage;
use crate::data::linear_algebra::matrix::Matrix;
use crate::error::{InconsistencyError, PivotError};

pub mod iteration_point;
pub mod layout;
pub mod pivot;
pub mod storage;

/// How to choose between rows that have the same ratio in the ratio test.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TieBreak {
    /// Row with the lowest index.
    LowestRow,
    /// Row of which the basic column has the lowest index, as in Bland's rule.
    LowestLeavingColumn,
}

/// The most high-level data structure that is used by the Simplex algorithm: the Simplex tableau.
///
/// It owns all values of the tableau, for both phases, as well as the data structures that
/// describe the current solution basis. See the `layout` module for the position of the values.
#[derive(Clone, Debug, PartialEq)]
pub struct Tableau<S: TableauStorage> {
    /// All values of the tableau, cost rows and right hand side included.
    ///
    /// This attribute changes with a basis change.
    storage: S,
    layout: Layout,

    /// For each constraint row, the column that is basic in it.
    basis_indices: Vec<usize>,
    /// All columns currently in the basis.
    ///
    /// Could also be derived from `basis_indices`, but is here for faster reading and writing.
    basis_columns: HashSet<usize>,

    /// Sum of the absolute values of the original right hand side, the initial artificial cost.
    initial_artificial_cost: S::F,
}

impl<S: TableauStorage> Tableau<S> {
    /// Create the initial tableau of the first phase.
    ///
    /// Rows with a negative right hand side are negated, after which an artificial variable is
    /// added for each constraint. The artificial variables form the initial basis.
    ///
    /// # Arguments
    ///
    /// * `cost`: Cost of each variable, of length `n`.
    /// * `constraints`: The `m` by `n` constraint matrix.
    /// * `b`: Right hand side of the equality constraints, of length `m`.
    /// * `epsilon`: Values with a magnitude below this value are treated as zero.
    ///
    /// # Errors
    ///
    /// If the dimensions don't match, or if any of the values are not finite.
    pub fn new<M: Matrix<S::F>>(
        cost: &[S::F],
        constraints: &M,
        b: &[S::F],
        epsilon: S::F,
    ) -> Result<Self, InconsistencyError> {
        let (nr_constraints, nr_variables) = (constraints.nr_rows(), constraints.nr_columns());
        if cost.len() != nr_variables {
            return Err(InconsistencyError::new(format!(
                "cost vector has length {}, but the constraint matrix has {} columns",
                cost.len(), nr_variables,
            )));
        }
        if b.len() != nr_constraints {
            return Err(InconsistencyError::new(format!(
                "right hand side has length {}, but the constraint matrix has {} rows",
                b.len(), nr_constraints,
            )));
        }
        if let Some(j) = cost.iter().position(|value| !value.is_finite()) {
            return Err(InconsistencyError::new(format!("cost of variable {j} is not finite")));
        }
        if let Some(i) = b.iter().position(|value| !value.is_finite()) {
            return Err(InconsistencyError::new(format!("right hand side of constraint {i} is not finite")));
        }
        if !epsilon.is_finite() || epsilon < S::F::zero() {
            return Err(InconsistencyError::new("epsilon should be finite and nonnegative"));
        }

        let layout = Layout::new(nr_constraints, nr_variables);
        let mut storage = S::zeros(layout.nr_rows(), layout.nr_columns(), epsilon);

        let mut artificial_cost = vec![S::F::zero(); nr_variables];
        let mut initial_artificial_cost = S::F::zero();
        for (i, &rhs) in b.iter().enumerate() {
            let sign = if rhs < S::F::zero() { -S::F::one() } else { S::F::one() };
            for (j, value) in constraints.iter_row(i) {
                if j >= nr_variables || !value.is_finite() {
                    return Err(InconsistencyError::new(format!(
                        "invalid constraint matrix value in row {i}, column {j}",
                    )));
                }
                let value = sign * value;
                storage.set_value_at(i, j, value);
                artificial_cost[j] = artificial_cost[j] - value;
            }
            storage.set_value_at(i, layout.artificial_column(i), S::F::one());
            storage.set_value_at(i, layout.rhs_column(), sign * rhs);
            initial_artificial_cost = initial_artificial_cost + rhs.abs();
        }

        let real_cost_row = layout.cost_row(Phase::Two);
        for (j, &value) in cost.iter().enumerate() {
            storage.set_value_at(real_cost_row, j, value);
        }
        let artificial_cost_row = layout.cost_row(Phase::One);
        for (j, value) in artificial_cost.into_iter().enumerate() {
            storage.set_value_at(artificial_cost_row, j, value);
        }
        storage.set_value_at(artificial_cost_row, layout.rhs_column(), -initial_artificial_cost);

        let basis_indices = (0..nr_constraints).map(|i| layout.artificial_column(i)).collect::<Vec<_>>();
        let basis_columns = basis_indices.iter().copied().collect();

        Ok(Self {
            storage,
            layout,
            basis_indices,
            basis_columns,
            initial_artificial_cost,
        })
    }

    /// Brings a column into the basis by pivoting on the storage and updating the data structures
    /// holding the collection of basis columns.
    ///
    /// # Errors
    ///
    /// If the point is not on a constraint row and a variable column, or if the value at the point
    /// is too close to zero. The tableau is unchanged in that case.
    pub fn pivot(&mut self, point: IterationPoint) -> Result<(), PivotError> {
        let IterationPoint { row, column, .. } = point;
        if row >= self.nr_constraints() || column >= self.layout.nr_variables() {
            return Err(PivotError::OutOfBounds {
                row,
                column,
                nr_constraints: self.nr_constraints(),
                nr_variables: self.layout.nr_variables(),
            });
        }

        pivot::pivot(&mut self.storage, row, column)?;
        self.update_basis_indices(row, column);

        Ok(())
    }

    /// Update the basis index.
    ///
    /// Removes the index of the variable leaving the basis from the `basis_columns` attribute,
    /// while inserting the entering variable index.
    fn update_basis_indices(&mut self, pivot_row: usize, pivot_column: usize) {
        let leaving_column = self.basis_indices[pivot_row];
        if leaving_column == pivot_column {
            return;
        }

        let was_there = self.basis_columns.remove(&leaving_column);
        debug_assert!(was_there);
        let was_not_there = self.basis_columns.insert(pivot_column);
        debug_assert!(was_not_there);
        self.basis_indices[pivot_row] = pivot_column;
    }

    /// Value at a position in the tableau.
    ///
    /// # Panics
    ///
    /// If the position lies outside the tableau, on both storages.
    pub fn value_at(&self, row: usize, column: usize) -> S::F {
        self.storage.value_at(row, column)
    }

    /// Value at a position in the tableau, as a double.
    ///
    /// # Panics
    ///
    /// If the position lies outside the tableau.
    pub fn double_value(&self, row: usize, column: usize) -> f64 {
        self.value_at(row, column).to_f64().unwrap_or(f64::NAN)
    }

    /// The relative cost of a column, according to the cost function of a phase.
    ///
    /// # Note
    ///
    /// That column will typically not be a basis column. Although the method is valid for those
    /// inputs as well, the relative cost always equals zero in that situation.
    pub fn relative_cost(&self, phase: Phase, column: usize) -> S::F {
        debug_assert!(column < self.layout.nr_variables());

        self.storage.value_at(self.layout.cost_row(phase), column)
    }

    /// Cost of the current solution, according to the cost function of a phase.
    pub fn objective_function_value(&self, phase: Phase) -> S::F {
        -self.storage.value_at(self.layout.cost_row(phase), self.layout.rhs_column())
    }

    /// The value of the basic variable in a constraint row.
    pub fn constraint_value(&self, row: usize) -> S::F {
        debug_assert!(row < self.nr_constraints());

        self.storage.value_at(row, self.layout.rhs_column())
    }

    /// Whether a column is in the basis.
    pub fn is_in_basis(&self, column: usize) -> bool {
        self.basis_columns.contains(&column)
    }

    /// Which column is basic in a constraint row.
    pub fn basis_column_index_for_row(&self, row: usize) -> usize {
        self.basis_indices[row]
    }

    /// For each constraint row, the column that is basic in it.
    pub fn basis_indices(&self) -> &[usize] {
        &self.basis_indices
    }

    /// Get the current basic feasible solution.
    ///
    /// # Return value
    ///
    /// Value of each variable, artificial variables included.
    pub fn current_bfs(&self) -> Vec<S::F> {
        let mut solution = vec![S::F::zero(); self.layout.nr_variables()];
        for (row, &column) in self.basis_indices.iter().enumerate() {
            solution[column] = self.constraint_value(row);
        }
        solution
    }

    /// Whether any artificial variable is basic.
    pub fn has_artificial_in_basis(&self) -> bool {
        self.basis_indices.iter().any(|&column| self.layout.is_artificial(column))
    }

    /// Constraint rows in which an artificial variable is basic, sorted.
    pub fn artificial_basis_rows(&self) -> Vec<usize> {
        self.basis_indices.iter()
            .enumerate()
            .filter(|&(_, &column)| self.layout.is_artificial(column))
            .map(|(row, _)| row)
            .collect()
    }

    /// Determine the row to pivot on.
    ///
    /// Determine the row to pivot on, given the column. This is the row with the positive but
    /// minimal ratio between the current constraint value and the column value. Ratios that differ
    /// less than epsilon are considered equal.
    ///
    /// # Arguments
    ///
    /// * `column`: Column that will enter the basis.
    /// * `tie_break`: How to choose between rows with equal ratios.
    ///
    /// # Return value
    ///
    /// Index of the row to pivot on. If not found, the column is a ray along which the cost
    /// decreases without bound.
    pub fn select_primal_pivot_row(&self, column: usize, tie_break: TieBreak) -> Option<usize> {
        debug_assert!(column < self.layout.nr_variables());

        let epsilon = self.epsilon();
        // (chosen index, minimum ratio, corresponding leaving column (for Bland's algorithm))
        let mut min_values: Option<(usize, S::F, usize)> = None;
        for (row, xij) in self.storage.column_entries(column) {
            if row >= self.nr_constraints() || xij <= epsilon {
                continue;
            }

            let ratio = self.constraint_value(row) / xij;
            let leaving_column = self.basis_indices[row];
            match &mut min_values {
                Some((min_index, min_ratio, min_leaving_column)) => {
                    let tie = (ratio - *min_ratio).abs() <= epsilon;
                    let better_tie = tie_break == TieBreak::LowestLeavingColumn && leaving_column < *min_leaving_column;
                    if (tie && better_tie) || (!tie && ratio < *min_ratio) {
                        *min_index = row;
                        *min_ratio = ratio;
                        *min_leaving_column = leaving_column;
                    }
                },
                None => min_values = Some((row, ratio, leaving_column)),
            }
        }

        min_values.map(|(min_index, _, _)| min_index)
    }

    /// Whether each constraint row has its basic column equal to the identity column at that row.
    ///
    /// Also the cost rows should be zero for basic columns.
    pub fn is_valid_basis(&self) -> bool {
        if self.basis_columns.len() != self.nr_constraints() {
            return false;
        }

        let epsilon = self.epsilon();
        self.basis_indices.iter().enumerate().all(|(row, &column)| {
            let entries = self.storage.column_entries(column);
            entries.iter().all(|&(i, value)| if i == row {
                (value - S::F::one()).abs() <= epsilon
            } else {
                value.abs() <= epsilon
            }) && entries.iter().any(|&(i, _)| i == row)
        })
    }

    /// Whether the current basic solution satisfies the nonnegativity constraints.
    pub fn is_primal_feasible(&self) -> bool {
        let tolerance = self.feasibility_tolerance();
        (0..self.nr_constraints()).all(|row| self.constraint_value(row) >= -tolerance)
    }

    /// Magnitude below which cost and solution values are considered zero.
    ///
    /// Scaled with the size of the original right hand side.
    pub fn feasibility_tolerance(&self) -> S::F {
        self.epsilon() * S::F::one().max(self.initial_artificial_cost)
    }

    /// Values with a magnitude below this value are treated as zero.
    pub fn epsilon(&self) -> S::F {
        self.storage.epsilon()
    }

    /// Number of constraint rows `m`.
    pub fn nr_constraints(&self) -> usize {
        self.layout.nr_constraints()
    }

    /// Number of variables `n` of the original problem.
    pub fn nr_decision_variables(&self) -> usize {
        self.layout.nr_decision_variables()
    }

    /// Which rows and columns hold what.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// All values of the tableau.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S> Display for Tableau<S>
where
    S: TableauStorage,
    S::F: Display,
{
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        const COST_LABELS: [(&str, Phase); 2] = [("cost 1", Phase::One), ("cost 2", Phase::Two)];

        writeln!(f, "=== Tableau ===")?;
        let nr_columns = self.layout.nr_variables();
        let cell = |row: usize, column: usize| {
            let value = self.storage.value_at(row, column);
            if value.is_zero() { String::new() } else { value.to_string() }
        };
        let rows = COST_LABELS.iter()
            .map(|&(label, phase)| (label.to_string(), self.layout.cost_row(phase)))
            .chain((0..self.nr_constraints()).map(|i| (i.to_string(), i)))
            .map(|(label, row)| {
                let values = (0..nr_columns).map(|j| cell(row, j)).collect::<Vec<_>>();
                (label, self.storage.value_at(row, self.layout.rhs_column()).to_string(), values)
            })
            .collect::<Vec<_>>();

        let row_counter_width = rows.iter().map(|(label, _, _)| label.len()).max().unwrap_or(0);
        let b_inner_width = max(rows.iter().map(|(_, b, _)| b.len()).max().unwrap_or(0), "b".len());
        let column_width = (0..nr_columns).map(|j| {
            rows.iter().map(|(_, _, values)| values[j].len()).fold(j.to_string().len(), max)
        }).collect::<Vec<_>>();

        // Column counters
        write!(f, "{0:>width$} |", "", width = row_counter_width)?;
        write!(f, " {0:^width$} |", "b", width = b_inner_width)?;
        for (j, width) in column_width.iter().enumerate() {
            write!(f, " {0:^width$}", j, width = width)?;
        }
        writeln!(f)?;

        let total_width = (row_counter_width + 1) + 1 + (1 + b_inner_width + 1) + 1 +
            column_width.iter().map(|l| 1 + l).sum::<usize>();

        for (index, (label, b, values)) in rows.iter().enumerate() {
            // Separators after the column counters and after the cost rows
            if index == 0 || index == COST_LABELS.len() {
                writeln!(f, "{}", "-".repeat(total_width))?;
            }
            write!(f, "{0:>width$} |", label, width = row_counter_width)?;
            write!(f, " {0:^width$} |", b, width = b_inner_width)?;
            for (value, width) in values.iter().zip(&column_width) {
                write!(f, " {0:^width$}", value, width = width)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Basis Columns ===")?;
        let basis = self.basis_indices.iter().copied().enumerate().collect::<Vec<_>>();
        writeln!(f, "{basis:?}")
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::two_phase::tableau::{Tableau, TieBreak};
    use crate::algorithm::two_phase::tableau::iteration_point::{IterationPoint, Phase};
    use crate::algorithm::two_phase::tableau::storage::{DenseStorage, SparseStorage, TableauStorage};
    use crate::data::linear_algebra::EPSILON;
    use crate::data::linear_algebra::matrix::DenseMatrix;
    use crate::error::PivotError;
    use crate::tests::problem_1;

    fn tableau<S: TableauStorage<F = f64>>() -> Tableau<S> {
        let (cost, constraints, b) = problem_1::data();
        Tableau::new(&cost, &constraints, &b, EPSILON).unwrap()
    }

    fn initial<S: TableauStorage<F = f64>>() {
        let tableau = tableau::<S>();
        assert_eq!(tableau.nr_constraints(), 3);
        assert_eq!(tableau.nr_decision_variables(), 5);
        assert_eq!(tableau.basis_indices(), &[5, 6, 7]);
        assert!(tableau.has_artificial_in_basis());
        assert!(tableau.is_valid_basis());
        assert!(tableau.is_primal_feasible());

        assert_eq!(tableau.relative_cost(Phase::One, 0), -12f64);
        assert_eq!(tableau.relative_cost(Phase::One, 1), -6f64);
        assert_eq!(tableau.relative_cost(Phase::One, 5), 0f64);
        assert_eq!(tableau.objective_function_value(Phase::One), 28f64);

        assert_eq!(tableau.relative_cost(Phase::Two, 0), -2f64);
        assert_eq!(tableau.relative_cost(Phase::Two, 2), 0f64);
        assert_eq!(tableau.objective_function_value(Phase::Two), 0f64);

        assert_eq!(tableau.current_bfs(), vec![0f64, 0f64, 0f64, 0f64, 0f64, 12f64, 8f64, 8f64]);
    }

    #[test]
    fn initial_dense() {
        initial::<DenseStorage<f64>>();
    }

    #[test]
    fn initial_sparse() {
        initial::<SparseStorage<f64>>();
    }

    #[test]
    fn negative_right_hand_side() {
        let constraints = DenseMatrix::from_rows(vec![vec![1f64, -1f64], vec![2f64, 1f64]]).unwrap();
        let tableau = Tableau::<DenseStorage<f64>>::new(&[1f64, 1f64], &constraints, &[-3f64, 4f64], EPSILON).unwrap();

        assert_eq!(tableau.value_at(0, 0), -1f64);
        assert_eq!(tableau.value_at(0, 1), 1f64);
        assert_eq!(tableau.constraint_value(0), 3f64);
        // Artificial column is not negated
        assert_eq!(tableau.value_at(0, 2), 1f64);
        assert_eq!(tableau.objective_function_value(Phase::One), 7f64);
        assert_eq!(tableau.relative_cost(Phase::One, 0), -1f64);
        assert_eq!(tableau.relative_cost(Phase::One, 1), -2f64);
    }

    #[test]
    fn inconsistent_input() {
        let constraints = DenseMatrix::from_rows(vec![vec![1f64, 2f64]]).unwrap();
        assert!(Tableau::<DenseStorage<f64>>::new(&[1f64], &constraints, &[1f64], EPSILON).is_err());
        assert!(Tableau::<DenseStorage<f64>>::new(&[1f64, 1f64], &constraints, &[], EPSILON).is_err());
        assert!(Tableau::<DenseStorage<f64>>::new(&[1f64, f64::NAN], &constraints, &[1f64], EPSILON).is_err());
        assert!(Tableau::<DenseStorage<f64>>::new(&[1f64, 1f64], &constraints, &[f64::INFINITY], EPSILON).is_err());
        assert!(Tableau::<DenseStorage<f64>>::new(&[1f64, 1f64], &constraints, &[1f64], -1f64).is_err());
    }

    #[test]
    fn pivot() {
        let mut tableau = tableau::<SparseStorage<f64>>();
        let column = 0;
        let row = tableau.select_primal_pivot_row(column, TieBreak::LowestRow).unwrap();
        // Ratios are 3, 2 and 2
        assert_eq!(row, 1);
        tableau.pivot(IterationPoint::new(row, column)).unwrap();

        assert!(tableau.is_in_basis(column));
        assert!(!tableau.is_in_basis(6));
        assert_eq!(tableau.basis_column_index_for_row(1), 0);
        assert!(tableau.is_valid_basis());
        assert!(tableau.is_primal_feasible());
        assert_abs_diff_eq!(tableau.objective_function_value(Phase::Two), -4f64);
        assert_abs_diff_eq!(tableau.objective_function_value(Phase::One), 4f64);
        // Degenerate: the third constraint now has value zero
        assert_abs_diff_eq!(tableau.constraint_value(2), 0f64);
    }

    #[test]
    fn tie_break() {
        let tableau = tableau::<DenseStorage<f64>>();
        // Ratios are 3, 2 and 2, the leaving columns of the tied rows are 6 and 7
        assert_eq!(tableau.select_primal_pivot_row(0, TieBreak::LowestRow), Some(1));
        assert_eq!(tableau.select_primal_pivot_row(0, TieBreak::LowestLeavingColumn), Some(1));

        // Column without positive entries in the constraint rows
        let constraints = DenseMatrix::from_rows(vec![vec![-1f64, 1f64]]).unwrap();
        let tableau = Tableau::<DenseStorage<f64>>::new(&[-1f64, 0f64], &constraints, &[1f64], EPSILON).unwrap();
        assert_eq!(tableau.select_primal_pivot_row(0, TieBreak::LowestRow), None);
        assert_eq!(tableau.select_primal_pivot_row(1, TieBreak::LowestRow), Some(0));
    }

    #[test]
    fn bland_tie_break() {
        let constraints = DenseMatrix::from_rows(vec![
            vec![1f64, 1f64, 0f64],
            vec![1f64, 0f64, 1f64],
        ]).unwrap();
        let mut tableau = Tableau::<DenseStorage<f64>>::new(&[-1f64, 0f64, 0f64], &constraints, &[2f64, 2f64], EPSILON).unwrap();
        // Row 1 gets basic column 2, which is lower than the artificial column 3 of row 0
        tableau.pivot(IterationPoint::new(1, 2)).unwrap();
        assert_eq!(tableau.basis_indices(), &[3, 2]);

        assert_eq!(tableau.select_primal_pivot_row(0, TieBreak::LowestRow), Some(0));
        assert_eq!(tableau.select_primal_pivot_row(0, TieBreak::LowestLeavingColumn), Some(1));
    }

    #[test]
    fn invalid_pivots() {
        let mut tableau = tableau::<DenseStorage<f64>>();
        assert!(matches!(tableau.pivot(IterationPoint::new(3, 0)), Err(PivotError::OutOfBounds { .. })));
        assert!(matches!(tableau.pivot(IterationPoint::new(0, 8)), Err(PivotError::OutOfBounds { .. })));
        assert!(matches!(tableau.pivot(IterationPoint::new(0, 6)), Err(PivotError::NearZeroPivot { .. })));
        assert_eq!(tableau.basis_indices(), &[5, 6, 7]);

        // Pivoting on a basic column in its own row changes nothing
        let before = tableau.clone();
        tableau.pivot(IterationPoint::new(2, 7)).unwrap();
        assert_eq!(tableau, before);
    }

    #[test]
    fn display() {
        let tableau = tableau::<SparseStorage<f64>>();
        let text = tableau.to_string();
        assert!(text.starts_with("=== Tableau ==="));
        assert!(text.contains("cost 1"));
        assert!(text.contains("cost 2"));
        assert!(text.contains("-28"));
        assert!(text.contains("[(0, 5), (1, 6), (2, 7)]"));
    }
}
