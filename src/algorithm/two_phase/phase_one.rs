//! # Phase one
//!
//! Concluding the search for a basic feasible solution, once the artificial cost can't be
//! decreased any further.
use log::debug;
use num_traits::Float;

use crate::algorithm::two_phase::tableau::iteration_point::{IterationPoint, Phase};
use crate::algorithm::two_phase::tableau::storage::TableauStorage;
use crate::algorithm::two_phase::tableau::Tableau;
use crate::error::PivotError;

/// LP's can be either feasible (allowing at least one solution) or infeasible (allowing no
/// solutions).
///
/// If the problem is feasible, it can either have full rank, or be rank deficient.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RankedFeasibilityResult {
    /// The tableau now holds a basic feasible solution in which only artificial variables of
    /// redundant rows are basic.
    Feasible {
        /// Whether there are redundant rows.
        rank: Rank,
    },
    /// The problem is not feasible.
    Infeasible,
}

/// A matrix or linear program either has full rank, or be rank deficient.
///
/// In case it is rank deficient, a sorted, deduplicated list of (row)indices is provided, of rows
/// that are a linear combination of the other rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rank {
    /// The matrix is full rank, no rows are redundant.
    Full,
    /// The `Vec<usize>` is sorted and contains no duplicate values.
    Deficient(Vec<usize>),
}

/// Decide on feasibility at the end of the first phase.
///
/// # Arguments
///
/// * `tableau`: Tableau of which the artificial cost can't be decreased any further.
///
/// # Return value
///
/// Whether a basic feasible solution without artificial variables (in non-redundant rows) was
/// found. If so, the tableau is in that solution.
///
/// # Errors
///
/// If the artificial variables can't be pivoted out due to numerical trouble.
pub fn finish<S: TableauStorage>(tableau: &mut Tableau<S>) -> Result<RankedFeasibilityResult, PivotError> {
    if tableau.objective_function_value(Phase::One) > tableau.feasibility_tolerance() {
        return Ok(RankedFeasibilityResult::Infeasible);
    }

    let rank = if tableau.has_artificial_in_basis() {
        let rows_to_remove = remove_artificial_basis_variables(tableau)?;
        if rows_to_remove.is_empty() {
            Rank::Full
        } else {
            Rank::Deficient(rows_to_remove)
        }
    } else {
        Rank::Full
    };

    Ok(RankedFeasibilityResult::Feasible { rank })
}

/// Removes all artificial variables from the basis by making a basis change "at zero level", or
/// without change of the current solution.
///
/// # Arguments
///
/// * `tableau`: Tableau to change the basis for.
///
/// # Return value
///
/// A `Vec` with indices of rows that are redundant. Is sorted as a side effect of the algorithm.
fn remove_artificial_basis_variables<S: TableauStorage>(
    tableau: &mut Tableau<S>,
) -> Result<Vec<usize>, PivotError> {
    let mut rows_to_remove = Vec::new();

    for pivot_row in tableau.artificial_basis_rows() {
        // The artificial variable was basic in this row from the start, and it still is
        let pivot_column = (0..tableau.nr_decision_variables())
            .filter(|&j| !tableau.is_in_basis(j))
            .find(|&j| tableau.value_at(pivot_row, j).abs() >= tableau.epsilon());

        if let Some(pivot_column) = pivot_column {
            debug!("pivoting artificial out of row {pivot_row} on column {pivot_column}");
            tableau.pivot(IterationPoint::new(pivot_row, pivot_column))?;
        } else {
            rows_to_remove.push(pivot_row);
        }
    }

    debug_assert!(rows_to_remove.is_sorted());
    Ok(rows_to_remove)
}
