//! # Pivot rules
//!
//! Strategies for moving from basis to basis.
use crate::algorithm::two_phase::tableau::{Tableau, TieBreak};
use crate::algorithm::two_phase::tableau::iteration_point::Phase;
use crate::algorithm::two_phase::tableau::storage::TableauStorage;
use crate::data::linear_algebra::SparseTuple;

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected, a row needs to be found. By default, this is the lowest
/// row of those that have the minimal ratio.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal Simplex method.
    ///
    /// # Arguments
    ///
    /// * `tableau`: Tableau in a basic feasible solution state.
    /// * `phase`: Cost function to decrease. Determines which columns are eligible.
    ///
    /// # Return value
    ///
    /// A non-basic column with a negative relative cost, and that cost. `None` if there is no
    /// such column.
    fn select_primal_pivot_column<S: TableauStorage>(
        &mut self,
        tableau: &Tableau<S>,
        phase: Phase,
    ) -> Option<SparseTuple<S::F>>;

    /// Row selection rule for the primal Simplex method.
    ///
    /// # Return value
    ///
    /// The row to pivot on, or `None` if the cost decreases without bound along the column.
    fn select_primal_pivot_row<S: TableauStorage>(
        &mut self,
        tableau: &Tableau<S>,
        column: usize,
    ) -> Option<usize> {
        tableau.select_primal_pivot_row(column, TieBreak::LowestRow)
    }
}

/// Non-basic columns that may enter the basis, together with their relative cost.
fn candidates<S: TableauStorage>(
    tableau: &Tableau<S>,
    phase: Phase,
) -> impl Iterator<Item = SparseTuple<S::F>> + '_ {
    let epsilon = tableau.epsilon();
    tableau.layout().eligible_columns(phase)
        .filter(move |&column| !tableau.is_in_basis(column))
        .map(move |column| (column, tableau.relative_cost(phase, column)))
        .filter(move |&(_, cost)| cost < -epsilon)
}

/// Simply pivot on the first column, which has a negative relative cost.
///
/// Ties in the ratio test go to the row with the lowest basic column. Together this is Bland's
/// rule, which never cycles.
#[derive(Copy, Clone, Debug, Default)]
pub struct FirstProfitable;
impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column<S: TableauStorage>(
        &mut self,
        tableau: &Tableau<S>,
        phase: Phase,
    ) -> Option<SparseTuple<S::F>> {
        candidates(tableau, phase).next()
    }

    fn select_primal_pivot_row<S: TableauStorage>(
        &mut self,
        tableau: &Tableau<S>,
        column: usize,
    ) -> Option<usize> {
        tableau.select_primal_pivot_row(column, TieBreak::LowestLeavingColumn)
    }
}

/// Simply pivot on the column, which has the most negative relative cost.
///
/// Costs that differ less than epsilon are equal, the lowest column index wins.
#[derive(Copy, Clone, Debug, Default)]
pub struct SteepestDescentAlongVariable;
impl PivotRule for SteepestDescentAlongVariable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column<S: TableauStorage>(
        &mut self,
        tableau: &Tableau<S>,
        phase: Phase,
    ) -> Option<SparseTuple<S::F>> {
        let epsilon = tableau.epsilon();
        let mut smallest: Option<SparseTuple<S::F>> = None;
        for (j, cost) in candidates(tableau, phase) {
            if let Some((existing_j, existing_cost)) = smallest.as_mut() {
                if cost < *existing_cost - epsilon {
                    *existing_j = j;
                    *existing_cost = cost;
                }
            } else { smallest = Some((j, cost)) }
        }

        smallest
    }
}

/// The pivot rules that can be selected through the solver options.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum PivotRuleKind {
    /// See `SteepestDescentAlongVariable`.
    #[default]
    SteepestDescentAlongVariable,
    /// See `FirstProfitable`.
    FirstProfitable,
}
