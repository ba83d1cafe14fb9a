//! # Strategies
//!
//! Deciding where to pivot next, or that there is nothing left to pivot on.
use crate::algorithm::two_phase::strategy::pivot_rule::PivotRule;
use crate::algorithm::two_phase::tableau::iteration_point::Phase;
use crate::algorithm::two_phase::tableau::storage::TableauStorage;
use crate::algorithm::two_phase::tableau::Tableau;

pub mod pivot_rule;

/// Outcome of asking a pivot rule for the next pivot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    /// Bring `column` into the basis at `row`.
    Pivot {
        /// Constraint row of the pivot.
        row: usize,
        /// Column entering the basis.
        column: usize,
    },
    /// No column has a negative relative cost.
    Optimal,
    /// The cost decreases without bound when increasing this column.
    Unbounded {
        /// Column with a negative relative cost and no positive constraint entries.
        column: usize,
    },
}

/// Select the next pivot of a phase.
pub fn select<S, PR>(rule: &mut PR, tableau: &Tableau<S>, phase: Phase) -> Selection
where
    S: TableauStorage,
    PR: PivotRule,
{
    match rule.select_primal_pivot_column(tableau, phase) {
        Some((column, _)) => match rule.select_primal_pivot_row(tableau, column) {
            Some(row) => Selection::Pivot { row, column },
            None => Selection::Unbounded { column },
        },
        None => Selection::Optimal,
    }
}
