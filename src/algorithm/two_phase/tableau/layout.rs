//! # Tableau layout
//!
//! Which rows and columns of the tableau hold what.
//!
//! The indexing is as follows, for `m` constraints and `n` variables:
//!
//! /                   || Decision variables (n) | Artificial variables (m) | RHS |
//! ====================||========================|==========================|=====|
//! Constraints (m)     ||        +/- A           |            I             |  b  |
//! --------------------||------------------------|--------------------------|-----|
//! Real cost           ||           c            |            0             | -z  |
//! --------------------||------------------------|--------------------------|-----|
//! Artificial cost     ||    -1^T (+/- A)        |            0             | -w  |
//! -------------------------------------------------------------------------------
use std::ops::Range;

use cumsum::cumsum_array_owned;
use enum_map::{Enum, enum_map, EnumArray, EnumMap};

use crate::algorithm::two_phase::tableau::iteration_point::Phase;

/// Groups of rows, in the order they appear in.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum RowType {
    /// One row per equality constraint.
    Constraint,
    /// The reduced costs of the real objective.
    RealCost,
    /// The reduced costs of the artificial objective.
    ArtificialCost,
}

/// Groups of columns, in the order they appear in.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColumnType {
    /// Variables of the original problem.
    Decision,
    /// One artificial variable per constraint.
    Artificial,
    /// The current values of the basic variables.
    RightHandSide,
}

/// Dimensions of the tableau and the boundaries between the row and column groups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    /// Indices (exclusive) at which the row groups end.
    row_group_end: EnumMap<RowType, usize>,
    /// Indices (exclusive) at which the column groups end.
    column_group_end: EnumMap<ColumnType, usize>,
    /// The row holding the reduced costs for each phase.
    cost_row: EnumMap<Phase, usize>,
}

impl Layout {
    /// Compute the layout for a problem.
    ///
    /// # Arguments
    ///
    /// * `nr_constraints`: Number of equality constraints `m`.
    /// * `nr_decision_variables`: Number of variables `n` of the problem.
    pub fn new(nr_constraints: usize, nr_decision_variables: usize) -> Self {
        let cumulative = cumsum_array_owned([nr_constraints, 1, 1]);
        let row_group_end = enum_map! {
            RowType::Constraint     => cumulative[0],
            RowType::RealCost       => cumulative[1],
            RowType::ArtificialCost => cumulative[2],
        };

        let cumulative = cumsum_array_owned([nr_decision_variables, nr_constraints, 1]);
        let column_group_end = enum_map! {
            ColumnType::Decision      => cumulative[0],
            ColumnType::Artificial    => cumulative[1],
            ColumnType::RightHandSide => cumulative[2],
        };

        let cost_row = enum_map! {
            Phase::One => row_group_end[RowType::RealCost],
            Phase::Two => row_group_end[RowType::Constraint],
        };

        Self { row_group_end, column_group_end, cost_row }
    }

    /// Number of constraints `m`.
    pub fn nr_constraints(&self) -> usize {
        self.row_group_end[RowType::Constraint]
    }

    /// Number of variables `n` of the original problem.
    pub fn nr_decision_variables(&self) -> usize {
        self.column_group_end[ColumnType::Decision]
    }

    /// Number of variable columns, artificial variables included.
    pub fn nr_variables(&self) -> usize {
        self.column_group_end[ColumnType::Artificial]
    }

    /// Total number of rows, cost rows included.
    pub fn nr_rows(&self) -> usize {
        self.row_group_end[RowType::ArtificialCost]
    }

    /// Total number of columns, right hand side included.
    pub fn nr_columns(&self) -> usize {
        self.column_group_end[ColumnType::RightHandSide]
    }

    /// Index of the right hand side column.
    pub fn rhs_column(&self) -> usize {
        self.column_group_end[ColumnType::Artificial]
    }

    /// Index of the row holding the reduced costs of a phase.
    pub fn cost_row(&self, phase: Phase) -> usize {
        self.cost_row[phase]
    }

    /// Column of the artificial variable belonging to constraint `row`.
    pub fn artificial_column(&self, row: usize) -> usize {
        debug_assert!(row < self.nr_constraints());

        self.column_group_end[ColumnType::Decision] + row
    }

    /// Whether a column belongs to an artificial variable.
    pub fn is_artificial(&self, column: usize) -> bool {
        self.column_type(column) == ColumnType::Artificial
    }

    /// Classify a row by type.
    #[cfg(test)]
    pub fn row_type(&self, row: usize) -> RowType {
        debug_assert!(row < self.nr_rows());

        Self::group_of(row, &self.row_group_end)
    }

    /// Classify a column by type.
    pub fn column_type(&self, column: usize) -> ColumnType {
        debug_assert!(column < self.nr_columns());

        Self::group_of(column, &self.column_group_end)
    }

    /// The columns that may enter the basis in a phase.
    ///
    /// Artificial variables may only enter the basis while the artificial cost is minimized.
    pub fn eligible_columns(&self, phase: Phase) -> Range<usize> {
        match phase {
            Phase::One => 0..self.nr_variables(),
            Phase::Two => 0..self.nr_decision_variables(),
        }
    }

    fn group_of<K: EnumArray<usize> + Copy>(index: usize, group_end: &EnumMap<K, usize>) -> K {
        group_end.iter()
            .find(|&(_, &end)| index < end)
            .map_or_else(|| K::from_usize(K::LENGTH - 1), |(group, _)| group)
    }
}
