//! # Pivoting
//!
//! A Gauss-Jordan elimination step around a single element of the tableau. Written once against
//! the `TableauStorage` trait, such that the dense and sparse storage undergo exactly the same
//! sequence of floating point operations.
use num_traits::{Float, One, ToPrimitive, Zero};

use crate::algorithm::two_phase::tableau::storage::TableauStorage;
use crate::error::PivotError;

/// Make the element at (`row`, `column`) equal to one and all other elements of that column zero.
///
/// The other rows, cost rows included, are updated such that the tableau still describes the
/// same linear program.
///
/// # Arguments
///
/// * `storage`: Tableau values to transform.
/// * `row`: Row of the pivot element.
/// * `column`: Column of the pivot element.
///
/// # Errors
///
/// If the pivot element has a magnitude below the epsilon of the storage, nothing is changed.
pub fn pivot<S: TableauStorage>(storage: &mut S, row: usize, column: usize) -> Result<(), PivotError> {
    debug_assert!(row < storage.nr_rows());
    debug_assert!(column < storage.nr_columns());

    let pivot_value = storage.value_at(row, column);
    if pivot_value.abs() < storage.epsilon() {
        return Err(PivotError::NearZeroPivot {
            row,
            column,
            value: pivot_value.to_f64().unwrap_or(f64::NAN),
        });
    }

    storage.scale_row(row, S::F::one() / pivot_value);
    storage.set_value_at(row, column, S::F::one());

    for (other_row, factor) in storage.column_entries(column) {
        if other_row != row {
            storage.subtract_multiple_of_row(other_row, row, factor);
            storage.set_value_at(other_row, column, S::F::zero());
        }
    }

    Ok(())
}
