//! # Tableau storage
//!
//! The numeric content of a Simplex tableau, behind a single interface with a dense and a sparse
//! implementation. Which one is faster depends on the density of the constraint matrix; they are
//! required to produce the same values after the same sequence of pivots.
//!
//! All writes snap values whose magnitude is below the storage's epsilon to exact zero. For the
//! sparse storage this means that the entry is removed, for the dense storage that a zero is
//! written; a reader can't tell the difference.
use std::fmt::Debug;

use num_traits::{Float, Zero};

pub use dense::Dense as DenseStorage;
pub use sparse::Sparse as SparseStorage;

use crate::data::linear_algebra::SparseTuple;

mod dense;
mod sparse;

/// Read and write access to the cells of a tableau.
///
/// Apart from construction, only the pivot operator writes to a storage. The row operations have
/// default implementations in terms of `value_at` and `set_value_at`, implementations can override
/// them with something faster.
pub trait TableauStorage: Debug {
    /// Type of the values stored.
    type F: Float + Debug;

    /// Create a storage of the given dimensions containing only zeros.
    ///
    /// # Arguments
    ///
    /// * `nr_rows`: Number of rows, cost rows included.
    /// * `nr_columns`: Number of columns, right hand side included.
    /// * `epsilon`: Values with a magnitude below this value are stored as zero.
    fn zeros(nr_rows: usize, nr_columns: usize, epsilon: Self::F) -> Self;

    /// Value at (`row`, `column`).
    ///
    /// # Panics
    ///
    /// If the position lies outside the storage.
    fn value_at(&self, row: usize, column: usize) -> Self::F;

    /// Overwrite the value at (`row`, `column`).
    ///
    /// Values close to zero are stored as zero.
    ///
    /// # Panics
    ///
    /// If the position lies outside the storage.
    fn set_value_at(&mut self, row: usize, column: usize, value: Self::F);

    /// Number of rows.
    fn nr_rows(&self) -> usize;

    /// Number of columns.
    fn nr_columns(&self) -> usize;

    /// Values with a magnitude below this value are stored as zero.
    fn epsilon(&self) -> Self::F;

    /// Index of the right hand side column, which is the last column.
    fn rhs_column_index(&self) -> usize {
        debug_assert!(self.nr_columns() > 0);

        self.nr_columns() - 1
    }

    /// Multiply all values of a row by a constant.
    fn scale_row(&mut self, row: usize, factor: Self::F) {
        for column in 0..self.nr_columns() {
            let value = self.value_at(row, column);
            if !value.is_zero() {
                self.set_value_at(row, column, value * factor);
            }
        }
    }

    /// Subtract a multiple of the `source` row from the `target` row.
    ///
    /// # Arguments
    ///
    /// * `target`: Row that is changed, should not be equal to `source`.
    /// * `source`: Row of which a multiple is subtracted.
    /// * `factor`: Multiple in which the row is subtracted.
    fn subtract_multiple_of_row(&mut self, target: usize, source: usize, factor: Self::F) {
        debug_assert_ne!(target, source);

        for column in 0..self.nr_columns() {
            let source_value = self.value_at(source, column);
            if !source_value.is_zero() {
                let value = self.value_at(target, column) - factor * source_value;
                self.set_value_at(target, column, value);
            }
        }
    }

    /// All nonzero values in a column, sorted by row index.
    fn column_entries(&self, column: usize) -> Vec<SparseTuple<Self::F>> {
        (0..self.nr_rows())
            .map(|row| (row, self.value_at(row, column)))
            .filter(|(_, value)| !value.is_zero())
            .collect()
    }

    /// Number of values that are stored as nonzero.
    fn nr_non_zeros(&self) -> usize {
        (0..self.nr_rows())
            .map(|row| (0..self.nr_columns()).filter(|&column| !self.value_at(row, column).is_zero()).count())
            .sum()
    }
}

/// Which storage to use for a solve.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum StorageKind {
    /// Always materialize every cell.
    Dense,
    /// Only store the nonzero values.
    Sparse,
    /// Decide based on the density of the constraint matrix.
    #[default]
    Automatic,
}

/// Largest absolute difference between the values of two storages.
///
/// # Return value
///
/// `None` if the storages have different dimensions. An empty storage has difference zero.
pub fn max_difference<A, B>(first: &A, second: &B) -> Option<A::F>
where
    A: TableauStorage,
    B: TableauStorage<F = A::F>,
{
    if first.nr_rows() != second.nr_rows() || first.nr_columns() != second.nr_columns() {
        return None;
    }

    let difference = (0..first.nr_rows())
        .flat_map(|row| (0..first.nr_columns()).map(move |column| (row, column)))
        .map(|(row, column)| (first.value_at(row, column) - second.value_at(row, column)).abs())
        .fold(A::F::zero(), A::F::max);

    Some(difference)
}

#[cfg(test)]
mod test {
    //! Tests that both storages should pass.

    use crate::algorithm::two_phase::tableau::storage::{DenseStorage, max_difference, SparseStorage, TableauStorage};
    use crate::data::linear_algebra::EPSILON;

    fn filled<S: TableauStorage<F = f64>>() -> S {
        let mut storage = S::zeros(3, 4, EPSILON);
        for (row, values) in [[2f64, 0f64, 4f64, 6f64], [1f64, 1f64, 0f64, 3f64], [0f64, -2f64, 2f64, 0f64]].into_iter().enumerate() {
            for (column, value) in values.into_iter().enumerate() {
                storage.set_value_at(row, column, value);
            }
        }
        storage
    }

    fn get_set<S: TableauStorage<F = f64>>() {
        let mut storage = filled::<S>();
        assert_eq!(storage.nr_rows(), 3);
        assert_eq!(storage.nr_columns(), 4);
        assert_eq!(storage.rhs_column_index(), 3);
        assert_eq!(storage.value_at(0, 2), 4f64);
        assert_eq!(storage.value_at(0, 1), 0f64);

        storage.set_value_at(0, 1, 7f64);
        assert_eq!(storage.value_at(0, 1), 7f64);
        storage.set_value_at(0, 1, 0f64);
        assert_eq!(storage.value_at(0, 1), 0f64);
        assert_eq!(storage.nr_non_zeros(), 8);
    }

    fn near_zero_writes<S: TableauStorage<F = f64>>() {
        let mut storage = filled::<S>();
        storage.set_value_at(1, 0, 1e-14);
        assert_eq!(storage.value_at(1, 0), 0f64);
        storage.set_value_at(1, 0, -1e-14);
        assert_eq!(storage.value_at(1, 0), 0f64);
        assert_eq!(storage.nr_non_zeros(), 7);
    }

    fn scale_row<S: TableauStorage<F = f64>>() {
        let mut storage = filled::<S>();
        storage.scale_row(0, 0.5);
        assert_eq!(storage.value_at(0, 0), 1f64);
        assert_eq!(storage.value_at(0, 1), 0f64);
        assert_eq!(storage.value_at(0, 2), 2f64);
        assert_eq!(storage.value_at(0, 3), 3f64);
        assert_eq!(storage.value_at(1, 3), 3f64);
    }

    fn subtract_row<S: TableauStorage<F = f64>>() {
        let mut storage = filled::<S>();
        storage.subtract_multiple_of_row(0, 1, 2f64);
        // 2 - 2 * 1 cancels
        assert_eq!(storage.value_at(0, 0), 0f64);
        assert_eq!(storage.value_at(0, 1), -2f64);
        assert_eq!(storage.value_at(0, 2), 4f64);
        assert_eq!(storage.value_at(0, 3), 0f64);
        // Source untouched
        assert_eq!(storage.value_at(1, 0), 1f64);
    }

    fn column_entries<S: TableauStorage<F = f64>>() {
        let storage = filled::<S>();
        assert_eq!(storage.column_entries(0), vec![(0, 2f64), (1, 1f64)]);
        assert_eq!(storage.column_entries(1), vec![(1, 1f64), (2, -2f64)]);
    }

    #[test]
    fn dense() {
        get_set::<DenseStorage<f64>>();
        near_zero_writes::<DenseStorage<f64>>();
        scale_row::<DenseStorage<f64>>();
        subtract_row::<DenseStorage<f64>>();
        column_entries::<DenseStorage<f64>>();
    }

    #[test]
    fn sparse() {
        get_set::<SparseStorage<f64>>();
        near_zero_writes::<SparseStorage<f64>>();
        scale_row::<SparseStorage<f64>>();
        subtract_row::<SparseStorage<f64>>();
        column_entries::<SparseStorage<f64>>();
    }

    #[test]
    fn difference() {
        let dense = filled::<DenseStorage<f64>>();
        let mut sparse = filled::<SparseStorage<f64>>();
        assert_eq!(max_difference(&dense, &sparse), Some(0f64));

        sparse.set_value_at(2, 3, 0.25);
        assert_eq!(max_difference(&dense, &sparse), Some(0.25));

        let other = DenseStorage::<f64>::zeros(3, 5, EPSILON);
        assert_eq!(max_difference(&dense, &other), None);
    }

    #[test]
    #[should_panic]
    fn dense_column_out_of_bounds() {
        // Would be (1, 0) when only the flat index is checked
        filled::<DenseStorage<f64>>().value_at(0, 4);
    }

    #[test]
    #[should_panic]
    fn sparse_column_out_of_bounds() {
        filled::<SparseStorage<f64>>().value_at(0, 4);
    }

    #[test]
    #[should_panic]
    fn sparse_write_out_of_bounds() {
        filled::<SparseStorage<f64>>().set_value_at(1, 4, 1f64);
    }
}
