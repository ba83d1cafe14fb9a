//! # Matrix implementations
//!
//! The `Matrix` trait defines the read access the solver needs to a constraint matrix. Two
//! implementations are provided: a dense row major one and a sparse one, storing only the nonzero
//! values of every row.
use std::iter::{Copied, Enumerate, Filter};
use std::slice::Iter;

use num_traits::{Float, Zero};

use crate::data::linear_algebra::SparseTuple;
use crate::error::InconsistencyError;

/// Read access to a constraint matrix, row by row.
pub trait Matrix<F> {
    /// Iterator over the nonzero values of a row.
    type RowIter<'a>: Iterator<Item = SparseTuple<F>> where Self: 'a;

    /// Number of rows, equal to the number of constraints.
    fn nr_rows(&self) -> usize;
    /// Number of columns, equal to the number of variables.
    fn nr_columns(&self) -> usize;
    /// Iterate over the nonzero values of row `i`, sorted by column index.
    fn iter_row(&self, i: usize) -> Self::RowIter<'_>;
    /// Number of nonzero values in the matrix.
    fn nr_non_zeros(&self) -> usize;

    /// Fraction of the values that is nonzero.
    ///
    /// An empty matrix has density zero.
    fn density(&self) -> f64 {
        let size = self.nr_rows() * self.nr_columns();
        if size == 0 {
            0_f64
        } else {
            self.nr_non_zeros() as f64 / size as f64
        }
    }
}

/// Uses a single row major `Vec<F>` as underlying data structure. Dimensions are fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix<F> {
    data: Vec<F>,
    nr_rows: usize,
    nr_columns: usize,
}

impl<F: Float> DenseMatrix<F> {
    /// Create a new instance from row major data.
    ///
    /// # Arguments
    ///
    /// * `data`: Values, row after row. Should have length `nr_rows * nr_columns`.
    /// * `nr_rows`: Number of rows.
    /// * `nr_columns`: Number of columns.
    ///
    /// # Return value
    ///
    /// The matrix, or an error if the data does not fit the dimensions or is not finite.
    pub fn new(data: Vec<F>, nr_rows: usize, nr_columns: usize) -> Result<Self, InconsistencyError> {
        if data.len() != nr_rows * nr_columns {
            return Err(InconsistencyError::new(format!(
                "{} values can not fill a {nr_rows} x {nr_columns} matrix", data.len(),
            )));
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(InconsistencyError::new(format!(
                "value at ({}, {}) is not finite", index / nr_columns, index % nr_columns,
            )));
        }

        Ok(Self { data, nr_rows, nr_columns })
    }

    /// Create a new instance from a `Vec` of rows.
    ///
    /// All rows should have the same length.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<Self, InconsistencyError> {
        let nr_rows = rows.len();
        let nr_columns = rows.first().map_or(0, Vec::len);
        if let Some(i) = rows.iter().position(|row| row.len() != nr_columns) {
            return Err(InconsistencyError::new(format!(
                "row {i} has length {}, while row 0 has length {nr_columns}", rows[i].len(),
            )));
        }

        Self::new(rows.into_iter().flatten().collect(), nr_rows, nr_columns)
    }

    /// Get the value at coordinate (`i`, `j`).
    #[cfg(test)]
    pub fn get(&self, i: usize, j: usize) -> F {
        debug_assert!(i < self.nr_rows);
        debug_assert!(j < self.nr_columns);

        self.data[i * self.nr_columns + j]
    }
}

fn is_non_zero<F: Float>(&(_, value): &SparseTuple<F>) -> bool {
    !value.is_zero()
}

impl<F: Float> Matrix<F> for DenseMatrix<F> {
    type RowIter<'a> = Filter<Enumerate<Copied<Iter<'a, F>>>, fn(&SparseTuple<F>) -> bool> where Self: 'a;

    fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    fn iter_row(&self, i: usize) -> Self::RowIter<'_> {
        debug_assert!(i < self.nr_rows);

        let start = i * self.nr_columns;
        self.data[start..start + self.nr_columns].iter()
            .copied()
            .enumerate()
            .filter(is_non_zero as fn(&SparseTuple<F>) -> bool)
    }

    fn nr_non_zeros(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }
}

/// Sparse matrix stored row by row.
///
/// Every row is a `Vec` of `(column, value)` tuples, sorted by column, without zero values.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix<F> {
    rows: Vec<Vec<SparseTuple<F>>>,
    nr_columns: usize,
}

impl<F: Float> SparseMatrix<F> {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `rows`: For each row, the `(column, value)` tuples. Should be sorted by column and not
    /// contain duplicate columns. Explicit zeros are dropped.
    /// * `nr_columns`: Number of columns of the matrix.
    pub fn new(rows: Vec<Vec<SparseTuple<F>>>, nr_columns: usize) -> Result<Self, InconsistencyError> {
        let mut checked = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if !row.windows(2).all(|w| w[0].0 < w[1].0) {
                return Err(InconsistencyError::new(format!(
                    "row {i} is not sorted by strictly increasing column index",
                )));
            }
            if let Some(&(j, _)) = row.iter().find(|&&(j, _)| j >= nr_columns) {
                return Err(InconsistencyError::new(format!(
                    "row {i} has column index {j}, but there are only {nr_columns} columns",
                )));
            }
            if let Some(&(j, _)) = row.iter().find(|(_, v)| !v.is_finite()) {
                return Err(InconsistencyError::new(format!("value at ({i}, {j}) is not finite")));
            }

            checked.push(row.into_iter().filter(|(_, v)| !v.is_zero()).collect());
        }

        Ok(Self { rows: checked, nr_columns })
    }

    /// Create a sparse matrix from dense rows.
    pub fn from_dense_rows(rows: Vec<Vec<F>>) -> Result<Self, InconsistencyError> {
        Ok(Self::from(&DenseMatrix::from_rows(rows)?))
    }

    /// Get the value at coordinate (`i`, `j`).
    #[cfg(test)]
    pub fn get(&self, i: usize, j: usize) -> F {
        debug_assert!(i < self.rows.len());
        debug_assert!(j < self.nr_columns);

        match self.rows[i].binary_search_by_key(&j, |&(jj, _)| jj) {
            Ok(index) => self.rows[i][index].1,
            Err(_) => F::zero(),
        }
    }
}

impl<F: Float> From<&DenseMatrix<F>> for SparseMatrix<F> {
    fn from(dense: &DenseMatrix<F>) -> Self {
        Self {
            rows: (0..dense.nr_rows()).map(|i| dense.iter_row(i).collect()).collect(),
            nr_columns: dense.nr_columns(),
        }
    }
}

impl<F: Float> Matrix<F> for SparseMatrix<F> {
    type RowIter<'a> = Copied<Iter<'a, SparseTuple<F>>> where Self: 'a;

    fn nr_rows(&self) -> usize {
        self.rows.len()
    }

    fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    fn iter_row(&self, i: usize) -> Self::RowIter<'_> {
        self.rows[i].iter().copied()
    }

    fn nr_non_zeros(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}
