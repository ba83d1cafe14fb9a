//! # Sparse storage
//!
//! Every row is a `Vec<(usize, _)>`, sorted by column index, that never holds (near) zero values.
use std::fmt::Debug;
use std::mem;

use itertools::{EitherOrBoth, Itertools};
use num_traits::{Float, Zero};

use crate::algorithm::two_phase::tableau::storage::TableauStorage;
use crate::data::linear_algebra::SparseTuple;

/// Only the values with a magnitude of at least epsilon are stored.
///
/// TODO(ENHANCEMENT): Keep a column index next to the rows, such that `column_entries` doesn't
///  need a binary search in every row.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparse<F> {
    rows: Vec<Vec<SparseTuple<F>>>,
    nr_columns: usize,
    epsilon: F,
}

impl<F: Float> Sparse<F> {
    fn get_data_index(&self, row: usize, column: usize) -> Result<usize, usize> {
        self.rows[row].binary_search_by_key(&column, |&(j, _)| j)
    }

    fn is_negligible(&self, value: F) -> bool {
        value.abs() < self.epsilon
    }

    /// The values stored in a row.
    #[cfg(test)]
    pub fn row(&self, row: usize) -> &[SparseTuple<F>] {
        &self.rows[row]
    }
}

impl<F: Float + Debug> TableauStorage for Sparse<F> {
    type F = F;

    fn zeros(nr_rows: usize, nr_columns: usize, epsilon: F) -> Self {
        debug_assert!(epsilon >= F::zero());

        Self {
            rows: vec![Vec::new(); nr_rows],
            nr_columns,
            epsilon,
        }
    }

    fn value_at(&self, row: usize, column: usize) -> F {
        assert!(row < self.rows.len() && column < self.nr_columns, "({row}, {column}) is outside the tableau");

        match self.get_data_index(row, column) {
            Ok(index) => self.rows[row][index].1,
            Err(_) => F::zero(),
        }
    }

    fn set_value_at(&mut self, row: usize, column: usize, value: F) {
        assert!(row < self.rows.len() && column < self.nr_columns, "({row}, {column}) is outside the tableau");

        let negligible = self.is_negligible(value);
        match (self.get_data_index(row, column), negligible) {
            (Ok(index), true) => {
                self.rows[row].remove(index);
            },
            (Ok(index), false) => self.rows[row][index].1 = value,
            (Err(index), false) => self.rows[row].insert(index, (column, value)),
            (Err(_), true) => {},
        }
    }

    fn nr_rows(&self) -> usize {
        self.rows.len()
    }

    fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    fn epsilon(&self) -> F {
        self.epsilon
    }

    fn scale_row(&mut self, row: usize, factor: F) {
        let epsilon = self.epsilon;
        let values = &mut self.rows[row];
        for (_, value) in values.iter_mut() {
            *value = *value * factor;
        }
        values.retain(|&(_, value)| value.abs() >= epsilon);
    }

    /// Merges the two sorted rows.
    fn subtract_multiple_of_row(&mut self, target: usize, source: usize, factor: F) {
        debug_assert_ne!(target, source);

        let epsilon = self.epsilon;
        let old = mem::take(&mut self.rows[target]);
        let new = old.into_iter()
            .merge_join_by(self.rows[source].iter(), |&(i, _), &&(j, _)| i.cmp(&j))
            .filter_map(|either| {
                let (column, value) = match either {
                    EitherOrBoth::Left(tuple) => return Some(tuple),
                    EitherOrBoth::Right(&(column, source_value)) => (column, F::zero() - factor * source_value),
                    EitherOrBoth::Both((column, value), &(_, source_value)) => (column, value - factor * source_value),
                };

                (value.abs() >= epsilon).then_some((column, value))
            })
            .collect();

        self.rows[target] = new;
    }

    fn column_entries(&self, column: usize) -> Vec<SparseTuple<F>> {
        self.rows.iter()
            .enumerate()
            .filter_map(|(row, values)| {
                values.binary_search_by_key(&column, |&(j, _)| j)
                    .ok()
                    .map(|index| (row, values[index].1))
            })
            .collect()
    }

    fn nr_non_zeros(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}
