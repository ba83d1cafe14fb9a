//! # Dense storage
//!
//! Wrapping a single row major `Vec<F>`, fixed size.
use std::fmt::Debug;

use itertools::repeat_n;
use num_traits::{Float, Zero};

use crate::algorithm::two_phase::tableau::storage::TableauStorage;
use crate::data::linear_algebra::snap;

/// Every cell of the tableau is materialized.
#[derive(Clone, Debug, PartialEq)]
pub struct Dense<F> {
    data: Vec<F>,
    nr_rows: usize,
    nr_columns: usize,
    epsilon: F,
}

impl<F> Dense<F> {
    fn index(&self, row: usize, column: usize) -> usize {
        assert!(row < self.nr_rows && column < self.nr_columns, "({row}, {column}) is outside the tableau");

        row * self.nr_columns + column
    }
}

impl<F: Float + Debug> TableauStorage for Dense<F> {
    type F = F;

    fn zeros(nr_rows: usize, nr_columns: usize, epsilon: F) -> Self {
        debug_assert!(epsilon >= F::zero());

        Self {
            data: repeat_n(F::zero(), nr_rows * nr_columns).collect(),
            nr_rows,
            nr_columns,
            epsilon,
        }
    }

    fn value_at(&self, row: usize, column: usize) -> F {
        self.data[self.index(row, column)]
    }

    fn set_value_at(&mut self, row: usize, column: usize, value: F) {
        let index = self.index(row, column);
        self.data[index] = snap(value, self.epsilon);
    }

    fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    fn epsilon(&self) -> F {
        self.epsilon
    }

    fn scale_row(&mut self, row: usize, factor: F) {
        let start = self.index(row, 0);
        let epsilon = self.epsilon;
        for value in &mut self.data[start..start + self.nr_columns] {
            if !value.is_zero() {
                *value = snap(*value * factor, epsilon);
            }
        }
    }

    fn subtract_multiple_of_row(&mut self, target: usize, source: usize, factor: F) {
        debug_assert_ne!(target, source);

        let (target_start, source_start) = (self.index(target, 0), self.index(source, 0));
        for j in 0..self.nr_columns {
            let source_value = self.data[source_start + j];
            if !source_value.is_zero() {
                let value = self.data[target_start + j] - factor * source_value;
                self.data[target_start + j] = snap(value, self.epsilon);
            }
        }
    }
}
