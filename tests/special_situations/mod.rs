//! # Special situations
//!
//! Small problems that exercise degeneracy, multiple optima and unboundedness. Each problem is
//! solved through the public entry point and pivoted by hand on a dense and a sparse tableau in
//! lockstep.
use relp_tableau::algorithm::two_phase::tableau::iteration_point::IterationPoint;
use relp_tableau::algorithm::two_phase::tableau::storage::{DenseStorage, max_difference, SparseStorage};
use relp_tableau::algorithm::two_phase::tableau::Tableau;
use relp_tableau::data::linear_algebra::EPSILON;
use relp_tableau::data::linear_algebra::matrix::DenseMatrix;

/// # Problems and their expected outcomes
#[allow(missing_docs)]
mod test;

/// A problem in equality form.
struct Problem {
    cost: Vec<f64>,
    constraints: DenseMatrix<f64>,
    b: Vec<f64>,
}

impl Problem {
    fn new(cost: Vec<f64>, rows: Vec<Vec<f64>>, b: Vec<f64>) -> Self {
        Self {
            cost,
            constraints: DenseMatrix::from_rows(rows).unwrap(),
            b,
        }
    }

    /// Pivot a dense and a sparse tableau on the same points, comparing them after every pivot.
    ///
    /// # Return value
    ///
    /// The dense tableau after the last pivot.
    fn pivot_both(&self, points: &[(usize, usize)]) -> Tableau<DenseStorage<f64>> {
        let mut dense = Tableau::<DenseStorage<f64>>::new(&self.cost, &self.constraints, &self.b, EPSILON).unwrap();
        let mut sparse = Tableau::<SparseStorage<f64>>::new(&self.cost, &self.constraints, &self.b, EPSILON).unwrap();
        assert_eq!(max_difference(dense.storage(), sparse.storage()), Some(0f64));

        let mut point = IterationPoint::default();
        point.switch_to_phase_two();
        for &(row, column) in points {
            point.row = row;
            point.column = column;
            dense.pivot(point).unwrap();
            sparse.pivot(point).unwrap();

            let difference = max_difference(dense.storage(), sparse.storage()).unwrap();
            assert!(difference <= 1e-12, "storages differ by {difference} after pivot ({row}, {column})");
            assert_eq!(dense.basis_indices(), sparse.basis_indices());
        }

        dense
    }
}
