use approx::assert_abs_diff_eq;

use relp_tableau::algorithm::State;
use relp_tableau::algorithm::two_phase::config::SolverOptions;
use relp_tableau::algorithm::two_phase::solve;
use relp_tableau::algorithm::two_phase::tableau::storage::StorageKind;
use relp_tableau::data::linear_algebra::matrix::SparseMatrix;

use super::Problem;

fn degenerate() -> Problem {
    Problem::new(
        vec![-2f64, -1f64, 0f64, 0f64, 0f64],
        vec![
            vec![4f64, 3f64, 1f64, 0f64, 0f64],
            vec![4f64, 1f64, 0f64, 1f64, 0f64],
            vec![4f64, 2f64, 0f64, 0f64, 1f64],
        ],
        vec![12f64, 8f64, 8f64],
    )
}

fn multiple_optimal_solutions() -> Problem {
    Problem::new(
        vec![-4f64, -14f64, 0f64, 0f64],
        vec![
            vec![2f64, 7f64, 1f64, 0f64],
            vec![7f64, 2f64, 0f64, 1f64],
        ],
        vec![21f64, 21f64],
    )
}

fn unbounded() -> Problem {
    Problem::new(
        vec![-2f64, -1f64, 0f64, 0f64],
        vec![
            vec![1f64, -1f64, 1f64, 0f64],
            vec![2f64, -1f64, 0f64, 1f64],
        ],
        vec![10f64, 40f64],
    )
}

fn solve_with_both_storages(problem: &Problem) -> Vec<(State, Vec<f64>, f64)> {
    [StorageKind::Dense, StorageKind::Sparse].into_iter()
        .map(|storage| {
            let options = SolverOptions { storage, ..SolverOptions::default() };
            let result = solve(&problem.cost, &problem.constraints, &problem.b, &options).unwrap();
            (result.state, result.solution, result.objective_value)
        })
        .collect()
}

#[test]
fn degeneracy() {
    let problem = degenerate();
    for (state, solution, objective_value) in solve_with_both_storages(&problem) {
        assert_eq!(state, State::Optimal);
        assert_abs_diff_eq!(solution[..], [2f64, 0f64, 4f64, 0f64, 0f64][..], epsilon = 1e-9);
        assert_abs_diff_eq!(objective_value, -4f64, epsilon = 1e-9);
    }

    let tableau = problem.pivot_both(&[(1, 0), (2, 1), (2, 3)]);
    assert_abs_diff_eq!(tableau.double_value(3, 5 + 3), 4f64, epsilon = 1e-9);
}

#[test]
fn multiple_optima() {
    let problem = multiple_optimal_solutions();
    for (state, solution, objective_value) in solve_with_both_storages(&problem) {
        assert_eq!(state, State::Optimal);
        assert_abs_diff_eq!(solution[..], [7f64 / 3f64, 7f64 / 3f64, 0f64, 0f64][..], epsilon = 1e-9);
        assert_abs_diff_eq!(objective_value, -42f64, epsilon = 1e-9);
    }

    let tableau = problem.pivot_both(&[(0, 1), (1, 0)]);
    assert_abs_diff_eq!(tableau.double_value(2, 4 + 2), 42f64, epsilon = 1e-9);
}

#[test]
fn unboundedness() {
    let problem = unbounded();
    for (state, solution, objective_value) in solve_with_both_storages(&problem) {
        assert_eq!(state, State::Unbounded);
        assert_abs_diff_eq!(solution[..], [30f64, 20f64, 0f64, 0f64][..], epsilon = 1e-9);
        assert_abs_diff_eq!(objective_value, -80f64, epsilon = 1e-9);
    }

    let tableau = problem.pivot_both(&[(0, 0), (1, 1)]);
    assert_abs_diff_eq!(tableau.double_value(2, 4 + 2), 80f64, epsilon = 1e-9);
}

#[test]
fn sparse_input() {
    let problem = degenerate();
    let constraints = SparseMatrix::from(&problem.constraints);
    let result = solve(&problem.cost, &constraints, &problem.b, &SolverOptions::default()).unwrap();

    assert_eq!(result.state, State::Optimal);
    assert_abs_diff_eq!(result.solution[..], [2f64, 0f64, 4f64, 0f64, 0f64][..], epsilon = 1e-9);
}

#[test]
fn single_precision() {
    let cost = [-4f32, -14f32, 0f32, 0f32];
    let constraints = SparseMatrix::from_dense_rows(vec![
        vec![2f32, 7f32, 1f32, 0f32],
        vec![7f32, 2f32, 0f32, 1f32],
    ]).unwrap();
    let result = solve(&cost, &constraints, &[21f32, 21f32], &SolverOptions::default()).unwrap();

    assert_eq!(result.state, State::Optimal);
    assert_abs_diff_eq!(result.objective_value, -42f32, epsilon = 1e-3);
}
