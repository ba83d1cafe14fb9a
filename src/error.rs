//! # Error reporting
//!
//! Problems encountered while building a tableau from the input data, or while pivoting on it.
//!
//! Note that an infeasible or unbounded linear program is not an error: those are regular outcomes
//! of the algorithm, see `algorithm::OptimizationResult`.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// An `InconsistencyError` is created when the input data does not describe a linear program.
///
/// For example, the length of the cost vector might not match the number of columns of the
/// constraint matrix.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InconsistencyError {
    description: String,
}

impl InconsistencyError {
    /// Wrap a text in an `InconsistencyError`.
    ///
    /// # Arguments
    ///
    /// * `description`: A human-readable text meant for the end user.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into() }
    }

    /// What is wrong with the input.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for InconsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InconsistencyError: {}", self.description)
    }
}

impl Error for InconsistencyError {}

/// A pivot was requested that can not be carried out.
///
/// A correct pivot rule never selects such a pivot, so these errors indicate a bug or severe
/// numerical trouble.
#[derive(Debug, Clone, PartialEq)]
pub enum PivotError {
    /// The pivot element is (numerically) zero, dividing by it would produce garbage.
    NearZeroPivot {
        /// Constraint row of the pivot.
        row: usize,
        /// Column of the pivot.
        column: usize,
        /// The offending value.
        value: f64,
    },
    /// The pivot is not located on a constraint row, or it is located on the right hand side.
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
        /// Number of constraint rows of the tableau.
        nr_constraints: usize,
        /// Number of variable columns (excluding the right hand side) of the tableau.
        nr_variables: usize,
    },
}

impl Display for PivotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PivotError::NearZeroPivot { row, column, value } => write!(
                f, "PivotError: element at ({row}, {column}) has magnitude {value:e}, too close to zero",
            ),
            PivotError::OutOfBounds { row, column, nr_constraints, nr_variables } => write!(
                f,
                "PivotError: ({row}, {column}) is outside of the {nr_constraints} constraint rows \
                and {nr_variables} variable columns",
            ),
        }
    }
}

impl Error for PivotError {}

/// Reasons for a solve to stop before reaching one of the terminal states.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The input could not be turned into a tableau.
    Input(InconsistencyError),
    /// A pivot could not be applied.
    Pivot(PivotError),
    /// The configured maximum number of iterations was reached.
    IterationLimit(usize),
    /// The artificial cost appeared to be unbounded, which is mathematically impossible.
    ///
    /// The artificial cost is a sum of nonnegative variables, so this can only be caused by an
    /// accumulation of rounding errors.
    UnboundedArtificialCost {
        /// Column that was selected to enter the basis.
        column: usize,
    },
}

impl Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveError::Input(error) => error.fmt(f),
            SolveError::Pivot(error) => error.fmt(f),
            SolveError::IterationLimit(limit) => {
                write!(f, "SolveError: no terminal state reached within {limit} iterations")
            },
            SolveError::UnboundedArtificialCost { column } => write!(
                f, "SolveError: artificial cost decreases without bound along column {column}",
            ),
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolveError::Input(error) => Some(error),
            SolveError::Pivot(error) => Some(error),
            SolveError::IterationLimit(_) | SolveError::UnboundedArtificialCost { .. } => None,
        }
    }
}

impl From<InconsistencyError> for SolveError {
    fn from(error: InconsistencyError) -> Self {
        SolveError::Input(error)
    }
}

impl From<PivotError> for SolveError {
    fn from(error: PivotError) -> Self {
        SolveError::Pivot(error)
    }
}
