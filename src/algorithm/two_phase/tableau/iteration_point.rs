//! # Iteration points
//!
//! The location of a pivot and the phase of the two phase method that it belongs to.
use enum_map::Enum;

/// The two phases of the two phase method.
///
/// During the first phase, a basic feasible solution is sought by minimizing the sum of the
/// artificial variables. During the second phase, the actual cost function is minimized.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Minimizing the artificial cost.
    One,
    /// Minimizing the real cost.
    Two,
}

/// Where to pivot next.
///
/// Values are created by the driver for each pivot; the pivot rule decides on the row and column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IterationPoint {
    /// Constraint row of the pivot, in range `0` until the number of constraints.
    pub row: usize,
    /// Column of the pivot, in range `0` until the number of variables (artificial included).
    pub column: usize,
    phase: Phase,
}

impl IterationPoint {
    /// Create a point in the first phase.
    pub fn new(row: usize, column: usize) -> Self {
        Self::in_phase(row, column, Phase::One)
    }

    /// Create a point in a specific phase.
    pub fn in_phase(row: usize, column: usize, phase: Phase) -> Self {
        Self { row, column, phase }
    }

    /// The phase this point belongs to.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether this point is part of the search for a feasible solution.
    pub fn is_phase_one(&self) -> bool {
        self.phase == Phase::One
    }

    /// Move on to optimizing the real cost.
    ///
    /// After this call, the pivot rule consults the real cost row and artificial columns can no
    /// longer enter the basis.
    pub fn switch_to_phase_two(&mut self) {
        self.phase = Phase::Two;
    }
}

impl Default for IterationPoint {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
