//! # Problems shared by the unit tests.
//!
//! Every module provides a `data()` function returning the cost vector, the constraint matrix and
//! the right hand side, in that order, and the expected outcome as constants.
