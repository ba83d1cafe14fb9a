//! # Storing of linear programs in memory
//!
//! This module provides the data structures used to hand a linear program to the solver.
//! Algorithms may introduce their specific data structures in `algorithm::my_algorithm`.

pub mod linear_algebra;
