//! # A linear program tableau solver
//!
//! Linear programs in equality form, `min c^T x` subject to `Ax = b` and `x >= 0`, are solved
//! using the two phase Simplex Method as described in the book Combinatorial Optimization by
//! Christos H. Papadimitriou and Kenneth Steiglitz.
//!
//! The full tableau is kept in memory, either dense or sparse; see
//! `algorithm::two_phase::tableau::storage`. Start at `algorithm::two_phase::solve`.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod error;

#[cfg(test)]
mod tests;
