//! Numeric helpers shared by the solvers and inference code.

mod matrix;

pub use matrix::{back_substitute, center_vector, column_norms, outer_gram, upper_triangular_inverse};
