//! Residual diagnostics for the actual-vs-fitted comparison.

mod residuals;

pub use residuals::{leverage, standardize, standardized_residuals, studentized_residuals};
