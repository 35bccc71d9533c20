//! Core types for the month-effect analysis.

mod options;
mod prediction;
mod result;

pub use options::{AnalysisOptions, AnalysisOptionsBuilder, OptionsError, ReferenceMonth};
pub use prediction::{FittedPair, IntervalType, PredictionResult};
pub use result::{CoefficientRow, ModelSummary, RegressionResult};
