//! Daily incident aggregation and month-effect regression.
//!
//! Incident records are grouped into a daily count series, the calendar
//! month of each day is reference-coded into a design matrix, and an
//! ordinary least squares fit tests whether month explains the variation in
//! daily counts, with standard errors, t-statistics, p-values, R² and
//! adjusted R².
//!
//! Days without any incident are absent from the daily series rather than
//! present with a zero count, and the regression is trained on that series
//! as is. Quiet days therefore do not pull the monthly means down, which
//! biases the estimates upward for sparse data.
//!
//! # Example
//!
//! ```rust,ignore
//! use incident_regress::prelude::*;
//!
//! let report = run_analysis(records.values(), &AnalysisOptions::default());
//!
//! // Descriptive outputs are available even if the fit failed
//! println!("{} days", report.daily.len());
//!
//! let model = report.model?;
//! for row in model.summary().coefficients {
//!     println!("{:<12} {:>8.3} (p = {:.4})", row.name, row.estimate, row.p_value);
//! }
//!
//! let overlay = model.fitted_first_n(&report.daily, 100)?;
//! ```

pub mod aggregate;
pub mod core;
pub mod diagnostics;
pub mod encoding;
pub mod inference;
pub mod model;
pub mod pipeline;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{
        aggregate_boroughs, aggregate_daily, BoroughAggregate, BoroughCounter, DailyAggregate,
        DailyCounter, IncidentRecord,
    };
    pub use crate::core::{
        AnalysisOptions, AnalysisOptionsBuilder, CoefficientRow, FittedPair, IntervalType,
        ModelSummary, OptionsError, PredictionResult, ReferenceMonth, RegressionResult,
    };
    pub use crate::encoding::{response_vector, DesignMatrix, MonthEncoding};
    pub use crate::model::MonthlyModel;
    pub use crate::pipeline::{run_analysis, AnalysisReport};
    pub use crate::solvers::{FittedOls, FittedRegressor, OlsRegressor, RegressionError, Regressor};
}

pub use crate::model::MonthlyModel;
pub use crate::pipeline::{run_analysis, AnalysisReport};
pub use crate::solvers::RegressionError;
