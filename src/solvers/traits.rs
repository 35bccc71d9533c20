//! Core traits for regression estimators.

use crate::core::{IntervalType, OptionsError, PredictionResult, RegressionResult};
use crate::encoding::DesignMatrix;
use faer::{Col, Mat};
use thiserror::Error;

/// Errors that can occur while encoding, fitting or predicting.
///
/// None of these are transient; each one describes a structural problem with
/// the data or with how the engine was called.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("empty dataset: no daily aggregates to fit against")]
    EmptyDataset,

    #[error(
        "degenerate fit: {n_observations} observations for {n_parameters} parameters leaves no residual degrees of freedom"
    )]
    DegenerateFit {
        n_observations: usize,
        n_parameters: usize,
    },

    #[error("singular design: column {column} ({name}) is a linear combination of the preceding columns")]
    SingularDesign { column: usize, name: String },

    #[error("unknown category: month {month} has no column in the trained encoding")]
    UnknownCategory { month: u32 },

    #[error("reference month {month} does not occur in the data (observed months: {observed:?})")]
    ReferenceNotObserved { month: u32, observed: Vec<u32> },

    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("design matrix has no columns")]
    NoColumns,

    #[error("design has {columns} columns but {names} column names")]
    ColumnNameMismatch { columns: usize, names: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

/// A regression estimator that can be fit to data.
///
/// Fitting returns a separate fitted model, so a fit is either published
/// whole or not at all.
pub trait Regressor {
    /// The type of the fitted model.
    type Fitted: FittedRegressor;

    /// Fit the model to the data.
    ///
    /// # Arguments
    /// * `design` - Design matrix of shape (n_samples, n_parameters), intercept included
    /// * `y` - Target vector of length n_samples
    fn fit(&self, design: &DesignMatrix, y: &Col<f64>) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model that can make predictions.
pub trait FittedRegressor {
    /// Make predictions on rows encoded with the training column layout.
    ///
    /// # Arguments
    /// * `x` - Matrix of shape (n_samples, n_parameters)
    fn predict(&self, x: &Mat<f64>) -> Col<f64>;

    /// Access the regression results (coefficients, statistics, etc.).
    fn result(&self) -> &RegressionResult;

    /// Get the coefficients (convenience method).
    fn coefficients(&self) -> &Col<f64> {
        &self.result().coefficients
    }

    /// Get R² (convenience method).
    fn r_squared(&self) -> f64 {
        self.result().r_squared
    }

    /// Get adjusted R² (convenience method).
    fn adj_r_squared(&self) -> f64 {
        self.result().adj_r_squared
    }

    /// Make predictions with confidence or prediction intervals.
    ///
    /// # Arguments
    /// * `x` - Matrix of shape (n_samples, n_parameters)
    /// * `interval` - `None` for point predictions only,
    ///   `Some(IntervalType::Confidence)` for the mean daily count,
    ///   `Some(IntervalType::Prediction)` for a single day's count
    /// * `level` - Confidence level (e.g., 0.95 for 95% intervals)
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::InvalidOptions`] if an interval is requested
    /// and `level` is not strictly between 0 and 1.
    fn predict_with_interval(
        &self,
        x: &Mat<f64>,
        interval: Option<IntervalType>,
        level: f64,
    ) -> Result<PredictionResult, RegressionError>;
}
