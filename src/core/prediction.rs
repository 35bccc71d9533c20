//! Prediction types for the actual-vs-fitted comparison and interval estimation.

use chrono::NaiveDate;
use faer::Col;
use serde::Serialize;

/// Type of interval to compute for predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalType {
    /// Confidence interval for the mean daily count E[Y|month].
    /// Narrower - only accounts for uncertainty in coefficient estimates.
    Confidence,

    /// Prediction interval for the count of a single day.
    /// Wider - also accounts for residual variance.
    #[default]
    Prediction,
}

/// Result of prediction with optional intervals.
#[derive(Debug, Clone)]
pub struct PredictionResult {
    /// Point predictions (fitted values).
    pub fit: Col<f64>,
    /// Lower bounds of the interval.
    pub lower: Col<f64>,
    /// Upper bounds of the interval.
    pub upper: Col<f64>,
    /// Standard errors of predictions.
    pub se: Col<f64>,
}

impl PredictionResult {
    /// Create a new prediction result with only point predictions (no intervals).
    pub fn point_only(fit: Col<f64>) -> Self {
        let n = fit.nrows();
        Self {
            fit,
            lower: Col::zeros(n),
            upper: Col::zeros(n),
            se: Col::zeros(n),
        }
    }

    /// Create a new prediction result with intervals.
    pub fn with_intervals(fit: Col<f64>, lower: Col<f64>, upper: Col<f64>, se: Col<f64>) -> Self {
        Self {
            fit,
            lower,
            upper,
            se,
        }
    }

    /// Number of predictions.
    pub fn len(&self) -> usize {
        self.fit.nrows()
    }

    /// Returns true if there are no predictions.
    pub fn is_empty(&self) -> bool {
        self.fit.nrows() == 0
    }
}

/// One row of the actual-vs-fitted overlay.
///
/// Pairs are returned in the same order as the requested rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FittedPair {
    /// Day the count belongs to.
    pub date: NaiveDate,
    /// Calendar month of `date` (1-12).
    pub month: u32,
    /// Observed incident count.
    pub actual: f64,
    /// Model prediction for the day's month.
    pub fitted: f64,
    /// `actual - fitted`.
    pub residual: f64,
    /// Residual divided by the residual standard error (NaN when σ̂ is zero
    /// and the residual is not).
    pub standardized_residual: f64,
}
