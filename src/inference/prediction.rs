//! Prediction interval calculations.

use super::coefficient::t_critical;
use crate::core::{IntervalType, PredictionResult};
use faer::{Col, Mat};

/// Computes confidence or prediction intervals for encoded rows.
///
/// # Arguments
/// * `x_new` - Encoded rows (n_new × n_parameters, intercept column included)
/// * `xtx_inv` - (X'X)⁻¹ of the training design
/// * `predictions` - Point predictions for x_new
/// * `mse` - Residual variance of the fitted model
/// * `df` - Residual degrees of freedom
/// * `confidence_level` - Confidence level (e.g., 0.95)
/// * `interval_type` - Confidence or Prediction interval
pub fn compute_prediction_intervals(
    x_new: &Mat<f64>,
    xtx_inv: &Mat<f64>,
    predictions: &Col<f64>,
    mse: f64,
    df: f64,
    confidence_level: f64,
    interval_type: IntervalType,
) -> PredictionResult {
    let n_new = x_new.nrows();

    let t_crit = t_critical(df, confidence_level);
    if t_crit.is_nan() || mse < 0.0 || !mse.is_finite() {
        let nan = Col::from_fn(n_new, |_| f64::NAN);
        return PredictionResult::with_intervals(predictions.clone(), nan.clone(), nan.clone(), nan);
    }

    let mut se = Col::zeros(n_new);
    let mut lower = Col::zeros(n_new);
    let mut upper = Col::zeros(n_new);

    for i in 0..n_new {
        let h = leverage_of_row(x_new, i, xtx_inv);

        let var = match interval_type {
            IntervalType::Confidence => mse * h,
            IntervalType::Prediction => mse * (1.0 + h),
        };

        se[i] = if var >= 0.0 { var.sqrt() } else { f64::NAN };

        let margin = t_crit * se[i];
        lower[i] = predictions[i] - margin;
        upper[i] = predictions[i] + margin;
    }

    PredictionResult::with_intervals(predictions.clone(), lower, upper, se)
}

/// Compute leverage h = x₀'(X'X)⁻¹x₀ for row `row` of `x`.
fn leverage_of_row(x: &Mat<f64>, row: usize, xtx_inv: &Mat<f64>) -> f64 {
    let p = xtx_inv.nrows();
    let mut h = 0.0;
    for a in 0..p {
        let mut sum = 0.0;
        for b in 0..p {
            sum += xtx_inv[(a, b)] * x[(row, b)];
        }
        h += x[(row, a)] * sum;
    }
    h
}
