//! Standardized and studentized residuals.

use faer::{Col, Mat};

/// Compute standardized residuals: e_i / s
///
/// Where s is the residual standard error (sqrt of MSE). A perfect fit
/// (s = 0) maps zero residuals to 0 and anything else to NaN.
pub fn standardized_residuals(residuals: &Col<f64>, mse: f64) -> Col<f64> {
    Col::from_fn(residuals.nrows(), |i| standardize(residuals[i], mse))
}

/// Standardize a single residual against the residual variance.
pub fn standardize(residual: f64, mse: f64) -> f64 {
    if mse <= 0.0 || !mse.is_finite() {
        if residual.abs() < 1e-14 {
            0.0
        } else {
            f64::NAN
        }
    } else {
        residual / mse.sqrt()
    }
}

/// Diagonal of the hat matrix, h_ii = x_i'(X'X)⁻¹x_i.
///
/// For a month-indicator design every day in month m has h_ii = 1 / n_m.
pub fn leverage(x: &Mat<f64>, xtx_inv: &Mat<f64>) -> Col<f64> {
    let p = xtx_inv.nrows();
    Col::from_fn(x.nrows(), |i| {
        let mut h = 0.0;
        for a in 0..p {
            for b in 0..p {
                h += x[(i, a)] * xtx_inv[(a, b)] * x[(i, b)];
            }
        }
        h
    })
}

/// Compute internally studentized residuals: e_i / (s * sqrt(1 - h_ii))
///
/// These account for the varying variance of residuals due to leverage; a
/// day from a sparsely observed month has a larger h_ii.
pub fn studentized_residuals(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64) -> Col<f64> {
    let n = residuals.nrows();

    if mse <= 0.0 || !mse.is_finite() {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let s = mse.sqrt();

    Col::from_fn(n, |i| {
        let h_ii = leverage[i];
        let denominator = s * (1.0 - h_ii).max(1e-14).sqrt();
        residuals[i] / denominator
    })
}
