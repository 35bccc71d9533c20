//! Coefficient inference calculations.

use crate::utils::{outer_gram, upper_triangular_inverse};
use faer::{Col, Mat, MatRef};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute (X'X)⁻¹ from the R factor of `X = QR`.
    ///
    /// (X'X)⁻¹ = (R'R)⁻¹ = R⁻¹R⁻ᵀ, so X'X is never formed.
    pub fn xtx_inverse_from_r(r: MatRef<'_, f64>, n_params: usize) -> Mat<f64> {
        let r_inv = upper_triangular_inverse(r, n_params);
        outer_gram(&r_inv)
    }

    /// Compute standard errors for OLS coefficients.
    ///
    /// SE(β_j) = sqrt(σ² * (X'X)^(-1)_{jj})
    pub fn standard_errors(xtx_inv: &Mat<f64>, mse: f64) -> Col<f64> {
        Col::from_fn(xtx_inv.nrows(), |j| {
            let var = mse * xtx_inv[(j, j)];
            if var >= 0.0 {
                var.sqrt()
            } else {
                f64::NAN
            }
        })
    }

    /// Compute t-statistics for coefficients.
    ///
    /// t_j = β_j / SE(β_j)
    pub fn t_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        let n = coefficients.nrows();
        let mut t_stats = Col::zeros(n);

        for j in 0..n {
            if std_errors[j].is_nan() || std_errors[j] == 0.0 {
                t_stats[j] = f64::NAN;
            } else {
                t_stats[j] = coefficients[j] / std_errors[j];
            }
        }

        t_stats
    }

    /// Compute p-values from t-statistics.
    ///
    /// p_j = 2 * P(T > |t_j|) where T ~ t(df)
    pub fn p_values(t_statistics: &Col<f64>, df: f64) -> Col<f64> {
        let n = t_statistics.nrows();

        let t_dist = match student_t(df) {
            Some(d) => d,
            None => return Col::from_fn(n, |_| f64::NAN),
        };

        Col::from_fn(n, |j| {
            if t_statistics[j].is_nan() {
                f64::NAN
            } else {
                // Two-tailed test
                let abs_t = t_statistics[j].abs();
                (2.0 * (1.0 - t_dist.cdf(abs_t))).clamp(0.0, 1.0)
            }
        })
    }

    /// Compute confidence intervals for coefficients.
    ///
    /// CI_j = β_j ± t_{α/2, df} * SE(β_j)
    pub fn confidence_intervals(
        coefficients: &Col<f64>,
        std_errors: &Col<f64>,
        df: f64,
        confidence_level: f64,
    ) -> (Col<f64>, Col<f64>) {
        let n = coefficients.nrows();
        let mut lower = Col::zeros(n);
        let mut upper = Col::zeros(n);

        let t_crit = t_critical(df, confidence_level);

        for j in 0..n {
            if std_errors[j].is_nan() || t_crit.is_nan() {
                lower[j] = f64::NAN;
                upper[j] = f64::NAN;
            } else {
                let margin = t_crit * std_errors[j];
                lower[j] = coefficients[j] - margin;
                upper[j] = coefficients[j] + margin;
            }
        }

        (lower, upper)
    }
}

/// Student's t with `df` degrees of freedom, or `None` if `df` is not positive.
pub(crate) fn student_t(df: f64) -> Option<StudentsT> {
    if df <= 0.0 {
        return None;
    }
    StudentsT::new(0.0, 1.0, df).ok()
}

/// Two-sided critical value t_{1-α/2, df}; NaN when undefined.
pub(crate) fn t_critical(df: f64, confidence_level: f64) -> f64 {
    let alpha = 1.0 - confidence_level;
    student_t(df).map_or(f64::NAN, |d| d.inverse_cdf(1.0 - alpha / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_statistics() {
        let coefficients = Col::from_fn(3, |i| (i + 1) as f64);
        let std_errors = Col::from_fn(3, |_| 0.5);

        let t_stats = CoefficientInference::t_statistics(&coefficients, &std_errors);

        assert!((t_stats[0] - 2.0).abs() < 1e-10);
        assert!((t_stats[1] - 4.0).abs() < 1e-10);
        assert!((t_stats[2] - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_standard_error_gives_nan_t() {
        let coefficients = Col::from_fn(1, |_| 1.0);
        let std_errors = Col::from_fn(1, |_| 0.0);

        let t_stats = CoefficientInference::t_statistics(&coefficients, &std_errors);
        assert!(t_stats[0].is_nan());
    }

    #[test]
    fn test_p_values_bounds() {
        let t_stats = Col::from_fn(3, |i| (i + 1) as f64);
        let p_vals = CoefficientInference::p_values(&t_stats, 10.0);

        for p in p_vals.iter() {
            assert!(*p >= 0.0 && *p <= 1.0);
        }
    }

    #[test]
    fn test_p_value_two_df_closed_form() {
        // With 2 df the two-sided p-value is 1 - |t| / sqrt(t² + 2).
        let t_stats = Col::from_fn(1, |_| 3.0);
        let p_vals = CoefficientInference::p_values(&t_stats, 2.0);

        let expected = 1.0 - 3.0 / 11.0_f64.sqrt();
        assert!((p_vals[0] - expected).abs() < 1e-8);
    }

    #[test]
    fn test_p_values_without_df() {
        let t_stats = Col::from_fn(2, |_| 1.0);
        let p_vals = CoefficientInference::p_values(&t_stats, 0.0);
        assert!(p_vals.iter().all(|p| p.is_nan()));
    }

    #[test]
    fn test_xtx_inverse_from_r() {
        // X = [[1,0],[1,0],[1,1],[1,1]] has X'X = [[4,2],[2,2]].
        // An R factor with R'R = X'X: [[2, 1], [0, 1]].
        let r = Mat::from_fn(2, 2, |i, j| match (i, j) {
            (0, 0) => 2.0,
            (0, 1) => 1.0,
            (1, 1) => 1.0,
            _ => 0.0,
        });

        let inv = CoefficientInference::xtx_inverse_from_r(r.as_ref(), 2);

        assert!((inv[(0, 0)] - 0.5).abs() < 1e-12);
        assert!((inv[(0, 1)] + 0.5).abs() < 1e-12);
        assert!((inv[(1, 0)] + 0.5).abs() < 1e-12);
        assert!((inv[(1, 1)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_intervals_symmetric() {
        let coefficients = Col::from_fn(1, |_| 1.5);
        let std_errors = Col::from_fn(1, |_| 0.5);

        let (lower, upper) =
            CoefficientInference::confidence_intervals(&coefficients, &std_errors, 2.0, 0.95);

        assert!(((upper[0] - 1.5) - (1.5 - lower[0])).abs() < 1e-12);
        // t_{0.975, 2} = 4.302653
        assert!((upper[0] - (1.5 + 4.302_653 * 0.5)).abs() < 1e-5);
    }
}
