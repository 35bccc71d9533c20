//! Ordinary Least Squares regression solver.

use crate::core::{
    AnalysisOptions, AnalysisOptionsBuilder, IntervalType, OptionsError, PredictionResult,
    RegressionResult,
};
use crate::encoding::DesignMatrix;
use crate::inference::{compute_prediction_intervals, CoefficientInference};
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{back_substitute, center_vector, column_norms};
use faer::{Col, Mat, MatRef};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Ordinary Least Squares regression estimator.
///
/// Solves the least squares problem through a Householder QR decomposition
/// of the design matrix; X'X is never formed or inverted. The design is
/// taken as given, intercept column included, so column order is preserved
/// and a rank-deficient column can be reported by name.
///
/// # Example
///
/// ```rust,ignore
/// use incident_regress::prelude::*;
///
/// let encoding = MonthEncoding::fit(&daily, ReferenceMonth::LowestObserved)?;
/// let design = encoding.encode(&daily)?;
/// let y = response_vector(&daily);
///
/// let fitted = OlsRegressor::builder().build().fit(&design, &y)?;
///
/// println!("R² = {}", fitted.r_squared());
/// println!("Coefficients: {:?}", fitted.coefficients());
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    options: AnalysisOptions,
}

impl OlsRegressor {
    /// Create a new OLS regressor with the given options.
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    /// Verify that every column of `x` adds a new direction.
    ///
    /// For a non-pivoted QR, `|R_jj|` is the norm of column j after
    /// projecting out columns `0..j`. A value that is negligible relative to
    /// the column's own norm means column j lies in their span.
    fn check_rank(
        &self,
        x: &Mat<f64>,
        r: MatRef<'_, f64>,
        column_names: &[String],
    ) -> Result<(), RegressionError> {
        let norms = column_norms(x);

        for (j, &norm) in norms.iter().enumerate() {
            let r_jj = r[(j, j)].abs();
            if norm == 0.0 || r_jj <= self.options.rank_tolerance * norm {
                log::debug!(
                    "rank check failed at column {j}: |R_jj| = {r_jj:e}, column norm = {norm:e}"
                );
                return Err(RegressionError::SingularDesign {
                    column: j,
                    name: column_names[j].clone(),
                });
            }
        }

        Ok(())
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(&self, design: &DesignMatrix, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        self.options.validate()?;

        let x = design.x();
        let n_samples = x.nrows();
        let n_params = x.ncols();

        if n_samples != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: n_samples,
                y_len: y.nrows(),
            });
        }

        if n_samples == 0 {
            return Err(RegressionError::EmptyDataset);
        }

        if n_params == 0 {
            return Err(RegressionError::NoColumns);
        }

        // σ̂² needs at least one residual degree of freedom
        if n_samples <= n_params {
            return Err(RegressionError::DegenerateFit {
                n_observations: n_samples,
                n_parameters: n_params,
            });
        }

        log::debug!("fitting OLS: {n_samples} observations, {n_params} parameters");

        let qr = x.qr();
        let r = qr.R();
        self.check_rank(x, r, design.column_names())?;

        // Solve R * beta = Q' * y
        let q = qr.compute_thin_Q();
        let qty = q.transpose() * y;
        let coefficients = back_substitute(r, &qty, n_params);

        let mut fitted_values = Col::zeros(n_samples);
        let mut residuals = Col::zeros(n_samples);

        for i in 0..n_samples {
            let mut pred = 0.0;
            for j in 0..n_params {
                pred += x[(i, j)] * coefficients[j];
            }
            fitted_values[i] = pred;
            residuals[i] = y[i] - pred;
        }

        let xtx_inverse = CoefficientInference::xtx_inverse_from_r(r, n_params);

        let result = self.compute_statistics(
            design,
            y,
            coefficients,
            residuals,
            fitted_values,
            &xtx_inverse,
        );

        log::debug!(
            "OLS fit complete: R² = {:.6}, df = {}",
            result.r_squared,
            result.residual_df()
        );

        Ok(FittedOls {
            options: self.options.clone(),
            result,
            xtx_inverse,
        })
    }
}

impl OlsRegressor {
    /// Compute fit statistics and optionally inference statistics.
    fn compute_statistics(
        &self,
        design: &DesignMatrix,
        y: &Col<f64>,
        coefficients: Col<f64>,
        residuals: Col<f64>,
        fitted_values: Col<f64>,
        xtx_inverse: &Mat<f64>,
    ) -> RegressionResult {
        let n = y.nrows();
        let n_params = design.ncols();

        let (y_centered, _) = center_vector(y);
        let tss: f64 = y_centered.iter().map(|&d| d.powi(2)).sum();
        let rss: f64 = residuals.iter().map(|&r| r.powi(2)).sum();

        let df_total = (n - 1) as f64;
        let df_resid = (n - n_params) as f64;
        let df_model = (n_params - 1) as f64;

        let mse = rss / df_resid;
        let rmse = mse.sqrt();

        // R² is only meaningful when there is both a predictor and variance to explain
        let (r_squared, adj_r_squared, r_squared_defined) = if n_params == 1 {
            log::warn!("intercept-only model: R² is undefined and reported as 0");
            (0.0, 0.0, false)
        } else if tss <= 0.0 {
            log::warn!("response has zero variance: R² is undefined and reported as 0");
            (0.0, 0.0, false)
        } else {
            let r2 = (1.0 - rss / tss).clamp(0.0, 1.0);
            (r2, 1.0 - (1.0 - r2) * df_total / df_resid, true)
        };

        let ess = tss - rss;
        let f_statistic = if r_squared_defined && mse > 0.0 {
            (ess / df_model) / mse
        } else {
            f64::NAN
        };

        let f_pvalue = if f_statistic.is_finite() {
            FisherSnedecor::new(df_model, df_resid)
                .ok()
                .map_or(f64::NAN, |d| 1.0 - d.cdf(f_statistic))
        } else {
            f64::NAN
        };

        let mut result = RegressionResult::empty(design.column_names().to_vec(), n);
        result.coefficients = coefficients;
        result.residuals = residuals;
        result.fitted_values = fitted_values;
        result.r_squared = r_squared;
        result.adj_r_squared = adj_r_squared;
        result.r_squared_defined = r_squared_defined;
        result.mse = mse;
        result.rmse = rmse;
        result.f_statistic = f_statistic;
        result.f_pvalue = f_pvalue;
        result.confidence_level = self.options.confidence_level;

        if self.options.compute_inference {
            self.compute_inference(xtx_inverse, &mut result);
        }

        result
    }

    /// Compute inference statistics (standard errors, t-stats, p-values, CIs).
    fn compute_inference(&self, xtx_inverse: &Mat<f64>, result: &mut RegressionResult) {
        let df = result.residual_df() as f64;

        let se = CoefficientInference::standard_errors(xtx_inverse, result.mse);
        let t_stats = CoefficientInference::t_statistics(&result.coefficients, &se);
        let p_vals = CoefficientInference::p_values(&t_stats, df);
        let (ci_lower, ci_upper) = CoefficientInference::confidence_intervals(
            &result.coefficients,
            &se,
            df,
            self.options.confidence_level,
        );

        result.std_errors = Some(se);
        result.t_statistics = Some(t_stats);
        result.p_values = Some(p_vals);
        result.conf_interval_lower = Some(ci_lower);
        result.conf_interval_upper = Some(ci_upper);
    }
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    options: AnalysisOptions,
    result: RegressionResult,
    /// (X'X)⁻¹ for prediction intervals
    xtx_inverse: Mat<f64>,
}

impl FittedOls {
    /// Get the options used to fit this model.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// (X'X)⁻¹ of the training design.
    pub fn xtx_inverse(&self) -> &Mat<f64> {
        &self.xtx_inverse
    }
}

impl FittedRegressor for FittedOls {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        let n_samples = x.nrows();
        let n_params = self.result.n_parameters;
        let mut predictions = Col::zeros(n_samples);

        for i in 0..n_samples {
            let mut pred = 0.0;
            for j in 0..n_params {
                pred += x[(i, j)] * self.result.coefficients[j];
            }
            predictions[i] = pred;
        }

        predictions
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }

    fn predict_with_interval(
        &self,
        x: &Mat<f64>,
        interval: Option<IntervalType>,
        level: f64,
    ) -> Result<PredictionResult, RegressionError> {
        let predictions = self.predict(x);

        let Some(interval_type) = interval else {
            return Ok(PredictionResult::point_only(predictions));
        };

        if !(level > 0.0 && level < 1.0) {
            return Err(OptionsError::InvalidConfidenceLevel(level).into());
        }

        Ok(compute_prediction_intervals(
            x,
            &self.xtx_inverse,
            &predictions,
            self.result.mse,
            self.result.residual_df() as f64,
            level,
            interval_type,
        ))
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    builder: AnalysisOptionsBuilder,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to compute inference statistics.
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.builder = self.builder.compute_inference(compute);
        self
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.builder = self.builder.confidence_level(level);
        self
    }

    /// Set the rank tolerance for the QR rank check.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Build the OLS regressor. Options are validated when fitting.
    pub fn build(self) -> OlsRegressor {
        OlsRegressor::new(self.builder.build_unchecked())
    }
}
