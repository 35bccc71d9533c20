//! Regression result structures.

use faer::Col;
use serde::Serialize;

/// Complete result from an OLS fit on an explicit design matrix.
///
/// Column 0 of the design is the intercept, so `coefficients[0]` is the
/// intercept estimate and the remaining entries line up with
/// `column_names[1..]`.
#[derive(Debug, Clone)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// Estimated coefficients, one per design column.
    pub coefficients: Col<f64>,

    /// Design column names, same order as `coefficients`.
    pub column_names: Vec<String>,

    /// Residuals (y - fitted_values).
    pub residuals: Col<f64>,

    /// Fitted values (predictions on training data).
    pub fitted_values: Col<f64>,

    /// Number of parameters (design columns).
    pub n_parameters: usize,

    /// Number of observations.
    pub n_observations: usize,

    // ========== Fit Statistics ==========
    /// Coefficient of determination (R²).
    pub r_squared: f64,

    /// Adjusted R².
    pub adj_r_squared: f64,

    /// False when R² has no meaning: an intercept-only model or a response
    /// with zero variance. Both R² values are then reported as 0.0.
    pub r_squared_defined: bool,

    /// Residual variance estimate σ̂² = RSS / df.
    pub mse: f64,

    /// Residual standard error σ̂.
    pub rmse: f64,

    /// F-statistic for overall model significance (NaN for intercept-only).
    pub f_statistic: f64,

    /// P-value for F-statistic.
    pub f_pvalue: f64,

    // ========== Inference Statistics (Optional) ==========
    /// Standard errors of coefficients.
    pub std_errors: Option<Col<f64>>,

    /// t-statistics for coefficients.
    pub t_statistics: Option<Col<f64>>,

    /// Two-sided p-values for coefficient significance tests.
    pub p_values: Option<Col<f64>>,

    /// Lower bounds of confidence intervals.
    pub conf_interval_lower: Option<Col<f64>>,

    /// Upper bounds of confidence intervals.
    pub conf_interval_upper: Option<Col<f64>>,

    /// Confidence level used for intervals.
    pub confidence_level: f64,
}

impl RegressionResult {
    /// Create a new empty result (used internally by solvers).
    pub(crate) fn empty(column_names: Vec<String>, n_observations: usize) -> Self {
        let n_parameters = column_names.len();
        Self {
            coefficients: Col::zeros(n_parameters),
            column_names,
            residuals: Col::zeros(n_observations),
            fitted_values: Col::zeros(n_observations),
            n_parameters,
            n_observations,
            r_squared: 0.0,
            adj_r_squared: 0.0,
            r_squared_defined: false,
            mse: 0.0,
            rmse: 0.0,
            f_statistic: f64::NAN,
            f_pvalue: f64::NAN,
            std_errors: None,
            t_statistics: None,
            p_values: None,
            conf_interval_lower: None,
            conf_interval_upper: None,
            confidence_level: 0.95,
        }
    }

    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Model degrees of freedom (p - 1; the intercept is not counted).
    pub fn model_df(&self) -> usize {
        self.n_parameters.saturating_sub(1)
    }

    /// Returns true if the design held only the intercept column.
    pub fn is_intercept_only(&self) -> bool {
        self.n_parameters == 1
    }

    /// Intercept estimate.
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    /// Look up a coefficient by its column name.
    pub fn get_coefficient(&self, name: &str) -> Option<f64> {
        self.column_names
            .iter()
            .position(|n| n == name)
            .map(|j| self.coefficients[j])
    }

    /// Residual sum of squares (RSS).
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|&r| r.powi(2)).sum()
    }

    /// Total sum of squares (TSS) of the response about its mean.
    pub fn tss(&self) -> f64 {
        let n = self.n_observations as f64;
        let y_mean = self
            .fitted_values
            .iter()
            .zip(self.residuals.iter())
            .map(|(&f, &r)| f + r)
            .sum::<f64>()
            / n;

        self.residuals
            .iter()
            .zip(self.fitted_values.iter())
            .map(|(&r, &f)| {
                let y = f + r;
                (y - y_mean).powi(2)
            })
            .sum()
    }

    /// Build the coefficient table (name, estimate, SE, t, p, CI).
    ///
    /// Inference columns are NaN when inference was not computed.
    pub fn coefficient_table(&self) -> Vec<CoefficientRow> {
        let pick = |col: &Option<Col<f64>>, j: usize| col.as_ref().map_or(f64::NAN, |c| c[j]);

        self.column_names
            .iter()
            .enumerate()
            .map(|(j, name)| CoefficientRow {
                name: name.clone(),
                estimate: self.coefficients[j],
                std_error: pick(&self.std_errors, j),
                t_statistic: pick(&self.t_statistics, j),
                p_value: pick(&self.p_values, j),
                conf_lower: pick(&self.conf_interval_lower, j),
                conf_upper: pick(&self.conf_interval_upper, j),
            })
            .collect()
    }

    /// Summarize the fit for reporting.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            coefficients: self.coefficient_table(),
            r_squared: self.r_squared,
            adj_r_squared: self.adj_r_squared,
            r_squared_defined: self.r_squared_defined,
            residual_df: self.residual_df(),
            n_observations: self.n_observations,
            residual_std_error: self.rmse,
            f_statistic: self.f_statistic,
            f_pvalue: self.f_pvalue,
            confidence_level: self.confidence_level,
        }
    }
}

/// One line of the coefficient table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoefficientRow {
    /// Design column name, e.g. `(Intercept)` or `month[7]`.
    pub name: String,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error.
    pub std_error: f64,
    /// Estimate divided by its standard error.
    pub t_statistic: f64,
    /// Two-sided p-value from Student's t with the residual df.
    pub p_value: f64,
    /// Lower confidence bound.
    pub conf_lower: f64,
    /// Upper confidence bound.
    pub conf_upper: f64,
}

/// Reporting view of a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    /// Coefficient table in design column order.
    pub coefficients: Vec<CoefficientRow>,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Adjusted R².
    pub adj_r_squared: f64,
    /// Whether R² is meaningful for this fit.
    pub r_squared_defined: bool,
    /// Residual degrees of freedom.
    pub residual_df: usize,
    /// Number of days in the fit.
    pub n_observations: usize,
    /// Residual standard error.
    pub residual_std_error: f64,
    /// Overall F-statistic.
    pub f_statistic: f64,
    /// P-value of the F-statistic.
    pub f_pvalue: f64,
    /// Level of the coefficient confidence intervals.
    pub confidence_level: f64,
}
