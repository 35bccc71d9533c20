//! The fitted month-effect model and the actual-vs-fitted producer.
//!
//! A [`MonthlyModel`] bundles the learned [`MonthEncoding`] with the OLS fit,
//! so any later subset of daily aggregates is encoded with exactly the
//! training-time reference month and column set.

use chrono::NaiveDate;
use faer::Col;

use crate::aggregate::DailyAggregate;
use crate::core::{
    AnalysisOptions, FittedPair, IntervalType, ModelSummary, PredictionResult, RegressionResult,
};
use crate::diagnostics::{leverage, standardize, studentized_residuals};
use crate::encoding::{response_vector, MonthEncoding};
use crate::solvers::{FittedOls, FittedRegressor, OlsRegressor, RegressionError, Regressor};

/// Daily counts regressed on calendar month.
///
/// Immutable once fitted.
#[derive(Debug, Clone)]
pub struct MonthlyModel {
    encoding: MonthEncoding,
    fit: FittedOls,
    leverage: Col<f64>,
}

impl MonthlyModel {
    /// Encode `aggregates` and fit the regression.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::EmptyDataset`] for no aggregates,
    /// [`RegressionError::DegenerateFit`] when there are no more days than
    /// design columns, [`RegressionError::SingularDesign`] for a
    /// rank-deficient design and [`RegressionError::InvalidOptions`] for bad
    /// options.
    pub fn fit(
        aggregates: &[DailyAggregate],
        options: &AnalysisOptions,
    ) -> Result<Self, RegressionError> {
        options.validate()?;

        let encoding = MonthEncoding::fit(aggregates, options.reference_month)?;
        let design = encoding.encode(aggregates)?;
        let y = response_vector(aggregates);

        let fit = OlsRegressor::new(options.clone()).fit(&design, &y)?;
        let leverage = leverage(design.x(), fit.xtx_inverse());

        Ok(Self {
            encoding,
            fit,
            leverage,
        })
    }

    /// The learned month encoding.
    pub fn encoding(&self) -> &MonthEncoding {
        &self.encoding
    }

    /// Coefficients and fit statistics.
    pub fn result(&self) -> &RegressionResult {
        self.fit.result()
    }

    /// Training design dimensions as `(rows, columns)`.
    pub fn design_dimensions(&self) -> (usize, usize) {
        let result = self.fit.result();
        (result.n_observations, result.n_parameters)
    }

    /// Coefficient table and goodness-of-fit statistics for reporting.
    pub fn summary(&self) -> ModelSummary {
        self.fit.result().summary()
    }

    /// Expected daily count for `month`: intercept plus the month's effect.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::UnknownCategory`] for a month the model was
    /// not trained on.
    pub fn expected_count(&self, month: u32) -> Result<f64, RegressionError> {
        let coefficients = &self.fit.result().coefficients;
        let effect = self
            .encoding
            .column_for(month)?
            .map_or(0.0, |j| coefficients[j]);
        Ok(coefficients[0] + effect)
    }

    /// Internally studentized residuals of the training days.
    pub fn studentized_residuals(&self) -> Col<f64> {
        let result = self.fit.result();
        studentized_residuals(&result.residuals, &self.leverage, result.mse)
    }

    /// Actual and fitted counts for `rows`, aligned by position.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::UnknownCategory`] if a row's month has no
    /// column in the trained encoding and is not the reference month.
    pub fn fitted_pairs(&self, rows: &[DailyAggregate]) -> Result<Vec<FittedPair>, RegressionError> {
        let design = self.encoding.encode(rows)?;
        let fitted = self.fit.predict(design.x());
        let mse = self.fit.result().mse;

        Ok(rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let actual = row.count as f64;
                let residual = actual - fitted[i];
                FittedPair {
                    date: row.date,
                    month: row.month,
                    actual,
                    fitted: fitted[i],
                    residual,
                    standardized_residual: standardize(residual, mse),
                }
            })
            .collect())
    }

    /// Actual and fitted counts for the first `n` rows (all rows if fewer).
    ///
    /// # Errors
    ///
    /// See [`MonthlyModel::fitted_pairs`].
    pub fn fitted_first_n(
        &self,
        rows: &[DailyAggregate],
        n: usize,
    ) -> Result<Vec<FittedPair>, RegressionError> {
        self.fitted_pairs(&rows[..n.min(rows.len())])
    }

    /// Actual and fitted counts for rows dated within `start..=end`.
    ///
    /// # Errors
    ///
    /// See [`MonthlyModel::fitted_pairs`].
    pub fn fitted_in_range(
        &self,
        rows: &[DailyAggregate],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FittedPair>, RegressionError> {
        let selected: Vec<DailyAggregate> = rows
            .iter()
            .filter(|row| row.date >= start && row.date <= end)
            .copied()
            .collect();
        self.fitted_pairs(&selected)
    }

    /// Fitted values for `rows` with confidence or prediction bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::InvalidOptions`] if an interval is requested
    /// with `level` outside (0, 1); otherwise see
    /// [`MonthlyModel::fitted_pairs`].
    pub fn predict_with_interval(
        &self,
        rows: &[DailyAggregate],
        interval: Option<IntervalType>,
        level: f64,
    ) -> Result<PredictionResult, RegressionError> {
        let design = self.encoding.encode(rows)?;
        self.fit.predict_with_interval(design.x(), interval, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32, count: u64) -> DailyAggregate {
        DailyAggregate::new(NaiveDate::from_ymd_opt(2020, m, d).unwrap(), count)
    }

    fn scenario() -> Vec<DailyAggregate> {
        vec![day(1, 1, 2), day(1, 2, 1), day(2, 1, 3), day(2, 2, 3)]
    }

    #[test]
    fn test_expected_counts() {
        let model = MonthlyModel::fit(&scenario(), &AnalysisOptions::default()).unwrap();

        assert!((model.expected_count(1).unwrap() - 1.5).abs() < 1e-10);
        assert!((model.expected_count(2).unwrap() - 3.0).abs() < 1e-10);
        assert!(matches!(
            model.expected_count(4),
            Err(RegressionError::UnknownCategory { month: 4 })
        ));
    }

    #[test]
    fn test_first_n_clamps() {
        let rows = scenario();
        let model = MonthlyModel::fit(&rows, &AnalysisOptions::default()).unwrap();

        assert_eq!(model.fitted_first_n(&rows, 100).unwrap().len(), 4);
        assert!(model.fitted_first_n(&rows, 0).unwrap().is_empty());
    }

    #[test]
    fn test_design_dimensions() {
        let model = MonthlyModel::fit(&scenario(), &AnalysisOptions::default()).unwrap();
        assert_eq!(model.design_dimensions(), (4, 2));
    }

    #[test]
    fn test_studentized_residuals() {
        let model = MonthlyModel::fit(&scenario(), &AnalysisOptions::default()).unwrap();
        let stud = model.studentized_residuals();

        // e = 0.5, s = 0.5, h = 0.5
        assert!((stud[0] - 2.0_f64.sqrt()).abs() < 1e-10);
        assert!(stud[2].abs() < 1e-10);
    }
}
