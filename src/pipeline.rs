//! End-to-end analysis: aggregation, encoding, regression.
//!
//! The descriptive outputs are always produced; the regression outcome is
//! carried separately so that a fit failure never hides the daily series or
//! the borough ranking.

use crate::aggregate::{BoroughAggregate, BoroughCounter, DailyAggregate, DailyCounter, IncidentRecord};
use crate::core::AnalysisOptions;
use crate::model::MonthlyModel;
use crate::solvers::RegressionError;

/// Everything the reporting layer needs from one run.
#[derive(Debug)]
pub struct AnalysisReport {
    /// Daily counts, ascending by date.
    pub daily: Vec<DailyAggregate>,
    /// Boroughs ranked by descending count.
    pub boroughs: Vec<BoroughAggregate>,
    /// Fitted model, or the reason the regression stage failed.
    pub model: Result<MonthlyModel, RegressionError>,
}

impl AnalysisReport {
    /// Total incidents across all days.
    pub fn total_incidents(&self) -> u64 {
        self.daily.iter().map(|d| d.count).sum()
    }
}

/// Run the full analysis over cleaned incident records.
///
/// Records are counted in a single pass into both the daily and the borough
/// counters before any regression is attempted.
pub fn run_analysis<'a, I>(records: I, options: &AnalysisOptions) -> AnalysisReport
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    let mut daily_counter = DailyCounter::new();
    let mut borough_counter = BoroughCounter::new();

    for record in records {
        daily_counter.add(record);
        borough_counter.add(record);
    }

    let daily = daily_counter.finish();
    let boroughs = borough_counter.finish();

    log::info!(
        "aggregated {} days and {} boroughs",
        daily.len(),
        boroughs.len()
    );

    let model = MonthlyModel::fit(&daily, options);

    match &model {
        Ok(m) => log::info!(
            "month-effect model fitted: R² = {:.4}, adjusted R² = {:.4}, df = {}",
            m.result().r_squared,
            m.result().adj_r_squared,
            m.result().residual_df()
        ),
        Err(e) => log::warn!("regression stage failed, descriptive outputs kept: {e}"),
    }

    AnalysisReport {
        daily,
        boroughs,
        model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_failure_keeps_descriptive_outputs() {
        // One day cannot support even an intercept-only fit.
        let records = vec![
            IncidentRecord::new(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(), "BRONX"),
            IncidentRecord::new(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(), "QUEENS"),
        ];

        let report = run_analysis(&records, &AnalysisOptions::default());

        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.boroughs.len(), 2);
        assert_eq!(report.total_incidents(), 2);
        assert!(matches!(
            report.model,
            Err(RegressionError::DegenerateFit { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<IncidentRecord> = Vec::new();
        let report = run_analysis(&records, &AnalysisOptions::default());

        assert!(report.daily.is_empty());
        assert!(report.boroughs.is_empty());
        assert!(matches!(report.model, Err(RegressionError::EmptyDataset)));
    }
}
