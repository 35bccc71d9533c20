//! Reference cell coding of the month factor.
//!
//! The encoding is learned once from the training aggregates: the reference
//! month is absorbed into the intercept and every other observed month gets
//! an indicator column, in ascending month order. The same encoding is then
//! applied to any subset of rows at prediction time.

use std::collections::BTreeSet;

use faer::{Col, Mat};

use crate::aggregate::DailyAggregate;
use crate::core::ReferenceMonth;
use crate::solvers::RegressionError;

/// Name of the all-ones column.
pub const INTERCEPT_NAME: &str = "(Intercept)";

/// Learned month encoding: reference month plus ordered indicator months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthEncoding {
    reference: u32,
    columns: Vec<u32>,
}

impl MonthEncoding {
    /// Learn the encoding from training aggregates.
    ///
    /// Months that never occur get no column.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::EmptyDataset`] if `aggregates` is empty and
    /// [`RegressionError::ReferenceNotObserved`] if a fixed reference month
    /// has no day in `aggregates`.
    pub fn fit(aggregates: &[DailyAggregate], rule: ReferenceMonth) -> Result<Self, RegressionError> {
        let observed: BTreeSet<u32> = aggregates.iter().map(|a| a.month).collect();

        let reference = match rule {
            ReferenceMonth::LowestObserved => *observed
                .iter()
                .next()
                .ok_or(RegressionError::EmptyDataset)?,
            ReferenceMonth::Fixed(month) => {
                if observed.is_empty() {
                    return Err(RegressionError::EmptyDataset);
                }
                // An absent reference leaves indicators that sum to the intercept
                if !observed.contains(&month) {
                    return Err(RegressionError::ReferenceNotObserved {
                        month,
                        observed: observed.into_iter().collect(),
                    });
                }
                month
            }
        };

        let columns: Vec<u32> = observed.into_iter().filter(|&m| m != reference).collect();

        log::debug!(
            "month encoding: reference={reference}, indicator months={columns:?}"
        );

        Ok(Self { reference, columns })
    }

    /// Month absorbed into the intercept.
    pub fn reference(&self) -> u32 {
        self.reference
    }

    /// Months that have an indicator column, ascending.
    pub fn indicator_months(&self) -> &[u32] {
        &self.columns
    }

    /// Number of design columns including the intercept.
    pub fn n_columns(&self) -> usize {
        1 + self.columns.len()
    }

    /// Design column names: `(Intercept)`, then `month[m]` per indicator.
    pub fn column_names(&self) -> Vec<String> {
        std::iter::once(INTERCEPT_NAME.to_string())
            .chain(self.columns.iter().map(|m| format!("month[{m}]")))
            .collect()
    }

    /// Design column index of the indicator for `month`.
    ///
    /// Returns `Ok(None)` for the reference month, which contributes only
    /// the intercept.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::UnknownCategory`] if `month` is neither the
    /// reference nor one of the indicator months.
    pub fn column_for(&self, month: u32) -> Result<Option<usize>, RegressionError> {
        if month == self.reference {
            return Ok(None);
        }
        self.columns
            .binary_search(&month)
            .map(|pos| Some(pos + 1))
            .map_err(|_| RegressionError::UnknownCategory { month })
    }

    /// Build the design matrix for `rows` under this encoding.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::UnknownCategory`] for a row whose month was
    /// not seen when the encoding was learned.
    pub fn encode(&self, rows: &[DailyAggregate]) -> Result<DesignMatrix, RegressionError> {
        let mut x = Mat::zeros(rows.len(), self.n_columns());

        for (i, row) in rows.iter().enumerate() {
            x[(i, 0)] = 1.0;
            if let Some(j) = self.column_for(row.month)? {
                x[(i, j)] = 1.0;
            }
        }

        Ok(DesignMatrix {
            x,
            column_names: self.column_names(),
        })
    }
}

/// Numeric design matrix with named columns; column 0 is the intercept.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    x: Mat<f64>,
    column_names: Vec<String>,
}

impl DesignMatrix {
    /// Wrap an arbitrary matrix. The first column is expected to be the
    /// intercept; no other structure is enforced.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::ColumnNameMismatch`] unless there is
    /// exactly one name per column.
    pub fn from_parts(x: Mat<f64>, column_names: Vec<String>) -> Result<Self, RegressionError> {
        if x.ncols() != column_names.len() {
            return Err(RegressionError::ColumnNameMismatch {
                columns: x.ncols(),
                names: column_names.len(),
            });
        }
        Ok(Self { x, column_names })
    }

    /// The matrix itself.
    pub fn x(&self) -> &Mat<f64> {
        &self.x
    }

    /// Column names in design order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of rows (days).
    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    /// Number of columns (parameters).
    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }
}

/// Daily counts as the regression response.
pub fn response_vector(rows: &[DailyAggregate]) -> Col<f64> {
    Col::from_fn(rows.len(), |i| rows[i].count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32, count: u64) -> DailyAggregate {
        DailyAggregate::new(NaiveDate::from_ymd_opt(2019, m, d).unwrap(), count)
    }

    #[test]
    fn test_lowest_observed_reference() {
        let rows = vec![day(3, 1, 1), day(5, 1, 2), day(11, 1, 1), day(5, 2, 4)];
        let enc = MonthEncoding::fit(&rows, ReferenceMonth::LowestObserved).unwrap();

        assert_eq!(enc.reference(), 3);
        assert_eq!(enc.indicator_months(), &[5, 11]);
        assert_eq!(enc.column_names(), vec!["(Intercept)", "month[5]", "month[11]"]);
    }

    #[test]
    fn test_encode_indicators() {
        let rows = vec![day(1, 1, 2), day(2, 1, 3), day(3, 1, 4)];
        let enc = MonthEncoding::fit(&rows, ReferenceMonth::LowestObserved).unwrap();
        let design = enc.encode(&rows).unwrap();
        let x = design.x();

        assert_eq!(design.ncols(), 3);
        for i in 0..3 {
            assert_eq!(x[(i, 0)], 1.0);
        }
        assert_eq!((x[(0, 1)], x[(0, 2)]), (0.0, 0.0));
        assert_eq!((x[(1, 1)], x[(1, 2)]), (1.0, 0.0));
        assert_eq!((x[(2, 1)], x[(2, 2)]), (0.0, 1.0));
    }

    #[test]
    fn test_fixed_reference() {
        let rows = vec![day(1, 1, 2), day(2, 1, 3), day(3, 1, 4)];
        let enc = MonthEncoding::fit(&rows, ReferenceMonth::Fixed(2)).unwrap();

        assert_eq!(enc.reference(), 2);
        assert_eq!(enc.indicator_months(), &[1, 3]);
        assert_eq!(enc.column_for(2).unwrap(), None);
        assert_eq!(enc.column_for(3).unwrap(), Some(2));
    }

    #[test]
    fn test_fixed_reference_must_be_observed() {
        let rows = vec![day(1, 1, 2), day(3, 1, 4)];
        let err = MonthEncoding::fit(&rows, ReferenceMonth::Fixed(2)).unwrap_err();

        match err {
            RegressionError::ReferenceNotObserved { month, observed } => {
                assert_eq!(month, 2);
                assert_eq!(observed, vec![1, 3]);
            }
            other => panic!("expected ReferenceNotObserved, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category() {
        let rows = vec![day(1, 1, 2), day(2, 1, 3)];
        let enc = MonthEncoding::fit(&rows, ReferenceMonth::LowestObserved).unwrap();

        let err = enc.encode(&[day(9, 1, 1)]).unwrap_err();
        assert!(matches!(err, RegressionError::UnknownCategory { month: 9 }));
    }

    #[test]
    fn test_empty_training_set() {
        let err = MonthEncoding::fit(&[], ReferenceMonth::LowestObserved).unwrap_err();
        assert!(matches!(err, RegressionError::EmptyDataset));

        let err = MonthEncoding::fit(&[], ReferenceMonth::Fixed(1)).unwrap_err();
        assert!(matches!(err, RegressionError::EmptyDataset));
    }

    #[test]
    fn test_response_vector() {
        let y = response_vector(&[day(1, 1, 2), day(1, 2, 7)]);
        assert_eq!(y.nrows(), 2);
        assert_eq!(y[1], 7.0);
    }
}
