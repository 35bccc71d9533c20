//! Analysis options and configuration.

use serde::Deserialize;
use thiserror::Error;

/// Rule for choosing the month absorbed into the intercept.
///
/// In TOML this is either `reference_month = "lowest_observed"` or
/// `reference_month = { fixed = 3 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMonth {
    /// Use the smallest month number present in the data (default).
    #[default]
    LowestObserved,
    /// Always use the given month (1-12) as the baseline.
    ///
    /// If that month never occurs, every observed month receives an indicator
    /// column and the design becomes singular against the intercept.
    Fixed(u32),
}

/// Configuration options for the month-effect analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Reference category selection rule (default: lowest observed month).
    pub reference_month: ReferenceMonth,
    /// Whether to compute standard errors and inference statistics (default: true).
    pub compute_inference: bool,
    /// Confidence level for confidence intervals (default: 0.95).
    pub confidence_level: f64,
    /// Relative tolerance on `|R_jj| / ‖X_j‖` below which a design column
    /// is treated as linearly dependent on the preceding ones.
    pub rank_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            reference_month: ReferenceMonth::LowestObserved,
            compute_inference: true,
            confidence_level: 0.95,
            rank_tolerance: 1e-10,
        }
    }
}

/// Errors that can occur when validating or loading analysis options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("confidence_level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
    #[error("rank_tolerance must be positive, got {0}")]
    InvalidRankTolerance(f64),
    #[error("reference month must be in 1..=12, got {0}")]
    InvalidReferenceMonth(u32),
    #[error("failed to parse options: {0}")]
    Parse(String),
}

impl AnalysisOptions {
    /// Create a new builder for analysis options.
    pub fn builder() -> AnalysisOptionsBuilder {
        AnalysisOptionsBuilder::default()
    }

    /// Parse options from a TOML document and validate them.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Parse`] if the TOML is malformed, or a
    /// validation error if a value is out of range.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, OptionsError> {
        let options: Self =
            toml::from_str(toml_str).map_err(|e| OptionsError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.confidence_level <= 0.0 || self.confidence_level >= 1.0 {
            return Err(OptionsError::InvalidConfidenceLevel(self.confidence_level));
        }
        if self.rank_tolerance <= 0.0 || !self.rank_tolerance.is_finite() {
            return Err(OptionsError::InvalidRankTolerance(self.rank_tolerance));
        }
        if let ReferenceMonth::Fixed(month) = self.reference_month {
            if !(1..=12).contains(&month) {
                return Err(OptionsError::InvalidReferenceMonth(month));
            }
        }
        Ok(())
    }
}

/// Builder for `AnalysisOptions`.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptionsBuilder {
    options: AnalysisOptions,
}

impl AnalysisOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference month selection rule.
    pub fn reference_month(mut self, rule: ReferenceMonth) -> Self {
        self.options.reference_month = rule;
        self
    }

    /// Set whether to compute inference statistics.
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.options.compute_inference = compute;
        self
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options.confidence_level = level;
        self
    }

    /// Set the rank tolerance for the QR rank check.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<AnalysisOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> AnalysisOptions {
        self.options
    }
}
