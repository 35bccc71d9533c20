//! Common test utilities and data generators.

#![allow(dead_code)]

use chrono::{Datelike, Duration, NaiveDate};
use incident_regress::aggregate::{DailyAggregate, IncidentRecord};

/// Shorthand for a calendar date.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Build records from `(year, month, day, borough)` tuples.
pub fn records(rows: &[(i32, u32, u32, &str)]) -> Vec<IncidentRecord> {
    rows.iter()
        .map(|&(y, m, d, borough)| IncidentRecord::new(date(y, m, d), borough))
        .collect()
}

/// Daily aggregates in 2020 from `(month, day, count)` tuples.
pub fn daily(rows: &[(u32, u32, u64)]) -> Vec<DailyAggregate> {
    rows.iter()
        .map(|&(m, d, count)| DailyAggregate::new(date(2020, m, d), count))
        .collect()
}

/// The four-day example: two January days (2, 1) and two February days (3, 3).
pub fn two_month_scenario() -> Vec<DailyAggregate> {
    daily(&[(1, 1, 2), (1, 2, 1), (2, 1, 3), (2, 2, 3)])
}

/// Generate incident records with a summer peak over `n_days` from 2018-01-01.
///
/// Some days draw zero incidents and therefore produce no record at all.
pub fn generate_seasonal_records(n_days: i64, seed: u64) -> Vec<IncidentRecord> {
    // Simple deterministic "random" for reproducibility
    let mut rng_state = seed;
    let mut next_rand = || -> f64 {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((rng_state >> 33) as f64) / (u32::MAX as f64 / 2.0)
    };

    let boroughs = ["BRONX", "BROOKLYN", "MANHATTAN", "QUEENS", "STATEN ISLAND"];
    let start = date(2018, 1, 1);
    let mut out = Vec::new();

    for offset in 0..n_days {
        let day = start + Duration::days(offset);
        let month = day.month() as f64;
        // Peak in July, trough in January
        let mean = 3.0 + 2.5 * (1.0 - ((month - 7.0).abs() / 6.0));
        let count = (mean * 2.0 * next_rand()).floor() as usize;

        for k in 0..count {
            let b = (k + offset as usize) % boroughs.len();
            out.push(IncidentRecord::new(day, boroughs[b]));
        }
    }

    out
}
