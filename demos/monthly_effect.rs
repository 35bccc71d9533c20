//! # Month Effect on Daily Incident Counts
//!
//! Aggregates synthetic incident records into a daily series, regresses the
//! daily count on calendar month and prints the coefficient table, the
//! borough ranking and an actual-vs-fitted overlay for the first days.
//!
//! Run with: `RUST_LOG=debug cargo run --example monthly_effect`

use chrono::{Datelike, Duration, NaiveDate};
use incident_regress::prelude::*;

fn main() {
    pretty_env_logger::init_custom_env("RUST_LOG");

    println!("=== Month Effect on Daily Incident Counts ===\n");

    let records = synthetic_records(730);
    let report = run_analysis(&records, &AnalysisOptions::default());

    println!(
        "{} incidents over {} days\n",
        report.total_incidents(),
        report.daily.len()
    );

    borough_ranking(&report);

    match &report.model {
        Ok(model) => {
            coefficient_table(model);
            overlay(model, &report.daily);
            month_means(model);
        }
        Err(e) => println!("Regression failed: {e}"),
    }
}

/// Records with a summer peak and an uneven borough mix
fn synthetic_records(n_days: i64) -> Vec<IncidentRecord> {
    let boroughs = ["BRONX", "BROOKLYN", "MANHATTAN", "QUEENS", "STATEN ISLAND"];
    let weights = [3, 4, 3, 2, 1];
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).expect("valid start date");

    let mut out = Vec::new();
    for offset in 0..n_days {
        let day = start + Duration::days(offset);
        let month = day.month() as f64;
        let seasonal = 6.0 + 4.0 * (1.0 - (month - 7.0).abs() / 6.0);
        let wobble = ((offset as f64) * 0.91).sin() * 3.0;
        let count = (seasonal + wobble).max(0.0).round() as usize;

        for k in 0..count {
            let slot = (k * 7 + offset as usize) % weights.iter().sum::<usize>();
            let mut acc = 0;
            let borough = boroughs
                .iter()
                .zip(weights.iter())
                .find(|(_, w)| {
                    acc += **w;
                    slot < acc
                })
                .map_or(boroughs[0], |(b, _)| *b);
            out.push(IncidentRecord::new(day, borough));
        }
    }
    out
}

fn borough_ranking(report: &AnalysisReport) {
    println!("--- Boroughs ---\n");
    for b in &report.boroughs {
        println!("{:<14} {:>6}", b.borough, b.count);
    }
    println!();
}

fn coefficient_table(model: &MonthlyModel) {
    println!("--- Coefficients ---\n");

    let summary = model.summary();
    println!(
        "{:<12} {:>10} {:>10} {:>8} {:>10}",
        "term", "estimate", "std.err", "t", "p"
    );
    for row in &summary.coefficients {
        println!(
            "{:<12} {:>10.4} {:>10.4} {:>8.3} {:>10.4}",
            row.name, row.estimate, row.std_error, row.t_statistic, row.p_value
        );
    }
    println!();
    println!("R-squared:          {:.4}", summary.r_squared);
    println!("Adjusted R-squared: {:.4}", summary.adj_r_squared);
    println!(
        "F-statistic:        {:.3} on {} df (p = {:.3e})",
        summary.f_statistic, summary.residual_df, summary.f_pvalue
    );
    println!();
}

fn overlay(model: &MonthlyModel, daily: &[DailyAggregate]) {
    println!("--- Actual vs Fitted (first 10 days) ---\n");

    match model.fitted_first_n(daily, 10) {
        Ok(pairs) => {
            for p in pairs {
                println!(
                    "{}  actual {:>4.0}  fitted {:>6.2}  resid {:>6.2}",
                    p.date, p.actual, p.fitted, p.residual
                );
            }
        }
        Err(e) => println!("Overlay failed: {e}"),
    }
    println!();
}

fn month_means(model: &MonthlyModel) {
    println!("--- Expected daily count per month ---\n");

    for month in 1..=12 {
        if let Ok(mean) = model.expected_count(month) {
            println!("{month:>2}: {mean:.2}");
        }
    }
}
