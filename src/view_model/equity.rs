use chrono::NaiveDate;

use crate::model::equity::EquityCurveSeries;

use super::format::{format_ratio, format_signed_percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceClass {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquitySummary {
    pub final_strategy: f64,
    pub final_benchmark: f64,
    pub outperformance: f64,
    pub class: PerformanceClass,
    pub final_strategy_text: String,
    pub final_benchmark_text: String,
    pub outperformance_text: String,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub points: usize,
}

impl EquitySummary {
    pub fn from_series(series: &EquityCurveSeries) -> Self {
        let (final_strategy, final_benchmark) = series
            .last()
            .map(|p| {
                (
                    finite_or_zero(p.cumulative_strategy),
                    finite_or_zero(p.cumulative_benchmark),
                )
            })
            .unwrap_or((0.0, 0.0));
        let outperformance = final_strategy - final_benchmark;
        let class = if outperformance >= 0.0 {
            PerformanceClass::Positive
        } else {
            PerformanceClass::Negative
        };
        Self {
            final_strategy,
            final_benchmark,
            outperformance,
            class,
            final_strategy_text: format_ratio(final_strategy),
            final_benchmark_text: format_ratio(final_benchmark),
            outperformance_text: format_signed_percent(outperformance),
            first_date: series.points().iter().find_map(|p| p.date),
            last_date: series.points().iter().rev().find_map(|p| p.date),
            points: series.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points == 0
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// `Jan 24` style axis label; empty when the point has no date.
pub fn format_axis_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %y").to_string()).unwrap_or_default()
}
