use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::source::types::lenient_f64;

/// Growth-of-$1 multipliers for the strategy and the benchmark on one date.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EquityPoint {
    #[serde(
        default,
        rename = "Date",
        alias = "date",
        deserialize_with = "lenient_date"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cumulative_strategy: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cumulative_benchmark: f64,
}

impl EquityPoint {
    pub fn new(
        date: Option<NaiveDate>,
        cumulative_strategy: f64,
        cumulative_benchmark: f64,
    ) -> Self {
        Self {
            date,
            cumulative_strategy,
            cumulative_benchmark,
        }
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

/// Accepts `YYYY-MM-DD` with an optional time suffix.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Equity curve ordered by date ascending. Empty means "no data".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquityCurveSeries(pub Vec<EquityPoint>);

impl EquityCurveSeries {
    pub const EMPTY: EquityCurveSeries = EquityCurveSeries(Vec::new());

    pub fn from_raw(raw: Vec<Value>) -> Self {
        let mut points: Vec<EquityPoint> = raw
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<EquityPoint>(row) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping malformed equity point");
                    None
                }
            })
            .collect();
        // Undated points keep their upstream position; dated ones must ascend.
        if points.iter().all(|p| p.date.is_some()) {
            points.sort_by_key(|p| p.date);
        }
        Self(points)
    }

    pub fn points(&self) -> &[EquityPoint] {
        &self.0
    }

    pub fn last(&self) -> Option<&EquityPoint> {
        self.0.last()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
