use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::source::types::{lenient_f64, lenient_u64};

use super::horizon::Horizon;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Prediction {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub directional_accuracy: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sharpe_ratio: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_return: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub horizon_days: u64,
}

/// Latest forecast per horizon. `None` and a missing key both mean the
/// pipeline has no forecast for that horizon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionsByHorizon(pub BTreeMap<Horizon, Option<Prediction>>);

impl PredictionsByHorizon {
    pub const EMPTY: PredictionsByHorizon = PredictionsByHorizon(BTreeMap::new());

    pub fn from_raw(raw: BTreeMap<String, Value>) -> Self {
        let mut out = BTreeMap::new();
        for (key, value) in raw {
            let Some(horizon) = Horizon::from_key(&key) else {
                tracing::debug!(key = %key, "Ignoring prediction for unknown horizon");
                continue;
            };
            let prediction = match value {
                Value::Null => None,
                other => match serde_json::from_value::<Prediction>(other) {
                    Ok(mut p) => {
                        if p.horizon_days == 0 {
                            p.horizon_days = u64::from(horizon.days());
                        }
                        Some(p)
                    }
                    Err(e) => {
                        tracing::warn!(
                            horizon = %horizon,
                            error = %e,
                            "Dropping malformed prediction"
                        );
                        None
                    }
                },
            };
            out.insert(horizon, prediction);
        }
        Self(out)
    }

    pub fn get(&self, horizon: Horizon) -> Option<&Prediction> {
        self.0.get(&horizon).and_then(Option::as_ref)
    }

    pub fn insert(&mut self, horizon: Horizon, prediction: Option<Prediction>) {
        self.0.insert(horizon, prediction);
    }

    /// True when the category came back empty. A map holding only `None`
    /// entries is still a successful, non-empty payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.0.values().filter(|p| p.is_some()).count()
    }
}
