use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::source::types::{lenient_block, lenient_f64, lenient_opt_string, lenient_u64};

use super::horizon::{Horizon, ModelKind};

/// Error/accuracy pair reported per model on the held-out set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ModelMetrics {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mae: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub directional_accuracy: f64,
}

/// Backtest block nested under each horizon.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BacktestMetrics {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sharpe_ratio: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sortino_ratio: f64,
    /// Peak-to-trough decline, zero or negative.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max_drawdown: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_return: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub benchmark_return: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volatility: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub win_rate: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub directional_accuracy: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub num_trades: u64,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub test_start: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub test_end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HorizonMetrics {
    #[serde(default, deserialize_with = "lenient_block")]
    pub xgboost: Option<ModelMetrics>,
    #[serde(default, deserialize_with = "lenient_block")]
    pub rf: Option<ModelMetrics>,
    #[serde(default, deserialize_with = "lenient_block")]
    pub ridge: Option<ModelMetrics>,
    #[serde(default, deserialize_with = "lenient_block")]
    pub ensemble: Option<ModelMetrics>,
    #[serde(default, deserialize_with = "lenient_block")]
    pub backtest: Option<BacktestMetrics>,
}

impl HorizonMetrics {
    pub fn model(&self, kind: ModelKind) -> Option<&ModelMetrics> {
        match kind {
            ModelKind::Xgboost => self.xgboost.as_ref(),
            ModelKind::Rf => self.rf.as_ref(),
            ModelKind::Ridge => self.ridge.as_ref(),
            ModelKind::Ensemble => self.ensemble.as_ref(),
        }
    }
}

/// Per-horizon model and backtest metrics. A horizon the pipeline has not
/// produced is an absent key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsByHorizon(pub BTreeMap<Horizon, HorizonMetrics>);

impl MetricsByHorizon {
    pub const EMPTY: MetricsByHorizon = MetricsByHorizon(BTreeMap::new());

    pub fn from_raw(raw: BTreeMap<String, Value>) -> Self {
        let mut out = BTreeMap::new();
        for (key, value) in raw {
            let Some(horizon) = Horizon::from_key(&key) else {
                tracing::debug!(key = %key, "Ignoring metrics for unknown horizon");
                continue;
            };
            match serde_json::from_value::<HorizonMetrics>(value) {
                Ok(metrics) => {
                    out.insert(horizon, metrics);
                }
                Err(e) => {
                    tracing::warn!(
                        horizon = %horizon,
                        error = %e,
                        "Dropping malformed horizon metrics"
                    );
                }
            }
        }
        Self(out)
    }

    pub fn get(&self, horizon: Horizon) -> Option<&HorizonMetrics> {
        self.0.get(&horizon)
    }

    pub fn insert(&mut self, horizon: Horizon, metrics: HorizonMetrics) {
        self.0.insert(horizon, metrics);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
