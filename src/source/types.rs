use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Deserialize a number that may arrive as a JSON number, a numeric string,
/// or `null`. Anything unparseable resolves to `0.0`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&v).unwrap_or(0.0))
}

/// Same as [`lenient_f64`] for counts; negative or fractional input is
/// truncated toward zero.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| if f > 0.0 { f as u64 } else { 0 }))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    })
}

pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Decode an optional nested object. `null` or a value of the wrong shape
/// resolves to `None` so sibling fields still decode.
pub fn lenient_block<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(deserializer)?;
    if v.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(v)
        .map_err(|e| tracing::debug!(error = %e, "Ignoring malformed nested block"))
        .ok())
}

pub fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// `GET /api/metrics` response.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsEnvelope {
    #[serde(default)]
    pub metrics: BTreeMap<String, Value>,
}

/// `GET /api/predictions` response.
#[derive(Debug, Default, Deserialize)]
pub struct PredictionsEnvelope {
    #[serde(default)]
    pub predictions: BTreeMap<String, Value>,
}

/// `GET /api/data/equity-curve/{horizon}` response.
#[derive(Debug, Default, Deserialize)]
pub struct EquityCurveEnvelope {
    #[serde(default)]
    pub horizon: Option<u32>,
    #[serde(default)]
    pub data: Vec<Value>,
}

/// `GET /api/metrics/feature-importance/{horizon}` response.
#[derive(Debug, Default, Deserialize)]
pub struct FeatureImportanceEnvelope {
    #[serde(default)]
    pub horizon: Option<u32>,
    #[serde(default)]
    pub features: BTreeMap<String, Value>,
}

/// `GET /api/health` response.
#[derive(Debug, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: String,
}
