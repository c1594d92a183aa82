use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FetchFailure;
use crate::model::equity::EquityCurveSeries;
use crate::model::feature::FeatureImportanceMap;
use crate::model::horizon::Horizon;
use crate::model::metrics::MetricsByHorizon;
use crate::model::prediction::PredictionsByHorizon;
use crate::model::summary::SummaryBlob;

use super::types::{
    EquityCurveEnvelope, FeatureImportanceEnvelope, HealthResponse, MetricsEnvelope,
    PredictionsEnvelope,
};
use super::MetricsSource;

/// Read-only client for the forecasting API. Every call is a single attempt
/// that bypasses intermediate caches.
pub struct ForecastRestClient {
    http: reqwest::Client,
    base_url: String,
}

impl ForecastRestClient {
    pub fn new(base_url: &str) -> Result<Self, FetchFailure> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchFailure> {
        let url = self.url(path);
        let resp = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "Request failed");
            FetchFailure::Http(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "Non-success status");
            return Err(FetchFailure::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        tracing::debug!(path, status = status.as_u16(), bytes = body.len(), "Response received");
        serde_json::from_slice(&body).map_err(|source| FetchFailure::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, FetchFailure> {
        self.get_json("/api/health").await
    }
}

pub fn metrics_path() -> &'static str {
    "/api/metrics"
}

pub fn predictions_path() -> &'static str {
    "/api/predictions"
}

pub fn equity_curve_path(horizon: Horizon) -> String {
    format!("/api/data/equity-curve/{}", horizon.days())
}

pub fn feature_importance_path(horizon: Horizon) -> String {
    format!("/api/metrics/feature-importance/{}", horizon.days())
}

pub fn summary_path() -> &'static str {
    "/api/data/summary"
}

impl MetricsSource for ForecastRestClient {
    async fn fetch_metrics(&self) -> Result<MetricsByHorizon, FetchFailure> {
        let envelope: MetricsEnvelope = self.get_json(metrics_path()).await?;
        Ok(MetricsByHorizon::from_raw(envelope.metrics))
    }

    async fn fetch_predictions(&self) -> Result<PredictionsByHorizon, FetchFailure> {
        let envelope: PredictionsEnvelope = self.get_json(predictions_path()).await?;
        Ok(PredictionsByHorizon::from_raw(envelope.predictions))
    }

    async fn fetch_equity_curve(
        &self,
        horizon: Horizon,
    ) -> Result<EquityCurveSeries, FetchFailure> {
        let envelope: EquityCurveEnvelope = self.get_json(&equity_curve_path(horizon)).await?;
        if envelope.horizon.is_some_and(|h| h != horizon.days()) {
            tracing::warn!(
                requested = horizon.days(),
                returned = ?envelope.horizon,
                "Equity curve horizon mismatch"
            );
        }
        Ok(EquityCurveSeries::from_raw(envelope.data))
    }

    async fn fetch_feature_importance(
        &self,
        horizon: Horizon,
    ) -> Result<FeatureImportanceMap, FetchFailure> {
        let envelope: FeatureImportanceEnvelope =
            self.get_json(&feature_importance_path(horizon)).await?;
        if envelope.horizon.is_some_and(|h| h != horizon.days()) {
            tracing::warn!(
                requested = horizon.days(),
                returned = ?envelope.horizon,
                "Feature importance horizon mismatch"
            );
        }
        Ok(FeatureImportanceMap::from_raw(envelope.features))
    }

    async fn fetch_summary(&self) -> Result<SummaryBlob, FetchFailure> {
        let raw: BTreeMap<String, Value> = self.get_json(summary_path()).await?;
        Ok(SummaryBlob(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ForecastRestClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url(metrics_path()),
            "http://localhost:8000/api/metrics"
        );
    }

    #[test]
    fn horizon_paths_use_day_counts() {
        assert_eq!(equity_curve_path(Horizon::D5), "/api/data/equity-curve/5");
        assert_eq!(
            feature_importance_path(Horizon::D20),
            "/api/metrics/feature-importance/20"
        );
    }
}
