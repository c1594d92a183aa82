pub mod rest;
pub mod types;

use std::future::Future;

use crate::error::FetchFailure;
use crate::model::equity::EquityCurveSeries;
use crate::model::feature::FeatureImportanceMap;
use crate::model::horizon::Horizon;
use crate::model::metrics::MetricsByHorizon;
use crate::model::prediction::PredictionsByHorizon;
use crate::model::summary::SummaryBlob;

/// Upstream operations, one per data category. Implementations make a single
/// attempt per call and keep no state between calls.
pub trait MetricsSource {
    fn fetch_metrics(&self) -> impl Future<Output = Result<MetricsByHorizon, FetchFailure>> + Send;

    fn fetch_predictions(
        &self,
    ) -> impl Future<Output = Result<PredictionsByHorizon, FetchFailure>> + Send;

    fn fetch_equity_curve(
        &self,
        horizon: Horizon,
    ) -> impl Future<Output = Result<EquityCurveSeries, FetchFailure>> + Send;

    fn fetch_feature_importance(
        &self,
        horizon: Horizon,
    ) -> impl Future<Output = Result<FeatureImportanceMap, FetchFailure>> + Send;

    fn fetch_summary(&self) -> impl Future<Output = Result<SummaryBlob, FetchFailure>> + Send;
}
