use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::FetchFailure;
use crate::model::equity::EquityCurveSeries;
use crate::model::feature::FeatureImportanceMap;
use crate::model::horizon::Horizon;
use crate::model::metrics::MetricsByHorizon;
use crate::model::prediction::PredictionsByHorizon;
use crate::model::summary::SummaryBlob;
use crate::source::MetricsSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Metrics,
    Predictions,
    EquityCurve,
    FeatureImportance,
    Summary,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Metrics,
        Category::Predictions,
        Category::EquityCurve,
        Category::FeatureImportance,
        Category::Summary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Metrics => "metrics",
            Self::Predictions => "predictions",
            Self::EquityCurve => "equity_curve",
            Self::FeatureImportance => "feature_importance",
            Self::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub category: Category,
    pub reason: String,
}

/// One fetch cycle's worth of category payloads. Every slot is populated,
/// with the category's empty default standing in for a failed source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedPayload {
    pub horizon: Horizon,
    pub metrics: MetricsByHorizon,
    pub predictions: PredictionsByHorizon,
    pub equity_curve: EquityCurveSeries,
    pub feature_importance: FeatureImportanceMap,
    pub summary: SummaryBlob,
    pub failures: Vec<SourceFailure>,
}

impl AggregatedPayload {
    pub fn failed(&self, category: Category) -> bool {
        self.failures.iter().any(|f| f.category == category)
    }
}

/// Await `fut`, substituting `fallback` on failure or when `deadline`
/// elapses first. The failure, if any, is returned alongside for reporting.
pub async fn fetch_with_fallback<T, F>(
    category: Category,
    fut: F,
    fallback: T,
    deadline: Option<Duration>,
) -> (T, Option<SourceFailure>)
where
    F: Future<Output = Result<T, FetchFailure>>,
{
    let outcome = match deadline {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(res) => res,
            Err(_) => Err(FetchFailure::Timeout {
                category: category.name(),
                after_ms: limit.as_millis() as u64,
            }),
        },
        None => fut.await,
    };
    match outcome {
        Ok(value) => (value, None),
        Err(e) => {
            tracing::warn!(
                category = category.name(),
                error = %e,
                "Source failed, using empty default"
            );
            (
                fallback,
                Some(SourceFailure {
                    category,
                    reason: e.to_string(),
                }),
            )
        }
    }
}

/// Fetch every category concurrently for `horizon`. Never fails.
pub async fn aggregate<S: MetricsSource>(
    source: &S,
    horizon: Horizon,
    deadline: Option<Duration>,
) -> AggregatedPayload {
    let started = Instant::now();
    let (
        (metrics, metrics_err),
        (predictions, predictions_err),
        (equity_curve, equity_err),
        (feature_importance, features_err),
        (summary, summary_err),
    ) = tokio::join!(
        fetch_with_fallback(
            Category::Metrics,
            source.fetch_metrics(),
            MetricsByHorizon::EMPTY,
            deadline,
        ),
        fetch_with_fallback(
            Category::Predictions,
            source.fetch_predictions(),
            PredictionsByHorizon::EMPTY,
            deadline,
        ),
        fetch_with_fallback(
            Category::EquityCurve,
            source.fetch_equity_curve(horizon),
            EquityCurveSeries::EMPTY,
            deadline,
        ),
        fetch_with_fallback(
            Category::FeatureImportance,
            source.fetch_feature_importance(horizon),
            FeatureImportanceMap::EMPTY,
            deadline,
        ),
        fetch_with_fallback(
            Category::Summary,
            source.fetch_summary(),
            SummaryBlob::EMPTY,
            deadline,
        ),
    );

    let failures: Vec<SourceFailure> = [
        metrics_err,
        predictions_err,
        equity_err,
        features_err,
        summary_err,
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::info!(
        horizon = %horizon,
        failed_sources = failures.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Fetch cycle complete"
    );

    AggregatedPayload {
        horizon,
        metrics,
        predictions,
        equity_curve,
        feature_importance,
        summary,
        failures,
    }
}
