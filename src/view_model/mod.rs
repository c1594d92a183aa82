pub mod cards;
pub mod equity;
pub mod features;
pub mod format;
pub mod pivot;
pub mod trend;

use crate::aggregator::{AggregatedPayload, Category};
use crate::model::equity::EquityCurveSeries;
use crate::model::horizon::Horizon;
use crate::model::summary::SummaryBlob;

use cards::{backtest_cards, prediction_cards, BacktestCard, PredictionCard};
use equity::EquitySummary;
use features::{rank_features, RankedFeature};
use pivot::MetricsPivot;

/// Everything the dashboard draws for one fetch cycle. Built fresh from each
/// aggregated payload and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub horizon: Horizon,
    pub predictions: Vec<PredictionCard>,
    pub backtests: Vec<BacktestCard>,
    pub pivot: MetricsPivot,
    pub equity_curve: EquityCurveSeries,
    pub equity: EquitySummary,
    pub features: Vec<RankedFeature>,
    pub summary: SummaryBlob,
    pub degraded: Vec<Category>,
    has_data: bool,
}

impl ViewModel {
    pub fn build(payload: AggregatedPayload) -> Self {
        let AggregatedPayload {
            horizon,
            metrics,
            predictions,
            equity_curve,
            feature_importance,
            summary,
            failures,
        } = payload;

        let mut degraded: Vec<Category> = failures.iter().map(|f| f.category).collect();
        degraded.sort();
        degraded.dedup();

        Self {
            horizon,
            has_data: !predictions.is_empty(),
            predictions: prediction_cards(&predictions),
            backtests: backtest_cards(&metrics),
            pivot: MetricsPivot::build(&metrics),
            equity: EquitySummary::from_series(&equity_curve),
            equity_curve,
            features: rank_features(&feature_importance),
            summary,
            degraded,
        }
    }

    /// False when the predictions category came back empty; the dashboard
    /// then shows its empty state instead of the panels.
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn prediction(&self, horizon: Horizon) -> Option<&PredictionCard> {
        self.predictions.iter().find(|c| c.horizon() == horizon)
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::build(AggregatedPayload::default())
    }
}
