use crate::model::horizon::Horizon;
use crate::model::metrics::{BacktestMetrics, MetricsByHorizon};
use crate::model::prediction::{Prediction, PredictionsByHorizon};

use super::format::{format_count, format_percent, format_ratio};
use super::trend::Trend;

/// Threshold above which accuracy-like ratios count as favorable.
pub const COIN_FLIP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub value: String,
    pub trend: Trend,
}

impl Badge {
    fn new(label: &'static str, value: String, trend: Trend) -> Self {
        Self {
            label,
            value,
            trend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionCard {
    Available {
        horizon: Horizon,
        /// Direction of the headline arrow, from total return.
        direction: Trend,
        directional_accuracy: Badge,
        sharpe_ratio: Badge,
        total_return: Badge,
    },
    Missing {
        horizon: Horizon,
    },
}

impl PredictionCard {
    pub fn from_prediction(horizon: Horizon, prediction: Option<&Prediction>) -> Self {
        let Some(p) = prediction else {
            return Self::Missing { horizon };
        };
        Self::Available {
            horizon,
            direction: Trend::of(p.total_return),
            directional_accuracy: Badge::new(
                "Dir. Accuracy",
                format_percent(p.directional_accuracy),
                Trend::above(p.directional_accuracy, COIN_FLIP),
            ),
            sharpe_ratio: Badge::new(
                "Sharpe Ratio",
                format_ratio(p.sharpe_ratio),
                Trend::of(p.sharpe_ratio),
            ),
            total_return: Badge::new(
                "Total Return",
                format_percent(p.total_return),
                Trend::of(p.total_return),
            ),
        }
    }

    pub fn horizon(&self) -> Horizon {
        match self {
            Self::Available { horizon, .. } | Self::Missing { horizon } => *horizon,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    pub fn badges(&self) -> Vec<&Badge> {
        match self {
            Self::Available {
                directional_accuracy,
                sharpe_ratio,
                total_return,
                ..
            } => vec![directional_accuracy, sharpe_ratio, total_return],
            Self::Missing { .. } => Vec::new(),
        }
    }
}

/// One card per horizon in display order, present or not.
pub fn prediction_cards(predictions: &PredictionsByHorizon) -> Vec<PredictionCard> {
    Horizon::ALL
        .into_iter()
        .map(|h| PredictionCard::from_prediction(h, predictions.get(h)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktestCard {
    pub horizon: Horizon,
    pub badges: Vec<Badge>,
    pub test_period: Option<String>,
}

impl BacktestCard {
    pub fn from_backtest(horizon: Horizon, bt: &BacktestMetrics) -> Self {
        let badges = vec![
            Badge::new("Sharpe", format_ratio(bt.sharpe_ratio), Trend::of(bt.sharpe_ratio)),
            Badge::new("Sortino", format_ratio(bt.sortino_ratio), Trend::of(bt.sortino_ratio)),
            Badge::new("Max DD", format_percent(bt.max_drawdown), Trend::ADVERSE),
            Badge::new(
                "Win Rate",
                format_percent(bt.win_rate),
                Trend::above(bt.win_rate, COIN_FLIP),
            ),
            Badge::new("Return", format_percent(bt.total_return), Trend::of(bt.total_return)),
            Badge::new(
                "Benchmark",
                format_percent(bt.benchmark_return),
                Trend::of(bt.benchmark_return),
            ),
            Badge::new("Trades", format_count(bt.num_trades), Trend::Neutral),
        ];
        let test_period = match (&bt.test_start, &bt.test_end) {
            (Some(start), Some(end)) => Some(format!("{} .. {}", start, end)),
            _ => None,
        };
        Self {
            horizon,
            badges,
            test_period,
        }
    }

    pub fn badge(&self, label: &str) -> Option<&Badge> {
        self.badges.iter().find(|b| b.label == label)
    }
}

/// Cards for horizons whose metrics carry a backtest block, in display order.
pub fn backtest_cards(metrics: &MetricsByHorizon) -> Vec<BacktestCard> {
    Horizon::ALL
        .into_iter()
        .filter_map(|h| {
            metrics
                .get(h)
                .and_then(|m| m.backtest.as_ref())
                .map(|bt| BacktestCard::from_backtest(h, bt))
        })
        .collect()
}
