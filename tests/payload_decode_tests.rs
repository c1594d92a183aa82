use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{json, Value};

use forecast_board::model::equity::EquityCurveSeries;
use forecast_board::model::feature::FeatureImportanceMap;
use forecast_board::model::horizon::{Horizon, ModelKind};
use forecast_board::model::metrics::MetricsByHorizon;
use forecast_board::model::prediction::PredictionsByHorizon;
use forecast_board::source::types::{
    EquityCurveEnvelope, FeatureImportanceEnvelope, MetricsEnvelope, PredictionsEnvelope,
};

fn object(v: Value) -> BTreeMap<String, Value> {
    serde_json::from_value(v).expect("object")
}

#[test]
/// Verifies metrics envelope decoding:
/// model blocks and the nested backtest block map onto typed fields;
/// unknown horizons are dropped rather than failing the payload.
fn metrics_envelope_decodes_models_and_backtest() {
    let body = json!({
        "metrics": {
            "1d": {
                "xgboost": {"mae": 0.0081, "directional_accuracy": 0.52},
                "rf": {"mae": 0.0083, "directional_accuracy": 0.51},
                "ridge": {"mae": 0.0079, "directional_accuracy": 0.53},
                "ensemble": {"mae": 0.0080, "directional_accuracy": 0.54},
                "backtest": {
                    "horizon": 1,
                    "test_start": "2023-01-03",
                    "test_end": "2024-12-31",
                    "total_return": 0.21,
                    "benchmark_return": 0.18,
                    "sharpe_ratio": 1.12,
                    "sortino_ratio": 1.6,
                    "max_drawdown": -0.084,
                    "volatility": 0.13,
                    "win_rate": 0.54,
                    "num_trades": 480,
                    "directional_accuracy": 0.54
                }
            },
            "3d": {"xgboost": {"mae": 1.0, "directional_accuracy": 1.0}}
        }
    });
    let envelope: MetricsEnvelope = serde_json::from_value(body).unwrap();
    let metrics = MetricsByHorizon::from_raw(envelope.metrics);

    assert_eq!(metrics.len(), 1);
    let day = metrics.get(Horizon::D1).unwrap();
    assert!((day.model(ModelKind::Ridge).unwrap().mae - 0.0079).abs() < 1e-12);
    let bt = day.backtest.as_ref().unwrap();
    assert_eq!(bt.num_trades, 480);
    assert!((bt.max_drawdown + 0.084).abs() < 1e-12);
    assert_eq!(bt.test_start.as_deref(), Some("2023-01-03"));
}

#[test]
fn malformed_numeric_fields_default_to_zero() {
    let raw = object(json!({
        "5d": {
            "xgboost": {"mae": "0.02", "directional_accuracy": null},
            "backtest": {"sharpe_ratio": "n/a", "num_trades": -3}
        }
    }));
    let metrics = MetricsByHorizon::from_raw(raw);
    let week = metrics.get(Horizon::D5).unwrap();
    let xgb = week.model(ModelKind::Xgboost).unwrap();
    assert!((xgb.mae - 0.02).abs() < 1e-12);
    assert_eq!(xgb.directional_accuracy, 0.0);
    assert!(week.model(ModelKind::Rf).is_none());
    let bt = week.backtest.as_ref().unwrap();
    assert_eq!(bt.sharpe_ratio, 0.0);
    assert_eq!(bt.num_trades, 0);
}

#[test]
/// Verifies per-block isolation in metrics:
/// a model or backtest block of the wrong shape becomes `None` while its
/// sibling models and the rest of the horizon still decode.
fn malformed_sub_block_keeps_sibling_blocks() {
    let raw = object(json!({
        "1d": {
            "xgboost": "unavailable",
            "ensemble": {"mae": 0.007, "directional_accuracy": 0.56},
            "backtest": {"sharpe_ratio": 1.1}
        },
        "5d": {
            "rf": {"mae": 0.02, "directional_accuracy": 0.53},
            "ridge": [1, 2, 3],
            "backtest": "n/a"
        }
    }));
    let metrics = MetricsByHorizon::from_raw(raw);
    assert_eq!(metrics.len(), 2);

    let day = metrics.get(Horizon::D1).expect("1d horizon kept");
    assert!(day.model(ModelKind::Xgboost).is_none());
    let ensemble = day.model(ModelKind::Ensemble).expect("ensemble kept");
    assert!((ensemble.directional_accuracy - 0.56).abs() < 1e-12);
    let bt = day.backtest.as_ref().expect("backtest kept");
    assert!((bt.sharpe_ratio - 1.1).abs() < 1e-12);

    let week = metrics.get(Horizon::D5).expect("5d horizon kept");
    assert!(week.model(ModelKind::Rf).is_some());
    assert!(week.model(ModelKind::Ridge).is_none());
    assert!(week.backtest.is_none());
}

#[test]
/// Verifies absent predictions:
/// a null horizon is kept as "no forecast" and still counts as a payload.
fn predictions_keep_null_horizons_as_missing() {
    let body = json!({
        "predictions": {
            "1d": {
                "horizon_days": 1,
                "directional_accuracy": 0.55,
                "sharpe_ratio": 1.2,
                "total_return": 0.03,
                "model_metrics": {"xgboost": {"mae": 0.01}}
            },
            "5d": null
        }
    });
    let envelope: PredictionsEnvelope = serde_json::from_value(body).unwrap();
    let predictions = PredictionsByHorizon::from_raw(envelope.predictions);

    assert!(!predictions.is_empty());
    assert_eq!(predictions.available_count(), 1);
    assert_eq!(predictions.get(Horizon::D1).unwrap().horizon_days, 1);
    assert!(predictions.get(Horizon::D5).is_none());
    assert!(predictions.get(Horizon::D20).is_none());
}

#[test]
fn prediction_without_horizon_days_takes_it_from_key() {
    let raw = object(json!({"20d": {"total_return": 0.1}}));
    let predictions = PredictionsByHorizon::from_raw(raw);
    assert_eq!(predictions.get(Horizon::D20).unwrap().horizon_days, 20);
}

#[test]
/// Verifies equity rows as written by the backtest CSV:
/// `Date` strings parse to calendar dates, missing dates stay `None`.
fn equity_curve_rows_decode_with_optional_dates() {
    let body = json!({
        "horizon": 5,
        "data": [
            {"Date": "2023-01-03", "cumulative_strategy": 1.0, "cumulative_benchmark": 1.0},
            {"Date": "2023-01-04", "cumulative_strategy": 1.01, "cumulative_benchmark": 0.99}
        ]
    });
    let envelope: EquityCurveEnvelope = serde_json::from_value(body).unwrap();
    assert_eq!(envelope.horizon, Some(5));
    let series = EquityCurveSeries::from_raw(envelope.data);
    assert_eq!(series.len(), 2);
    assert_eq!(series.points()[0].date, NaiveDate::from_ymd_opt(2023, 1, 3));

    let undated = EquityCurveSeries::from_raw(vec![
        json!({"cumulative_strategy": 1.2, "cumulative_benchmark": 1.1}),
        json!({"date": "garbage", "cumulative_strategy": 1.3, "cumulative_benchmark": 1.1}),
        json!("not a row"),
    ]);
    assert_eq!(undated.len(), 2);
    assert!(undated.points().iter().all(|p| p.date.is_none()));
    assert!((undated.last().unwrap().cumulative_strategy - 1.3).abs() < 1e-12);
}

#[test]
fn equity_curve_points_are_sorted_by_date() {
    let series = EquityCurveSeries::from_raw(vec![
        json!({"Date": "2023-02-01", "cumulative_strategy": 1.1, "cumulative_benchmark": 1.0}),
        json!({"Date": "2023-01-01", "cumulative_strategy": 1.0, "cumulative_benchmark": 1.0}),
    ]);
    assert_eq!(series.points()[0].date, NaiveDate::from_ymd_opt(2023, 1, 1));
    assert!((series.last().unwrap().cumulative_strategy - 1.1).abs() < 1e-12);
}

#[test]
fn feature_scores_are_clamped_non_negative() {
    let body = json!({
        "horizon": 1,
        "features": {"rsi_14": 0.12, "macd": -0.5, "vix_close": "0.08", "": 0.9}
    });
    let envelope: FeatureImportanceEnvelope = serde_json::from_value(body).unwrap();
    let features = FeatureImportanceMap::from_raw(envelope.features);
    assert_eq!(features.len(), 3);
    assert_eq!(features.0["macd"], 0.0);
    assert!((features.0["vix_close"] - 0.08).abs() < 1e-12);
}

#[test]
fn empty_envelopes_decode_to_empty_payloads() {
    let metrics: MetricsEnvelope = serde_json::from_value(json!({})).unwrap();
    assert!(MetricsByHorizon::from_raw(metrics.metrics).is_empty());
    let equity: EquityCurveEnvelope = serde_json::from_value(json!({"horizon": 1})).unwrap();
    assert!(EquityCurveSeries::from_raw(equity.data).is_empty());
}
