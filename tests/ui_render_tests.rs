use std::collections::BTreeMap;

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::{json, Value};

use forecast_board::aggregator::{AggregatedPayload, Category, SourceFailure};
use forecast_board::event::AppEvent;
use forecast_board::model::equity::EquityCurveSeries;
use forecast_board::model::feature::FeatureImportanceMap;
use forecast_board::model::horizon::Horizon;
use forecast_board::model::prediction::PredictionsByHorizon;
use forecast_board::ui::{self, AppState};
use forecast_board::view_model::ViewModel;

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn draw(state: &AppState) -> String {
    let backend = TestBackend::new(140, 48);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|frame| ui::render(frame, state))
        .expect("render should succeed");
    buffer_text(&terminal)
}

fn raw(v: Value) -> BTreeMap<String, Value> {
    serde_json::from_value(v).expect("object")
}

fn populated_view() -> ViewModel {
    ViewModel::build(AggregatedPayload {
        horizon: Horizon::D1,
        predictions: PredictionsByHorizon::from_raw(raw(json!({
            "1d": {
                "directional_accuracy": 0.55,
                "sharpe_ratio": 1.2,
                "total_return": 0.03,
                "horizon_days": 1
            },
            "5d": null
        }))),
        equity_curve: EquityCurveSeries::from_raw(vec![
            json!({
                "Date": "2024-01-02",
                "cumulative_strategy": 1.0,
                "cumulative_benchmark": 1.0
            }),
            json!({
                "Date": "2024-03-01",
                "cumulative_strategy": 1.12,
                "cumulative_benchmark": 1.05
            }),
        ]),
        feature_importance: [("rsi_14", 0.21), ("volatility_20d", 0.13)]
            .into_iter()
            .collect::<FeatureImportanceMap>(),
        failures: vec![SourceFailure {
            category: Category::Summary,
            reason: "timed out".to_string(),
        }],
        ..AggregatedPayload::default()
    })
}

#[test]
/// Verifies the first frame before any cycle completes shows the loading state.
fn render_loading_state_before_first_cycle() {
    let state = AppState::new("http://localhost:8000", Horizon::D1);
    let text = draw(&state);
    assert!(text.contains("Loading forecasts"));
    assert!(text.contains("http://localhost:8000"));
    assert!(!text.contains("Model Comparison"));
}

#[test]
/// Verifies the empty state:
/// a completed cycle without predictions replaces the panels with a
/// "No data available" message.
fn render_empty_state_without_predictions() {
    let mut state = AppState::new("http://localhost:8000", Horizon::D1);
    state.apply(AppEvent::ViewModelReady(Box::new(ViewModel::default())));

    let text = draw(&state);
    assert!(text.contains("No data available"));
    assert!(!text.contains("Predictions"));
}

#[test]
/// Verifies the populated dashboard:
/// every panel title renders, missing horizons show their placeholder,
/// and the status bar names the degraded source.
fn render_dashboard_panels_with_data() {
    let mut state = AppState::new("http://localhost:8000", Horizon::D1);
    state.apply(AppEvent::FetchStarted {
        horizon: Horizon::D1,
    });
    state.apply(AppEvent::ViewModelReady(Box::new(populated_view())));

    let text = draw(&state);
    assert!(text.contains("Predictions"));
    assert!(text.contains("No data for 5d"));
    assert!(text.contains("No data for 20d"));
    assert!(text.contains("Backtest Performance"));
    assert!(text.contains("No backtest results"));
    assert!(text.contains("Equity Curve - 1D Horizon"));
    assert!(text.contains("Top Features - 1D"));
    assert!(text.contains("rsi_14"));
    assert!(text.contains("Model Comparison"));
    assert!(text.contains("degraded: summary"));
}

#[test]
/// Verifies state transitions from events:
/// fetch start flags the status bar and a ready view clears it again.
fn events_drive_fetching_flag_and_log() {
    let mut state = AppState::new("http://localhost:8000", Horizon::D5);
    state.apply(AppEvent::FetchStarted {
        horizon: Horizon::D5,
    });
    assert!(state.fetching);
    assert!(draw(&state).contains("FETCHING"));

    state.apply(AppEvent::ViewModelReady(Box::new(populated_view())));
    assert!(!state.fetching);
    assert!(state.has_data());
    assert!(state.last_updated.is_some());
    assert!(state
        .log_messages
        .last()
        .is_some_and(|m| m.contains("unavailable: summary")));
}

#[test]
fn log_is_capped() {
    let mut state = AppState::new("http://localhost:8000", Horizon::D1);
    for i in 0..250 {
        state.apply(AppEvent::LogMessage(format!("line {}", i)));
    }
    assert_eq!(state.log_messages.len(), 200);
    assert_eq!(state.log_messages[0], "line 50");
}
