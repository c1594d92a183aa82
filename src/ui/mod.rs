pub mod chart;
pub mod dashboard;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::event::AppEvent;
use crate::model::horizon::Horizon;
use crate::view_model::ViewModel;

use chart::EquityChart;
use dashboard::{
    BacktestPanel, EmptyState, FeaturePanel, KeybindBar, LogPanel, MetricsTablePanel,
    PredictionPanel, StatusBar,
};

const MAX_LOG_MESSAGES: usize = 200;

pub struct AppState {
    pub base_url: String,
    pub horizon: Horizon,
    pub view: Option<ViewModel>,
    pub fetching: bool,
    pub last_updated: Option<String>,
    pub log_messages: Vec<String>,
}

impl AppState {
    pub fn new(base_url: &str, horizon: Horizon) -> Self {
        Self {
            base_url: base_url.to_string(),
            horizon,
            view: None,
            fetching: false,
            last_updated: None,
            log_messages: Vec::new(),
        }
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    /// Presentation switch: panels render only when predictions came back.
    pub fn has_data(&self) -> bool {
        self.view.as_ref().is_some_and(ViewModel::has_data)
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::FetchStarted { horizon } => {
                self.fetching = true;
                self.push_log(format!("Fetching {} ...", horizon));
            }
            AppEvent::ViewModelReady(view) => {
                self.fetching = false;
                self.last_updated = Some(chrono::Local::now().format("%H:%M:%S").to_string());
                if view.degraded.is_empty() {
                    self.push_log(format!("Loaded {} view", view.horizon));
                } else {
                    let names: Vec<&str> = view.degraded.iter().map(|c| c.name()).collect();
                    self.push_log(format!(
                        "[WARN] Loaded {} view, unavailable: {}",
                        view.horizon,
                        names.join(", ")
                    ));
                }
                self.view = Some(*view);
            }
            AppEvent::LogMessage(msg) => {
                self.push_log(msg);
            }
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // dashboard body
            Constraint::Length(4), // system log
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    let degraded = state
        .view
        .as_ref()
        .map(|v| v.degraded.as_slice())
        .unwrap_or(&[]);
    frame.render_widget(
        StatusBar {
            base_url: &state.base_url,
            horizon: state.horizon,
            fetching: state.fetching,
            last_updated: state.last_updated.as_deref(),
            degraded,
        },
        outer[0],
    );

    match state.view.as_ref() {
        Some(view) if view.has_data() => render_dashboard(frame, view, outer[1]),
        Some(_) => frame.render_widget(
            EmptyState {
                message: "No data available",
                detail: "The forecasting API returned no predictions. Press R to retry.",
            },
            outer[1],
        ),
        None => frame.render_widget(
            EmptyState {
                message: "Loading forecasts...",
                detail: &state.base_url,
            },
            outer[1],
        ),
    }

    frame.render_widget(LogPanel::new(&state.log_messages), outer[2]);
    frame.render_widget(KeybindBar, outer[3]);
}

fn render_dashboard(frame: &mut Frame, view: &ViewModel, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // predictions
            Constraint::Length(11), // backtest cards
            Constraint::Min(8),     // equity + features
            Constraint::Length(7),  // model comparison
        ])
        .split(area);

    frame.render_widget(PredictionPanel::new(&view.predictions), rows[0]);
    frame.render_widget(BacktestPanel::new(&view.backtests), rows[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[2]);
    frame.render_widget(
        EquityChart::new(&view.equity_curve, &view.equity, view.horizon),
        middle[0],
    );
    frame.render_widget(FeaturePanel::new(&view.features, view.horizon), middle[1]);

    frame.render_widget(MetricsTablePanel::new(&view.pivot), rows[3]);
}
