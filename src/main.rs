use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::Event;
use tokio::sync::mpsc;

use forecast_board::aggregator::aggregate;
use forecast_board::config::Config;
use forecast_board::event::AppEvent;
use forecast_board::input::{parse_main_command, UiCommand};
use forecast_board::model::horizon::Horizon;
use forecast_board::source::rest::ForecastRestClient;
use forecast_board::ui::{self, AppState};
use forecast_board::view_model::ViewModel;

/// Spawn one fetch cycle unless another is still in flight.
fn spawn_fetch_cycle(
    client: &Arc<ForecastRestClient>,
    horizon: Horizon,
    deadline: Option<Duration>,
    in_flight: &Arc<AtomicBool>,
    app_tx: &mpsc::Sender<AppEvent>,
) {
    if in_flight.swap(true, Ordering::SeqCst) {
        tracing::debug!(horizon = %horizon, "Fetch cycle already running, skipping");
        return;
    }
    let client = client.clone();
    let in_flight = in_flight.clone();
    let tx = app_tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(AppEvent::FetchStarted { horizon }).await;
        let payload = aggregate(client.as_ref(), horizon, deadline).await;
        let view = ViewModel::build(payload);
        in_flight.store(false, Ordering::SeqCst);
        let _ = tx.send(AppEvent::ViewModelReady(Box::new(view))).await;
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Check config/default.toml and the FORECAST_API_URL environment variable");
            std::process::exit(1);
        }
    };

    // Init tracing (log to file so it doesn't interfere with TUI)
    let log_file = std::fs::File::create("forecast-board.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.level))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    let mut horizon = config
        .api
        .horizon()
        .context("validated api.default_horizon became invalid at runtime")?;
    let deadline = config.api.fetch_deadline();

    tracing::info!(
        base_url = %config.api.base_url,
        horizon = %horizon,
        fetch_timeout_ms = config.api.fetch_timeout_ms,
        "Starting forecast-board"
    );

    let client = Arc::new(
        ForecastRestClient::new(&config.api.base_url).context("failed to build HTTP client")?,
    );

    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(64);
    let in_flight = Arc::new(AtomicBool::new(false));

    // Health probe is informational only; the dashboard degrades per source.
    {
        let client = client.clone();
        let tx = app_tx.clone();
        tokio::spawn(async move {
            let msg = match client.health().await {
                Ok(h) => {
                    tracing::info!(status = %h.status, version = %h.version, "API health");
                    format!("API {} (v{})", h.status, h.version)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "API health probe failed");
                    format!("[WARN] API health probe failed: {}", e)
                }
            };
            let _ = tx.send(AppEvent::LogMessage(msg)).await;
        });
    }

    spawn_fetch_cycle(&client, horizon, deadline, &in_flight, &app_tx);

    let mut terminal = ratatui::init();
    let mut app_state = AppState::new(&config.api.base_url, horizon);
    app_state.push_log(format!("forecast-board started | {}", config.api.base_url));

    let auto_refresh = config.ui.auto_refresh();
    let mut last_cycle = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, &app_state))?;

        // Handle input (non-blocking with timeout)
        if crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if let Some(cmd) = parse_main_command(&key.code) {
                    match cmd {
                        UiCommand::Quit => {
                            tracing::info!("User quit");
                            break;
                        }
                        UiCommand::Refresh => {
                            spawn_fetch_cycle(&client, horizon, deadline, &in_flight, &app_tx);
                            last_cycle = Instant::now();
                        }
                        UiCommand::SelectHorizon(next) => {
                            if next != horizon {
                                horizon = next;
                                app_state.horizon = horizon;
                                spawn_fetch_cycle(&client, horizon, deadline, &in_flight, &app_tx);
                                last_cycle = Instant::now();
                            }
                        }
                        UiCommand::NextHorizon => {
                            horizon = horizon.next();
                            app_state.horizon = horizon;
                            spawn_fetch_cycle(&client, horizon, deadline, &in_flight, &app_tx);
                            last_cycle = Instant::now();
                        }
                    }
                }
            }
        }

        if auto_refresh.is_some_and(|every| last_cycle.elapsed() >= every) {
            spawn_fetch_cycle(&client, horizon, deadline, &in_flight, &app_tx);
            last_cycle = Instant::now();
        }

        // Drain events from channel
        while let Ok(evt) = app_rx.try_recv() {
            app_state.apply(evt);
        }

        // A horizon switch made while a cycle was running lands here.
        if app_state.view.as_ref().is_some_and(|v| v.horizon != horizon)
            && !in_flight.load(Ordering::SeqCst)
        {
            spawn_fetch_cycle(&client, horizon, deadline, &in_flight, &app_tx);
            last_cycle = Instant::now();
        }
    }

    ratatui::restore();
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check forecast-board.log for details.");
    Ok(())
}
