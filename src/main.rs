//! Interval Coach - an interval-workout timer
//! 
//! This is the entry point serving the timer's HTTP control surface.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use interval_coach::{
    api::create_router,
    config::Config,
    services::{JsonFileStore, TerminalCuePlayer, WorkoutLibrary},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_coach={},tower_http=info", config.log_level()))
        .init();

    let settings = config.timer_settings();
    info!("Starting interval-coach v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, store={}, lead-in={}s, settle={}ms",
        config.host,
        config.port,
        config.store.display(),
        settings.lead_in_seconds,
        settings.settle_delay.as_millis()
    );

    let mut library = WorkoutLibrary::new(JsonFileStore::new(&config.store));
    info!("{} saved workouts available", library.titles().len());

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        settings,
        library,
        Arc::new(TerminalCuePlayer::new(config.bell)),
    ));

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("  POST /plan/exercises        - Add an exercise");
    info!("  POST /timer/start|pause|reset - Control the timer");
    info!("  POST /workouts              - Save the current plan");
    info!("  GET  /status                - Timer, display and plan");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
