//! Countdown Timer - A countdown timer state machine driven over HTTP
//! 
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.tick_interval()));

    if let Some(preset) = config.preset() {
        let timer = state.dispatch(preset)?;
        info!("Preset duration loaded: {}", timer);
    }

    // Start the ticker background task
    let ticker = tokio::spawn(ticker_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start      - Start the countdown");
    info!("  POST /stop       - Pause the countdown");
    info!("  POST /toggle     - Start or pause");
    info!("  POST /reset      - Zero and stop the timer");
    info!("  POST /set        - Load hours/minutes/seconds");
    info!("  POST /increment  - Add one second");
    info!("  POST /decrement  - Remove one second");
    info!("  POST /command    - Apply a tagged action");
    info!("  GET  /status     - Current timer and ticker status");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
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

    // Release the ticker before exiting
    ticker.abort();

    info!("Server shutdown complete");
    Ok(())
}
