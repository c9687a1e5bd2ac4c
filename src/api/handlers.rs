//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, Command};
use super::{
    requests::{ActionRequest, SetTimeRequest},
    responses::{HealthResponse, StatusResponse, TimerResponse},
};

type TimerResult = Result<Json<TimerResponse>, StatusCode>;

/// Dispatch a command and wrap the new state in a response
fn respond(state: &AppState, command: Command, message: &str) -> TimerResult {
    match state.dispatch(command) {
        Ok(timer) => Ok(Json(TimerResponse::new(message, timer))),
        Err(e) => {
            error!("Failed to apply {}: {}", command.name(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    respond(&state, Command::Start, "Timer started")
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    respond(&state, Command::Stop, "Timer stopped")
}

/// Handle POST /toggle - Start when stopped, stop when running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    let result = state.dispatch_with(|timer| {
        if timer.running { Command::Stop } else { Command::Start }
    });

    match result {
        Ok(timer) => {
            let message = if timer.running { "Timer started" } else { "Timer stopped" };
            Ok(Json(TimerResponse::new(message, timer)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Zero the timer and stop it
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    respond(&state, Command::Reset, "Timer reset")
}

/// Handle POST /set - Load a duration from hours, minutes and seconds
pub async fn set_time_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetTimeRequest>,
) -> TimerResult {
    info!(
        "Set time requested: {}h {}m {}s",
        request.hours, request.minutes, request.seconds
    );
    respond(&state, request.into(), "Timer duration set")
}

/// Handle POST /increment - Add one second
pub async fn increment_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    respond(&state, Command::Increment, "Timer incremented")
}

/// Handle POST /decrement - Remove one second, stopping at zero
pub async fn decrement_handler(State(state): State<Arc<AppState>>) -> TimerResult {
    respond(&state, Command::Decrement, "Timer decremented")
}

/// Handle POST /command - Apply a tagged action; unknown actions leave the timer unchanged
pub async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(action): Json<ActionRequest>,
) -> TimerResult {
    match action.command() {
        Some(command) => respond(&state, command, "Command applied"),
        None => {
            warn!("Ignoring unrecognized action: {}", action.kind);
            match state.snapshot() {
                Ok(timer) => Ok(Json(TimerResponse::new("Unrecognized action ignored", timer))),
                Err(e) => {
                    error!("Failed to read timer state: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.last_action();

    Ok(Json(StatusResponse {
        ticker_armed: timer.ticker_armed(),
        timer: timer.into(),
        tick_interval_ms: state.tick_interval.as_millis() as u64,
        uptime: state.uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
