//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// Timer fields as rendered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub total_seconds: u64,
    pub running: bool,
    /// `HH:MM:SS`, each field zero-padded to two digits
    pub display: String,
}

impl From<TimerState> for TimerView {
    fn from(state: TimerState) -> Self {
        Self {
            hours: state.hours,
            minutes: state.minutes,
            seconds: state.seconds,
            total_seconds: state.total_seconds,
            running: state.running,
            display: state.display(),
        }
    }
}

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl TimerResponse {
    /// Create a response whose status reflects the running flag
    pub fn new(message: impl Into<String>, state: TimerState) -> Self {
        let status = if state.running { "running" } else { "stopped" };
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer: state.into(),
        }
    }
}

/// Status response with ticker and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub ticker_armed: bool,
    pub tick_interval_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
