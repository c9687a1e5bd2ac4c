//! Countdown Timer - A countdown timer state machine driven over HTTP
//! 
//! The core is a pure reducer over `TimerState`. An `AppState` dispatcher owns
//! the live state, a background ticker counts it down while it runs, and an
//! HTTP API feeds it commands and renders the display.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Command, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
