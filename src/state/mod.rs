//! State management module
//! 
//! This module contains the timer reducer and the dispatcher that owns the live state.

pub mod app_state;
pub mod error;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use error::StateError;
pub use timer_state::{apply, decompose, Command, TimerState};
