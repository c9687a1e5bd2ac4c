//! Error types for the timer dispatcher

use thiserror::Error;

/// Errors raised while dispatching commands or reading shared state.
///
/// The reducer itself is infallible; only the shared-state plumbing around it can fail.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to lock {0}: lock poisoned")]
    Poisoned(&'static str),
}
