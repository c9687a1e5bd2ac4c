//! Main application state management

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{decompose, Command, StateError, TimerState};

/// Dispatcher that owns the live timer state and publishes every transition
#[derive(Debug)]
pub struct AppState {
    /// Current timer state, replaced wholesale on every command
    timer_state: Mutex<TimerState>,
    /// Ticker period used by the scheduler task
    pub tick_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last user action tracking (ticks are not recorded)
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer updates
    timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with a stopped timer at zero
    pub fn new(port: u16, host: String, tick_interval: Duration) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        Self {
            timer_state: Mutex::new(TimerState::new()),
            tick_interval,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a command to the current state and publish the result
    pub fn dispatch(&self, command: Command) -> Result<TimerState, StateError> {
        self.dispatch_with(|_| command)
    }

    /// Pick a command from the current state and apply it under the same lock
    pub fn dispatch_with<F>(&self, choose: F) -> Result<TimerState, StateError>
    where
        F: FnOnce(&TimerState) -> Command,
    {
        let mut timer_state = self.timer_state.lock()
            .map_err(|_| StateError::Poisoned("timer state"))?;

        let previous = *timer_state;
        let command = choose(&previous);
        let next = previous.apply(command);
        *timer_state = next;

        // Publish and record under the lock so watchers and last-action
        // follow the same order as the transitions
        self.timer_update_tx.send_replace(next);
        if command != Command::Tick {
            self.record_action(command.name());
        }
        drop(timer_state);

        if command == Command::Tick {
            debug!("Tick: {} -> {}", previous, next);
        } else {
            info!(
                "Applied {}: {} -> {} (running={})",
                command.name(), previous, next, next.running
            );
        }

        Ok(next)
    }

    /// Get current timer state
    pub fn snapshot(&self) -> Result<TimerState, StateError> {
        self.timer_state.lock()
            .map(|state| *state)
            .map_err(|_| StateError::Poisoned("timer state"))
    }

    /// Subscribe to timer updates; the receiver starts at the current state
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn uptime(&self) -> String {
        let (hours, minutes, seconds) = decompose(self.start_time.elapsed().as_secs());

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), Duration::from_secs(1))
    }

    #[test]
    fn test_dispatch_replaces_state() {
        let state = test_state();
        let next = state
            .dispatch(Command::SetTime { hours: 0, minutes: 1, seconds: 5 })
            .unwrap();
        assert_eq!(next.total_seconds, 65);
        assert_eq!(state.snapshot().unwrap(), next);
    }

    #[test]
    fn test_dispatch_publishes_to_subscribers() {
        let state = test_state();
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap());

        state.dispatch(Command::Increment).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_seconds, 1);
    }

    #[test]
    fn test_dispatch_with_sees_current_state() {
        let state = test_state();
        let toggle = |s: &TimerState| if s.running { Command::Stop } else { Command::Start };

        assert!(state.dispatch_with(toggle).unwrap().running);
        assert!(!state.dispatch_with(toggle).unwrap().running);
    }

    #[test]
    fn test_last_action_skips_ticks() {
        let state = test_state();
        assert_eq!(state.last_action(), (None, None));

        state.dispatch(Command::SetTime { hours: 0, minutes: 0, seconds: 3 }).unwrap();
        state.dispatch(Command::Start).unwrap();
        state.dispatch(Command::Tick).unwrap();

        let (action, time) = state.last_action();
        assert_eq!(action.as_deref(), Some("start"));
        assert!(time.is_some());
        assert_eq!(state.snapshot().unwrap().total_seconds, 2);
    }

    #[test]
    fn test_last_action_matches_final_transition_under_contention() {
        let state = std::sync::Arc::new(test_state());

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let state = std::sync::Arc::clone(&state);
                std::thread::spawn(move || {
                    for j in 0..200 {
                        let command = if (i + j) % 2 == 0 { Command::Start } else { Command::Stop };
                        state.dispatch(command).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let running = state.snapshot().unwrap().running;
        let (action, _) = state.last_action();
        assert_eq!(action.as_deref(), Some(if running { "start" } else { "stop" }));
    }

    #[test]
    fn test_uptime_starts_in_seconds() {
        let uptime = test_state().uptime();
        assert!(uptime.ends_with('s'));
        assert!(!uptime.contains('m'));
    }
}
