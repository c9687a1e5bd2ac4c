//! Timer state and the reducer that drives it
//!
//! `TimerState` is a plain value. Every command produces a new value through
//! [`TimerState::apply`]; nothing here performs I/O or can fail.

use std::fmt;

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Commands accepted by the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    /// Load a duration. The display fields keep the raw inputs until the
    /// next tick, increment or decrement recomputes them.
    SetTime { hours: u64, minutes: u64, seconds: u64 },
    Tick,
    Increment,
    Decrement,
}

impl Command {
    /// Short action name used for logging and last-action tracking
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Reset => "reset",
            Command::SetTime { .. } => "set-time",
            Command::Tick => "tick",
            Command::Increment => "increment",
            Command::Decrement => "decrement",
        }
    }
}

/// Snapshot of the countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerState {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub running: bool,
    /// Canonical duration; the display fields are derived from it
    pub total_seconds: u64,
}

impl TimerState {
    /// Create a stopped timer at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopped timer holding `total_seconds`
    pub fn from_total(total_seconds: u64) -> Self {
        Self::new().with_total(total_seconds)
    }

    /// Apply a command and return the resulting state
    pub fn apply(self, command: Command) -> Self {
        match command {
            Command::Start => Self { running: true, ..self },
            Command::Stop => Self { running: false, ..self },
            Command::Reset => Self::new(),
            Command::SetTime { hours, minutes, seconds } => Self {
                hours,
                minutes,
                seconds,
                total_seconds: total_of(hours, minutes, seconds),
                ..self
            },
            Command::Tick => {
                if !self.running || self.total_seconds == 0 {
                    return self;
                }
                self.with_total(self.total_seconds - 1)
            }
            Command::Increment => self.with_total(self.total_seconds.saturating_add(1)),
            Command::Decrement => match self.total_seconds.checked_sub(1) {
                Some(total) => self.with_total(total),
                None => self,
            },
        }
    }

    /// Whether the once-per-period ticker should exist for this state.
    ///
    /// Looks at the display fields rather than `total_seconds`, so a timer
    /// that ticked down to zero while running leaves the ticker released.
    pub fn ticker_armed(&self) -> bool {
        self.running && (self.hours > 0 || self.minutes > 0 || self.seconds > 0)
    }

    /// Check that the display fields are the decomposition of `total_seconds`
    pub fn is_normalized(&self) -> bool {
        decompose(self.total_seconds) == (self.hours, self.minutes, self.seconds)
    }

    /// `HH:MM:SS` rendering of the display fields
    pub fn display(&self) -> String {
        self.to_string()
    }

    fn with_total(self, total_seconds: u64) -> Self {
        let (hours, minutes, seconds) = decompose(total_seconds);
        Self {
            hours,
            minutes,
            seconds,
            total_seconds,
            ..self
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Apply `command` to `state`
pub fn apply(state: TimerState, command: Command) -> TimerState {
    state.apply(command)
}

/// Split a second count into hours, minutes and seconds
pub fn decompose(total_seconds: u64) -> (u64, u64, u64) {
    (
        total_seconds / SECONDS_PER_HOUR,
        (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        total_seconds % SECONDS_PER_MINUTE,
    )
}

fn total_of(hours: u64, minutes: u64, seconds: u64) -> u64 {
    hours
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(seconds)
}
