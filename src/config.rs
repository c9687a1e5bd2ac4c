//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::state::Command;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer state machine driven over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Ticker period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Preset hours loaded at startup
    #[arg(long)]
    pub hours: Option<u64>,

    /// Preset minutes loaded at startup
    #[arg(long)]
    pub minutes: Option<u64>,

    /// Preset seconds loaded at startup
    #[arg(long)]
    pub seconds: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Startup duration as a `SetTime` command, if any preset field was given
    pub fn preset(&self) -> Option<Command> {
        if self.hours.is_none() && self.minutes.is_none() && self.seconds.is_none() {
            return None;
        }
        Some(Command::SetTime {
            hours: self.hours.unwrap_or(0),
            minutes: self.minutes.unwrap_or(0),
            seconds: self.seconds.unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["countdown-timer"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.preset(), None);
    }

    #[test]
    fn test_partial_preset_fills_zeroes() {
        let config = Config::try_parse_from(["countdown-timer", "--minutes", "25", "-v"]).unwrap();
        assert_eq!(
            config.preset(),
            Some(Command::SetTime { hours: 0, minutes: 25, seconds: 0 })
        );
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_zero_tick_period_rejected() {
        assert!(Config::try_parse_from(["countdown-timer", "--tick-ms", "0"]).is_err());
    }
}
