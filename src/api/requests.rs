//! API request structures and input coercion
//!
//! Duration fields come from free-text inputs, so anything that is not a
//! usable non-negative number becomes 0 instead of rejecting the request.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::state::Command;

/// Body of `POST /set`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SetTimeRequest {
    #[serde(default, deserialize_with = "lenient_count")]
    pub hours: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub minutes: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub seconds: u64,
}

impl From<SetTimeRequest> for Command {
    fn from(request: SetTimeRequest) -> Self {
        Command::SetTime {
            hours: request.hours,
            minutes: request.minutes,
            seconds: request.seconds,
        }
    }
}

/// Body of `POST /command`: a tagged action such as
/// `{"type": "SET_TIME", "payload": {"hours": 1}}`.
/// A missing or non-string `type` is accepted and resolves to no command.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "type", default)]
    pub kind: Value,
    #[serde(default)]
    pub payload: Value,
}

impl ActionRequest {
    /// Resolve the action to a command; `None` for unrecognized types
    pub fn command(&self) -> Option<Command> {
        let command = match self.kind.as_str()? {
            "START" => Command::Start,
            "STOP" => Command::Stop,
            "RESET" => Command::Reset,
            "TICK" => Command::Tick,
            "INCREMENT" => Command::Increment,
            "DECREMENT" => Command::Decrement,
            "SET_TIME" => {
                let request = match &self.payload {
                    Value::Object(_) => {
                        SetTimeRequest::deserialize(&self.payload).unwrap_or_default()
                    }
                    _ => SetTimeRequest::default(),
                };
                request.into()
            }
            _ => return None,
        };
        Some(command)
    }
}

/// Deserialize a count from a number, string or null, falling back to 0
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_count(&Value::deserialize(deserializer)?))
}

/// Coerce a JSON value to a non-negative count
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(text) => parse_count(text),
        _ => 0,
    }
}

/// Parse the leading digits of `text` ("12abc" is 12, "abc" is 0).
/// Negative input is 0 and oversized input saturates.
pub fn parse_count(text: &str) -> u64 {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);

    text.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}
