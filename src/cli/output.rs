use std::error::Error;

use serde::Serialize;

use crate::capture::hex_string;
use crate::config::{Config, OutputFormat};
use crate::drivers::usb_gamepad::{event::Event, GamepadState};

/// A decoded report as printed in JSON output
#[derive(Debug, Serialize)]
struct StateRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
    state: &'a GamepadState,
}

/// A change event as printed in JSON output
#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<f64>,
    event: &'a Event,
}

/// Render a decoded report according to the configured output format
pub fn format_state(
    config: &Config,
    timestamp: Option<f64>,
    data: &[u8],
    state: &GamepadState,
) -> Result<String, Box<dyn Error>> {
    let raw = config.raw.then(|| hex_string(data));
    let text = match config.format {
        OutputFormat::Json => serde_json::to_string(&StateRecord {
            timestamp,
            raw,
            state,
        })?,
        OutputFormat::Text => {
            let mut lines = Vec::new();
            if let Some(timestamp) = timestamp {
                lines.push(format!("Time: {timestamp:.6}"));
            }
            if let Some(raw) = raw {
                lines.push(format!("Raw data: {raw}"));
            }
            lines.push(state.to_string());
            lines.push("-".repeat(60));
            lines.join("\n")
        }
    };
    Ok(text)
}

/// Render a change event according to the configured output format
pub fn format_event(
    config: &Config,
    timestamp: Option<f64>,
    event: &Event,
) -> Result<String, Box<dyn Error>> {
    let text = match config.format {
        OutputFormat::Json => serde_json::to_string(&EventRecord { timestamp, event })?,
        OutputFormat::Text => match timestamp {
            Some(timestamp) => format!("[{timestamp:.6}] {event}"),
            None => event.to_string(),
        },
    };
    Ok(text)
}
