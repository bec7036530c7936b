//! Offline sources of input reports. Reports can be read from `hid-recorder`
//! captures or from plain hex dumps, one report per line.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Line prefixes emitted by `hid-recorder` that do not carry input reports
const SKIPPED_PREFIXES: [&str; 5] = ["D:", "R:", "N:", "P:", "I:"];

/// Represents all possible errors reading a capture
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Could not read: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid token on line {line}: '{token}'")]
    InvalidToken { line: usize, token: String },
    #[error("Length mismatch on line {line}: declared {declared} bytes, found {actual}")]
    LengthMismatch {
        line: usize,
        declared: usize,
        actual: usize,
    },
}

/// A single input report read from a capture
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEntry {
    /// Seconds since the start of the recording, if the capture has timestamps
    pub timestamp: Option<f64>,
    pub data: Vec<u8>,
}

/// Parse a single line of a capture. Returns `None` for lines that do not
/// contain an input report.
pub fn parse_line(number: usize, line: &str) -> Result<Option<CaptureEntry>, CaptureError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if SKIPPED_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
        return Ok(None);
    }

    // hid-recorder event: "E: <timestamp> <length> <bytes...>"
    if let Some(event) = line.strip_prefix("E:") {
        let mut tokens = event.split_whitespace();
        let timestamp = parse_token(number, tokens.next(), |t| t.parse::<f64>().ok())?;
        let declared = parse_token(number, tokens.next(), |t| t.parse::<usize>().ok())?;
        let data = tokens
            .map(|token| parse_byte(number, token))
            .collect::<Result<Vec<u8>, _>>()?;
        if data.len() != declared {
            return Err(CaptureError::LengthMismatch {
                line: number,
                declared,
                actual: data.len(),
            });
        }
        return Ok(Some(CaptureEntry {
            timestamp: Some(timestamp),
            data,
        }));
    }

    let data = if line.contains(char::is_whitespace) {
        line.split_whitespace()
            .map(|token| parse_byte(number, token))
            .collect::<Result<Vec<u8>, _>>()?
    } else {
        parse_hex(line).ok_or_else(|| CaptureError::InvalidToken {
            line: number,
            token: line.to_string(),
        })?
    };

    Ok(Some(CaptureEntry {
        timestamp: None,
        data,
    }))
}

/// Parse a contiguous hex string like "00140f" into bytes
pub fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 || !text.is_ascii() {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
        .collect()
}

/// Format bytes as space separated hex, e.g. "00 14 0f"
pub fn hex_string(data: &[u8]) -> String {
    data.iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_byte(line: usize, token: &str) -> Result<u8, CaptureError> {
    if token.len() > 2 {
        return Err(CaptureError::InvalidToken {
            line,
            token: token.to_string(),
        });
    }
    u8::from_str_radix(token, 16).map_err(|_| CaptureError::InvalidToken {
        line,
        token: token.to_string(),
    })
}

fn parse_token<T>(
    line: usize,
    token: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, CaptureError> {
    let token = token.unwrap_or_default();
    parse(token).ok_or_else(|| CaptureError::InvalidToken {
        line,
        token: token.to_string(),
    })
}

/// Streams [CaptureEntry] values out of a capture, line by line
pub struct CaptureReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: AsyncBufRead + Unpin> CaptureReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Returns the next input report, or `None` once the capture is exhausted
    pub async fn next_entry(&mut self) -> Result<Option<CaptureEntry>, CaptureError> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_number += 1;
            if let Some(entry) = parse_line(self.line_number, &line)? {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}

/// Read every input report from the given capture
pub async fn read_capture<R: AsyncBufRead + Unpin>(
    reader: R,
) -> Result<Vec<CaptureEntry>, CaptureError> {
    let mut reader = CaptureReader::new(reader);
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        entries.push(entry);
    }
    Ok(entries)
}
