use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, BufReader};

use crate::capture::{parse_line, CaptureReader};
use crate::config::Config;
use crate::drivers::usb_gamepad::{decode, driver::Driver};

use super::output::{format_event, format_state};

/// Number of reports printed and dropped during a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub decoded: usize,
    pub skipped: usize,
}

/// Decode a single report given on the command line
pub fn handle_decode(config: &Config, report: String) -> Result<(), Box<dyn Error>> {
    let Some(entry) = parse_line(1, &report)? else {
        return Err("No report data given".into());
    };
    let state = decode(&entry.data)?;
    println!("{}", format_state(config, None, &entry.data, &state)?);

    Ok(())
}

/// Decode every report in a capture file, or stdin if no path is given
pub async fn handle_replay(config: &Config, path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let mut out = std::io::stdout();
    let summary = match path {
        Some(path) => {
            log::debug!("Replaying capture {path:?}");
            let file = File::open(path).await?;
            replay(config, BufReader::new(file), &mut out).await?
        }
        None => {
            log::debug!("Replaying capture from stdin");
            replay(config, BufReader::new(io::stdin()), &mut out).await?
        }
    };
    log::info!(
        "Decoded {} reports ({} skipped)",
        summary.decoded,
        summary.skipped
    );

    Ok(())
}

/// Decode every report from the reader and write the rendered output. Truncated
/// reports are always skipped; reports with an impossible D-pad reading are
/// skipped when `skip_invalid` is set.
pub async fn replay<R, W>(
    config: &Config,
    reader: R,
    out: &mut W,
) -> Result<ReplaySummary, Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut reader = CaptureReader::new(reader);
    let mut driver = Driver::new();
    let mut summary = ReplaySummary::default();

    while let Some(entry) = reader.next_entry().await? {
        let state = match decode(&entry.data) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Skipping report: {e}");
                summary.skipped += 1;
                continue;
            }
        };
        if config.skip_invalid && !state.dpad.is_valid() {
            log::debug!("Skipping report with invalid D-pad state");
            summary.skipped += 1;
            continue;
        }
        summary.decoded += 1;

        if !config.events {
            writeln!(
                out,
                "{}",
                format_state(config, entry.timestamp, &entry.data, &state)?
            )?;
            continue;
        }

        let events = driver.handle_input_report(&entry.data)?;
        for event in events.iter() {
            writeln!(out, "{}", format_event(config, entry.timestamp, event)?)?;
        }
    }

    Ok(summary)
}
