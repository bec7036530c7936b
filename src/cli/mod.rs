pub mod output;
pub mod report;
#[cfg(test)]
pub mod report_test;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use report::{handle_decode, handle_replay};

use crate::config::{Config, LoadError, OutputFormat};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Output format, overrides the configuration file
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,
    /// Print the raw report bytes alongside the decoded state
    #[arg(long, global = true, overrides_with = "no_raw")]
    pub raw: bool,
    /// Do not print the raw report bytes
    #[arg(long, global = true, overrides_with = "raw")]
    pub no_raw: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Decode a single input report given as hex (e.g. "00 14 09 30 ...")
    Decode {
        /// Report bytes in hex
        report: String,
    },
    /// Decode every report in a capture file
    Replay {
        /// Path to a hid-recorder capture or hex dump. Reads stdin when omitted.
        path: Option<PathBuf>,
        /// Print only what changed between reports
        #[arg(short, long, overrides_with = "no_events")]
        events: bool,
        /// Print every full state
        #[arg(long, overrides_with = "events")]
        no_events: bool,
        /// Drop reports with an impossible D-pad reading
        #[arg(long, overrides_with = "no_skip_invalid")]
        skip_invalid: bool,
        /// Keep reports with an impossible D-pad reading
        #[arg(long, overrides_with = "skip_invalid")]
        no_skip_invalid: bool,
    },
}

impl Args {
    /// Load the configuration file, if any, and apply command line overrides
    pub fn load_config(&self) -> Result<Config, LoadError> {
        let mut config = match self.config.as_ref() {
            Some(path) => {
                log::debug!("Loading config from {path:?}");
                Config::from_yaml_path(path)?
            }
            None => Config::default(),
        };

        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(raw) = flag(self.raw, self.no_raw) {
            config.raw = raw;
        }
        if let Commands::Replay {
            events,
            no_events,
            skip_invalid,
            no_skip_invalid,
            ..
        } = &self.cmd
        {
            if let Some(events) = flag(*events, *no_events) {
                config.events = events;
            }
            if let Some(skip_invalid) = flag(*skip_invalid, *no_skip_invalid) {
                config.skip_invalid = skip_invalid;
            }
        }

        Ok(config)
    }
}

/// Resolve a `--flag` / `--no-flag` pair. `None` leaves the configured value.
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub async fn main_cli(args: Args) -> Result<(), Box<dyn Error>> {
    let config = args.load_config()?;
    log::debug!("Using config: {config:?}");

    match args.cmd {
        Commands::Decode { report } => handle_decode(&config, report)?,
        Commands::Replay { path, .. } => handle_replay(&config, path).await?,
    }

    Ok(())
}
