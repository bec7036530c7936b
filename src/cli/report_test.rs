use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::report::{replay, ReplaySummary};
use crate::cli::Args;
use crate::config::{Config, OutputFormat};

// Neutral, impossible D-pad (Up + Down), truncated, A pressed
const CAPTURE: &str = "\
00 14 00 00 00 00 00 00 00 00 00 00 00 00 00 00
00 14 03 00 00 00 00 00 00 00 00 00 00 00 00 00
00 14 09
00 14 00 10 00 00 00 00 00 00 00 00 00 00 00 00
";

async fn replay_to_string(config: &Config) -> Result<(ReplaySummary, String), Box<dyn Error>> {
    let mut out = Vec::new();
    let summary = replay(config, CAPTURE.as_bytes(), &mut out).await?;
    Ok((summary, String::from_utf8(out)?))
}

fn write_config(name: &str, content: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!("padreader-{}-{name}.yaml", std::process::id()));
    std::fs::write(&path, content)?;
    Ok(path)
}

#[tokio::test]
async fn test_replay_keeps_invalid_dpad() -> Result<(), Box<dyn Error>> {
    let (summary, output) = replay_to_string(&Config::default()).await?;
    println!("{output}");
    assert_eq!(
        summary,
        ReplaySummary {
            decoded: 3,
            skipped: 1
        },
        "only the truncated report should be skipped"
    );
    assert_eq!(output.matches("D-Pad: Invalid").count(), 1);
    assert_eq!(output.matches("Buttons pressed: A").count(), 1);
    assert_eq!(output.matches("D-Pad:").count(), 3);

    Ok(())
}

#[tokio::test]
async fn test_replay_skip_invalid() -> Result<(), Box<dyn Error>> {
    let config = Config {
        skip_invalid: true,
        ..Default::default()
    };
    let (summary, output) = replay_to_string(&config).await?;
    assert_eq!(
        summary,
        ReplaySummary {
            decoded: 2,
            skipped: 2
        }
    );
    assert!(!output.contains("Invalid"));
    assert_eq!(output.matches("D-Pad: Neutral").count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_replay_events() -> Result<(), Box<dyn Error>> {
    let config = Config {
        events: true,
        ..Default::default()
    };
    let (_, output) = replay_to_string(&config).await?;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec!["D-Pad: Invalid", "A pressed", "D-Pad: Neutral"]);

    let config = Config {
        events: true,
        skip_invalid: true,
        format: OutputFormat::Json,
        ..Default::default()
    };
    let (summary, output) = replay_to_string(&config).await?;
    assert_eq!(summary.skipped, 2);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1, "only the A press should be reported");
    let value: serde_json::Value = serde_json::from_str(lines[0])?;
    assert_eq!(value["event"]["button"]["A"]["pressed"], true);

    Ok(())
}

#[tokio::test]
async fn test_replay_raw_bytes() -> Result<(), Box<dyn Error>> {
    let config = Config {
        raw: true,
        skip_invalid: true,
        ..Default::default()
    };
    let (_, output) = replay_to_string(&config).await?;
    assert!(output.contains("Raw data: 00 14 00 10 00 00 00 00 00 00 00 00 00 00 00 00"));

    Ok(())
}

#[test]
fn test_flags_without_config_file() {
    let args = Args::try_parse_from(["padreader", "replay", "-e", "--skip-invalid"])
        .expect("should parse");
    let config = args.load_config().expect("should load");
    assert!(config.events);
    assert!(config.skip_invalid);
    assert!(!config.raw);
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn test_flags_override_config_file() -> Result<(), Box<dyn Error>> {
    let path = write_config(
        "override",
        "format: json\nevents: true\nraw: true\nskip_invalid: true\n",
    )?;
    let config_path = path.to_string_lossy().to_string();
    let config_path = config_path.as_str();

    // File values apply when no flags are given
    let args = Args::try_parse_from(["padreader", "--config", config_path, "replay"])?;
    let config = args.load_config()?;
    assert_eq!(config.format, OutputFormat::Json);
    assert!(config.events && config.raw && config.skip_invalid);

    // Flags can turn file options off as well as on
    let args = Args::try_parse_from([
        "padreader",
        "--config",
        config_path,
        "replay",
        "--no-events",
        "--no-raw",
        "-f",
        "text",
    ])?;
    let config = args.load_config()?;
    assert_eq!(config.format, OutputFormat::Text);
    assert!(!config.events);
    assert!(!config.raw);
    assert!(config.skip_invalid, "untouched options keep the file value");

    // The last of a flag pair wins
    let args = Args::try_parse_from([
        "padreader",
        "--config",
        config_path,
        "replay",
        "--no-skip-invalid",
        "--skip-invalid",
        "--events",
        "--no-events",
    ])?;
    let config = args.load_config()?;
    assert!(config.skip_invalid);
    assert!(!config.events);

    std::fs::remove_file(path)?;

    Ok(())
}
