use std::error::Error;

use crate::config::{Config, LoadError, OutputFormat};

#[tokio::test]
async fn test_load_config() -> Result<(), Box<dyn Error>> {
    let content = "\
format: json
events: true
skip_invalid: true
";
    let config = Config::from_yaml(content.to_string())?;
    assert_eq!(config.format, OutputFormat::Json);
    assert!(config.events);
    assert!(!config.raw, "missing fields should use their defaults");
    assert!(config.skip_invalid);

    Ok(())
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_yaml("{}".to_string()).expect("should load");
    assert_eq!(config, Config::default());
    assert_eq!(config.format, OutputFormat::Text);
}

#[test]
fn test_invalid_config() {
    let result = Config::from_yaml("format: xml".to_string());
    assert!(matches!(result, Err(LoadError::DeserializeError(_))));

    let result = Config::from_yaml_path("/nonexistent/padreader.yaml");
    assert!(matches!(result, Err(LoadError::IoError(_))));
}
