use std::env;
use std::error::Error;

use clap::Parser;
use padreader::cli::{main_cli, Args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::debug!("Starting padreader v{}", VERSION);

    let args = Args::parse();
    if let Err(e) = main_cli(args).await {
        log::error!("{e}");
        return Err(e);
    }

    Ok(())
}
