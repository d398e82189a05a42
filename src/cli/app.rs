use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use super::context::CliContext;
use super::dispatch::dispatch;
use super::env::CliArgs;
use super::runtime::{init_logging, load_config, LoadedConfig};

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let loaded_config = load_config(cli.config.as_ref()).await?;
    let _log_guard = init_logging(
        &cli.log_level,
        cli.debug,
        loaded_config.config.logging.file.as_deref(),
    )?;

    info!("Starting jobpilot v{}", env!("CARGO_PKG_VERSION"));
    loaded_config.report();

    let LoadedConfig { config, path, .. } = loaded_config;
    let cli_context = CliContext::new(config, path);

    match dispatch(&cli, &cli_context).await {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(err) => {
            error!(config = %cli_context.config_path().display(), "Command failed: {}", err);
            Err(err)
        }
    }
}
