use std::fs::{self as stdfs, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Install the console subscriber, plus a file layer when `log_file` is set.
///
/// Console output goes to stderr so command output on stdout stays parseable.
/// The returned guard must live until exit or buffered file lines are lost.
pub fn init_logging(level: &str, debug: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                stdfs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    pub found: bool,
}

impl LoadedConfig {
    /// Log where settings came from; called once logging is up.
    pub fn report(&self) {
        if self.found {
            info!("Loaded configuration from: {}", self.path.display());
        } else {
            warn!(
                "Config file not found, using defaults: {}",
                self.path.display()
            );
        }
    }
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => {
            // Priority: ./config/config.yaml > ~/.config/jobpilot/config.yaml
            let local_config = PathBuf::from("config/config.yaml");
            if local_config.exists() {
                local_config
            } else {
                let mut path = dirs::config_dir().context("Failed to get config directory")?;
                path.push("jobpilot");
                path.push("config.yaml");
                path
            }
        }
    };

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .await
            .context("Failed to read config file")?;

        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content).context("Failed to parse config file")?
        };

        Ok(LoadedConfig {
            config,
            path: config_path,
            found: true,
        })
    } else {
        Ok(LoadedConfig {
            config: Config::default(),
            path: config_path,
            found: false,
        })
    }
}
