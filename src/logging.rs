use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Send tracing output to the log file. The terminal belongs to the UI.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .or_else(|_| EnvFilter::try_new("info"))
        .context("failed to initialize tracing filter")?;

    let path = config.log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context(format!("Failed to create log dir: {:?}", dir))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context(format!("Failed to open log file: {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
