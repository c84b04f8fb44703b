use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "DOCKDECK_CONFIG";

const MAX_TASK_WORKERS: usize = 8;

/// Settings from config.yaml. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between periodic list refreshes
    pub refresh_interval_secs: u64,
    /// Concurrent task queue workers
    pub task_workers: usize,
    /// Docker endpoint (`unix://...`, `tcp://...`); local defaults when unset
    pub docker_host: Option<String>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5,
            task_workers: 2,
            docker_host: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load from `$DOCKDECK_CONFIG` or the user config dir; defaults when no file exists
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        Self::load_from(&path)
    }

    /// Load a config from a YAML file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config: {:?}", path.as_ref()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty file is a valid, all-default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        Ok(config)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn task_workers(&self) -> usize {
        self.task_workers.clamp(1, MAX_TASK_WORKERS)
    }

    /// Configured log file, or `dockdeck.log` in the user cache dir
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("dockdeck")
                .join("dockdeck.log")
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dockdeck").join("config.yaml"))
}
