use std::path::PathBuf;

use tracing::trace;

use crate::scheduler::DEFAULT_INTERVAL_MS;

const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Listening port for the management API
    #[serde(default = "default_port")]
    pub port: u16,

    /// Time between two probes of the same target, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Per-probe HTTP timeout, in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// File holding the persisted target list (JSON array of URLs)
    #[serde(default = "default_targets_file")]
    pub targets_file: PathBuf,

    /// Optional directory with static UI files to serve at /
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            interval_ms: default_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            targets_file: default_targets_file(),
            static_dir: None,
        }
    }
}

impl Config {
    /// Listening port, with the `PORT` environment variable taking precedence
    /// over the config file
    pub fn listen_port(&self) -> u16 {
        let port_from_env = std::env::var(PORT_ENV);
        port_from_env.map_or(self.port, |res| res.parse().unwrap_or(self.port))
    }
}

fn default_port() -> u16 {
    3000
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_probe_timeout_ms() -> u64 {
    10_000
}

fn default_targets_file() -> PathBuf {
    PathBuf::from("endpoints.json")
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
