use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rbd: RbdConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RbdConfig {
    /// Pools to query, in the order they should be scraped.
    #[serde(default)]
    pub pools: Vec<String>,
    #[serde(default = "default_program")]
    pub program: String,
    /// Upper bound on one `rbd mirror pool status` invocation. A pool whose
    /// query exceeds this reports an execution error for that scrape.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_seconds: u64,
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9876
}

fn default_program() -> String {
    "rbd".to_string()
}

fn default_command_timeout() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for RbdConfig {
    fn default() -> Self {
        Self {
            pools: Vec::new(),
            program: default_program(),
            command_timeout_seconds: default_command_timeout(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("RBD_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
