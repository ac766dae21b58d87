//! Server settings read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use vitis_core::{DEFAULT_BASE_URL, FetchConfig, Result, VitisConfig, VitisError};

/// Settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (`VITIS_ADDR`).
    pub addr: SocketAddr,
    /// Data source endpoint (`VITIS_BASE_URL`).
    pub base_url: String,
    /// Upstream fetch timeout in seconds (`VITIS_TIMEOUT`).
    pub fetch_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_timeout: FetchConfig::default().timeout,
        }
    }
}

impl ServerConfig {
    /// Reads settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("VITIS_ADDR") {
            config.addr = addr
                .parse()
                .map_err(|e| VitisError::ConfigError(format!("VITIS_ADDR={}: {}", addr, e)))?;
        }

        if let Some(base_url) = lookup("VITIS_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(timeout) = lookup("VITIS_TIMEOUT") {
            config.fetch_timeout = timeout
                .parse()
                .map_err(|e| VitisError::ConfigError(format!("VITIS_TIMEOUT={}: {}", timeout, e)))?;
        }

        Ok(config)
    }

    /// Overall request budget: the upstream fetch plus headroom for extraction.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout + 5)
    }

    /// Client settings derived from these server settings.
    pub fn vitis(&self) -> VitisConfig {
        VitisConfig {
            base_url: self.base_url.clone(),
            fetch: FetchConfig { timeout: self.fetch_timeout, ..Default::default() },
            ..Default::default()
        }
    }
}
