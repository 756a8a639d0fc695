//! Router configuration
//!
//! Every field has a sensible default so a config file only needs to name
//! what it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::hubs::DEFAULT_MAX_HUBS;

/// Configuration for the route optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base URL of an OSRM-compatible routing service
    pub osrm_base_url: String,

    /// OSRM routing profile
    pub profile: String,

    /// Overall timeout for a single routing query, in milliseconds
    pub request_timeout_ms: u64,

    /// Connection timeout for the routing service, in milliseconds
    pub connect_timeout_ms: u64,

    /// Maximum number of intermediate hubs inserted into a route
    pub max_hubs: usize,

    /// Upper bound on routing queries in flight during a matrix build
    pub max_concurrent_requests: usize,

    /// User agent sent to the routing service
    pub user_agent: String,

    /// Skip live routing entirely and use geometric estimates
    pub offline: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            osrm_base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            request_timeout_ms: 5_000,
            connect_timeout_ms: 3_000,
            max_hubs: DEFAULT_MAX_HUBS,
            max_concurrent_requests: default_concurrency(),
            user_agent: format!("carbon-route/{}", env!("CARBON_ROUTE_VERSION")),
            offline: false,
        }
    }
}

impl RouterConfig {
    /// Load a JSON configuration file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: RouterConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the optimizer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_ms == 0 {
            return Err(Error::ConfigError("request_timeout_ms must be at least 1".to_string()));
        }
        if self.max_concurrent_requests == 0 {
            return Err(Error::ConfigError("max_concurrent_requests must be at least 1".to_string()));
        }
        if !self.offline && !self.osrm_base_url.starts_with("http") {
            return Err(Error::ConfigError(format!(
                "osrm_base_url must be an http(s) URL, got '{}'",
                self.osrm_base_url
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Default fan-out for pairwise routing queries
fn default_concurrency() -> usize {
    (num_cpus::get() * 2).max(1)
}
