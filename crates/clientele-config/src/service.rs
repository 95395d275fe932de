use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DATABASE_URL: &str = "sqlite://clientele.db?mode=rwc";
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings for the clientele service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
  /// Socket address the HTTP server binds to.
  pub listen_addr: SocketAddr,

  /// SQLite connection URL, e.g. `sqlite://clientele.db?mode=rwc`
  /// or `sqlite::memory:`.
  pub database_url: String,

  /// `tracing` filter directive used when `RUST_LOG` is not set.
  pub log_filter: String,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      listen_addr: DEFAULT_LISTEN_ADDR
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080))),
      database_url: DEFAULT_DATABASE_URL.to_string(),
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    }
  }
}

impl ServiceConfig {
  /// Parse a configuration from a JSON string.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Load a configuration from a JSON file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&content)
  }
}
