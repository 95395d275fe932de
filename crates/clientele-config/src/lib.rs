//! Clientele Config
//!
//! This crate contains the serializable configuration types for the clientele
//! service. Configuration is loaded from a JSON file and any value missing from
//! the file falls back to its default:
//!
//! ```json
//! {
//!   "listen_addr": "0.0.0.0:8080",
//!   "database_url": "sqlite://clientele.db?mode=rwc",
//!   "log_filter": "info,clientele_graphql=debug"
//! }
//! ```
//!
//! Command-line flags take precedence over file values; the binary applies
//! those overrides after loading.

mod error;
mod service;

pub use error::ConfigError;
pub use service::ServiceConfig;
