//! Common types and utilities shared across Scout crates.
//!
//! This crate defines configuration, observability helpers, and shared error
//! types used throughout the Scout workspace. It is intentionally lightweight
//! and dependency‑minimal so that all crates can depend on it without
//! introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`ScoutConfig`]: Top‑level runtime configuration
//! - [`DemoSiteConfig`]: Fixed demo site and credentials for the login probe
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`ScoutError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! Constructing a default configuration:
//!
//! ```rust
//! use scout_common::ScoutConfig;
//!
//! let cfg = ScoutConfig::default();
//! assert_eq!(cfg.wait_timeout_secs, 10);
//! assert_eq!(cfg.heading_tags, vec!["h1", "h2", "h3"]);
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Configuration for Scout operations.
///
/// This structure is passed to the driver layer and the CLI entrypoint to
/// configure runtime behavior. Every field has a serde default so a partial
/// YAML file (or none at all) still yields a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// WebDriver endpoint to connect to (Chromedriver by default).
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    /// Whether to run the browser without a visible window.
    #[serde(default)]
    pub headless: bool,
    /// Bound applied to every page-readiness and element wait, in seconds.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
    /// Ordered heading tags tried in sequence until one is found.
    #[serde(default = "default_heading_tags")]
    pub heading_tags: Vec<String>,
    /// Preferred output format for rendered results.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Demo site used by the login probe and the didactic flows.
    #[serde(default)]
    pub demo: DemoSiteConfig,
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_wait_timeout_secs() -> u64 {
    10
}

fn default_heading_tags() -> Vec<String> {
    vec!["h1".to_string(), "h2".to_string(), "h3".to_string()]
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            wait_timeout_secs: default_wait_timeout_secs(),
            heading_tags: default_heading_tags(),
            output_format: OutputFormat::default(),
            demo: DemoSiteConfig::default(),
        }
    }
}

/// The fixed demo login page the flows and probe run against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSiteConfig {
    #[serde(default = "default_demo_base_url")]
    pub base_url: String,
    #[serde(default = "default_demo_username")]
    pub username: String,
    #[serde(default = "default_demo_password")]
    pub password: String,
}

fn default_demo_base_url() -> String {
    "https://the-internet.herokuapp.com".to_string()
}

fn default_demo_username() -> String {
    "tomsmith".to_string()
}

fn default_demo_password() -> String {
    "SuperSecretPassword!".to_string()
}

impl Default for DemoSiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_demo_base_url(),
            username: default_demo_username(),
            password: default_demo_password(),
        }
    }
}

/// Preferred output format for reports and exports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Error types used across the Scout system.
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    /// A driver (browser, WebDriver endpoint) reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation exceeded the configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`ScoutError`].
pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_constants() {
        let cfg = ScoutConfig::default();
        assert_eq!(cfg.webdriver_url, "http://localhost:9515");
        assert_eq!(cfg.wait_timeout_secs, 10);
        assert_eq!(cfg.heading_tags, vec!["h1", "h2", "h3"]);
        assert!(!cfg.headless);
        assert_eq!(cfg.output_format, OutputFormat::Json);
    }

    #[test]
    fn partial_yaml_style_json_fills_defaults() {
        let cfg: ScoutConfig = serde_json::from_str(r#"{"headless": true}"#).unwrap();
        assert!(cfg.headless);
        assert_eq!(cfg.wait_timeout_secs, 10);
        assert_eq!(cfg.demo.username, "tomsmith");
    }
}
