use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // HTTP configuration
    /// Webhook listener host
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// Webhook listener port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    // Decoder catalog configuration
    /// Directory holding one catalog entry per application identifier
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: String,

    /// Require `received_at` on every uplink (earliest wire revision only)
    #[serde(default = "default_require_received_at")]
    pub require_received_at: bool,

    /// Honor the deprecated `properties.decoder_name` override location
    #[serde(default = "default_honor_legacy_override")]
    pub honor_legacy_override: bool,

    /// Upper bound on a single decode invocation in milliseconds
    #[serde(default = "default_decode_timeout_ms")]
    pub decode_timeout_ms: u64,

    // Metrics configuration
    /// Interval for the process-level runtime metrics collector in seconds
    #[serde(default = "default_process_metrics_interval_secs")]
    pub process_metrics_interval_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

// HTTP defaults
fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    3001
}

// Catalog defaults
fn default_catalog_dir() -> String {
    "catalog".to_string()
}

fn default_require_received_at() -> bool {
    false
}

fn default_honor_legacy_override() -> bool {
    true
}

fn default_decode_timeout_ms() -> u64 {
    2000
}

// Metrics defaults
fn default_process_metrics_interval_secs() -> u64 {
    10
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("UPLINK"))
            .build()?
            .try_deserialize()
    }
}
