use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // HTTP configuration
    /// HTTP server bind host
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    // Device push configuration
    /// Device-advertised control URL for outbound push; empty disables
    /// the push transport (persistent channel only)
    #[serde(default = "default_device_push_url")]
    pub device_push_url: String,

    /// Outbound push timeout in seconds
    #[serde(default = "default_push_timeout_secs")]
    pub push_timeout_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    10000
}

fn default_device_push_url() -> String {
    String::new()
}

fn default_push_timeout_secs() -> u64 {
    5
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("GASGUARD"))
            .build()?
            .try_deserialize()
    }

    /// Push URL as an option: empty string means "not configured".
    pub fn push_url(&self) -> Option<&str> {
        if self.device_push_url.trim().is_empty() {
            None
        } else {
            Some(self.device_push_url.trim())
        }
    }
}
