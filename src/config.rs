//! Configuration Module
//!
//! Handles loading plugin session configuration from environment variables.

use std::env;

/// Plugin session configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name the plugin reports to the host
    pub display_name: String,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Whether session log messages are also written to the host log
    pub echo_to_host_log: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PLUGIN_DISPLAY_NAME` - Display name (default: "VoiceAttack Proxy")
    /// - `PLUGIN_LOG_FILTER` - Tracing filter (default: "voiceattack_proxy=info")
    /// - `PLUGIN_ECHO_TO_HOST_LOG` - Mirror log messages to the host (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            display_name: env::var("PLUGIN_DISPLAY_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.display_name),
            log_filter: env::var("PLUGIN_LOG_FILTER")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_filter),
            echo_to_host_log: env::var("PLUGIN_ECHO_TO_HOST_LOG")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.echo_to_host_log),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_name: "VoiceAttack Proxy".to_string(),
            log_filter: "voiceattack_proxy=info".to_string(),
            echo_to_host_log: true,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
