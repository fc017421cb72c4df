//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! Types are deserialize-only: the config carries credentials and is never
//! written back out.

use serde::Deserialize;
use std::fmt;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Remote controller endpoint and credentials.
    pub controller: ControllerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote SDN controller endpoint.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Base URL of the controller REST API (e.g., "http://ctrl:8181/onos/v1").
    pub url_path: String,

    /// Basic auth username.
    pub username: String,

    /// Basic auth password.
    pub password: String,

    /// Path prefix for load-balancing resources on the controller.
    pub namespace: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            url_path: "http://127.0.0.1:8181/onos/v1".to_string(),
            username: "onos".to_string(),
            password: "rocks".to_string(),
            namespace: "lbaas".to_string(),
        }
    }
}

// Credentials must never reach the logs.
impl fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("url_path", &self.url_path)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Timeouts applied to every controller request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty output for development, JSON for production.
    pub log_format: LogFormat,
}

impl ObservabilityConfig {
    /// Filter directive built from `log_level`.
    ///
    /// A bare level applies to this crate only; anything containing `=` or
    /// `,` is taken as a full directive list.
    pub fn filter_directive(&self) -> String {
        if self.log_level.contains(['=', ',']) {
            self.log_level.clone()
        } else {
            format!("lbaas_relay={}", self.log_level)
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
