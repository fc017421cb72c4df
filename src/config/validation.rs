//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the controller base URL and namespace
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("controller.url_path '{value}' is not a valid URL: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("controller.url_path scheme '{0}' is not http or https")]
    UnsupportedScheme(String),

    #[error("controller.namespace must not be empty")]
    EmptyNamespace,

    #[error("controller.namespace '{0}' must not start or end with '/'")]
    NamespaceSlash(String),

    #[error("controller.namespace '{0}' has an empty or relative segment")]
    NamespaceSegment(String),

    #[error("controller.username must not be empty")]
    EmptyUsername,

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.log_level '{0}' is not a valid filter")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let controller = &config.controller;

    match Url::parse(&controller.url_path) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
            }
        }
        Err(e) => errors.push(ValidationError::InvalidUrl {
            value: controller.url_path.clone(),
            reason: e.to_string(),
        }),
    }

    if controller.namespace.is_empty() {
        errors.push(ValidationError::EmptyNamespace);
    } else if controller.namespace.starts_with('/') || controller.namespace.ends_with('/') {
        errors.push(ValidationError::NamespaceSlash(controller.namespace.clone()));
    } else if controller
        .namespace
        .split('/')
        .any(|s| s.is_empty() || s == "." || s == "..")
    {
        errors.push(ValidationError::NamespaceSegment(controller.namespace.clone()));
    }

    if controller.username.is_empty() {
        errors.push(ValidationError::EmptyUsername);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    // Same directive the subscriber is built from.
    if tracing_subscriber::EnvFilter::try_new(config.observability.filter_directive()).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
