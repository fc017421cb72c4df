//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable by `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - A bad filter is an error, never a silent fallback

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directives}': {source}")]
    Filter {
        directives: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Build the filter from `RUST_LOG` when set, otherwise from config.
pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter, LoggingError> {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok(), config)
}

fn filter_from(
    env_directives: Option<String>,
    config: &ObservabilityConfig,
) -> Result<EnvFilter, LoggingError> {
    let directives = env_directives.unwrap_or_else(|| config.filter_directive());
    EnvFilter::try_new(&directives).map_err(|source| LoggingError::Filter { directives, source })
}

/// Install the global tracing subscriber.
///
/// Fails on an unparsable filter or if a subscriber was already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(env_filter(config)?);

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()?,
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
    }
    Ok(())
}
