//! Relay error definitions.

use reqwest::StatusCode;
use thiserror::Error;

use crate::resource::ResourceKind;

/// Errors surfaced to the caller of a relay operation.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Connection refused, DNS failure, timeout or broken response.
    #[error("Transport error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Controller answered with a non-2xx status.
    #[error("Controller rejected {method} {url} with status {status}: {body}")]
    RemoteRejected {
        method: String,
        url: String,
        status: StatusCode,
        body: String,
    },

    /// Resource could not be converted to its JSON form.
    #[error("Failed to serialize {kind}: {source}")]
    Serialization {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },

    /// A path segment was missing or malformed.
    #[error("Cannot build path for {kind}: {reason}")]
    InvalidPath {
        kind: ResourceKind,
        reason: String,
    },

    /// Controller base URL is unusable.
    #[error("Invalid controller base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP client could not be constructed from config.
    #[error("Failed to build controller client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl RelayError {
    /// True for connection-level failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, RelayError::Transport { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RelayError::Transport { source, .. } if source.is_timeout())
    }

    /// Status returned by the controller, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RelayError::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RelayError::Transport { .. } => "transport_error",
            RelayError::RemoteRejected { .. } => "remote_rejected",
            RelayError::Serialization { .. } => "serialization_error",
            RelayError::InvalidPath { .. } => "invalid_path",
            RelayError::InvalidBaseUrl { .. } => "invalid_base_url",
            RelayError::ClientBuild(_) => "client_build_error",
        }
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
