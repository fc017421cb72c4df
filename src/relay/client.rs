//! Controller REST client.
//!
//! # Responsibilities
//! - Hold the immutable endpoint settings and one pooled HTTP client
//! - Issue exactly one request per call with Basic auth and JSON body
//! - Map transport failures and non-2xx statuses to `RelayError`
//!
//! No retries happen here; timeouts come from `TimeoutConfig`.

use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::config::{ControllerConfig, TimeoutConfig};
use crate::relay::manager::OperationContext;
use crate::relay::path::ResourcePath;
use crate::relay::{RelayError, RelayResult};

/// Header carrying the caller's request id to the controller.
pub const X_REQUEST_ID: &str = "x-request-id";

/// HTTP client bound to one controller endpoint.
#[derive(Debug, Clone)]
pub struct ControllerClient {
    client: Client,
    endpoint: ControllerConfig,
    base_url: Url,
}

impl ControllerClient {
    /// Build the client once; the endpoint never changes afterwards.
    pub fn new(endpoint: ControllerConfig, timeouts: &TimeoutConfig) -> RelayResult<Self> {
        let base_url = Url::parse(&endpoint.url_path).map_err(|e| RelayError::InvalidBaseUrl {
            url: endpoint.url_path.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RelayError::InvalidBaseUrl {
                url: endpoint.url_path.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        // The controller speaks HTTP/1.1 only; never negotiate h2 via ALPN.
        let client = Client::builder()
            .http1_only()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .user_agent(concat!("lbaas-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RelayError::ClientBuild)?;

        Ok(Self {
            client,
            endpoint,
            base_url,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.endpoint.namespace
    }

    pub fn base_url(&self) -> &str {
        &self.endpoint.url_path
    }

    /// Absolute URL for a resource path, segments percent-encoded.
    pub fn url_for(&self, path: &ResourcePath) -> Url {
        path.url(&self.base_url)
    }

    /// Send one request. Any 2xx is success; the response body is ignored.
    pub async fn send(
        &self,
        method: Method,
        path: &ResourcePath,
        body: Option<&Value>,
        ctx: &OperationContext,
    ) -> RelayResult<()> {
        let url = self.url_for(path);

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password))
            .header(X_REQUEST_ID, ctx.request_id.to_string());
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method = %method, url = %url, has_body = body.is_some(), "Sending request to controller");

        let response = request.send().await.map_err(|source| RelayError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(method = %method, url = %url, status = %status, "Controller accepted request");
            return Ok(());
        }

        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to read controller error body");
                String::new()
            }
        };

        Err(RelayError::RemoteRejected {
            method: method.to_string(),
            url: url.to_string(),
            status,
            body,
        })
    }
}
