//! Generic per-kind resource manager.
//!
//! One `ResourceManager<R>` replaces a family of near-identical managers:
//! the resource kind (names, path strategy) comes from `R::KIND`.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use reqwest::Method;
use serde_json::Value;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::observability::metrics;
use crate::relay::client::ControllerClient;
use crate::relay::path::ResourcePath;
use crate::relay::RelayResult;
use crate::resource::{envelope, LoadBalancerStats, Resource};

/// Lifecycle operation requested by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Refresh,
    Stats,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Refresh,
        Operation::Stats,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Refresh => "refresh",
            Operation::Stats => "stats",
        }
    }

    /// HTTP method for operations that reach the controller.
    pub fn method(self) -> Option<Method> {
        match self {
            Operation::Create => Some(Method::POST),
            Operation::Update => Some(Method::PUT),
            Operation::Delete => Some(Method::DELETE),
            Operation::Refresh | Operation::Stats => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation '{0}' (expected create, update, delete, refresh or stats)")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Per-call context handed in by the orchestration framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    /// Correlates the relay's logs with the controller's.
    pub request_id: Uuid,
    pub project_id: Option<String>,
}

impl OperationContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            project_id: None,
        }
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully resolved controller request, before it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRequest {
    pub method: Method,
    pub path: ResourcePath,
    pub body: Option<Value>,
}

/// Relays lifecycle operations for one resource kind.
pub struct ResourceManager<R> {
    client: Arc<ControllerClient>,
    _kind: PhantomData<fn(&R)>,
}

impl<R> Clone for ResourceManager<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _kind: PhantomData,
        }
    }
}

impl<R: Resource> ResourceManager<R> {
    pub fn new(client: Arc<ControllerClient>) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    /// Resolve method, path and body without touching the network.
    ///
    /// Returns `None` for operations that never reach the controller.
    pub fn plan(&self, operation: Operation, obj: &R) -> RelayResult<Option<PlannedRequest>> {
        let Some(method) = operation.method() else {
            return Ok(None);
        };

        let namespace = self.client.namespace();
        let path = match operation {
            Operation::Create => ResourcePath::collection(namespace, R::KIND, obj.pool_id())?,
            _ => ResourcePath::entity(namespace, R::KIND, obj.pool_id(), obj.id())?,
        };
        let body = match operation {
            Operation::Delete => None,
            _ => Some(envelope(obj)?),
        };

        Ok(Some(PlannedRequest { method, path, body }))
    }

    /// Absolute URL a planned request targets.
    pub fn url_for(&self, planned: &PlannedRequest) -> Url {
        self.client.url_for(&planned.path)
    }

    /// POST `{ns}/{plural}` with `{singular: fields}`.
    pub async fn create(&self, ctx: &OperationContext, obj: &R) -> RelayResult<()> {
        self.relay(Operation::Create, ctx, obj).await
    }

    /// PUT `{ns}/{plural}/{id}` with `{singular: fields}`.
    pub async fn update(&self, ctx: &OperationContext, obj: &R) -> RelayResult<()> {
        self.relay(Operation::Update, ctx, obj).await
    }

    /// DELETE `{ns}/{plural}/{id}` with no body.
    pub async fn delete(&self, ctx: &OperationContext, obj: &R) -> RelayResult<()> {
        self.relay(Operation::Delete, ctx, obj).await
    }

    /// Reconcile the controller with the framework's view of `obj`.
    ///
    /// Not implemented: succeeds without contacting the controller. The
    /// reconciliation policy needs product input before it can be written.
    pub async fn refresh(&self, ctx: &OperationContext, obj: &R) -> RelayResult<()> {
        self.instrumented(Operation::Refresh, ctx, obj.id(), async {
            tracing::debug!("refresh is not implemented for this driver, skipping");
            Ok(())
        })
        .await
    }

    /// Fetch runtime statistics for `obj`.
    ///
    /// Not implemented: always `Ok(None)`, nothing is sent.
    pub async fn stats(
        &self,
        ctx: &OperationContext,
        obj: &R,
    ) -> RelayResult<Option<LoadBalancerStats>> {
        self.instrumented(Operation::Stats, ctx, obj.id(), async {
            tracing::debug!("stats is not implemented for this driver, skipping");
            Ok(None)
        })
        .await
    }

    async fn relay(&self, operation: Operation, ctx: &OperationContext, obj: &R) -> RelayResult<()> {
        self.instrumented(operation, ctx, obj.id(), async {
            match self.plan(operation, obj)? {
                Some(planned) => {
                    self.client
                        .send(planned.method, &planned.path, planned.body.as_ref(), ctx)
                        .await
                }
                None => Ok(()),
            }
        })
        .await
    }

    /// Span, outcome log and metrics around one operation.
    async fn instrumented<T, F>(
        &self,
        operation: Operation,
        ctx: &OperationContext,
        id: &str,
        fut: F,
    ) -> RelayResult<T>
    where
        F: Future<Output = RelayResult<T>>,
    {
        let kind = R::KIND;
        let span = tracing::info_span!(
            "relay",
            kind = %kind,
            operation = operation.as_str(),
            id = %id,
            request_id = %ctx.request_id,
            project_id = ctx.project_id.as_deref().unwrap_or(""),
        );

        let start = Instant::now();
        let result = fut.instrument(span.clone()).await;
        let elapsed = start.elapsed();

        span.in_scope(|| match &result {
            Ok(_) => {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "Relay operation succeeded");
                metrics::record_operation(kind, operation, "success", elapsed);
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Relay operation failed"
                );
                metrics::record_operation(kind, operation, e.label(), elapsed);
            }
        });

        result
    }
}
