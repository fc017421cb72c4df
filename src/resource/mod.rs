//! Resource data model.
//!
//! The orchestration framework owns these objects. The relay only receives
//! a snapshot, serializes it and forgets it.

pub mod kind;
pub mod types;

use serde::Serialize;

use crate::relay::{RelayError, RelayResult};

pub use kind::{PathStrategy, ResourceKind};
pub use types::{
    EntityRef, HealthMonitor, Listener, LoadBalancer, LoadBalancerStats, Member, Pool,
    SessionPersistence,
};

/// A load-balancing resource the relay can push to the controller.
pub trait Resource: Serialize + Send + Sync {
    /// Which collection this resource belongs to.
    const KIND: ResourceKind;

    /// Resource identifier.
    fn id(&self) -> &str;

    /// Owning pool, for kinds that only exist inside a pool.
    fn pool_id(&self) -> Option<&str> {
        None
    }

    /// JSON attribute mapping sent to the controller.
    fn to_api_dict(&self) -> RelayResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|source| RelayError::Serialization {
            kind: Self::KIND,
            source,
        })
    }
}

/// Wrap a resource in its single-key envelope: `{singular(kind): fields}`.
pub fn envelope<R: Resource>(resource: &R) -> RelayResult<serde_json::Value> {
    let mut body = serde_json::Map::with_capacity(1);
    body.insert(R::KIND.singular().to_string(), resource.to_api_dict()?);
    Ok(serde_json::Value::Object(body))
}

impl Resource for LoadBalancer {
    const KIND: ResourceKind = ResourceKind::LoadBalancer;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Listener {
    const KIND: ResourceKind = ResourceKind::Listener;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Pool {
    const KIND: ResourceKind = ResourceKind::Pool;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Member {
    const KIND: ResourceKind = ResourceKind::Member;

    fn id(&self) -> &str {
        &self.id
    }

    fn pool_id(&self) -> Option<&str> {
        Some(&self.pool_id)
    }
}

impl Resource for HealthMonitor {
    const KIND: ResourceKind = ResourceKind::HealthMonitor;

    fn id(&self) -> &str {
        &self.id
    }
}
