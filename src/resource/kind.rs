//! Resource kinds and their naming on the controller.

use std::fmt;
use std::str::FromStr;

/// The five load-balancing resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    LoadBalancer,
    Listener,
    Pool,
    Member,
    HealthMonitor,
}

/// How a kind's collection path is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStrategy {
    /// `{ns}/{plural}`
    TopLevel,
    /// `{ns}/pools/{pool_id}/{plural}`
    PoolScoped,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::LoadBalancer,
        ResourceKind::Listener,
        ResourceKind::Pool,
        ResourceKind::Member,
        ResourceKind::HealthMonitor,
    ];

    /// Collection name on the controller.
    pub const fn plural(self) -> &'static str {
        match self {
            ResourceKind::LoadBalancer => "loadbalancers",
            ResourceKind::Listener => "listeners",
            ResourceKind::Pool => "pools",
            ResourceKind::Member => "members",
            ResourceKind::HealthMonitor => "healthmonitors",
        }
    }

    /// Body key: the collection name without its trailing `s`.
    pub const fn singular(self) -> &'static str {
        match self {
            ResourceKind::LoadBalancer => "loadbalancer",
            ResourceKind::Listener => "listener",
            ResourceKind::Pool => "pool",
            ResourceKind::Member => "member",
            ResourceKind::HealthMonitor => "healthmonitor",
        }
    }

    pub const fn path_strategy(self) -> PathStrategy {
        match self {
            ResourceKind::Member => PathStrategy::PoolScoped,
            _ => PathStrategy::TopLevel,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace(['-', '_'], "");
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.singular() == normalized || k.plural() == normalized)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
