//! LBaaS relay library.
//!
//! Relays load-balancer lifecycle events (load balancers, listeners, pools,
//! members, health monitors) to a remote SDN controller over REST.

pub mod config;
pub mod observability;
pub mod relay;
pub mod resource;

pub use config::schema::RelayConfig;
pub use relay::{LbaasDriver, OperationContext, RelayError, RelayResult, ResourceManager};
pub use resource::{Resource, ResourceKind};
