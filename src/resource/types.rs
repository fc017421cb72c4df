//! Resource snapshots in the shape the controller expects.
//!
//! Field names follow the LBaaS v2 API dictionaries. Optional attributes
//! serialize as `null` so the controller always sees the full mapping.

use serde::{Deserialize, Serialize};

/// Reference to another resource by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntityRef {
    pub id: String,
}

impl From<&str> for EntityRef {
    fn from(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

fn default_true() -> bool {
    true
}

/// A load balancer with its VIP.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoadBalancer {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vip_subnet_id: Option<String>,
    #[serde(default)]
    pub vip_port_id: Option<String>,
    #[serde(default)]
    pub vip_address: Option<String>,
    #[serde(default)]
    pub provisioning_status: Option<String>,
    #[serde(default)]
    pub operating_status: Option<String>,
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
    #[serde(default)]
    pub listeners: Vec<EntityRef>,
    #[serde(default)]
    pub pools: Vec<EntityRef>,
    #[serde(default)]
    pub provider: Option<String>,
}

impl Default for LoadBalancer {
    fn default() -> Self {
        Self {
            id: String::new(),
            tenant_id: None,
            name: None,
            description: None,
            vip_subnet_id: None,
            vip_port_id: None,
            vip_address: None,
            provisioning_status: None,
            operating_status: None,
            admin_state_up: true,
            listeners: Vec::new(),
            pools: Vec::new(),
            provider: None,
        }
    }
}

/// A listener (protocol + port) attached to load balancers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Listener {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub protocol_port: u16,
    /// -1 means unlimited.
    #[serde(default = "default_connection_limit")]
    pub connection_limit: i64,
    #[serde(default)]
    pub default_pool_id: Option<String>,
    #[serde(default)]
    pub default_tls_container_ref: Option<String>,
    #[serde(default)]
    pub sni_container_refs: Vec<String>,
    #[serde(default)]
    pub loadbalancers: Vec<EntityRef>,
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
}

fn default_connection_limit() -> i64 {
    -1
}

impl Default for Listener {
    fn default() -> Self {
        Self {
            id: String::new(),
            tenant_id: None,
            name: None,
            description: None,
            protocol: String::new(),
            protocol_port: 0,
            connection_limit: default_connection_limit(),
            default_pool_id: None,
            default_tls_container_ref: None,
            sni_container_refs: Vec::new(),
            loadbalancers: Vec::new(),
            admin_state_up: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionPersistence {
    #[serde(rename = "type")]
    pub persistence_type: String,
    #[serde(default)]
    pub cookie_name: Option<String>,
}

/// A pool of members behind a listener.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Pool {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub lb_algorithm: String,
    #[serde(default)]
    pub healthmonitor_id: Option<String>,
    #[serde(default)]
    pub session_persistence: Option<SessionPersistence>,
    #[serde(default)]
    pub listeners: Vec<EntityRef>,
    #[serde(default)]
    pub loadbalancers: Vec<EntityRef>,
    #[serde(default)]
    pub members: Vec<EntityRef>,
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            id: String::new(),
            tenant_id: None,
            name: None,
            description: None,
            protocol: String::new(),
            lb_algorithm: String::new(),
            healthmonitor_id: None,
            session_persistence: None,
            listeners: Vec::new(),
            loadbalancers: Vec::new(),
            members: Vec::new(),
            admin_state_up: true,
        }
    }
}

/// A backend server inside a pool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Member {
    pub id: String,
    pub pool_id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub protocol_port: u16,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub subnet_id: Option<String>,
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
}

fn default_weight() -> u32 {
    1
}

impl Default for Member {
    fn default() -> Self {
        Self {
            id: String::new(),
            pool_id: String::new(),
            tenant_id: None,
            name: None,
            address: String::new(),
            protocol_port: 0,
            weight: default_weight(),
            subnet_id: None,
            admin_state_up: true,
        }
    }
}

/// Health check attached to pools.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthMonitor {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// PING, TCP, HTTP or HTTPS.
    #[serde(rename = "type", default)]
    pub monitor_type: String,
    #[serde(default)]
    pub delay: u32,
    #[serde(default)]
    pub timeout: u32,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub url_path: Option<String>,
    #[serde(default)]
    pub expected_codes: Option<String>,
    #[serde(default)]
    pub pools: Vec<EntityRef>,
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self {
            id: String::new(),
            tenant_id: None,
            name: None,
            monitor_type: String::new(),
            delay: 0,
            timeout: 0,
            max_retries: 0,
            http_method: None,
            url_path: None,
            expected_codes: None,
            pools: Vec::new(),
            admin_state_up: true,
        }
    }
}

/// Runtime counters a load balancer reports.
///
/// Nothing fills this in yet; see `ResourceManager::stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoadBalancerStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub active_connections: u64,
    pub total_connections: u64,
}
