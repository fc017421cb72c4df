//! The driver entry point the orchestration framework talks to.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::relay::client::ControllerClient;
use crate::relay::manager::ResourceManager;
use crate::relay::RelayResult;
use crate::resource::{HealthMonitor, Listener, LoadBalancer, Member, Pool};

/// One manager per resource kind, all sharing a single controller client.
#[derive(Clone)]
pub struct LbaasDriver {
    pub load_balancer: ResourceManager<LoadBalancer>,
    pub listener: ResourceManager<Listener>,
    pub pool: ResourceManager<Pool>,
    pub member: ResourceManager<Member>,
    pub health_monitor: ResourceManager<HealthMonitor>,
    client: Arc<ControllerClient>,
}

impl LbaasDriver {
    pub fn new(config: &RelayConfig) -> RelayResult<Self> {
        let client = Arc::new(ControllerClient::new(
            config.controller.clone(),
            &config.timeouts,
        )?);

        tracing::info!(
            url_path = %config.controller.url_path,
            namespace = %config.controller.namespace,
            username = %config.controller.username,
            "Initializing LBaaS relay driver"
        );

        Ok(Self {
            load_balancer: ResourceManager::new(client.clone()),
            listener: ResourceManager::new(client.clone()),
            pool: ResourceManager::new(client.clone()),
            member: ResourceManager::new(client.clone()),
            health_monitor: ResourceManager::new(client.clone()),
            client,
        })
    }

    pub fn client(&self) -> &ControllerClient {
        &self.client
    }
}
