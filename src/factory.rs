use crate::binding::ProtocolBinding;
use crate::config::ClientConfig;
use crate::identity::ActorId;
use crate::proxy::ActorProxy;
use crate::subscriber_manager::EventSubscriberManager;
use std::sync::Arc;

/// Creates [`ActorProxy`] instances that share one subscription registry and
/// one configuration. Construct a factory once at process start and inject it
/// wherever proxies are needed; the registry lives as long as the factory.
#[derive(Debug, Clone)]
pub struct ActorProxyFactory {
  subscriber_manager: Arc<EventSubscriberManager>,
  config: ClientConfig,
}

impl Default for ActorProxyFactory {
  fn default() -> Self {
    Self::new(ClientConfig::default())
  }
}

impl ActorProxyFactory {
  pub fn new(config: ClientConfig) -> Self {
    ActorProxyFactory {
      subscriber_manager: Arc::new(EventSubscriberManager::new()),
      config,
    }
  }

  pub fn subscriber_manager(&self) -> Arc<EventSubscriberManager> {
    self.subscriber_manager.clone()
  }

  pub fn config(&self) -> ClientConfig {
    self.config.clone()
  }

  pub fn create_proxy(&self, actor_id: ActorId, binding: ProtocolBinding) -> ActorProxy {
    ActorProxy::new(actor_id, binding, self.subscriber_manager.clone(), self.config.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn proxies_from_one_factory_share_the_registry() {
    let factory = ActorProxyFactory::default();
    let manager = factory.subscriber_manager();

    assert!(Arc::ptr_eq(&manager, &factory.subscriber_manager()));
    assert!(manager.is_empty());
  }
}
