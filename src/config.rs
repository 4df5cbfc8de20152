use crate::config_option::ConfigOption;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug)]
struct ClientConfigInner {
  default_resubscription_interval: Duration,
}

/// Client-side proxy configuration, shared by every proxy created from the
/// same factory.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  inner: Arc<Mutex<ClientConfigInner>>,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      inner: Arc::new(Mutex::new(ClientConfigInner {
        default_resubscription_interval: Duration::from_secs(20),
      })),
    }
  }
}

impl ClientConfig {
  pub async fn from(options: impl IntoIterator<Item = ConfigOption>) -> ClientConfig {
    let mut config = ClientConfig::default();
    for option in options {
      option.apply(&mut config).await;
    }
    config
  }

  pub async fn get_default_resubscription_interval(&self) -> Duration {
    let mg = self.inner.lock().await;
    mg.default_resubscription_interval
  }

  pub async fn set_default_resubscription_interval(&mut self, interval: Duration) {
    let mut mg = self.inner.lock().await;
    mg.default_resubscription_interval = interval;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn options_override_the_defaults() {
    let config = ClientConfig::from([ConfigOption::with_default_resubscription_interval(Duration::from_secs(5))]).await;
    assert_eq!(
      config.get_default_resubscription_interval().await,
      Duration::from_secs(5)
    );
  }

  #[tokio::test]
  async fn default_interval_is_twenty_seconds() {
    let config = ClientConfig::default();
    assert_eq!(
      config.get_default_resubscription_interval().await,
      Duration::from_secs(20)
    );
  }
}
