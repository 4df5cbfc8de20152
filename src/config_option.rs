use crate::config::ClientConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum ConfigOption {
  SetDefaultResubscriptionInterval(Duration),
}

impl ConfigOption {
  pub async fn apply(&self, config: &mut ClientConfig) {
    match self {
      ConfigOption::SetDefaultResubscriptionInterval(interval) => {
        config.set_default_resubscription_interval(*interval).await;
      }
    }
  }

  pub fn with_default_resubscription_interval(interval: Duration) -> ConfigOption {
    ConfigOption::SetDefaultResubscriptionInterval(interval)
  }
}
