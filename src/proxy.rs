
use crate::binding::ProtocolBinding;
use crate::call_context::CallContext;
use crate::channel::ChannelError;
use crate::config::ClientConfig;
use crate::identity::ActorId;
use crate::messages::{ActorRequest, ActorRequestHeaders};
use crate::subscriber_manager::{ActorEventSubscriber, EventSubscriberManager, SubscriptionInfo};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
  #[error(transparent)]
  Channel(#[from] ChannelError),
  #[error("one-way invocation is not supported by the legacy actor proxy")]
  OneWayUnsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
  #[error(transparent)]
  Channel(#[from] ChannelError),
}

/// Proxy to a remote actor addressed by a stable logical identity.
///
/// The proxy routes method invocations through the protocol stack it was bound
/// to at construction and keeps event subscriptions alive across transient
/// connectivity failures. Argument serialization and physical endpoint lookup
/// are supplied by collaborators carried in the [`ProtocolBinding`]; the proxy
/// never retries a failed channel call on its own.
#[derive(Debug, Clone)]
pub struct ActorProxy {
  actor_id: ActorId,
  binding: ProtocolBinding,
  subscriber_manager: Arc<EventSubscriberManager>,
  config: ClientConfig,
}

impl ActorProxy {
  pub fn new(
    actor_id: ActorId,
    binding: ProtocolBinding,
    subscriber_manager: Arc<EventSubscriberManager>,
    config: ClientConfig,
  ) -> Self {
    ActorProxy {
      actor_id,
      binding,
      subscriber_manager,
      config,
    }
  }

  pub fn actor_id(&self) -> &ActorId {
    &self.actor_id
  }

  pub fn binding(&self) -> &ProtocolBinding {
    &self.binding
  }

  pub fn subscriber_manager(&self) -> Arc<EventSubscriberManager> {
    self.subscriber_manager.clone()
  }

  /// Two-way invocation of `method_id` on `interface_id` with an encoded
  /// request body. The ambient call context is captured here and attached to
  /// the outgoing envelope. Channel failures propagate unchanged.
  pub async fn invoke(
    &self,
    interface_id: i32,
    method_id: i32,
    body: Vec<u8>,
    cancellation: CancellationToken,
  ) -> Result<Vec<u8>, InvokeError> {
    let headers = ActorRequestHeaders {
      actor_id: self.actor_id.clone(),
      interface_id,
      method_id,
      call_context: CallContext::capture(),
    };
    let request = ActorRequest { headers, body };
    let response = self.binding.channel().invoke(request, cancellation).await?;
    Ok(response.body)
  }

  /// One-way send with no response expected.
  ///
  /// The legacy stack has no defined semantics for one-way delivery to a
  /// stateful actor (that path belongs to the event-proxy variant) and fails
  /// loudly. The current stack accepts and discards the send without touching
  /// the channel, because its remote target has no server-push ack path for
  /// service-directed calls.
  pub fn invoke_one_way(&self, interface_id: i32, method_id: i32, body: Vec<u8>) -> Result<(), InvokeError> {
    match &self.binding {
      ProtocolBinding::Legacy { .. } => Err(InvokeError::OneWayUnsupported),
      ProtocolBinding::Current { .. } => {
        tracing::debug!(
          actor_id = %self.actor_id,
          interface_id,
          method_id,
          discarded_bytes = body.len(),
          "one-way send discarded"
        );
        Ok(())
      }
    }
  }

  /// Registers `subscriber` for its event kind on the remote actor.
  ///
  /// On success a detached background task re-issues the subscription every
  /// `resubscription_interval` (the configured default when `None`) until the
  /// registration is deactivated by [`ActorProxy::unsubscribe`]. On failure
  /// the just-created registration is rolled back best-effort and the original
  /// subscribe error is returned; rollback errors are swallowed.
  pub async fn subscribe(
    &self,
    subscriber: Arc<dyn ActorEventSubscriber>,
    resubscription_interval: Option<Duration>,
  ) -> Result<(), SubscribeError> {
    let interval = match resubscription_interval {
      Some(interval) => interval,
      None => self.config.get_default_resubscription_interval().await,
    };
    let info = self.subscriber_manager.register(&self.actor_id, subscriber.clone());

    if let Err(err) = self.binding.channel().subscribe(info.event_kind(), info.id()).await {
      if let Err(rollback_err) = self.unsubscribe(subscriber).await {
        tracing::debug!(
          actor_id = %self.actor_id,
          subscription_id = %info.id(),
          error = %rollback_err,
          "subscription rollback failed"
        );
      }
      return Err(SubscribeError::Channel(err));
    }

    self.spawn_resubscription_loop(info, interval);
    Ok(())
  }

  /// Deactivates and removes the registration for `subscriber`, then tears
  /// down the server-side subscription. Unknown registrations are a no-op
  /// success and issue no channel call.
  pub async fn unsubscribe(&self, subscriber: Arc<dyn ActorEventSubscriber>) -> Result<(), SubscribeError> {
    match self.subscriber_manager.try_unregister(&self.actor_id, subscriber) {
      Some(info) => {
        self.binding.channel().unsubscribe(info.event_kind(), info.id()).await?;
        Ok(())
      }
      None => Ok(()),
    }
  }

  /// Best-effort keep-alive against a best-effort remote registration: the
  /// loop wakes every `interval`, exits once the record is inactive, and
  /// otherwise re-issues the idempotent subscribe, swallowing any failure.
  fn spawn_resubscription_loop(&self, info: Arc<SubscriptionInfo>, interval: Duration) {
    let channel = self.binding.channel().clone();
    let actor_id = self.actor_id.clone();
    tokio::spawn(async move {
      loop {
        tokio::time::sleep(interval).await;
        if !info.is_active() {
          break;
        }
        if let Err(err) = channel.subscribe(info.event_kind(), info.id()).await {
          tracing::debug!(
            actor_id = %actor_id,
            subscription_id = %info.id(),
            error = %err,
            "resubscribe attempt failed"
          );
        }
      }
      tracing::debug!(
        actor_id = %actor_id,
        subscription_id = %info.id(),
        "resubscription loop terminated"
      );
    });
  }
}
