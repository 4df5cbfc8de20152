use crate::messages::{ActorRequest, ActorResponse, EventKindId, SubscriptionId};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Failure surfaced by the underlying channel. The proxy never retries; every
/// variant propagates to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
  #[error("transport failure: {0}")]
  Transport(String),
  #[error("remote fault: {0}")]
  RemoteFault(String),
  #[error("invocation cancelled")]
  Cancelled,
}

/// Connected endpoint capability to the process currently hosting an actor.
///
/// Implementations are supplied by the partition-client layer that resolves a
/// logical identity to a physical endpoint; this crate only calls through the
/// capability and never constructs or reconnects one.
#[async_trait]
pub trait ActorChannel: Debug + Send + Sync {
  /// Sends a request envelope and awaits the response envelope. Cancelling
  /// `cancellation` aborts the in-flight call.
  async fn invoke(&self, request: ActorRequest, cancellation: CancellationToken) -> Result<ActorResponse, ChannelError>;

  /// Registers `subscription_id` for event kind `event_kind` on the remote
  /// actor. The remote registration is idempotent.
  async fn subscribe(&self, event_kind: EventKindId, subscription_id: SubscriptionId) -> Result<(), ChannelError>;

  /// Removes the remote registration for `subscription_id`.
  async fn unsubscribe(&self, event_kind: EventKindId, subscription_id: SubscriptionId) -> Result<(), ChannelError>;
}
