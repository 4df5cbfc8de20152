use crate::call_context::CallContext;
use crate::identity::ActorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire id of an event interface exposed by a remote actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventKindId(pub i32);

impl fmt::Display for EventKindId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Registry-assigned subscription record id, sent to the server so both sides
/// name the same standing registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Routing metadata carried by every outgoing invocation envelope.
///
/// `interface_id` and `method_id` are the opaque method-address integers
/// produced by the generated proxy layer; the call context is captured at the
/// call boundary and attached here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRequestHeaders {
  pub actor_id: ActorId,
  pub interface_id: i32,
  pub method_id: i32,
  pub call_context: CallContext,
}

/// Request envelope: routing headers plus the codec-produced body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorRequest {
  pub headers: ActorRequestHeaders,
  pub body: Vec<u8>,
}

/// Response envelope returned by the channel. The body is decoded by the
/// codec collaborator of the generated proxy layer, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorResponse {
  pub body: Vec<u8>,
}
