use crate::channel::ActorChannel;
use std::fmt::Debug;
use std::sync::Arc;

/// Per-interface serializer collaborator of the legacy wire stack. Consumed by
/// the generated proxy layer; this crate only carries it alongside the legacy
/// channel.
pub trait MessageCodec: Debug + Send + Sync {
  fn encode_request(&self, interface_id: i32, value: &[u8]) -> Vec<u8>;
  fn decode_response(&self, interface_id: i32, body: &[u8]) -> Vec<u8>;
}

/// Request-body factory collaborator of the current wire stack, the
/// counterpart of [`MessageCodec`] for the newer protocol.
pub trait MessageBodyFactory: Debug + Send + Sync {
  fn create_request_body(&self, value: &[u8]) -> Vec<u8>;
}

/// Wire-protocol stack a proxy instance is bound to.
///
/// The binding is chosen once at proxy construction and never switched; each
/// variant carries exactly the channel and serialization collaborator of its
/// stack, so a proxy with a populated channel that mismatches its binding is
/// unrepresentable. The two stacks are not interoperable, but the subscription
/// lifecycle runs over the shared [`ActorChannel`] capability either way.
#[derive(Debug, Clone)]
pub enum ProtocolBinding {
  Legacy {
    channel: Arc<dyn ActorChannel>,
    codec: Arc<dyn MessageCodec>,
  },
  Current {
    channel: Arc<dyn ActorChannel>,
    body_factory: Arc<dyn MessageBodyFactory>,
  },
}

impl ProtocolBinding {
  pub fn legacy(channel: Arc<dyn ActorChannel>, codec: Arc<dyn MessageCodec>) -> Self {
    ProtocolBinding::Legacy { channel, codec }
  }

  pub fn current(channel: Arc<dyn ActorChannel>, body_factory: Arc<dyn MessageBodyFactory>) -> Self {
    ProtocolBinding::Current { channel, body_factory }
  }

  pub fn channel(&self) -> &Arc<dyn ActorChannel> {
    match self {
      ProtocolBinding::Legacy { channel, .. } => channel,
      ProtocolBinding::Current { channel, .. } => channel,
    }
  }

  pub fn is_legacy(&self) -> bool {
    matches!(self, ProtocolBinding::Legacy { .. })
  }

  pub fn codec(&self) -> Option<&Arc<dyn MessageCodec>> {
    match self {
      ProtocolBinding::Legacy { codec, .. } => Some(codec),
      ProtocolBinding::Current { .. } => None,
    }
  }

  pub fn body_factory(&self) -> Option<&Arc<dyn MessageBodyFactory>> {
    match self {
      ProtocolBinding::Legacy { .. } => None,
      ProtocolBinding::Current { body_factory, .. } => Some(body_factory),
    }
  }
}
