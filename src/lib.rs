mod binding;
mod call_context;
mod channel;
mod config;
mod config_option;
mod factory;
mod identity;
mod messages;
mod proxy;
mod subscriber_manager;

pub use crate::binding::{MessageBodyFactory, MessageCodec, ProtocolBinding};
pub use crate::call_context::CallContext;
pub use crate::channel::{ActorChannel, ChannelError};
pub use crate::config::ClientConfig;
pub use crate::config_option::ConfigOption;
pub use crate::factory::ActorProxyFactory;
pub use crate::identity::ActorId;
pub use crate::messages::{ActorRequest, ActorRequestHeaders, ActorResponse, EventKindId, SubscriptionId};
pub use crate::proxy::{ActorProxy, InvokeError, SubscribeError};
pub use crate::subscriber_manager::{ActorEventSubscriber, EventSubscriberManager, SubscriberKey, SubscriptionInfo};
