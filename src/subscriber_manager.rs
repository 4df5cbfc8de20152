use crate::identity::ActorId;
use crate::messages::{EventKindId, SubscriptionId};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SUBSCRIPTION_ID: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

fn next_subscription_id() -> SubscriptionId {
  SubscriptionId(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::SeqCst))
}

/// Local recipient of events pushed by a remote actor. Delivery itself happens
/// outside this crate; the trait only gives the registry a typed handle and
/// the event kind the subscriber listens to.
pub trait ActorEventSubscriber: Debug + Send + Sync {
  fn event_kind(&self) -> EventKindId;
  fn handle_event(&self, payload: Vec<u8>);
}

/// Registry key wrapper comparing subscribers by pointer identity. Two clones
/// of the same `Arc` are the same subscriber; two separately allocated
/// subscribers are always distinct, whatever their contents.
#[derive(Debug, Clone)]
pub struct SubscriberKey {
  value: Arc<dyn ActorEventSubscriber>,
}

impl SubscriberKey {
  pub fn new(value: Arc<dyn ActorEventSubscriber>) -> Self {
    SubscriberKey { value }
  }

  pub fn subscriber(&self) -> Arc<dyn ActorEventSubscriber> {
    self.value.clone()
  }

  fn addr(&self) -> *const () {
    Arc::as_ptr(&self.value) as *const ()
  }
}

impl PartialEq for SubscriberKey {
  fn eq(&self, other: &Self) -> bool {
    std::ptr::eq(self.addr(), other.addr())
  }
}

impl Eq for SubscriberKey {}

impl Hash for SubscriberKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.addr().hash(state)
  }
}

/// Registry record for one (actor, event kind, subscriber) tuple.
///
/// The active flag transitions true to false exactly once, on deregistration,
/// and never back: a later register call creates a brand-new record with a
/// fresh id. The background resubscription loop holds a clone of the `Arc` and
/// uses the flag as its only termination signal.
#[derive(Debug)]
pub struct SubscriptionInfo {
  id: SubscriptionId,
  event_kind: EventKindId,
  subscriber: SubscriberKey,
  active: AtomicBool,
}

impl SubscriptionInfo {
  fn new(event_kind: EventKindId, subscriber: SubscriberKey) -> Self {
    SubscriptionInfo {
      id: next_subscription_id(),
      event_kind,
      subscriber,
      active: AtomicBool::new(true),
    }
  }

  pub fn id(&self) -> SubscriptionId {
    self.id
  }

  pub fn event_kind(&self) -> EventKindId {
    self.event_kind
  }

  pub fn subscriber(&self) -> Arc<dyn ActorEventSubscriber> {
    self.subscriber.subscriber()
  }

  pub fn is_active(&self) -> bool {
    self.active.load(Ordering::SeqCst)
  }

  fn deactivate(&self) {
    self.active.store(false, Ordering::SeqCst);
  }
}

type SubscriptionKey = (ActorId, EventKindId, SubscriberKey);

/// Process-wide table of active event subscriptions.
///
/// Construct one per process (usually through
/// [`ActorProxyFactory`](crate::factory::ActorProxyFactory)) and share it
/// across proxies. All mutation goes through the internally synchronized map,
/// which guarantees at most one active record per key at any instant even
/// under concurrent register/unregister from multiple proxies.
#[derive(Debug, Default)]
pub struct EventSubscriberManager {
  subscriptions: DashMap<SubscriptionKey, Arc<SubscriptionInfo>>,
}

impl EventSubscriberManager {
  pub fn new() -> Self {
    EventSubscriberManager {
      subscriptions: DashMap::new(),
    }
  }

  /// Registers the (actor, event kind, subscriber) tuple. Returns the existing
  /// record when one is still registered for the same subscriber, otherwise
  /// inserts a fresh active record.
  pub fn register(&self, actor_id: &ActorId, subscriber: Arc<dyn ActorEventSubscriber>) -> Arc<SubscriptionInfo> {
    let event_kind = subscriber.event_kind();
    let key = (actor_id.clone(), event_kind, SubscriberKey::new(subscriber.clone()));
    self
      .subscriptions
      .entry(key)
      .or_insert_with(|| Arc::new(SubscriptionInfo::new(event_kind, SubscriberKey::new(subscriber))))
      .clone()
  }

  /// Atomically removes the record for the tuple and deactivates it. Returns
  /// `None` when no record exists, which callers treat as an idempotent no-op.
  pub fn try_unregister(
    &self,
    actor_id: &ActorId,
    subscriber: Arc<dyn ActorEventSubscriber>,
  ) -> Option<Arc<SubscriptionInfo>> {
    let key = (actor_id.clone(), subscriber.event_kind(), SubscriberKey::new(subscriber));
    let (_, info) = self.subscriptions.remove(&key)?;
    info.deactivate();
    Some(info)
  }

  pub fn len(&self) -> usize {
    self.subscriptions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.subscriptions.is_empty()
  }

  #[cfg(test)]
  pub(crate) fn is_registered(&self, actor_id: &ActorId, subscriber: Arc<dyn ActorEventSubscriber>) -> bool {
    let key = (actor_id.clone(), subscriber.event_kind(), SubscriberKey::new(subscriber));
    self.subscriptions.contains_key(&key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug)]
  struct TickSubscriber;

  impl TickSubscriber {
    fn new() -> Arc<Self> {
      Arc::new(TickSubscriber)
    }
  }

  impl ActorEventSubscriber for TickSubscriber {
    fn event_kind(&self) -> EventKindId {
      EventKindId(7)
    }

    fn handle_event(&self, _payload: Vec<u8>) {}
  }

  #[tokio::test]
  async fn register_returns_the_existing_active_record() {
    let manager = EventSubscriberManager::new();
    let actor_id = ActorId::new("actor-a");
    let subscriber = TickSubscriber::new();

    let first = manager.register(&actor_id, subscriber.clone());
    let second = manager.register(&actor_id, subscriber.clone());

    assert_eq!(first.id(), second.id());
    assert_eq!(manager.len(), 1);
    assert!(first.is_active());
  }

  #[tokio::test]
  async fn separately_allocated_subscribers_get_distinct_records() {
    let manager = EventSubscriberManager::new();
    let actor_id = ActorId::new("actor-a");

    let first = manager.register(&actor_id, TickSubscriber::new());
    let second = manager.register(&actor_id, TickSubscriber::new());

    assert_ne!(first.id(), second.id());
    assert_eq!(manager.len(), 2);
  }

  #[tokio::test]
  async fn unregister_deactivates_once_and_is_idempotent() {
    let manager = EventSubscriberManager::new();
    let actor_id = ActorId::new("actor-a");
    let subscriber = TickSubscriber::new();

    let info = manager.register(&actor_id, subscriber.clone());
    assert!(info.is_active());

    let removed = manager
      .try_unregister(&actor_id, subscriber.clone())
      .expect("record should exist");
    assert_eq!(removed.id(), info.id());
    assert!(!removed.is_active());
    assert!(manager.is_empty());

    assert!(manager.try_unregister(&actor_id, subscriber).is_none());
  }

  #[tokio::test]
  async fn reregistering_creates_a_new_record_instead_of_resurrecting() {
    let manager = EventSubscriberManager::new();
    let actor_id = ActorId::new("actor-a");
    let subscriber = TickSubscriber::new();

    let old = manager.register(&actor_id, subscriber.clone());
    manager.try_unregister(&actor_id, subscriber.clone());

    let fresh = manager.register(&actor_id, subscriber);
    assert_ne!(old.id(), fresh.id());
    assert!(!old.is_active());
    assert!(fresh.is_active());
  }

  #[tokio::test]
  async fn concurrent_register_and_unregister_keep_at_most_one_record() {
    let manager = Arc::new(EventSubscriberManager::new());
    let actor_id = ActorId::new("actor-a");
    let subscriber: Arc<dyn ActorEventSubscriber> = TickSubscriber::new();

    let mut handles = Vec::new();
    for worker in 0..16 {
      let manager = manager.clone();
      let actor_id = actor_id.clone();
      let subscriber = subscriber.clone();
      handles.push(tokio::spawn(async move {
        for _ in 0..50 {
          if worker % 2 == 0 {
            manager.register(&actor_id, subscriber.clone());
          } else {
            manager.try_unregister(&actor_id, subscriber.clone());
          }
          assert!(manager.len() <= 1);
        }
      }));
    }
    for handle in handles {
      handle.await.expect("worker panicked");
    }

    manager.register(&actor_id, subscriber);
    assert_eq!(manager.len(), 1);
  }
}
