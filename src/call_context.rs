use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CALL_CONTEXT_ID: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

tokio::task_local! {
  static AMBIENT_CALL_CONTEXT: CallContext;
}

/// Opaque correlation token attached to every outgoing request envelope so the
/// remote side can tie its work back to the originating call chain.
///
/// The token travels as an explicit value: it is captured once at the call
/// boundary with [`CallContext::capture`] and threaded down to envelope
/// construction, instead of being read from hidden task-local state deep in
/// the stack. [`CallContext::scope`] installs an ambient value for callers
/// that already carry a correlation id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallContext {
  value: String,
}

impl CallContext {
  pub fn new(value: impl Into<String>) -> Self {
    Self { value: value.into() }
  }

  pub fn value(&self) -> &str {
    &self.value
  }

  /// Returns the ambient call context of the current task, minting a fresh
  /// token when none is installed.
  pub fn capture() -> CallContext {
    AMBIENT_CALL_CONTEXT.try_with(|ctx| ctx.clone()).unwrap_or_else(|_| {
      let seq = NEXT_CALL_CONTEXT_ID.fetch_add(1, Ordering::SeqCst);
      CallContext {
        value: format!("call-{}", seq),
      }
    })
  }

  /// Runs `fut` with `ctx` installed as the ambient call context.
  pub async fn scope<F>(ctx: CallContext, fut: F) -> F::Output
  where
    F: Future, {
    AMBIENT_CALL_CONTEXT.scope(ctx, fut).await
  }
}

impl fmt::Display for CallContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn capture_mints_fresh_tokens_outside_a_scope() {
    let first = CallContext::capture();
    let second = CallContext::capture();
    assert_ne!(first, second);
  }

  #[tokio::test]
  async fn capture_returns_the_installed_ambient_value() {
    let installed = CallContext::new("ambient-42");
    let captured = CallContext::scope(installed.clone(), async { CallContext::capture() }).await;
    assert_eq!(captured, installed);
  }
}
