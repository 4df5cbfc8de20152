use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable logical address of a remote actor, independent of the physical
/// process currently hosting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId {
  id: String,
}

impl ActorId {
  pub fn new(id: impl Into<String>) -> Self {
    Self { id: id.into() }
  }

  pub fn id(&self) -> &str {
    &self.id
  }
}

impl fmt::Display for ActorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.id)
  }
}
