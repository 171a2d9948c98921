//! The audit trail: append-only create/update events.
//!
//! Events are written once per save and never updated or deleted. An event
//! points at its artifact through a path-like `event_ref` string rather than
//! a foreign key, so the trail stays human-auditable as plain text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::SaveOutcome;

/// What a save did to the referenced artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
  FileCreated,
  FileUpdated,
}

impl From<SaveOutcome> for EventKind {
  fn from(outcome: SaveOutcome) -> Self {
    match outcome {
      SaveOutcome::Created => EventKind::FileCreated,
      SaveOutcome::Updated => EventKind::FileUpdated,
    }
  }
}

/// One immutable audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub event_id:   Uuid,
  pub kind:       EventKind,
  /// `/files/{owner_id}/{record_id}`, built by [`event_ref`].
  pub event_ref:  String,
  pub created_at: DateTime<Utc>,
  pub created_by: Uuid,
}

/// Input for [`CatalogStore::append_event`](crate::store::CatalogStore::append_event).
/// The store assigns `event_id` and `created_at`, and builds the ref string.
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub kind:      EventKind,
  pub owner_id:  Uuid,
  pub record_id: Uuid,
}

/// Canonical reference string for an artifact, as stored in `event_ref`.
pub fn event_ref(owner_id: Uuid, record_id: Uuid) -> String {
  format!("/files/{owner_id}/{record_id}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ref_format_is_stable() {
    let owner = Uuid::nil();
    let record = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
    assert_eq!(
      event_ref(owner, record),
      "/files/00000000-0000-0000-0000-000000000000/6ba7b810-9dad-11d1-80b4-00c04fd430c8"
    );
  }

  #[test]
  fn kind_follows_outcome() {
    assert_eq!(EventKind::from(SaveOutcome::Created), EventKind::FileCreated);
    assert_eq!(EventKind::from(SaveOutcome::Updated), EventKind::FileUpdated);
  }
}
