//! Artifact records — the stable identity assigned to a stored file.
//!
//! A record identifies a logical file by its unique (storage_path, filename)
//! pair. Re-saving bytes for an existing pair resolves to the same record;
//! records are never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The persisted identity of one logical file.
///
/// Every field is immutable once the record is created. Later saves to the
/// same (storage_path, filename) pair only append [`Event`](crate::event::Event)s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRecord {
  pub record_id:    Uuid,
  pub owner_id:     Uuid,
  /// Owner-scoped directory the bytes live in, relative to nothing — the
  /// store persists it exactly as computed at save time.
  pub storage_path: String,
  /// Sanitised base name. Contains no path separators.
  pub filename:     String,
  pub created_at:   DateTime<Utc>,
  /// Owner at creation time. Equal to `owner_id` in all current flows.
  pub created_by:   Uuid,
}

/// Input for [`CatalogStore::resolve`](crate::store::CatalogStore::resolve).
/// The store assigns `record_id` and `created_at` itself.
#[derive(Debug, Clone)]
pub struct NewArtifact {
  pub owner_id:     Uuid,
  pub storage_path: String,
  pub filename:     String,
}

/// Whether a resolve found an existing record or allocated a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
  Created,
  Updated,
}

impl SaveOutcome {
  pub fn is_created(&self) -> bool { matches!(self, Self::Created) }
}
