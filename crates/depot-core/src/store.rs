//! The `CatalogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `depot-store-sqlite`).
//! Higher layers (`depot-ingest`, `depot-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  artifact::{ArtifactRecord, NewArtifact, SaveOutcome},
  event::{Event, NewEvent},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`CatalogStore::search`].
#[derive(Debug, Clone)]
pub struct CatalogQuery {
  /// Only this owner's records are ever returned.
  pub owner_id:      Uuid,
  /// Case-insensitive literal substring filter over filenames. `None` or
  /// empty means "no filter". Treated as text, never as a pattern language.
  pub name_contains: Option<String>,
  /// Result cap. `None` means [`CatalogQuery::DEFAULT_LIMIT`]; values above
  /// the default are clamped down to it, never up.
  pub limit:         Option<usize>,
}

impl CatalogQuery {
  pub const DEFAULT_LIMIT: usize = 100;

  pub fn all_for(owner_id: Uuid) -> Self {
    Self { owner_id, name_contains: None, limit: None }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the Depot record catalog and event log.
///
/// Artifact records are immutable once created and events are append-only;
/// no method here mutates or deletes existing rows. [`resolve`] is the only
/// lookup-or-insert operation and must be atomic per (storage_path, filename)
/// key, so concurrent first-time saves of the same key observe exactly one
/// `Created` outcome between them.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
///
/// [`resolve`]: CatalogStore::resolve
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Identity ──────────────────────────────────────────────────────────

  /// Find the record for `(input.storage_path, input.filename)` or create
  /// one. Returns the record together with which of the two happened.
  ///
  /// An existing record is returned untouched — none of its fields change
  /// on an `Updated` outcome.
  fn resolve(
    &self,
    input: NewArtifact,
  ) -> impl Future<Output = Result<(ArtifactRecord, SaveOutcome), Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get_artifact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ArtifactRecord>, Self::Error>> + Send + '_;

  // ── Audit trail — append-only writes ──────────────────────────────────

  /// Append one audit event. The store assigns the id and timestamp and
  /// builds the `/files/{owner}/{record}` ref string.
  fn append_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  /// All events recorded for `owner_id`, ordered by creation time ascending
  /// (insertion order breaks ties). Unbounded — pagination is a caller
  /// concern.
  fn events_for_owner(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  // ── Catalog reads ─────────────────────────────────────────────────────

  /// Search one owner's records by filename substring. Results are sorted
  /// ascending by filename (byte order) and capped per `query.limit`'s
  /// clamping rules.
  fn search<'a>(
    &'a self,
    query: &'a CatalogQuery,
  ) -> impl Future<Output = Result<Vec<ArtifactRecord>, Self::Error>> + Send + 'a;
}
