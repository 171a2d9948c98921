//! [`Vault`] — save orchestration and retrieval over a [`CatalogStore`].

use std::{path::PathBuf, sync::Arc};

use depot_core::{
  artifact::{NewArtifact, SaveOutcome},
  event::NewEvent,
  owner::Owner,
  store::CatalogStore,
};
use uuid::Uuid;

use crate::{disk::ArtifactStore, Error, Result};

/// What a completed save did.
#[derive(Debug, Clone)]
pub struct SaveReceipt {
  pub record_id: Uuid,
  /// The sanitised name the bytes were stored under.
  pub filename:  String,
  pub outcome:   SaveOutcome,
}

/// The one save pathway. Every producer — upload handler, mail importer —
/// goes through [`Vault::save`], which sequences the three stages the core
/// guarantees: bytes on disk, then identity resolution, then audit event.
#[derive(Clone)]
pub struct Vault<S> {
  artifacts: ArtifactStore,
  catalog:   Arc<S>,
}

impl<S> Vault<S>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  pub fn new(artifacts: ArtifactStore, catalog: Arc<S>) -> Self {
    Self { artifacts, catalog }
  }

  pub fn catalog(&self) -> &Arc<S> { &self.catalog }

  pub fn artifacts(&self) -> &ArtifactStore { &self.artifacts }

  /// Persist `bytes` as `raw_filename` for `owner` and record the outcome.
  ///
  /// Stage order is load-bearing: a disk failure aborts before the catalog
  /// is touched, and a resolve failure aborts before the event append, so
  /// no audit entry ever points at a record that was not created.
  pub async fn save(
    &self,
    owner: &(impl Owner + Sync),
    raw_filename: &str,
    bytes: &[u8],
  ) -> Result<SaveReceipt> {
    let owner_id = owner.owner_id();

    let stored = self.artifacts.store(owner_id, raw_filename, bytes).await?;

    let (record, outcome) = self
      .catalog
      .resolve(NewArtifact {
        owner_id,
        storage_path: stored.storage_path.to_string_lossy().into_owned(),
        filename: stored.filename.clone(),
      })
      .await
      .map_err(|e| Error::Catalog(Box::new(e)))?;

    self
      .catalog
      .append_event(NewEvent {
        kind: outcome.into(),
        owner_id,
        record_id: record.record_id,
      })
      .await
      .map_err(|e| Error::Catalog(Box::new(e)))?;

    tracing::info!(
      %owner_id,
      record_id = %record.record_id,
      filename = %stored.filename,
      ?outcome,
      "saved file"
    );

    Ok(SaveReceipt {
      record_id: record.record_id,
      filename:  stored.filename,
      outcome,
    })
  }

  /// Full on-disk path for a record id, or [`Error::NotFound`].
  ///
  /// No ownership check: any holder of a record id can locate it. Download
  /// and QR links rely on that.
  pub async fn locate(&self, record_id: Uuid) -> Result<PathBuf> {
    let record = self
      .catalog
      .get_artifact(record_id)
      .await
      .map_err(|e| Error::Catalog(Box::new(e)))?
      .ok_or(Error::NotFound(record_id))?;

    Ok(PathBuf::from(record.storage_path).join(record.filename))
  }
}
