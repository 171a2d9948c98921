//! On-disk byte persistence: one directory per owner under a configured root.

use std::path::{Path, PathBuf};

use depot_core::sanitize::sanitize_filename;
use uuid::Uuid;

use crate::Result;

/// Where a [`store`](ArtifactStore::store) call put the bytes.
#[derive(Debug, Clone)]
pub struct StoredFile {
  /// The owner's directory, absolute (root joined with the owner id).
  pub storage_path: PathBuf,
  /// The sanitised base name the bytes were written under.
  pub filename:     String,
}

impl StoredFile {
  pub fn full_path(&self) -> PathBuf { self.storage_path.join(&self.filename) }
}

/// Writes raw upload bytes into the per-owner directory layout.
///
/// Holds no open handles and no cache; cloning is cheap.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
  root: PathBuf,
}

impl ArtifactStore {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  /// The directory all of `owner_id`'s files live in. Deterministic: the
  /// same owner always maps to the same directory.
  pub fn owner_dir(&self, owner_id: Uuid) -> PathBuf {
    self.root.join(owner_id.hyphenated().to_string())
  }

  pub fn root(&self) -> &Path { &self.root }

  /// Sanitise `raw_filename` and write `bytes` under the owner's directory,
  /// overwriting any previous content at that exact path. The directory is
  /// created if absent; an already-existing directory is not an error.
  pub async fn store(
    &self,
    owner_id: Uuid,
    raw_filename: &str,
    bytes: &[u8],
  ) -> Result<StoredFile> {
    let filename = sanitize_filename(raw_filename)?;
    let storage_path = self.owner_dir(owner_id);

    tokio::fs::create_dir_all(&storage_path).await?;
    tokio::fs::write(storage_path.join(&filename), bytes).await?;

    Ok(StoredFile { storage_path, filename })
  }
}
