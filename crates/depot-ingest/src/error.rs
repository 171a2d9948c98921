//! Error type for `depot-ingest`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] depot_core::Error),

  /// Disk write or directory creation failed. Raised before any catalog
  /// write, so a failed save leaves no audit entry.
  #[error("storage i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("no artifact record with id {0}")]
  NotFound(Uuid),

  #[error("catalog error: {0}")]
  Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("mail source error: {0}")]
  MailSource(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
