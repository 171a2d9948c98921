//! Error types for `depot-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The raw filename sanitised to nothing usable.
  #[error("invalid filename: {0:?}")]
  InvalidName(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
