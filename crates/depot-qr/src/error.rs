//! Error type for `depot-qr`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The record id is structurally unusable (empty or whitespace).
  #[error("cannot encode an empty record id")]
  EmptyRecordId,

  #[error("qr encoding error: {0}")]
  Qr(#[from] qrcode::types::QrError),

  #[error("jpeg encoding error: {0}")]
  Jpeg(#[from] image::ImageError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
