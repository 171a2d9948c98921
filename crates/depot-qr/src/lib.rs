//! Scannable retrieval links for Depot records.
//!
//! A [`LinkEncoder`] turns a record id into JPEG bytes of a QR code whose
//! decoded payload is the fixed-template retrieval URL
//! `{base_url}/files/{record_id}`. Pure transformation: no storage access,
//! and the same id always produces the same payload.

pub mod error;

pub use error::{Error, Result};

use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, Luma};
use qrcode::QrCode;

/// JPEG quality for rendered codes. Scanners tolerate heavy compression.
const JPEG_QUALITY: u8 = 70;

/// Encodes record ids as QR images against one configured base URL.
#[derive(Debug, Clone)]
pub struct LinkEncoder {
  base_url: String,
}

impl LinkEncoder {
  /// `base_url` is the public root of the server, with or without a
  /// trailing slash.
  pub fn new(base_url: impl Into<String>) -> Self {
    let mut base_url = base_url.into();
    while base_url.ends_with('/') {
      base_url.pop();
    }
    Self { base_url }
  }

  /// The exact payload a scanner will decode for `record_id`.
  pub fn payload_url(&self, record_id: &str) -> String {
    format!("{}/files/{record_id}", self.base_url)
  }

  /// Render the retrieval URL for `record_id` as JPEG bytes.
  ///
  /// Fails with [`Error::EmptyRecordId`] when the id is empty; otherwise the
  /// id is treated as opaque text.
  pub fn encode(&self, record_id: &str) -> Result<Vec<u8>> {
    if record_id.trim().is_empty() {
      return Err(Error::EmptyRecordId);
    }

    let code = QrCode::new(self.payload_url(record_id).as_bytes())?;
    let img = code.render::<Luma<u8>>().min_dimensions(256, 256).build();

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut bytes), JPEG_QUALITY)
      .encode_image(&img)?;
    Ok(bytes)
  }
}
