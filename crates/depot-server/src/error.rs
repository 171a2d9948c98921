//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::{header, HeaderValue, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  /// Upload with no file part or an empty filename. Served as 204.
  #[error("missing file")]
  MissingFile,

  /// Upload rejected by the extension allow-list.
  #[error("file type not allowed")]
  TypeNotAllowed(Vec<String>),

  #[error("file not found")]
  NotFound,

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("qr error: {0}")]
  Qr(#[from] depot_qr::Error),

  #[error("storage error: {0}")]
  Storage(String),
}

/// Collapse pipeline errors into the HTTP taxonomy: unknown ids become 404,
/// unusable filenames become 400, everything else is a 500.
impl From<depot_ingest::Error> for Error {
  fn from(e: depot_ingest::Error) -> Self {
    match e {
      depot_ingest::Error::NotFound(_) => Error::NotFound,
      depot_ingest::Error::Core(depot_core::Error::InvalidName(name)) => {
        Error::BadRequest(format!("unusable filename: {name:?}"))
      }
      other => Error::Storage(other.to_string()),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "message": "please log in" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"depot\""),
        );
        res
      }
      Error::MissingFile => StatusCode::NO_CONTENT.into_response(),
      Error::TypeNotAllowed(allowed) => (
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Json(json!({
          "message": format!("Allowed file types are {allowed:?}")
        })),
      )
        .into_response(),
      Error::NotFound => (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "File not found" })),
      )
        .into_response(),
      Error::BadRequest(msg) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": msg })),
      )
        .into_response(),
      Error::Qr(depot_qr::Error::EmptyRecordId) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "empty record id" })),
      )
        .into_response(),
      Error::Qr(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
      Error::Storage(msg) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": msg })),
      )
        .into_response(),
    }
  }
}
