//! Handler for `GET /files/{file_id}` — byte retrieval by record id.
//!
//! No ownership check: anyone holding a record id can download the file.
//! This mirrors the behaviour the rest of the system depends on (QR links
//! work without a login); the trade-off is flagged in DESIGN.md.

use axum::{
  body::Body,
  extract::{Path, State},
  http::header,
  response::{IntoResponse, Response},
};
use depot_core::store::CatalogStore;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::{error::Error, AppState};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(file_id): Path<String>,
) -> Result<Response, Error>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // An unparseable id cannot name a record; same 404 as an unknown one.
  let id = Uuid::parse_str(&file_id).map_err(|_| Error::NotFound)?;

  let path = state.vault.locate(id).await?;

  // A record whose bytes vanished from disk is served as missing too.
  let file = tokio::fs::File::open(&path).await.map_err(|_| Error::NotFound)?;

  let filename = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();

  // Stream straight from disk; files are never buffered whole.
  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/octet-stream".to_owned()),
        (
          header::CONTENT_DISPOSITION,
          format!("inline; filename=\"{filename}\""),
        ),
      ],
      Body::from_stream(ReaderStream::new(file)),
    )
      .into_response(),
  )
}
