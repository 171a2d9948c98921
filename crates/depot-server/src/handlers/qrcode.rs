//! Handler for `GET /files/{file_id}/qrcode` — scannable retrieval link.
//!
//! Pure function of the path segment and the configured base URL; the
//! catalog is never consulted, so the route happily encodes ids that do not
//! (yet) resolve — exactly like the link it encodes, which 404s on fetch.

use axum::{
  extract::{Path, State},
  http::header,
  response::IntoResponse,
};
use depot_core::store::CatalogStore;

use crate::{error::Error, AppState};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(file_id): Path<String>,
) -> Result<impl IntoResponse, Error>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let bytes = state.links.encode(&file_id)?;
  Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}
