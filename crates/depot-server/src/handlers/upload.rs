//! Handler for `POST /files` — authenticated multipart upload.

use axum::{
  extract::{Multipart, State},
  Json,
};
use depot_core::{
  artifact::SaveOutcome, sanitize::has_allowed_extension, store::CatalogStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{auth::Authenticated, error::Error, AppState};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
  pub message: String,
  pub file_id: Uuid,
}

/// Accepts a multipart body with a `file` part. Responds 204 when the part
/// or its filename is missing, 415 when the extension is not allowed, and
/// 200 with `{message, file_id}` on success.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  auth: Authenticated,
  mut multipart: Multipart,
) -> Result<Json<UploadResponse>, Error>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| Error::BadRequest(e.to_string()))?
  {
    if field.name() != Some("file") {
      continue;
    }

    let filename = field
      .file_name()
      .map(str::to_owned)
      .filter(|n| !n.is_empty())
      .ok_or(Error::MissingFile)?;

    if !has_allowed_extension(&filename, &state.config.allowed_extensions) {
      return Err(Error::TypeNotAllowed(
        state.config.allowed_extensions.clone(),
      ));
    }

    let data = field
      .bytes()
      .await
      .map_err(|e| Error::BadRequest(e.to_string()))?;

    let receipt = state.vault.save(&auth, &filename, &data).await?;

    let verb = match receipt.outcome {
      SaveOutcome::Created => "uploaded",
      SaveOutcome::Updated => "updated",
    };

    return Ok(Json(UploadResponse {
      message: format!("File '{filename}' successfully {verb}"),
      file_id: receipt.record_id,
    }));
  }

  // No `file` part in the body at all.
  Err(Error::MissingFile)
}
