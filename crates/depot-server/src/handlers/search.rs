//! Handler for `GET /files?q={substring}` — the caller's catalog.

use axum::{
  extract::{Query, State},
  Json,
};
use depot_core::{
  artifact::ArtifactRecord,
  owner::Owner as _,
  store::{CatalogQuery, CatalogStore},
};
use serde::Deserialize;

use crate::{auth::Authenticated, error::Error, AppState};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Literal filename substring, matched case-insensitively.
  pub q: Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  auth: Authenticated,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ArtifactRecord>>, Error>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // The result cap is server policy; clients do not get to pick a limit.
  let query = CatalogQuery {
    owner_id:      auth.owner_id(),
    name_contains: params.q,
    limit:         None,
  };

  let records = state
    .vault
    .catalog()
    .search(&query)
    .await
    .map_err(|e| Error::Storage(e.to_string()))?;
  Ok(Json(records))
}
