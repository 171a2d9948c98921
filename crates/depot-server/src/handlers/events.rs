//! Handler for `GET /events` — the caller's audit trail, oldest first.

use axum::{extract::State, Json};
use depot_core::{event::Event, owner::Owner as _, store::CatalogStore};

use crate::{auth::Authenticated, error::Error, AppState};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  auth: Authenticated,
) -> Result<Json<Vec<Event>>, Error>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let events = state
    .vault
    .catalog()
    .events_for_owner(auth.owner_id())
    .await
    .map_err(|e| Error::Storage(e.to_string()))?;
  Ok(Json(events))
}
