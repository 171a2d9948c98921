//! HTTP surface for the Depot vault.
//!
//! Exposes an axum [`Router`] backed by any [`CatalogStore`]: multipart
//! upload, download by record id, QR retrieval links, catalog search, and
//! the per-owner audit trail. Auth is HTTP Basic against configured
//! accounts; the download and QR routes are deliberately open by id (see
//! DESIGN.md).

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  extract::DefaultBodyLimit,
  routing::get,
  Router,
};
use depot_core::store::CatalogStore;
use depot_ingest::Vault;
use depot_qr::LinkEncoder;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use handlers::{download, events, qrcode, search, upload};

/// Hard cap on request bodies, uploads included.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

// ─── Configuration ───────────────────────────────────────────────────────────

/// One login able to use the vault.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
  /// Login handle, compared case-insensitively.
  pub email:         String,
  /// The stable owner id this login maps to.
  pub owner_id:      uuid::Uuid,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  /// Public root used in QR payload URLs.
  pub base_url:           String,
  /// SQLite file holding the catalog and event log.
  pub store_path:         PathBuf,
  /// Root directory the per-owner upload directories live under.
  pub upload_root:        PathBuf,
  /// Upload gate: lowercase extensions accepted at the HTTP boundary.
  pub allowed_extensions: Vec<String>,
  pub accounts:           Vec<Account>,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CatalogStore> {
  pub vault:  Arc<Vault<S>>,
  pub links:  Arc<LinkEncoder>,
  pub auth:   Arc<AuthConfig>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the vault server.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/files",
      get(search::handler::<S>).post(upload::handler::<S>),
    )
    .route("/files/{file_id}", get(download::handler::<S>))
    .route("/files/{file_id}/qrcode", get(qrcode::handler::<S>))
    .route("/events", get(events::handler::<S>))
    .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
