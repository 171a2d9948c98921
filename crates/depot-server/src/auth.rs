//! HTTP Basic-auth extractor resolving a request to a vault owner.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use depot_core::{owner::Owner, store::CatalogStore};
use uuid::Uuid;

use crate::{error::Error, Account, AppState};

/// Credentials accepted as valid for this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub accounts: Vec<Account>,
}

/// Present in a handler means the request was authenticated; carries the
/// resolved owner id.
pub struct Authenticated(pub Uuid);

impl Owner for Authenticated {
  fn owner_id(&self) -> Uuid { self.0 }
}

/// Verify credentials directly from headers and resolve the owner.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<Uuid, Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (email, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let account = config
    .accounts
    .iter()
    .find(|a| a.email.eq_ignore_ascii_case(email))
    .ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&account.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(account.owner_id)
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let owner_id = verify_auth(&parts.headers, &state.auth)?;
    Ok(Authenticated(owner_id))
  }
}
