//! The `Owner` seam between the vault core and whatever authenticates users.
//!
//! The core never sees credentials. Anything that can produce a stable owner
//! UUID — an authenticated HTTP session, a mail-address directory lookup, a
//! test fixture — implements [`Owner`] and the core trusts it.

use uuid::Uuid;

/// A resolved user identity, reduced to the one thing the core needs.
pub trait Owner {
  fn owner_id(&self) -> Uuid;
}

/// A bare UUID is already a resolved identity.
impl Owner for Uuid {
  fn owner_id(&self) -> Uuid { *self }
}
