//! Write-side pipeline for the Depot vault.
//!
//! [`Vault`] drives every save the same way, whether it came from an
//! interactive upload or the mail importer: persist bytes to the per-owner
//! directory, resolve the file's identity in the catalog, append an audit
//! event. A failure at any stage aborts before the next one, so the event
//! log never references a record that does not exist.

pub mod disk;
pub mod error;
pub mod mail;
pub mod vault;

pub use error::{Error, Result};
pub use vault::{SaveReceipt, Vault};
