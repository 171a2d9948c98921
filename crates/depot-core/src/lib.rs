//! Domain types and trait seams for the Depot file vault.
//!
//! Everything here is pure data plus two traits ([`store::CatalogStore`],
//! [`owner::Owner`]); no HTTP, no filesystem, no database. Every other
//! Depot crate builds on this one.

pub mod artifact;
pub mod error;
pub mod event;
pub mod owner;
pub mod sanitize;
pub mod store;

pub use error::{Error, Result};
