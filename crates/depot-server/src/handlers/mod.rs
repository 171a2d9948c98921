//! Route handlers, one module per route.

pub mod download;
pub mod events;
pub mod qrcode;
pub mod search;
pub mod upload;
