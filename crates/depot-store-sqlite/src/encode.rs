//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Event kinds are stored as snake_case tokens.

use chrono::{DateTime, Utc};
use depot_core::{
  artifact::ArtifactRecord,
  event::{Event, EventKind},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── EventKind ───────────────────────────────────────────────────────────────

pub fn encode_event_kind(k: EventKind) -> &'static str {
  match k {
    EventKind::FileCreated => "file_created",
    EventKind::FileUpdated => "file_updated",
  }
}

pub fn decode_event_kind(s: &str) -> Result<EventKind> {
  match s {
    "file_created" => Ok(EventKind::FileCreated),
    "file_updated" => Ok(EventKind::FileUpdated),
    other => Err(Error::UnknownEventType(other.to_owned())),
  }
}

// ─── LIKE patterns ───────────────────────────────────────────────────────────

/// Escape `%`, `_`, and `\` so user text stays literal inside a LIKE pattern
/// using `ESCAPE '\'`.
pub fn escape_like(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `artifacts` row.
pub struct RawArtifact {
  pub record_id:    String,
  pub owner_id:     String,
  pub storage_path: String,
  pub filename:     String,
  pub created_at:   String,
  pub created_by:   String,
}

impl RawArtifact {
  pub fn into_record(self) -> Result<ArtifactRecord> {
    Ok(ArtifactRecord {
      record_id:    decode_uuid(&self.record_id)?,
      owner_id:     decode_uuid(&self.owner_id)?,
      storage_path: self.storage_path,
      filename:     self.filename,
      created_at:   decode_dt(&self.created_at)?,
      created_by:   decode_uuid(&self.created_by)?,
    })
  }
}

/// Raw strings read directly from an `events` row.
pub struct RawEvent {
  pub event_id:   String,
  pub event_type: String,
  pub event_ref:  String,
  pub created_at: String,
  pub created_by: String,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      event_id:   decode_uuid(&self.event_id)?,
      kind:       decode_event_kind(&self.event_type)?,
      event_ref:  self.event_ref,
      created_at: decode_dt(&self.created_at)?,
      created_by: decode_uuid(&self.created_by)?,
    })
  }
}
