//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use depot_core::{
  artifact::{ArtifactRecord, NewArtifact, SaveOutcome},
  event::{self, Event, NewEvent},
  store::{CatalogQuery, CatalogStore},
};

use crate::{
  encode::{
    encode_dt, encode_event_kind, encode_uuid, escape_like, RawArtifact,
    RawEvent,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Depot catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

const ARTIFACT_COLUMNS: &str =
  "record_id, owner_id, storage_path, filename, created_at, created_by";

fn artifact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawArtifact> {
  Ok(RawArtifact {
    record_id:    row.get(0)?,
    owner_id:     row.get(1)?,
    storage_path: row.get(2)?,
    filename:     row.get(3)?,
    created_at:   row.get(4)?,
    created_by:   row.get(5)?,
  })
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Identity ──────────────────────────────────────────────────────────────

  async fn resolve(
    &self,
    input: NewArtifact,
  ) -> Result<(ArtifactRecord, SaveOutcome)> {
    // Candidate row for the Created case. If the key already exists the
    // insert is a no-op and the existing row wins.
    let candidate = ArtifactRecord {
      record_id:    Uuid::new_v4(),
      owner_id:     input.owner_id,
      storage_path: input.storage_path,
      filename:     input.filename,
      created_at:   Utc::now(),
      created_by:   input.owner_id,
    };

    let record_id_str  = encode_uuid(candidate.record_id);
    let owner_id_str   = encode_uuid(candidate.owner_id);
    let storage_path   = candidate.storage_path.clone();
    let filename       = candidate.filename.clone();
    let created_at_str = encode_dt(candidate.created_at);
    let created_by_str = encode_uuid(candidate.created_by);

    // Insert-or-fetch runs inside one `call`, so no other operation on this
    // connection can interleave between the INSERT and the SELECT. Across
    // connections the UNIQUE constraint still guarantees a single row.
    let existing: Option<RawArtifact> = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO artifacts
             (record_id, owner_id, storage_path, filename, created_at, created_by)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT (storage_path, filename) DO NOTHING",
          rusqlite::params![
            record_id_str,
            owner_id_str,
            storage_path,
            filename,
            created_at_str,
            created_by_str,
          ],
        )?;

        if inserted == 1 {
          return Ok(None);
        }

        let raw = conn.query_row(
          &format!(
            "SELECT {ARTIFACT_COLUMNS} FROM artifacts
             WHERE storage_path = ?1 AND filename = ?2"
          ),
          rusqlite::params![storage_path, filename],
          artifact_from_row,
        )?;
        Ok(Some(raw))
      })
      .await?;

    match existing {
      None => Ok((candidate, SaveOutcome::Created)),
      Some(raw) => Ok((raw.into_record()?, SaveOutcome::Updated)),
    }
  }

  async fn get_artifact(&self, id: Uuid) -> Result<Option<ArtifactRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawArtifact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ARTIFACT_COLUMNS} FROM artifacts WHERE record_id = ?1"
              ),
              rusqlite::params![id_str],
              artifact_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawArtifact::into_record).transpose()
  }

  // ── Audit trail — append-only writes ──────────────────────────────────────

  async fn append_event(&self, input: NewEvent) -> Result<Event> {
    let event = Event {
      event_id:   Uuid::new_v4(),
      kind:       input.kind,
      event_ref:  event::event_ref(input.owner_id, input.record_id),
      created_at: Utc::now(),
      created_by: input.owner_id,
    };

    let event_id_str   = encode_uuid(event.event_id);
    let event_type     = encode_event_kind(event.kind).to_owned();
    let event_ref_str  = event.event_ref.clone();
    let created_at_str = encode_dt(event.created_at);
    let created_by_str = encode_uuid(event.created_by);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events
             (event_id, event_type, event_ref, created_at, created_by)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            event_id_str,
            event_type,
            event_ref_str,
            created_at_str,
            created_by_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn events_for_owner(&self, owner_id: Uuid) -> Result<Vec<Event>> {
    let owner_str = encode_uuid(owner_id);

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT event_id, event_type, event_ref, created_at, created_by
           FROM events
           WHERE created_by = ?1
           ORDER BY created_at ASC, seq ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], |row| {
            Ok(RawEvent {
              event_id:   row.get(0)?,
              event_type: row.get(1)?,
              event_ref:  row.get(2)?,
              created_at: row.get(3)?,
              created_by: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  // ── Catalog reads ─────────────────────────────────────────────────────────

  async fn search(&self, query: &CatalogQuery) -> Result<Vec<ArtifactRecord>> {
    let owner_str = encode_uuid(query.owner_id);
    // Substring is literal text: escape LIKE wildcards before wrapping in %.
    let pattern = query
      .name_contains
      .as_deref()
      .filter(|t| !t.is_empty())
      .map(|t| format!("%{}%", escape_like(t)));
    // The cap is a ceiling, not a default: a caller-supplied limit can only
    // lower it. Clamping first also keeps the i64 conversion lossless.
    let limit_val = query
      .limit
      .unwrap_or(CatalogQuery::DEFAULT_LIMIT)
      .min(CatalogQuery::DEFAULT_LIMIT) as i64;

    let raws: Vec<RawArtifact> = self
      .conn
      .call(move |conn| {
        // Sort is BINARY collation, i.e. byte order over filenames. LIKE is
        // ASCII case-insensitive, matching the filter contract.
        let rows = if let Some(p) = pattern {
          let mut stmt = conn.prepare(&format!(
            "SELECT {ARTIFACT_COLUMNS} FROM artifacts
             WHERE owner_id = ?1 AND filename LIKE ?2 ESCAPE '\\'
             ORDER BY filename ASC
             LIMIT ?3"
          ))?;
          stmt
            .query_map(rusqlite::params![owner_str, p, limit_val], artifact_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {ARTIFACT_COLUMNS} FROM artifacts
             WHERE owner_id = ?1
             ORDER BY filename ASC
             LIMIT ?2"
          ))?;
          stmt
            .query_map(rusqlite::params![owner_str, limit_val], artifact_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArtifact::into_record).collect()
  }
}
