//! Email-to-file ingestion.
//!
//! The importer drives a [`MailSource`] collaborator — the actual IMAP (or
//! test) mechanics live behind that trait. Each message is saved through the
//! normal [`Vault::save`] pathway as `{subject}.eml`, and only acknowledged
//! at the source after the save is durable. A message whose save fails is
//! left unacknowledged and the batch continues, so an interrupted or
//! partially failing run never loses mail.

use std::{collections::HashMap, future::Future};

use depot_core::store::CatalogStore;
use uuid::Uuid;

use crate::{Error, Result, Vault};

/// One message as fetched from the source, reduced to what ingestion needs.
#[derive(Debug, Clone)]
pub struct InboundMessage {
  /// Source-assigned stable id, echoed back on acknowledge.
  pub uid:       String,
  /// The To-address, used to find the owning vault user.
  pub recipient: String,
  pub subject:   String,
  /// The full raw message (RFC 822 bytes) — stored verbatim.
  pub raw:       Vec<u8>,
}

/// A mailbox the importer can drain.
///
/// `acknowledge` marks one message as processed at the source (for IMAP,
/// flagging it deleted). The importer only calls it after a durable save.
pub trait MailSource: Send {
  type Error: std::error::Error + Send + Sync + 'static;

  fn fetch(
    &mut self,
  ) -> impl Future<Output = Result<Vec<InboundMessage>, Self::Error>> + Send;

  fn acknowledge(
    &mut self,
    uid: &str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Maps a recipient mail address to the owning user.
pub trait OwnerDirectory: Send + Sync {
  fn owner_for_address(&self, address: &str) -> Option<Uuid>;
}

/// Address comparison is case-insensitive; keys must be stored lowercased.
impl OwnerDirectory for HashMap<String, Uuid> {
  fn owner_for_address(&self, address: &str) -> Option<Uuid> {
    self.get(&address.trim().to_ascii_lowercase()).copied()
  }
}

/// Counters for one import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
  pub saved:   usize,
  /// Messages with no matching owner. Left unacknowledged.
  pub skipped: usize,
  /// Messages whose save failed. Left unacknowledged.
  pub failed:  usize,
}

/// Drains a [`MailSource`] into the vault.
pub struct MailImporter<S, D> {
  vault:     Vault<S>,
  directory: D,
}

impl<S, D> MailImporter<S, D>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  D: OwnerDirectory,
{
  pub fn new(vault: Vault<S>, directory: D) -> Self { Self { vault, directory } }

  /// One full import pass. Safe to re-run at any time: unacknowledged
  /// messages are fetched again and their re-save resolves to the same
  /// record (one extra `Updated` event, no duplicate file).
  pub async fn run(&self, source: &mut impl MailSource) -> Result<ImportReport> {
    let messages = source
      .fetch()
      .await
      .map_err(|e| Error::MailSource(Box::new(e)))?;

    let mut report = ImportReport::default();

    for msg in messages {
      let Some(owner_id) = self.directory.owner_for_address(&msg.recipient)
      else {
        tracing::warn!(uid = %msg.uid, recipient = %msg.recipient, "no vault owner for recipient, skipping");
        report.skipped += 1;
        continue;
      };

      let filename = format!("{}.eml", msg.subject);

      match self.vault.save(&owner_id, &filename, &msg.raw).await {
        Ok(receipt) => {
          // Save is durable; now it is safe to drop the source copy.
          if let Err(e) = source.acknowledge(&msg.uid).await {
            // The message survives at the source and will re-import as an
            // update next run.
            tracing::warn!(uid = %msg.uid, error = %e, "save succeeded but acknowledge failed");
          }
          tracing::debug!(uid = %msg.uid, record_id = %receipt.record_id, "imported mail");
          report.saved += 1;
        }
        Err(e) => {
          tracing::error!(uid = %msg.uid, error = %e, "failed to save mail, leaving at source");
          report.failed += 1;
        }
      }
    }

    Ok(report)
  }
}
