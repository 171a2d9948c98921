//! Filename sanitisation.
//!
//! Uploaded names are attacker-controlled. Before a name touches the
//! filesystem it is reduced to a flat, traversal-free base name: directory
//! components are dropped, the remaining characters are restricted to an
//! ASCII allow-list, and leading/trailing dots and underscores are trimmed
//! so `..` and friends cannot survive.

use crate::{Error, Result};

/// Reduce `raw` to a filesystem-safe base name.
///
/// - everything up to the last `/` or `\` is discarded
/// - whitespace becomes `_`
/// - characters outside `[A-Za-z0-9._-]` are dropped
/// - leading and trailing `.` / `_` runs are trimmed
///
/// Fails with [`Error::InvalidName`] when nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Result<String> {
  let base = raw.rsplit(['/', '\\']).next().unwrap_or("");

  let cleaned: String = base
    .trim()
    .chars()
    .filter_map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
        Some(c)
      } else if c.is_whitespace() {
        Some('_')
      } else {
        None
      }
    })
    .collect();

  let cleaned = cleaned.trim_matches(['.', '_']);

  if cleaned.is_empty() {
    return Err(Error::InvalidName(raw.to_owned()));
  }
  Ok(cleaned.to_owned())
}

/// Extension-based upload gate: `true` when `filename` has an extension and
/// it appears (case-insensitively) in `allowed`.
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
  let Some((stem, ext)) = filename.rsplit_once('.') else {
    return false;
  };
  if stem.is_empty() {
    return false;
  }
  let ext = ext.to_ascii_lowercase();
  allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext))
}
