//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings; dates as `YYYY-MM-DD`.

use chrono::NaiveDate;
use trellis_core::{Error, Result};
use uuid::Uuid;

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String {
  id.hyphenated().to_string()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Uuid::parse_str(s).map_err(|e| Error::Store(format!("bad stored uuid: {e}")))
}

pub fn encode_opt_uuid(id: Option<Uuid>) -> Option<String> {
  id.map(encode_uuid)
}

pub fn decode_opt_uuid(s: Option<&str>) -> Result<Option<Uuid>> {
  s.map(decode_uuid).transpose()
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Store(format!("bad stored date {s:?}: {e}")))
}
