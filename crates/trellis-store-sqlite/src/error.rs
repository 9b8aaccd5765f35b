//! Classification of SQLite failures into the core error taxonomy.
//!
//! The REST boundary relies on these kinds being stable: a uniqueness
//! violation and a dangling foreign key must stay distinguishable, and only
//! `Unavailable` may be retried by callers.

use rusqlite::ffi;
use trellis_core::{ConstraintKind, Error};

/// Map a `tokio_rusqlite` failure onto the shared taxonomy.
pub(crate) fn classify(err: tokio_rusqlite::Error) -> Error {
  match err {
    tokio_rusqlite::Error::Rusqlite(e) => classify_rusqlite(e),
    tokio_rusqlite::Error::ConnectionClosed => {
      Error::Unavailable("connection closed".into())
    }
    other => Error::Store(other.to_string()),
  }
}

fn classify_rusqlite(err: rusqlite::Error) -> Error {
  match &err {
    rusqlite::Error::SqliteFailure(f, _) => match f.code {
      rusqlite::ErrorCode::ConstraintViolation => {
        let kind = match f.extended_code {
          ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
            ConstraintKind::DanglingReference
          }
          // UNIQUE, PRIMARYKEY, and NOT NULL all mean the row itself was
          // rejected, not that it pointed at a missing parent.
          _ => ConstraintKind::DuplicateKey,
        };
        Error::Constraint { kind, message: err.to_string() }
      }
      rusqlite::ErrorCode::DatabaseBusy
      | rusqlite::ErrorCode::DatabaseLocked
      | rusqlite::ErrorCode::CannotOpen => Error::Unavailable(err.to_string()),
      _ => Error::Store(err.to_string()),
    },
    _ => Error::Store(err.to_string()),
  }
}
