//! The error taxonomy shared by every layer of Trellis.
//!
//! The REST boundary maps these kinds to status codes, so variants are part
//! of the public contract: callers must be able to distinguish "not found"
//! from "validation failure" from "constraint violation".

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Which database constraint a rejected write ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
  /// A uniqueness (or primary-key) constraint.
  DuplicateKey,
  /// A foreign-key constraint: the write referenced a row that does not
  /// exist.
  DanglingReference,
}

impl std::fmt::Display for ConstraintKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::DuplicateKey => write!(f, "duplicate key"),
      Self::DanglingReference => write!(f, "dangling reference"),
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// A required natural-key field was blank. Always a client error.
  #[error("empty title")]
  EmptyTitle,

  /// A required id for an association write was missing or nil.
  #[error("empty id: {field}")]
  EmptyId { field: &'static str },

  /// A trajectory semester must be at least 1.
  #[error("semester must be positive")]
  InvalidSemester,

  /// No row matched the requested id.
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: Uuid },

  /// A student's stored admission date is after today. Corrupt state, not
  /// a transient failure.
  #[error("admission date {admission} is after today ({today})")]
  InvalidAdmissionDate {
    admission: NaiveDate,
    today:     NaiveDate,
  },

  /// The store rejected a write due to a schema constraint.
  #[error("{kind} constraint violation: {message}")]
  Constraint {
    kind:    ConstraintKind,
    message: String,
  },

  /// The store could not be reached. The only variant a caller may
  /// legitimately retry.
  #[error("store unavailable: {0}")]
  Unavailable(String),

  /// Any other backend failure.
  #[error("store error: {0}")]
  Store(String),
}

impl Error {
  pub fn not_found(entity: &'static str, id: Uuid) -> Self {
    Self::NotFound { entity, id }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
