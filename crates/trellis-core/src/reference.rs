//! Reference entities: lookup tables addressed by a unique title.
//!
//! Knowledge, Technology, and Organization share one shape and one access
//! pattern, so the store addresses them through [`ReferenceKind`] instead of
//! three copies of the same get/upsert pair.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which reference table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
  Knowledge,
  Technology,
  Organization,
}

impl ReferenceKind {
  /// Table name in the relational schema.
  pub fn table(self) -> &'static str {
    match self {
      Self::Knowledge => "knowledge",
      Self::Technology => "technologies",
      Self::Organization => "organizations",
    }
  }

  /// Primary-key column name.
  pub fn id_column(self) -> &'static str {
    match self {
      Self::Knowledge => "knowledge_id",
      Self::Technology => "technology_id",
      Self::Organization => "organization_id",
    }
  }

  /// Entity name used in `NotFound` errors.
  pub fn entity(self) -> &'static str {
    match self {
      Self::Knowledge => "knowledge",
      Self::Technology => "technology",
      Self::Organization => "organization",
    }
  }
}

/// A reference row. The id is assigned on first insert; subsequent upserts
/// of the same title resolve to the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
  pub id:    Uuid,
  pub title: String,
}
