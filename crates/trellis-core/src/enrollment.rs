//! Portfolio, student, and trajectory records.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

/// One `(project, team role, semester)` row inside a portfolio. Project
/// detail and scoped competencies are resolved at composition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioEntry {
  pub project_id: Uuid,
  pub team_role:  String,
  pub semester:   u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
  pub id:           Uuid,
  pub full_name:    String,
  pub portfolio_id: Uuid,
  pub admission:    NaiveDate,
}

/// Input for student creation. A missing admission date defaults to today;
/// a missing portfolio id triggers auto-provisioning of a fresh portfolio in
/// the same transaction as the student insert.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
  pub full_name:      String,
  pub admission_date: Option<NaiveDate>,
  pub portfolio_id:   Option<Uuid>,
}

/// Input for trajectory creation. Both ids are required; the semester must
/// be at least 1.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrajectory {
  pub student_id: Option<Uuid>,
  pub course_id:  Option<Uuid>,
  pub semester:   u8,
}

/// An archived enrollment record, distinct from a live study-group link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryRow {
  pub id:         Uuid,
  pub student_id: Uuid,
  pub course_id:  Uuid,
  pub semester:   u8,
}
