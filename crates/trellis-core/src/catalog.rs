//! Linked catalog entities: rows that may hold one optional foreign key to
//! a parent entity.
//!
//! The parent chain is fixed and shallow:
//! Course → Discipline → EducationalProgram → Organization, and
//! Competency/Project → Technology. Row structs carry the raw FK; the
//! denormalised parent *title* only appears on the read views built by the
//! [`Composer`](crate::composer::Composer).

use serde::Deserialize;
use uuid::Uuid;

// ─── Stored rows ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetencyRow {
  pub id:                 Uuid,
  pub title:              String,
  pub skills:             String,
  pub main_technology_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionRow {
  pub id:          Uuid,
  pub title:       String,
  pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
  pub id:                 Uuid,
  pub title:              String,
  pub description:        String,
  pub result:             String,
  pub life_scenario:      String,
  pub main_technology_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRow {
  pub id:              Uuid,
  pub title:           String,
  pub description:     String,
  pub organization_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisciplineRow {
  pub id:          Uuid,
  pub title:       String,
  pub description: String,
  pub program_id:  Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
  pub id:            Uuid,
  pub title:         String,
  pub description:   String,
  pub teacher:       String,
  pub discipline_id: Option<Uuid>,
}

// ─── Upsert inputs ───────────────────────────────────────────────────────────
//
// Optional FKs are stored verbatim without an existence check at write time;
// a dangling id surfaces later as a foreign-key constraint error.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompetency {
  pub title:              String,
  #[serde(default)]
  pub skills:             String,
  pub main_technology_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfession {
  pub title:       String,
  #[serde(default)]
  pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
  pub title:              String,
  #[serde(default)]
  pub description:        String,
  #[serde(default)]
  pub result:             String,
  #[serde(default)]
  pub life_scenario:      String,
  pub main_technology_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgram {
  pub title:           String,
  #[serde(default)]
  pub description:     String,
  pub organization_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscipline {
  pub title:                  String,
  #[serde(default)]
  pub description:            String,
  pub educational_program_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
  pub title:         String,
  #[serde(default)]
  pub description:   String,
  #[serde(default)]
  pub teacher:       String,
  pub discipline_id: Option<Uuid>,
}
