//! Denormalised read views, assembled per request and never persisted.
//!
//! Views carry parent *titles* instead of ids because consumers are
//! display-oriented. Missing optional children (no technology, no
//! discipline, no associations) show up as `None` or an empty list, never as
//! an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyView {
  pub id:              Uuid,
  pub title:           String,
  pub skills:          String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub main_technology: Option<String>,
  #[serde(default)]
  pub knowledge:       Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionView {
  pub id:           Uuid,
  pub title:        String,
  pub description:  String,
  #[serde(default)]
  pub competencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
  pub id:              Uuid,
  pub title:           String,
  pub description:     String,
  pub result:          String,
  pub life_scenario:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub main_technology: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramView {
  pub id:           Uuid,
  pub title:        String,
  pub description:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub organization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineView {
  pub id:                  Uuid,
  pub title:               String,
  pub description:         String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub educational_program: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
  pub id:           Uuid,
  pub title:        String,
  pub description:  String,
  pub teacher:      String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub discipline:   Option<String>,
  #[serde(default)]
  pub competencies: Vec<String>,
}

/// A project as it appears inside one portfolio: full project detail plus
/// the role and semester it was taken in, with competencies scoped to the
/// `(portfolio, project)` pair, not the project's global competencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalProjectView {
  pub project_id:      Uuid,
  pub title:           String,
  pub description:     String,
  pub result:          String,
  pub life_scenario:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub main_technology: Option<String>,
  pub team_role:       String,
  pub semester:        u8,
  #[serde(default)]
  pub competencies:    Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
  pub id:       Uuid,
  #[serde(default)]
  pub projects: Vec<PersonalProjectView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
  pub id:             Uuid,
  pub full_name:      String,
  pub admission_date: NaiveDate,
  /// Derived from the admission date and today; never stored.
  pub semester:       u8,
  pub portfolio:      PortfolioView,
}

/// Lightweight archived-enrollment view. Deliberately resolves only the
/// student's name and the course's title, never the nested aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryView {
  pub id:       Uuid,
  pub student:  String,
  pub course:   String,
  pub semester: u8,
}

/// Current enrollments for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGroupsView {
  #[serde(default)]
  pub courses: Vec<String>,
}
