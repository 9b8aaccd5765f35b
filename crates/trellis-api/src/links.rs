//! Handlers for association writes.
//!
//! All link endpoints validate that every required id is present and
//! non-nil before any store round-trip, and succeed with `204 No Content`.
//! Re-linking an existing pairwise association is a no-op; portfolio
//! membership rows carry payload and conflict instead (409).

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use trellis_core::{
  association::Association, composer::Composer, store::CurriculumStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Pairwise links ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeCompetencyBody {
  pub knowledge_id:  Option<Uuid>,
  pub competency_id: Option<Uuid>,
}

/// `POST /links/knowledge-competency`
pub async fn knowledge_competency<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<KnowledgeCompetencyBody>,
) -> Result<StatusCode, ApiError> {
  c.link(
    Association::KnowledgeCompetency,
    body.competency_id,
    body.knowledge_id,
  )
  .await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyProfessionBody {
  pub competency_id: Option<Uuid>,
  pub profession_id: Option<Uuid>,
}

/// `POST /links/competency-profession`
pub async fn competency_profession<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<CompetencyProfessionBody>,
) -> Result<StatusCode, ApiError> {
  c.link(
    Association::CompetencyProfession,
    body.profession_id,
    body.competency_id,
  )
  .await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCompetencyBody {
  pub course_id:     Option<Uuid>,
  pub competency_id: Option<Uuid>,
}

/// `POST /links/course-competency`
pub async fn course_competency<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<CourseCompetencyBody>,
) -> Result<StatusCode, ApiError> {
  c.link(Association::CourseCompetency, body.course_id, body.competency_id)
    .await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGroupBody {
  pub student_id: Option<Uuid>,
  pub course_id:  Option<Uuid>,
}

/// `POST /links/study-group`, recording a live enrollment.
pub async fn study_group<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<StudyGroupBody>,
) -> Result<StatusCode, ApiError> {
  c.link(Association::StudyGroup, body.student_id, body.course_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Portfolio membership ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProjectBody {
  pub portfolio_id: Option<Uuid>,
  pub project_id:   Option<Uuid>,
  #[serde(default)]
  pub team_role:    String,
  pub semester:     u8,
}

/// `POST /links/portfolio-project`. Attaches a project to a portfolio with
/// the role and semester it was taken in.
pub async fn portfolio_project<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<PortfolioProjectBody>,
) -> Result<StatusCode, ApiError> {
  c.add_portfolio_project(
    body.portfolio_id,
    body.project_id,
    body.team_role,
    body.semester,
  )
  .await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProjectCompetencyBody {
  pub portfolio_id:  Option<Uuid>,
  pub project_id:    Option<Uuid>,
  pub competency_id: Option<Uuid>,
}

/// `POST /links/portfolio-project-competency`, recording a competency earned
/// in one specific portfolio's take on a project.
pub async fn portfolio_project_competency<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<PortfolioProjectCompetencyBody>,
) -> Result<StatusCode, ApiError> {
  c.link_portfolio_project_competency(
    body.portfolio_id,
    body.project_id,
    body.competency_id,
  )
  .await?;
  Ok(StatusCode::NO_CONTENT)
}
