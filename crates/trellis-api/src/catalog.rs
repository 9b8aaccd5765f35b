//! Handlers for the linked catalog entities.
//!
//! Each entity gets a `POST /<entity>` idempotent upsert (201 + the composed
//! view) and a `GET /<entity>/{id}` read (404 if the row is absent). Parent
//! titles and association lists are resolved by the composer.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use trellis_core::{
  catalog::{
    NewCompetency, NewCourse, NewDiscipline, NewProfession, NewProgram,
    NewProject,
  },
  composer::Composer,
  store::CurriculumStore,
  view::{
    CompetencyView, CourseView, DisciplineView, ProfessionView, ProgramView,
    ProjectView,
  },
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Competencies ────────────────────────────────────────────────────────────

pub async fn create_competency<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<NewCompetency>,
) -> Result<impl IntoResponse, ApiError> {
  let view = c.add_competency(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_competency<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CompetencyView>, ApiError> {
  Ok(Json(c.competency(id).await?))
}

// ─── Professions ─────────────────────────────────────────────────────────────

pub async fn create_profession<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<NewProfession>,
) -> Result<impl IntoResponse, ApiError> {
  let view = c.add_profession(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_profession<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ProfessionView>, ApiError> {
  Ok(Json(c.profession(id).await?))
}

// ─── Projects ────────────────────────────────────────────────────────────────

pub async fn create_project<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<NewProject>,
) -> Result<impl IntoResponse, ApiError> {
  let view = c.add_project(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_project<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ProjectView>, ApiError> {
  Ok(Json(c.project(id).await?))
}

// ─── Educational programs ────────────────────────────────────────────────────

pub async fn create_program<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<NewProgram>,
) -> Result<impl IntoResponse, ApiError> {
  let view = c.add_educational_program(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_program<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ProgramView>, ApiError> {
  Ok(Json(c.educational_program(id).await?))
}

// ─── Disciplines ─────────────────────────────────────────────────────────────

pub async fn create_discipline<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<NewDiscipline>,
) -> Result<impl IntoResponse, ApiError> {
  let view = c.add_discipline(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_discipline<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<DisciplineView>, ApiError> {
  Ok(Json(c.discipline(id).await?))
}

// ─── Courses ─────────────────────────────────────────────────────────────────

pub async fn create_course<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<NewCourse>,
) -> Result<impl IntoResponse, ApiError> {
  let view = c.add_course(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_course<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CourseView>, ApiError> {
  Ok(Json(c.course(id).await?))
}
