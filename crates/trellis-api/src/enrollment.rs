//! Handlers for portfolios, students, study groups, and trajectories.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/portfolio` | No body; returns the new id |
//! | `GET`  | `/portfolio/{id}` | Nested personal projects |
//! | `POST` | `/student` | Auto-provisions a portfolio if none given |
//! | `GET`  | `/student/{id}` | Full portfolio + derived semester |
//! | `GET`  | `/student/{id}/study-groups` | Current course titles |
//! | `POST` | `/trajectory` | Archived enrollment |
//! | `GET`  | `/trajectory/{id}` | Scalar student name + course title |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde_json::json;
use trellis_core::{
  composer::Composer,
  enrollment::{NewStudent, NewTrajectory},
  store::CurriculumStore,
  view::{PortfolioView, StudentView, StudyGroupsView, TrajectoryView},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Portfolios ──────────────────────────────────────────────────────────────

pub async fn create_portfolio<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
) -> Result<impl IntoResponse, ApiError> {
  let id = c.add_portfolio().await?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn get_portfolio<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PortfolioView>, ApiError> {
  Ok(Json(c.portfolio(id).await?))
}

// ─── Students ────────────────────────────────────────────────────────────────

pub async fn create_student<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<NewStudent>,
) -> Result<impl IntoResponse, ApiError> {
  let view = c.add_student(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_student<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StudentView>, ApiError> {
  Ok(Json(c.student(id).await?))
}

pub async fn get_study_groups<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StudyGroupsView>, ApiError> {
  Ok(Json(c.study_groups(id).await?))
}

// ─── Trajectories ────────────────────────────────────────────────────────────

pub async fn create_trajectory<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<NewTrajectory>,
) -> Result<impl IntoResponse, ApiError> {
  let view = c.add_trajectory(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_trajectory<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<TrajectoryView>, ApiError> {
  Ok(Json(c.trajectory(id).await?))
}
