//! Handlers for the reference lookup tables (knowledge, technology,
//! organization).
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/{kind}` | All titles, sorted |
//! | `GET`  | `/{kind}/{id}` | 404 if not found |
//! | `POST` | `/{kind}` | Body: `{"title":"..."}`; idempotent upsert |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use trellis_core::{
  composer::Composer,
  reference::{Reference, ReferenceKind},
  store::CurriculumStore,
};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TitleBody {
  pub title: String,
}

async fn list<S>(
  composer: Arc<Composer<S>>,
  kind: ReferenceKind,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: CurriculumStore,
{
  Ok(Json(composer.reference_titles(kind).await?))
}

async fn get_one<S>(
  composer: Arc<Composer<S>>,
  kind: ReferenceKind,
  id: Uuid,
) -> Result<Json<Reference>, ApiError>
where
  S: CurriculumStore,
{
  Ok(Json(composer.reference(kind, id).await?))
}

async fn create<S>(
  composer: Arc<Composer<S>>,
  kind: ReferenceKind,
  title: String,
) -> Result<impl IntoResponse, ApiError>
where
  S: CurriculumStore,
{
  let reference = composer.add_reference(kind, title).await?;
  Ok((StatusCode::CREATED, Json(reference)))
}

// Thin per-kind entry points so each table gets its own route.

pub async fn list_knowledge<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
) -> Result<Json<Vec<String>>, ApiError> {
  list(c, ReferenceKind::Knowledge).await
}

pub async fn get_knowledge<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Reference>, ApiError> {
  get_one(c, ReferenceKind::Knowledge, id).await
}

pub async fn create_knowledge<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<TitleBody>,
) -> Result<impl IntoResponse, ApiError> {
  create(c, ReferenceKind::Knowledge, body.title).await
}

pub async fn list_technologies<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
) -> Result<Json<Vec<String>>, ApiError> {
  list(c, ReferenceKind::Technology).await
}

pub async fn get_technology<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Reference>, ApiError> {
  get_one(c, ReferenceKind::Technology, id).await
}

pub async fn create_technology<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<TitleBody>,
) -> Result<impl IntoResponse, ApiError> {
  create(c, ReferenceKind::Technology, body.title).await
}

pub async fn list_organizations<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
) -> Result<Json<Vec<String>>, ApiError> {
  list(c, ReferenceKind::Organization).await
}

pub async fn get_organization<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Reference>, ApiError> {
  get_one(c, ReferenceKind::Organization, id).await
}

pub async fn create_organization<S: CurriculumStore>(
  State(c): State<Arc<Composer<S>>>,
  Json(body): Json<TitleBody>,
) -> Result<impl IntoResponse, ApiError> {
  create(c, ReferenceKind::Organization, body.title).await
}
