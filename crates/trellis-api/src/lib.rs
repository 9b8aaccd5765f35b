//! JSON REST API for Trellis.
//!
//! Exposes an axum [`Router`] backed by any
//! [`trellis_core::store::CurriculumStore`] through one shared
//! [`Composer`] instance. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", trellis_api::api_router(composer.clone()))
//! ```

pub mod catalog;
pub mod enrollment;
pub mod error;
pub mod links;
pub mod reference;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use trellis_core::{composer::Composer, store::CurriculumStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `composer`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(composer: Arc<Composer<S>>) -> Router<()>
where
  S: CurriculumStore + 'static,
{
  Router::new()
    // Reference lookup tables
    .route(
      "/knowledge",
      get(reference::list_knowledge::<S>)
        .post(reference::create_knowledge::<S>),
    )
    .route("/knowledge/{id}", get(reference::get_knowledge::<S>))
    .route(
      "/technology",
      get(reference::list_technologies::<S>)
        .post(reference::create_technology::<S>),
    )
    .route("/technology/{id}", get(reference::get_technology::<S>))
    .route(
      "/organization",
      get(reference::list_organizations::<S>)
        .post(reference::create_organization::<S>),
    )
    .route("/organization/{id}", get(reference::get_organization::<S>))
    // Catalog entities
    .route("/competency", post(catalog::create_competency::<S>))
    .route("/competency/{id}", get(catalog::get_competency::<S>))
    .route("/profession", post(catalog::create_profession::<S>))
    .route("/profession/{id}", get(catalog::get_profession::<S>))
    .route("/project", post(catalog::create_project::<S>))
    .route("/project/{id}", get(catalog::get_project::<S>))
    .route("/educational-program", post(catalog::create_program::<S>))
    .route("/educational-program/{id}", get(catalog::get_program::<S>))
    .route("/discipline", post(catalog::create_discipline::<S>))
    .route("/discipline/{id}", get(catalog::get_discipline::<S>))
    .route("/course", post(catalog::create_course::<S>))
    .route("/course/{id}", get(catalog::get_course::<S>))
    // Portfolios, students, trajectories
    .route("/portfolio", post(enrollment::create_portfolio::<S>))
    .route("/portfolio/{id}", get(enrollment::get_portfolio::<S>))
    .route("/student", post(enrollment::create_student::<S>))
    .route("/student/{id}", get(enrollment::get_student::<S>))
    .route(
      "/student/{id}/study-groups",
      get(enrollment::get_study_groups::<S>),
    )
    .route("/trajectory", post(enrollment::create_trajectory::<S>))
    .route("/trajectory/{id}", get(enrollment::get_trajectory::<S>))
    // Association links
    .route(
      "/links/knowledge-competency",
      post(links::knowledge_competency::<S>),
    )
    .route(
      "/links/competency-profession",
      post(links::competency_profession::<S>),
    )
    .route("/links/course-competency", post(links::course_competency::<S>))
    .route("/links/study-group", post(links::study_group::<S>))
    .route("/links/portfolio-project", post(links::portfolio_project::<S>))
    .route(
      "/links/portfolio-project-competency",
      post(links::portfolio_project_competency::<S>),
    )
    .with_state(composer)
}
