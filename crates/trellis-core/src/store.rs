//! The `CurriculumStore` trait, the row-level accessor contract.
//!
//! The trait is implemented by storage backends (e.g.
//! `trellis-store-sqlite`). The [`Composer`](crate::composer::Composer) and
//! the REST layer depend on this abstraction, not on any concrete backend.
//!
//! Error type is the shared [`Error`](crate::Error) taxonomy rather than an
//! associated type: the distinction between "not found", "constraint
//! violation", and "unavailable" is part of the contract, and backends are
//! required to classify their failures into it.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  Result,
  association::Association,
  catalog::{
    CompetencyRow, CourseRow, DisciplineRow, NewCompetency, NewCourse,
    NewDiscipline, NewProfession, NewProgram, NewProject, ProfessionRow,
    ProgramRow, ProjectRow,
  },
  enrollment::{PortfolioEntry, StudentRow, TrajectoryRow},
  reference::{Reference, ReferenceKind},
};

/// Abstraction over a curriculum store backend.
///
/// Every upsert is a single atomic conditional write evaluated by the store
/// (insert with conflict resolution on the unique title), never a separate
/// existence check followed by an insert; two concurrent submissions of the
/// same title must resolve to the same id without creating a second row.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CurriculumStore: Send + Sync {
  // ── Reference entities ────────────────────────────────────────────────

  /// Insert `title` into the reference table for `kind`, or return the
  /// existing row's id if the title is already present.
  fn upsert_reference(
    &self,
    kind: ReferenceKind,
    title: String,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  /// Retrieve a reference row by id. Returns `None` if not found.
  fn get_reference(
    &self,
    kind: ReferenceKind,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Reference>>> + Send + '_;

  /// All titles in the reference table for `kind`.
  fn list_reference_titles(
    &self,
    kind: ReferenceKind,
  ) -> impl Future<Output = Result<Vec<String>>> + Send + '_;

  // ── Linked entities ───────────────────────────────────────────────────
  //
  // Same idempotent-upsert contract as references. An optional parent id is
  // stored verbatim; a dangling value surfaces as a foreign-key constraint
  // error from the write itself.

  fn upsert_competency(
    &self,
    input: NewCompetency,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn get_competency_row(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CompetencyRow>>> + Send + '_;

  fn upsert_profession(
    &self,
    input: NewProfession,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn get_profession_row(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ProfessionRow>>> + Send + '_;

  fn upsert_project(
    &self,
    input: NewProject,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn get_project_row(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ProjectRow>>> + Send + '_;

  fn upsert_program(
    &self,
    input: NewProgram,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn get_program_row(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ProgramRow>>> + Send + '_;

  fn upsert_discipline(
    &self,
    input: NewDiscipline,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn get_discipline_row(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<DisciplineRow>>> + Send + '_;

  fn upsert_course(
    &self,
    input: NewCourse,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn get_course_row(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CourseRow>>> + Send + '_;

  // ── Associations ──────────────────────────────────────────────────────

  /// Link `owner` and `target` in the junction table for `assoc`.
  /// Idempotent: re-linking an existing pair is a no-op.
  fn link(
    &self,
    assoc: Association,
    owner: Uuid,
    target: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Titles on the target side of `assoc` for one owner, e.g. the knowledge
  /// titles attached to a competency.
  fn titles_for(
    &self,
    assoc: Association,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<String>>> + Send + '_;

  /// Attach a competency to a project within one specific portfolio.
  /// Idempotent like [`link`](Self::link).
  fn link_portfolio_project_competency(
    &self,
    portfolio: Uuid,
    project: Uuid,
    competency: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Competency titles scoped to one `(portfolio, project)` pair.
  fn personal_project_competency_titles(
    &self,
    portfolio: Uuid,
    project: Uuid,
  ) -> impl Future<Output = Result<Vec<String>>> + Send + '_;

  // ── Portfolios ────────────────────────────────────────────────────────

  /// Create an empty portfolio and return its id.
  fn create_portfolio(
    &self,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn portfolio_exists(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool>> + Send + '_;

  /// Record that `project` belongs to `portfolio`, with the role and
  /// semester it was taken in.
  fn add_portfolio_project(
    &self,
    portfolio: Uuid,
    project: Uuid,
    team_role: String,
    semester: u8,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// All `(project, team role, semester)` rows for one portfolio.
  fn portfolio_entries(
    &self,
    portfolio: Uuid,
  ) -> impl Future<Output = Result<Vec<PortfolioEntry>>> + Send + '_;

  // ── Students ──────────────────────────────────────────────────────────

  /// Insert a student. When `portfolio_id` is `None`, a fresh portfolio is
  /// provisioned in the same transaction so a failed student insert cannot
  /// leave an orphan portfolio behind.
  fn create_student(
    &self,
    full_name: String,
    admission: NaiveDate,
    portfolio_id: Option<Uuid>,
  ) -> impl Future<Output = Result<StudentRow>> + Send + '_;

  fn get_student_row(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<StudentRow>>> + Send + '_;

  // ── Trajectories ──────────────────────────────────────────────────────

  fn create_trajectory(
    &self,
    student_id: Uuid,
    course_id: Uuid,
    semester: u8,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn get_trajectory_row(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<TrajectoryRow>>> + Send + '_;
}
