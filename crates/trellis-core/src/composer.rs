//! The aggregate [`Composer`]: input validation, idempotent upsert entry
//! points, and assembly of the nested read views.
//!
//! One composer instance is constructed at process start and passed into
//! every request handler; it holds no mutable state beyond the store handle.
//! Reads fetch children sequentially in dependency order (later fetches use
//! ids from earlier ones). Parent names are resolved one explicit step at a
//! time; each view only carries its *immediate* parent's title, so the
//! Course → Discipline → EducationalProgram → Organization chain never needs
//! open-ended recursion.

use uuid::Uuid;

use crate::{
  Error, Result,
  association::Association,
  catalog::{
    NewCompetency, NewCourse, NewDiscipline, NewProfession, NewProgram,
    NewProject,
  },
  clock::{Clock, SystemClock},
  enrollment::{NewStudent, NewTrajectory},
  reference::{Reference, ReferenceKind},
  semester::semester_number,
  store::CurriculumStore,
  view::{
    CompetencyView, CourseView, DisciplineView, PersonalProjectView,
    PortfolioView, ProfessionView, ProgramView, ProjectView, StudentView,
    StudyGroupsView, TrajectoryView,
  },
};

// ─── Id helpers ──────────────────────────────────────────────────────────────

/// Treat a nil UUID the same as an absent one: "unset FK".
fn optional(id: Option<Uuid>) -> Option<Uuid> {
  id.filter(|u| !u.is_nil())
}

/// A required association id must be present and non-nil.
fn require(id: Option<Uuid>, field: &'static str) -> Result<Uuid> {
  optional(id).ok_or(Error::EmptyId { field })
}

fn require_title(title: &str) -> Result<()> {
  if title.is_empty() {
    return Err(Error::EmptyTitle);
  }
  Ok(())
}

// ─── Composer ────────────────────────────────────────────────────────────────

/// Read-composition and write-validation layer over a [`CurriculumStore`].
#[derive(Clone)]
pub struct Composer<S, C = SystemClock> {
  store: S,
  clock: C,
}

impl<S: CurriculumStore> Composer<S> {
  pub fn new(store: S) -> Self {
    Self { store, clock: SystemClock }
  }
}

impl<S: CurriculumStore, C: Clock> Composer<S, C> {
  pub fn with_clock(store: S, clock: C) -> Self {
    Self { store, clock }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  // ── Reference entities ────────────────────────────────────────────────

  pub async fn add_reference(
    &self,
    kind: ReferenceKind,
    title: String,
  ) -> Result<Reference> {
    require_title(&title)?;
    let id = self.store.upsert_reference(kind, title.clone()).await?;
    Ok(Reference { id, title })
  }

  pub async fn reference(
    &self,
    kind: ReferenceKind,
    id: Uuid,
  ) -> Result<Reference> {
    self
      .store
      .get_reference(kind, id)
      .await?
      .ok_or_else(|| Error::not_found(kind.entity(), id))
  }

  pub async fn reference_titles(
    &self,
    kind: ReferenceKind,
  ) -> Result<Vec<String>> {
    self.store.list_reference_titles(kind).await
  }

  // ── Parent-name resolution ────────────────────────────────────────────
  //
  // One bounded step per call: fetch the immediate parent row, keep its
  // title. An unset FK never triggers a lookup; a missing parent row
  // degrades to `None` rather than failing the whole view.

  async fn technology_title(&self, id: Option<Uuid>) -> Result<Option<String>> {
    let Some(id) = optional(id) else { return Ok(None) };
    let parent =
      self.store.get_reference(ReferenceKind::Technology, id).await?;
    Ok(parent.map(|r| r.title))
  }

  async fn organization_title(
    &self,
    id: Option<Uuid>,
  ) -> Result<Option<String>> {
    let Some(id) = optional(id) else { return Ok(None) };
    let parent =
      self.store.get_reference(ReferenceKind::Organization, id).await?;
    Ok(parent.map(|r| r.title))
  }

  async fn program_title(&self, id: Option<Uuid>) -> Result<Option<String>> {
    let Some(id) = optional(id) else { return Ok(None) };
    Ok(self.store.get_program_row(id).await?.map(|r| r.title))
  }

  async fn discipline_title(&self, id: Option<Uuid>) -> Result<Option<String>> {
    let Some(id) = optional(id) else { return Ok(None) };
    Ok(self.store.get_discipline_row(id).await?.map(|r| r.title))
  }

  // ── Competencies ──────────────────────────────────────────────────────

  pub async fn add_competency(
    &self,
    mut input: NewCompetency,
  ) -> Result<CompetencyView> {
    require_title(&input.title)?;
    input.main_technology_id = optional(input.main_technology_id);
    let id = self.store.upsert_competency(input).await?;
    self.competency(id).await
  }

  pub async fn competency(&self, id: Uuid) -> Result<CompetencyView> {
    let row = self
      .store
      .get_competency_row(id)
      .await?
      .ok_or_else(|| Error::not_found("competency", id))?;
    let main_technology =
      self.technology_title(row.main_technology_id).await?;
    let knowledge =
      self.store.titles_for(Association::KnowledgeCompetency, id).await?;
    Ok(CompetencyView {
      id: row.id,
      title: row.title,
      skills: row.skills,
      main_technology,
      knowledge,
    })
  }

  // ── Professions ───────────────────────────────────────────────────────

  pub async fn add_profession(
    &self,
    input: NewProfession,
  ) -> Result<ProfessionView> {
    require_title(&input.title)?;
    let id = self.store.upsert_profession(input).await?;
    self.profession(id).await
  }

  pub async fn profession(&self, id: Uuid) -> Result<ProfessionView> {
    let row = self
      .store
      .get_profession_row(id)
      .await?
      .ok_or_else(|| Error::not_found("profession", id))?;
    let competencies =
      self.store.titles_for(Association::CompetencyProfession, id).await?;
    Ok(ProfessionView {
      id: row.id,
      title: row.title,
      description: row.description,
      competencies,
    })
  }

  // ── Projects ──────────────────────────────────────────────────────────

  pub async fn add_project(&self, mut input: NewProject) -> Result<ProjectView> {
    require_title(&input.title)?;
    input.main_technology_id = optional(input.main_technology_id);
    let id = self.store.upsert_project(input).await?;
    self.project(id).await
  }

  pub async fn project(&self, id: Uuid) -> Result<ProjectView> {
    let row = self
      .store
      .get_project_row(id)
      .await?
      .ok_or_else(|| Error::not_found("project", id))?;
    let main_technology =
      self.technology_title(row.main_technology_id).await?;
    Ok(ProjectView {
      id: row.id,
      title: row.title,
      description: row.description,
      result: row.result,
      life_scenario: row.life_scenario,
      main_technology,
    })
  }

  // ── Educational programs ──────────────────────────────────────────────

  pub async fn add_educational_program(
    &self,
    mut input: NewProgram,
  ) -> Result<ProgramView> {
    require_title(&input.title)?;
    input.organization_id = optional(input.organization_id);
    let id = self.store.upsert_program(input).await?;
    self.educational_program(id).await
  }

  pub async fn educational_program(&self, id: Uuid) -> Result<ProgramView> {
    let row = self
      .store
      .get_program_row(id)
      .await?
      .ok_or_else(|| Error::not_found("educational program", id))?;
    let organization = self.organization_title(row.organization_id).await?;
    Ok(ProgramView {
      id: row.id,
      title: row.title,
      description: row.description,
      organization,
    })
  }

  // ── Disciplines ───────────────────────────────────────────────────────

  pub async fn add_discipline(
    &self,
    mut input: NewDiscipline,
  ) -> Result<DisciplineView> {
    require_title(&input.title)?;
    input.educational_program_id = optional(input.educational_program_id);
    let id = self.store.upsert_discipline(input).await?;
    self.discipline(id).await
  }

  pub async fn discipline(&self, id: Uuid) -> Result<DisciplineView> {
    let row = self
      .store
      .get_discipline_row(id)
      .await?
      .ok_or_else(|| Error::not_found("discipline", id))?;
    let educational_program = self.program_title(row.program_id).await?;
    Ok(DisciplineView {
      id: row.id,
      title: row.title,
      description: row.description,
      educational_program,
    })
  }

  // ── Courses ───────────────────────────────────────────────────────────

  pub async fn add_course(&self, mut input: NewCourse) -> Result<CourseView> {
    require_title(&input.title)?;
    input.discipline_id = optional(input.discipline_id);
    let id = self.store.upsert_course(input).await?;
    self.course(id).await
  }

  pub async fn course(&self, id: Uuid) -> Result<CourseView> {
    let row = self
      .store
      .get_course_row(id)
      .await?
      .ok_or_else(|| Error::not_found("course", id))?;
    let discipline = self.discipline_title(row.discipline_id).await?;
    let competencies =
      self.store.titles_for(Association::CourseCompetency, id).await?;
    Ok(CourseView {
      id: row.id,
      title: row.title,
      description: row.description,
      teacher: row.teacher,
      discipline,
      competencies,
    })
  }

  // ── Association links ─────────────────────────────────────────────────

  /// Link two rows in the junction table for `assoc`. Both ids are
  /// validated before any store round-trip.
  pub async fn link(
    &self,
    assoc: Association,
    owner: Option<Uuid>,
    target: Option<Uuid>,
  ) -> Result<()> {
    let (owner_field, target_field) = assoc.id_fields();
    let owner = require(owner, owner_field)?;
    let target = require(target, target_field)?;
    self.store.link(assoc, owner, target).await
  }

  pub async fn link_portfolio_project_competency(
    &self,
    portfolio: Option<Uuid>,
    project: Option<Uuid>,
    competency: Option<Uuid>,
  ) -> Result<()> {
    let portfolio = require(portfolio, "portfolioId")?;
    let project = require(project, "projectId")?;
    let competency = require(competency, "competencyId")?;
    self
      .store
      .link_portfolio_project_competency(portfolio, project, competency)
      .await
  }

  // ── Portfolios ────────────────────────────────────────────────────────

  pub async fn add_portfolio(&self) -> Result<Uuid> {
    self.store.create_portfolio().await
  }

  pub async fn add_portfolio_project(
    &self,
    portfolio: Option<Uuid>,
    project: Option<Uuid>,
    team_role: String,
    semester: u8,
  ) -> Result<()> {
    let portfolio = require(portfolio, "portfolioId")?;
    let project = require(project, "projectId")?;
    self
      .store
      .add_portfolio_project(portfolio, project, team_role, semester)
      .await
  }

  /// Assemble a portfolio: one personal project per membership row, each
  /// carrying full project detail plus the competencies scoped to this
  /// `(portfolio, project)` pair.
  pub async fn portfolio(&self, id: Uuid) -> Result<PortfolioView> {
    if !self.store.portfolio_exists(id).await? {
      return Err(Error::not_found("portfolio", id));
    }

    let entries = self.store.portfolio_entries(id).await?;
    let mut projects = Vec::with_capacity(entries.len());
    for entry in entries {
      let detail = self.project(entry.project_id).await?;
      let competencies = self
        .store
        .personal_project_competency_titles(id, entry.project_id)
        .await?;
      projects.push(PersonalProjectView {
        project_id: detail.id,
        title: detail.title,
        description: detail.description,
        result: detail.result,
        life_scenario: detail.life_scenario,
        main_technology: detail.main_technology,
        team_role: entry.team_role,
        semester: entry.semester,
        competencies,
      });
    }

    Ok(PortfolioView { id, projects })
  }

  // ── Students ──────────────────────────────────────────────────────────

  pub async fn add_student(&self, input: NewStudent) -> Result<StudentView> {
    if input.full_name.is_empty() {
      return Err(Error::EmptyTitle);
    }

    let today = self.clock.today();
    // An omitted admission date means "admitted today".
    let admission = input.admission_date.unwrap_or(today);
    if admission > today {
      return Err(Error::InvalidAdmissionDate { admission, today });
    }

    let row = self
      .store
      .create_student(input.full_name, admission, optional(input.portfolio_id))
      .await?;
    tracing::info!(student = %row.id, portfolio = %row.portfolio_id, "student created");

    let portfolio = self.portfolio(row.portfolio_id).await?;
    Ok(StudentView {
      id: row.id,
      full_name: row.full_name,
      admission_date: row.admission,
      semester: semester_number(row.admission, today),
      portfolio,
    })
  }

  /// Assemble a student with their full portfolio and derived semester.
  /// An admission date after today is corrupt state; it fails before any
  /// portfolio composition happens.
  pub async fn student(&self, id: Uuid) -> Result<StudentView> {
    let row = self
      .store
      .get_student_row(id)
      .await?
      .ok_or_else(|| Error::not_found("student", id))?;

    let today = self.clock.today();
    if row.admission > today {
      tracing::error!(
        student = %id,
        admission = %row.admission,
        %today,
        "stored admission date is in the future"
      );
      return Err(Error::InvalidAdmissionDate { admission: row.admission, today });
    }

    let portfolio = self.portfolio(row.portfolio_id).await?;
    Ok(StudentView {
      id: row.id,
      full_name: row.full_name,
      admission_date: row.admission,
      semester: semester_number(row.admission, today),
      portfolio,
    })
  }

  pub async fn study_groups(&self, student_id: Uuid) -> Result<StudyGroupsView> {
    let courses =
      self.store.titles_for(Association::StudyGroup, student_id).await?;
    Ok(StudyGroupsView { courses })
  }

  // ── Trajectories ──────────────────────────────────────────────────────

  pub async fn add_trajectory(
    &self,
    input: NewTrajectory,
  ) -> Result<TrajectoryView> {
    if input.semester == 0 {
      return Err(Error::InvalidSemester);
    }
    let student_id = require(input.student_id, "studentId")?;
    let course_id = require(input.course_id, "courseId")?;

    let id = self
      .store
      .create_trajectory(student_id, course_id, input.semester)
      .await?;
    self.trajectory_view(id, student_id, course_id, input.semester).await
  }

  /// Assemble a trajectory. Only the student's name and the course's title
  /// are resolved, never the full nested aggregates, which would drag a
  /// whole portfolio into a lightweight archival record.
  pub async fn trajectory(&self, id: Uuid) -> Result<TrajectoryView> {
    let row = self
      .store
      .get_trajectory_row(id)
      .await?
      .ok_or_else(|| Error::not_found("trajectory", id))?;
    self
      .trajectory_view(row.id, row.student_id, row.course_id, row.semester)
      .await
  }

  async fn trajectory_view(
    &self,
    id: Uuid,
    student_id: Uuid,
    course_id: Uuid,
    semester: u8,
  ) -> Result<TrajectoryView> {
    let student = self
      .store
      .get_student_row(student_id)
      .await?
      .ok_or_else(|| Error::not_found("student", student_id))?;
    let course = self
      .store
      .get_course_row(course_id)
      .await?
      .ok_or_else(|| Error::not_found("course", course_id))?;
    Ok(TrajectoryView {
      id,
      student: student.full_name,
      course: course.title,
      semester,
    })
  }
}
