//! Integration tests for `SqliteStore` and the composer against an
//! in-memory database.

use chrono::NaiveDate;
use trellis_core::{
  ConstraintKind, Error,
  association::Association,
  catalog::{NewCompetency, NewCourse, NewDiscipline, NewProgram, NewProject},
  clock::FixedClock,
  composer::Composer,
  enrollment::{NewStudent, NewTrajectory},
  reference::ReferenceKind,
  store::CurriculumStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Composer pinned to 2026-06-10 so semester derivation is deterministic.
async fn composer() -> Composer<SqliteStore, FixedClock> {
  Composer::with_clock(store().await, FixedClock(d(2026, 6, 10)))
}

// ─── Reference upserts ───────────────────────────────────────────────────────

#[tokio::test]
async fn reference_upsert_is_idempotent() {
  let s = store().await;

  let first = s
    .upsert_reference(ReferenceKind::Knowledge, "SQL".into())
    .await
    .unwrap();
  let second = s
    .upsert_reference(ReferenceKind::Knowledge, "SQL".into())
    .await
    .unwrap();

  assert_eq!(first, second);
  let titles =
    s.list_reference_titles(ReferenceKind::Knowledge).await.unwrap();
  assert_eq!(titles, vec!["SQL".to_string()]);
}

#[tokio::test]
async fn distinct_titles_get_distinct_ids() {
  let s = store().await;
  let a = s
    .upsert_reference(ReferenceKind::Technology, "Rust".into())
    .await
    .unwrap();
  let b = s
    .upsert_reference(ReferenceKind::Technology, "Go".into())
    .await
    .unwrap();
  assert_ne!(a, b);
}

#[tokio::test]
async fn reference_tables_are_independent() {
  let s = store().await;
  s.upsert_reference(ReferenceKind::Knowledge, "Graphs".into())
    .await
    .unwrap();

  let techs =
    s.list_reference_titles(ReferenceKind::Technology).await.unwrap();
  assert!(techs.is_empty());
}

#[tokio::test]
async fn get_reference_missing_returns_none() {
  let s = store().await;
  let got =
    s.get_reference(ReferenceKind::Organization, Uuid::new_v4()).await.unwrap();
  assert!(got.is_none());
}

#[tokio::test]
async fn empty_title_is_rejected_before_the_store() {
  let c = composer().await;
  let err =
    c.add_reference(ReferenceKind::Knowledge, String::new()).await.unwrap_err();
  assert!(matches!(err, Error::EmptyTitle));
  let titles = c.reference_titles(ReferenceKind::Knowledge).await.unwrap();
  assert!(titles.is_empty());
}

// ─── Competencies ────────────────────────────────────────────────────────────

#[tokio::test]
async fn competency_view_has_empty_knowledge_until_linked() {
  let c = composer().await;

  let created = c
    .add_competency(NewCompetency {
      title: "Data modelling".into(),
      skills: "ERD, normal forms".into(),
      main_technology_id: None,
    })
    .await
    .unwrap();

  let view = c.competency(created.id).await.unwrap();
  assert_eq!(view.title, "Data modelling");
  assert_eq!(view.skills, "ERD, normal forms");
  assert_eq!(view.main_technology, None);
  assert!(view.knowledge.is_empty());
}

#[tokio::test]
async fn competency_resolves_technology_title() {
  // Scenario: upsert Technology "Go", attach it to a competency, read back.
  let c = composer().await;

  let tech =
    c.add_reference(ReferenceKind::Technology, "Go".into()).await.unwrap();
  let created = c
    .add_competency(NewCompetency {
      title: "Backend".into(),
      skills: String::new(),
      main_technology_id: Some(tech.id),
    })
    .await
    .unwrap();

  let view = c.competency(created.id).await.unwrap();
  assert_eq!(view.title, "Backend");
  assert_eq!(view.main_technology.as_deref(), Some("Go"));
  assert!(view.knowledge.is_empty());
}

#[tokio::test]
async fn competency_upsert_keeps_original_attributes() {
  let c = composer().await;

  let first = c
    .add_competency(NewCompetency {
      title: "Testing".into(),
      skills: "unit tests".into(),
      main_technology_id: None,
    })
    .await
    .unwrap();
  let second = c
    .add_competency(NewCompetency {
      title: "Testing".into(),
      skills: "completely different".into(),
      main_technology_id: None,
    })
    .await
    .unwrap();

  // Insert-or-get: the second submission resolves to the first row.
  assert_eq!(first.id, second.id);
  assert_eq!(second.skills, "unit tests");
}

#[tokio::test]
async fn competency_view_includes_linked_knowledge() {
  let c = composer().await;

  let know =
    c.add_reference(ReferenceKind::Knowledge, "B-trees".into()).await.unwrap();
  let comp = c
    .add_competency(NewCompetency { title: "Storage".into(), ..Default::default() })
    .await
    .unwrap();

  c.link(Association::KnowledgeCompetency, Some(comp.id), Some(know.id))
    .await
    .unwrap();

  let view = c.competency(comp.id).await.unwrap();
  assert_eq!(view.knowledge, vec!["B-trees".to_string()]);
}

#[tokio::test]
async fn missing_competency_is_not_found() {
  let c = composer().await;
  let err = c.competency(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "competency", .. }));
}

// ─── Association links ───────────────────────────────────────────────────────

#[tokio::test]
async fn link_with_nil_id_writes_nothing() {
  let c = composer().await;
  let know =
    c.add_reference(ReferenceKind::Knowledge, "CAP".into()).await.unwrap();

  let err = c
    .link(Association::KnowledgeCompetency, Some(Uuid::nil()), Some(know.id))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EmptyId { field: "competencyId" }));

  let err = c
    .link(Association::KnowledgeCompetency, Some(know.id), None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EmptyId { field: "knowledgeId" }));
}

#[tokio::test]
async fn relinking_the_same_pair_is_a_noop() {
  let c = composer().await;
  let know =
    c.add_reference(ReferenceKind::Knowledge, "HTTP".into()).await.unwrap();
  let comp = c
    .add_competency(NewCompetency { title: "Web".into(), ..Default::default() })
    .await
    .unwrap();

  c.link(Association::KnowledgeCompetency, Some(comp.id), Some(know.id))
    .await
    .unwrap();
  c.link(Association::KnowledgeCompetency, Some(comp.id), Some(know.id))
    .await
    .unwrap();

  let view = c.competency(comp.id).await.unwrap();
  assert_eq!(view.knowledge.len(), 1);
}

#[tokio::test]
async fn linking_a_missing_row_is_a_dangling_reference() {
  let c = composer().await;
  let comp = c
    .add_competency(NewCompetency { title: "Ops".into(), ..Default::default() })
    .await
    .unwrap();

  let err = c
    .link(Association::KnowledgeCompetency, Some(comp.id), Some(Uuid::new_v4()))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Constraint { kind: ConstraintKind::DanglingReference, .. }
  ));
}

// ─── Parent chain ────────────────────────────────────────────────────────────

#[tokio::test]
async fn course_chain_resolves_one_parent_per_view() {
  let c = composer().await;

  let org =
    c.add_reference(ReferenceKind::Organization, "UrFU".into()).await.unwrap();
  let program = c
    .add_educational_program(NewProgram {
      title: "Software Engineering".into(),
      organization_id: Some(org.id),
      ..Default::default()
    })
    .await
    .unwrap();
  let discipline = c
    .add_discipline(NewDiscipline {
      title: "Databases".into(),
      educational_program_id: Some(program.id),
      ..Default::default()
    })
    .await
    .unwrap();
  let course = c
    .add_course(NewCourse {
      title: "Databases 101".into(),
      teacher: "N. Wirth".into(),
      discipline_id: Some(discipline.id),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(program.organization.as_deref(), Some("UrFU"));
  assert_eq!(
    discipline.educational_program.as_deref(),
    Some("Software Engineering")
  );
  assert_eq!(course.discipline.as_deref(), Some("Databases"));
  assert!(course.competencies.is_empty());
}

#[tokio::test]
async fn unset_parent_stays_absent() {
  let c = composer().await;
  // A nil FK is the "unset" sentinel and must not trigger a parent lookup.
  let course = c
    .add_course(NewCourse {
      title: "Electives".into(),
      discipline_id: Some(Uuid::nil()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(course.discipline, None);
}

#[tokio::test]
async fn course_view_lists_linked_competencies() {
  let c = composer().await;
  let course = c
    .add_course(NewCourse { title: "Algorithms".into(), ..Default::default() })
    .await
    .unwrap();
  let comp = c
    .add_competency(NewCompetency {
      title: "Complexity analysis".into(),
      ..Default::default()
    })
    .await
    .unwrap();

  c.link(Association::CourseCompetency, Some(course.id), Some(comp.id))
    .await
    .unwrap();

  let view = c.course(course.id).await.unwrap();
  assert_eq!(view.competencies, vec!["Complexity analysis".to_string()]);
}

#[tokio::test]
async fn dangling_discipline_id_fails_the_upsert() {
  let c = composer().await;
  let err = c
    .add_course(NewCourse {
      title: "Orphan".into(),
      discipline_id: Some(Uuid::new_v4()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Constraint { kind: ConstraintKind::DanglingReference, .. }
  ));
}

// ─── Portfolios ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn portfolio_composes_personal_projects() {
  // Scenario: portfolio + project "P1" as Lead in semester 3.
  let c = composer().await;

  let portfolio = c.add_portfolio().await.unwrap();
  let project = c
    .add_project(NewProject {
      title: "P1".into(),
      description: "campus navigation app".into(),
      ..Default::default()
    })
    .await
    .unwrap();

  c.add_portfolio_project(Some(portfolio), Some(project.id), "Lead".into(), 3)
    .await
    .unwrap();

  let view = c.portfolio(portfolio).await.unwrap();
  assert_eq!(view.projects.len(), 1);
  let pp = &view.projects[0];
  assert_eq!(pp.title, "P1");
  assert_eq!(pp.team_role, "Lead");
  assert_eq!(pp.semester, 3);
  assert!(pp.competencies.is_empty());
}

#[tokio::test]
async fn personal_project_competencies_are_scoped_to_the_portfolio() {
  let c = composer().await;

  let project = c
    .add_project(NewProject { title: "Shared".into(), ..Default::default() })
    .await
    .unwrap();
  let comp = c
    .add_competency(NewCompetency {
      title: "Teamwork".into(),
      ..Default::default()
    })
    .await
    .unwrap();

  let mine = c.add_portfolio().await.unwrap();
  let theirs = c.add_portfolio().await.unwrap();
  c.add_portfolio_project(Some(mine), Some(project.id), "Lead".into(), 1)
    .await
    .unwrap();
  c.add_portfolio_project(Some(theirs), Some(project.id), "Member".into(), 1)
    .await
    .unwrap();

  // Competency earned in `mine` only.
  c.link_portfolio_project_competency(
    Some(mine),
    Some(project.id),
    Some(comp.id),
  )
  .await
  .unwrap();

  let mine_view = c.portfolio(mine).await.unwrap();
  assert_eq!(mine_view.projects[0].competencies, vec!["Teamwork".to_string()]);

  let theirs_view = c.portfolio(theirs).await.unwrap();
  assert!(theirs_view.projects[0].competencies.is_empty());
}

#[tokio::test]
async fn readding_a_portfolio_project_is_a_conflict() {
  let c = composer().await;
  let portfolio = c.add_portfolio().await.unwrap();
  let project = c
    .add_project(NewProject { title: "Once".into(), ..Default::default() })
    .await
    .unwrap();

  c.add_portfolio_project(Some(portfolio), Some(project.id), "Lead".into(), 1)
    .await
    .unwrap();
  let err = c
    .add_portfolio_project(Some(portfolio), Some(project.id), "Member".into(), 2)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Constraint { kind: ConstraintKind::DuplicateKey, .. }
  ));
}

#[tokio::test]
async fn missing_portfolio_is_not_found() {
  let c = composer().await;
  let err = c.portfolio(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "portfolio", .. }));
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn student_gets_a_provisioned_portfolio_and_derived_semester() {
  // Clock is pinned to June 2026; admitted September 2024 ⇒ semester 5.
  let c = composer().await;

  let student = c
    .add_student(NewStudent {
      full_name: "Alice Liddell".into(),
      admission_date: Some(d(2024, 9, 1)),
      portfolio_id: None,
    })
    .await
    .unwrap();

  assert_eq!(student.semester, 5);
  assert!(student.portfolio.projects.is_empty());
  assert!(c.store().portfolio_exists(student.portfolio.id).await.unwrap());

  let again = c.student(student.id).await.unwrap();
  assert_eq!(again.full_name, "Alice Liddell");
  assert_eq!(again.semester, 5);
  assert_eq!(again.portfolio.id, student.portfolio.id);
}

#[tokio::test]
async fn student_admitted_today_is_in_first_semester() {
  let c = composer().await;
  let student = c
    .add_student(NewStudent {
      full_name: "Bob".into(),
      admission_date: None, // defaults to today
      portfolio_id: None,
    })
    .await
    .unwrap();
  assert_eq!(student.semester, 1);
}

#[tokio::test]
async fn student_can_reuse_an_existing_portfolio() {
  let c = composer().await;
  let portfolio = c.add_portfolio().await.unwrap();

  let student = c
    .add_student(NewStudent {
      full_name: "Carol".into(),
      admission_date: Some(d(2025, 9, 1)),
      portfolio_id: Some(portfolio),
    })
    .await
    .unwrap();
  assert_eq!(student.portfolio.id, portfolio);
}

#[tokio::test]
async fn future_admission_date_is_rejected_on_write() {
  let c = composer().await;
  let err = c
    .add_student(NewStudent {
      full_name: "Dave".into(),
      admission_date: Some(d(2027, 9, 1)),
      portfolio_id: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidAdmissionDate { .. }));
}

#[tokio::test]
async fn corrupt_future_admission_fails_the_read() {
  let c = composer().await;

  // Bypass the composer's write validation to plant corrupt state.
  let row = c
    .store()
    .create_student("Eve".into(), d(2030, 9, 1), None)
    .await
    .unwrap();

  let err = c.student(row.id).await.unwrap_err();
  assert!(matches!(err, Error::InvalidAdmissionDate { .. }));
}

#[tokio::test]
async fn empty_student_name_provisions_nothing() {
  let c = composer().await;
  let err = c.add_student(NewStudent::default()).await.unwrap_err();
  assert!(matches!(err, Error::EmptyTitle));
}

// ─── Study groups ────────────────────────────────────────────────────────────

#[tokio::test]
async fn study_groups_list_current_course_titles() {
  let c = composer().await;
  let student = c
    .add_student(NewStudent {
      full_name: "Frank".into(),
      admission_date: Some(d(2025, 9, 1)),
      portfolio_id: None,
    })
    .await
    .unwrap();
  let course = c
    .add_course(NewCourse { title: "Compilers".into(), ..Default::default() })
    .await
    .unwrap();

  c.link(Association::StudyGroup, Some(student.id), Some(course.id))
    .await
    .unwrap();

  let groups = c.study_groups(student.id).await.unwrap();
  assert_eq!(groups.courses, vec!["Compilers".to_string()]);
}

// ─── Trajectories ────────────────────────────────────────────────────────────

#[tokio::test]
async fn trajectory_resolves_scalar_name_and_title() {
  let c = composer().await;
  let student = c
    .add_student(NewStudent {
      full_name: "Grace Hopper".into(),
      admission_date: Some(d(2024, 9, 1)),
      portfolio_id: None,
    })
    .await
    .unwrap();
  let course = c
    .add_course(NewCourse { title: "Numerics".into(), ..Default::default() })
    .await
    .unwrap();

  let created = c
    .add_trajectory(NewTrajectory {
      student_id: Some(student.id),
      course_id: Some(course.id),
      semester: 3,
    })
    .await
    .unwrap();
  assert_eq!(created.student, "Grace Hopper");
  assert_eq!(created.course, "Numerics");
  assert_eq!(created.semester, 3);

  let read = c.trajectory(created.id).await.unwrap();
  assert_eq!(read, created);
}

#[tokio::test]
async fn trajectory_validation() {
  let c = composer().await;

  let err = c.add_trajectory(NewTrajectory::default()).await.unwrap_err();
  assert!(matches!(err, Error::InvalidSemester));

  let err = c
    .add_trajectory(NewTrajectory {
      student_id: None,
      course_id: Some(Uuid::new_v4()),
      semester: 1,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EmptyId { field: "studentId" }));

  // Both ids present but pointing nowhere: the insert itself is rejected.
  let err = c
    .add_trajectory(NewTrajectory {
      student_id: Some(Uuid::new_v4()),
      course_id: Some(Uuid::new_v4()),
      semester: 1,
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Constraint { kind: ConstraintKind::DanglingReference, .. }
  ));
}
