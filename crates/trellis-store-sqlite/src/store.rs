//! [`SqliteStore`], the SQLite implementation of [`CurriculumStore`].
//!
//! Table and column names for references and pairwise associations come from
//! the metadata on [`ReferenceKind`] and [`Association`], so one upsert/get/
//! link implementation serves every lookup table and junction. All names are
//! `&'static str` from those enums, never caller input.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use trellis_core::{
  Result,
  association::Association,
  catalog::{
    CompetencyRow, CourseRow, DisciplineRow, NewCompetency, NewCourse,
    NewDiscipline, NewProfession, NewProgram, NewProject, ProfessionRow,
    ProgramRow, ProjectRow,
  },
  enrollment::{PortfolioEntry, StudentRow, TrajectoryRow},
  reference::{Reference, ReferenceKind},
  store::CurriculumStore,
};

use crate::{
  encode::{
    decode_date, decode_opt_uuid, decode_uuid, encode_date, encode_opt_uuid,
    encode_uuid,
  },
  error::classify,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A curriculum store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(classify)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(classify)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(classify)
  }

  /// Run the upsert-by-title statement for any table with a unique `title`
  /// column. A single conditional write: the `ON CONFLICT .. DO UPDATE`
  /// no-op forces `RETURNING` to yield the surviving row's id whether the
  /// insert happened or collided.
  async fn upsert_by_title(
    &self,
    sql: String,
    params: Vec<Option<String>>,
  ) -> Result<Uuid> {
    let resolved: String = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &sql,
          rusqlite::params_from_iter(params),
          |r| r.get(0),
        )?)
      })
      .await
      .map_err(classify)?;
    decode_uuid(&resolved)
  }
}

// ─── CurriculumStore impl ────────────────────────────────────────────────────

impl CurriculumStore for SqliteStore {
  // ── Reference entities ─────────────────────────────────────────────────

  async fn upsert_reference(
    &self,
    kind: ReferenceKind,
    title: String,
  ) -> Result<Uuid> {
    let sql = format!(
      "INSERT INTO {table} ({id_col}, title) VALUES (?1, ?2)
       ON CONFLICT (title) DO UPDATE SET title = excluded.title
       RETURNING {id_col}",
      table = kind.table(),
      id_col = kind.id_column(),
    );
    self
      .upsert_by_title(sql, vec![
        Some(encode_uuid(Uuid::new_v4())),
        Some(title),
      ])
      .await
  }

  async fn get_reference(
    &self,
    kind: ReferenceKind,
    id: Uuid,
  ) -> Result<Option<Reference>> {
    let sql = format!(
      "SELECT {id_col}, title FROM {table} WHERE {id_col} = ?1",
      table = kind.table(),
      id_col = kind.id_column(),
    );
    let id_str = encode_uuid(id);
    let raw: Option<(String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], |r| {
              Ok((r.get(0)?, r.get(1)?))
            })
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    raw
      .map(|(id, title)| Ok(Reference { id: decode_uuid(&id)?, title }))
      .transpose()
  }

  async fn list_reference_titles(
    &self,
    kind: ReferenceKind,
  ) -> Result<Vec<String>> {
    let sql =
      format!("SELECT title FROM {table} ORDER BY title", table = kind.table());
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let titles = stmt
          .query_map([], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(titles)
      })
      .await
      .map_err(classify)
  }

  // ── Linked entities ────────────────────────────────────────────────────

  async fn upsert_competency(&self, input: NewCompetency) -> Result<Uuid> {
    let sql = "INSERT INTO competencies \
                 (competency_id, title, skills, main_technology_id) \
               VALUES (?1, ?2, ?3, ?4) \
               ON CONFLICT (title) DO UPDATE SET title = excluded.title \
               RETURNING competency_id";
    self
      .upsert_by_title(sql.to_owned(), vec![
        Some(encode_uuid(Uuid::new_v4())),
        Some(input.title),
        Some(input.skills),
        encode_opt_uuid(input.main_technology_id),
      ])
      .await
  }

  async fn get_competency_row(&self, id: Uuid) -> Result<Option<CompetencyRow>> {
    let id_str = encode_uuid(id);
    let raw: Option<(String, String, String, Option<String>)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT competency_id, title, skills, main_technology_id
               FROM competencies WHERE competency_id = ?1",
              rusqlite::params![id_str],
              |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    raw
      .map(|(id, title, skills, tech)| {
        Ok(CompetencyRow {
          id: decode_uuid(&id)?,
          title,
          skills,
          main_technology_id: decode_opt_uuid(tech.as_deref())?,
        })
      })
      .transpose()
  }

  async fn upsert_profession(&self, input: NewProfession) -> Result<Uuid> {
    let sql = "INSERT INTO professions (profession_id, title, description) \
               VALUES (?1, ?2, ?3) \
               ON CONFLICT (title) DO UPDATE SET title = excluded.title \
               RETURNING profession_id";
    self
      .upsert_by_title(sql.to_owned(), vec![
        Some(encode_uuid(Uuid::new_v4())),
        Some(input.title),
        Some(input.description),
      ])
      .await
  }

  async fn get_profession_row(&self, id: Uuid) -> Result<Option<ProfessionRow>> {
    let id_str = encode_uuid(id);
    let raw: Option<(String, String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT profession_id, title, description
               FROM professions WHERE profession_id = ?1",
              rusqlite::params![id_str],
              |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    raw
      .map(|(id, title, description)| {
        Ok(ProfessionRow { id: decode_uuid(&id)?, title, description })
      })
      .transpose()
  }

  async fn upsert_project(&self, input: NewProject) -> Result<Uuid> {
    let sql = "INSERT INTO projects \
                 (project_id, title, description, result, life_scenario, \
                  main_technology_id) \
               VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
               ON CONFLICT (title) DO UPDATE SET title = excluded.title \
               RETURNING project_id";
    self
      .upsert_by_title(sql.to_owned(), vec![
        Some(encode_uuid(Uuid::new_v4())),
        Some(input.title),
        Some(input.description),
        Some(input.result),
        Some(input.life_scenario),
        encode_opt_uuid(input.main_technology_id),
      ])
      .await
  }

  async fn get_project_row(&self, id: Uuid) -> Result<Option<ProjectRow>> {
    let id_str = encode_uuid(id);
    #[allow(clippy::type_complexity)]
    let raw: Option<(String, String, String, String, String, Option<String>)> =
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT project_id, title, description, result,
                        life_scenario, main_technology_id
                 FROM projects WHERE project_id = ?1",
                rusqlite::params![id_str],
                |r| {
                  Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                  ))
                },
              )
              .optional()?,
          )
        })
        .await
        .map_err(classify)?;

    raw
      .map(|(id, title, description, result, life_scenario, tech)| {
        Ok(ProjectRow {
          id: decode_uuid(&id)?,
          title,
          description,
          result,
          life_scenario,
          main_technology_id: decode_opt_uuid(tech.as_deref())?,
        })
      })
      .transpose()
  }

  async fn upsert_program(&self, input: NewProgram) -> Result<Uuid> {
    let sql = "INSERT INTO educational_programs \
                 (educational_program_id, title, description, organization_id) \
               VALUES (?1, ?2, ?3, ?4) \
               ON CONFLICT (title) DO UPDATE SET title = excluded.title \
               RETURNING educational_program_id";
    self
      .upsert_by_title(sql.to_owned(), vec![
        Some(encode_uuid(Uuid::new_v4())),
        Some(input.title),
        Some(input.description),
        encode_opt_uuid(input.organization_id),
      ])
      .await
  }

  async fn get_program_row(&self, id: Uuid) -> Result<Option<ProgramRow>> {
    let id_str = encode_uuid(id);
    let raw: Option<(String, String, String, Option<String>)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT educational_program_id, title, description,
                      organization_id
               FROM educational_programs WHERE educational_program_id = ?1",
              rusqlite::params![id_str],
              |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    raw
      .map(|(id, title, description, org)| {
        Ok(ProgramRow {
          id: decode_uuid(&id)?,
          title,
          description,
          organization_id: decode_opt_uuid(org.as_deref())?,
        })
      })
      .transpose()
  }

  async fn upsert_discipline(&self, input: NewDiscipline) -> Result<Uuid> {
    let sql = "INSERT INTO disciplines \
                 (discipline_id, title, description, educational_program_id) \
               VALUES (?1, ?2, ?3, ?4) \
               ON CONFLICT (title) DO UPDATE SET title = excluded.title \
               RETURNING discipline_id";
    self
      .upsert_by_title(sql.to_owned(), vec![
        Some(encode_uuid(Uuid::new_v4())),
        Some(input.title),
        Some(input.description),
        encode_opt_uuid(input.educational_program_id),
      ])
      .await
  }

  async fn get_discipline_row(&self, id: Uuid) -> Result<Option<DisciplineRow>> {
    let id_str = encode_uuid(id);
    let raw: Option<(String, String, String, Option<String>)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT discipline_id, title, description,
                      educational_program_id
               FROM disciplines WHERE discipline_id = ?1",
              rusqlite::params![id_str],
              |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    raw
      .map(|(id, title, description, program)| {
        Ok(DisciplineRow {
          id: decode_uuid(&id)?,
          title,
          description,
          program_id: decode_opt_uuid(program.as_deref())?,
        })
      })
      .transpose()
  }

  async fn upsert_course(&self, input: NewCourse) -> Result<Uuid> {
    let sql = "INSERT INTO courses \
                 (course_id, title, description, teacher, discipline_id) \
               VALUES (?1, ?2, ?3, ?4, ?5) \
               ON CONFLICT (title) DO UPDATE SET title = excluded.title \
               RETURNING course_id";
    self
      .upsert_by_title(sql.to_owned(), vec![
        Some(encode_uuid(Uuid::new_v4())),
        Some(input.title),
        Some(input.description),
        Some(input.teacher),
        encode_opt_uuid(input.discipline_id),
      ])
      .await
  }

  async fn get_course_row(&self, id: Uuid) -> Result<Option<CourseRow>> {
    let id_str = encode_uuid(id);
    let raw: Option<(String, String, String, String, Option<String>)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT course_id, title, description, teacher, discipline_id
               FROM courses WHERE course_id = ?1",
              rusqlite::params![id_str],
              |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    raw
      .map(|(id, title, description, teacher, discipline)| {
        Ok(CourseRow {
          id: decode_uuid(&id)?,
          title,
          description,
          teacher,
          discipline_id: decode_opt_uuid(discipline.as_deref())?,
        })
      })
      .transpose()
  }

  // ── Associations ───────────────────────────────────────────────────────

  async fn link(
    &self,
    assoc: Association,
    owner: Uuid,
    target: Uuid,
  ) -> Result<()> {
    let sql = format!(
      "INSERT INTO {junction} ({owner_col}, {target_col}) VALUES (?1, ?2)
       ON CONFLICT DO NOTHING",
      junction = assoc.junction_table(),
      owner_col = assoc.owner_column(),
      target_col = assoc.target_column(),
    );
    let owner_str = encode_uuid(owner);
    let target_str = encode_uuid(target);
    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params![owner_str, target_str])?;
        Ok(())
      })
      .await
      .map_err(classify)
  }

  async fn titles_for(
    &self,
    assoc: Association,
    owner: Uuid,
  ) -> Result<Vec<String>> {
    let sql = format!(
      "SELECT title FROM {target_table}
       WHERE {target_id} IN
         (SELECT {target_col} FROM {junction} WHERE {owner_col} = ?1)
       ORDER BY title",
      target_table = assoc.target_table(),
      target_id = assoc.target_id_column(),
      target_col = assoc.target_column(),
      junction = assoc.junction_table(),
      owner_col = assoc.owner_column(),
    );
    let owner_str = encode_uuid(owner);
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let titles = stmt
          .query_map(rusqlite::params![owner_str], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(titles)
      })
      .await
      .map_err(classify)
  }

  async fn link_portfolio_project_competency(
    &self,
    portfolio: Uuid,
    project: Uuid,
    competency: Uuid,
  ) -> Result<()> {
    let competency_str = encode_uuid(competency);
    let project_str = encode_uuid(project);
    let portfolio_str = encode_uuid(portfolio);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO project_portfolio_competency
             (competency_id, project_id, portfolio_id)
           VALUES (?1, ?2, ?3)
           ON CONFLICT DO NOTHING",
          rusqlite::params![competency_str, project_str, portfolio_str],
        )?;
        Ok(())
      })
      .await
      .map_err(classify)
  }

  async fn personal_project_competency_titles(
    &self,
    portfolio: Uuid,
    project: Uuid,
  ) -> Result<Vec<String>> {
    let portfolio_str = encode_uuid(portfolio);
    let project_str = encode_uuid(project);
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT title FROM competencies
           WHERE competency_id IN
             (SELECT competency_id FROM project_portfolio_competency
              WHERE portfolio_id = ?1 AND project_id = ?2)
           ORDER BY title",
        )?;
        let titles = stmt
          .query_map(rusqlite::params![portfolio_str, project_str], |r| {
            r.get(0)
          })?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(titles)
      })
      .await
      .map_err(classify)
  }

  // ── Portfolios ─────────────────────────────────────────────────────────

  async fn create_portfolio(&self) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO portfolios (portfolio_id) VALUES (?1)",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await
      .map_err(classify)?;
    Ok(id)
  }

  async fn portfolio_exists(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        let found: bool = conn
          .query_row(
            "SELECT 1 FROM portfolios WHERE portfolio_id = ?1",
            rusqlite::params![id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        Ok(found)
      })
      .await
      .map_err(classify)
  }

  async fn add_portfolio_project(
    &self,
    portfolio: Uuid,
    project: Uuid,
    team_role: String,
    semester: u8,
  ) -> Result<()> {
    let project_str = encode_uuid(project);
    let portfolio_str = encode_uuid(portfolio);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO project_portfolio
             (project_id, portfolio_id, team_role, semester)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            project_str,
            portfolio_str,
            team_role,
            i64::from(semester)
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(classify)
  }

  async fn portfolio_entries(
    &self,
    portfolio: Uuid,
  ) -> Result<Vec<PortfolioEntry>> {
    let portfolio_str = encode_uuid(portfolio);
    let raw: Vec<(String, String, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT project_id, team_role, semester
           FROM project_portfolio WHERE portfolio_id = ?1
           ORDER BY semester, project_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![portfolio_str], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(classify)?;

    raw
      .into_iter()
      .map(|(project, team_role, semester)| {
        Ok(PortfolioEntry {
          project_id: decode_uuid(&project)?,
          team_role,
          semester: semester.clamp(0, i64::from(u8::MAX)) as u8,
        })
      })
      .collect()
  }

  // ── Students ───────────────────────────────────────────────────────────

  async fn create_student(
    &self,
    full_name: String,
    admission: NaiveDate,
    portfolio_id: Option<Uuid>,
  ) -> Result<StudentRow> {
    let student_id = Uuid::new_v4();
    let provisioned = portfolio_id.unwrap_or_else(Uuid::new_v4);
    let provision = portfolio_id.is_none();

    let student_str = encode_uuid(student_id);
    let portfolio_str = encode_uuid(provisioned);
    let name = full_name.clone();
    let admission_str = encode_date(admission);

    // Portfolio provisioning and the student insert commit together: a
    // failed student insert must not leave an orphan portfolio behind.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if provision {
          tx.execute(
            "INSERT INTO portfolios (portfolio_id) VALUES (?1)",
            rusqlite::params![portfolio_str],
          )?;
        }
        tx.execute(
          "INSERT INTO students (student_id, full_name, portfolio_id, admission)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![student_str, name, portfolio_str, admission_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(classify)?;

    Ok(StudentRow {
      id: student_id,
      full_name,
      portfolio_id: provisioned,
      admission,
    })
  }

  async fn get_student_row(&self, id: Uuid) -> Result<Option<StudentRow>> {
    let id_str = encode_uuid(id);
    let raw: Option<(String, String, String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT student_id, full_name, portfolio_id, admission
               FROM students WHERE student_id = ?1",
              rusqlite::params![id_str],
              |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    raw
      .map(|(id, full_name, portfolio, admission)| {
        Ok(StudentRow {
          id: decode_uuid(&id)?,
          full_name,
          portfolio_id: decode_uuid(&portfolio)?,
          admission: decode_date(&admission)?,
        })
      })
      .transpose()
  }

  // ── Trajectories ───────────────────────────────────────────────────────

  async fn create_trajectory(
    &self,
    student_id: Uuid,
    course_id: Uuid,
    semester: u8,
  ) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let id_str = encode_uuid(id);
    let student_str = encode_uuid(student_id);
    let course_str = encode_uuid(course_id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO trajectories
             (trajectory_id, student_id, course_id, semester)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            id_str,
            student_str,
            course_str,
            i64::from(semester)
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(classify)?;
    Ok(id)
  }

  async fn get_trajectory_row(&self, id: Uuid) -> Result<Option<TrajectoryRow>> {
    let id_str = encode_uuid(id);
    let raw: Option<(String, String, String, i64)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT trajectory_id, student_id, course_id, semester
               FROM trajectories WHERE trajectory_id = ?1",
              rusqlite::params![id_str],
              |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    raw
      .map(|(id, student, course, semester)| {
        Ok(TrajectoryRow {
          id: decode_uuid(&id)?,
          student_id: decode_uuid(&student)?,
          course_id: decode_uuid(&course)?,
          semester: semester.clamp(0, i64::from(u8::MAX)) as u8,
        })
      })
      .transpose()
  }
}
