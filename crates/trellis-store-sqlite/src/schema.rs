//! SQL schema for the Trellis SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every reference and catalog table enforces `UNIQUE (title)`, the natural
/// key the atomic upserts resolve against. Junction tables use composite
/// primary keys so association writes can be insert-or-ignore.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Reference entities: lookup tables keyed by a unique title.
CREATE TABLE IF NOT EXISTS knowledge (
    knowledge_id TEXT PRIMARY KEY,
    title        TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS technologies (
    technology_id TEXT PRIMARY KEY,
    title         TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS organizations (
    organization_id TEXT PRIMARY KEY,
    title           TEXT NOT NULL UNIQUE
);

-- Catalog entities: unique title plus at most one optional parent FK.
CREATE TABLE IF NOT EXISTS competencies (
    competency_id      TEXT PRIMARY KEY,
    title              TEXT NOT NULL UNIQUE,
    skills             TEXT NOT NULL DEFAULT '',
    main_technology_id TEXT REFERENCES technologies(technology_id)
);

CREATE TABLE IF NOT EXISTS professions (
    profession_id TEXT PRIMARY KEY,
    title         TEXT NOT NULL UNIQUE,
    description   TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS projects (
    project_id         TEXT PRIMARY KEY,
    title              TEXT NOT NULL UNIQUE,
    description        TEXT NOT NULL DEFAULT '',
    result             TEXT NOT NULL DEFAULT '',
    life_scenario      TEXT NOT NULL DEFAULT '',
    main_technology_id TEXT REFERENCES technologies(technology_id)
);

CREATE TABLE IF NOT EXISTS educational_programs (
    educational_program_id TEXT PRIMARY KEY,
    title                  TEXT NOT NULL UNIQUE,
    description            TEXT NOT NULL DEFAULT '',
    organization_id        TEXT REFERENCES organizations(organization_id)
);

CREATE TABLE IF NOT EXISTS disciplines (
    discipline_id          TEXT PRIMARY KEY,
    title                  TEXT NOT NULL UNIQUE,
    description            TEXT NOT NULL DEFAULT '',
    educational_program_id TEXT REFERENCES educational_programs(educational_program_id)
);

CREATE TABLE IF NOT EXISTS courses (
    course_id     TEXT PRIMARY KEY,
    title         TEXT NOT NULL UNIQUE,
    description   TEXT NOT NULL DEFAULT '',
    teacher       TEXT NOT NULL DEFAULT '',
    discipline_id TEXT REFERENCES disciplines(discipline_id)
);

-- Portfolios and students.
CREATE TABLE IF NOT EXISTS portfolios (
    portfolio_id TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS students (
    student_id   TEXT PRIMARY KEY,
    full_name    TEXT NOT NULL,
    portfolio_id TEXT NOT NULL REFERENCES portfolios(portfolio_id),
    admission    TEXT NOT NULL      -- ISO 8601 date (YYYY-MM-DD)
);

CREATE TABLE IF NOT EXISTS trajectories (
    trajectory_id TEXT PRIMARY KEY,
    student_id    TEXT NOT NULL REFERENCES students(student_id),
    course_id     TEXT NOT NULL REFERENCES courses(course_id),
    semester      INTEGER NOT NULL
);

-- Pairwise associations. Composite primary keys make re-linking a no-op.
CREATE TABLE IF NOT EXISTS knowledge_competency (
    knowledge_id  TEXT NOT NULL REFERENCES knowledge(knowledge_id),
    competency_id TEXT NOT NULL REFERENCES competencies(competency_id),
    PRIMARY KEY (knowledge_id, competency_id)
);

CREATE TABLE IF NOT EXISTS competency_profession (
    competency_id TEXT NOT NULL REFERENCES competencies(competency_id),
    profession_id TEXT NOT NULL REFERENCES professions(profession_id),
    PRIMARY KEY (competency_id, profession_id)
);

CREATE TABLE IF NOT EXISTS course_competency (
    course_id     TEXT NOT NULL REFERENCES courses(course_id),
    competency_id TEXT NOT NULL REFERENCES competencies(competency_id),
    PRIMARY KEY (course_id, competency_id)
);

CREATE TABLE IF NOT EXISTS study_groups (
    course_id  TEXT NOT NULL REFERENCES courses(course_id),
    student_id TEXT NOT NULL REFERENCES students(student_id),
    PRIMARY KEY (course_id, student_id)
);

-- Portfolio membership carries payload (role, semester); the row is
-- immutable once written, so a duplicate pair is a conflict, not a no-op.
CREATE TABLE IF NOT EXISTS project_portfolio (
    project_id   TEXT NOT NULL REFERENCES projects(project_id),
    portfolio_id TEXT NOT NULL REFERENCES portfolios(portfolio_id),
    team_role    TEXT NOT NULL DEFAULT '',
    semester     INTEGER NOT NULL,
    PRIMARY KEY (project_id, portfolio_id)
);

CREATE TABLE IF NOT EXISTS project_portfolio_competency (
    competency_id TEXT NOT NULL REFERENCES competencies(competency_id),
    project_id    TEXT NOT NULL REFERENCES projects(project_id),
    portfolio_id  TEXT NOT NULL REFERENCES portfolios(portfolio_id),
    PRIMARY KEY (competency_id, project_id, portfolio_id)
);

CREATE INDEX IF NOT EXISTS project_portfolio_portfolio_idx
    ON project_portfolio(portfolio_id);
CREATE INDEX IF NOT EXISTS ppc_scope_idx
    ON project_portfolio_competency(portfolio_id, project_id);
CREATE INDEX IF NOT EXISTS study_groups_student_idx
    ON study_groups(student_id);

PRAGMA user_version = 1;
";
