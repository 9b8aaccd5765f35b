//! Pairwise association (junction) tables.
//!
//! Each variant carries the table metadata the store needs to link two rows
//! and to list the titles on the far side of the junction for one owner.
//! The triple-keyed (portfolio, project, competency) association has payload
//! semantics of its own and is handled as a dedicated store operation.

/// A many-to-many junction between an owner entity and a target entity.
///
/// "Owner" is the side aggregate reads are scoped by: a competency owns its
/// knowledge titles, a profession owns its competency titles, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Association {
  /// knowledge titles attached to a competency.
  KnowledgeCompetency,
  /// competency titles attached to a profession.
  CompetencyProfession,
  /// competency titles attached to a course.
  CourseCompetency,
  /// course titles a student is currently enrolled in.
  StudyGroup,
}

impl Association {
  pub fn junction_table(self) -> &'static str {
    match self {
      Self::KnowledgeCompetency => "knowledge_competency",
      Self::CompetencyProfession => "competency_profession",
      Self::CourseCompetency => "course_competency",
      Self::StudyGroup => "study_groups",
    }
  }

  /// Junction column holding the owning side's id.
  pub fn owner_column(self) -> &'static str {
    match self {
      Self::KnowledgeCompetency => "competency_id",
      Self::CompetencyProfession => "profession_id",
      Self::CourseCompetency => "course_id",
      Self::StudyGroup => "student_id",
    }
  }

  /// Junction column holding the target side's id.
  pub fn target_column(self) -> &'static str {
    match self {
      Self::KnowledgeCompetency => "knowledge_id",
      Self::CompetencyProfession => "competency_id",
      Self::CourseCompetency => "competency_id",
      Self::StudyGroup => "course_id",
    }
  }

  /// Table the target ids point into; its `title` column feeds list reads.
  pub fn target_table(self) -> &'static str {
    match self {
      Self::KnowledgeCompetency => "knowledge",
      Self::CompetencyProfession | Self::CourseCompetency => "competencies",
      Self::StudyGroup => "courses",
    }
  }

  pub fn target_id_column(self) -> &'static str {
    match self {
      Self::KnowledgeCompetency => "knowledge_id",
      Self::CompetencyProfession | Self::CourseCompetency => "competency_id",
      Self::StudyGroup => "course_id",
    }
  }

  /// Field names reported in `EmptyId` validation errors, owner side first.
  pub fn id_fields(self) -> (&'static str, &'static str) {
    match self {
      Self::KnowledgeCompetency => ("competencyId", "knowledgeId"),
      Self::CompetencyProfession => ("professionId", "competencyId"),
      Self::CourseCompetency => ("courseId", "competencyId"),
      Self::StudyGroup => ("studentId", "courseId"),
    }
  }
}
