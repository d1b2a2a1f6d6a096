//! Collaborator interfaces consumed by the planning engine.
//!
//! The engine never talks to a database directly. Every read goes through
//! one of these traits, and the only write is [`PlanRecordStore::create`],
//! which is reached exclusively from an accepted draft. Implementations
//! report their own failures as [`AppError`]s of kind `Collaborator`; the
//! engine propagates them unchanged and never retries.

use async_trait::async_trait;
use chrono::NaiveDate;
use keystone_core::AppError;
use keystone_models::{
    AssessmentSummary, ClassPlacement, CurriculumStructure, DateRange, ExamPeriod, Holiday,
    LessonPlanSummary, NewLessonPlan,
    ids::{ClassId, GradeId, LessonPlanId, SchoolId, SubjectId},
};

/// Resolves the school and grade a class belongs to.
#[async_trait]
pub trait ClassDirectory: Send + Sync {
    /// `Ok(None)` when the class does not exist.
    async fn resolve(&self, class_id: ClassId) -> Result<Option<ClassPlacement>, AppError>;
}

/// Read-only access to curriculum structures.
#[async_trait]
pub trait CurriculumStore: Send + Sync {
    async fn get_structure(
        &self,
        school_id: SchoolId,
        grade_id: GradeId,
        subject_id: SubjectId,
    ) -> Result<CurriculumStructure, AppError>;
}

/// Read-only access to a school's calendar facts.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Dates marked as teaching days within `range`.
    async fn teaching_days(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<NaiveDate>, AppError>;

    /// Holidays dated within `range`.
    async fn holidays(&self, school_id: SchoolId, range: DateRange)
    -> Result<Vec<Holiday>, AppError>;

    /// Exam periods overlapping `range`.
    async fn exam_periods(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<ExamPeriod>, AppError>;
}

/// Lesson plan persistence.
#[async_trait]
pub trait PlanRecordStore: Send + Sync {
    /// Lesson plans of a class and subject starting or ending inside `range`.
    async fn list(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        range: DateRange,
    ) -> Result<Vec<LessonPlanSummary>, AppError>;

    async fn create(&self, plan: &NewLessonPlan) -> Result<LessonPlanId, AppError>;

    /// Persist several plans in order.
    ///
    /// The default calls [`create`](Self::create) once per plan and stops at
    /// the first failure without undoing earlier writes. Stores with
    /// transactions should override this to make the batch atomic.
    async fn create_batch(&self, plans: &[NewLessonPlan]) -> Result<Vec<LessonPlanId>, AppError> {
        let mut ids = Vec::with_capacity(plans.len());
        for plan in plans {
            ids.push(self.create(plan).await?);
        }
        Ok(ids)
    }
}

/// Read-only access to assessments.
#[async_trait]
pub trait AssessmentRecordStore: Send + Sync {
    /// Assessments of a class and subject dated inside `range`.
    async fn list(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        range: DateRange,
    ) -> Result<Vec<AssessmentSummary>, AppError>;
}
