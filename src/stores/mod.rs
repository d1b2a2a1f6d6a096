//! PostgreSQL-backed planning collaborators.
//!
//! Each store wraps the shared [`PgPool`] and reports query failures as
//! collaborator errors. Runtime-checked queries are used throughout so the
//! crate builds without a live database.

mod assessments;
mod calendar;
mod classes;
mod curriculum;
mod lesson_plans;

use std::sync::Arc;

use keystone_planning::PlanningStores;
use sqlx::PgPool;

pub use assessments::PgAssessmentStore;
pub use calendar::PgCalendarStore;
pub use classes::PgClassDirectory;
pub use curriculum::PgCurriculumStore;
pub use lesson_plans::PgLessonPlanStore;

/// Every planning collaborator backed by the same pool.
pub fn pg_planning_stores(pool: &PgPool) -> PlanningStores {
    PlanningStores {
        classes: Arc::new(PgClassDirectory::new(pool.clone())),
        curriculum: Arc::new(PgCurriculumStore::new(pool.clone())),
        calendar: Arc::new(PgCalendarStore::new(pool.clone())),
        lesson_plans: Arc::new(PgLessonPlanStore::new(pool.clone())),
        assessments: Arc::new(PgAssessmentStore::new(pool.clone())),
    }
}
