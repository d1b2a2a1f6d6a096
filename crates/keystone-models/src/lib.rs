//! # Keystone Models
//!
//! Domain models and DTOs for the Keystone planning engine.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed entity identifiers
//! - [`calendar`]: Date ranges, calendar facts and planning windows
//! - [`curriculum`]: Curriculum units and topics
//! - [`pacing`]: Weekly pacing suggestions and risk signals
//! - [`lesson_plans`]: Lesson plan and assessment records used as context
//! - [`drafts`]: Draft plan sessions, patches and confirmation tokens
//!
//! # Example
//!
//! ```ignore
//! use keystone_models::calendar::DateRange;
//! use keystone_models::drafts::GenerateDraftPlanDto;
//!
//! let range = DateRange::new(start, end)?;
//! ```

pub mod calendar;
pub mod curriculum;
pub mod drafts;
pub mod ids;
pub mod lesson_plans;
pub mod pacing;

// Re-export commonly used types at crate root for convenience
pub use calendar::{
    DateRange, ExamPeriod, Holiday, LostDay, LostDayReason, PlanningWindow, TeachingCalendar,
};
pub use curriculum::{
    CurriculumStructure, CurriculumTopic, CurriculumUnit, MAX_ESTIMATED_WEEKS,
    normalize_estimated_weeks,
};
pub use drafts::{
    AcceptedDraftPlan, ConfirmationToken, DraftPlan, DraftPlanPatch, GenerateDraftPlanDto,
};
pub use lesson_plans::{
    AssessmentSummary, ClassPlacement, LessonPlanStatus, LessonPlanSummary, NewLessonPlan,
};
pub use pacing::{
    MAX_OVERFLOW_WEEKS_LISTED, RiskSeverity, RiskSignal, RiskType, TopicAssignment, WeekAssignment,
};
