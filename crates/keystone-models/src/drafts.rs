//! Draft plan session models and DTOs.
//!
//! A draft plan is an ephemeral planning proposal held in memory. It carries
//! the computed planning window, pacing suggestions, risk signals and
//! read-only context, and can be modified until it is accepted or discarded.
//! Nothing is persisted until an accepted confirmation.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use keystone_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::calendar::{DateRange, PlanningWindow};
use crate::ids::{ClassId, DraftSessionId, GradeId, LessonPlanId, SchoolId, SubjectId, TeacherId};
use crate::lesson_plans::{AssessmentSummary, LessonPlanSummary};
use crate::pacing::{RiskSignal, WeekAssignment};

fn validate_generate_range(dto: &GenerateDraftPlanDto) -> Result<(), ValidationError> {
    if dto.start_date >= dto.end_date {
        let mut err = ValidationError::new("date_range");
        err.message = Some(Cow::Borrowed("start_date must be before end_date"));
        return Err(err);
    }
    Ok(())
}

/// Request to generate a draft plan for a class and subject.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_generate_range"))]
pub struct GenerateDraftPlanDto {
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    /// Planning window start (inclusive)
    pub start_date: NaiveDate,
    /// Planning window end (inclusive, after start_date)
    pub end_date: NaiveDate,
}

impl GenerateDraftPlanDto {
    pub fn range(&self) -> Result<DateRange, AppError> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Changes applied to a draft by `modify`.
///
/// Any date bound triggers a recomputation of the planning window; omitted
/// bounds keep their current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DraftPlanPatch {
    /// Replaces the pacing suggestions wholesale
    pub pacing_suggestions: Option<Vec<WeekAssignment>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DraftPlanPatch {
    pub fn changes_window(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

/// Snapshot of a draft plan session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DraftPlan {
    pub session_id: DraftSessionId,
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub school_id: SchoolId,
    pub grade_id: GradeId,
    pub planning_window: PlanningWindow,
    pub pacing_suggestions: Vec<WeekAssignment>,
    pub risk_signals: Vec<RiskSignal>,
    pub existing_plans_context: Vec<LessonPlanSummary>,
    pub existing_assessments_context: Vec<AssessmentSummary>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl DraftPlan {
    /// Number of (week, topic) pairs an accept would persist.
    pub fn scheduled_topic_count(&self) -> usize {
        self.pacing_suggestions
            .iter()
            .map(|week| week.topics.len())
            .sum()
    }
}

/// Opaque single-use token confirming a draft acceptance.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ConfirmationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ConfirmationToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Tokens stay out of logs.
impl fmt::Debug for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfirmationToken(***)")
    }
}

/// Outcome of a committed draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AcceptedDraftPlan {
    pub session_id: DraftSessionId,
    /// Created lesson plans, in (week, topic) order
    pub lesson_plan_ids: Vec<LessonPlanId>,
}
