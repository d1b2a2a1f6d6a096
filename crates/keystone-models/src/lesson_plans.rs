//! Lesson plan and assessment records as seen by the planning engine.
//!
//! The planning engine only reads summaries of existing records for context
//! and creates new lesson plans when a draft is accepted.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use keystone_core::AppError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{AssessmentId, ClassId, GradeId, LessonPlanId, SchoolId, SubjectId, TeacherId};

/// School and grade a class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassPlacement {
    pub school_id: SchoolId,
    pub grade_id: GradeId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LessonPlanStatus {
    /// Editable, not yet finalized by the teacher
    #[default]
    Draft,
    Finalized,
}

impl LessonPlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Finalized => "finalized",
        }
    }
}

impl fmt::Display for LessonPlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonPlanStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "finalized" => Ok(Self::Finalized),
            other => Err(AppError::validation(anyhow!(
                "Unknown lesson plan status: {}",
                other
            ))),
        }
    }
}

/// Existing lesson plan shown as planning context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LessonPlanSummary {
    pub id: LessonPlanId,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub topic: Option<String>,
    pub status: LessonPlanStatus,
}

/// Fields for a lesson plan to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewLessonPlan {
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub status: LessonPlanStatus,
    pub instructional_notes: Option<String>,
    pub topic: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Existing assessment shown as planning context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssessmentSummary {
    pub id: AssessmentId,
    pub date: NaiveDate,
    pub name: String,
}
