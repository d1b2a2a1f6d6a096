//! Curriculum structure models.
//!
//! A curriculum is read-only reference material for a (school, grade,
//! subject) triple: an ordered list of units, each holding ordered topics.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{TopicId, UnitId};

/// Longest estimate a single topic may carry, in weeks.
pub const MAX_ESTIMATED_WEEKS: u32 = 52;

fn default_estimated_weeks() -> u32 {
    1
}

/// Clamp a raw week estimate into `1..=MAX_ESTIMATED_WEEKS`.
///
/// Missing, zero and negative estimates count as one week.
pub fn normalize_estimated_weeks(raw: Option<i64>) -> u32 {
    match raw {
        Some(weeks) if weeks >= i64::from(MAX_ESTIMATED_WEEKS) => MAX_ESTIMATED_WEEKS,
        Some(weeks) if weeks >= 1 => weeks as u32,
        _ => 1,
    }
}

fn deserialize_estimated_weeks<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<i64> = Option::deserialize(deserializer)?;
    Ok(normalize_estimated_weeks(raw))
}

/// Topic within a curriculum unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CurriculumTopic {
    /// Unique identifier for the topic
    pub id: TopicId,
    /// Topic name, used as the lesson plan topic on commit
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Position within the unit; unsequenced topics sort last
    pub sequence_order: Option<i32>,
    /// Weeks this topic is expected to take (defaults to 1)
    #[validate(range(min = 1, max = 52))]
    #[serde(
        default = "default_estimated_weeks",
        deserialize_with = "deserialize_estimated_weeks"
    )]
    pub estimated_weeks: u32,
}

impl CurriculumTopic {
    /// `estimated_weeks` clamped into `1..=MAX_ESTIMATED_WEEKS`.
    pub fn planned_weeks(&self) -> u32 {
        self.estimated_weeks.clamp(1, MAX_ESTIMATED_WEEKS)
    }
}

/// Unit grouping a sequence of topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CurriculumUnit {
    /// Unique identifier for the unit
    pub id: UnitId,
    /// Unit name
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Position within the curriculum; unsequenced units sort last
    pub sequence_order: Option<i32>,
    /// Topics of the unit
    #[validate(nested)]
    #[serde(default)]
    pub topics: Vec<CurriculumTopic>,
}

/// Complete curriculum scope for one subject in one grade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CurriculumStructure {
    #[validate(nested)]
    #[serde(default)]
    pub units: Vec<CurriculumUnit>,
}

fn by_sequence(a: (Option<i32>, &str), b: (Option<i32>, &str)) -> Ordering {
    match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.1.cmp(b.1))
}

impl CurriculumUnit {
    /// Topics ordered by `sequence_order`, then name.
    pub fn ordered_topics(&self) -> Vec<&CurriculumTopic> {
        let mut topics: Vec<_> = self.topics.iter().collect();
        topics.sort_by(|a, b| {
            by_sequence((a.sequence_order, &a.name), (b.sequence_order, &b.name))
        });
        topics
    }
}

impl CurriculumStructure {
    /// Units ordered by `sequence_order`, then name.
    pub fn ordered_units(&self) -> Vec<&CurriculumUnit> {
        let mut units: Vec<_> = self.units.iter().collect();
        units.sort_by(|a, b| {
            by_sequence((a.sequence_order, &a.name), (b.sequence_order, &b.name))
        });
        units
    }

    /// Sum of planned weeks over every topic, saturating at `u32::MAX`.
    pub fn total_estimated_weeks(&self) -> u32 {
        self.units
            .iter()
            .flat_map(|unit| unit.topics.iter())
            .fold(0u32, |total, topic| total.saturating_add(topic.planned_weeks()))
    }

    pub fn topic_count(&self) -> usize {
        self.units.iter().map(|unit| unit.topics.len()).sum()
    }
}
