//! Pacing suggestions and risk signals.
//!
//! Both are advisory. A pacing suggestion is a heuristic weekly assignment of
//! curriculum topics; a risk signal flags a scope-versus-time mismatch and
//! never blocks any action.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{TopicId, UnitId};

/// A topic placed in a planning week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicAssignment {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub estimated_weeks: u32,
}

/// One planning week and the topics assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekAssignment {
    /// 1-based week number within the planning window
    pub week_number: u32,
    /// First available teaching day of the week
    pub week_start_date: NaiveDate,
    /// Last available teaching day of the week
    pub week_end_date: NaiveDate,
    pub unit_id: UnitId,
    pub unit_name: String,
    pub topics: Vec<TopicAssignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    /// Curriculum needs more weeks than are available.
    Compression,
    /// Available weeks with nothing assigned.
    Gap,
    /// A week holding more topics than the heuristic threshold.
    Overload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Warning,
    Info,
}

/// Most overflow weeks a compression signal lists.
pub const MAX_OVERFLOW_WEEKS_LISTED: u32 = 520;

/// Informational scope-versus-time flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskSignal {
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub severity: RiskSeverity,
    pub message: String,
    /// Week numbers the signal refers to, ascending
    pub affected_weeks: Vec<u32>,
    /// Total weeks the curriculum asks for (compression only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks_needed: Option<u32>,
    /// Weeks available in the window (compression only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks_available: Option<u32>,
    /// Aggregated topic count of the week (overload only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_count: Option<u32>,
}

impl RiskSignal {
    /// `affected_weeks` runs from the first overflow week to `weeks_needed`,
    /// listing at most `MAX_OVERFLOW_WEEKS_LISTED` weeks.
    pub fn compression(weeks_needed: u32, weeks_available: u32) -> Self {
        let last_listed =
            weeks_needed.min(weeks_available.saturating_add(MAX_OVERFLOW_WEEKS_LISTED));
        Self {
            risk_type: RiskType::Compression,
            severity: RiskSeverity::Warning,
            message: format!(
                "Curriculum requires {} weeks but only {} available",
                weeks_needed, weeks_available
            ),
            affected_weeks: (weeks_available.saturating_add(1)..=last_listed).collect(),
            weeks_needed: Some(weeks_needed),
            weeks_available: Some(weeks_available),
            topic_count: None,
        }
    }

    pub fn gap(gap_weeks: Vec<u32>) -> Self {
        let listed = gap_weeks
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            risk_type: RiskType::Gap,
            severity: RiskSeverity::Info,
            message: format!("Weeks [{}] have no planned content", listed),
            affected_weeks: gap_weeks,
            weeks_needed: None,
            weeks_available: None,
            topic_count: None,
        }
    }

    pub fn overload(week_number: u32, topic_count: u32) -> Self {
        Self {
            risk_type: RiskType::Overload,
            severity: RiskSeverity::Info,
            message: format!(
                "Week {} has {} topics (consider spreading)",
                week_number, topic_count
            ),
            affected_weeks: vec![week_number],
            weeks_needed: None,
            weeks_available: None,
            topic_count: Some(topic_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_affected_weeks_cover_overflow() {
        let signal = RiskSignal::compression(12, 9);
        assert_eq!(signal.affected_weeks, vec![10, 11, 12]);
        assert_eq!(signal.severity, RiskSeverity::Warning);
        assert_eq!(
            signal.message,
            "Curriculum requires 12 weeks but only 9 available"
        );
    }

    #[test]
    fn test_compression_affected_weeks_are_bounded() {
        let signal = RiskSignal::compression(u32::MAX, 3);
        assert_eq!(signal.weeks_needed, Some(u32::MAX));
        assert_eq!(signal.affected_weeks.len(), MAX_OVERFLOW_WEEKS_LISTED as usize);
        assert_eq!(signal.affected_weeks.first(), Some(&4));
        assert_eq!(signal.affected_weeks.last(), Some(&523));

        let edge = RiskSignal::compression(u32::MAX, u32::MAX - 1);
        assert_eq!(edge.affected_weeks, vec![u32::MAX]);
    }

    #[test]
    fn test_gap_message_lists_weeks() {
        let signal = RiskSignal::gap(vec![2, 5]);
        assert_eq!(signal.message, "Weeks [2, 5] have no planned content");
        assert_eq!(signal.severity, RiskSeverity::Info);
    }

    #[test]
    fn test_risk_signal_serializes_type_field() {
        let json = serde_json::to_value(RiskSignal::overload(3, 4)).unwrap();
        assert_eq!(json["type"], "overload");
        assert_eq!(json["severity"], "info");
        assert_eq!(json["topic_count"], 4);
        assert!(json.get("weeks_needed").is_none());
    }
}
