//! Scope-versus-time risk detectors.
//!
//! Each detector is a pure function over value types and returns an empty
//! list when there is nothing to report. Signals are informational only.

use std::collections::{BTreeMap, BTreeSet};

use keystone_models::{CurriculumStructure, RiskSignal, WeekAssignment};

/// One warning when the curriculum needs more weeks than are available.
pub fn detect_compression_risk(
    curriculum: &CurriculumStructure,
    available_weeks: u32,
) -> Vec<RiskSignal> {
    let weeks_needed = curriculum.total_estimated_weeks();
    if weeks_needed > available_weeks {
        vec![RiskSignal::compression(weeks_needed, available_weeks)]
    } else {
        Vec::new()
    }
}

/// One signal listing every available week with no assignment.
pub fn detect_gaps(suggestions: &[WeekAssignment], available_weeks: u32) -> Vec<RiskSignal> {
    let planned: BTreeSet<u32> = suggestions.iter().map(|week| week.week_number).collect();
    let gaps: Vec<u32> = (1..=available_weeks)
        .filter(|week| !planned.contains(week))
        .collect();

    if gaps.is_empty() {
        Vec::new()
    } else {
        vec![RiskSignal::gap(gaps)]
    }
}

/// One signal per week whose aggregated topic count exceeds `max_topics_per_week`.
///
/// Entries sharing a week number are summed. Signals come out in ascending
/// week order.
pub fn detect_overload(
    suggestions: &[WeekAssignment],
    max_topics_per_week: u32,
) -> Vec<RiskSignal> {
    let mut topics_per_week: BTreeMap<u32, u32> = BTreeMap::new();
    for week in suggestions {
        let count = u32::try_from(week.topics.len()).unwrap_or(u32::MAX);
        let total = topics_per_week.entry(week.week_number).or_default();
        *total = total.saturating_add(count);
    }

    topics_per_week
        .into_iter()
        .filter(|(_, count)| *count > max_topics_per_week)
        .map(|(week, count)| RiskSignal::overload(week, count))
        .collect()
}
