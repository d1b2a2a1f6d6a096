//! Heuristic distribution of curriculum topics across planning weeks.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use keystone_models::{
    CurriculumStructure, PlanningWindow, RiskSignal, TopicAssignment, WeekAssignment,
};
use tracing::debug;

use crate::risk;

/// First and last available teaching day of a planning week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Split ordered teaching days into `weeks` contiguous chunks.
///
/// Each chunk holds `days.len() / weeks` days (truncating division); the last
/// chunk also takes the remainder. With `weeks == 0` the map is empty.
pub fn partition_weeks(days: &[NaiveDate], weeks: u32) -> BTreeMap<u32, WeekBounds> {
    let mut bounds = BTreeMap::new();
    let Some(last_day) = days.last() else {
        return bounds;
    };

    let days_per_week = match weeks as usize {
        0 => days.len(),
        n => days.len() / n,
    };
    if days_per_week == 0 {
        return bounds;
    }

    for week in 1..=weeks {
        let start_idx = (week as usize - 1) * days_per_week;
        let Some(start) = days.get(start_idx) else {
            break;
        };
        let end = if week == weeks {
            *last_day
        } else {
            days[(start_idx + days_per_week - 1).min(days.len() - 1)]
        };
        bounds.insert(week, WeekBounds { start: *start, end });
    }

    bounds
}

/// Assign topics to weeks of `window`, one topic per week entry.
///
/// Units and topics are walked in sequence order. Each topic starts at the
/// current week and pushes the cursor forward by its planned weeks, so a
/// multi-week topic leaves the following weeks unassigned. Topics that would
/// start after the last available week are dropped; they surface as a
/// compression signal instead.
pub fn calculate_pacing(
    curriculum: &CurriculumStructure,
    window: &PlanningWindow,
) -> Vec<WeekAssignment> {
    if window.available_teaching_days.is_empty() {
        return Vec::new();
    }

    let available_weeks = window.available_weeks;
    let bounds = partition_weeks(&window.available_teaching_days, available_weeks);

    let mut suggestions = Vec::new();
    let mut current_week: u32 = 1;

    'units: for unit in curriculum.ordered_units() {
        for topic in unit.ordered_topics() {
            if current_week > available_weeks {
                break 'units;
            }
            let Some(week) = bounds.get(&current_week) else {
                break 'units;
            };

            suggestions.push(WeekAssignment {
                week_number: current_week,
                week_start_date: week.start,
                week_end_date: week.end,
                unit_id: unit.id,
                unit_name: unit.name.clone(),
                topics: vec![TopicAssignment {
                    topic_id: topic.id,
                    topic_name: topic.name.clone(),
                    estimated_weeks: topic.planned_weeks(),
                }],
            });

            current_week = current_week.saturating_add(topic.planned_weeks());
        }
    }

    debug!(
        assigned = suggestions.len(),
        topics = curriculum.topic_count(),
        available_weeks,
        "Calculated pacing"
    );

    suggestions
}

/// Pacing and risk detection with configured heuristics.
#[derive(Debug, Clone, Copy)]
pub struct PacingDistributor {
    max_topics_per_week: u32,
}

impl PacingDistributor {
    pub fn new(max_topics_per_week: u32) -> Self {
        Self {
            max_topics_per_week,
        }
    }

    pub fn calculate_pacing(
        &self,
        curriculum: &CurriculumStructure,
        window: &PlanningWindow,
    ) -> Vec<WeekAssignment> {
        calculate_pacing(curriculum, window)
    }

    pub fn detect_compression_risk(
        &self,
        curriculum: &CurriculumStructure,
        available_weeks: u32,
    ) -> Vec<RiskSignal> {
        risk::detect_compression_risk(curriculum, available_weeks)
    }

    pub fn detect_gaps(
        &self,
        suggestions: &[WeekAssignment],
        available_weeks: u32,
    ) -> Vec<RiskSignal> {
        risk::detect_gaps(suggestions, available_weeks)
    }

    pub fn detect_overload(&self, suggestions: &[WeekAssignment]) -> Vec<RiskSignal> {
        risk::detect_overload(suggestions, self.max_topics_per_week)
    }

    /// Compression, then gap, then overload signals.
    pub fn assess_risks(
        &self,
        curriculum: &CurriculumStructure,
        suggestions: &[WeekAssignment],
        available_weeks: u32,
    ) -> Vec<RiskSignal> {
        let mut signals = self.detect_compression_risk(curriculum, available_weeks);
        signals.extend(self.detect_gaps(suggestions, available_weeks));
        signals.extend(self.detect_overload(suggestions));
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_models::{
        CurriculumTopic, CurriculumUnit,
        ids::{TopicId, UnitId},
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn consecutive_days(count: usize) -> Vec<NaiveDate> {
        date(2024, 9, 2).iter_days().take(count).collect()
    }

    fn window(days: Vec<NaiveDate>, weeks: u32) -> PlanningWindow {
        PlanningWindow {
            start_date: date(2024, 9, 1),
            end_date: date(2024, 12, 20),
            available_teaching_days: days,
            available_weeks: weeks,
            lost_days: Vec::new(),
        }
    }

    fn curriculum(weeks: &[&[u32]]) -> CurriculumStructure {
        CurriculumStructure {
            units: weeks
                .iter()
                .enumerate()
                .map(|(u, topics)| CurriculumUnit {
                    id: UnitId::new(),
                    name: format!("Unit {}", u + 1),
                    sequence_order: Some(u as i32 + 1),
                    topics: topics
                        .iter()
                        .enumerate()
                        .map(|(t, w)| CurriculumTopic {
                            id: TopicId::new(),
                            name: format!("Topic {}.{}", u + 1, t + 1),
                            sequence_order: Some(t as i32 + 1),
                            estimated_weeks: *w,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_partition_even_chunks() {
        let days = consecutive_days(10);
        let bounds = partition_weeks(&days, 2);
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[&1], WeekBounds { start: days[0], end: days[4] });
        assert_eq!(bounds[&2], WeekBounds { start: days[5], end: days[9] });
    }

    #[test]
    fn test_partition_last_chunk_absorbs_remainder() {
        let days = consecutive_days(13);
        let bounds = partition_weeks(&days, 2);
        assert_eq!(bounds[&1].end, days[5]);
        assert_eq!(bounds[&2].start, days[6]);
        assert_eq!(bounds[&2].end, days[12]);
    }

    #[test]
    fn test_partition_zero_weeks_or_no_days() {
        assert!(partition_weeks(&consecutive_days(4), 0).is_empty());
        assert!(partition_weeks(&[], 3).is_empty());
    }

    #[test]
    fn test_pacing_one_topic_per_entry_in_sequence() {
        let days = consecutive_days(15);
        let plan = calculate_pacing(&curriculum(&[&[1, 1], &[1]]), &window(days.clone(), 3));

        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan.iter().map(|w| w.week_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(plan.iter().all(|w| w.topics.len() == 1));
        assert_eq!(plan[2].unit_name, "Unit 2");
        assert_eq!(plan[1].week_start_date, days[5]);
        assert_eq!(plan[1].week_end_date, days[9]);
    }

    #[test]
    fn test_pacing_multi_week_topics_skip_weeks() {
        let plan = calculate_pacing(&curriculum(&[&[2, 1]]), &window(consecutive_days(20), 4));
        assert_eq!(
            plan.iter().map(|w| w.week_number).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_pacing_stops_when_weeks_exhausted() {
        let plan = calculate_pacing(
            &curriculum(&[&[1, 1], &[1, 1]]),
            &window(consecutive_days(10), 2),
        );
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|w| w.week_number <= 2));
    }

    #[test]
    fn test_pacing_empty_without_days() {
        let plan = calculate_pacing(&curriculum(&[&[1]]), &window(Vec::new(), 0));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_pacing_zero_weeks_with_days_is_empty() {
        let plan = calculate_pacing(&curriculum(&[&[1]]), &window(consecutive_days(3), 0));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_zero_week_topics_take_one_week() {
        let distributor = PacingDistributor::new(2);
        let plan = distributor.calculate_pacing(
            &curriculum(&[&[0, 0, 1]]),
            &window(consecutive_days(15), 3),
        );
        assert_eq!(
            plan.iter().map(|w| w.week_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(plan.iter().all(|w| w.topics[0].estimated_weeks == 1));
        assert!(distributor.detect_overload(&plan).is_empty());
    }

    #[test]
    fn test_zero_week_topics_stop_at_last_week() {
        let plan = calculate_pacing(&curriculum(&[&[0, 0, 1]]), &window(consecutive_days(10), 2));
        assert_eq!(
            plan.iter().map(|w| w.week_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_huge_estimate_is_capped() {
        let plan = calculate_pacing(
            &curriculum(&[&[u32::MAX, 1]]),
            &window(consecutive_days(300), 60),
        );
        assert_eq!(
            plan.iter().map(|w| w.week_number).collect::<Vec<_>>(),
            vec![1, 53]
        );
        assert_eq!(plan[0].topics[0].estimated_weeks, 52);
    }

    #[test]
    fn test_assess_risks_order() {
        let distributor = PacingDistributor::new(2);
        let scope = curriculum(&[&[2, 2]]);
        let win = window(consecutive_days(15), 3);
        let plan = distributor.calculate_pacing(&scope, &win);

        let signals = distributor.assess_risks(&scope, &plan, win.available_weeks);
        let kinds: Vec<_> = signals.iter().map(|s| s.risk_type).collect();
        assert_eq!(
            kinds,
            vec![keystone_models::RiskType::Compression, keystone_models::RiskType::Gap]
        );
    }
}
