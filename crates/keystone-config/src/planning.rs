//! Term-planning heuristics.
//!
//! These values tune the pacing heuristics. They are advisory defaults, not
//! policy: nothing in the engine blocks a plan because of them.
//!
//! # Configuration
//!
//! - `PLANNING_DAYS_PER_WEEK`: Teaching days that make up one planning week (default: 5)
//! - `PLANNING_MAX_TOPICS_PER_WEEK`: Topic count above which a week is flagged as
//!   overloaded (default: 2)
//!
//! Zero or unparsable values fall back to the defaults.

const DEFAULT_DAYS_PER_WEEK: u32 = 5;
const DEFAULT_MAX_TOPICS_PER_WEEK: u32 = 2;

/// Heuristics used by the calendar calculator and pacing distributor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanningConfig {
    /// Number of available teaching days counted as one week.
    ///
    /// `available_weeks = floor(available_days / days_per_week)`. This is a
    /// heuristic and says nothing about real weekday counts in the calendar.
    pub days_per_week: u32,

    /// A week whose aggregated topic count exceeds this raises an overload signal.
    pub max_topics_per_week: u32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            days_per_week: DEFAULT_DAYS_PER_WEEK,
            max_topics_per_week: DEFAULT_MAX_TOPICS_PER_WEEK,
        }
    }
}

impl PlanningConfig {
    /// Creates a new `PlanningConfig` from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            days_per_week: positive_from_env("PLANNING_DAYS_PER_WEEK")
                .unwrap_or(DEFAULT_DAYS_PER_WEEK),
            max_topics_per_week: positive_from_env("PLANNING_MAX_TOPICS_PER_WEEK")
                .unwrap_or(DEFAULT_MAX_TOPICS_PER_WEEK),
        }
    }

    #[must_use]
    pub fn with_days_per_week(mut self, days_per_week: u32) -> Self {
        if days_per_week > 0 {
            self.days_per_week = days_per_week;
        }
        self
    }

    #[must_use]
    pub fn with_max_topics_per_week(mut self, max_topics_per_week: u32) -> Self {
        self.max_topics_per_week = max_topics_per_week;
        self
    }
}

fn positive_from_env(key: &str) -> Option<u32> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}
