//! Calendar facts and the derived planning window.
//!
//! A school's teaching calendar is made of three raw facts: the dates marked
//! as teaching days, holidays, and exam periods. The planning engine turns
//! those facts into a [`PlanningWindow`] for a requested [`DateRange`].

use std::collections::BTreeSet;

use anyhow::anyhow;
use chrono::NaiveDate;
use keystone_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An inclusive `[start, end]` date range with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start >= end {
            return Err(AppError::validation(anyhow!(
                "Start date must be before end date ({} to {})",
                start,
                end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True unless `[start, end]` lies entirely before or after this range.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        !(end < self.start || start > self.end)
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: NaiveDate,
            end: NaiveDate,
        }

        let raw = Raw::deserialize(deserializer)?;
        DateRange::new(raw.start, raw.end).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// A non-instructional date declared by the school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Holiday {
    pub date: NaiveDate,
    pub description: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
        }
    }
}

/// An inclusive exam period; every calendar day inside it is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExamPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ExamPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, AppError> {
        if start_date >= end_date {
            return Err(AppError::validation(anyhow!(
                "Exam period must start before it ends ({} to {})",
                start_date,
                end_date
            )));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Every date from `start_date` to `end_date`, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }
}

/// Raw calendar facts for one school.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingCalendar {
    pub teaching_days: BTreeSet<NaiveDate>,
    pub holidays: Vec<Holiday>,
    pub exam_periods: Vec<ExamPeriod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LostDayReason {
    Holiday,
    ExamPeriod,
}

/// A date made unavailable by a holiday or exam period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LostDay {
    pub date: NaiveDate,
    pub reason: LostDayReason,
    pub description: String,
}

/// Available teaching time for a date range.
///
/// Derived from a [`TeachingCalendar`]; never mutated once computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlanningWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Teaching days left after removing holidays and exam days, ascending.
    pub available_teaching_days: Vec<NaiveDate>,
    /// `floor(available_teaching_days.len() / days_per_week)`
    pub available_weeks: u32,
    /// Holiday and exam-period days in the range, ordered by date.
    pub lost_days: Vec<LostDay>,
}

impl PlanningWindow {
    pub fn available_day_count(&self) -> usize {
        self.available_teaching_days.len()
    }

    pub fn range(&self) -> Result<DateRange, AppError> {
        DateRange::new(self.start_date, self.end_date)
    }
}
