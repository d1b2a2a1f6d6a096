//! Calendar availability.
//!
//! Available teaching days are the teaching days in range minus holidays in
//! range minus every day of any exam period overlapping the range. The free
//! functions here are pure over a [`TeachingCalendar`]; the
//! [`CalendarAvailabilityCalculator`] fetches the facts from a
//! [`CalendarStore`] first.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use keystone_core::AppError;
use keystone_models::{
    DateRange, LostDay, LostDayReason, PlanningWindow, TeachingCalendar, ids::SchoolId,
};
use tracing::{debug, instrument};

use crate::stores::CalendarStore;

const EXAM_PERIOD_DESCRIPTION: &str = "Exam period";

/// Teaching days in `range` not covered by a holiday or exam period, ascending.
pub fn available_days(calendar: &TeachingCalendar, range: DateRange) -> Vec<NaiveDate> {
    let holidays: BTreeSet<NaiveDate> = calendar
        .holidays
        .iter()
        .map(|holiday| holiday.date)
        .filter(|date| range.contains(*date))
        .collect();

    let exam_dates: BTreeSet<NaiveDate> = calendar
        .exam_periods
        .iter()
        .filter(|period| range.overlaps(period.start_date, period.end_date))
        .flat_map(|period| period.days())
        .collect();

    calendar
        .teaching_days
        .iter()
        .copied()
        .filter(|date| range.contains(*date))
        .filter(|date| !holidays.contains(date) && !exam_dates.contains(date))
        .collect()
}

/// Holiday and exam-period days in `range`, ordered by date.
///
/// A date that is both a holiday and an exam day yields two entries, the
/// holiday first.
pub fn lost_days(calendar: &TeachingCalendar, range: DateRange) -> Vec<LostDay> {
    let mut lost: Vec<LostDay> = calendar
        .holidays
        .iter()
        .filter(|holiday| range.contains(holiday.date))
        .map(|holiday| LostDay {
            date: holiday.date,
            reason: LostDayReason::Holiday,
            description: holiday.description.clone(),
        })
        .collect();

    let mut periods: Vec<_> = calendar
        .exam_periods
        .iter()
        .filter(|period| range.overlaps(period.start_date, period.end_date))
        .collect();
    periods.sort_by_key(|period| period.start_date);

    lost.extend(
        periods
            .into_iter()
            .flat_map(|period| period.days())
            .filter(|date| range.contains(*date))
            .map(|date| LostDay {
                date,
                reason: LostDayReason::ExamPeriod,
                description: EXAM_PERIOD_DESCRIPTION.to_string(),
            }),
    );

    // Stable: holiday entries stay ahead of exam entries on the same date.
    lost.sort_by_key(|day| day.date);
    lost
}

/// Combine availability and lost days into a [`PlanningWindow`].
pub fn planning_window(
    calendar: &TeachingCalendar,
    range: DateRange,
    days_per_week: u32,
) -> PlanningWindow {
    let available_teaching_days = available_days(calendar, range);
    let available_weeks = u32::try_from(available_teaching_days.len())
        .unwrap_or(u32::MAX)
        .checked_div(days_per_week)
        .unwrap_or(0);

    PlanningWindow {
        start_date: range.start(),
        end_date: range.end(),
        available_teaching_days,
        available_weeks,
        lost_days: lost_days(calendar, range),
    }
}

/// Computes planning windows from a school's stored calendar.
#[derive(Clone)]
pub struct CalendarAvailabilityCalculator {
    store: Arc<dyn CalendarStore>,
    days_per_week: u32,
}

impl CalendarAvailabilityCalculator {
    pub fn new(store: Arc<dyn CalendarStore>, days_per_week: u32) -> Self {
        Self {
            store,
            days_per_week,
        }
    }

    pub fn days_per_week(&self) -> u32 {
        self.days_per_week
    }

    /// Load the calendar facts relevant to `range`.
    #[instrument(skip(self))]
    pub async fn load_calendar(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<TeachingCalendar, AppError> {
        let (teaching_days, holidays, exam_periods) = tokio::try_join!(
            self.store.teaching_days(school_id, range),
            self.store.holidays(school_id, range),
            self.store.exam_periods(school_id, range),
        )?;

        debug!(
            teaching_days = teaching_days.len(),
            holidays = holidays.len(),
            exam_periods = exam_periods.len(),
            "Loaded calendar facts"
        );

        Ok(TeachingCalendar {
            teaching_days: teaching_days.into_iter().collect(),
            holidays,
            exam_periods,
        })
    }

    pub async fn teaching_days(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<NaiveDate>, AppError> {
        let calendar = self.load_calendar(school_id, range).await?;
        Ok(available_days(&calendar, range))
    }

    pub async fn lost_days(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<LostDay>, AppError> {
        let calendar = self.load_calendar(school_id, range).await?;
        Ok(lost_days(&calendar, range))
    }

    #[instrument(skip(self))]
    pub async fn planning_window(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<PlanningWindow, AppError> {
        let calendar = self.load_calendar(school_id, range).await?;
        let window = planning_window(&calendar, range, self.days_per_week);

        debug!(
            available_days = window.available_day_count(),
            available_weeks = window.available_weeks,
            lost_days = window.lost_days.len(),
            "Computed planning window"
        );

        Ok(window)
    }
}
