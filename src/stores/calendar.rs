use async_trait::async_trait;
use chrono::NaiveDate;
use keystone_core::AppError;
use keystone_models::{DateRange, ExamPeriod, Holiday, ids::SchoolId};
use keystone_planning::CalendarStore;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

#[derive(Debug, FromRow)]
struct HolidayRow {
    date: NaiveDate,
    description: String,
}

#[derive(Debug, FromRow)]
struct ExamPeriodRow {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct PgCalendarStore {
    db: PgPool,
}

impl PgCalendarStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalendarStore for PgCalendarStore {
    #[instrument(skip(self))]
    async fn teaching_days(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<NaiveDate>, AppError> {
        sqlx::query_scalar::<_, NaiveDate>(
            r#"SELECT date FROM teaching_days
               WHERE school_id = $1 AND date BETWEEN $2 AND $3
               ORDER BY date"#,
        )
        .bind(school_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.db)
        .await
        .map_err(AppError::collaborator)
    }

    #[instrument(skip(self))]
    async fn holidays(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<Holiday>, AppError> {
        let rows = sqlx::query_as::<_, HolidayRow>(
            r#"SELECT date, description FROM holidays
               WHERE school_id = $1 AND date BETWEEN $2 AND $3
               ORDER BY date"#,
        )
        .bind(school_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.db)
        .await
        .map_err(AppError::collaborator)?;

        Ok(rows
            .into_iter()
            .map(|row| Holiday::new(row.date, row.description))
            .collect())
    }

    #[instrument(skip(self))]
    async fn exam_periods(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<ExamPeriod>, AppError> {
        let rows = sqlx::query_as::<_, ExamPeriodRow>(
            r#"SELECT start_date, end_date FROM exam_periods
               WHERE school_id = $1 AND start_date <= $3 AND end_date >= $2
               ORDER BY start_date"#,
        )
        .bind(school_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.db)
        .await
        .map_err(AppError::collaborator)?;

        rows.into_iter()
            .map(|row| {
                ExamPeriod::new(row.start_date, row.end_date)
                    .map_err(|e| AppError::collaborator(e.error))
            })
            .collect()
    }
}
