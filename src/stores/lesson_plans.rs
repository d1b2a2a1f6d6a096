use async_trait::async_trait;
use chrono::NaiveDate;
use keystone_core::AppError;
use keystone_models::{
    DateRange, LessonPlanStatus, LessonPlanSummary, NewLessonPlan,
    ids::{ClassId, LessonPlanId, SubjectId},
};
use keystone_planning::PlanRecordStore;
use sqlx::{FromRow, PgExecutor, PgPool};
use tracing::{info, instrument};

#[derive(Debug, FromRow)]
struct LessonPlanRow {
    id: LessonPlanId,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    topic: Option<String>,
    status: String,
}

impl TryFrom<LessonPlanRow> for LessonPlanSummary {
    type Error = AppError;

    fn try_from(row: LessonPlanRow) -> Result<Self, Self::Error> {
        let status: LessonPlanStatus = row
            .status
            .parse()
            .map_err(|e: AppError| AppError::collaborator(e.error))?;

        Ok(Self {
            id: row.id,
            start_date: row.start_date,
            end_date: row.end_date,
            topic: row.topic,
            status,
        })
    }
}

async fn insert_lesson_plan<'e, E>(
    executor: E,
    plan: &NewLessonPlan,
) -> Result<LessonPlanId, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, LessonPlanId>(
        r#"INSERT INTO lesson_plans
               (teacher_id, class_id, subject_id, start_date, end_date,
                instructional_notes, topic, status)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
           RETURNING id"#,
    )
    .bind(plan.teacher_id)
    .bind(plan.class_id)
    .bind(plan.subject_id)
    .bind(plan.start_date)
    .bind(plan.end_date)
    .bind(&plan.instructional_notes)
    .bind(&plan.topic)
    .bind(plan.status.as_str())
    .fetch_one(executor)
    .await
}

#[derive(Debug, Clone)]
pub struct PgLessonPlanStore {
    db: PgPool,
}

impl PgLessonPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRecordStore for PgLessonPlanStore {
    #[instrument(skip(self))]
    async fn list(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        range: DateRange,
    ) -> Result<Vec<LessonPlanSummary>, AppError> {
        let rows = sqlx::query_as::<_, LessonPlanRow>(
            r#"SELECT id, start_date, end_date, topic, status
               FROM lesson_plans
               WHERE class_id = $1 AND subject_id = $2
                 AND (start_date BETWEEN $3 AND $4 OR end_date BETWEEN $3 AND $4)
               ORDER BY start_date"#,
        )
        .bind(class_id)
        .bind(subject_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.db)
        .await
        .map_err(AppError::collaborator)?;

        rows.into_iter().map(LessonPlanSummary::try_from).collect()
    }

    #[instrument(skip(self, plan))]
    async fn create(&self, plan: &NewLessonPlan) -> Result<LessonPlanId, AppError> {
        insert_lesson_plan(&self.db, plan)
            .await
            .map_err(AppError::collaborator)
    }

    /// All plans in one transaction; nothing is kept if any insert fails.
    #[instrument(skip(self, plans), fields(count = plans.len()))]
    async fn create_batch(&self, plans: &[NewLessonPlan]) -> Result<Vec<LessonPlanId>, AppError> {
        let mut tx = self.db.begin().await.map_err(AppError::collaborator)?;

        let mut ids = Vec::with_capacity(plans.len());
        for plan in plans {
            let id = insert_lesson_plan(&mut *tx, plan)
                .await
                .map_err(AppError::collaborator)?;
            ids.push(id);
        }

        tx.commit().await.map_err(AppError::collaborator)?;
        info!(count = ids.len(), "Lesson plans created");

        Ok(ids)
    }
}
