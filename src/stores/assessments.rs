use async_trait::async_trait;
use keystone_core::AppError;
use keystone_models::{
    AssessmentSummary, DateRange,
    ids::{ClassId, SubjectId},
};
use keystone_planning::AssessmentRecordStore;
use sqlx::PgPool;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct PgAssessmentStore {
    db: PgPool,
}

impl PgAssessmentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssessmentRecordStore for PgAssessmentStore {
    #[instrument(skip(self))]
    async fn list(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        range: DateRange,
    ) -> Result<Vec<AssessmentSummary>, AppError> {
        sqlx::query_as::<_, AssessmentSummary>(
            r#"SELECT id, date, name
               FROM assessments
               WHERE class_id = $1 AND subject_id = $2
                 AND date BETWEEN $3 AND $4
               ORDER BY date"#,
        )
        .bind(class_id)
        .bind(subject_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.db)
        .await
        .map_err(AppError::collaborator)
    }
}
