use async_trait::async_trait;
use keystone_core::AppError;
use keystone_models::{ClassPlacement, ids::ClassId};
use keystone_planning::ClassDirectory;
use sqlx::PgPool;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct PgClassDirectory {
    db: PgPool,
}

impl PgClassDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClassDirectory for PgClassDirectory {
    #[instrument(skip(self))]
    async fn resolve(&self, class_id: ClassId) -> Result<Option<ClassPlacement>, AppError> {
        sqlx::query_as::<_, ClassPlacement>(
            "SELECT school_id, grade_id FROM classes WHERE id = $1",
        )
        .bind(class_id)
        .fetch_optional(&self.db)
        .await
        .map_err(AppError::collaborator)
    }
}
