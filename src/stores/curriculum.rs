use std::collections::HashMap;

use async_trait::async_trait;
use keystone_core::AppError;
use keystone_models::{
    CurriculumStructure, CurriculumTopic, CurriculumUnit, normalize_estimated_weeks,
    ids::{GradeId, SchoolId, SubjectId, TopicId, UnitId},
};
use keystone_planning::CurriculumStore;
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};

#[derive(Debug, FromRow)]
struct UnitRow {
    id: UnitId,
    name: String,
    sequence_order: Option<i32>,
}

#[derive(Debug, FromRow)]
struct TopicRow {
    id: TopicId,
    unit_id: UnitId,
    name: String,
    sequence_order: Option<i32>,
    estimated_weeks: Option<i32>,
}

impl From<TopicRow> for CurriculumTopic {
    fn from(row: TopicRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            sequence_order: row.sequence_order,
            estimated_weeks: normalize_estimated_weeks(row.estimated_weeks.map(i64::from)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgCurriculumStore {
    db: PgPool,
}

impl PgCurriculumStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CurriculumStore for PgCurriculumStore {
    #[instrument(skip(self))]
    async fn get_structure(
        &self,
        school_id: SchoolId,
        grade_id: GradeId,
        subject_id: SubjectId,
    ) -> Result<CurriculumStructure, AppError> {
        let units = sqlx::query_as::<_, UnitRow>(
            r#"SELECT id, name, sequence_order
               FROM curriculum_units
               WHERE school_id = $1 AND grade_id = $2 AND subject_id = $3
               ORDER BY sequence_order NULLS LAST, name"#,
        )
        .bind(school_id)
        .bind(grade_id)
        .bind(subject_id)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::collaborator)?;

        if units.is_empty() {
            return Ok(CurriculumStructure::default());
        }

        let unit_ids: Vec<UnitId> = units.iter().map(|unit| unit.id).collect();
        let topics = sqlx::query_as::<_, TopicRow>(
            r#"SELECT id, unit_id, name, sequence_order, estimated_weeks
               FROM curriculum_topics
               WHERE unit_id = ANY($1)
               ORDER BY sequence_order NULLS LAST, name"#,
        )
        .bind(&unit_ids)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::collaborator)?;

        let mut topics_by_unit: HashMap<UnitId, Vec<CurriculumTopic>> = HashMap::new();
        for row in topics {
            topics_by_unit
                .entry(row.unit_id)
                .or_default()
                .push(row.into());
        }

        let structure = CurriculumStructure {
            units: units
                .into_iter()
                .map(|unit| CurriculumUnit {
                    topics: topics_by_unit.remove(&unit.id).unwrap_or_default(),
                    id: unit.id,
                    name: unit.name,
                    sequence_order: unit.sequence_order,
                })
                .collect(),
        };

        debug!(
            units = structure.units.len(),
            topics = structure.topic_count(),
            "Loaded curriculum structure"
        );

        Ok(structure)
    }
}
