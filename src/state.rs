use std::sync::Arc;

use anyhow::Context;
use keystone_config::{DatabaseConfig, PlanningConfig};
use keystone_db::{init_db_pool, run_migrations};
use keystone_planning::DraftPlanService;
use sqlx::PgPool;
use tracing::info;

use crate::stores::pg_planning_stores;

/// Shared handles for a host service embedding the planning engine.
#[derive(Clone)]
pub struct PlanningState {
    pub db: PgPool,
    pub config: PlanningConfig,
    pub drafts: Arc<DraftPlanService>,
}

impl PlanningState {
    /// Wire the draft service to PostgreSQL-backed stores.
    pub fn new(db: PgPool, config: PlanningConfig) -> Self {
        let drafts = DraftPlanService::new(pg_planning_stores(&db), config);
        Self {
            db,
            config,
            drafts: Arc::new(drafts),
        }
    }
}

/// Load `.env`, connect, apply migrations and build the planning state.
pub async fn init_planning_state() -> anyhow::Result<PlanningState> {
    dotenvy::dotenv().ok();

    let db = init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&db)
        .await
        .context("Failed to apply planning migrations")?;

    let config = PlanningConfig::from_env();
    info!(
        days_per_week = config.days_per_week,
        max_topics_per_week = config.max_topics_per_week,
        "Planning state initialized"
    );

    Ok(PlanningState::new(db, config))
}
