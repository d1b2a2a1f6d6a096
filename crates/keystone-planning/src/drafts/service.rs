use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use keystone_config::PlanningConfig;
use keystone_core::{AppError, validate_dto};
use keystone_models::{
    AcceptedDraftPlan, ConfirmationToken, DateRange, DraftPlan, DraftPlanPatch,
    GenerateDraftPlanDto, LessonPlanStatus, NewLessonPlan, WeekAssignment,
    ids::{DraftSessionId, TeacherId},
};
use tokio::sync::OwnedMutexGuard;
use tracing::{info, instrument, warn};

use crate::calendar::CalendarAvailabilityCalculator;
use crate::drafts::arena::{DraftSession, SessionArena, SessionState};
use crate::drafts::token::{generate_token, tokens_match};
use crate::pacing::PacingDistributor;
use crate::stores::{
    AssessmentRecordStore, CalendarStore, ClassDirectory, CurriculumStore, PlanRecordStore,
};
use crate::telemetry;

/// The external stores a [`DraftPlanService`] reads from and writes to.
#[derive(Clone)]
pub struct PlanningStores {
    pub classes: Arc<dyn ClassDirectory>,
    pub curriculum: Arc<dyn CurriculumStore>,
    pub calendar: Arc<dyn CalendarStore>,
    pub lesson_plans: Arc<dyn PlanRecordStore>,
    pub assessments: Arc<dyn AssessmentRecordStore>,
}

/// Orchestrates the propose, confirm, commit workflow for draft plans.
///
/// Drafts live only in memory. The single write path is [`accept`], which
/// needs a token previously issued by [`generate_confirmation_token`] for the
/// same session; a successful accept deletes the session, so the token
/// cannot be replayed.
///
/// [`accept`]: DraftPlanService::accept
/// [`generate_confirmation_token`]: DraftPlanService::generate_confirmation_token
pub struct DraftPlanService {
    stores: PlanningStores,
    calculator: CalendarAvailabilityCalculator,
    distributor: PacingDistributor,
    sessions: SessionArena,
}

fn session_not_found(session_id: DraftSessionId) -> AppError {
    AppError::not_found(anyhow!("Draft plan {} not found", session_id))
}

impl DraftPlanService {
    pub fn new(stores: PlanningStores, config: PlanningConfig) -> Self {
        Self {
            calculator: CalendarAvailabilityCalculator::new(
                stores.calendar.clone(),
                config.days_per_week,
            ),
            distributor: PacingDistributor::new(config.max_topics_per_week),
            sessions: SessionArena::new(),
            stores,
        }
    }

    pub fn calculator(&self) -> &CalendarAvailabilityCalculator {
        &self.calculator
    }

    pub fn distributor(&self) -> &PacingDistributor {
        &self.distributor
    }

    async fn lock_session(
        &self,
        session_id: DraftSessionId,
    ) -> Result<OwnedMutexGuard<DraftSession>, AppError> {
        self.sessions
            .lock(session_id)
            .await
            .ok_or_else(|| session_not_found(session_id))
    }

    /// Build a draft plan and hold it in memory. Performs no writes.
    #[instrument(skip(self, dto), fields(class_id = %dto.class_id, subject_id = %dto.subject_id))]
    pub async fn generate(&self, dto: GenerateDraftPlanDto) -> Result<DraftPlan, AppError> {
        validate_dto(&dto)?;
        let range = dto.range()?;

        let placement = self
            .stores
            .classes
            .resolve(dto.class_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Class {} not found", dto.class_id)))?;

        let (curriculum, planning_window, existing_plans, existing_assessments) = tokio::try_join!(
            self.stores.curriculum.get_structure(
                placement.school_id,
                placement.grade_id,
                dto.subject_id
            ),
            self.calculator
                .planning_window(placement.school_id, range),
            self.stores
                .lesson_plans
                .list(dto.class_id, dto.subject_id, range),
            self.stores
                .assessments
                .list(dto.class_id, dto.subject_id, range),
        )?;

        let pacing_suggestions = self
            .distributor
            .calculate_pacing(&curriculum, &planning_window);
        let risk_signals = self.distributor.assess_risks(
            &curriculum,
            &pacing_suggestions,
            planning_window.available_weeks,
        );

        let now = Utc::now();
        let plan = DraftPlan {
            session_id: DraftSessionId::new(),
            teacher_id: dto.teacher_id,
            class_id: dto.class_id,
            subject_id: dto.subject_id,
            school_id: placement.school_id,
            grade_id: placement.grade_id,
            planning_window,
            pacing_suggestions,
            risk_signals,
            existing_plans_context: existing_plans,
            existing_assessments_context: existing_assessments,
            created_at: now,
            modified_at: now,
        };

        self.sessions.insert(DraftSession::new(plan.clone())).await;
        telemetry::track_draft_generated(plan.risk_signals.len());

        info!(
            session_id = %plan.session_id,
            weeks = plan.planning_window.available_weeks,
            assignments = plan.pacing_suggestions.len(),
            risk_signals = plan.risk_signals.len(),
            "Draft plan generated"
        );

        Ok(plan)
    }

    /// Current snapshot of an active draft.
    pub async fn get(&self, session_id: DraftSessionId) -> Result<DraftPlan, AppError> {
        let session = self.lock_session(session_id).await?;
        Ok(session.plan.clone())
    }

    /// Active drafts of one teacher, oldest first.
    pub async fn list_for_teacher(&self, teacher_id: TeacherId) -> Vec<DraftPlan> {
        self.sessions
            .collect(|plan| plan.teacher_id == teacher_id)
            .await
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.len().await
    }

    /// Apply a patch to a draft.
    ///
    /// Pacing suggestions are replaced wholesale when given. Changing either
    /// date bound recomputes the planning window; an invalid new range fails
    /// before anything is changed.
    #[instrument(skip(self, patch), fields(session_id = %session_id))]
    pub async fn modify(
        &self,
        session_id: DraftSessionId,
        patch: DraftPlanPatch,
    ) -> Result<DraftPlan, AppError> {
        let mut session = self.lock_session(session_id).await?;

        let new_window = if patch.changes_window() {
            let current = &session.plan.planning_window;
            let range = DateRange::new(
                patch.start_date.unwrap_or(current.start_date),
                patch.end_date.unwrap_or(current.end_date),
            )?;
            Some(
                self.calculator
                    .planning_window(session.plan.school_id, range)
                    .await?,
            )
        } else {
            None
        };

        if let Some(window) = new_window {
            session.plan.planning_window = window;
        }
        if let Some(suggestions) = patch.pacing_suggestions {
            session.plan.pacing_suggestions = suggestions;
        }
        session.plan.modified_at = Utc::now();

        info!("Draft plan modified");
        Ok(session.plan.clone())
    }

    /// Replace pacing suggestions verbatim with a caller-chosen order.
    ///
    /// The new order is not checked against the curriculum, so teachers can
    /// override the heuristic freely.
    #[instrument(skip(self, new_order), fields(session_id = %session_id, weeks = new_order.len()))]
    pub async fn reorder(
        &self,
        session_id: DraftSessionId,
        new_order: Vec<WeekAssignment>,
    ) -> Result<DraftPlan, AppError> {
        let mut session = self.lock_session(session_id).await?;
        session.plan.pacing_suggestions = new_order;
        session.plan.modified_at = Utc::now();
        Ok(session.plan.clone())
    }

    /// Drop a draft and any token. Returns `false` for an unknown session.
    #[instrument(skip(self))]
    pub async fn discard(&self, session_id: DraftSessionId) -> bool {
        let Some(mut session) = self.sessions.lock(session_id).await else {
            return false;
        };

        session.finish(SessionState::Discarded);
        self.sessions.remove(session_id).await;
        telemetry::track_draft_discarded();

        info!(session_id = %session_id, "Draft plan discarded");
        true
    }

    /// Issue a fresh confirmation token, replacing any earlier one.
    #[instrument(skip(self))]
    pub async fn generate_confirmation_token(
        &self,
        session_id: DraftSessionId,
    ) -> Result<ConfirmationToken, AppError> {
        let mut session = self.lock_session(session_id).await?;
        let token = generate_token();
        session.confirmation_token = Some(token.clone());

        info!(session_id = %session_id, "Confirmation token issued");
        Ok(token)
    }

    /// Commit a draft: create one draft lesson plan per (week, topic) pair.
    ///
    /// Requires the session's current confirmation token. A wrong or missing
    /// token leaves the session untouched. On success the session is deleted,
    /// so any further call with the same id fails with not found.
    #[instrument(skip(self, token))]
    pub async fn accept(
        &self,
        session_id: DraftSessionId,
        token: &ConfirmationToken,
    ) -> Result<AcceptedDraftPlan, AppError> {
        let mut session = self.lock_session(session_id).await?;

        match &session.confirmation_token {
            None => {
                warn!(session_id = %session_id, "Accept attempted without a confirmation token");
                telemetry::track_confirmation_rejected("missing");
                return Err(AppError::invalid_token(anyhow!(
                    "No confirmation token generated for this session"
                )));
            }
            Some(expected) if !tokens_match(expected, token) => {
                warn!(session_id = %session_id, "Accept attempted with a mismatched token");
                telemetry::track_confirmation_rejected("mismatch");
                return Err(AppError::invalid_token(anyhow!(
                    "Invalid confirmation token"
                )));
            }
            Some(_) => {}
        }

        let records = lesson_plans_for(&session.plan);
        let lesson_plan_ids = self.stores.lesson_plans.create_batch(&records).await?;

        session.finish(SessionState::Committed);
        self.sessions.remove(session_id).await;
        telemetry::track_draft_committed(lesson_plan_ids.len());

        info!(
            session_id = %session_id,
            lesson_plans = lesson_plan_ids.len(),
            "Draft plan accepted"
        );

        Ok(AcceptedDraftPlan {
            session_id,
            lesson_plan_ids,
        })
    }
}

/// Scaffold records: draft status, topic name and week dates only.
fn lesson_plans_for(plan: &DraftPlan) -> Vec<NewLessonPlan> {
    plan.pacing_suggestions
        .iter()
        .flat_map(|week| {
            week.topics.iter().map(move |topic| NewLessonPlan {
                teacher_id: plan.teacher_id,
                class_id: plan.class_id,
                subject_id: plan.subject_id,
                status: LessonPlanStatus::Draft,
                instructional_notes: None,
                topic: Some(topic.topic_name.clone()),
                start_date: Some(week.week_start_date),
                end_date: Some(week.week_end_date),
            })
        })
        .collect()
}
