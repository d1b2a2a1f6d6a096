//! In-memory collaborators for tests and local experiments.
//!
//! [`InMemoryPlanningStore`] implements every store trait over plain
//! collections and can be told to fail, either every read or every write
//! after a given number of successful creates.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use keystone_core::AppError;
use keystone_models::{
    AssessmentSummary, ClassPlacement, CurriculumStructure, DateRange, ExamPeriod, Holiday,
    LessonPlanSummary, NewLessonPlan,
    ids::{AssessmentId, ClassId, GradeId, LessonPlanId, SchoolId, SubjectId},
};

use crate::drafts::PlanningStores;
use crate::stores::{
    AssessmentRecordStore, CalendarStore, ClassDirectory, CurriculumStore, PlanRecordStore,
};

#[derive(Debug, Clone)]
struct StoredLessonPlan {
    id: LessonPlanId,
    plan: NewLessonPlan,
}

#[derive(Debug, Clone)]
struct StoredAssessment {
    class_id: ClassId,
    subject_id: SubjectId,
    summary: AssessmentSummary,
}

#[derive(Debug, Default)]
struct Tables {
    classes: HashMap<ClassId, ClassPlacement>,
    curricula: HashMap<(SchoolId, GradeId, SubjectId), CurriculumStructure>,
    teaching_days: HashMap<SchoolId, Vec<NaiveDate>>,
    holidays: HashMap<SchoolId, Vec<Holiday>>,
    exam_periods: HashMap<SchoolId, Vec<ExamPeriod>>,
    lesson_plans: Vec<StoredLessonPlan>,
    assessments: Vec<StoredAssessment>,
}

#[derive(Debug, Default)]
pub struct InMemoryPlanningStore {
    tables: Mutex<Tables>,
    create_calls: AtomicUsize,
    fail_creates_after: Mutex<Option<usize>>,
    fail_reads: AtomicBool,
}

fn unavailable(what: &str) -> AppError {
    AppError::collaborator(anyhow!("{} store unavailable", what))
}

impl InMemoryPlanningStore {
    /// Empty store behind an `Arc`, ready for [`Self::stores`].
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Bundle this store as every collaborator of a draft service.
    pub fn stores(self: &Arc<Self>) -> PlanningStores {
        PlanningStores {
            classes: self.clone(),
            curriculum: self.clone(),
            calendar: self.clone(),
            lesson_plans: self.clone(),
            assessments: self.clone(),
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_reads(&self, what: &str) -> Result<(), AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable(what));
        }
        Ok(())
    }

    pub fn add_class(&self, class_id: ClassId, school_id: SchoolId, grade_id: GradeId) {
        self.tables().classes.insert(
            class_id,
            ClassPlacement {
                school_id,
                grade_id,
            },
        );
    }

    pub fn set_curriculum(
        &self,
        school_id: SchoolId,
        grade_id: GradeId,
        subject_id: SubjectId,
        structure: CurriculumStructure,
    ) {
        self.tables()
            .curricula
            .insert((school_id, grade_id, subject_id), structure);
    }

    pub fn add_teaching_days(
        &self,
        school_id: SchoolId,
        days: impl IntoIterator<Item = NaiveDate>,
    ) {
        self.tables()
            .teaching_days
            .entry(school_id)
            .or_default()
            .extend(days);
    }

    pub fn add_holiday(&self, school_id: SchoolId, holiday: Holiday) {
        self.tables()
            .holidays
            .entry(school_id)
            .or_default()
            .push(holiday);
    }

    pub fn add_exam_period(&self, school_id: SchoolId, period: ExamPeriod) {
        self.tables()
            .exam_periods
            .entry(school_id)
            .or_default()
            .push(period);
    }

    /// Seed an existing lesson plan, bypassing the create counter.
    pub fn add_lesson_plan(&self, plan: NewLessonPlan) -> LessonPlanId {
        let id = LessonPlanId::new();
        self.tables()
            .lesson_plans
            .push(StoredLessonPlan { id, plan });
        id
    }

    pub fn add_assessment(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        date: NaiveDate,
        name: impl Into<String>,
    ) -> AssessmentId {
        let id = AssessmentId::new();
        self.tables().assessments.push(StoredAssessment {
            class_id,
            subject_id,
            summary: AssessmentSummary {
                id,
                date,
                name: name.into(),
            },
        });
        id
    }

    /// Let `n` more creates succeed, then fail every following one.
    pub fn fail_creates_after(&self, n: usize) {
        let done = self.create_calls.load(Ordering::SeqCst);
        *self
            .fail_creates_after
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(done + n);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of `create` calls, successful or not.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Every stored lesson plan in insertion order, seeded ones included.
    pub fn lesson_plans(&self) -> Vec<(LessonPlanId, NewLessonPlan)> {
        self.tables()
            .lesson_plans
            .iter()
            .map(|stored| (stored.id, stored.plan.clone()))
            .collect()
    }
}

#[async_trait]
impl ClassDirectory for InMemoryPlanningStore {
    async fn resolve(&self, class_id: ClassId) -> Result<Option<ClassPlacement>, AppError> {
        self.check_reads("class")?;
        Ok(self.tables().classes.get(&class_id).copied())
    }
}

#[async_trait]
impl CurriculumStore for InMemoryPlanningStore {
    async fn get_structure(
        &self,
        school_id: SchoolId,
        grade_id: GradeId,
        subject_id: SubjectId,
    ) -> Result<CurriculumStructure, AppError> {
        self.check_reads("curriculum")?;
        Ok(self
            .tables()
            .curricula
            .get(&(school_id, grade_id, subject_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CalendarStore for InMemoryPlanningStore {
    async fn teaching_days(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<NaiveDate>, AppError> {
        self.check_reads("calendar")?;
        let mut days: Vec<NaiveDate> = self
            .tables()
            .teaching_days
            .get(&school_id)
            .into_iter()
            .flatten()
            .copied()
            .filter(|day| range.contains(*day))
            .collect();
        days.sort();
        days.dedup();
        Ok(days)
    }

    async fn holidays(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<Holiday>, AppError> {
        self.check_reads("calendar")?;
        Ok(self
            .tables()
            .holidays
            .get(&school_id)
            .into_iter()
            .flatten()
            .filter(|holiday| range.contains(holiday.date))
            .cloned()
            .collect())
    }

    async fn exam_periods(
        &self,
        school_id: SchoolId,
        range: DateRange,
    ) -> Result<Vec<ExamPeriod>, AppError> {
        self.check_reads("calendar")?;
        Ok(self
            .tables()
            .exam_periods
            .get(&school_id)
            .into_iter()
            .flatten()
            .filter(|period| range.overlaps(period.start_date, period.end_date))
            .cloned()
            .collect())
    }
}

fn starts_or_ends_in(plan: &NewLessonPlan, range: DateRange) -> bool {
    plan.start_date.is_some_and(|date| range.contains(date))
        || plan.end_date.is_some_and(|date| range.contains(date))
}

#[async_trait]
impl PlanRecordStore for InMemoryPlanningStore {
    async fn list(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        range: DateRange,
    ) -> Result<Vec<LessonPlanSummary>, AppError> {
        self.check_reads("lesson plan")?;
        let mut plans: Vec<LessonPlanSummary> = self
            .tables()
            .lesson_plans
            .iter()
            .filter(|stored| {
                stored.plan.class_id == class_id
                    && stored.plan.subject_id == subject_id
                    && starts_or_ends_in(&stored.plan, range)
            })
            .map(|stored| LessonPlanSummary {
                id: stored.id,
                start_date: stored.plan.start_date,
                end_date: stored.plan.end_date,
                topic: stored.plan.topic.clone(),
                status: stored.plan.status,
            })
            .collect();
        plans.sort_by_key(|plan| plan.start_date);
        Ok(plans)
    }

    async fn create(&self, plan: &NewLessonPlan) -> Result<LessonPlanId, AppError> {
        let call = self.create_calls.fetch_add(1, Ordering::SeqCst);
        let limit = *self
            .fail_creates_after
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if limit.is_some_and(|limit| call >= limit) {
            return Err(unavailable("lesson plan"));
        }

        let id = LessonPlanId::new();
        self.tables().lesson_plans.push(StoredLessonPlan {
            id,
            plan: plan.clone(),
        });
        Ok(id)
    }
}

#[async_trait]
impl AssessmentRecordStore for InMemoryPlanningStore {
    async fn list(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        range: DateRange,
    ) -> Result<Vec<AssessmentSummary>, AppError> {
        self.check_reads("assessment")?;
        let mut assessments: Vec<AssessmentSummary> = self
            .tables()
            .assessments
            .iter()
            .filter(|stored| {
                stored.class_id == class_id
                    && stored.subject_id == subject_id
                    && range.contains(stored.summary.date)
            })
            .map(|stored| stored.summary.clone())
            .collect();
        assessments.sort_by_key(|assessment| assessment.date);
        Ok(assessments)
    }
}
