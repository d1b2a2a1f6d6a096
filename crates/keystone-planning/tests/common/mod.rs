#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use keystone_config::PlanningConfig;
use keystone_models::{
    CurriculumStructure, CurriculumTopic, CurriculumUnit, ExamPeriod, GenerateDraftPlanDto,
    Holiday,
    ids::{ClassId, GradeId, SchoolId, SubjectId, TeacherId, TopicId, UnitId},
};
use keystone_planning::DraftPlanService;
use keystone_planning::memory::InMemoryPlanningStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday to Friday between `start` and `end`, inclusive.
pub fn weekdays(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

pub fn topic(name: &str, order: i32, weeks: u32) -> CurriculumTopic {
    CurriculumTopic {
        id: TopicId::new(),
        name: name.to_string(),
        sequence_order: Some(order),
        estimated_weeks: weeks,
    }
}

pub fn unit(name: &str, order: i32, topics: Vec<CurriculumTopic>) -> CurriculumUnit {
    CurriculumUnit {
        id: UnitId::new(),
        name: name.to_string(),
        sequence_order: Some(order),
        topics,
    }
}

/// Place Value (1 week), Fractions (2 weeks), Angles (1 week).
pub fn sample_curriculum() -> CurriculumStructure {
    CurriculumStructure {
        units: vec![
            unit("Geometry", 2, vec![topic("Angles", 1, 1)]),
            unit(
                "Number Sense",
                1,
                vec![topic("Fractions", 2, 2), topic("Place Value", 1, 1)],
            ),
        ],
    }
}

pub struct TestSchool {
    pub store: Arc<InMemoryPlanningStore>,
    pub service: DraftPlanService,
    pub school_id: SchoolId,
    pub grade_id: GradeId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
}

impl TestSchool {
    /// Winter term 2024: weekdays from Jan 15 to Mar 15, holidays on Jan 29
    /// and Feb 19, exams Mar 4 to Mar 8. Leaves 38 available days, 7 weeks.
    pub fn seeded() -> Self {
        let store = InMemoryPlanningStore::shared();
        let school_id = SchoolId::new();
        let grade_id = GradeId::new();
        let class_id = ClassId::new();
        let subject_id = SubjectId::new();

        store.add_class(class_id, school_id, grade_id);
        store.set_curriculum(school_id, grade_id, subject_id, sample_curriculum());
        store.add_teaching_days(school_id, weekdays(date(2024, 1, 1), date(2024, 6, 28)));
        store.add_holiday(school_id, Holiday::new(date(2024, 1, 29), "Staff training"));
        store.add_holiday(school_id, Holiday::new(date(2024, 2, 19), "Presidents' Day"));
        store.add_exam_period(
            school_id,
            ExamPeriod::new(date(2024, 3, 4), date(2024, 3, 8)).unwrap(),
        );

        let service = DraftPlanService::new(store.stores(), PlanningConfig::default());

        Self {
            store,
            service,
            school_id,
            grade_id,
            class_id,
            subject_id,
            teacher_id: TeacherId::new(),
        }
    }

    pub fn request(&self) -> GenerateDraftPlanDto {
        self.request_between(date(2024, 1, 15), date(2024, 3, 15))
    }

    pub fn request_between(&self, start: NaiveDate, end: NaiveDate) -> GenerateDraftPlanDto {
        GenerateDraftPlanDto {
            teacher_id: self.teacher_id,
            class_id: self.class_id,
            subject_id: self.subject_id,
            start_date: start,
            end_date: end,
        }
    }
}
