#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use fake::Fake;
use fake::faker::lorem::en::Words;
use fake::faker::name::en::LastName;
use keystone::keystone_planning::memory::InMemoryPlanningStore;
use keystone::keystone_models::{
    CurriculumStructure, CurriculumTopic, CurriculumUnit, GenerateDraftPlanDto, Holiday,
    ids::{ClassId, GradeId, SchoolId, SubjectId, TeacherId, TopicId, UnitId},
};
use keystone::{DraftPlanService, PlanningConfig};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn weekdays(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

fn fake_title() -> String {
    let words: Vec<String> = Words(2..4).fake();
    words.join(" ")
}

/// Curriculum of `units` units with `topics_per_unit` one-week topics each.
pub fn generated_curriculum(units: usize, topics_per_unit: usize) -> CurriculumStructure {
    CurriculumStructure {
        units: (0..units)
            .map(|u| CurriculumUnit {
                id: UnitId::new(),
                name: format!("{} {}", fake_title(), u),
                sequence_order: Some(u as i32),
                topics: (0..topics_per_unit)
                    .map(|t| CurriculumTopic {
                        id: TopicId::new(),
                        name: format!("{} {}", fake_title(), t),
                        sequence_order: Some(t as i32),
                        estimated_weeks: 1,
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub struct Classroom {
    pub store: Arc<InMemoryPlanningStore>,
    pub service: DraftPlanService,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
}

impl Classroom {
    /// A class in a school teaching every weekday of 2024, with a holiday on
    /// the founder's day, Feb 12.
    pub fn with_curriculum(curriculum: CurriculumStructure, config: PlanningConfig) -> Self {
        let store = InMemoryPlanningStore::shared();
        let school_id = SchoolId::new();
        let grade_id = GradeId::new();
        let class_id = ClassId::new();
        let subject_id = SubjectId::new();
        let founder: String = LastName().fake();

        store.add_class(class_id, school_id, grade_id);
        store.set_curriculum(school_id, grade_id, subject_id, curriculum);
        store.add_teaching_days(school_id, weekdays(date(2024, 1, 1), date(2024, 12, 31)));
        store.add_holiday(
            school_id,
            Holiday::new(date(2024, 2, 12), format!("{} Day", founder)),
        );

        Self {
            service: DraftPlanService::new(store.stores(), config),
            store,
            class_id,
            subject_id,
            teacher_id: TeacherId::new(),
        }
    }

    pub fn request(&self, start: NaiveDate, end: NaiveDate) -> GenerateDraftPlanDto {
        GenerateDraftPlanDto {
            teacher_id: self.teacher_id,
            class_id: self.class_id,
            subject_id: self.subject_id,
            start_date: start,
            end_date: end,
        }
    }
}
