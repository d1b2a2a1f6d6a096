mod common;

use std::sync::Arc;

use common::{TestSchool, date};
use keystone_core::ErrorKind;
use keystone_models::{
    ConfirmationToken, DraftPlanPatch, LessonPlanStatus, NewLessonPlan, RiskType,
    ids::DraftSessionId,
};

#[tokio::test]
async fn test_generate_builds_window_pacing_and_risks() {
    let school = TestSchool::seeded();

    let draft = school.service.generate(school.request()).await.unwrap();

    assert_eq!(draft.school_id, school.school_id);
    assert_eq!(draft.grade_id, school.grade_id);
    assert_eq!(draft.planning_window.available_day_count(), 38);
    assert_eq!(draft.planning_window.available_weeks, 7);
    assert_eq!(draft.planning_window.lost_days.len(), 7);

    let placed: Vec<(u32, &str)> = draft
        .pacing_suggestions
        .iter()
        .map(|week| (week.week_number, week.topics[0].topic_name.as_str()))
        .collect();
    assert_eq!(
        placed,
        vec![(1, "Place Value"), (2, "Fractions"), (4, "Angles")]
    );

    let angles_week = &draft.pacing_suggestions[2];
    assert_eq!(angles_week.week_start_date, date(2024, 2, 6));
    assert_eq!(angles_week.week_end_date, date(2024, 2, 12));

    assert_eq!(draft.risk_signals.len(), 1);
    assert_eq!(draft.risk_signals[0].risk_type, RiskType::Gap);
    assert_eq!(draft.risk_signals[0].affected_weeks, vec![3, 5, 6, 7]);

    assert_eq!(draft.created_at, draft.modified_at);
    assert_eq!(school.service.active_sessions().await, 1);
    assert_eq!(school.store.create_calls(), 0);
}

#[tokio::test]
async fn test_generate_includes_existing_context() {
    let school = TestSchool::seeded();
    let in_range = school.store.add_lesson_plan(NewLessonPlan {
        teacher_id: school.teacher_id,
        class_id: school.class_id,
        subject_id: school.subject_id,
        status: LessonPlanStatus::Finalized,
        instructional_notes: Some("Bring counters".into()),
        topic: Some("Review".into()),
        start_date: Some(date(2024, 1, 10)),
        end_date: Some(date(2024, 1, 16)),
    });
    school.store.add_lesson_plan(NewLessonPlan {
        teacher_id: school.teacher_id,
        class_id: school.class_id,
        subject_id: school.subject_id,
        status: LessonPlanStatus::Draft,
        instructional_notes: None,
        topic: Some("Last term".into()),
        start_date: Some(date(2023, 11, 1)),
        end_date: Some(date(2023, 11, 8)),
    });
    school
        .store
        .add_assessment(school.class_id, school.subject_id, date(2024, 2, 23), "Unit quiz");
    school
        .store
        .add_assessment(school.class_id, school.subject_id, date(2024, 4, 2), "Final");

    let draft = school.service.generate(school.request()).await.unwrap();

    assert_eq!(draft.existing_plans_context.len(), 1);
    assert_eq!(draft.existing_plans_context[0].id, in_range);
    assert_eq!(draft.existing_plans_context[0].status, LessonPlanStatus::Finalized);
    assert_eq!(draft.existing_assessments_context.len(), 1);
    assert_eq!(draft.existing_assessments_context[0].name, "Unit quiz");
}

#[tokio::test]
async fn test_generate_rejects_unknown_class() {
    let school = TestSchool::seeded();
    let mut request = school.request();
    request.class_id = keystone_models::ids::ClassId::new();

    let err = school.service.generate(request).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(school.service.active_sessions().await, 0);
}

#[tokio::test]
async fn test_generate_rejects_inverted_range() {
    let school = TestSchool::seeded();

    let err = school
        .service
        .generate(school.request_between(date(2024, 3, 15), date(2024, 1, 15)))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(school.service.active_sessions().await, 0);
}

#[tokio::test]
async fn test_generate_propagates_store_failures() {
    let school = TestSchool::seeded();
    school.store.fail_reads(true);

    let err = school.service.generate(school.request()).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Collaborator);
    assert_eq!(school.service.active_sessions().await, 0);
}

#[tokio::test]
async fn test_modify_recomputes_window_only() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();

    let modified = school
        .service
        .modify(
            draft.session_id,
            DraftPlanPatch {
                end_date: Some(date(2024, 2, 9)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(modified.planning_window.start_date, date(2024, 1, 15));
    assert_eq!(modified.planning_window.end_date, date(2024, 2, 9));
    assert_eq!(modified.planning_window.available_day_count(), 19);
    assert_eq!(modified.planning_window.available_weeks, 3);
    assert_eq!(modified.pacing_suggestions, draft.pacing_suggestions);
    assert_eq!(modified.risk_signals, draft.risk_signals);
    assert!(modified.modified_at >= draft.modified_at);

    let fetched = school.service.get(draft.session_id).await.unwrap();
    assert_eq!(fetched, modified);
}

#[tokio::test]
async fn test_modify_with_invalid_range_changes_nothing() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();

    let err = school
        .service
        .modify(
            draft.session_id,
            DraftPlanPatch {
                pacing_suggestions: Some(Vec::new()),
                start_date: Some(date(2024, 4, 1)),
                end_date: None,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    let fetched = school.service.get(draft.session_id).await.unwrap();
    assert_eq!(fetched, draft);
}

#[tokio::test]
async fn test_modify_replaces_suggestions() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();
    let trimmed = draft.pacing_suggestions[..1].to_vec();

    let modified = school
        .service
        .modify(
            draft.session_id,
            DraftPlanPatch {
                pacing_suggestions: Some(trimmed.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(modified.pacing_suggestions, trimmed);
    assert_eq!(modified.planning_window, draft.planning_window);
}

#[tokio::test]
async fn test_reorder_replaces_suggestions_verbatim() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();
    let mut reversed = draft.pacing_suggestions.clone();
    reversed.reverse();

    let reordered = school
        .service
        .reorder(draft.session_id, reversed.clone())
        .await
        .unwrap();

    assert_eq!(reordered.pacing_suggestions, reversed);
    assert_eq!(reordered.risk_signals, draft.risk_signals);
}

#[tokio::test]
async fn test_operations_on_unknown_session_are_not_found() {
    let school = TestSchool::seeded();
    let unknown = DraftSessionId::new();

    assert!(school.service.get(unknown).await.unwrap_err().is_not_found());
    assert!(
        school
            .service
            .modify(unknown, DraftPlanPatch::default())
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        school
            .service
            .reorder(unknown, Vec::new())
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        school
            .service
            .generate_confirmation_token(unknown)
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        school
            .service
            .accept(unknown, &ConfirmationToken::from("anything"))
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(!school.service.discard(unknown).await);
}

#[tokio::test]
async fn test_discard_removes_session() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();
    let token = school
        .service
        .generate_confirmation_token(draft.session_id)
        .await
        .unwrap();

    assert!(school.service.discard(draft.session_id).await);
    assert!(!school.service.discard(draft.session_id).await);

    let err = school
        .service
        .accept(draft.session_id, &token)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(school.store.create_calls(), 0);
    assert_eq!(school.service.active_sessions().await, 0);
}

#[tokio::test]
async fn test_accept_creates_one_draft_plan_per_topic() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();
    let token = school
        .service
        .generate_confirmation_token(draft.session_id)
        .await
        .unwrap();

    let accepted = school
        .service
        .accept(draft.session_id, &token)
        .await
        .unwrap();

    assert_eq!(accepted.session_id, draft.session_id);
    assert_eq!(accepted.lesson_plan_ids.len(), draft.scheduled_topic_count());

    let created = school.store.lesson_plans();
    assert_eq!(created.len(), 3);
    for ((id, plan), week) in created.iter().zip(&draft.pacing_suggestions) {
        assert!(accepted.lesson_plan_ids.contains(id));
        assert_eq!(plan.status, LessonPlanStatus::Draft);
        assert_eq!(plan.teacher_id, school.teacher_id);
        assert_eq!(plan.class_id, school.class_id);
        assert_eq!(plan.subject_id, school.subject_id);
        assert_eq!(plan.instructional_notes, None);
        assert_eq!(plan.topic.as_deref(), Some(week.topics[0].topic_name.as_str()));
        assert_eq!(plan.start_date, Some(week.week_start_date));
        assert_eq!(plan.end_date, Some(week.week_end_date));
    }

    assert!(school.service.get(draft.session_id).await.unwrap_err().is_not_found());
    let replay = school
        .service
        .accept(draft.session_id, &token)
        .await
        .unwrap_err();
    assert!(replay.is_not_found());
    assert_eq!(school.store.lesson_plans().len(), 3);
}

#[tokio::test]
async fn test_accept_without_token_is_rejected() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();

    let err = school
        .service
        .accept(draft.session_id, &ConfirmationToken::from("guess"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidToken);
    assert_eq!(school.store.create_calls(), 0);
    assert_eq!(school.service.get(draft.session_id).await.unwrap(), draft);
}

#[tokio::test]
async fn test_accept_with_wrong_or_replaced_token_is_rejected() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();
    let first = school
        .service
        .generate_confirmation_token(draft.session_id)
        .await
        .unwrap();
    let second = school
        .service
        .generate_confirmation_token(draft.session_id)
        .await
        .unwrap();
    assert_ne!(first, second);

    let err = school
        .service
        .accept(draft.session_id, &first)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
    assert_eq!(school.store.create_calls(), 0);

    let accepted = school
        .service
        .accept(draft.session_id, &second)
        .await
        .unwrap();
    assert_eq!(accepted.lesson_plan_ids.len(), 3);
}

#[tokio::test]
async fn test_failed_commit_keeps_session_active() {
    let school = TestSchool::seeded();
    let draft = school.service.generate(school.request()).await.unwrap();
    let token = school
        .service
        .generate_confirmation_token(draft.session_id)
        .await
        .unwrap();
    school.store.fail_creates_after(1);

    let err = school
        .service
        .accept(draft.session_id, &token)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Collaborator);
    assert_eq!(school.store.create_calls(), 2);
    assert_eq!(school.store.lesson_plans().len(), 1);
    assert!(school.service.get(draft.session_id).await.is_ok());
}

#[tokio::test]
async fn test_list_for_teacher_returns_own_drafts_oldest_first() {
    let school = TestSchool::seeded();
    let first = school.service.generate(school.request()).await.unwrap();
    let second = school
        .service
        .generate(school.request_between(date(2024, 4, 1), date(2024, 6, 28)))
        .await
        .unwrap();

    let mut other = school.request();
    other.teacher_id = keystone_models::ids::TeacherId::new();
    school.service.generate(other).await.unwrap();

    let listed = school.service.list_for_teacher(school.teacher_id).await;
    let ids: Vec<DraftSessionId> = listed.iter().map(|plan| plan.session_id).collect();
    assert_eq!(ids, vec![first.session_id, second.session_id]);

    school.service.discard(first.session_id).await;
    let listed = school.service.list_for_teacher(school.teacher_id).await;
    assert_eq!(listed.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_accepts_commit_once() {
    let school = Arc::new(TestSchool::seeded());
    let draft = school.service.generate(school.request()).await.unwrap();
    let token = school
        .service
        .generate_confirmation_token(draft.session_id)
        .await
        .unwrap();

    let session_id = draft.session_id;
    let mut handles = Vec::new();
    for _ in 0..8 {
        let school = school.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            school.service.accept(session_id, &token).await
        }));
    }

    let mut committed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(accepted) => {
                committed += 1;
                assert_eq!(accepted.lesson_plan_ids.len(), 3);
            }
            Err(err) => assert!(err.is_not_found()),
        }
    }

    assert_eq!(committed, 1);
    assert_eq!(school.store.lesson_plans().len(), 3);
    assert_eq!(school.service.active_sessions().await, 0);
}
