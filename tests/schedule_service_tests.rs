//! Manual placement, moves, bulk copy and read queries.

mod support;

use chrono::{Datelike, Weekday};
use class_scheduler::models::{semester, ScheduleId, SemesterStatus};
use class_scheduler::services::{
    ConflictKind, PlacementRequest, ScheduleService, SchedulingError,
};
use support::{d, t, Campus};

fn request(campus: &Campus, group_id: class_scheduler::models::GroupId) -> PlacementRequest {
    PlacementRequest {
        day_of_week: Weekday::Mon,
        start_time: t(8, 0),
        group_id: Some(group_id),
        semester_id: Some(campus.semester_id),
        schedule_id: None,
    }
}

#[tokio::test]
async fn placement_requests_parse_from_json() {
    let campus = Campus::new([Weekday::Mon], t(8, 0), t(10, 0), 60);
    let section = campus.add_section("Algebra", 1);
    let service = ScheduleService::new(campus.shared());

    let body = format!(
        r#"{{"day_of_week":"Mon","start_time":"08:00:00","group_id":{},"semester_id":{}}}"#,
        section.group_id, campus.semester_id
    );
    let parsed: PlacementRequest = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed.schedule_id, None);

    let saved = service.place_or_update(parsed).await.unwrap();
    assert_eq!(saved.day_of_week, Weekday::Mon);
    assert_eq!(saved.end_time, t(9, 0));
}

#[tokio::test]
async fn placing_a_lesson_recomputes_its_end_time() {
    let campus = Campus::new([Weekday::Mon, Weekday::Wed], t(8, 0), t(12, 0), 50);
    let section = campus.add_section("Algebra", 2);
    let service = ScheduleService::new(campus.shared());

    let saved = service.place_or_update(request(&campus, section.group_id)).await.unwrap();

    assert!(saved.id.is_some());
    assert_eq!(saved.end_time, t(8, 50));
    assert_eq!(campus.repo.schedule_count(), 1);
}

#[tokio::test]
async fn creating_requires_group_and_semester() {
    let campus = Campus::new([Weekday::Mon], t(8, 0), t(10, 0), 60);
    let section = campus.add_section("Algebra", 2);
    let service = ScheduleService::new(campus.shared());

    let mut missing_group = request(&campus, section.group_id);
    missing_group.group_id = None;
    assert!(matches!(
        service.place_or_update(missing_group).await,
        Err(SchedulingError::MissingField("group_id"))
    ));

    let mut missing_semester = request(&campus, section.group_id);
    missing_semester.semester_id = None;
    assert!(matches!(
        service.place_or_update(missing_semester).await,
        Err(SchedulingError::MissingField("semester_id"))
    ));

    let mut unknown_group = request(&campus, section.group_id);
    unknown_group.group_id = Some(class_scheduler::models::GroupId(999));
    match service.place_or_update(unknown_group).await {
        Err(SchedulingError::NotFound { entity, .. }) => assert_eq!(entity, "Group"),
        other => panic!("expected unknown group, got {other:?}"),
    }
}

#[tokio::test]
async fn updating_moves_a_lesson_to_a_new_slot() {
    let campus = Campus::new([Weekday::Mon, Weekday::Wed], t(8, 0), t(10, 0), 60);
    let section = campus.add_section("Algebra", 2);
    let service = ScheduleService::new(campus.shared());

    let original = service.place_or_update(request(&campus, section.group_id)).await.unwrap();

    let moved = service
        .place_or_update(PlacementRequest {
            day_of_week: Weekday::Wed,
            start_time: t(9, 0),
            group_id: None,
            semester_id: None,
            schedule_id: original.id,
        })
        .await
        .unwrap();

    assert_eq!(moved.id, original.id);
    assert_eq!(moved.day_of_week, Weekday::Wed);
    assert_eq!(moved.start_time, t(9, 0));
    assert_eq!(moved.end_time, t(10, 0));
    // The move overwrote the original slot instead of adding a lesson.
    assert_eq!(campus.repo.schedule_count(), 1);
}

#[tokio::test]
async fn updating_an_unknown_schedule_fails() {
    let campus = Campus::new([Weekday::Mon], t(8, 0), t(10, 0), 60);
    let service = ScheduleService::new(campus.shared());

    let result = service
        .place_or_update(PlacementRequest {
            day_of_week: Weekday::Mon,
            start_time: t(8, 0),
            group_id: None,
            semester_id: None,
            schedule_id: Some(ScheduleId(42)),
        })
        .await;

    match result {
        Err(SchedulingError::NotFound { entity, .. }) => assert_eq!(entity, "Schedule"),
        other => panic!("expected unknown schedule, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_is_a_no_op_for_unknown_ids() {
    let campus = Campus::new([Weekday::Mon], t(8, 0), t(10, 0), 60);
    let section = campus.add_section("Algebra", 1);
    let service = ScheduleService::new(campus.shared());

    let saved = service.place_or_update(request(&campus, section.group_id)).await.unwrap();
    service.delete(ScheduleId(9999)).await.unwrap();
    assert_eq!(campus.repo.schedule_count(), 1);

    service.delete(saved.id.unwrap()).await.unwrap();
    assert_eq!(campus.repo.schedule_count(), 0);
    assert!(service.find_by_id(saved.id.unwrap()).await.unwrap().is_none());
}

#[tokio::test]
async fn teacher_query_only_returns_their_lessons() {
    let campus = Campus::new([Weekday::Mon, Weekday::Wed], t(8, 0), t(10, 0), 60);
    let first = campus.add_section("Algebra", 1);
    let second = campus.add_section("Biology", 1);
    let service = ScheduleService::new(campus.shared());

    service.place_or_update(request(&campus, first.group_id)).await.unwrap();
    let mut other = request(&campus, second.group_id);
    other.day_of_week = Weekday::Wed;
    service.place_or_update(other).await.unwrap();

    let lessons = service
        .find_by_teacher(campus.semester_id, first.teacher_id)
        .await
        .unwrap();
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].group_id, first.group_id);
}

#[tokio::test]
async fn public_schedules_come_from_the_current_semester() {
    let campus = Campus::new([Weekday::Mon], t(8, 0), t(10, 0), 60);
    let section = campus.add_section("Algebra", 1);

    let today = chrono::Local::now().date_naive();
    let half = semester::half_for_month(today.month());
    let current = campus.repo.insert_semester(
        today.year(),
        half,
        semester::half_start(today.year(), half),
        semester::half_end(today.year(), half),
        SemesterStatus::Active,
    );

    let service = ScheduleService::new(campus.shared());
    let mut in_current = request(&campus, section.group_id);
    in_current.semester_id = Some(current);
    service.place_or_update(in_current).await.unwrap();

    // A lesson in the far-future seeded semester must not leak through.
    let mut elsewhere = request(&campus, section.group_id);
    elsewhere.start_time = t(9, 0);
    service.place_or_update(elsewhere).await.unwrap();

    let public = service.find_public_schedules().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].semester_id, current);
}

#[tokio::test]
async fn copy_replaces_the_destination_course_schedules() {
    let campus = Campus::new([Weekday::Mon, Weekday::Wed], t(8, 0), t(12, 0), 60);
    let section = campus.add_section("Algebra", 2);
    let other_course = {
        let course_id = campus.repo.insert_course("Design");
        campus.repo.insert_time_slot(
            class_scheduler::models::TimeSlot::new(
                course_id,
                [Weekday::Fri],
                t(8, 0),
                t(10, 0),
                60,
            )
            .unwrap(),
        );
        course_id
    };
    let other_teacher = campus.repo.insert_teacher("Aside", "Teacher");
    let other_room = campus.repo.insert_class_room("Atelier");
    let other_discipline =
        campus
            .repo
            .insert_discipline(other_course, other_teacher, "Sketching", 1);
    let other_group = campus.repo.insert_group(other_discipline, other_room, "Sketching A");

    let destination = campus.repo.insert_semester(
        2099,
        2,
        d(2099, 7, 1),
        d(2099, 12, 30),
        SemesterStatus::Active,
    );
    let service = ScheduleService::new(campus.shared());

    // Source semester: two lessons for the copied course.
    service.place_or_update(request(&campus, section.group_id)).await.unwrap();
    let mut second = request(&campus, section.group_id);
    second.day_of_week = Weekday::Wed;
    service.place_or_update(second).await.unwrap();

    // Destination already holds a stale lesson for the copied course and an
    // unrelated lesson for another course.
    let mut stale = request(&campus, section.group_id);
    stale.semester_id = Some(destination);
    stale.start_time = t(10, 0);
    service.place_or_update(stale).await.unwrap();
    let mut unrelated = PlacementRequest {
        day_of_week: Weekday::Fri,
        start_time: t(8, 0),
        group_id: Some(other_group),
        semester_id: Some(destination),
        schedule_id: None,
    };
    service.place_or_update(unrelated.clone()).await.unwrap();
    unrelated.start_time = t(9, 0);
    service.place_or_update(unrelated).await.unwrap();

    let copied = service
        .copy_schedules(campus.semester_id, destination, campus.course_id)
        .await
        .unwrap();

    assert_eq!(copied.len(), 2);
    assert!(copied.iter().all(|s| s.semester_id == destination));

    let in_destination = service.find_all(destination, campus.course_id).await.unwrap();
    assert_eq!(in_destination.len(), 2);
    assert!(in_destination
        .iter()
        .all(|s| s.start_time == t(8, 0) && s.end_time == t(9, 0)));

    // The other course's lessons survived the replacement.
    let untouched = service.find_all(destination, other_course).await.unwrap();
    assert_eq!(untouched.len(), 2);
}

#[tokio::test]
async fn copy_into_a_finalized_semester_is_rejected() {
    let campus = Campus::new([Weekday::Mon], t(8, 0), t(10, 0), 60);
    let section = campus.add_section("Algebra", 1);
    let finalized = campus.repo.insert_semester(
        2020,
        1,
        d(2020, 1, 1),
        d(2020, 6, 30),
        SemesterStatus::Finalized,
    );
    let service = ScheduleService::new(campus.shared());
    service.place_or_update(request(&campus, section.group_id)).await.unwrap();

    let result = service
        .copy_schedules(campus.semester_id, finalized, campus.course_id)
        .await;
    assert!(matches!(
        result,
        Err(SchedulingError::Invalid(ConflictKind::SemesterFinalized))
    ));
    assert_eq!(campus.repo.schedule_count(), 1);
}
