//! Manual lesson placement, bulk copy between semesters, and read queries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveTime, Weekday};
use log::info;
use serde::{Deserialize, Serialize};

use crate::db::repository::FullRepository;
use crate::models::{
    CourseId, GroupId, PlacementContext, Schedule, ScheduleId, SemesterId, TeacherId,
};

use super::conflicts::ConflictChecker;
use super::error::{ConflictKind, SchedulingError, SchedulingResult};
use super::semester::SemesterService;

/// Walk the entity graph around a group once and flatten it into ids.
///
/// Fails with `NotFound` if any link in group → discipline → course →
/// teaching window is missing.
pub(crate) async fn resolve_context(
    repo: &dyn FullRepository,
    group_id: GroupId,
) -> SchedulingResult<PlacementContext> {
    let group = repo
        .find_group(group_id)
        .await?
        .ok_or_else(|| SchedulingError::not_found("Group", group_id))?;
    let discipline = repo
        .find_discipline(group.discipline_id)
        .await?
        .ok_or_else(|| SchedulingError::not_found("Discipline", group.discipline_id))?;
    let time_slot = repo
        .find_time_slot_by_course(discipline.course_id)
        .await?
        .ok_or_else(|| SchedulingError::not_found("TimeSlot", discipline.course_id))?;

    Ok(PlacementContext {
        group_id: group.id,
        group_name: group.name,
        discipline_id: discipline.id,
        course_id: discipline.course_id,
        teacher_id: discipline.teacher_id,
        class_room_id: group.class_room_id,
        credits: discipline.credits,
        time_slot,
    })
}

/// Caller request for creating or moving a single lesson.
///
/// When `schedule_id` is present the existing lesson is moved to the given
/// day and start time; otherwise `group_id` and `semester_id` are required
/// and a new lesson is created. The end time is never taken from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub semester_id: Option<SemesterId>,
    #[serde(default)]
    pub schedule_id: Option<ScheduleId>,
}

/// Manual placement service plus the read queries the presentation layer
/// consumes.
#[derive(Clone)]
pub struct ScheduleService {
    repo: Arc<dyn FullRepository>,
    semesters: SemesterService,
    conflicts: ConflictChecker,
}

impl ScheduleService {
    pub fn new(repo: Arc<dyn FullRepository>) -> Self {
        Self {
            semesters: SemesterService::new(repo.clone()),
            conflicts: ConflictChecker::new(repo.clone()),
            repo,
        }
    }

    // ==================== Read queries ====================

    /// All schedules for a semester and course.
    pub async fn find_all(
        &self,
        semester_id: SemesterId,
        course_id: CourseId,
    ) -> SchedulingResult<Vec<Schedule>> {
        Ok(self
            .repo
            .find_by_semester_and_course(semester_id, course_id)
            .await?)
    }

    /// All schedules of the semester covering today's date.
    pub async fn find_public_schedules(&self) -> SchedulingResult<Vec<Schedule>> {
        let semester = self.semesters.current_semester().await?;
        Ok(self.repo.find_by_semester(semester.id).await?)
    }

    /// A schedule by id, if it exists.
    pub async fn find_by_id(&self, id: ScheduleId) -> SchedulingResult<Option<Schedule>> {
        Ok(self.repo.find_schedule(id).await?)
    }

    /// All schedules of a teacher in a semester.
    pub async fn find_by_teacher(
        &self,
        semester_id: SemesterId,
        teacher_id: TeacherId,
    ) -> SchedulingResult<Vec<Schedule>> {
        Ok(self
            .repo
            .find_by_semester_and_teacher(semester_id, teacher_id)
            .await?)
    }

    /// Delete a schedule by id. Deleting an unknown id is a no-op.
    pub async fn delete(&self, id: ScheduleId) -> SchedulingResult<()> {
        self.repo.delete_schedule(id).await?;
        Ok(())
    }

    // ==================== Mutations ====================

    /// Create a new lesson or move an existing one.
    ///
    /// The lesson's end time is recomputed from the course's configured
    /// lesson duration in both paths. Validation runs before the write; a
    /// rejected request leaves no partial state behind.
    pub async fn place_or_update(&self, request: PlacementRequest) -> SchedulingResult<Schedule> {
        let mut schedule = match request.schedule_id {
            Some(schedule_id) => {
                let mut existing = self
                    .repo
                    .find_schedule(schedule_id)
                    .await?
                    .ok_or_else(|| SchedulingError::not_found("Schedule", schedule_id))?;
                existing.day_of_week = request.day_of_week;
                existing.start_time = request.start_time;
                existing
            }
            None => {
                let group_id = request
                    .group_id
                    .ok_or(SchedulingError::MissingField("group_id"))?;
                let semester_id = request
                    .semester_id
                    .ok_or(SchedulingError::MissingField("semester_id"))?;
                // Fails for unknown ids and for finalized/expired semesters.
                let group = self
                    .repo
                    .find_group(group_id)
                    .await?
                    .ok_or_else(|| SchedulingError::not_found("Group", group_id))?;
                let semester = self.semesters.resolve_active(semester_id).await?;
                Schedule {
                    id: None,
                    group_id: group.id,
                    semester_id: semester.id,
                    day_of_week: request.day_of_week,
                    start_time: request.start_time,
                    end_time: request.start_time,
                }
            }
        };

        let ctx = resolve_context(self.repo.as_ref(), schedule.group_id).await?;
        schedule.end_time = ctx
            .time_slot
            .lesson_end(schedule.start_time)
            .ok_or(SchedulingError::Invalid(ConflictKind::EndsAfterWindow))?;

        self.validate_and_save(&schedule, &ctx).await
    }

    /// Copy every schedule of a course from one semester into another.
    ///
    /// The destination (semester, course) set is deleted first, so copying
    /// replaces rather than accumulates. Each copied lesson is re-validated
    /// against the destination semester before it is persisted; a conflict
    /// aborts the copy, leaving the lessons persisted so far in place.
    pub async fn copy_schedules(
        &self,
        from_semester_id: SemesterId,
        to_semester_id: SemesterId,
        course_id: CourseId,
    ) -> SchedulingResult<Vec<Schedule>> {
        let destination = self.semesters.resolve_active(to_semester_id).await?;

        let deleted = self
            .repo
            .delete_by_semester_and_course(to_semester_id, course_id)
            .await?;
        info!(
            "deleted {deleted} schedules for semester {to_semester_id} and course {course_id}"
        );

        let sources = self
            .repo
            .find_by_semester_and_course(from_semester_id, course_id)
            .await?;

        let mut contexts: HashMap<GroupId, PlacementContext> = HashMap::new();
        let mut copied = Vec::with_capacity(sources.len());

        for source in sources {
            if !contexts.contains_key(&source.group_id) {
                let ctx = resolve_context(self.repo.as_ref(), source.group_id).await?;
                contexts.insert(source.group_id, ctx);
            }
            let ctx = &contexts[&source.group_id];

            let candidate = Schedule {
                id: None,
                semester_id: destination.id,
                ..source
            };
            copied.push(self.validate_and_save(&candidate, ctx).await?);
        }

        Ok(copied)
    }

    /// Validate a candidate against all conflict rules and persist it.
    pub(crate) async fn validate_and_save(
        &self,
        candidate: &Schedule,
        ctx: &PlacementContext,
    ) -> SchedulingResult<Schedule> {
        self.conflicts.validate_all(candidate, ctx).await?;
        Ok(self.repo.save_schedule(candidate).await?)
    }
}
