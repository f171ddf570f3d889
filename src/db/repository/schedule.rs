//! Schedule repository trait: CRUD plus the conflict existence queries.

use async_trait::async_trait;
use chrono::{NaiveTime, Weekday};

use super::error::RepositoryResult;
use crate::models::{
    ClassRoomId, CourseId, GroupId, Schedule, ScheduleId, SemesterId, TeacherId,
};

/// Day-and-time scope for a conflict existence query.
///
/// `exclude` carries the candidate's own id when validating an update, so a
/// schedule never conflicts with itself.
#[derive(Debug, Clone, Copy)]
pub struct SlotQuery {
    pub semester_id: SemesterId,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exclude: Option<ScheduleId>,
}

impl SlotQuery {
    /// Build the query scope for a candidate placement.
    pub fn for_candidate(candidate: &Schedule) -> Self {
        Self {
            semester_id: candidate.semester_id,
            day_of_week: candidate.day_of_week,
            start_time: candidate.start_time,
            end_time: candidate.end_time,
            exclude: candidate.id,
        }
    }
}

/// Repository trait for lesson placements.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Persist a schedule.
    ///
    /// A schedule without an id is inserted and assigned one; a schedule
    /// with an id replaces the stored row.
    ///
    /// # Returns
    /// * `Ok(Schedule)` - the stored schedule, id populated
    /// * `Err(RepositoryError::NotFound)` - update of a missing id
    /// * `Err(RepositoryError::ConstraintViolation)` - exact duplicate of
    ///   another placement for the same group, semester, day, and time
    async fn save_schedule(&self, schedule: &Schedule) -> RepositoryResult<Schedule>;

    /// Fetch a schedule by id.
    async fn find_schedule(&self, id: ScheduleId) -> RepositoryResult<Option<Schedule>>;

    /// Delete a schedule by id. Returns whether a row was removed.
    async fn delete_schedule(&self, id: ScheduleId) -> RepositoryResult<bool>;

    /// All schedules of a semester.
    async fn find_by_semester(&self, semester_id: SemesterId) -> RepositoryResult<Vec<Schedule>>;

    /// All schedules of a semester whose group belongs to the course.
    async fn find_by_semester_and_course(
        &self,
        semester_id: SemesterId,
        course_id: CourseId,
    ) -> RepositoryResult<Vec<Schedule>>;

    /// All schedules of a semester taught by the teacher.
    async fn find_by_semester_and_teacher(
        &self,
        semester_id: SemesterId,
        teacher_id: TeacherId,
    ) -> RepositoryResult<Vec<Schedule>>;

    /// All schedules of a group, across semesters.
    async fn find_by_group(&self, group_id: GroupId) -> RepositoryResult<Vec<Schedule>>;

    /// Remove every schedule for the (semester, course) pair.
    ///
    /// # Returns
    /// Number of schedules deleted.
    async fn delete_by_semester_and_course(
        &self,
        semester_id: SemesterId,
        course_id: CourseId,
    ) -> RepositoryResult<usize>;

    /// Whether another schedule taught by the teacher overlaps the queried
    /// interval on the same day of the same semester.
    async fn teacher_has_overlap(
        &self,
        teacher_id: TeacherId,
        query: SlotQuery,
    ) -> RepositoryResult<bool>;

    /// Whether another schedule in the classroom overlaps the queried
    /// interval on the same day of the same semester.
    async fn class_room_has_overlap(
        &self,
        class_room_id: ClassRoomId,
        query: SlotQuery,
    ) -> RepositoryResult<bool>;

    /// Whether the group already holds a schedule with the identical day,
    /// start, and end in the semester. Exact match, not overlap: a group
    /// may hold back-to-back or even overlapping non-identical lessons.
    async fn group_has_duplicate(
        &self,
        group_id: GroupId,
        query: SlotQuery,
    ) -> RepositoryResult<bool>;
}
