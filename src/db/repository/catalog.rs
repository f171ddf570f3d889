//! Read-side repository trait for catalog entities.
//!
//! The scheduling engine only ever reads courses, disciplines, groups,
//! classrooms, teachers, and teaching windows; their administration is a
//! separate concern outside this crate.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{
    ClassRoom, ClassRoomId, Course, CourseId, Discipline, DisciplineId, Group, GroupId, Teacher,
    TeacherId, TimeSlot,
};

/// Repository trait for catalog lookups.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch a group by id.
    async fn find_group(&self, id: GroupId) -> RepositoryResult<Option<Group>>;

    /// Fetch all groups belonging to a course, in insertion order.
    ///
    /// A group belongs to a course through its discipline.
    async fn find_groups_by_course(&self, course_id: CourseId) -> RepositoryResult<Vec<Group>>;

    /// Fetch a discipline by id.
    async fn find_discipline(&self, id: DisciplineId) -> RepositoryResult<Option<Discipline>>;

    /// Fetch a course by id.
    async fn find_course(&self, id: CourseId) -> RepositoryResult<Option<Course>>;

    /// Fetch a classroom by id.
    async fn find_class_room(&self, id: ClassRoomId) -> RepositoryResult<Option<ClassRoom>>;

    /// Fetch a teacher by id.
    async fn find_teacher(&self, id: TeacherId) -> RepositoryResult<Option<Teacher>>;

    /// Fetch the teaching window configured for a course, if any.
    async fn find_time_slot_by_course(
        &self,
        course_id: CourseId,
    ) -> RepositoryResult<Option<TimeSlot>>;
}
