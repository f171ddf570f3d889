//! Catalog entities: courses, disciplines, groups, classrooms, teachers.
//!
//! These are read-only inputs to the scheduling engine. They are kept flat
//! (id references instead of nested objects) so the conflict checker works
//! with plain keys rather than lazily navigated object graphs.

use serde::{Deserialize, Serialize};

use super::ids::{ClassRoomId, CourseId, DisciplineId, GroupId, TeacherId};

/// A teacher from the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub surname: String,
}

impl Teacher {
    /// Display name used in reports.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// A physical classroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoom {
    pub id: ClassRoomId,
    pub name: String,
}

/// An academic course. Its teaching window lives in a separate `TimeSlot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
}

/// A discipline taught inside a course by exactly one teacher.
///
/// `credits` is the number of weekly lessons every group of this discipline
/// must receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: DisciplineId,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub name: String,
    pub credits: u32,
}

/// A cohort of students attached to one discipline and one classroom.
/// The unit that actually receives lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub discipline_id: DisciplineId,
    pub class_room_id: ClassRoomId,
    pub name: String,
    pub abbreviation: String,
    pub semester_of_course: Option<u32>,
    pub color: Option<String>,
}
