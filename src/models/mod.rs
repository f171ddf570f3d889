//! Domain model types for the timetabling engine.

pub mod catalog;
pub mod ids;
mod macros;
pub mod schedule;
pub mod semester;
pub mod time_slot;

pub use catalog::{ClassRoom, Course, Discipline, Group, Teacher};
pub use ids::{
    ClassRoomId, CourseId, DisciplineId, GroupId, ScheduleId, SemesterId, TeacherId,
};
pub use schedule::{PlacementContext, Schedule};
pub use semester::{Semester, SemesterStatus};
pub use time_slot::{TimeSlot, TimeSlotError};
