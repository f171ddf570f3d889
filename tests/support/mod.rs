//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Weekday};
use class_scheduler::db::{FullRepository, LocalRepository};
use class_scheduler::models::{
    ClassRoomId, CourseId, GroupId, SemesterId, SemesterStatus, TeacherId, TimeSlot,
};

pub fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A seeded campus: one course with a teaching window and one semester far
/// enough in the future to always count as active.
pub struct Campus {
    pub repo: Arc<LocalRepository>,
    pub course_id: CourseId,
    pub semester_id: SemesterId,
}

impl Campus {
    /// Course with the given window plus an ACTIVE semester in 2099.
    pub fn new(
        days: impl IntoIterator<Item = Weekday>,
        start: NaiveTime,
        end: NaiveTime,
        lesson_minutes: u32,
    ) -> Self {
        let repo = Arc::new(LocalRepository::new());
        let course_id = repo.insert_course("Engineering");
        repo.insert_time_slot(
            TimeSlot::new(course_id, days, start, end, lesson_minutes).unwrap(),
        );
        let semester_id = repo.insert_semester(
            2099,
            1,
            d(2099, 1, 1),
            d(2099, 6, 30),
            SemesterStatus::Active,
        );
        Self {
            repo,
            course_id,
            semester_id,
        }
    }

    pub fn shared(&self) -> Arc<dyn FullRepository> {
        self.repo.clone()
    }

    /// Add a discipline with a fresh teacher plus one group in a fresh room.
    pub fn add_section(&self, name: &str, credits: u32) -> Section {
        let teacher_id = self.repo.insert_teacher(name, "Teacher");
        let room_id = self.repo.insert_class_room(&format!("Room {name}"));
        self.add_section_with(name, credits, teacher_id, room_id)
    }

    /// Add a discipline and group reusing an existing teacher and room.
    pub fn add_section_with(
        &self,
        name: &str,
        credits: u32,
        teacher_id: TeacherId,
        room_id: ClassRoomId,
    ) -> Section {
        let discipline_id = self
            .repo
            .insert_discipline(self.course_id, teacher_id, name, credits);
        let group_id = self.repo.insert_group(discipline_id, room_id, name);
        Section {
            discipline_id,
            group_id,
            teacher_id,
            room_id,
        }
    }

    /// Add another group to an existing section's discipline and room.
    pub fn add_group(&self, section: &Section, name: &str) -> GroupId {
        self.repo
            .insert_group(section.discipline_id, section.room_id, name)
    }
}

/// One discipline/group pair with its teacher and room.
pub struct Section {
    pub discipline_id: class_scheduler::models::DisciplineId,
    pub group_id: GroupId,
    pub teacher_id: TeacherId,
    pub room_id: ClassRoomId,
}
