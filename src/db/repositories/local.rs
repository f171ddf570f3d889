//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap structures, providing fast, deterministic, and
//! isolated execution.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::repository::{
    CatalogRepository, RepositoryError, RepositoryResult, ScheduleRepository, SemesterRepository,
    SlotQuery,
};
use crate::models::{
    ClassRoom, ClassRoomId, Course, CourseId, Discipline, DisciplineId, Group, GroupId, Schedule,
    ScheduleId, Semester, SemesterId, SemesterStatus, Teacher, TeacherId, TimeSlot,
};

/// In-memory local repository.
///
/// Stores the full catalog plus schedules in HashMaps behind a single
/// `RwLock`, so the conflict existence queries can join group, discipline,
/// and classroom exactly like a relational backend would.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    teachers: HashMap<TeacherId, Teacher>,
    class_rooms: HashMap<ClassRoomId, ClassRoom>,
    courses: HashMap<CourseId, Course>,
    time_slots: HashMap<CourseId, TimeSlot>,
    disciplines: HashMap<DisciplineId, Discipline>,
    groups: HashMap<GroupId, Group>,
    semesters: HashMap<SemesterId, Semester>,
    schedules: HashMap<ScheduleId, Schedule>,

    next_class_room_id: i64,
    next_course_id: i64,
    next_discipline_id: i64,
    next_group_id: i64,
    next_semester_id: i64,
    next_schedule_id: i64,
}

impl LocalData {
    /// Discipline a schedule belongs to, via its group.
    fn discipline_of(&self, schedule: &Schedule) -> Option<&Discipline> {
        let group = self.groups.get(&schedule.group_id)?;
        self.disciplines.get(&group.discipline_id)
    }

    /// Course a schedule belongs to, via group and discipline.
    fn course_of(&self, schedule: &Schedule) -> Option<CourseId> {
        self.discipline_of(schedule).map(|d| d.course_id)
    }

    /// Classroom a schedule occupies, via its group.
    fn class_room_of(&self, schedule: &Schedule) -> Option<ClassRoomId> {
        self.groups.get(&schedule.group_id).map(|g| g.class_room_id)
    }

    fn matches_scope(&self, schedule: &Schedule, query: &SlotQuery) -> bool {
        if schedule.semester_id != query.semester_id || schedule.day_of_week != query.day_of_week {
            return false;
        }
        match (query.exclude, schedule.id) {
            (Some(excluded), Some(id)) if excluded == id => false,
            _ => true,
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    // ==================== Seeding helpers ====================
    //
    // Synchronous helpers for populating the catalog in tests and local
    // setups. Ids are assigned here; the async trait methods only read
    // the catalog.

    /// Add a teacher and return the id assigned to them.
    pub fn insert_teacher(&self, name: &str, surname: &str) -> TeacherId {
        let mut data = self.data.write().unwrap();
        let id = TeacherId::random();
        data.teachers.insert(
            id,
            Teacher {
                id,
                name: name.to_string(),
                surname: surname.to_string(),
            },
        );
        id
    }

    /// Add a classroom.
    pub fn insert_class_room(&self, name: &str) -> ClassRoomId {
        let mut data = self.data.write().unwrap();
        data.next_class_room_id += 1;
        let id = ClassRoomId(data.next_class_room_id);
        data.class_rooms.insert(
            id,
            ClassRoom {
                id,
                name: name.to_string(),
            },
        );
        id
    }

    /// Add a course.
    pub fn insert_course(&self, name: &str) -> CourseId {
        let mut data = self.data.write().unwrap();
        data.next_course_id += 1;
        let id = CourseId(data.next_course_id);
        data.courses.insert(
            id,
            Course {
                id,
                name: name.to_string(),
            },
        );
        id
    }

    /// Configure the teaching window of a course, replacing any previous one.
    pub fn insert_time_slot(&self, time_slot: TimeSlot) {
        let mut data = self.data.write().unwrap();
        data.time_slots.insert(time_slot.course_id(), time_slot);
    }

    /// Add a discipline to a course.
    pub fn insert_discipline(
        &self,
        course_id: CourseId,
        teacher_id: TeacherId,
        name: &str,
        credits: u32,
    ) -> DisciplineId {
        let mut data = self.data.write().unwrap();
        data.next_discipline_id += 1;
        let id = DisciplineId(data.next_discipline_id);
        data.disciplines.insert(
            id,
            Discipline {
                id,
                course_id,
                teacher_id,
                name: name.to_string(),
                credits,
            },
        );
        id
    }

    /// Add a group to a discipline.
    pub fn insert_group(
        &self,
        discipline_id: DisciplineId,
        class_room_id: ClassRoomId,
        name: &str,
    ) -> GroupId {
        let mut data = self.data.write().unwrap();
        data.next_group_id += 1;
        let id = GroupId(data.next_group_id);
        data.groups.insert(
            id,
            Group {
                id,
                discipline_id,
                class_room_id,
                name: name.to_string(),
                abbreviation: name.chars().take(15).collect(),
                semester_of_course: None,
                color: None,
            },
        );
        id
    }

    /// Add a semester with explicit bounds and status.
    pub fn insert_semester(
        &self,
        year: i32,
        half: u8,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: SemesterStatus,
    ) -> SemesterId {
        let mut data = self.data.write().unwrap();
        data.next_semester_id += 1;
        let id = SemesterId(data.next_semester_id);
        data.semesters.insert(
            id,
            Semester {
                id,
                name: format!("SEMESTRE-{year}/{half}"),
                year,
                half,
                start_date,
                end_date,
                status,
            },
        );
        id
    }

    /// Number of schedules currently stored.
    pub fn schedule_count(&self) -> usize {
        self.data.read().unwrap().schedules.len()
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData::default();
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn find_group(&self, id: GroupId) -> RepositoryResult<Option<Group>> {
        Ok(self.data.read().unwrap().groups.get(&id).cloned())
    }

    async fn find_groups_by_course(&self, course_id: CourseId) -> RepositoryResult<Vec<Group>> {
        let data = self.data.read().unwrap();
        let mut groups: Vec<Group> = data
            .groups
            .values()
            .filter(|group| {
                data.disciplines
                    .get(&group.discipline_id)
                    .is_some_and(|d| d.course_id == course_id)
            })
            .cloned()
            .collect();
        groups.sort_by_key(|g| g.id);
        Ok(groups)
    }

    async fn find_discipline(&self, id: DisciplineId) -> RepositoryResult<Option<Discipline>> {
        Ok(self.data.read().unwrap().disciplines.get(&id).cloned())
    }

    async fn find_course(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        Ok(self.data.read().unwrap().courses.get(&id).cloned())
    }

    async fn find_class_room(&self, id: ClassRoomId) -> RepositoryResult<Option<ClassRoom>> {
        Ok(self.data.read().unwrap().class_rooms.get(&id).cloned())
    }

    async fn find_teacher(&self, id: TeacherId) -> RepositoryResult<Option<Teacher>> {
        Ok(self.data.read().unwrap().teachers.get(&id).cloned())
    }

    async fn find_time_slot_by_course(
        &self,
        course_id: CourseId,
    ) -> RepositoryResult<Option<TimeSlot>> {
        Ok(self.data.read().unwrap().time_slots.get(&course_id).cloned())
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn save_schedule(&self, schedule: &Schedule) -> RepositoryResult<Schedule> {
        let mut data = self.data.write().unwrap();

        // Exact-duplicate uniqueness guard, the storage-level counterpart of
        // the group conflict check.
        let duplicate = data.schedules.values().any(|existing| {
            existing.id != schedule.id
                && existing.group_id == schedule.group_id
                && existing.semester_id == schedule.semester_id
                && existing.day_of_week == schedule.day_of_week
                && existing.start_time == schedule.start_time
                && existing.end_time == schedule.end_time
        });
        if duplicate {
            return Err(RepositoryError::ConstraintViolation(format!(
                "schedule for group {} already exists at {} {}",
                schedule.group_id, schedule.day_of_week, schedule.start_time
            )));
        }

        let mut stored = schedule.clone();
        let id = match schedule.id {
            Some(id) => {
                if !data.schedules.contains_key(&id) {
                    return Err(RepositoryError::NotFound(format!("schedule {id}")));
                }
                id
            }
            None => {
                data.next_schedule_id += 1;
                ScheduleId(data.next_schedule_id)
            }
        };
        stored.id = Some(id);
        data.schedules.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_schedule(&self, id: ScheduleId) -> RepositoryResult<Option<Schedule>> {
        Ok(self.data.read().unwrap().schedules.get(&id).cloned())
    }

    async fn delete_schedule(&self, id: ScheduleId) -> RepositoryResult<bool> {
        Ok(self.data.write().unwrap().schedules.remove(&id).is_some())
    }

    async fn find_by_semester(&self, semester_id: SemesterId) -> RepositoryResult<Vec<Schedule>> {
        let data = self.data.read().unwrap();
        let mut schedules: Vec<Schedule> = data
            .schedules
            .values()
            .filter(|s| s.semester_id == semester_id)
            .cloned()
            .collect();
        schedules.sort_by_key(|s| s.id);
        Ok(schedules)
    }

    async fn find_by_semester_and_course(
        &self,
        semester_id: SemesterId,
        course_id: CourseId,
    ) -> RepositoryResult<Vec<Schedule>> {
        let data = self.data.read().unwrap();
        let mut schedules: Vec<Schedule> = data
            .schedules
            .values()
            .filter(|s| s.semester_id == semester_id && data.course_of(s) == Some(course_id))
            .cloned()
            .collect();
        schedules.sort_by_key(|s| s.id);
        Ok(schedules)
    }

    async fn find_by_semester_and_teacher(
        &self,
        semester_id: SemesterId,
        teacher_id: TeacherId,
    ) -> RepositoryResult<Vec<Schedule>> {
        let data = self.data.read().unwrap();
        let mut schedules: Vec<Schedule> = data
            .schedules
            .values()
            .filter(|s| {
                s.semester_id == semester_id
                    && data
                        .discipline_of(s)
                        .is_some_and(|d| d.teacher_id == teacher_id)
            })
            .cloned()
            .collect();
        schedules.sort_by_key(|s| s.id);
        Ok(schedules)
    }

    async fn find_by_group(&self, group_id: GroupId) -> RepositoryResult<Vec<Schedule>> {
        let data = self.data.read().unwrap();
        let mut schedules: Vec<Schedule> = data
            .schedules
            .values()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect();
        schedules.sort_by_key(|s| s.id);
        Ok(schedules)
    }

    async fn delete_by_semester_and_course(
        &self,
        semester_id: SemesterId,
        course_id: CourseId,
    ) -> RepositoryResult<usize> {
        let mut data = self.data.write().unwrap();
        let doomed: Vec<ScheduleId> = data
            .schedules
            .values()
            .filter(|s| s.semester_id == semester_id && data.course_of(s) == Some(course_id))
            .filter_map(|s| s.id)
            .collect();
        for id in &doomed {
            data.schedules.remove(id);
        }
        Ok(doomed.len())
    }

    async fn teacher_has_overlap(
        &self,
        teacher_id: TeacherId,
        query: SlotQuery,
    ) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.schedules.values().any(|s| {
            data.matches_scope(s, &query)
                && data
                    .discipline_of(s)
                    .is_some_and(|d| d.teacher_id == teacher_id)
                && s.start_time < query.end_time
                && s.end_time > query.start_time
        }))
    }

    async fn class_room_has_overlap(
        &self,
        class_room_id: ClassRoomId,
        query: SlotQuery,
    ) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.schedules.values().any(|s| {
            data.matches_scope(s, &query)
                && data.class_room_of(s) == Some(class_room_id)
                && s.start_time < query.end_time
                && s.end_time > query.start_time
        }))
    }

    async fn group_has_duplicate(
        &self,
        group_id: GroupId,
        query: SlotQuery,
    ) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.schedules.values().any(|s| {
            data.matches_scope(s, &query)
                && s.group_id == group_id
                && s.start_time == query.start_time
                && s.end_time == query.end_time
        }))
    }
}

#[async_trait]
impl SemesterRepository for LocalRepository {
    async fn find_semester(&self, id: SemesterId) -> RepositoryResult<Option<Semester>> {
        Ok(self.data.read().unwrap().semesters.get(&id).cloned())
    }

    async fn find_semester_by_year_and_half(
        &self,
        year: i32,
        half: u8,
    ) -> RepositoryResult<Option<Semester>> {
        let data = self.data.read().unwrap();
        Ok(data
            .semesters
            .values()
            .find(|s| s.year == year && s.half == half)
            .cloned())
    }

    async fn save_semester(&self, semester: &Semester) -> RepositoryResult<Semester> {
        let mut data = self.data.write().unwrap();
        if !data.semesters.contains_key(&semester.id) {
            return Err(RepositoryError::NotFound(format!(
                "semester {}",
                semester.id
            )));
        }
        data.semesters.insert(semester.id, semester.clone());
        Ok(semester.clone())
    }
}
