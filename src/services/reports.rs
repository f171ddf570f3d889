//! Semester workload and occupation reports.
//!
//! Aggregations over the persisted schedules of one semester: hours taught
//! per teacher, hours per (course, discipline), and a room-by-room
//! occupation listing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveTime, Weekday};
use serde::Serialize;

use crate::db::repository::FullRepository;
use crate::models::{CourseId, DisciplineId, Schedule, SemesterId, TeacherId};

use super::error::{SchedulingError, SchedulingResult};

/// Total teaching hours of one teacher in a semester.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherWorkloadReport {
    pub teacher_name: String,
    pub total_hours: f64,
}

/// Total scheduled hours of one discipline within its course.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDisciplineWorkloadReport {
    pub course_name: String,
    pub discipline_name: String,
    pub total_hours: f64,
}

/// One occupied classroom interval.
#[derive(Debug, Clone, Serialize)]
pub struct ClassRoomOccupationReport {
    pub class_room_name: String,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub group_name: String,
    pub discipline_name: String,
}

/// Read-only reporting over a semester's schedules.
#[derive(Clone)]
pub struct ReportService {
    repo: Arc<dyn FullRepository>,
}

/// Denormalized row used by all three aggregations.
struct ReportRow {
    schedule: Schedule,
    group_name: String,
    discipline_id: DisciplineId,
    discipline_name: String,
    course_id: CourseId,
    course_name: String,
    teacher_id: TeacherId,
    teacher_name: String,
    class_room_name: String,
}

impl ReportService {
    pub fn new(repo: Arc<dyn FullRepository>) -> Self {
        Self { repo }
    }

    /// Hours taught per teacher in the semester, in teacher-name order.
    pub async fn teacher_workload(
        &self,
        semester_id: SemesterId,
    ) -> SchedulingResult<Vec<TeacherWorkloadReport>> {
        let rows = self.resolve_rows(semester_id).await?;
        let mut totals: HashMap<TeacherId, (String, f64)> = HashMap::new();
        for row in &rows {
            let entry = totals
                .entry(row.teacher_id)
                .or_insert_with(|| (row.teacher_name.clone(), 0.0));
            entry.1 += row.schedule.duration_minutes() as f64 / 60.0;
        }

        let mut reports: Vec<TeacherWorkloadReport> = totals
            .into_values()
            .map(|(teacher_name, total_hours)| TeacherWorkloadReport {
                teacher_name,
                total_hours,
            })
            .collect();
        reports.sort_by(|a, b| a.teacher_name.cmp(&b.teacher_name));
        Ok(reports)
    }

    /// Hours scheduled per (course, discipline) in the semester.
    pub async fn course_discipline_workload(
        &self,
        semester_id: SemesterId,
    ) -> SchedulingResult<Vec<CourseDisciplineWorkloadReport>> {
        let rows = self.resolve_rows(semester_id).await?;
        let mut totals: HashMap<(CourseId, DisciplineId), (String, String, f64)> = HashMap::new();
        for row in &rows {
            let entry = totals
                .entry((row.course_id, row.discipline_id))
                .or_insert_with(|| (row.course_name.clone(), row.discipline_name.clone(), 0.0));
            entry.2 += row.schedule.duration_minutes() as f64 / 60.0;
        }

        let mut reports: Vec<CourseDisciplineWorkloadReport> = totals
            .into_values()
            .map(
                |(course_name, discipline_name, total_hours)| CourseDisciplineWorkloadReport {
                    course_name,
                    discipline_name,
                    total_hours,
                },
            )
            .collect();
        reports.sort_by(|a, b| {
            (a.course_name.as_str(), a.discipline_name.as_str())
                .cmp(&(b.course_name.as_str(), b.discipline_name.as_str()))
        });
        Ok(reports)
    }

    /// Every occupied classroom interval in the semester, ordered by room
    /// name, weekday, and start time.
    pub async fn class_room_occupation(
        &self,
        semester_id: SemesterId,
    ) -> SchedulingResult<Vec<ClassRoomOccupationReport>> {
        let rows = self.resolve_rows(semester_id).await?;
        let mut reports: Vec<ClassRoomOccupationReport> = rows
            .into_iter()
            .map(|row| ClassRoomOccupationReport {
                class_room_name: row.class_room_name,
                day_of_week: row.schedule.day_of_week,
                start_time: row.schedule.start_time,
                end_time: row.schedule.end_time,
                group_name: row.group_name,
                discipline_name: row.discipline_name,
            })
            .collect();
        reports.sort_by(|a, b| {
            (
                a.class_room_name.as_str(),
                a.day_of_week.num_days_from_monday(),
                a.start_time,
            )
                .cmp(&(
                    b.class_room_name.as_str(),
                    b.day_of_week.num_days_from_monday(),
                    b.start_time,
                ))
        });
        Ok(reports)
    }

    /// Join every schedule of the semester with its catalog entities,
    /// memoizing lookups per entity.
    async fn resolve_rows(&self, semester_id: SemesterId) -> SchedulingResult<Vec<ReportRow>> {
        let schedules = self.repo.find_by_semester(semester_id).await?;
        let mut rows = Vec::with_capacity(schedules.len());

        let mut group_cache = HashMap::new();
        let mut discipline_cache = HashMap::new();
        let mut course_cache = HashMap::new();
        let mut teacher_cache = HashMap::new();
        let mut room_cache = HashMap::new();

        for schedule in schedules {
            let group = match group_cache.get(&schedule.group_id) {
                Some(group) => group,
                None => {
                    let group = self
                        .repo
                        .find_group(schedule.group_id)
                        .await?
                        .ok_or_else(|| SchedulingError::not_found("Group", schedule.group_id))?;
                    group_cache.entry(schedule.group_id).or_insert(group)
                }
            };
            let group = group.clone();

            let discipline = match discipline_cache.get(&group.discipline_id) {
                Some(discipline) => discipline,
                None => {
                    let discipline = self
                        .repo
                        .find_discipline(group.discipline_id)
                        .await?
                        .ok_or_else(|| {
                            SchedulingError::not_found("Discipline", group.discipline_id)
                        })?;
                    discipline_cache
                        .entry(group.discipline_id)
                        .or_insert(discipline)
                }
            };
            let discipline = discipline.clone();

            let course = match course_cache.get(&discipline.course_id) {
                Some(course) => course,
                None => {
                    let course = self
                        .repo
                        .find_course(discipline.course_id)
                        .await?
                        .ok_or_else(|| {
                            SchedulingError::not_found("Course", discipline.course_id)
                        })?;
                    course_cache.entry(discipline.course_id).or_insert(course)
                }
            };
            let course = course.clone();

            let teacher = match teacher_cache.get(&discipline.teacher_id) {
                Some(teacher) => teacher,
                None => {
                    let teacher = self
                        .repo
                        .find_teacher(discipline.teacher_id)
                        .await?
                        .ok_or_else(|| {
                            SchedulingError::not_found("Teacher", discipline.teacher_id)
                        })?;
                    teacher_cache.entry(discipline.teacher_id).or_insert(teacher)
                }
            };
            let teacher = teacher.clone();

            let room = match room_cache.get(&group.class_room_id) {
                Some(room) => room,
                None => {
                    let room = self
                        .repo
                        .find_class_room(group.class_room_id)
                        .await?
                        .ok_or_else(|| {
                            SchedulingError::not_found("ClassRoom", group.class_room_id)
                        })?;
                    room_cache.entry(group.class_room_id).or_insert(room)
                }
            };
            let room = room.clone();

            rows.push(ReportRow {
                schedule,
                group_name: group.name,
                discipline_id: discipline.id,
                discipline_name: discipline.name,
                course_id: course.id,
                course_name: course.name,
                teacher_id: teacher.id,
                teacher_name: teacher.full_name(),
                class_room_name: room.name,
            });
        }

        Ok(rows)
    }
}
