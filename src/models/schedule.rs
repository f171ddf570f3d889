//! Lesson placements and the resolved context they are validated against.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::ids::{ClassRoomId, CourseId, DisciplineId, GroupId, ScheduleId, SemesterId, TeacherId};
use super::time_slot::TimeSlot;

/// One concrete lesson placement for a group within a semester.
///
/// The id is `None` until the repository persists the schedule. The end time
/// is always derived from the course's lesson duration, never supplied by
/// callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Option<ScheduleId>,
    pub group_id: GroupId,
    pub semester_id: SemesterId,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Schedule {
    /// Lesson length in minutes. Negative if the times are inverted, which
    /// the duration conflict check rejects.
    pub fn duration_minutes(&self) -> i64 {
        self.end_time
            .signed_duration_since(self.start_time)
            .num_minutes()
    }

    /// Whether two placements occupy overlapping time on the same day.
    /// Intervals are half-open, so back-to-back lessons do not overlap.
    pub fn overlaps(&self, other: &Schedule) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_time < other.end_time
            && self.end_time > other.start_time
    }
}

/// The entity graph around one group, flattened into plain ids.
///
/// Resolved once per group from the catalog so the conflict checker and the
/// generation engine never chase references mid-validation.
#[derive(Debug, Clone)]
pub struct PlacementContext {
    pub group_id: GroupId,
    pub group_name: String,
    pub discipline_id: DisciplineId,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub class_room_id: ClassRoomId,
    /// Weekly lessons this group must receive.
    pub credits: u32,
    pub time_slot: TimeSlot,
}

impl PlacementContext {
    /// Build an unsaved placement for this group on the given day and start
    /// time, with the end time derived from the lesson duration.
    ///
    /// Returns `None` when the lesson would wrap past midnight.
    pub fn place(
        &self,
        semester_id: SemesterId,
        day_of_week: Weekday,
        start_time: NaiveTime,
    ) -> Option<Schedule> {
        let end_time = self.time_slot.lesson_end(start_time)?;
        Some(Schedule {
            id: None,
            group_id: self.group_id,
            semester_id,
            day_of_week,
            start_time,
            end_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn lesson(day: Weekday, start: NaiveTime, end: NaiveTime) -> Schedule {
        Schedule {
            id: None,
            group_id: GroupId(1),
            semester_id: SemesterId(1),
            day_of_week: day,
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn overlap_requires_same_day() {
        let a = lesson(Weekday::Mon, t(8, 0), t(9, 0));
        let b = lesson(Weekday::Tue, t(8, 0), t(9, 0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn back_to_back_lessons_do_not_overlap() {
        let a = lesson(Weekday::Mon, t(8, 0), t(9, 0));
        let b = lesson(Weekday::Mon, t(9, 0), t(10, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn partial_overlap_is_detected() {
        let a = lesson(Weekday::Mon, t(8, 0), t(9, 0));
        let b = lesson(Weekday::Mon, t(8, 30), t(9, 30));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn duration_minutes() {
        let a = lesson(Weekday::Mon, t(8, 0), t(8, 50));
        assert_eq!(a.duration_minutes(), 50);
    }
}
