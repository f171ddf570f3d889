//! Course teaching window configuration.
//!
//! A `TimeSlot` describes when a course is allowed to teach: the weekdays it
//! may use, the daily opening and closing times, and how long a single lesson
//! lasts. The slot enumeration it produces is the universe of candidate start
//! times the generation engine samples from.

use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::ids::CourseId;

/// Errors raised when constructing an inconsistent teaching window.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeSlotError {
    #[error("at least one day of the week is required")]
    NoDays,
    #[error("lesson duration must be greater than zero")]
    ZeroDuration,
    #[error("start time must be before end time")]
    InvertedWindow,
    #[error("window is too short to host a single lesson")]
    WindowTooShort,
}

/// Immutable teaching window for one course.
///
/// Invariants are enforced at construction:
/// - at least one allowed weekday
/// - `lesson_duration_minutes > 0`
/// - `start_time < end_time`
/// - the window hosts at least one full lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    course_id: CourseId,
    days_of_week: Vec<Weekday>,
    start_time: NaiveTime,
    end_time: NaiveTime,
    lesson_duration_minutes: u32,
}

impl TimeSlot {
    /// Build a teaching window, validating its invariants.
    ///
    /// Duplicate weekdays are collapsed and the remaining days are kept in
    /// weekday order (Monday first) so all iteration over days is
    /// deterministic.
    pub fn new(
        course_id: CourseId,
        days_of_week: impl IntoIterator<Item = Weekday>,
        start_time: NaiveTime,
        end_time: NaiveTime,
        lesson_duration_minutes: u32,
    ) -> Result<Self, TimeSlotError> {
        let mut days: Vec<Weekday> = days_of_week.into_iter().collect();
        days.sort_by_key(|d| d.num_days_from_monday());
        days.dedup();

        if days.is_empty() {
            return Err(TimeSlotError::NoDays);
        }
        if lesson_duration_minutes == 0 {
            return Err(TimeSlotError::ZeroDuration);
        }
        if start_time >= end_time {
            return Err(TimeSlotError::InvertedWindow);
        }
        let window = end_time.signed_duration_since(start_time);
        if window < Duration::minutes(i64::from(lesson_duration_minutes)) {
            return Err(TimeSlotError::WindowTooShort);
        }

        Ok(Self {
            course_id,
            days_of_week: days,
            start_time,
            end_time,
            lesson_duration_minutes,
        })
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// Allowed weekdays, sorted Monday first.
    pub fn days_of_week(&self) -> &[Weekday] {
        &self.days_of_week
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn lesson_duration_minutes(&self) -> u32 {
        self.lesson_duration_minutes
    }

    /// Whether the given weekday is part of the teaching window.
    pub fn allows_day(&self, day: Weekday) -> bool {
        self.days_of_week.contains(&day)
    }

    /// End time of a lesson starting at `start`.
    ///
    /// Returns `None` if adding the lesson duration would wrap past midnight;
    /// such a lesson can never fit inside a same-day window.
    pub fn lesson_end(&self, start: NaiveTime) -> Option<NaiveTime> {
        let duration = Duration::minutes(i64::from(self.lesson_duration_minutes));
        let (end, wrapped) = start.overflowing_add_signed(duration);
        if wrapped != 0 {
            return None;
        }
        Some(end)
    }

    /// Enumerate the valid lesson start times inside the window.
    ///
    /// Starting at the opening time, step by the lesson duration and stop as
    /// soon as a lesson would end past the closing time. The sequence is
    /// finite, ordered, and identical for every allowed day.
    pub fn enumerate_slots(&self) -> Vec<NaiveTime> {
        let duration = Duration::minutes(i64::from(self.lesson_duration_minutes));
        let mut slots = Vec::new();
        let mut current = self.start_time;

        loop {
            let (end, wrapped) = current.overflowing_add_signed(duration);
            if wrapped != 0 || end > self.end_time {
                break;
            }
            slots.push(current);
            current = end;
        }

        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn window(start: NaiveTime, end: NaiveTime, duration: u32) -> TimeSlot {
        TimeSlot::new(CourseId(1), [Weekday::Mon], start, end, duration).unwrap()
    }

    #[test]
    fn enumerates_fifty_minute_lessons() {
        let slot = window(t(8, 0), t(12, 0), 50);
        assert_eq!(
            slot.enumerate_slots(),
            vec![t(8, 0), t(8, 50), t(9, 40), t(10, 30)]
        );
    }

    #[test]
    fn enumerates_exact_fit() {
        let slot = window(t(8, 0), t(10, 0), 60);
        assert_eq!(slot.enumerate_slots(), vec![t(8, 0), t(9, 0)]);
    }

    #[test]
    fn single_lesson_window() {
        let slot = window(t(8, 0), t(8, 45), 45);
        assert_eq!(slot.enumerate_slots(), vec![t(8, 0)]);
    }

    #[test]
    fn days_are_sorted_and_deduplicated() {
        let slot = TimeSlot::new(
            CourseId(1),
            [Weekday::Fri, Weekday::Mon, Weekday::Fri, Weekday::Wed],
            t(8, 0),
            t(12, 0),
            60,
        )
        .unwrap();
        assert_eq!(
            slot.days_of_week(),
            &[Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
    }

    #[test]
    fn rejects_empty_days() {
        let err = TimeSlot::new(CourseId(1), [], t(8, 0), t(12, 0), 60).unwrap_err();
        assert_eq!(err, TimeSlotError::NoDays);
    }

    #[test]
    fn rejects_zero_duration() {
        let err = TimeSlot::new(CourseId(1), [Weekday::Mon], t(8, 0), t(12, 0), 0).unwrap_err();
        assert_eq!(err, TimeSlotError::ZeroDuration);
    }

    #[test]
    fn rejects_inverted_window() {
        let err = TimeSlot::new(CourseId(1), [Weekday::Mon], t(12, 0), t(8, 0), 60).unwrap_err();
        assert_eq!(err, TimeSlotError::InvertedWindow);
    }

    #[test]
    fn rejects_window_shorter_than_lesson() {
        let err = TimeSlot::new(CourseId(1), [Weekday::Mon], t(8, 0), t(8, 30), 60).unwrap_err();
        assert_eq!(err, TimeSlotError::WindowTooShort);
    }

    #[test]
    fn lesson_end_detects_midnight_wrap() {
        let slot = window(t(8, 0), t(12, 0), 60);
        assert_eq!(slot.lesson_end(t(9, 0)), Some(t(10, 0)));
        assert_eq!(slot.lesson_end(t(23, 30)), None);
    }
}
