//! Academic semester model and calendar helpers.
//!
//! A semester covers one half of a calendar year: half 1 runs January
//! through June, half 2 runs July through December. Semesters start ACTIVE
//! and become FINALIZED once their end date has passed; the transition is
//! applied lazily when a scheduling operation reads the semester, not by a
//! background job.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::SemesterId;

/// Lifecycle status of a semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemesterStatus {
    Active,
    Finalized,
}

/// One academic half-year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Assigned by the repository on insert.
    pub id: SemesterId,
    pub name: String,
    pub year: i32,
    /// Half-year index, 1 or 2.
    pub half: u8,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: SemesterStatus,
}

impl Semester {
    /// Build the semester covering `today`, named `SEMESTRE-{year}/{half}`.
    ///
    /// The id is a placeholder until the repository assigns one.
    pub fn current(today: NaiveDate) -> Self {
        let year = today.year();
        let half = half_for_month(today.month());
        Self {
            id: SemesterId(0),
            name: format!("SEMESTRE-{year}/{half}"),
            year,
            half,
            start_date: half_start(year, half),
            end_date: half_end(year, half),
            status: SemesterStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SemesterStatus::Active
    }

    /// Whether the semester's end date lies strictly before `today`.
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }
}

/// Half-year index for a calendar month: January-June is 1, July-December is 2.
pub fn half_for_month(month: u32) -> u8 {
    if month <= 6 {
        1
    } else {
        2
    }
}

/// First day of the given half-year.
pub fn half_start(year: i32, half: u8) -> NaiveDate {
    let month = if half == 1 { 1 } else { 7 };
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid first-of-month date")
}

/// Last scheduling day of the given half-year.
pub fn half_end(year: i32, half: u8) -> NaiveDate {
    let month = if half == 1 { 6 } else { 12 };
    NaiveDate::from_ymd_opt(year, month, 30).expect("valid end-of-half date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_for_month_splits_the_year() {
        assert_eq!(half_for_month(1), 1);
        assert_eq!(half_for_month(6), 1);
        assert_eq!(half_for_month(7), 2);
        assert_eq!(half_for_month(12), 2);
    }

    #[test]
    fn half_bounds() {
        assert_eq!(
            half_start(2026, 1),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert_eq!(
            half_end(2026, 1),
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
        );
        assert_eq!(
            half_start(2026, 2),
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
        );
        assert_eq!(
            half_end(2026, 2),
            NaiveDate::from_ymd_opt(2026, 12, 30).unwrap()
        );
    }

    #[test]
    fn current_semester_matches_today() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let semester = Semester::current(today);
        assert_eq!(semester.year, 2026);
        assert_eq!(semester.half, 2);
        assert_eq!(semester.name, "SEMESTRE-2026/2");
        assert_eq!(semester.status, SemesterStatus::Active);
        assert!(semester.start_date <= today && today <= semester.end_date);
    }

    #[test]
    fn has_ended_is_strict() {
        let mut semester = Semester::current(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        semester.end_date = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        assert!(!semester.has_ended(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()));
        assert!(semester.has_ended(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
    }
}
