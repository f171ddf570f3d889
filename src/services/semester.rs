//! Semester lifecycle enforcement.

use std::sync::Arc;

use chrono::NaiveDate;
use log::info;

use crate::db::repository::FullRepository;
use crate::models::{semester, Semester, SemesterId, SemesterStatus};

use super::error::{ConflictKind, SchedulingError, SchedulingResult};

/// Guards scheduling mutations against finalized or expired semesters.
#[derive(Clone)]
pub struct SemesterService {
    repo: Arc<dyn FullRepository>,
}

impl SemesterService {
    pub fn new(repo: Arc<dyn FullRepository>) -> Self {
        Self { repo }
    }

    /// Load a semester and require it to be usable for scheduling today.
    pub async fn resolve_active(&self, id: SemesterId) -> SchedulingResult<Semester> {
        self.resolve_active_on(id, chrono::Local::now().date_naive())
            .await
    }

    /// Load a semester and require it to be usable for scheduling on `today`.
    ///
    /// A semester that is still marked ACTIVE but whose end date has passed
    /// is finalized here, and that transition is persisted before the call
    /// fails. The failed validation therefore carries a write side effect;
    /// callers must tolerate that.
    pub async fn resolve_active_on(
        &self,
        id: SemesterId,
        today: NaiveDate,
    ) -> SchedulingResult<Semester> {
        let mut semester = self
            .repo
            .find_semester(id)
            .await?
            .ok_or_else(|| SchedulingError::not_found("Semester", id))?;

        if !semester.is_active() {
            return Err(ConflictKind::SemesterFinalized.into());
        }

        if semester.has_ended(today) {
            semester.status = SemesterStatus::Finalized;
            self.repo.save_semester(&semester).await?;
            info!(
                "semester {} finalized lazily (ended {})",
                semester.id, semester.end_date
            );
            return Err(ConflictKind::SemesterFinalized.into());
        }

        Ok(semester)
    }

    /// The semester covering today's date, resolved by year and half-index.
    pub async fn current_semester(&self) -> SchedulingResult<Semester> {
        self.current_semester_on(chrono::Local::now().date_naive())
            .await
    }

    /// The semester covering the given date.
    pub async fn current_semester_on(&self, today: NaiveDate) -> SchedulingResult<Semester> {
        use chrono::Datelike;
        let year = today.year();
        let half = semester::half_for_month(today.month());
        self.repo
            .find_semester_by_year_and_half(year, half)
            .await?
            .ok_or_else(|| SchedulingError::not_found("Semester", format!("{year}/{half}")))
    }
}
