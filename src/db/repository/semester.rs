//! Semester repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Semester, SemesterId};

/// Repository trait for semesters.
///
/// The write path exists because the lifecycle guard finalizes expired
/// semesters lazily while validating them; see the semester service.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SemesterRepository: Send + Sync {
    /// Fetch a semester by id.
    async fn find_semester(&self, id: SemesterId) -> RepositoryResult<Option<Semester>>;

    /// Fetch the semester for a calendar year and half-index (1 or 2).
    async fn find_semester_by_year_and_half(
        &self,
        year: i32,
        half: u8,
    ) -> RepositoryResult<Option<Semester>>;

    /// Persist semester state, keyed by its id.
    async fn save_semester(&self, semester: &Semester) -> RepositoryResult<Semester>;
}
