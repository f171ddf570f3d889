//! Repository trait definitions for storage operations.
//!
//! This module provides a collection of focused repository traits that
//! abstract storage. By splitting responsibilities across multiple traits,
//! implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`catalog`]: Read-side lookups for courses, groups, and related entities
//! - [`schedule`]: Lesson placement CRUD and conflict existence queries
//! - [`semester`]: Semester lookup and the lazy-finalize write path
//!
//! # Convenience Trait Bound
//!
//! For services that need all repository capabilities, use the
//! [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service(repo: &dyn FullRepository) -> RepositoryResult<()> {
//!     let groups = repo.find_groups_by_course(course_id).await?;
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod schedule;
pub mod semester;

pub use catalog::CatalogRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use schedule::{ScheduleRepository, SlotQuery};
pub use semester::SemesterRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements the three
/// repository traits.
pub trait FullRepository: CatalogRepository + ScheduleRepository + SemesterRepository {}

impl<T> FullRepository for T where T: CatalogRepository + ScheduleRepository + SemesterRepository {}
