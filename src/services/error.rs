//! Domain error types for scheduling operations.

use crate::db::repository::RepositoryError;

/// Result type for scheduling operations
pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// The specific rule a rejected placement violated.
///
/// Ordered roughly by how the validator runs: window rules first, then the
/// relational conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, serde::Serialize)]
pub enum ConflictKind {
    #[error("Day of the week not allowed for this course")]
    DayNotAllowed,

    #[error("Start time outside of the course time window")]
    StartsBeforeWindow,

    #[error("End time outside of the course time window")]
    EndsAfterWindow,

    #[error("Lesson duration does not match the course time window")]
    DurationMismatch,

    #[error("Teacher already has a lesson scheduled for this time")]
    TeacherBusy,

    #[error("Class room already occupied at this time")]
    ClassRoomOccupied,

    #[error("Group already has a schedule at this time")]
    GroupDuplicate,

    #[error("Cannot create schedule for a finalized semester")]
    SemesterFinalized,

    #[error("Schedule rejected by a storage uniqueness constraint")]
    StorageConstraint,
}

/// Errors surfaced by the scheduling services.
///
/// `Invalid` is always recoverable by the caller (retry with different
/// input); `NotFound` rejects the whole operation; `Repository` wraps
/// storage failures that are neither, e.g. connection loss.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid schedule: {0}")]
    Invalid(#[from] ConflictKind),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl SchedulingError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this error is a domain conflict rather than an
    /// infrastructure failure.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl From<RepositoryError> for SchedulingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // Duplicate-key races lost at the storage layer surface as the
            // same conflict category a validator rejection would.
            RepositoryError::ConstraintViolation(_) => {
                Self::Invalid(ConflictKind::StorageConstraint)
            }
            other => Self::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violations_become_conflicts() {
        let err: SchedulingError =
            RepositoryError::ConstraintViolation("dup".to_string()).into();
        assert!(err.is_conflict());
        assert!(matches!(
            err,
            SchedulingError::Invalid(ConflictKind::StorageConstraint)
        ));
    }

    #[test]
    fn other_repository_errors_pass_through() {
        let err: SchedulingError = RepositoryError::ConnectionError("down".to_string()).into();
        assert!(!err.is_conflict());
        assert!(matches!(err, SchedulingError::Repository(_)));
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = SchedulingError::not_found("Group", 9);
        assert_eq!(err.to_string(), "Group not found with id: 9");
    }
}
