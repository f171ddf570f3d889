//! Newtype identifiers for all domain entities.
//!
//! Keeping ids distinct at the type level prevents mixing up the many
//! integer keys that flow through the repository queries.

use super::macros::define_ids;

define_ids!(
    SemesterId,
    CourseId,
    DisciplineId,
    GroupId,
    ClassRoomId,
    ScheduleId,
);

/// Teacher accounts come from the user directory and carry UUID identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TeacherId(pub uuid::Uuid);

impl TeacherId {
    pub fn new(value: uuid::Uuid) -> Self {
        TeacherId(value)
    }

    /// Generate a fresh random teacher id.
    pub fn random() -> Self {
        TeacherId(uuid::Uuid::new_v4())
    }

    pub fn value(&self) -> uuid::Uuid {
        self.0
    }
}

impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_id_display_and_accessors() {
        let id = ScheduleId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.value(), 42);
        assert_eq!(id, ScheduleId(42));
    }

    #[test]
    fn ids_order_by_inner_value() {
        let mut ids = vec![GroupId(3), GroupId(1), GroupId(2)];
        ids.sort();
        assert_eq!(ids, vec![GroupId(1), GroupId(2), GroupId(3)]);
    }

    #[test]
    fn teacher_ids_are_unique() {
        assert_ne!(TeacherId::random(), TeacherId::random());
    }
}
