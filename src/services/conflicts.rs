//! Conflict validation for candidate lesson placements.
//!
//! Four independent questions are asked of every candidate: does it fit the
//! course's teaching window, is the teacher free, is the classroom free, and
//! does the group already hold an identical lesson. The relational checks run
//! against whatever the repository has persisted at that moment; there is no
//! locking between the check and the later write, so concurrent callers can
//! race (the storage layer's uniqueness constraint is the fallback).

use std::sync::Arc;

use crate::db::repository::{FullRepository, SlotQuery};
use crate::models::{PlacementContext, Schedule};

use super::error::{ConflictKind, SchedulingResult};

/// Stateless validator over a repository of persisted schedules.
#[derive(Clone)]
pub struct ConflictChecker {
    repo: Arc<dyn FullRepository>,
}

impl ConflictChecker {
    pub fn new(repo: Arc<dyn FullRepository>) -> Self {
        Self { repo }
    }

    /// Check the candidate against the course teaching window.
    ///
    /// Pure interval arithmetic, no repository access. Returns the violated
    /// rule, or `None` when the placement fits the window.
    pub fn violates_time_window(
        &self,
        candidate: &Schedule,
        ctx: &PlacementContext,
    ) -> Option<ConflictKind> {
        let window = &ctx.time_slot;
        if !window.allows_day(candidate.day_of_week) {
            return Some(ConflictKind::DayNotAllowed);
        }
        if candidate.start_time < window.start_time() {
            return Some(ConflictKind::StartsBeforeWindow);
        }
        if candidate.end_time > window.end_time() {
            return Some(ConflictKind::EndsAfterWindow);
        }
        if candidate.duration_minutes() != i64::from(window.lesson_duration_minutes()) {
            return Some(ConflictKind::DurationMismatch);
        }
        None
    }

    /// Whether the discipline's teacher already has an overlapping lesson in
    /// the candidate's semester.
    pub async fn teacher_conflict(
        &self,
        candidate: &Schedule,
        ctx: &PlacementContext,
    ) -> SchedulingResult<bool> {
        let query = SlotQuery::for_candidate(candidate);
        Ok(self.repo.teacher_has_overlap(ctx.teacher_id, query).await?)
    }

    /// Whether the group's classroom is already occupied by an overlapping
    /// lesson in the candidate's semester.
    pub async fn class_room_conflict(
        &self,
        candidate: &Schedule,
        ctx: &PlacementContext,
    ) -> SchedulingResult<bool> {
        let query = SlotQuery::for_candidate(candidate);
        Ok(self
            .repo
            .class_room_has_overlap(ctx.class_room_id, query)
            .await?)
    }

    /// Whether the group already holds a lesson with the identical day,
    /// start, and end. Exact match only: back-to-back or overlapping
    /// non-identical lessons for the same group are allowed.
    pub async fn group_conflict(
        &self,
        candidate: &Schedule,
        ctx: &PlacementContext,
    ) -> SchedulingResult<bool> {
        let query = SlotQuery::for_candidate(candidate);
        Ok(self.repo.group_has_duplicate(ctx.group_id, query).await?)
    }

    /// Run all conflict checks in order, failing fast on the first violated
    /// rule: window, then teacher, then classroom, then group.
    pub async fn validate_all(
        &self,
        candidate: &Schedule,
        ctx: &PlacementContext,
    ) -> SchedulingResult<()> {
        if let Some(kind) = self.violates_time_window(candidate, ctx) {
            return Err(kind.into());
        }
        if self.teacher_conflict(candidate, ctx).await? {
            return Err(ConflictKind::TeacherBusy.into());
        }
        if self.class_room_conflict(candidate, ctx).await? {
            return Err(ConflictKind::ClassRoomOccupied.into());
        }
        if self.group_conflict(candidate, ctx).await? {
            return Err(ConflictKind::GroupDuplicate.into());
        }
        Ok(())
    }
}
