//! Automatic weekly schedule generation.
//!
//! For every group of a course, the engine allocates the group's weekly
//! lesson count ("credits") into the course's teaching window using three
//! strategies in order:
//!
//! 1. **Single day**: all lessons on one day, earliest slots first.
//! 2. **Two-day split**: half the lessons on each of two days.
//! 3. **Greedy fallback**: one lesson at a time on the best available day,
//!    picking a random free slot, bounded by an attempt budget.
//!
//! Groups needing more lessons are placed first. A group the engine cannot
//! fully place is reported as a shortfall; generation continues with the
//! remaining groups rather than aborting.
//!
//! The random slot picks in the fallback make repeated runs produce
//! different (but equally valid) arrangements; pass a seeded generator for
//! reproducible output.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{NaiveTime, Weekday};
use log::{error, info};
use rand::Rng;
use serde::Serialize;

use crate::config::GenerationSettings;
use crate::db::repository::FullRepository;
use crate::models::{
    CourseId, GroupId, PlacementContext, Schedule, SemesterId, TimeSlot,
};

use super::conflicts::ConflictChecker;
use super::error::{SchedulingError, SchedulingResult};
use super::schedule::resolve_context;
use super::semester::SemesterService;

/// A group the engine could not fully schedule.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationShortfall {
    pub group_id: GroupId,
    pub group_name: String,
    pub message: String,
}

/// Result of one generation run: everything persisted plus the per-group
/// shortfalls.
#[derive(Debug, Default, Serialize)]
pub struct GenerationOutcome {
    pub schedules: Vec<Schedule>,
    pub errors: Vec<GenerationShortfall>,
}

/// Per-day pools of unconsumed lesson start times.
///
/// Every allowed day starts with the identical slot sequence; consuming a
/// slot removes it from that day only. Days iterate Monday-first so runs
/// are deterministic apart from the fallback's random picks.
struct DayPools {
    ordered_days: Vec<Weekday>,
    available: HashMap<Weekday, Vec<NaiveTime>>,
}

impl DayPools {
    fn new(time_slot: &TimeSlot) -> Self {
        let slots = time_slot.enumerate_slots();
        let ordered_days = time_slot.days_of_week().to_vec();
        let available = ordered_days
            .iter()
            .map(|&day| (day, slots.clone()))
            .collect();
        Self {
            ordered_days,
            available,
        }
    }

    fn days(&self) -> &[Weekday] {
        &self.ordered_days
    }

    fn slots(&self, day: Weekday) -> &[NaiveTime] {
        self.available.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    fn remaining(&self, day: Weekday) -> usize {
        self.slots(day).len()
    }

    fn consume(&mut self, day: Weekday, start: NaiveTime) {
        if let Some(slots) = self.available.get_mut(&day) {
            slots.retain(|&slot| slot != start);
        }
    }
}

/// The heuristic allocation engine.
pub struct GenerationEngine {
    repo: Arc<dyn FullRepository>,
    semesters: SemesterService,
    conflicts: ConflictChecker,
    settings: GenerationSettings,
}

impl GenerationEngine {
    /// Create an engine with default settings.
    pub fn new(repo: Arc<dyn FullRepository>) -> Self {
        Self::with_settings(repo, GenerationSettings::default())
    }

    pub fn with_settings(repo: Arc<dyn FullRepository>, settings: GenerationSettings) -> Self {
        Self {
            semesters: SemesterService::new(repo.clone()),
            conflicts: ConflictChecker::new(repo.clone()),
            repo,
            settings,
        }
    }

    /// Generate a full weekly schedule for every group of the course in the
    /// semester, replacing whatever was there.
    ///
    /// Existing schedules for the (semester, course) pair are deleted up
    /// front; a failure mid-run therefore leaves a partially generated set,
    /// not the previous one. Shortfalls are returned as data, never as an
    /// error.
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        course_id: CourseId,
        semester_id: SemesterId,
        rng: &mut R,
    ) -> SchedulingResult<GenerationOutcome> {
        let semester = self.semesters.resolve_active(semester_id).await?;
        let time_slot = self
            .repo
            .find_time_slot_by_course(course_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found("TimeSlot", course_id))?;

        let deleted = self
            .repo
            .delete_by_semester_and_course(semester_id, course_id)
            .await?;
        info!("deleted {deleted} schedules for semester {semester_id} and course {course_id}");

        let groups = self.repo.find_groups_by_course(course_id).await?;
        let mut contexts = Vec::with_capacity(groups.len());
        for group in &groups {
            contexts.push(resolve_context(self.repo.as_ref(), group.id).await?);
        }
        // Hardest first: groups needing more weekly lessons are placed while
        // the pools are still roomy. Stable, so equal credits keep catalog
        // order.
        contexts.sort_by_key(|ctx| Reverse(ctx.credits));

        let mut pools = DayPools::new(&time_slot);
        let mut outcome = GenerationOutcome::default();

        for ctx in &contexts {
            if self
                .try_single_day(ctx, semester.id, &mut pools, &mut outcome.schedules)
                .await?
            {
                continue;
            }

            if ctx.credits >= 2
                && self
                    .try_two_day_split(ctx, semester.id, &mut pools, &mut outcome.schedules)
                    .await?
            {
                continue;
            }

            self.fill_greedy(ctx, semester.id, &mut pools, &mut outcome, rng)
                .await?;
        }

        Ok(outcome)
    }

    /// Strategy 1: place all of the group's lessons on one day.
    ///
    /// Days are tried Monday-first; the first day with enough free slots
    /// whose earliest slots all validate wins. Validation happens for the
    /// whole batch before anything is persisted.
    async fn try_single_day(
        &self,
        ctx: &PlacementContext,
        semester_id: SemesterId,
        pools: &mut DayPools,
        generated: &mut Vec<Schedule>,
    ) -> SchedulingResult<bool> {
        let credits = ctx.credits as usize;

        for day in pools.days().to_vec() {
            if pools.remaining(day) < credits {
                continue;
            }
            let starts: Vec<NaiveTime> = pools.slots(day)[..credits].to_vec();
            match self.validate_batch(ctx, semester_id, day, &starts).await? {
                Some(batch) => {
                    self.commit_batch(batch, pools, generated).await?;
                    return Ok(true);
                }
                None => continue,
            }
        }

        Ok(false)
    }

    /// Strategy 2: split the group's lessons evenly across two days.
    ///
    /// Tries every ordered pair of days (Monday-first); each side gets
    /// `ceil(credits / 2)` lessons from its earliest free slots. The pair is
    /// committed only when the whole two-day batch validates and covers the
    /// required lesson count.
    async fn try_two_day_split(
        &self,
        ctx: &PlacementContext,
        semester_id: SemesterId,
        pools: &mut DayPools,
        generated: &mut Vec<Schedule>,
    ) -> SchedulingResult<bool> {
        let per_day = ctx.credits.div_ceil(2) as usize;
        let days = pools.days().to_vec();

        for (i, &first) in days.iter().enumerate() {
            for &second in &days[i + 1..] {
                if pools.remaining(first) < per_day || pools.remaining(second) < per_day {
                    continue;
                }

                let mut batch = Vec::with_capacity(per_day * 2);
                let mut valid = true;
                for day in [first, second] {
                    let starts: Vec<NaiveTime> = pools.slots(day)[..per_day].to_vec();
                    match self.validate_batch(ctx, semester_id, day, &starts).await? {
                        Some(day_batch) => batch.extend(day_batch),
                        None => {
                            valid = false;
                            break;
                        }
                    }
                }

                if valid && batch.len() >= ctx.credits as usize {
                    self.commit_batch(batch, pools, generated).await?;
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Strategy 3: place one lesson at a time on the best available day,
    /// picking a uniformly random free slot, until the group is covered or
    /// the attempt budget runs out.
    ///
    /// A failed validation does not consume the slot; the retry is simply
    /// counted against the budget. Under-allocation is recorded as a
    /// shortfall and the run moves on.
    async fn fill_greedy<R: Rng + ?Sized>(
        &self,
        ctx: &PlacementContext,
        semester_id: SemesterId,
        pools: &mut DayPools,
        outcome: &mut GenerationOutcome,
        rng: &mut R,
    ) -> SchedulingResult<()> {
        let credits = ctx.credits;
        let max_attempts = credits.saturating_mul(self.settings.attempts_per_credit);
        let mut scheduled = 0u32;
        let mut attempts = 0u32;

        while scheduled < credits && attempts < max_attempts {
            attempts += 1;

            let Some(day) = self.best_day_for_group(ctx.group_id, pools).await? else {
                // Every pool is empty; no placement can succeed anymore.
                break;
            };
            let slots = pools.slots(day);
            let start = slots[rng.random_range(0..slots.len())];

            let Some(candidate) = ctx.place(semester_id, day, start) else {
                break;
            };
            match self.conflicts.validate_all(&candidate, ctx).await {
                Ok(()) => {
                    let saved = self.repo.save_schedule(&candidate).await?;
                    pools.consume(day, start);
                    outcome.schedules.push(saved);
                    scheduled += 1;
                }
                Err(err) if err.is_conflict() => {
                    error!(
                        "error scheduling lesson for group {}: {err}",
                        ctx.group_name
                    );
                }
                Err(err) => return Err(err),
            }
        }

        if scheduled < credits {
            outcome.errors.push(GenerationShortfall {
                group_id: ctx.group_id,
                group_name: ctx.group_name.clone(),
                message: format!("Scheduled only {scheduled}/{credits} credits"),
            });
        }

        Ok(())
    }

    /// Prefer a day the group already teaches on (with free slots), then
    /// the first day in weekday order with any free slot.
    async fn best_day_for_group(
        &self,
        group_id: GroupId,
        pools: &DayPools,
    ) -> SchedulingResult<Option<Weekday>> {
        let existing = self.repo.find_by_group(group_id).await?;
        let used: HashSet<Weekday> = existing.iter().map(|s| s.day_of_week).collect();

        for &day in pools.days() {
            if used.contains(&day) && pools.remaining(day) > 0 {
                return Ok(Some(day));
            }
        }
        for &day in pools.days() {
            if pools.remaining(day) > 0 {
                return Ok(Some(day));
            }
        }
        Ok(None)
    }

    /// Validate a batch of same-day placements in memory, before any write.
    ///
    /// Returns the built candidates, or `None` when any of them hits a
    /// conflict. Infrastructure errors propagate.
    async fn validate_batch(
        &self,
        ctx: &PlacementContext,
        semester_id: SemesterId,
        day: Weekday,
        starts: &[NaiveTime],
    ) -> SchedulingResult<Option<Vec<Schedule>>> {
        let mut batch = Vec::with_capacity(starts.len());
        for &start in starts {
            let Some(candidate) = ctx.place(semester_id, day, start) else {
                return Ok(None);
            };
            match self.conflicts.validate_all(&candidate, ctx).await {
                Ok(()) => batch.push(candidate),
                Err(err) if err.is_conflict() => return Ok(None),
                Err(err) => return Err(err),
            }
        }
        Ok(Some(batch))
    }

    /// Persist a validated batch and consume its slots.
    async fn commit_batch(
        &self,
        batch: Vec<Schedule>,
        pools: &mut DayPools,
        generated: &mut Vec<Schedule>,
    ) -> SchedulingResult<()> {
        for candidate in batch {
            let saved = self.repo.save_schedule(&candidate).await?;
            pools.consume(saved.day_of_week, saved.start_time);
            generated.push(saved);
        }
        Ok(())
    }
}
