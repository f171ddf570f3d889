//! # class-scheduler
//!
//! Academic timetabling engine: conflict validation and heuristic weekly
//! schedule generation for courses, disciplines, groups, and classrooms.
//!
//! The crate places weekly lessons into each course's configured teaching
//! window without double-booking a teacher, a classroom, or a student
//! group. It validates single placements and generates full weekly
//! schedules with a three-tier greedy heuristic that prefers compact,
//! single-day timetables and degrades gracefully to random slot picking
//! when the structured strategies cannot fit.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain entities, ids, and the teaching window value object
//! - [`db`]: Repository traits and the in-memory implementation
//! - [`services`]: Conflict checking, semester lifecycle, placement, copy,
//!   generation, and reports
//! - [`config`]: Engine tuning from environment variables or TOML
//!
//! ## Consistency model
//!
//! Every mutation validates its candidate against the persisted schedules
//! and then writes, with no transaction spanning the two steps. Within one
//! call candidates are processed sequentially, so a call never conflicts
//! with itself; concurrent calls can race, and the storage layer's
//! uniqueness constraint is the only backstop. Bulk operations delete the
//! destination set before inserting, so a mid-run failure leaves a partial
//! result rather than rolling back.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::{NaiveDate, NaiveTime, Weekday};
//! use class_scheduler::db::{FullRepository, LocalRepository};
//! use class_scheduler::models::{SemesterStatus, TimeSlot};
//! use class_scheduler::services::GenerationEngine;
//! use rand::SeedableRng;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Arc::new(LocalRepository::new());
//!
//! let teacher = repo.insert_teacher("Ada", "Lovelace");
//! let room = repo.insert_class_room("Lab 1");
//! let course = repo.insert_course("Mathematics");
//! repo.insert_time_slot(TimeSlot::new(
//!     course,
//!     [Weekday::Mon, Weekday::Wed],
//!     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
//!     60,
//! )?);
//! let discipline = repo.insert_discipline(course, teacher, "Algebra", 2);
//! let group = repo.insert_group(discipline, room, "MAT-01");
//! let semester = repo.insert_semester(
//!     2099,
//!     1,
//!     NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2099, 6, 30).unwrap(),
//!     SemesterStatus::Active,
//! );
//!
//! let engine = GenerationEngine::new(repo.clone() as Arc<dyn FullRepository>);
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
//! let outcome = engine.generate(course, semester, &mut rng).await?;
//!
//! assert_eq!(outcome.schedules.len(), 2);
//! assert!(outcome.errors.is_empty());
//! # let _ = group;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod models;
pub mod services;
