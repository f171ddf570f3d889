//! Service layer: business logic over the repository traits.
//!
//! Services orchestrate repository calls and implement the scheduling
//! rules: conflict validation, semester lifecycle enforcement, manual
//! placement, bulk copy, heuristic generation, and reporting.

pub mod conflicts;
pub mod error;
pub mod generation;
pub mod reports;
pub mod schedule;
pub mod semester;

pub use conflicts::ConflictChecker;
pub use error::{ConflictKind, SchedulingError, SchedulingResult};
pub use generation::{GenerationEngine, GenerationOutcome, GenerationShortfall};
pub use reports::{
    ClassRoomOccupationReport, CourseDisciplineWorkloadReport, ReportService,
    TeacherWorkloadReport,
};
pub use schedule::{PlacementRequest, ScheduleService};
pub use semester::SemesterService;
