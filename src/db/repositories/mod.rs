//! Repository implementations module.
//!
//! Currently a single implementation lives here:
//! - `local`: In-memory implementation for unit testing and local development
//!
//! Database-backed implementations plug in by implementing the traits in
//! `crate::db::repository`.

pub mod local;

pub use local::LocalRepository;
