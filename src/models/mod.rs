//! Data models for golf-society entities.
//!
//! This module contains the records reconstructed from sheet rows on every
//! read:
//!
//! - `Society`: tenant record, with captain's-notes markup parsing
//! - `Player`: name + handicap, scoped to one society
//! - `Outing`: scheduled round, with next-outing selection
//! - `Course`: hole data (`ParIndx`) plus the builtin fallback catalog
//! - `Score`: a submitted Stableford round with its aggregates

pub mod course;
pub mod outing;
pub mod player;
pub mod score;
pub mod society;

pub use course::{BuiltinCourses, Course, CourseCatalog, CourseSource, HoleData, SheetCourses};
pub use outing::{next_outing, Outing};
pub use player::Player;
pub use score::Score;
pub use society::{NoteLine, NoteSpan, Society};
