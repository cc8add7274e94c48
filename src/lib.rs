//! teebook-core - core library for the teebook golf-society app.
//!
//! A golf society's data lives in a published spreadsheet; this crate turns
//! that spreadsheet into a typed read model and computes Stableford scores:
//!
//! - `csv`: tolerant parser for published-sheet CSV exports
//! - `models`: Society, Player, Outing, Course, Score records
//! - `sheets`: header-indexed row mapping and the read router
//! - `scoring`: Stableford points engine and score-record builder
//! - `api`: the remote write endpoint client (score submission, admin ops)
//! - `cache`: short-lived per-society cache with read-through
//!
//! Rendering, page wiring, and the write endpoint's storage are external
//! collaborators; nothing here touches the DOM or owns persistence.

pub mod api;
pub mod cache;
pub mod config;
pub mod csv;
pub mod models;
pub mod scoring;
pub mod sheets;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use cache::SocietyCache;
pub use config::{Config, SheetTab};
pub use models::{Course, CourseCatalog, HoleData, Outing, Player, Score, Society};
pub use scoring::{build_score_record, compute_stableford, StablefordCard, ValidationError};
pub use sheets::{ReadAction, ReadRequest, ReadResponse, SheetsReader};
