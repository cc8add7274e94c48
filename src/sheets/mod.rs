//! Sheet read model: row mapping and the read router.
//!
//! The mapping layer turns parsed CSV rows into typed records using a
//! header-index resolver built once per sheet; the reader composes mapped
//! sheets into the enumerated read actions behind a uniform response
//! envelope.

pub mod mapper;
pub mod reader;

pub use mapper::{CoercionWarning, HeaderIndex, Mapped, ScoreQuery, DEFAULT_SCORE_LIMIT};
pub use reader::{ReadAction, ReadRequest, ReadResponse, SheetsReader};
