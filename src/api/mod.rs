//! Client for the remote script endpoint.
//!
//! Reads come from published-sheet CSV exports; writes go to the script
//! endpoint as form-encoded POSTs carrying a single JSON field. The
//! endpoint owns all persistence; this module only speaks its wire
//! contract and normalizes its failure modes.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
