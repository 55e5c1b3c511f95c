//! LineupForge I/O
//!
//! Reads the delimited entrant file into a validated [`EntrantPool`] and
//! writes the selected lineups back out as delimited records.
//!
//! - [`EntrantLoader`] - header-driven, typed record loading
//! - [`apply_pool_filters`] - post-load minimum thresholds
//! - [`LineupRecord`] / [`LineupWriter`] - output rows and their writer
//!
//! [`EntrantPool`]: lineupforge_core::EntrantPool

mod error;
mod filter;
mod loader;
mod materializer;
mod record;

pub use error::LoadError;
pub use filter::apply_pool_filters;
pub use loader::{EntrantLoader, LoadedPool, SkipReason, SkippedRow};
pub use materializer::{lineup_header, LineupRecord, LineupWriter};
pub use record::{parse_records, write_record, Record};
