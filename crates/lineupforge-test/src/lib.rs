//! Shared test fixtures for LineupForge crates.
//!
//! - [`pool`] - small hand-built pools with known answers
//! - [`random`] - seeded random pools for property-style tests
//! - [`csv`] - entrant and lineup files as text
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! lineupforge-test = { workspace = true }
//! ```

pub mod csv;
pub mod pool;
pub mod random;

pub use pool::{exposure_pool, pool_from_salaries, salary_ladder_pool};
pub use random::{random_pool, RandomPoolSpec};
