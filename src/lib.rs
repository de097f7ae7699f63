//! Crew and equipment matching for scheduled jobs.
//!
//! Decides whether a person or an equipment unit is fit for a job,
//! whether recorded assignments clash, and how to rank candidates for an
//! initial or replacement assignment. Tables come from an injected
//! [`provider::DataProvider`]; everything else is pure computation over
//! the loaded rows.
//!
//! # Modules
//!
//! - **`normalize`**: Date parsing, list tokenizing, interval overlap, weather fitness
//! - **`models`**: `Person`, `Equipment`, `Job`, provider `Record`s, `Amount`
//! - **`scoring`**: Fitness scorers and stable ranking
//! - **`conflicts`**: Per-job conflict detection
//! - **`provider`**: Data-provider trait and an in-memory implementation
//! - **`engine`**: `OpsEngine`: recommendation, urgent reassignment, status writes, queries
//! - **`config`**: Scoring weights and engine settings
//!
//! # Architecture
//!
//! Single-threaded request-response. Each engine call reloads the tables
//! it needs; no state is cached between calls and no cross-request
//! atomicity is promised.

pub mod config;
pub mod conflicts;
pub mod engine;
pub mod error;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod scoring;

pub use error::{Result, RosterError};
