//! # afl_core - Deterministic Australian Rules Football Match Core
//!
//! Simulates one match between two selected squads as a phase state machine
//! driven by a fixed game clock, and returns the final score, per-quarter
//! summaries, statistics, per-player deltas and an ordered event log.
//!
//! ## Features
//! - Fully deterministic: one seeded RNG per match, same seed = same log
//! - Fatigue, injuries and interchanges evolve every tick
//! - Momentum, milestones and scoring patterns derived from the score log
//! - JSON API and a parallel round runner
//!
//! ```rust
//! use afl_core::engine::{simulate_match, EngineConfig, NullSink};
//! # fn run(setup: &afl_core::models::MatchSetup) -> afl_core::Result<()> {
//! let result = simulate_match(setup, &EngineConfig::default(), &mut NullSink)?;
//! println!("{}", result.summary());
//! # Ok(())
//! # }
//! ```

#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_match_json, MatchRequest, MatchResponse};
pub use engine::{simulate_match, simulate_round, CancelToken, EngineConfig, MatchEngine, MatchEventSink};
pub use error::{MatchError, Result, SinkError};
pub use models::{MatchResult, MatchSetup};

/// Crate version, reported in API responses.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
