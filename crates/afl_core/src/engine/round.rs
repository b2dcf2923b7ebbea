//! Round runner: independent fixtures of one round, in parallel.
//!
//! Each fixture builds its own context and RNG, so the parallel run returns
//! exactly what a sequential run would, in input order.

use rayon::prelude::*;
use tracing::info;

use super::config::EngineConfig;
use super::orchestrator::simulate_match;
use super::rng::derive_fixture_seed;
use super::sink::NullSink;
use crate::error::Result;
use crate::models::{MatchResult, MatchSetup};

/// Overwrite each fixture's seed with one derived from the round seed and
/// the fixture identity.
pub fn assign_round_seeds(setups: &mut [MatchSetup], round_seed: u64) {
    for setup in setups.iter_mut() {
        setup.seed = derive_fixture_seed(round_seed, setup.fixture.match_id, setup.home.id, setup.away.id);
    }
}

fn run_fixture(setup: &MatchSetup, config: &EngineConfig) -> Result<MatchResult> {
    simulate_match(setup, config, &mut NullSink)
}

/// Simulate every fixture on the rayon pool. Results keep input order; a bad
/// fixture fails on its own without stopping the others.
pub fn simulate_round(setups: &[MatchSetup], config: &EngineConfig) -> Vec<Result<MatchResult>> {
    info!(fixtures = setups.len(), "simulating round");
    setups.par_iter().map(|setup| run_fixture(setup, config)).collect()
}

pub fn simulate_round_sequential(setups: &[MatchSetup], config: &EngineConfig) -> Vec<Result<MatchResult>> {
    setups.iter().map(|setup| run_fixture(setup, config)).collect()
}
