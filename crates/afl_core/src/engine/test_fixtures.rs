//! Shared builders for engine tests.

use super::config::{EngineConfig, FatigueConfig};
use super::player_runtime::PlayerRuntime;
use crate::models::{
    Conditions, FixtureId, MatchSetup, PlayerAttributes, PlayerProfile, Position, TeamSheet,
};

/// Standard 18 on-field positions, back to front.
pub const STARTING_POSITIONS: [Position; 18] = [
    Position::FB,
    Position::BP,
    Position::BP,
    Position::CHB,
    Position::HBF,
    Position::HBF,
    Position::W,
    Position::W,
    Position::C,
    Position::R,
    Position::RR,
    Position::ROV,
    Position::HFF,
    Position::HFF,
    Position::CHF,
    Position::FP,
    Position::FP,
    Position::FF,
];

pub const BENCH_POSITIONS: [Position; 4] = [Position::UT, Position::C, Position::HBF, Position::HFF];

pub fn runtime_with(id: u32, position: Position, attributes: PlayerAttributes) -> PlayerRuntime {
    let profile = PlayerProfile::new(id, format!("Player {}", id), position, attributes);
    PlayerRuntime::new(&profile, attributes, &FatigueConfig::default())
}

/// Runtime roster in starting order, every attribute at `rating`.
pub fn runtime_roster(rating: u8) -> Vec<PlayerRuntime> {
    STARTING_POSITIONS
        .iter()
        .enumerate()
        .map(|(i, pos)| runtime_with(i as u32 + 1, *pos, PlayerAttributes::uniform(rating)))
        .collect()
}

/// Team sheet with 18 starters and a 4-player bench. Player ids are `team_id * 100 + n`.
pub fn team_sheet(team_id: u32, name: &str, rating: u8) -> TeamSheet {
    let player = |n: usize, pos: Position| {
        PlayerProfile::new(
            team_id * 100 + n as u32,
            format!("{} #{}", name, n),
            pos,
            PlayerAttributes::uniform(rating),
        )
    };
    TeamSheet {
        id: team_id,
        name: name.to_string(),
        on_field: STARTING_POSITIONS.iter().enumerate().map(|(i, p)| player(i + 1, *p)).collect(),
        bench: BENCH_POSITIONS.iter().enumerate().map(|(i, p)| player(i + 19, *p)).collect(),
        tactics: Default::default(),
    }
}

pub fn match_setup(seed: u64, home_rating: u8, away_rating: u8) -> MatchSetup {
    MatchSetup {
        fixture: FixtureId { match_id: 1, round: 1 },
        seed,
        home: team_sheet(1, "Home", home_rating),
        away: team_sheet(2, "Away", away_rating),
        conditions: Conditions::default(),
    }
}

pub fn equal_setup(seed: u64) -> MatchSetup {
    match_setup(seed, 60, 60)
}

/// Four 3-minute quarters: keeps full-match tests fast.
pub fn short_config() -> EngineConfig {
    let mut cfg = EngineConfig::default();
    cfg.match_rules.quarter_length_secs = 180;
    cfg
}
