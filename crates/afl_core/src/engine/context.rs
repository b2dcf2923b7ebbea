//! Match context: the root mutable aggregate of one match.
//!
//! Built once from a `MatchSetup`, validated before the first tick, mutated
//! by the orchestrator and consumed by `MatchEngine::run`. It owns the only
//! `MatchRng` of the match.

use fxhash::FxHashSet;

use super::config::EngineConfig;
use super::phase::Phase;
use super::player_runtime::PlayerRuntime;
use super::rng::MatchRng;
use super::scoring::ScoreBoard;
use crate::error::{MatchError, Result};
use crate::models::{Conditions, FixtureId, MatchSetup, PlayerProfile, Tactics, TeamSheet, TeamSide};

#[derive(Debug, Clone)]
pub struct TeamRuntime {
    pub side: TeamSide,
    pub id: u32,
    pub name: String,
    /// Fixed-size on-field roster; slots are swapped, never removed
    pub on_field: Vec<PlayerRuntime>,
    pub bench: Vec<PlayerRuntime>,
    pub tactics: Tactics,
    /// Interchanges made so far, forced ones included
    pub interchanges: u16,
}

impl TeamRuntime {
    fn from_sheet(side: TeamSide, sheet: &TeamSheet, config: &EngineConfig) -> Result<Self> {
        check_roster(side, sheet.on_field.len(), sheet.bench.len(), config)?;

        let mut seen = FxHashSet::default();
        for player in sheet.players() {
            if !seen.insert(player.id) {
                return Err(MatchError::DuplicatePlayer { side, player_id: player.id });
            }
        }

        let build = |profile: &PlayerProfile| -> Result<PlayerRuntime> {
            let attributes = profile
                .resolved_attributes()
                .ok_or(MatchError::MissingAttributes { side, player_id: profile.id })?;
            Ok(PlayerRuntime::new(profile, attributes, &config.fatigue))
        };

        Ok(Self {
            side,
            id: sheet.id,
            name: sheet.name.clone(),
            on_field: sheet.on_field.iter().map(build).collect::<Result<_>>()?,
            bench: sheet.bench.iter().map(build).collect::<Result<_>>()?,
            tactics: sheet.tactics,
            interchanges: 0,
        })
    }

    /// On-field players who can still contest.
    pub fn active_count(&self) -> usize {
        self.on_field.iter().filter(|p| p.is_available()).count()
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerRuntime> {
        self.on_field.iter().chain(self.bench.iter())
    }
}

fn check_roster(side: TeamSide, on_field: usize, bench: usize, config: &EngineConfig) -> Result<()> {
    let expected = config.match_rules.on_field_count;
    if on_field != expected {
        return Err(MatchError::InvalidRosterSize { side, expected, found: on_field });
    }
    if bench > config.match_rules.max_bench {
        return Err(MatchError::BenchTooLarge { side, max: config.match_rules.max_bench, found: bench });
    }
    Ok(())
}

#[derive(Debug)]
pub struct MatchContext {
    pub(crate) fixture: FixtureId,
    pub(crate) teams: [TeamRuntime; 2],
    pub(crate) conditions: Conditions,
    pub(crate) scoreboard: ScoreBoard,
    pub(crate) rng: MatchRng,

    pub(crate) phase: Phase,
    pub(crate) possession: TeamSide,
    /// Set when the current shot comes from outside 50
    pub(crate) long_range_shot: bool,
    /// 1-based
    pub(crate) quarter: u8,
    pub(crate) quarter_elapsed_ms: u64,
    pub(crate) phase_elapsed_ms: u64,
    pub(crate) phase_duration_ms: u64,
}

impl MatchContext {
    pub fn new(setup: &MatchSetup, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let home = TeamRuntime::from_sheet(TeamSide::Home, &setup.home, config)?;
        let away = TeamRuntime::from_sheet(TeamSide::Away, &setup.away, config)?;
        Ok(Self {
            fixture: setup.fixture,
            teams: [home, away],
            conditions: setup.conditions,
            scoreboard: ScoreBoard::new(config.momentum.clone()),
            rng: MatchRng::new(setup.seed),
            phase: Phase::CenterBounce,
            possession: TeamSide::Home,
            long_range_shot: false,
            quarter: 1,
            quarter_elapsed_ms: 0,
            phase_elapsed_ms: 0,
            phase_duration_ms: 0,
        })
    }

    /// Check a built context against the rules it is about to be played under.
    pub(crate) fn check_rules(&self, config: &EngineConfig) -> Result<()> {
        for side in TeamSide::BOTH {
            let team = self.team(side);
            check_roster(side, team.on_field.len(), team.bench.len(), config)?;
        }
        Ok(())
    }

    pub fn fixture(&self) -> FixtureId {
        self.fixture
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn team(&self, side: TeamSide) -> &TeamRuntime {
        &self.teams[side.index()]
    }

    pub(crate) fn team_mut(&mut self, side: TeamSide) -> &mut TeamRuntime {
        &mut self.teams[side.index()]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn possession(&self) -> TeamSide {
        self.possession
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.scoreboard
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Official clock: stops at each buzzer, ignores overrun.
    pub fn game_time_ms(&self, quarter_length_ms: u64) -> u64 {
        (self.quarter.saturating_sub(1) as u64) * quarter_length_ms + self.quarter_elapsed_ms.min(quarter_length_ms)
    }
}
