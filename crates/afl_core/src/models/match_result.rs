//! Match result: the only thing that leaves the core after full time.

use serde::{Deserialize, Serialize};

use super::events::MatchEvent;
use super::injury::InjuryOutcome;
use super::match_setup::{FixtureId, TeamSide};
use super::score::ScoreLine;
use crate::engine::phase::PhaseTimes;

/// Per-quarter breakdown. Score lines are cumulative at the quarter's end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterSummary {
    pub quarter: u8,
    pub home: ScoreLine,
    pub away: ScoreLine,
    /// Official clock run in this quarter
    pub elapsed_ms: u64,
    /// Time the last phase ran past the buzzer
    pub overrun_ms: u64,
    pub phase_times: PhaseTimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub clearances: u16,
    pub inside_50s: u16,
    pub shots: u16,
    pub goals: u16,
    pub behinds: u16,
    /// Shots that missed everything
    pub out_on_the_full: u16,
    pub turnovers: u16,
    pub rebounds: u16,
    pub stoppages: u16,
    pub injuries: u16,
    pub interchanges: u16,
}

impl TeamStatistics {
    /// Goals per shot, 0 when no shots were taken.
    pub fn accuracy(&self) -> f32 {
        if self.shots == 0 {
            0.0
        } else {
            self.goals as f32 / self.shots as f32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub home: TeamStatistics,
    pub away: TeamStatistics,
}

impl MatchStatistics {
    pub fn side(&self, side: TeamSide) -> &TeamStatistics {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: TeamSide) -> &mut TeamStatistics {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }
}

/// What one player's match means for the season layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchDelta {
    pub player_id: u32,
    pub side: TeamSide,
    pub time_on_ground_secs: u32,
    /// Sum of every fatigue decrease over the match
    pub fatigue_accrued: f32,
    pub final_fatigue_multiplier: f32,
    /// Worst injury sustained, if any
    pub injury: Option<InjuryOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub fixture: FixtureId,
    pub home_team_id: u32,
    pub home_team_name: String,
    pub away_team_id: u32,
    pub away_team_name: String,
    pub seed: u64,

    pub home: ScoreLine,
    pub away: ScoreLine,
    /// `None` on a draw
    pub winner: Option<TeamSide>,
    /// Home points minus away points
    pub margin: i32,

    pub quarters: Vec<QuarterSummary>,
    pub statistics: MatchStatistics,
    pub events: Vec<MatchEvent>,
    pub player_deltas: Vec<PlayerMatchDelta>,

    /// False when the match was cancelled before full time
    pub completed: bool,
    /// Events the sink failed to accept
    pub sink_failures: u32,
    pub ticks: u64,
}

impl MatchResult {
    pub fn score(&self, side: TeamSide) -> ScoreLine {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.completed && self.winner.is_none()
    }

    /// Compact one-line summary for logs and the CLI.
    pub fn summary(&self) -> String {
        format!(
            "{} {} v {} {}",
            self.home_team_name, self.home, self.away_team_name, self.away
        )
    }
}
