//! Match events
//!
//! Every observable state change of a match becomes one `MatchEvent`. The
//! event log in `MatchResult` and the stream sent to the sink carry the same
//! values in the same order.

use serde::{Deserialize, Serialize};

use super::injury::{InjurySeverity, InjuryType};
use super::match_setup::TeamSide;
use super::score::{ScoreEvent, ScoreLine};
use crate::engine::phase::Phase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Position in the match event log, starting at 0
    pub seq: u32,
    /// Official game clock since the first bounce
    pub game_time_ms: u64,
    pub quarter: u8,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    QuarterStart,
    QuarterEnd {
        home: ScoreLine,
        away: ScoreLine,
    },
    PhaseTransition {
        from: Phase,
        to: Phase,
        /// Sampled length of the phase being entered
        duration_ms: u64,
        possession: TeamSide,
    },
    Score {
        score: ScoreEvent,
    },
    Injury {
        side: TeamSide,
        player_id: u32,
        severity: InjurySeverity,
        injury_type: InjuryType,
        injured_out: bool,
        return_in_seconds: u32,
        weeks_out: u8,
    },
    Interchange {
        side: TeamSide,
        player_off: u32,
        player_on: u32,
        reason: InterchangeReason,
    },
    MomentumShift {
        team: TeamSide,
        strength: f32,
    },
    Milestone {
        milestone: Milestone,
    },
    Pattern {
        pattern: ScoringPattern,
    },
    FullTime {
        home: ScoreLine,
        away: ScoreLine,
        winner: Option<TeamSide>,
    },
    Cancelled,
}

impl EventKind {
    pub fn is_score(&self) -> bool {
        matches!(self, EventKind::Score { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterchangeReason {
    /// Player is out of the match
    Injury,
    /// Minor injury, player goes off for treatment
    Treatment,
    /// Rotation at a center bounce
    Fatigue,
    /// Rotation during a quarter break
    QuarterBreak,
}

/// Score-log milestone. Derived purely from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Milestone {
    FirstScore { side: TeamSide },
    FirstGoal { side: TeamSide },
    LeadChange { leader: TeamSide, margin: i32 },
    ScoresLevel { points: u16 },
    ScoreThreshold { side: TeamSide, threshold: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringPattern {
    /// Unanswered goals by one side inside the burst window
    ScoringBurst { side: TeamSide, event_count: u32, start_ms: u64, end_ms: u64 },
    /// Side that trailed by at least the configured deficit has taken the lead
    Comeback { side: TeamSide, deficit: i32 },
}
