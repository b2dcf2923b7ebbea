//! Match phase state machine types
//!
//! ```text
//! CenterBounce ──► OpenPlay ──► Inside50 ──► ShotOnGoal ──► CenterBounce (goal)
//!      │             │  ▲           │             │
//!      └──► Inside50 │  └─rebound───┘             └──► OpenPlay (behind / no score, kick-in)
//!                    ├──► ShotOnGoal (long range)
//!                    ├──► OpenPlay (turnover)
//!                    └──► CenterBounce (stoppage)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    CenterBounce,
    OpenPlay,
    Inside50,
    ShotOnGoal,
}

/// Unit category contested in a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseCategory {
    Clearance,
    ForwardEntry,
    DefensiveRebound,
}

impl PhaseCategory {
    pub const ALL: [PhaseCategory; 3] =
        [PhaseCategory::Clearance, PhaseCategory::ForwardEntry, PhaseCategory::DefensiveRebound];

    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            PhaseCategory::Clearance => 0,
            PhaseCategory::ForwardEntry => 1,
            PhaseCategory::DefensiveRebound => 2,
        }
    }
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::CenterBounce, Phase::OpenPlay, Phase::Inside50, Phase::ShotOnGoal];

    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            Phase::CenterBounce => 0,
            Phase::OpenPlay => 1,
            Phase::Inside50 => 2,
            Phase::ShotOnGoal => 3,
        }
    }

    /// Unit categories (attacking side, defending side) contested in this phase.
    pub fn contest(&self) -> (PhaseCategory, PhaseCategory) {
        match self {
            Phase::CenterBounce => (PhaseCategory::Clearance, PhaseCategory::Clearance),
            Phase::OpenPlay => (PhaseCategory::Clearance, PhaseCategory::DefensiveRebound),
            Phase::Inside50 | Phase::ShotOnGoal => {
                (PhaseCategory::ForwardEntry, PhaseCategory::DefensiveRebound)
            }
        }
    }

    /// Legal edges of the state machine. Quarter resets are handled separately.
    pub fn can_transition_to(&self, next: Phase) -> bool {
        match self {
            Phase::CenterBounce => matches!(next, Phase::OpenPlay | Phase::Inside50),
            Phase::OpenPlay => matches!(
                next,
                Phase::OpenPlay | Phase::Inside50 | Phase::ShotOnGoal | Phase::CenterBounce
            ),
            Phase::Inside50 => matches!(next, Phase::ShotOnGoal | Phase::OpenPlay),
            Phase::ShotOnGoal => matches!(next, Phase::CenterBounce | Phase::OpenPlay),
        }
    }
}

/// Per-phase accumulator indexed by `Phase::index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhaseTimes {
    pub center_bounce_ms: u64,
    pub open_play_ms: u64,
    pub inside_50_ms: u64,
    pub shot_on_goal_ms: u64,
}

impl PhaseTimes {
    pub fn add(&mut self, phase: Phase, ms: u64) {
        match phase {
            Phase::CenterBounce => self.center_bounce_ms += ms,
            Phase::OpenPlay => self.open_play_ms += ms,
            Phase::Inside50 => self.inside_50_ms += ms,
            Phase::ShotOnGoal => self.shot_on_goal_ms += ms,
        }
    }

    pub fn get(&self, phase: Phase) -> u64 {
        match phase {
            Phase::CenterBounce => self.center_bounce_ms,
            Phase::OpenPlay => self.open_play_ms,
            Phase::Inside50 => self.inside_50_ms,
            Phase::ShotOnGoal => self.shot_on_goal_ms,
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.center_bounce_ms + self.open_play_ms + self.inside_50_ms + self.shot_on_goal_ms
    }
}
