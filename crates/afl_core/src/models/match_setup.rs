//! Match setup: everything the roster/fixture collaborators hand over before kickoff.
//!
//! Read-only once the match starts.

use serde::{Deserialize, Serialize};

use super::conditions::Conditions;
use super::team::TeamSheet;

/// Team side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    #[inline]
    pub fn opponent(&self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Array slot used by per-side storage (`[home, away]`).
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }

    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];
}

/// Fixture identifiers carried through to the result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FixtureId {
    pub match_id: u32,
    pub round: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSetup {
    #[serde(default)]
    pub fixture: FixtureId,
    pub seed: u64,
    pub home: TeamSheet,
    pub away: TeamSheet,
    #[serde(default)]
    pub conditions: Conditions,
}

impl MatchSetup {
    pub fn team(&self, side: TeamSide) -> &TeamSheet {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}
