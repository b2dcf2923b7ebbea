//! Data models shared by the engine and its callers
pub mod conditions;
pub mod events;
pub mod injury;
pub mod match_result;
pub mod match_setup;
pub mod player;
pub mod score;
pub mod team;

pub use conditions::{Conditions, GroundCondition, Weather};
pub use events::{EventKind, InterchangeReason, MatchEvent, Milestone, ScoringPattern};
pub use injury::{InjuryOutcome, InjurySeverity, InjuryType};
pub use match_result::{MatchResult, MatchStatistics, PlayerMatchDelta, QuarterSummary, TeamStatistics};
pub use match_setup::{FixtureId, MatchSetup, TeamSide};
pub use player::{Attribute, Line, PlayerAttributes, PlayerProfile, Position, RawAttributes, NEUTRAL_ATTRIBUTE};
pub use score::{ScoreEvent, ScoreKind, ScoreLine};
pub use team::{StyleModifiers, TacticalStyle, Tactics, TeamSheet};
