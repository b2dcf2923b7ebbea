pub mod cancel;
pub mod config;
pub mod context;
pub mod fatigue;
pub mod injury;
pub mod milestones; // milestone and scoring pattern detection over the score log
pub mod momentum;
pub mod orchestrator;
pub mod phase;
pub mod player_runtime;
pub mod rating;
pub mod rng;
pub mod rotations; // injury replacements and fatigue interchanges
pub mod round;
pub mod scoring;
pub mod selection;
pub mod sink;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use cancel::CancelToken;
pub use config::EngineConfig;
pub use context::{MatchContext, TeamRuntime};
pub use momentum::{MomentumReading, MomentumTrend};
pub use orchestrator::{simulate_match, simulate_match_with_cancel, MatchEngine};
pub use phase::{Phase, PhaseCategory, PhaseTimes};
pub use player_runtime::PlayerRuntime;
pub use rng::{derive_fixture_seed, MatchRng};
pub use round::{assign_round_seeds, simulate_round, simulate_round_sequential};
pub use scoring::ScoreBoard;
pub use sink::{ChannelSink, CollectingSink, MatchEventSink, NullSink};
