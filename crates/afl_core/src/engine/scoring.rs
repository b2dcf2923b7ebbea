//! Scoring & Momentum Tracker
//!
//! The score log is append-only. Per-side totals are a cache over it and can
//! always be rebuilt with `recompute_from_log`.

use super::config::MomentumConfig;
use super::momentum::{MomentumReading, MomentumShift, MomentumTracker};
use crate::models::{ScoreEvent, ScoreKind, ScoreLine, TeamSide};

/// Ordered record of every score. Nothing can be removed or edited.
#[derive(Debug, Clone, Default)]
pub struct ScoreLog {
    events: Vec<ScoreEvent>,
}

impl ScoreLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ScoreEvent) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[ScoreEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&ScoreEvent> {
        self.events.last()
    }
}

/// Rolling totals for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamScoreTracker {
    line: ScoreLine,
}

impl TeamScoreTracker {
    pub fn record(&mut self, kind: ScoreKind) {
        self.line.add(kind);
    }

    pub fn line(&self) -> ScoreLine {
        self.line
    }

    pub fn points(&self) -> u16 {
        self.line.points
    }
}

/// What one recorded score changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreUpdate {
    pub event: ScoreEvent,
    pub momentum_shift: Option<MomentumShift>,
}

#[derive(Debug, Clone)]
pub struct ScoreBoard {
    log: ScoreLog,
    trackers: [TeamScoreTracker; 2],
    momentum: MomentumTracker,
}

impl ScoreBoard {
    pub fn new(momentum: MomentumConfig) -> Self {
        Self {
            log: ScoreLog::new(),
            trackers: [TeamScoreTracker::default(); 2],
            momentum: MomentumTracker::new(momentum),
        }
    }

    /// Record a score and fold it into momentum.
    pub fn record(&mut self, kind: ScoreKind, side: TeamSide, game_time_ms: u64, quarter: u8) -> ScoreUpdate {
        self.trackers[side.index()].record(kind);
        let event = ScoreEvent {
            kind,
            side,
            game_time_ms,
            quarter,
            home: self.line(TeamSide::Home),
            away: self.line(TeamSide::Away),
            margin: self.margin(),
        };
        self.log.push(event);
        let momentum_shift = self.momentum.apply_score(&event);
        ScoreUpdate { event, momentum_shift }
    }

    pub fn record_score(&mut self, kind: ScoreKind, side: TeamSide, game_time_ms: u64, quarter: u8) -> &ScoreEvent {
        self.record(kind, side, game_time_ms, quarter);
        // `record` always pushes, so the log cannot be empty here
        &self.log.as_slice()[self.log.len() - 1]
    }

    pub fn line(&self, side: TeamSide) -> ScoreLine {
        self.trackers[side.index()].line()
    }

    /// Home points minus away points.
    pub fn margin(&self) -> i32 {
        self.trackers[0].points() as i32 - self.trackers[1].points() as i32
    }

    pub fn leader(&self) -> Option<TeamSide> {
        crate::models::score::leader_for_margin(self.margin())
    }

    pub fn log(&self) -> &ScoreLog {
        &self.log
    }

    pub fn momentum(&self) -> &MomentumTracker {
        &self.momentum
    }

    pub fn momentum_at(&self, game_time_ms: u64) -> MomentumReading {
        self.momentum.reading_at(game_time_ms)
    }

    /// Totals rebuilt from the log, `[home, away]`.
    pub fn recompute_from_log(&self) -> [ScoreLine; 2] {
        let mut lines = [ScoreLine::default(); 2];
        for event in self.log.as_slice() {
            lines[event.side.index()].add(event.kind);
        }
        lines
    }

    /// Cache agrees with the log.
    pub fn is_consistent(&self) -> bool {
        self.recompute_from_log() == [self.line(TeamSide::Home), self.line(TeamSide::Away)]
    }
}
