//! Match Momentum
//!
//! One signed value for the whole match: positive favours the home side,
//! negative the away side. Every score first decays the value by the game
//! time since the last update (configurable half-life), then adds an impact:
//! - goal > behind
//! - amplified while the match is close
//! - amplified in later quarters
//!
//! The side holding momentum (|value| outside the neutral band) gets a small
//! logit bias in its contests.

use serde::{Deserialize, Serialize};

use super::config::MomentumConfig;
use crate::models::{ScoreEvent, ScoreKind, TeamSide};

/// Momentum trend direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumTrend {
    /// Holder scored last, within one half-life
    Rising,
    /// Opponent scored last, within one half-life
    Falling,
    /// Nothing recent
    #[default]
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumReading {
    /// `None` inside the neutral band
    pub team: Option<TeamSide>,
    /// Magnitude of the signed value
    pub strength: f32,
    pub trend: MomentumTrend,
}

/// Momentum changed hands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumShift {
    pub team: TeamSide,
    pub strength: f32,
}

#[derive(Debug, Clone)]
pub struct MomentumTracker {
    config: MomentumConfig,
    value: f32,
    updated_ms: u64,
    holder: Option<TeamSide>,
    last_scorer: Option<(TeamSide, u64)>,
}

impl MomentumTracker {
    pub fn new(config: MomentumConfig) -> Self {
        Self { config, value: 0.0, updated_ms: 0, holder: None, last_scorer: None }
    }

    /// Signed value decayed to `game_time_ms` (not stored).
    pub fn value_at(&self, game_time_ms: u64) -> f32 {
        let elapsed_secs = game_time_ms.saturating_sub(self.updated_ms) as f32 / 1000.0;
        self.value * 0.5f32.powf(elapsed_secs / self.config.half_life_secs)
    }

    fn leader_of(&self, value: f32) -> Option<TeamSide> {
        if value.abs() < self.config.neutral_band {
            None
        } else if value > 0.0 {
            Some(TeamSide::Home)
        } else {
            Some(TeamSide::Away)
        }
    }

    /// Impact of a score before its sign is applied.
    pub fn impact(&self, event: &ScoreEvent) -> f32 {
        let base = match event.kind {
            ScoreKind::Goal => self.config.goal_impact,
            ScoreKind::Behind => self.config.behind_impact,
        };
        let points = event.kind.points() as i32;
        let margin_before = event.margin_for(event.side) - points;
        let close = if margin_before.abs() <= self.config.close_margin {
            1.0 + self.config.close_amplifier
        } else {
            1.0
        };
        let late = 1.0 + self.config.quarter_amplifier * event.quarter.saturating_sub(1) as f32;
        base * close * late
    }

    /// Fold a score in. Returns a shift when the holder changes to a new side.
    pub fn apply_score(&mut self, event: &ScoreEvent) -> Option<MomentumShift> {
        let decayed = self.value_at(event.game_time_ms);
        let sign = match event.side {
            TeamSide::Home => 1.0,
            TeamSide::Away => -1.0,
        };
        self.value = decayed + sign * self.impact(event);
        self.updated_ms = event.game_time_ms;
        self.last_scorer = Some((event.side, event.game_time_ms));

        let leader = self.leader_of(self.value)?;
        if self.holder == Some(leader) {
            return None;
        }
        self.holder = Some(leader);
        Some(MomentumShift { team: leader, strength: self.value.abs() })
    }

    pub fn reading_at(&self, game_time_ms: u64) -> MomentumReading {
        let value = self.value_at(game_time_ms);
        let team = self.leader_of(value);
        let window_ms = (self.config.half_life_secs * 1000.0) as u64;
        let trend = match (team, self.last_scorer) {
            (Some(holder), Some((scorer, at))) if game_time_ms.saturating_sub(at) <= window_ms => {
                if scorer == holder {
                    MomentumTrend::Rising
                } else {
                    MomentumTrend::Falling
                }
            }
            _ => MomentumTrend::Stable,
        };
        MomentumReading { team, strength: value.abs(), trend }
    }

    /// Logit bias for `side`'s contests, within `±contest_bias`.
    pub fn contest_bias(&self, side: TeamSide, game_time_ms: u64) -> f32 {
        let signed = self.config.contest_bias * self.value_at(game_time_ms).tanh();
        match side {
            TeamSide::Home => signed,
            TeamSide::Away => -signed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreLine;

    fn score(kind: ScoreKind, side: TeamSide, secs: u64, quarter: u8, home: ScoreLine, away: ScoreLine) -> ScoreEvent {
        ScoreEvent {
            kind,
            side,
            game_time_ms: secs * 1000,
            quarter,
            home,
            away,
            margin: home.points as i32 - away.points as i32,
        }
    }

    fn tracker() -> MomentumTracker {
        MomentumTracker::new(MomentumConfig::default())
    }

    #[test]
    fn test_first_goal_takes_momentum() {
        let mut t = tracker();
        let shift = t.apply_score(&score(ScoreKind::Goal, TeamSide::Away, 30, 1, ScoreLine::default(), ScoreLine::new(1, 0)));
        let shift = shift.unwrap();
        assert_eq!(shift.team, TeamSide::Away);
        // close match in quarter 1: 1.0 * 1.5
        assert!((shift.strength - 1.5).abs() < 1e-5);

        let reading = t.reading_at(60_000);
        assert_eq!(reading.team, Some(TeamSide::Away));
        assert_eq!(reading.trend, MomentumTrend::Rising);
    }

    #[test]
    fn test_half_life_decay() {
        let mut t = tracker();
        t.apply_score(&score(ScoreKind::Goal, TeamSide::Home, 0, 1, ScoreLine::new(1, 0), ScoreLine::default()));
        let v0 = t.value_at(0);
        let v1 = t.value_at(300_000);
        assert!((v1 - v0 / 2.0).abs() < 1e-4);
        assert_eq!(t.reading_at(10_000_000).team, None);
        assert_eq!(t.reading_at(10_000_000).trend, MomentumTrend::Stable);
    }

    #[test]
    fn test_no_shift_when_holder_extends() {
        let mut t = tracker();
        assert!(t
            .apply_score(&score(ScoreKind::Goal, TeamSide::Home, 10, 1, ScoreLine::new(1, 0), ScoreLine::default()))
            .is_some());
        assert!(t
            .apply_score(&score(ScoreKind::Goal, TeamSide::Home, 40, 1, ScoreLine::new(2, 0), ScoreLine::default()))
            .is_none());
    }

    #[test]
    fn test_reply_swings_momentum() {
        let mut t = tracker();
        t.apply_score(&score(ScoreKind::Behind, TeamSide::Home, 10, 1, ScoreLine::new(0, 1), ScoreLine::default()));
        let shift = t.apply_score(&score(ScoreKind::Goal, TeamSide::Away, 20, 1, ScoreLine::new(0, 1), ScoreLine::new(1, 0)));
        assert_eq!(shift.map(|s| s.team), Some(TeamSide::Away));
        assert!(t.contest_bias(TeamSide::Away, 20_000) > 0.0);
        assert!(t.contest_bias(TeamSide::Home, 20_000) < 0.0);
        assert!(t.contest_bias(TeamSide::Away, 20_000) <= MomentumConfig::default().contest_bias);
    }

    #[test]
    fn test_late_close_goals_hit_harder() {
        let t = tracker();
        let early = score(ScoreKind::Goal, TeamSide::Home, 10, 1, ScoreLine::new(1, 0), ScoreLine::default());
        let late = score(ScoreKind::Goal, TeamSide::Home, 4_000, 4, ScoreLine::new(10, 0), ScoreLine::new(9, 5));
        let blowout = score(ScoreKind::Goal, TeamSide::Home, 4_000, 4, ScoreLine::new(20, 0), ScoreLine::new(2, 0));
        assert!(t.impact(&late) > t.impact(&early));
        assert!(t.impact(&late) > t.impact(&blowout));
    }
}
