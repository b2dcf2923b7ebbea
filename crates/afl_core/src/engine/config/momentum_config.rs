//! Momentum, milestone and rotation parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MomentumConfig {
    /// Game seconds for momentum to halve without a score
    pub half_life_secs: f32,
    pub goal_impact: f32,
    pub behind_impact: f32,
    /// Margin (points) at or under which a match counts as close
    pub close_margin: i32,
    /// Extra impact share in a close match
    pub close_amplifier: f32,
    /// Extra impact share per quarter after the first
    pub quarter_amplifier: f32,
    /// |value| under which nobody holds momentum
    pub neutral_band: f32,
    /// Max logit bias momentum adds to the holder's contests
    pub contest_bias: f32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            half_life_secs: 300.0,
            goal_impact: 1.0,
            behind_impact: 0.25,
            close_margin: 12,
            close_amplifier: 0.5,
            quarter_amplifier: 0.15,
            neutral_band: 0.1,
            contest_bias: 0.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MilestoneConfig {
    /// Team score thresholds reported once each (100 = century)
    pub score_thresholds: Vec<u16>,
    /// Window for a scoring burst, in game seconds
    pub burst_window_secs: u32,
    /// Consecutive goals needed for a burst
    pub burst_min_goals: usize,
    /// Deficit (points) a side must overturn for a comeback
    pub comeback_deficit: i32,
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            score_thresholds: vec![50, 100, 150],
            burst_window_secs: 120,
            burst_min_goals: 3,
            comeback_deficit: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RotationConfig {
    /// Interchange cap per team per match (forced injury swaps count too)
    pub max_per_match: u16,
    /// Fatigue rotations per team at a center bounce
    pub max_per_stoppage: usize,
    /// Fatigue rotations per team at a quarter break
    pub max_per_break: usize,
    /// A bench player must be at least this much fresher than the player coming off
    pub min_freshness_gain: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self { max_per_match: 75, max_per_stoppage: 2, max_per_break: 4, min_freshness_gain: 0.05 }
    }
}
