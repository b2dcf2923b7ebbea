//! Phase durations, unit sizes and base outcome odds.

use serde::{Deserialize, Serialize};

use crate::engine::phase::{Phase, PhaseCategory};

/// Inclusive duration range for a phase, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DurationRange {
    pub min_secs: f32,
    pub max_secs: f32,
}

impl DurationRange {
    pub const fn new(min_secs: f32, max_secs: f32) -> Self {
        Self { min_secs, max_secs }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhaseConfig {
    // === Durations ===
    pub center_bounce: DurationRange,
    pub open_play: DurationRange,
    pub inside_50: DurationRange,
    pub shot_on_goal: DurationRange,

    // === Unit sizes ===
    pub clearance_unit: usize,
    pub forward_entry_unit: usize,
    pub defensive_rebound_unit: usize,

    // === Outcome odds ===
    /// Share of clearances that go straight inside 50
    pub clearance_to_inside_50: f32,
    /// Base logit for retaining the ball and entering inside 50 from open play
    pub open_play_advance_logit: f32,
    /// Chance that a stoppage ends an open play chain with a ball-up
    pub stoppage_probability: f32,
    /// Share of successful open play advances taken as a long range shot
    pub long_range_shot_probability: f32,
    /// Base logit for an entry producing a shot
    pub inside_50_shot_logit: f32,
    /// Goal probability for an average kick under neutral conditions
    pub base_goal_probability: f32,
    /// Probability a miss still registers a behind
    pub behind_share_of_misses: f32,
    /// Penalty on long range shot conversion
    pub long_range_accuracy_factor: f32,

    // === Intensity (fatigue and injury scaling) ===
    pub center_bounce_intensity: f32,
    pub open_play_intensity: f32,
    pub inside_50_intensity: f32,
    pub shot_on_goal_intensity: f32,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            center_bounce: DurationRange::new(4.0, 10.0),
            open_play: DurationRange::new(10.0, 30.0),
            inside_50: DurationRange::new(6.0, 16.0),
            shot_on_goal: DurationRange::new(8.0, 20.0),

            clearance_unit: 5,
            forward_entry_unit: 6,
            defensive_rebound_unit: 6,

            clearance_to_inside_50: 0.25,
            open_play_advance_logit: -0.2,
            stoppage_probability: 0.12,
            long_range_shot_probability: 0.08,
            inside_50_shot_logit: 0.4,
            base_goal_probability: 0.52,
            behind_share_of_misses: 0.78,
            long_range_accuracy_factor: 0.6,

            center_bounce_intensity: 1.2,
            open_play_intensity: 1.0,
            inside_50_intensity: 1.3,
            shot_on_goal_intensity: 0.6,
        }
    }
}

impl PhaseConfig {
    pub fn duration(&self, phase: Phase) -> DurationRange {
        match phase {
            Phase::CenterBounce => self.center_bounce,
            Phase::OpenPlay => self.open_play,
            Phase::Inside50 => self.inside_50,
            Phase::ShotOnGoal => self.shot_on_goal,
        }
    }

    pub fn unit_size(&self, category: PhaseCategory) -> usize {
        match category {
            PhaseCategory::Clearance => self.clearance_unit,
            PhaseCategory::ForwardEntry => self.forward_entry_unit,
            PhaseCategory::DefensiveRebound => self.defensive_rebound_unit,
        }
    }

    pub fn intensity(&self, phase: Phase) -> f32 {
        match phase {
            Phase::CenterBounce => self.center_bounce_intensity,
            Phase::OpenPlay => self.open_play_intensity,
            Phase::Inside50 => self.inside_50_intensity,
            Phase::ShotOnGoal => self.shot_on_goal_intensity,
        }
    }

    /// Longest phase any range allows, in seconds.
    pub fn longest_phase_secs(&self) -> f32 {
        Phase::ALL.iter().map(|p| self.duration(*p).max_secs).fold(0.0, f32::max)
    }
}
