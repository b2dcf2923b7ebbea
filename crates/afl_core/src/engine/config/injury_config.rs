//! Injury model parameters

use serde::{Deserialize, Serialize};

use crate::engine::phase::Phase;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InjuryConfig {
    /// Injury probability per player-second before any scaling (default: 4e-6)
    pub base_risk_per_second: f32,

    // === Phase multipliers ===
    pub center_bounce_risk: f32,
    pub open_play_risk: f32,
    pub inside_50_risk: f32,
    pub shot_on_goal_risk: f32,

    // === Player scaling ===
    /// fatigue_scale = 1 + fatigue_weight * (1 - fatigue_multiplier)
    pub fatigue_weight: f32,
    /// durability_scale at durability 0
    pub durability_scale_max: f32,
    /// durability_scale at durability 100
    pub durability_scale_min: f32,
    /// Age from which risk starts to climb
    pub age_risk_onset: u8,
    /// Extra risk per year past the onset
    pub age_risk_per_year: f32,
    /// Extra risk per recent injury
    pub recurrence_per_injury: f32,
    /// Recent injuries counted at most
    pub recurrence_cap: u8,

    // === Severity ===
    /// Cumulative threshold below which an injury is minor
    pub minor_threshold: f32,
    /// Cumulative threshold below which an injury is moderate (major above)
    pub moderate_threshold: f32,
    /// Max shift of both thresholds toward worse outcomes at full fatigue
    pub fatigue_severity_shift: f32,

    // === Consequences ===
    pub minor_performance: f32,
    pub minor_return_min_secs: u32,
    pub minor_return_max_secs: u32,
    /// Rate at which a minor penalty eases back once the player is cleared
    pub minor_recovery_per_sec: f32,
    pub moderate_performance: f32,
    pub moderate_weeks_min: u8,
    pub moderate_weeks_max: u8,
    pub major_performance: f32,
    pub major_weeks_min: u8,
    pub major_weeks_max: u8,
}

impl Default for InjuryConfig {
    fn default() -> Self {
        Self {
            base_risk_per_second: 4.0e-6,

            center_bounce_risk: 1.3,
            open_play_risk: 1.0,
            inside_50_risk: 1.4,
            shot_on_goal_risk: 0.3,

            fatigue_weight: 2.0,
            durability_scale_max: 1.5,
            durability_scale_min: 0.5,
            age_risk_onset: 28,
            age_risk_per_year: 0.04,
            recurrence_per_injury: 0.15,
            recurrence_cap: 3,

            minor_threshold: 0.65,
            moderate_threshold: 0.90,
            fatigue_severity_shift: 0.15,

            minor_performance: 0.85,
            minor_return_min_secs: 90,
            minor_return_max_secs: 300,
            minor_recovery_per_sec: 0.0005,
            moderate_performance: 0.5,
            moderate_weeks_min: 1,
            moderate_weeks_max: 4,
            major_performance: 0.0,
            major_weeks_min: 4,
            major_weeks_max: 12,
        }
    }
}

impl InjuryConfig {
    pub fn phase_multiplier(&self, phase: Phase) -> f32 {
        match phase {
            Phase::CenterBounce => self.center_bounce_risk,
            Phase::OpenPlay => self.open_play_risk,
            Phase::Inside50 => self.inside_50_risk,
            Phase::ShotOnGoal => self.shot_on_goal_risk,
        }
    }
}
