//! # Engine Configuration
//!
//! Every tuning constant of the match core lives here so balance changes never
//! touch simulation code.
//!
//! ## Usage
//! ```rust
//! use afl_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let wet_day = EngineConfig::attritional();
//! assert!(config.validate().is_ok());
//! assert!(wet_day.validate().is_ok());
//! ```
//!
//! ## Environment Variables
//!
//! - `AFL_CONFIG_PROFILE`: select a preset (`realistic`, `high_scoring`, `attritional`)

mod fatigue_config;
mod injury_config;
mod match_config;
mod momentum_config;
mod phase_config;
mod rating_config;

pub use fatigue_config::FatigueConfig;
pub use injury_config::InjuryConfig;
pub use match_config::MatchConfig;
pub use momentum_config::{MilestoneConfig, MomentumConfig, RotationConfig};
pub use phase_config::{DurationRange, PhaseConfig};
pub use rating_config::{RatingWeights, WeightTerm};

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::engine::phase::{Phase, PhaseCategory};
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    #[serde(rename = "match")]
    pub match_rules: MatchConfig,
    pub rating: RatingWeights,
    pub phase: PhaseConfig,
    pub fatigue: FatigueConfig,
    pub injury: InjuryConfig,
    pub momentum: MomentumConfig,
    pub milestones: MilestoneConfig,
    pub rotation: RotationConfig,
}

impl EngineConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Dry deck, quick ball movement, accurate kicking.
    pub fn high_scoring() -> Self {
        let mut cfg = Self::default();
        cfg.phase.base_goal_probability = 0.60;
        cfg.phase.open_play_advance_logit = 0.0;
        cfg.phase.inside_50_shot_logit = 0.6;
        cfg.phase.stoppage_probability = 0.08;
        cfg
    }

    /// Contested, low scoring football with heavier wear.
    pub fn attritional() -> Self {
        let mut cfg = Self::default();
        cfg.phase.base_goal_probability = 0.45;
        cfg.phase.stoppage_probability = 0.2;
        cfg.phase.open_play_advance_logit = -0.6;
        cfg.fatigue.base_decay_per_sec = 0.0007;
        cfg.injury.base_risk_per_second = 6.0e-6;
        cfg
    }

    /// Preset by name, `None` for an unknown name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "realistic" | "default" => Some(Self::realistic()),
            "high_scoring" => Some(Self::high_scoring()),
            "attritional" => Some(Self::attritional()),
            _ => None,
        }
    }

    pub fn from_env_or_default() -> Self {
        env::var("AFL_CONFIG_PROFILE").ok().and_then(|name| Self::preset(&name)).unwrap_or_default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let m = &self.match_rules;
        if m.quarters == 0 {
            return Err(invalid("match.quarters must be at least 1"));
        }
        if m.quarter_length_secs == 0 {
            return Err(invalid("match.quarter_length_secs must be positive"));
        }
        if m.tick_ms == 0 || m.tick_ms as u64 > m.quarter_length_ms() {
            return Err(invalid("match.tick_ms must be in 1..=quarter length"));
        }
        if m.on_field_count == 0 {
            return Err(invalid("match.on_field_count must be positive"));
        }

        for category in PhaseCategory::ALL {
            let terms = self.rating.terms(category);
            if terms.iter().any(|t| t.weight < 0.0 || !t.weight.is_finite()) {
                return Err(invalid(format!("rating weights for {:?} must be non-negative", category)));
            }
            if self.rating.total_weight(category) <= 0.0 {
                return Err(invalid(format!("rating weights for {:?} sum to zero", category)));
            }
            if self.phase.unit_size(category) == 0 {
                return Err(invalid(format!("unit size for {:?} must be positive", category)));
            }
        }
        let r = &self.rating;
        if !(0.0..=1.0).contains(&r.min_probability)
            || !(0.0..=1.0).contains(&r.max_probability)
            || r.min_probability > r.max_probability
        {
            return Err(invalid("rating probability clamps must satisfy 0 <= min <= max <= 1"));
        }

        for phase in Phase::ALL {
            let d = self.phase.duration(phase);
            if d.min_secs <= 0.0 || d.max_secs < d.min_secs || !d.max_secs.is_finite() {
                return Err(invalid(format!("duration range for {:?} is empty", phase)));
            }
        }
        let p = &self.phase;
        for (name, v) in [
            ("phase.clearance_to_inside_50", p.clearance_to_inside_50),
            ("phase.stoppage_probability", p.stoppage_probability),
            ("phase.long_range_shot_probability", p.long_range_shot_probability),
            ("phase.base_goal_probability", p.base_goal_probability),
            ("phase.behind_share_of_misses", p.behind_share_of_misses),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(format!("{} must be a probability, got {}", name, v)));
            }
        }

        let f = &self.fatigue;
        if !(0.0..=1.0).contains(&f.floor_min) || !(0.0..=1.0).contains(&f.floor_max) || f.floor_min > f.floor_max {
            return Err(invalid("fatigue floors must satisfy 0 <= floor_min <= floor_max <= 1"));
        }
        if f.base_decay_per_sec < 0.0 || f.bench_recovery_per_sec < 0.0 || f.break_recovery_per_sec < 0.0 {
            return Err(invalid("fatigue rates must be non-negative"));
        }

        let i = &self.injury;
        if i.base_risk_per_second < 0.0 {
            return Err(invalid("injury.base_risk_per_second must be non-negative"));
        }
        if !(0.0..=1.0).contains(&i.minor_threshold)
            || !(0.0..=1.0).contains(&i.moderate_threshold)
            || i.minor_threshold > i.moderate_threshold
        {
            return Err(invalid("injury severity thresholds must be ascending probabilities"));
        }
        if i.minor_return_min_secs > i.minor_return_max_secs
            || i.moderate_weeks_min > i.moderate_weeks_max
            || i.major_weeks_min > i.major_weeks_max
        {
            return Err(invalid("injury ranges must have min <= max"));
        }

        if self.momentum.half_life_secs <= 0.0 || !self.momentum.half_life_secs.is_finite() {
            return Err(invalid("momentum.half_life_secs must be positive"));
        }
        if self.milestones.burst_min_goals == 0 {
            return Err(invalid("milestones.burst_min_goals must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> MatchError {
    MatchError::InvalidConfig(msg.into())
}

// ========== Tests ==========
