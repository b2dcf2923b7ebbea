//! Fatigue Model
//!
//! On field the multiplier decays exponentially toward a durability-dependent
//! floor; on the bench and over quarter breaks it recovers toward 1.0.
//!
//! ```text
//! on field:  m ← floor + (m − floor)·e^(−rate·dt)
//!            rate = base · intensity · (0.75 + k_w·work_rate) / (0.75 + k_e·endurance)
//! bench:     m ← 1 − (1 − m)·e^(−recovery·dt)
//! ```
//!
//! Everything is done in place on `PlayerRuntime`; nothing allocates.

use super::config::FatigueConfig;
use super::player_runtime::{fatigue_floor_for, PlayerRuntime};
use crate::models::{Attribute, Conditions, StyleModifiers};

#[derive(Debug, Clone)]
pub struct FatigueModel {
    config: FatigueConfig,
}

impl FatigueModel {
    pub fn new(config: FatigueConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FatigueConfig {
        &self.config
    }

    /// Combined load factor of the current phase, the team's style and the day.
    #[inline]
    pub fn intensity(phase_intensity: f32, style: &StyleModifiers, conditions: &Conditions) -> f32 {
        phase_intensity * style.fatigue_scale * conditions.fatigue_factor()
    }

    /// Decay rate per second for this player at the given intensity.
    pub fn decay_rate(&self, player: &PlayerRuntime, intensity: f32) -> f32 {
        let work_rate = player.attributes.normalized(Attribute::WorkRate);
        let endurance = player.attributes.normalized(Attribute::Endurance);
        let load = 0.75 + self.config.work_rate_impact * work_rate;
        let conditioning = 0.75 + self.config.endurance_impact * endurance;
        self.config.base_decay_per_sec * intensity.max(0.0) * load / conditioning
    }

    /// One on-field tick.
    pub fn apply_tick(&self, player: &mut PlayerRuntime, dt_secs: f32, intensity: f32) {
        let floor = player.fatigue_floor();
        let before = player.fatigue_multiplier;
        let rate = self.decay_rate(player, intensity);
        let after = floor + (before - floor) * (-rate * dt_secs).exp();
        player.fatigue_multiplier = after.clamp(floor, 1.0);
        player.fatigue_accrued += (before - player.fatigue_multiplier).max(0.0);
        player.time_on_ground_ms += (dt_secs * 1000.0).round() as u64;
    }

    /// One bench tick.
    pub fn recover_tick(&self, player: &mut PlayerRuntime, dt_secs: f32) {
        recover(player, self.config.bench_recovery_per_sec, dt_secs);
    }

    /// Recovery over a quarter (or half time) break, applied to every player.
    pub fn quarter_break(&self, player: &mut PlayerRuntime, break_secs: f32) {
        recover(player, self.config.break_recovery_per_sec, break_secs);
    }

    /// Floor for a durability attribute on the 0..=100 scale.
    pub fn floor_for(&self, durability: u8) -> f32 {
        fatigue_floor_for(durability.min(100) as f32 / 100.0, &self.config)
    }
}

fn recover(player: &mut PlayerRuntime, rate: f32, secs: f32) {
    let m = player.fatigue_multiplier;
    let after = 1.0 - (1.0 - m) * (-rate * secs).exp();
    player.fatigue_multiplier = after.clamp(player.fatigue_floor(), 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::runtime_with;
    use crate::models::{GroundCondition, PlayerAttributes, Position, TacticalStyle, Weather};
    use proptest::prelude::*;

    fn model() -> FatigueModel {
        FatigueModel::new(FatigueConfig::default())
    }

    #[test]
    fn test_decay_approaches_floor() {
        let model = model();
        let mut p = runtime_with(1, Position::C, PlayerAttributes::uniform(50));
        for _ in 0..20_000 {
            model.apply_tick(&mut p, 1.0, 1.0);
        }
        let floor = p.fatigue_floor();
        assert!(p.fatigue_multiplier >= floor);
        assert!(p.fatigue_multiplier - floor < 0.01);
        assert_eq!(p.time_on_ground_ms(), 20_000_000);
        assert!((p.fatigue_accrued() - (1.0 - p.fatigue_multiplier)).abs() < 1e-3);
    }

    #[test]
    fn test_work_rate_and_endurance() {
        let model = model();
        let mut grinder = PlayerAttributes::uniform(50);
        grinder.work_rate = 100;
        grinder.endurance = 20;
        let mut engine_room = PlayerAttributes::uniform(50);
        engine_room.work_rate = 20;
        engine_room.endurance = 100;
        let a = runtime_with(1, Position::C, grinder);
        let b = runtime_with(2, Position::C, engine_room);
        assert!(model.decay_rate(&a, 1.0) > model.decay_rate(&b, 1.0));
    }

    #[test]
    fn test_bench_recovery() {
        let model = model();
        let mut p = runtime_with(1, Position::W, PlayerAttributes::uniform(50));
        p.fatigue_multiplier = 0.7;
        model.recover_tick(&mut p, 60.0);
        assert!(p.fatigue_multiplier > 0.7);
        assert!(p.fatigue_multiplier <= 1.0);
        // Bench time is not time on ground
        assert_eq!(p.time_on_ground_ms(), 0);
    }

    #[test]
    fn test_quarter_break_recovers_everyone() {
        let model = model();
        let mut p = runtime_with(1, Position::FF, PlayerAttributes::uniform(50));
        p.fatigue_multiplier = 0.75;
        model.quarter_break(&mut p, 360.0);
        // 1 - 0.25 * e^(-1.08)
        assert!((p.fatigue_multiplier - 0.9151).abs() < 1e-3);
    }

    #[test]
    fn test_intensity_combines_style_and_conditions() {
        let wet = Conditions { weather: Weather::Rain, ground: GroundCondition::Heavy };
        let pressing = TacticalStyle::Pressing.modifiers();
        let balanced = TacticalStyle::Balanced.modifiers();
        let base = FatigueModel::intensity(1.0, &balanced, &Conditions::default());
        assert!((base - 1.0).abs() < 1e-6);
        assert!(FatigueModel::intensity(1.0, &pressing, &wet) > base);
    }

    #[test]
    fn test_floor_for_durability() {
        let model = model();
        assert!((model.floor_for(0) - 0.55).abs() < 1e-6);
        assert!((model.floor_for(100) - 0.80).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_multiplier_stays_in_bounds(
            durability in 0u8..=100,
            work_rate in 0u8..=100,
            endurance in 0u8..=100,
            steps in prop::collection::vec((0u8..3, 0.1f32..120.0, 0.0f32..3.0), 1..200),
        ) {
            let model = model();
            let mut attrs = PlayerAttributes::uniform(50);
            attrs.durability = durability;
            attrs.work_rate = work_rate;
            attrs.endurance = endurance;
            let mut p = runtime_with(1, Position::C, attrs);
            for (op, dt, intensity) in steps {
                match op {
                    0 => model.apply_tick(&mut p, dt, intensity),
                    1 => model.recover_tick(&mut p, dt),
                    _ => model.quarter_break(&mut p, dt),
                }
                prop_assert!(p.fatigue_multiplier >= p.fatigue_floor());
                prop_assert!(p.fatigue_multiplier <= 1.0);
            }
        }
    }
}
