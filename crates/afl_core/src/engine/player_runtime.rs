//! Match-scoped player state
//!
//! Wraps the static attribute record with the fields that change every tick.
//! Created at squad selection, dropped at full time; only the aggregated
//! `PlayerMatchDelta` leaves the core.

use super::config::FatigueConfig;
use crate::models::{
    Attribute, InjuryOutcome, PlayerAttributes, PlayerMatchDelta, PlayerProfile, Position, TeamSide,
};

#[derive(Debug, Clone)]
pub struct PlayerRuntime {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub age: u8,
    pub recent_injuries: u8,
    pub attributes: PlayerAttributes,

    /// Performance multiplier from fatigue, always within `[fatigue_floor, 1.0]`
    pub fatigue_multiplier: f32,
    /// Performance multiplier from injury, `[0, 1]`
    pub injury_multiplier: f32,
    /// Out for the rest of the match; never selected again
    pub injured_out: bool,
    /// Treatment time left before a minor injury is cleared
    pub return_in_ms: u64,

    fatigue_floor: f32,
    pub(crate) time_on_ground_ms: u64,
    pub(crate) fatigue_accrued: f32,
    pub(crate) injury: Option<InjuryOutcome>,
}

impl PlayerRuntime {
    pub fn new(profile: &PlayerProfile, attributes: PlayerAttributes, fatigue: &FatigueConfig) -> Self {
        let durability = attributes.normalized(Attribute::Durability);
        Self {
            id: profile.id,
            name: profile.name.clone(),
            position: profile.position,
            age: profile.age,
            recent_injuries: profile.recent_injuries,
            attributes,
            fatigue_multiplier: 1.0,
            injury_multiplier: 1.0,
            injured_out: false,
            return_in_ms: 0,
            fatigue_floor: fatigue_floor_for(durability, fatigue),
            time_on_ground_ms: 0,
            fatigue_accrued: 0.0,
            injury: None,
        }
    }

    #[inline]
    pub fn fatigue_floor(&self) -> f32 {
        self.fatigue_floor
    }

    /// Whole seconds left on the treatment timer, rounded up.
    pub fn return_in_seconds(&self) -> u32 {
        self.return_in_ms.div_ceil(1000) as u32
    }

    /// May take part in a contest.
    #[inline]
    pub fn is_available(&self) -> bool {
        !self.injured_out
    }

    /// Available and not under treatment.
    #[inline]
    pub fn is_cleared(&self) -> bool {
        !self.injured_out && self.return_in_ms == 0
    }

    #[inline]
    pub fn performance(&self) -> f32 {
        self.fatigue_multiplier * self.injury_multiplier
    }

    /// Normalized attribute scaled by current performance.
    #[inline]
    pub fn effective(&self, attribute: Attribute) -> f32 {
        self.attributes.normalized(attribute) * self.performance()
    }

    pub fn time_on_ground_ms(&self) -> u64 {
        self.time_on_ground_ms
    }

    pub fn fatigue_accrued(&self) -> f32 {
        self.fatigue_accrued
    }

    pub fn injury(&self) -> Option<&InjuryOutcome> {
        self.injury.as_ref()
    }

    pub fn to_delta(&self, side: TeamSide) -> PlayerMatchDelta {
        PlayerMatchDelta {
            player_id: self.id,
            side,
            time_on_ground_secs: (self.time_on_ground_ms / 1000) as u32,
            fatigue_accrued: self.fatigue_accrued,
            final_fatigue_multiplier: self.fatigue_multiplier,
            injury: self.injury.clone(),
        }
    }
}

/// Lowest fatigue multiplier a player of the given durability (0..=1) can reach.
pub fn fatigue_floor_for(durability: f32, config: &FatigueConfig) -> f32 {
    let d = durability.clamp(0.0, 1.0);
    config.floor_min + (config.floor_max - config.floor_min) * d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(durability: u8) -> PlayerRuntime {
        let mut attrs = PlayerAttributes::uniform(60);
        attrs.durability = durability;
        let profile = PlayerProfile::new(7, "Test", Position::C, attrs);
        PlayerRuntime::new(&profile, attrs, &FatigueConfig::default())
    }

    #[test]
    fn test_fresh_player() {
        let p = runtime(50);
        assert_eq!(p.fatigue_multiplier, 1.0);
        assert_eq!(p.injury_multiplier, 1.0);
        assert!(p.is_available());
        assert!(p.is_cleared());
        assert!((p.effective(Attribute::Kicking) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_floor_scales_with_durability() {
        let cfg = FatigueConfig::default();
        assert!((runtime(0).fatigue_floor() - cfg.floor_min).abs() < 1e-6);
        assert!((runtime(100).fatigue_floor() - cfg.floor_max).abs() < 1e-6);
        assert!(runtime(0).fatigue_floor() < runtime(50).fatigue_floor());
    }

    #[test]
    fn test_return_seconds_round_up() {
        let mut p = runtime(50);
        p.return_in_ms = 1_001;
        assert_eq!(p.return_in_seconds(), 2);
        assert!(!p.is_cleared());
        assert!(p.is_available());
    }

    #[test]
    fn test_performance_combines_multipliers() {
        let mut p = runtime(50);
        p.fatigue_multiplier = 0.8;
        p.injury_multiplier = 0.5;
        assert!((p.performance() - 0.4).abs() < 1e-6);
    }
}
