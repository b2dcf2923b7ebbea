//! Rating Engine
//!
//! Turns a unit of players into one strength number per phase category, and a
//! strength difference into the probability that the attacking unit advances.

use super::config::RatingWeights;
use super::phase::PhaseCategory;
use super::player_runtime::PlayerRuntime;

#[derive(Debug, Clone)]
pub struct RatingEngine {
    weights: RatingWeights,
}

impl RatingEngine {
    pub fn new(weights: RatingWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RatingWeights {
        &self.weights
    }

    /// Weighted rating of one player, 0..=1, using effective attributes.
    #[inline]
    pub fn player_rating(&self, player: &PlayerRuntime, category: PhaseCategory) -> f32 {
        player_rating(&self.weights, player, category)
    }

    /// Mean player rating of the participants. An empty unit has strength 0.
    pub fn unit_strength(
        &self,
        roster: &[PlayerRuntime],
        participants: &[usize],
        category: PhaseCategory,
    ) -> f32 {
        if participants.is_empty() {
            return 0.0;
        }
        let sum: f32 = participants
            .iter()
            .filter_map(|&i| roster.get(i))
            .map(|p| self.player_rating(p, category))
            .sum();
        sum / participants.len() as f32
    }

    /// `1 / (1 + e^-(steepness·(attack − defence) + bias))`, clamped.
    ///
    /// `bias` is the sum of every logit-scale term: the phase's base logit,
    /// home ground, tactics and momentum.
    pub fn advance_probability(&self, attack: f32, defence: f32, bias: f32) -> f32 {
        let z = self.weights.steepness * (attack - defence) + bias;
        logistic(z).clamp(self.weights.min_probability, self.weights.max_probability)
    }
}

pub fn player_rating(weights: &RatingWeights, player: &PlayerRuntime, category: PhaseCategory) -> f32 {
    let total = weights.total_weight(category);
    if total <= 0.0 {
        return 0.0;
    }
    let sum: f32 = weights
        .terms(category)
        .iter()
        .map(|t| t.weight * player.effective(t.attribute))
        .sum();
    sum / total
}

#[inline]
pub fn logistic(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{runtime_roster, runtime_with};
    use crate::models::{PlayerAttributes, Position};
    use proptest::prelude::*;

    fn engine() -> RatingEngine {
        RatingEngine::new(RatingWeights::default())
    }

    #[test]
    fn test_uniform_player_rating() {
        let p = runtime_with(1, Position::C, PlayerAttributes::uniform(80));
        for category in PhaseCategory::ALL {
            assert!((engine().player_rating(&p, category) - 0.8).abs() < 1e-5);
        }
    }

    #[test]
    fn test_clearance_weights_dominate() {
        let mut attrs = PlayerAttributes::uniform(50);
        attrs.clearance = 100;
        let specialist = runtime_with(1, Position::RR, attrs);
        // 0.45 * 1.0 + 0.55 * 0.5
        assert!((engine().player_rating(&specialist, PhaseCategory::Clearance) - 0.725).abs() < 1e-5);
        assert!((engine().player_rating(&specialist, PhaseCategory::ForwardEntry) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_fatigue_lowers_strength() {
        let mut roster = runtime_roster(70);
        let unit = [8, 9, 10, 11];
        let fresh = engine().unit_strength(&roster, &unit, PhaseCategory::Clearance);
        for i in unit {
            roster[i].fatigue_multiplier = 0.8;
        }
        let tired = engine().unit_strength(&roster, &unit, PhaseCategory::Clearance);
        assert!((tired - fresh * 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_empty_unit() {
        let roster = runtime_roster(70);
        assert_eq!(engine().unit_strength(&roster, &[], PhaseCategory::Clearance), 0.0);
    }

    #[test]
    fn test_even_contest_is_a_coin_flip() {
        assert!((engine().advance_probability(0.6, 0.6, 0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_probability_is_clamped() {
        let e = engine();
        assert_eq!(e.advance_probability(1.0, 0.0, 10.0), e.weights().max_probability);
        assert_eq!(e.advance_probability(0.0, 1.0, -10.0), e.weights().min_probability);
    }

    proptest! {
        #[test]
        fn prop_monotonic_in_attack(a in 0.0f32..1.0, d in 0.0f32..1.0, delta in 0.001f32..0.5, bias in -2.0f32..2.0) {
            let e = engine();
            let lower = e.advance_probability(a, d, bias);
            let higher = e.advance_probability(a + delta, d, bias);
            prop_assert!(higher >= lower);
        }
    }
}
