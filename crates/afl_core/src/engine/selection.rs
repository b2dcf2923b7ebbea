//! Unit Selector
//!
//! Picks who contests a phase, without randomness:
//! 1. players on the category's lines (midfield + ruck for clearances,
//!    forwards for entries, defenders for rebounds)
//! 2. backfill from everyone else when the line is short
//! 3. best `count` by category rating, ties to roster order
//!
//! Injured-out players are never eligible. Buffers are kept per category and
//! reused across calls.

use std::cmp::Ordering;

use super::config::RatingWeights;
use super::phase::PhaseCategory;
use super::player_runtime::PlayerRuntime;
use super::rating::player_rating;
use crate::models::Line;

#[derive(Debug, Clone)]
pub struct UnitSelector {
    weights: RatingWeights,
    scores: Vec<f32>,
    affine: Vec<usize>,
    rest: Vec<usize>,
    selected: [Vec<usize>; 3],
}

impl UnitSelector {
    pub fn new(weights: RatingWeights, roster_size: usize, max_unit: usize) -> Self {
        Self {
            weights,
            scores: Vec::with_capacity(roster_size),
            affine: Vec::with_capacity(roster_size),
            rest: Vec::with_capacity(roster_size),
            selected: std::array::from_fn(|_| Vec::with_capacity(max_unit)),
        }
    }

    /// Does this line naturally contest the category?
    pub fn has_affinity(line: Line, category: PhaseCategory) -> bool {
        match category {
            PhaseCategory::Clearance => matches!(line, Line::Midfield | Line::Ruck),
            PhaseCategory::ForwardEntry => line == Line::Forward,
            PhaseCategory::DefensiveRebound => line == Line::Defence,
        }
    }

    /// Indices into `roster` of the selected unit, best first.
    pub fn select(&mut self, roster: &[PlayerRuntime], category: PhaseCategory, count: usize) -> &[usize] {
        self.scores.clear();
        self.affine.clear();
        self.rest.clear();
        for (i, player) in roster.iter().enumerate() {
            self.scores.push(player_rating(&self.weights, player, category));
            if !player.is_available() {
                continue;
            }
            if Self::has_affinity(player.position.line(), category) {
                self.affine.push(i);
            } else {
                self.rest.push(i);
            }
        }

        let scores = &self.scores;
        let by_rating = |a: &usize, b: &usize| {
            scores[*b].partial_cmp(&scores[*a]).unwrap_or(Ordering::Equal).then(a.cmp(b))
        };

        let out = &mut self.selected[category.index()];
        out.clear();
        if self.affine.len() >= count {
            self.affine.sort_unstable_by(by_rating);
            out.extend_from_slice(&self.affine[..count]);
        } else {
            out.extend_from_slice(&self.affine);
            self.rest.sort_unstable_by(by_rating);
            let needed = (count - out.len()).min(self.rest.len());
            out.extend_from_slice(&self.rest[..needed]);
        }
        out.sort_unstable_by(by_rating);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{runtime_roster, runtime_with};
    use crate::models::{PlayerAttributes, Position};
    use proptest::prelude::*;

    fn selector() -> UnitSelector {
        UnitSelector::new(RatingWeights::default(), 18, 6)
    }

    #[test]
    fn test_clearance_prefers_midfield() {
        let roster = runtime_roster(60);
        let mut sel = selector();
        let unit = sel.select(&roster, PhaseCategory::Clearance, 5).to_vec();
        assert_eq!(unit.len(), 5);
        assert!(unit.iter().all(|&i| roster[i].position.is_midfielder()));
        // Equal ratings fall back to roster order
        assert_eq!(unit, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_backfill_when_line_is_short() {
        let mut roster = runtime_roster(60);
        // Forwards are slots 12..18; knock out four of them
        for i in 12..16 {
            roster[i].injured_out = true;
        }
        let mut attrs = PlayerAttributes::uniform(60);
        attrs.marking = 95;
        attrs.kicking = 95;
        roster[3] = runtime_with(4, Position::CHB, attrs);

        let mut sel = selector();
        let unit = sel.select(&roster, PhaseCategory::ForwardEntry, 6).to_vec();
        assert_eq!(unit.len(), 6);
        assert_eq!(unit[0], 3, "best backfill ranks first");
        assert!(unit.contains(&16) && unit.contains(&17));
        assert!(unit.iter().all(|&i| !roster[i].injured_out));
    }

    #[test]
    fn test_higher_rating_wins_within_line() {
        let mut roster = runtime_roster(60);
        roster[4].fatigue_multiplier = 0.6;
        let mut sel = selector();
        let unit = sel.select(&roster, PhaseCategory::DefensiveRebound, 5).to_vec();
        assert!(!unit.contains(&4));
        assert_eq!(unit, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_small_roster_returns_everyone_eligible() {
        let mut roster = runtime_roster(60);
        roster.truncate(3);
        roster[1].injured_out = true;
        let mut sel = selector();
        let unit = sel.select(&roster, PhaseCategory::Clearance, 6).to_vec();
        assert_eq!(unit, vec![0, 2]);
    }

    #[test]
    fn test_buffers_are_per_category() {
        let roster = runtime_roster(60);
        let mut sel = selector();
        let clearance = sel.select(&roster, PhaseCategory::Clearance, 5).to_vec();
        let _ = sel.select(&roster, PhaseCategory::DefensiveRebound, 6);
        assert_eq!(sel.selected[PhaseCategory::Clearance.index()], clearance);
    }

    proptest! {
        #[test]
        fn prop_injured_out_never_selected(
            out_mask in prop::collection::vec(any::<bool>(), 18),
            ratings in prop::collection::vec(0u8..=100, 18),
            count in 1usize..10,
        ) {
            let mut roster = runtime_roster(50);
            for (i, p) in roster.iter_mut().enumerate() {
                p.injured_out = out_mask[i];
                p.attributes = PlayerAttributes::uniform(ratings[i]);
            }
            let mut sel = selector();
            for category in PhaseCategory::ALL {
                let unit = sel.select(&roster, category, count);
                let eligible = out_mask.iter().filter(|o| !**o).count();
                prop_assert_eq!(unit.len(), count.min(eligible));
                prop_assert!(unit.iter().all(|&i| !roster[i].injured_out));
            }
        }
    }
}
