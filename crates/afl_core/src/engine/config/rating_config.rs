//! Rating weights per phase category.
//!
//! The default weights are carried over as-is from the club's tuning sheet and
//! have never been balanced against match outcomes; treat them as a starting
//! point that product/design owns, not as derived values.

use serde::{Deserialize, Serialize};

use crate::engine::phase::PhaseCategory;
use crate::models::Attribute;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightTerm {
    pub attribute: Attribute,
    pub weight: f32,
}

const fn term(attribute: Attribute, weight: f32) -> WeightTerm {
    WeightTerm { attribute, weight }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RatingWeights {
    pub clearance: Vec<WeightTerm>,
    pub forward_entry: Vec<WeightTerm>,
    pub defensive_rebound: Vec<WeightTerm>,
    /// Logistic steepness applied to the unit strength difference
    pub steepness: f32,
    /// Lower clamp for any advance probability
    pub min_probability: f32,
    /// Upper clamp for any advance probability
    pub max_probability: f32,
}

impl Default for RatingWeights {
    fn default() -> Self {
        Self {
            clearance: vec![
                term(Attribute::Clearance, 0.45),
                term(Attribute::Strength, 0.25),
                term(Attribute::Positioning, 0.15),
                term(Attribute::DecisionMaking, 0.15),
            ],
            forward_entry: vec![
                term(Attribute::Marking, 0.35),
                term(Attribute::Kicking, 0.30),
                term(Attribute::Speed, 0.20),
                term(Attribute::DecisionMaking, 0.15),
            ],
            defensive_rebound: vec![
                term(Attribute::Tackling, 0.30),
                term(Attribute::Positioning, 0.30),
                term(Attribute::Marking, 0.20),
                term(Attribute::Strength, 0.20),
            ],
            steepness: 6.0,
            min_probability: 0.03,
            max_probability: 0.97,
        }
    }
}

impl RatingWeights {
    pub fn terms(&self, category: PhaseCategory) -> &[WeightTerm] {
        match category {
            PhaseCategory::Clearance => &self.clearance,
            PhaseCategory::ForwardEntry => &self.forward_entry,
            PhaseCategory::DefensiveRebound => &self.defensive_rebound,
        }
    }

    pub fn total_weight(&self, category: PhaseCategory) -> f32 {
        self.terms(category).iter().map(|t| t.weight).sum()
    }
}
