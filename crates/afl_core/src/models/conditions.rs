use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Overcast,
    Rain,
    Wind,
    Heat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroundCondition {
    #[default]
    Firm,
    Soft,
    Heavy,
    /// Hard, dry surface late in the season
    Hard,
}

/// Weather and ground for one match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Conditions {
    pub weather: Weather,
    pub ground: GroundCondition,
}

impl Conditions {
    /// Multiplier on goal conversion.
    pub fn accuracy_factor(&self) -> f32 {
        let weather = match self.weather {
            Weather::Clear | Weather::Overcast => 1.0,
            Weather::Rain => 0.85,
            Weather::Wind => 0.88,
            Weather::Heat => 0.98,
        };
        let ground = match self.ground {
            GroundCondition::Firm | GroundCondition::Hard => 1.0,
            GroundCondition::Soft => 0.97,
            GroundCondition::Heavy => 0.93,
        };
        weather * ground
    }

    /// Multiplier on fatigue decay.
    pub fn fatigue_factor(&self) -> f32 {
        let weather = match self.weather {
            Weather::Clear | Weather::Overcast | Weather::Wind => 1.0,
            Weather::Rain => 1.05,
            Weather::Heat => 1.2,
        };
        let ground = match self.ground {
            GroundCondition::Firm | GroundCondition::Hard => 1.0,
            GroundCondition::Soft => 1.05,
            GroundCondition::Heavy => 1.15,
        };
        weather * ground
    }

    /// Multiplier on soft-tissue injury risk.
    pub fn injury_factor(&self) -> f32 {
        match self.ground {
            GroundCondition::Hard => 1.2,
            GroundCondition::Firm => 1.0,
            GroundCondition::Soft => 0.95,
            GroundCondition::Heavy => 1.05,
        }
    }

    /// Logit bias toward stoppages (ball-ups) in open play.
    pub fn stoppage_bias(&self) -> f32 {
        match (self.weather, self.ground) {
            (Weather::Rain, _) | (_, GroundCondition::Heavy) => 0.04,
            (_, GroundCondition::Soft) => 0.02,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conditions_are_neutral() {
        let c = Conditions::default();
        assert_eq!(c.accuracy_factor(), 1.0);
        assert_eq!(c.fatigue_factor(), 1.0);
        assert_eq!(c.injury_factor(), 1.0);
    }

    #[test]
    fn test_wet_heavy_day_hurts_accuracy_and_legs() {
        let c = Conditions { weather: Weather::Rain, ground: GroundCondition::Heavy };
        assert!(c.accuracy_factor() < 0.85);
        assert!(c.fatigue_factor() > 1.1);
        assert!(c.stoppage_bias() > 0.0);
    }
}
