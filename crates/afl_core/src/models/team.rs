use serde::{Deserialize, Serialize};

use super::player::PlayerProfile;

/// Team-level game plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TacticalStyle {
    #[default]
    Balanced,
    /// Direct ball movement, more forward entries, leakier behind the ball
    Attacking,
    /// Extra numbers behind the ball, fewer entries
    Defensive,
    /// High pressure around the ball, forces turnovers at a fatigue cost
    Pressing,
}

/// Logit-scale biases and wear factor a style contributes to phase resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleModifiers {
    /// Added when this team tries to advance the ball
    pub advance_bias: f32,
    /// Added when this team defends an advance
    pub defend_bias: f32,
    /// Added to the chance this team forces a turnover in open play
    pub pressure_bias: f32,
    /// Multiplier on fatigue decay rate
    pub fatigue_scale: f32,
}

impl TacticalStyle {
    pub fn modifiers(&self) -> StyleModifiers {
        match self {
            TacticalStyle::Balanced => StyleModifiers {
                advance_bias: 0.0,
                defend_bias: 0.0,
                pressure_bias: 0.0,
                fatigue_scale: 1.0,
            },
            TacticalStyle::Attacking => StyleModifiers {
                advance_bias: 0.15,
                defend_bias: -0.10,
                pressure_bias: 0.0,
                fatigue_scale: 1.05,
            },
            TacticalStyle::Defensive => StyleModifiers {
                advance_bias: -0.10,
                defend_bias: 0.15,
                pressure_bias: 0.0,
                fatigue_scale: 0.95,
            },
            TacticalStyle::Pressing => StyleModifiers {
                advance_bias: 0.0,
                defend_bias: 0.05,
                pressure_bias: 0.20,
                fatigue_scale: 1.15,
            },
        }
    }
}

/// Tactical configuration supplied with a team sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tactics {
    pub style: TacticalStyle,
    /// Fatigue multiplier below which a player is rotated at the next window
    pub rotation_threshold: f32,
}

impl Default for Tactics {
    fn default() -> Self {
        Self { style: TacticalStyle::Balanced, rotation_threshold: 0.82 }
    }
}

/// Selected squad for one match: ordered on-field players plus the bench.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamSheet {
    pub id: u32,
    pub name: String,
    pub on_field: Vec<PlayerProfile>,
    #[serde(default)]
    pub bench: Vec<PlayerProfile>,
    #[serde(default)]
    pub tactics: Tactics,
}

impl TeamSheet {
    pub fn squad_size(&self) -> usize {
        self.on_field.len() + self.bench.len()
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerProfile> {
        self.on_field.iter().chain(self.bench.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_is_neutral() {
        let m = TacticalStyle::Balanced.modifiers();
        assert_eq!(m.advance_bias, 0.0);
        assert_eq!(m.defend_bias, 0.0);
        assert_eq!(m.fatigue_scale, 1.0);
    }

    #[test]
    fn test_pressing_costs_fatigue() {
        let pressing = TacticalStyle::Pressing.modifiers();
        assert!(pressing.fatigue_scale > 1.0);
        assert!(pressing.pressure_bias > 0.0);
    }

    #[test]
    fn test_tactics_deserialize_with_defaults() {
        let t: Tactics = serde_json::from_str(r#"{"style":"attacking"}"#).unwrap();
        assert_eq!(t.style, TacticalStyle::Attacking);
        assert!((t.rotation_threshold - 0.82).abs() < f32::EPSILON);
    }
}
