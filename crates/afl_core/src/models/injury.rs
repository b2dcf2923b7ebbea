//! Injury value objects
//!
//! Produced by `engine::injury`, carried on events and in the per-player
//! match deltas handed to the season layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
    /// Treated on the bench, may return this match
    Minor,
    /// Out for the match, weeks of rest
    Moderate,
    /// Out for the match, long term
    Major,
}

impl InjurySeverity {
    /// Moderate and major injuries end the player's match.
    pub fn ends_match(&self) -> bool {
        !matches!(self, InjurySeverity::Minor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryType {
    Hamstring,
    Calf,
    Groin,
    Ankle,
    Knee,
    Shoulder,
    Concussion,
    Corked,
}

impl InjuryType {
    pub const ALL: [InjuryType; 8] = [
        InjuryType::Hamstring,
        InjuryType::Calf,
        InjuryType::Groin,
        InjuryType::Ankle,
        InjuryType::Knee,
        InjuryType::Shoulder,
        InjuryType::Concussion,
        InjuryType::Corked,
    ];

    /// Soft tissue injuries are the ones fatigue and ground hardness drive.
    pub fn is_soft_tissue(&self) -> bool {
        matches!(self, InjuryType::Hamstring | InjuryType::Calf | InjuryType::Groin)
    }
}

/// Resolved injury: what happened and what it costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryOutcome {
    pub severity: InjurySeverity,
    pub injury_type: InjuryType,
    /// Performance multiplier applied while the injury is active
    pub performance_multiplier: f32,
    /// Treatment time before a minor injury is cleared (0 otherwise)
    pub return_in_seconds: u32,
    /// Forced rest after the match (0 for minor)
    pub weeks_out: u8,
}

impl InjuryOutcome {
    #[inline]
    pub fn ends_match(&self) -> bool {
        self.severity.ends_match()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(InjurySeverity::Minor < InjurySeverity::Moderate);
        assert!(InjurySeverity::Moderate < InjurySeverity::Major);
        assert!(!InjurySeverity::Minor.ends_match());
        assert!(InjurySeverity::Major.ends_match());
    }

    #[test]
    fn test_outcome_wire_format() {
        let outcome = InjuryOutcome {
            severity: InjurySeverity::Moderate,
            injury_type: InjuryType::Hamstring,
            performance_multiplier: 0.5,
            return_in_seconds: 0,
            weeks_out: 3,
        };
        insta::assert_json_snapshot!(outcome, @r###"
        {
          "severity": "moderate",
          "injury_type": "hamstring",
          "performance_multiplier": 0.5,
          "return_in_seconds": 0,
          "weeks_out": 3
        }
        "###);
    }
}
