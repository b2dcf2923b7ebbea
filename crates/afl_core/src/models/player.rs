use serde::{Deserialize, Serialize};
use tracing::warn;

/// Value substituted for an attribute the roster feed did not provide.
pub const NEUTRAL_ATTRIBUTE: u8 = 50;

/// On-field position as named on a team sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// Full back
    FB,
    /// Back pocket
    BP,
    /// Centre half back
    CHB,
    /// Half back flank
    HBF,
    /// Wing
    W,
    /// Centre
    C,
    /// Ruck
    R,
    /// Ruck rover
    RR,
    /// Rover
    ROV,
    /// Half forward flank
    HFF,
    /// Centre half forward
    CHF,
    /// Forward pocket
    FP,
    /// Full forward
    FF,
    /// Utility, no fixed line
    UT,
}

/// Positional line a player belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    Defence,
    Midfield,
    Ruck,
    Forward,
    Utility,
}

impl Position {
    pub fn line(&self) -> Line {
        match self {
            Position::FB | Position::BP | Position::CHB | Position::HBF => Line::Defence,
            Position::W | Position::C | Position::RR | Position::ROV => Line::Midfield,
            Position::R => Line::Ruck,
            Position::HFF | Position::CHF | Position::FP | Position::FF => Line::Forward,
            Position::UT => Line::Utility,
        }
    }

    pub fn is_defender(&self) -> bool {
        self.line() == Line::Defence
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(self.line(), Line::Midfield | Line::Ruck)
    }

    pub fn is_forward(&self) -> bool {
        self.line() == Line::Forward
    }
}

/// Attribute identifiers, used by rating weight tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Kicking,
    Handball,
    Marking,
    Clearance,
    Strength,
    Speed,
    Endurance,
    Durability,
    WorkRate,
    Positioning,
    DecisionMaking,
    Tackling,
    Accuracy,
}

impl Attribute {
    pub const ALL: [Attribute; 13] = [
        Attribute::Kicking,
        Attribute::Handball,
        Attribute::Marking,
        Attribute::Clearance,
        Attribute::Strength,
        Attribute::Speed,
        Attribute::Endurance,
        Attribute::Durability,
        Attribute::WorkRate,
        Attribute::Positioning,
        Attribute::DecisionMaking,
        Attribute::Tackling,
        Attribute::Accuracy,
    ];
}

/// Fully resolved attribute record (0..=100 each).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAttributes {
    pub kicking: u8,
    pub handball: u8,
    pub marking: u8,
    pub clearance: u8,
    pub strength: u8,
    pub speed: u8,
    pub endurance: u8,
    pub durability: u8,
    pub work_rate: u8,
    pub positioning: u8,
    pub decision_making: u8,
    pub tackling: u8,
    /// Goal kicking accuracy
    pub accuracy: u8,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self::uniform(NEUTRAL_ATTRIBUTE)
    }
}

impl PlayerAttributes {
    pub fn uniform(value: u8) -> Self {
        let v = value.min(100);
        Self {
            kicking: v,
            handball: v,
            marking: v,
            clearance: v,
            strength: v,
            speed: v,
            endurance: v,
            durability: v,
            work_rate: v,
            positioning: v,
            decision_making: v,
            tackling: v,
            accuracy: v,
        }
    }

    #[inline]
    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Kicking => self.kicking,
            Attribute::Handball => self.handball,
            Attribute::Marking => self.marking,
            Attribute::Clearance => self.clearance,
            Attribute::Strength => self.strength,
            Attribute::Speed => self.speed,
            Attribute::Endurance => self.endurance,
            Attribute::Durability => self.durability,
            Attribute::WorkRate => self.work_rate,
            Attribute::Positioning => self.positioning,
            Attribute::DecisionMaking => self.decision_making,
            Attribute::Tackling => self.tackling,
            Attribute::Accuracy => self.accuracy,
        }
    }

    /// Attribute scaled to 0.0..=1.0
    #[inline]
    pub fn normalized(&self, attribute: Attribute) -> f32 {
        self.get(attribute).min(100) as f32 / 100.0
    }

    pub fn set(&mut self, attribute: Attribute, value: u8) {
        let v = value.min(100);
        match attribute {
            Attribute::Kicking => self.kicking = v,
            Attribute::Handball => self.handball = v,
            Attribute::Marking => self.marking = v,
            Attribute::Clearance => self.clearance = v,
            Attribute::Strength => self.strength = v,
            Attribute::Speed => self.speed = v,
            Attribute::Endurance => self.endurance = v,
            Attribute::Durability => self.durability = v,
            Attribute::WorkRate => self.work_rate = v,
            Attribute::Positioning => self.positioning = v,
            Attribute::DecisionMaking => self.decision_making = v,
            Attribute::Tackling => self.tackling = v,
            Attribute::Accuracy => self.accuracy = v,
        }
    }

    /// Plain mean of every attribute, used for reporting only.
    pub fn overall(&self) -> f32 {
        let sum: u32 = Attribute::ALL.iter().map(|a| self.get(*a) as u32).sum();
        sum as f32 / Attribute::ALL.len() as f32
    }
}

/// Attribute record as delivered by the roster feed; any field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RawAttributes {
    pub kicking: Option<u8>,
    pub handball: Option<u8>,
    pub marking: Option<u8>,
    pub clearance: Option<u8>,
    pub strength: Option<u8>,
    pub speed: Option<u8>,
    pub endurance: Option<u8>,
    pub durability: Option<u8>,
    pub work_rate: Option<u8>,
    pub positioning: Option<u8>,
    pub decision_making: Option<u8>,
    pub tackling: Option<u8>,
    pub accuracy: Option<u8>,
}

impl RawAttributes {
    fn field(&self, attribute: Attribute) -> Option<u8> {
        match attribute {
            Attribute::Kicking => self.kicking,
            Attribute::Handball => self.handball,
            Attribute::Marking => self.marking,
            Attribute::Clearance => self.clearance,
            Attribute::Strength => self.strength,
            Attribute::Speed => self.speed,
            Attribute::Endurance => self.endurance,
            Attribute::Durability => self.durability,
            Attribute::WorkRate => self.work_rate,
            Attribute::Positioning => self.positioning,
            Attribute::DecisionMaking => self.decision_making,
            Attribute::Tackling => self.tackling,
            Attribute::Accuracy => self.accuracy,
        }
    }

    /// Fill gaps with `NEUTRAL_ATTRIBUTE`, returning the attributes that were missing.
    pub fn resolve(&self) -> (PlayerAttributes, Vec<Attribute>) {
        let mut resolved = PlayerAttributes::default();
        let mut missing = Vec::new();
        for attribute in Attribute::ALL {
            match self.field(attribute) {
                Some(v) => resolved.set(attribute, v),
                None => missing.push(attribute),
            }
        }
        (resolved, missing)
    }
}

impl From<PlayerAttributes> for RawAttributes {
    fn from(a: PlayerAttributes) -> Self {
        Self {
            kicking: Some(a.kicking),
            handball: Some(a.handball),
            marking: Some(a.marking),
            clearance: Some(a.clearance),
            strength: Some(a.strength),
            speed: Some(a.speed),
            endurance: Some(a.endurance),
            durability: Some(a.durability),
            work_rate: Some(a.work_rate),
            positioning: Some(a.positioning),
            decision_making: Some(a.decision_making),
            tackling: Some(a.tackling),
            accuracy: Some(a.accuracy),
        }
    }
}

/// Static player record consumed from the roster collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerProfile {
    pub id: u32,
    pub name: String,
    pub position: Position,
    #[serde(default = "default_age")]
    pub age: u8,
    /// Injuries sustained over the recent window, supplied by the season history service.
    #[serde(default)]
    pub recent_injuries: u8,
    pub attributes: Option<RawAttributes>,
}

fn default_age() -> u8 {
    25
}

impl PlayerProfile {
    pub fn new(id: u32, name: impl Into<String>, position: Position, attributes: PlayerAttributes) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            age: default_age(),
            recent_injuries: 0,
            attributes: Some(attributes.into()),
        }
    }

    /// Resolve the attribute record, logging every gap that fell back to neutral.
    ///
    /// Returns `None` only when the whole record is absent.
    pub fn resolved_attributes(&self) -> Option<PlayerAttributes> {
        let raw = self.attributes.as_ref()?;
        let (resolved, missing) = raw.resolve();
        for attribute in missing {
            warn!(
                player_id = self.id,
                player = %self.name,
                ?attribute,
                "missing attribute, using neutral default {}",
                NEUTRAL_ATTRIBUTE
            );
        }
        Some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_lines() {
        assert_eq!(Position::FB.line(), Line::Defence);
        assert_eq!(Position::R.line(), Line::Ruck);
        assert!(Position::R.is_midfielder());
        assert!(Position::ROV.is_midfielder());
        assert!(Position::FF.is_forward());
        assert!(!Position::UT.is_forward());
    }

    #[test]
    fn test_raw_attributes_fill_gaps_with_neutral() {
        let raw = RawAttributes { kicking: Some(80), accuracy: Some(10), ..Default::default() };
        let (resolved, missing) = raw.resolve();
        assert_eq!(resolved.kicking, 80);
        assert_eq!(resolved.accuracy, 10);
        assert_eq!(resolved.marking, NEUTRAL_ATTRIBUTE);
        assert_eq!(missing.len(), Attribute::ALL.len() - 2);
        assert!(!missing.contains(&Attribute::Kicking));
    }

    #[test]
    fn test_attributes_clamped_to_100() {
        let mut a = PlayerAttributes::uniform(250);
        assert_eq!(a.speed, 100);
        a.set(Attribute::Speed, 180);
        assert_eq!(a.get(Attribute::Speed), 100);
        assert!((a.normalized(Attribute::Speed) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_profile_without_record_is_none() {
        let mut p = PlayerProfile::new(1, "A", Position::C, PlayerAttributes::default());
        assert!(p.resolved_attributes().is_some());
        p.attributes = None;
        assert!(p.resolved_attributes().is_none());
    }

    #[test]
    fn test_position_serde_codes() {
        let json = serde_json::to_string(&Position::CHF).unwrap();
        assert_eq!(json, "\"CHF\"");
        let back: Position = serde_json::from_str("\"ROV\"").unwrap();
        assert_eq!(back, Position::ROV);
    }
}
