use serde::{Deserialize, Serialize};

use super::match_setup::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Goal,
    Behind,
}

impl ScoreKind {
    #[inline]
    pub const fn points(&self) -> u16 {
        match self {
            ScoreKind::Goal => 6,
            ScoreKind::Behind => 1,
        }
    }
}

/// Goals, behinds and total points for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreLine {
    pub goals: u16,
    pub behinds: u16,
    pub points: u16,
}

impl ScoreLine {
    pub fn new(goals: u16, behinds: u16) -> Self {
        Self { goals, behinds, points: goals * 6 + behinds }
    }

    pub fn add(&mut self, kind: ScoreKind) {
        match kind {
            ScoreKind::Goal => self.goals += 1,
            ScoreKind::Behind => self.behinds += 1,
        }
        self.points += kind.points();
    }
}

impl std::fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} ({})", self.goals, self.behinds, self.points)
    }
}

/// One entry of the score log. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub kind: ScoreKind,
    pub side: TeamSide,
    pub game_time_ms: u64,
    pub quarter: u8,
    /// Score lines after this event
    pub home: ScoreLine,
    pub away: ScoreLine,
    /// Home points minus away points after this event
    pub margin: i32,
}

impl ScoreEvent {
    pub fn line(&self, side: TeamSide) -> ScoreLine {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    /// Side ahead after this event, `None` when level.
    pub fn leader(&self) -> Option<TeamSide> {
        leader_for_margin(self.margin)
    }

    /// Margin from `side`'s point of view.
    pub fn margin_for(&self, side: TeamSide) -> i32 {
        match side {
            TeamSide::Home => self.margin,
            TeamSide::Away => -self.margin,
        }
    }
}

pub fn leader_for_margin(margin: i32) -> Option<TeamSide> {
    match margin.signum() {
        1 => Some(TeamSide::Home),
        -1 => Some(TeamSide::Away),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_line_points() {
        let mut line = ScoreLine::default();
        line.add(ScoreKind::Goal);
        line.add(ScoreKind::Goal);
        line.add(ScoreKind::Behind);
        assert_eq!(line, ScoreLine::new(2, 1));
        assert_eq!(line.points, 13);
        assert_eq!(line.to_string(), "2.1 (13)");
    }

    #[test]
    fn test_leader_for_margin() {
        assert_eq!(leader_for_margin(5), Some(TeamSide::Home));
        assert_eq!(leader_for_margin(-1), Some(TeamSide::Away));
        assert_eq!(leader_for_margin(0), None);
    }
}
