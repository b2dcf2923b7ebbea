//! Match format: clock, squad sizes, breaks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of quarters
    pub quarters: u8,
    /// Quarter length in seconds of game clock
    pub quarter_length_secs: u32,
    /// Fixed tick size in milliseconds
    pub tick_ms: u32,
    /// Players on the ground per side
    pub on_field_count: usize,
    /// Maximum interchange players per side
    pub max_bench: usize,
    /// Recovery time credited at quarter and three-quarter time
    pub quarter_break_secs: u32,
    /// Recovery time credited at half time
    pub half_time_break_secs: u32,
    /// Logit bias for the home side in every contest
    pub home_advantage: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            quarters: 4,
            quarter_length_secs: 1200,
            tick_ms: 1000,
            on_field_count: 18,
            max_bench: 5,
            quarter_break_secs: 360,
            half_time_break_secs: 1200,
            home_advantage: 0.05,
        }
    }
}

impl MatchConfig {
    pub fn quarter_length_ms(&self) -> u64 {
        self.quarter_length_secs as u64 * 1000
    }

    pub fn tick_secs(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Nominal length of the whole match on the game clock.
    pub fn match_length_ms(&self) -> u64 {
        self.quarter_length_ms() * self.quarters as u64
    }

    /// Break following `quarter` (1-based). Half time follows the middle quarter.
    pub fn break_after(&self, quarter: u8) -> u32 {
        if self.quarters >= 2 && quarter == self.quarters / 2 {
            self.half_time_break_secs
        } else {
            self.quarter_break_secs
        }
    }
}
