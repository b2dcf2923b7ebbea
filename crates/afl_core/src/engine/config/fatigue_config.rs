//! Fatigue model parameters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FatigueConfig {
    /// Exponential decay rate toward the floor, per second on field (default: 0.0005)
    pub base_decay_per_sec: f32,
    /// Exponential recovery rate toward 1.0, per second on the bench (default: 0.004)
    pub bench_recovery_per_sec: f32,
    /// Recovery rate applied during quarter breaks (default: 0.003)
    pub break_recovery_per_sec: f32,
    /// Floor for a player with durability 0 (default: 0.55)
    pub floor_min: f32,
    /// Floor for a player with durability 100 (default: 0.80)
    pub floor_max: f32,
    /// How strongly work rate speeds decay (default: 0.5)
    pub work_rate_impact: f32,
    /// How strongly endurance slows decay (default: 0.5)
    pub endurance_impact: f32,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            base_decay_per_sec: 0.0005,
            bench_recovery_per_sec: 0.004,
            break_recovery_per_sec: 0.003,
            floor_min: 0.55,
            floor_max: 0.80,
            work_rate_impact: 0.5,
            endurance_impact: 0.5,
        }
    }
}
