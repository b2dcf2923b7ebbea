//! Injury Model
//!
//! Stateless: every call is a pure function of the players, the phase, the
//! conditions and the shared match RNG.
//!
//! ## Risk per player-second
//! ```text
//! p = base × phase × fatigue × durability × age × recurrence × ground
//! ```
//!
//! ## Resolution (three rolls)
//! 1. trigger: `rng < p·dt`
//! 2. severity: cumulative thresholds (minor / moderate / major), shifted
//!    toward worse outcomes as the player tires
//! 3. injury type

use super::config::InjuryConfig;
use super::phase::Phase;
use super::player_runtime::PlayerRuntime;
use super::rng::MatchRng;
use crate::models::{Attribute, Conditions, InjuryOutcome, InjurySeverity, InjuryType};

/// Risk multipliers for one player at one moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InjuryRiskProfile {
    pub phase_scale: f32,
    pub fatigue_scale: f32,
    pub durability_scale: f32,
    pub age_scale: f32,
    pub recurrence_scale: f32,
    pub ground_scale: f32,
}

impl InjuryRiskProfile {
    pub fn for_player(
        player: &PlayerRuntime,
        phase: Phase,
        conditions: &Conditions,
        config: &InjuryConfig,
    ) -> Self {
        let durability = player.attributes.normalized(Attribute::Durability);
        let years_past_onset = player.age.saturating_sub(config.age_risk_onset) as f32;
        let recent = player.recent_injuries.min(config.recurrence_cap) as f32;
        Self {
            phase_scale: config.phase_multiplier(phase),
            fatigue_scale: 1.0 + config.fatigue_weight * (1.0 - player.fatigue_multiplier).max(0.0),
            durability_scale: config.durability_scale_max
                + (config.durability_scale_min - config.durability_scale_max) * durability,
            age_scale: 1.0 + config.age_risk_per_year * years_past_onset,
            recurrence_scale: 1.0 + config.recurrence_per_injury * recent,
            ground_scale: conditions.injury_factor(),
        }
    }

    /// Product of every multiplier.
    pub fn multiplier(&self) -> f32 {
        self.phase_scale
            * self.fatigue_scale
            * self.durability_scale
            * self.age_scale
            * self.recurrence_scale
            * self.ground_scale
    }

    pub fn risk_per_second(&self, config: &InjuryConfig) -> f32 {
        config.base_risk_per_second * self.multiplier()
    }
}

/// Instantaneous injury probability per second.
pub fn risk_per_second(
    player: &PlayerRuntime,
    phase: Phase,
    conditions: &Conditions,
    config: &InjuryConfig,
) -> f32 {
    InjuryRiskProfile::for_player(player, phase, conditions, config).risk_per_second(config)
}

/// Probability of at least one injury over `secs` seconds in an unchanging state.
pub fn accumulated_risk(
    player: &PlayerRuntime,
    phase: Phase,
    conditions: &Conditions,
    config: &InjuryConfig,
    secs: f32,
) -> f32 {
    let p = risk_per_second(player, phase, conditions, config).clamp(0.0, 1.0) as f64;
    (1.0 - (1.0 - p).powf(secs.max(0.0) as f64)) as f32
}

/// Injury raised during a `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct SustainedInjury {
    /// Index into the on-field roster passed to `step`
    pub slot: usize,
    pub player_id: u32,
    pub outcome: InjuryOutcome,
}

#[derive(Debug, Clone)]
pub struct InjuryModel {
    config: InjuryConfig,
}

impl InjuryModel {
    pub fn new(config: InjuryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InjuryConfig {
        &self.config
    }

    /// Advance treatment timers and roll for new injuries. Returns the number
    /// of injuries pushed to `out`.
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &self,
        on_field: &mut [PlayerRuntime],
        bench: &mut [PlayerRuntime],
        phase: Phase,
        dt_secs: f32,
        conditions: &Conditions,
        rng: &mut MatchRng,
        out: &mut Vec<SustainedInjury>,
    ) -> usize {
        let dt_ms = (dt_secs * 1000.0).round() as u64;
        for player in on_field.iter_mut().chain(bench.iter_mut()) {
            self.advance_treatment(player, dt_ms, dt_secs);
        }

        let mut count = 0;
        for (slot, player) in on_field.iter_mut().enumerate() {
            if !player.is_available() {
                continue;
            }
            let p = risk_per_second(player, phase, conditions, &self.config) * dt_secs;
            if !rng.roll(p) {
                continue;
            }
            let outcome = self.resolve(player, rng);
            apply_outcome(player, &outcome);
            out.push(SustainedInjury { slot, player_id: player.id, outcome });
            count += 1;
        }
        count
    }

    fn advance_treatment(&self, player: &mut PlayerRuntime, dt_ms: u64, dt_secs: f32) {
        if player.injured_out {
            return;
        }
        if player.return_in_ms > 0 {
            player.return_in_ms = player.return_in_ms.saturating_sub(dt_ms);
        } else if player.injury_multiplier < 1.0 {
            player.injury_multiplier =
                (player.injury_multiplier + self.config.minor_recovery_per_sec * dt_secs).min(1.0);
        }
    }

    /// Severity and type rolls for a triggered injury.
    pub fn resolve(&self, player: &PlayerRuntime, rng: &mut MatchRng) -> InjuryOutcome {
        let cfg = &self.config;
        let shift = cfg.fatigue_severity_shift * tiredness(player);
        let minor_cut = (cfg.minor_threshold - shift).max(0.0);
        let moderate_cut = (cfg.moderate_threshold - shift).max(minor_cut);

        let roll = rng.next_float();
        let severity = if roll < minor_cut {
            InjurySeverity::Minor
        } else if roll < moderate_cut {
            InjurySeverity::Moderate
        } else {
            InjurySeverity::Major
        };
        let injury_type = InjuryType::ALL[rng.pick_index(InjuryType::ALL.len())];

        match severity {
            InjurySeverity::Minor => InjuryOutcome {
                severity,
                injury_type,
                performance_multiplier: cfg.minor_performance,
                return_in_seconds: inclusive_u32(rng, cfg.minor_return_min_secs, cfg.minor_return_max_secs),
                weeks_out: 0,
            },
            InjurySeverity::Moderate => InjuryOutcome {
                severity,
                injury_type,
                performance_multiplier: cfg.moderate_performance,
                return_in_seconds: 0,
                weeks_out: inclusive_u8(rng, cfg.moderate_weeks_min, cfg.moderate_weeks_max),
            },
            InjurySeverity::Major => InjuryOutcome {
                severity,
                injury_type,
                performance_multiplier: cfg.major_performance,
                return_in_seconds: 0,
                weeks_out: inclusive_u8(rng, cfg.major_weeks_min, cfg.major_weeks_max),
            },
        }
    }
}

/// Share of the available fatigue range used up, 0 (fresh) to 1 (at floor).
fn tiredness(player: &PlayerRuntime) -> f32 {
    let range = 1.0 - player.fatigue_floor();
    if range <= f32::EPSILON {
        return 0.0;
    }
    ((1.0 - player.fatigue_multiplier) / range).clamp(0.0, 1.0)
}

fn apply_outcome(player: &mut PlayerRuntime, outcome: &InjuryOutcome) {
    player.injury_multiplier = player.injury_multiplier.min(outcome.performance_multiplier).clamp(0.0, 1.0);
    if outcome.ends_match() {
        player.injured_out = true;
        player.return_in_ms = 0;
    } else {
        player.return_in_ms = player.return_in_ms.max(outcome.return_in_seconds as u64 * 1000);
    }
    let worse = match &player.injury {
        Some(existing) => outcome.severity > existing.severity,
        None => true,
    };
    if worse {
        player.injury = Some(outcome.clone());
    }
}

fn inclusive_u32(rng: &mut MatchRng, min: u32, max: u32) -> u32 {
    let lo = min.min(i32::MAX as u32) as i32;
    let hi = max.min(i32::MAX as u32 - 1) as i32;
    rng.next_int(lo, hi + 1) as u32
}

fn inclusive_u8(rng: &mut MatchRng, min: u8, max: u8) -> u8 {
    rng.next_int(min as i32, max as i32 + 1) as u8
}
