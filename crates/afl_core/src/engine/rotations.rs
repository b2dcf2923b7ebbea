//! Interchange logic
//!
//! Two kinds of swap between the field and the bench:
//! - forced: an injured-out player, or a minor injury that needs treatment,
//!   is replaced straight away by the freshest cleared bench player
//! - fatigue rotation: at center bounces and quarter breaks, players below
//!   the team's rotation threshold come off for fresher bench players
//!
//! Both prefer a bench player from the same line. A swap is a plain slot
//! exchange: the on-field roster keeps its size and the player coming off
//! takes the bench slot.
//!
//! With nobody cleared on the bench the team plays short: the injured player
//! stays in the slot and the selector skips them.

use tracing::debug;

use super::config::RotationConfig;
use super::context::TeamRuntime;
use super::player_runtime::PlayerRuntime;
use crate::models::{InterchangeReason, Line, TeamSide};

/// Which interchange window is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationWindow {
    Stoppage,
    QuarterBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interchange {
    pub side: TeamSide,
    pub player_off: u32,
    pub player_on: u32,
    pub reason: InterchangeReason,
}

#[derive(Debug, Clone)]
pub struct RotationPolicy {
    config: RotationConfig,
}

/// 2 for the same line, 1 when either side is a utility, 0 otherwise.
fn line_affinity(bench: Line, outgoing: Line) -> u8 {
    match (bench, outgoing) {
        (a, b) if a == b => 2,
        (Line::Midfield, Line::Ruck) | (Line::Ruck, Line::Midfield) => 2,
        (Line::Utility, _) | (_, Line::Utility) => 1,
        _ => 0,
    }
}

impl RotationPolicy {
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    /// Best cleared bench player to replace `outgoing`: same line first, then
    /// freshest, then bench order.
    fn find_replacement(bench: &[PlayerRuntime], outgoing: &PlayerRuntime, min_fatigue: f32) -> Option<usize> {
        let line = outgoing.position.line();
        let mut best: Option<(usize, u8, f32)> = None;
        for (i, candidate) in bench.iter().enumerate() {
            if !candidate.is_cleared() || candidate.fatigue_multiplier < min_fatigue {
                continue;
            }
            let affinity = line_affinity(candidate.position.line(), line);
            let better = match best {
                None => true,
                Some((_, best_affinity, best_fatigue)) => {
                    affinity > best_affinity
                        || (affinity == best_affinity && candidate.fatigue_multiplier > best_fatigue)
                }
            };
            if better {
                best = Some((i, affinity, candidate.fatigue_multiplier));
            }
        }
        best.map(|(i, _, _)| i)
    }

    fn swap(team: &mut TeamRuntime, slot: usize, bench_slot: usize, reason: InterchangeReason) -> Interchange {
        std::mem::swap(&mut team.on_field[slot], &mut team.bench[bench_slot]);
        team.interchanges = team.interchanges.saturating_add(1);
        let change = Interchange {
            side: team.side,
            player_off: team.bench[bench_slot].id,
            player_on: team.on_field[slot].id,
            reason,
        };
        debug!(side = ?change.side, off = change.player_off, on = change.player_on, ?reason, "interchange");
        change
    }

    /// Replace injured-out players and players who need treatment.
    /// Forced swaps ignore the match cap but count toward it.
    pub fn process_forced(&self, team: &mut TeamRuntime, out: &mut Vec<Interchange>) -> usize {
        let mut made = 0;
        for slot in 0..team.on_field.len() {
            let player = &team.on_field[slot];
            let reason = if player.injured_out {
                InterchangeReason::Injury
            } else if player.return_in_ms > 0 {
                InterchangeReason::Treatment
            } else {
                continue;
            };
            let Some(bench_slot) = Self::find_replacement(&team.bench, player, 0.0) else {
                continue;
            };
            out.push(Self::swap(team, slot, bench_slot, reason));
            made += 1;
        }
        made
    }

    /// Rotate tired players with fresher bench players, within the window and
    /// match caps.
    pub fn process_fatigue_rotations(
        &self,
        team: &mut TeamRuntime,
        window: RotationWindow,
        out: &mut Vec<Interchange>,
    ) -> usize {
        let window_cap = match window {
            RotationWindow::Stoppage => self.config.max_per_stoppage,
            RotationWindow::QuarterBreak => self.config.max_per_break,
        };
        let reason = match window {
            RotationWindow::Stoppage => InterchangeReason::Fatigue,
            RotationWindow::QuarterBreak => InterchangeReason::QuarterBreak,
        };
        let threshold = team.tactics.rotation_threshold;

        let mut made = 0;
        while made < window_cap && team.interchanges < self.config.max_per_match {
            // Most tired cleared player under the threshold, slot order on ties
            let tired = team
                .on_field
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_cleared() && p.fatigue_multiplier < threshold)
                .fold(None::<(usize, f32)>, |acc, (i, p)| match acc {
                    Some((_, f)) if f <= p.fatigue_multiplier => acc,
                    _ => Some((i, p.fatigue_multiplier)),
                });
            let Some((slot, fatigue)) = tired else {
                break;
            };
            let needed = fatigue + self.config.min_freshness_gain;
            let Some(bench_slot) = Self::find_replacement(&team.bench, &team.on_field[slot], needed) else {
                break;
            };
            out.push(Self::swap(team, slot, bench_slot, reason));
            made += 1;
        }
        made
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::context::MatchContext;
    use crate::engine::test_fixtures::equal_setup;

    fn home_team() -> TeamRuntime {
        let ctx = MatchContext::new(&equal_setup(1), &EngineConfig::default()).unwrap();
        ctx.team(TeamSide::Home).clone()
    }

    fn policy() -> RotationPolicy {
        RotationPolicy::new(RotationConfig::default())
    }

    #[test]
    fn test_injured_player_replaced_by_same_line() {
        let mut team = home_team();
        // slot 4 is a half back flank; bench slot 2 is the HBF
        team.on_field[4].injured_out = true;
        let injured_id = team.on_field[4].id;
        let mut out = Vec::new();
        assert_eq!(policy().process_forced(&mut team, &mut out), 1);
        assert_eq!(out[0].player_off, injured_id);
        assert_eq!(out[0].reason, InterchangeReason::Injury);
        assert_eq!(team.on_field[4].id, 121);
        assert!(team.bench[2].injured_out);
        assert_eq!(team.interchanges, 1);

        // The injured player never comes back
        out.clear();
        assert_eq!(policy().process_forced(&mut team, &mut out), 0);
    }

    #[test]
    fn test_team_plays_short_without_cleared_bench() {
        let mut team = home_team();
        for p in team.bench.iter_mut() {
            p.injured_out = true;
        }
        team.on_field[0].injured_out = true;
        let mut out = Vec::new();
        assert_eq!(policy().process_forced(&mut team, &mut out), 0);
        assert!(team.on_field[0].injured_out);
        assert_eq!(team.active_count(), 17);
    }

    #[test]
    fn test_treatment_swap() {
        let mut team = home_team();
        team.on_field[8].return_in_ms = 60_000;
        let mut out = Vec::new();
        policy().process_forced(&mut team, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].reason, InterchangeReason::Treatment);
        assert!(team.on_field[8].is_cleared());
    }

    #[test]
    fn test_fatigue_rotation_respects_window_cap() {
        let mut team = home_team();
        for slot in [3, 6, 12] {
            team.on_field[slot].fatigue_multiplier = 0.7;
        }
        team.on_field[6].fatigue_multiplier = 0.65;
        let mut out = Vec::new();
        let made = policy().process_fatigue_rotations(&mut team, RotationWindow::Stoppage, &mut out);
        assert_eq!(made, 2);
        // most tired first
        assert_eq!(out[0].player_off, 107);
        assert!(out.iter().all(|c| c.reason == InterchangeReason::Fatigue));
    }

    #[test]
    fn test_no_rotation_without_fresher_bench() {
        let mut team = home_team();
        team.on_field[0].fatigue_multiplier = 0.8;
        for p in team.bench.iter_mut() {
            p.fatigue_multiplier = 0.82;
        }
        let mut out = Vec::new();
        assert_eq!(policy().process_fatigue_rotations(&mut team, RotationWindow::QuarterBreak, &mut out), 0);
    }

    #[test]
    fn test_match_cap() {
        let mut team = home_team();
        team.interchanges = RotationConfig::default().max_per_match;
        team.on_field[0].fatigue_multiplier = 0.6;
        let mut out = Vec::new();
        assert_eq!(policy().process_fatigue_rotations(&mut team, RotationWindow::QuarterBreak, &mut out), 0);
    }
}
