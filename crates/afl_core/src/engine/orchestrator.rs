//! Match Orchestrator
//!
//! Owns the clock and the phase state machine. Every tick runs the same
//! fixed sequence:
//!
//! ```text
//! cancel? ─► clock ─► fatigue ─► injuries ─► forced interchanges
//!        ─► phase complete? ─► resolve (selection + rating) ─► score/momentum/milestones
//!        ─► next phase (rotations at center bounces) ─► pattern window
//!        ─► quarter boundary
//! ```
//!
//! The official clock stops at each buzzer. A phase in progress at the buzzer
//! runs to completion (its score counts); events produced during that overrun
//! carry the buzzer time and the overrun is reported in the quarter summary.

use std::mem;

use tracing::{debug, info, trace};

use super::cancel::CancelToken;
use super::config::EngineConfig;
use super::context::MatchContext;
use super::fatigue::FatigueModel;
use super::injury::{InjuryModel, SustainedInjury};
use super::milestones::{milestones_at, PatternTracker};
use super::phase::{Phase, PhaseCategory, PhaseTimes};
use super::rating::RatingEngine;
use super::rotations::{Interchange, RotationPolicy, RotationWindow};
use super::selection::UnitSelector;
use super::sink::{EventEmitter, MatchEventSink};
use crate::error::Result;
use crate::models::score::leader_for_margin;
use crate::models::{
    Attribute, EventKind, MatchResult, MatchSetup, MatchStatistics, Milestone, PlayerMatchDelta,
    QuarterSummary, ScoreKind, ScoringPattern, TeamSide,
};

/// Runs one match to completion (or cancellation).
pub struct MatchEngine<'s> {
    config: EngineConfig,
    sink: &'s mut dyn MatchEventSink,
    cancel: CancelToken,
}

impl<'s> MatchEngine<'s> {
    /// Fails on an invalid config before anything runs.
    pub fn new(config: EngineConfig, sink: &'s mut dyn MatchEventSink) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, sink, cancel: CancelToken::new() })
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// The context may have been built under another config; its rosters must
    /// still fit this one.
    pub fn run(self, ctx: MatchContext) -> Result<MatchResult> {
        let MatchEngine { config, sink, cancel } = self;
        ctx.check_rules(&config)?;
        Ok(Simulation::new(&config, ctx, sink, cancel).run())
    }
}

/// Validate, build the context and run.
pub fn simulate_match(
    setup: &MatchSetup,
    config: &EngineConfig,
    sink: &mut dyn MatchEventSink,
) -> Result<MatchResult> {
    simulate_match_with_cancel(setup, config, sink, CancelToken::new())
}

pub fn simulate_match_with_cancel(
    setup: &MatchSetup,
    config: &EngineConfig,
    sink: &mut dyn MatchEventSink,
    cancel: CancelToken,
) -> Result<MatchResult> {
    let ctx = MatchContext::new(setup, config)?;
    MatchEngine::new(config.clone(), sink)?.with_cancel_token(cancel).run(ctx)
}

// ========== Simulation state ==========

struct Simulation<'c, 's> {
    config: &'c EngineConfig,
    ctx: MatchContext,
    emitter: EventEmitter<'s>,
    cancel: CancelToken,

    selectors: [UnitSelector; 2],
    rating: RatingEngine,
    fatigue: FatigueModel,
    injury: InjuryModel,
    rotations: RotationPolicy,
    patterns: PatternTracker,

    stats: MatchStatistics,
    quarters: Vec<QuarterSummary>,
    phase_times: PhaseTimes,
    quarter_length_ms: u64,
    ticks: u64,

    // Scratch buffers, reused every tick
    injury_buf: Vec<SustainedInjury>,
    interchange_buf: Vec<Interchange>,
    milestone_buf: Vec<Milestone>,
    pattern_buf: Vec<ScoringPattern>,
}

impl<'c, 's> Simulation<'c, 's> {
    fn new(config: &'c EngineConfig, ctx: MatchContext, sink: &'s mut dyn MatchEventSink, cancel: CancelToken) -> Self {
        let roster = config.match_rules.on_field_count;
        let max_unit = PhaseCategory::ALL.iter().map(|c| config.phase.unit_size(*c)).max().unwrap_or(0);
        let selector = || UnitSelector::new(config.rating.clone(), roster, max_unit);
        Self {
            config,
            ctx,
            emitter: EventEmitter::new(sink),
            cancel,
            selectors: [selector(), selector()],
            rating: RatingEngine::new(config.rating.clone()),
            fatigue: FatigueModel::new(config.fatigue.clone()),
            injury: InjuryModel::new(config.injury.clone()),
            rotations: RotationPolicy::new(config.rotation.clone()),
            patterns: PatternTracker::new(&config.milestones),
            stats: MatchStatistics::default(),
            quarters: Vec::with_capacity(config.match_rules.quarters as usize),
            phase_times: PhaseTimes::default(),
            quarter_length_ms: config.match_rules.quarter_length_ms(),
            ticks: 0,
            injury_buf: Vec::new(),
            interchange_buf: Vec::new(),
            milestone_buf: Vec::new(),
            pattern_buf: Vec::new(),
        }
    }

    fn run(mut self) -> MatchResult {
        info!(
            match_id = self.ctx.fixture.match_id,
            round = self.ctx.fixture.round,
            seed = self.ctx.seed(),
            home = %self.ctx.teams[0].name,
            away = %self.ctx.teams[1].name,
            "match start"
        );

        self.emit(EventKind::QuarterStart);
        self.start_quarter_phase();

        let completed = loop {
            if self.cancel.is_cancelled() {
                self.cancel_match();
                break false;
            }
            if !self.tick() {
                continue;
            }
            self.end_quarter();
            if self.ctx.quarter >= self.config.match_rules.quarters {
                break true;
            }
            self.quarter_break();
        };

        self.finish(completed)
    }

    #[inline]
    fn game_time(&self) -> u64 {
        self.ctx.game_time_ms(self.quarter_length_ms)
    }

    fn emit(&mut self, kind: EventKind) {
        let time = self.game_time();
        self.emitter.emit(time, self.ctx.quarter, kind);
    }

    /// One tick. Returns true when the quarter has ended.
    fn tick(&mut self) -> bool {
        self.ticks += 1;
        let tick_ms = self.config.match_rules.tick_ms as u64;
        let dt = self.config.match_rules.tick_secs();
        self.ctx.quarter_elapsed_ms += tick_ms;
        self.ctx.phase_elapsed_ms += tick_ms;

        self.apply_fatigue(dt);
        self.apply_injuries(dt);
        self.apply_forced_interchanges();

        let mut quarter_over = false;
        if self.ctx.phase_elapsed_ms >= self.ctx.phase_duration_ms {
            self.phase_times.add(self.ctx.phase, self.ctx.phase_elapsed_ms);
            let (next, possession) = self.resolve_phase();
            if self.ctx.quarter_elapsed_ms >= self.quarter_length_ms {
                quarter_over = true;
            } else {
                self.enter_phase(next, possession);
            }
        }

        let now = self.game_time();
        let mut patterns = mem::take(&mut self.pattern_buf);
        self.patterns.poll(now, &mut patterns);
        for pattern in patterns.drain(..) {
            self.emit(EventKind::Pattern { pattern });
        }
        self.pattern_buf = patterns;

        quarter_over
    }

    // ========== Players ==========

    fn apply_fatigue(&mut self, dt: f32) {
        let phase_intensity = self.config.phase.intensity(self.ctx.phase);
        let ctx = &mut self.ctx;
        for team in ctx.teams.iter_mut() {
            let style = team.tactics.style.modifiers();
            let intensity = FatigueModel::intensity(phase_intensity, &style, &ctx.conditions);
            for player in team.on_field.iter_mut().filter(|p| p.is_available()) {
                self.fatigue.apply_tick(player, dt, intensity);
            }
            for player in team.bench.iter_mut() {
                self.fatigue.recover_tick(player, dt);
            }
        }
    }

    fn apply_injuries(&mut self, dt: f32) {
        let mut injuries = mem::take(&mut self.injury_buf);
        for side in TeamSide::BOTH {
            injuries.clear();
            let ctx = &mut self.ctx;
            let team = &mut ctx.teams[side.index()];
            self.injury.step(
                &mut team.on_field,
                &mut team.bench,
                ctx.phase,
                dt,
                &ctx.conditions,
                &mut ctx.rng,
                &mut injuries,
            );
            for injury in injuries.drain(..) {
                self.stats.side_mut(side).injuries += 1;
                let outcome = injury.outcome;
                debug!(?side, player_id = injury.player_id, severity = ?outcome.severity, "injury");
                self.emit(EventKind::Injury {
                    side,
                    player_id: injury.player_id,
                    severity: outcome.severity,
                    injury_type: outcome.injury_type,
                    injured_out: outcome.ends_match(),
                    return_in_seconds: outcome.return_in_seconds,
                    weeks_out: outcome.weeks_out,
                });
            }
        }
        self.injury_buf = injuries;
    }

    fn apply_forced_interchanges(&mut self) {
        let mut changes = mem::take(&mut self.interchange_buf);
        for team in self.ctx.teams.iter_mut() {
            self.rotations.process_forced(team, &mut changes);
        }
        self.emit_interchanges(&mut changes);
        self.interchange_buf = changes;
    }

    fn rotate(&mut self, window: RotationWindow) {
        let mut changes = mem::take(&mut self.interchange_buf);
        for team in self.ctx.teams.iter_mut() {
            self.rotations.process_fatigue_rotations(team, window, &mut changes);
        }
        self.emit_interchanges(&mut changes);
        self.interchange_buf = changes;
    }

    fn emit_interchanges(&mut self, changes: &mut Vec<Interchange>) {
        for change in changes.drain(..) {
            self.stats.side_mut(change.side).interchanges += 1;
            self.emit(EventKind::Interchange {
                side: change.side,
                player_off: change.player_off,
                player_on: change.player_on,
                reason: change.reason,
            });
        }
    }

    // ========== Phases ==========

    /// Phase length in whole ticks, at least one.
    fn sample_duration(&mut self, phase: Phase) -> u64 {
        let range = self.config.phase.duration(phase);
        let tick_ms = self.config.match_rules.tick_ms as u64;
        let secs = self.ctx.rng.range_f32(range.min_secs, range.max_secs);
        let ticks = ((secs * 1000.0) / tick_ms as f32).ceil().max(1.0) as u64;
        ticks * tick_ms
    }

    fn start_quarter_phase(&mut self) {
        let duration = self.sample_duration(Phase::CenterBounce);
        let ctx = &mut self.ctx;
        ctx.phase = Phase::CenterBounce;
        ctx.long_range_shot = false;
        ctx.phase_elapsed_ms = 0;
        ctx.phase_duration_ms = duration;
    }

    fn enter_phase(&mut self, next: Phase, possession: TeamSide) {
        let from = self.ctx.phase;
        debug_assert!(from.can_transition_to(next), "illegal transition {:?} -> {:?}", from, next);
        let duration = self.sample_duration(next);
        self.ctx.phase = next;
        self.ctx.possession = possession;
        self.ctx.phase_elapsed_ms = 0;
        self.ctx.phase_duration_ms = duration;
        trace!(?from, to = ?next, duration_ms = duration, ?possession, "phase transition");
        self.emit(EventKind::PhaseTransition { from, to: next, duration_ms: duration, possession });

        if next == Phase::CenterBounce {
            self.rotate(RotationWindow::Stoppage);
        }
    }

    fn resolve_phase(&mut self) -> (Phase, TeamSide) {
        match self.ctx.phase {
            Phase::CenterBounce => self.resolve_center_bounce(),
            Phase::OpenPlay => self.resolve_open_play(),
            Phase::Inside50 => self.resolve_inside_50(),
            Phase::ShotOnGoal => self.resolve_shot(),
        }
    }

    fn unit_strength(&mut self, side: TeamSide, category: PhaseCategory) -> f32 {
        let count = self.config.phase.unit_size(category);
        let roster = &self.ctx.teams[side.index()].on_field;
        let unit = self.selectors[side.index()].select(roster, category, count);
        self.rating.unit_strength(roster, unit, category)
    }

    /// Home ground and momentum, on the logit scale.
    fn side_bias(&self, side: TeamSide) -> f32 {
        let home = match side {
            TeamSide::Home => self.config.match_rules.home_advantage,
            TeamSide::Away => 0.0,
        };
        home + self.ctx.scoreboard.momentum().contest_bias(side, self.game_time())
    }

    /// Attacker tries to advance against the defender's unit.
    fn contest(&mut self, attacker: TeamSide, attack: PhaseCategory, defend: PhaseCategory, base_logit: f32) -> bool {
        let defender = attacker.opponent();
        let a = self.unit_strength(attacker, attack);
        let d = self.unit_strength(defender, defend);
        let att_style = self.ctx.team(attacker).tactics.style.modifiers();
        let def_style = self.ctx.team(defender).tactics.style.modifiers();
        let bias = base_logit + self.side_bias(attacker) - self.side_bias(defender) + att_style.advance_bias
            - def_style.defend_bias;
        let p = self.rating.advance_probability(a, d, bias);
        self.ctx.rng.roll(p)
    }

    fn resolve_center_bounce(&mut self) -> (Phase, TeamSide) {
        let (home_cat, away_cat) = Phase::CenterBounce.contest();
        let home = self.unit_strength(TeamSide::Home, home_cat);
        let away = self.unit_strength(TeamSide::Away, away_cat);
        let bias = self.side_bias(TeamSide::Home) - self.side_bias(TeamSide::Away);
        let p_home = self.rating.advance_probability(home, away, bias);
        let winner = if self.ctx.rng.roll(p_home) { TeamSide::Home } else { TeamSide::Away };
        self.stats.side_mut(winner).clearances += 1;

        if self.ctx.rng.roll(self.config.phase.clearance_to_inside_50) {
            self.stats.side_mut(winner).inside_50s += 1;
            (Phase::Inside50, winner)
        } else {
            (Phase::OpenPlay, winner)
        }
    }

    fn resolve_open_play(&mut self) -> (Phase, TeamSide) {
        let attacker = self.ctx.possession;
        let defender = attacker.opponent();
        let p_stoppage = self.config.phase.stoppage_probability + self.ctx.conditions.stoppage_bias();
        if self.ctx.rng.roll(p_stoppage) {
            self.stats.side_mut(attacker).stoppages += 1;
            return (Phase::CenterBounce, attacker);
        }

        let pressure = self.ctx.team(defender).tactics.style.modifiers().pressure_bias;
        let (attack, defend) = Phase::OpenPlay.contest();
        let base = self.config.phase.open_play_advance_logit - pressure;
        if !self.contest(attacker, attack, defend, base) {
            self.stats.side_mut(attacker).turnovers += 1;
            return (Phase::OpenPlay, defender);
        }
        if self.ctx.rng.roll(self.config.phase.long_range_shot_probability) {
            self.ctx.long_range_shot = true;
            (Phase::ShotOnGoal, attacker)
        } else {
            self.stats.side_mut(attacker).inside_50s += 1;
            (Phase::Inside50, attacker)
        }
    }

    fn resolve_inside_50(&mut self) -> (Phase, TeamSide) {
        let attacker = self.ctx.possession;
        let (attack, defend) = Phase::Inside50.contest();
        if self.contest(attacker, attack, defend, self.config.phase.inside_50_shot_logit) {
            self.ctx.long_range_shot = false;
            (Phase::ShotOnGoal, attacker)
        } else {
            let defender = attacker.opponent();
            self.stats.side_mut(defender).rebounds += 1;
            (Phase::OpenPlay, defender)
        }
    }

    /// Effective accuracy of the best-placed forward, neutral when nobody is available.
    fn shooter_accuracy(&mut self, side: TeamSide) -> f32 {
        let count = self.config.phase.unit_size(PhaseCategory::ForwardEntry);
        let roster = &self.ctx.teams[side.index()].on_field;
        let unit = self.selectors[side.index()].select(roster, PhaseCategory::ForwardEntry, count);
        unit.first()
            .and_then(|&i| roster.get(i))
            .map(|p| p.effective(Attribute::Accuracy))
            .unwrap_or(0.5)
    }

    fn resolve_shot(&mut self) -> (Phase, TeamSide) {
        let attacker = self.ctx.possession;
        let defender = attacker.opponent();
        self.stats.side_mut(attacker).shots += 1;

        let config = self.config;
        let phase = &config.phase;
        let accuracy = self.shooter_accuracy(attacker);
        let mut p_goal = phase.base_goal_probability * (0.7 + 0.6 * accuracy) * self.ctx.conditions.accuracy_factor();
        if mem::take(&mut self.ctx.long_range_shot) {
            p_goal *= phase.long_range_accuracy_factor;
        }
        let p_goal = p_goal.clamp(0.0, 0.95);

        if self.ctx.rng.roll(p_goal) {
            self.record_score(ScoreKind::Goal, attacker);
            (Phase::CenterBounce, attacker)
        } else if self.ctx.rng.roll(phase.behind_share_of_misses) {
            self.record_score(ScoreKind::Behind, attacker);
            (Phase::OpenPlay, defender)
        } else {
            self.stats.side_mut(attacker).out_on_the_full += 1;
            (Phase::OpenPlay, defender)
        }
    }

    // ========== Scoring ==========

    fn record_score(&mut self, kind: ScoreKind, side: TeamSide) {
        let time = self.game_time();
        let update = self.ctx.scoreboard.record(kind, side, time, self.ctx.quarter);
        match kind {
            ScoreKind::Goal => self.stats.side_mut(side).goals += 1,
            ScoreKind::Behind => self.stats.side_mut(side).behinds += 1,
        }
        self.emit(EventKind::Score { score: update.event });

        if let Some(shift) = update.momentum_shift {
            self.emit(EventKind::MomentumShift { team: shift.team, strength: shift.strength });
        }

        let mut milestones = mem::take(&mut self.milestone_buf);
        let log = self.ctx.scoreboard.log().as_slice();
        milestones_at(log, log.len().saturating_sub(1), &self.config.milestones, &mut milestones);
        for milestone in milestones.drain(..) {
            self.emit(EventKind::Milestone { milestone });
        }
        self.milestone_buf = milestones;

        let mut patterns = mem::take(&mut self.pattern_buf);
        self.patterns.observe(&update.event, &mut patterns);
        for pattern in patterns.drain(..) {
            self.emit(EventKind::Pattern { pattern });
        }
        self.pattern_buf = patterns;
    }

    // ========== Quarters ==========

    fn quarter_summary(&mut self) -> QuarterSummary {
        let elapsed = self.ctx.quarter_elapsed_ms;
        QuarterSummary {
            quarter: self.ctx.quarter,
            home: self.ctx.scoreboard.line(TeamSide::Home),
            away: self.ctx.scoreboard.line(TeamSide::Away),
            elapsed_ms: elapsed.min(self.quarter_length_ms),
            overrun_ms: elapsed.saturating_sub(self.quarter_length_ms),
            phase_times: mem::take(&mut self.phase_times),
        }
    }

    fn end_quarter(&mut self) {
        let summary = self.quarter_summary();
        debug!(
            quarter = summary.quarter,
            home = %summary.home,
            away = %summary.away,
            overrun_ms = summary.overrun_ms,
            "quarter end"
        );
        self.emit(EventKind::QuarterEnd { home: summary.home, away: summary.away });
        self.quarters.push(summary);
    }

    fn quarter_break(&mut self) {
        let break_secs = self.config.match_rules.break_after(self.ctx.quarter) as f32;
        for team in self.ctx.teams.iter_mut() {
            for player in team.on_field.iter_mut().chain(team.bench.iter_mut()) {
                self.fatigue.quarter_break(player, break_secs);
            }
        }
        self.rotate(RotationWindow::QuarterBreak);

        self.ctx.quarter += 1;
        self.ctx.quarter_elapsed_ms = 0;
        debug!(quarter = self.ctx.quarter, "quarter start");
        self.emit(EventKind::QuarterStart);
        self.start_quarter_phase();
    }

    fn cancel_match(&mut self) {
        if self.ctx.quarter_elapsed_ms > 0 {
            // Count the unfinished phase so the partial quarter still adds up
            self.phase_times.add(self.ctx.phase, self.ctx.phase_elapsed_ms);
            let summary = self.quarter_summary();
            self.quarters.push(summary);
        }
        info!(quarter = self.ctx.quarter, ticks = self.ticks, "match cancelled");
        self.emit(EventKind::Cancelled);
    }

    fn finish(mut self, completed: bool) -> MatchResult {
        let home = self.ctx.scoreboard.line(TeamSide::Home);
        let away = self.ctx.scoreboard.line(TeamSide::Away);
        let margin = self.ctx.scoreboard.margin();
        let winner = if completed { leader_for_margin(margin) } else { None };

        if completed {
            let mut patterns = mem::take(&mut self.pattern_buf);
            self.patterns.finish(&mut patterns);
            for pattern in patterns.drain(..) {
                self.emit(EventKind::Pattern { pattern });
            }
            self.emit(EventKind::FullTime { home, away, winner });
            info!(home = %home, away = %away, ?winner, ticks = self.ticks, "full time");
        }

        let mut player_deltas: Vec<PlayerMatchDelta> = self
            .ctx
            .teams
            .iter()
            .flat_map(|team| team.players().map(move |p| p.to_delta(team.side)))
            .collect();
        player_deltas.sort_by_key(|d| (d.side.index(), d.player_id));

        let (events, sink_failures) = self.emitter.into_events();
        let [home_team, away_team] = &self.ctx.teams;
        MatchResult {
            fixture: self.ctx.fixture,
            home_team_id: home_team.id,
            home_team_name: home_team.name.clone(),
            away_team_id: away_team.id,
            away_team_name: away_team.name.clone(),
            seed: self.ctx.seed(),
            home,
            away,
            winner,
            margin,
            quarters: self.quarters,
            statistics: self.stats,
            events,
            player_deltas,
            completed,
            sink_failures,
            ticks: self.ticks,
        }
    }
}
