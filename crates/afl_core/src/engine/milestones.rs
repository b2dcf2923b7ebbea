//! Milestones and scoring patterns
//!
//! Milestones are a pure function of the score log: the orchestrator asks for
//! the milestones of the newest entry, and `detect_milestones` over the whole
//! log returns the same set.
//!
//! Patterns need to know when a run has ended, so `PatternTracker` consumes
//! score events (and the clock) in order; `detect_patterns` replays a log
//! through a fresh tracker.

use std::collections::VecDeque;

use super::config::MilestoneConfig;
use crate::models::{Milestone, ScoreEvent, ScoreKind, ScoringPattern, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneHit {
    /// Index into the score log of the event that reached the milestone
    pub score_index: usize,
    pub milestone: Milestone,
}

/// Milestones reached by `log[index]`, pushed to `out` in a fixed order.
pub fn milestones_at(log: &[ScoreEvent], index: usize, config: &MilestoneConfig, out: &mut Vec<Milestone>) {
    let Some(event) = log.get(index) else {
        return;
    };
    let previous = index.checked_sub(1).and_then(|i| log.get(i));

    if index == 0 {
        out.push(Milestone::FirstScore { side: event.side });
    }
    if event.kind == ScoreKind::Goal && !log[..index].iter().any(|e| e.kind == ScoreKind::Goal) {
        out.push(Milestone::FirstGoal { side: event.side });
    }
    if let Some(prev) = previous {
        match (prev.leader(), event.leader()) {
            (Some(before), Some(after)) if before != after => {
                out.push(Milestone::LeadChange { leader: after, margin: event.margin.abs() })
            }
            (_, None) => out.push(Milestone::ScoresLevel { points: event.home.points }),
            _ => {}
        }
    }

    let after = event.line(event.side).points;
    let before = after - event.kind.points();
    for &threshold in &config.score_thresholds {
        if before < threshold && after >= threshold {
            out.push(Milestone::ScoreThreshold { side: event.side, threshold });
        }
    }
}

/// Every milestone in the log, in log order.
pub fn detect_milestones(log: &[ScoreEvent], config: &MilestoneConfig) -> Vec<MilestoneHit> {
    let mut hits = Vec::new();
    let mut scratch = Vec::new();
    for index in 0..log.len() {
        scratch.clear();
        milestones_at(log, index, config, &mut scratch);
        hits.extend(scratch.iter().map(|&milestone| MilestoneHit { score_index: index, milestone }));
    }
    hits
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Burst {
    side: TeamSide,
    start_ms: u64,
    end_ms: u64,
    goals: u32,
}

/// Consecutive goals by one side. `recent` holds the run's goal times still
/// inside the window ending at the latest goal; a burst stays open while that
/// window holds at least `min_goals`.
#[derive(Debug, Clone)]
pub struct PatternTracker {
    window_ms: u64,
    min_goals: usize,
    comeback_deficit: i32,
    run_side: Option<TeamSide>,
    recent: VecDeque<u64>,
    burst: Option<Burst>,
    max_deficit: [i32; 2],
    comeback_seen: [bool; 2],
}

impl PatternTracker {
    pub fn new(config: &MilestoneConfig) -> Self {
        Self {
            window_ms: config.burst_window_secs as u64 * 1000,
            min_goals: config.burst_min_goals,
            comeback_deficit: config.comeback_deficit,
            run_side: None,
            recent: VecDeque::with_capacity(config.burst_min_goals + 1),
            burst: None,
            max_deficit: [0; 2],
            comeback_seen: [false; 2],
        }
    }

    pub fn observe(&mut self, event: &ScoreEvent, out: &mut Vec<ScoringPattern>) {
        match event.kind {
            ScoreKind::Goal => self.observe_goal(event.side, event.game_time_ms, out),
            // A side's own behinds don't break its run; the opposition's do
            ScoreKind::Behind => {
                if self.run_side.is_some_and(|side| side != event.side) {
                    self.close_run(out);
                }
            }
        }

        for side in TeamSide::BOTH {
            let margin = event.margin_for(side);
            let slot = side.index();
            if margin < 0 {
                self.max_deficit[slot] = self.max_deficit[slot].max(-margin);
            } else if margin > 0 && !self.comeback_seen[slot] && self.max_deficit[slot] >= self.comeback_deficit {
                self.comeback_seen[slot] = true;
                out.push(ScoringPattern::Comeback { side, deficit: self.max_deficit[slot] });
            }
        }
    }

    fn observe_goal(&mut self, side: TeamSide, now: u64, out: &mut Vec<ScoringPattern>) {
        if self.run_side != Some(side) {
            self.close_run(out);
            self.run_side = Some(side);
        }

        // Older goals slide out of the window; the run itself continues
        self.recent.push_back(now);
        while self.recent.front().is_some_and(|&t| now.saturating_sub(t) > self.window_ms) {
            self.recent.pop_front();
        }

        if self.recent.len() < self.min_goals {
            self.close_burst(out);
            return;
        }
        match &mut self.burst {
            Some(burst) => {
                burst.goals += 1;
                burst.end_ms = now;
            }
            None => {
                let start_ms = self.recent.front().copied().unwrap_or(now);
                self.burst = Some(Burst { side, start_ms, end_ms: now, goals: self.recent.len() as u32 });
            }
        }
    }

    /// Close a burst that no further goal could extend.
    pub fn poll(&mut self, game_time_ms: u64, out: &mut Vec<ScoringPattern>) {
        if self.burst.is_none() {
            return;
        }
        // The next goal extends the burst only if the last `min_goals - 1`
        // goals are still inside its window.
        let keep = self.min_goals.saturating_sub(1);
        let oldest_needed = self.recent.len().checked_sub(keep).and_then(|i| self.recent.get(i));
        if oldest_needed.is_some_and(|&t| game_time_ms.saturating_sub(t) > self.window_ms) {
            self.close_burst(out);
        }
    }

    /// End of match: close whatever is open.
    pub fn finish(&mut self, out: &mut Vec<ScoringPattern>) {
        self.close_run(out);
    }

    fn close_run(&mut self, out: &mut Vec<ScoringPattern>) {
        self.close_burst(out);
        self.recent.clear();
        self.run_side = None;
    }

    fn close_burst(&mut self, out: &mut Vec<ScoringPattern>) {
        if let Some(burst) = self.burst.take() {
            out.push(ScoringPattern::ScoringBurst {
                side: burst.side,
                event_count: burst.goals,
                start_ms: burst.start_ms,
                end_ms: burst.end_ms,
            });
        }
    }
}

/// Every pattern in a complete log.
pub fn detect_patterns(log: &[ScoreEvent], config: &MilestoneConfig) -> Vec<ScoringPattern> {
    let mut tracker = PatternTracker::new(config);
    let mut out = Vec::new();
    for event in log {
        tracker.observe(event, &mut out);
    }
    tracker.finish(&mut out);
    out
}
