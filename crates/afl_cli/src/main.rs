//! afl-sim: run matches and rounds from the command line
//!
//! Setups are read as JSON (`MatchSetup`, or a list of them for a round).
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use afl_core::engine::{
    assign_round_seeds, simulate_match, simulate_round, ChannelSink, EngineConfig, NullSink,
};
use afl_core::models::{
    Conditions, EventKind, FixtureId, MatchEvent, MatchResult, MatchSetup, PlayerAttributes,
    PlayerProfile, Position, TacticalStyle, Tactics, TeamSheet,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "afl-sim")]
#[command(about = "Deterministic AFL match simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Engine config file (.json, .yaml or .yml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset: realistic, high_scoring or attritional
    #[arg(long, conflicts_with = "config")]
    profile: Option<String>,
}

impl ConfigArgs {
    fn load(&self) -> Result<EngineConfig> {
        if let Some(path) = &self.config {
            return EngineConfig::from_path(path).with_context(|| format!("loading config {}", path.display()));
        }
        match &self.profile {
            Some(name) => EngineConfig::preset(name).with_context(|| format!("unknown profile '{name}'")),
            None => Ok(EngineConfig::from_env_or_default()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one match from a setup file
    Simulate {
        /// MatchSetup JSON file
        #[arg(long)]
        setup: PathBuf,

        /// Override the seed in the setup
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Write the full MatchResult JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Simulate every fixture of a round in parallel
    Round {
        /// JSON list of MatchSetup
        #[arg(long)]
        fixtures: PathBuf,

        /// Derive each fixture's seed from this round seed
        #[arg(long)]
        round_seed: Option<u64>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Write the results JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Play a generated match and print the event stream as it happens
    Demo {
        #[arg(long, default_value = "42")]
        seed: u64,

        #[command(flatten)]
        config: ConfigArgs,

        /// Print phase transitions too
        #[arg(long, default_value = "false")]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate { setup, seed, config, out } => {
            let mut setup: MatchSetup = read_json(&setup)?;
            if let Some(seed) = seed {
                setup.seed = seed;
            }
            let config = config.load()?;
            let result = simulate_match(&setup, &config, &mut NullSink)?;
            print_result(&result);
            if let Some(path) = out {
                write_json(&path, &result)?;
            }
        }

        Commands::Round { fixtures, round_seed, config, out } => {
            let mut setups: Vec<MatchSetup> = read_json(&fixtures)?;
            if let Some(round_seed) = round_seed {
                assign_round_seeds(&mut setups, round_seed);
            }
            let config = config.load()?;
            let mut results = Vec::with_capacity(setups.len());
            for (setup, result) in setups.iter().zip(simulate_round(&setups, &config)) {
                match result {
                    Ok(result) => {
                        println!("{}", result.summary());
                        results.push(result);
                    }
                    Err(e) => eprintln!("match {} failed: {e}", setup.fixture.match_id),
                }
            }
            info!(completed = results.len(), fixtures = setups.len(), "round finished");
            if let Some(path) = out {
                write_json(&path, &results)?;
            }
        }

        Commands::Demo { seed, config, verbose } => {
            let config = config.load()?;
            let setup = demo_setup(seed);
            let (mut sink, rx) = ChannelSink::unbounded();

            let printer = thread::spawn(move || {
                for event in rx {
                    if let Some(line) = describe(&event, verbose) {
                        println!("{line}");
                    }
                }
            });
            let result = simulate_match(&setup, &config, &mut sink)?;
            drop(sink);
            if printer.join().is_err() {
                bail!("event printer thread panicked");
            }
            print_result(&result);
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "result written");
    Ok(())
}

fn print_result(result: &MatchResult) {
    println!("\n{}", result.summary());
    for q in &result.quarters {
        println!("  Q{}: {} - {}", q.quarter, q.home, q.away);
    }
    let stats = &result.statistics;
    println!(
        "  Shots: {} - {}   Inside 50s: {} - {}   Clearances: {} - {}",
        stats.home.shots,
        stats.away.shots,
        stats.home.inside_50s,
        stats.away.inside_50s,
        stats.home.clearances,
        stats.away.clearances
    );
    println!(
        "  Injuries: {} - {}   Interchanges: {} - {}",
        stats.home.injuries, stats.away.injuries, stats.home.interchanges, stats.away.interchanges
    );
    if result.sink_failures > 0 {
        println!("  ({} events not delivered to the sink)", result.sink_failures);
    }
}

fn clock(event: &MatchEvent) -> String {
    let secs = event.game_time_ms / 1000;
    format!("Q{} {:>3}:{:02}", event.quarter, secs / 60, secs % 60)
}

fn describe(event: &MatchEvent, verbose: bool) -> Option<String> {
    let text = match &event.kind {
        EventKind::QuarterStart => "Quarter start".to_string(),
        EventKind::QuarterEnd { home, away } => format!("Quarter end: {home} - {away}"),
        EventKind::PhaseTransition { from, to, possession, .. } if verbose => {
            format!("{from:?} -> {to:?} ({possession:?})")
        }
        EventKind::PhaseTransition { .. } => return None,
        EventKind::Score { score } => {
            format!("{:?} {:?}! {} - {}", score.side, score.kind, score.home, score.away)
        }
        EventKind::Injury { side, player_id, severity, injury_type, .. } => {
            format!("Injury ({side:?}): player {player_id}, {severity:?} {injury_type:?}")
        }
        EventKind::Interchange { side, player_off, player_on, reason } => {
            format!("Interchange ({side:?}): {player_off} off, {player_on} on [{reason:?}]")
        }
        EventKind::MomentumShift { team, strength } => format!("Momentum with {team:?} ({strength:.2})"),
        EventKind::Milestone { milestone } => format!("Milestone: {milestone:?}"),
        EventKind::Pattern { pattern } => format!("Pattern: {pattern:?}"),
        EventKind::FullTime { home, away, winner } => match winner {
            Some(side) => format!("Full time: {home} - {away}, {side:?} win"),
            None => format!("Full time: {home} - {away}, draw"),
        },
        EventKind::Cancelled => "Match cancelled".to_string(),
    };
    Some(format!("[{}] {text}", clock(event)))
}

const DEMO_LINEUP: [Position; 18] = [
    Position::FB,
    Position::BP,
    Position::BP,
    Position::CHB,
    Position::HBF,
    Position::HBF,
    Position::W,
    Position::W,
    Position::C,
    Position::R,
    Position::RR,
    Position::ROV,
    Position::HFF,
    Position::HFF,
    Position::CHF,
    Position::FP,
    Position::FP,
    Position::FF,
];

const DEMO_BENCH: [Position; 4] = [Position::UT, Position::C, Position::HBF, Position::HFF];

/// Two squads with some spread in their attributes.
fn demo_team(id: u32, name: &str, base: u8, style: TacticalStyle) -> TeamSheet {
    let player = |n: u32, position: Position| {
        let mut attributes = PlayerAttributes::uniform(base);
        // deterministic spread, +-12 around the base
        let spread = ((n * 37 + id * 11) % 25) as u8;
        attributes.kicking = (base + spread).saturating_sub(12).min(100);
        attributes.accuracy = (base + 24 - spread).saturating_sub(12).min(100);
        attributes.endurance = (base + (spread * 3) % 25).saturating_sub(12).min(100);
        PlayerProfile::new(id * 100 + n, format!("{name} {n}"), position, attributes)
    };
    TeamSheet {
        id,
        name: name.to_string(),
        on_field: DEMO_LINEUP.iter().zip(1..).map(|(p, n)| player(n, *p)).collect(),
        bench: DEMO_BENCH.iter().zip(19..).map(|(p, n)| player(n, *p)).collect(),
        tactics: Tactics { style, ..Default::default() },
    }
}

fn demo_setup(seed: u64) -> MatchSetup {
    MatchSetup {
        fixture: FixtureId { match_id: 1, round: 1 },
        seed,
        home: demo_team(1, "Magpies", 66, TacticalStyle::Attacking),
        away: demo_team(2, "Swans", 64, TacticalStyle::Pressing),
        conditions: Conditions::default(),
    }
}
