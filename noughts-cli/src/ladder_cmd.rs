//! Ladder command - opponent strength at every level
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), run_with_progress(), report_results()
//! - Level 3: print_text_results(), print_json_results()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use noughts_core::{Level, SessionConfig};
use noughts_tournament::{run_ladder_with, Baseline, LadderConfig, LadderReport};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct LadderArgs {
    /// Rounds to play per level
    #[arg(long, default_value = "200")]
    pub games: usize,

    /// Player the opponent faces: random or perfect
    #[arg(long, default_value = "random")]
    pub baseline: Baseline,

    /// Play every level on this board size (defaults to the config file's, else growing)
    #[arg(long, value_name = "N")]
    pub board_size: Option<usize>,

    /// Run rounds on one thread
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    seed: Option<u64>,
    board_size: Option<usize>,
    #[serde(flatten)]
    report: &'a LadderReport,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run ladder command
///
/// 1. Build the ladder configuration
/// 2. Play one match per level, with progress
/// 3. Report results
pub fn run(args: LadderArgs, session: &SessionConfig, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, session, seed)?;

    tracing::info!(
        "Starting ladder: {} games per level vs {} baseline",
        config.games_per_level,
        config.baseline
    );

    let report = run_with_progress(&config, !args.json);
    report_results(&report, &config, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &LadderArgs, session: &SessionConfig, seed: Option<u64>) -> Result<LadderConfig> {
    let board_size = args.board_size.or(session.board_size);
    if let Some(size) = board_size {
        let probe = SessionConfig {
            board_size: Some(size),
            ..SessionConfig::default()
        };
        probe.validate()?;
    }

    Ok(LadderConfig {
        games_per_level: args.games,
        baseline: args.baseline,
        board_size,
        seed,
        parallel: !args.sequential,
    })
}

fn run_with_progress(config: &LadderConfig, show_progress: bool) -> LadderReport {
    let bar = if show_progress {
        ProgressBar::new(Level::MAX.get() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{bar:30} level {pos}/{len} {msg}") {
        bar.set_style(style);
    }

    let report = run_ladder_with(config, |standing| {
        bar.set_message(format!(
            "{}x{} opponent {:.0}%",
            standing.board_size,
            standing.board_size,
            standing.opponent_win_rate * 100.0
        ));
        bar.inc(1);
    });

    bar.finish_and_clear();
    report
}

fn report_results(report: &LadderReport, config: &LadderConfig, json: bool) -> Result<()> {
    if json {
        print_json_results(report, config)
    } else {
        print_text_results(report);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_text_results(report: &LadderReport) {
    println!();
    println!(
        "Opponent ladder vs {} baseline ({} games per level)",
        report.baseline, report.games_per_level
    );
    println!("{}", "=".repeat(64));
    println!(
        "{:>5}  {:>5}  {:>6}  {:>6}  {:>6}  {:>7}  rules",
        "level", "board", "wins", "losses", "draws", "plies"
    );

    for s in &report.standings {
        let rules: Vec<String> = s.rules.iter().map(|r| format!("{:?}", r).to_lowercase()).collect();
        println!(
            "{:>5}  {:>5}  {:>6}  {:>6}  {:>6}  {:>7.1}  {}",
            s.level,
            format!("{}x{}", s.board_size, s.board_size),
            s.opponent_wins,
            s.baseline_wins,
            s.draws,
            s.avg_plies,
            rules.join(" > ")
        );
    }
}

fn print_json_results(report: &LadderReport, config: &LadderConfig) -> Result<()> {
    let output = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        seed: config.seed,
        board_size: config.board_size,
        report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
