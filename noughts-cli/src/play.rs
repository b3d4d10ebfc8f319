//! Play command - the campaign in a terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_loop()
//! - Level 3: render(), parse_command(), outcome messages
//! - Level 4: configuration

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use noughts_core::{GameMode, Level, Mark, Phase, RoundStatus, Session, SessionConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Two humans share the board instead of playing the AI
    #[arg(long)]
    pub two_player: bool,

    /// Play every level on this board size instead of growing the board
    #[arg(long, value_name = "N")]
    pub board_size: Option<usize>,

    /// Level to start the campaign at
    #[arg(long, value_name = "L")]
    pub level: Option<u8>,
}

/// A line of player input
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Cell(usize),
    Restart,
    Quit,
    Invalid(String),
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, config: SessionConfig, seed: Option<u64>) -> Result<()> {
    let config = apply_args(&args, config)?;
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    tracing::info!(
        "Starting campaign: mode={:?}, level={}",
        config.mode,
        config.start_level
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    play_loop(Session::new(config), &mut rng, stdin.lock(), stdout.lock())
}

/// Fold command-line flags over the file configuration
fn apply_args(args: &PlayArgs, mut config: SessionConfig) -> Result<SessionConfig> {
    if args.two_player {
        config.mode = GameMode::TwoPlayer;
    }
    if let Some(size) = args.board_size {
        config.board_size = Some(size);
    }
    if let Some(level) = args.level {
        config.start_level =
            Level::new(level).with_context(|| format!("Level must be 1..=10, got {}", level))?;
    }
    config.validate()?;
    Ok(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Drive the session until the player quits or input ends
fn play_loop<R: BufRead, W: Write>(
    mut session: Session,
    rng: &mut ChaCha8Rng,
    mut input: R,
    mut out: W,
) -> Result<()> {
    let opponent_delay = Duration::from_millis(session.config().opponent_delay_ms);
    let round_delay = Duration::from_millis(session.config().round_delay_ms);
    let mut line = String::new();

    loop {
        match session.phase() {
            Phase::RoundOver => {
                render(&session, &mut out)?;
                writeln!(out, "{}", outcome_message(&session))?;
                thread::sleep(round_delay);
                session.advance();
                continue;
            }
            Phase::Playing if session.awaiting_opponent() => {
                thread::sleep(opponent_delay);
                session.opponent_move(rng)?;
                continue;
            }
            Phase::Playing => {
                render(&session, &mut out)?;
                writeln!(out, "{}", turn_message(&session))?;
            }
            Phase::Complete => {
                let score = session.score();
                writeln!(
                    out,
                    "Game Over! Final Score: You {} - AI {}",
                    score.player_wins, score.opponent_wins
                )?;
                writeln!(out, "Enter r to play again or q to quit.")?;
            }
        }

        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match parse_command(&line, session.round().board().size()) {
            Command::Quit => return Ok(()),
            Command::Restart => session.restart(),
            Command::Invalid(msg) => writeln!(out, "{}", msg)?,
            Command::Cell(index) => {
                if let Err(err) = session.play(index) {
                    writeln!(out, "Illegal move: {}", err)?;
                }
            }
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Accepts `q`, `r`, a cell index, or `row col`
fn parse_command(line: &str, board_size: usize) -> Command {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["q" | "quit"] => Command::Quit,
        ["r" | "restart"] => Command::Restart,
        [index] => match index.parse() {
            Ok(index) => Command::Cell(index),
            Err(_) => Command::Invalid(format!("Not a cell: {}", index)),
        },
        [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
            (Ok(row), Ok(col)) if row < board_size && col < board_size => {
                Command::Cell(row * board_size + col)
            }
            (Ok(_), Ok(_)) => Command::Invalid(format!(
                "Row and column must be below {}",
                board_size
            )),
            _ => Command::Invalid(format!("Not a cell: {} {}", row, col)),
        },
        _ => Command::Invalid("Enter a cell index, \"row col\", r or q".to_string()),
    }
}

/// Print the board with cell indices on empty squares
fn render<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let board = session.round().board();
    let n = board.size();
    let width = (n * n - 1).to_string().len();

    writeln!(out)?;
    for row in 0..n {
        let cells: Vec<String> = (0..n)
            .map(|col| {
                let index = row * n + col;
                match board.cells()[index].mark() {
                    Some(mark) => format!("{:>width$}", mark.symbol(), width = width),
                    None => format!("{:>width$}", index, width = width),
                }
            })
            .collect();
        writeln!(out, " {}", cells.join(" | "))?;
    }
    Ok(())
}

fn turn_message(session: &Session) -> String {
    format!(
        "Level {} / {} - Player {}'s turn",
        session.level(),
        Level::MAX,
        session.round().to_move()
    )
}

fn outcome_message(session: &Session) -> String {
    let vs_ai = session.config().mode == GameMode::VsAi;
    match session.round().status() {
        RoundStatus::OpponentWin if vs_ai => format!("Player {} (AI) wins!", Mark::Opponent),
        RoundStatus::PlayerWin | RoundStatus::OpponentWin => {
            let winner = session.round().status().winner().unwrap_or(Mark::Player);
            format!("Player {} wins!", winner)
        }
        RoundStatus::Draw => "It's a draw!".to_string(),
        RoundStatus::InProgress => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(config: SessionConfig) -> SessionConfig {
        SessionConfig {
            opponent_delay_ms: 0,
            round_delay_ms: 0,
            ..config
        }
    }

    fn run_script(config: SessionConfig, script: &str) -> String {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut out = Vec::new();
        play_loop(Session::new(instant(config)), &mut rng, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("q\n", 3), Command::Quit);
        assert_eq!(parse_command(" restart ", 3), Command::Restart);
        assert_eq!(parse_command("7", 3), Command::Cell(7));
        assert_eq!(parse_command("1 2", 4), Command::Cell(6));
        assert!(matches!(parse_command("3 0", 3), Command::Invalid(_)));
        assert!(matches!(parse_command("x", 3), Command::Invalid(_)));
        assert!(matches!(parse_command("", 3), Command::Invalid(_)));
    }

    #[test]
    fn test_apply_args_overrides_config() {
        let args = PlayArgs {
            two_player: true,
            board_size: Some(3),
            level: Some(4),
        };
        let config = apply_args(&args, SessionConfig::default()).unwrap();
        assert_eq!(config.mode, GameMode::TwoPlayer);
        assert_eq!(config.board_size, Some(3));
        assert_eq!(config.start_level.get(), 4);

        let bad = PlayArgs {
            two_player: false,
            board_size: None,
            level: Some(11),
        };
        assert!(apply_args(&bad, SessionConfig::default()).is_err());
    }

    #[test]
    fn test_two_player_round_to_next_level() {
        let output = run_script(SessionConfig::two_player(), "0\n3\n1\n4\n2\nq\n");
        assert!(output.contains("Level 1 / 10 - Player X's turn"));
        assert!(output.contains("Player X wins!"));
        assert!(output.contains("Level 2 / 10"));
    }

    #[test]
    fn test_illegal_move_reported() {
        let output = run_script(SessionConfig::two_player(), "0\n0\nq\n");
        assert!(output.contains("Illegal move: cell 0 is already marked X"));
    }

    #[test]
    fn test_opponent_replies_automatically() {
        let output = run_script(SessionConfig::default(), "4\nq\n");
        // After X's move the opponent answered and it is X's turn again
        assert_eq!(output.matches("Player X's turn").count(), 2);
    }

    #[test]
    fn test_eof_ends_game() {
        let output = run_script(SessionConfig::default(), "");
        assert!(output.contains("Level 1 / 10"));
    }
}
