//! Campaign session: level progression, score and restart around rounds

use crate::ai::{decide, Rule};
use crate::board::{Cell, Mark};
use crate::config::{GameMode, SessionConfig};
use crate::error::IllegalMove;
use crate::game::{Placement, Round, RoundStatus};
use crate::level::Level;
use rand::Rng;
use serde::Serialize;

/// Round wins per side. Draws are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub player_wins: u32,
    pub opponent_wins: u32,
}

/// Where the campaign stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    /// Round finished, waiting for [`Session::advance`]
    RoundOver,
    /// Last level finished
    Complete,
}

/// Result of an accepted move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub placement: Placement,
    pub status: RoundStatus,
    /// Ladder rule behind an automated move
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

/// Result of [`Session::advance`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Advanced(Level),
    Complete,
    RoundInProgress,
}

/// Serializable view of a session for front-ends
#[derive(Clone, Debug, Serialize)]
pub struct SessionView {
    pub mode: GameMode,
    pub level: Level,
    pub max_level: Level,
    pub board_size: usize,
    pub cells: Vec<Option<Mark>>,
    pub to_move: Option<Mark>,
    pub status: RoundStatus,
    pub winner: Option<Mark>,
    pub phase: Phase,
    pub score: Score,
    pub history: Vec<Placement>,
}

/// All mutable game state, owned explicitly by the caller
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    level: Level,
    score: Score,
    round: Round,
    phase: Phase,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let level = config.start_level;
        let round = Round::new(config.board_size_for(level));
        Self {
            config,
            level,
            score: Score::default(),
            round,
            phase: Phase::Playing,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True when the automated opponent should reply next
    pub fn awaiting_opponent(&self) -> bool {
        self.config.mode == GameMode::VsAi
            && self.phase == Phase::Playing
            && self.round.to_move() == Mark::Opponent
    }

    pub fn view(&self) -> SessionView {
        let board = self.round.board();
        SessionView {
            mode: self.config.mode,
            level: self.level,
            max_level: Level::MAX,
            board_size: board.size(),
            cells: board.cells().iter().map(|c| Cell::mark(*c)).collect(),
            to_move: (self.phase == Phase::Playing).then(|| self.round.to_move()),
            status: self.round.status(),
            winner: self.round.status().winner(),
            phase: self.phase,
            score: self.score,
            history: self.round.history().to_vec(),
        }
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Human move at `index`.
    ///
    /// In vs-AI mode only `X` is human; in two-player mode the move goes to
    /// whichever mark is to move.
    pub fn play(&mut self, index: usize) -> Result<MoveOutcome, IllegalMove> {
        self.ensure_playing()?;
        if self.config.mode == GameMode::VsAi && self.round.to_move() != Mark::Player {
            return Err(IllegalMove::WrongTurn {
                expected: Mark::Opponent,
            });
        }
        self.commit(index, None)
    }

    /// Let the level-scaled opponent place `O`.
    ///
    /// Rejected with `WrongTurn` in two-player mode, where `O` is human.
    pub fn opponent_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<MoveOutcome, IllegalMove> {
        self.ensure_playing()?;
        if self.config.mode != GameMode::VsAi {
            return Err(IllegalMove::WrongTurn {
                expected: self.round.to_move(),
            });
        }
        if self.round.to_move() != Mark::Opponent {
            return Err(IllegalMove::WrongTurn {
                expected: Mark::Player,
            });
        }
        let decision = decide(self.round.board(), self.level, rng).ok_or(IllegalMove::RoundOver)?;
        self.commit(decision.index, Some(decision.rule))
    }

    fn ensure_playing(&self) -> Result<(), IllegalMove> {
        match self.phase {
            Phase::Playing => Ok(()),
            Phase::RoundOver | Phase::Complete => Err(IllegalMove::RoundOver),
        }
    }

    fn commit(&mut self, index: usize, rule: Option<Rule>) -> Result<MoveOutcome, IllegalMove> {
        let mark = self.round.to_move();
        let next = self.round.apply_move(index)?;
        let status = next.status();
        self.round = next;

        tracing::debug!(level = %self.level, index, %mark, ?rule, ?status, "move");

        if status.is_terminal() {
            self.finish_round(status);
        }

        Ok(MoveOutcome {
            placement: Placement { index, mark },
            status,
            rule,
        })
    }

    fn finish_round(&mut self, status: RoundStatus) {
        self.phase = Phase::RoundOver;
        if self.config.mode != GameMode::VsAi {
            return;
        }
        match status.winner() {
            Some(Mark::Player) => self.score.player_wins += 1,
            Some(Mark::Opponent) => self.score.opponent_wins += 1,
            None => {}
        }
    }

    // ========================================================================
    // PROGRESSION
    // ========================================================================

    /// Move on after a finished round: next level, or campaign complete at the top
    pub fn advance(&mut self) -> Progress {
        match self.phase {
            Phase::Playing => Progress::RoundInProgress,
            Phase::Complete => Progress::Complete,
            Phase::RoundOver => match self.level.next() {
                Some(next) => {
                    self.level = next;
                    self.round = Round::new(self.config.board_size_for(next));
                    self.phase = Phase::Playing;
                    tracing::debug!(level = %next, size = self.round.board().size(), "level up");
                    Progress::Advanced(next)
                }
                None => {
                    self.phase = Phase::Complete;
                    tracing::info!(
                        player = self.score.player_wins,
                        opponent = self.score.opponent_wins,
                        "campaign complete"
                    );
                    Progress::Complete
                }
            },
        }
    }

    /// Back to the starting level with a clean score
    pub fn restart(&mut self) {
        self.level = self.config.start_level;
        self.score = Score::default();
        self.round = Round::new(self.config.board_size_for(self.level));
        self.phase = Phase::Playing;
        tracing::debug!(level = %self.level, "restart");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
