//! Level-scaled opponent: a ladder of move-selection rules

use crate::board::{Board, Cell, Mark, LINES_3X3};
use crate::eval::minimax_move;
use crate::level::Level;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

// ============================================================================
// CONSTANTS
// ============================================================================

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Lowest level that blocks the player's open two
const BLOCK_LEVEL: u8 = 2;
/// Lowest level that completes its own open two
const WIN_LEVEL: u8 = 3;
/// Lowest level that prefers centre, then corners
const POSITIONAL_LEVEL: u8 = 5;
/// Lowest level that searches the full game tree
const MINIMAX_LEVEL: u8 = 8;

// ============================================================================
// RULES
// ============================================================================

/// Which rung of the ladder produced a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Random,
    Minimax,
    Win,
    Block,
    Positional,
}

/// A chosen cell and the rule that chose it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub index: usize,
    pub rule: Rule,
}

/// Rules consulted for a level on a board of the given size, in order
pub fn ladder(level: Level, board_size: usize) -> Vec<Rule> {
    let lvl = level.get();
    if board_size != 3 || lvl == 1 {
        return vec![Rule::Random];
    }
    if lvl >= MINIMAX_LEVEL {
        return vec![Rule::Minimax];
    }

    let mut rules = Vec::new();
    if lvl >= WIN_LEVEL {
        rules.push(Rule::Win);
    }
    if lvl >= BLOCK_LEVEL {
        rules.push(Rule::Block);
    }
    if lvl >= POSITIONAL_LEVEL {
        rules.push(Rule::Positional);
    }
    rules.push(Rule::Random);
    rules
}

/// Pick the opponent's next cell; `None` only on a full board
pub fn select_opponent_move<R: Rng + ?Sized>(
    board: &Board,
    level: Level,
    rng: &mut R,
) -> Option<usize> {
    decide(board, level, rng).map(|d| d.index)
}

/// Like [`select_opponent_move`], also reporting the rule applied
pub fn decide<R: Rng + ?Sized>(board: &Board, level: Level, rng: &mut R) -> Option<Decision> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    for rule in ladder(level, board.size()) {
        let choice = match rule {
            Rule::Random => empty.choose(rng).copied(),
            Rule::Minimax => minimax_move(board, Mark::Opponent),
            Rule::Win => completing_move(board, Mark::Opponent),
            Rule::Block => completing_move(board, Mark::Player),
            Rule::Positional => positional_move(board, rng),
        };
        if let Some(index) = choice {
            return Some(Decision { index, rule });
        }
    }

    None
}

/// First empty cell that would give `mark` a full 3×3 line
pub fn completing_move(board: &Board, mark: Mark) -> Option<usize> {
    if board.size() != 3 {
        return None;
    }

    LINES_3X3.iter().find_map(|line| {
        let cells = line.map(|i| board.cells()[i]);
        let own = cells.iter().filter(|&&c| c == Cell::Marked(mark)).count();
        let gap = cells.iter().position(|c| c.is_empty());
        match (own, gap) {
            (2, Some(pos)) => Some(line[pos]),
            _ => None,
        }
    })
}

/// Centre if free, else a random free corner
fn positional_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    if board.get(CENTER) == Some(Cell::Empty) {
        return Some(CENTER);
    }
    let corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&i| board.get(i) == Some(Cell::Empty))
        .collect();
    corners.choose(rng).copied()
}

// ============================================================================
// OPPONENT AI
// ============================================================================

/// Opponent player owning a reproducible random source
pub struct OpponentAi {
    rng: ChaCha8Rng,
}

impl OpponentAi {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(42),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Get the opponent's move for this board at this level
    pub fn best_move(&mut self, board: &Board, level: Level) -> Option<usize> {
        select_opponent_move(board, level, &mut self.rng)
    }

    pub fn decide(&mut self, board: &Board, level: Level) -> Option<Decision> {
        decide(board, level, &mut self.rng)
    }
}

impl Default for OpponentAi {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn level(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_blocks_at_level_2() {
        let b = board("XX. O.. ...");
        let d = decide(&b, level(2), &mut rng()).unwrap();
        assert_eq!(d, Decision { index: 2, rule: Rule::Block });
    }

    #[test]
    fn test_level_3_blocks_when_no_win() {
        let b = board("XX. ... ...");
        assert_eq!(select_opponent_move(&b, level(3), &mut rng()), Some(2));
    }

    #[test]
    fn test_win_preferred_over_block() {
        // Both sides have an open two; level 3 completes its own
        let b = board("XX. OO. X..");
        let d = decide(&b, level(3), &mut rng()).unwrap();
        assert_eq!(d, Decision { index: 5, rule: Rule::Win });

        // Level 2 only knows how to block
        let d = decide(&b, level(2), &mut rng()).unwrap();
        assert_eq!(d, Decision { index: 2, rule: Rule::Block });
    }

    #[test]
    fn test_centre_on_empty_board_at_level_5() {
        for lvl in 5..=7 {
            let d = decide(&Board::new(3), level(lvl), &mut rng()).unwrap();
            assert_eq!(d, Decision { index: 4, rule: Rule::Positional });
        }
        assert_eq!(select_opponent_move(&board("X.. ... ..."), level(5), &mut rng()), Some(4));
    }

    #[test]
    fn test_corner_when_centre_taken() {
        let b = board("... .X. ...");
        for seed in 0..20 {
            let mut r = ChaCha8Rng::seed_from_u64(seed);
            let d = decide(&b, level(6), &mut r).unwrap();
            assert_eq!(d.rule, Rule::Positional);
            assert!(CORNERS.contains(&d.index));
        }
    }

    #[test]
    fn test_random_when_centre_and_corners_taken() {
        let b = board("X.O .X. O.X");
        let d = decide(&b, level(5), &mut rng()).unwrap();
        assert_eq!(d.rule, Rule::Random);
        assert!(b.empty_cells().contains(&d.index));
    }

    #[test]
    fn test_level_1_is_random() {
        // Random even with a block available
        let b = board("XX. O.. ...");
        let picks: HashSet<usize> = (0..50)
            .map(|seed| {
                let mut r = ChaCha8Rng::seed_from_u64(seed);
                select_opponent_move(&b, level(1), &mut r).unwrap()
            })
            .collect();
        assert!(picks.len() > 1);
        assert!(picks.iter().all(|i| b.empty_cells().contains(i)));
    }

    #[test]
    fn test_large_board_always_random() {
        let mut b = Board::new(4);
        b.place(0, Mark::Player).unwrap();
        b.place(1, Mark::Player).unwrap();
        b.place(2, Mark::Player).unwrap();

        let mut seen = HashSet::new();
        for seed in 0..100 {
            let mut r = ChaCha8Rng::seed_from_u64(seed);
            let d = decide(&b, level(10), &mut r).unwrap();
            assert_eq!(d.rule, Rule::Random);
            assert!(b.get(d.index) == Some(Cell::Empty));
            seen.insert(d.index);
        }
        assert!(seen.len() > 1, "expected a spread of cells, got {:?}", seen);
    }

    #[test]
    fn test_minimax_at_level_8() {
        let d = decide(&board("X.. ... ..."), level(8), &mut rng()).unwrap();
        assert_eq!(d, Decision { index: 4, rule: Rule::Minimax });
    }

    #[test]
    fn test_full_board_has_no_move() {
        assert_eq!(select_opponent_move(&board("XOX XOO OXX"), level(9), &mut rng()), None);
    }

    #[test]
    fn test_completing_move_ignores_blocked_lines() {
        assert_eq!(completing_move(&board("XXO ... ..."), Mark::Player), None);
        assert_eq!(completing_move(&board("X.. .X. ..."), Mark::Player), Some(8));
    }

    #[test]
    fn test_ladder_shape() {
        assert_eq!(ladder(level(1), 3), vec![Rule::Random]);
        assert_eq!(ladder(level(2), 3), vec![Rule::Block, Rule::Random]);
        assert_eq!(ladder(level(4), 3), vec![Rule::Win, Rule::Block, Rule::Random]);
        assert_eq!(
            ladder(level(7), 3),
            vec![Rule::Win, Rule::Block, Rule::Positional, Rule::Random]
        );
        assert_eq!(ladder(level(8), 3), vec![Rule::Minimax]);
        assert_eq!(ladder(level(9), 5), vec![Rule::Random]);
    }

    #[test]
    fn test_seeded_ai_is_reproducible() {
        let b = Board::new(5);
        let mut a = OpponentAi::with_seed(3);
        let mut c = OpponentAi::with_seed(3);
        assert_eq!(a.best_move(&b, level(4)), c.best_move(&b, level(4)));
    }
}
