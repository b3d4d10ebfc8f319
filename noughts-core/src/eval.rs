//! Exhaustive game-tree evaluation for the 3×3 board

use crate::board::{Board, Cell, Mark};
use rustc_hash::FxHashMap;

/// Score of a win found at depth 0
pub const WIN_SCORE: i32 = 10;

/// Root candidates: centre, then corners, then edges. Equal scores keep the earliest.
const ROOT_ORDER: [usize; 9] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

/// Score a finished position from `me`'s point of view, `None` if play continues.
/// Faster wins and slower losses score better.
pub fn terminal_score(board: &Board, me: Mark, depth: i32) -> Option<i32> {
    if board.check_win(me) {
        Some(WIN_SCORE - depth)
    } else if board.check_win(me.other()) {
        Some(depth - WIN_SCORE)
    } else if board.is_full() {
        Some(0)
    } else {
        None
    }
}

/// Game-theoretically optimal cell for `me` on a 3×3 board.
///
/// Among cells with the best minimax score the centre is preferred, then
/// the lowest free corner, then the lowest free edge. Returns `None` for
/// other board sizes and when no empty cell is left.
pub fn minimax_move(board: &Board, me: Mark) -> Option<usize> {
    if board.size() != 3 {
        return None;
    }

    let mut scratch = board.clone();
    let mut memo = FxHashMap::default();
    let mut best: Option<(usize, i32)> = None;

    for index in ROOT_ORDER {
        if scratch.place(index, me).is_err() {
            continue;
        }
        let score = minimax(&mut scratch, me, 0, false, &mut memo);
        scratch.clear(index);

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

/// Minimax value of `board` for `me`, with the other side to move when
/// `maximizing` is false. `depth` counts plies below the root move.
fn minimax(
    board: &mut Board,
    me: Mark,
    depth: i32,
    maximizing: bool,
    memo: &mut FxHashMap<u32, i32>,
) -> i32 {
    if let Some(score) = terminal_score(board, me, depth) {
        return score;
    }

    // Depth and side to move are both implied by the position for a fixed root
    let key = encode(board);
    if let Some(&score) = memo.get(&key) {
        return score;
    }

    let mover = if maximizing { me } else { me.other() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for index in board.empty_cells() {
        if board.place(index, mover).is_err() {
            continue;
        }
        let score = minimax(board, me, depth + 1, !maximizing, memo);
        board.clear(index);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    memo.insert(key, best);
    best
}

/// Base-3 position key
fn encode(board: &Board) -> u32 {
    board.cells().iter().fold(0, |key, cell| {
        let digit = match cell {
            Cell::Empty => 0,
            Cell::Marked(Mark::Player) => 1,
            Cell::Marked(Mark::Opponent) => 2,
        };
        key * 3 + digit
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_scores() {
        assert_eq!(terminal_score(&board("OOO XX. X.."), Mark::Opponent, 2), Some(8));
        assert_eq!(terminal_score(&board("OOO XX. X.."), Mark::Player, 2), Some(-8));
        assert_eq!(terminal_score(&board("XOX XOO OXX"), Mark::Opponent, 0), Some(0));
        assert_eq!(terminal_score(&board("X.. ... ..."), Mark::Opponent, 0), None);
    }

    #[test]
    fn test_takes_immediate_win() {
        assert_eq!(minimax_move(&board("OO. XX. X.."), Mark::Opponent), Some(2));
    }

    #[test]
    fn test_blocks_forced_loss() {
        assert_eq!(minimax_move(&board("XX. .O. ..."), Mark::Opponent), Some(2));
    }

    #[test]
    fn test_answers_corner_with_centre() {
        // Every non-centre reply to a corner opening loses
        assert_eq!(minimax_move(&board("X.. ... ..."), Mark::Opponent), Some(4));
    }

    #[test]
    fn test_equal_scores_prefer_centre_then_corners() {
        // Every opening draws
        assert_eq!(minimax_move(&Board::new(3), Mark::Opponent), Some(4));
        // Centre taken: every corner draws, every edge loses
        assert_eq!(minimax_move(&board("... .X. ..."), Mark::Opponent), Some(0));
        assert_eq!(minimax_move(&board("O.. .X. ..X"), Mark::Opponent), Some(2));
    }

    #[test]
    fn test_works_for_either_mark() {
        assert_eq!(minimax_move(&board("XX. OO. ..."), Mark::Player), Some(2));
    }

    #[test]
    fn test_none_when_full_or_not_3x3() {
        assert_eq!(minimax_move(&board("XOX XOO OXX"), Mark::Opponent), None);
        assert_eq!(minimax_move(&Board::new(4), Mark::Opponent), None);
    }

    #[test]
    fn test_encode_distinguishes_marks() {
        assert_ne!(encode(&board("X.. ... ...")), encode(&board("O.. ... ...")));
        assert_eq!(encode(&Board::new(3)), 0);
    }
}
