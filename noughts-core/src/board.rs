//! N×N board with row-major cell indexing

use crate::error::{IllegalMove, ParseBoardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest supported board edge
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board edge
pub const MAX_BOARD_SIZE: usize = 10;

/// The eight lines of a 3×3 board: rows, columns, main diagonal, anti-diagonal
pub const LINES_3X3: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// ============================================================================
// MARKS AND CELLS
// ============================================================================

/// The symbol a side places on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The human side, always first to move
    #[serde(rename = "X")]
    Player,
    /// The automated side
    #[serde(rename = "O")]
    Opponent,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// State of one square
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Square board of `size * size` cells, index = `row * size + col`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Empty board with the given edge length
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0, "board size must be positive");
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build from row-major cells; `None` if the count is not a perfect square
    pub fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        let size = (cells.len() as f64).sqrt().round() as usize;
        if size == 0 || size * size != cells.len() {
            return None;
        }
        Some(Self { size, cells })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Edge length N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells, N²
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// No marks placed yet
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// Indices of all empty cells, ascending
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Return a copy with `mark` placed at `index`
    pub fn apply_move(&self, index: usize, mark: Mark) -> Result<Board, IllegalMove> {
        let mut next = self.clone();
        next.place(index, mark)?;
        Ok(next)
    }

    /// In-place variant of [`Board::apply_move`], used by search
    pub(crate) fn place(&mut self, index: usize, mark: Mark) -> Result<(), IllegalMove> {
        match self.cells.get(index) {
            None => Err(IllegalMove::OutOfRange {
                index,
                size: self.size,
            }),
            Some(Cell::Marked(existing)) => Err(IllegalMove::Occupied {
                index,
                mark: *existing,
            }),
            Some(Cell::Empty) => {
                self.cells[index] = Cell::Marked(mark);
                Ok(())
            }
        }
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }

    // ========================================================================
    // TERMINAL DETECTION
    // ========================================================================

    /// Every row, every column, the main diagonal and the anti-diagonal
    pub fn lines(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        let n = self.size;
        let rows = (0..n).map(move |r| (0..n).map(|c| r * n + c).collect::<Vec<_>>());
        let cols = (0..n).map(move |c| (0..n).map(|r| r * n + c).collect::<Vec<_>>());
        let main = std::iter::once((0..n).map(|i| i * n + i).collect::<Vec<_>>());
        let anti = std::iter::once((0..n).map(|i| i * n + (n - 1 - i)).collect::<Vec<_>>());
        rows.chain(cols).chain(main).chain(anti)
    }

    /// True if some full line is entirely `mark`
    pub fn check_win(&self, mark: Mark) -> bool {
        let target = Cell::Marked(mark);
        self.lines()
            .any(|line| line.iter().all(|&i| self.cells[i] == target))
    }

    /// Full board with no winning line for either mark
    pub fn is_draw(&self) -> bool {
        self.is_full() && !self.check_win(Mark::Player) && !self.check_win(Mark::Opponent)
    }

    pub fn winner(&self) -> Option<Mark> {
        [Mark::Player, Mark::Opponent]
            .into_iter()
            .find(|&m| self.check_win(m))
    }
}

/// Free-function form of [`Board::apply_move`]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, IllegalMove> {
    board.apply_move(index, mark)
}

/// Free-function form of [`Board::check_win`]
pub fn check_win(board: &Board, mark: Mark) -> bool {
    board.check_win(mark)
}

/// Free-function form of [`Board::is_draw`]
pub fn is_draw(board: &Board) -> bool {
    board.is_draw()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row
                .iter()
                .map(|c| c.mark().map_or('.', Mark::symbol))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses `X`, `O` and `.` (or `_`) cells; whitespace and `|` are ignored
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .map(|c| match c {
                'X' | 'x' => Ok(Cell::Marked(Mark::Player)),
                'O' | 'o' => Ok(Cell::Marked(Mark::Opponent)),
                '.' | '_' => Ok(Cell::Empty),
                other => Err(ParseBoardError::InvalidCell(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let count = cells.len();
        Board::from_cells(cells).ok_or(ParseBoardError::NotSquare(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(size: usize, indices: &[usize], mark: Mark) -> Board {
        let mut board = Board::new(size);
        for &i in indices {
            board.place(i, mark).unwrap();
        }
        board
    }

    #[test]
    fn test_every_line_wins_for_every_size() {
        for n in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
            let lines: Vec<_> = Board::new(n).lines().collect();
            assert_eq!(lines.len(), 2 * n + 2);
            for line in lines {
                for mark in [Mark::Player, Mark::Opponent] {
                    let board = filled(n, &line, mark);
                    assert!(board.check_win(mark), "n={} line={:?}", n, line);
                    assert!(!board.check_win(mark.other()));
                }
            }
        }
    }

    #[test]
    fn test_no_win_on_empty_or_incomplete() {
        for n in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
            let board = Board::new(n);
            assert!(!board.check_win(Mark::Player));
            assert!(!board.check_win(Mark::Opponent));

            // A row missing its last cell
            let partial: Vec<usize> = (0..n - 1).collect();
            let board = filled(n, &partial, Mark::Player);
            assert!(!board.check_win(Mark::Player));
        }
    }

    #[test]
    fn test_broken_diagonal_does_not_win() {
        // 4x4: cells (0,1) (1,2) (2,3) (3,0) wrap around, not a full diagonal
        let board = filled(4, &[1, 6, 11, 12], Mark::Player);
        assert!(!board.check_win(Mark::Player));
    }

    #[test]
    fn test_apply_move_rejects_and_leaves_board() {
        let board: Board = "X........".parse().unwrap();
        let before = board.clone();

        assert_eq!(
            board.apply_move(0, Mark::Opponent),
            Err(IllegalMove::Occupied { index: 0, mark: Mark::Player })
        );
        assert_eq!(
            board.apply_move(9, Mark::Opponent),
            Err(IllegalMove::OutOfRange { index: 9, size: 3 })
        );
        assert_eq!(board, before);

        let next = board.apply_move(4, Mark::Opponent).unwrap();
        assert_eq!(next.get(4), Some(Cell::Marked(Mark::Opponent)));
        assert_eq!(next.mark_count(), 2);
        assert_eq!(board.mark_count(), 1);
    }

    #[test]
    fn test_full_board_draw() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        assert!(board.is_full());
        assert!(!board.check_win(Mark::Player));
        assert!(!board.check_win(Mark::Opponent));
        assert!(board.is_draw());
    }

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        let board: Board = "XXX OOX OXO".parse().unwrap();
        assert!(board.is_full());
        assert!(!board.is_draw());
        assert_eq!(board.winner(), Some(Mark::Player));
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "X.O|...|..X".parse().unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.to_string(), "X.O\n...\n..X\n");
        assert_eq!(board.empty_cells(), vec![1, 3, 4, 5, 6, 7]);

        assert_eq!("X.O.".parse::<Board>().map(|b| b.size()), Ok(2));
        assert_eq!("X.O..".parse::<Board>(), Err(ParseBoardError::NotSquare(5)));
        assert_eq!("X?".parse::<Board>(), Err(ParseBoardError::InvalidCell('?')));
    }

    #[test]
    fn test_index_of() {
        let board = Board::new(4);
        assert_eq!(board.index_of(2, 3), Some(11));
        assert_eq!(board.index_of(4, 0), None);
    }
}
