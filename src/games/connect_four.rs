use crate::error::GameError;
use crate::game::{GameState, Mark};
use crate::games::tic_tac_toe::{infer_turn, line_for_side_to_move, parse_cell};
use std::fmt;
use std::str::FromStr;

/// Number of columns a piece can be dropped into.
pub const COLUMNS: usize = 7;
/// Number of rows; row 0 is the top of the board.
pub const ROWS: usize = 6;

const CONNECT: usize = 4;
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A Connect Four position: pieces fall to the lowest free cell of the chosen column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectFourBoard {
    field: [[Option<Mark>; COLUMNS]; ROWS],
    to_move: Mark,
}

impl Default for ConnectFourBoard {
    /// Creates an empty board with player 'x' to move.
    fn default() -> Self {
        Self {
            field: [[None; COLUMNS]; ROWS],
            to_move: Mark::X,
        }
    }
}

impl ConnectFourBoard {
    /// Returns the mark in the given cell, if any. Row 0 is the top row.
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.field.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Returns `true` if no piece fits into `col`. Columns outside the board are never full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.cell(0, col).is_some()
    }

    /// Number of pieces stacked in `col`, zero for columns outside the board.
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS).filter(|&row| self.cell(row, col).is_some()).count()
    }

    /// Returns the board after the player to move drops a piece into `col`.
    pub fn make_move(&self, col: usize) -> Result<Self, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        if col >= COLUMNS {
            return Err(GameError::IllegalMove {
                reason: format!("column {col} is outside the board"),
            });
        }
        if self.is_column_full(col) {
            return Err(GameError::IllegalMove {
                reason: format!("column {col} is full"),
            });
        }
        Ok(self.drop_piece(col))
    }

    fn drop_piece(&self, col: usize) -> Self {
        let mut next = *self;
        if let Some(row) = (0..ROWS).rev().find(|&row| self.field[row][col].is_none()) {
            next.field[row][col] = Some(self.to_move);
        }
        next.to_move = self.to_move.opponent();
        next
    }

    fn is_full(&self) -> bool {
        (0..COLUMNS).all(|col| self.is_column_full(col))
    }

    fn has_line(&self, mark: Mark) -> bool {
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                if self.field[row][col] != Some(mark) {
                    continue;
                }
                let connected = |(dr, dc): (isize, isize)| {
                    (1..CONNECT as isize).all(|step| {
                        let r = row as isize + dr * step;
                        let c = col as isize + dc * step;
                        r >= 0
                            && c >= 0
                            && self.cell(r as usize, c as usize) == Some(mark)
                    })
                };
                if DIRECTIONS.into_iter().any(connected) {
                    return true;
                }
            }
        }
        false
    }
}

impl GameState for ConnectFourBoard {
    fn turn_owner(&self) -> Mark {
        self.to_move
    }

    /// Successors in increasing column order; full columns are skipped.
    fn legal_successors(&self) -> Vec<Self> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..COLUMNS)
            .filter(|&col| !self.is_column_full(col))
            .map(|col| self.drop_piece(col))
            .collect()
    }

    fn is_win(&self) -> bool {
        self.has_line(self.to_move.opponent())
    }

    fn is_draw(&self) -> bool {
        self.is_full() && !self.is_win()
    }

    /// Occupancy masks of 'x' in the high and 'o' in the low 64 bits.
    fn canonical_key(&self) -> u128 {
        let mut x_bits = 0u64;
        let mut o_bits = 0u64;
        for (i, cell) in self.field.iter().flatten().enumerate() {
            match cell {
                Some(Mark::X) => x_bits |= 1 << i,
                Some(Mark::O) => o_bits |= 1 << i,
                None => {}
            }
        }
        (u128::from(x_bits) << 64) | u128::from(o_bits)
    }
}

impl FromStr for ConnectFourBoard {
    type Err = GameError;

    /// Parses 42 cells of `x`, `o` or `.`, top row first. Whitespace is ignored and the side
    /// to move is inferred from the piece counts. Floating pieces and positions where the side
    /// to move already owns a line are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != ROWS * COLUMNS {
            return Err(GameError::InvalidBoard {
                reason: format!("expected {} cells, got {}", ROWS * COLUMNS, cells.len()),
            });
        }

        let mut field = [[None; COLUMNS]; ROWS];
        for (i, c) in cells.into_iter().enumerate() {
            field[i / COLUMNS][i % COLUMNS] = parse_cell(c)?;
        }
        for row in 0..ROWS - 1 {
            for col in 0..COLUMNS {
                if field[row][col].is_some() && field[row + 1][col].is_none() {
                    return Err(GameError::InvalidBoard {
                        reason: format!("piece at row {row}, column {col} is floating"),
                    });
                }
            }
        }
        let flat: Vec<Option<Mark>> = field.iter().flatten().copied().collect();
        let board = Self {
            field,
            to_move: infer_turn(&flat)?,
        };
        if board.has_line(board.to_move) {
            return Err(line_for_side_to_move(board.to_move));
        }
        Ok(board)
    }
}

impl fmt::Display for ConnectFourBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\"{}\" to move:", self.to_move)?;
        for row in &self.field {
            for cell in row {
                match cell {
                    Some(mark) => write!(f, " {mark}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[usize]) -> ConnectFourBoard {
        moves
            .iter()
            .fold(ConnectFourBoard::default(), |board, &col| {
                board.make_move(col).unwrap()
            })
    }

    #[test]
    fn pieces_fall_to_the_bottom() {
        let board = play(&[3, 3]);
        assert_eq!(board.cell(ROWS - 1, 3), Some(Mark::X));
        assert_eq!(board.cell(ROWS - 2, 3), Some(Mark::O));
        assert_eq!(board.column_height(3), 2);
        assert_eq!(board.turn_owner(), Mark::X);
    }

    #[test]
    fn full_columns_are_not_successors() {
        let board = play(&[2, 2, 2, 2, 2, 2]);
        assert!(board.is_column_full(2));
        let successors = board.legal_successors();
        assert_eq!(successors.len(), COLUMNS - 1);
        assert!(successors.iter().all(|s| s.column_height(2) == ROWS));
        assert!(matches!(
            board.make_move(2),
            Err(GameError::IllegalMove { .. })
        ));
    }

    #[test]
    fn successors_follow_column_order() {
        let board = ConnectFourBoard::default();
        for (col, successor) in board.legal_successors().iter().enumerate() {
            assert_eq!(successor.column_height(col), 1);
        }
    }

    #[test]
    fn detects_horizontal_win() {
        let board = play(&[0, 0, 1, 1, 2, 2, 3]);
        assert!(board.is_win());
        assert_eq!(board.winner(), Some(Mark::X));
        assert!(board.legal_successors().is_empty());
        assert_eq!(board.make_move(5), Err(GameError::GameOver));
    }

    #[test]
    fn detects_vertical_win() {
        let board = play(&[0, 1, 0, 1, 0, 1, 6, 1]);
        assert!(board.is_win());
        assert_eq!(board.winner(), Some(Mark::O));
    }

    #[test]
    fn detects_both_diagonals() {
        let rising: ConnectFourBoard = "
            .......
            .......
            ...x...
            ..xo...
            .xoo...
            xoxxo..
        "
        .parse()
        .unwrap();
        assert!(rising.is_win());
        assert_eq!(rising.winner(), Some(Mark::X));

        let falling: ConnectFourBoard = "
            .......
            .......
            ...o...
            ...xo..
            ..oxxo.
            ..xoxxo
        "
        .parse()
        .unwrap();
        assert!(falling.is_win());
        assert_eq!(falling.winner(), Some(Mark::O));
    }

    #[test]
    fn three_in_a_row_is_not_a_win() {
        let board = play(&[0, 0, 1, 1, 2]);
        assert!(!board.is_win());
        assert!(!board.is_terminal());
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let board: ConnectFourBoard = "
            xxoxxox
            ooxooxo
            xxoxxox
            ooxooxo
            xxoxxox
            ooxooxo
        "
        .parse()
        .unwrap();
        assert!(board.is_draw());
        assert!(board.is_terminal());
        assert!(board.legal_successors().is_empty());
    }

    #[test]
    fn keys_distinguish_move_order_results() {
        let a = play(&[0, 1]);
        let b = play(&[1, 0]);
        assert_ne!(a.canonical_key(), b.canonical_key());
        assert_eq!(play(&[0, 1, 2]).canonical_key(), play(&[2, 1, 0]).canonical_key());
    }

    #[test]
    fn parse_rejects_floating_pieces() {
        let floating = format!("x{}", ".".repeat(41));
        assert!(matches!(
            floating.parse::<ConnectFourBoard>(),
            Err(GameError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn parse_rejects_line_for_side_to_move() {
        let board = "
            .......
            .......
            x......
            xo.....
            xo.....
            xoo....
        "
        .parse::<ConnectFourBoard>();
        assert!(matches!(board, Err(GameError::InvalidBoard { .. })));
    }

    #[test]
    fn rejects_out_of_range_column() {
        let board = ConnectFourBoard::default();
        assert!(matches!(
            board.make_move(COLUMNS),
            Err(GameError::IllegalMove { .. })
        ));
        assert!(!board.is_column_full(COLUMNS));
        assert_eq!(board.column_height(COLUMNS + 3), 0);
    }
}
