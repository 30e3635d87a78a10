use crate::error::GameError;
use crate::game::{GameState, Mark};
use std::fmt;
use std::str::FromStr;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A Tic-Tac-Toe position.
///
/// The board is represented by a 9-element array in row-major order, where each element
/// corresponds to a cell. Player 'x' moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToeBoard {
    field: [Option<Mark>; 9],
    to_move: Mark,
}

impl Default for TicTacToeBoard {
    /// Creates an empty board with player 'x' to move.
    fn default() -> Self {
        Self {
            field: [None; 9],
            to_move: Mark::X,
        }
    }
}

impl TicTacToeBoard {
    /// Returns the mark in the given cell, if any. Rows and columns count from zero.
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        if row >= 3 || col >= 3 {
            return None;
        }
        self.field[row * 3 + col]
    }

    /// Returns the board after the player to move marks the given cell.
    pub fn make_move(&self, row: usize, col: usize) -> Result<Self, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        if row >= 3 || col >= 3 {
            return Err(GameError::IllegalMove {
                reason: format!("cell ({row}, {col}) is outside the board"),
            });
        }
        if self.field[row * 3 + col].is_some() {
            return Err(GameError::IllegalMove {
                reason: format!("cell ({row}, {col}) is already occupied"),
            });
        }
        Ok(self.place(row * 3 + col))
    }

    fn place(&self, index: usize) -> Self {
        let mut next = *self;
        next.field[index] = Some(self.to_move);
        next.to_move = self.to_move.opponent();
        next
    }

    fn is_full(&self) -> bool {
        self.field.iter().all(|x| x.is_some())
    }

    fn has_line(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.field[i] == Some(mark)))
    }
}

impl GameState for TicTacToeBoard {
    fn turn_owner(&self) -> Mark {
        self.to_move
    }

    /// Successors in row-major cell order.
    fn legal_successors(&self) -> Vec<Self> {
        if self.is_terminal() {
            return Vec::new();
        }

        self.field
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_none())
            .map(|(i, _)| self.place(i))
            .collect()
    }

    fn is_win(&self) -> bool {
        self.has_line(self.to_move.opponent())
    }

    fn is_draw(&self) -> bool {
        self.is_full() && !self.is_win()
    }

    fn canonical_key(&self) -> u128 {
        let mut hash = 0;
        for (i, &cell) in self.field.iter().enumerate() {
            let cell_value = match cell {
                None => 0,
                Some(Mark::X) => 1,
                Some(Mark::O) => 2,
            };
            hash += cell_value * 3u128.pow(i as u32);
        }
        hash
    }
}

impl FromStr for TicTacToeBoard {
    type Err = GameError;

    /// Parses nine cells of `x`, `o` or `.` in row-major order. Whitespace is ignored and
    /// the side to move is inferred from the piece counts. Positions where the side to move
    /// already owns a line are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != 9 {
            return Err(GameError::InvalidBoard {
                reason: format!("expected 9 cells, got {}", cells.len()),
            });
        }

        let mut field = [None; 9];
        for (i, c) in cells.into_iter().enumerate() {
            field[i] = parse_cell(c)?;
        }
        let board = Self {
            field,
            to_move: infer_turn(&field)?,
        };
        if board.has_line(board.to_move) {
            return Err(line_for_side_to_move(board.to_move));
        }
        Ok(board)
    }
}

pub(crate) fn parse_cell(c: char) -> Result<Option<Mark>, GameError> {
    match c.to_ascii_lowercase() {
        'x' => Ok(Some(Mark::X)),
        'o' => Ok(Some(Mark::O)),
        '.' => Ok(None),
        other => Err(GameError::InvalidBoard {
            reason: format!("unexpected character '{other}'"),
        }),
    }
}

/// Only the player who just moved can own a line in a reachable position.
pub(crate) fn line_for_side_to_move(mark: Mark) -> GameError {
    GameError::InvalidBoard {
        reason: format!("\"{mark}\" is to move but already owns a line"),
    }
}

/// 'x' moves first, so it is 'x' to move on equal counts and 'o' to move when 'x' is one ahead.
pub(crate) fn infer_turn(field: &[Option<Mark>]) -> Result<Mark, GameError> {
    let x_count = field.iter().filter(|&&c| c == Some(Mark::X)).count();
    let o_count = field.iter().filter(|&&c| c == Some(Mark::O)).count();
    match x_count.checked_sub(o_count) {
        Some(0) => Ok(Mark::X),
        Some(1) => Ok(Mark::O),
        _ => Err(GameError::InvalidBoard {
            reason: format!("impossible piece counts: x={x_count}, o={o_count}"),
        }),
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\"{}\" to move:", self.to_move)?;
        for row in self.field.chunks(3) {
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
