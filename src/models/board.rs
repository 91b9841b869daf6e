//! Tic-Tac-Toe models

use serde::{Deserialize, Serialize};

/// Side length of the board; rows and columns are numbered from 1.
pub const BOARD_SIZE: u8 = 3;

/// Content of one square, also used for the winner field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = ".")]
    Empty,
    X,
    O,
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::Empty => f.write_str("."),
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

pub type Board = Vec<Vec<Mark>>;

/// Body of `PUT /board/{row}/{column}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkRequest {
    pub mark: Mark,
}

/// Response of `GET /board` and `PUT /board/{row}/{column}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub winner: Mark,
    pub board: Board,
}

impl Status {
    pub fn empty() -> Self {
        Self {
            winner: Mark::Empty,
            board: vec![vec![Mark::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Mark at 1-based `(row, column)`, if on the board.
    pub fn square(&self, row: u8, column: u8) -> Option<Mark> {
        let row = usize::from(row).checked_sub(1)?;
        let column = usize::from(column).checked_sub(1)?;
        self.board.get(row)?.get(column).copied()
    }
}
