//! Bingo win detection over the row-major 5x5 completion grid

use crate::consts::{BOARD_SIZE, CARD_CELLS};

/// A complete line on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinLine {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right
    MainDiagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl WinLine {
    /// Row-major cell indices covered by this line
    pub fn cells(&self) -> [usize; BOARD_SIZE] {
        std::array::from_fn(|i| match *self {
            WinLine::Row(r) => r * BOARD_SIZE + i,
            WinLine::Column(c) => i * BOARD_SIZE + c,
            WinLine::MainDiagonal => i * BOARD_SIZE + i,
            WinLine::AntiDiagonal => i * BOARD_SIZE + (BOARD_SIZE - 1 - i),
        })
    }

    /// All 12 lines in check order: rows, columns, diagonals
    pub fn all() -> impl Iterator<Item = WinLine> {
        (0..BOARD_SIZE)
            .map(WinLine::Row)
            .chain((0..BOARD_SIZE).map(WinLine::Column))
            .chain([WinLine::MainDiagonal, WinLine::AntiDiagonal])
    }
}

/// First fully completed line, if any
pub fn winning_line(completed: &[bool; CARD_CELLS]) -> Option<WinLine> {
    WinLine::all().find(|line| line.cells().iter().all(|&i| completed[i]))
}

/// True if any row, column or diagonal is fully completed
pub fn has_win(completed: &[bool; CARD_CELLS]) -> bool {
    winning_line(completed).is_some()
}
