use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: Coord, cols: Coord },
    #[error("Invalid mine count {mines}, expected between 1 and {max}")]
    InvalidMineCount { mines: CellCount, max: CellCount },
    #[error("Coordinates ({row}, {col}) are out of bounds")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Mines have already been placed")]
    MinesAlreadyPlaced,
    #[error("Mine layout does not match the board configuration")]
    LayoutMismatch,
    #[error("Mine layout puts a mine on the first revealed cell")]
    MineOnSafeCell,
}

pub type Result<T> = core::result::Result<T, GameError>;
