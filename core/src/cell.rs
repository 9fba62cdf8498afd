use serde::{Deserialize, Serialize};

use crate::*;

/// Player-controlled state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// One grid position owned by a [`Board`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    mine: bool,
    adjacent_mines: u8,
    state: CellState,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            mine: false,
            adjacent_mines: 0,
            state: CellState::Hidden,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn row(&self) -> Coord {
        self.coords.0
    }

    pub const fn col(&self) -> Coord {
        self.coords.1
    }

    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    /// Number of mines among the neighbors. Not meaningful for mine cells.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub(crate) fn arm(&mut self) {
        self.mine = true;
        self.adjacent_mines = 0;
    }

    pub(crate) fn set_adjacent_mine_count(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    /// Hidden -> Revealed. Returns whether the cell changed.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.is_hidden() {
            self.state = CellState::Revealed;
            true
        } else {
            false
        }
    }

    /// Hidden <-> Flagged. Returns the new flag state, or `None` for revealed cells.
    pub(crate) fn toggle_flag(&mut self) -> Option<bool> {
        match self.state {
            CellState::Hidden => {
                self.state = CellState::Flagged;
                Some(true)
            }
            CellState::Flagged => {
                self.state = CellState::Hidden;
                Some(false)
            }
            CellState::Revealed => None,
        }
    }
}

/// What a renderer should draw for a cell.
///
/// Mines are only disclosed once the game is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Unflagged mine shown after a loss.
    Mine,
    /// The mine that ended the game.
    Exploded,
    /// Flag placed on a safe cell, shown after a loss.
    IncorrectFlag,
}

impl CellView {
    /// Whether the cell is visually still covered.
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::IncorrectFlag)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
