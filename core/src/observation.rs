use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible snapshot of a board, safe to hand to a renderer or send
/// elsewhere: it never contains hidden mine positions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub outcome: Outcome,
    pub revealed: Array2<Option<u8>>,
    pub flags: Array2<bool>,
}

impl Observation {
    pub fn from_board<G: MinefieldGenerator>(board: &Board<G>) -> Self {
        let size = board.size();
        let mut revealed = Array2::from_elem(size.to_nd_index(), None);
        let mut flags = Array2::from_elem(size.to_nd_index(), false);

        for cell in board.cells() {
            let index = cell.coords().to_nd_index();
            match cell.state() {
                CellState::Hidden => {}
                // a revealed mine only exists on a lost board, keep it out of the snapshot
                CellState::Revealed if cell.is_mine() => {}
                CellState::Revealed => revealed[index] = Some(cell.adjacent_mine_count()),
                CellState::Flagged => flags[index] = true,
            }
        }

        Self {
            size,
            mine_count: board.mine_count(),
            outcome: board.outcome(),
            revealed,
            flags,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (usize::from(self.size.0), usize::from(self.size.1));
        if self.revealed.dim() != expected || self.flags.dim() != expected {
            return Err(GameError::LayoutMismatch);
        }
        GameConfig::new(self.size, self.mine_count)?;
        Ok(())
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|count| count.is_some()).count()
    }
}
