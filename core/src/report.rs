use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// End-of-game summary handed to the caller once the outcome is terminal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub outcome: Outcome,
    /// From mine placement to the final move.
    pub elapsed: Duration,
    pub triggered_mine: Option<Coord2>,
    pub revealed_safe_count: CellCount,
    /// Full mine layout for end-of-game disclosure, row-major.
    pub mines: Vec<Coord2>,
}

impl GameReport {
    pub fn is_win(&self) -> bool {
        matches!(self.outcome, Outcome::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn won_report_has_no_triggered_mine() {
        let layout = MineLayout::from_mine_coords((2, 1), &[(0, 0)]).unwrap();
        let mut board = Board::from_layout(layout).unwrap();

        board.reveal((1, 0)).unwrap();
        let report = board.report().unwrap();

        assert!(report.is_win());
        assert_eq!(report.triggered_mine, None);
        assert_eq!(report.mines, [(0, 0)]);
        assert_eq!(report.revealed_safe_count, 1);
    }

    #[test]
    fn report_serializes_for_the_caller() {
        let report = GameReport {
            outcome: Outcome::Lost,
            elapsed: Duration::from_secs(3),
            triggered_mine: Some((1, 2)),
            revealed_safe_count: 4,
            mines: alloc::vec![(1, 2)],
        };

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["outcome"], "Lost");
        assert_eq!(value["triggered_mine"], serde_json::json!([1, 2]));
        assert_eq!(value["elapsed"]["secs"], 3);
    }
}
