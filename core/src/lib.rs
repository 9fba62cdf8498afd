#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use observation::*;
pub use report::*;
pub use types::*;

mod adjacency;
mod board;
mod cell;
mod error;
mod generator;
mod observation;
mod report;
mod types;

/// Validated board dimensions and mine count.
///
/// A board needs at least one mine and at least one safe cell, so `mines` is
/// always in `1..rows * cols`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new((raw.rows, raw.cols), raw.mines)
    }
}

impl Serialize for GameConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("GameConfig", 3)?;
        state.serialize_field("rows", &self.size.0)?;
        state.serialize_field("cols", &self.size.1)?;
        state.serialize_field("mines", &self.mines)?;
        state.end()
    }
}

impl GameConfig {
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        let max = mult(rows, cols) - 1;
        if mines == 0 || mines > max {
            return Err(GameError::InvalidMineCount { mines, max });
        }
        Ok(Self {
            size: (rows, cols),
            mines,
        })
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row < self.size.0 && col < self.size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    /// Row-major linear position of `coords`.
    pub fn index_of(&self, coords: Coord2) -> Result<usize> {
        let (row, col) = self.validate_coords(coords)?;
        Ok(usize::from(row) * usize::from(self.size.1) + usize::from(col))
    }

    /// Inverse of [`GameConfig::index_of`]; `None` when `index >= rows * cols`.
    pub fn coords_of(&self, index: usize) -> Option<Coord2> {
        if index >= usize::from(self.total_cells()) {
            return None;
        }
        let cols = usize::from(self.size.1);
        Some(((index / cols) as Coord, (index % cols) as Coord))
    }
}

/// Where the mines are, decided once per game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(GameError::LayoutMismatch);
        }
        // at most 255 * 255 entries, always fits
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &(row, col) in mine_coords {
            if row >= size.0 || col >= size.1 {
                return Err(GameError::OutOfBounds { row, col });
            }
            mine_mask[(row, col).to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Config this layout satisfies, if it is a playable one.
    pub fn game_config(&self) -> Result<GameConfig> {
        GameConfig::new(self.size(), self.mine_count)
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Mine coordinates in row-major order.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Whether the game is still running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoOp,
    FlagSet,
    FlagCleared,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoOp,
    /// Number of safe cells newly revealed, cascade included.
    Revealed(CellCount),
    Exploded,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoOp)
    }

    pub const fn revealed_count(self) -> CellCount {
        match self {
            Self::Revealed(count) => count,
            Self::NoOp | Self::Exploded => 0,
        }
    }
}

/// Merges the outcomes of several reveals, an explosion wins over everything.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Exploded, _) | (_, Exploded) => Exploded,
            (Revealed(a), Revealed(b)) => Revealed(a + b),
            (Revealed(count), NoOp) | (NoOp, Revealed(count)) => Revealed(count),
            (NoOp, NoOp) => NoOp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_bad_dimensions() {
        assert_eq!(
            GameConfig::new((0, 5), 1),
            Err(GameError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(
            GameConfig::new((5, 0), 1),
            Err(GameError::InvalidDimensions { rows: 5, cols: 0 })
        );
    }

    #[test]
    fn config_rejects_mine_count_out_of_range() {
        assert_eq!(
            GameConfig::new((3, 3), 0),
            Err(GameError::InvalidMineCount { mines: 0, max: 8 })
        );
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(GameError::InvalidMineCount { mines: 9, max: 8 })
        );
        assert!(GameConfig::new((3, 3), 8).is_ok());
        assert_eq!(
            GameConfig::new((1, 1), 1),
            Err(GameError::InvalidMineCount { mines: 1, max: 0 })
        );
    }

    #[test]
    fn config_converts_linear_positions() {
        let config = GameConfig::new((3, 4), 2).unwrap();

        assert_eq!(config.index_of((2, 1)), Ok(9));
        assert_eq!(config.coords_of(9), Some((2, 1)));
        assert_eq!(config.coords_of(12), None);
        assert_eq!(
            config.index_of((3, 0)),
            Err(GameError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(config.safe_cells(), 10);
    }

    #[test]
    fn config_deserialization_is_validated() {
        let config: GameConfig =
            serde_json::from_str(r#"{"rows": 8, "cols": 8, "mines": 10}"#).unwrap();
        assert_eq!(config, GameConfig::new((8, 8), 10).unwrap());

        let too_many = serde_json::from_str::<GameConfig>(r#"{"rows": 2, "cols": 2, "mines": 4}"#);
        assert!(too_many.is_err());

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"rows":8,"cols":8,"mines":10}"#);
    }

    #[test]
    fn layout_counts_and_lists_mines() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 2), (1, 0), (0, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.mine_coords(), [(0, 2), (1, 0)]);
        assert!(layout[(1, 0)]);
        assert!(!layout.contains_mine((5, 5)));
        assert_eq!(layout.game_config(), GameConfig::new((2, 3), 2));
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds { row: 2, col: 0 })
        );
    }

    #[test]
    fn reveal_outcomes_merge() {
        use RevealOutcome::*;

        assert_eq!(Revealed(2) | Revealed(3), Revealed(5));
        assert_eq!(NoOp | Revealed(1), Revealed(1));
        assert_eq!(Revealed(4) | Exploded, Exploded);
        assert_eq!(NoOp | NoOp, NoOp);
        assert_eq!(Exploded.revealed_count(), 0);
    }
}
