use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where the mines go once the first revealed cell is known.
pub trait MinefieldGenerator {
    /// Returns a layout for `config` with no mine on `safe`.
    ///
    /// The board checks the result and refuses a layout with the wrong size,
    /// the wrong mine count, or a mine on `safe`.
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Result<MineLayout>;
}
