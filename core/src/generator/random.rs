use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniformly random layout that never puts a mine on the first revealed cell.
///
/// Mines are sampled from every cell. When the first revealed cell is among
/// them, it is dropped and a replacement is drawn from the cells that are
/// neither the safe cell nor already mined.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R = SmallRng> {
    rng: R,
}

impl RandomMinefieldGenerator<SmallRng> {
    /// Deterministic generator, same seed gives the same layouts.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> RandomMinefieldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Result<MineLayout> {
        let safe_index = config.index_of(safe)?;
        let total_cells = usize::from(config.total_cells());

        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        {
            let cells = mines.as_slice_mut().ok_or(GameError::LayoutMismatch)?;
            for place in index::sample(&mut self.rng, total_cells, usize::from(config.mines())) {
                cells[place] = true;
            }

            if cells[safe_index] {
                cells[safe_index] = false;
                // a free cell always exists since mines < total cells
                let replacement = loop {
                    let candidate = self.rng.random_range(0..total_cells);
                    if candidate != safe_index && !cells[candidate] {
                        break candidate;
                    }
                };
                cells[replacement] = true;
                log::debug!(
                    "Moved mine off first reveal at {:?} to index {}",
                    safe,
                    replacement
                );
            }
        }

        let layout = MineLayout::from_mine_mask(mines)?;
        if layout.mine_count() != config.mines() {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines()
            );
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new((9, 9), 10).unwrap();

        let a = RandomMinefieldGenerator::from_seed(7).generate(config, (4, 4)).unwrap();
        let b = RandomMinefieldGenerator::from_seed(7).generate(config, (4, 4)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn never_mines_the_safe_cell() {
        let config = GameConfig::new((4, 4), 15).unwrap();

        for seed in 0..200 {
            let safe = ((seed % 4) as Coord, (seed / 4 % 4) as Coord);
            let layout = RandomMinefieldGenerator::from_seed(seed)
                .generate(config, safe)
                .unwrap();

            assert!(!layout.contains_mine(safe), "seed {seed}");
            assert_eq!(layout.mine_count(), 15, "seed {seed}");
        }
    }

    #[test]
    fn rejects_out_of_bounds_safe_cell() {
        let config = GameConfig::new((3, 3), 1).unwrap();
        let result = RandomMinefieldGenerator::from_seed(1).generate(config, (3, 0));

        assert_eq!(result, Err(GameError::OutOfBounds { row: 3, col: 0 }));
    }
}
