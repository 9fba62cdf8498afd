use alloc::vec::Vec;
use core::time::Duration;
use hashbrown::HashSet;
use ndarray::Array2;
use smallvec::SmallVec;
use web_time::Instant;

use crate::*;

/// A single game of Minesweeper from the first click to the final outcome.
///
/// Mines are not placed on construction. The first effective [`Board::reveal`]
/// asks the generator for a layout that keeps the revealed cell safe, so the
/// first move can never lose.
#[derive(Clone, Debug)]
pub struct Board<G = RandomMinefieldGenerator> {
    config: GameConfig,
    grid: Array2<Cell>,
    adjacency: Adjacency,
    generator: G,
    mines_placed: bool,
    revealed_safe_count: CellCount,
    flagged_count: CellCount,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl Board {
    /// Board with mines drawn from OS entropy.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new((rows, cols), mines)?;
        Ok(Self::with_generator(
            config,
            RandomMinefieldGenerator::from_os_rng(),
        ))
    }

    /// Board whose layouts are reproducible from `seed`.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomMinefieldGenerator::from_seed(seed))
    }
}

impl Board<FixedMinefieldGenerator> {
    /// Board that plays a known layout. The layout itself must leave the
    /// first revealed cell safe.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.game_config()?;
        Ok(Self::with_generator(
            config,
            FixedMinefieldGenerator::new(layout),
        ))
    }
}

impl<G: MinefieldGenerator> Board<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            grid: Self::fresh_grid(config),
            adjacency: Adjacency::new(config.size()),
            generator,
            mines_placed: false,
            revealed_safe_count: 0,
            flagged_count: 0,
            outcome: Outcome::InProgress,
            triggered_mine: None,
            started_at: None,
            finished_at: None,
        }
    }

    fn fresh_grid(config: GameConfig) -> Array2<Cell> {
        Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by flags, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.flagged_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    /// Time since mine placement, frozen once the game ends.
    pub fn elapsed(&self) -> Option<Duration> {
        let started_at = self.started_at?;
        let until = self.finished_at.unwrap_or_else(Instant::now);
        Some(until.saturating_duration_since(started_at))
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(&self.grid[coords.to_nd_index()])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter()
    }

    pub fn neighbors(&self, coords: Coord2) -> Result<&[Coord2]> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.adjacency.neighbors(coords))
    }

    /// What a renderer should show at `coords`.
    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let cell = *self.cell(coords)?;

        Ok(match (self.outcome, cell.state(), cell.is_mine()) {
            (_, CellState::Revealed, false) => CellView::Revealed(cell.adjacent_mine_count()),
            (_, CellState::Revealed, true) => CellView::Exploded,
            (Outcome::InProgress, CellState::Hidden, _) => CellView::Hidden,
            (Outcome::InProgress, CellState::Flagged, _) => CellView::Flagged,
            (Outcome::Won, _, true) => CellView::Flagged,
            // every safe cell is revealed after a win
            (Outcome::Won, _, false) => CellView::Hidden,
            (Outcome::Lost, CellState::Flagged, true) => CellView::Flagged,
            (Outcome::Lost, CellState::Flagged, false) => CellView::IncorrectFlag,
            (Outcome::Lost, CellState::Hidden, true) => CellView::Mine,
            (Outcome::Lost, CellState::Hidden, false) => CellView::Hidden,
        })
    }

    /// Mine positions in row-major order, empty before placement.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.grid
            .iter()
            .filter(|cell| cell.is_mine())
            .map(Cell::coords)
            .collect()
    }

    /// Final summary, available once the game is over.
    pub fn report(&self) -> Option<GameReport> {
        if !self.is_finished() {
            return None;
        }
        Some(GameReport {
            outcome: self.outcome,
            elapsed: self.elapsed().unwrap_or_default(),
            triggered_mine: self.triggered_mine,
            revealed_safe_count: self.revealed_safe_count,
            mines: self.mine_coords(),
        })
    }

    /// Whether the revealed cell at `coords` has exactly as many flagged
    /// neighbors as adjacent mines.
    pub fn is_satisfied(&self, coords: Coord2) -> Result<bool> {
        let cell = self.cell(coords)?;
        Ok(cell.is_revealed()
            && !cell.is_mine()
            && self.count_flagged_neighbors(coords) == cell.adjacent_mine_count())
    }

    /// Places the mines, keeping `safe` free of them, and starts the clock.
    pub fn place_mines(&mut self, safe: Coord2) -> Result<()> {
        let safe = self.config.validate_coords(safe)?;
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let layout = self.generator.generate(self.config, safe)?;
        if layout.size() != self.config.size() || layout.mine_count() != self.config.mines() {
            log::warn!(
                "Rejected layout of size {:?} with {} mines for board {:?}",
                layout.size(),
                layout.mine_count(),
                self.config
            );
            return Err(GameError::LayoutMismatch);
        }
        if layout.contains_mine(safe) {
            return Err(GameError::MineOnSafeCell);
        }

        let adjacency = &self.adjacency;
        for cell in self.grid.iter_mut() {
            let coords = cell.coords();
            if layout[coords] {
                cell.arm();
            } else {
                let count = adjacency
                    .neighbors(coords)
                    .iter()
                    .filter(|&&pos| layout[pos])
                    .count();
                // at most eight neighbors
                cell.set_adjacent_mine_count(count as u8);
            }
        }

        self.mines_placed = true;
        self.started_at = Some(Instant::now());
        log::debug!(
            "Placed {} mines on {:?} board, safe start at {:?}",
            self.config.mines(),
            self.config.size(),
            safe
        );
        Ok(())
    }

    /// Reveals the cell at `coords`, cascading through zero cells.
    ///
    /// Flagged and already revealed cells are left alone, and so is every cell
    /// once the game is over; those calls report [`RevealOutcome::NoOp`].
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.is_finished() || !self.grid[coords.to_nd_index()].is_hidden() {
            return Ok(RevealOutcome::NoOp);
        }
        if !self.mines_placed {
            self.place_mines(coords)?;
        }

        Ok(self.open_cell(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(FlagOutcome::NoOp);
        }

        Ok(match self.grid[coords.to_nd_index()].toggle_flag() {
            Some(true) => {
                self.flagged_count += 1;
                log::trace!("Flagged {:?}", coords);
                FlagOutcome::FlagSet
            }
            Some(false) => {
                self.flagged_count -= 1;
                log::trace!("Unflagged {:?}", coords);
                FlagOutcome::FlagCleared
            }
            None => FlagOutcome::NoOp,
        })
    }

    /// Chord: reveals every hidden neighbor of a satisfied cell.
    ///
    /// Any neighbor that explodes makes the whole chord [`RevealOutcome::Exploded`].
    pub fn reveal_neighbors(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if self.is_finished() || !self.is_satisfied(coords)? {
            return Ok(RevealOutcome::NoOp);
        }

        let targets: SmallVec<[Coord2; 8]> = self
            .adjacency
            .neighbors(coords)
            .iter()
            .copied()
            .filter(|&pos| self.grid[pos.to_nd_index()].is_hidden())
            .collect();
        log::trace!("Chord at {:?} opens {:?}", coords, targets);

        Ok(targets
            .into_iter()
            .map(|pos| self.open_cell(pos))
            .fold(RevealOutcome::NoOp, core::ops::BitOr::bitor))
    }

    /// Starts a new game with the same configuration and generator.
    pub fn reset(&mut self) {
        self.grid = Self::fresh_grid(self.config);
        self.mines_placed = false;
        self.revealed_safe_count = 0;
        self.flagged_count = 0;
        self.outcome = Outcome::InProgress;
        self.triggered_mine = None;
        self.started_at = None;
        self.finished_at = None;
        log::debug!("Reset {:?} board", self.config.size());
    }

    /// Opens a hidden cell and, from a zero cell, the connected zero region
    /// plus its numbered border. Uses an explicit worklist so deep cascades on
    /// large open boards do not grow the call stack.
    fn open_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if self.is_finished() {
            return RevealOutcome::NoOp;
        }

        let mut opened: CellCount = 0;
        let mut visited = HashSet::new();
        let mut to_visit = Vec::from([coords]);

        while let Some(visit_coords) = to_visit.pop() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let cell = &mut self.grid[visit_coords.to_nd_index()];
            // skip flagged or already revealed cells
            if !cell.reveal() {
                continue;
            }
            let (is_mine, adjacent_mines) = (cell.is_mine(), cell.adjacent_mine_count());

            if is_mine {
                self.revealed_safe_count += opened;
                self.triggered_mine = Some(visit_coords);
                log::debug!("Hit mine at {:?}", visit_coords);
                self.finish(Outcome::Lost);
                return RevealOutcome::Exploded;
            }

            opened += 1;
            log::trace!(
                "Opened cell at {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.adjacency
                        .neighbors(visit_coords)
                        .iter()
                        .copied()
                        .filter(|&pos| self.grid[pos.to_nd_index()].is_hidden())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        if opened == 0 {
            return RevealOutcome::NoOp;
        }

        self.revealed_safe_count += opened;
        if self.revealed_safe_count == self.config.safe_cells() {
            self.finish(Outcome::Won);
        }
        RevealOutcome::Revealed(opened)
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.is_finished() {
            return;
        }

        self.outcome = outcome;
        self.finished_at = Some(Instant::now());
        log::debug!(
            "Game ended: {:?} after {:?}",
            outcome,
            self.elapsed().unwrap_or_default()
        );
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        // at most eight neighbors
        self.adjacency
            .neighbors(coords)
            .iter()
            .filter(|&&pos| self.grid[pos.to_nd_index()].is_flagged())
            .count() as u8
    }
}
