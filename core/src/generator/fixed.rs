use super::*;

/// Replays a known layout, for tests and for restarting the same puzzle.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    layout: MineLayout,
}

impl FixedMinefieldGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Result<MineLayout> {
        config.validate_coords(safe)?;
        if self.layout.size() != config.size() || self.layout.mine_count() != config.mines() {
            return Err(GameError::LayoutMismatch);
        }
        if self.layout.contains_mine(safe) {
            return Err(GameError::MineOnSafeCell);
        }
        Ok(self.layout.clone())
    }
}
