use crate::grid::{Cell, Footprint, FootprintCells};

/// Static blocker on the battlefield. Obstacles up to 4×4; destroyed
/// obstacles never block anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub position: Cell,
    pub footprint: Footprint,
    pub destroyed: bool,
}

impl Obstacle {
    pub fn new(position: Cell, footprint: Footprint) -> Self {
        Self {
            position,
            footprint,
            destroyed: false,
        }
    }

    pub fn occupied_cells(&self) -> FootprintCells {
        self.footprint.cells(self.position)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.footprint.covers(self.position, cell)
    }

    /// Still standing and blocking.
    pub fn is_blocking(&self) -> bool {
        !self.destroyed
    }
}
