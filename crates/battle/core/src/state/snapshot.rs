use crate::config::BattleConfig;
use crate::grid::{Cell, GridDimensions};
use crate::state::{Obstacle, PlayerId, Unit, UnitId};

/// Complete read-only view of one battle at one instant.
///
/// Every engine query takes a snapshot plus query parameters and returns a
/// fresh value; the engine retains nothing between calls. The authoritative
/// game loop guarantees a snapshot is never mutated mid-call.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub grid: GridDimensions,
    pub config: BattleConfig,
    pub units: Vec<Unit>,
    pub obstacles: Vec<Obstacle>,
}

impl BattleSnapshot {
    pub fn new(grid: GridDimensions) -> Self {
        Self {
            grid,
            config: BattleConfig::default(),
            units: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    pub fn with_units(mut self, units: Vec<Unit>) -> Self {
        self.units = units;
        self
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn units_of(&self, owner: PlayerId) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |unit| unit.owner == owner)
    }

    /// The living unit whose footprint covers `cell`, if any. The game loop
    /// guarantees at most one.
    pub fn living_unit_at(&self, cell: Cell) -> Option<&Unit> {
        self.units
            .iter()
            .find(|unit| unit.is_living() && unit.occupies(cell))
    }

    /// The non-destroyed obstacle covering `cell`, if any.
    pub fn obstacle_at(&self, cell: Cell) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|obstacle| obstacle.is_blocking() && obstacle.occupies(cell))
    }
}
