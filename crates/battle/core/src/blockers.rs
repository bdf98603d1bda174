//! Blocking resolver: the single source of occupancy truth.
//!
//! Vision and movement both consume the set produced here; neither is
//! allowed to re-derive occupancy on its own, so the two can never drift
//! apart on what counts as a blocker.

use crate::grid::CellSet;
use crate::state::{BattleSnapshot, UnitId};

/// Policy knobs for one blocker query.
///
/// Vision ignores corpses (a body does not stop sight); movement counts
/// them (a body still occupies the cell until cleared). Excluded ids let
/// an observer or an intended target never block itself.
#[derive(Clone, Copy, Debug)]
pub struct BlockerPolicy<'a> {
    pub include_corpses: bool,
    pub exclude: &'a [UnitId],
}

impl<'a> BlockerPolicy<'a> {
    pub fn vision(exclude: &'a [UnitId]) -> Self {
        Self {
            include_corpses: false,
            exclude,
        }
    }

    pub fn movement(exclude: &'a [UnitId]) -> Self {
        Self {
            include_corpses: true,
            exclude,
        }
    }
}

/// Expands qualifying obstacles and units into a unified set of blocking
/// cells. Non-destroyed obstacles always block; units block per policy.
/// Cells outside the grid are dropped.
pub fn blocker_cells(snapshot: &BattleSnapshot, policy: BlockerPolicy<'_>) -> CellSet {
    let mut blockers = CellSet::new();

    for obstacle in &snapshot.obstacles {
        if !obstacle.is_blocking() {
            continue;
        }
        blockers.extend(
            obstacle
                .occupied_cells()
                .into_iter()
                .filter(|&cell| snapshot.grid.contains(cell)),
        );
    }

    for unit in &snapshot.units {
        if unit.removed || policy.exclude.contains(&unit.id) {
            continue;
        }
        if !unit.alive && !policy.include_corpses {
            continue;
        }
        blockers.extend(
            unit.occupied_cells()
                .into_iter()
                .filter(|&cell| snapshot.grid.contains(cell)),
        );
    }

    blockers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Footprint, GridDimensions};
    use crate::state::{Obstacle, PlayerId, Unit};

    fn snapshot() -> BattleSnapshot {
        BattleSnapshot::new(GridDimensions::new(8, 8))
            .with_units(vec![
                Unit::new(UnitId(1), PlayerId(0), Cell::new(1, 1)),
                Unit {
                    alive: false,
                    ..Unit::new(UnitId(2), PlayerId(1), Cell::new(3, 3))
                },
                Unit {
                    alive: false,
                    removed: true,
                    ..Unit::new(UnitId(3), PlayerId(1), Cell::new(5, 5))
                },
            ])
            .with_obstacles(vec![
                Obstacle::new(Cell::new(6, 0), Footprint::Large),
                Obstacle {
                    destroyed: true,
                    ..Obstacle::new(Cell::new(0, 6), Footprint::Single)
                },
            ])
    }

    #[test]
    fn vision_policy_skips_corpses_and_destroyed_obstacles() {
        let snapshot = snapshot();
        let blockers = blocker_cells(&snapshot, BlockerPolicy::vision(&[]));
        assert!(blockers.contains(Cell::new(1, 1)));
        assert!(!blockers.contains(Cell::new(3, 3)), "corpse must not block sight");
        assert!(!blockers.contains(Cell::new(0, 6)), "destroyed obstacle never blocks");
        // Large obstacle expands to its full 2×2 footprint
        assert!(blockers.contains(Cell::new(6, 0)));
        assert!(blockers.contains(Cell::new(7, 1)));
    }

    #[test]
    fn movement_policy_counts_corpses_but_not_removed_units() {
        let snapshot = snapshot();
        let blockers = blocker_cells(&snapshot, BlockerPolicy::movement(&[]));
        assert!(blockers.contains(Cell::new(3, 3)), "un-cleared corpse blocks movement");
        assert!(!blockers.contains(Cell::new(5, 5)), "removed corpse no longer occupies");
    }

    #[test]
    fn excluded_ids_never_self_block() {
        let snapshot = snapshot();
        let exclude = [UnitId(1)];
        let blockers = blocker_cells(&snapshot, BlockerPolicy::movement(&exclude));
        assert!(!blockers.contains(Cell::new(1, 1)));
    }

    #[test]
    fn footprint_cells_outside_the_grid_are_dropped() {
        let snapshot = BattleSnapshot::new(GridDimensions::new(4, 4)).with_obstacles(vec![
            Obstacle::new(Cell::new(3, 3), Footprint::Large),
        ]);
        let blockers = blocker_cells(&snapshot, BlockerPolicy::vision(&[]));
        assert!(blockers.contains(Cell::new(3, 3)));
        assert_eq!(blockers.len(), 1);
    }
}
