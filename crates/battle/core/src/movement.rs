//! Movement planner: reachable-cell enumeration with path costs and
//! engagement penalties.
//!
//! Output is a map keyed by destination cell rather than a boolean grid:
//! downstream consumers (move preview, AI, the move-commit path) need the
//! numeric cost, not just reachability.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::blockers::{BlockerPolicy, blocker_cells};
use crate::grid::{Cell, CellSet};
use crate::state::{BattleSnapshot, Unit, UnitId};

/// Classification of a movement destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementClass {
    /// Plain step-count path.
    Normal,
    /// The cheapest path incurs at least one engagement penalty.
    EngagementPenalty,
    /// Not a legal destination (occupied or unreachable).
    Blocked,
}

/// One reachable destination with its total path cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementCellInfo {
    pub cell: Cell,
    pub cost: u32,
    pub class: MovementClass,
}

const STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Enumerates every anchor the mover can reach within its move budget.
///
/// Uniform-cost search over 4-way steps, base cost 1 per step plus the
/// configured engagement penalty for each step that leaves a cell adjacent
/// (Chebyshev ≤ 1) to a living enemy. Destinations whose footprint overlaps
/// a living unit, an un-cleared corpse, or an obstacle are excluded, as is
/// the mover's own anchor. Entries satisfy `cost ≤ moves_left`.
///
/// Returns an empty map when the mover is missing, not living, or out of
/// moves.
pub fn reachable_cells(snapshot: &BattleSnapshot, mover: UnitId) -> HashMap<Cell, MovementCellInfo> {
    let Some(unit) = snapshot.unit(mover) else {
        return HashMap::new();
    };
    if !unit.is_living() || unit.moves_left == 0 || !snapshot.grid.contains(unit.position) {
        return HashMap::new();
    }

    let exclude = [mover];
    let blockers = blocker_cells(snapshot, BlockerPolicy::movement(&exclude));
    let threat = threat_zone(snapshot, unit);
    let budget = unit.moves_left;
    let scan_radius = budget + snapshot.config.move_scan_slack;
    let start = unit.position;

    // best known (cost, penalized) per anchor
    let mut best: HashMap<Cell, (u32, bool)> = HashMap::new();
    best.insert(start, (0, false));
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0u32, false, start.x, start.y)));

    while let Some(Reverse((cost, penalized, x, y))) = frontier.pop() {
        let anchor = Cell::new(x, y);
        if best.get(&anchor).copied() != Some((cost, penalized)) {
            continue;
        }
        let step_cost = if engaged(unit, anchor, &threat) {
            1 + snapshot.config.engagement_penalty
        } else {
            1
        };
        for (dx, dy) in STEPS {
            let next = anchor.offset(dx, dy);
            let next_cost = cost + step_cost;
            if next_cost > budget || start.manhattan(next) > scan_radius {
                continue;
            }
            if !footprint_free(snapshot, unit, next, &blockers) {
                continue;
            }
            let next_penalized = penalized || step_cost > 1;
            let candidate = (next_cost, next_penalized);
            let improved = match best.get(&next) {
                Some(&current) => candidate < current,
                None => true,
            };
            if improved {
                best.insert(next, candidate);
                frontier.push(Reverse((next_cost, next_penalized, next.x, next.y)));
            }
        }
    }

    best.into_iter()
        .filter(|&(cell, _)| cell != start)
        .map(|(cell, (cost, penalized))| {
            let class = if penalized {
                MovementClass::EngagementPenalty
            } else {
                MovementClass::Normal
            };
            (cell, MovementCellInfo { cell, cost, class })
        })
        .collect()
}

/// Classifies an arbitrary cell against a reachability map, for previews:
/// anything absent from the map is blocked (or simply out of reach).
pub fn classify_destination(
    reachable: &HashMap<Cell, MovementCellInfo>,
    cell: Cell,
) -> MovementClass {
    reachable
        .get(&cell)
        .map(|info| info.class)
        .unwrap_or(MovementClass::Blocked)
}

/// Cells within Chebyshev 1 of any living enemy's footprint. Standing in
/// this zone makes disengaging steps cost extra.
fn threat_zone(snapshot: &BattleSnapshot, mover: &Unit) -> CellSet {
    let mut zone = CellSet::new();
    for enemy in &snapshot.units {
        if enemy.owner == mover.owner || !enemy.is_living() {
            continue;
        }
        for cell in enemy.occupied_cells() {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let near = cell.offset(dx, dy);
                    if snapshot.grid.contains(near) {
                        zone.insert(near);
                    }
                }
            }
        }
    }
    zone
}

fn engaged(unit: &Unit, anchor: Cell, threat: &CellSet) -> bool {
    unit.footprint
        .cells(anchor)
        .into_iter()
        .any(|cell| threat.contains(cell))
}

/// Every cell of the mover's footprint at `anchor` must be in bounds and
/// free of blockers (the mover's own current cells are already excluded
/// from the blocker set).
fn footprint_free(snapshot: &BattleSnapshot, unit: &Unit, anchor: Cell, blockers: &CellSet) -> bool {
    unit.footprint
        .cells(anchor)
        .into_iter()
        .all(|cell| snapshot.grid.contains(cell) && !blockers.contains(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Footprint, GridDimensions};
    use crate::state::{Obstacle, PlayerId};

    fn mover(position: Cell, moves_left: u32) -> Unit {
        Unit {
            moves_left,
            ..Unit::new(UnitId(1), PlayerId(0), position)
        }
    }

    #[test]
    fn open_grid_reaches_every_cell_within_budget() {
        // Mover at (2,2) with 3 moves on an otherwise empty grid.
        let snapshot = BattleSnapshot::new(GridDimensions::new(5, 5))
            .with_units(vec![mover(Cell::new(2, 2), 3)]);
        let reachable = reachable_cells(&snapshot, UnitId(1));

        assert!(!reachable.contains_key(&Cell::new(2, 2)), "own cell is not a destination");
        for (cell, info) in &reachable {
            assert_eq!(info.cost, Cell::new(2, 2).manhattan(*cell));
            assert_eq!(info.class, MovementClass::Normal);
            assert!(info.cost <= 3);
        }
        // Every in-bounds cell at Manhattan distance ≤ 3 is present
        let expected = (0..5)
            .flat_map(|y| (0..5).map(move |x| Cell::new(x, y)))
            .filter(|&c| c != Cell::new(2, 2) && Cell::new(2, 2).manhattan(c) <= 3)
            .count();
        assert_eq!(reachable.len(), expected);
    }

    #[test]
    fn occupied_destinations_are_excluded() {
        let snapshot = BattleSnapshot::new(GridDimensions::new(5, 5)).with_units(vec![
            mover(Cell::new(0, 0), 3),
            Unit::new(UnitId(2), PlayerId(1), Cell::new(1, 0)),
            Unit {
                alive: false,
                ..Unit::new(UnitId(3), PlayerId(1), Cell::new(0, 1))
            },
        ]);
        let reachable = reachable_cells(&snapshot, UnitId(1));
        assert!(!reachable.contains_key(&Cell::new(1, 0)), "living unit occupies");
        assert!(!reachable.contains_key(&Cell::new(0, 1)), "corpse occupies until cleared");
        assert_eq!(
            classify_destination(&reachable, Cell::new(1, 0)),
            MovementClass::Blocked
        );
    }

    #[test]
    fn cleared_corpses_free_their_cell() {
        let snapshot = BattleSnapshot::new(GridDimensions::new(5, 5)).with_units(vec![
            mover(Cell::new(0, 0), 2),
            Unit {
                alive: false,
                removed: true,
                ..Unit::new(UnitId(3), PlayerId(1), Cell::new(0, 1))
            },
        ]);
        let reachable = reachable_cells(&snapshot, UnitId(1));
        assert!(reachable.contains_key(&Cell::new(0, 1)));
    }

    #[test]
    fn walls_force_detours_that_cost_more() {
        // Wall between the mover and the far side
        let snapshot = BattleSnapshot::new(GridDimensions::new(5, 5))
            .with_units(vec![mover(Cell::new(0, 1), 4)])
            .with_obstacles(vec![
                Obstacle::new(Cell::new(1, 0), Footprint::Single),
                Obstacle::new(Cell::new(1, 1), Footprint::Single),
            ]);
        let reachable = reachable_cells(&snapshot, UnitId(1));
        // (2,1) straight through the wall would be 2, around it is 4
        assert_eq!(reachable.get(&Cell::new(2, 1)).map(|i| i.cost), Some(4));
    }

    #[test]
    fn steps_leaving_an_engaged_cell_are_penalized() {
        let snapshot = BattleSnapshot::new(GridDimensions::new(6, 6)).with_units(vec![
            mover(Cell::new(1, 1), 3),
            Unit::new(UnitId(2), PlayerId(1), Cell::new(2, 1)),
        ]);
        let reachable = reachable_cells(&snapshot, UnitId(1));

        // Starting adjacent to the enemy, the very first step is penalized.
        let info = reachable.get(&Cell::new(0, 1)).expect("one step west");
        assert_eq!(info.cost, 2);
        assert_eq!(info.class, MovementClass::EngagementPenalty);
        // The budget shrinks accordingly: cost-3 plain cells are now at
        // distance 2 from the start.
        assert!(!reachable.contains_key(&Cell::new(1, 4)), "would cost 4 with the penalty");
    }

    #[test]
    fn large_footprints_cannot_squeeze_through_gaps() {
        let big = Unit {
            moves_left: 3,
            ..Unit::new(UnitId(1), PlayerId(0), Cell::new(0, 0)).with_footprint(Footprint::Large)
        };
        let snapshot = BattleSnapshot::new(GridDimensions::new(6, 6))
            .with_units(vec![big])
            .with_obstacles(vec![Obstacle::new(Cell::new(2, 1), Footprint::Single)]);
        let reachable = reachable_cells(&snapshot, UnitId(1));
        // Anchor (1,0) would place the footprint over the obstacle at (2,1)
        assert!(!reachable.contains_key(&Cell::new(1, 0)));
        // Moving straight down is fine
        assert!(reachable.contains_key(&Cell::new(0, 1)));
    }

    #[test]
    fn exhausted_or_dead_movers_have_no_options() {
        let mut weary = mover(Cell::new(2, 2), 0);
        let snapshot = BattleSnapshot::new(GridDimensions::new(5, 5)).with_units(vec![weary.clone()]);
        assert!(reachable_cells(&snapshot, UnitId(1)).is_empty());

        weary.moves_left = 3;
        weary.alive = false;
        let snapshot = BattleSnapshot::new(GridDimensions::new(5, 5)).with_units(vec![weary]);
        assert!(reachable_cells(&snapshot, UnitId(1)).is_empty());
    }
}
