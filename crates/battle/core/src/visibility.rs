//! Visibility engine: line-of-sight tracing and fog-of-war classification.
//!
//! Lines are traced with a symmetric supercover: when the ideal segment
//! between two cell centers crosses a cell corner exactly, both adjacent
//! cells are included. The traced set is therefore identical in both
//! directions, making `has_line_of_sight(a, b)` equal to
//! `has_line_of_sight(b, a)` by construction instead of by accident of
//! Bresenham orientation.

use crate::blockers::{BlockerPolicy, blocker_cells};
use crate::grid::{Cell, CellSet, GridDimensions};
use crate::state::{BattleSnapshot, PlayerId, Unit};

/// All cells touched by the segment from `a` to `b`, endpoints included.
pub fn line_cells(a: Cell, b: Cell) -> Vec<Cell> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let nx = dx.unsigned_abs();
    let ny = dy.unsigned_abs();
    let sx = dx.signum();
    let sy = dy.signum();

    let mut cells = Vec::with_capacity((nx + ny + 1) as usize);
    let (mut x, mut y) = (a.x, a.y);
    cells.push(a);

    let (mut ix, mut iy) = (0u32, 0u32);
    while ix < nx || iy < ny {
        let decision = ((1 + 2 * ix) * ny) as i64 - ((1 + 2 * iy) * nx) as i64;
        if decision == 0 {
            // Exact corner crossing: the segment grazes both side cells.
            cells.push(Cell::new(x + sx, y));
            cells.push(Cell::new(x, y + sy));
            x += sx;
            y += sy;
            ix += 1;
            iy += 1;
        } else if decision < 0 {
            x += sx;
            ix += 1;
        } else {
            y += sy;
            iy += 1;
        }
        cells.push(Cell::new(x, y));
    }

    cells
}

/// True when no blocker lies strictly between the endpoints. The endpoints
/// themselves never block, so an observer standing on a blocker cell (its
/// own footprint) still sees out, and a target is never hidden by itself.
pub fn has_line_of_sight(a: Cell, b: Cell, blockers: &CellSet) -> bool {
    line_cells(a, b)
        .into_iter()
        .all(|cell| cell == a || cell == b || !blockers.contains(cell))
}

/// Cells visible to a set of observer units against a shared blocker set.
///
/// Each cell of each living observer's footprint is an independent vision
/// origin, so large units see around corners smaller ones cannot. A
/// candidate is visible when it is in bounds, within Manhattan vision range
/// of an origin, and a clear line exists. Observers standing outside the
/// grid contribute nothing.
pub fn visible_cells<'a, I>(
    grid: GridDimensions,
    observers: I,
    blockers: &CellSet,
    vision_range: impl Fn(&Unit) -> u32,
) -> CellSet
where
    I: IntoIterator<Item = &'a Unit>,
{
    let mut visible = CellSet::new();

    for unit in observers {
        if !unit.is_living() {
            continue;
        }
        let range = vision_range(unit) as i32;
        for origin in unit.occupied_cells() {
            if !grid.contains(origin) {
                continue;
            }
            for dy in -range..=range {
                let rest = range - dy.abs();
                for dx in -rest..=rest {
                    let candidate = origin.offset(dx, dy);
                    if !grid.contains(candidate) || visible.contains(candidate) {
                        continue;
                    }
                    if has_line_of_sight(origin, candidate, blockers) {
                        visible.insert(candidate);
                    }
                }
            }
        }
    }

    visible
}

/// Fog-of-war cleared cells for one player: the union of everything any of
/// their living units can see. The player's own units never block their
/// side's sight; corpses never block sight for anyone.
pub fn fog_of_war(snapshot: &BattleSnapshot, owner: PlayerId) -> CellSet {
    let own_ids: Vec<_> = snapshot
        .units_of(owner)
        .map(|unit| unit.id)
        .collect();
    let blockers = blocker_cells(snapshot, BlockerPolicy::vision(&own_ids));
    let config = snapshot.config;
    visible_cells(
        snapshot.grid,
        snapshot.units_of(owner),
        &blockers,
        |unit| unit.vision_range(&config),
    )
}
