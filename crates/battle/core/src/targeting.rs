//! Targeting engine: range/shape resolution and directional aiming.
//!
//! Rather than pre-highlighting every cell an ability could ever touch, the
//! engine classifies the 8-way direction from caster to the current aim
//! cell, rotates the pattern to face it, and produces the affected cells
//! directly. Preview (client) and resolution (authoritative) call the same
//! functions on the same snapshot, so they are bit-exact by construction.

use crate::grid::{Cell, CellSet, Direction, GridDimensions};
use crate::pattern::{CoordinatePattern, PatternOrigin, TargetKind, TravelFlags};
use crate::state::{Attributes, BattleSnapshot, UnitId};

/// Selectable and affected cell sets for the current aim, plus the resolved
/// compass direction. Consumed by rendering and by the commit path that
/// turns a hover into a confirmed target.
#[derive(Clone, Debug)]
pub struct TargetingPreview {
    /// Cells the cursor may legally be over.
    pub selectable: CellSet,
    /// Cells that will actually be hit given the current aim.
    pub affected: CellSet,
    /// 8-way direction from caster to aim; `None` when aiming at the
    /// caster's own cell.
    pub direction: Option<Direction>,
    /// Whether the current aim is a committable target.
    pub valid: bool,
}

/// The distance metric for a resolved range: melee-style single-cell
/// ranges accept diagonals (Chebyshev), everything longer is Manhattan.
pub fn range_distance(from: Cell, to: Cell, range: u32) -> u32 {
    if range <= 1 {
        from.chebyshev(to)
    } else {
        from.manhattan(to)
    }
}

/// Cells a cursor may be over for this pattern.
///
/// Self-only patterns resolve to exactly the caster's own cell. Everything
/// else is the in-bounds disc around the caster under the resolved range's
/// metric. A caster standing outside the grid gets an empty set.
pub fn selectable_cells(
    pattern: &CoordinatePattern,
    caster: Cell,
    attributes: &Attributes,
    grid: GridDimensions,
) -> CellSet {
    let mut selectable = CellSet::new();
    if !grid.contains(caster) {
        return selectable;
    }
    if pattern.target_kind() == TargetKind::SelfOnly {
        selectable.insert(caster);
        return selectable;
    }

    let range = pattern.resolved_range(attributes);
    let reach = range as i32;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let cell = caster.offset(dx, dy);
            if grid.contains(cell) && range_distance(caster, cell, range) <= range {
                selectable.insert(cell);
            }
        }
    }
    selectable
}

/// Cells the pattern will hit when aimed from `caster` at `aim`.
///
/// The pattern's offsets are rotated to the classified direction when
/// rotatable, anchored per the pattern's origin kind, clipped to the grid,
/// and, unless the pattern pierces, stripped of cells covered by standing
/// obstacles.
pub fn affected_cells(
    snapshot: &BattleSnapshot,
    pattern: &CoordinatePattern,
    caster: Cell,
    aim: Cell,
) -> CellSet {
    let direction = Direction::between(caster, aim);
    let anchor = match pattern.origin {
        PatternOrigin::Caster | PatternOrigin::Directional => caster,
        PatternOrigin::TargetCell => aim,
    };
    project_pattern(snapshot, pattern, anchor, direction)
}

/// Shared projection used by direct aiming and by post-travel area
/// resolution: offsets (rotated if applicable) applied at an anchor.
pub(crate) fn project_pattern(
    snapshot: &BattleSnapshot,
    pattern: &CoordinatePattern,
    anchor: Cell,
    direction: Option<Direction>,
) -> CellSet {
    let mut affected = CellSet::new();
    for &offset in &pattern.offsets {
        let rotated = match direction {
            Some(dir) if pattern.rotatable => dir.rotate(offset),
            _ => offset,
        };
        let cell = anchor.offset(rotated.x, rotated.y);
        if !snapshot.grid.contains(cell) {
            continue;
        }
        if !pattern.travel.contains(TravelFlags::PIERCING) && snapshot.obstacle_at(cell).is_some() {
            continue;
        }
        affected.insert(cell);
    }
    affected
}

/// Full targeting preview for a hovering cursor.
pub fn preview(
    snapshot: &BattleSnapshot,
    pattern: &CoordinatePattern,
    caster_id: UnitId,
    hover: Cell,
) -> TargetingPreview {
    let Some(caster) = snapshot.unit(caster_id) else {
        return TargetingPreview {
            selectable: CellSet::new(),
            affected: CellSet::new(),
            direction: None,
            valid: false,
        };
    };
    let selectable = selectable_cells(pattern, caster.position, &caster.attributes, snapshot.grid);
    let affected = affected_cells(snapshot, pattern, caster.position, hover);
    let direction = Direction::between(caster.position, hover);
    let valid = selectable.contains(hover) && !affected.is_empty();
    TargetingPreview {
        selectable,
        affected,
        direction,
        valid,
    }
}
