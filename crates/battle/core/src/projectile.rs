//! Projectile travel and area resolution.
//!
//! Travel and area application are two separate stages on purpose: a thrown
//! fireball that is intercepted mid-flight explodes where it was stopped,
//! not where it was aimed. The impact point of the first stage becomes the
//! origin of the second.

use crate::grid::{Cell, CellSet, Direction};
use crate::pattern::{CoordinatePattern, TravelFlags};
use crate::state::{BattleSnapshot, UnitId};
use crate::targeting::project_pattern;

/// What stopped a traveling effect short of its maximum distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interception {
    /// A living unit on the flight line.
    Unit(UnitId),
    /// A standing obstacle.
    Obstacle,
    /// The edge of the grid.
    GridEdge,
}

/// Outcome of a travel simulation. `path` holds every cell entered after
/// the origin, in flight order; `impact` is the last of them (or the origin
/// itself when the projectile cannot move at all).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelResult {
    pub path: Vec<Cell>,
    pub impact: Cell,
    pub interception: Option<Interception>,
}

impl TravelResult {
    pub fn intercepted(&self) -> bool {
        self.interception.is_some()
    }
}

/// Advances cell-by-cell from `origin` toward `aim` along the classified
/// 8-way direction, up to `max_distance` steps.
///
/// The projectile lands at the aimed cell when it reaches it, at the first
/// interception the stop flags care about, or at the end of its range.
/// Units whose footprint covers the origin (the caster) never intercept
/// their own projectile. A zero-length aim stays at the origin.
pub fn travel(
    snapshot: &BattleSnapshot,
    origin: Cell,
    aim: Cell,
    max_distance: u32,
    flags: TravelFlags,
) -> TravelResult {
    let Some(direction) = Direction::between(origin, aim) else {
        return TravelResult {
            path: Vec::new(),
            impact: origin,
            interception: None,
        };
    };
    let (dx, dy) = direction.delta();

    let mut path = Vec::new();
    let mut current = origin;
    let mut interception = None;

    for _ in 0..max_distance {
        let next = current.offset(dx, dy);
        if !snapshot.grid.contains(next) {
            interception = Some(Interception::GridEdge);
            break;
        }
        path.push(next);
        current = next;

        if flags.contains(TravelFlags::STOPS_ON_UNIT) {
            if let Some(unit) = snapshot.living_unit_at(next) {
                if !unit.occupies(origin) {
                    interception = Some(Interception::Unit(unit.id));
                    break;
                }
            }
        }
        if flags.contains(TravelFlags::STOPS_ON_OBSTACLE) && snapshot.obstacle_at(next).is_some() {
            interception = Some(Interception::Obstacle);
            break;
        }
        if current == aim {
            break;
        }
    }

    TravelResult {
        path,
        impact: current,
        interception,
    }
}

/// Cells and units affected by a pattern's explosion at an impact point.
#[derive(Clone, Debug, Default)]
pub struct AreaResult {
    pub cells: CellSet,
    /// Living units whose footprint intersects the cell set, in id order.
    /// Callers apply their own filters (exclude caster, allies, …).
    pub units: Vec<UnitId>,
}

/// Applies the pattern's explosion shape (the pattern itself when no
/// explicit explosion is nested) at the impact point, rotated to the travel
/// direction when rotatable.
pub fn resolve_area(
    snapshot: &BattleSnapshot,
    pattern: &CoordinatePattern,
    origin: Cell,
    impact: Cell,
) -> AreaResult {
    let explosion = pattern.explosion_pattern();
    let direction = Direction::between(origin, impact);
    let cells = project_pattern(snapshot, explosion, impact, direction);

    let mut units: Vec<UnitId> = snapshot
        .units
        .iter()
        .filter(|unit| unit.is_living())
        .filter(|unit| unit.occupied_cells().into_iter().any(|c| cells.contains(c)))
        .map(|unit| unit.id)
        .collect();
    units.sort();

    AreaResult { cells, units }
}
