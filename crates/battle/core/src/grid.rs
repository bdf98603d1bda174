//! Grid geometry: cells, bounds, footprints, and the 8-way compass.
//!
//! Everything else in the engine is built on this module. All functions here
//! are total over valid grid coordinates: out-of-bounds input produces empty
//! results rather than errors.

use std::collections::HashSet;
use std::fmt;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

// ============================================================================
// Cells & Dimensions
// ============================================================================

/// Discrete grid position expressed in tile coordinates.
///
/// The origin is the top-left corner of the grid; `y` grows downward, which
/// matches anchors being the top-left cell of a footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (taxicab) distance to another cell.
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Chebyshev (king-move) distance to another cell.
    pub fn chebyshev(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Component-wise offset.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular grid bounds. Battles are capped at
/// [`BattleConfig::MAX_GRID_SIDE`] per side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.width as i32
            && cell.y < self.height as i32
    }
}

// ============================================================================
// Footprints
// ============================================================================

/// Enumerated entity size. The anchor is the top-left occupied cell; the
/// footprint expands to a `side × side` block of non-negative offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Footprint {
    /// 1×1, the common case for units and small obstacles.
    #[default]
    Single,
    /// 2×2
    Large,
    /// 4×4
    Huge,
    /// 8×8, boss-scale units only.
    Colossal,
}

/// Cells occupied by one footprint, bounded by the largest side squared.
pub type FootprintCells = ArrayVec<Cell, { BattleConfig::MAX_FOOTPRINT_AREA }>;

impl Footprint {
    pub const fn side(self) -> i32 {
        match self {
            Footprint::Single => 1,
            Footprint::Large => 2,
            Footprint::Huge => 4,
            Footprint::Colossal => 8,
        }
    }

    /// Expands an anchor into the full set of occupied cells.
    ///
    /// Always includes the anchor itself and exactly `side²` cells in total.
    pub fn cells(self, anchor: Cell) -> FootprintCells {
        let side = self.side();
        let mut out = FootprintCells::new();
        for dy in 0..side {
            for dx in 0..side {
                out.push(anchor.offset(dx, dy));
            }
        }
        out
    }

    /// True when the footprint anchored at `cell` covers `probe`.
    pub fn covers(self, anchor: Cell, probe: Cell) -> bool {
        let side = self.side();
        probe.x >= anchor.x
            && probe.y >= anchor.y
            && probe.x < anchor.x + side
            && probe.y < anchor.y + side
    }
}

// ============================================================================
// Cell Sets
// ============================================================================

/// Hash-set occupancy keyed by packed `(x << 16) | y` integers.
///
/// Visibility and movement scan up to thousands of candidate cells per query;
/// the packed key keeps membership checks allocation-free. Coordinates
/// outside `0..=0xFFFF` have no key and are never stored: `insert` rejects
/// them and `contains` reports them absent, so probing with an off-grid
/// cursor cell is harmless.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellSet {
    keys: HashSet<u32>,
}

fn pack(cell: Cell) -> Option<u32> {
    if cell.x < 0 || cell.y < 0 || cell.x > 0xFFFF || cell.y > 0xFFFF {
        return None;
    }
    Some(((cell.x as u32) << 16) | cell.y as u32)
}

fn unpack(key: u32) -> Cell {
    Cell::new((key >> 16) as i32, (key & 0xFFFF) as i32)
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cell: Cell) -> bool {
        match pack(cell) {
            Some(key) => self.keys.insert(key),
            None => false,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        pack(cell).is_some_and(|key| self.keys.contains(&key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.keys.iter().map(|&k| unpack(k))
    }

    /// Deterministically ordered contents, for stable output and tests.
    pub fn sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.iter().collect();
        cells.sort();
        cells
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::new();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl Extend<Cell> for CellSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

// ============================================================================
// Directions
// ============================================================================

/// 8-way compass direction. `North` is toward smaller `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Unit step in this direction (diagonals step both axes).
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }

    /// Classifies the direction from `from` toward `to`.
    ///
    /// Cardinal directions take priority: the offset must be *exactly*
    /// diagonal (|dx| == |dy|) to classify as one, otherwise the dominant
    /// axis wins. Returns `None` for a zero offset.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return None;
        }
        let dir = if dx.abs() == dy.abs() {
            match (dx > 0, dy > 0) {
                (true, true) => Direction::SouthEast,
                (true, false) => Direction::NorthEast,
                (false, true) => Direction::SouthWest,
                (false, false) => Direction::NorthWest,
            }
        } else if dx.abs() > dy.abs() {
            if dx > 0 { Direction::East } else { Direction::West }
        } else if dy > 0 {
            Direction::South
        } else {
            Direction::North
        };
        Some(dir)
    }

    /// Rotates a pattern offset to face this direction.
    ///
    /// Offsets are authored facing [`Direction::East`]: `x` is forward,
    /// `y` is to the right. The rotation maps the offset onto this
    /// direction's forward axis and its clockwise perpendicular, which is an
    /// exact 90° rotation for cardinals; diagonals use the diagonal forward
    /// vector, stretching shapes by one diagonal step. Preview and
    /// resolution share this transform, so both always agree.
    pub fn rotate(self, offset: Cell) -> Cell {
        let (fx, fy) = self.delta();
        // clockwise perpendicular of the forward axis (y grows downward)
        let (sx, sy) = (-fy, fx);
        Cell::new(offset.x * fx + offset.y * sx, offset.x * fy + offset.y * sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn footprint_cells_include_anchor_and_cover_full_area() {
        for footprint in [
            Footprint::Single,
            Footprint::Large,
            Footprint::Huge,
            Footprint::Colossal,
        ] {
            let anchor = Cell::new(3, 5);
            let cells = footprint.cells(anchor);
            let side = footprint.side();
            assert_eq!(cells.len(), (side * side) as usize);
            assert!(cells.contains(&anchor));
            for cell in &cells {
                assert!(cell.x >= anchor.x && cell.y >= anchor.y);
                assert!(footprint.covers(anchor, *cell));
            }
        }
    }

    #[test]
    fn bounds_check_rejects_negative_and_overflowing_cells() {
        let grid = GridDimensions::new(5, 5);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(4, 4)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(0, 5)));
    }

    #[test]
    fn cell_set_round_trips_packed_keys() {
        let mut set = CellSet::new();
        assert!(set.insert(Cell::new(63, 0)));
        assert!(set.insert(Cell::new(0, 63)));
        assert!(!set.insert(Cell::new(63, 0)));
        assert!(set.contains(Cell::new(63, 0)));
        assert!(!set.contains(Cell::new(1, 1)));
        assert_eq!(set.sorted(), vec![Cell::new(0, 63), Cell::new(63, 0)]);
    }

    #[test]
    fn cell_set_treats_unpackable_cells_as_absent() {
        let mut set = CellSet::new();
        set.insert(Cell::new(2, 2));
        for stray in [
            Cell::new(-1, 2),
            Cell::new(2, -1),
            Cell::new(0x1_0000, 0),
            Cell::new(0, 0x1_0000),
        ] {
            assert!(!set.insert(stray));
            assert!(!set.contains(stray));
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn direction_classification_prefers_cardinals() {
        let origin = Cell::ORIGIN;
        // Exactly diagonal
        assert_eq!(
            Direction::between(origin, Cell::new(3, 3)),
            Some(Direction::SouthEast)
        );
        // Off-diagonal offsets collapse to the dominant axis
        assert_eq!(
            Direction::between(origin, Cell::new(3, 2)),
            Some(Direction::East)
        );
        assert_eq!(
            Direction::between(origin, Cell::new(2, -3)),
            Some(Direction::North)
        );
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn cardinal_rotation_is_exact() {
        // Forward-2, right-1 authored facing East
        let offset = Cell::new(2, 1);
        assert_eq!(Direction::East.rotate(offset), Cell::new(2, 1));
        assert_eq!(Direction::South.rotate(offset), Cell::new(-1, 2));
        assert_eq!(Direction::West.rotate(offset), Cell::new(-2, -1));
        assert_eq!(Direction::North.rotate(offset), Cell::new(1, -2));
    }

    #[test]
    fn rotation_preserves_the_forward_axis() {
        for dir in Direction::iter() {
            let (dx, dy) = dir.delta();
            assert_eq!(dir.rotate(Cell::new(1, 0)), Cell::new(dx, dy));
            // Pure rotation fixes the origin
            assert_eq!(dir.rotate(Cell::ORIGIN), Cell::ORIGIN);
        }
    }
}
