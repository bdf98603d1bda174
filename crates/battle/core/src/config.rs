/// Engine configuration constants and tunable parameters.
///
/// The consts are hard capacity limits baked into types; the fields are
/// per-battle tunables that travel with the snapshot so that client preview
/// and authoritative resolution always compute with the same values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Minimum vision range of any unit regardless of its focus attribute.
    pub vision_floor: u32,

    /// Extra movement cost for a step that leaves a cell adjacent to a
    /// living enemy.
    pub engagement_penalty: u32,

    /// Extra Manhattan radius scanned beyond the move budget, to account
    /// for detours forced by engagement penalties.
    pub move_scan_slack: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum grid side length (grids are at most 64×64).
    pub const MAX_GRID_SIDE: u32 = 64;
    /// Largest footprint side (8×8 colossal units).
    pub const MAX_FOOTPRINT_SIDE: usize = 8;
    /// Cells in the largest footprint.
    pub const MAX_FOOTPRINT_AREA: usize = Self::MAX_FOOTPRINT_SIDE * Self::MAX_FOOTPRINT_SIDE;
    /// Maximum relative offsets in one coordinate pattern.
    pub const MAX_PATTERN_OFFSETS: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VISION_FLOOR: u32 = 1;
    pub const DEFAULT_ENGAGEMENT_PENALTY: u32 = 1;
    pub const DEFAULT_MOVE_SCAN_SLACK: u32 = 2;

    pub fn new() -> Self {
        Self {
            vision_floor: Self::DEFAULT_VISION_FLOOR,
            engagement_penalty: Self::DEFAULT_ENGAGEMENT_PENALTY,
            move_scan_slack: Self::DEFAULT_MOVE_SCAN_SLACK,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
