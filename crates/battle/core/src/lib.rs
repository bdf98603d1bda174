//! Deterministic rules engine for turn-based, grid-based tactical combat.
//!
//! Given a battle snapshot (units, obstacles, grid size, ability patterns)
//! the engine answers five questions: what a unit can see, where it can
//! move and at what cost, what an ability can target and which cells it
//! affects, where a traveling effect lands, and whether a requested action
//! is legal. Every function is pure over its explicit inputs; the engine
//! holds no state between calls, so client previews and authoritative
//! resolution are bit-exact given the same snapshot.
//!
//! Effect *application* (HP, mana, conditions) is out of scope: this crate
//! only decides legality and geometry.
pub mod blockers;
pub mod config;
pub mod grid;
pub mod movement;
pub mod pattern;
pub mod projectile;
pub mod state;
pub mod targeting;
pub mod validator;
pub mod visibility;

pub use blockers::{BlockerPolicy, blocker_cells};
pub use config::BattleConfig;
pub use grid::{Cell, CellSet, Direction, Footprint, FootprintCells, GridDimensions};
pub use movement::{MovementCellInfo, MovementClass, classify_destination, reachable_cells};
pub use pattern::{
    AbilityDefinition, AbilityId, AbilityRegistry, AttributeRef, CoordinatePattern, PatternOffsets,
    PatternOrigin, RangeValue, TargetKind, TravelFlags,
};
pub use projectile::{AreaResult, Interception, TravelResult, resolve_area, travel};
pub use state::{Attributes, BattleSnapshot, Obstacle, PlayerId, Unit, UnitId};
pub use targeting::{TargetingPreview, affected_cells, preview, selectable_cells};
pub use validator::{RuleViolation, Target, ValidationResult, validate};
pub use visibility::{fog_of_war, has_line_of_sight, line_cells, visible_cells};
