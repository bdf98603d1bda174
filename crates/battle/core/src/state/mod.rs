//! Read-only battle snapshots handed to the engine per query.
//!
//! The engine never creates or mutates these; the authoritative game loop
//! owns the real state and serializes mutations between queries.

mod obstacle;
mod snapshot;
mod unit;

pub use obstacle::Obstacle;
pub use snapshot::BattleSnapshot;
pub use unit::{Attributes, PlayerId, Unit, UnitId};
