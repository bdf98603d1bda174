//! Ability validator: the ordered rule pipeline gating every action.
//!
//! The pipeline short-circuits on the first failed check, and the order of
//! checks is itself part of the contract (tests assert it). The same
//! function serves the client-side "can I even attempt this" pre-check and
//! the authoritative accept/reject decision; given the same snapshot both
//! reach the same verdict.

use crate::blockers::{BlockerPolicy, blocker_cells};
use crate::grid::Cell;
use crate::pattern::{AbilityId, AbilityRegistry, TargetKind};
use crate::state::{BattleSnapshot, UnitId};
use crate::targeting::{affected_cells, range_distance};

/// A rejected action. One code per failure, drawn from a closed taxonomy;
/// a rejection is a normal game event, never a panic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum RuleViolation {
    #[error("ability not found")]
    AbilityNotFound,
    #[error("not an active ability")]
    NotAnActiveAbility,
    #[error("unit does not possess ability")]
    UnitDoesNotPossessAbility,
    #[error("unit is dead")]
    UnitIsDead,
    #[error("no actions left")]
    NoActionsLeft,
    #[error("insufficient resource")]
    InsufficientResource,
    #[error("on cooldown")]
    OnCooldown,
    #[error("target required")]
    TargetRequired,
    #[error("self-only ability aimed elsewhere")]
    SelfOnlyViolation,
    #[error("out of range")]
    OutOfRange,
    #[error("invalid target type")]
    InvalidTargetType,
    #[error("target not alive")]
    TargetNotAlive,
    #[error("position occupied")]
    PositionOccupied,
}

impl RuleViolation {
    /// Stable kebab-case identifier for UI feedback and logs.
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// What an action is aimed at. Consumers match exhaustively; there is no
/// structural probing for "is this a unit or a position".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Unit(UnitId),
    Position(Cell),
}

/// Verdict of the validation pipeline: `Ok(())` or exactly one violation.
pub type ValidationResult = Result<(), RuleViolation>;

/// Runs the ordered rule pipeline for one requested action.
///
/// Check order (a contract): ability exists → is active → caster possesses
/// it → caster is alive → caster has an action (unless the ability does not
/// consume one) → sufficient mana → not on cooldown → target reference
/// resolves → aim is on the grid and within resolved range → target type
/// matches the pattern → unit targets are alive → required-free position
/// targets are unoccupied.
///
/// An unknown caster id reports as [`RuleViolation::UnitIsDead`]: the
/// taxonomy is closed and a removed unit is indistinguishable from a dead
/// one at this layer.
pub fn validate(
    snapshot: &BattleSnapshot,
    registry: &AbilityRegistry,
    caster_id: UnitId,
    ability_id: AbilityId,
    target: Option<Target>,
) -> ValidationResult {
    let ability = registry
        .get(ability_id)
        .ok_or(RuleViolation::AbilityNotFound)?;
    if !ability.active {
        return Err(RuleViolation::NotAnActiveAbility);
    }

    let caster = snapshot
        .unit(caster_id)
        .ok_or(RuleViolation::UnitIsDead)?;
    if !caster.possesses(ability_id) {
        return Err(RuleViolation::UnitDoesNotPossessAbility);
    }
    if !caster.is_living() {
        return Err(RuleViolation::UnitIsDead);
    }
    if ability.consumes_action && caster.actions_left == 0 {
        return Err(RuleViolation::NoActionsLeft);
    }
    if caster.mana < ability.mana_cost {
        return Err(RuleViolation::InsufficientResource);
    }
    if caster.cooldown_remaining(ability_id) > 0 {
        return Err(RuleViolation::OnCooldown);
    }

    let kind = ability.pattern.target_kind();
    if kind == TargetKind::SelfOnly {
        // Self-casts accept no target or an explicit self-reference.
        return match target {
            None => Ok(()),
            Some(Target::Unit(id)) if id == caster_id => Ok(()),
            Some(_) => Err(RuleViolation::SelfOnlyViolation),
        };
    }

    let Some(target) = target else {
        return Err(RuleViolation::TargetRequired);
    };

    // Resolve the aim cell before the geometric checks. A unit reference
    // that does not resolve is treated as not alive.
    let (aim, target_unit) = match target {
        Target::Unit(id) => {
            let unit = snapshot.unit(id).ok_or(RuleViolation::TargetNotAlive)?;
            (unit.position, Some(unit))
        }
        Target::Position(cell) => (cell, None),
    };

    // An aim off the board can never be in range, whatever the metric.
    if !snapshot.grid.contains(aim) {
        return Err(RuleViolation::OutOfRange);
    }

    let range = ability.pattern.resolved_range(&caster.attributes);
    if range_distance(caster.position, aim, range) > range {
        return Err(RuleViolation::OutOfRange);
    }
    if affected_cells(snapshot, &ability.pattern, caster.position, aim).is_empty() {
        return Err(RuleViolation::OutOfRange);
    }

    match (kind, target) {
        (TargetKind::Unit, Target::Unit(_)) => {
            if !target_unit.is_some_and(|unit| unit.is_living()) {
                return Err(RuleViolation::TargetNotAlive);
            }
        }
        (TargetKind::Position, Target::Position(cell)) => {
            if ability.requires_free_cell {
                let occupied = blocker_cells(snapshot, BlockerPolicy::movement(&[]));
                if occupied.contains(cell) {
                    return Err(RuleViolation::PositionOccupied);
                }
            }
        }
        _ => return Err(RuleViolation::InvalidTargetType),
    }

    Ok(())
}
