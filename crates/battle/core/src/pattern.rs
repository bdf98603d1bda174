//! Coordinate patterns: the shape language of ability targeting.
//!
//! A pattern says where an ability may be aimed and which cells it touches.
//! The same pattern definition drives client-side previews and authoritative
//! resolution, so everything here is pure data plus pure resolution helpers.
//!
//! An older shape-enum targeting design existed upstream of this engine; it
//! is superseded and intentionally not represented here.

use std::collections::HashMap;
use std::fmt;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::grid::Cell;
use crate::state::Attributes;

// ============================================================================
// Ability Identity
// ============================================================================

/// Unique identifier for an ability definition in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u32);

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability#{}", self.0)
    }
}

// ============================================================================
// Range Values
// ============================================================================

/// Reference to one of a unit's attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeRef {
    Strength,
    Agility,
    Focus,
    Willpower,
}

impl AttributeRef {
    pub fn read(self, attributes: &Attributes) -> u32 {
        match self {
            AttributeRef::Strength => attributes.strength,
            AttributeRef::Agility => attributes.agility,
            AttributeRef::Focus => attributes.focus,
            AttributeRef::Willpower => attributes.willpower,
        }
    }
}

/// A range that is either a literal number or a reference to an attacker
/// attribute, resolved against the caster's current stats at query time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeValue {
    Literal(u32),
    Attribute(AttributeRef),
}

impl RangeValue {
    /// Explicit resolution; never implicit coercion.
    pub fn resolve(self, attributes: &Attributes) -> u32 {
        match self {
            RangeValue::Literal(value) => value,
            RangeValue::Attribute(attr) => attr.read(attributes),
        }
    }
}

// ============================================================================
// Coordinate Patterns
// ============================================================================

/// Where a pattern's relative offsets are anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternOrigin {
    /// Offsets anchored on the caster's own cell.
    Caster,
    /// Offsets anchored on the chosen target cell.
    TargetCell,
    /// Offsets anchored on the caster and extended along the resolved
    /// aim direction.
    Directional,
}

bitflags::bitflags! {
    /// Travel behavior of a pattern whose effect physically crosses the grid.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TravelFlags: u8 {
        /// Travel stops at the first living unit on the flight line.
        const STOPS_ON_UNIT = 1 << 0;
        /// Travel stops at the first non-destroyed obstacle.
        const STOPS_ON_OBSTACLE = 1 << 1;
        /// Affected cells ignore obstacle cover.
        const PIERCING = 1 << 2;
    }
}

/// Relative offsets of one pattern, authored facing East.
pub type PatternOffsets = ArrayVec<Cell, { BattleConfig::MAX_PATTERN_OFFSETS }>;

/// A reusable, rotatable, range-bounded shape definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinatePattern {
    pub origin: PatternOrigin,
    pub offsets: PatternOffsets,
    pub rotatable: bool,
    /// Maximum aim distance; `None` means the pattern has no reach of its
    /// own (self-shapes, or patterns whose reach comes from travel).
    pub max_range: Option<RangeValue>,
    /// Shape applied at the impact point after travel. Defaults to the
    /// pattern itself when unset.
    pub explosion: Option<Box<CoordinatePattern>>,
    pub travel: TravelFlags,
}

impl CoordinatePattern {
    /// Resolves the maximum aim range against the caster's attributes.
    /// Patterns without a declared range aim at most one cell away.
    pub fn resolved_range(&self, attributes: &Attributes) -> u32 {
        self.max_range
            .map(|range| range.resolve(attributes))
            .unwrap_or(1)
    }

    /// The shape applied at a travel impact point.
    pub fn explosion_pattern(&self) -> &CoordinatePattern {
        self.explosion.as_deref().unwrap_or(self)
    }

    /// What kind of target this pattern requires.
    ///
    /// A caster-anchored pattern that cannot rotate touches the same cells
    /// whatever the aim, so it is self-only. A target-anchored pattern with
    /// a single zero offset, no explosion, and no travel hits exactly one
    /// cell and therefore wants a unit; every other shape wants a position.
    pub fn target_kind(&self) -> TargetKind {
        match self.origin {
            PatternOrigin::Caster if !self.rotatable => TargetKind::SelfOnly,
            PatternOrigin::Caster | PatternOrigin::Directional => TargetKind::Position,
            PatternOrigin::TargetCell => {
                let single_cell = self.offsets.as_slice() == [Cell::ORIGIN];
                if single_cell && self.explosion.is_none() && self.travel.is_empty() {
                    TargetKind::Unit
                } else {
                    TargetKind::Position
                }
            }
        }
    }
}

/// What a pattern infers about its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    /// Only the caster itself.
    SelfOnly,
    /// A specific unit.
    Unit,
    /// A grid position.
    Position,
}

// ============================================================================
// Ability Definitions
// ============================================================================

/// Static definition of one ability, loaded from content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    /// Passive abilities exist in the catalog but can never be used as
    /// actions.
    pub active: bool,
    /// Whether using the ability spends one of the caster's actions.
    pub consumes_action: bool,
    pub mana_cost: u32,
    /// Cooldown in turns applied after use.
    pub cooldown: u32,
    /// Position-target abilities that need an unoccupied destination
    /// (summons, teleports).
    pub requires_free_cell: bool,
    pub pattern: CoordinatePattern,
}

/// Catalog of ability definitions keyed by id.
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    definitions: HashMap<AbilityId, AbilityDefinition>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, returning the previous one under the same id.
    pub fn insert(&mut self, definition: AbilityDefinition) -> Option<AbilityDefinition> {
        self.definitions.insert(definition.id, definition)
    }

    pub fn get(&self, id: AbilityId) -> Option<&AbilityDefinition> {
        self.definitions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.definitions.values()
    }
}

impl FromIterator<AbilityDefinition> for AbilityRegistry {
    fn from_iter<I: IntoIterator<Item = AbilityDefinition>>(iter: I) -> Self {
        let mut registry = AbilityRegistry::new();
        for definition in iter {
            registry.insert(definition);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(cells: &[(i32, i32)]) -> PatternOffsets {
        cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn range_resolution_reads_live_attributes() {
        let attributes = Attributes {
            strength: 4,
            agility: 2,
            focus: 7,
            willpower: 3,
        };
        assert_eq!(RangeValue::Literal(5).resolve(&attributes), 5);
        assert_eq!(
            RangeValue::Attribute(AttributeRef::Focus).resolve(&attributes),
            7
        );
    }

    #[test]
    fn caster_anchored_fixed_patterns_are_self_only() {
        let pattern = CoordinatePattern {
            origin: PatternOrigin::Caster,
            offsets: offsets(&[(0, 0)]),
            rotatable: false,
            max_range: Some(RangeValue::Literal(1)),
            explosion: None,
            travel: TravelFlags::empty(),
        };
        assert_eq!(pattern.target_kind(), TargetKind::SelfOnly);

        // Rotation makes the aim matter even without a declared range: the
        // pattern wants a position and aims at the default range of 1.
        let swiping = CoordinatePattern {
            rotatable: true,
            max_range: None,
            offsets: offsets(&[(1, 0)]),
            ..pattern
        };
        assert_eq!(swiping.target_kind(), TargetKind::Position);
        assert_eq!(swiping.resolved_range(&Attributes::default()), 1);
    }

    #[test]
    fn single_cell_target_patterns_want_a_unit() {
        let strike = CoordinatePattern {
            origin: PatternOrigin::TargetCell,
            offsets: offsets(&[(0, 0)]),
            rotatable: false,
            max_range: Some(RangeValue::Literal(1)),
            explosion: None,
            travel: TravelFlags::empty(),
        };
        assert_eq!(strike.target_kind(), TargetKind::Unit);

        let blast = CoordinatePattern {
            offsets: offsets(&[(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)]),
            ..strike.clone()
        };
        assert_eq!(blast.target_kind(), TargetKind::Position);

        let thrown = CoordinatePattern {
            travel: TravelFlags::STOPS_ON_UNIT,
            ..strike
        };
        assert_eq!(thrown.target_kind(), TargetKind::Position);
    }

    #[test]
    fn explosion_defaults_to_the_pattern_itself() {
        let pattern = CoordinatePattern {
            origin: PatternOrigin::TargetCell,
            offsets: offsets(&[(0, 0), (1, 0)]),
            rotatable: false,
            max_range: Some(RangeValue::Literal(4)),
            explosion: None,
            travel: TravelFlags::STOPS_ON_UNIT,
        };
        assert_eq!(pattern.explosion_pattern(), &pattern);

        let nested = CoordinatePattern {
            explosion: Some(Box::new(pattern.clone())),
            offsets: offsets(&[(0, 0)]),
            ..pattern.clone()
        };
        assert_eq!(nested.explosion_pattern(), &pattern);
    }
}
