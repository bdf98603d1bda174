use std::collections::HashMap;
use std::fmt;

use crate::config::BattleConfig;
use crate::grid::{Cell, Footprint, FootprintCells};
use crate::pattern::AbilityId;

/// Unique identifier for a unit in the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of the player controlling a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

/// Core attribute block. Vision derives from focus; attribute-valued
/// ability ranges resolve against these at query time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: u32,
    pub agility: u32,
    pub focus: u32,
    pub willpower: u32,
}

/// Snapshot of one unit as seen by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    /// Anchor position (top-left cell of the footprint).
    pub position: Cell,
    pub footprint: Footprint,
    pub alive: bool,
    /// A dead unit still occupies physical space until its corpse has been
    /// cleared from the board.
    pub removed: bool,
    pub attributes: Attributes,
    /// Remaining cooldown turns per ability.
    pub cooldowns: HashMap<AbilityId, u32>,
    /// Abilities this unit currently possesses.
    pub abilities: Vec<AbilityId>,
    pub actions_left: u32,
    pub mana: u32,
    pub moves_left: u32,
}

impl Unit {
    pub fn new(id: UnitId, owner: PlayerId, position: Cell) -> Self {
        Self {
            id,
            owner,
            position,
            footprint: Footprint::Single,
            alive: true,
            removed: false,
            attributes: Attributes::default(),
            cooldowns: HashMap::new(),
            abilities: Vec::new(),
            actions_left: 1,
            mana: 0,
            moves_left: 0,
        }
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_abilities(mut self, abilities: &[AbilityId]) -> Self {
        self.abilities = abilities.to_vec();
        self
    }

    /// Every cell this unit occupies.
    pub fn occupied_cells(&self) -> FootprintCells {
        self.footprint.cells(self.position)
    }

    /// True when the unit's footprint covers `cell`.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.footprint.covers(self.position, cell)
    }

    /// Living and still on the board.
    pub fn is_living(&self) -> bool {
        self.alive && !self.removed
    }

    /// An un-cleared corpse: dead but still occupying space.
    pub fn is_corpse(&self) -> bool {
        !self.alive && !self.removed
    }

    /// Vision range derived from focus, never below the configured floor.
    pub fn vision_range(&self, config: &BattleConfig) -> u32 {
        config.vision_floor.max(self.attributes.focus)
    }

    pub fn possesses(&self, ability: AbilityId) -> bool {
        self.abilities.contains(&ability)
    }

    /// Remaining cooldown turns for an ability (zero when ready).
    pub fn cooldown_remaining(&self, ability: AbilityId) -> u32 {
        self.cooldowns.get(&ability).copied().unwrap_or(0)
    }
}
