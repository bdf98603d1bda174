//! Ability catalog loader.
//!
//! Loads ability definitions from RON files into a validated
//! [`AbilityRegistry`]. The RON format mirrors the engine types but keeps
//! travel flags as readable strings; everything is checked here so the
//! rules engine can assume well-formed patterns.

use std::path::Path;

use anyhow::{Context, bail, ensure};
use battle_core::{
    AbilityDefinition, AbilityId, AbilityRegistry, BattleConfig, Cell, CoordinatePattern,
    PatternOffsets, PatternOrigin, RangeValue, TravelFlags,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct CatalogRon {
    abilities: Vec<AbilityRon>,
}

#[derive(Debug, Clone, Deserialize)]
struct AbilityRon {
    id: u32,
    name: String,
    #[serde(default = "default_true")]
    active: bool,
    #[serde(default = "default_true")]
    consumes_action: bool,
    #[serde(default)]
    mana_cost: u32,
    #[serde(default)]
    cooldown: u32,
    #[serde(default)]
    requires_free_cell: bool,
    pattern: PatternRon,
}

#[derive(Debug, Clone, Deserialize)]
struct PatternRon {
    origin: PatternOrigin,
    offsets: Vec<(i32, i32)>,
    #[serde(default)]
    rotatable: bool,
    #[serde(default)]
    max_range: Option<RangeValue>,
    #[serde(default)]
    explosion: Option<Box<PatternRon>>,
    /// Travel flags as strings: "stops_on_unit", "stops_on_obstacle",
    /// "piercing".
    #[serde(default)]
    travel: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Loader for ability catalogs from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Loads the built-in ability catalog embedded in this crate.
    pub fn load_builtin() -> LoadResult<AbilityRegistry> {
        let catalog = include_str!("../../data/abilities/core.ron");
        Self::load_str(catalog).context("Failed to load built-in ability catalog")
    }

    /// Loads an ability catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<AbilityRegistry> {
        let content = read_file(path)?;
        Self::load_str(&content)
            .with_context(|| format!("Failed to load ability catalog {}", path.display()))
    }

    fn load_str(content: &str) -> LoadResult<AbilityRegistry> {
        let catalog: CatalogRon =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse RON: {}", e))?;

        let mut registry = AbilityRegistry::new();
        for ability in catalog.abilities {
            let definition = build_definition(&ability)
                .with_context(|| format!("Invalid ability {:?} (id {})", ability.name, ability.id))?;
            if registry.insert(definition).is_some() {
                bail!("Duplicate ability id {}", ability.id);
            }
        }

        tracing::debug!(abilities = registry.len(), "loaded ability catalog");
        Ok(registry)
    }
}

fn build_definition(raw: &AbilityRon) -> LoadResult<AbilityDefinition> {
    ensure!(!raw.name.trim().is_empty(), "ability name is empty");
    let pattern = build_pattern(&raw.pattern, 0)?;
    Ok(AbilityDefinition {
        id: AbilityId(raw.id),
        name: raw.name.clone(),
        active: raw.active,
        consumes_action: raw.consumes_action,
        mana_cost: raw.mana_cost,
        cooldown: raw.cooldown,
        requires_free_cell: raw.requires_free_cell,
        pattern,
    })
}

fn build_pattern(raw: &PatternRon, depth: usize) -> LoadResult<CoordinatePattern> {
    ensure!(!raw.offsets.is_empty(), "pattern has no offsets");
    ensure!(
        raw.offsets.len() <= BattleConfig::MAX_PATTERN_OFFSETS,
        "pattern has {} offsets, the maximum is {}",
        raw.offsets.len(),
        BattleConfig::MAX_PATTERN_OFFSETS
    );
    ensure!(depth <= 1, "explosion patterns cannot nest further");

    let travel = parse_travel_flags(&raw.travel)?;
    if raw.origin == PatternOrigin::Caster && !raw.rotatable {
        // Self-only shapes never physically cross the grid.
        ensure!(
            travel.is_empty(),
            "self-only pattern carries travel flags"
        );
    }

    let offsets: PatternOffsets = raw
        .offsets
        .iter()
        .map(|&(x, y)| Cell::new(x, y))
        .collect();
    let explosion = raw
        .explosion
        .as_deref()
        .map(|nested| build_pattern(nested, depth + 1).map(Box::new))
        .transpose()
        .context("invalid explosion pattern")?;

    Ok(CoordinatePattern {
        origin: raw.origin,
        offsets,
        rotatable: raw.rotatable,
        max_range: raw.max_range,
        explosion,
        travel,
    })
}

fn parse_travel_flags(names: &[String]) -> LoadResult<TravelFlags> {
    let mut flags = TravelFlags::empty();
    for name in names {
        flags |= match name.as_str() {
            "stops_on_unit" => TravelFlags::STOPS_ON_UNIT,
            "stops_on_obstacle" => TravelFlags::STOPS_ON_OBSTACLE,
            "piercing" => TravelFlags::PIERCING,
            other => bail!("unknown travel flag {:?}", other),
        };
    }
    Ok(flags)
}
