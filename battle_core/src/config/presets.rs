//! Difficulty presets and encounter setup helpers
//!
//! These sit on the caller side of the engine: they build the party and the
//! boss that a [`Battle`](crate::battle::Battle) then owns.

use super::{ConfigError, Ruleset};
use crate::boss::Boss;
use crate::stat_block::StatBlock;
use crate::types::UnitClass;
use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// Encounter difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Hardcore,
}

/// Multipliers applied to freshly built party members
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartyModifiers {
    pub hp: f64,
    pub mp: f64,
    pub stats: f64,
}

/// Multipliers applied to a freshly built boss
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossModifiers {
    pub hp: f64,
    /// Scales max MP and the primary attributes
    pub stats: f64,
    pub damage: f64,
}

impl Difficulty {
    pub fn party_modifiers(&self) -> PartyModifiers {
        let (hp, mp, stats) = match self {
            Difficulty::Easy => (1.3, 1.2, 1.1),
            Difficulty::Normal => (1.0, 1.0, 1.0),
            Difficulty::Hard => (0.8, 0.9, 0.9),
            Difficulty::Hardcore => (0.7, 0.8, 0.8),
        };
        PartyModifiers { hp, mp, stats }
    }

    pub fn boss_modifiers(&self) -> BossModifiers {
        let (hp, stats, damage) = match self {
            Difficulty::Easy => (0.7, 0.8, 0.8),
            Difficulty::Normal => (1.0, 1.0, 1.0),
            Difficulty::Hard => (1.3, 1.2, 1.2),
            Difficulty::Hardcore => (1.6, 1.4, 1.5),
        };
        BossModifiers { hp, stats, damage }
    }
}

fn scale(value: i32, factor: f64) -> i32 {
    (value as f64 * factor) as i32
}

fn scale_primary(stats: &mut StatBlock, factor: f64) {
    stats.set_strength(scale(stats.strength(), factor));
    stats.set_agility(scale(stats.agility(), factor));
    stats.set_intelligence(scale(stats.intelligence(), factor));
}

/// Build party members at `level` and apply the difficulty's party modifiers
pub fn build_party(
    members: &[(String, UnitClass)],
    level: u32,
    difficulty: Difficulty,
    rules: &Ruleset,
) -> Result<Vec<Unit>, ConfigError> {
    let modifiers = difficulty.party_modifiers();
    members
        .iter()
        .map(|(name, class)| {
            if *class == UnitClass::Boss {
                return Err(ConfigError::ValidationError(format!(
                    "{name}: boss is not a party class"
                )));
            }
            let mut unit = rules.classes.require(*class)?.build_unit(
                name.clone(),
                level,
                &rules.skills,
                &rules.constants.stat_bounds,
            )?;

            let stats = &mut unit.stats;
            let max_hp = stats.set_max_hp(scale(stats.max_hp(), modifiers.hp));
            stats.set_hp(max_hp);
            let max_mp = stats.set_max_mp(scale(stats.max_mp(), modifiers.mp));
            stats.set_mp(max_mp);
            scale_primary(stats, modifiers.stats);
            Ok(unit)
        })
        .collect()
}

/// Build the boss at `level` and apply the difficulty's boss modifiers
pub fn build_boss(
    name: impl Into<String>,
    level: u32,
    difficulty: Difficulty,
    rules: &Ruleset,
) -> Result<Boss, ConfigError> {
    let modifiers = difficulty.boss_modifiers();
    let mut unit = rules.classes.require(UnitClass::Boss)?.build_unit(
        name,
        level,
        &rules.skills,
        &rules.constants.stat_bounds,
    )?;

    let stats = &mut unit.stats;
    let max_hp = stats.set_max_hp(scale(stats.max_hp(), modifiers.hp));
    stats.set_hp(max_hp);
    let max_mp = stats.set_max_mp(scale(stats.max_mp(), modifiers.stats));
    stats.set_mp(max_mp);
    scale_primary(stats, modifiers.stats);

    Ok(Boss::new(unit, modifiers.damage))
}
