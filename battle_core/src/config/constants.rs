//! Game constants configuration

use crate::stat_block::StatBounds;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub stat_bounds: StatBounds,
    #[serde(default)]
    pub crit: CritConstants,
    #[serde(default)]
    pub scaling: SkillScaling,
    #[serde(default)]
    pub boss: BossConstants,
    #[serde(default)]
    pub items: ItemConstants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritConstants {
    /// Critical strike multiplier (1.5 = 150%)
    #[serde(default = "default_crit_multiplier")]
    pub multiplier: f64,
}

impl Default for CritConstants {
    fn default() -> Self {
        CritConstants {
            multiplier: default_crit_multiplier(),
        }
    }
}

fn default_crit_multiplier() -> f64 {
    1.5
}

/// Attribute weights for skill formulas: `base + weight * stat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillScaling {
    #[serde(default = "default_physical_weight")]
    pub physical_strength: f64,
    #[serde(default = "default_magical_weight")]
    pub magical_intelligence: f64,
    #[serde(default = "default_heal_weight")]
    pub heal_intelligence: f64,
}

impl Default for SkillScaling {
    fn default() -> Self {
        SkillScaling {
            physical_strength: default_physical_weight(),
            magical_intelligence: default_magical_weight(),
            heal_intelligence: default_heal_weight(),
        }
    }
}

fn default_physical_weight() -> f64 {
    1.5
}
fn default_magical_weight() -> f64 {
    1.7
}
fn default_heal_weight() -> f64 {
    1.2
}

/// Boss phase thresholds and ability tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossConstants {
    /// Above this HP fraction the boss is in phase 1
    #[serde(default = "default_phase2_threshold")]
    pub phase2_threshold: f64,
    /// At or below this HP fraction the boss is in phase 3
    #[serde(default = "default_phase3_threshold")]
    pub phase3_threshold: f64,
    #[serde(default = "default_aoe_mana_cost")]
    pub aoe_mana_cost: i32,
    /// AOE damage is `(aoe_flat + aoe_intelligence * INT) * damage_multiplier`
    #[serde(default = "default_aoe_flat")]
    pub aoe_flat: f64,
    #[serde(default = "default_aoe_intelligence")]
    pub aoe_intelligence: f64,
    #[serde(default = "default_poison_mana_cost")]
    pub poison_mana_cost: i32,
    /// Poison damage per turn before the damage multiplier
    #[serde(default = "default_poison_damage")]
    pub poison_damage: f64,
    #[serde(default = "default_poison_duration")]
    pub poison_duration: u32,
}

impl Default for BossConstants {
    fn default() -> Self {
        BossConstants {
            phase2_threshold: default_phase2_threshold(),
            phase3_threshold: default_phase3_threshold(),
            aoe_mana_cost: default_aoe_mana_cost(),
            aoe_flat: default_aoe_flat(),
            aoe_intelligence: default_aoe_intelligence(),
            poison_mana_cost: default_poison_mana_cost(),
            poison_damage: default_poison_damage(),
            poison_duration: default_poison_duration(),
        }
    }
}

fn default_phase2_threshold() -> f64 {
    0.7
}
fn default_phase3_threshold() -> f64 {
    0.3
}
fn default_aoe_mana_cost() -> i32 {
    40
}
fn default_aoe_flat() -> f64 {
    15.0
}
fn default_aoe_intelligence() -> f64 {
    0.3
}
fn default_poison_mana_cost() -> i32 {
    25
}
fn default_poison_damage() -> f64 {
    12.0
}
fn default_poison_duration() -> u32 {
    3
}

/// Potion strengths and the party's starting stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConstants {
    #[serde(default = "default_health_potion")]
    pub health_potion_hp: i32,
    #[serde(default = "default_mana_potion")]
    pub mana_potion_mp: i32,
    #[serde(default = "default_potion_stock")]
    pub starting_health_potions: u32,
    #[serde(default = "default_potion_stock")]
    pub starting_mana_potions: u32,
}

impl Default for ItemConstants {
    fn default() -> Self {
        ItemConstants {
            health_potion_hp: default_health_potion(),
            mana_potion_mp: default_mana_potion(),
            starting_health_potions: default_potion_stock(),
            starting_mana_potions: default_potion_stock(),
        }
    }
}

fn default_health_potion() -> i32 {
    50
}
fn default_mana_potion() -> i32 {
    30
}
fn default_potion_stock() -> u32 {
    3
}
