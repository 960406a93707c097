//! Shared fixtures for unit tests

use crate::stat_block::{BaseStats, StatBlock, StatBounds};
use crate::types::{ScalingStat, UnitClass};
use crate::unit::{AttackProfile, Unit};

/// Warrior-shaped unit with no crit chance and no skills
pub fn dummy_unit() -> Unit {
    dummy_unit_with_hp(100)
}

pub fn dummy_unit_with_hp(hp: i32) -> Unit {
    let base = BaseStats {
        hp,
        mp: 50,
        strength: 20,
        agility: 10,
        intelligence: 10,
    };
    Unit::new(
        "Dummy",
        1,
        UnitClass::Warrior,
        StatBlock::new(&base, &StatBounds::default()),
        AttackProfile {
            scaling: ScalingStat::Strength,
            flat: 10.0,
            coefficient: 0.3,
            crit_chance: 0.0,
            skill_crit_chance: 0.0,
        },
        Vec::new(),
    )
}
