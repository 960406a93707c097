//! Unit - A combat participant and its per-encounter state

use crate::combat::DamageReport;
use crate::effect::{self, Effect};
use crate::skill::Skill;
use crate::stat_block::StatBlock;
use crate::types::{ScalingStat, UnitClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Basic-attack formula and crit chances for a unit
///
/// Basic attack damage is `flat + coefficient * scaling stat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub scaling: ScalingStat,
    pub flat: f64,
    pub coefficient: f64,
    /// Chance (0..1) for a basic attack to crit
    #[serde(default)]
    pub crit_chance: f64,
    /// Chance (0..1) for a damage skill to crit
    #[serde(default = "default_skill_crit_chance")]
    pub skill_crit_chance: f64,
}

fn default_skill_crit_chance() -> f64 {
    0.10
}

impl AttackProfile {
    pub fn base_damage(&self, stats: &StatBlock) -> f64 {
        let stat = match self.scaling {
            ScalingStat::Strength => stats.strength(),
            ScalingStat::Intelligence => stats.intelligence(),
        };
        self.flat + self.coefficient * stat as f64
    }
}

/// Silence state: while active the unit cannot use skills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Silence {
    remaining: u32,
}

impl Silence {
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Silence for `rounds`; an existing longer silence is kept
    pub fn apply(&mut self, rounds: u32) {
        self.remaining = self.remaining.max(rounds);
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// A party member or the core of a boss
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub level: u32,
    pub class: UnitClass,
    pub stats: StatBlock,
    /// Active effects in attachment order
    pub effects: Vec<Effect>,
    /// Skill id -> rounds until the skill is usable again
    pub cooldowns: BTreeMap<String, u32>,
    pub silence: Silence,
    pub skills: Vec<Skill>,
    pub attack: AttackProfile,
}

impl Unit {
    pub fn new(
        name: impl Into<String>,
        level: u32,
        class: UnitClass,
        stats: StatBlock,
        attack: AttackProfile,
        skills: Vec<Skill>,
    ) -> Self {
        Unit {
            name: name.into(),
            level,
            class,
            stats,
            effects: Vec::new(),
            cooldowns: BTreeMap::new(),
            silence: Silence::default(),
            skills,
            attack,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Take damage: shields absorb first, the rest comes off HP
    pub fn take_damage(&mut self, amount: i32) -> DamageReport {
        let raw = amount.max(0);
        let remaining = effect::absorb(self, raw);
        let hp_lost = self.stats.lose_hp(remaining);
        DamageReport {
            raw,
            absorbed: raw - remaining,
            hp_lost,
            killed: hp_lost > 0 && !self.is_alive(),
        }
    }

    pub fn cooldown_remaining(&self, skill_id: &str) -> u32 {
        self.cooldowns.get(skill_id).copied().unwrap_or(0)
    }

    pub fn is_on_cooldown(&self, skill_id: &str) -> bool {
        self.cooldown_remaining(skill_id) > 0
    }

    pub fn start_cooldown(&mut self, skill_id: &str, rounds: u32) {
        if rounds > 0 {
            self.cooldowns.insert(skill_id.to_string(), rounds);
        }
    }

    /// Count every cooldown down one round, dropping finished ones
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(1);
            *remaining > 0
        });
    }

    pub fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            name: self.name.clone(),
            class: self.class,
            level: self.level,
            hp: self.stats.hp(),
            max_hp: self.stats.max_hp(),
            mp: self.stats.mp(),
            max_mp: self.stats.max_mp(),
            strength: self.stats.strength(),
            agility: self.stats.agility(),
            intelligence: self.stats.intelligence(),
            effects: self.effects.clone(),
            cooldowns: self.cooldowns.clone(),
            silenced_rounds: self.silence.remaining(),
        }
    }
}

/// Read-only plain-value view of a unit for rendering and saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub name: String,
    pub class: UnitClass,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub effects: Vec<Effect>,
    pub cooldowns: BTreeMap<String, u32>,
    pub silenced_rounds: u32,
}

/// Capability set shared by party members and the boss
pub trait CombatActor {
    fn unit(&self) -> &Unit;

    /// Scales basic attacks and boss abilities
    fn damage_multiplier(&self) -> f64 {
        1.0
    }

    /// Pre-crit basic attack damage
    fn basic_attack_damage(&self) -> f64 {
        let unit = self.unit();
        unit.attack.base_damage(&unit.stats) * self.damage_multiplier()
    }

    fn crit_chance(&self) -> f64 {
        self.unit().attack.crit_chance
    }

    fn name(&self) -> &str {
        &self.unit().name
    }

    fn is_alive(&self) -> bool {
        self.unit().is_alive()
    }
}

impl CombatActor for Unit {
    fn unit(&self) -> &Unit {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dummy_unit, dummy_unit_with_hp};

    #[test]
    fn test_take_damage_reports_kill() {
        let mut unit = dummy_unit_with_hp(30);
        let report = unit.take_damage(45);
        assert_eq!(report.raw, 45);
        assert_eq!(report.hp_lost, 30);
        assert!(report.killed);
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut unit = dummy_unit_with_hp(30);
        let report = unit.take_damage(-10);
        assert_eq!(report.hp_lost, 0);
        assert_eq!(unit.stats.hp(), 30);
    }

    #[test]
    fn test_cooldowns_count_down_and_clear() {
        let mut unit = dummy_unit();
        unit.start_cooldown("fireball", 2);
        assert!(unit.is_on_cooldown("fireball"));

        unit.tick_cooldowns();
        assert_eq!(unit.cooldown_remaining("fireball"), 1);

        unit.tick_cooldowns();
        assert!(!unit.is_on_cooldown("fireball"));
        assert!(unit.cooldowns.is_empty());
    }

    #[test]
    fn test_zero_cooldown_is_not_recorded() {
        let mut unit = dummy_unit();
        unit.start_cooldown("jab", 0);
        assert!(unit.cooldowns.is_empty());
    }

    #[test]
    fn test_silence_keeps_longer_duration() {
        let mut silence = Silence::default();
        silence.apply(3);
        silence.apply(1);
        assert_eq!(silence.remaining(), 3);
        silence.tick();
        silence.tick();
        silence.tick();
        assert!(!silence.is_active());
    }

    #[test]
    fn test_basic_attack_formula() {
        let unit = dummy_unit();
        // 10 + 0.3 * 20 strength
        assert!((unit.basic_attack_damage() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_copies_plain_values() {
        let mut unit = dummy_unit_with_hp(80);
        unit.stats.set_hp(50);
        unit.start_cooldown("fireball", 3);

        let snapshot = unit.snapshot();
        assert_eq!(snapshot.hp, 50);
        assert_eq!(snapshot.max_hp, 80);
        assert_eq!(snapshot.cooldowns.get("fireball"), Some(&3));
    }
}
