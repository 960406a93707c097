//! Class configuration loading: base stats, growth, attack formula, loadout

use super::{ConfigError, SkillTable};
use crate::stat_block::{BaseStats, StatBlock, StatBounds};
use crate::types::UnitClass;
use crate::unit::{AttackProfile, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::error;

/// Fractional stat values; truncated when a unit is built
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(default)]
    pub hp: f64,
    #[serde(default)]
    pub mp: f64,
    #[serde(default)]
    pub strength: f64,
    #[serde(default)]
    pub agility: f64,
    #[serde(default)]
    pub intelligence: f64,
}

/// Configuration for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassConfig {
    pub class: UnitClass,
    /// Skill ids, in menu order
    #[serde(default)]
    pub skills: Vec<String>,
    /// Stats before level growth
    pub base: StatLine,
    /// Stats gained per level
    #[serde(default)]
    pub growth: StatLine,
    pub attack: AttackProfile,
}

impl ClassConfig {
    /// `base + growth * level`, truncated
    pub fn stats_at(&self, level: u32) -> BaseStats {
        let level = level as f64;
        let at = |base: f64, growth: f64| (base + growth * level) as i32;
        BaseStats {
            hp: at(self.base.hp, self.growth.hp),
            mp: at(self.base.mp, self.growth.mp),
            strength: at(self.base.strength, self.growth.strength),
            agility: at(self.base.agility, self.growth.agility),
            intelligence: at(self.base.intelligence, self.growth.intelligence),
        }
    }

    /// Build a fresh unit of this class at full HP/MP
    pub fn build_unit(
        &self,
        name: impl Into<String>,
        level: u32,
        skills: &SkillTable,
        bounds: &StatBounds,
    ) -> Result<Unit, ConfigError> {
        let loadout = skills.loadout(&self.skills)?;
        let stats = StatBlock::new(&self.stats_at(level), bounds);
        Ok(Unit::new(
            name,
            level,
            self.class,
            stats,
            self.attack.clone(),
            loadout,
        ))
    }
}

/// Container for class configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassesConfig {
    pub classes: Vec<ClassConfig>,
}

/// Class configurations by class
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<UnitClass, ClassConfig>,
}

impl ClassTable {
    pub fn new() -> Self {
        ClassTable {
            classes: HashMap::new(),
        }
    }

    pub fn register(&mut self, config: ClassConfig) {
        self.classes.insert(config.class, config);
    }

    pub fn get(&self, class: UnitClass) -> Option<&ClassConfig> {
        self.classes.get(&class)
    }

    pub fn require(&self, class: UnitClass) -> Result<&ClassConfig, ConfigError> {
        self.get(class)
            .ok_or_else(|| ConfigError::ValidationError(format!("no class config for {class}")))
    }

    fn from_config(config: ClassesConfig) -> Self {
        let mut table = Self::new();
        for class in config.classes {
            table.register(class);
        }
        table
    }
}

/// Load class configurations from a TOML file
pub fn load_class_configs(path: &Path) -> Result<ClassTable, ConfigError> {
    let config: ClassesConfig = super::load_toml(path)?;
    Ok(ClassTable::from_config(config))
}

/// Load class configurations from a TOML string
pub fn parse_class_configs(content: &str) -> Result<ClassTable, ConfigError> {
    let config: ClassesConfig = super::parse_toml(content)?;
    Ok(ClassTable::from_config(config))
}

/// Get the built-in class table
pub fn default_classes() -> ClassTable {
    let toml = include_str!("../../config/classes.toml");
    parse_class_configs(toml).unwrap_or_else(|err| {
        error!(%err, "built-in class table failed to parse");
        ClassTable::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_skills;
    use crate::types::ScalingStat;

    #[test]
    fn test_default_classes_cover_every_class() {
        let classes = default_classes();
        for class in [
            UnitClass::Warrior,
            UnitClass::Mage,
            UnitClass::Healer,
            UnitClass::Boss,
        ] {
            assert!(classes.get(class).is_some(), "Missing class: {}", class);
        }
    }

    #[test]
    fn test_level_growth_truncates() {
        let classes = default_classes();
        let warrior = classes.get(UnitClass::Warrior).unwrap();
        let stats = warrior.stats_at(1);
        assert_eq!(stats.hp, 170);
        assert_eq!(stats.mp, 35);
        assert_eq!(stats.strength, 22);
        assert_eq!(stats.agility, 16);
        // 8 + 0.5
        assert_eq!(stats.intelligence, 8);
    }

    #[test]
    fn test_boss_stats_at_level_ten() {
        let classes = default_classes();
        let boss = classes.get(UnitClass::Boss).unwrap();
        let stats = boss.stats_at(10);
        assert_eq!(stats.hp, 1000);
        assert_eq!(stats.mp, 400);
        assert_eq!(stats.strength, 60);
        assert_eq!(stats.agility, 40);
        assert_eq!(stats.intelligence, 45);
        assert_eq!(boss.attack.scaling, ScalingStat::Strength);
    }

    #[test]
    fn test_build_unit_resolves_loadout() {
        let classes = default_classes();
        let skills = default_skills();
        let healer = classes
            .get(UnitClass::Healer)
            .unwrap()
            .build_unit("Iris", 1, &skills, &StatBounds::default())
            .unwrap();

        assert_eq!(healer.class, UnitClass::Healer);
        let ids: Vec<&str> = healer.skills.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["heal", "poison_dart", "renew"]);
        assert_eq!(healer.stats.hp(), healer.stats.max_hp());
    }

    #[test]
    fn test_parse_class_without_growth() {
        let toml = r#"
[[classes]]
class = "mage"
skills = []

[classes.base]
hp = 80.0
mp = 80.0
strength = 8.0
agility = 12.0
intelligence = 25.0

[classes.attack]
scaling = "intelligence"
flat = 8.0
coefficient = 0.2
"#;

        let classes = parse_class_configs(toml).unwrap();
        let mage = classes.get(UnitClass::Mage).unwrap();
        assert_eq!(mage.stats_at(5).intelligence, 25);
        assert!((mage.attack.crit_chance - 0.0).abs() < f64::EPSILON);
        assert!((mage.attack.skill_crit_chance - 0.10).abs() < f64::EPSILON);
    }
}
