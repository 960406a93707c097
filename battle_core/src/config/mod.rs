//! Configuration loading from TOML files

mod classes;
mod constants;
pub mod presets;
mod skills;

pub use classes::{
    default_classes, load_class_configs, parse_class_configs, ClassConfig, ClassTable, StatLine,
};
pub use constants::{BossConstants, CritConstants, GameConstants, ItemConstants, SkillScaling};
pub use presets::{build_boss, build_party, Difficulty};
pub use skills::{default_skills, load_skill_configs, parse_skill_configs, SkillTable};

use crate::types::UnitClass;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Every table an encounter is tuned by
#[derive(Debug, Clone)]
pub struct Ruleset {
    pub constants: GameConstants,
    pub classes: ClassTable,
    pub skills: SkillTable,
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset {
            constants: GameConstants::default(),
            classes: default_classes(),
            skills: default_skills(),
        }
    }
}

impl Ruleset {
    /// Load `constants.toml`, `classes.toml` and `skills.toml` from `dir`
    ///
    /// Missing files fall back to the built-in tables.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let mut rules = Ruleset::default();

        let constants = dir.join("constants.toml");
        if constants.exists() {
            rules.constants = load_toml(&constants)?;
        }
        let classes = dir.join("classes.toml");
        if classes.exists() {
            rules.classes = load_class_configs(&classes)?;
        }
        let skills = dir.join("skills.toml");
        if skills.exists() {
            rules.skills = load_skill_configs(&skills)?;
        }

        rules.validate()?;
        Ok(rules)
    }

    /// Check cross-table consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let boss = &self.constants.boss;
        if boss.phase3_threshold > boss.phase2_threshold {
            return Err(ConfigError::ValidationError(format!(
                "phase3_threshold ({}) is above phase2_threshold ({})",
                boss.phase3_threshold, boss.phase2_threshold
            )));
        }

        let classes = UnitClass::party_classes().iter().copied();
        for class in classes.chain([UnitClass::Boss]) {
            let config = self.classes.require(class)?;
            self.skills.loadout(&config.skills)?;
        }
        Ok(())
    }
}
