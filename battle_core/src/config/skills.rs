//! Skill configuration loading

use super::ConfigError;
use crate::skill::Skill;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::error;

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub skills: Vec<Skill>,
}

/// Skill templates by id
#[derive(Debug, Clone, Default)]
pub struct SkillTable {
    skills: HashMap<String, Skill>,
}

impl SkillTable {
    pub fn new() -> Self {
        SkillTable {
            skills: HashMap::new(),
        }
    }

    pub fn register(&mut self, skill: Skill) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Resolve a loadout of skill ids into templates, in order
    pub fn loadout(&self, ids: &[String]) -> Result<Vec<Skill>, ConfigError> {
        ids.iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| ConfigError::ValidationError(format!("unknown skill: {id}")))
            })
            .collect()
    }

    fn from_config(config: SkillsConfig) -> Self {
        let mut table = Self::new();
        for skill in config.skills {
            table.register(skill);
        }
        table
    }
}

/// Load skill configurations from a TOML file
pub fn load_skill_configs(path: &Path) -> Result<SkillTable, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    Ok(SkillTable::from_config(config))
}

/// Load skill configurations from a TOML string
pub fn parse_skill_configs(content: &str) -> Result<SkillTable, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    Ok(SkillTable::from_config(config))
}

/// Get the built-in skill table
pub fn default_skills() -> SkillTable {
    let toml = include_str!("../../config/skills.toml");
    parse_skill_configs(toml).unwrap_or_else(|err| {
        error!(%err, "built-in skill table failed to parse");
        SkillTable::new()
    })
}
