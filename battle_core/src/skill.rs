//! Skill templates

use crate::effect::{EffectTag, EffectTemplate};
use crate::types::{DamageType, TargetSide};
use serde::{Deserialize, Serialize};

/// What a skill does when it lands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillKind {
    Damage { base: f64, damage_type: DamageType },
    Heal { base: f64 },
    ApplyEffect { effect: EffectTemplate },
}

/// Immutable skill definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique identifier, also the cooldown key
    pub id: String,
    /// Display name
    pub name: String,
    pub mana_cost: i32,
    /// Rounds before the skill may be used again
    #[serde(default)]
    pub cooldown: u32,
    pub kind: SkillKind,
}

impl Skill {
    /// Side the skill may be aimed at
    pub fn target_side(&self) -> TargetSide {
        match &self.kind {
            SkillKind::Damage { .. } => TargetSide::Enemy,
            SkillKind::Heal { .. } => TargetSide::Ally,
            SkillKind::ApplyEffect { effect } => match effect.tag() {
                EffectTag::Poison => TargetSide::Enemy,
                EffectTag::Shield | EffectTag::Regeneration => TargetSide::Ally,
            },
        }
    }
}
