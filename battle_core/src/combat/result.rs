//! Action outcomes and failures

use crate::effect::EffectTag;
use thiserror::Error;

/// Why an action could not be carried out
///
/// These are routine outcomes of player choices, not faults. A failed action
/// leaves every unit untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0} is silenced and cannot use skills")]
    Silenced(String),
    #[error("not enough mana for {skill}: need {required}, have {available}")]
    InsufficientMana {
        skill: String,
        required: i32,
        available: i32,
    },
    #[error("{skill} is on cooldown for {remaining} more rounds")]
    OnCooldown { skill: String, remaining: u32 },
    #[error("no skill in slot {0}")]
    UnknownSkill(usize),
    #[error("no item in slot {0}")]
    UnknownItem(usize),
    #[error("target is not alive")]
    TargetDead,
    #[error("no valid target")]
    NoTarget,
}

/// What one hit did to its target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageReport {
    /// Damage before shields
    pub raw: i32,
    /// Soaked by shields
    pub absorbed: i32,
    /// Actually removed from HP
    pub hp_lost: i32,
    /// This hit took the target from alive to dead
    pub killed: bool,
}

/// Result of a basic attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub is_critical: bool,
    pub damage: DamageReport,
}

/// Variant-specific part of a skill outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillEffect {
    Damage {
        is_critical: bool,
        damage: DamageReport,
    },
    Heal {
        restored: i32,
    },
    Applied {
        tag: EffectTag,
    },
}

/// Result of a successful skill use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillOutcome {
    pub skill_id: String,
    pub skill_name: String,
    pub mana_spent: i32,
    pub effect: SkillEffect,
}
