//! battle_core - Turn-based party-versus-boss combat engine
//!
//! This library provides:
//! - StatBlock: Clamped unit attributes
//! - Effects: Poison, shields and regeneration with per-turn hooks
//! - Action resolution: Basic attacks, skills and items
//! - Boss: Phase-driven strategy selection
//! - Battle: Round controller with termination and snapshots

pub mod battle;
pub mod boss;
pub mod combat;
pub mod config;
pub mod effect;
pub mod item;
pub mod prelude;
pub mod skill;
pub mod stat_block;
pub mod turn_order;
pub mod types;
pub mod unit;

#[cfg(test)]
mod testing;

// Re-export core types for convenience
pub use battle::{
    ActionChoice, ActionChooser, Battle, BattleSnapshot, BattleState, BattleView, CombatEvent,
    MemberState, Outcome, RestoreState, RoundResult,
};
pub use boss::{Boss, BossAction, BossResolution, BossTurn, Phase, Strategy};
pub use combat::{ActionError, AttackOutcome, DamageReport, SkillEffect, SkillOutcome};
pub use config::{default_classes, default_skills, ConfigError, Difficulty, GameConstants, Ruleset};
pub use effect::{Effect, EffectKind, EffectTag, EffectTemplate};
pub use item::{Inventory, Item, ItemOutcome};
pub use skill::{Skill, SkillKind};
pub use stat_block::{BoundedStat, StatBlock, StatBounds};
pub use turn_order::{SchedulerState, TurnOrder};
pub use types::{DamageType, ScalingStat, TargetSide, UnitClass, UnitId};
pub use unit::{CombatActor, Unit, UnitSnapshot};
