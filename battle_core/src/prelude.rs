//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Units and stats
pub use crate::stat_block::StatBlock;
pub use crate::types::{TargetSide, UnitClass, UnitId};
pub use crate::unit::{CombatActor, Unit, UnitSnapshot};

// Battle
pub use crate::battle::{
    ActionChoice, ActionChooser, Battle, BattleSnapshot, BattleState, BattleView, CombatEvent,
    Outcome, RestoreState, RoundResult,
};
pub use crate::boss::{Boss, Phase, Strategy};

// Actions
pub use crate::combat::{ActionError, SkillEffect};
pub use crate::effect::{Effect, EffectTag};
pub use crate::item::{Inventory, Item};
pub use crate::skill::Skill;

// Config
pub use crate::config::{build_boss, build_party, Difficulty, GameConstants, Ruleset};
