//! Structured per-round combat log

use crate::boss::{BossTurn, Phase};
use crate::combat::{ActionError, AttackOutcome, SkillOutcome};
use crate::effect::EffectTick;
use crate::item::ItemOutcome;
use crate::types::UnitId;

use super::Outcome;

/// Something that happened during a round, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        actor: UnitId,
    },
    /// A start-of-turn hook fired
    EffectTriggered {
        unit: UnitId,
        tick: EffectTick,
    },
    /// Start-of-turn effects killed the unit; its action is skipped
    DiedFromEffects {
        unit: UnitId,
    },
    Attacked {
        attacker: UnitId,
        target: UnitId,
        outcome: AttackOutcome,
    },
    SkillUsed {
        caster: UnitId,
        target: UnitId,
        outcome: SkillOutcome,
    },
    ItemUsed {
        user: UnitId,
        target: UnitId,
        outcome: ItemOutcome,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    BossActed {
        turn: BossTurn,
    },
    Skipped {
        actor: UnitId,
    },
    /// The action was rejected; the turn is still spent
    ActionFailed {
        actor: UnitId,
        error: ActionError,
    },
    EffectExpired {
        unit: UnitId,
        effect: String,
    },
    BattleEnded {
        outcome: Outcome,
    },
}
