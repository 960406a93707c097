//! Effect lifecycle: application, start-of-turn hooks, round-end ticking and
//! shield absorption

use super::{Effect, EffectKind, EffectTag};
use crate::unit::Unit;
use tracing::debug;

/// One start-of-turn hook firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectTick {
    pub tag: EffectTag,
    /// HP lost (poison) or restored (regeneration)
    pub amount: i32,
}

/// Result of running start-of-turn hooks for one unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnStartReport {
    pub ticks: Vec<EffectTick>,
    /// The unit was alive before the hooks and is not anymore
    pub died: bool,
}

impl TurnStartReport {
    pub fn total_damage(&self) -> i32 {
        self.ticks
            .iter()
            .filter(|t| t.tag == EffectTag::Poison)
            .map(|t| t.amount)
            .sum()
    }

    pub fn total_healed(&self) -> i32 {
        self.ticks
            .iter()
            .filter(|t| t.tag == EffectTag::Regeneration)
            .map(|t| t.amount)
            .sum()
    }
}

/// Attach an effect to a unit and run its immediate setup
pub fn apply_effect(unit: &mut Unit, mut effect: Effect) {
    if let EffectKind::Shield {
        shield_amount,
        ref mut current_shield,
    } = effect.kind
    {
        *current_shield = shield_amount;
    }
    debug!(unit = %unit.name, effect = %effect.name, rounds = effect.duration(), "effect applied");
    unit.effects.push(effect);
}

/// Run every start-of-turn hook in attachment order
///
/// Poison damage goes through the owner's shields like any other damage.
/// Hooks stop firing once the owner is dead.
pub fn on_turn_start(unit: &mut Unit) -> TurnStartReport {
    let mut report = TurnStartReport::default();
    if !unit.is_alive() {
        return report;
    }

    for index in 0..unit.effects.len() {
        if !unit.is_alive() {
            break;
        }
        match unit.effects[index].kind {
            EffectKind::Poison { damage_per_turn } => {
                let damage = unit.take_damage(damage_per_turn);
                debug!(unit = %unit.name, damage = damage.hp_lost, "poison ticks");
                report.ticks.push(EffectTick {
                    tag: EffectTag::Poison,
                    amount: damage.hp_lost,
                });
            }
            EffectKind::Regeneration { heal_per_turn } => {
                let healed = unit.stats.heal(heal_per_turn);
                debug!(unit = %unit.name, healed, "regeneration ticks");
                report.ticks.push(EffectTick {
                    tag: EffectTag::Regeneration,
                    amount: healed,
                });
            }
            EffectKind::Shield { .. } => {}
        }
    }

    report.died = !unit.is_alive();
    report
}

/// Count every effect down one round and remove the ones that expire
///
/// Returns the removed effects in attachment order.
pub fn tick_end_of_round(unit: &mut Unit) -> Vec<Effect> {
    let mut expired = Vec::new();
    unit.effects.retain_mut(|effect| {
        if effect.decrement() {
            expired.push(effect.clone());
            false
        } else {
            true
        }
    });

    for effect in &expired {
        debug!(unit = %unit.name, effect = %effect.name, "effect expired");
    }
    expired
}

/// Soak incoming damage with the unit's shields, oldest first
///
/// Returns the damage left over for HP.
pub fn absorb(unit: &mut Unit, incoming: i32) -> i32 {
    let mut remaining = incoming.max(0);
    for effect in unit.effects.iter_mut() {
        if remaining == 0 {
            break;
        }
        if let EffectKind::Shield {
            ref mut current_shield,
            ..
        } = effect.kind
        {
            let absorbed = remaining.min(*current_shield).max(0);
            *current_shield -= absorbed;
            remaining -= absorbed;
        }
    }
    remaining
}

pub fn has_effect(unit: &Unit, tag: EffectTag) -> bool {
    unit.effects.iter().any(|e| e.tag() == tag)
}

/// Remove every effect without running teardown hooks
pub fn clear_effects(unit: &mut Unit) -> Vec<Effect> {
    std::mem::take(&mut unit.effects)
}
