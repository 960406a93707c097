//! Human-readable battle log lines

use battle_core::prelude::*;
use battle_core::{BossResolution, DamageReport, EffectKind};

fn name(view: &BattleView<'_>, id: UnitId) -> String {
    view.unit(id)
        .map_or_else(|| format!("{id:?}"), |unit| unit.name.clone())
}

fn hit(damage: &DamageReport, is_critical: bool) -> String {
    let mut text = format!("{} damage", damage.hp_lost);
    if is_critical {
        text.push_str(" (critical!)");
    }
    if damage.absorbed > 0 {
        text.push_str(&format!(", {} absorbed by shields", damage.absorbed));
    }
    if damage.killed {
        text.push_str(", a killing blow");
    }
    text
}

/// One log line for an event; `None` for events not worth printing
pub fn describe(view: &BattleView<'_>, event: &CombatEvent) -> Option<String> {
    let line = match event {
        CombatEvent::RoundStarted { round } => format!("\n=== Round {round} ==="),
        CombatEvent::TurnStarted { .. } => return None,
        CombatEvent::EffectTriggered { unit, tick } => match tick.tag {
            EffectTag::Poison => format!("{} takes {} poison damage", name(view, *unit), tick.amount),
            EffectTag::Regeneration => {
                format!("{} regenerates {} HP", name(view, *unit), tick.amount)
            }
            EffectTag::Shield => return None,
        },
        CombatEvent::DiedFromEffects { unit } => {
            format!("{} falls to lingering effects", name(view, *unit))
        }
        CombatEvent::Attacked {
            attacker,
            target,
            outcome,
        } => format!(
            "{} attacks {} for {}",
            name(view, *attacker),
            name(view, *target),
            hit(&outcome.damage, outcome.is_critical)
        ),
        CombatEvent::SkillUsed {
            caster,
            target,
            outcome,
        } => {
            let caster = name(view, *caster);
            let target = name(view, *target);
            match outcome.effect {
                SkillEffect::Damage {
                    is_critical,
                    damage,
                } => format!(
                    "{caster} casts {} on {target} for {}",
                    outcome.skill_name,
                    hit(&damage, is_critical)
                ),
                SkillEffect::Heal { restored } => format!(
                    "{caster} casts {} on {target}, restoring {restored} HP",
                    outcome.skill_name
                ),
                SkillEffect::Applied { tag } => format!(
                    "{caster} casts {} on {target} ({})",
                    outcome.skill_name,
                    tag.name()
                ),
            }
        }
        CombatEvent::ItemUsed {
            user,
            target,
            outcome,
        } => format!(
            "{} uses a {} on {}, restoring {}",
            name(view, *user),
            outcome.item,
            name(view, *target),
            outcome.restored
        ),
        CombatEvent::PhaseChanged { to, .. } => format!(
            "{} enters {} and turns {}",
            view.boss.unit.name,
            to,
            to.strategy()
        ),
        CombatEvent::BossActed { turn } => {
            let boss = &view.boss.unit.name;
            match &turn.resolution {
                BossResolution::Attack { target, outcome } => format!(
                    "{boss} attacks {} for {}",
                    name(view, UnitId::Party(*target)),
                    hit(&outcome.damage, outcome.is_critical)
                ),
                BossResolution::Aoe { hits } => {
                    let hits: Vec<String> = hits
                        .iter()
                        .map(|(index, damage)| {
                            format!("{} -{}", name(view, UnitId::Party(*index)), damage.hp_lost)
                        })
                        .collect();
                    format!("{boss} sweeps the party: {}", hits.join(", "))
                }
                BossResolution::Poison {
                    target,
                    damage_per_turn,
                } => format!(
                    "{boss} poisons {} ({damage_per_turn} per turn)",
                    name(view, UnitId::Party(*target))
                ),
                BossResolution::Idle => format!("{boss} has nobody left to fight"),
            }
        }
        CombatEvent::Skipped { actor } => format!("{} skips the turn", name(view, *actor)),
        CombatEvent::ActionFailed { actor, error } => {
            format!("{} fumbles: {error}", name(view, *actor))
        }
        CombatEvent::EffectExpired { unit, effect } => {
            format!("{effect} on {} wears off", name(view, *unit))
        }
        CombatEvent::BattleEnded { outcome } => match outcome {
            Outcome::Victory => "\n=== VICTORY! The boss is defeated ===".to_string(),
            Outcome::Defeat => "\n=== DEFEAT! The whole party has fallen ===".to_string(),
            Outcome::Ongoing => return None,
        },
    };
    Some(line)
}

/// One status line per unit
pub fn status(unit: &Unit) -> String {
    let mut line = format!(
        "{:<14} {:<8} HP {:>4}/{:<4} MP {:>3}/{:<3}",
        unit.name,
        unit.class,
        unit.stats.hp(),
        unit.stats.max_hp(),
        unit.stats.mp(),
        unit.stats.max_mp()
    );
    for effect in &unit.effects {
        let detail = match effect.kind {
            EffectKind::Shield { current_shield, .. } => format!(" [{} {}]", effect.name, current_shield),
            _ => format!(" [{} {}r]", effect.name, effect.remaining_duration()),
        };
        line.push_str(&detail);
    }
    if !unit.is_alive() {
        line.push_str(" (down)");
    }
    line
}
