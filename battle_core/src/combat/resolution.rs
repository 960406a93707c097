//! Basic attack and skill resolution

use super::crit::roll_crit;
use super::result::{ActionError, AttackOutcome, SkillEffect, SkillOutcome};
use crate::config::GameConstants;
use crate::effect::apply_effect;
use crate::skill::{Skill, SkillKind};
use crate::types::DamageType;
use crate::unit::{CombatActor, Unit};
use rand::Rng;
use tracing::debug;

/// Who a skill lands on
pub enum SkillTarget<'a> {
    /// The caster itself
    Caster,
    Other(&'a mut Unit),
}

/// Resolve a basic attack
///
/// Damage is the attacker's class formula, possibly crit, truncated, then sent
/// through the target's shields before HP. Fails only when the target is not
/// alive.
pub fn basic_attack<A: CombatActor + ?Sized>(
    attacker: &A,
    target: &mut Unit,
    rules: &GameConstants,
    rng: &mut impl Rng,
) -> Result<AttackOutcome, ActionError> {
    if !target.is_alive() {
        return Err(ActionError::NoTarget);
    }

    let (amount, is_critical) = roll_crit(
        attacker.basic_attack_damage(),
        attacker.crit_chance(),
        rules.crit.multiplier,
        rng,
    );
    let damage = target.take_damage(amount as i32);

    debug!(
        attacker = attacker.name(),
        target = %target.name,
        damage = damage.hp_lost,
        absorbed = damage.absorbed,
        is_critical,
        "basic attack"
    );
    Ok(AttackOutcome {
        is_critical,
        damage,
    })
}

/// Check skill preconditions in order: silence, mana, cooldown
pub fn check_skill(caster: &Unit, skill: &Skill) -> Result<(), ActionError> {
    if caster.silence.is_active() {
        return Err(ActionError::Silenced(caster.name.clone()));
    }
    if caster.stats.mp() < skill.mana_cost {
        return Err(ActionError::InsufficientMana {
            skill: skill.name.clone(),
            required: skill.mana_cost,
            available: caster.stats.mp(),
        });
    }
    let remaining = caster.cooldown_remaining(&skill.id);
    if remaining > 0 {
        return Err(ActionError::OnCooldown {
            skill: skill.name.clone(),
            remaining,
        });
    }
    Ok(())
}

/// Resolve a skill from the caster's skill list
///
/// All preconditions are checked before any state changes, so a failure
/// spends no mana and starts no cooldown. On success mana is deducted, the
/// skill lands, and its cooldown starts.
pub fn use_skill(
    caster: &mut Unit,
    skill_index: usize,
    target: SkillTarget<'_>,
    rules: &GameConstants,
    rng: &mut impl Rng,
) -> Result<SkillOutcome, ActionError> {
    let skill = caster
        .skills
        .get(skill_index)
        .cloned()
        .ok_or(ActionError::UnknownSkill(skill_index))?;
    check_skill(caster, &skill)?;

    let target_alive = match &target {
        SkillTarget::Caster => caster.is_alive(),
        SkillTarget::Other(unit) => unit.is_alive(),
    };
    if !target_alive {
        return Err(ActionError::TargetDead);
    }

    caster.stats.spend_mana(skill.mana_cost);

    // Amounts come from the caster before the target is borrowed
    let scaling = &rules.scaling;
    let (amount, is_critical) = match &skill.kind {
        SkillKind::Damage { base, damage_type } => {
            let scaled = match damage_type {
                DamageType::Physical => {
                    base + scaling.physical_strength * caster.stats.strength() as f64
                }
                DamageType::Magical => {
                    base + scaling.magical_intelligence * caster.stats.intelligence() as f64
                }
            };
            let (amount, is_critical) = roll_crit(
                scaled,
                caster.attack.skill_crit_chance,
                rules.crit.multiplier,
                rng,
            );
            (amount as i32, is_critical)
        }
        SkillKind::Heal { base } => (
            (base + scaling.heal_intelligence * caster.stats.intelligence() as f64) as i32,
            false,
        ),
        SkillKind::ApplyEffect { .. } => (0, false),
    };

    let effect = {
        let target: &mut Unit = match target {
            SkillTarget::Caster => &mut *caster,
            SkillTarget::Other(unit) => unit,
        };
        let effect = match &skill.kind {
            SkillKind::Damage { .. } => SkillEffect::Damage {
                is_critical,
                damage: target.take_damage(amount),
            },
            SkillKind::Heal { .. } => SkillEffect::Heal {
                restored: target.stats.heal(amount),
            },
            SkillKind::ApplyEffect { effect } => {
                apply_effect(target, effect.instantiate());
                SkillEffect::Applied { tag: effect.tag() }
            }
        };
        debug!(skill = %skill.name, target = %target.name, ?effect, "skill landed");
        effect
    };

    caster.start_cooldown(&skill.id, skill.cooldown);

    Ok(SkillOutcome {
        skill_id: skill.id,
        skill_name: skill.name,
        mana_spent: skill.mana_cost,
        effect,
    })
}
