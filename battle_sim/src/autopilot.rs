//! Automatic party policy

use battle_core::prelude::*;
use battle_core::SkillKind;

/// Below this HP fraction an ally counts as in trouble
const LOW_HP: f64 = 0.5;

/// Keeps the party alive first and hits hard second
///
/// Each turn: heal the most wounded ally below half HP (skill, then potion),
/// otherwise cast the strongest affordable damage skill, otherwise attack.
#[derive(Debug, Default)]
pub struct AutoPilot {
    pending_target: Option<UnitId>,
}

fn can_cast(unit: &Unit, skill: &Skill) -> bool {
    !unit.silence.is_active()
        && unit.stats.mp() >= skill.mana_cost
        && !unit.is_on_cooldown(&skill.id)
}

/// Living member with the lowest HP fraction
fn most_wounded(party: &[Unit], among: impl Iterator<Item = usize>) -> Option<usize> {
    among
        .filter(|&index| party.get(index).is_some_and(Unit::is_alive))
        .min_by(|&a, &b| {
            party[a]
                .stats
                .hp_fraction()
                .total_cmp(&party[b].stats.hp_fraction())
        })
}

fn heal_choice(view: &BattleView<'_>, actor: usize) -> Option<(ActionChoice, usize)> {
    let patient = most_wounded(view.party, 0..view.party.len())
        .filter(|&index| view.party[index].stats.hp_fraction() < LOW_HP)?;

    let unit = &view.party[actor];
    let skill = unit
        .skills
        .iter()
        .position(|s| matches!(s.kind, SkillKind::Heal { .. }) && can_cast(unit, s));
    if let Some(index) = skill {
        return Some((ActionChoice::Skill(index), patient));
    }

    view.inventory
        .items()
        .iter()
        .position(|&item| item == Item::HealthPotion)
        .map(|index| (ActionChoice::Item(index), patient))
}

fn damage_choice(view: &BattleView<'_>, actor: usize) -> Option<ActionChoice> {
    let unit = &view.party[actor];
    unit.skills
        .iter()
        .enumerate()
        .filter(|(_, skill)| can_cast(unit, skill))
        .filter_map(|(index, skill)| match skill.kind {
            SkillKind::Damage { base, .. } => Some((index, base)),
            _ => None,
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| ActionChoice::Skill(index))
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActionChooser for AutoPilot {
    fn choose_action(&mut self, view: &BattleView<'_>, actor: usize) -> ActionChoice {
        self.pending_target = None;

        if let Some((choice, patient)) = heal_choice(view, actor) {
            self.pending_target = Some(UnitId::Party(patient));
            return choice;
        }
        damage_choice(view, actor).unwrap_or(ActionChoice::Attack)
    }

    fn choose_target(
        &mut self,
        view: &BattleView<'_>,
        candidates: &[UnitId],
        side: TargetSide,
    ) -> Option<UnitId> {
        if let Some(target) = self.pending_target.take() {
            if candidates.contains(&target) {
                return Some(target);
            }
        }

        match side {
            TargetSide::Enemy => candidates.first().copied(),
            TargetSide::Ally => {
                let members = candidates.iter().filter_map(|id| match id {
                    UnitId::Party(index) => Some(*index),
                    UnitId::Boss => None,
                });
                most_wounded(view.party, members).map(UnitId::Party)
            }
        }
    }
}
