//! The boss: an adaptive enemy whose strategy follows its HP
//!
//! The phase is re-derived from the HP fraction at every boss action, so
//! healing the boss can move it back to an earlier phase.

mod phase;
mod strategy;

pub use phase::Phase;
pub use strategy::{weakest_living, BossAction, Strategy};

use crate::combat::{basic_attack, AttackOutcome, DamageReport};
use crate::config::GameConstants;
use crate::effect::{apply_effect, Effect};
use crate::unit::{CombatActor, Unit};
use rand::Rng;
use tracing::{debug, info};

/// What a boss action actually did after mana checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BossResolution {
    Attack {
        target: usize,
        outcome: AttackOutcome,
    },
    /// One damage report per hit party member
    Aoe { hits: Vec<(usize, DamageReport)> },
    Poison { target: usize, damage_per_turn: i32 },
    Idle,
}

/// Record of one boss turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossTurn {
    pub phase: Phase,
    pub strategy: Strategy,
    /// What the strategy asked for
    pub action: BossAction,
    /// What happened
    pub resolution: BossResolution,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub unit: Unit,
    damage_multiplier: f64,
    phase: Phase,
}

impl Boss {
    pub fn new(unit: Unit, damage_multiplier: f64) -> Self {
        Boss {
            unit,
            damage_multiplier,
            phase: Phase::Phase1,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn strategy(&self) -> Strategy {
        self.phase.strategy()
    }

    /// Re-derive the phase from current HP
    pub fn select_phase(&mut self, rules: &GameConstants) -> Phase {
        let phase = Phase::from_fraction(self.unit.stats.hp_fraction(), &rules.boss);
        if phase != self.phase {
            info!(
                boss = %self.unit.name,
                from = %self.phase,
                to = %phase,
                strategy = %phase.strategy(),
                "boss phase changed"
            );
            self.phase = phase;
        }
        phase
    }

    /// Decide and resolve one boss action against the party
    pub fn take_turn(
        &mut self,
        party: &mut [Unit],
        rules: &GameConstants,
        rng: &mut impl Rng,
    ) -> BossTurn {
        let phase = self.select_phase(rules);
        let strategy = phase.strategy();
        let action = strategy.decide(party);

        let resolution = match &action {
            BossAction::Attack(target) => self.attack(party, *target, rules, rng),
            BossAction::Aoe(targets) => self.aoe(party, targets, rules, rng),
            BossAction::Poison(target) => self.poison(party, *target, rules, rng),
            BossAction::Idle => BossResolution::Idle,
        };

        BossTurn {
            phase,
            strategy,
            action,
            resolution,
        }
    }

    fn attack(
        &self,
        party: &mut [Unit],
        target: usize,
        rules: &GameConstants,
        rng: &mut impl Rng,
    ) -> BossResolution {
        let Some(unit) = party.get_mut(target) else {
            return BossResolution::Idle;
        };
        match basic_attack(self, unit, rules, rng) {
            Ok(outcome) => BossResolution::Attack { target, outcome },
            Err(err) => {
                debug!(%err, "boss attack had no target");
                BossResolution::Idle
            }
        }
    }

    fn aoe(
        &mut self,
        party: &mut [Unit],
        targets: &[usize],
        rules: &GameConstants,
        rng: &mut impl Rng,
    ) -> BossResolution {
        let boss_rules = &rules.boss;
        if self.unit.stats.mp() < boss_rules.aoe_mana_cost {
            debug!(mp = self.unit.stats.mp(), "not enough mana for AOE, attacking instead");
            return match targets.first() {
                Some(&first) => self.attack(party, first, rules, rng),
                None => BossResolution::Idle,
            };
        }

        self.unit.stats.spend_mana(boss_rules.aoe_mana_cost);
        let damage = ((boss_rules.aoe_flat
            + boss_rules.aoe_intelligence * self.unit.stats.intelligence() as f64)
            * self.damage_multiplier) as i32;

        let hits = targets
            .iter()
            .filter_map(|&index| {
                let unit = party.get_mut(index)?;
                if !unit.is_alive() {
                    return None;
                }
                Some((index, unit.take_damage(damage)))
            })
            .collect();

        debug!(boss = %self.unit.name, damage, "AOE attack");
        BossResolution::Aoe { hits }
    }

    fn poison(
        &mut self,
        party: &mut [Unit],
        target: usize,
        rules: &GameConstants,
        rng: &mut impl Rng,
    ) -> BossResolution {
        let boss_rules = &rules.boss;
        if self.unit.stats.mp() < boss_rules.poison_mana_cost {
            debug!(mp = self.unit.stats.mp(), "not enough mana for poison, attacking instead");
            return self.attack(party, target, rules, rng);
        }
        let Some(unit) = party.get_mut(target) else {
            return BossResolution::Idle;
        };

        self.unit.stats.spend_mana(boss_rules.poison_mana_cost);
        let damage_per_turn = (boss_rules.poison_damage * self.damage_multiplier) as i32;
        apply_effect(unit, Effect::poison(damage_per_turn, boss_rules.poison_duration));

        debug!(boss = %self.unit.name, target = %unit.name, damage_per_turn, "poisoned");
        BossResolution::Poison {
            target,
            damage_per_turn,
        }
    }
}

impl CombatActor for Boss {
    fn unit(&self) -> &Unit {
        &self.unit
    }

    fn damage_multiplier(&self) -> f64 {
        self.damage_multiplier
    }
}
