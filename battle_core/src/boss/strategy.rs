//! Boss decision rules

use crate::effect::{has_effect, EffectTag};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the boss picks its action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Basic attack on the weakest living party member
    Aggressive,
    /// Hit every living party member at once
    Aoe,
    /// Spread poison, then attack the weakest
    Debuff,
}

/// A boss decision; indices address the party roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BossAction {
    Attack(usize),
    Aoe(Vec<usize>),
    Poison(usize),
    /// Nobody left to target
    Idle,
}

/// Living member with the lowest current HP; ties go to the earliest index
pub fn weakest_living(party: &[Unit]) -> Option<usize> {
    party
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.is_alive())
        .min_by_key(|(_, unit)| unit.stats.hp())
        .map(|(index, _)| index)
}

fn living(party: &[Unit]) -> Vec<usize> {
    party
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.is_alive())
        .map(|(index, _)| index)
        .collect()
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Aggressive => "Aggressive",
            Strategy::Aoe => "AOE",
            Strategy::Debuff => "Debuff",
        }
    }

    /// Pick an action against the current party
    pub fn decide(&self, party: &[Unit]) -> BossAction {
        let Some(weakest) = weakest_living(party) else {
            return BossAction::Idle;
        };

        match self {
            Strategy::Aggressive => BossAction::Attack(weakest),
            Strategy::Aoe => {
                let targets = living(party);
                if targets.len() >= 2 {
                    BossAction::Aoe(targets)
                } else {
                    BossAction::Attack(weakest)
                }
            }
            Strategy::Debuff => party
                .iter()
                .position(|unit| unit.is_alive() && !has_effect(unit, EffectTag::Poison))
                .map_or(BossAction::Attack(weakest), BossAction::Poison),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
