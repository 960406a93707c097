//! The seam between the controller and whoever picks party actions

use crate::boss::Boss;
use crate::item::Inventory;
use crate::types::{TargetSide, UnitId};
use crate::unit::Unit;

/// What a party member wants to do this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    Attack,
    /// Index into the actor's skill list
    Skill(usize),
    /// Index into the party inventory
    Item(usize),
    Skip,
}

/// Read-only view of the encounter handed to a chooser
#[derive(Debug, Clone, Copy)]
pub struct BattleView<'a> {
    pub round: u32,
    pub party: &'a [Unit],
    pub boss: &'a Boss,
    pub inventory: &'a Inventory,
}

impl<'a> BattleView<'a> {
    pub fn unit(&self, id: UnitId) -> Option<&'a Unit> {
        match id {
            UnitId::Party(index) => self.party.get(index),
            UnitId::Boss => Some(&self.boss.unit),
        }
    }
}

/// Picks actions and targets for party members
///
/// Implemented by an interactive prompt, a scripted test double or an
/// automatic policy.
pub trait ActionChooser {
    fn choose_action(&mut self, view: &BattleView<'_>, actor: usize) -> ActionChoice;

    /// Only called when more than one legal target exists. Returning `None`
    /// or an id outside `candidates` fails the action.
    fn choose_target(
        &mut self,
        view: &BattleView<'_>,
        candidates: &[UnitId],
        side: TargetSide,
    ) -> Option<UnitId>;
}
