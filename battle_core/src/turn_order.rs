//! Per-round turn order

use crate::types::UnitId;
use std::cmp::Reverse;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No round in progress; the next call derives a fresh order
    Idle,
    /// Handing out the current round's order
    Iterating,
}

/// Yields every participant once per round, fastest first
///
/// The order is re-derived from current agility at the start of each round.
/// Ties keep insertion order. Dead participants are still yielded; the caller
/// decides whether they act.
#[derive(Debug, Clone)]
pub struct TurnOrder {
    participants: Vec<UnitId>,
    order: Vec<UnitId>,
    cursor: usize,
    state: SchedulerState,
}

impl TurnOrder {
    pub fn new(participants: Vec<UnitId>) -> Self {
        TurnOrder {
            participants,
            order: Vec::new(),
            cursor: 0,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn participants(&self) -> &[UnitId] {
        &self.participants
    }

    /// Next participant this round, or `None` once the round is exhausted
    ///
    /// After yielding `None` the scheduler is idle again and the following
    /// call starts a new round.
    pub fn next(&mut self, agility_of: impl Fn(UnitId) -> i32) -> Option<UnitId> {
        if self.state == SchedulerState::Idle {
            self.order = self.participants.clone();
            // sort_by_key is stable
            self.order.sort_by_key(|&id| Reverse(agility_of(id)));
            self.cursor = 0;
            self.state = SchedulerState::Iterating;
        }

        match self.order.get(self.cursor).copied() {
            Some(id) => {
                self.cursor += 1;
                Some(id)
            }
            None => {
                self.reset();
                None
            }
        }
    }

    /// Order of the round in progress; empty while idle
    pub fn current_order(&self) -> &[UnitId] {
        &self.order
    }

    /// Abandon the round in progress
    pub fn reset(&mut self) {
        self.order.clear();
        self.cursor = 0;
        self.state = SchedulerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants() -> Vec<UnitId> {
        vec![UnitId::Party(0), UnitId::Party(1), UnitId::Boss]
    }

    fn agility(id: UnitId) -> i32 {
        match id {
            UnitId::Party(0) => 30,
            UnitId::Party(_) => 25,
            UnitId::Boss => 20,
        }
    }

    fn drain(order: &mut TurnOrder, agility_of: impl Fn(UnitId) -> i32 + Copy) -> Vec<UnitId> {
        let mut round = Vec::new();
        while let Some(id) = order.next(agility_of) {
            round.push(id);
        }
        round
    }

    #[test]
    fn test_fastest_first_every_round() {
        let mut order = TurnOrder::new(participants());
        for _ in 0..3 {
            assert_eq!(
                drain(&mut order, agility),
                vec![UnitId::Party(0), UnitId::Party(1), UnitId::Boss]
            );
            assert_eq!(order.state(), SchedulerState::Idle);
        }
    }

    #[test]
    fn test_boss_first_when_fastest() {
        let mut order = TurnOrder::new(participants());
        let round = drain(&mut order, |id| if id == UnitId::Boss { 99 } else { 10 });
        assert_eq!(
            round,
            vec![UnitId::Boss, UnitId::Party(0), UnitId::Party(1)]
        );
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut order = TurnOrder::new(participants());
        assert_eq!(drain(&mut order, |_| 15), participants());
    }

    #[test]
    fn test_yields_each_participant_once_then_none() {
        let mut order = TurnOrder::new(participants());
        assert_eq!(order.state(), SchedulerState::Idle);

        assert!(order.next(agility).is_some());
        assert_eq!(order.state(), SchedulerState::Iterating);
        assert_eq!(order.current_order().len(), 3);
        assert!(order.next(agility).is_some());
        assert!(order.next(agility).is_some());
        assert_eq!(order.next(agility), None);
        assert_eq!(order.state(), SchedulerState::Idle);
        assert!(order.current_order().is_empty());
    }

    #[test]
    fn test_order_rederived_from_current_agility() {
        let mut order = TurnOrder::new(participants());
        drain(&mut order, agility);

        let slowed = |id: UnitId| if id == UnitId::Party(0) { 1 } else { agility(id) };
        assert_eq!(
            drain(&mut order, slowed),
            vec![UnitId::Party(1), UnitId::Boss, UnitId::Party(0)]
        );
    }

    #[test]
    fn test_reset_mid_round() {
        let mut order = TurnOrder::new(participants());
        assert_eq!(order.next(agility), Some(UnitId::Party(0)));
        order.reset();
        assert_eq!(order.state(), SchedulerState::Idle);
        assert_eq!(order.next(agility), Some(UnitId::Party(0)));
    }

    #[test]
    fn test_empty_roster() {
        let mut order = TurnOrder::new(Vec::new());
        assert_eq!(order.next(agility), None);
        assert_eq!(order.state(), SchedulerState::Idle);
    }
}
