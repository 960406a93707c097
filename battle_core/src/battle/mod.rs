//! Battle controller: rounds, turns, termination and state snapshots

mod chooser;
mod events;

pub use chooser::{ActionChoice, ActionChooser, BattleView};
pub use events::CombatEvent;

use crate::boss::{Boss, Phase};
use crate::combat::{basic_attack, check_skill, use_skill, ActionError, SkillTarget};
use crate::config::GameConstants;
use crate::effect::{on_turn_start, tick_end_of_round};
use crate::item::{Inventory, Item};
use crate::turn_order::TurnOrder;
use crate::types::{TargetSide, UnitId};
use crate::unit::{Unit, UnitSnapshot};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Encounter state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    #[default]
    Active,
    Victory,
    Defeat,
}

impl BattleState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BattleState::Active)
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            BattleState::Active => Outcome::Ongoing,
            BattleState::Victory => Outcome::Victory,
            BattleState::Defeat => Outcome::Defeat,
        }
    }
}

/// How things stand after a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Victory,
    Defeat,
}

/// Result of one call to [`Battle::start_round`]
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub round_number: u32,
    pub is_terminal: bool,
    pub outcome: Outcome,
    pub events: Vec<CombatEvent>,
}

/// Plain-value picture of the whole encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub round: u32,
    pub state: BattleState,
    pub boss_phase: Phase,
    pub boss: UnitSnapshot,
    pub party: Vec<UnitSnapshot>,
    pub inventory: Vec<Item>,
}

/// Current HP/MP of one party member in a saved battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberState {
    pub hp: i32,
    pub mp: i32,
}

/// The part of a saved battle that is written back into a live one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreState {
    pub round: u32,
    pub boss_hp: i32,
    pub boss_mp: i32,
    pub party: Vec<MemberState>,
}

impl From<&BattleSnapshot> for RestoreState {
    fn from(snapshot: &BattleSnapshot) -> Self {
        RestoreState {
            round: snapshot.round,
            boss_hp: snapshot.boss.hp,
            boss_mp: snapshot.boss.mp,
            party: snapshot
                .party
                .iter()
                .map(|member| MemberState {
                    hp: member.hp,
                    mp: member.mp,
                })
                .collect(),
        }
    }
}

/// Owns every participant of one encounter and drives it round by round
pub struct Battle<R: Rng> {
    party: Vec<Unit>,
    boss: Boss,
    inventory: Inventory,
    rules: GameConstants,
    round: u32,
    state: BattleState,
    turn_order: TurnOrder,
    rng: R,
}

fn agility_of(party: &[Unit], boss: &Boss, id: UnitId) -> i32 {
    match id {
        UnitId::Party(index) => party.get(index).map_or(0, |unit| unit.stats.agility()),
        UnitId::Boss => boss.unit.stats.agility(),
    }
}

/// Two distinct members mutably at once
fn pair_mut(units: &mut [Unit], first: usize, second: usize) -> (&mut Unit, &mut Unit) {
    debug_assert_ne!(first, second);
    if first < second {
        let (left, right) = units.split_at_mut(second);
        (&mut left[first], &mut right[0])
    } else {
        let (left, right) = units.split_at_mut(first);
        (&mut right[0], &mut left[second])
    }
}

impl<R: Rng> Battle<R> {
    /// Start an encounter with the starting item stock from `rules`
    pub fn new(party: Vec<Unit>, boss: Boss, rules: GameConstants, rng: R) -> Self {
        let inventory = Inventory::with_starting_stock(&rules.items);
        Self::with_inventory(party, boss, inventory, rules, rng)
    }

    pub fn with_inventory(
        party: Vec<Unit>,
        boss: Boss,
        inventory: Inventory,
        rules: GameConstants,
        rng: R,
    ) -> Self {
        let participants = (0..party.len())
            .map(UnitId::Party)
            .chain([UnitId::Boss])
            .collect();
        let mut battle = Battle {
            party,
            boss,
            inventory,
            rules,
            round: 0,
            state: BattleState::Active,
            turn_order: TurnOrder::new(participants),
            rng,
        };
        battle.state = battle.derive_state();
        battle
    }

    pub fn party(&self) -> &[Unit] {
        &self.party
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn rules(&self) -> &GameConstants {
        &self.rules
    }

    /// Rounds started so far
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        match id {
            UnitId::Party(index) => self.party.get(index),
            UnitId::Boss => Some(&self.boss.unit),
        }
    }

    fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        match id {
            UnitId::Party(index) => self.party.get_mut(index),
            UnitId::Boss => Some(&mut self.boss.unit),
        }
    }

    pub fn view(&self) -> BattleView<'_> {
        BattleView {
            round: self.round,
            party: &self.party,
            boss: &self.boss,
            inventory: &self.inventory,
        }
    }

    fn derive_state(&self) -> BattleState {
        if !self.boss.unit.is_alive() {
            BattleState::Victory
        } else if self.party.iter().all(|unit| !unit.is_alive()) {
            BattleState::Defeat
        } else {
            BattleState::Active
        }
    }

    /// Play one full round
    ///
    /// Does nothing once the battle is over. The round stops as soon as either
    /// side is wiped out; effect durations, cooldowns and silence only count
    /// down after a round in which nobody won.
    pub fn start_round<C: ActionChooser + ?Sized>(&mut self, chooser: &mut C) -> RoundResult {
        if self.state.is_terminal() {
            return self.round_result(Vec::new());
        }

        self.round += 1;
        debug!(round = self.round, "round started");
        let mut events = vec![CombatEvent::RoundStarted { round: self.round }];

        loop {
            let next = {
                let (party, boss) = (&self.party, &self.boss);
                self.turn_order.next(|id| agility_of(party, boss, id))
            };
            let Some(id) = next else {
                break;
            };

            self.take_turn(id, chooser, &mut events);

            let state = self.derive_state();
            if state.is_terminal() {
                self.state = state;
                self.turn_order.reset();
                info!(round = self.round, outcome = ?state.outcome(), "battle over");
                events.push(CombatEvent::BattleEnded {
                    outcome: state.outcome(),
                });
                return self.round_result(events);
            }
        }

        self.end_round(&mut events);
        self.round_result(events)
    }

    /// Play rounds until the battle ends or `max_rounds` rounds have started
    pub fn run<C: ActionChooser + ?Sized>(
        &mut self,
        chooser: &mut C,
        max_rounds: u32,
    ) -> Vec<RoundResult> {
        let mut results = Vec::new();
        while !self.is_over() && self.round < max_rounds {
            results.push(self.start_round(chooser));
        }
        results
    }

    fn round_result(&self, events: Vec<CombatEvent>) -> RoundResult {
        RoundResult {
            round_number: self.round,
            is_terminal: self.state.is_terminal(),
            outcome: self.state.outcome(),
            events,
        }
    }

    fn take_turn<C: ActionChooser + ?Sized>(
        &mut self,
        id: UnitId,
        chooser: &mut C,
        events: &mut Vec<CombatEvent>,
    ) {
        let Some(unit) = self.unit_mut(id) else {
            return;
        };
        if !unit.is_alive() {
            return;
        }

        let report = on_turn_start(unit);
        events.push(CombatEvent::TurnStarted { actor: id });
        events.extend(
            report
                .ticks
                .iter()
                .map(|&tick| CombatEvent::EffectTriggered { unit: id, tick }),
        );
        if report.died {
            debug!(?id, "died from effects before acting");
            events.push(CombatEvent::DiedFromEffects { unit: id });
            return;
        }

        match id {
            UnitId::Party(actor) => self.party_turn(actor, chooser, events),
            UnitId::Boss => self.boss_turn(events),
        }
    }

    fn boss_turn(&mut self, events: &mut Vec<CombatEvent>) {
        let before = self.boss.phase();
        let turn = self
            .boss
            .take_turn(&mut self.party, &self.rules, &mut self.rng);
        if turn.phase != before {
            events.push(CombatEvent::PhaseChanged {
                from: before,
                to: turn.phase,
            });
        }
        events.push(CombatEvent::BossActed { turn });
    }

    fn party_turn<C: ActionChooser + ?Sized>(
        &mut self,
        actor: usize,
        chooser: &mut C,
        events: &mut Vec<CombatEvent>,
    ) {
        let choice = chooser.choose_action(&self.view(), actor);
        let result = match choice {
            ActionChoice::Attack => self.party_attack(actor, chooser),
            ActionChoice::Skill(index) => self.party_skill(actor, index, chooser),
            ActionChoice::Item(index) => self.party_item(actor, index, chooser),
            ActionChoice::Skip => Ok(CombatEvent::Skipped {
                actor: UnitId::Party(actor),
            }),
        };

        match result {
            Ok(event) => events.push(event),
            Err(error) => {
                warn!(actor = %self.party[actor].name, %error, "action failed");
                events.push(CombatEvent::ActionFailed {
                    actor: UnitId::Party(actor),
                    error,
                });
            }
        }
    }

    fn candidates(&self, side: TargetSide) -> Vec<UnitId> {
        match side {
            TargetSide::Enemy if self.boss.unit.is_alive() => vec![UnitId::Boss],
            TargetSide::Enemy => Vec::new(),
            TargetSide::Ally => self
                .party
                .iter()
                .enumerate()
                .filter(|(_, unit)| unit.is_alive())
                .map(|(index, _)| UnitId::Party(index))
                .collect(),
        }
    }

    fn pick_target<C: ActionChooser + ?Sized>(
        &self,
        chooser: &mut C,
        side: TargetSide,
    ) -> Result<UnitId, ActionError> {
        let candidates = self.candidates(side);
        match candidates.as_slice() {
            [] => Err(ActionError::NoTarget),
            [only] => Ok(*only),
            _ => chooser
                .choose_target(&self.view(), &candidates, side)
                .filter(|id| candidates.contains(id))
                .ok_or(ActionError::NoTarget),
        }
    }

    fn party_attack<C: ActionChooser + ?Sized>(
        &mut self,
        actor: usize,
        chooser: &mut C,
    ) -> Result<CombatEvent, ActionError> {
        let target = self.pick_target(chooser, TargetSide::Enemy)?;
        if target != UnitId::Boss {
            return Err(ActionError::NoTarget);
        }
        let outcome = basic_attack(
            &self.party[actor],
            &mut self.boss.unit,
            &self.rules,
            &mut self.rng,
        )?;
        Ok(CombatEvent::Attacked {
            attacker: UnitId::Party(actor),
            target,
            outcome,
        })
    }

    fn party_skill<C: ActionChooser + ?Sized>(
        &mut self,
        actor: usize,
        index: usize,
        chooser: &mut C,
    ) -> Result<CombatEvent, ActionError> {
        let caster = &self.party[actor];
        let skill = caster
            .skills
            .get(index)
            .ok_or(ActionError::UnknownSkill(index))?;
        // preconditions before the chooser is asked for a target
        check_skill(caster, skill)?;
        let side = skill.target_side();
        let target = self.pick_target(chooser, side)?;

        let rules = &self.rules;
        let rng = &mut self.rng;
        let outcome = match target {
            UnitId::Boss => use_skill(
                &mut self.party[actor],
                index,
                SkillTarget::Other(&mut self.boss.unit),
                rules,
                rng,
            )?,
            UnitId::Party(other) if other == actor => {
                use_skill(&mut self.party[actor], index, SkillTarget::Caster, rules, rng)?
            }
            UnitId::Party(other) => {
                let (caster, ally) = pair_mut(&mut self.party, actor, other);
                use_skill(caster, index, SkillTarget::Other(ally), rules, rng)?
            }
        };

        Ok(CombatEvent::SkillUsed {
            caster: UnitId::Party(actor),
            target,
            outcome,
        })
    }

    fn party_item<C: ActionChooser + ?Sized>(
        &mut self,
        actor: usize,
        index: usize,
        chooser: &mut C,
    ) -> Result<CombatEvent, ActionError> {
        if self.inventory.get(index).is_none() {
            return Err(ActionError::UnknownItem(index));
        }
        let target = self.pick_target(chooser, TargetSide::Ally)?;
        let UnitId::Party(member) = target else {
            return Err(ActionError::NoTarget);
        };

        let outcome =
            self.inventory
                .use_item(index, &mut self.party[member], &self.rules.items)?;
        Ok(CombatEvent::ItemUsed {
            user: UnitId::Party(actor),
            target,
            outcome,
        })
    }

    /// Count down effects, cooldowns and silence for every participant
    fn end_round(&mut self, events: &mut Vec<CombatEvent>) {
        let ids: Vec<UnitId> = self.turn_order.participants().to_vec();
        for id in ids {
            let Some(unit) = self.unit_mut(id) else {
                continue;
            };
            let expired = tick_end_of_round(unit);
            unit.tick_cooldowns();
            unit.silence.tick();
            events.extend(expired.into_iter().map(|effect| CombatEvent::EffectExpired {
                unit: id,
                effect: effect.name,
            }));
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.round,
            state: self.state,
            boss_phase: Phase::from_fraction(
                self.boss.unit.stats.hp_fraction(),
                &self.rules.boss,
            ),
            boss: self.boss.unit.snapshot(),
            party: self.party.iter().map(Unit::snapshot).collect(),
            inventory: self.inventory.items().to_vec(),
        }
    }

    /// Write saved HP/MP and the round counter back into this battle
    ///
    /// Members are matched by position; surplus entries on either side are
    /// left alone. Values go through the clamping setters. The scheduler is
    /// reset and the battle state re-derived from the restored HP.
    pub fn restore_state(&mut self, saved: &RestoreState) {
        self.round = saved.round;

        let stats = &mut self.boss.unit.stats;
        stats.set_hp(saved.boss_hp);
        stats.set_mp(saved.boss_mp);

        for (unit, member) in self.party.iter_mut().zip(&saved.party) {
            unit.stats.set_hp(member.hp);
            unit.stats.set_mp(member.mp);
        }

        self.turn_order.reset();
        self.boss.select_phase(&self.rules);
        self.state = self.derive_state();
        info!(round = self.round, state = ?self.state, "battle state restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::SkillEffect;
    use crate::effect::{apply_effect, Effect, EffectTag};
    use crate::skill::{Skill, SkillKind};
    use crate::testing::dummy_unit_with_hp;
    use crate::types::DamageType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    /// Plays a fixed script, then skips
    #[derive(Default)]
    struct Scripted {
        actions: VecDeque<ActionChoice>,
        target: Option<UnitId>,
        asked: Vec<usize>,
        target_calls: Vec<Vec<UnitId>>,
    }

    impl Scripted {
        fn new(actions: impl IntoIterator<Item = ActionChoice>) -> Self {
            Scripted {
                actions: actions.into_iter().collect(),
                ..Default::default()
            }
        }

        fn targeting(mut self, target: UnitId) -> Self {
            self.target = Some(target);
            self
        }
    }

    impl ActionChooser for Scripted {
        fn choose_action(&mut self, _view: &BattleView<'_>, actor: usize) -> ActionChoice {
            self.asked.push(actor);
            self.actions.pop_front().unwrap_or(ActionChoice::Skip)
        }

        fn choose_target(
            &mut self,
            _view: &BattleView<'_>,
            candidates: &[UnitId],
            _side: TargetSide,
        ) -> Option<UnitId> {
            self.target_calls.push(candidates.to_vec());
            self.target
        }
    }

    fn member(hp: i32, agility: i32) -> Unit {
        let mut unit = dummy_unit_with_hp(hp);
        unit.stats.set_agility(agility);
        unit
    }

    fn slow_boss(hp: i32) -> Boss {
        Boss::new(member(hp, 1), 1.0)
    }

    fn battle(party: Vec<Unit>, boss: Boss) -> Battle<ChaCha8Rng> {
        Battle::new(
            party,
            boss,
            GameConstants::default(),
            ChaCha8Rng::seed_from_u64(11),
        )
    }

    fn power_strike() -> Skill {
        Skill {
            id: "power_strike".to_string(),
            name: "Power Strike".to_string(),
            mana_cost: 15,
            cooldown: 2,
            kind: SkillKind::Damage {
                base: 25.0,
                damage_type: DamageType::Physical,
            },
        }
    }

    fn heal() -> Skill {
        Skill {
            id: "heal".to_string(),
            name: "Heal".to_string(),
            mana_cost: 10,
            cooldown: 2,
            kind: SkillKind::Heal { base: 40.0 },
        }
    }

    #[test]
    fn test_victory_stops_round_immediately() {
        let mut battle = battle(vec![member(100, 30), member(100, 20)], slow_boss(5));
        let mut chooser = Scripted::new([ActionChoice::Attack]);

        let result = battle.start_round(&mut chooser);
        assert_eq!(result.round_number, 1);
        assert!(result.is_terminal);
        assert_eq!(result.outcome, Outcome::Victory);
        assert_eq!(chooser.asked, vec![0]);
        assert_eq!(
            result.events.last(),
            Some(&CombatEvent::BattleEnded {
                outcome: Outcome::Victory
            })
        );
        assert_eq!(battle.state(), BattleState::Victory);
    }

    #[test]
    fn test_terminal_round_is_noop() {
        let mut battle = battle(vec![member(100, 30)], slow_boss(5));
        let mut chooser = Scripted::new([ActionChoice::Attack]);
        battle.start_round(&mut chooser);

        let again = battle.start_round(&mut chooser);
        assert_eq!(again.round_number, 1);
        assert!(again.is_terminal);
        assert!(again.events.is_empty());
        assert_eq!(chooser.asked.len(), 1);
    }

    #[test]
    fn test_defeat_when_party_falls() {
        let mut battle = battle(vec![member(10, 30)], slow_boss(1000));
        let mut chooser = Scripted::new([ActionChoice::Skip]);

        let result = battle.start_round(&mut chooser);
        assert_eq!(result.outcome, Outcome::Defeat);
        assert!(!battle.party()[0].is_alive());
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::BossActed { .. })));
    }

    #[test]
    fn test_party_wipe_ends_round_before_slower_turns() {
        let mut slow = member(10, 1);
        apply_effect(&mut slow, Effect::poison(2, 3));
        let mut boss = Boss::new(member(1000, 20), 1.0);
        apply_effect(&mut boss.unit, Effect::regeneration(5, 3));
        let mut battle = battle(vec![slow], boss);
        let mut chooser = Scripted::default();

        let result = battle.start_round(&mut chooser);
        assert_eq!(result.outcome, Outcome::Defeat);
        assert!(chooser.asked.is_empty());
        assert!(!result.events.iter().any(|e| matches!(
            e,
            CombatEvent::TurnStarted {
                actor: UnitId::Party(_)
            } | CombatEvent::EffectTriggered {
                unit: UnitId::Party(_),
                ..
            } | CombatEvent::EffectExpired { .. }
        )));
        // no round-end countdown after a wipe
        assert_eq!(battle.party()[0].effects[0].remaining_duration(), 3);
        assert_eq!(battle.boss().unit.effects[0].remaining_duration(), 3);
    }

    #[test]
    fn test_effect_ticks_once_per_turn_for_its_duration() {
        let mut patient = member(100, 30);
        apply_effect(&mut patient, Effect::regeneration(5, 3));
        let mut battle = battle(vec![patient], slow_boss(1000));
        let mut chooser = Scripted::default();

        let ticks: Vec<usize> = (0..4)
            .map(|_| {
                let result = battle.start_round(&mut chooser);
                result
                    .events
                    .iter()
                    .filter(|e| {
                        matches!(
                            e,
                            CombatEvent::EffectTriggered {
                                unit: UnitId::Party(0),
                                ..
                            }
                        )
                    })
                    .count()
            })
            .collect();

        assert_eq!(ticks, vec![1, 1, 1, 0]);
        assert!(battle.party()[0].effects.is_empty());
        assert_eq!(battle.state(), BattleState::Active);
    }

    #[test]
    fn test_silenced_skill_fails_before_targeting() {
        let mut healer = member(100, 30);
        healer.skills = vec![heal()];
        healer.silence.apply(2);
        let mut battle = battle(vec![healer, member(100, 20)], slow_boss(1000));
        let mut chooser =
            Scripted::new([ActionChoice::Skill(0)]).targeting(UnitId::Party(1));

        let result = battle.start_round(&mut chooser);
        assert!(chooser.target_calls.is_empty());
        assert!(result.events.contains(&CombatEvent::ActionFailed {
            actor: UnitId::Party(0),
            error: ActionError::Silenced("Dummy".to_string())
        }));
        assert_eq!(battle.party()[0].stats.mp(), 50);
    }

    #[test]
    fn test_snapshot_phase_follows_boss_hp() {
        let mut battle = battle(vec![member(100, 30)], slow_boss(1000));
        battle.boss.unit.stats.set_hp(600);

        assert_eq!(battle.boss().phase(), Phase::Phase1);
        assert_eq!(battle.snapshot().boss_phase, Phase::Phase2);
    }

    #[test]
    fn test_dead_members_never_act() {
        let mut fallen = member(100, 30);
        fallen.stats.set_hp(0);
        let mut battle = battle(vec![fallen, member(100, 20)], slow_boss(1000));
        let mut chooser = Scripted::default();

        battle.start_round(&mut chooser);
        assert_eq!(chooser.asked, vec![1]);
    }

    #[test]
    fn test_effect_death_skips_action() {
        let mut doomed = member(10, 30);
        apply_effect(&mut doomed, Effect::poison(12, 3));
        let mut battle = battle(vec![doomed, member(100, 20)], slow_boss(1000));
        let mut chooser = Scripted::default();

        let result = battle.start_round(&mut chooser);
        assert_eq!(chooser.asked, vec![1]);
        assert!(result.events.contains(&CombatEvent::DiedFromEffects {
            unit: UnitId::Party(0)
        }));
        assert_eq!(result.outcome, Outcome::Ongoing);
    }

    #[test]
    fn test_cooldown_blocks_next_round_only() {
        let mut warrior = member(1000, 30);
        warrior.skills = vec![power_strike()];
        let mut battle = battle(vec![warrior], slow_boss(1000));
        let mut chooser = Scripted::new([
            ActionChoice::Skill(0),
            ActionChoice::Skill(0),
            ActionChoice::Skill(0),
        ]);

        let first = battle.start_round(&mut chooser);
        assert!(first
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::SkillUsed { .. })));
        assert_eq!(battle.party()[0].cooldown_remaining("power_strike"), 1);

        let second = battle.start_round(&mut chooser);
        assert!(second.events.iter().any(|e| matches!(
            e,
            CombatEvent::ActionFailed {
                error: ActionError::OnCooldown { .. },
                ..
            }
        )));

        let third = battle.start_round(&mut chooser);
        assert!(third
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::SkillUsed { .. })));
        assert_eq!(battle.party()[0].stats.mp(), 20);
        // two landed strikes of 25 + 1.5 * 20
        assert_eq!(battle.boss().unit.stats.hp(), 1000 - 110);
    }

    #[test]
    fn test_ally_skill_asks_for_target() {
        let mut healer = member(100, 30);
        healer.skills = vec![heal()];
        let mut wounded = member(100, 20);
        wounded.stats.set_hp(40);
        let mut battle = battle(vec![healer, wounded], slow_boss(1000));
        let mut chooser =
            Scripted::new([ActionChoice::Skill(0)]).targeting(UnitId::Party(1));

        let result = battle.start_round(&mut chooser);
        assert_eq!(
            chooser.target_calls,
            vec![vec![UnitId::Party(0), UnitId::Party(1)]]
        );
        let healed = result.events.iter().find_map(|e| match e {
            CombatEvent::SkillUsed {
                target, outcome, ..
            } => Some((*target, outcome.effect)),
            _ => None,
        });
        // 40 + 1.2 * 10
        assert_eq!(
            healed,
            Some((UnitId::Party(1), SkillEffect::Heal { restored: 52 }))
        );
    }

    #[test]
    fn test_enemy_target_not_asked() {
        let mut battle = battle(vec![member(100, 30), member(100, 20)], slow_boss(1000));
        let mut chooser = Scripted::new([ActionChoice::Attack]);
        battle.start_round(&mut chooser);
        assert!(chooser.target_calls.is_empty());
        assert_eq!(battle.boss().unit.stats.hp(), 1000 - 16);
    }

    #[test]
    fn test_bad_target_fails_without_cost() {
        let mut healer = member(100, 30);
        healer.skills = vec![heal()];
        let mut battle = battle(vec![healer, member(100, 20)], slow_boss(1000));
        let mut chooser = Scripted::new([ActionChoice::Skill(0)]).targeting(UnitId::Boss);

        let result = battle.start_round(&mut chooser);
        assert!(result.events.contains(&CombatEvent::ActionFailed {
            actor: UnitId::Party(0),
            error: ActionError::NoTarget
        }));
        assert_eq!(battle.party()[0].stats.mp(), 50);
        assert!(!battle.party()[0].is_on_cooldown("heal"));
    }

    #[test]
    fn test_item_consumed_on_success() {
        let mut battle = battle(vec![member(100, 30)], slow_boss(1000));
        let before = battle.inventory().len();
        let mut chooser = Scripted::new([ActionChoice::Item(0), ActionChoice::Item(99)]);

        let first = battle.start_round(&mut chooser);
        assert!(first
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::ItemUsed { .. })));
        assert_eq!(battle.inventory().len(), before - 1);

        let second = battle.start_round(&mut chooser);
        assert!(second.events.contains(&CombatEvent::ActionFailed {
            actor: UnitId::Party(0),
            error: ActionError::UnknownItem(99)
        }));
        assert_eq!(battle.inventory().len(), before - 1);
    }

    #[test]
    fn test_effects_expire_at_round_end() {
        let mut shielded = member(100, 30);
        apply_effect(&mut shielded, Effect::shield(5, 1));
        let mut battle = battle(vec![shielded], slow_boss(1000));

        let result = battle.start_round(&mut Scripted::default());
        assert!(result.events.contains(&CombatEvent::EffectExpired {
            unit: UnitId::Party(0),
            effect: "Shield".to_string()
        }));
        assert!(battle.party()[0].effects.is_empty());
    }

    #[test]
    fn test_run_stops_at_round_cap() {
        let mut battle = battle(vec![member(1000, 30)], slow_boss(1000));
        let results = battle.run(&mut Scripted::default(), 3);
        assert_eq!(results.len(), 3);
        assert_eq!(battle.round(), 3);
        assert!(!battle.is_over());
    }

    #[test]
    fn test_restore_state_clamps_and_rederives() {
        let mut battle = battle(vec![member(100, 30), member(100, 20)], slow_boss(1000));
        battle.restore_state(&RestoreState {
            round: 4,
            boss_hp: 250,
            boss_mp: 9999,
            party: vec![
                MemberState { hp: 5000, mp: 10 },
                MemberState { hp: 0, mp: 0 },
                MemberState { hp: 1, mp: 1 },
            ],
        });

        assert_eq!(battle.round(), 4);
        assert_eq!(battle.boss().unit.stats.hp(), 250);
        assert_eq!(battle.boss().unit.stats.mp(), 50);
        assert_eq!(battle.boss().phase(), Phase::Phase3);
        assert_eq!(battle.party()[0].stats.hp(), 100);
        assert!(!battle.party()[1].is_alive());
        assert_eq!(battle.state(), BattleState::Active);

        battle.restore_state(&RestoreState {
            round: 4,
            boss_hp: 0,
            boss_mp: 0,
            party: Vec::new(),
        });
        assert_eq!(battle.state(), BattleState::Victory);
    }

    #[test]
    fn test_snapshot_feeds_restore() {
        let mut battle = battle(vec![member(100, 30)], slow_boss(1000));
        apply_effect(&mut battle.party[0], Effect::poison(3, 2));
        battle.start_round(&mut Scripted::new([ActionChoice::Attack]));

        let snapshot = battle.snapshot();
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.party.len(), 1);
        assert_eq!(snapshot.party[0].effects[0].tag(), EffectTag::Poison);

        let restore = RestoreState::from(&snapshot);
        assert_eq!(restore.boss_hp, snapshot.boss.hp);
        assert_eq!(restore.party[0].hp, snapshot.party[0].hp);
    }
}
