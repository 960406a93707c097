//! StatBlock - Bounded HP/MP and primary attributes for a combat unit

mod bounded;

pub use bounded::{BoundedStat, Bounds};

use serde::{Deserialize, Serialize};

/// Bounds table applied to every unit's attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBounds {
    /// Applies to both current and max HP
    #[serde(default = "default_hp_bounds")]
    pub hp: Bounds,
    /// Applies to both current and max MP
    #[serde(default = "default_mp_bounds")]
    pub mp: Bounds,
    /// Strength, agility and intelligence
    #[serde(default = "default_primary_bounds")]
    pub primary: Bounds,
}

impl Default for StatBounds {
    fn default() -> Self {
        StatBounds {
            hp: default_hp_bounds(),
            mp: default_mp_bounds(),
            primary: default_primary_bounds(),
        }
    }
}

fn default_hp_bounds() -> Bounds {
    Bounds::new(0, 1000)
}
fn default_mp_bounds() -> Bounds {
    Bounds::new(0, 500)
}
fn default_primary_bounds() -> Bounds {
    Bounds::new(1, 100)
}

/// Plain attribute values used to seed a StatBlock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i32,
    pub mp: i32,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
}

/// Attribute state for one unit
///
/// Every field is written through its clamp. Current HP/MP are additionally
/// capped by the current max, and shrinking a max re-clamps the current value.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBlock {
    hp: BoundedStat,
    max_hp: BoundedStat,
    mp: BoundedStat,
    max_mp: BoundedStat,
    strength: BoundedStat,
    agility: BoundedStat,
    intelligence: BoundedStat,
}

impl StatBlock {
    /// Create a stat block at full HP and MP
    pub fn new(base: &BaseStats, bounds: &StatBounds) -> Self {
        let max_hp = BoundedStat::new(base.hp, bounds.hp);
        let max_mp = BoundedStat::new(base.mp, bounds.mp);
        StatBlock {
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            strength: BoundedStat::new(base.strength, bounds.primary),
            agility: BoundedStat::new(base.agility, bounds.primary),
            intelligence: BoundedStat::new(base.intelligence, bounds.primary),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp.get()
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp.get()
    }

    pub fn mp(&self) -> i32 {
        self.mp.get()
    }

    pub fn max_mp(&self) -> i32 {
        self.max_mp.get()
    }

    pub fn strength(&self) -> i32 {
        self.strength.get()
    }

    pub fn agility(&self) -> i32 {
        self.agility.get()
    }

    pub fn intelligence(&self) -> i32 {
        self.intelligence.get()
    }

    pub fn set_hp(&mut self, value: i32) -> i32 {
        self.hp.set(value.min(self.max_hp.get()))
    }

    pub fn set_max_hp(&mut self, value: i32) -> i32 {
        self.max_hp.set(value);
        self.set_hp(self.hp.get());
        self.max_hp.get()
    }

    pub fn set_mp(&mut self, value: i32) -> i32 {
        self.mp.set(value.min(self.max_mp.get()))
    }

    pub fn set_max_mp(&mut self, value: i32) -> i32 {
        self.max_mp.set(value);
        self.set_mp(self.mp.get());
        self.max_mp.get()
    }

    pub fn set_strength(&mut self, value: i32) -> i32 {
        self.strength.set(value)
    }

    pub fn set_agility(&mut self, value: i32) -> i32 {
        self.agility.set(value)
    }

    pub fn set_intelligence(&mut self, value: i32) -> i32 {
        self.intelligence.set(value)
    }

    pub fn is_alive(&self) -> bool {
        self.hp.get() > 0
    }

    /// Current HP as a fraction of max HP (0.0 when max HP is 0)
    pub fn hp_fraction(&self) -> f64 {
        let max = self.max_hp.get();
        if max <= 0 {
            return 0.0;
        }
        self.hp.get() as f64 / max as f64
    }

    /// Reduce HP, returning how much was actually lost
    pub fn lose_hp(&mut self, amount: i32) -> i32 {
        let before = self.hp.get();
        self.set_hp(before.saturating_sub(amount.max(0)));
        before - self.hp.get()
    }

    /// Restore HP up to max, returning how much was actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp.get();
        self.set_hp(before.saturating_add(amount.max(0)));
        self.hp.get() - before
    }

    /// Deduct mana; callers check affordability first
    pub fn spend_mana(&mut self, cost: i32) {
        self.set_mp(self.mp.get().saturating_sub(cost.max(0)));
    }

    /// Restore MP up to max, returning how much was actually restored
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.mp.get();
        self.set_mp(before.saturating_add(amount.max(0)));
        self.mp.get() - before
    }
}
