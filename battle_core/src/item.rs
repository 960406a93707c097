//! Consumable items and the party's shared inventory

use crate::combat::ActionError;
use crate::config::ItemConstants;
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A consumable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    HealthPotion,
    ManaPotion,
}

impl Item {
    pub fn name(&self) -> &'static str {
        match self {
            Item::HealthPotion => "Health Potion",
            Item::ManaPotion => "Mana Potion",
        }
    }

    pub fn description(&self, rules: &ItemConstants) -> String {
        match self {
            Item::HealthPotion => format!("Restores {} HP", rules.health_potion_hp),
            Item::ManaPotion => format!("Restores {} MP", rules.mana_potion_mp),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a used item did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOutcome {
    pub item: Item,
    /// HP or MP actually restored
    pub restored: i32,
}

/// Items carried by the party, in slot order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory { items: Vec::new() }
    }

    /// Rebuild an inventory from saved slots
    pub fn from_items(items: Vec<Item>) -> Self {
        Inventory { items }
    }

    /// Health potions first, then mana potions
    pub fn with_starting_stock(rules: &ItemConstants) -> Self {
        let mut inventory = Self::new();
        for _ in 0..rules.starting_health_potions {
            inventory.add(Item::HealthPotion);
        }
        for _ in 0..rules.starting_mana_potions {
            inventory.add(Item::ManaPotion);
        }
        inventory
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<Item> {
        self.items.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn count(&self, item: Item) -> usize {
        self.items.iter().filter(|&&i| i == item).count()
    }

    /// Use the item in slot `index` on `target`
    ///
    /// The item is consumed only when the use succeeds.
    pub fn use_item(
        &mut self,
        index: usize,
        target: &mut Unit,
        rules: &ItemConstants,
    ) -> Result<ItemOutcome, ActionError> {
        let item = self.get(index).ok_or(ActionError::UnknownItem(index))?;
        if !target.is_alive() {
            return Err(ActionError::TargetDead);
        }

        let restored = match item {
            Item::HealthPotion => target.stats.heal(rules.health_potion_hp),
            Item::ManaPotion => target.stats.restore_mana(rules.mana_potion_mp),
        };
        self.items.remove(index);

        debug!(item = %item, target = %target.name, restored, "item used");
        Ok(ItemOutcome { item, restored })
    }
}
