//! Core types shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of a combat unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    Warrior,
    Mage,
    Healer,
    Boss,
}

impl UnitClass {
    /// Classes a party member may take
    pub fn party_classes() -> &'static [UnitClass] {
        &[UnitClass::Warrior, UnitClass::Mage, UnitClass::Healer]
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitClass::Warrior => "Warrior",
            UnitClass::Mage => "Mage",
            UnitClass::Healer => "Healer",
            UnitClass::Boss => "Boss",
        }
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Address of a participant inside one encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitId {
    /// Index into the party roster
    Party(usize),
    Boss,
}

/// Which side of the fight an action may target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSide {
    /// The boss
    Enemy,
    /// Living party members, the actor included
    Ally,
}

/// Damage type of a damage skill; selects the scaling attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Scales with strength
    Physical,
    /// Scales with intelligence
    Magical,
}

/// Attribute a basic attack scales with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingStat {
    Strength,
    Intelligence,
}
