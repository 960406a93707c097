//! Effect type definitions

use serde::{Deserialize, Serialize};

/// Discriminant of an effect variant, used for lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTag {
    Poison,
    Shield,
    Regeneration,
}

impl EffectTag {
    pub fn name(&self) -> &'static str {
        match self {
            EffectTag::Poison => "Poison",
            EffectTag::Shield => "Shield",
            EffectTag::Regeneration => "Regeneration",
        }
    }
}

/// Variant-specific payload of an active effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    /// Deals damage at the start of each of the owner's turns
    Poison { damage_per_turn: i32 },
    /// Absorbs incoming damage until the pool is spent
    Shield {
        shield_amount: i32,
        current_shield: i32,
    },
    /// Heals at the start of each of the owner's turns
    Regeneration { heal_per_turn: i32 },
}

impl EffectKind {
    pub fn tag(&self) -> EffectTag {
        match self {
            EffectKind::Poison { .. } => EffectTag::Poison,
            EffectKind::Shield { .. } => EffectTag::Shield,
            EffectKind::Regeneration { .. } => EffectTag::Regeneration,
        }
    }
}

/// A timed modifier attached to one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Display name
    pub name: String,
    /// Total duration in rounds
    duration: u32,
    /// Rounds left; never exceeds `duration`
    remaining_duration: u32,
    pub kind: EffectKind,
}

impl Effect {
    pub fn new(name: impl Into<String>, duration: u32, kind: EffectKind) -> Self {
        Effect {
            name: name.into(),
            duration,
            remaining_duration: duration,
            kind,
        }
    }

    pub fn poison(damage_per_turn: i32, duration: u32) -> Self {
        Self::new("Poison", duration, EffectKind::Poison { damage_per_turn })
    }

    pub fn shield(shield_amount: i32, duration: u32) -> Self {
        Self::new(
            "Shield",
            duration,
            EffectKind::Shield {
                shield_amount,
                current_shield: shield_amount,
            },
        )
    }

    pub fn regeneration(heal_per_turn: i32, duration: u32) -> Self {
        Self::new("Regeneration", duration, EffectKind::Regeneration { heal_per_turn })
    }

    pub fn tag(&self) -> EffectTag {
        self.kind.tag()
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining_duration(&self) -> u32 {
        self.remaining_duration
    }

    /// Remaining shield pool, if this is a shield
    pub fn shield_remaining(&self) -> Option<i32> {
        match self.kind {
            EffectKind::Shield { current_shield, .. } => Some(current_shield),
            _ => None,
        }
    }

    /// Count down one round. Returns true when the effect has expired.
    pub(crate) fn decrement(&mut self) -> bool {
        self.remaining_duration = self.remaining_duration.saturating_sub(1);
        self.remaining_duration == 0
    }
}

/// Immutable effect description carried by skills
///
/// Each use instantiates a fresh [`Effect`], so nothing is shared between
/// targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectTemplate {
    Poison { damage_per_turn: i32, duration: u32 },
    Shield { shield_amount: i32, duration: u32 },
    Regeneration { heal_per_turn: i32, duration: u32 },
}

impl EffectTemplate {
    pub fn tag(&self) -> EffectTag {
        match self {
            EffectTemplate::Poison { .. } => EffectTag::Poison,
            EffectTemplate::Shield { .. } => EffectTag::Shield,
            EffectTemplate::Regeneration { .. } => EffectTag::Regeneration,
        }
    }

    pub fn instantiate(&self) -> Effect {
        match *self {
            EffectTemplate::Poison {
                damage_per_turn,
                duration,
            } => Effect::poison(damage_per_turn, duration),
            EffectTemplate::Shield {
                shield_amount,
                duration,
            } => Effect::shield(shield_amount, duration),
            EffectTemplate::Regeneration {
                heal_per_turn,
                duration,
            } => Effect::regeneration(heal_per_turn, duration),
        }
    }
}
