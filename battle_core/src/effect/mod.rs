//! Status effect system
//!
//! Effects live in their owner's effect list in attachment order. Start-of-turn
//! hooks (poison, regeneration) fire before the owner acts; durations count
//! down once per round, after every participant has acted.

pub mod engine;
mod types;

pub use engine::{
    absorb, apply_effect, clear_effects, has_effect, on_turn_start, tick_end_of_round,
    EffectTick, TurnStartReport,
};
pub use types::{Effect, EffectKind, EffectTag, EffectTemplate};
