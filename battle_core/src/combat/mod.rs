//! Action resolution - basic attacks and skills applied to units

mod crit;
mod resolution;
mod result;

pub use crit::roll_crit;
pub use resolution::{basic_attack, check_skill, use_skill, SkillTarget};
pub use result::{ActionError, AttackOutcome, DamageReport, SkillEffect, SkillOutcome};
