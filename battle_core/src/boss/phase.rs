//! Boss phases and the strategies they select

use super::strategy::Strategy;
use crate::config::BossConstants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boss phase, picked from the boss's HP fraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Phase1,
    Phase2,
    Phase3,
}

impl Phase {
    /// Phase for an HP fraction in `[0, 1]`
    ///
    /// Above `phase2_threshold` is phase 1, at or below `phase3_threshold` is
    /// phase 3, everything in between is phase 2.
    pub fn from_fraction(fraction: f64, rules: &BossConstants) -> Phase {
        if fraction > rules.phase2_threshold {
            Phase::Phase1
        } else if fraction > rules.phase3_threshold {
            Phase::Phase2
        } else {
            Phase::Phase3
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Phase::Phase1 => Strategy::Aggressive,
            Phase::Phase2 => Strategy::Aoe,
            Phase::Phase3 => Strategy::Debuff,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Phase::Phase1 => 1,
            Phase::Phase2 => 2,
            Phase::Phase3 => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Phase {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        let rules = BossConstants::default();
        assert_eq!(Phase::from_fraction(1.0, &rules), Phase::Phase1);
        assert_eq!(Phase::from_fraction(0.71, &rules), Phase::Phase1);
        assert_eq!(Phase::from_fraction(0.7, &rules), Phase::Phase2);
        assert_eq!(Phase::from_fraction(0.31, &rules), Phase::Phase2);
        assert_eq!(Phase::from_fraction(0.3, &rules), Phase::Phase3);
        assert_eq!(Phase::from_fraction(0.0, &rules), Phase::Phase3);
    }

    #[test]
    fn test_phase_strategies() {
        assert_eq!(Phase::Phase1.strategy(), Strategy::Aggressive);
        assert_eq!(Phase::Phase2.strategy(), Strategy::Aoe);
        assert_eq!(Phase::Phase3.strategy(), Strategy::Debuff);
        assert_eq!(Phase::Phase2.to_string(), "Phase 2");
    }
}
