//! Critical strike rolls

use rand::Rng;

/// Roll a critical strike against `chance` (0..1)
///
/// Returns the possibly multiplied damage and whether it crit. A chance of
/// zero or less never consumes randomness.
pub fn roll_crit(damage: f64, chance: f64, multiplier: f64, rng: &mut impl Rng) -> (f64, bool) {
    if chance > 0.0 && rng.gen::<f64>() < chance {
        (damage * multiplier, true)
    } else {
        (damage, false)
    }
}
