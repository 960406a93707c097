//! BoundedStat - A numeric attribute clamped to a fixed range on every write

use serde::{Deserialize, Serialize};

/// Inclusive range an attribute may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl Bounds {
    pub const fn new(min: i32, max: i32) -> Self {
        Bounds { min, max }
    }

    /// `max(min, min(value, max))`
    ///
    /// Unlike `i32::clamp` this never panics on a misconfigured table
    /// (`min > max` resolves to `min`).
    pub fn clamp(&self, value: i32) -> i32 {
        value.min(self.max).max(self.min)
    }
}

/// An attribute that silently clamps every assignment into its bounds
///
/// Out-of-range writes are never an error: damage and heal code relies on
/// overshooting and letting the clamp settle the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedStat {
    value: i32,
    bounds: Bounds,
}

impl BoundedStat {
    /// Create a stat, clamping the initial value as well
    pub fn new(value: i32, bounds: Bounds) -> Self {
        BoundedStat {
            value: bounds.clamp(value),
            bounds,
        }
    }

    pub fn get(&self) -> i32 {
        self.value
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Assign a new value, returning what was actually stored
    pub fn set(&mut self, value: i32) -> i32 {
        self.value = self.bounds.clamp(value);
        self.value
    }

    /// Add a (possibly negative) delta, returning the applied change
    pub fn add(&mut self, delta: i32) -> i32 {
        let before = self.value;
        self.set(before.saturating_add(delta));
        self.value - before
    }
}
