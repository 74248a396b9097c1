//! Game mechanics: item kinds, pack roles, stat bounds and stat deltas.

use serde::{Deserialize, Serialize};

/// Lowest value any vital stat can take.
pub const STAT_MIN: i32 = 0;
/// Highest value any vital stat can take.
pub const STAT_MAX: i32 = 100;

/// Clamp a stat value into `[STAT_MIN, STAT_MAX]`.
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Categories of items a wolf can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Eaten to lower hunger by the item's effect value.
    Food,
    /// Chewed to restore health by the item's effect value.
    Herb,
    /// Used up with no stat effect.
    Tool,
    /// Story token. Never consumable.
    KeyItem,
}

impl ItemKind {
    /// Whether items of this kind can be used up.
    pub fn is_consumable(&self) -> bool {
        !matches!(self, ItemKind::KeyItem)
    }
}

/// Roles a pack follower can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    Hunter,
    Scout,
    Guard,
    #[default]
    None,
}

/// Signed changes to the four vital stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatDelta {
    pub health: i32,
    pub hunger: i32,
    pub energy: i32,
    pub reputation: i32,
}

impl StatDelta {
    /// A delta that changes nothing.
    pub const ZERO: StatDelta = StatDelta {
        health: 0,
        hunger: 0,
        energy: 0,
        reputation: 0,
    };

    pub fn new(health: i32, hunger: i32, energy: i32, reputation: i32) -> Self {
        Self {
            health,
            hunger,
            energy,
            reputation,
        }
    }

    pub fn health(amount: i32) -> Self {
        Self {
            health: amount,
            ..Self::ZERO
        }
    }

    pub fn hunger(amount: i32) -> Self {
        Self {
            hunger: amount,
            ..Self::ZERO
        }
    }

    pub fn energy(amount: i32) -> Self {
        Self {
            energy: amount,
            ..Self::ZERO
        }
    }

    pub fn reputation(amount: i32) -> Self {
        Self {
            reputation: amount,
            ..Self::ZERO
        }
    }

    /// Check whether applying this delta would change nothing.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl std::ops::Add for StatDelta {
    type Output = StatDelta;

    fn add(self, rhs: StatDelta) -> StatDelta {
        StatDelta {
            health: self.health.saturating_add(rhs.health),
            hunger: self.hunger.saturating_add(rhs.hunger),
            energy: self.energy.saturating_add(rhs.energy),
            reputation: self.reputation.saturating_add(rhs.reputation),
        }
    }
}
