//! Session-wide state: session identity and the passage of days.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Player;
use crate::mechanics::{StatDelta, STAT_MAX, STAT_MIN};

/// Unique identifier for one playthrough. Carried through save files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What one day in the wild costs the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyUpkeep {
    pub hunger_per_day: i32,
    pub energy_per_day: i32,
    /// Health lost at the end of a day spent fully starved.
    pub starvation_damage: i32,
    /// Health lost at the end of a day spent fully exhausted.
    pub exhaustion_damage: i32,
}

impl Default for DailyUpkeep {
    fn default() -> Self {
        Self {
            hunger_per_day: 5,
            energy_per_day: 10,
            starvation_damage: 10,
            exhaustion_damage: 5,
        }
    }
}

impl DailyUpkeep {
    /// Apply one day of upkeep to the player. Returns the health lost.
    pub fn pass_day(&self, player: &mut Player) -> i32 {
        let before = player.health();
        player.update_stats(StatDelta {
            hunger: self.hunger_per_day,
            energy: -self.energy_per_day,
            ..StatDelta::ZERO
        });

        if player.hunger() >= STAT_MAX {
            player.take_damage(self.starvation_damage);
        }
        if player.energy() <= STAT_MIN {
            player.take_damage(self.exhaustion_damage);
        }

        let lost = before - player.health();
        if lost > 0 {
            tracing::debug!(lost, health = player.health(), "upkeep took health");
        }
        lost
    }
}
