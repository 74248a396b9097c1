//! The player character: a lone wolf with vitals, an inventory and a pack.

use serde::{Deserialize, Serialize};

use super::{Follower, Inventory, Item, Vitals};
use crate::config::RulesConfig;
use crate::error::Result;
use crate::mechanics::{Role, StatDelta};

/// Loyalty a freshly recruited follower starts with.
pub const DEFAULT_RECRUIT_LOYALTY: i32 = 50;

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    vitals: Vitals,
    inventory: Inventory,
    followers: Vec<Follower>,
    recruit_loyalty: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vitals::default(), DEFAULT_RECRUIT_LOYALTY)
    }
}

impl Player {
    /// Create a player with the given starting stats and an empty inventory and pack.
    pub fn new(vitals: Vitals, recruit_loyalty: i32) -> Self {
        Self {
            vitals,
            inventory: Inventory::new(),
            followers: Vec::new(),
            recruit_loyalty,
        }
    }

    /// Create a player using the starting values of a rules configuration.
    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(config.starting_vitals, config.recruit_loyalty)
    }

    /// Reassemble a player from persisted parts.
    pub fn from_parts(
        vitals: Vitals,
        inventory: Inventory,
        followers: Vec<Follower>,
        recruit_loyalty: i32,
    ) -> Self {
        Self {
            vitals,
            inventory,
            followers,
            recruit_loyalty,
        }
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Pack members in recruitment order.
    pub fn followers(&self) -> &[Follower] {
        &self.followers
    }

    pub fn health(&self) -> i32 {
        self.vitals.health()
    }

    pub fn hunger(&self) -> i32 {
        self.vitals.hunger()
    }

    pub fn energy(&self) -> i32 {
        self.vitals.energy()
    }

    pub fn reputation(&self) -> i32 {
        self.vitals.reputation()
    }

    pub fn update_stats(&mut self, delta: StatDelta) {
        self.vitals.update_stats(delta);
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn rest(&mut self) {
        self.vitals.rest();
    }

    pub fn feed(&mut self, amount: i32) {
        self.vitals.feed(amount);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.vitals.take_damage(amount);
    }

    /// Use an item from the inventory on this player.
    pub fn use_item(&mut self, name: &str) -> Result<Item> {
        self.inventory.use_item(name, &mut self.vitals)
    }

    /// Add a follower to the pack. Names need not be unique.
    pub fn recruit_member(&mut self, name: impl Into<String>, role: Role) -> &Follower {
        let name = name.into();
        tracing::debug!(follower = %name, ?role, "recruited pack member");
        self.followers.push(Follower {
            name,
            role,
            loyalty: self.recruit_loyalty,
        });
        &self.followers[self.followers.len() - 1]
    }

    /// Remove the first follower named `name`.
    pub fn dismiss_member(&mut self, name: &str) -> Option<Follower> {
        let index = self.followers.iter().position(|f| f.name == name)?;
        Some(self.followers.remove(index))
    }

    /// Number of followers filling a given role.
    pub fn pack_count(&self, role: Role) -> usize {
        self.followers.iter().filter(|f| f.role == role).count()
    }

    pub fn recruit_loyalty(&self) -> i32 {
        self.recruit_loyalty
    }
}
