//! Components owned by the player: vital stats and the inventory.

use serde::{Deserialize, Serialize};

use super::Item;
use crate::error::{GameError, Result};
use crate::mechanics::{clamp_stat, ItemKind, StatDelta, STAT_MAX};

/// Maximum number of items the inventory holds.
pub const MAX_ITEMS: usize = 10;

/// The four vital stats, each kept within `[0, 100]`.
///
/// Hunger counts up: 0 is fully fed, 100 is starving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    health: i32,
    hunger: i32,
    energy: i32,
    reputation: i32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: 100,
            hunger: 50,
            energy: 100,
            reputation: 50,
        }
    }
}

impl Vitals {
    /// Create vitals, clamping every value into range.
    pub fn new(health: i32, hunger: i32, energy: i32, reputation: i32) -> Self {
        Self {
            health: clamp_stat(health),
            hunger: clamp_stat(hunger),
            energy: clamp_stat(energy),
            reputation: clamp_stat(reputation),
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn hunger(&self) -> i32 {
        self.hunger
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    /// Whether every stat is inside its bounds. Only deserialized values can fail this.
    pub fn in_bounds(&self) -> bool {
        [self.health, self.hunger, self.energy, self.reputation]
            .iter()
            .all(|v| clamp_stat(*v) == *v)
    }

    /// Apply signed deltas to all four stats, clamping each afterwards.
    pub fn update_stats(&mut self, delta: StatDelta) {
        self.health = clamp_stat(self.health.saturating_add(delta.health));
        self.hunger = clamp_stat(self.hunger.saturating_add(delta.hunger));
        self.energy = clamp_stat(self.energy.saturating_add(delta.energy));
        self.reputation = clamp_stat(self.reputation.saturating_add(delta.reputation));
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Restore energy to full.
    pub fn rest(&mut self) {
        self.energy = STAT_MAX;
    }

    /// Lower hunger by `amount`. Hunger never drops below zero.
    pub fn feed(&mut self, amount: i32) {
        self.hunger = clamp_stat(self.hunger.saturating_sub(amount));
    }

    /// Lower health by `amount`. Death is detected by the caller via `is_alive`.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = clamp_stat(self.health.saturating_sub(amount));
    }

    /// Overwrite health, hunger and energy, as when rewinding to a snapshot.
    ///
    /// Reputation is left as it is.
    pub fn restore(&mut self, health: i32, hunger: i32, energy: i32) {
        self.health = clamp_stat(health);
        self.hunger = clamp_stat(hunger);
        self.energy = clamp_stat(energy);
    }
}

/// Bounded, insertion-ordered item storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an inventory from a list of items, failing if it is over capacity.
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        if items.len() > MAX_ITEMS {
            return Err(GameError::CapacityExceeded {
                capacity: MAX_ITEMS,
            });
        }
        Ok(Self { items })
    }

    /// Append an item. Fails without changing anything when full.
    pub fn add_item(&mut self, item: Item) -> Result<()> {
        if self.is_full() {
            return Err(GameError::CapacityExceeded {
                capacity: MAX_ITEMS,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Use the first item named `name`, applying its effect to `vitals`.
    ///
    /// Food lowers hunger, herbs restore health and tools have no stat effect.
    /// Key items are never consumed. The used item is returned.
    pub fn use_item(&mut self, name: &str, vitals: &mut Vitals) -> Result<Item> {
        let index = self
            .position(name)
            .ok_or_else(|| GameError::ItemNotFound(name.to_string()))?;

        if !self.items[index].kind().is_consumable() {
            return Err(GameError::ItemNotConsumable(name.to_string()));
        }

        let item = self.items.remove(index);
        match item.kind() {
            ItemKind::Food => vitals.feed(item.effect_value()),
            ItemKind::Herb => vitals.update_stats(StatDelta::health(item.effect_value())),
            ItemKind::Tool | ItemKind::KeyItem => {}
        }
        Ok(item)
    }

    /// Remove the first item named `name`. Absent items are not an error.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        self.position(name).map(|index| self.items.remove(index))
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == MAX_ITEMS
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        MAX_ITEMS
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }
}
