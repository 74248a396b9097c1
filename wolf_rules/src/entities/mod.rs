//! Entity definitions: items, the inventory, pack followers and the player.

mod components;
mod player;

pub use components::*;
pub use player::*;

use serde::{Deserialize, Serialize};

use crate::mechanics::{ItemKind, Role};

/// An item the player can carry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    kind: ItemKind,
    effect_value: i32,
    description: String,
}

impl Item {
    /// Create a new item.
    pub fn new(
        name: impl Into<String>,
        kind: ItemKind,
        effect_value: i32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            effect_value,
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Magnitude of the item's effect when used.
    pub fn effect_value(&self) -> i32 {
        self.effect_value
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A member of the player's pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    pub name: String,
    pub role: Role,
    pub loyalty: i32,
}
