//! Story node definitions.

use serde::{Deserialize, Serialize};
use wolf_rules::{Item, Role, StatDelta};

use crate::events::GameEvent;

/// Stable identifier of a story node. Used to find the player's place on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an ending resolves the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fate {
    /// The wolf survives and thrives: victory.
    Triumph,
    /// The story ends badly: game over.
    Demise,
}

/// Terminal outcome of a story branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    pub description: String,
    pub fate: Fate,
}

/// A follower who joins when a node is entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recruit {
    pub name: String,
    pub role: Role,
}

/// What happens to the player on entering a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consequence {
    pub stats: StatDelta,
    pub reward: Option<Item>,
    pub recruit: Option<Recruit>,
    pub event: Option<GameEvent>,
}

/// Which child of a node a choice leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    /// Choice A.
    Left,
    /// Choice B.
    Right,
}

/// A scenario in the story tree.
///
/// Children are set only by [`StoryGraph::attach`](super::StoryGraph::attach),
/// so every node handed to the graph starts as a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryNode {
    id: NodeId,
    scenario_text: String,
    choice_a_text: String,
    choice_b_text: String,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    ending: Option<Ending>,
    consequence: Consequence,
}

impl StoryNode {
    /// Create a scenario node with no choices yet.
    pub fn new(id: u32, scenario_text: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            scenario_text: scenario_text.into(),
            choice_a_text: String::new(),
            choice_b_text: String::new(),
            left: None,
            right: None,
            ending: None,
            consequence: Consequence::default(),
        }
    }

    /// Create a terminal node.
    pub fn ending(
        id: u32,
        scenario_text: impl Into<String>,
        description: impl Into<String>,
        fate: Fate,
    ) -> Self {
        let mut node = Self::new(id, scenario_text);
        node.ending = Some(Ending {
            description: description.into(),
            fate,
        });
        node
    }

    /// Set the text shown for choices A and B.
    pub fn with_choices(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.choice_a_text = a.into();
        self.choice_b_text = b.into();
        self
    }

    pub fn with_stats(mut self, stats: StatDelta) -> Self {
        self.consequence.stats = stats;
        self
    }

    pub fn with_reward(mut self, item: Item) -> Self {
        self.consequence.reward = Some(item);
        self
    }

    pub fn with_recruit(mut self, name: impl Into<String>, role: Role) -> Self {
        self.consequence.recruit = Some(Recruit {
            name: name.into(),
            role,
        });
        self
    }

    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.consequence.event = Some(event);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn scenario_text(&self) -> &str {
        &self.scenario_text
    }

    pub fn choice_a_text(&self) -> &str {
        &self.choice_a_text
    }

    pub fn choice_b_text(&self) -> &str {
        &self.choice_b_text
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, branch: Branch) -> Option<NodeId> {
        match branch {
            Branch::Left => self.left,
            Branch::Right => self.right,
        }
    }

    pub fn is_ending(&self) -> bool {
        self.ending.is_some()
    }

    pub fn ending_info(&self) -> Option<&Ending> {
        self.ending.as_ref()
    }

    /// Description of the ending. Empty for non-terminal nodes.
    pub fn ending_description(&self) -> &str {
        self.ending
            .as_ref()
            .map(|e| e.description.as_str())
            .unwrap_or("")
    }

    pub fn consequence(&self) -> &Consequence {
        &self.consequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolf_rules::ItemKind;

    #[test]
    fn test_scenario_node() {
        let node = StoryNode::new(4, "An elk herd grazes below.")
            .with_choices("Stalk", "Wait")
            .with_stats(StatDelta::energy(-10))
            .with_reward(Item::new("Elk haunch", ItemKind::Food, 30, "Heavy."));

        assert_eq!(node.id(), NodeId(4));
        assert_eq!(node.choice_a_text(), "Stalk");
        assert!(!node.is_ending());
        assert_eq!(node.ending_description(), "");
        assert_eq!(node.consequence().stats.energy, -10);
        assert!(node.consequence().reward.is_some());
        assert!(node.left().is_none() && node.right().is_none());
    }

    #[test]
    fn test_ending_node() {
        let node = StoryNode::ending(8, "The ridge is yours.", "Lord of the Ridge", Fate::Triumph);
        assert!(node.is_ending());
        assert_eq!(node.ending_description(), "Lord of the Ridge");
        assert_eq!(node.ending_info().unwrap().fate, Fate::Triumph);
    }
}
