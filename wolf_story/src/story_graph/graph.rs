//! Story Graph - arena-backed binary tree with a cursor for the player's position.

use std::collections::{HashMap, HashSet};
use wolf_rules::{GameError, Result};

use super::{saga, Branch, NodeId, StoryNode};

/// The narrative tree and the node the player currently stands on.
///
/// Nodes live in a flat arena and refer to their children by id. The graph
/// owns every node; `current` is just an index into the arena.
#[derive(Debug, Clone, Default)]
pub struct StoryGraph {
    /// All nodes, in insertion order.
    nodes: Vec<StoryNode>,

    /// Index: node id -> arena slot.
    index: HashMap<NodeId, usize>,

    root: Option<usize>,

    /// None until the tree is built or a position is set.
    current: Option<usize>,
}

impl StoryGraph {
    /// Create an empty, uninitialized graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the fixed story tree, replacing anything already here, and
    /// place the player at the root.
    pub fn build_tree(&mut self) -> Result<()> {
        let mut graph = StoryGraph::new();
        saga::populate(&mut graph)?;
        graph.validate()?;
        graph.current = graph.root;
        *self = graph;
        tracing::debug!(nodes = self.nodes.len(), "story tree built");
        Ok(())
    }

    /// Install the root node. The graph must be empty.
    pub fn set_root(&mut self, node: StoryNode) -> Result<NodeId> {
        if self.root.is_some() {
            return Err(GameError::InvalidTree("root already set".to_string()));
        }
        let id = node.id();
        self.root = Some(self.insert(node)?);
        Ok(id)
    }

    /// Hang `node` below `parent` on the given branch.
    pub fn attach(&mut self, parent: NodeId, branch: Branch, node: StoryNode) -> Result<NodeId> {
        let parent_slot = *self
            .index
            .get(&parent)
            .ok_or_else(|| GameError::InvalidTree(format!("unknown parent {parent}")))?;

        let parent_node = &self.nodes[parent_slot];
        if parent_node.is_ending() {
            return Err(GameError::InvalidTree(format!(
                "ending node {parent} cannot have children"
            )));
        }
        if parent_node.child(branch).is_some() {
            return Err(GameError::InvalidTree(format!(
                "node {parent} already has a {branch:?} child"
            )));
        }

        let id = node.id();
        self.insert(node)?;
        let parent_node = &mut self.nodes[parent_slot];
        match branch {
            Branch::Left => parent_node.left = Some(id),
            Branch::Right => parent_node.right = Some(id),
        }
        Ok(id)
    }

    fn insert(&mut self, node: StoryNode) -> Result<usize> {
        let id = node.id();
        if self.index.contains_key(&id) {
            return Err(GameError::InvalidTree(format!("duplicate node id {id}")));
        }
        let slot = self.nodes.len();
        self.nodes.push(node);
        self.index.insert(id, slot);
        Ok(slot)
    }

    /// Follow choice A.
    pub fn move_to_left(&mut self) -> Result<&StoryNode> {
        self.move_to(Branch::Left)
    }

    /// Follow choice B.
    pub fn move_to_right(&mut self) -> Result<&StoryNode> {
        self.move_to(Branch::Right)
    }

    /// Advance the cursor along `branch`. The cursor is untouched on failure.
    pub fn move_to(&mut self, branch: Branch) -> Result<&StoryNode> {
        let from = self.current.ok_or(GameError::NotInitialized)?;
        let node = &self.nodes[from];
        if node.is_ending() {
            return Err(GameError::AlreadyAtEnding);
        }
        let child = node.child(branch).ok_or(GameError::DeadEnd)?;
        let slot = *self
            .index
            .get(&child)
            .ok_or(GameError::NodeNotFound(child.0))?;

        tracing::debug!(from = %self.nodes[from].id(), to = %child, ?branch, "story advanced");
        self.current = Some(slot);
        Ok(&self.nodes[slot])
    }

    pub fn get_current_node(&self) -> Result<&StoryNode> {
        self.current
            .map(|slot| &self.nodes[slot])
            .ok_or(GameError::NotInitialized)
    }

    pub fn current_id(&self) -> Option<NodeId> {
        self.current.map(|slot| self.nodes[slot].id())
    }

    /// Move the cursor to the node with the given id, searching from the root.
    pub fn set_current_node(&mut self, id: NodeId) -> Result<()> {
        let slot = self
            .preorder_slots()
            .into_iter()
            .find(|slot| self.nodes[*slot].id() == id)
            .ok_or(GameError::NodeNotFound(id.0))?;
        self.current = Some(slot);
        Ok(())
    }

    /// Whether the player stands on an ending. False before initialization.
    pub fn is_at_ending(&self) -> bool {
        self.current
            .map(|slot| self.nodes[slot].is_ending())
            .unwrap_or(false)
    }

    pub fn find_node(&self, id: NodeId) -> Option<&StoryNode> {
        self.index.get(&id).map(|slot| &self.nodes[*slot])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn root(&self) -> Option<&StoryNode> {
        self.root.map(|slot| &self.nodes[slot])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes reachable from the root, parent before children, left before right.
    pub fn preorder(&self) -> impl Iterator<Item = &StoryNode> {
        self.preorder_slots()
            .into_iter()
            .map(move |slot| &self.nodes[slot])
    }

    /// All ending nodes reachable from the root.
    pub fn endings(&self) -> impl Iterator<Item = &StoryNode> {
        self.preorder().filter(|node| node.is_ending())
    }

    fn preorder_slots(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut visited = HashSet::new();
        let mut stack: Vec<usize> = self.root.into_iter().collect();

        while let Some(slot) = stack.pop() {
            if !visited.insert(slot) {
                continue;
            }
            order.push(slot);
            let node = &self.nodes[slot];
            // Right first so left is popped first.
            for child in [node.right, node.left].into_iter().flatten() {
                if let Some(child_slot) = self.index.get(&child) {
                    stack.push(*child_slot);
                }
            }
        }
        order
    }

    /// Check the structural invariants: every node reachable from the root
    /// exactly once, children resolvable, and endings without children.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Ok(());
        }
        let root = self
            .root
            .ok_or_else(|| GameError::InvalidTree("nodes without a root".to_string()))?;

        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(slot) = stack.pop() {
            if !seen.insert(slot) {
                return Err(GameError::InvalidTree(format!(
                    "node {} reached twice",
                    self.nodes[slot].id()
                )));
            }
            let node = &self.nodes[slot];
            if node.is_ending() && (node.left.is_some() || node.right.is_some()) {
                return Err(GameError::InvalidTree(format!(
                    "ending node {} has children",
                    node.id()
                )));
            }
            for child in [node.left, node.right].into_iter().flatten() {
                let child_slot = self.index.get(&child).ok_or_else(|| {
                    GameError::InvalidTree(format!("node {} points at missing {child}", node.id()))
                })?;
                stack.push(*child_slot);
            }
        }

        if seen.len() != self.nodes.len() {
            return Err(GameError::InvalidTree(format!(
                "{} nodes unreachable from the root",
                self.nodes.len() - seen.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story_graph::Fate;

    /// root(1) -> left 2 (ending), right 3 -> left 4 (ending), right absent
    fn small_tree() -> StoryGraph {
        let mut graph = StoryGraph::new();
        graph
            .set_root(StoryNode::new(1, "Crossroads").with_choices("Den", "Ridge"))
            .unwrap();
        graph
            .attach(
                NodeId(1),
                Branch::Left,
                StoryNode::ending(2, "Den", "Safe", Fate::Triumph),
            )
            .unwrap();
        graph
            .attach(NodeId(1), Branch::Right, StoryNode::new(3, "Ridge"))
            .unwrap();
        graph
            .attach(
                NodeId(3),
                Branch::Left,
                StoryNode::ending(4, "Cliff", "Fell", Fate::Demise),
            )
            .unwrap();
        graph.set_current_node(NodeId(1)).unwrap();
        graph
    }

    #[test]
    fn test_uninitialized_graph() {
        let mut graph = StoryGraph::new();
        assert!(matches!(graph.get_current_node(), Err(GameError::NotInitialized)));
        assert!(matches!(graph.move_to_left(), Err(GameError::NotInitialized)));
        assert!(!graph.is_at_ending());
        assert!(graph.current_id().is_none());
    }

    #[test]
    fn test_navigation() {
        let mut graph = small_tree();
        let node = graph.move_to_right().unwrap();
        assert_eq!(node.id(), NodeId(3));

        graph.move_to_left().unwrap();
        assert!(graph.is_at_ending());
        assert_eq!(graph.get_current_node().unwrap().ending_description(), "Fell");
    }

    #[test]
    fn test_dead_end_keeps_position() {
        let mut graph = small_tree();
        graph.move_to_right().unwrap();

        assert!(matches!(graph.move_to_right(), Err(GameError::DeadEnd)));
        assert_eq!(graph.current_id(), Some(NodeId(3)));
    }

    #[test]
    fn test_dead_end_on_the_left() {
        let mut graph = small_tree();
        graph
            .attach(NodeId(3), Branch::Right, StoryNode::new(5, "Scree"))
            .unwrap();
        graph
            .attach(
                NodeId(5),
                Branch::Right,
                StoryNode::ending(6, "Pass", "Through", Fate::Triumph),
            )
            .unwrap();
        graph.set_current_node(NodeId(5)).unwrap();

        assert!(matches!(graph.move_to_left(), Err(GameError::DeadEnd)));
        assert_eq!(graph.current_id(), Some(NodeId(5)));
        assert_eq!(graph.move_to_right().unwrap().id(), NodeId(6));
    }

    #[test]
    fn test_no_moves_from_ending() {
        let mut graph = small_tree();
        graph.move_to_left().unwrap();

        assert!(matches!(graph.move_to_left(), Err(GameError::AlreadyAtEnding)));
        assert!(matches!(graph.move_to_right(), Err(GameError::AlreadyAtEnding)));
        assert_eq!(graph.current_id(), Some(NodeId(2)));
    }

    #[test]
    fn test_set_current_node() {
        let mut graph = small_tree();
        graph.set_current_node(NodeId(4)).unwrap();
        assert!(graph.is_at_ending());

        assert!(matches!(
            graph.set_current_node(NodeId(99)),
            Err(GameError::NodeNotFound(99))
        ));
        assert_eq!(graph.current_id(), Some(NodeId(4)));
    }

    #[test]
    fn test_preorder() {
        let graph = small_tree();
        let ids: Vec<_> = graph.preorder().map(|n| n.id().0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(graph.endings().count(), 2);
    }

    #[test]
    fn test_attach_rejections() {
        let mut graph = small_tree();

        let duplicate = graph.attach(NodeId(3), Branch::Right, StoryNode::new(2, "Again"));
        assert!(matches!(duplicate, Err(GameError::InvalidTree(_))));

        let below_ending = graph.attach(NodeId(2), Branch::Left, StoryNode::new(5, "Nope"));
        assert!(matches!(below_ending, Err(GameError::InvalidTree(_))));

        let occupied = graph.attach(NodeId(1), Branch::Left, StoryNode::new(6, "Taken"));
        assert!(matches!(occupied, Err(GameError::InvalidTree(_))));

        let orphan = graph.attach(NodeId(42), Branch::Left, StoryNode::new(7, "Lost"));
        assert!(matches!(orphan, Err(GameError::InvalidTree(_))));

        assert!(matches!(
            graph.set_root(StoryNode::new(8, "Second root")),
            Err(GameError::InvalidTree(_))
        ));
        assert_eq!(graph.len(), 4);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_build_tree_is_valid_and_deterministic() {
        let mut first = StoryGraph::new();
        first.build_tree().unwrap();
        let mut second = StoryGraph::new();
        second.build_tree().unwrap();

        assert!(first.validate().is_ok());
        assert_eq!(first.current_id(), first.root().map(|r| r.id()));

        let a: Vec<_> = first.preorder().cloned().collect();
        let b: Vec<_> = second.preorder().cloned().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), first.len());
    }

    #[test]
    fn test_build_tree_resets_position() {
        let mut graph = StoryGraph::new();
        graph.build_tree().unwrap();
        graph.move_to_left().unwrap();
        graph.build_tree().unwrap();
        assert_eq!(graph.current_id(), graph.root().map(|r| r.id()));
    }

    #[test]
    fn test_built_tree_has_both_fates() {
        let mut graph = StoryGraph::new();
        graph.build_tree().unwrap();

        let fates: Vec<_> = graph
            .endings()
            .filter_map(|n| n.ending_info().map(|e| e.fate))
            .collect();
        assert!(fates.contains(&Fate::Triumph));
        assert!(fates.contains(&Fate::Demise));
    }
}
