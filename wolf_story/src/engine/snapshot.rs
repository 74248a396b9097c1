//! Undo snapshots.

use serde::{Deserialize, Serialize};
use wolf_rules::{clamp_stat, Player};

use crate::story_graph::NodeId;

/// Point-in-time capture of day, health, hunger, energy and story position.
///
/// Inventory, pack, reputation and queued events are not captured, so undo
/// does not roll them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub day: u32,
    pub health: i32,
    pub hunger: i32,
    pub energy: i32,
    pub current_node_id: NodeId,
}

impl GameSnapshot {
    pub fn capture(day: u32, player: &Player, current_node_id: NodeId) -> Self {
        Self {
            day,
            health: player.health(),
            hunger: player.hunger(),
            energy: player.energy(),
            current_node_id,
        }
    }

    /// Whether the snapshot could have been taken from a real session.
    pub fn is_plausible(&self) -> bool {
        self.day >= 1
            && [self.health, self.hunger, self.energy]
                .iter()
                .all(|v| clamp_stat(*v) == *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolf_rules::StatDelta;

    #[test]
    fn test_capture() {
        let mut player = Player::default();
        player.update_stats(StatDelta::new(-5, 10, -20, 30));

        let snapshot = GameSnapshot::capture(3, &player, NodeId(7));
        assert_eq!(snapshot.day, 3);
        assert_eq!(snapshot.health, 95);
        assert_eq!(snapshot.hunger, 60);
        assert_eq!(snapshot.energy, 80);
        assert_eq!(snapshot.current_node_id, NodeId(7));
        assert!(snapshot.is_plausible());
    }

    #[test]
    fn test_implausible() {
        let snapshot = GameSnapshot {
            day: 0,
            health: 50,
            hunger: 50,
            energy: 50,
            current_node_id: NodeId(1),
        };
        assert!(!snapshot.is_plausible());
        assert!(!GameSnapshot { day: 2, health: 101, ..snapshot }.is_plausible());
    }
}
