//! The fixed "Lone Wolf" story tree.

use wolf_rules::{Item, ItemKind, Result, Role, StatDelta};

use super::{Fate, NodeId, StoryGraph, StoryNode};
use crate::events::{GameEvent, PRIORITY_CRITICAL, PRIORITY_URGENT};

use super::Branch::{Left, Right};

/// Id of the opening scenario.
const OPENING: NodeId = NodeId(1);

/// Fill an empty graph with the saga. The same tree every time.
pub(crate) fn populate(graph: &mut StoryGraph) -> Result<()> {
    graph.set_root(
        StoryNode::new(
            1,
            "The first snow falls the night your old pack drives you out. \
             You stand alone at the edge of their territory.",
        )
        .with_choices("Head north into the pine forest", "Follow the river south"),
    )?;

    // North: the forest.
    graph.attach(
        OPENING,
        Left,
        StoryNode::new(
            2,
            "Pines close in around you. Fresh elk tracks cross an old game trail.",
        )
        .with_choices("Stalk the elk herd", "Search for an abandoned den")
        .with_stats(StatDelta::energy(-5)),
    )?;
    graph.attach(
        NodeId(2),
        Left,
        StoryNode::new(4, "The hunt is long, but a young elk falls.")
            .with_choices(
                "Drag the kill up to the ridge",
                "Share it with a starving stranger",
            )
            .with_stats(StatDelta::new(-10, -30, -10, 0))
            .with_reward(Item::new(
                "Elk haunch",
                ItemKind::Food,
                30,
                "Enough meat for two days.",
            )),
    )?;
    graph.attach(
        NodeId(4),
        Left,
        StoryNode::ending(
            8,
            "From the ridge you can see the whole valley.",
            "Lord of the Ridge: you claim the high ground as your territory.",
            Fate::Triumph,
        ),
    )?;
    graph.attach(
        NodeId(4),
        Right,
        StoryNode::new(9, "A gaunt she-wolf eats beside you and does not leave.")
            .with_choices("Hunt together", "Part ways at dawn")
            .with_stats(StatDelta::reputation(15))
            .with_recruit("Sable", Role::Hunter),
    )?;
    graph.attach(
        NodeId(9),
        Left,
        StoryNode::ending(
            15,
            "Two become four by the spring.",
            "A New Pack: you are alone no longer.",
            Fate::Triumph,
        ),
    )?;
    graph.attach(
        NodeId(9),
        Right,
        StoryNode::ending(
            16,
            "The winter is long and the game is thin.",
            "The Long Winter: alone, you do not see the thaw.",
            Fate::Demise,
        ),
    )?;
    graph.attach(
        NodeId(2),
        Right,
        StoryNode::new(5, "A dry den under a fallen spruce. Yarrow grows at the mouth.")
            .with_choices("Wait out the blizzard", "Press on through the storm")
            .with_stats(StatDelta::energy(20))
            .with_reward(Item::new(
                "Yarrow",
                ItemKind::Herb,
                20,
                "Bitter leaves that close wounds.",
            )),
    )?;
    graph.attach(
        NodeId(5),
        Left,
        StoryNode::ending(
            10,
            "The storm passes. Meltwater runs under the snow.",
            "Spring Thaw: patience carries you through the winter.",
            Fate::Triumph,
        ),
    )?;
    graph.attach(
        NodeId(5),
        Right,
        StoryNode::ending(
            11,
            "White on white. The trail is gone.",
            "Lost in the Storm: the blizzard takes you.",
            Fate::Demise,
        )
        .with_stats(StatDelta::health(-20)),
    )?;

    // South: the river.
    graph.attach(
        OPENING,
        Right,
        StoryNode::new(3, "The river valley is wide and the wind smells of another pack.")
            .with_choices("Cross the frozen river", "Approach the rival pack")
            .with_stats(StatDelta::hunger(5)),
    )?;
    graph.attach(
        NodeId(3),
        Left,
        StoryNode::new(6, "Halfway across, the ice groans and splits.")
            .with_choices("Scramble for the far bank", "Turn back")
            .with_event(
                GameEvent::new("Cracking Ice", "Freezing water closes over you.", PRIORITY_CRITICAL)
                    .with_effect(StatDelta::new(-15, 0, -15, 0)),
            ),
    )?;
    // The way back across the ice is gone: node 6 has no right branch.
    graph.attach(
        NodeId(6),
        Left,
        StoryNode::new(
            12,
            "On the far bank an old scout watches you, guarding a pale stone.",
        )
        .with_choices("Carry the stone to the mountain", "Follow the hunters' trail")
        .with_recruit("Wren", Role::Scout)
        .with_reward(Item::new(
            "Moonstone",
            ItemKind::KeyItem,
            0,
            "It glows when the moon is full.",
        )),
    )?;
    graph.attach(
        NodeId(12),
        Left,
        StoryNode::ending(
            17,
            "At the summit the stone blazes under the full moon.",
            "Keeper of the Moonstone: the valley's packs will follow you.",
            Fate::Triumph,
        ),
    )?;
    graph.attach(
        NodeId(12),
        Right,
        StoryNode::ending(
            18,
            "The trail smells of iron and smoke.",
            "The Hunters' Snare: you walk into their traps.",
            Fate::Demise,
        )
        .with_stats(StatDelta::health(-40)),
    )?;
    graph.attach(
        NodeId(3),
        Right,
        StoryNode::new(7, "The rival alpha blocks your path, hackles raised.")
            .with_choices("Lower your head and submit", "Challenge the alpha"),
    )?;
    graph.attach(
        NodeId(7),
        Left,
        StoryNode::ending(
            13,
            "You eat last, sleep at the edge, and are never trusted.",
            "A Life in the Shadow: you live, but as nothing.",
            Fate::Demise,
        )
        .with_stats(StatDelta::reputation(-30)),
    )?;
    graph.attach(
        NodeId(7),
        Right,
        StoryNode::new(14, "Teeth and snow. The alpha is strong, but old.")
            .with_choices("Drive the alpha out", "Spare the alpha")
            .with_event(
                GameEvent::new("Duel with the Alpha", "Blood on the snow.", PRIORITY_URGENT)
                    .with_effect(StatDelta::new(-30, 0, -20, 20)),
            ),
    )?;
    graph.attach(
        NodeId(14),
        Left,
        StoryNode::ending(
            19,
            "The rival pack bows to you.",
            "Alpha of the Valley: the pack is yours by right of fang.",
            Fate::Triumph,
        )
        .with_stats(StatDelta::reputation(20)),
    )?;
    graph.attach(
        NodeId(14),
        Right,
        StoryNode::ending(
            20,
            "The old alpha limps beside you as your guard.",
            "Peace Between Packs: mercy earns you an ally.",
            Fate::Triumph,
        )
        .with_recruit("Grey", Role::Guard),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saga_shape() {
        let mut graph = StoryGraph::new();
        populate(&mut graph).unwrap();

        assert_eq!(graph.len(), 20);
        assert_eq!(graph.root().unwrap().id(), OPENING);
        assert!(graph.validate().is_ok());

        // The ice crossing only goes forward.
        let ice = graph.find_node(NodeId(6)).unwrap();
        assert!(ice.left().is_some());
        assert!(ice.right().is_none());
    }
}
