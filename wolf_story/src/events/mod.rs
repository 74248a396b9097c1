//! Random events: the event value type, the priority queue that orders them and
//! the manager that draws, queues and resolves them.
//!
//! Lower priority numbers are more urgent. Events of equal priority are served
//! in the order they were queued.

mod manager;
mod queue;

pub use manager::*;
pub use queue::*;

use serde::{Deserialize, Serialize};
use wolf_rules::StatDelta;

/// Critical events: immediate danger.
pub const PRIORITY_CRITICAL: i32 = 1;
/// Urgent events: should be dealt with soon.
pub const PRIORITY_URGENT: i32 = 2;
/// Everything else.
pub const PRIORITY_NORMAL: i32 = 3;

/// Something that happens to the wolf outside the story's choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: i32,
    /// Applied to the player when the event is processed.
    #[serde(default)]
    pub effect: StatDelta,
}

impl GameEvent {
    /// Create an event with no stat effect.
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: i32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
            effect: StatDelta::ZERO,
        }
    }

    /// Set the stat effect applied when the event resolves.
    pub fn with_effect(mut self, effect: StatDelta) -> Self {
        self.effect = effect;
        self
    }
}

/// The events that can strike at random when no deck is configured.
pub fn default_event_deck() -> Vec<GameEvent> {
    vec![
        GameEvent::new(
            "Hunters' Trap",
            "Steel jaws snap shut on a hind leg.",
            PRIORITY_CRITICAL,
        )
        .with_effect(StatDelta::health(-20)),
        GameEvent::new(
            "Bear Encounter",
            "A grizzly wakes early and claims the clearing.",
            PRIORITY_CRITICAL,
        )
        .with_effect(StatDelta::new(-15, 0, -10, 0)),
        GameEvent::new(
            "Blizzard",
            "Snow buries the trail and the cold bites deep.",
            PRIORITY_URGENT,
        )
        .with_effect(StatDelta::new(-5, 10, -20, 0)),
        GameEvent::new(
            "Scarce Game",
            "The deer have moved on. Nothing to hunt today.",
            PRIORITY_URGENT,
        )
        .with_effect(StatDelta::hunger(15)),
        GameEvent::new(
            "Carrion Find",
            "Ravens circle over an old kill.",
            PRIORITY_NORMAL,
        )
        .with_effect(StatDelta::hunger(-20)),
        GameEvent::new(
            "Howl in the Night",
            "A distant pack answers your call.",
            PRIORITY_NORMAL,
        )
        .with_effect(StatDelta::reputation(5)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deck_priorities() {
        let deck = default_event_deck();
        assert!(!deck.is_empty());
        assert!(deck
            .iter()
            .all(|e| (PRIORITY_CRITICAL..=PRIORITY_NORMAL).contains(&e.priority)));
    }

    #[test]
    fn test_event_defaults_from_json() {
        let event: GameEvent =
            serde_json::from_str(r#"{"title": "Rockslide", "priority": 2}"#).unwrap();
        assert_eq!(event.description, "");
        assert!(event.effect.is_zero());
    }
}
