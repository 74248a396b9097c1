//! Event manager: draws random events from a deck and resolves queued ones.

use rand::seq::SliceRandom;
use rand::Rng;
use wolf_rules::{GameError, Player, Result};

use super::{EventQueue, GameEvent};

/// Owns the pending-event queue and the deck random events are drawn from.
#[derive(Debug, Clone, Default)]
pub struct EventManager {
    queue: EventQueue,
    deck: Vec<GameEvent>,
}

impl EventManager {
    /// Create a manager that draws random events from `deck`.
    pub fn new(deck: Vec<GameEvent>) -> Self {
        Self {
            queue: EventQueue::new(),
            deck,
        }
    }

    /// Replace the pending queue, keeping the deck.
    pub fn with_queue(mut self, queue: EventQueue) -> Self {
        self.queue = queue;
        self
    }

    pub fn add_event(&mut self, event: GameEvent) {
        tracing::debug!(title = %event.title, priority = event.priority, "event queued");
        self.queue.push(event);
    }

    /// Draw an event from the deck with `rng` and queue it.
    ///
    /// Returns the queued event, or `None` when the deck is empty.
    pub fn trigger_random_event<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<GameEvent> {
        let event = self.deck.choose(rng)?.clone();
        self.add_event(event.clone());
        Some(event)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// The most urgent pending event.
    pub fn peek_next_event(&self) -> Result<&GameEvent> {
        self.queue.peek().ok_or(GameError::QueueEmpty)
    }

    /// Remove the most urgent event and apply its effect to `player`.
    pub fn process_next_event(&mut self, player: &mut Player) -> Result<GameEvent> {
        let event = self.queue.pop().ok_or(GameError::QueueEmpty)?;
        player.update_stats(event.effect);
        tracing::debug!(
            title = %event.title,
            health = player.health(),
            remaining = self.queue.len(),
            "event processed"
        );
        Ok(event)
    }

    /// Pending events in service order.
    pub fn pending(&self) -> Vec<GameEvent> {
        self.queue.to_ordered_vec()
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn deck(&self) -> &[GameEvent] {
        &self.deck
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::default_event_deck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wolf_rules::StatDelta;

    #[test]
    fn test_empty_queue_errors() {
        let mut manager = EventManager::default();
        let mut player = Player::default();

        assert!(!manager.has_pending_events());
        assert!(matches!(manager.peek_next_event(), Err(GameError::QueueEmpty)));
        assert!(matches!(
            manager.process_next_event(&mut player),
            Err(GameError::QueueEmpty)
        ));
        assert_eq!(player, Player::default());
    }

    #[test]
    fn test_process_applies_effect() {
        let mut manager = EventManager::default();
        let mut player = Player::default();
        manager.add_event(
            GameEvent::new("Wolverine", "It does not back down.", 1)
                .with_effect(StatDelta::health(-25)),
        );

        let event = manager.process_next_event(&mut player).unwrap();
        assert_eq!(event.title, "Wolverine");
        assert_eq!(player.health(), 75);
        assert!(!manager.has_pending_events());
    }

    #[test]
    fn test_dequeue_order_3_1_2() {
        let mut manager = EventManager::default();
        let mut player = Player::default();
        manager.add_event(GameEvent::new("normal", "", 3));
        manager.add_event(GameEvent::new("critical", "", 1));
        manager.add_event(GameEvent::new("urgent", "", 2));

        assert_eq!(manager.peek_next_event().unwrap().priority, 1);
        let order: Vec<_> = (0..3)
            .map(|_| manager.process_next_event(&mut player).unwrap().priority)
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_trigger_random_event_draws_from_deck() {
        let deck = default_event_deck();
        let mut manager = EventManager::new(deck.clone());
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = manager.trigger_random_event(&mut rng).unwrap();
        assert!(deck.contains(&drawn));
        assert_eq!(manager.pending_count(), 1);
    }

    #[test]
    fn test_trigger_with_empty_deck() {
        let mut manager = EventManager::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(manager.trigger_random_event(&mut rng).is_none());
        assert!(!manager.has_pending_events());
    }
}
