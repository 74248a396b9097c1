//! Priority queue of pending events with first-in-first-out tie-breaking.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::GameEvent;

/// An event plus the sequence number it was queued with.
#[derive(Debug, Clone)]
struct QueuedEvent {
    seq: u64,
    event: GameEvent,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap is a max-heap: the "greatest" entry is the lowest priority number,
// and among equal priorities the earliest sequence number.
impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .event
            .priority
            .cmp(&self.event.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority multiset of events.
///
/// Serialized as a plain list in service order, so reloading a queue keeps
/// the relative order of equal-priority events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<GameEvent>", into = "Vec<GameEvent>")]
pub struct EventQueue {
    heap: BinaryHeap<QueuedEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueuedEvent { seq, event });
    }

    /// The most urgent event, if any.
    pub fn peek(&self) -> Option<&GameEvent> {
        self.heap.peek().map(|queued| &queued.event)
    }

    /// Remove and return the most urgent event.
    pub fn pop(&mut self) -> Option<GameEvent> {
        self.heap.pop().map(|queued| queued.event)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// All queued events in the order they will be served.
    pub fn to_ordered_vec(&self) -> Vec<GameEvent> {
        let mut entries: Vec<&QueuedEvent> = self.heap.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|q| q.event.clone()).collect()
    }
}

impl From<Vec<GameEvent>> for EventQueue {
    fn from(events: Vec<GameEvent>) -> Self {
        let mut queue = EventQueue::new();
        for event in events {
            queue.push(event);
        }
        queue
    }
}

impl From<EventQueue> for Vec<GameEvent> {
    fn from(queue: EventQueue) -> Self {
        queue.to_ordered_vec()
    }
}
