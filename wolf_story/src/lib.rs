//! # Wolf Story
//!
//! The turn-based core of Lone Wolf. Builds on `wolf_rules` and adds the
//! branching story, random events, the turn state machine, undo and save files.
//!
//! ## Core Components
//!
//! - **story_graph**: the narrative as a binary decision tree with a cursor
//! - **events**: a priority queue of pending events and the deck they are drawn from
//! - **engine**: the per-turn state machine and undo history
//! - **persist**: JSON save files
//!
//! ## Design Philosophy
//!
//! - **Driven, not driving**: the engine runs one turn per call and never renders or reads input
//! - **All or nothing**: rejected moves and failed loads leave the session untouched

pub mod engine;
pub mod events;
pub mod persist;
pub mod story_graph;

pub use engine::*;
pub use events::*;
pub use persist::*;
pub use story_graph::*;
