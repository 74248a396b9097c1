//! Story graph: the branching narrative as a binary decision tree.
//!
//! - **Nodes**: scenarios with two choices and an optional ending
//! - **Graph**: an arena of nodes addressed by id, plus the player's position
//! - **Saga**: the fixed tree every game is played on

mod graph;
mod node;
mod saga;

pub use graph::*;
pub use node::*;
