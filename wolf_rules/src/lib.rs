//! # Wolf Rules
//!
//! The rules crate for Lone Wolf: items, the bounded inventory, pack followers,
//! the player's vital stats and the cost of each passing day.
//! Holds no story or turn logic; `wolf_story` drives everything here.

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod world_state;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use world_state::*;
