//! Session persistence for save/load.
//!
//! A save holds everything needed to resume play except the story tree
//! itself: the tree is rebuilt on load and only the player's position in it
//! (and the positions in the undo history) is stored.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use wolf_rules::{Follower, GameError, Item, Result, SessionId, Vitals, MAX_ITEMS};

use crate::engine::{Action, GameEngine, GameSnapshot, GameState};
use crate::events::GameEvent;
use crate::story_graph::NodeId;

/// Current save file version.
pub const SAVE_VERSION: u32 = 1;

/// A saved session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    /// Save format version for compatibility checking.
    pub version: u32,
    pub session_id: SessionId,
    pub day: u32,
    pub state: GameState,
    pub vitals: Vitals,
    pub recruit_loyalty: i32,

    /// Inventory in slot order.
    pub inventory: Vec<Item>,
    pub followers: Vec<Follower>,

    /// None only for a session still on the start screen.
    pub current_node_id: Option<NodeId>,

    /// Pending events in the order they will be served.
    pub events: Vec<GameEvent>,
    pub pending_actions: Vec<Action>,

    /// Undo snapshots, oldest first.
    pub undo_history: Vec<GameSnapshot>,
}

impl SavedSession {
    /// Capture the full state of an engine.
    pub fn capture(engine: &GameEngine) -> Self {
        let player = engine.player();
        Self {
            version: SAVE_VERSION,
            session_id: engine.session_id(),
            day: engine.day(),
            state: engine.state(),
            vitals: *player.vitals(),
            recruit_loyalty: player.recruit_loyalty(),
            inventory: player.inventory().items().to_vec(),
            followers: player.followers().to_vec(),
            current_node_id: engine.story().current_id(),
            events: engine.events().pending(),
            pending_actions: engine.pending_actions().cloned().collect(),
            undo_history: engine.undo_history().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GameError::CorruptSave(format!("could not encode session: {e}")))
    }

    /// Decode and validate a save. Any problem is reported as `CorruptSave`.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_slice(json.as_bytes())
    }

    /// Like [`SavedSession::from_json`], for raw file contents. Bytes that are
    /// not UTF-8 are a corrupt save, not an I/O failure.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let saved: Self =
            serde_json::from_slice(bytes).map_err(|e| GameError::CorruptSave(e.to_string()))?;
        saved.validate()?;
        Ok(saved)
    }

    /// Check everything that can be checked without the story tree.
    pub fn validate(&self) -> Result<()> {
        if self.version != SAVE_VERSION {
            return Err(corrupt(format!(
                "version mismatch: expected {SAVE_VERSION}, found {}",
                self.version
            )));
        }
        if self.day < 1 {
            return Err(corrupt("day must be at least 1"));
        }
        if !self.vitals.in_bounds() {
            return Err(corrupt("player stats out of range"));
        }
        if self.inventory.len() > MAX_ITEMS {
            return Err(corrupt(format!(
                "{} items exceed the inventory capacity of {MAX_ITEMS}",
                self.inventory.len()
            )));
        }
        if let Some(index) = self.undo_history.iter().position(|s| !s.is_plausible()) {
            return Err(corrupt(format!("undo snapshot {index} is out of range")));
        }

        match self.current_node_id {
            None if self.state != GameState::StartScreen => {
                Err(corrupt("a game in progress has no story position"))
            }
            None if !self.undo_history.is_empty() => {
                Err(corrupt("undo history without a story position"))
            }
            Some(_) if self.state == GameState::StartScreen => {
                Err(corrupt("start screen session has a story position"))
            }
            _ => Ok(()),
        }
    }

    /// Write the save to `path`, replacing any existing file only once the
    /// new contents are fully on disk.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Dropped (and deleted) on any failure before the rename.
        let mut staging = tempfile::NamedTempFile::new_in(dir)?;
        staging.write_all(json.as_bytes())?;
        staging.as_file().sync_all()?;
        staging.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Read and validate a save file. A missing or unreadable file is `Io`.
    pub fn read_from(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }
}

fn corrupt(reason: impl Into<String>) -> GameError {
    GameError::CorruptSave(reason.into())
}
