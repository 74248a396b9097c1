//! Game Engine - the turn state machine.
//!
//! Each turn the driver queues an [`Action`] and calls
//! [`GameEngine::update_game_loop`]:
//! 1. **Resolve**: a dead player or an ending node finishes the game
//! 2. **Act**: at most one pending action is applied, after an undo snapshot
//! 3. **Events**: at most one pending event is processed
//! 4. **Derive**: the game state is recomputed for display
//!
//! The engine never renders or reads input. It is driven by whatever calls it
//! once per logical turn.

mod config;
mod snapshot;

pub use config::*;
pub use snapshot::*;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use wolf_rules::{GameError, Inventory, Player, Result, SessionId};

use crate::events::{EventManager, EventQueue, GameEvent};
use crate::persist::SavedSession;
use crate::story_graph::{Branch, Consequence, Fate, StoryGraph};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameState {
    /// Before `init_game`.
    #[default]
    StartScreen,
    Playing,
    /// An event was resolved this turn.
    EventTriggered,
    GameOver,
    Victory,
}

impl GameState {
    /// GameOver and Victory accept no further turns.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::GameOver | GameState::Victory)
    }
}

/// One of the two choices offered by a story node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    pub fn branch(self) -> Branch {
        match self {
            Choice::A => Branch::Left,
            Choice::B => Branch::Right,
        }
    }
}

/// Something the player asked to do on a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Take a story choice. Passes a day.
    Choose(Choice),
    /// Sleep until fully rested. Passes a day.
    Rest,
    /// Use an inventory item by name. Takes no time.
    UseItem(String),
    /// Let a day go by.
    Wait,
}

/// An action the engine refused, with the reason.
#[derive(Debug)]
pub struct Rejection {
    pub action: Action,
    pub reason: GameError,
}

/// What happened during one call to `update_game_loop`.
#[derive(Debug)]
pub struct TurnReport {
    pub state: GameState,
    pub day: u32,
    pub performed: Option<Action>,
    pub rejected: Option<Rejection>,
    pub event: Option<GameEvent>,
}

impl TurnReport {
    fn new(state: GameState, day: u32) -> Self {
        Self {
            state,
            day,
            performed: None,
            rejected: None,
            event: None,
        }
    }
}

/// The complete session: player, story, events, undo history and day counter.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    session_id: SessionId,
    player: Player,
    story: StoryGraph,
    events: EventManager,
    /// Bottom to top.
    undo_history: Vec<GameSnapshot>,
    pending_actions: VecDeque<Action>,
    current_day: u32,
    state: GameState,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GameEngine {
    /// Create an engine sitting at the start screen.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            session_id: SessionId::new(),
            player: Player::from_config(&config.rules),
            story: StoryGraph::new(),
            events: EventManager::new(config.event_deck.clone()),
            undo_history: Vec::new(),
            pending_actions: VecDeque::new(),
            current_day: 1,
            state: GameState::StartScreen,
            config,
        }
    }

    /// Start a fresh game: new player, story at the opening, day 1.
    pub fn init_game(&mut self) -> Result<()> {
        let mut story = StoryGraph::new();
        story.build_tree()?;

        self.story = story;
        self.player = Player::from_config(&self.config.rules);
        self.events = EventManager::new(self.config.event_deck.clone());
        self.undo_history.clear();
        self.pending_actions.clear();
        self.current_day = 1;
        self.session_id = SessionId::new();
        self.transition(GameState::Playing);

        tracing::info!(session = %self.session_id, "new game started");
        Ok(())
    }

    /// Queue an action for a later turn.
    pub fn queue_action(&mut self, action: Action) {
        self.pending_actions.push_back(action);
    }

    /// Queue a story choice and run a turn.
    pub fn choose<R: Rng + ?Sized>(&mut self, choice: Choice, rng: &mut R) -> TurnReport {
        self.queue_action(Action::Choose(choice));
        self.update_game_loop(rng)
    }

    /// Run one turn. `rng` decides whether and which random events strike.
    pub fn update_game_loop<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TurnReport {
        let mut report = TurnReport::new(self.state, self.current_day);
        if matches!(self.state, GameState::StartScreen) || self.state.is_terminal() {
            return report;
        }

        if let Some(resolved) = self.resolution() {
            self.transition(resolved);
            report.state = self.state;
            return report;
        }

        if let Some(action) = self.pending_actions.pop_front() {
            match self.perform(&action, rng) {
                Ok(()) => report.performed = Some(action),
                Err(reason) => {
                    tracing::warn!(?action, %reason, "action rejected");
                    report.rejected = Some(Rejection { action, reason });
                }
            }
        }

        if self.events.has_pending_events() {
            self.transition(GameState::EventTriggered);
            if let Ok(event) = self.events.process_next_event(&mut self.player) {
                report.event = Some(event);
            }
        } else {
            self.transition(GameState::Playing);
        }

        if let Some(resolved) = self.resolution() {
            self.transition(resolved);
        }

        report.state = self.state;
        report.day = self.current_day;
        report
    }

    /// Push a snapshot of the current day, stats and story position.
    pub fn save_state(&mut self) -> Result<()> {
        let node = self.story.current_id().ok_or(GameError::NotInitialized)?;
        self.undo_history
            .push(GameSnapshot::capture(self.current_day, &self.player, node));
        Ok(())
    }

    /// Rewind to the most recent snapshot.
    ///
    /// Restores day, health, hunger, energy and story position. Inventory,
    /// pack, reputation and queued events stay as they are.
    pub fn undo_last_move(&mut self) -> Result<GameSnapshot> {
        let snapshot = *self.undo_history.last().ok_or(GameError::NoHistory)?;
        self.story.set_current_node(snapshot.current_node_id)?;
        self.undo_history.pop();

        self.current_day = snapshot.day;
        self.player
            .vitals_mut()
            .restore(snapshot.health, snapshot.hunger, snapshot.energy);

        let state = self.resolution().unwrap_or(GameState::Playing);
        self.transition(state);
        tracing::info!(day = snapshot.day, node = %snapshot.current_node_id, "move undone");
        Ok(snapshot)
    }

    /// Snapshot, then apply. A failed action drops its snapshot and changes nothing.
    fn perform<R: Rng + ?Sized>(&mut self, action: &Action, rng: &mut R) -> Result<()> {
        self.save_state()?;
        let result = self.apply(action, rng);
        if result.is_err() {
            self.undo_history.pop();
        }
        result
    }

    fn apply<R: Rng + ?Sized>(&mut self, action: &Action, rng: &mut R) -> Result<()> {
        match action {
            Action::Choose(choice) => {
                let consequence = self.story.move_to(choice.branch())?.consequence().clone();
                self.apply_consequence(consequence);
                self.pass_day(rng);
            }
            Action::Rest => {
                self.pass_day(rng);
                self.player.rest();
            }
            Action::UseItem(name) => {
                let item = self.player.use_item(name)?;
                tracing::debug!(item = item.name(), kind = ?item.kind(), "item used");
            }
            Action::Wait => self.pass_day(rng),
        }
        Ok(())
    }

    fn apply_consequence(&mut self, consequence: Consequence) {
        self.player.update_stats(consequence.stats);

        if let Some(item) = consequence.reward {
            let name = item.name().to_string();
            if let Err(reason) = self.player.inventory_mut().add_item(item) {
                tracing::warn!(item = %name, %reason, "reward dropped");
            }
        }
        if let Some(recruit) = consequence.recruit {
            self.player.recruit_member(recruit.name, recruit.role);
        }
        if let Some(event) = consequence.event {
            self.events.add_event(event);
        }
    }

    fn pass_day<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current_day += 1;
        self.config.rules.upkeep.pass_day(&mut self.player);

        let chance = self.config.event_chance;
        if chance > 0.0 && chance <= 1.0 && rng.gen_bool(chance) {
            self.events.trigger_random_event(rng);
        }
    }

    /// The terminal state the session has reached, if any.
    fn resolution(&self) -> Option<GameState> {
        if !self.player.is_alive() {
            return Some(GameState::GameOver);
        }
        let ending = self.story.get_current_node().ok()?.ending_info()?;
        Some(match ending.fate {
            Fate::Triumph => GameState::Victory,
            Fate::Demise => GameState::GameOver,
        })
    }

    fn transition(&mut self, next: GameState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, day = self.current_day, "state changed");
            self.state = next;
        }
    }

    /// Rebuild a session from a decoded save.
    ///
    /// The story tree is rebuilt from scratch and the saved node ids are looked
    /// up in it. Nothing is returned unless every part checks out.
    pub fn from_saved(saved: SavedSession, config: EngineConfig) -> Result<Self> {
        saved.validate()?;

        let mut story = StoryGraph::new();
        if let Some(id) = saved.current_node_id {
            story.build_tree()?;
            story
                .set_current_node(id)
                .map_err(|_| GameError::CorruptSave(format!("unknown story node {id}")))?;
            if let Some(bad) = saved
                .undo_history
                .iter()
                .find(|s| !story.contains(s.current_node_id))
            {
                return Err(GameError::CorruptSave(format!(
                    "undo history refers to unknown story node {}",
                    bad.current_node_id
                )));
            }
        }

        let inventory = Inventory::from_items(saved.inventory)
            .map_err(|e| GameError::CorruptSave(e.to_string()))?;
        let player = Player::from_parts(
            saved.vitals,
            inventory,
            saved.followers,
            saved.recruit_loyalty,
        );
        let events =
            EventManager::new(config.event_deck.clone()).with_queue(EventQueue::from(saved.events));

        let engine = Self {
            config,
            session_id: saved.session_id,
            player,
            story,
            events,
            undo_history: saved.undo_history,
            pending_actions: saved.pending_actions.into(),
            current_day: saved.day,
            state: saved.state,
        };
        engine.check_saved_state()?;
        Ok(engine)
    }

    /// A saved state must agree with the player and story position it was
    /// saved with: terminal exactly when the session has resolved.
    fn check_saved_state(&self) -> Result<()> {
        if self.state == GameState::StartScreen {
            return Ok(());
        }
        match (self.state.is_terminal(), self.resolution()) {
            (false, None) => Ok(()),
            (true, Some(resolved)) if resolved == self.state => Ok(()),
            (_, resolved) => Err(GameError::CorruptSave(format!(
                "saved state {:?} does not match the session (resolves to {:?})",
                self.state, resolved
            ))),
        }
    }

    /// Encode the whole session as JSON.
    pub fn save_to_string(&self) -> Result<String> {
        SavedSession::capture(self).to_json()
    }

    /// Replace this session with one decoded from JSON.
    ///
    /// On any error the current session is left exactly as it was.
    pub fn load_from_str(&mut self, json: &str) -> Result<()> {
        self.restore(SavedSession::from_json(json)?)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        SavedSession::capture(self).write_to(path.as_ref())?;
        tracing::info!(session = %self.session_id, path = %path.as_ref().display(), "session saved");
        Ok(())
    }

    /// Load a save file. A missing file is `Io`; anything wrong with its
    /// contents is `CorruptSave`.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.restore(SavedSession::read_from(path.as_ref())?)
    }

    fn restore(&mut self, saved: SavedSession) -> Result<()> {
        let restored = Self::from_saved(saved, self.config.clone())?;
        *self = restored;
        tracing::info!(session = %self.session_id, day = self.current_day, "session loaded");
        Ok(())
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn story(&self) -> &StoryGraph {
        &self.story
    }

    pub fn events(&self) -> &EventManager {
        &self.events
    }

    pub fn day(&self) -> u32 {
        self.current_day
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Snapshots from oldest to newest.
    pub fn undo_history(&self) -> &[GameSnapshot] {
        &self.undo_history
    }

    pub fn pending_actions(&self) -> impl Iterator<Item = &Action> {
        self.pending_actions.iter()
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
