//! Engine configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use wolf_rules::{GameError, Result, RulesConfig};

use crate::events::{default_event_deck, GameEvent};

/// Everything a new game needs besides the story itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: RulesConfig,

    /// Chance (0.0-1.0) that a random event is drawn after each passing day.
    pub event_chance: f64,

    /// Events random draws are taken from.
    pub event_deck: Vec<GameEvent>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            event_chance: 0.25,
            event_deck: default_event_deck(),
        }
    }
}

impl EngineConfig {
    /// A configuration where no random events are ever drawn.
    pub fn quiet() -> Self {
        Self {
            event_chance: 0.0,
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(GameError::Config(format!(
                "event_chance must be within 0.0..=1.0, got {}",
                self.event_chance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.event_deck.is_empty());
    }

    #[test]
    fn test_toml_with_custom_deck() {
        let config = EngineConfig::from_toml_str(
            r#"
            event_chance = 0.5

            [rules]
            recruit_loyalty = 65

            [[event_deck]]
            title = "Rockslide"
            description = "Stones thunder down the slope."
            priority = 1

            [event_deck.effect]
            health = -12

            [[event_deck]]
            title = "Quiet Day"
            priority = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.event_chance, 0.5);
        assert_eq!(config.rules.recruit_loyalty, 65);
        assert_eq!(config.event_deck.len(), 2);
        assert_eq!(config.event_deck[0].effect.health, -12);
        assert!(config.event_deck[1].effect.is_zero());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_rejects_bad_chance() {
        assert!(matches!(
            EngineConfig::from_toml_str("event_chance = 1.5"),
            Err(GameError::Config(_))
        ));
    }
}
