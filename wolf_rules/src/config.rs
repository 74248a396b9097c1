//! Rules configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::entities::{Vitals, DEFAULT_RECRUIT_LOYALTY};
use crate::error::{GameError, Result};
use crate::world_state::DailyUpkeep;

/// Tunable numbers for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_vitals: Vitals,
    pub recruit_loyalty: i32,
    pub upkeep: DailyUpkeep,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_vitals: Vitals::default(),
            recruit_loyalty: DEFAULT_RECRUIT_LOYALTY,
            upkeep: DailyUpkeep::default(),
        }
    }
}

impl RulesConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject values the rules cannot start a game with.
    pub fn validate(&self) -> Result<()> {
        if !self.starting_vitals.in_bounds() {
            return Err(GameError::Config(
                "starting vitals must be within 0..=100".to_string(),
            ));
        }
        if !self.starting_vitals.is_alive() {
            return Err(GameError::Config(
                "starting health must be above zero".to_string(),
            ));
        }
        let upkeep = &self.upkeep;
        if upkeep.starvation_damage < 0 || upkeep.exhaustion_damage < 0 {
            return Err(GameError::Config(
                "upkeep damage cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RulesConfig::default();
        assert_eq!(config.starting_vitals.health(), 100);
        assert_eq!(config.starting_vitals.hunger(), 50);
        assert_eq!(config.recruit_loyalty, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = RulesConfig::from_toml_str(
            r#"
            recruit_loyalty = 70

            [upkeep]
            hunger_per_day = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.recruit_loyalty, 70);
        assert_eq!(config.upkeep.hunger_per_day, 8);
        assert_eq!(config.upkeep.energy_per_day, 10);
        assert_eq!(config.starting_vitals, Vitals::default());
    }

    #[test]
    fn test_starting_vitals_from_toml() {
        let config = RulesConfig::from_toml_str(
            r#"
            [starting_vitals]
            health = 80
            hunger = 20
            energy = 60
            reputation = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.starting_vitals, Vitals::new(80, 20, 60, 10));
    }

    #[test]
    fn test_rejects_out_of_range_vitals() {
        let err = RulesConfig::from_toml_str(
            r#"
            [starting_vitals]
            health = 180
            hunger = 20
            energy = 60
            reputation = 10
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            RulesConfig::from_toml_str("recruit_loyalty = \"many\""),
            Err(GameError::Config(_))
        ));
    }
}
