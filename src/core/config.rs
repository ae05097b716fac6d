//! Game configuration.
//!
//! A `GameConfig` names the players, seeds the dice and carries the score
//! table. It can be built in code or loaded from YAML:
//!
//! ```yaml
//! players: ["Ada", "Grace"]
//! seed: 7
//! scoring:
//!   yahtzee: 100
//! ```
//!
//! Every field has a default, so an empty document is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::scoring::ScoreTable;

/// Most seats a game accepts.
pub const MAX_PLAYERS: usize = 8;

/// Largest fixed award a loaded score table may carry.
pub const MAX_AWARD: u32 = 10_000;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player names in seat order.
    pub players: Vec<String>,
    /// Seed for the default dice stream.
    pub seed: u64,
    /// Fixed awards for the scoring rules.
    pub scoring: ScoreTable,
}

/// `"Player 1"`, `"Player 2"`, ...
#[must_use]
pub fn default_player_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Player {i}")).collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: default_player_names(2),
            seed: 42,
            scoring: ScoreTable::STANDARD,
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check player names and the score table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_player_names(&self.players).map_err(ConfigError::Invalid)?;

        let table = &self.scoring;
        let awards = [
            ("full_house", table.full_house),
            ("small_straight", table.small_straight),
            ("large_straight", table.large_straight),
            ("yahtzee", table.yahtzee),
            ("upper_bonus", table.upper_bonus),
        ];
        for (field, award) in awards {
            if award > MAX_AWARD {
                return Err(ConfigError::Invalid(format!(
                    "scoring.{field} ({award}) exceeds {MAX_AWARD}"
                )));
            }
        }
        if table.upper_bonus_threshold == 0 {
            return Err(ConfigError::Invalid(
                "scoring.upper_bonus_threshold must be positive".to_string(),
            ));
        }
        if table.small_straight > table.large_straight {
            return Err(ConfigError::Invalid(format!(
                "scoring.small_straight ({}) exceeds scoring.large_straight ({})",
                table.small_straight, table.large_straight
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_players<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.players = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoreTable) -> Self {
        self.scoring = scoring;
        self
    }
}

/// Names must be non-blank, unique, and between 1 and [`MAX_PLAYERS`].
pub fn validate_player_names(names: &[String]) -> Result<(), String> {
    if names.is_empty() {
        return Err("at least one player is required".to_string());
    }
    if names.len() > MAX_PLAYERS {
        return Err(format!(
            "{} players given, at most {MAX_PLAYERS} supported",
            names.len()
        ));
    }
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(format!("player {i} has a blank name"));
        }
        if names[..i].contains(name) {
            return Err(format!("duplicate player name {name:?}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.players, vec!["Player 1", "Player 2"]);
        assert_eq!(config.scoring, ScoreTable::STANDARD);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = GameConfig::from_yaml("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_parse_yaml_string() {
        let yaml = r#"
players: ["Ada", "Grace"]
seed: 7
scoring:
  yahtzee: 100
"#;

        let config = GameConfig::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.players, vec!["Ada", "Grace"]);
        assert_eq!(config.seed, 7);
        assert_eq!(config.scoring.yahtzee, 100);
        // Check defaults are applied
        assert_eq!(config.scoring.full_house, 25);
        assert_eq!(config.scoring.upper_bonus, 35);
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let result = GameConfig::from_yaml("this is not: valid: yaml: {{{}}}");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = GameConfig::from_yaml("players: [Ada, Ada]");
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_player_name_validation() {
        assert!(validate_player_names(&[]).is_err());
        assert!(validate_player_names(&["  ".to_string()]).is_err());
        assert!(validate_player_names(&default_player_names(MAX_PLAYERS)).is_ok());
        assert!(validate_player_names(&default_player_names(MAX_PLAYERS + 1)).is_err());
    }

    #[test]
    fn test_bad_score_table_rejected() {
        let config = GameConfig::default().with_scoring(ScoreTable {
            small_straight: 50,
            ..ScoreTable::STANDARD
        });
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_award_rejected() {
        let result = GameConfig::from_yaml("scoring: {yahtzee: 4294967295}");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(msg)) if msg.contains("scoring.yahtzee")
        ));

        let config = GameConfig::default().with_scoring(ScoreTable {
            upper_bonus: MAX_AWARD + 1,
            ..ScoreTable::STANDARD
        });
        assert!(config.validate().is_err());

        let at_cap = ScoreTable::STANDARD.with_yahtzee(MAX_AWARD);
        assert!(GameConfig::default().with_scoring(at_cap).validate().is_ok());
    }

    #[test]
    fn test_builder_and_yaml_roundtrip() {
        let config = GameConfig::default()
            .with_players(["North", "South"])
            .with_seed(99)
            .with_scoring(ScoreTable::STANDARD.with_yahtzee(100));

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let result = GameConfig::load("/nonexistent/yahtzee.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
