//! Game configuration.
//!
//! The shell supplies three values when a new game starts:
//! - `num_sections`: logical board sections (each splits into 3 subsections)
//! - `card_numbers`: movement magnitudes printed on cards
//! - `num_cards_per_character`: copies of each (character, number) card
//!
//! Configuration can be built in code, loaded from TOML, or assembled from
//! the comma-separated text the configuration screen accepts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::{GameError, Result};
use crate::board::MAX_SECTIONS;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of logical sections on the track (must be > 0).
    pub num_sections: usize,

    /// Card numbers, kept sorted ascending.
    pub card_numbers: BTreeSet<u32>,

    /// Copies of each non-pirate (character, number) card (must be > 0).
    pub num_cards_per_character: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_sections: 8,
            card_numbers: BTreeSet::from([1, 2, 3]),
            num_cards_per_character: 4,
        }
    }
}

impl GameConfig {
    /// Create a configuration from explicit values.
    ///
    /// Values are not validated until [`GameConfig::validate`] runs.
    pub fn new(
        num_sections: usize,
        card_numbers: impl IntoIterator<Item = u32>,
        num_cards_per_character: usize,
    ) -> Self {
        Self {
            num_sections,
            card_numbers: card_numbers.into_iter().collect(),
            num_cards_per_character,
        }
    }

    /// Set the number of sections.
    #[must_use]
    pub fn with_num_sections(mut self, num_sections: usize) -> Self {
        self.num_sections = num_sections;
        self
    }

    /// Replace the card numbers.
    #[must_use]
    pub fn with_card_numbers(mut self, numbers: impl IntoIterator<Item = u32>) -> Self {
        self.card_numbers = numbers.into_iter().collect();
        self
    }

    /// Set the copies per character.
    #[must_use]
    pub fn with_cards_per_character(mut self, count: usize) -> Self {
        self.num_cards_per_character = count;
        self
    }

    /// Check every value, failing fast on the first bad one.
    pub fn validate(&self) -> Result<()> {
        if self.num_sections == 0 {
            return Err(GameError::config("number of sections must be positive"));
        }
        if self.num_sections > MAX_SECTIONS {
            return Err(GameError::config(format!(
                "number of sections must be at most {MAX_SECTIONS}"
            )));
        }
        validate_card_numbers(&self.card_numbers)?;
        if self.num_cards_per_character == 0 {
            return Err(GameError::config(
                "number of cards per character must be positive",
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from TOML text.
    ///
    /// Missing keys keep their defaults.
    ///
    /// ```
    /// use fiery_dragons::GameConfig;
    ///
    /// let config = GameConfig::from_toml_str("num_sections = 4\ncard_numbers = [1, 3]").unwrap();
    /// assert_eq!(config.num_sections, 4);
    /// assert_eq!(config.num_cards_per_character, 4);
    /// ```
    #[instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig =
            toml::from_str(text).map_err(|e| GameError::config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the comma-separated card number list, e.g. `"1, 2,3"`.
    ///
    /// Blank entries are skipped.
    pub fn parse_card_numbers(text: &str) -> Result<BTreeSet<u32>> {
        let numbers = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| GameError::config(format!("'{s}' is not a card number")))
            })
            .collect::<Result<BTreeSet<u32>>>()?;
        validate_card_numbers(&numbers)?;
        Ok(numbers)
    }
}

/// Card numbers must be non-empty and positive.
pub(crate) fn validate_card_numbers(numbers: &BTreeSet<u32>) -> Result<()> {
    if numbers.is_empty() {
        return Err(GameError::config("at least one card number is required"));
    }
    if numbers.contains(&0) {
        return Err(GameError::config("card numbers must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.num_sections, 8);
        assert_eq!(config.card_numbers, BTreeSet::from([1, 2, 3]));
        assert_eq!(config.num_cards_per_character, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_num_sections(5)
            .with_card_numbers([3, 1])
            .with_cards_per_character(2);

        assert_eq!(config.num_sections, 5);
        assert_eq!(config.card_numbers.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(config.num_cards_per_character, 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            GameConfig::default().with_num_sections(0).validate(),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::default().with_num_sections(MAX_SECTIONS + 1).validate(),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(GameConfig::default().with_num_sections(MAX_SECTIONS).validate().is_ok());
        assert!(matches!(
            GameConfig::default().with_card_numbers(Vec::<u32>::new()).validate(),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::default().with_card_numbers([0, 1]).validate(),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::default().with_cards_per_character(0).validate(),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_toml() {
        let config = GameConfig::from_toml_str(
            "num_sections = 6\ncard_numbers = [2, 1, 4]\nnum_cards_per_character = 3\n",
        )
        .unwrap();

        assert_eq!(config, GameConfig::new(6, [1, 2, 4], 3));
    }

    #[test]
    fn test_from_toml_empty_uses_defaults() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(matches!(
            GameConfig::from_toml_str("num_sections = 0"),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::from_toml_str("num_sections = -3"),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::from_toml_str("num_sections = \"eight\""),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_parse_card_numbers() {
        assert_eq!(
            GameConfig::parse_card_numbers("1, 2,3").unwrap(),
            BTreeSet::from([1, 2, 3])
        );
        assert_eq!(
            GameConfig::parse_card_numbers("3,,1, ").unwrap(),
            BTreeSet::from([1, 3])
        );
        assert!(GameConfig::parse_card_numbers("").is_err());
        assert!(GameConfig::parse_card_numbers("1,x").is_err());
        assert!(GameConfig::parse_card_numbers("0,1").is_err());
        assert!(GameConfig::parse_card_numbers("-1").is_err());
    }
}
