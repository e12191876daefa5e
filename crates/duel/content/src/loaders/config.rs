//! Match configuration loader.

use std::path::Path;

use anyhow::Context;
use duel_core::DuelConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for match configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`DuelConfig::default`] value. A turn cap the
    /// engine would refuse is rejected here.
    pub fn load(path: &Path) -> LoadResult<DuelConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<DuelConfig> {
        let config: DuelConfig = toml::from_str(content)?;
        config.validate()?;
        tracing::debug!(
            max_turns = config.max_turns,
            rule = ?config.turn_cap_rule,
            mode = %config.mode,
            "loaded match config"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{EncounterMode, TurnCapRule};

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("max_turns = 12\n").expect("valid toml");
        assert_eq!(config.max_turns, 12);
        assert_eq!(config.turn_cap_rule, TurnCapRule::FirstListed);
        assert_eq!(config.mode, EncounterMode::Arena);
    }

    #[test]
    fn parses_rule_and_mode() {
        let config = ConfigLoader::parse(
            "turn_cap_rule = \"higher_hp_ratio\"\nmode = \"labyrinth\"\n",
        )
        .expect("valid toml");
        assert_eq!(config.turn_cap_rule, TurnCapRule::HigherHpRatio);
        assert_eq!(config.mode, EncounterMode::Labyrinth);
    }

    #[test]
    fn out_of_range_turn_cap_is_an_error() {
        let error = ConfigLoader::parse("max_turns = 0\n").expect_err("zero turns");
        assert!(error.to_string().contains("max_turns must lie in 1..=100"));
        assert!(ConfigLoader::parse("max_turns = 5000\n").is_err());
    }

    #[test]
    fn unknown_rule_is_an_error() {
        assert!(ConfigLoader::parse("turn_cap_rule = \"coin_flip\"\n").is_err());
    }
}
