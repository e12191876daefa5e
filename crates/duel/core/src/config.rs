use crate::error::{DuelError, ErrorSeverity};

/// Match configuration and compile-time capacities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DuelConfig {
    /// Number of full turns played before the cap rule decides the winner.
    pub max_turns: u32,

    /// Winner selection when nobody falls before `max_turns`.
    pub turn_cap_rule: TurnCapRule,

    /// Game mode the match is played in. Only changes the intro banner.
    pub mode: EncounterMode,
}

impl DuelConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of special abilities a boss kit may carry.
    pub const MAX_BOSS_ABILITIES: usize = 4;
    /// Upper bound on hits in a single archer volley.
    pub const MAX_VOLLEY_HITS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 30;
    /// Largest `max_turns` a match accepts.
    pub const MAX_TURNS_CEILING: u32 = 100;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            turn_cap_rule: TurnCapRule::FirstListed,
            mode: EncounterMode::Arena,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_turn_cap_rule(mut self, rule: TurnCapRule) -> Self {
        self.turn_cap_rule = rule;
        self
    }

    pub fn with_mode(mut self, mode: EncounterMode) -> Self {
        self.mode = mode;
        self
    }

    /// # Errors
    ///
    /// [`ConfigError::MaxTurnsOutOfRange`] unless `1 <= max_turns <= MAX_TURNS_CEILING`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (1..=Self::MAX_TURNS_CEILING).contains(&self.max_turns) {
            Ok(())
        } else {
            Err(ConfigError::MaxTurnsOutOfRange {
                value: self.max_turns,
                ceiling: Self::MAX_TURNS_CEILING,
            })
        }
    }
}

/// Configuration a match refuses to start with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("max_turns must lie in 1..={ceiling}, got {value}")]
    MaxTurnsOutOfRange { value: u32, ceiling: u32 },
}

impl DuelError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MaxTurnsOutOfRange { .. } => "CONFIG_MAX_TURNS",
        }
    }
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How a match that reaches the turn cap is decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnCapRule {
    /// P1 wins. Matches the historical arena behaviour bit for bit.
    #[default]
    FirstListed,
    /// Highest remaining HP fraction wins, P1 on an exact tie.
    HigherHpRatio,
}

/// Game mode a match is resolved for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EncounterMode {
    #[default]
    #[strum(to_string = "Arène")]
    Arena,
    #[strum(to_string = "Donjon")]
    Dungeon,
    #[strum(to_string = "Forêt")]
    Forest,
    #[strum(to_string = "Labyrinthe")]
    Labyrinth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_turns_must_be_positive_and_bounded() {
        assert_eq!(DuelConfig::default().validate(), Ok(()));
        assert_eq!(
            DuelConfig::new().with_max_turns(DuelConfig::MAX_TURNS_CEILING).validate(),
            Ok(())
        );

        let zero = DuelConfig::new().with_max_turns(0).validate().expect_err("zero turns");
        assert_eq!(zero, ConfigError::MaxTurnsOutOfRange { value: 0, ceiling: 100 });
        assert_eq!(zero.error_code(), "CONFIG_MAX_TURNS");

        assert!(DuelConfig::new().with_max_turns(u32::MAX).validate().is_err());
    }
}
