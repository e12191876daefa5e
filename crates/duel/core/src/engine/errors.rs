//! Error types for match resolution.

use crate::combatant::ValidationError;
use crate::config::ConfigError;
use crate::error::{DuelError, ErrorSeverity};
use crate::replay::Side;

/// Errors surfaced before a match starts. Once the turn loop runs, resolution
/// cannot fail.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchError {
    #[error("{side} rejected: {source}")]
    Invalid {
        side: Side,
        #[source]
        source: ValidationError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl MatchError {
    pub fn invalid(side: Side, source: ValidationError) -> Self {
        Self::Invalid { side, source }
    }

    /// Side whose input was refused, if the error concerns one.
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Invalid { side, .. } => Some(*side),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl DuelError for MatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invalid { source, .. } => source.severity(),
            Self::InvalidConfig(source) => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { source, .. } => source.error_code(),
            Self::InvalidConfig(source) => source.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_names_the_side_and_keeps_the_source_code() {
        let error = MatchError::invalid(Side::P2, ValidationError::EmptyName);
        assert_eq!(error.to_string(), "P2 rejected: combatant name is empty");
        assert_eq!(error.side(), Some(Side::P2));
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert_eq!(error.error_code(), "VALIDATION_EMPTY_NAME");
    }

    #[test]
    fn config_errors_have_no_side() {
        let error = MatchError::from(ConfigError::MaxTurnsOutOfRange { value: 0, ceiling: 100 });
        assert_eq!(error.side(), None);
        assert_eq!(error.error_code(), "CONFIG_MAX_TURNS");
        assert_eq!(
            error.to_string(),
            "invalid configuration: max_turns must lie in 1..=100, got 0"
        );
    }
}
