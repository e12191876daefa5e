//! Shared error vocabulary for duel-core.
//!
//! Concrete errors live next to the stage that raises them:
//! [`ValidationError`](crate::combatant::ValidationError) for input checks and
//! [`MatchError`](crate::engine::MatchError) at the engine boundary.

/// Who has to act on an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller sent a combatant that breaks the input contract. Resubmitting
    /// the same data fails the same way.
    Validation,

    /// Inconsistent content or engine state. Points at a bug rather than at
    /// the caller.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Implemented by every duel-core error enum.
pub trait DuelError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and front ends.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
