//! Stat system.
//!
//! ```text
//! [ Stored stats (BaseStats + BonusBreakdown) ]
//!      ↓
//! [ StatResolver: seven ordered layers ]
//!      ↓
//! [ EffectiveStats ]  → CombatantState, display surfaces
//! ```
//!
//! Every layer folds `Flat → %Inc → Round`; only the final values are clamped.

pub mod bonus;
pub mod core;
pub mod resolver;

pub use bonus::{Bonus, BonusStack, StatBounds};
pub use self::core::{BaseStats, BonusBreakdown, StatDelta, StatKind, StatPercent};
pub use resolver::{EffectiveStats, StatBreakdown, StatLayer, StatResolver};
