//! Caller contract checks run before the first turn.

use super::{Archetype, BossAbility, Combatant, WeaponPassive};
use crate::error::{DuelError, ErrorSeverity};
use crate::stats::{StatKind, StatResolver};

/// Reasons a combatant is refused before a match starts.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("combatant name is empty")]
    EmptyName,

    #[error("combatant has no hit points")]
    ZeroHp,

    /// `base − bonuses.race − bonuses.class` went below zero.
    #[error("base roll for {stat} is negative ({value})")]
    NegativeRoll { stat: StatKind, value: i64 },

    #[error("unknown weapon '{0}'")]
    UnknownWeapon(String),

    #[error("unknown passive '{0}'")]
    UnknownPassive(String),

    #[error("passive '{id}' has no level {level} (max {max})")]
    PassiveLevelOutOfRange { id: String, level: u8, max: u8 },

    #[error("boss ability {0} has a zero interval")]
    ZeroInterval(String),

    #[error("crit multiplier must be positive, got {0}")]
    InvalidCritMultiplier(f64),

    #[error("chance must lie in [0, 1], got {0}")]
    InvalidChance(f64),

    #[error("ratio must be finite and non-negative, got {0}")]
    InvalidRatio(f64),
}

impl DuelError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "VALIDATION_EMPTY_NAME",
            Self::ZeroHp => "VALIDATION_ZERO_HP",
            Self::NegativeRoll { .. } => "VALIDATION_NEGATIVE_ROLL",
            Self::UnknownWeapon(_) => "VALIDATION_UNKNOWN_WEAPON",
            Self::UnknownPassive(_) => "VALIDATION_UNKNOWN_PASSIVE",
            Self::PassiveLevelOutOfRange { .. } => "VALIDATION_PASSIVE_LEVEL",
            Self::ZeroInterval(_) => "VALIDATION_ZERO_INTERVAL",
            Self::InvalidCritMultiplier(_) => "VALIDATION_CRIT_MULTIPLIER",
            Self::InvalidChance(_) => "VALIDATION_CHANCE",
            Self::InvalidRatio(_) => "VALIDATION_RATIO",
        }
    }
}

fn check_chance(value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidChance(value))
    }
}

fn check_ratio(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidRatio(value))
    }
}

impl Combatant {
    /// Checks everything the engine assumes about its input.
    ///
    /// # Errors
    ///
    /// Returns the first violated contract.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.base.hp == 0 {
            return Err(ValidationError::ZeroHp);
        }
        StatResolver::base_roll(self)?;

        if let Some(weapon) = &self.weapon {
            if !(weapon.crit_multiplier.is_finite() && weapon.crit_multiplier > 0.0) {
                return Err(ValidationError::InvalidCritMultiplier(weapon.crit_multiplier));
            }
            if let Some(WeaponPassive::Stun { chance, .. }) = weapon.passive {
                check_chance(chance)?;
            }
        }

        if let Some(passive) = &self.passive {
            check_ratio(passive.magnitude)?;
        }

        if let Archetype::Boss(kit) = &self.archetype {
            for ability in kit.abilities() {
                if ability.interval() == Some(0) {
                    return Err(ValidationError::ZeroInterval(ability.label().to_string()));
                }
                match *ability {
                    BossAbility::Nuke { cap_ratio, .. } => check_ratio(cap_ratio)?,
                    BossAbility::Regeneration { fraction, .. } => check_chance(fraction)?,
                    BossAbility::Enrage {
                        threshold,
                        damage_bonus,
                    } => {
                        check_chance(threshold)?;
                        check_ratio(damage_bonus)?;
                    }
                    BossAbility::Blight { anti_heal } => check_chance(anti_heal)?,
                    BossAbility::Crush { .. } | BossAbility::Venom { .. } => {}
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{BossKit, Class, Race, Weapon};
    use crate::stats::{BaseStats, BonusBreakdown, StatDelta};

    fn hero() -> Combatant {
        Combatant::hero(
            "Brune",
            Race::Nain,
            Class::Guerrier,
            BaseStats::new(120, 20, 15, 5, 10, 8),
        )
    }

    #[test]
    fn accepts_plain_hero() {
        assert_eq!(hero().validate(), Ok(()));
    }

    #[test]
    fn rejects_blank_name() {
        let mut combatant = hero();
        combatant.name = "   ".into();
        assert_eq!(
            combatant.validate(),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn rejects_negative_roll() {
        let combatant = hero().with_bonuses(BonusBreakdown {
            race: StatDelta::new(0, 0, 0, 0, 0, 5),
            class: StatDelta::new(0, 0, 0, 0, 0, 5),
        });
        assert_eq!(
            combatant.validate(),
            Err(ValidationError::NegativeRoll {
                stat: StatKind::Spd,
                value: -2,
            })
        );
    }

    #[test]
    fn rejects_non_positive_crit_multiplier() {
        let combatant =
            hero().with_weapon(Weapon::new("x", "X", StatDelta::ZERO).with_crit_multiplier(0.0));
        assert_eq!(
            combatant.validate(),
            Err(ValidationError::InvalidCritMultiplier(0.0))
        );
    }

    #[test]
    fn rejects_zero_interval_boss_ability() {
        let kit = BossKit::from_slice(&[BossAbility::Nuke {
            interval: 0,
            cap_ratio: 1.0,
        }])
        .expect("fits");
        let boss = Combatant::boss("Gardien", kit, BaseStats::new(300, 25, 10, 20, 10, 5));
        assert_eq!(
            boss.validate(),
            Err(ValidationError::ZeroInterval("Cataclysme".to_string()))
        );
    }

    #[test]
    fn rejects_out_of_range_stun_chance() {
        let weapon = Weapon::new("masse", "Masse", StatDelta::ZERO)
            .with_passive(WeaponPassive::Stun { chance: 1.5, turns: 1 });
        assert_eq!(
            hero().with_weapon(weapon).validate(),
            Err(ValidationError::InvalidChance(1.5))
        );
    }
}
