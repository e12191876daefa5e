use super::{Archetype, Combatant, ValidationError};
use crate::env::CatalogOracle;
use crate::stats::{BaseStats, BonusBreakdown, StatDelta};

/// Mage tower passive reference: catalog id and chosen level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveRef {
    pub id: String,
    pub level: u8,
}

/// Caller-facing combatant: weapon and passive are referenced by id.
///
/// This is the shape stored characters arrive in. [`Combatant::from_record`]
/// resolves it against a catalog before a match starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRecord {
    pub name: String,
    pub archetype: Archetype,
    #[cfg_attr(feature = "serde", serde(default = "Combatant::default_level"))]
    pub level: u32,
    pub base: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: BonusBreakdown,
    #[cfg_attr(feature = "serde", serde(default))]
    pub training: StatDelta,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveRef>,
}

impl Combatant {
    /// Resolves every id in `record` into plain data.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWeapon`/`UnknownPassive` for ids missing from the
    /// catalog and `PassiveLevelOutOfRange` for a level the passive does not
    /// have.
    pub fn from_record(
        record: &CombatantRecord,
        catalog: &(impl CatalogOracle + ?Sized),
    ) -> Result<Self, ValidationError> {
        let weapon = record
            .weapon
            .as_deref()
            .map(|id| {
                catalog
                    .weapon(id)
                    .ok_or_else(|| ValidationError::UnknownWeapon(id.to_string()))
            })
            .transpose()?;

        let passive = record
            .passive
            .as_ref()
            .map(|reference| {
                let definition = catalog
                    .passive(&reference.id)
                    .ok_or_else(|| ValidationError::UnknownPassive(reference.id.clone()))?;
                definition
                    .at_level(reference.level)
                    .ok_or(ValidationError::PassiveLevelOutOfRange {
                        id: reference.id.clone(),
                        level: reference.level,
                        max: definition.max_level,
                    })
            })
            .transpose()?;

        Ok(Self {
            name: record.name.clone(),
            archetype: record.archetype.clone(),
            level: record.level,
            base: record.base,
            bonuses: record.bonuses,
            training: record.training,
            weapon,
            passive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{Class, PassiveKind, Race, Weapon};
    use crate::env::PassiveDefinition;

    struct TestCatalog;

    impl CatalogOracle for TestCatalog {
        fn weapon(&self, id: &str) -> Option<Weapon> {
            (id == "dague").then(|| Weapon::new("dague", "Dague", StatDelta::new(0, 3, 0, 0, 0, 2)))
        }

        fn passive(&self, id: &str) -> Option<PassiveDefinition> {
            (id == "focus").then(|| {
                PassiveDefinition::new("focus", "Concentration", PassiveKind::Focus, 0.02, 5)
            })
        }
    }

    fn record() -> CombatantRecord {
        CombatantRecord {
            name: "Lyra".into(),
            archetype: Archetype::Hero {
                race: Race::Elfe,
                class: Class::Voleur,
            },
            level: 4,
            base: BaseStats::new(100, 20, 10, 15, 10, 20),
            bonuses: BonusBreakdown::default(),
            training: StatDelta::ZERO,
            weapon: Some("dague".into()),
            passive: Some(PassiveRef {
                id: "focus".into(),
                level: 2,
            }),
        }
    }

    #[test]
    fn resolves_weapon_and_passive() {
        let combatant = Combatant::from_record(&record(), &TestCatalog).expect("valid record");
        assert_eq!(combatant.weapon.as_ref().map(|w| w.name.as_str()), Some("Dague"));
        let passive = combatant.passive.expect("passive resolved");
        assert_eq!(passive.kind, PassiveKind::Focus);
        assert!((passive.magnitude - 0.04).abs() < 1e-12);
    }

    #[test]
    fn unknown_weapon_is_rejected() {
        let mut record = record();
        record.weapon = Some("excalibur".into());
        assert_eq!(
            Combatant::from_record(&record, &TestCatalog),
            Err(ValidationError::UnknownWeapon("excalibur".into()))
        );
    }

    #[test]
    fn passive_level_must_exist() {
        let mut record = record();
        record.passive = Some(PassiveRef {
            id: "focus".into(),
            level: 9,
        });
        assert!(matches!(
            Combatant::from_record(&record, &TestCatalog),
            Err(ValidationError::PassiveLevelOutOfRange { level: 9, max: 5, .. })
        ));
    }
}
