use crate::combatant::{MageTowerPassive, PassiveKind, Weapon};

/// Oracle resolving the ids a [`CombatantRecord`](crate::combatant::CombatantRecord)
/// refers to.
pub trait CatalogOracle: Send + Sync {
    fn weapon(&self, id: &str) -> Option<Weapon>;

    fn passive(&self, id: &str) -> Option<PassiveDefinition>;
}

/// Mage tower passive as listed in the catalog, before a level is chosen.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDefinition {
    pub id: String,
    pub name: String,
    pub kind: PassiveKind,
    /// Magnitude gained per level.
    pub per_level: f64,
    pub max_level: u8,
}

impl PassiveDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: PassiveKind,
        per_level: f64,
        max_level: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            per_level,
            max_level,
        }
    }

    /// Resolves the passive at `level`, `None` outside `1..=max_level`.
    pub fn at_level(&self, level: u8) -> Option<MageTowerPassive> {
        (1..=self.max_level).contains(&level).then(|| {
            MageTowerPassive::new(
                self.id.clone(),
                self.kind,
                level,
                self.per_level * f64::from(level),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_scales_with_level() {
        let focus = PassiveDefinition::new("focus", "Concentration", PassiveKind::Focus, 0.02, 5);
        let resolved = focus.at_level(3).expect("level in range");
        assert_eq!(resolved.level, 3);
        assert!((resolved.magnitude - 0.06).abs() < 1e-12);
    }

    #[test]
    fn rejects_levels_outside_range() {
        let fury = PassiveDefinition::new("fury", "Fureur", PassiveKind::Fury, 0.1, 3);
        assert!(fury.at_level(0).is_none());
        assert!(fury.at_level(4).is_none());
    }
}
