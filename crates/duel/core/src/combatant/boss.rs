use arrayvec::ArrayVec;

use crate::config::DuelConfig;

/// Special abilities available to bosses and labyrinth enemies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossAbility {
    /// Magical hit with power `auto + cap × cap_ratio`. Replaces the basic attack.
    Nuke { interval: u32, cap_ratio: f64 },
    /// Stuns the opponent for `turns`, then basic attack.
    Crush { interval: u32, turns: u32 },
    /// Heals `fraction × maxHP` at the start of its turn.
    Regeneration { interval: u32, fraction: f64 },
    /// Once HP drops below `threshold × maxHP`, damage × (1 + `damage_bonus`).
    Enrage { threshold: f64, damage_bonus: f64 },
    /// Landed basic attacks add flat bleed stacks.
    Venom { stacks: u32 },
    /// Healing reduction imposed on the opponent.
    Blight { anti_heal: f64 },
}

impl BossAbility {
    /// Cooldown interval for abilities gated by one.
    pub const fn interval(&self) -> Option<u32> {
        match self {
            Self::Nuke { interval, .. }
            | Self::Crush { interval, .. }
            | Self::Regeneration { interval, .. } => Some(*interval),
            Self::Enrage { .. } | Self::Venom { .. } | Self::Blight { .. } => None,
        }
    }

    /// Name shown in the replay.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Nuke { .. } => "Cataclysme",
            Self::Crush { .. } => "Écrasement",
            Self::Regeneration { .. } => "Régénération",
            Self::Enrage { .. } => "Enragement",
            Self::Venom { .. } => "Venin",
            Self::Blight { .. } => "Flétrissure",
        }
    }
}

/// Ability loadout of a boss.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BossKit {
    abilities: ArrayVec<BossAbility, { DuelConfig::MAX_BOSS_ABILITIES }>,
}

impl BossKit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a kit from a slice, `None` when it exceeds the kit capacity.
    pub fn from_slice(abilities: &[BossAbility]) -> Option<Self> {
        let mut kit = Self::new();
        for ability in abilities {
            kit.abilities.try_push(*ability).ok()?;
        }
        Some(kit)
    }

    pub fn abilities(&self) -> &[BossAbility] {
        &self.abilities
    }

    /// Total healing reduction this kit imposes on the opponent.
    pub fn anti_heal(&self) -> f64 {
        self.abilities
            .iter()
            .map(|ability| match ability {
                BossAbility::Blight { anti_heal } => *anti_heal,
                _ => 0.0,
            })
            .sum()
    }

    /// Bleed stacks added by each landed basic attack.
    pub fn venom_stacks(&self) -> u32 {
        self.abilities
            .iter()
            .map(|ability| match ability {
                BossAbility::Venom { stacks } => *stacks,
                _ => 0,
            })
            .sum()
    }

    pub fn enrage(&self) -> Option<(f64, f64)> {
        self.abilities.iter().find_map(|ability| match ability {
            BossAbility::Enrage {
                threshold,
                damage_bonus,
            } => Some((*threshold, *damage_bonus)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kit_rejects_overflow() {
        let venom = BossAbility::Venom { stacks: 1 };
        assert!(BossKit::from_slice(&[venom; DuelConfig::MAX_BOSS_ABILITIES]).is_some());
        assert!(BossKit::from_slice(&[venom; DuelConfig::MAX_BOSS_ABILITIES + 1]).is_none());
    }

    #[test]
    fn passive_abilities_have_no_interval() {
        assert_eq!(BossAbility::Blight { anti_heal: 0.2 }.interval(), None);
        assert_eq!(
            BossAbility::Crush {
                interval: 4,
                turns: 1
            }
            .interval(),
            Some(4)
        );
    }

    #[test]
    fn aggregates_sum_over_the_kit() {
        let kit = BossKit::from_slice(&[
            BossAbility::Blight { anti_heal: 0.2 },
            BossAbility::Venom { stacks: 2 },
            BossAbility::Venom { stacks: 1 },
        ])
        .expect("fits");
        assert!((kit.anti_heal() - 0.2).abs() < 1e-12);
        assert_eq!(kit.venom_stacks(), 3);
        assert_eq!(kit.enrage(), None);
    }
}
