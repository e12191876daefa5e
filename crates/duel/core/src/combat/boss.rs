//! Boss kit abilities.

use arrayvec::ArrayVec;

use super::abilities::AbilityResolver;
use super::damage::DamageKind;
use super::state::{CombatFlags, CombatantState};
use super::status::StatusEffects;
use super::Exchange;
use crate::combatant::BossAbility;
use crate::config::DuelConfig;
use crate::replay::messages;

/// Which kit abilities fired this turn, indexed like the kit.
pub type Fired = ArrayVec<bool, { DuelConfig::MAX_BOSS_ABILITIES }>;

pub struct BossResolver;

impl BossResolver {
    /// Advances the cooldowns of abilities matching `select`.
    ///
    /// Abilities without an interval, or not selected, report `false`.
    pub fn advance(actor: &mut CombatantState, select: impl Fn(&BossAbility) -> bool) -> Fired {
        let Some(kit) = actor.combatant.boss_kit() else {
            return Fired::new();
        };
        let mut fired = Fired::new();
        for (ability, cooldown) in kit.abilities().iter().zip(actor.boss_cooldowns.iter_mut()) {
            let hit = match cooldown {
                Some(cooldown) if select(ability) => cooldown.advance(),
                _ => false,
            };
            fired.push(hit);
        }
        fired
    }

    /// Start-of-turn regeneration.
    pub fn regenerate(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState) {
        let fired = Self::advance(actor, |a| matches!(a, BossAbility::Regeneration { .. }));
        let Some(kit) = actor.combatant.boss_kit().cloned() else {
            return;
        };
        for (ability, fired) in kit.abilities().iter().zip(fired) {
            if let (BossAbility::Regeneration { fraction, .. }, true) = (ability, fired) {
                ex.say(messages::ability(actor.side, actor.name(), ability.label()));
                StatusEffects::heal(ex, actor, fraction * actor.max_hp as f64);
            }
        }
    }

    /// Enrage triggers once, the first time HP is below its threshold.
    pub fn check_enrage(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState) {
        if actor.flags.contains(CombatFlags::ENRAGED) {
            return;
        }
        let Some((threshold, _)) = actor.combatant.boss_kit().and_then(|kit| kit.enrage()) else {
            return;
        };
        if actor.hp_ratio() < threshold {
            actor.flags.insert(CombatFlags::ENRAGED);
            ex.say(messages::enraged(actor.side, actor.name()));
            tracing::debug!(name = actor.name(), "enraged");
        }
    }

    /// Fired outgoing abilities. Returns true when one replaced the basic attack.
    pub fn offensive(
        ex: &mut Exchange<'_, '_>,
        actor: &mut CombatantState,
        target: &mut CombatantState,
        fired: &Fired,
    ) -> bool {
        let Some(kit) = actor.combatant.boss_kit().cloned() else {
            return false;
        };
        let mut replaced = false;

        for (ability, _) in kit.abilities().iter().zip(fired).filter(|(_, f)| **f) {
            if target.is_down() || actor.is_down() {
                break;
            }
            match *ability {
                BossAbility::Crush { turns, .. } => {
                    ex.say(messages::ability(actor.side, actor.name(), ability.label()));
                    StatusEffects::stun(ex, actor, target, turns);
                }
                BossAbility::Nuke { cap_ratio, .. } => {
                    ex.say(messages::ability(actor.side, actor.name(), ability.label()));
                    let power = f64::from(actor.stats.auto) + f64::from(actor.stats.cap) * cap_ratio;
                    let roll = AbilityResolver::direct_roll(
                        ex,
                        actor,
                        target,
                        DamageKind::Magical,
                        power,
                        f64::from(target.stats.rescap),
                    );
                    let blow = super::status::Blow {
                        verb: "pulvérise",
                        amount: roll.finish(),
                        crit: roll.is_crit(),
                    };
                    StatusEffects::strike(ex, actor, target, blow);
                    replaced = true;
                }
                BossAbility::Regeneration { .. }
                | BossAbility::Enrage { .. }
                | BossAbility::Venom { .. }
                | BossAbility::Blight { .. } => {}
            }
        }

        replaced
    }
}
