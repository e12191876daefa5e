//! Status effects around damage events.
//!
//! Every damage application walks the same steps on its target:
//!
//! 1. shield absorbs `min(shield, amount)`
//! 2. an armed dodge negates a non-zero remainder and is consumed
//! 3. the remainder leaves HP and feeds `maso_taken`, except a reflected share
//! 4. an armed reflect sends `max(1, round(hp_damage × reflect))` back to the
//!    attacker, through the attacker's own steps 1–3, never reflected again
//!
//! Bleed, revival and stun are resolved around actions by the turn loop.

use super::damage::round_amount;
use super::race;
use super::state::{CombatFlags, CombatantState};
use super::Exchange;
use crate::combatant::PassiveKind;
use crate::replay::messages;

/// Result of one damage application on its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Impact {
    pub absorbed: u32,
    pub dodged: bool,
    pub hp_damage: u32,
}

impl Impact {
    /// The hit reached its target (possibly only its shield).
    pub const fn landed(&self) -> bool {
        !self.dodged
    }
}

/// A direct hit about to be applied.
#[derive(Clone, Copy, Debug)]
pub struct Blow<'a> {
    /// Verb used in the log line ("attaque", "frappe").
    pub verb: &'a str,
    pub amount: u32,
    pub crit: bool,
}

pub struct StatusEffects;

impl StatusEffects {
    /// Shield, dodge and HP steps on `target`.
    pub fn absorb(target: &mut CombatantState, amount: u32, dodgeable: bool) -> Impact {
        let absorbed = amount.min(target.shield);
        target.shield -= absorbed;
        let remainder = amount - absorbed;

        if remainder > 0 && dodgeable && target.flags.contains(CombatFlags::DODGE_ARMED) {
            target.flags.remove(CombatFlags::DODGE_ARMED);
            return Impact {
                absorbed,
                dodged: true,
                hp_damage: 0,
            };
        }

        target.lose_hp(remainder);
        Impact {
            absorbed,
            dodged: false,
            hp_damage: remainder,
        }
    }

    /// Applies a reflectable direct hit from `attacker` to `defender`.
    ///
    /// Handles the log lines, reflect, lifesteal and `maso_taken` bookkeeping.
    pub fn strike(
        ex: &mut Exchange<'_, '_>,
        attacker: &mut CombatantState,
        defender: &mut CombatantState,
        blow: Blow<'_>,
    ) -> Impact {
        let impact = Self::absorb(defender, blow.amount, true);
        tracing::trace!(
            attacker = attacker.name(),
            defender = defender.name(),
            amount = blow.amount,
            crit = blow.crit,
            ?impact,
            "direct hit"
        );

        if impact.dodged && impact.absorbed == 0 {
            ex.say(messages::dodged(defender.side, defender.name(), attacker.name()));
            return impact;
        }

        ex.say(messages::hit(
            attacker.side,
            attacker.name(),
            defender.name(),
            blow.verb,
            blow.amount,
            blow.crit,
        ));
        if impact.absorbed > 0 {
            ex.say(messages::shield_absorbs(
                defender.side,
                defender.name(),
                impact.absorbed,
            ));
        }
        if impact.dodged {
            ex.say(messages::dodged(defender.side, defender.name(), attacker.name()));
            return impact;
        }

        defender.maso_taken += u64::from(impact.hp_damage);

        if impact.hp_damage > 0 {
            Self::lifesteal(ex, attacker, impact.hp_damage);
            if defender.reflect > 0.0 {
                Self::reflect(ex, defender, attacker, impact.hp_damage);
            }
        }

        impact
    }

    /// Non-reflectable, unmitigated damage dealt by an effect of `source`.
    pub fn true_damage(
        ex: &mut Exchange<'_, '_>,
        source: &CombatantState,
        target: &mut CombatantState,
        label: &str,
        amount: u32,
    ) -> Impact {
        let impact = Self::absorb(target, amount, true);
        target.maso_taken += u64::from(impact.hp_damage);
        if impact.dodged && impact.absorbed == 0 {
            ex.say(messages::dodged(target.side, target.name(), source.name()));
            return impact;
        }
        ex.say(messages::true_damage(
            source.side,
            source.name(),
            target.name(),
            label,
            amount,
        ));
        if impact.absorbed > 0 {
            ex.say(messages::shield_absorbs(target.side, target.name(), impact.absorbed));
        }
        if impact.dodged {
            ex.say(messages::dodged(target.side, target.name(), source.name()));
        }
        impact
    }

    fn reflect(
        ex: &mut Exchange<'_, '_>,
        defender: &CombatantState,
        attacker: &mut CombatantState,
        hp_damage: u32,
    ) {
        let amount = round_amount(f64::from(hp_damage) * defender.reflect).max(1);
        ex.say(messages::reflected(
            defender.side,
            defender.name(),
            attacker.name(),
            amount,
        ));
        let impact = Self::absorb(attacker, amount, true);
        if impact.absorbed > 0 {
            ex.say(messages::shield_absorbs(attacker.side, attacker.name(), impact.absorbed));
        }
        if impact.dodged {
            ex.say(messages::dodged(attacker.side, attacker.name(), defender.name()));
        }
        tracing::trace!(from = defender.name(), amount, ?impact, "reflect");
    }

    fn lifesteal(ex: &mut Exchange<'_, '_>, attacker: &mut CombatantState, hp_damage: u32) {
        let magnitude = attacker.passive_magnitude(PassiveKind::Lifesteal);
        if magnitude <= 0.0 {
            return;
        }
        let restored = attacker.heal(magnitude * f64::from(hp_damage));
        if restored > 0 {
            ex.say(messages::heal(attacker.side, attacker.name(), restored));
        }
    }

    /// Heals `amount` before anti-heal and logs what was restored.
    pub fn heal(ex: &mut Exchange<'_, '_>, target: &mut CombatantState, amount: f64) -> u32 {
        let restored = target.heal(amount);
        if restored > 0 {
            ex.say(messages::heal(target.side, target.name(), restored));
        }
        restored
    }

    /// Start-of-turn bleed tick: shield then HP, never dodged or reflected.
    pub fn tick_bleed(ex: &mut Exchange<'_, '_>, target: &mut CombatantState) {
        let Some(bleed) = target.bleed else {
            return;
        };
        let amount = bleed.tick_damage(target.stats.hp);
        let impact = Self::absorb(target, amount, false);
        target.maso_taken += u64::from(impact.hp_damage);
        if impact.absorbed > 0 {
            ex.say(messages::shield_absorbs(target.side, target.name(), impact.absorbed));
        }
        if impact.hp_damage > 0 {
            ex.say(messages::bleed_tick(target.side, target.name(), impact.hp_damage));
        }
    }

    /// Consumes a stunned turn. Returns true when the action is lost.
    pub fn consume_stun(ex: &mut Exchange<'_, '_>, target: &mut CombatantState) -> bool {
        if target.stunned_turns == 0 {
            return false;
        }
        target.stunned_turns -= 1;
        ex.say(messages::stunned(target.side, target.name()));
        true
    }

    /// Stuns `target` for at least `turns` of its own turns.
    pub fn stun(
        ex: &mut Exchange<'_, '_>,
        source: &CombatantState,
        target: &mut CombatantState,
        turns: u32,
    ) {
        if turns == 0 {
            return;
        }
        target.stunned_turns = target.stunned_turns.max(turns);
        ex.say(messages::stun_applied(
            source.side,
            source.name(),
            target.name(),
            turns,
        ));
    }

    /// Undead revival. Returns true if `target` came back.
    pub fn try_revive(ex: &mut Exchange<'_, '_>, target: &mut CombatantState) -> bool {
        if !target.is_down() {
            return false;
        }
        let Some(fraction) = race::revive_fraction(target, ex.tables) else {
            return false;
        };
        let hp = round_amount(fraction * f64::from(target.stats.hp)).max(1);
        target.current_hp = i64::from(hp).min(target.max_hp);
        target.flags.insert(CombatFlags::REVIVED);
        ex.say(messages::revived(target.side, target.name(), target.displayed_hp()));
        tracing::debug!(name = target.name(), hp, "revived");
        true
    }
}
