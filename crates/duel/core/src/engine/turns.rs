//! Turn order and the per-action trigger sequence.

use crate::combat::CombatantState;
use crate::replay::Side;

/// Rule hooks of one action, resolved strictly in [`TriggerPhase::ORDER`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TriggerPhase {
    /// The actor's reflect from its previous turn expires.
    ClearReflect,
    /// Sylvari sap and boss regeneration.
    Regeneration,
    /// Bleed tick. A lethal tick skips straight to [`TriggerPhase::DeathCheck`].
    Bleed,
    /// A stunned actor loses the rest of its action, cooldowns included.
    Stun,
    /// Cooldowns advance; buff specials and enrage resolve.
    SelfBuff,
    /// Damage specials, then the basic attack unless a special replaced it.
    Outgoing,
    /// Revivals, then the terminal check.
    DeathCheck,
}

impl TriggerPhase {
    pub const ORDER: [TriggerPhase; 7] = [
        TriggerPhase::ClearReflect,
        TriggerPhase::Regeneration,
        TriggerPhase::Bleed,
        TriggerPhase::Stun,
        TriggerPhase::SelfBuff,
        TriggerPhase::Outgoing,
        TriggerPhase::DeathCheck,
    ];

    /// Phases that only run when the actor still gets to act.
    pub const fn needs_action(self) -> bool {
        matches!(self, Self::SelfBuff | Self::Outgoing)
    }
}

/// Acting order for one turn: faster side first, P1 on ties.
pub fn initiative(states: &[CombatantState; 2]) -> [Side; 2] {
    let [p1, p2] = states;
    if p2.stats.spd > p1.stats.spd {
        [Side::P2, Side::P1]
    } else {
        [Side::P1, Side::P2]
    }
}

/// Splits the two states into `(actor, opponent)`.
pub fn split(
    states: &mut [CombatantState; 2],
    actor: Side,
) -> (&mut CombatantState, &mut CombatantState) {
    let [p1, p2] = states;
    match actor {
        Side::P1 => (p1, p2),
        Side::P2 => (p2, p1),
    }
}

/// Winner after an action, if the match is over.
///
/// When both sides are down the acting side is the nominal survivor.
pub fn terminal(actor: &CombatantState, opponent: &CombatantState) -> Option<Side> {
    match (actor.is_down(), opponent.is_down()) {
        (_, true) => Some(actor.side),
        (true, false) => Some(opponent.side),
        (false, false) => None,
    }
}
