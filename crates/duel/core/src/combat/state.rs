//! Mutable per-match combatant state.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::damage::round_amount;
use crate::combatant::{Class, Combatant, MageTowerPassive, PassiveKind, Race};
use crate::config::DuelConfig;
use crate::env::TablesOracle;
use crate::replay::{Side, Snapshot};
use crate::stats::EffectiveStats;

bitflags! {
    /// One-bit combat states.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CombatFlags: u8 {
        /// Next hit that reaches the dodge step is negated.
        const DODGE_ARMED = 1 << 0;
        /// Undead revival already spent.
        const REVIVED     = 1 << 1;
        /// Boss enrage triggered.
        const ENRAGED     = 1 << 2;
    }
}

/// Counter gating a periodic ability.
///
/// Starts at 0, then cycles `1, 2, …, interval, 1, …` once per advance. The
/// ability fires on the advance that reaches `interval`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    interval: u32,
    counter: u32,
}

impl Cooldown {
    /// Zero intervals are treated as 1.
    pub const fn new(interval: u32) -> Self {
        Self {
            interval: if interval == 0 { 1 } else { interval },
            counter: 0,
        }
    }

    /// Advances the counter; returns true when the ability fires.
    pub fn advance(&mut self) -> bool {
        self.counter = if self.counter >= self.interval {
            1
        } else {
            self.counter + 1
        };
        debug_assert!((1..=self.interval).contains(&self.counter));
        self.counter == self.interval
    }

    pub const fn interval(&self) -> u32 {
        self.interval
    }

    pub const fn counter(&self) -> u32 {
        self.counter
    }
}

/// Damage per bleed stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BleedTick {
    Flat(u32),
    /// Fraction of the bleeding combatant's max HP.
    Percent(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bleed {
    pub stacks: u32,
    pub tick: BleedTick,
}

impl Bleed {
    /// Damage of one tick against a combatant with `max_hp`, at least 1.
    pub fn tick_damage(&self, max_hp: u32) -> u32 {
        let per_stack = match self.tick {
            BleedTick::Flat(amount) => amount,
            BleedTick::Percent(fraction) => round_amount(fraction * f64::from(max_hp)),
        };
        per_stack.saturating_mul(self.stacks).max(1)
    }
}

/// Derived, mutable state of one side for the duration of a match.
#[derive(Clone, Debug)]
pub struct CombatantState {
    pub side: Side,
    pub combatant: Combatant,
    pub stats: EffectiveStats,
    pub awakened: bool,

    /// May go negative transiently; clamped when exported.
    pub current_hp: i64,
    pub max_hp: i64,
    pub shield: u32,
    pub flags: CombatFlags,

    pub class_cooldown: Option<Cooldown>,
    /// Indexed like the boss kit; `None` for abilities without an interval.
    pub boss_cooldowns: ArrayVec<Option<Cooldown>, { DuelConfig::MAX_BOSS_ABILITIES }>,

    /// Armed reflect fraction, 0 when disarmed.
    pub reflect: f64,
    pub bleed: Option<Bleed>,
    /// Damage taken from reflectable hits since the last martyrdom.
    pub maso_taken: u64,
    pub familiar_stacks: u32,
    pub stunned_turns: u32,
    /// Healing reduction imposed by the opponent, in `[0, 1]`.
    pub anti_heal: f64,
}

impl CombatantState {
    pub fn new(
        side: Side,
        combatant: Combatant,
        stats: EffectiveStats,
        tables: &(impl TablesOracle + ?Sized),
    ) -> Self {
        let awakened = combatant.is_awakened(tables);
        let class_cooldown = combatant
            .class()
            .map(|class| Cooldown::new(tables.classes().interval(class)));
        let boss_cooldowns = combatant
            .boss_kit()
            .map(|kit| {
                kit.abilities()
                    .iter()
                    .map(|ability| ability.interval().map(Cooldown::new))
                    .collect()
            })
            .unwrap_or_default();

        let max_hp = i64::from(stats.hp);
        let shield = round_amount(
            MageTowerPassive::magnitude_of(combatant.passive.as_ref(), PassiveKind::ArcaneShield)
                * f64::from(stats.hp),
        );

        Self {
            side,
            combatant,
            stats,
            awakened,
            current_hp: max_hp,
            max_hp,
            shield,
            flags: CombatFlags::empty(),
            class_cooldown,
            boss_cooldowns,
            reflect: 0.0,
            bleed: None,
            maso_taken: 0,
            familiar_stacks: 0,
            stunned_turns: 0,
            anti_heal: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    pub fn race(&self) -> Option<Race> {
        self.combatant.race()
    }

    pub fn class(&self) -> Option<Class> {
        self.combatant.class()
    }

    pub fn passive_magnitude(&self, kind: PassiveKind) -> f64 {
        MageTowerPassive::magnitude_of(self.combatant.passive.as_ref(), kind)
    }

    pub fn is_down(&self) -> bool {
        self.current_hp <= 0
    }

    pub fn hp_ratio(&self) -> f64 {
        self.current_hp.max(0) as f64 / self.max_hp as f64
    }

    /// Subtracts HP damage; may leave HP negative.
    pub fn lose_hp(&mut self, amount: u32) {
        self.current_hp -= i64::from(amount);
    }

    /// Heals after anti-heal, saturating at max HP. Returns HP actually restored.
    pub fn heal(&mut self, amount: f64) -> u32 {
        let reduced = round_amount(amount * (1.0 - self.anti_heal));
        let room = (self.max_hp - self.current_hp).max(0);
        let restored = i64::from(reduced).min(room);
        self.current_hp += restored;
        debug_assert!(self.current_hp <= self.max_hp);
        u32::try_from(restored).unwrap_or(u32::MAX)
    }

    /// Adds bleed stacks; the latest applier decides the tick.
    pub fn add_bleed(&mut self, stacks: u32, tick: BleedTick) {
        let stacks = self
            .bleed
            .map_or(stacks, |bleed| bleed.stacks.saturating_add(stacks));
        self.bleed = Some(Bleed { stacks, tick });
    }

    /// Exported HP, clamped to `[0, max_hp]`.
    pub fn displayed_hp(&self) -> u32 {
        u32::try_from(self.current_hp.clamp(0, self.max_hp)).unwrap_or(u32::MAX)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            hp: self.displayed_hp(),
            shield: self.shield,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::BossKit;
    use crate::env::BalanceTables;
    use crate::stats::{BaseStats, StatResolver};

    fn state(combatant: Combatant) -> CombatantState {
        let tables = BalanceTables::default();
        let stats = StatResolver::resolve(&combatant, &tables).expect("valid");
        CombatantState::new(Side::P1, combatant, stats, &tables)
    }

    #[test]
    fn cooldown_fires_on_interval_then_wraps() {
        let mut cooldown = Cooldown::new(3);
        let fired: Vec<bool> = (0..7).map(|_| cooldown.advance()).collect();
        assert_eq!(fired, [false, false, true, false, false, true, false]);
        assert_eq!(cooldown.counter(), 1);
    }

    #[test]
    fn interval_one_fires_every_turn() {
        let mut cooldown = Cooldown::new(1);
        assert!((0..5).all(|_| cooldown.advance()));
    }

    #[test]
    fn heal_saturates_and_respects_anti_heal() {
        let mut s = state(Combatant::hero(
            "A",
            Race::Humain,
            Class::Pretre,
            BaseStats::new(85, 10, 10, 10, 10, 10),
        ));
        s.current_hp = 50;
        s.anti_heal = 0.5;
        assert_eq!(s.heal(20.0), 10);
        assert_eq!(s.current_hp, 60);
        s.anti_heal = 0.0;
        assert_eq!(s.heal(1_000.0), 40);
        assert_eq!(s.current_hp, s.max_hp);
    }

    #[test]
    fn displayed_hp_is_clamped() {
        let mut s = state(Combatant::boss(
            "B",
            BossKit::new(),
            BaseStats::new(50, 1, 1, 1, 1, 1),
        ));
        s.lose_hp(80);
        assert_eq!(s.current_hp, -30);
        assert_eq!(s.displayed_hp(), 0);
    }

    #[test]
    fn bleed_stacks_accumulate_and_tick_at_least_one() {
        let mut s = state(Combatant::boss(
            "B",
            BossKit::new(),
            BaseStats::new(40, 1, 1, 1, 1, 1),
        ));
        s.add_bleed(1, BleedTick::Flat(3));
        s.add_bleed(2, BleedTick::Percent(0.01));
        let bleed = s.bleed.expect("bleeding");
        assert_eq!(bleed.stacks, 3);
        // 1% of 40 rounds to 0 per stack, floor of 1 per tick
        assert_eq!(bleed.tick_damage(40), 1);
        assert_eq!(Bleed { stacks: 2, tick: BleedTick::Flat(3) }.tick_damage(40), 6);
    }
}
