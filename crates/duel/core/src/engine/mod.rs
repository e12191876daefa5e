//! Match orchestration.
//!
//! The [`DuelEngine`] takes two validated combatants through
//! `NotStarted → TurnLoop → Terminal`. Each turn both sides act in
//! [`initiative`](turns::initiative) order, and each action walks the
//! [`TriggerPhase::ORDER`] list. Every visible event lands in the replay log;
//! the log is handed out only once the match is decided.

mod errors;
mod turns;

pub use errors::MatchError;
pub use turns::{TriggerPhase, initiative, terminal};

use crate::combat::abilities::replaces_basic_attack;
use crate::combat::boss::{BossResolver, Fired};
use crate::combat::{AbilityResolver, CombatantState, Dice, Exchange, StatusEffects, race};
use crate::combatant::{BossAbility, Class, Combatant, CombatantRecord};
use crate::config::{DuelConfig, TurnCapRule};
use crate::env::{BalanceTables, CatalogOracle, DuelEnv, Env, PcgRng, TablesOracle};
use crate::replay::{Phase, ReplayLog, ReplayStep, Side, messages};
use crate::stats::StatResolver;

use self::turns::split;
use crate::combat::damage::round_amount;

/// Why the match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MatchEndReason {
    /// A side fell and could not revive.
    Knockout,
    /// `max_turns` elapsed; the turn-cap rule picked the winner.
    TurnCap,
}

/// Outcome of one match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MatchResult {
    pub winner_name: String,
    pub winner_side: Side,
    /// Turns started, the deciding one included.
    pub turns: u32,
    pub reason: MatchEndReason,
    pub steps: ReplayLog,
}

impl MatchResult {
    /// SHA-256 fingerprint of the replay.
    pub fn digest(&self) -> [u8; 32] {
        self.steps.digest()
    }
}

/// Resolves matches against fixed tables, randomness and configuration.
///
/// The engine holds no per-match state, so one instance can resolve any
/// number of matches, from any number of threads.
pub struct DuelEngine<'a> {
    env: DuelEnv<'a>,
    config: DuelConfig,
}

impl<'a> DuelEngine<'a> {
    pub fn new(env: DuelEnv<'a>, config: DuelConfig) -> Self {
        Self { env, config }
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Validates both combatants and plays the match out.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] for a turn cap outside
    /// `1..=DuelConfig::MAX_TURNS_CEILING`, [`MatchError::Invalid`] when
    /// either side breaks the input contract. Nothing is resolved in both cases.
    pub fn run(&self, p1: Combatant, p2: Combatant, seed: u64) -> Result<MatchResult, MatchError> {
        self.config.validate()?;
        let tables = self.env.tables();
        let states = [
            Self::prepare(Side::P1, p1, tables)?,
            Self::prepare(Side::P2, p2, tables)?,
        ];

        let _span = tracing::debug_span!(
            "duel",
            p1 = states[0].name(),
            p2 = states[1].name(),
            seed
        )
        .entered();

        let duel = Duel {
            tables,
            config: &self.config,
            dice: Dice::new(self.env.rng(), seed),
            states,
            log: ReplayLog::new(),
        };
        let result = duel.play();

        tracing::info!(
            winner = %result.winner_name,
            side = %result.winner_side,
            turns = result.turns,
            reason = %result.reason,
            steps = result.steps.len(),
            "match resolved"
        );
        Ok(result)
    }

    /// Resolves two stored records through `catalog`, then runs the match.
    ///
    /// # Errors
    ///
    /// [`MatchError::Invalid`] for unknown catalog ids and contract violations.
    pub fn run_records(
        &self,
        p1: &CombatantRecord,
        p2: &CombatantRecord,
        catalog: &(impl CatalogOracle + ?Sized),
        seed: u64,
    ) -> Result<MatchResult, MatchError> {
        let p1 = Combatant::from_record(p1, catalog).map_err(|e| MatchError::invalid(Side::P1, e))?;
        let p2 = Combatant::from_record(p2, catalog).map_err(|e| MatchError::invalid(Side::P2, e))?;
        self.run(p1, p2, seed)
    }

    fn prepare(
        side: Side,
        combatant: Combatant,
        tables: &dyn TablesOracle,
    ) -> Result<CombatantState, MatchError> {
        combatant
            .validate()
            .map_err(|e| MatchError::invalid(side, e))?;
        let stats =
            StatResolver::resolve(&combatant, tables).map_err(|e| MatchError::invalid(side, e))?;
        Ok(CombatantState::new(side, combatant, stats, tables))
    }
}

/// Runs one match with the shipped balance tables, [`PcgRng`] and the default
/// configuration.
///
/// # Errors
///
/// See [`DuelEngine::run`].
pub fn run_match(p1: Combatant, p2: Combatant, seed: u64) -> Result<MatchResult, MatchError> {
    let tables = BalanceTables::default();
    let rng = PcgRng;
    let env = Env::new(&tables, &rng).as_duel_env();
    DuelEngine::new(env, DuelConfig::default()).run(p1, p2, seed)
}

/// State of one match in progress.
struct Duel<'e, 'c> {
    tables: &'e dyn TablesOracle,
    config: &'c DuelConfig,
    dice: Dice<'e>,
    states: [CombatantState; 2],
    log: ReplayLog,
}

impl Duel<'_, '_> {
    fn play(mut self) -> MatchResult {
        self.intro();

        for turn in 1..=self.config.max_turns {
            let order = initiative(&self.states);
            self.commit(Phase::TurnStart, order[0], vec![messages::turn_separator(turn)]);

            for side in order {
                if let Some(winner) = self.act(turn, side) {
                    return self.finish(winner, turn, MatchEndReason::Knockout);
                }
            }
        }

        let winner = match self.config.turn_cap_rule {
            TurnCapRule::FirstListed => Side::P1,
            TurnCapRule::HigherHpRatio => {
                let [p1, p2] = &self.states;
                if p2.hp_ratio() > p1.hp_ratio() {
                    Side::P2
                } else {
                    Side::P1
                }
            }
        };
        let turns = self.config.max_turns;
        self.finish(winner, turns, MatchEndReason::TurnCap)
    }

    fn commit(&mut self, phase: Phase, actor: Side, logs: Vec<String>) {
        let snapshots = [self.states[0].snapshot(), self.states[1].snapshot()];
        self.log.push(ReplayStep::new(phase, actor, logs, snapshots));
    }

    /// Banner, presentations and the effects set up before the first turn.
    fn intro(&mut self) {
        let mut lines = vec![messages::intro_banner(
            self.config.mode,
            self.states[0].name(),
            self.states[1].name(),
        )];

        for state in &self.states {
            lines.push(messages::presentation(
                state.side,
                state.name(),
                &state.combatant.title(),
                state.displayed_hp(),
            ));
            if state.shield > 0 {
                lines.push(messages::shield_up(state.side, state.name(), state.shield));
            }
        }

        for side in Side::BOTH {
            let anti_heal = self.imposed_anti_heal(side);
            if anti_heal <= 0.0 {
                continue;
            }
            let (source, target) = split(&mut self.states, side);
            target.anti_heal = anti_heal;
            lines.push(messages::anti_heal(
                source.side,
                target.name(),
                round_amount(anti_heal * 100.0),
            ));
        }

        self.commit(Phase::Intro, Side::P1, lines);
    }

    /// Healing reduction `side` imposes on its opponent for the whole match.
    fn imposed_anti_heal(&self, side: Side) -> f64 {
        let source = &self.states[side.index()];
        let class = match source.class() {
            Some(Class::Demoniste) => self.tables.classes().demoniste.ability.anti_heal,
            _ => 0.0,
        };
        let kit = source.combatant.boss_kit().map_or(0.0, |kit| kit.anti_heal());
        (class + kit).clamp(0.0, 1.0)
    }

    /// One action of `side`. Returns the winner if it decided the match.
    fn act(&mut self, turn: u32, side: Side) -> Option<Side> {
        let mut lines = Vec::new();
        let (actor, target) = split(&mut self.states, side);
        let mut ex = Exchange::new(self.tables, &mut self.dice, &mut lines);

        let mut acting = true;
        let mut class_fired = false;
        let mut boss_fired = Fired::new();
        let mut winner = None;

        for phase in TriggerPhase::ORDER {
            if phase.needs_action() && !acting {
                continue;
            }
            match phase {
                TriggerPhase::ClearReflect => actor.reflect = 0.0,
                TriggerPhase::Regeneration => Self::regenerate(&mut ex, actor),
                TriggerPhase::Bleed => {
                    StatusEffects::tick_bleed(&mut ex, actor);
                    if actor.is_down() {
                        acting = false;
                    }
                }
                TriggerPhase::Stun => {
                    if acting && StatusEffects::consume_stun(&mut ex, actor) {
                        acting = false;
                    }
                }
                TriggerPhase::SelfBuff => {
                    class_fired = actor
                        .class_cooldown
                        .as_mut()
                        .is_some_and(|cooldown| cooldown.advance());
                    boss_fired = BossResolver::advance(actor, |ability| {
                        !matches!(ability, BossAbility::Regeneration { .. })
                    });
                    if let (Some(class), true) = (actor.class(), class_fired) {
                        AbilityResolver::self_buff(&mut ex, actor, class);
                    }
                    BossResolver::check_enrage(&mut ex, actor);
                }
                TriggerPhase::Outgoing => {
                    Self::outgoing(&mut ex, actor, target, class_fired, &boss_fired);
                }
                TriggerPhase::DeathCheck => {
                    StatusEffects::try_revive(&mut ex, actor);
                    StatusEffects::try_revive(&mut ex, target);
                    winner = terminal(actor, target);
                }
            }
        }

        tracing::debug!(
            turn,
            actor = actor.name(),
            hp = actor.displayed_hp(),
            opponent_hp = target.displayed_hp(),
            acted = acting,
            lines = lines.len(),
            "action resolved"
        );
        self.commit(Phase::Action, side, lines);
        winner
    }

    fn regenerate(ex: &mut Exchange<'_, '_>, actor: &mut CombatantState) {
        if let Some(fraction) = race::regen_fraction(actor, ex.tables) {
            StatusEffects::heal(ex, actor, fraction * actor.max_hp as f64);
        }
        BossResolver::regenerate(ex, actor);
    }

    fn outgoing(
        ex: &mut Exchange<'_, '_>,
        actor: &mut CombatantState,
        target: &mut CombatantState,
        class_fired: bool,
        boss_fired: &Fired,
    ) {
        let replaced = match actor.class() {
            Some(class) if class_fired => {
                AbilityResolver::offensive(ex, actor, target, class);
                replaces_basic_attack(class)
            }
            Some(_) => false,
            None => BossResolver::offensive(ex, actor, target, boss_fired),
        };

        if !replaced && !actor.is_down() && !target.is_down() {
            AbilityResolver::basic_attack(ex, actor, target);
        }
    }

    fn finish(mut self, winner: Side, turns: u32, reason: MatchEndReason) -> MatchResult {
        let loser = &self.states[winner.opponent().index()];
        let mut lines = Vec::with_capacity(2);
        match reason {
            MatchEndReason::Knockout => lines.push(messages::defeat(loser.name())),
            MatchEndReason::TurnCap => lines.push(messages::turn_limit(self.config.max_turns)),
        }
        let winner_name = self.states[winner.index()].name().to_string();
        lines.push(messages::victory(&winner_name));
        self.commit(Phase::Victory, winner, lines);

        MatchResult {
            winner_name,
            winner_side: winner,
            turns,
            reason,
            steps: self.log,
        }
    }
}
