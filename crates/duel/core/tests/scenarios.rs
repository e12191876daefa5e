use duel_core::combat::abilities::AbilityResolver;
use duel_core::{
    BalanceTables, BaseStats, BossKit, Class, Combatant, CombatantState, Dice, DuelConfig,
    DuelEngine, Env, Exchange, MatchEndReason, PcgRng, Phase, Race, Side, StatResolver,
    physical_damage,
};

fn no_crit_tables() -> BalanceTables {
    let mut tables = BalanceTables::default();
    tables.combat.base_crit = 0.0;
    tables.race_passives.elf_crit_bonus = 0.0;
    tables
}

fn state(side: Side, combatant: Combatant, tables: &BalanceTables) -> CombatantState {
    let stats = StatResolver::resolve(&combatant, tables).expect("valid combatant");
    CombatantState::new(side, combatant, stats, tables)
}

fn dummy(name: &str, base: BaseStats) -> Combatant {
    Combatant::boss(name, BossKit::new(), base)
}

#[test]
fn basic_attack_twenty_against_ten_defense_deals_fifteen() {
    assert_eq!(physical_damage(20, 10), 15);

    let tables = no_crit_tables();
    let rng = PcgRng;
    let env = Env::new(&tables, &rng).as_duel_env();
    let attacker = dummy("Brute", BaseStats::new(500, 20, 10, 0, 10, 9));
    let defender = dummy("Roc", BaseStats::new(500, 20, 10, 0, 10, 1));

    let result = DuelEngine::new(env, DuelConfig::new().with_max_turns(1))
        .run(attacker, defender, 42)
        .expect("valid match");

    let first_action = result
        .steps
        .steps()
        .iter()
        .find(|step| step.phase == Phase::Action)
        .expect("an action step");
    assert_eq!(first_action.actor, Side::P1);
    assert_eq!(
        first_action.logs,
        vec!["[P1] Brute attaque Roc et inflige 15 points de dégâts".to_string()]
    );
    assert_eq!(first_action.p2_hp, 485);
}

#[test]
fn prayer_heals_more_with_more_cap() {
    let tables = no_crit_tables();
    let tuning = tables.classes.pretre.ability;
    let priest = |cap| {
        let mut priest = state(
            Side::P1,
            Combatant::hero("Clerc", Race::Elfe, Class::Pretre, BaseStats::new(100, 5, 5, cap, 5, 5)),
            &tables,
        );
        priest.current_hp = 40;
        priest
    };

    let strong = AbilityResolver::prayer_amount(&priest(30), &tuning);
    let weak = AbilityResolver::prayer_amount(&priest(15), &tuning);
    assert!(strong > weak, "{strong} should exceed {weak}");
}

#[test]
fn martyrdom_spends_the_accumulated_damage() {
    let tables = no_crit_tables();
    let rng = PcgRng;
    let mut dice = Dice::new(&rng, 11);
    let mut lines = Vec::new();
    let mut ex = Exchange::new(&tables, &mut dice, &mut lines);

    let mut maso = state(
        Side::P1,
        Combatant::hero("Ascète", Race::Orc, Class::Masochiste, BaseStats::new(200, 5, 5, 5, 5, 5)),
        &tables,
    );
    let mut target = state(Side::P2, dummy("Cible", BaseStats::new(800, 1, 1, 1, 1, 1)), &tables);
    maso.current_hp -= 100;
    maso.maso_taken = 100;

    AbilityResolver::offensive(&mut ex, &mut maso, &mut target, Class::Masochiste);

    assert!(target.current_hp < 800);
    assert_eq!(maso.maso_taken, 0);
    assert!(lines.iter().any(|line| line.contains("Martyre")));
}

#[test]
fn equal_speed_lets_p1_act_first_every_turn() {
    let tables = BalanceTables::default();
    let rng = PcgRng;
    let env = Env::new(&tables, &rng).as_duel_env();
    let p1 = Combatant::hero("Alpha", Race::Humain, Class::Guerrier, BaseStats::new(400, 20, 10, 5, 10, 10));
    let p2 = Combatant::hero("Beta", Race::Humain, Class::Guerrier, BaseStats::new(400, 20, 10, 5, 10, 10));

    let result = DuelEngine::new(env, DuelConfig::new().with_max_turns(10))
        .run(p1, p2, 7)
        .expect("valid match");

    let steps = result.steps.steps();
    for (index, step) in steps.iter().enumerate() {
        if step.phase != Phase::TurnStart {
            continue;
        }
        assert_eq!(step.actor, Side::P1);
        assert_eq!(steps[index + 1].phase, Phase::Action);
        assert_eq!(steps[index + 1].actor, Side::P1);
    }
}

#[test]
fn undead_survives_a_lethal_hit_once() {
    let tables = no_crit_tables();
    let rng = PcgRng;
    let env = Env::new(&tables, &rng).as_duel_env();

    // 95 + 5 mort-vivant = 100 max HP
    let undead = Combatant::hero("Liche", Race::MortVivant, Class::Mage, BaseStats::new(95, 5, 5, 5, 5, 1));
    let brute = dummy("Ogre", BaseStats::new(5_000, 500, 10, 0, 10, 50));

    let result = DuelEngine::new(env, DuelConfig::default())
        .run(undead, brute, 3)
        .expect("valid match");

    let revive_hp = (tables.race_passives.undead_revive * 100.0).round() as u32;
    let first_hit = result
        .steps
        .steps()
        .iter()
        .find(|step| step.phase == Phase::Action && step.actor == Side::P2)
        .expect("the ogre acts");
    assert_eq!(first_hit.p1_hp, revive_hp);
    assert!(first_hit.logs.iter().any(|l| l.contains("se relève d'entre les morts")));

    let revivals = result
        .steps
        .lines()
        .filter(|l| l.contains("se relève d'entre les morts"))
        .count();
    assert_eq!(revivals, 1);
    assert_eq!(result.winner_side, Side::P2);
    assert_eq!(result.reason, MatchEndReason::Knockout);
    assert_eq!(result.turns, 2);
}

#[test]
fn mutual_defeat_goes_to_the_acting_side() {
    let mut tables = no_crit_tables();
    tables.classes.paladin.interval = 2;
    let rng = PcgRng;
    let env = Env::new(&tables, &rng).as_duel_env();

    // Paladin: 1475 + 15 humain + 10 paladin = 1500 HP, def 3 + 3 + 4 = 10.
    let paladin = Combatant::hero("Galaad", Race::Humain, Class::Paladin, BaseStats::new(1_475, 0, 3, 0, 0, 50));
    // Each ogre hit deals 1000 − 5 = 995; the armed riposte on turn 2 sends 398 back.
    let ogre = dummy("Ogre", BaseStats::new(10, 1_000, 100, 0, 100, 1));

    let result = DuelEngine::new(env, DuelConfig::default())
        .run(ogre, paladin, 9)
        .expect("valid match");

    let last_action = result
        .steps
        .steps()
        .iter()
        .rev()
        .find(|step| step.phase == Phase::Action)
        .expect("an action step");
    assert_eq!(last_action.actor, Side::P1);
    assert_eq!((last_action.p1_hp, last_action.p2_hp), (0, 0));

    assert_eq!(result.winner_side, Side::P1);
    assert_eq!(result.winner_name, "Ogre");
    assert_eq!(result.turns, 2);
    let victory = result.steps.steps().last().expect("victory step");
    assert_eq!(
        victory.logs,
        vec![
            "💀 Galaad est vaincu".to_string(),
            "🏆 Ogre remporte le combat !".to_string()
        ]
    );
}
