//! French log lines.
//!
//! Side-attributed lines start with [`Side::tag`]; banners and separators are
//! untagged. Viewers key on the markers below and on the
//! `<n> points de dégâts` / `<n> points de vie` phrasing, so wording changes
//! here break replay consumers.

use super::Side;
use crate::config::EncounterMode;

pub const VICTORY_MARK: &str = "🏆";
pub const DEFEAT_MARK: &str = "💀";
pub const TURN_MARK: &str = "---";
pub const CRIT_MARK: &str = "CRITIQUE";

fn tagged(side: Side, text: String) -> String {
    format!("{}{text}", side.tag())
}

fn damage(amount: u32) -> String {
    format!("{amount} points de dégâts")
}

fn health(amount: u32) -> String {
    format!("{amount} points de vie")
}

// ===== banners =====

pub fn intro_banner(mode: EncounterMode, p1: &str, p2: &str) -> String {
    format!("⚔️ {mode} : {p1} affronte {p2} !")
}

pub fn presentation(side: Side, name: &str, title: &str, hp: u32) -> String {
    tagged(side, format!("{name} ({title}) entre en lice avec {}", health(hp)))
}

pub fn turn_separator(turn: u32) -> String {
    format!("{TURN_MARK} Tour {turn} {TURN_MARK}")
}

pub fn defeat(name: &str) -> String {
    format!("{DEFEAT_MARK} {name} est vaincu")
}

pub fn victory(name: &str) -> String {
    format!("{VICTORY_MARK} {name} remporte le combat !")
}

pub fn turn_limit(max_turns: u32) -> String {
    format!("⏳ Limite de {max_turns} tours atteinte")
}

// ===== hits =====

pub fn hit(side: Side, attacker: &str, target: &str, what: &str, amount: u32, crit: bool) -> String {
    let crit = if crit { format!("{CRIT_MARK} ! ") } else { String::new() };
    tagged(
        side,
        format!("{crit}{attacker} {what} {target} et inflige {}", damage(amount)),
    )
}

pub fn dodged(side: Side, defender: &str, attacker: &str) -> String {
    tagged(side, format!("{defender} esquive l'attaque de {attacker}"))
}

pub fn shield_absorbs(side: Side, defender: &str, amount: u32) -> String {
    tagged(
        side,
        format!("Le bouclier de {defender} absorbe {}", damage(amount)),
    )
}

pub fn reflected(side: Side, defender: &str, attacker: &str, amount: u32) -> String {
    tagged(
        side,
        format!("{defender} renvoie {} à {attacker}", damage(amount)),
    )
}

pub fn bleed_tick(side: Side, name: &str, amount: u32) -> String {
    tagged(side, format!("{name} saigne et perd {}", health(amount)))
}

pub fn bleed_applied(side: Side, target: &str, stacks: u32) -> String {
    tagged(side, format!("{target} saigne ({stacks} cumul(s))"))
}

pub fn true_damage(side: Side, attacker: &str, target: &str, source: &str, amount: u32) -> String {
    tagged(
        side,
        format!("{source} de {attacker} inflige {} à {target}", damage(amount)),
    )
}

// ===== self effects =====

pub fn heal(side: Side, name: &str, amount: u32) -> String {
    tagged(side, format!("{name} récupère {}", health(amount)))
}

pub fn ability(side: Side, name: &str, ability: &str) -> String {
    tagged(side, format!("{name} utilise {ability}"))
}

pub fn dodge_ready(side: Side, name: &str) -> String {
    tagged(side, format!("{name} se prépare à esquiver"))
}

pub fn reflect_ready(side: Side, name: &str, percent: u32) -> String {
    tagged(side, format!("{name} renverra {percent}% des dégâts subis"))
}

pub fn shield_up(side: Side, name: &str, amount: u32) -> String {
    tagged(
        side,
        format!("{name} est protégé par un bouclier de {amount} points"),
    )
}

pub fn stunned(side: Side, name: &str) -> String {
    tagged(side, format!("{name} est étourdi et perd son tour"))
}

pub fn stun_applied(side: Side, attacker: &str, target: &str, turns: u32) -> String {
    tagged(side, format!("{attacker} étourdit {target} ({turns} tour(s))"))
}

pub fn revived(side: Side, name: &str, hp: u32) -> String {
    tagged(
        side,
        format!("{name} se relève d'entre les morts avec {}", health(hp)),
    )
}

pub fn enraged(side: Side, name: &str) -> String {
    tagged(side, format!("{name} entre dans une rage folle !"))
}

pub fn anti_heal(side: Side, target: &str, percent: u32) -> String {
    tagged(side, format!("Les soins de {target} sont réduits de {percent}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_lines_are_tagged() {
        assert_eq!(
            hit(Side::P2, "Grok", "Lyra", "attaque", 15, false),
            "[P2] Grok attaque Lyra et inflige 15 points de dégâts"
        );
        assert_eq!(heal(Side::P1, "Lyra", 7), "[P1] Lyra récupère 7 points de vie");
    }

    #[test]
    fn crits_carry_the_marker() {
        let line = hit(Side::P1, "A", "B", "attaque", 30, true);
        assert!(line.starts_with("[P1] CRITIQUE ! "));
    }

    #[test]
    fn system_lines_are_untagged() {
        assert_eq!(turn_separator(3), "--- Tour 3 ---");
        assert!(victory("Lyra").starts_with(VICTORY_MARK));
        assert!(defeat("Grok").starts_with(DEFEAT_MARK));
        assert!(!intro_banner(EncounterMode::Arena, "A", "B").starts_with('['));
    }
}
