//! Heroes and bosses available to the front ends.

use std::path::Path;

use anyhow::{Context, bail};
use duel_core::{Archetype, CombatantRecord};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub heroes: Vec<CombatantRecord>,
    #[serde(default)]
    pub bosses: Vec<CombatantRecord>,
}

impl Roster {
    /// Looks a record up by name, ignoring case. Heroes shadow bosses.
    pub fn find(&self, name: &str) -> Option<&CombatantRecord> {
        let wanted = name.to_lowercase();
        self.entries()
            .find(|record| record.name.to_lowercase() == wanted)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CombatantRecord> {
        self.heroes.iter().chain(self.bosses.iter())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries().map(|record| record.name.as_str()).collect()
    }

    /// Checks each list holds the archetype it is named after.
    fn check(&self) -> LoadResult<()> {
        if let Some(record) = self.heroes.iter().find(|r| !matches!(r.archetype, Archetype::Hero { .. })) {
            bail!("'{}' is listed as a hero but is a boss", record.name);
        }
        if let Some(record) = self.bosses.iter().find(|r| !matches!(r.archetype, Archetype::Boss(_))) {
            bail!("'{}' is listed as a boss but is a hero", record.name);
        }
        Ok(())
    }
}

/// Loader for the roster RON file.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        let roster = Self::parse(&content)
            .with_context(|| format!("Failed to parse roster {}", path.display()))?;
        tracing::debug!(
            heroes = roster.heroes.len(),
            bosses = roster.bosses.len(),
            "loaded roster"
        );
        Ok(roster)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let roster: Roster = ron::from_str(content)?;
        roster.check()?;
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{BossAbility, Class, Race};

    const ROSTER: &str = r#"(
        heroes: [
            (
                name: "Élodie",
                archetype: Hero(race: Elfe, class: Voleur),
                level: 4,
                base: (hp: 90, auto: 14, def: 6, cap: 10, rescap: 6, spd: 18),
                weapon: Some("dague"),
                passive: Some((id: "focus", level: 2)),
            ),
        ],
        bosses: [
            (
                name: "Golem",
                archetype: Boss([Crush(interval: 3, turns: 1), Venom(stacks: 1)]),
                base: (hp: 400, auto: 22, def: 20, cap: 0, rescap: 5, spd: 4),
            ),
        ],
    )"#;

    #[test]
    fn parses_heroes_and_bosses() {
        let roster = RosterLoader::parse(ROSTER).expect("valid ron");
        let hero = roster.find("élodie").expect("case-insensitive lookup");
        assert_eq!(
            hero.archetype,
            Archetype::Hero { race: Race::Elfe, class: Class::Voleur }
        );
        assert_eq!(hero.passive.as_ref().map(|p| p.level), Some(2));

        let golem = roster.find("GOLEM").expect("boss lookup");
        assert_eq!(golem.level, 1);
        match &golem.archetype {
            Archetype::Boss(kit) => assert_eq!(kit.abilities()[0], BossAbility::Crush { interval: 3, turns: 1 }),
            other => panic!("expected a boss, got {other:?}"),
        }
        assert_eq!(roster.names(), vec!["Élodie", "Golem"]);
    }

    #[test]
    fn misfiled_archetype_is_refused() {
        let misfiled = r#"(bosses: [(name: "X", archetype: Hero(race: Orc, class: Mage), base: (hp: 1, auto: 1, def: 1, cap: 1, rescap: 1, spd: 1))])"#;
        assert!(RosterLoader::parse(misfiled).is_err());
    }
}
