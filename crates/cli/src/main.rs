//! Command-line front end for the duel engine.
//!
//! Loads the content bundle, resolves two roster entries and prints the
//! replay. Run with: `duel Aldric "Liche ancienne" --seed 7`

mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use duel_content::{ContentFactory, Roster};
use duel_core::{CombatantRecord, DuelConfig, DuelEngine, EncounterMode, Env, PcgRng, TurnCapRule};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// Turn-based duel simulator
#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Resolve a duel between two roster entries", long_about = None)]
#[command(version)]
struct Cli {
    /// Name of the first combatant (acts first on speed ties)
    #[arg(value_name = "P1", required_unless_present = "list")]
    p1: Option<String>,

    /// Name of the second combatant
    #[arg(value_name = "P2", required_unless_present = "list")]
    p2: Option<String>,

    /// Content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Seed for the random stream. Drawn at random when absent
    #[arg(short, long, value_name = "N")]
    seed: Option<u64>,

    /// Print the match result as JSON instead of log lines
    #[arg(long)]
    json: bool,

    /// Game mode announced in the intro banner
    #[arg(short, long, value_enum, value_name = "MODE")]
    mode: Option<ModeArg>,

    /// Override the configured turn cap
    #[arg(long, value_name = "TURNS")]
    max_turns: Option<u32>,

    /// Override how a capped match is decided
    #[arg(long, value_enum, value_name = "RULE")]
    turn_cap_rule: Option<TurnCapArg>,

    /// List the roster and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Arena,
    Dungeon,
    Forest,
    Labyrinth,
}

impl From<ModeArg> for EncounterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Arena => EncounterMode::Arena,
            ModeArg::Dungeon => EncounterMode::Dungeon,
            ModeArg::Forest => EncounterMode::Forest,
            ModeArg::Labyrinth => EncounterMode::Labyrinth,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TurnCapArg {
    /// P1 wins a capped match
    FirstListed,
    /// Highest remaining HP fraction wins
    HigherHpRatio,
}

impl From<TurnCapArg> for TurnCapRule {
    fn from(rule: TurnCapArg) -> Self {
        match rule {
            TurnCapArg::FirstListed => TurnCapRule::FirstListed,
            TurnCapArg::HigherHpRatio => TurnCapRule::HigherHpRatio,
        }
    }
}

impl Cli {
    fn factory(&self) -> ContentFactory {
        match &self.data {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        }
    }

    fn config(&self, factory: &ContentFactory) -> Result<DuelConfig> {
        let mut config = factory.load_config()?;
        if let Some(mode) = self.mode {
            config = config.with_mode(mode.into());
        }
        if let Some(max_turns) = self.max_turns {
            config = config.with_max_turns(max_turns);
        }
        if let Some(rule) = self.turn_cap_rule {
            config = config.with_turn_cap_rule(rule.into());
        }
        Ok(config)
    }

    fn execute(self) -> Result<()> {
        let factory = self.factory();
        let roster = factory.load_roster()?;

        if self.list {
            output::print_roster(&roster);
            return Ok(());
        }

        let p1 = lookup(&roster, self.p1.as_deref())?;
        let p2 = lookup(&roster, self.p2.as_deref())?;

        let config = self.config(&factory)?;
        let tables = factory.load_tables()?;
        let catalog = factory.load_catalog()?;

        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                tracing::info!(seed, "drew a random seed");
                seed
            }
        };

        let rng = PcgRng;
        let env = Env::new(&tables, &rng).as_duel_env();
        let result = DuelEngine::new(env, config)
            .run_records(p1, p2, &catalog, seed)
            .with_context(|| format!("Failed to resolve {} vs {}", p1.name, p2.name))?;

        let format = if self.json { OutputFormat::Json } else { OutputFormat::Log };
        output::print_result(&result, format)
    }
}

fn lookup<'r>(roster: &'r Roster, name: Option<&str>) -> Result<&'r CombatantRecord> {
    let name = name.context("missing combatant name")?;
    roster.find(name).with_context(|| {
        format!(
            "unknown combatant '{name}'\n\nAvailable: {}",
            roster.names().join(", ")
        )
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().execute()
}
