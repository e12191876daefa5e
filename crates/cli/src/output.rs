//! Rendering of roster listings and match results.

use anyhow::{Context, Result};
use duel_content::Roster;
use duel_core::{Archetype, MatchResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tagged French log lines followed by the digest.
    Log,
    /// `MatchResult` as pretty JSON; the digest goes to stderr.
    Json,
}

pub fn print_roster(roster: &Roster) {
    for record in roster.entries() {
        let kind = match &record.archetype {
            Archetype::Hero { race, class } => format!("{race} {class}"),
            Archetype::Boss(_) => "Boss".to_string(),
        };
        println!("{:<24} {kind} (niv. {})", record.name, record.level);
    }
}

pub fn print_result(result: &MatchResult, format: OutputFormat) -> Result<()> {
    let digest = hex::encode(result.digest());
    match format {
        OutputFormat::Log => {
            for line in result.steps.lines() {
                println!("{line}");
            }
            println!();
            println!("digest: {digest}");
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)
                .context("Failed to serialize match result")?;
            println!("{json}");
            eprintln!("digest: {digest}");
        }
    }
    Ok(())
}
