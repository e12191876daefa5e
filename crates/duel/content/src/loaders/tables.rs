//! Balance tables loader.

use std::path::Path;

use anyhow::Context;
use duel_core::BalanceTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance tables from TOML files.
///
/// Every section is optional; omitted keys fall back to the shipped values in
/// [`BalanceTables::default`].
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<BalanceTables> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse tables {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BalanceTables> {
        let tables: BalanceTables = toml::from_str(content)?;
        tracing::debug!(
            base_crit = tables.combat.base_crit,
            mitigation = tables.combat.mitigation_factor,
            "loaded balance tables"
        );
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_shipped_tables() {
        assert_eq!(TablesLoader::parse("").expect("valid"), BalanceTables::default());
    }

    #[test]
    fn overrides_single_values() {
        let tables = TablesLoader::parse(
            "[combat]\nbase_crit = 0.25\n\n[classes.paladin]\ninterval = 5\nability = { reflect = 0.5 }\n",
        )
        .expect("valid");
        assert_eq!(tables.combat.base_crit, 0.25);
        assert_eq!(tables.combat.crit_multiplier, 1.5);
        assert_eq!(tables.classes.paladin.interval, 5);
        assert_eq!(tables.classes.paladin.ability.reflect, 0.5);
        assert_eq!(tables.classes.mage, BalanceTables::default().classes.mage);
    }
}
