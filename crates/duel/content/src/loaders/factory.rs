//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use duel_core::{BalanceTables, DuelConfig};

use crate::loaders::{Catalog, CatalogLoader, ConfigLoader, LoadResult, Roster, RosterLoader, TablesLoader};

/// Content factory that loads all duel content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// ├── weapons.ron
/// ├── passives.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load match configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<DuelConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load balance tables from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<BalanceTables> {
        TablesLoader::load(&self.data_dir.join("tables.toml"))
    }

    /// Load weapons and mage tower passives from `weapons.ron` and `passives.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load(
            &self.data_dir.join("weapons.ron"),
            &self.data_dir.join("passives.ron"),
        )
    }

    /// Load heroes and bosses from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = ContentFactory::new("/nonexistent/duel").load_config().expect_err("no file");
        assert!(error.to_string().contains("/nonexistent/duel/config.toml"));
    }
}
