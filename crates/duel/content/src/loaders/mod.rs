//! Content loaders for reading duel data from files.
//!
//! Each loader turns one RON/TOML file into a `duel-core` type or an oracle
//! implementation. [`ContentFactory`] knows the file layout of a data
//! directory.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod roster;
pub mod tables;

pub use catalog::{Catalog, CatalogLoader, PassiveCatalog, WeaponCatalog};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::{Roster, RosterLoader};
pub use tables::TablesLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
