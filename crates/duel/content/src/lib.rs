//! Data-driven duel content and its loaders.
//!
//! This crate reads the files a deployment ships next to the engine:
//! - Balance tables (TOML)
//! - Match configuration (TOML)
//! - Weapon and mage tower catalogs (RON)
//! - Heroes and bosses roster (RON)
//!
//! Content feeds the oracles `duel-core` consumes and never appears in match
//! state. All loaders deserialize `duel-core` types directly through serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    Catalog, CatalogLoader, ConfigLoader, ContentFactory, PassiveCatalog, Roster, RosterLoader,
    TablesLoader, WeaponCatalog,
};
