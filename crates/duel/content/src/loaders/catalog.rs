//! Weapon and mage tower catalogs.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, bail};
use duel_core::{CatalogOracle, PassiveDefinition, Weapon};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<Weapon>,
}

/// Mage tower catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassiveCatalog {
    pub passives: Vec<PassiveDefinition>,
}

/// In-memory [`CatalogOracle`] keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: HashMap<String, Weapon>,
    passives: HashMap<String, PassiveDefinition>,
}

impl Catalog {
    /// Indexes both catalogs, refusing duplicate ids.
    pub fn new(weapons: WeaponCatalog, passives: PassiveCatalog) -> LoadResult<Self> {
        let mut catalog = Self::default();
        for weapon in weapons.weapons {
            if catalog.weapons.contains_key(&weapon.id) {
                bail!("duplicate weapon id '{}'", weapon.id);
            }
            catalog.weapons.insert(weapon.id.clone(), weapon);
        }
        for passive in passives.passives {
            if passive.max_level == 0 {
                bail!("passive '{}' has no levels", passive.id);
            }
            if catalog.passives.contains_key(&passive.id) {
                bail!("duplicate passive id '{}'", passive.id);
            }
            catalog.passives.insert(passive.id.clone(), passive);
        }
        Ok(catalog)
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    pub fn passive_count(&self) -> usize {
        self.passives.len()
    }
}

impl CatalogOracle for Catalog {
    fn weapon(&self, id: &str) -> Option<Weapon> {
        self.weapons.get(id).cloned()
    }

    fn passive(&self, id: &str) -> Option<PassiveDefinition> {
        self.passives.get(id).cloned()
    }
}

/// Loader for the weapon and mage tower RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load_weapons(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .with_context(|| format!("Failed to parse weapon catalog {}", path.display()))
    }

    pub fn load_passives(path: &Path) -> LoadResult<PassiveCatalog> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .with_context(|| format!("Failed to parse passive catalog {}", path.display()))
    }

    /// Loads both files into one [`Catalog`].
    pub fn load(weapons: &Path, passives: &Path) -> LoadResult<Catalog> {
        let catalog = Catalog::new(Self::load_weapons(weapons)?, Self::load_passives(passives)?)?;
        tracing::debug!(
            weapons = catalog.weapon_count(),
            passives = catalog.passive_count(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}
