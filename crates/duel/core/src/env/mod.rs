//! Traits describing read-only match data.
//!
//! Oracles expose balance tables, the weapon/passive catalog and randomness.
//! [`DuelEnv`] bundles the two the engine needs while a match runs, so the
//! rules never couple to a concrete content source.
mod catalog;
mod rng;
mod tables;

pub use catalog::{CatalogOracle, PassiveDefinition};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use tables::{
    ArcaneTuning, Awakening, BalanceTables, BreachTuning, ClassProfile, ClassTable, CombatRules,
    EvasionTuning, FamiliarTuning, MartyrTuning, PrayerTuning, RacePassiveTuning, RaceProfile,
    RaceTable, RiposteTuning, TablesOracle, VolleyTuning,
};

/// Read-only oracles consulted while a match is resolved.
pub struct Env<'a, T, R>
where
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    tables: &'a T,
    rng: &'a R,
}

// Manual impls: derives would require `T: Clone`, which trait objects are not.
impl<T, R> Clone for Env<'_, T, R>
where
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, R> Copy for Env<'_, T, R>
where
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type DuelEnv<'a> = Env<'a, dyn TablesOracle + 'a, dyn RngOracle + 'a>;

impl<'a, T, R> Env<'a, T, R>
where
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(tables: &'a T, rng: &'a R) -> Self {
        Self { tables, rng }
    }

    pub fn tables(&self) -> &'a T {
        self.tables
    }

    pub fn rng(&self) -> &'a R {
        self.rng
    }
}

impl<'a, T, R> Env<'a, T, R>
where
    T: TablesOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into the trait-object based [`DuelEnv`].
    pub fn as_duel_env(&self) -> DuelEnv<'a> {
        let tables: &'a dyn TablesOracle = self.tables;
        let rng: &'a dyn RngOracle = self.rng;
        Env::new(tables, rng)
    }
}
