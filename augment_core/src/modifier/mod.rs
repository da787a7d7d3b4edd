//! Modifier aggregate - per-category multiplier tables keyed by augment id
//!
//! Every augment contributes at most one multiplier per category. The
//! effective multiplier of a category is the product of its entries:
//!
//! `effective = Π(entry)`, or `1.0` when the category is empty.
//!
//! Reads go through [`ModifierAggregate::effective`]. Mutation is crate-private
//! and reached only through the augment hook context, which keys every write
//! by the calling augment's own id.

mod derived;

pub use derived::{BaseStats, DerivedStats};

use crate::types::AugmentId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Effect category a multiplier applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierCategory {
    Damage,
    Speed,
    Rotation,
    FireRate,
}

impl ModifierCategory {
    /// Get all categories
    pub fn all() -> &'static [ModifierCategory] {
        &[
            ModifierCategory::Damage,
            ModifierCategory::Speed,
            ModifierCategory::Rotation,
            ModifierCategory::FireRate,
        ]
    }
}

/// Multiplier tables for one agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierAggregate {
    // BTreeMap keeps the product order stable across runs
    tables: HashMap<ModifierCategory, BTreeMap<AugmentId, f64>>,
}

impl ModifierAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Product of all entries in a category (1.0 when empty)
    pub fn effective(&self, category: ModifierCategory) -> f64 {
        self.tables
            .get(&category)
            .map(|table| table.values().product())
            .unwrap_or(1.0)
    }

    /// Multiplier contributed by one augment, if any
    pub fn get(&self, category: ModifierCategory, id: &AugmentId) -> Option<f64> {
        self.tables.get(&category).and_then(|t| t.get(id)).copied()
    }

    pub fn contains(&self, category: ModifierCategory, id: &AugmentId) -> bool {
        self.get(category, id).is_some()
    }

    /// Number of contributors in a category
    pub fn len(&self, category: ModifierCategory) -> usize {
        self.tables.get(&category).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(BTreeMap::is_empty)
    }

    /// Contributors to a category, ordered by augment id
    pub fn entries(&self, category: ModifierCategory) -> impl Iterator<Item = (&AugmentId, f64)> {
        self.tables
            .get(&category)
            .into_iter()
            .flat_map(|t| t.iter().map(|(id, v)| (id, *v)))
    }

    /// Insert only when absent. Returns true if the table changed.
    pub(crate) fn insert_if_absent(&mut self, category: ModifierCategory, id: &AugmentId, value: f64) -> bool {
        let table = self.tables.entry(category).or_default();
        if table.contains_key(id) {
            return false;
        }
        table.insert(id.clone(), value);
        true
    }

    /// Insert or overwrite. Returns true if the table changed.
    pub(crate) fn insert_or_refresh(&mut self, category: ModifierCategory, id: &AugmentId, value: f64) -> bool {
        let table = self.tables.entry(category).or_default();
        match table.insert(id.clone(), value) {
            Some(previous) => previous != value,
            None => true,
        }
    }

    /// Remove one entry. Returns true if it was present.
    pub(crate) fn remove(&mut self, category: ModifierCategory, id: &AugmentId) -> bool {
        self.tables
            .get_mut(&category)
            .map_or(false, |t| t.remove(id).is_some())
    }

    /// Remove everything an augment contributes. Returns true if anything was removed.
    pub(crate) fn remove_source(&mut self, id: &AugmentId) -> bool {
        let mut removed = false;
        for table in self.tables.values_mut() {
            removed |= table.remove(id).is_some();
        }
        removed
    }
}
