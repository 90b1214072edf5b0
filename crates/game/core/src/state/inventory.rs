//! Resource ledger and its pure algebra.
//!
//! Counters are stored sparsely: a key that is absent reads as zero and
//! zero-valued counters are never stored. The same [`Inventory`] type therefore
//! serves both as a holding and as a delta where only mentioned fields apply,
//! and two equal inventories always encode to the same bytes.

use std::collections::BTreeMap;

use crate::config::GameConfig;

use super::items::{AlchemicalResource, Dialect};

/// Sparse non-negative counters keyed by an enum.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counts<K: Ord>(BTreeMap<K, u32>);

impl<K: Ord> Default for Counts<K> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord + Copy> Counts<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: K) -> u32 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: K, value: u32) {
        if value == 0 {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    #[must_use]
    pub fn with(mut self, key: K, value: u32) -> Self {
        self.set(key, value);
        self
    }

    /// Non-zero counters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    fn plus(&self, delta: &Self) -> Self {
        let mut result = self.clone();
        for (key, amount) in delta.iter() {
            result.set(key, self.get(key).saturating_add(amount));
        }
        result
    }

    fn minus(&self, delta: &Self) -> Option<Self> {
        let mut result = self.clone();
        for (key, amount) in delta.iter() {
            result.set(key, self.get(key).checked_sub(amount)?);
        }
        Some(result)
    }

    fn capped(&self, cap: u32) -> Self {
        Self(
            self.0
                .iter()
                .filter_map(|(k, v)| {
                    let v = (*v).min(cap);
                    (v > 0).then_some((*k, v))
                })
                .collect(),
        )
    }
}

impl<K: Ord + Copy> FromIterator<(K, u32)> for Counts<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, value) in iter {
            counts.set(key, counts.get(key).saturating_add(value));
        }
        counts
    }
}

/// Everything the character carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub rubies: u32,
    pub alchemy: Counts<AlchemicalResource>,
    pub raw_pages: Counts<Dialect>,
    pub translated_pages: Counts<Dialect>,
}

impl Inventory {
    /// Starting holdings of a new character.
    pub fn initial() -> Self {
        Self::empty().with_rubies(GameConfig::INITIAL_RUBIES)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rubies(mut self, rubies: u32) -> Self {
        self.rubies = rubies;
        self
    }

    #[must_use]
    pub fn with_alchemy(mut self, resource: AlchemicalResource, amount: u32) -> Self {
        self.alchemy.set(resource, amount);
        self
    }

    #[must_use]
    pub fn with_raw_pages(mut self, dialect: Dialect, amount: u32) -> Self {
        self.raw_pages.set(dialect, amount);
        self
    }

    #[must_use]
    pub fn with_translated_pages(mut self, dialect: Dialect, amount: u32) -> Self {
        self.translated_pages.set(dialect, amount);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rubies == 0
            && self.alchemy.is_empty()
            && self.raw_pages.is_empty()
            && self.translated_pages.is_empty()
    }

    /// Sums matching counters.
    pub fn add(&self, delta: &Inventory) -> Inventory {
        Inventory {
            rubies: self.rubies.saturating_add(delta.rubies),
            alchemy: self.alchemy.plus(&delta.alchemy),
            raw_pages: self.raw_pages.plus(&delta.raw_pages),
            translated_pages: self.translated_pages.plus(&delta.translated_pages),
        }
    }

    /// Subtracts `delta`, or returns `None` if any counter would go negative.
    ///
    /// The result is computed in full before it is returned, so a failure
    /// never exposes a partially-debited inventory.
    pub fn subtract(&self, delta: &Inventory) -> Option<Inventory> {
        Some(Inventory {
            rubies: self.rubies.checked_sub(delta.rubies)?,
            alchemy: self.alchemy.minus(&delta.alchemy)?,
            raw_pages: self.raw_pages.minus(&delta.raw_pages)?,
            translated_pages: self.translated_pages.minus(&delta.translated_pages)?,
        })
    }

    /// Clamps rubies and alchemy to `cap`, and pages to the page capacity.
    pub fn limit(&self, cap: u32) -> Inventory {
        Inventory {
            rubies: self.rubies.min(cap),
            alchemy: self.alchemy.capped(cap),
            raw_pages: self.raw_pages.capped(GameConfig::PAGE_CAPACITY),
            translated_pages: self.translated_pages.capped(GameConfig::PAGE_CAPACITY),
        }
    }

    /// True when `self` could be subtracted from `holdings`.
    pub fn is_affordable_from(&self, holdings: &Inventory) -> bool {
        holdings.subtract(self).is_some()
    }

    /// True when every counter respects the given storage capacity.
    pub fn within_bounds(&self, cap: u32) -> bool {
        self.rubies <= cap
            && self.alchemy.iter().all(|(_, v)| v <= cap)
            && self
                .raw_pages
                .iter()
                .chain(self.translated_pages.iter())
                .all(|(_, v)| v <= GameConfig::PAGE_CAPACITY)
    }
}
