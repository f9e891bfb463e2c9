//! Layered personality registry
//!
//! Three tiers of personalities: the host's stock roster, the user's custom
//! file and one layer per imported source. Layers never merge; the same key
//! can live in several of them.

use indexmap::IndexMap;

use crate::demiurge::{Personality, PersonalityMap};
use crate::initiation::config::PersonalityConfig;

use super::persistence::{JsonStore, PersonalityStore};

/// Owns every personality layer. Built by [`PersonalityManager::new`].
pub struct PersonalityManager<S: PersonalityStore = JsonStore> {
    pub(crate) config: PersonalityConfig,
    pub(crate) store: S,
    pub(crate) stock_personalities: PersonalityMap,
    pub(crate) custom_personalities: PersonalityMap,
    /// Keyed by source id, in first-import order
    pub(crate) imported_personalities: IndexMap<String, PersonalityMap>,
}

impl<S: PersonalityStore> PersonalityManager<S> {
    /// Every printable personality: stock, then custom, then each import.
    pub fn get_personalities(&self) -> Vec<Personality> {
        let mut personalities = Vec::new();

        personalities.extend(flatten_personalities(&self.stock_personalities));
        personalities.extend(flatten_personalities(&self.custom_personalities));

        for layer in self.imported_personalities.values() {
            personalities.extend(flatten_personalities(layer));
        }

        personalities
    }

    /// Size of all layers together, hidden personalities included.
    pub fn count_personalities(&self) -> usize {
        self.stock_personalities.len()
            + self.custom_personalities.len()
            + self
                .imported_personalities
                .values()
                .map(|layer| layer.len())
                .sum::<usize>()
    }

    pub fn stock(&self) -> &PersonalityMap {
        &self.stock_personalities
    }

    pub fn custom(&self) -> &PersonalityMap {
        &self.custom_personalities
    }

    pub fn imported(&self, source_id: &str) -> Option<&PersonalityMap> {
        self.imported_personalities.get(source_id)
    }

    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.imported_personalities.keys().map(String::as_str)
    }

    pub fn config(&self) -> &PersonalityConfig {
        &self.config
    }
}

fn flatten_personalities(personalities: &PersonalityMap) -> impl Iterator<Item = Personality> + '_ {
    personalities
        .iter()
        .filter(|(_, outline)| outline.is_printable())
        .map(|(key, outline)| outline.to_personality(key))
}
