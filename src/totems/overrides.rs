//! Override files
//!
//! An override file patches a base layer at load time. It is regenerated on
//! every load so it always lists every key of the layer: keys somebody has
//! patched keep their entry verbatim, the rest get a snapshot entry holding
//! only `printable`. Entries for keys the layer no longer has are dropped.

use std::path::Path;

use crate::demiurge::PersonalityMap;
use crate::error::Result;

use super::persistence::PersonalityStore;

/// Outcome of merging a layer with its override file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// The layer with overrides applied
    pub merged: PersonalityMap,
    /// What the override file should contain afterwards
    pub overrides: PersonalityMap,
    /// Override keys that matched nothing in the layer
    pub pruned: Vec<String>,
}

/// Merges `base` with `current` overrides. Pure; no file is touched.
pub fn resolve_overrides(base: PersonalityMap, current: Option<&PersonalityMap>) -> Resolution {
    let mut merged = PersonalityMap::with_capacity(base.len());
    let mut overrides = PersonalityMap::with_capacity(base.len());

    for (key, outline) in base {
        match current.and_then(|c| c.get(&key)) {
            Some(patch) => {
                overrides.insert(key.clone(), patch.clone());
                merged.insert(key, outline.overridden_by(patch));
            }
            None => {
                overrides.insert(key.clone(), outline.snapshot());
                merged.insert(key, outline);
            }
        }
    }

    let pruned = current
        .map(|c| {
            c.keys()
                .filter(|key| !merged.contains_key(*key))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    Resolution {
        merged,
        overrides,
        pruned,
    }
}

/// Applies an override file to a layer and rewrites the file.
pub struct OverrideResolver<'a, S: PersonalityStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: PersonalityStore + ?Sized> OverrideResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns the merged layer. The override file at `path` is replaced
    /// with the regenerated overrides; a missing file counts as empty.
    pub fn apply(&self, path: &Path, base: PersonalityMap) -> Result<PersonalityMap> {
        let current = if self.store.exists(path) {
            Some(self.store.read(path)?)
        } else {
            None
        };

        let resolution = resolve_overrides(base, current.as_ref());

        if !resolution.pruned.is_empty() {
            tracing::warn!(
                "Dropping {} stale override entries from {:?}: {}",
                resolution.pruned.len(),
                path,
                resolution.pruned.join(", ")
            );
        }

        self.store.write(path, &resolution.overrides)?;
        tracing::debug!(
            "Regenerated {:?} with {} entries",
            path,
            resolution.overrides.len()
        );

        Ok(resolution.merged)
    }
}
