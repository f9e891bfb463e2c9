//! Importing personality layers from other mods
//!
//! An import reads the mod's personality file, applies the mod's own
//! override file, stamps provenance and swaps the whole layer in. Nothing
//! is registered unless every step succeeds.

use std::path::Path;

use crate::error::{PersonalityError, Result};

use super::overrides::OverrideResolver;
use super::persistence::PersonalityStore;
use super::registry::PersonalityManager;

impl<S: PersonalityStore> PersonalityManager<S> {
    /// Loads `import_path` as the layer for `source_id`, replacing any
    /// previous layer from that source. Returns the layer size.
    pub fn import_personalities<P: AsRef<Path>>(
        &mut self,
        source_id: &str,
        import_path: P,
    ) -> Result<usize> {
        validate_source_id(source_id)?;

        let mod_personalities = self.store.read(import_path.as_ref())?;

        let override_path = self.config.import_override_path(source_id);
        let mut mod_personalities =
            OverrideResolver::new(&self.store).apply(&override_path, mod_personalities)?;

        // After overrides, so an override file cannot claim another source.
        for outline in mod_personalities.values_mut() {
            outline.set_source_id(source_id);
        }

        let count = mod_personalities.len();
        if self
            .imported_personalities
            .insert(source_id.to_string(), mod_personalities)
            .is_some()
        {
            tracing::debug!("Replaced previous personalities from <{}>", source_id);
        }

        tracing::info!("{} personalities imported from <{}>.", count, source_id);
        Ok(count)
    }
}

fn validate_source_id(source_id: &str) -> Result<()> {
    let unsafe_name = source_id.is_empty()
        || source_id == "."
        || source_id == ".."
        || source_id.contains(['/', '\\', '\0']);

    if unsafe_name {
        return Err(PersonalityError::InvalidSourceId(source_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demiurge::{Personality, PersonalityMap, PersonalityOutline};
    use crate::initiation::config::PersonalityConfig;
    use crate::totems::persistence::JsonStore;
    use std::fs;
    use tempfile::TempDir;

    fn manager(temp_dir: &TempDir) -> PersonalityManager {
        PersonalityManager::new(
            PersonalityConfig::new(temp_dir.path()),
            Vec::<Personality>::new(),
        )
        .unwrap()
    }

    fn write_import(path: &Path, entries: &[(&str, &str)]) {
        let mut layer = PersonalityMap::new();
        for (key, name) in entries {
            layer.insert(
                key.to_string(),
                PersonalityOutline {
                    name: Some(name.to_string()),
                    ..PersonalityOutline::default()
                },
            );
        }
        JsonStore.write(path, &layer).unwrap();
    }

    #[test]
    fn test_same_key_in_two_sources_stays_separate() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager(&temp_dir);
        let a = temp_dir.path().join("a.json");
        let b = temp_dir.path().join("b.json");
        write_import(&a, &[("SHARED", "From A")]);
        write_import(&b, &[("SHARED", "From B")]);

        manager.import_personalities("A", &a).unwrap();
        manager.import_personalities("B", &b).unwrap();

        let shared_a = &manager.imported("A").unwrap()["SHARED"];
        let shared_b = &manager.imported("B").unwrap()["SHARED"];
        assert_eq!(shared_a.source_id.as_deref(), Some("A"));
        assert_eq!(shared_a.name.as_deref(), Some("From A"));
        assert_eq!(shared_b.source_id.as_deref(), Some("B"));
        assert_eq!(shared_b.name.as_deref(), Some("From B"));

        let listed: Vec<Personality> = manager
            .get_personalities()
            .into_iter()
            .filter(|p| p.name_string_key == "SHARED")
            .collect();
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn test_reimport_replaces_layer() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager(&temp_dir);
        let path = temp_dir.path().join("mod.json");

        write_import(&path, &[("OLD", "Old"), ("KEPT", "Kept v1")]);
        assert_eq!(manager.import_personalities("mod", &path).unwrap(), 2);

        write_import(&path, &[("KEPT", "Kept v2"), ("NEW", "New")]);
        assert_eq!(manager.import_personalities("mod", &path).unwrap(), 2);

        let layer = manager.imported("mod").unwrap();
        assert!(!layer.contains_key("OLD"));
        assert_eq!(layer["KEPT"].name.as_deref(), Some("Kept v2"));
        assert!(layer.contains_key("NEW"));
        assert_eq!(manager.source_ids().count(), 1);

        let overrides = JsonStore
            .read(&temp_dir.path().join("OVERRIDE.mod.json"))
            .unwrap();
        assert_eq!(overrides.keys().collect::<Vec<_>>(), vec!["KEPT", "NEW"]);
    }

    #[test]
    fn test_override_cannot_spoof_provenance() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager(&temp_dir);
        let path = temp_dir.path().join("mod.json");
        write_import(&path, &[("DUPE", "Dupe")]);
        fs::write(
            temp_dir.path().join("OVERRIDE.mod.json"),
            r#"{"DUPE": {"sourceId": "someone-else", "hair": 7}}"#,
        )
        .unwrap();

        manager.import_personalities("mod", &path).unwrap();

        let dupe = &manager.imported("mod").unwrap()["DUPE"];
        assert_eq!(dupe.source_id.as_deref(), Some("mod"));
        assert_eq!(dupe.hair, Some(7));
    }

    #[test]
    fn test_failed_import_leaves_registry_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager(&temp_dir);
        let path = temp_dir.path().join("mod.json");
        write_import(&path, &[("DUPE", "Dupe")]);
        manager.import_personalities("mod", &path).unwrap();
        let before = manager.count_personalities();

        fs::write(&path, "{ broken").unwrap();
        let err = manager.import_personalities("mod", &path).unwrap_err();
        assert!(err.is_decode());

        let missing = manager
            .import_personalities("other", temp_dir.path().join("missing.json"))
            .unwrap_err();
        assert!(matches!(missing, PersonalityError::MissingSource { .. }));

        assert_eq!(manager.count_personalities(), before);
        assert!(manager.imported("mod").unwrap().contains_key("DUPE"));
        assert!(manager.imported("other").is_none());
        assert!(!temp_dir.path().join("OVERRIDE.other.json").exists());
    }

    #[test]
    fn test_unwritable_override_file_aborts_import() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager(&temp_dir);
        let path = temp_dir.path().join("mod.json");
        write_import(&path, &[("DUPE", "Dupe")]);
        manager.import_personalities("mod", &path).unwrap();
        let before = manager.count_personalities();

        fs::create_dir(temp_dir.path().join("OVERRIDE.blocked.json")).unwrap();
        let err = manager.import_personalities("blocked", &path).unwrap_err();

        assert!(err.is_io());
        assert!(manager.imported("blocked").is_none());
        assert_eq!(manager.count_personalities(), before);
        assert_eq!(manager.source_ids().collect::<Vec<_>>(), vec!["mod"]);
    }

    #[test]
    fn test_unsafe_source_ids_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager(&temp_dir);
        let path = temp_dir.path().join("mod.json");
        write_import(&path, &[("DUPE", "Dupe")]);

        for source_id in ["", "..", "../escape", "nested/mod", "win\\mod"] {
            let err = manager.import_personalities(source_id, &path).unwrap_err();
            assert!(matches!(err, PersonalityError::InvalidSourceId(_)));
        }
        assert_eq!(manager.source_ids().count(), 0);
    }
}
