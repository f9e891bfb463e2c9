//! 🜂 Level 0: Initiation
//!
//! One-time construction of the personality registry:
//! - Stock roster from the host, patched by `OVERRIDE.json`
//! - Custom personalities from `PERSONALITIES.json`, seeded on first run
//! - An empty set of imported layers

pub mod config;

use indexmap::IndexMap;

use crate::demiurge::{
    PersonalityMap, PersonalityOutline, StockPersonality, EXAMPLE_PERSONALITY_KEY,
};
use crate::error::Result;
use crate::totems::overrides::OverrideResolver;
use crate::totems::persistence::{JsonStore, PersonalityStore};
use crate::totems::registry::PersonalityManager;

use config::{PersonalityConfig, MINIMUM_PERSONALITY_COUNT};

impl PersonalityManager<JsonStore> {
    /// Builds the registry on the local filesystem.
    pub fn new<I>(config: PersonalityConfig, stock: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: StockPersonality,
    {
        Self::with_store(config, stock, JsonStore)
    }
}

impl<S: PersonalityStore> PersonalityManager<S> {
    /// Builds the registry with a custom store. Any failure is fatal.
    pub fn with_store<I>(config: PersonalityConfig, stock: I, store: S) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: StockPersonality,
    {
        config.validate()?;

        let stock_personalities = load_stock_personalities(&config, &store, stock)?;
        let custom_personalities = load_custom_personalities(&config, &store)?;

        Ok(Self {
            config,
            store,
            stock_personalities,
            custom_personalities,
            imported_personalities: IndexMap::new(),
        })
    }
}

fn load_stock_personalities<S, I>(
    config: &PersonalityConfig,
    store: &S,
    stock: I,
) -> Result<PersonalityMap>
where
    S: PersonalityStore,
    I: IntoIterator,
    I::Item: StockPersonality,
{
    let stock_personalities: PersonalityMap = stock
        .into_iter()
        .map(|record| (record.stable_id().to_string(), record.to_outline()))
        .collect();

    if stock_personalities.len() < MINIMUM_PERSONALITY_COUNT {
        tracing::warn!(
            "Host roster has only {} personalities, expected at least {}",
            stock_personalities.len(),
            MINIMUM_PERSONALITY_COUNT
        );
    }

    let stock_personalities =
        OverrideResolver::new(store).apply(&config.override_path(), stock_personalities)?;

    tracing::info!(
        "Loaded the {} stock personalities.",
        stock_personalities.len()
    );
    Ok(stock_personalities)
}

fn load_custom_personalities<S: PersonalityStore>(
    config: &PersonalityConfig,
    store: &S,
) -> Result<PersonalityMap> {
    let path = config.personalities_path();

    if store.exists(&path) {
        tracing::info!(
            "Reading custom personalities from {}...",
            config.personalities_file
        );
        let custom_personalities = store.read(&path)?;
        tracing::info!(
            "Loaded {} user created personalities.",
            custom_personalities.len()
        );
        Ok(custom_personalities)
    } else {
        tracing::info!(
            "{} not found, a fresh one will be generated.",
            config.personalities_file
        );
        let mut custom_personalities = PersonalityMap::new();
        custom_personalities.insert(
            EXAMPLE_PERSONALITY_KEY.to_string(),
            PersonalityOutline::example(),
        );
        store.write(&path, &custom_personalities)?;
        Ok(custom_personalities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demiurge::Personality;
    use std::fs;
    use tempfile::TempDir;

    fn roster(keys: &[&str]) -> Vec<Personality> {
        keys.iter()
            .map(|key| Personality {
                name_string_key: key.to_string(),
                name: key.to_string(),
                ..Personality::default()
            })
            .collect()
    }

    #[test]
    fn test_first_run_seeds_custom_file_with_example() {
        let temp_dir = TempDir::new().unwrap();
        let config = PersonalityConfig::new(temp_dir.path());

        let manager =
            PersonalityManager::new(config.clone(), roster(&["A", "B", "C", "D"])).unwrap();

        assert!(config.personalities_path().exists());
        assert_eq!(manager.custom().len(), 1);
        assert_eq!(
            manager.custom()[EXAMPLE_PERSONALITY_KEY],
            PersonalityOutline::example()
        );
        assert_eq!(
            JsonStore.read(&config.personalities_path()).unwrap(),
            *manager.custom()
        );
        assert_eq!(manager.source_ids().count(), 0);
    }

    #[test]
    fn test_stock_override_file_lists_every_stock_key() {
        let temp_dir = TempDir::new().unwrap();
        let config = PersonalityConfig::new(temp_dir.path());

        let manager =
            PersonalityManager::new(config.clone(), roster(&["A", "B", "C", "D"])).unwrap();

        let overrides = JsonStore.read(&config.override_path()).unwrap();
        assert_eq!(
            overrides.keys().collect::<Vec<_>>(),
            vec!["A", "B", "C", "D"]
        );
        assert!(overrides.values().all(|o| *o == o.snapshot()));
        assert_eq!(manager.stock().len(), 4);
    }

    #[test]
    fn test_existing_custom_file_is_loaded_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let config = PersonalityConfig::new(temp_dir.path());
        let custom = r#"{"MINE": {"name": "Mine", "printable": true}}"#;
        fs::write(config.personalities_path(), custom).unwrap();

        let manager = PersonalityManager::new(config.clone(), roster(&["A"])).unwrap();

        assert_eq!(manager.custom().keys().collect::<Vec<_>>(), vec!["MINE"]);
        assert_eq!(fs::read_to_string(config.personalities_path()).unwrap(), custom);
    }

    #[test]
    fn test_malformed_custom_file_aborts_construction() {
        let temp_dir = TempDir::new().unwrap();
        let config = PersonalityConfig::new(temp_dir.path());
        fs::write(config.personalities_path(), "[]").unwrap();

        let err = PersonalityManager::new(config, roster(&["A"])).err().unwrap();
        assert!(err.is_decode());
    }

    #[test]
    fn test_malformed_stock_override_aborts_construction() {
        let temp_dir = TempDir::new().unwrap();
        let config = PersonalityConfig::new(temp_dir.path());
        fs::write(config.override_path(), "{").unwrap();

        let result = PersonalityManager::new(config.clone(), roster(&["A"]));
        assert!(result.is_err());
        assert!(!config.personalities_path().exists());
    }

    #[test]
    fn test_unwritable_stock_override_aborts_construction() {
        let temp_dir = TempDir::new().unwrap();
        let config = PersonalityConfig::new(temp_dir.path());
        fs::create_dir(config.override_path()).unwrap();

        let err = PersonalityManager::new(config, roster(&["A"])).err().unwrap();
        assert!(err.is_io());
    }

    #[test]
    fn test_borrowed_roster_bootstraps() {
        let temp_dir = TempDir::new().unwrap();
        let host_roster = roster(&["A", "B", "C", "D"]);

        let manager =
            PersonalityManager::new(PersonalityConfig::new(temp_dir.path()), &host_roster)
                .unwrap();

        assert_eq!(manager.stock().len(), host_roster.len());
        assert_eq!(
            manager.stock()["B"].to_personality("B"),
            host_roster[1]
        );
    }
}
