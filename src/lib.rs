//! DUPERY - Layered Personality Registry
//!
//! Personalities come from three tiers: the host's stock roster, the user's
//! `PERSONALITIES.json`, and one layer per imported mod. Each tier is patched
//! by an override file that is rewritten on every load so it always lists
//! every key it could patch.
//!
//! Flow: stock → OVERRIDE.json → registry; PERSONALITIES.json → registry;
//! mod file → OVERRIDE.<mod>.json → provenance tag → registry.

pub mod demiurge;
pub mod error;
pub mod initiation;
pub mod totems;

pub use demiurge::{
    Personality, PersonalityMap, PersonalityOutline, StockPersonality, EXAMPLE_PERSONALITY_KEY,
};
pub use error::{PersonalityError, Result};
pub use initiation::config::{PersonalityConfig, MINIMUM_PERSONALITY_COUNT};
pub use totems::{
    resolve_overrides, JsonStore, OverrideResolver, PersonalityManager, PersonalityStore,
    Resolution,
};
