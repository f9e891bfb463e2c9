//! Demiurge Level - Personality Definitions
//!
//! Outlines are the sparse, file-backed form of a personality; `Personality`
//! is the resolved record handed to the host.

pub mod archetype;
pub mod persona;

pub use archetype::{PersonalityMap, PersonalityOutline, EXAMPLE_PERSONALITY_KEY};
pub use persona::{Personality, StockPersonality};
