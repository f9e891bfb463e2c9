pub mod import;
pub mod overrides;
pub mod persistence;
pub mod registry;

pub use overrides::{resolve_overrides, OverrideResolver, Resolution};
pub use persistence::{JsonStore, PersonalityStore};
pub use registry::PersonalityManager;
