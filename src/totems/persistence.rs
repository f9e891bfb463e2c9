//! 💾 Persistence of personality files
//!
//! Every personality file (custom layer, imports, overrides) is the same
//! JSON mapping from key to outline, pretty-printed for hand editing.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;

use crate::demiurge::{PersonalityMap, PersonalityOutline};
use crate::error::{PersonalityError, Result};

/// Reads and writes personality mappings.
pub trait PersonalityStore {
    fn exists(&self, path: &Path) -> bool;

    /// Fails when the file is absent, unreadable or malformed.
    fn read(&self, path: &Path) -> Result<PersonalityMap>;

    /// Replaces the file contents. Not atomic.
    fn write(&self, path: &Path, personalities: &PersonalityMap) -> Result<()>;
}

/// JSON files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl PersonalityStore for JsonStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<PersonalityMap> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                PersonalityError::MissingSource {
                    path: path.to_path_buf(),
                }
            } else {
                PersonalityError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        // Hand-edited files often carry a BOM; `null` entries mean "nothing here".
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let entries: Option<IndexMap<String, Option<PersonalityOutline>>> =
            serde_json::from_str(content).map_err(|source| PersonalityError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        let personalities: PersonalityMap = entries
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, outline)| outline.map(|outline| (key, outline)))
            .collect();

        tracing::debug!(
            "Read {} personalities from {:?}",
            personalities.len(),
            path
        );
        Ok(personalities)
    }

    fn write(&self, path: &Path, personalities: &PersonalityMap) -> Result<()> {
        let json = serde_json::to_string_pretty(personalities).map_err(|source| {
            PersonalityError::Encode {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| PersonalityError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        }

        fs::write(path, json).map_err(|source| PersonalityError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Wrote {} personalities to {:?}", personalities.len(), path);
        Ok(())
    }
}
