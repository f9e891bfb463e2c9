//! 🜂 Registry configuration
//!
//! Where the personality files live and what they are called.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PersonalityError, Result};

pub const PERSONALITIES_FILE_NAME: &str = "PERSONALITIES.json";
pub const OVERRIDE_FILE_NAME: &str = "OVERRIDE.json";
pub const OVERRIDE_IMPORT_FILE_PATTERN: &str = "OVERRIDE.{}.json";

/// Below this the host roster is considered incomplete.
pub const MINIMUM_PERSONALITY_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityConfig {
    /// Directory holding every personality file
    pub directory: PathBuf,
    /// Custom layer file name
    pub personalities_file: String,
    /// Stock override file name
    pub override_file: String,
    /// Import override file name, `{}` is replaced by the source id
    pub import_override_pattern: String,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            personalities_file: PERSONALITIES_FILE_NAME.to_string(),
            override_file: OVERRIDE_FILE_NAME.to_string(),
            import_override_pattern: OVERRIDE_IMPORT_FILE_PATTERN.to_string(),
        }
    }
}

impl PersonalityConfig {
    /// Default file names inside `directory`.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Loads a JSON configuration file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PersonalityError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PersonalityConfig =
            serde_json::from_str(&content).map_err(|source| PersonalityError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.personalities_file.is_empty() {
            return Err(PersonalityError::InvalidConfig(
                "personalities file name is empty".to_string(),
            ));
        }
        if self.override_file.is_empty() {
            return Err(PersonalityError::InvalidConfig(
                "override file name is empty".to_string(),
            ));
        }
        if self.import_override_pattern.matches("{}").count() != 1 {
            return Err(PersonalityError::InvalidConfig(format!(
                "import override pattern {:?} must contain exactly one {{}}",
                self.import_override_pattern
            )));
        }

        Ok(())
    }

    pub fn personalities_path(&self) -> PathBuf {
        self.directory.join(&self.personalities_file)
    }

    pub fn override_path(&self) -> PathBuf {
        self.directory.join(&self.override_file)
    }

    pub fn import_override_path(&self, source_id: &str) -> PathBuf {
        self.directory
            .join(self.import_override_pattern.replacen("{}", source_id, 1))
    }
}
