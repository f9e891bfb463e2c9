//! Error types for personality loading, override resolution and imports.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PersonalityError>;

#[derive(Debug, Error)]
pub enum PersonalityError {
    /// The personality file does not exist.
    #[error("personality file not found: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid personality mapping.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode personalities for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source ids end up in file names, so separators and traversal are refused.
    #[error("invalid source id {0:?}")]
    InvalidSourceId(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PersonalityError {
    /// True for failures reading a source file (absent, unreadable or malformed).
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::MissingSource { .. } | Self::Read { .. } | Self::Decode { .. }
        )
    }

    /// True for failures persisting a file.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Encode { .. })
    }
}
