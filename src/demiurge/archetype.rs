//! Personality Outlines - Sparse Personality Templates
//!
//! An outline is either a full personality definition (stock, custom or
//! imported) or a sparse patch read from an override file. Every field is
//! optional so that a patch only carries what it changes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::persona::Personality;

/// Key of the placeholder written to a fresh custom personalities file.
pub const EXAMPLE_PERSONALITY_KEY: &str = "EXAMPLENAME";

/// Personalities keyed by their identifier, in file order.
pub type PersonalityMap = IndexMap<String, PersonalityOutline>;

/// Copies every field the patch defines onto the target.
macro_rules! overlay {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if $patch.$field.is_some() {
                $target.$field = $patch.$field.clone();
            }
        )+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityOutline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_trait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joy_trait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congenital_trait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_shape: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouth: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neck: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<i32>,
    /// Provenance of an imported personality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl PersonalityOutline {
    /// Whether the personality is listed for the host. Absent means listed.
    pub fn is_printable(&self) -> bool {
        self.printable.unwrap_or(true)
    }

    /// Override entry for a key nobody has patched yet: only the printable flag.
    pub fn snapshot(&self) -> Self {
        Self {
            printable: Some(self.is_printable()),
            ..Self::default()
        }
    }

    /// Returns this outline with every field defined by `patch` replaced.
    pub fn overridden_by(mut self, patch: &PersonalityOutline) -> Self {
        overlay!(self, patch;
            printable,
            name,
            description,
            gender,
            personality_type,
            stress_trait,
            joy_trait,
            sticker_type,
            congenital_trait,
            head_shape,
            mouth,
            neck,
            eyes,
            hair,
            body,
            source_id,
        );
        self
    }

    pub fn set_source_id(&mut self, source_id: &str) {
        self.source_id = Some(source_id.to_string());
    }

    /// Placeholder written to a fresh `PERSONALITIES.json` to show the format.
    pub fn example() -> Self {
        Self {
            printable: Some(false),
            name: Some("Example".to_string()),
            description: Some(
                "A template personality. Copy this entry, pick a new key and set printable to true."
                    .to_string(),
            ),
            gender: Some("NB".to_string()),
            personality_type: Some("Doofy".to_string()),
            stress_trait: Some("UglyCrier".to_string()),
            joy_trait: Some("BalloonArtist".to_string()),
            sticker_type: Some("sticker".to_string()),
            congenital_trait: None,
            head_shape: Some(1),
            mouth: Some(1),
            neck: Some(1),
            eyes: Some(1),
            hair: Some(1),
            body: Some(1),
            source_id: None,
        }
    }

    /// Resolves the outline into the host's record type.
    pub fn to_personality(&self, key: &str) -> Personality {
        let defaults = Personality::default();
        Personality {
            name_string_key: key.to_string(),
            name: self.name.clone().unwrap_or_else(|| key.to_string()),
            description: self.description.clone().unwrap_or(defaults.description),
            gender: self.gender.clone().unwrap_or(defaults.gender),
            personality_type: self
                .personality_type
                .clone()
                .unwrap_or(defaults.personality_type),
            stress_trait: self.stress_trait.clone().unwrap_or(defaults.stress_trait),
            joy_trait: self.joy_trait.clone().unwrap_or(defaults.joy_trait),
            sticker_type: self.sticker_type.clone().unwrap_or(defaults.sticker_type),
            congenital_trait: self
                .congenital_trait
                .clone()
                .unwrap_or(defaults.congenital_trait),
            head_shape: self.head_shape.unwrap_or(defaults.head_shape),
            mouth: self.mouth.unwrap_or(defaults.mouth),
            neck: self.neck.unwrap_or(defaults.neck),
            eyes: self.eyes.unwrap_or(defaults.eyes),
            hair: self.hair.unwrap_or(defaults.hair),
            body: self.body.unwrap_or(defaults.body),
            disabled: !self.is_printable(),
            source_id: self.source_id.clone(),
        }
    }
}
