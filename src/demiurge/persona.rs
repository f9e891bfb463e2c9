//! Personality - The Resolved Host Record
//!
//! `Personality` is what the host game consumes: every field filled in.
//! The same shape describes the host's built-in roster, which reaches the
//! registry through the [`StockPersonality`] trait.

use serde::{Deserialize, Serialize};

use super::archetype::PersonalityOutline;

pub const DEFAULT_GENDER: &str = "NB";
pub const DEFAULT_PERSONALITY_TYPE: &str = "Doofy";
pub const DEFAULT_STRESS_TRAIT: &str = "UglyCrier";
pub const DEFAULT_JOY_TRAIT: &str = "BalloonArtist";
pub const DEFAULT_CONGENITAL_TRAIT: &str = "None";
pub const DEFAULT_APPEARANCE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personality {
    /// Stable identifier the host uses for this personality
    pub name_string_key: String,
    pub name: String,
    pub description: String,
    pub gender: String,
    pub personality_type: String,
    pub stress_trait: String,
    pub joy_trait: String,
    pub sticker_type: String,
    pub congenital_trait: String,
    pub head_shape: i32,
    pub mouth: i32,
    pub neck: i32,
    pub eyes: i32,
    pub hair: i32,
    pub body: i32,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            name_string_key: String::new(),
            name: String::new(),
            description: String::new(),
            gender: DEFAULT_GENDER.to_string(),
            personality_type: DEFAULT_PERSONALITY_TYPE.to_string(),
            stress_trait: DEFAULT_STRESS_TRAIT.to_string(),
            joy_trait: DEFAULT_JOY_TRAIT.to_string(),
            sticker_type: String::new(),
            congenital_trait: DEFAULT_CONGENITAL_TRAIT.to_string(),
            head_shape: DEFAULT_APPEARANCE,
            mouth: DEFAULT_APPEARANCE,
            neck: DEFAULT_APPEARANCE,
            eyes: DEFAULT_APPEARANCE,
            hair: DEFAULT_APPEARANCE,
            body: DEFAULT_APPEARANCE,
            disabled: false,
            source_id: None,
        }
    }
}

/// A record from the host's built-in roster.
pub trait StockPersonality {
    /// Key the record is stored under in the stock layer.
    fn stable_id(&self) -> &str;

    fn to_outline(&self) -> PersonalityOutline;
}

impl StockPersonality for Personality {
    fn stable_id(&self) -> &str {
        &self.name_string_key
    }

    fn to_outline(&self) -> PersonalityOutline {
        PersonalityOutline {
            printable: Some(!self.disabled),
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            gender: Some(self.gender.clone()),
            personality_type: Some(self.personality_type.clone()),
            stress_trait: Some(self.stress_trait.clone()),
            joy_trait: Some(self.joy_trait.clone()),
            sticker_type: Some(self.sticker_type.clone()),
            congenital_trait: Some(self.congenital_trait.clone()),
            head_shape: Some(self.head_shape),
            mouth: Some(self.mouth),
            neck: Some(self.neck),
            eyes: Some(self.eyes),
            hair: Some(self.hair),
            body: Some(self.body),
            source_id: None,
        }
    }
}

impl<T: StockPersonality + ?Sized> StockPersonality for &T {
    fn stable_id(&self) -> &str {
        (**self).stable_id()
    }

    fn to_outline(&self) -> PersonalityOutline {
        (**self).to_outline()
    }
}
