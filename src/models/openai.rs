//! OpenAI chat models.

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// An OpenAI chat model. The gpt-4.1 family gets named variants since every
/// team role may run on it; any other id is carried through as `Other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString)]
pub enum OpenAiModel {
    #[strum(serialize = "gpt-4.1")]
    Gpt41,
    #[strum(serialize = "gpt-4.1-mini")]
    Gpt41Mini,
    #[strum(serialize = "gpt-4.1-nano")]
    Gpt41Nano,
    #[strum(default)]
    Other(String),
}

impl OpenAiModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt41Nano => "gpt-4.1-nano",
            Self::Other(id) => id,
        }
    }

    /// Whether this is one of the gpt-4.1 models.
    pub fn is_gpt41_family(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}
