//! Airport gazetteer vocabulary: security zones, locations, and the phrases
//! travellers use for their own position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chat::Lang;

/// Security-topology partition of the airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    BeforeSecurity,
    TransitionPoint,
    AfterSecurity,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::BeforeSecurity => write!(f, "before_security"),
            Zone::TransitionPoint => write!(f, "transition_point"),
            Zone::AfterSecurity => write!(f, "after_security"),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before_security" => Ok(Zone::BeforeSecurity),
            "transition_point" => Ok(Zone::TransitionPoint),
            "after_security" => Ok(Zone::AfterSecurity),
            other => Err(format!("invalid zone: '{other}'")),
        }
    }
}

/// A piece of text with Polish and English variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub pl: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(pl: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            pl: pl.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Pl => &self.pl,
            Lang::En => &self.en,
        }
    }
}

/// Per-language alias lists. Aliases are lowercase phrases matched by
/// substring containment against user utterances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedAliases {
    #[serde(default)]
    pub pl: Vec<String>,
    #[serde(default)]
    pub en: Vec<String>,
}

impl LocalizedAliases {
    pub fn get(&self, lang: Lang) -> &[String] {
        match lang {
            Lang::Pl => &self.pl,
            Lang::En => &self.en,
        }
    }
}

/// A navigable point of interest.
///
/// Loaded once at process start from the gazetteer file; immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: LocalizedText,
    pub zone: Zone,
    #[serde(default)]
    pub aliases: LocalizedAliases,
    /// Static map image for this location's zone, attached to navigation
    /// replies and informational answers that mention the location.
    pub map_file: String,
    /// Short free-text description forwarded to the completion service as
    /// grounding when phrasing directions.
    #[serde(default)]
    pub description: LocalizedText,
}

/// Maps a self-reported-position phrase ("at check-in", "przy bramce") to
/// the zone the speaker is standing in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocationAlias {
    pub phrases: LocalizedAliases,
    pub zone: Zone,
}

/// Serde form of the gazetteer file (TOML: `[[locations]]`,
/// `[[user_aliases]]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerDoc {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub user_aliases: Vec<UserLocationAlias>,
}
