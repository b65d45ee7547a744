//! Person name domain model.
//!
//! # Responsibility
//! - Define the canonical name record and its tag enums.
//! - Parse user-facing tag text case-insensitively at the input boundary.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one, and never changes after.
//! - Spelling fields are case-sensitive and may be empty.
//! - Tags are stored with one canonical code each (`F`/`M`/`U`, `given`/`family`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned surrogate key of a name record.
pub type NameId = i64;

/// Onomastic gender of a name form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "F")]
    Feminine,
    #[serde(rename = "M")]
    Masculine,
    /// Unisex, or a form where gender is indifferent.
    #[serde(rename = "U")]
    Unisex,
}

impl Gender {
    /// Canonical code persisted in `name.gender`.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Feminine => "F",
            Self::Masculine => "M",
            Self::Unisex => "U",
        }
    }

    /// Lowercase spellings accepted for this gender, canonical code first.
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            Self::Feminine => &["f", "feminine"],
            Self::Masculine => &["m", "masculine"],
            Self::Unisex => &["u", "unisex", "indifferent"],
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Gender {
    type Err = NameParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        [Self::Feminine, Self::Masculine, Self::Unisex]
            .into_iter()
            .find(|gender| gender.spellings().contains(&normalized.as_str()))
            .ok_or_else(|| NameParseError::new(NameParseErrorKind::Gender, value))
    }
}

/// Whether a name is a given name or a family name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Given,
    Family,
}

impl Component {
    /// Canonical code persisted in `name.component`.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Family => "family",
        }
    }

    /// Lowercase spellings accepted for this component.
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            Self::Given => &["given"],
            Self::Family => &["family"],
        }
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Component {
    type Err = NameParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        [Self::Given, Self::Family]
            .into_iter()
            .find(|component| component.spellings().contains(&normalized.as_str()))
            .ok_or_else(|| NameParseError::new(NameParseErrorKind::Component, value))
    }
}

/// Which spelling of a name to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingField {
    #[default]
    Alphabetic,
    Ideographic,
    Phonetic,
}

impl SpellingField {
    /// Column holding this spelling in the `name` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Alphabetic => "alphabetic",
            Self::Ideographic => "ideographic",
            Self::Phonetic => "phonetic",
        }
    }
}

impl FromStr for SpellingField {
    type Err = NameParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alphabetic" => Ok(Self::Alphabetic),
            "ideographic" => Ok(Self::Ideographic),
            "phonetic" => Ok(Self::Phonetic),
            _ => Err(NameParseError::new(NameParseErrorKind::SpellingField, value)),
        }
    }
}

/// Tag family that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameParseErrorKind {
    Gender,
    Component,
    SpellingField,
}

/// Unrecognised tag text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParseError {
    pub kind: NameParseErrorKind,
    pub value: String,
}

impl NameParseError {
    fn new(kind: NameParseErrorKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for NameParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NameParseErrorKind::Gender => write!(
                f,
                "unsupported gender `{}`; expected F|M|U (feminine|masculine|unisex)",
                self.value
            ),
            NameParseErrorKind::Component => write!(
                f,
                "unsupported component `{}`; expected given|family",
                self.value
            ),
            NameParseErrorKind::SpellingField => write!(
                f,
                "unsupported spelling field `{}`; expected alphabetic|ideographic|phonetic",
                self.value
            ),
        }
    }
}

impl Error for NameParseError {}

/// One culturally-tagged name entry.
///
/// A plain value: it has no link back to the repository it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// Assigned by the store on insert; `None` for in-memory drafts.
    pub id: Option<NameId>,
    /// Language with optional region, e.g. `PL` or `EN-US`.
    pub culture: String,
    pub gender: Gender,
    pub component: Component,
    /// Latin-script spelling, e.g. `Tarou`.
    pub alphabetic: String,
    /// Ideographic spelling, e.g. `山田`.
    pub ideographic: String,
    /// Phonetic spelling, e.g. `やまだ` or `Толстой`.
    pub phonetic: String,
}

impl PersonName {
    /// Creates an unsaved record with empty ideographic/phonetic spellings.
    pub fn new(
        culture: impl Into<String>,
        component: Component,
        gender: Gender,
        alphabetic: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            culture: culture.into(),
            gender,
            component,
            alphabetic: alphabetic.into(),
            ideographic: String::new(),
            phonetic: String::new(),
        }
    }

    pub fn with_ideographic(mut self, ideographic: impl Into<String>) -> Self {
        self.ideographic = ideographic.into();
        self
    }

    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic = phonetic.into();
        self
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.alphabetic, self.component)
    }
}
