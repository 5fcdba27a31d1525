//! Locale value object for the two supported catalog languages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog language.
///
/// Unrecognised locale strings resolve to [`Locale::En`] instead of failing;
/// `ko` is accepted as an alias for Korean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    #[serde(alias = "ko")]
    Kr,
}

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Kr];

    /// Resolves a locale string, falling back to English for anything unknown.
    pub fn resolve(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "kr" | "ko" | "ko-kr" => Locale::Kr,
            _ => Locale::En,
        }
    }

    /// Resolves an optional locale string (absent means the default).
    pub fn resolve_opt(value: Option<&str>) -> Self {
        value.map(Self::resolve).unwrap_or_default()
    }

    /// Returns the wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Kr => "kr",
        }
    }

    pub fn is_korean(&self) -> bool {
        matches!(self, Locale::Kr)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
