//! Questionnaire items.

use serde::{Deserialize, Serialize};

use super::types::{DiscriminatorPair, EnneagramType, Instinct};
use crate::domain::foundation::Locale;

/// What an item measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ItemCategory {
    /// Screener item scored toward a single type.
    Type(EnneagramType),
    /// Instinct item scored toward sp/so/sx.
    Instinct(Instinct),
    /// Forced-choice item separating two types.
    Discriminator(DiscriminatorPair),
}

impl ItemCategory {
    pub fn as_type(&self) -> Option<EnneagramType> {
        match self {
            ItemCategory::Type(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_instinct(&self) -> Option<Instinct> {
        match self {
            ItemCategory::Instinct(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<DiscriminatorPair> {
        match self {
            ItemCategory::Discriminator(p) => Some(*p),
            _ => None,
        }
    }
}

/// The two sides of a discriminator item. `A` credits the pair's left type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscriminatorOptions {
    pub option_a: String,
    pub option_b: String,
}

/// A single catalog item. Immutable once the bank is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub category: ItemCategory,
    pub text: String,
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<DiscriminatorOptions>,
}

impl Item {
    pub fn screener(id: impl Into<String>, t: EnneagramType, text: impl Into<String>, locale: Locale) -> Self {
        Self {
            id: id.into(),
            category: ItemCategory::Type(t),
            text: text.into(),
            locale,
            options: None,
        }
    }

    pub fn instinct(id: impl Into<String>, instinct: Instinct, text: impl Into<String>, locale: Locale) -> Self {
        Self {
            id: id.into(),
            category: ItemCategory::Instinct(instinct),
            text: text.into(),
            locale,
            options: None,
        }
    }

    pub fn discriminator(
        id: impl Into<String>,
        pair: DiscriminatorPair,
        prompt: impl Into<String>,
        options: DiscriminatorOptions,
        locale: Locale,
    ) -> Self {
        Self {
            id: id.into(),
            category: ItemCategory::Discriminator(pair),
            text: prompt.into(),
            locale,
            options: Some(options),
        }
    }
}
