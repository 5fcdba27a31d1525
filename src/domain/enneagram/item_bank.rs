//! Item Bank - the read-only questionnaire catalog.
//!
//! The bank is built once at start-up from the embedded YAML catalogs and
//! shared by reference (`Arc<ItemBank>`) with everything that scores or serves
//! items. Loading validates that ids are unique and that the English and Korean
//! catalogs are structurally identical, so lookups afterwards cannot fail.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::item::{DiscriminatorOptions, Item};
use super::types::{DiscriminatorPair, EnneagramType, Instinct};
use crate::domain::foundation::Locale;

const EN_CATALOG: &str = include_str!("catalog/en.yaml");
const KR_CATALOG: &str = include_str!("catalog/kr.yaml");

/// Errors raised while building the bank. All are start-up failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse {locale} catalog: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Catalog declared locale '{found}' but was loaded as '{expected}'")]
    LocaleMismatch { expected: Locale, found: Locale },

    #[error("Duplicate item id '{id}' in {locale} catalog")]
    DuplicateId { locale: Locale, id: String },

    #[error("Section '{section}' of {locale} catalog is empty")]
    EmptySection { locale: Locale, section: &'static str },

    #[error("Catalogs differ structurally in '{section}': {detail}")]
    ParityMismatch { section: &'static str, detail: String },
}

// ----- Catalog document shape -----

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    locale: Locale,
    screener: Vec<ScreenerEntry>,
    instincts: Vec<InstinctEntry>,
    discriminators: Vec<DiscriminatorEntry>,
    narrative_prompts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScreenerEntry {
    id: String,
    #[serde(rename = "type")]
    enneagram_type: EnneagramType,
    text: String,
}

#[derive(Debug, Deserialize)]
struct InstinctEntry {
    id: String,
    instinct: Instinct,
    text: String,
}

#[derive(Debug, Deserialize)]
struct DiscriminatorEntry {
    id: String,
    pair: DiscriminatorPair,
    prompt: String,
    option_a: String,
    option_b: String,
}

/// One locale's items plus its lookup indexes.
#[derive(Debug, Clone)]
struct LocaleCatalog {
    screener: Vec<Item>,
    instincts: Vec<Item>,
    discriminators: Vec<Item>,
    narrative_prompts: Vec<String>,
    type_map: HashMap<String, EnneagramType>,
    instinct_map: HashMap<String, Instinct>,
}

impl LocaleCatalog {
    fn parse(expected: Locale, yaml: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_yaml::from_str(yaml).map_err(|source| CatalogError::Parse {
            locale: expected,
            source,
        })?;

        if doc.locale != expected {
            return Err(CatalogError::LocaleMismatch {
                expected,
                found: doc.locale,
            });
        }

        let screener: Vec<Item> = doc
            .screener
            .into_iter()
            .map(|e| Item::screener(e.id, e.enneagram_type, e.text, expected))
            .collect();
        let instincts: Vec<Item> = doc
            .instincts
            .into_iter()
            .map(|e| Item::instinct(e.id, e.instinct, e.text, expected))
            .collect();
        let discriminators: Vec<Item> = doc
            .discriminators
            .into_iter()
            .map(|e| {
                Item::discriminator(
                    e.id,
                    e.pair,
                    e.prompt,
                    DiscriminatorOptions {
                        option_a: e.option_a,
                        option_b: e.option_b,
                    },
                    expected,
                )
            })
            .collect();

        for (section, items) in [
            ("screener", &screener),
            ("instincts", &instincts),
            ("discriminators", &discriminators),
        ] {
            if items.is_empty() {
                return Err(CatalogError::EmptySection {
                    locale: expected,
                    section,
                });
            }
        }
        if doc.narrative_prompts.is_empty() {
            return Err(CatalogError::EmptySection {
                locale: expected,
                section: "narrative_prompts",
            });
        }

        let mut seen = HashSet::new();
        for item in screener.iter().chain(&instincts).chain(&discriminators) {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    locale: expected,
                    id: item.id.clone(),
                });
            }
        }

        let type_map = screener
            .iter()
            .filter_map(|i| i.category.as_type().map(|t| (i.id.clone(), t)))
            .collect();
        let instinct_map = instincts
            .iter()
            .filter_map(|i| i.category.as_instinct().map(|t| (i.id.clone(), t)))
            .collect();

        Ok(Self {
            screener,
            instincts,
            discriminators,
            narrative_prompts: doc.narrative_prompts,
            type_map,
            instinct_map,
        })
    }
}

fn check_parity(section: &'static str, a: &[Item], b: &[Item]) -> Result<(), CatalogError> {
    if a.len() != b.len() {
        return Err(CatalogError::ParityMismatch {
            section,
            detail: format!("{} items vs {} items", a.len(), b.len()),
        });
    }
    for (left, right) in a.iter().zip(b) {
        if left.id != right.id || left.category != right.category {
            return Err(CatalogError::ParityMismatch {
                section,
                detail: format!("'{}' does not line up with '{}'", left.id, right.id),
            });
        }
    }
    Ok(())
}

/// Process-wide questionnaire catalog for both locales.
#[derive(Debug, Clone)]
pub struct ItemBank {
    en: LocaleCatalog,
    kr: LocaleCatalog,
}

impl ItemBank {
    /// Builds the bank from the catalogs compiled into the binary.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_yaml(EN_CATALOG, KR_CATALOG)
    }

    /// Builds the bank from explicit catalog documents.
    pub fn from_yaml(en_yaml: &str, kr_yaml: &str) -> Result<Self, CatalogError> {
        let en = LocaleCatalog::parse(Locale::En, en_yaml)?;
        let kr = LocaleCatalog::parse(Locale::Kr, kr_yaml)?;

        check_parity("screener", &en.screener, &kr.screener)?;
        check_parity("instincts", &en.instincts, &kr.instincts)?;
        check_parity("discriminators", &en.discriminators, &kr.discriminators)?;
        if en.narrative_prompts.len() != kr.narrative_prompts.len() {
            return Err(CatalogError::ParityMismatch {
                section: "narrative_prompts",
                detail: format!(
                    "{} prompts vs {} prompts",
                    en.narrative_prompts.len(),
                    kr.narrative_prompts.len()
                ),
            });
        }

        Ok(Self { en, kr })
    }

    fn catalog(&self, locale: Locale) -> &LocaleCatalog {
        match locale {
            Locale::En => &self.en,
            Locale::Kr => &self.kr,
        }
    }

    /// Screener items in canonical order.
    pub fn screener_items(&self, locale: Locale) -> &[Item] {
        &self.catalog(locale).screener
    }

    pub fn instinct_items(&self, locale: Locale) -> &[Item] {
        &self.catalog(locale).instincts
    }

    /// All discriminator items covering `pairs`, grouped in the order the pairs
    /// are given and in catalog order within a pair. No id appears twice.
    pub fn discriminator_items(&self, locale: Locale, pairs: &[DiscriminatorPair]) -> Vec<Item> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for pair in pairs {
            for item in self.pair_items(locale, *pair) {
                if seen.insert(item.id.as_str()) {
                    items.push(item.clone());
                }
            }
        }
        items
    }

    /// Discriminator items for a single pair, catalog order.
    pub fn pair_items(&self, locale: Locale, pair: DiscriminatorPair) -> impl Iterator<Item = &Item> {
        self.catalog(locale)
            .discriminators
            .iter()
            .filter(move |i| i.category.as_pair() == Some(pair))
    }

    pub fn discriminator_item(&self, locale: Locale, id: &str) -> Option<&Item> {
        self.catalog(locale).discriminators.iter().find(|i| i.id == id)
    }

    /// Screener item id to type.
    pub fn item_type_map(&self, locale: Locale) -> &HashMap<String, EnneagramType> {
        &self.catalog(locale).type_map
    }

    /// Instinct item id to instinct.
    pub fn instinct_map(&self, locale: Locale) -> &HashMap<String, Instinct> {
        &self.catalog(locale).instinct_map
    }

    /// Static reflection prompts for the narrative stage.
    pub fn narrative_prompts(&self, locale: Locale) -> &[String] {
        &self.catalog(locale).narrative_prompts
    }

    pub fn screener_len(&self) -> usize {
        self.en.screener.len()
    }

    pub fn instinct_len(&self) -> usize {
        self.en.instincts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enneagram::item::ItemCategory;

    fn bank() -> ItemBank {
        ItemBank::load().expect("embedded catalogs load")
    }

    #[test]
    fn embedded_catalog_sizes() {
        let bank = bank();
        assert_eq!(bank.screener_len(), 45);
        assert_eq!(bank.instinct_len(), 12);
        assert_eq!(bank.narrative_prompts(Locale::En).len(), 2);
        assert_eq!(bank.narrative_prompts(Locale::Kr).len(), 2);
    }

    #[test]
    fn screener_has_five_items_per_type() {
        let bank = bank();
        for t in EnneagramType::ALL {
            let count = bank
                .screener_items(Locale::En)
                .iter()
                .filter(|i| i.category.as_type() == Some(t))
                .count();
            assert_eq!(count, 5, "type {} should have 5 items", t);
        }
    }

    #[test]
    fn locale_structural_parity() {
        let bank = bank();
        let kr_map = bank.item_type_map(Locale::Kr);
        for item in bank.screener_items(Locale::En) {
            let t = item.category.as_type().unwrap();
            assert_eq!(kr_map.get(&item.id), Some(&t), "{} missing in kr", item.id);
        }
        let en_texts: Vec<_> = bank.screener_items(Locale::En).iter().map(|i| &i.text).collect();
        let kr_texts: Vec<_> = bank.screener_items(Locale::Kr).iter().map(|i| &i.text).collect();
        assert_ne!(en_texts, kr_texts);
    }

    #[test]
    fn items_carry_their_locale() {
        let bank = bank();
        assert!(bank.instinct_items(Locale::Kr).iter().all(|i| i.locale == Locale::Kr));
        assert!(bank.screener_items(Locale::En).iter().all(|i| i.locale == Locale::En));
    }

    #[test]
    fn type_map_covers_every_screener_item() {
        let bank = bank();
        let map = bank.item_type_map(Locale::En);
        assert_eq!(map.len(), 45);
        assert_eq!(map.get("s1_01"), Some(&EnneagramType::One));
        assert_eq!(map.get("s1_45"), Some(&EnneagramType::Nine));
        assert_eq!(map.get("i_01"), None);
    }

    #[test]
    fn discriminator_items_follow_requested_pair_order() {
        let bank = bank();
        let items = bank.discriminator_items(
            Locale::En,
            &[DiscriminatorPair::EightThree, DiscriminatorPair::OneSix],
        );
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["d_8vs3_01", "d_8vs3_02", "d_8vs3_03", "d_1vs6_01", "d_1vs6_02", "d_1vs6_03"]
        );
    }

    #[test]
    fn discriminator_items_deduplicate_repeated_pairs() {
        let bank = bank();
        let items = bank.discriminator_items(
            Locale::En,
            &[DiscriminatorPair::FourNine, DiscriminatorPair::FourNine],
        );
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn discriminator_items_have_options() {
        let bank = bank();
        let item = bank.discriminator_item(Locale::Kr, "d_5vs1_02").unwrap();
        assert_eq!(item.category, ItemCategory::Discriminator(DiscriminatorPair::FiveOne));
        assert!(item.options.is_some());
        assert!(bank.discriminator_item(Locale::En, "d_9vs9_01").is_none());
    }

    #[test]
    fn instinct_map_tags() {
        let bank = bank();
        let map = bank.instinct_map(Locale::En);
        assert_eq!(map.get("i_01"), Some(&Instinct::Sp));
        assert_eq!(map.get("i_02"), Some(&Instinct::So));
        assert_eq!(map.get("i_03"), Some(&Instinct::Sx));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"
locale: en
screener:
  - { id: a, type: 1, text: "x" }
  - { id: a, type: 2, text: "y" }
instincts:
  - { id: i, instinct: sp, text: "z" }
discriminators:
  - { id: d, pair: 1vs6, prompt: "p", option_a: "a", option_b: "b" }
narrative_prompts: ["q"]
"#;
        let err = LocaleCatalog::parse(Locale::En, yaml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
    }

    #[test]
    fn parity_mismatch_is_rejected() {
        let en = r#"
locale: en
screener:
  - { id: a, type: 1, text: "x" }
instincts:
  - { id: i, instinct: sp, text: "z" }
discriminators:
  - { id: d, pair: 1vs6, prompt: "p", option_a: "a", option_b: "b" }
narrative_prompts: ["q"]
"#;
        let kr = en.replace("locale: en", "locale: kr").replace("type: 1", "type: 2");
        let err = ItemBank::from_yaml(en, &kr).unwrap_err();
        assert!(matches!(err, CatalogError::ParityMismatch { section: "screener", .. }));
    }

    #[test]
    fn wrong_locale_header_is_rejected() {
        let err = ItemBank::from_yaml(KR_CATALOG, KR_CATALOG).unwrap_err();
        assert!(matches!(err, CatalogError::LocaleMismatch { .. }));
    }
}
