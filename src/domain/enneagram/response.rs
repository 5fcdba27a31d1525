//! Answer records and their lenient extraction from client payloads.
//!
//! Answer lists arrive as loosely typed JSON. Extraction never fails: entries
//! without a usable id or value are dropped, since partial and noisy responses
//! are normal for a survey instrument.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::Likert;

/// A single Likert answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikertResponse {
    pub item_id: String,
    pub value: Likert,
}

impl LikertResponse {
    pub fn new(item_id: impl Into<String>, value: Likert) -> Self {
        Self {
            item_id: item_id.into(),
            value,
        }
    }
}

/// Side picked on a forced-choice item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscriminatorChoice {
    A,
    B,
}

impl DiscriminatorChoice {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            _ => None,
        }
    }
}

impl fmt::Display for DiscriminatorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Answer to a discriminator item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscriminatorAnswer {
    pub item_id: String,
    pub choice: DiscriminatorChoice,
}

impl DiscriminatorAnswer {
    pub fn new(item_id: impl Into<String>, choice: DiscriminatorChoice) -> Self {
        Self {
            item_id: item_id.into(),
            choice,
        }
    }
}

/// Anything keyed by an item id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for LikertResponse {
    fn key(&self) -> &str {
        &self.item_id
    }
}

impl Keyed for DiscriminatorAnswer {
    fn key(&self) -> &str {
        &self.item_id
    }
}

/// Keeps the first occurrence of each item id, preserving order.
pub fn dedup_first_seen<T: Keyed>(entries: &[T]) -> Vec<&T> {
    let mut seen = HashSet::new();
    entries.iter().filter(|e| seen.insert(e.key())).collect()
}

/// Replaces entries with the same id and appends new ones.
///
/// Used when a stage is resubmitted: the latest submission wins per item.
pub fn merge_by_id<T: Keyed + Clone>(stored: &mut Vec<T>, incoming: &[T]) {
    for entry in dedup_first_seen(incoming) {
        match stored.iter_mut().find(|s| s.key() == entry.key()) {
            Some(existing) => *existing = entry.clone(),
            None => stored.push(entry.clone()),
        }
    }
}

fn item_id_of(entry: &Value) -> Option<&str> {
    entry.get("itemId").and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn likert_of(raw: &Value) -> Option<Likert> {
    match raw {
        Value::Number(n) => n.as_f64().and_then(Likert::from_f64),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(Likert::from_f64),
        _ => None,
    }
}

/// Extracts Likert answers from a JSON array.
///
/// Values may be numbers or numeric strings; anything outside 1..5 is dropped.
pub fn parse_likert_entries(value: Option<&Value>) -> Vec<LikertResponse> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let item_id = item_id_of(entry)?;
            let likert = likert_of(entry.get("value")?)?;
            Some(LikertResponse::new(item_id, likert))
        })
        .collect()
}

/// Extracts A/B answers from a JSON array.
pub fn parse_discriminator_entries(value: Option<&Value>) -> Vec<DiscriminatorAnswer> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let item_id = item_id_of(entry)?;
            let choice = entry
                .get("choice")
                .and_then(Value::as_str)
                .and_then(DiscriminatorChoice::parse)?;
            Some(DiscriminatorAnswer::new(item_id, choice))
        })
        .collect()
}

/// Keeps the first entry per item id among the ids `known` accepts, at most `max`.
///
/// Duplicates and unknown ids are dropped before the cap, so they never
/// displace a real answer.
pub fn known_entries<T: Keyed>(entries: Vec<T>, known: impl Fn(&str) -> bool, max: usize) -> Vec<T> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| known(e.key()) && seen.insert(e.key().to_string()))
        .take(max)
        .collect()
}

/// Extracts up to `max` non-empty trimmed strings.
pub fn parse_texts(value: Option<&Value>, max: usize) -> Vec<String> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .take(max)
        .collect()
}
