//! Discriminator Selector - second-round questions for close candidates.
//!
//! Selection is a pure function of the top-3 types, so the same candidates
//! always produce the same plan. Persisting the plan once per session is the
//! caller's job (see `AssessmentSessionStore::get_or_create_plan`).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::confidence::ConfidenceBand;
use super::item_bank::ItemBank;
use super::response::{dedup_first_seen, DiscriminatorAnswer, DiscriminatorChoice};
use super::scoring::TypeScores;
use super::types::{DiscriminatorPair, EnneagramType};
use crate::domain::foundation::Locale;

/// Number of candidate types the selector looks at.
pub const CANDIDATE_COUNT: usize = 3;

/// Upper bound on pairs in one plan.
pub const MAX_PAIRS: usize = 3;

/// Items taken from each selected pair, in catalog order.
pub const ITEMS_PER_PAIR: usize = 2;

/// Plan length assumed when a session has no stored plan.
pub const DEFAULT_PLAN_LEN: usize = 6;

/// Credits per type from discriminator answers.
pub type DiscriminatorTally = BTreeMap<EnneagramType, u32>;

/// One selected item and the pair it separates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub item_id: String,
    pub pair: DiscriminatorPair,
}

/// The discriminator items chosen for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscriminatorPlan {
    pub top_types: Vec<EnneagramType>,
    pub pairs: Vec<DiscriminatorPair>,
    pub entries: Vec<PlanEntry>,
}

impl DiscriminatorPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pair of a planned item, `None` if the item is not in the plan.
    pub fn pair_for(&self, item_id: &str) -> Option<DiscriminatorPair> {
        self.entries.iter().find(|e| e.item_id == item_id).map(|e| e.pair)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.item_id.as_str())
    }
}

/// Selects pairs and items for the discriminator stage.
pub struct DiscriminatorSelector;

impl DiscriminatorSelector {
    /// Pairs for a ranked candidate list.
    ///
    /// Pairs whose two types are both candidates come first, in catalog order.
    /// With fewer than two such pairs, pairs containing the leading candidate
    /// are appended (catalog order) until three are selected.
    pub fn select_pairs(top_types: &[EnneagramType]) -> Vec<DiscriminatorPair> {
        let candidates = &top_types[..top_types.len().min(CANDIDATE_COUNT)];

        let mut selected: Vec<DiscriminatorPair> = DiscriminatorPair::ALL
            .iter()
            .copied()
            .filter(|p| candidates.contains(&p.left()) && candidates.contains(&p.right()))
            .collect();

        if selected.len() < 2 {
            if let Some(leader) = candidates.first() {
                for pair in DiscriminatorPair::ALL {
                    if selected.len() >= MAX_PAIRS {
                        break;
                    }
                    if pair.contains(*leader) && !selected.contains(&pair) {
                        selected.push(pair);
                    }
                }
            }
        }

        selected.truncate(MAX_PAIRS);
        selected
    }

    /// Builds the plan for the Stage-1 leaders.
    pub fn build_plan(bank: &ItemBank, locale: Locale, scores: &TypeScores) -> DiscriminatorPlan {
        let top_types = scores.top(CANDIDATE_COUNT);
        let pairs = Self::select_pairs(&top_types);

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for pair in &pairs {
            for item in bank.pair_items(locale, *pair).take(ITEMS_PER_PAIR) {
                if seen.insert(item.id.clone()) {
                    entries.push(PlanEntry {
                        item_id: item.id.clone(),
                        pair: *pair,
                    });
                }
            }
        }

        DiscriminatorPlan {
            top_types,
            pairs,
            entries,
        }
    }

    /// Credits the chosen side of each planned item.
    ///
    /// Answers for items outside the plan and repeated item ids (after the
    /// first) are ignored.
    pub fn tally(plan: &DiscriminatorPlan, answers: &[DiscriminatorAnswer]) -> DiscriminatorTally {
        let mut tally = DiscriminatorTally::new();
        for answer in dedup_first_seen(answers) {
            let Some(pair) = plan.pair_for(&answer.item_id) else {
                continue;
            };
            let credited = match answer.choice {
                DiscriminatorChoice::A => pair.left(),
                DiscriminatorChoice::B => pair.right(),
            };
            *tally.entry(credited).or_insert(0) += 1;
        }
        tally
    }

    /// Final primary type after the discriminator round.
    ///
    /// A `high` Stage-1 result stands. Otherwise, when any credits exist, the
    /// candidate with the most credits wins, earlier Stage-1 rank breaking ties.
    pub fn narrow(scores: &TypeScores, confidence: ConfidenceBand, tally: &DiscriminatorTally) -> EnneagramType {
        let stage1 = scores.primary_type();
        if confidence.is_high() || tally.values().all(|c| *c == 0) {
            return stage1;
        }

        let mut best = stage1;
        let mut best_credits = tally.get(&stage1).copied().unwrap_or(0);
        for candidate in scores.top(CANDIDATE_COUNT) {
            let credits = tally.get(&candidate).copied().unwrap_or(0);
            if credits > best_credits {
                best = candidate;
                best_credits = credits;
            }
        }
        best
    }
}
