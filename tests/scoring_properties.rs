//! Scoring properties that hold for any set of answers.

use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

use lifecraft_enneagram::domain::enneagram::{
    ConfidenceBand, DiscriminatorPair, DiscriminatorSelector, EnneagramType, InstinctScores,
    ItemBank, LikertResponse, ProbabilityDistribution, Stage1Scorer,
};
use lifecraft_enneagram::domain::foundation::{Likert, Locale};

fn bank() -> ItemBank {
    ItemBank::load().expect("catalog loads")
}

fn likert(value: u8) -> Likert {
    Likert::try_from_u8(value).expect("value in 1..=5")
}

/// Responses built from (screener index, value) pairs.
fn responses(bank: &ItemBank, picks: &[(usize, u8)]) -> Vec<LikertResponse> {
    let items = bank.screener_items(Locale::En);
    picks
        .iter()
        .map(|(index, value)| LikertResponse::new(items[index % items.len()].id.clone(), likert(*value)))
        .collect()
}

fn picks() -> impl Strategy<Value = Vec<(usize, u8)>> {
    prop::collection::vec((0usize..45, 1u8..=5), 0..60)
}

/// `lead` between the two leaders, the rest sharing what is left.
fn distribution_with_lead(top: f64, second: f64) -> ProbabilityDistribution {
    let rest = (1.0 - top - second) / 7.0;
    let mut dist: BTreeMap<_, _> = EnneagramType::ALL.iter().map(|t| (*t, rest)).collect();
    dist.insert(EnneagramType::Three, top);
    dist.insert(EnneagramType::Six, second);
    dist
}

proptest! {
    #[test]
    fn probabilities_are_normalized(picks in picks()) {
        let bank = bank();
        let scores = Stage1Scorer::score(bank.item_type_map(Locale::En), &responses(&bank, &picks));

        prop_assert_eq!(scores.probabilities.len(), 9);
        let total: f64 = scores.probabilities.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(scores.probabilities.values().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn repeated_item_ids_do_not_change_scores(picks in picks()) {
        let bank = bank();
        let map = bank.item_type_map(Locale::En);
        let once = responses(&bank, &picks);
        let mut twice = once.clone();
        twice.extend(once.iter().map(|r| LikertResponse::new(r.item_id.clone(), Likert::StronglyAgree)));

        prop_assert_eq!(Stage1Scorer::score(map, &once), Stage1Scorer::score(map, &twice));
    }

    #[test]
    fn unknown_item_ids_are_ignored(picks in picks(), extra in prop::collection::vec(1u8..=5, 1..10)) {
        let bank = bank();
        let map = bank.item_type_map(Locale::En);
        let known = responses(&bank, &picks);
        let mut noisy = known.clone();
        for (n, value) in extra.iter().enumerate() {
            noisy.push(LikertResponse::new(format!("zz_{}", n), likert(*value)));
        }

        prop_assert_eq!(Stage1Scorer::score(map, &known), Stage1Scorer::score(map, &noisy));
    }

    #[test]
    fn discriminator_plan_is_deterministic(picks in picks()) {
        let bank = bank();
        let scores = Stage1Scorer::score(bank.item_type_map(Locale::En), &responses(&bank, &picks));

        let first = DiscriminatorSelector::build_plan(&bank, Locale::En, &scores);
        let second = DiscriminatorSelector::build_plan(&bank, Locale::En, &scores);
        prop_assert_eq!(&first, &second);

        let unique: HashSet<_> = first.item_ids().collect();
        prop_assert_eq!(unique.len(), first.len());
        prop_assert!(first.pairs.len() <= 3);
    }
}

#[test]
fn empty_or_unmapped_answers_fall_back_to_uniform() {
    let bank = bank();
    let map = bank.item_type_map(Locale::En);
    let unmapped = vec![
        LikertResponse::new("nope", Likert::StronglyAgree),
        LikertResponse::new("i_01", Likert::StronglyAgree),
    ];

    for answers in [Vec::new(), unmapped] {
        let scores = Stage1Scorer::score(map, &answers);
        for p in scores.probabilities.values() {
            assert_eq!(*p, 1.0 / 9.0);
        }
        assert_eq!(ConfidenceBand::classify(&scores.probabilities), ConfidenceBand::Low);
    }
}

#[test]
fn confidence_thresholds() {
    assert_eq!(ConfidenceBand::classify(&distribution_with_lead(0.45, 0.20)), ConfidenceBand::High);
    assert_eq!(ConfidenceBand::classify(&distribution_with_lead(0.40, 0.20)), ConfidenceBand::High);
    assert_eq!(ConfidenceBand::classify(&distribution_with_lead(0.30, 0.20)), ConfidenceBand::Medium);
    assert_eq!(ConfidenceBand::classify(&distribution_with_lead(0.25, 0.20)), ConfidenceBand::Low);
}

#[test]
fn instinct_tie_prefers_sp_then_so() {
    use lifecraft_enneagram::domain::enneagram::Instinct;

    assert_eq!(InstinctScores::from_sums(10, 10, 8).dominant, Instinct::Sp);
    assert_eq!(InstinctScores::from_sums(4, 9, 9).dominant, Instinct::So);
    assert_eq!(InstinctScores::from_sums(0, 0, 0).dominant, Instinct::Sp);
}

#[test]
fn locales_share_catalog_structure() {
    let bank = bank();

    assert_eq!(
        bank.item_type_map(Locale::En),
        bank.item_type_map(Locale::Kr),
        "screener ids map to the same types in both locales"
    );
    assert_eq!(bank.instinct_map(Locale::En), bank.instinct_map(Locale::Kr));
    assert_eq!(
        bank.narrative_prompts(Locale::En).len(),
        bank.narrative_prompts(Locale::Kr).len()
    );

    for pair in DiscriminatorPair::ALL {
        let en: Vec<_> = bank.pair_items(Locale::En, pair).map(|i| i.id.clone()).collect();
        let kr: Vec<_> = bank.pair_items(Locale::Kr, pair).map(|i| i.id.clone()).collect();
        assert_eq!(en, kr, "pair {}", pair);
        assert!(en.len() >= 2);
    }

    let en_ids: Vec<_> = bank.screener_items(Locale::En).iter().map(|i| &i.id).collect();
    let kr_ids: Vec<_> = bank.screener_items(Locale::Kr).iter().map(|i| &i.id).collect();
    assert_eq!(en_ids, kr_ids);
}
