//! Property checks for the scoring engine run against the built-in item bank.

use std::collections::BTreeMap;

use persona_ai::assessment::{
    Answers, BigFiveTrait, InsightGenerator, ItemBank, ItemId, ScoringEngine,
};
use proptest::prelude::*;

fn answer_sets() -> impl Strategy<Value = Answers> {
    prop::collection::btree_map(1u32..=32, 1i32..=5, 0..=32)
}

fn full_answer_sets() -> impl Strategy<Value = Answers> {
    prop::collection::vec(1i32..=5, 32).prop_map(|responses| {
        responses
            .into_iter()
            .enumerate()
            .map(|(index, response)| (index as ItemId + 1, response))
            .collect::<BTreeMap<_, _>>()
    })
}

proptest! {
    #[test]
    fn disc_scores_sum_to_one_hundred_or_zero(answers in answer_sets()) {
        let bank = ItemBank::standard().expect("standard bank");
        let scores = ScoringEngine::default().score(&answers, bank.items());
        let total: f64 = scores.disc.values().sum();

        prop_assert!(
            total == 0.0 || (total - 100.0).abs() <= 1.0,
            "DISC total was {}", total
        );
        prop_assert!(scores.disc.values().all(|value| (0.0..=100.0).contains(value)));
    }

    #[test]
    fn big_five_percentiles_stay_in_range(answers in answer_sets()) {
        let bank = ItemBank::standard().expect("standard bank");
        let scores = ScoringEngine::default().score(&answers, bank.items());

        for trait_ in BigFiveTrait::ordered() {
            let percentile = scores.big_five_score(trait_);
            prop_assert!((0.0..=100.0).contains(&percentile), "{} out of range", percentile);
        }
    }

    #[test]
    fn mbti_type_is_always_four_valid_letters(answers in answer_sets()) {
        let bank = ItemBank::standard().expect("standard bank");
        let scores = ScoringEngine::default().score(&answers, bank.items());
        let letters: Vec<char> = scores.mbti_type.chars().collect();

        prop_assert_eq!(letters.len(), 4);
        prop_assert!(matches!(letters[0], 'E' | 'I'));
        prop_assert!(matches!(letters[1], 'S' | 'N'));
        prop_assert!(matches!(letters[2], 'T' | 'F'));
        prop_assert!(matches!(letters[3], 'J' | 'P'));
    }

    #[test]
    fn confidence_is_bounded(answers in answer_sets()) {
        let bank = ItemBank::standard().expect("standard bank");
        let scores = ScoringEngine::default().score(&answers, bank.items());

        prop_assert!(scores.confidence.values().all(|value| (0.0..=1.0).contains(value)));
        let reliability = scores.overall_reliability();
        prop_assert!((0.1..=1.0).contains(&reliability));
    }

    #[test]
    fn straight_lining_never_scores_above_consistency_cap(response in 1i32..=5) {
        let bank = ItemBank::standard().expect("standard bank");
        let answers: Answers = bank.items().iter().map(|item| (item.id(), response)).collect();
        let scores = ScoringEngine::default().score(&answers, bank.items());

        prop_assert!(scores.confidence.values().all(|value| *value <= 0.3));
    }

    #[test]
    fn scoring_and_insights_are_deterministic(answers in full_answer_sets()) {
        let bank = ItemBank::standard().expect("standard bank");
        let engine = ScoringEngine::default();
        let generator = InsightGenerator::new();

        let first = engine.score(&answers, bank.items());
        let second = engine.score(&answers, bank.items());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(generator.generate(&first), generator.generate(&second));

        let insights = generator.generate(&first);
        prop_assert!(!insights.summary.is_empty());
        prop_assert!(insights.strengths.len() <= 6);
        prop_assert!(insights.development_areas.len() <= 5);
        prop_assert!(insights.stress_indicators.len() <= 4);
        prop_assert!(insights.growth_recommendations.len() <= 5);
        prop_assert!(!insights.career_suggestions.is_empty());
    }

    #[test]
    fn blend_always_leads_with_dominant_factor(answers in full_answer_sets()) {
        let bank = ItemBank::standard().expect("standard bank");
        let scores = ScoringEngine::default().score(&answers, bank.items());
        let blend = InsightGenerator::new().personality_blend(&scores);

        prop_assert!(!blend.is_empty() && blend.len() <= 2);
        prop_assert_eq!(blend[0], scores.dominant_disc().0);
    }
}
