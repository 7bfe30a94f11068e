use std::collections::{BTreeMap, HashSet};

use super::super::domain::{
    Answers, AssessmentItem, BigFiveTrait, Dimension, DiscFactor, ItemId, MbtiAxis, MbtiPole,
};
use super::norms::{round_to, NormativeTable};
use super::reliability::ItemReliabilityProvider;

pub(crate) const SINGLE_RESPONSE_CONFIDENCE: f64 = 0.5;
pub(crate) const CONSISTENT_CONFIDENCE: f64 = 0.3;
pub(crate) const EXPECTED_VARIANCE: f64 = 1.0;
const VARIANCE_SMOOTHING: f64 = 0.1;

/// Weighted sums and the raw responses behind them.
#[derive(Debug, Default)]
pub(crate) struct RawScores {
    pub sums: BTreeMap<Dimension, f64>,
    pub responses: BTreeMap<Dimension, Vec<i32>>,
    pub answered: Vec<i32>,
    pub ignored: usize,
}

impl RawScores {
    pub fn sum(&self, dimension: Dimension) -> f64 {
        self.sums.get(&dimension).copied().unwrap_or(0.0)
    }

    pub fn response_count(&self, dimension: Dimension) -> usize {
        self.responses.get(&dimension).map(Vec::len).unwrap_or(0)
    }
}

pub(crate) fn accumulate(
    answers: &Answers,
    items: &[AssessmentItem],
    reliability: &dyn ItemReliabilityProvider,
) -> RawScores {
    let mut raw = RawScores::default();
    let mut known: HashSet<ItemId> = HashSet::with_capacity(items.len());

    for item in items {
        known.insert(item.id());
        let Some(&response) = answers.get(&item.id()) else {
            continue;
        };

        raw.answered.push(response);
        let effective = item.effective_response(response);
        let multiplier = reliability.multiplier(item);

        for entry in item.weights() {
            *raw.sums.entry(entry.dimension).or_insert(0.0) += effective * entry.weight * multiplier;
            raw.responses
                .entry(entry.dimension)
                .or_default()
                .push(response);
        }
    }

    raw.ignored = answers.keys().filter(|id| !known.contains(id)).count();
    raw
}

/// Ipsative DISC percentages: each sum over the total absolute magnitude.
pub(crate) fn normalize_disc(raw: &RawScores) -> BTreeMap<DiscFactor, f64> {
    let total: f64 = DiscFactor::ordered()
        .into_iter()
        .map(|factor| raw.sum(Dimension::Disc(factor)).abs())
        .sum();

    DiscFactor::ordered()
        .into_iter()
        .map(|factor| {
            let value = if total > 0.0 {
                round_to(raw.sum(Dimension::Disc(factor)) / total * 100.0, 1)
            } else {
                0.0
            };
            (factor, value)
        })
        .collect()
}

pub(crate) fn normalize_big_five(
    raw: &RawScores,
    norms: &NormativeTable,
) -> BTreeMap<BigFiveTrait, f64> {
    BigFiveTrait::ordered()
        .into_iter()
        .map(|trait_| {
            let entry = norms.entry(trait_);
            (trait_, entry.percentile(raw.sum(Dimension::BigFive(trait_))))
        })
        .collect()
}

pub(crate) fn mbti_preferences(raw: &RawScores) -> BTreeMap<MbtiPole, f64> {
    MbtiPole::ordered()
        .into_iter()
        .map(|pole| (pole, raw.sum(Dimension::Mbti(pole))))
        .collect()
}

/// Four-letter code; on each axis the first pole wins ties.
pub(crate) fn mbti_type(preferences: &BTreeMap<MbtiPole, f64>) -> String {
    MbtiAxis::ordered()
        .into_iter()
        .map(|axis| {
            let (first, second) = axis.poles();
            let first_score = preferences.get(&first).copied().unwrap_or(0.0);
            let second_score = preferences.get(&second).copied().unwrap_or(0.0);
            if first_score >= second_score {
                first.letter()
            } else {
                second.letter()
            }
        })
        .collect()
}

pub(crate) fn confidence(raw: &RawScores) -> BTreeMap<Dimension, f64> {
    let straight_lined = is_straight_lined(&raw.answered);

    raw.responses
        .iter()
        .map(|(dimension, responses)| {
            let score = group_confidence(responses);
            let score = if straight_lined {
                score.min(CONSISTENT_CONFIDENCE)
            } else {
                score
            };
            (*dimension, score)
        })
        .collect()
}

/// Non-zero variance never scores below a straight-lined group, so more varied answers are
/// always at least as trusted.
fn group_confidence(responses: &[i32]) -> f64 {
    if responses.len() < 2 {
        return SINGLE_RESPONSE_CONFIDENCE;
    }

    let variance = population_variance(responses);
    if variance == 0.0 {
        return CONSISTENT_CONFIDENCE;
    }

    let score = (EXPECTED_VARIANCE / (variance + VARIANCE_SMOOTHING)).min(1.0);
    round_to(score.max(CONSISTENT_CONFIDENCE), 2)
}

fn is_straight_lined(responses: &[i32]) -> bool {
    match responses.split_first() {
        Some((first, rest)) if !rest.is_empty() => rest.iter().all(|value| value == first),
        _ => false,
    }
}

pub(crate) fn population_variance(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|value| *value as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|value| {
            let delta = *value as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / n
}
