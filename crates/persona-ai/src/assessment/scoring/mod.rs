mod norms;
mod reliability;
mod rules;

pub use norms::{
    standard_normal_cdf, NormEntry, NormError, NormativeTable, DEFAULT_NORM_MEAN,
    DEFAULT_NORM_STD_DEV, RAW_SCALE_CENTER,
};
pub use reliability::{
    CachedReliability, IdDecayReliability, ItemReliabilityProvider, TableReliability,
    UniformReliability, DEFAULT_RELIABILITY_DECAY, DEFAULT_RELIABILITY_FLOOR,
};

pub(crate) use norms::round_to;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Answers, AssessmentItem, BigFiveTrait, Dimension, DiscFactor, MbtiPole};
use crate::config::ScoringConfig;

/// Lower bound for the aggregate reliability reported alongside a result.
pub const RELIABILITY_FLOOR: f64 = 0.1;

/// Stateless scorer; the only interior state is whatever the reliability provider caches.
pub struct ScoringEngine {
    norms: NormativeTable,
    reliability: Box<dyn ItemReliabilityProvider>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(
            NormativeTable::default(),
            CachedReliability::new(IdDecayReliability::default()),
        )
    }
}

impl ScoringEngine {
    pub fn new<P>(norms: NormativeTable, reliability: P) -> Self
    where
        P: ItemReliabilityProvider + 'static,
    {
        Self {
            norms,
            reliability: Box::new(reliability),
        }
    }

    /// Builds an engine from configured norms and reliability decay.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, NormError> {
        let norms = match &config.norms_path {
            Some(path) => NormativeTable::from_path(path)?,
            None => NormativeTable::default(),
        };
        let reliability = IdDecayReliability {
            decay: config.reliability_decay,
            floor: config.reliability_floor,
        };
        Ok(Self::new(norms, CachedReliability::new(reliability)))
    }

    pub fn norms(&self) -> &NormativeTable {
        &self.norms
    }

    pub fn score(&self, answers: &Answers, items: &[AssessmentItem]) -> PersonalityScores {
        self.evaluate(answers, items).scores
    }

    /// Scores the answers and keeps a per-dimension audit trail.
    pub fn evaluate(&self, answers: &Answers, items: &[AssessmentItem]) -> ScoringOutcome {
        let raw = rules::accumulate(answers, items, self.reliability.as_ref());
        if raw.ignored > 0 {
            debug!(ignored = raw.ignored, "answers reference unknown item ids");
        }

        let disc = rules::normalize_disc(&raw);
        let big_five = rules::normalize_big_five(&raw, &self.norms);
        let mbti_preferences = rules::mbti_preferences(&raw);
        let mbti_type = rules::mbti_type(&mbti_preferences);
        let confidence = rules::confidence(&raw);

        let components = Dimension::all()
            .map(|dimension| {
                let raw_score = raw.sum(dimension);
                let (normalized, notes) = match dimension {
                    Dimension::Disc(factor) => (
                        disc.get(&factor).copied().unwrap_or(0.0),
                        format!("{:.1}% of total DISC magnitude", disc.get(&factor).copied().unwrap_or(0.0)),
                    ),
                    Dimension::BigFive(trait_) => {
                        let entry = self.norms.entry(trait_);
                        (
                            big_five.get(&trait_).copied().unwrap_or(0.0),
                            format!(
                                "scale score {:.1} against norm {:.1}/{:.1} (z = {:.2})",
                                entry.scale_score(raw_score),
                                entry.mean,
                                entry.std_dev,
                                entry.z_score(raw_score)
                            ),
                        )
                    }
                    Dimension::Mbti(_) => (raw_score, "raw preference magnitude".to_string()),
                };
                DimensionComponent {
                    dimension,
                    raw_score,
                    responses: raw.response_count(dimension),
                    normalized,
                    notes,
                }
            })
            .collect();

        debug!(
            answered = raw.answered.len(),
            items = items.len(),
            %mbti_type,
            "scored assessment"
        );

        ScoringOutcome {
            scores: PersonalityScores {
                disc,
                big_five,
                mbti_preferences,
                mbti_type,
                confidence,
            },
            components,
        }
    }
}

/// Normalized trait scores for one completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityScores {
    pub disc: BTreeMap<DiscFactor, f64>,
    pub big_five: BTreeMap<BigFiveTrait, f64>,
    pub mbti_preferences: BTreeMap<MbtiPole, f64>,
    pub mbti_type: String,
    #[serde(default)]
    pub confidence: BTreeMap<Dimension, f64>,
}

impl PersonalityScores {
    pub fn disc_score(&self, factor: DiscFactor) -> f64 {
        self.disc.get(&factor).copied().unwrap_or(0.0)
    }

    /// Percentile for a trait; absent traits read as the population median.
    pub fn big_five_score(&self, trait_: BigFiveTrait) -> f64 {
        self.big_five
            .get(&trait_)
            .copied()
            .unwrap_or(DEFAULT_NORM_MEAN)
    }

    /// DISC factors from highest to lowest; equal scores keep D, I, S, C order.
    pub fn disc_ranking(&self) -> Vec<(DiscFactor, f64)> {
        let mut ranked: Vec<(DiscFactor, f64)> = DiscFactor::ordered()
            .into_iter()
            .map(|factor| (factor, self.disc_score(factor)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    pub fn dominant_disc(&self) -> (DiscFactor, f64) {
        self.disc_ranking()
            .first()
            .copied()
            .unwrap_or((DiscFactor::Dominance, 0.0))
    }

    /// Mean confidence across scored dimensions, floored at [`RELIABILITY_FLOOR`].
    pub fn overall_reliability(&self) -> f64 {
        if self.confidence.is_empty() {
            return RELIABILITY_FLOOR;
        }
        let mean = self.confidence.values().sum::<f64>() / self.confidence.len() as f64;
        round_to(mean.max(RELIABILITY_FLOOR), 2)
    }
}

/// Transparent per-dimension contribution, mirroring the normalized score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionComponent {
    pub dimension: Dimension,
    pub raw_score: f64,
    pub responses: usize,
    pub normalized: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    pub scores: PersonalityScores,
    pub components: Vec<DimensionComponent>,
}
