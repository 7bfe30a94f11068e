mod tables;

use serde::{Deserialize, Serialize};

use super::domain::{BigFiveTrait, DiscFactor};
use super::scoring::PersonalityScores;

pub const BLEND_THRESHOLD: f64 = 60.0;
pub const NOTABLE_TRAIT_THRESHOLD: f64 = 70.0;
pub const STRENGTH_TRAIT_THRESHOLD: f64 = 65.0;
pub const DEVELOPMENT_TRAIT_THRESHOLD: f64 = 35.0;
pub const HIGH_NEUROTICISM_THRESHOLD: f64 = 65.0;
pub const DISC_SPREAD_THRESHOLD: f64 = 40.0;
pub const EXPRESSIVE_EXTRAVERSION_THRESHOLD: f64 = 50.0;
pub const STRUCTURED_CONSCIENTIOUSNESS_THRESHOLD: f64 = 65.0;
pub const LOW_OPENNESS_THRESHOLD: f64 = 40.0;
pub const LOW_EXTRAVERSION_THRESHOLD: f64 = 35.0;

const MAX_STRENGTHS: usize = 6;
const MAX_DEVELOPMENT_AREAS: usize = 5;
const MAX_STRESS_INDICATORS: usize = 4;
const MAX_GROWTH_RECOMMENDATIONS: usize = 5;

/// Narrative profile derived from a set of scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInsights {
    pub summary: String,
    pub strengths: Vec<String>,
    pub development_areas: Vec<String>,
    pub career_suggestions: Vec<String>,
    pub communication_style: String,
    pub leadership_style: String,
    pub stress_indicators: Vec<String>,
    pub growth_recommendations: Vec<String>,
}

/// Rule-table driven narrative generator. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightGenerator;

impl InsightGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, scores: &PersonalityScores) -> ProfileInsights {
        let (dominant, _) = scores.dominant_disc();

        ProfileInsights {
            summary: self.summary(scores),
            strengths: self.strengths(scores),
            development_areas: self.development_areas(scores),
            career_suggestions: self.career_suggestions(scores),
            communication_style: tables::communication_style(
                dominant,
                scores.big_five_score(BigFiveTrait::Extraversion)
                    > EXPRESSIVE_EXTRAVERSION_THRESHOLD,
            )
            .to_string(),
            leadership_style: tables::leadership_style(
                dominant,
                scores.big_five_score(BigFiveTrait::Conscientiousness)
                    > STRUCTURED_CONSCIENTIOUSNESS_THRESHOLD,
            )
            .to_string(),
            stress_indicators: self.stress_indicators(scores),
            growth_recommendations: self.growth_recommendations(scores),
        }
    }

    /// Dominant DISC factor, joined by the runner-up when it exceeds [`BLEND_THRESHOLD`].
    pub fn personality_blend(&self, scores: &PersonalityScores) -> Vec<DiscFactor> {
        let ranking = scores.disc_ranking();
        let mut blend = vec![ranking[0].0];
        if let Some((second, score)) = ranking.get(1) {
            if *score > BLEND_THRESHOLD {
                blend.push(*second);
            }
        }
        blend
    }

    fn summary(&self, scores: &PersonalityScores) -> String {
        let (dominant, score) = scores.dominant_disc();
        let mut summary = tables::summary(dominant, &scores.mbti_type, score);

        let notable: Vec<&str> = BigFiveTrait::ordered()
            .into_iter()
            .filter(|trait_| scores.big_five_score(*trait_) > NOTABLE_TRAIT_THRESHOLD)
            .map(BigFiveTrait::label)
            .collect();
        if !notable.is_empty() {
            summary.push_str(&format!(" Notably high in {}.", notable.join(", ")));
        }

        summary
    }

    fn strengths(&self, scores: &PersonalityScores) -> Vec<String> {
        let (dominant, _) = scores.dominant_disc();
        let candidates = tables::strengths(dominant).iter().copied().chain(
            BigFiveTrait::ordered()
                .into_iter()
                .filter(|trait_| scores.big_five_score(*trait_) > STRENGTH_TRAIT_THRESHOLD)
                .map(tables::trait_strength),
        );

        let mut strengths: Vec<String> = Vec::new();
        for candidate in candidates {
            if !strengths.iter().any(|existing| existing == candidate) {
                strengths.push(candidate.to_string());
            }
        }
        strengths.truncate(MAX_STRENGTHS);
        strengths
    }

    fn development_areas(&self, scores: &PersonalityScores) -> Vec<String> {
        let mut areas: Vec<String> = BigFiveTrait::ordered()
            .into_iter()
            .filter(|trait_| scores.big_five_score(*trait_) < DEVELOPMENT_TRAIT_THRESHOLD)
            .map(|trait_| tables::trait_development(trait_).to_string())
            .collect();

        if scores.big_five_score(BigFiveTrait::Neuroticism) > HIGH_NEUROTICISM_THRESHOLD {
            areas.extend(tables::STRESS_MANAGEMENT.iter().map(|phrase| phrase.to_string()));
        }

        let ranking = scores.disc_ranking();
        let highest = ranking.first().map(|entry| entry.1).unwrap_or(0.0);
        let lowest = ranking.last().map(|entry| entry.1).unwrap_or(0.0);
        if highest - lowest > DISC_SPREAD_THRESHOLD {
            areas.push(tables::BEHAVIORAL_FLEXIBILITY.to_string());
        }

        areas.truncate(MAX_DEVELOPMENT_AREAS);
        areas
    }

    fn career_suggestions(&self, scores: &PersonalityScores) -> Vec<String> {
        let (dominant, _) = scores.dominant_disc();
        let temperament = scores.mbti_type.get(1..3).unwrap_or_default();

        tables::career_paths(dominant, temperament)
            .unwrap_or(&tables::GENERIC_CAREERS)
            .iter()
            .map(|career| career.to_string())
            .collect()
    }

    fn stress_indicators(&self, scores: &PersonalityScores) -> Vec<String> {
        let (dominant, _) = scores.dominant_disc();
        let mut indicators: Vec<String> = Vec::new();

        if scores.big_five_score(BigFiveTrait::Neuroticism) > HIGH_NEUROTICISM_THRESHOLD {
            indicators.extend(tables::ANXIETY_INDICATORS.iter().map(|phrase| phrase.to_string()));
        }
        indicators.extend(
            tables::stress_triggers(dominant)
                .iter()
                .map(|trigger| trigger.to_string()),
        );

        indicators.truncate(MAX_STRESS_INDICATORS);
        indicators
    }

    fn growth_recommendations(&self, scores: &PersonalityScores) -> Vec<String> {
        let (dominant, _) = scores.dominant_disc();
        let mut recommendations: Vec<String> = tables::growth_recommendations(dominant)
            .iter()
            .map(|item| item.to_string())
            .collect();

        if scores.big_five_score(BigFiveTrait::Openness) < LOW_OPENNESS_THRESHOLD {
            recommendations.push(tables::LOW_OPENNESS_GROWTH.to_string());
        }
        if scores.big_five_score(BigFiveTrait::Extraversion) < LOW_EXTRAVERSION_THRESHOLD {
            recommendations.push(tables::LOW_EXTRAVERSION_GROWTH.to_string());
        }

        recommendations.truncate(MAX_GROWTH_RECOMMENDATIONS);
        recommendations
    }
}
