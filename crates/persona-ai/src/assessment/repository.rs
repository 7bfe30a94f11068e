use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::AssessmentId;
use super::insights::InsightGenerator;
use super::session::AssessmentResult;

impl AssessmentResult {
    /// Compact projection for listings and dashboards.
    pub fn summary_view(&self) -> AssessmentSummaryView {
        let (dominant, score) = self.scores.dominant_disc();
        AssessmentSummaryView {
            id: self.id.clone(),
            mbti_type: self.scores.mbti_type.clone(),
            dominant_disc: dominant.letter(),
            dominant_score: score,
            personality_blend: InsightGenerator::new()
                .personality_blend(&self.scores)
                .into_iter()
                .map(|factor| factor.letter())
                .collect(),
            reliability: self.metadata.reliability,
            completed_at: self.metadata.completed_at,
        }
    }
}

/// Storage abstraction standing in for the hosted persistence backend.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, result: AssessmentResult) -> Result<AssessmentResult, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentResult>, RepositoryError>;
    /// Most recently completed results first.
    fn recent(&self, limit: usize) -> Result<Vec<AssessmentResult>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSummaryView {
    pub id: AssessmentId,
    pub mbti_type: String,
    pub dominant_disc: &'static str,
    pub dominant_score: f64,
    pub personality_blend: Vec<&'static str>,
    pub reliability: f64,
    pub completed_at: DateTime<Utc>,
}
