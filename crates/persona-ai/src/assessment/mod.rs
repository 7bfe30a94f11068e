//! Personality assessment scoring: item definitions, DISC / Big Five / MBTI scoring,
//! narrative insights, and the service and HTTP surface that persist completed results.

pub mod bank;
pub mod domain;
pub mod insights;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use bank::{ItemBank, ItemBankError};
pub use domain::{
    Answers, AssessmentId, AssessmentItem, BigFiveTrait, Dimension, DiscFactor, ItemCategory,
    ItemError, ItemId, ItemWeight, MbtiAxis, MbtiPole,
};
pub use insights::{InsightGenerator, ProfileInsights};
pub use repository::{AssessmentRepository, AssessmentSummaryView, RepositoryError};
pub use router::assessment_router;
pub use scoring::{
    CachedReliability, DimensionComponent, IdDecayReliability, ItemReliabilityProvider,
    NormEntry, NormError, NormativeTable, PersonalityScores, ScoringEngine, ScoringOutcome,
    TableReliability, UniformReliability,
};
pub use service::{AssessmentService, AssessmentServiceError, AssessmentSubmission};
pub use session::{AssessmentMetadata, AssessmentResult, AssessmentSession};
