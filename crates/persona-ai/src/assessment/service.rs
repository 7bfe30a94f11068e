use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::bank::{ItemBank, ItemBankError};
use super::domain::{Answers, AssessmentId};
use super::insights::InsightGenerator;
use super::repository::{AssessmentRepository, RepositoryError};
use super::scoring::{NormError, ScoringEngine};
use super::session::{AssessmentResult, AssessmentSession};
use crate::config::ScoringConfig;

/// Completed answer set posted by the questionnaire front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub answers: Answers,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

/// Service composing the item bank, scoring engine, insight rules, and repository.
pub struct AssessmentService<R> {
    bank: Arc<ItemBank>,
    engine: Arc<ScoringEngine>,
    generator: InsightGenerator,
    repository: Arc<R>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asmt-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(bank: ItemBank, engine: ScoringEngine, repository: Arc<R>) -> Self {
        Self {
            bank: Arc::new(bank),
            engine: Arc::new(engine),
            generator: InsightGenerator::new(),
            repository,
        }
    }

    /// Loads the configured item bank and norms, falling back to the built-in defaults.
    pub fn from_config(
        config: &ScoringConfig,
        repository: Arc<R>,
    ) -> Result<Self, AssessmentServiceError> {
        let bank = match &config.item_bank_path {
            Some(path) => ItemBank::from_path(path)?,
            None => ItemBank::standard().map_err(ItemBankError::from)?,
        };
        let engine = ScoringEngine::from_config(config)?;
        Ok(Self::new(bank, engine, repository))
    }

    pub fn bank(&self) -> &ItemBank {
        &self.bank
    }

    pub fn start(&self, started_at: DateTime<Utc>) -> AssessmentSession {
        AssessmentSession::new(next_assessment_id(), started_at)
    }

    /// Scores a finished session and persists the result.
    pub fn complete(
        &self,
        session: AssessmentSession,
        completed_at: DateTime<Utc>,
    ) -> Result<AssessmentResult, AssessmentServiceError> {
        if session.progress(&self.bank) == 0.0 {
            warn!(assessment_id = %session.id(), "assessment completed without answers to known items");
        }

        let result = session.complete(&self.bank, &self.engine, &self.generator, completed_at);
        let stored = self.repository.insert(result)?;

        info!(
            assessment_id = %stored.id,
            mbti_type = %stored.scores.mbti_type,
            reliability = stored.metadata.reliability,
            "assessment stored"
        );
        Ok(stored)
    }

    pub fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentResult, AssessmentServiceError> {
        let completed_at = Utc::now();
        let mut session = self.start(submission.started_at.unwrap_or(completed_at));
        session.record_page(submission.answers);
        self.complete(session, completed_at)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentResult, AssessmentServiceError> {
        let result = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(result)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<AssessmentResult>, AssessmentServiceError> {
        Ok(self.repository.recent(limit)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    ItemBank(#[from] ItemBankError),
    #[error(transparent)]
    Norms(#[from] NormError),
}
