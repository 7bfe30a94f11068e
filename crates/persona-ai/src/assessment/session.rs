use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bank::ItemBank;
use super::domain::{Answers, AssessmentId, AssessmentItem, ItemId};
use super::insights::{InsightGenerator, ProfileInsights};
use super::scoring::{PersonalityScores, ScoringEngine};

/// Answers accumulated across a multi-page questionnaire for a single attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSession {
    id: AssessmentId,
    started_at: DateTime<Utc>,
    answers: Answers,
}

impl AssessmentSession {
    pub fn new(id: AssessmentId, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            started_at,
            answers: Answers::new(),
        }
    }

    pub fn id(&self) -> &AssessmentId {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Records a response, returning the one it replaced.
    pub fn record(&mut self, item_id: ItemId, response: i32) -> Option<i32> {
        self.answers.insert(item_id, response)
    }

    pub fn record_page<I>(&mut self, page: I)
    where
        I: IntoIterator<Item = (ItemId, i32)>,
    {
        self.answers.extend(page);
    }

    pub fn retract(&mut self, item_id: ItemId) -> Option<i32> {
        self.answers.remove(&item_id)
    }

    /// Share of the bank answered so far, in `[0, 1]`.
    pub fn progress(&self, bank: &ItemBank) -> f64 {
        if bank.is_empty() {
            return 0.0;
        }
        let answered = bank
            .items()
            .iter()
            .filter(|item| self.answers.contains_key(&item.id()))
            .count();
        answered as f64 / bank.len() as f64
    }

    pub fn unanswered<'a>(&self, bank: &'a ItemBank) -> Vec<&'a AssessmentItem> {
        bank.items()
            .iter()
            .filter(|item| !self.answers.contains_key(&item.id()))
            .collect()
    }

    /// Scores the session and attaches narrative insights and completion metadata.
    pub fn complete(
        self,
        bank: &ItemBank,
        engine: &ScoringEngine,
        generator: &InsightGenerator,
        completed_at: DateTime<Utc>,
    ) -> AssessmentResult {
        let scores = engine.score(&self.answers, bank.items());
        let insights = generator.generate(&scores);
        let answered_items = bank
            .items()
            .iter()
            .filter(|item| self.answers.contains_key(&item.id()))
            .count();

        let metadata = AssessmentMetadata {
            started_at: self.started_at,
            completed_at,
            completion_seconds: (completed_at - self.started_at).num_seconds().max(0) as u64,
            answered_items,
            total_items: bank.len(),
            reliability: scores.overall_reliability(),
        };

        AssessmentResult {
            id: self.id,
            answers: self.answers,
            scores,
            insights,
            metadata,
        }
    }
}

/// Bookkeeping handed to the persistence layer with every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub completion_seconds: u64,
    pub answered_items: usize,
    pub total_items: usize,
    pub reliability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: AssessmentId,
    pub answers: Answers,
    pub scores: PersonalityScores,
    pub insights: ProfileInsights,
    pub metadata: AssessmentMetadata,
}
