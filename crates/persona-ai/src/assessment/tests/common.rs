use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::assessment::domain::{
    Answers, AssessmentId, AssessmentItem, BigFiveTrait, Dimension, DiscFactor, ItemCategory,
    ItemId, MbtiPole,
};
use crate::assessment::repository::{AssessmentRepository, RepositoryError};
use crate::assessment::scoring::PersonalityScores;
use crate::assessment::session::AssessmentResult;
use crate::assessment::{AssessmentService, ItemBank, ScoringEngine};

pub(super) fn item(id: ItemId, dimension: Dimension, weight: f64) -> AssessmentItem {
    AssessmentItem::new(
        id,
        format!("item {id}"),
        ItemCategory::Single(dimension),
        false,
        [(dimension, weight)],
    )
    .expect("valid item")
}

pub(super) fn reversed_item(id: ItemId, dimension: Dimension, weight: f64) -> AssessmentItem {
    AssessmentItem::new(
        id,
        format!("reversed item {id}"),
        ItemCategory::Single(dimension),
        true,
        [(dimension, weight)],
    )
    .expect("valid item")
}

/// Dominance, Openness, and Conscientiousness items used across scoring tests.
pub(super) fn three_item_fixture() -> Vec<AssessmentItem> {
    vec![
        item(1, Dimension::Disc(DiscFactor::Dominance), 0.8),
        item(2, Dimension::BigFive(BigFiveTrait::Openness), 0.9),
        item(3, Dimension::BigFive(BigFiveTrait::Conscientiousness), 0.85),
    ]
}

pub(super) fn answers(pairs: &[(ItemId, i32)]) -> Answers {
    pairs.iter().copied().collect()
}

pub(super) fn standard_bank() -> ItemBank {
    ItemBank::standard().expect("standard bank is valid")
}

/// Cycles through 1..=5 so every dimension sees some variance.
pub(super) fn varied_answers(bank: &ItemBank) -> Answers {
    bank.items()
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id(), (index % 5) as i32 + 1))
        .collect()
}

pub(super) fn constant_answers(bank: &ItemBank, response: i32) -> Answers {
    bank.items()
        .iter()
        .map(|item| (item.id(), response))
        .collect()
}

pub(super) fn scores_with_disc(d: f64, i: f64, s: f64, c: f64) -> PersonalityScores {
    PersonalityScores {
        disc: BTreeMap::from([
            (DiscFactor::Dominance, d),
            (DiscFactor::Influence, i),
            (DiscFactor::Steadiness, s),
            (DiscFactor::Conformity, c),
        ]),
        big_five: BigFiveTrait::ordered()
            .into_iter()
            .map(|trait_| (trait_, 50.0))
            .collect(),
        mbti_preferences: MbtiPole::ordered()
            .into_iter()
            .map(|pole| (pole, 0.0))
            .collect(),
        mbti_type: "ESTJ".to_string(),
        confidence: BTreeMap::new(),
    }
}

pub(super) fn with_trait(
    mut scores: PersonalityScores,
    trait_: BigFiveTrait,
    percentile: f64,
) -> PersonalityScores {
    scores.big_five.insert(trait_, percentile);
    scores
}

pub(super) fn timestamp(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<BTreeMap<AssessmentId, AssessmentResult>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, result: AssessmentResult) -> Result<AssessmentResult, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&result.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(result.id.clone(), result.clone());
        Ok(result)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentResult>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentResult>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        let mut results: Vec<AssessmentResult> = guard.values().cloned().collect();
        results.sort_by(|a, b| b.metadata.completed_at.cmp(&a.metadata.completed_at));
        results.truncate(limit);
        Ok(results)
    }
}

pub(super) struct ConflictRepository;

impl AssessmentRepository for ConflictRepository {
    fn insert(&self, _result: AssessmentResult) -> Result<AssessmentResult, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentResult>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentResult>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _result: AssessmentResult) -> Result<AssessmentResult, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<AssessmentService<MemoryRepository>>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = Arc::new(AssessmentService::new(
        standard_bank(),
        ScoringEngine::default(),
        Arc::new(repository.clone()),
    ));
    (service, repository)
}

pub(super) fn service_with<R>(repository: R) -> Arc<AssessmentService<R>>
where
    R: AssessmentRepository + 'static,
{
    Arc::new(AssessmentService::new(
        standard_bank(),
        ScoringEngine::default(),
        Arc::new(repository),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
