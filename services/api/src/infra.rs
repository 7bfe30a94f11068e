use metrics_exporter_prometheus::PrometheusHandle;
use persona_ai::assessment::{
    Answers, AssessmentId, AssessmentRepository, AssessmentResult, RepositoryError,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local result store used until a hosted backend is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentResult>>>,
}

impl InMemoryAssessmentRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AssessmentId, AssessmentResult>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, result: AssessmentResult) -> Result<AssessmentResult, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&result.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(result.id.clone(), result.clone());
        Ok(result)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentResult>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentResult>, RepositoryError> {
        let guard = self.lock()?;
        let mut results: Vec<AssessmentResult> = guard.values().cloned().collect();
        results.sort_by(|a, b| {
            b.metadata
                .completed_at
                .cmp(&a.metadata.completed_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        results.truncate(limit);
        Ok(results)
    }
}

/// Accepts either an inline JSON object (`{"1": 5}`) or a path to a JSON file.
pub(crate) fn parse_answers(raw: &str) -> Result<Answers, String> {
    let trimmed = raw.trim();
    let payload = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        std::fs::read_to_string(Path::new(trimmed))
            .map_err(|err| format!("failed to read answers from '{trimmed}' ({err})"))?
    };

    serde_json::from_str(&payload)
        .map_err(|err| format!("answers must map item ids to responses ({err})"))
}
