use super::common::*;
use crate::assessment::domain::AssessmentId;
use crate::assessment::insights::InsightGenerator;
use crate::assessment::session::AssessmentSession;
use crate::assessment::ScoringEngine;

fn session() -> AssessmentSession {
    AssessmentSession::new(AssessmentId("asmt-test".to_string()), timestamp(9, 0))
}

#[test]
fn recording_replaces_previous_answers() {
    let mut session = session();

    assert_eq!(session.record(1, 4), None);
    assert_eq!(session.record(1, 2), Some(4));
    assert_eq!(session.answered_count(), 1);
    assert_eq!(session.answers().get(&1), Some(&2));
}

#[test]
fn pages_accumulate_and_answers_can_be_retracted() {
    let mut session = session();
    session.record_page([(1, 5), (2, 4)]);
    session.record_page([(3, 3), (2, 1)]);

    assert_eq!(session.answers(), &answers(&[(1, 5), (2, 1), (3, 3)]));
    assert_eq!(session.retract(2), Some(1));
    assert_eq!(session.retract(2), None);
    assert_eq!(session.answered_count(), 2);
}

#[test]
fn progress_counts_only_known_items() {
    let bank = standard_bank();
    let mut session = session();
    assert_eq!(session.progress(&bank), 0.0);

    session.record_page((1..=8).map(|id| (id, 3)));
    session.record(500, 3);

    assert_eq!(session.progress(&bank), 0.25);
    let unanswered = session.unanswered(&bank);
    assert_eq!(unanswered.len(), 24);
    assert_eq!(unanswered[0].id(), 9);
}

#[test]
fn completion_builds_result_with_metadata() {
    let bank = standard_bank();
    let mut session = session();
    session.record_page(varied_answers(&bank));
    session.record(500, 2);

    let result = session.complete(
        &bank,
        &ScoringEngine::default(),
        &InsightGenerator::new(),
        timestamp(9, 12),
    );

    assert_eq!(result.id, AssessmentId("asmt-test".to_string()));
    assert_eq!(result.answers.len(), 33);
    assert_eq!(result.metadata.answered_items, 32);
    assert_eq!(result.metadata.total_items, 32);
    assert_eq!(result.metadata.completion_seconds, 720);
    assert_eq!(
        result.metadata.reliability,
        result.scores.overall_reliability()
    );
    assert_eq!(result.insights, InsightGenerator::new().generate(&result.scores));
}

#[test]
fn completion_before_start_reports_zero_duration() {
    let bank = standard_bank();
    let session = AssessmentSession::new(AssessmentId("asmt-skew".to_string()), timestamp(10, 0));

    let result = session.complete(
        &bank,
        &ScoringEngine::default(),
        &InsightGenerator::new(),
        timestamp(9, 59),
    );

    assert_eq!(result.metadata.completion_seconds, 0);
    assert_eq!(result.metadata.answered_items, 0);
    assert_eq!(result.metadata.reliability, 0.1);
    assert_eq!(result.scores.mbti_type, "ESTJ");
}
