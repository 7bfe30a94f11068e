use crate::infra::{parse_answers, InMemoryAssessmentRepository};
use clap::{Args, ValueEnum};
use persona_ai::assessment::{
    Answers, AssessmentItem, AssessmentResult, AssessmentService, AssessmentSubmission,
    BigFiveTrait, Dimension, DiscFactor, InsightGenerator, ItemBank,
};
use persona_ai::config::{ScoringConfig, TelemetryConfig};
use persona_ai::error::AppError;
use persona_ai::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

const STRONG_AGREE: i32 = 5;
const STRONG_DISAGREE: i32 = 1;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answers as inline JSON (`{"1": 5, "2": 3}`) or a path to a JSON file
    #[arg(long, value_parser = parse_answers)]
    pub(crate) answers: Answers,
    /// Optional item bank CSV (id,text,category,reverse,weights)
    #[arg(long)]
    pub(crate) items: Option<PathBuf>,
    /// Optional normative table CSV (trait,mean,std_dev)
    #[arg(long)]
    pub(crate) norms: Option<PathBuf>,
    /// Emit the full result as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Synthetic respondent to score against the built-in item bank
    #[arg(long, value_enum, default_value_t = DemoProfile::Driver)]
    pub(crate) profile: DemoProfile,
    /// Emit the full result as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoProfile {
    #[default]
    Driver,
    Influencer,
    Steady,
    Analyst,
}

impl DemoProfile {
    fn disc_factor(self) -> DiscFactor {
        match self {
            Self::Driver => DiscFactor::Dominance,
            Self::Influencer => DiscFactor::Influence,
            Self::Steady => DiscFactor::Steadiness,
            Self::Analyst => DiscFactor::Conformity,
        }
    }

    fn mbti_type(self) -> &'static str {
        match self {
            Self::Driver => "ESTJ",
            Self::Influencer => "ENFP",
            Self::Steady => "ISFJ",
            Self::Analyst => "INTJ",
        }
    }

    fn high_traits(self) -> &'static [BigFiveTrait] {
        match self {
            Self::Driver => &[BigFiveTrait::Conscientiousness, BigFiveTrait::Extraversion],
            Self::Influencer => &[
                BigFiveTrait::Extraversion,
                BigFiveTrait::Openness,
                BigFiveTrait::Agreeableness,
            ],
            Self::Steady => &[BigFiveTrait::Agreeableness, BigFiveTrait::Conscientiousness],
            Self::Analyst => &[BigFiveTrait::Conscientiousness, BigFiveTrait::Openness],
        }
    }

    fn aligned_with(self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Disc(factor) => factor == self.disc_factor(),
            Dimension::BigFive(trait_) => self.high_traits().contains(&trait_),
            Dimension::Mbti(pole) => self.mbti_type().contains(pole.letter()),
        }
    }

    /// Agrees with items whose net weight points toward the profile, disagrees otherwise.
    fn response_for(self, item: &AssessmentItem) -> i32 {
        let lean: f64 = item
            .weights()
            .iter()
            .map(|entry| {
                if self.aligned_with(entry.dimension) {
                    entry.weight
                } else {
                    -entry.weight
                }
            })
            .sum();
        let desired = if lean > 0.0 {
            STRONG_AGREE
        } else {
            STRONG_DISAGREE
        };

        if item.reverse_scored() {
            STRONG_AGREE + STRONG_DISAGREE - desired
        } else {
            desired
        }
    }

    pub(crate) fn answers(self, bank: &ItemBank) -> Answers {
        bank.items()
            .iter()
            .map(|item| (item.id(), self.response_for(item)))
            .collect()
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        items,
        norms,
        json,
    } = args;

    init_cli_telemetry();
    let config = ScoringConfig {
        item_bank_path: items,
        norms_path: norms,
        ..ScoringConfig::default()
    };
    let service = AssessmentService::from_config(
        &config,
        Arc::new(InMemoryAssessmentRepository::default()),
    )?;
    let result = service.submit(AssessmentSubmission {
        answers,
        started_at: None,
    })?;

    emit(&result, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { profile, json } = args;

    init_cli_telemetry();
    let service = AssessmentService::from_config(
        &ScoringConfig::default(),
        Arc::new(InMemoryAssessmentRepository::default()),
    )?;
    let answers = profile.answers(service.bank());
    let result = service.submit(AssessmentSubmission {
        answers,
        started_at: None,
    })?;

    if !json {
        println!(
            "Personality assessment demo ({:?} profile, {} items)\n",
            profile,
            service.bank().len()
        );
    }
    emit(&result, json)
}

fn init_cli_telemetry() {
    telemetry::init_quiet(&TelemetryConfig {
        log_level: "warn".to_string(),
    });
}

fn emit(result: &AssessmentResult, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render_report(result));
    }
    Ok(())
}

pub(crate) fn render_report(result: &AssessmentResult) -> String {
    let scores = &result.scores;
    let insights = &result.insights;
    let mut out = String::new();

    out.push_str(&format!(
        "Assessment {} | {}/{} items answered | reliability {:.2}\n",
        result.id,
        result.metadata.answered_items,
        result.metadata.total_items,
        result.metadata.reliability
    ));

    out.push_str("\nDISC profile\n");
    for (factor, score) in scores.disc_ranking() {
        out.push_str(&format!("  {} {:<12} {:>6.1}%\n", factor.letter(), factor.label(), score));
    }
    let blend: Vec<&str> = InsightGenerator::new()
        .personality_blend(scores)
        .into_iter()
        .map(DiscFactor::letter)
        .collect();
    out.push_str(&format!("  blend: {}\n", blend.join("/")));

    out.push_str("\nBig Five percentiles\n");
    for trait_ in BigFiveTrait::ordered() {
        out.push_str(&format!(
            "  {:<18} {:>5.1}\n",
            trait_.label(),
            scores.big_five_score(trait_)
        ));
    }

    out.push_str(&format!("\nMBTI type: {}\n", scores.mbti_type));

    out.push_str(&format!("\n{}\n", insights.summary));
    push_section(&mut out, "Strengths", &insights.strengths);
    push_section(&mut out, "Development areas", &insights.development_areas);
    push_section(&mut out, "Career suggestions", &insights.career_suggestions);
    out.push_str(&format!("\nCommunication: {}\n", insights.communication_style));
    out.push_str(&format!("Leadership: {}\n", insights.leadership_style));
    push_section(&mut out, "Stress indicators", &insights.stress_indicators);
    push_section(&mut out, "Growth recommendations", &insights.growth_recommendations);

    out
}

fn push_section(out: &mut String, title: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}\n"));
    for entry in entries {
        out.push_str(&format!("  - {entry}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_result(profile: DemoProfile) -> AssessmentResult {
        let service = AssessmentService::from_config(
            &ScoringConfig::default(),
            Arc::new(InMemoryAssessmentRepository::default()),
        )
        .expect("default service");
        let answers = profile.answers(service.bank());
        service
            .submit(AssessmentSubmission {
                answers,
                started_at: None,
            })
            .expect("demo submission")
    }

    #[test]
    fn every_profile_leads_with_its_disc_factor() {
        for profile in DemoProfile::value_variants() {
            let result = demo_result(*profile);
            assert_eq!(
                result.scores.dominant_disc().0,
                profile.disc_factor(),
                "{profile:?}"
            );
            assert_eq!(result.metadata.answered_items, 32);
        }
    }

    #[test]
    fn profile_answers_respect_reverse_scoring() {
        let bank = ItemBank::standard().expect("standard bank");
        let answers = DemoProfile::Driver.answers(&bank);

        // Item 5 is a reverse-scored Dominance item.
        assert_eq!(answers.get(&5), Some(&STRONG_DISAGREE));
        assert_eq!(answers.get(&1), Some(&STRONG_AGREE));
    }

    #[test]
    fn driver_demo_reports_expected_type() {
        let result = demo_result(DemoProfile::Driver);
        assert_eq!(result.scores.mbti_type, "ESTJ");
    }

    #[test]
    fn report_lists_scores_and_insights() {
        let result = demo_result(DemoProfile::Steady);
        let report = render_report(&result);

        assert!(report.contains("DISC profile"));
        assert!(report.contains("Steadiness"));
        assert!(report.contains("MBTI type:"));
        assert!(report.contains(&result.insights.summary));
        assert!(report.contains("Growth recommendations"));
    }
}
