//! Report structures built from a match result

use crate::output::highlighter::{self, HighlightSpan, SkillGroup};
use crate::processing::extractor::ExtractionStrategy;
use crate::processing::{MatchResult, WeightTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the formatters need to render a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub overview: Overview,
    pub result: MatchResult,
    /// Matched, then missing, then extra; each sorted
    pub skill_table: Vec<SkillRow>,
    pub recommendations: Vec<String>,
    pub highlights: Vec<HighlightSpan>,
    pub job_text: String,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub score: f64,
    pub total_jd_skills: usize,
    pub matched_count: usize,
    pub missing_count: usize,
    pub extra_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRow {
    pub skill: String,
    pub group: SkillGroup,
    /// Not reported for extra skills, which do not affect the score
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub matcher_version: String,
    pub resume_file: String,
    pub job_file: String,
    pub vocabulary_size: usize,
    pub strategy: ExtractionStrategy,
}

/// Labels and engine facts recorded alongside the result
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub resume_file: String,
    pub job_file: String,
    pub vocabulary_size: usize,
    pub strategy: ExtractionStrategy,
}

impl MatchReport {
    pub fn build(
        result: MatchResult,
        weights: &WeightTable,
        job_text: &str,
        context: ReportContext,
    ) -> Self {
        let overview = Overview {
            score: result.score,
            total_jd_skills: result.matched.len() + result.missing.len(),
            matched_count: result.matched.len(),
            missing_count: result.missing.len(),
            extra_count: result.extra.len(),
        };

        let skill_table = build_skill_table(&result, weights);
        let recommendations = build_recommendations(&result);
        let highlights = highlighter::find_spans(job_text, &result);

        Self {
            overview,
            result,
            skill_table,
            recommendations,
            highlights,
            job_text: job_text.to_string(),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: context.resume_file,
                job_file: context.job_file,
                vocabulary_size: context.vocabulary_size,
                strategy: context.strategy,
            },
        }
    }
}

pub fn build_skill_table(result: &MatchResult, weights: &WeightTable) -> Vec<SkillRow> {
    let row = |skill: &String, group: SkillGroup| SkillRow {
        skill: skill.clone(),
        group,
        weight: (group != SkillGroup::Extra).then(|| weights.weight(skill)),
    };

    result
        .matched
        .iter()
        .map(|s| row(s, SkillGroup::Matched))
        .chain(result.missing.iter().map(|s| row(s, SkillGroup::Missing)))
        .chain(result.extra.iter().map(|s| row(s, SkillGroup::Extra)))
        .collect()
}

pub fn build_recommendations(result: &MatchResult) -> Vec<String> {
    let mut recommendations: Vec<String> = result
        .missing
        .iter()
        .map(|skill| format!("Consider strengthening your experience or wording related to: {}", skill))
        .collect();

    recommendations.push(
        "You can enhance your CV by adding or emphasizing the missing skills (if you already have them).".to_string(),
    );
    recommendations.push("Tailor the language in your CV to match the JD terminology.".to_string());
    recommendations
}
