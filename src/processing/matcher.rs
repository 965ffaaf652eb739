//! CV / job description skill comparison and weighted scoring

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::processing::extractor::{CandidateExtractor, ExtractionStrategy};
use crate::processing::linguistics::LanguageModel;
use crate::processing::normalizer::{SkillNormalizer, SkillSet};
use crate::processing::vocabulary::{Vocabulary, WeightTable};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Weighted share of JD skills found in the CV, 0 to 100
    pub score: f64,
    pub matched: SkillSet,
    pub missing: SkillSet,
    pub extra: SkillSet,
    pub cv_skills: SkillSet,
    pub jd_skills: SkillSet,
}

/// Extraction + normalization + scoring. Immutable once built, so one
/// instance can be shared across threads.
pub struct SkillMatcher {
    extractor: CandidateExtractor,
    normalizer: SkillNormalizer,
    vocabulary: Arc<Vocabulary>,
}

impl SkillMatcher {
    pub fn new(model: Arc<LanguageModel>, vocabulary: Arc<Vocabulary>) -> Result<Self> {
        let normalizer = SkillNormalizer::new(&vocabulary)?;
        let extractor = CandidateExtractor::new(model);
        info!(
            "Skill matcher ready: {} vocabulary terms, {}",
            vocabulary.len(),
            extractor.strategy()
        );

        Ok(Self {
            extractor,
            normalizer,
            vocabulary,
        })
    }

    /// Build the language model from `config` and wrap it in a matcher
    pub fn from_config(config: &AnalysisConfig, vocabulary: Arc<Vocabulary>) -> Result<Self> {
        let model = LanguageModel::load(config, &vocabulary)?;
        Self::new(Arc::new(model), vocabulary)
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        self.extractor.strategy()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn extract_skills(&self, text: &str) -> SkillSet {
        let candidates = self.extractor.extract_candidates(text);
        self.normalizer.normalize_and_filter(&candidates)
    }

    pub fn match_texts(&self, cv_text: &str, jd_text: &str, weights: &WeightTable) -> MatchResult {
        let cv_skills = self.extract_skills(cv_text);
        let jd_skills = self.extract_skills(jd_text);
        compare(cv_skills, jd_skills, weights)
    }
}

/// Partition two skill sets and score the JD coverage
pub fn compare(cv_skills: SkillSet, jd_skills: SkillSet, weights: &WeightTable) -> MatchResult {
    let matched: SkillSet = cv_skills.intersection(&jd_skills).cloned().collect();
    let missing: SkillSet = jd_skills.difference(&cv_skills).cloned().collect();
    let extra: SkillSet = cv_skills.difference(&jd_skills).cloned().collect();

    let total_weight: f64 = jd_skills.iter().map(|s| weights.weight(s)).sum();
    let matched_weight: f64 = matched.iter().map(|s| weights.weight(s)).sum();

    let score = if total_weight > 0.0 {
        round2(matched_weight / total_weight * 100.0)
    } else {
        0.0
    };

    debug!(
        "matched={} missing={} extra={} score={}",
        matched.len(),
        missing.len(),
        extra.len(),
        score
    );

    MatchResult {
        score,
        matched,
        missing,
        extra,
        cv_skills,
        jd_skills,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
