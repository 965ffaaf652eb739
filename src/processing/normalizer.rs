//! Noise filtering and vocabulary matching of candidate phrases

use crate::error::{Result, ResumeMatcherError};
use crate::processing::vocabulary::Vocabulary;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeSet, HashSet};

pub type SkillSet = BTreeSet<String>;

const MIN_CANDIDATE_CHARS: usize = 2;
const MAX_CANDIDATE_WORDS: usize = 5;

/// Maps candidate phrases onto vocabulary terms by substring containment
pub struct SkillNormalizer {
    matcher: AhoCorasick,
    terms: Vec<String>,
}

impl SkillNormalizer {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let terms: Vec<String> = vocabulary.terms().map(str::to_string).collect();
        // Standard semantics so overlapping searches report every contained term
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&terms)
            .map_err(|e| {
                ResumeMatcherError::Processing(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self { matcher, terms })
    }

    /// Drop noisy candidates, then collect every vocabulary term contained
    /// in a surviving candidate
    pub fn normalize_and_filter(&self, candidates: &HashSet<String>) -> SkillSet {
        let mut skills = SkillSet::new();

        for candidate in candidates {
            let candidate = candidate.trim();
            if is_noise(candidate) {
                continue;
            }

            let lowered = candidate.to_lowercase();
            for m in self.matcher.find_overlapping_iter(&lowered) {
                skills.insert(self.terms[m.pattern().as_usize()].clone());
            }
        }

        skills
    }
}

/// Rejection rules applied to the raw candidate
pub fn is_noise(candidate: &str) -> bool {
    candidate.chars().count() < MIN_CANDIDATE_CHARS
        || candidate.split_whitespace().count() > MAX_CANDIDATE_WORDS
        || candidate.chars().any(|c| c.is_numeric())
        || candidate.contains('@')
        || candidate.contains(".com")
        || !candidate.chars().any(char::is_alphabetic)
}
