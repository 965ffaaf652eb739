//! Candidate phrase extraction from raw text

use crate::config::Pipe;
use crate::processing::linguistics::LanguageModel;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// How candidates are produced, fixed when the extractor is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionStrategy {
    /// Noun chunks, entities and tokens
    FullAnalysis,
    /// Tokens only; used when the model lacks a parser or recognizer
    TokenOnly,
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStrategy::FullAnalysis => write!(f, "full analysis"),
            ExtractionStrategy::TokenOnly => write!(f, "token only"),
        }
    }
}

pub struct CandidateExtractor {
    model: Arc<LanguageModel>,
    strategy: ExtractionStrategy,
}

impl CandidateExtractor {
    pub fn new(model: Arc<LanguageModel>) -> Self {
        let strategy = if model.has_pipe(Pipe::Parser) && model.has_pipe(Pipe::Ner) {
            ExtractionStrategy::FullAnalysis
        } else {
            warn!(
                "Language model has no parser or entity recognizer (pipes: {}), falling back to token-only extraction",
                model.pipe_names().join(", ")
            );
            ExtractionStrategy::TokenOnly
        };

        Self { model, strategy }
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        self.strategy
    }

    /// Union of noun chunks, skill-like entities and content tokens,
    /// trimmed but not yet filtered for noise
    pub fn extract_candidates(&self, text: &str) -> HashSet<String> {
        let lowered = text.to_lowercase();
        let tokens = self.model.tokenize(&lowered);
        let mut candidates = HashSet::new();

        if self.strategy == ExtractionStrategy::FullAnalysis {
            candidates.extend(self.model.noun_chunks(&tokens));
            candidates.extend(
                self.model
                    .entities(&lowered)
                    .into_iter()
                    .filter(|entity| entity.label.is_skill_like())
                    .map(|entity| entity.text),
            );
        }

        candidates.extend(
            tokens
                .into_iter()
                .filter(|token| {
                    !token.is_stop && !token.is_punct && !token.like_email && !token.like_url
                })
                .map(|token| token.text),
        );

        let candidates: HashSet<String> = candidates
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        debug!(
            "Extracted {} candidates ({})",
            candidates.len(),
            self.strategy
        );
        candidates
    }
}
