//! Known-skill vocabulary and skill weight table

use crate::error::{Result, ResumeMatcherError};
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Weight used for any skill absent from the weight table
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Controlled set of skill terms, lowercased and trimmed
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: BTreeSet<String>,
}

impl Vocabulary {
    /// Load a newline-delimited vocabulary file. `#` lines and blank lines
    /// are skipped. A missing file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ResumeMatcherError::VocabularyNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let vocabulary = Self::parse(&content);

        if vocabulary.is_empty() {
            return Err(ResumeMatcherError::Vocabulary(format!(
                "No skill terms found in {}",
                path.display()
            )));
        }

        info!(
            "Loaded {} skill terms from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn parse(content: &str) -> Self {
        Self::from_terms(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() {
                continue;
            }
            // Candidates holding a digit are always rejected, so such a
            // term could never be a substring of an accepted candidate.
            if term.chars().any(|c| c.is_numeric()) {
                warn!("Skipping unmatchable skill term with digits: '{}'", term);
                continue;
            }
            set.insert(term);
        }
        Self { terms: set }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Skill → weight mapping; lookups default to [`DEFAULT_WEIGHT`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    weights: HashMap<String, f64>,
}

impl WeightTable {
    /// Load weights from a TOML or JSON document, chosen by extension.
    /// A missing file yields an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "No weights file at {}, every skill weighs {}",
                path.display(),
                DEFAULT_WEIGHT
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let raw: HashMap<String, f64> = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => serde_json::from_str(&content)
                .map_err(|e| {
                    ResumeMatcherError::Weights(format!("{}: {}", path.display(), e))
                })?,
            _ => toml::from_str(&content).map_err(|e| {
                ResumeMatcherError::Weights(format!("{}: {}", path.display(), e))
            })?,
        };

        let table = Self::from_pairs(raw);
        debug!("Loaded {} skill weights from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut weights = HashMap::new();
        for (skill, weight) in pairs {
            let skill = skill.as_ref().trim().to_lowercase();
            if !weight.is_finite() || weight <= 0.0 {
                warn!("Ignoring non-positive weight {} for '{}'", weight, skill);
                continue;
            }
            weights.insert(skill, weight);
        }
        Self { weights }
    }

    pub fn weight(&self, skill: &str) -> f64 {
        self.weights.get(skill).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Explicitly configured weight, if any
    pub fn get(&self, skill: &str) -> Option<f64> {
        self.weights.get(skill).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
