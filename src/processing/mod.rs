//! Skill extraction and matching engine

pub mod vocabulary;
pub mod linguistics;
pub mod extractor;
pub mod normalizer;
pub mod matcher;

pub use matcher::{compare, MatchResult, SkillMatcher};
pub use normalizer::SkillSet;
pub use vocabulary::{Vocabulary, WeightTable};
