//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Newline-delimited list of known skills
    pub vocabulary_path: PathBuf,
    /// Skill weights (TOML or JSON); optional on disk
    pub weights_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Enabled linguistic pipes. Without both `parser` and `ner` the
    /// extractor runs token-only.
    pub pipeline: Vec<Pipe>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipe {
    Tokenizer,
    Parser,
    Ner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub highlight: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: VocabularyConfig {
                vocabulary_path: PathBuf::from("known_skills.txt"),
                weights_path: PathBuf::from("weights.toml"),
            },
            analysis: AnalysisConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                highlight: false,
                color_output: true,
            },
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pipeline: vec![Pipe::Tokenizer, Pipe::Parser, Pipe::Ner],
        }
    }
}

impl AnalysisConfig {
    /// Lightweight pipeline: tokenizer only
    pub fn token_only() -> Self {
        Self {
            pipeline: vec![Pipe::Tokenizer],
        }
    }

    pub fn has_pipe(&self, pipe: Pipe) -> bool {
        self.pipeline.contains(&pipe)
    }
}

impl Config {
    /// Load from the user config directory, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeMatcherError::Configuration(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_pipeline_is_full() {
        let config = Config::default();
        assert!(config.analysis.has_pipe(Pipe::Parser));
        assert!(config.analysis.has_pipe(Pipe::Ner));
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_token_only_pipeline() {
        let analysis = AnalysisConfig::token_only();
        assert!(analysis.has_pipe(Pipe::Tokenizer));
        assert!(!analysis.has_pipe(Pipe::Parser));
    }

    #[test]
    fn test_toml_round_trip_keeps_pipes() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("\"parser\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.analysis.pipeline, config.analysis.pipeline);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[vocabulary]
vocabulary_path = "skills.txt"
weights_path = "weights.json"

[analysis]
pipeline = ["tokenizer"]

[output]
format = "markdown"
detailed = true
highlight = true
color_output = false
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.vocabulary.vocabulary_path, PathBuf::from("skills.txt"));
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(!config.analysis.has_pipe(Pipe::Ner));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is = not [valid").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ResumeMatcherError::Configuration(_)));
    }
}
