//! Loads documents from disk with an in-memory cache

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::DocumentKind;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let kind = DocumentKind::from_path(path).ok_or_else(|| {
            ResumeMatcherError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        info!("Reading {} document: {}", kind, path.display());
        let text = match kind {
            DocumentKind::Pdf => PdfExtractor.extract(path).await?,
            DocumentKind::PlainText => PlainTextExtractor.extract(path).await?,
            DocumentKind::Markdown => MarkdownExtractor.extract(path).await?,
            DocumentKind::Unsupported => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (expected .pdf, .txt or .md)",
                    path.display()
                )));
            }
        };

        if text.trim().is_empty() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "No text could be extracted from: {}",
                path.display()
            )));
        }

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
