//! Document kind detection by extension

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Markdown,
    Unsupported,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => DocumentKind::Pdf,
            "txt" | "text" => DocumentKind::PlainText,
            "md" | "markdown" => DocumentKind::Markdown,
            _ => DocumentKind::Unsupported,
        }
    }

    /// `None` when the path has no usable extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::PlainText => write!(f, "plain text"),
            DocumentKind::Markdown => write!(f, "Markdown"),
            DocumentKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(DocumentKind::from_extension("PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_extension("markdown"), DocumentKind::Markdown);
        assert_eq!(DocumentKind::from_extension("docx"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_path(Path::new("cv")), None);
        assert_eq!(
            DocumentKind::from_path(Path::new("jobs/jd.txt")),
            Some(DocumentKind::PlainText)
        );
    }
}
